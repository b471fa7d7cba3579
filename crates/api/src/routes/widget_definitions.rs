//! Route definitions for the widget definition registry.
//!
//! ```text
//! GET / -> widget_definitions::list
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::widget_definitions;
use crate::state::AppState;

/// Definition routes mounted at `/widget-definitions`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(widget_definitions::list))
}
