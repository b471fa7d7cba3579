//! Route definitions for widget-scoped operations.
//!
//! ```text
//! PUT /{wid}/properties -> widgets::save_properties
//! ```

use axum::routing::put;
use axum::Router;

use crate::handlers::widgets;
use crate::state::AppState;

/// Widget routes mounted at `/widgets`.
pub fn router() -> Router<AppState> {
    Router::new().route("/{wid}/properties", put(widgets::save_properties))
}
