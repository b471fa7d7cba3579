//! Route definitions for dashboard resolution and dashboard-scoped
//! widget mutation.
//!
//! ```text
//! GET  /active               -> dashboards::show
//! PUT  /{did}/layout         -> dashboards::set_layout
//! POST /{did}/widgets        -> widgets::add_widget
//! PUT  /{did}/widgets/state  -> widgets::set_state
//! ```

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{dashboards, widgets};
use crate::state::AppState;

/// Dashboard routes mounted at `/dashboards`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/active", get(dashboards::show))
        .route("/{did}/layout", put(dashboards::set_layout))
        .route("/{did}/widgets", post(widgets::add_widget))
        .route("/{did}/widgets/state", put(widgets::set_state))
}
