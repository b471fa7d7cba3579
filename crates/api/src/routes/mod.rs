pub mod dashboards;
pub mod health;
pub mod widget_definitions;
pub mod widgets;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /dashboards/active                     resolve dashboard for viewer
/// /dashboards/{did}/layout               replace column layout
/// /dashboards/{did}/widgets              add widget
/// /dashboards/{did}/widgets/state        reconcile placements
///
/// /widgets/{wid}/properties              apply configuration
///
/// /widget-definitions                    list definitions
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/dashboards", dashboards::router())
        .nest("/widgets", widgets::router())
        .nest("/widget-definitions", widget_definitions::router())
}
