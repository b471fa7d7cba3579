use std::sync::Arc;

use gridboard_core::definitions::WidgetDefinitionProvider;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: gridboard_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Widget definition registry, loaded once at startup.
    pub registry: Arc<dyn WidgetDefinitionProvider>,
}
