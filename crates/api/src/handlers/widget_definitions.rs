//! Handlers for listing widget definitions.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use gridboard_core::definitions::{is_authorized, WidgetDefinition};
use gridboard_core::error::CoreError;
use gridboard_db::repositories::ResourceRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::viewer::CurrentViewer;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query params for `GET /widget-definitions`.
#[derive(Debug, Deserialize)]
pub struct DefinitionQuery {
    /// When present, restrict to definitions applicable to this
    /// resource and authorized for the viewer. Without it the full
    /// registry is returned (configuration view).
    pub resource: Option<String>,
}

/// GET /api/v1/widget-definitions
pub async fn list(
    CurrentViewer(viewer): CurrentViewer,
    State(state): State<AppState>,
    Query(params): Query<DefinitionQuery>,
) -> AppResult<impl IntoResponse> {
    let definitions: Vec<WidgetDefinition> = match params.resource {
        Some(ref key) => {
            let resource = ResourceRepo::find_by_key(&state.pool, key).await?.ok_or(
                AppError::Core(CoreError::NotFoundByKey {
                    entity: "Resource",
                    key: key.clone(),
                }),
            )?;
            state
                .registry
                .list_definitions(
                    Some(&resource.scope),
                    Some(&resource.qualifier),
                    resource.language.as_deref(),
                )
                .into_iter()
                .filter(|d| is_authorized(d, viewer.roles()))
                .cloned()
                .collect()
        }
        None => state
            .registry
            .list_definitions(None, None, None)
            .into_iter()
            .cloned()
            .collect(),
    };

    Ok(Json(DataResponse { data: definitions }))
}
