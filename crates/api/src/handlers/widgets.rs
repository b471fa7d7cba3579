//! Handlers for widget placement, creation, and configuration.

use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use gridboard_core::error::CoreError;
use gridboard_core::layout;
use gridboard_core::properties::stage_configuration;
use gridboard_core::types::DbId;
use gridboard_db::models::widget::CreateWidget;
use gridboard_db::repositories::{DashboardRepo, WidgetRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::ensure_editable;
use crate::middleware::viewer::RequireViewer;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Body for `PUT /dashboards/{did}/widgets/state`.
#[derive(Debug, Deserialize)]
pub struct SetLayoutState {
    /// Serialized arrangement, e.g. `"5,6;7;;9,10"`.
    pub state: String,
}

/// Body for `POST /dashboards/{did}/widgets`.
#[derive(Debug, Deserialize)]
pub struct AddWidget {
    pub widget_key: String,
}

/// Body for `PUT /widgets/{wid}/properties`.
#[derive(Debug, Deserialize)]
pub struct SaveWidgetProperties {
    /// Submitted property values by key. Keys the definition declares
    /// but the client omits fall back to their defaults.
    #[serde(default)]
    pub values: BTreeMap<String, String>,
}

/// Result of a placement reconciliation.
#[derive(Debug, Serialize)]
pub struct PlacementSummary {
    pub placed: Vec<DbId>,
    pub removed: u64,
}

/// Result of a configuration apply, structured so the client can render
/// inline feedback without re-deriving which properties failed.
#[derive(Debug, Serialize)]
pub struct ConfigurationOutcome {
    pub configured: bool,
    pub errors_by_key: BTreeMap<String, Vec<String>>,
}

// ---------------------------------------------------------------------------
// Placement reconciliation
// ---------------------------------------------------------------------------

/// PUT /api/v1/dashboards/{did}/widgets/state
///
/// Make persisted placement match the submitted layout state exactly.
/// The plan is authoritative: widgets it omits are destroyed.
pub async fn set_state(
    RequireViewer(viewer): RequireViewer,
    State(state): State<AppState>,
    Path(dashboard_id): Path<DbId>,
    Json(input): Json<SetLayoutState>,
) -> AppResult<impl IntoResponse> {
    // Parse before any lookup so malformed input mutates nothing.
    let plan = layout::parse_layout_state(&input.state)?;

    let dashboard = DashboardRepo::find_by_id(&state.pool, dashboard_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Dashboard",
            id: dashboard_id,
        }))?;
    ensure_editable(&dashboard, &viewer)?;

    let outcome = WidgetRepo::apply_placements(&state.pool, dashboard.id, &plan).await?;

    tracing::info!(
        dashboard_id,
        placed = outcome.placed.len(),
        removed = outcome.removed,
        "Widget placements reconciled",
    );

    Ok(Json(DataResponse {
        data: PlacementSummary {
            placed: outcome.placed,
            removed: outcome.removed,
        },
    }))
}

// ---------------------------------------------------------------------------
// Widget creation
// ---------------------------------------------------------------------------

/// POST /api/v1/dashboards/{did}/widgets
///
/// Append a widget to the last column. A widget whose definition has no
/// required properties starts configured.
pub async fn add_widget(
    RequireViewer(viewer): RequireViewer,
    State(state): State<AppState>,
    Path(dashboard_id): Path<DbId>,
    Json(input): Json<AddWidget>,
) -> AppResult<impl IntoResponse> {
    let dashboard = DashboardRepo::find_by_id(&state.pool, dashboard_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Dashboard",
            id: dashboard_id,
        }))?;
    ensure_editable(&dashboard, &viewer)?;

    let definition = state.registry.get_definition(&input.widget_key).ok_or(
        AppError::Core(CoreError::NotFoundByKey {
            entity: "WidgetDefinition",
            key: input.widget_key.clone(),
        }),
    )?;

    let column = dashboard.number_of_columns() as i32;
    let row = WidgetRepo::count_in_column(&state.pool, dashboard.id, column).await? as i32 + 1;

    let widget = WidgetRepo::create(
        &state.pool,
        &CreateWidget {
            dashboard_id: dashboard.id,
            widget_key: definition.key.clone(),
            name: definition.title.clone(),
            column_index: column,
            row_index: row,
            configured: !definition.has_required_properties(),
        },
    )
    .await?;

    tracing::info!(
        widget_id = widget.id,
        dashboard_id,
        widget_key = %widget.widget_key,
        "Widget added",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: widget })))
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// PUT /api/v1/widgets/{wid}/properties
///
/// Validate the full property set and apply it atomically: every key is
/// persisted or every key is unset, and `configured` reflects the
/// outcome. Validation failures respond 422 with the per-key error map.
pub async fn save_properties(
    RequireViewer(viewer): RequireViewer,
    State(state): State<AppState>,
    Path(widget_id): Path<DbId>,
    Json(input): Json<SaveWidgetProperties>,
) -> AppResult<impl IntoResponse> {
    let widget = WidgetRepo::find_by_id(&state.pool, widget_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Widget",
            id: widget_id,
        }))?;
    let dashboard = DashboardRepo::find_by_id(&state.pool, widget.dashboard_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Dashboard",
            id: widget.dashboard_id,
        }))?;
    ensure_editable(&dashboard, &viewer)?;

    let definition = state.registry.get_definition(&widget.widget_key).ok_or(
        AppError::Core(CoreError::NotFoundByKey {
            entity: "WidgetDefinition",
            key: widget.widget_key.clone(),
        }),
    )?;

    let staging = stage_configuration(&definition.properties, &input.values);
    let configured = WidgetRepo::apply_configuration(&state.pool, widget.id, &staging).await?;

    if configured {
        tracing::info!(widget_id, widget_key = %widget.widget_key, "Widget configured");
    }

    let status = if configured {
        StatusCode::OK
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };

    Ok((
        status,
        Json(DataResponse {
            data: ConfigurationOutcome {
                configured,
                errors_by_key: staging.errors_by_key,
            },
        }),
    ))
}
