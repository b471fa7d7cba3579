//! Handlers for dashboard resolution and column layout editing.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use gridboard_core::definitions::{is_authorized, WidgetDefinition};
use gridboard_core::error::CoreError;
use gridboard_core::layout;
use gridboard_core::types::DbId;
use gridboard_db::models::dashboard::{Dashboard, UpdateColumnLayout};
use gridboard_db::models::resource::Resource;
use gridboard_db::models::widget::Widget;
use gridboard_db::models::widget_property::WidgetProperty;
use gridboard_db::repositories::{
    ActiveDashboardRepo, DashboardRepo, DashboardSelector, ResourceRepo, WidgetPropertyRepo,
    WidgetRepo,
};

use crate::error::{AppError, AppResult};
use crate::handlers::ensure_editable;
use crate::middleware::viewer::{CurrentViewer, RequireViewer};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameters and response types
// ---------------------------------------------------------------------------

/// Query params for `GET /dashboards/active`.
#[derive(Debug, Deserialize)]
pub struct ActiveDashboardQuery {
    /// Key of the resource the dashboard is viewed against.
    pub resource: String,
    /// Explicit dashboard id, tried before `name`.
    pub did: Option<DbId>,
    /// Dashboard name, tried when no id is given.
    pub name: Option<String>,
}

/// One widget with its stored configuration.
#[derive(Debug, Serialize)]
pub struct WidgetView {
    pub widget: Widget,
    pub properties: Vec<WidgetProperty>,
}

/// The resolved dashboard with everything the client needs to render
/// the page skeleton.
#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub resource: Resource,
    pub dashboard: Dashboard,
    pub widgets: Vec<WidgetView>,
    /// Definitions this viewer may add on this resource.
    pub available_definitions: Vec<WidgetDefinition>,
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// GET /api/v1/dashboards/active
///
/// Resolve the dashboard to display for the viewer, resource, and
/// optional selector, falling back from personal activations to the
/// system defaults.
pub async fn show(
    CurrentViewer(viewer): CurrentViewer,
    State(state): State<AppState>,
    Query(params): Query<ActiveDashboardQuery>,
) -> AppResult<impl IntoResponse> {
    let resource = ResourceRepo::find_by_key(&state.pool, &params.resource)
        .await?
        .ok_or(AppError::Core(CoreError::NotFoundByKey {
            entity: "Resource",
            key: params.resource.clone(),
        }))?;

    let selector = DashboardSelector {
        by_id: params.did,
        by_name: params.name.clone(),
    };
    let dashboard = ActiveDashboardRepo::resolve(&state.pool, &viewer, &selector)
        .await?
        .ok_or_else(|| dashboard_not_found(&selector))?;

    let mut widgets = Vec::new();
    for widget in WidgetRepo::list_by_dashboard(&state.pool, dashboard.id).await? {
        let properties = WidgetPropertyRepo::list_by_widget(&state.pool, widget.id).await?;
        widgets.push(WidgetView { widget, properties });
    }

    let available_definitions: Vec<WidgetDefinition> = state
        .registry
        .list_definitions(
            Some(&resource.scope),
            Some(&resource.qualifier),
            resource.language.as_deref(),
        )
        .into_iter()
        .filter(|d| is_authorized(d, viewer.roles()))
        .cloned()
        .collect();

    Ok(Json(DataResponse {
        data: DashboardView {
            resource,
            dashboard,
            widgets,
            available_definitions,
        },
    }))
}

fn dashboard_not_found(selector: &DashboardSelector) -> AppError {
    match (selector.by_id, selector.by_name.as_deref()) {
        (Some(id), _) => AppError::Core(CoreError::NotFound {
            entity: "Dashboard",
            id,
        }),
        (None, Some(name)) => AppError::Core(CoreError::NotFoundByKey {
            entity: "Dashboard",
            key: name.to_string(),
        }),
        (None, None) => AppError::Core(CoreError::NotFoundByKey {
            entity: "Dashboard",
            key: "default".to_string(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Column layout
// ---------------------------------------------------------------------------

/// PUT /api/v1/dashboards/{did}/layout
///
/// Replace the dashboard's column layout. Widgets beyond the new column
/// count are clamped into the last remaining column, never dropped.
pub async fn set_layout(
    RequireViewer(viewer): RequireViewer,
    State(state): State<AppState>,
    Path(dashboard_id): Path<DbId>,
    Json(input): Json<UpdateColumnLayout>,
) -> AppResult<impl IntoResponse> {
    // Validate before touching anything so a bad layout mutates nothing.
    let columns = layout::column_count(&input.column_layout)?;

    let dashboard = DashboardRepo::find_by_id(&state.pool, dashboard_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Dashboard",
            id: dashboard_id,
        }))?;
    ensure_editable(&dashboard, &viewer)?;

    let dashboard =
        DashboardRepo::update_column_layout(&state.pool, dashboard_id, &input.column_layout)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Dashboard",
                id: dashboard_id,
            }))?;
    let moved = WidgetRepo::clamp_columns(&state.pool, dashboard_id, columns as i32).await?;

    tracing::info!(
        dashboard_id,
        columns,
        widgets_moved = moved,
        "Column layout updated",
    );

    Ok(Json(DataResponse { data: dashboard }))
}
