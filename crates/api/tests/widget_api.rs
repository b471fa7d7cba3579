//! HTTP-level integration tests for widget creation, placement
//! reconciliation, and configuration.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, build_test_app, get, post_json_as, put_json_as, send};
use serde_json::json;
use sqlx::PgPool;

use gridboard_core::types::DbId;
use gridboard_db::models::dashboard::{CreateDashboard, Dashboard};
use gridboard_db::models::resource::CreateResource;
use gridboard_db::models::widget::{CreateWidget, Widget};
use gridboard_db::repositories::{
    DashboardRepo, ResourceRepo, WidgetPropertyRepo, WidgetRepo,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn owned_dashboard(pool: &PgPool, user_id: DbId, layout: &str) -> Dashboard {
    DashboardRepo::create(
        pool,
        Some(user_id),
        &CreateDashboard {
            name: "My board".to_string(),
            description: None,
            column_layout: Some(layout.to_string()),
            shared: None,
        },
    )
    .await
    .unwrap()
}

async fn widget_at(pool: &PgPool, dashboard_id: DbId, column: i32, row: i32) -> Widget {
    WidgetRepo::create(
        pool,
        &CreateWidget {
            dashboard_id,
            widget_key: "news".to_string(),
            name: "Latest News".to_string(),
            column_index: column,
            row_index: row,
            configured: true,
        },
    )
    .await
    .unwrap()
}

// ---------------------------------------------------------------------------
// Adding widgets
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_add_widget_appends_to_the_last_column(pool: PgPool) {
    let dashboard = owned_dashboard(&pool, 7, "30-30-40").await;
    widget_at(&pool, dashboard.id, 3, 1).await;
    widget_at(&pool, dashboard.id, 3, 2).await;
    let app = build_test_app(pool);

    let response = post_json_as(
        app,
        &format!("/api/v1/dashboards/{}/widgets", dashboard.id),
        7,
        json!({ "widget_key": "news" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["column_index"], 3);
    assert_eq!(json["data"]["row_index"], 3);
    assert_eq!(json["data"]["name"], "Latest News");
    // No required properties: the widget starts configured.
    assert_eq!(json["data"]["configured"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_add_widget_with_required_properties_starts_unconfigured(pool: PgPool) {
    let dashboard = owned_dashboard(&pool, 7, "50-50").await;
    let app = build_test_app(pool);

    let response = post_json_as(
        app,
        &format!("/api/v1/dashboards/{}/widgets", dashboard.id),
        7,
        json!({ "widget_key": "measure_filter" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["configured"], false);
    assert_eq!(json["data"]["column_index"], 2);
    assert_eq!(json["data"]["row_index"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_add_widget_with_unknown_definition_is_404(pool: PgPool) {
    let dashboard = owned_dashboard(&pool, 7, "50-50").await;
    let app = build_test_app(pool.clone());

    let response = post_json_as(
        app,
        &format!("/api/v1/dashboards/{}/widgets", dashboard.id),
        7,
        json!({ "widget_key": "does_not_exist" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(WidgetRepo::list_by_dashboard(&pool, dashboard.id)
        .await
        .unwrap()
        .is_empty());
}

// ---------------------------------------------------------------------------
// Placement reconciliation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_set_state_moves_and_destroys(pool: PgPool) {
    let dashboard = owned_dashboard(&pool, 7, "50-50").await;
    let w1 = widget_at(&pool, dashboard.id, 1, 1).await;
    let w2 = widget_at(&pool, dashboard.id, 1, 2).await;
    let gone = widget_at(&pool, dashboard.id, 2, 1).await;
    let app = build_test_app(pool.clone());

    let response = put_json_as(
        app,
        &format!("/api/v1/dashboards/{}/widgets/state", dashboard.id),
        7,
        json!({ "state": format!("{};{}", w2.id, w1.id) }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["placed"], json!([w2.id, w1.id]));
    assert_eq!(json["data"]["removed"], 1);

    let w1 = WidgetRepo::find_by_id(&pool, w1.id).await.unwrap().unwrap();
    let w2 = WidgetRepo::find_by_id(&pool, w2.id).await.unwrap().unwrap();
    assert_eq!((w2.column_index, w2.row_index), (1, 1));
    assert_eq!((w1.column_index, w1.row_index), (2, 1));
    assert!(WidgetRepo::find_by_id(&pool, gone.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_set_state_rejects_malformed_ids_without_mutating(pool: PgPool) {
    let dashboard = owned_dashboard(&pool, 7, "50-50").await;
    let w1 = widget_at(&pool, dashboard.id, 1, 1).await;
    let app = build_test_app(pool.clone());

    let response = put_json_as(
        app,
        &format!("/api/v1/dashboards/{}/widgets/state", dashboard.id),
        7,
        json!({ "state": format!("{},oops", w1.id) }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "PARSE_ERROR");

    // The widget survived and kept its position.
    let w1 = WidgetRepo::find_by_id(&pool, w1.id).await.unwrap().unwrap();
    assert_eq!((w1.column_index, w1.row_index), (1, 1));
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

async fn configurable_widget(pool: &PgPool, user_id: DbId) -> Widget {
    let dashboard = owned_dashboard(pool, user_id, "50-50").await;
    WidgetRepo::create(
        pool,
        &CreateWidget {
            dashboard_id: dashboard.id,
            widget_key: "measure_filter".to_string(),
            name: "Measure Filter".to_string(),
            column_index: 1,
            row_index: 1,
            configured: false,
        },
    )
    .await
    .unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_save_properties_configures_on_valid_set(pool: PgPool) {
    let widget = configurable_widget(&pool, 7).await;
    let app = build_test_app(pool.clone());

    let response = put_json_as(
        app,
        &format!("/api/v1/widgets/{}/properties", widget.id),
        7,
        json!({ "values": { "filter": "coverage < 80" } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["configured"], true);
    assert!(json["data"]["errors_by_key"].as_object().unwrap().is_empty());

    // The omitted optional key was filled from its default.
    let props = WidgetPropertyRepo::list_by_widget(&pool, widget.id).await.unwrap();
    let limit = props.iter().find(|p| p.prop_key == "limit").unwrap();
    assert_eq!(limit.text_value, "10");
    assert_eq!(limit.value_type, "integer");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_save_properties_unsets_everything_on_any_error(pool: PgPool) {
    let widget = configurable_widget(&pool, 7).await;
    let app = build_test_app(pool.clone());

    // "limit" is individually valid; the required "filter" is missing.
    let response = put_json_as(
        app,
        &format!("/api/v1/widgets/{}/properties", widget.id),
        7,
        json!({ "values": { "limit": "25" } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    assert_eq!(json["data"]["configured"], false);
    let errors = json["data"]["errors_by_key"].as_object().unwrap();
    assert_eq!(errors.len(), 1);
    assert!(errors.contains_key("filter"));

    // All-or-nothing: even the valid key was not persisted.
    assert!(WidgetPropertyRepo::list_by_widget(&pool, widget.id)
        .await
        .unwrap()
        .is_empty());
    let widget = WidgetRepo::find_by_id(&pool, widget.id).await.unwrap().unwrap();
    assert!(!widget.configured);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_save_properties_requires_the_owner(pool: PgPool) {
    let widget = configurable_widget(&pool, 7).await;
    let app = build_test_app(pool);

    let response = put_json_as(
        app,
        &format!("/api/v1/widgets/{}/properties", widget.id),
        8,
        json!({ "values": { "filter": "x" } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Definition listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_definition_listing_filters_by_resource_and_role(pool: PgPool) {
    ResourceRepo::create(
        &pool,
        &CreateResource {
            resource_key: "demo".to_string(),
            name: "Demo Project".to_string(),
            scope: "PRJ".to_string(),
            qualifier: "TRK".to_string(),
            language: None,
        },
    )
    .await
    .unwrap();
    let app = build_test_app(pool);

    // Role-less viewer: admin-only definition hidden.
    let response = get(app.clone(), "/api/v1/widget-definitions?resource=demo").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let keys: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["key"].as_str().unwrap())
        .collect();
    assert!(keys.contains(&"news"));
    assert!(!keys.contains(&"admin_audit"));

    // Admin role: the admin-only definition appears.
    let response = send(
        app.clone(),
        Method::GET,
        "/api/v1/widget-definitions?resource=demo",
        Some(1),
        Some("admin"),
        None,
    )
    .await;
    let json = body_json(response).await;
    let keys: Vec<String> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["key"].as_str().unwrap().to_string())
        .collect();
    assert!(keys.contains(&"admin_audit".to_string()));

    // No resource filter: the configure view lists the full registry.
    let response = get(app, "/api/v1/widget-definitions").await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 4);
}
