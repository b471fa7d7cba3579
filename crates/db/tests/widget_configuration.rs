//! Integration tests for atomic property-set application.
//!
//! The staged outcome of `stage_configuration` is applied all-or-
//! nothing: a single invalid property routes the entire set to the
//! unset branch, including keys that validated individually.

use std::collections::BTreeMap;

use sqlx::PgPool;

use gridboard_core::properties::{
    stage_configuration, PropertyKind, WidgetPropertyDefinition,
};
use gridboard_core::types::DbId;
use gridboard_db::models::dashboard::CreateDashboard;
use gridboard_db::models::widget::{CreateWidget, Widget};
use gridboard_db::repositories::{DashboardRepo, WidgetPropertyRepo, WidgetRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_widget(pool: &PgPool) -> Widget {
    let dashboard = DashboardRepo::create(
        pool,
        Some(1),
        &CreateDashboard {
            name: "Board".to_string(),
            description: None,
            column_layout: None,
            shared: None,
        },
    )
    .await
    .unwrap();
    WidgetRepo::create(
        pool,
        &CreateWidget {
            dashboard_id: dashboard.id,
            widget_key: "measures".to_string(),
            name: "Measures".to_string(),
            column_index: 1,
            row_index: 1,
            configured: false,
        },
    )
    .await
    .unwrap()
}

fn def(key: &str, kind: PropertyKind, required: bool) -> WidgetPropertyDefinition {
    WidgetPropertyDefinition {
        key: key.to_string(),
        default_value: String::new(),
        kind,
        required,
    }
}

fn submitted(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

async fn stored_value(pool: &PgPool, widget_id: DbId, key: &str) -> Option<String> {
    WidgetPropertyRepo::list_by_widget(pool, widget_id)
        .await
        .unwrap()
        .into_iter()
        .find(|p| p.prop_key == key)
        .map(|p| p.text_value)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn valid_set_persists_every_value_and_configures(pool: PgPool) {
    let widget = new_widget(&pool).await;
    let defs = vec![
        def("metric", PropertyKind::Text, true),
        def("limit", PropertyKind::Integer, false),
    ];
    let staging = stage_configuration(&defs, &submitted(&[("metric", "coverage"), ("limit", "5")]));

    let configured = WidgetRepo::apply_configuration(&pool, widget.id, &staging)
        .await
        .unwrap();
    assert!(configured);

    let widget = WidgetRepo::find_by_id(&pool, widget.id).await.unwrap().unwrap();
    assert!(widget.configured);
    assert_eq!(stored_value(&pool, widget.id, "metric").await.as_deref(), Some("coverage"));
    assert_eq!(stored_value(&pool, widget.id, "limit").await.as_deref(), Some("5"));

    let props = WidgetPropertyRepo::list_by_widget(&pool, widget.id).await.unwrap();
    assert!(props.iter().any(|p| p.prop_key == "limit" && p.value_type == "integer"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn one_invalid_property_unsets_the_whole_set(pool: PgPool) {
    let widget = new_widget(&pool).await;
    let defs = vec![
        def("metric", PropertyKind::Text, true),
        def("threshold", PropertyKind::Integer, true),
    ];
    // "metric" is individually valid; "threshold" is missing.
    let staging = stage_configuration(&defs, &submitted(&[("metric", "coverage")]));
    assert_eq!(staging.errors_by_key.len(), 1);
    assert!(staging.errors_by_key.contains_key("threshold"));

    let configured = WidgetRepo::apply_configuration(&pool, widget.id, &staging)
        .await
        .unwrap();
    assert!(!configured);

    let widget = WidgetRepo::find_by_id(&pool, widget.id).await.unwrap().unwrap();
    assert!(!widget.configured);
    // The individually-valid key was unset along with the rest.
    assert_eq!(stored_value(&pool, widget.id, "metric").await, None);
    assert!(WidgetPropertyRepo::list_by_widget(&pool, widget.id).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn failed_reapply_clears_previously_valid_configuration(pool: PgPool) {
    let widget = new_widget(&pool).await;
    let defs = vec![def("metric", PropertyKind::Text, true)];

    let good = stage_configuration(&defs, &submitted(&[("metric", "coverage")]));
    assert!(WidgetRepo::apply_configuration(&pool, widget.id, &good).await.unwrap());

    // A later submission that fails validation must not leave the old
    // value behind.
    let bad = stage_configuration(&defs, &submitted(&[]));
    assert!(!WidgetRepo::apply_configuration(&pool, widget.id, &bad).await.unwrap());
    assert_eq!(stored_value(&pool, widget.id, "metric").await, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn successful_apply_drops_keys_the_definition_no_longer_has(pool: PgPool) {
    let widget = new_widget(&pool).await;
    WidgetPropertyRepo::upsert(&pool, widget.id, "retired", "old", "text")
        .await
        .unwrap();

    let defs = vec![def("metric", PropertyKind::Text, true)];
    let staging = stage_configuration(&defs, &submitted(&[("metric", "coverage")]));
    assert!(WidgetRepo::apply_configuration(&pool, widget.id, &staging).await.unwrap());

    assert_eq!(stored_value(&pool, widget.id, "retired").await, None);
    assert_eq!(stored_value(&pool, widget.id, "metric").await.as_deref(), Some("coverage"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn upsert_overwrites_existing_value(pool: PgPool) {
    let widget = new_widget(&pool).await;
    WidgetPropertyRepo::upsert(&pool, widget.id, "limit", "5", "integer")
        .await
        .unwrap();
    let updated = WidgetPropertyRepo::upsert(&pool, widget.id, "limit", "10", "integer")
        .await
        .unwrap();
    assert_eq!(updated.text_value, "10");

    let props = WidgetPropertyRepo::list_by_widget(&pool, widget.id).await.unwrap();
    assert_eq!(props.len(), 1, "upsert must not duplicate the key");
}
