//! Repository for the `widget_properties` table.
//!
//! Bulk writes tied to a configuration outcome live in
//! `WidgetRepo::apply_configuration`; this repo covers reads and the
//! single-row operations.

use sqlx::PgPool;

use gridboard_core::types::DbId;

use crate::models::widget_property::WidgetProperty;

/// Column list for `widget_properties` queries.
const COLUMNS: &str = "id, widget_id, prop_key, text_value, value_type, created_at, updated_at";

/// Provides read and single-row access to widget properties.
pub struct WidgetPropertyRepo;

impl WidgetPropertyRepo {
    /// List a widget's properties by key order.
    pub async fn list_by_widget(
        pool: &PgPool,
        widget_id: DbId,
    ) -> Result<Vec<WidgetProperty>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM widget_properties \
             WHERE widget_id = $1 ORDER BY prop_key ASC"
        );
        sqlx::query_as::<_, WidgetProperty>(&query)
            .bind(widget_id)
            .fetch_all(pool)
            .await
    }

    /// Set one property, overwriting any previous value for the key.
    pub async fn upsert(
        pool: &PgPool,
        widget_id: DbId,
        prop_key: &str,
        text_value: &str,
        value_type: &str,
    ) -> Result<WidgetProperty, sqlx::Error> {
        let query = format!(
            "INSERT INTO widget_properties (widget_id, prop_key, text_value, value_type) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (widget_id, prop_key) DO UPDATE \
             SET text_value = EXCLUDED.text_value, \
                 value_type = EXCLUDED.value_type, \
                 updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WidgetProperty>(&query)
            .bind(widget_id)
            .bind(prop_key)
            .bind(text_value)
            .bind(value_type)
            .fetch_one(pool)
            .await
    }

    /// Remove one property. Returns `true` if a row was deleted.
    pub async fn delete(
        pool: &PgPool,
        widget_id: DbId,
        prop_key: &str,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM widget_properties WHERE widget_id = $1 AND prop_key = $2")
                .bind(widget_id)
                .bind(prop_key)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
