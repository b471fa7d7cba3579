//! Widget entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use gridboard_core::types::{DbId, Timestamp};

/// A row from the `widgets` table.
///
/// `column_index` and `row_index` are 1-based. `name` is a title
/// snapshot taken from the widget definition at creation time, so
/// renaming a definition does not rewrite existing dashboards.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Widget {
    pub id: DbId,
    pub dashboard_id: DbId,
    pub widget_key: String,
    pub name: String,
    pub column_index: i32,
    pub row_index: i32,
    /// True only while every required property holds a valid value.
    pub configured: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a widget. Position and initial `configured` state
/// are computed by the caller from the dashboard and the definition.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWidget {
    pub dashboard_id: DbId,
    pub widget_key: String,
    pub name: String,
    pub column_index: i32,
    pub row_index: i32,
    pub configured: bool,
}
