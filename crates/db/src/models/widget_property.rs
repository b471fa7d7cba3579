//! Widget property model: string-typed configuration storage.

use serde::Serialize;
use sqlx::FromRow;

use gridboard_core::types::{DbId, Timestamp};

/// A row from the `widget_properties` table. One row per
/// `(widget, key)`; the declared type travels with the value.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WidgetProperty {
    pub id: DbId,
    pub widget_id: DbId,
    pub prop_key: String,
    pub text_value: String,
    pub value_type: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
