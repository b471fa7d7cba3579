//! Resource entity model: the thing a dashboard is viewed against.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use gridboard_core::types::{DbId, Timestamp};

/// A row from the `resources` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Resource {
    pub id: DbId,
    pub resource_key: String,
    pub name: String,
    /// Resource scope (e.g. `PRJ`), used to filter widget definitions.
    pub scope: String,
    pub qualifier: String,
    pub language: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a resource.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateResource {
    pub resource_key: String,
    pub name: String,
    pub scope: String,
    pub qualifier: String,
    pub language: Option<String>,
}
