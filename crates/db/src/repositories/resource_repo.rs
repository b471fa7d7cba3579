//! Repository for the `resources` table.

use sqlx::PgPool;

use gridboard_core::types::DbId;

use crate::models::resource::{CreateResource, Resource};

/// Column list for `resources` queries.
const COLUMNS: &str =
    "id, resource_key, name, scope, qualifier, language, created_at, updated_at";

/// Provides lookup and registration for resources.
pub struct ResourceRepo;

impl ResourceRepo {
    /// Find a resource by its external key. Returns `None` when unknown.
    pub async fn find_by_key(
        pool: &PgPool,
        resource_key: &str,
    ) -> Result<Option<Resource>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM resources WHERE resource_key = $1");
        sqlx::query_as::<_, Resource>(&query)
            .bind(resource_key)
            .fetch_optional(pool)
            .await
    }

    /// Find a resource by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Resource>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM resources WHERE id = $1");
        sqlx::query_as::<_, Resource>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Register a new resource.
    pub async fn create(pool: &PgPool, dto: &CreateResource) -> Result<Resource, sqlx::Error> {
        let query = format!(
            "INSERT INTO resources (resource_key, name, scope, qualifier, language) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Resource>(&query)
            .bind(&dto.resource_key)
            .bind(&dto.name)
            .bind(&dto.scope)
            .bind(&dto.qualifier)
            .bind(&dto.language)
            .fetch_one(pool)
            .await
    }
}
