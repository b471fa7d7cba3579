//! Repository for the `dashboards` table.

use sqlx::PgPool;

use gridboard_core::layout::DEFAULT_COLUMN_LAYOUT;
use gridboard_core::types::DbId;

use crate::models::dashboard::{CreateDashboard, Dashboard};

/// Column list for `dashboards` queries.
const COLUMNS: &str =
    "id, user_id, name, description, column_layout, shared, created_at, updated_at";

/// Provides CRUD operations for dashboards.
pub struct DashboardRepo;

impl DashboardRepo {
    /// Find a dashboard by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Dashboard>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM dashboards WHERE id = $1");
        sqlx::query_as::<_, Dashboard>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Create a dashboard owned by `user_id` (`None` for a system
    /// dashboard). The column layout defaults to two equal columns.
    pub async fn create(
        pool: &PgPool,
        user_id: Option<DbId>,
        dto: &CreateDashboard,
    ) -> Result<Dashboard, sqlx::Error> {
        let query = format!(
            "INSERT INTO dashboards (user_id, name, description, column_layout, shared) \
             VALUES ($1, $2, $3, COALESCE($4, '{DEFAULT_COLUMN_LAYOUT}'), COALESCE($5, FALSE)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Dashboard>(&query)
            .bind(user_id)
            .bind(&dto.name)
            .bind(&dto.description)
            .bind(&dto.column_layout)
            .bind(dto.shared)
            .fetch_one(pool)
            .await
    }

    /// Replace a dashboard's column layout.
    ///
    /// Returns the updated row, or `None` if the dashboard is gone.
    /// Widget clamping is a separate step (`WidgetRepo::clamp_columns`)
    /// so the caller controls ordering.
    pub async fn update_column_layout(
        pool: &PgPool,
        id: DbId,
        column_layout: &str,
    ) -> Result<Option<Dashboard>, sqlx::Error> {
        let query = format!(
            "UPDATE dashboards SET column_layout = $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Dashboard>(&query)
            .bind(id)
            .bind(column_layout)
            .fetch_optional(pool)
            .await
    }
}
