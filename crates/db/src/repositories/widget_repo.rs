//! Repository for the `widgets` table, including placement
//! reconciliation and atomic property-set application.

use sqlx::PgPool;

use gridboard_core::layout::PlacementPlan;
use gridboard_core::properties::ConfigurationStaging;
use gridboard_core::types::DbId;

use crate::models::widget::{CreateWidget, Widget};

/// Column list for `widgets` queries.
const COLUMNS: &str = "id, dashboard_id, widget_key, name, column_index, \
     row_index, configured, created_at, updated_at";

/// Result of applying a placement plan to a dashboard.
#[derive(Debug, Clone)]
pub struct PlacementOutcome {
    /// Ids from the plan that matched a widget of this dashboard, in
    /// plan order.
    pub placed: Vec<DbId>,
    /// Number of widgets destroyed because the plan omitted them.
    pub removed: u64,
}

/// Provides widget CRUD plus the multi-row layout operations.
pub struct WidgetRepo;

impl WidgetRepo {
    /// Find a widget by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Widget>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM widgets WHERE id = $1");
        sqlx::query_as::<_, Widget>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a dashboard's widgets in display order.
    pub async fn list_by_dashboard(
        pool: &PgPool,
        dashboard_id: DbId,
    ) -> Result<Vec<Widget>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM widgets \
             WHERE dashboard_id = $1 \
             ORDER BY column_index ASC, row_index ASC, id ASC"
        );
        sqlx::query_as::<_, Widget>(&query)
            .bind(dashboard_id)
            .fetch_all(pool)
            .await
    }

    /// Number of widgets currently in one column of a dashboard.
    pub async fn count_in_column(
        pool: &PgPool,
        dashboard_id: DbId,
        column_index: i32,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM widgets WHERE dashboard_id = $1 AND column_index = $2",
        )
        .bind(dashboard_id)
        .bind(column_index)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Insert a widget at a caller-computed position.
    pub async fn create(pool: &PgPool, dto: &CreateWidget) -> Result<Widget, sqlx::Error> {
        let query = format!(
            "INSERT INTO widgets \
                 (dashboard_id, widget_key, name, column_index, row_index, configured) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Widget>(&query)
            .bind(dto.dashboard_id)
            .bind(&dto.widget_key)
            .bind(&dto.name)
            .bind(dto.column_index)
            .bind(dto.row_index)
            .bind(dto.configured)
            .fetch_one(pool)
            .await
    }

    /// Move every widget beyond `max_column` into `max_column`.
    ///
    /// Used after a column layout shrinks so no widget is dropped by a
    /// resize. `row_index` is deliberately untouched: duplicate row
    /// positions in the clamped column are accepted and get normalized
    /// by the next placement reconciliation.
    ///
    /// Returns the number of widgets moved.
    pub async fn clamp_columns(
        pool: &PgPool,
        dashboard_id: DbId,
        max_column: i32,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE widgets SET column_index = $2, updated_at = NOW() \
             WHERE dashboard_id = $1 AND column_index > $2",
        )
        .bind(dashboard_id)
        .bind(max_column)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Apply a placement plan to a dashboard: the submitted plan is
    /// authoritative.
    ///
    /// Each position update is persisted immediately, row by row; a
    /// failure partway through leaves earlier placements in place
    /// (at-least-once apply, no rollback). The update is scoped to the
    /// dashboard, so plan ids belonging to another dashboard match
    /// nothing and are silently ignored. After the full plan, every
    /// widget of the dashboard the plan did not mention is destroyed,
    /// cascading to its properties.
    pub async fn apply_placements(
        pool: &PgPool,
        dashboard_id: DbId,
        plan: &PlacementPlan,
    ) -> Result<PlacementOutcome, sqlx::Error> {
        let mut placed: Vec<DbId> = Vec::new();

        for (column, ids) in plan.iter().enumerate() {
            for (row, widget_id) in ids.iter().enumerate() {
                let result = sqlx::query(
                    "UPDATE widgets \
                     SET column_index = $3, row_index = $4, updated_at = NOW() \
                     WHERE id = $1 AND dashboard_id = $2",
                )
                .bind(*widget_id)
                .bind(dashboard_id)
                .bind((column + 1) as i32)
                .bind((row + 1) as i32)
                .execute(pool)
                .await?;

                if result.rows_affected() > 0 {
                    placed.push(*widget_id);
                }
            }
        }

        let result = sqlx::query(
            "DELETE FROM widgets WHERE dashboard_id = $1 AND NOT (id = ANY($2))",
        )
        .bind(dashboard_id)
        .bind(&placed)
        .execute(pool)
        .await?;

        tracing::debug!(
            dashboard_id,
            placed = placed.len(),
            removed = result.rows_affected(),
            "Applied placement plan",
        );

        Ok(PlacementOutcome {
            placed,
            removed: result.rows_affected(),
        })
    }

    /// Persist a staged configuration for one widget, atomically for
    /// the whole property set.
    ///
    /// In a single transaction: when the staging carries no errors,
    /// every staged value is upserted, rows for keys the definition no
    /// longer declares are removed, and the widget becomes
    /// `configured`. When any key failed validation, every property row
    /// of the widget is removed and the widget becomes unconfigured.
    /// Either way each property ends in a terminal state; nothing stale
    /// survives from a previous configuration.
    ///
    /// Returns the resulting `configured` flag.
    pub async fn apply_configuration(
        pool: &PgPool,
        widget_id: DbId,
        staging: &ConfigurationStaging,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let configured = staging.is_valid();

        if configured {
            let keys: Vec<String> = staging.values.iter().map(|v| v.key.clone()).collect();
            sqlx::query(
                "DELETE FROM widget_properties \
                 WHERE widget_id = $1 AND NOT (prop_key = ANY($2))",
            )
            .bind(widget_id)
            .bind(&keys)
            .execute(&mut *tx)
            .await?;

            for staged in &staging.values {
                sqlx::query(
                    "INSERT INTO widget_properties (widget_id, prop_key, text_value, value_type) \
                     VALUES ($1, $2, $3, $4) \
                     ON CONFLICT (widget_id, prop_key) DO UPDATE \
                     SET text_value = EXCLUDED.text_value, \
                         value_type = EXCLUDED.value_type, \
                         updated_at = NOW()",
                )
                .bind(widget_id)
                .bind(&staged.key)
                .bind(&staged.value)
                .bind(staged.kind.as_str())
                .execute(&mut *tx)
                .await?;
            }
        } else {
            sqlx::query("DELETE FROM widget_properties WHERE widget_id = $1")
                .bind(widget_id)
                .execute(&mut *tx)
                .await?;
        }

        sqlx::query("UPDATE widgets SET configured = $2, updated_at = NOW() WHERE id = $1")
            .bind(widget_id)
            .bind(configured)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(configured)
    }
}
