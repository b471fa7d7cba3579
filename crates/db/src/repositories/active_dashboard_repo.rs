//! Repository for the `active_dashboards` table, including dashboard
//! resolution for a viewer.

use sqlx::PgPool;

use gridboard_core::types::{DbId, Viewer};

use crate::models::active_dashboard::{ActiveDashboard, CreateActiveDashboard};
use crate::models::dashboard::Dashboard;

/// Column list for `active_dashboards` queries.
const COLUMNS: &str = "id, dashboard_id, user_id, order_index, created_at";

/// Dashboard columns selected through the `active_dashboards` join.
const DASHBOARD_COLUMNS: &str = "d.id, d.user_id, d.name, d.description, \
     d.column_layout, d.shared, d.created_at, d.updated_at";

/// How the caller asked for a dashboard. Both fields `None` means "the
/// default": the active row with the smallest `order_index`.
#[derive(Debug, Clone, Default)]
pub struct DashboardSelector {
    pub by_id: Option<DbId>,
    pub by_name: Option<String>,
}

/// Provides activation rows and viewer-scoped dashboard resolution.
pub struct ActiveDashboardRepo;

impl ActiveDashboardRepo {
    /// Resolve the dashboard to display for a viewer and selector.
    ///
    /// Phase 1 searches the viewer's own activation rows (skipped for
    /// anonymous viewers). Phase 2 repeats the same selection against
    /// the viewer-null system defaults. `None` means no dashboard is
    /// resolvable at all; the caller decides how to surface that.
    pub async fn resolve(
        pool: &PgPool,
        viewer: &Viewer,
        selector: &DashboardSelector,
    ) -> Result<Option<Dashboard>, sqlx::Error> {
        if let Some(user_id) = viewer.user_id() {
            if let Some(found) = Self::find_scoped(pool, Some(user_id), selector).await? {
                return Ok(Some(found));
            }
        }
        Self::find_scoped(pool, None, selector).await
    }

    /// One resolution phase: apply the selector within a single
    /// activation scope (a user's rows, or the system defaults when
    /// `scope_user_id` is `None`).
    ///
    /// Selection order: explicit id, then name, then smallest
    /// `order_index` (ties broken by `id` so the pick is deterministic).
    async fn find_scoped(
        pool: &PgPool,
        scope_user_id: Option<DbId>,
        selector: &DashboardSelector,
    ) -> Result<Option<Dashboard>, sqlx::Error> {
        if let Some(dashboard_id) = selector.by_id {
            let query = format!(
                "SELECT {DASHBOARD_COLUMNS} FROM active_dashboards ad \
                 JOIN dashboards d ON d.id = ad.dashboard_id \
                 WHERE ad.user_id IS NOT DISTINCT FROM $1 AND ad.dashboard_id = $2"
            );
            return sqlx::query_as::<_, Dashboard>(&query)
                .bind(scope_user_id)
                .bind(dashboard_id)
                .fetch_optional(pool)
                .await;
        }

        if let Some(ref name) = selector.by_name {
            let query = format!(
                "SELECT {DASHBOARD_COLUMNS} FROM active_dashboards ad \
                 JOIN dashboards d ON d.id = ad.dashboard_id \
                 WHERE ad.user_id IS NOT DISTINCT FROM $1 AND d.name = $2 \
                 ORDER BY ad.order_index ASC, ad.id ASC \
                 LIMIT 1"
            );
            return sqlx::query_as::<_, Dashboard>(&query)
                .bind(scope_user_id)
                .bind(name)
                .fetch_optional(pool)
                .await;
        }

        let query = format!(
            "SELECT {DASHBOARD_COLUMNS} FROM active_dashboards ad \
             JOIN dashboards d ON d.id = ad.dashboard_id \
             WHERE ad.user_id IS NOT DISTINCT FROM $1 \
             ORDER BY ad.order_index ASC, ad.id ASC \
             LIMIT 1"
        );
        sqlx::query_as::<_, Dashboard>(&query)
            .bind(scope_user_id)
            .fetch_optional(pool)
            .await
    }

    /// Activate a dashboard for a viewer (or as a system default when
    /// `user_id` is `None`). At most one row per `(dashboard, viewer)`
    /// pair; a duplicate surfaces as a unique-constraint error.
    pub async fn create(
        pool: &PgPool,
        dto: &CreateActiveDashboard,
    ) -> Result<ActiveDashboard, sqlx::Error> {
        let query = format!(
            "INSERT INTO active_dashboards (dashboard_id, user_id, order_index) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActiveDashboard>(&query)
            .bind(dto.dashboard_id)
            .bind(dto.user_id)
            .bind(dto.order_index)
            .fetch_one(pool)
            .await
    }

    /// List a viewer's activation rows ordered by `order_index`.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: Option<DbId>,
    ) -> Result<Vec<ActiveDashboard>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM active_dashboards \
             WHERE user_id IS NOT DISTINCT FROM $1 \
             ORDER BY order_index ASC, id ASC"
        );
        sqlx::query_as::<_, ActiveDashboard>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
