//! Active-dashboard association model.
//!
//! An active dashboard designates which dashboard a viewer sees.
//! Viewer-null rows are the system defaults shared by anonymous and
//! unconfigured viewers. At most one row exists per
//! `(dashboard, viewer)` pair.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use gridboard_core::types::{DbId, Timestamp};

/// A row from the `active_dashboards` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActiveDashboard {
    pub id: DbId,
    pub dashboard_id: DbId,
    pub user_id: Option<DbId>,
    /// Smallest value wins when no explicit selector is given.
    pub order_index: i32,
    pub created_at: Timestamp,
}

/// DTO for activating a dashboard for a viewer (or as a system default
/// when `user_id` is `None`).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateActiveDashboard {
    pub dashboard_id: DbId,
    pub user_id: Option<DbId>,
    pub order_index: i32,
}
