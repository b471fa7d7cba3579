//! Dashboard entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use gridboard_core::layout;
use gridboard_core::types::{DbId, Timestamp, Viewer};

/// A row from the `dashboards` table.
///
/// `user_id` is the owner; NULL marks a system dashboard, which is not
/// editable through this API.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Dashboard {
    pub id: DbId,
    pub user_id: Option<DbId>,
    pub name: String,
    pub description: Option<String>,
    /// Column widths in percent, e.g. `"30-30-40"`. Segment count is
    /// the number of columns.
    pub column_layout: String,
    pub shared: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Dashboard {
    /// Whether the viewer may mutate this dashboard (layout, widgets).
    pub fn editable_by(&self, viewer: &Viewer) -> bool {
        self.user_id.is_some() && self.user_id == viewer.user_id()
    }

    /// Number of columns the stored layout declares.
    ///
    /// Layouts are validated on every write, so a stored value always
    /// parses; the fallback only guards rows predating validation.
    pub fn number_of_columns(&self) -> usize {
        layout::column_count(&self.column_layout).unwrap_or(1)
    }
}

/// DTO for creating a dashboard.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDashboard {
    pub name: String,
    pub description: Option<String>,
    pub column_layout: Option<String>,
    pub shared: Option<bool>,
}

/// DTO for replacing a dashboard's column layout.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateColumnLayout {
    pub column_layout: String,
}
