//! Request handlers.

pub mod dashboards;
pub mod widget_definitions;
pub mod widgets;

use gridboard_core::error::CoreError;
use gridboard_core::types::Viewer;
use gridboard_db::models::dashboard::Dashboard;

use crate::error::AppError;

/// Editability gate shared by every mutating dashboard operation.
///
/// Only the owning viewer may edit; system dashboards (no owner) are
/// read-only through this API.
pub(crate) fn ensure_editable(dashboard: &Dashboard, viewer: &Viewer) -> Result<(), AppError> {
    if dashboard.editable_by(viewer) {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Forbidden(
            "Dashboard is not editable by this viewer".into(),
        )))
    }
}
