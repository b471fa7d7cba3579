//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod active_dashboard_repo;
pub mod dashboard_repo;
pub mod resource_repo;
pub mod widget_property_repo;
pub mod widget_repo;

pub use active_dashboard_repo::{ActiveDashboardRepo, DashboardSelector};
pub use dashboard_repo::DashboardRepo;
pub use resource_repo::ResourceRepo;
pub use widget_property_repo::WidgetPropertyRepo;
pub use widget_repo::{PlacementOutcome, WidgetRepo};
