pub mod config;
pub mod dashboard;
pub mod disclosure;
pub mod error;
pub mod input;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;

pub use config::Config;
pub use dashboard::{summarize, Dashboard, DepartmentFilter, SummaryTiles};
pub use disclosure::{CardKind, CardPath, Disclosure, DisclosureTree, FacultyPolicy};
pub use error::{Error, Result};
pub use model::{AttendanceRecord, AttendanceStatus, Department, FacultyMember, Hod, StatusCounts};
pub use repository::{HierarchyRepository, SampleHierarchyRepository};
pub use service::dashboard_service::DashboardService;
pub use service::dto::DashboardSnapshot;
pub use service::generator::{generate_attendance, status_for_offset, AttendanceWindow};
pub use time::{parse_reference_date, short_label};
