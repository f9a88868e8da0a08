pub mod attendance;
pub mod hierarchy;

pub use attendance::{AttendanceRecord, AttendanceStatus, StatusCounts};
pub use hierarchy::{Department, FacultyMember, Hod};
