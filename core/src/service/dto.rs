use serde::{Deserialize, Serialize};

use crate::dashboard::{Dashboard, DepartmentFilter, SummaryTiles};
use crate::model::attendance::{AttendanceRecord, StatusCounts};
use crate::model::hierarchy::{Department, FacultyMember, Hod};
use crate::service::aggregate::{department_counts, faculty_counts, hod_counts, hod_daily_series, DailyAggregate};

/// Serializable view of the dashboard with every aggregate already derived.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub tiles: SummaryTiles,
    pub filter: Option<String>,
    pub departments: Vec<DepartmentDto>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DepartmentDto {
    pub id: String,
    pub name: String,
    pub code: String,
    pub counts: StatusCounts,
    pub hods: Vec<HodDto>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HodDto {
    pub id: String,
    pub name: String,
    pub department_id: String,
    pub counts: StatusCounts,
    pub daily: Vec<DailyAggregate>,
    pub faculty: Vec<FacultyDto>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FacultyDto {
    pub id: String,
    pub name: String,
    pub role: String,
    pub email: String,
    pub phone: String,
    pub counts: StatusCounts,
    pub attendance: Vec<AttendanceRecord>,
}

impl DashboardSnapshot {
    pub fn build(dashboard: &Dashboard, filter: &DepartmentFilter) -> Self {
        Self {
            tiles: dashboard.tiles(),
            filter: match filter {
                DepartmentFilter::All => None,
                DepartmentFilter::Only(id) => Some(id.clone()),
            },
            departments: dashboard
                .visible(filter)
                .into_iter()
                .map(DepartmentDto::from_entity)
                .collect(),
        }
    }

    pub fn to_json(&self, pretty: bool) -> crate::error::Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

impl DepartmentDto {
    pub fn from_entity(department: &Department) -> Self {
        Self {
            id: department.id.clone(),
            name: department.name.clone(),
            code: department.code.clone(),
            counts: department_counts(department),
            hods: department.hods.iter().map(HodDto::from_entity).collect(),
        }
    }
}

impl HodDto {
    pub fn from_entity(hod: &Hod) -> Self {
        Self {
            id: hod.id.clone(),
            name: hod.name.clone(),
            department_id: hod.department_id.clone(),
            counts: hod_counts(hod),
            daily: hod_daily_series(hod),
            faculty: hod.faculties.iter().map(FacultyDto::from_entity).collect(),
        }
    }
}

impl FacultyDto {
    pub fn from_entity(faculty: &FacultyMember) -> Self {
        Self {
            id: faculty.id.clone(),
            name: faculty.name.clone(),
            role: faculty.role.clone(),
            email: faculty.email.clone(),
            phone: faculty.phone.clone(),
            counts: faculty_counts(faculty),
            attendance: faculty.attendance.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::generator::AttendanceWindow;
    use crate::service::sample::{build_hierarchy, default_catalog, SampleShape};
    use chrono::NaiveDate;

    fn dashboard() -> Dashboard {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        Dashboard::new(
            build_hierarchy(&default_catalog(), SampleShape::default(), 14, today),
            AttendanceWindow::default(),
        )
    }

    #[test]
    fn test_snapshot_counts_roll_up() {
        let snapshot = DashboardSnapshot::build(&dashboard(), &DepartmentFilter::All);
        assert_eq!(snapshot.filter, None);
        assert_eq!(snapshot.departments.len(), 4);

        let cse = &snapshot.departments[0];
        let hod = &cse.hods[0];
        assert_eq!(hod.counts.total(), 6 * 14);
        assert_eq!(cse.counts, hod.counts);
        assert_eq!(hod.daily.len(), 14);
        let per_faculty: usize = hod.faculty.iter().map(|f| f.counts.total()).sum();
        assert_eq!(per_faculty, hod.counts.total());
    }

    #[test]
    fn test_snapshot_json_shape() {
        let snapshot = DashboardSnapshot::build(&dashboard(), &DepartmentFilter::Only("me".to_string()));
        let json = snapshot.to_json(false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["tiles"]["window"], "14 days");
        assert_eq!(value["filter"], "me");
        assert_eq!(value["departments"][0]["name"], "Mechanical Engineering");
        assert_eq!(
            value["departments"][0]["hods"][0]["faculty"][0]["attendance"][0]["date"],
            "2026-10-19"
        );

        let back: DashboardSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
