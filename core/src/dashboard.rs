//! Top-level composition: summary tiles, department filter and lookups over
//! the read-only hierarchy.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::input::expand_key;
use crate::model::hierarchy::{Department, FacultyMember, Hod};
use crate::service::generator::AttendanceWindow;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SummaryTiles {
    pub departments: usize,
    pub hods: usize,
    pub faculty: usize,
    pub window: String,
}

pub fn summarize(departments: &[Department], window: AttendanceWindow) -> SummaryTiles {
    SummaryTiles {
        departments: departments.len(),
        hods: departments.iter().map(|d| d.hods.len()).sum(),
        faculty: departments.iter().map(Department::faculty_count).sum(),
        window: window.label(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DepartmentFilter {
    #[default]
    All,
    Only(String),
}

impl DepartmentFilter {
    pub fn matches(&self, department: &Department) -> bool {
        match self {
            DepartmentFilter::All => true,
            DepartmentFilter::Only(id) => department.id == *id,
        }
    }

    /// Indices into `departments` that pass the filter, in display order.
    pub fn apply(&self, departments: &[Department]) -> Vec<usize> {
        departments
            .iter()
            .enumerate()
            .filter(|(_, d)| self.matches(d))
            .map(|(i, _)| i)
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    departments: Vec<Department>,
    window: AttendanceWindow,
}

impl Dashboard {
    pub fn new(departments: Vec<Department>, window: AttendanceWindow) -> Self {
        Self { departments, window }
    }

    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    pub fn window(&self) -> AttendanceWindow {
        self.window
    }

    /// Tiles always describe the whole hierarchy, never the filtered view.
    pub fn tiles(&self) -> SummaryTiles {
        summarize(&self.departments, self.window)
    }

    pub fn visible(&self, filter: &DepartmentFilter) -> Vec<&Department> {
        self.departments.iter().filter(|d| filter.matches(d)).collect()
    }

    /// The first department, falling back to `All` for an empty catalog.
    pub fn default_filter(&self) -> DepartmentFilter {
        self.departments
            .first()
            .map(|d| DepartmentFilter::Only(d.id.clone()))
            .unwrap_or_default()
    }

    /// `"all"` or any unambiguous prefix of a department id.
    pub fn resolve_filter(&self, key: &str) -> Result<DepartmentFilter> {
        if key.trim().eq_ignore_ascii_case("all") {
            return Ok(DepartmentFilter::All);
        }
        let ids: Vec<&str> = self.departments.iter().map(|d| d.id.as_str()).collect();
        let id = expand_key(key, &ids, "department")?;
        tracing::debug!(key, id = %id, "resolved department filter");
        Ok(DepartmentFilter::Only(id))
    }

    /// Next filter in the cycle: each department in order, then `All`.
    pub fn next_filter(&self, current: &DepartmentFilter) -> DepartmentFilter {
        let position = match current {
            DepartmentFilter::All => None,
            DepartmentFilter::Only(id) => self.departments.iter().position(|d| d.id == *id),
        };
        let next = match position {
            None => 0,
            Some(i) => i + 1,
        };
        self.departments
            .get(next)
            .map(|d| DepartmentFilter::Only(d.id.clone()))
            .unwrap_or_default()
    }

    pub fn filter_label(&self, filter: &DepartmentFilter) -> String {
        match filter {
            DepartmentFilter::All => "All departments".to_string(),
            DepartmentFilter::Only(id) => self
                .departments
                .iter()
                .find(|d| d.id == *id)
                .map(|d| d.name.clone())
                .unwrap_or_else(|| id.clone()),
        }
    }

    pub fn find_hod(&self, id: &str) -> Result<(&Department, &Hod)> {
        self.departments
            .iter()
            .flat_map(|d| d.hods.iter().map(move |h| (d, h)))
            .find(|(_, h)| h.id == id)
            .ok_or_else(|| Error::UnknownHod(id.to_string()))
    }

    pub fn find_faculty(&self, id: &str) -> Result<(&Department, &Hod, &FacultyMember)> {
        self.departments
            .iter()
            .flat_map(|d| d.hods.iter().map(move |h| (d, h)))
            .flat_map(|(d, h)| h.faculties.iter().map(move |f| (d, h, f)))
            .find(|(_, _, f)| f.id == id)
            .ok_or_else(|| Error::UnknownFaculty(id.to_string()))
    }
}
