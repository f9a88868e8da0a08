use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::hierarchy::{Department, FacultyMember, Hod};
use crate::service::generator::generate_attendance;

pub const DEFAULT_HODS_PER_DEPARTMENT: usize = 1;
pub const DEFAULT_FACULTY_PER_HOD: usize = 6;

pub const FACULTY_ROLES: [&str; 3] = ["Assistant Professor", "Associate Professor", "Professor"];

/// Identity of a department before its HODs are generated.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DepartmentSeed {
    pub id: String,
    pub name: String,
    pub code: String,
}

impl DepartmentSeed {
    pub fn new(id: &str, name: &str, code: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            code: code.to_string(),
        }
    }
}

pub fn default_catalog() -> Vec<DepartmentSeed> {
    vec![
        DepartmentSeed::new("cse", "Computer Science & Engineering", "CSE"),
        DepartmentSeed::new("ece", "Electronics & Communication Engineering", "ECE"),
        DepartmentSeed::new("me", "Mechanical Engineering", "ME"),
        DepartmentSeed::new("ce", "Civil Engineering", "CE"),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleShape {
    pub hods_per_department: usize,
    pub faculty_per_hod: usize,
}

impl Default for SampleShape {
    fn default() -> Self {
        Self {
            hods_per_department: DEFAULT_HODS_PER_DEPARTMENT,
            faculty_per_hod: DEFAULT_FACULTY_PER_HOD,
        }
    }
}

pub fn role_for_index(faculty_index: usize) -> &'static str {
    FACULTY_ROLES[faculty_index % FACULTY_ROLES.len()]
}

pub fn build_hierarchy(
    catalog: &[DepartmentSeed],
    shape: SampleShape,
    window_days: usize,
    today: NaiveDate,
) -> Vec<Department> {
    catalog
        .iter()
        .enumerate()
        .map(|(idx, seed)| Department {
            id: seed.id.clone(),
            name: seed.name.clone(),
            code: seed.code.clone(),
            hods: (0..shape.hods_per_department)
                .map(|h| build_hod(seed, idx, h, shape.faculty_per_hod, window_days, today))
                .collect(),
        })
        .collect()
}

fn build_hod(
    seed: &DepartmentSeed,
    idx: usize,
    h: usize,
    faculty_per_hod: usize,
    window_days: usize,
    today: NaiveDate,
) -> Hod {
    let domain = seed.code.to_lowercase();
    let faculties = (0..faculty_per_hod)
        .map(|f| FacultyMember {
            id: format!("{}-f{}-{}", seed.id, h, f),
            name: format!("Faculty {}", f + 1),
            role: role_for_index(f).to_string(),
            email: format!("faculty{}@{}.edu", f + 1, domain),
            phone: format!("+91 98{}{}{}0{}{}", idx, h, f, (f + 3) % 10, (f + 6) % 10),
            attendance: generate_attendance(window_days, today),
        })
        .collect();

    Hod {
        id: format!("{}-hod-{}", seed.id, h + 1),
        name: format!("HOD {}", h + 1),
        department_id: seed.id.clone(),
        faculties,
    }
}
