use serde::{Deserialize, Serialize};

use crate::model::attendance::AttendanceRecord;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FacultyMember {
    pub id: String,
    pub name: String,
    pub role: String,
    pub email: String,
    pub phone: String,
    /// Descending by date, the reference day first.
    pub attendance: Vec<AttendanceRecord>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Hod {
    pub id: String,
    pub name: String,
    pub department_id: String,
    pub faculties: Vec<FacultyMember>,
}

impl Hod {
    /// "1 Faculty Member" / "6 Faculty Members".
    pub fn faculty_caption(&self) -> String {
        let n = self.faculties.len();
        if n == 1 {
            format!("{} Faculty Member", n)
        } else {
            format!("{} Faculty Members", n)
        }
    }

    pub fn records(&self) -> impl Iterator<Item = &AttendanceRecord> {
        self.faculties.iter().flat_map(|f| f.attendance.iter())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Department {
    pub id: String,
    pub name: String,
    pub code: String,
    pub hods: Vec<Hod>,
}

impl Department {
    pub fn faculty_count(&self) -> usize {
        self.hods.iter().map(|h| h.faculties.len()).sum()
    }

    /// "1 HOD • Code CSE"
    pub fn caption(&self) -> String {
        let n = self.hods.len();
        format!(
            "{} HOD{} • Code {}",
            n,
            if n == 1 { "" } else { "s" },
            self.code
        )
    }

    pub fn records(&self) -> impl Iterator<Item = &AttendanceRecord> {
        self.hods.iter().flat_map(|h| h.records())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hod(faculty: usize) -> Hod {
        Hod {
            id: "x-hod-1".to_string(),
            name: "HOD 1".to_string(),
            department_id: "x".to_string(),
            faculties: (0..faculty)
                .map(|f| FacultyMember {
                    id: format!("x-f0-{}", f),
                    name: format!("Faculty {}", f + 1),
                    role: "Professor".to_string(),
                    email: String::new(),
                    phone: String::new(),
                    attendance: Vec::new(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_captions_pluralize() {
        assert_eq!(hod(1).faculty_caption(), "1 Faculty Member");
        assert_eq!(hod(6).faculty_caption(), "6 Faculty Members");

        let mut dept = Department {
            id: "x".to_string(),
            name: "X".to_string(),
            code: "X".to_string(),
            hods: vec![hod(2)],
        };
        assert_eq!(dept.caption(), "1 HOD • Code X");
        dept.hods.push(hod(3));
        assert_eq!(dept.caption(), "2 HODs • Code X");
        assert_eq!(dept.faculty_count(), 5);
    }
}
