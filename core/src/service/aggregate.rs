//! Derived chart series. Nothing here is cached: callers recompute from the
//! hierarchy every time they render.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::attendance::{AttendanceRecord, AttendanceStatus, StatusCounts};
use crate::model::hierarchy::{Department, FacultyMember, Hod};
use crate::time::short_label;

pub fn count(status: AttendanceStatus, records: &[AttendanceRecord]) -> usize {
    records.iter().filter(|r| r.status == status).count()
}

pub fn faculty_counts(faculty: &FacultyMember) -> StatusCounts {
    StatusCounts::tally(&faculty.attendance)
}

pub fn hod_counts(hod: &Hod) -> StatusCounts {
    StatusCounts::tally(hod.records())
}

pub fn department_counts(department: &Department) -> StatusCounts {
    StatusCounts::tally(department.records())
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieSlice {
    pub status: AttendanceStatus,
    pub value: usize,
}

/// Present, Absent, On Leave, always in that order.
pub fn pie_series(counts: StatusCounts) -> [PieSlice; 3] {
    AttendanceStatus::ALL.map(|status| PieSlice {
        status,
        value: counts.get(status),
    })
}

/// One stacked bar: every status summed for a single calendar day.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyAggregate {
    pub date: NaiveDate,
    pub counts: StatusCounts,
}

impl DailyAggregate {
    pub fn label(&self) -> String {
        short_label(self.date)
    }
}

/// Group by date and sum statuses, ascending by date.
pub fn daily_series<'a, I>(records: I) -> Vec<DailyAggregate>
where
    I: IntoIterator<Item = &'a AttendanceRecord>,
{
    let mut by_date: BTreeMap<NaiveDate, StatusCounts> = BTreeMap::new();
    for record in records {
        by_date.entry(record.date).or_default().add(record.status);
    }
    by_date
        .into_iter()
        .map(|(date, counts)| DailyAggregate { date, counts })
        .collect()
}

pub fn faculty_daily_series(faculty: &FacultyMember) -> Vec<DailyAggregate> {
    daily_series(&faculty.attendance)
}

/// Every faculty member under the HOD stacked per date.
pub fn hod_daily_series(hod: &Hod) -> Vec<DailyAggregate> {
    daily_series(hod.records())
}
