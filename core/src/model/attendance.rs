use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttendanceStatus {
    Present,
    Absent,
    #[serde(rename = "On Leave")]
    OnLeave,
}

impl AttendanceStatus {
    /// Display order used by every chart and table.
    pub const ALL: [AttendanceStatus; 3] = [
        AttendanceStatus::Present,
        AttendanceStatus::Absent,
        AttendanceStatus::OnLeave,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
            AttendanceStatus::OnLeave => "On Leave",
        }
    }

    /// Remark column of the attendance table.
    pub fn remark(self) -> &'static str {
        match self {
            AttendanceStatus::Present => "—",
            AttendanceStatus::Absent => "Uninformed",
            AttendanceStatus::OnLeave => "Approved",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttendanceRecord {
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

impl AttendanceRecord {
    pub fn new(date: NaiveDate, status: AttendanceStatus) -> Self {
        Self { date, status }
    }
}

/// Present / absent / on-leave tallies for any set of records.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub present: usize,
    pub absent: usize,
    pub on_leave: usize,
}

impl StatusCounts {
    pub fn tally<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a AttendanceRecord>,
    {
        let mut counts = Self::default();
        for record in records {
            counts.add(record.status);
        }
        counts
    }

    pub fn add(&mut self, status: AttendanceStatus) {
        match status {
            AttendanceStatus::Present => self.present += 1,
            AttendanceStatus::Absent => self.absent += 1,
            AttendanceStatus::OnLeave => self.on_leave += 1,
        }
    }

    pub fn get(&self, status: AttendanceStatus) -> usize {
        match status {
            AttendanceStatus::Present => self.present,
            AttendanceStatus::Absent => self.absent,
            AttendanceStatus::OnLeave => self.on_leave,
        }
    }

    pub fn total(&self) -> usize {
        self.present + self.absent + self.on_leave
    }
}

impl std::ops::AddAssign for StatusCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.present += rhs.present;
        self.absent += rhs.absent;
        self.on_leave += rhs.on_leave;
    }
}
