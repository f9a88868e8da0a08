//! Deterministic synthetic attendance.
//!
//! The status pattern is keyed only on the day offset, so every individual
//! generated for the same reference day receives the same sequence.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};

pub const DEFAULT_WINDOW_DAYS: usize = 14;

/// Keeps `today - i` inside chrono's calendar range.
pub const MAX_WINDOW_DAYS: usize = 3660;

/// Validated length of the trailing attendance window.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(try_from = "i64", into = "i64")]
pub struct AttendanceWindow(usize);

impl AttendanceWindow {
    pub fn days(self) -> usize {
        self.0
    }

    /// "14 days"
    pub fn label(self) -> String {
        if self.0 == 1 {
            "1 day".to_string()
        } else {
            format!("{} days", self.0)
        }
    }
}

impl Default for AttendanceWindow {
    fn default() -> Self {
        AttendanceWindow(DEFAULT_WINDOW_DAYS)
    }
}

impl TryFrom<i64> for AttendanceWindow {
    type Error = Error;

    fn try_from(days: i64) -> Result<Self> {
        if days < 0 {
            return Err(Error::invalid_config(format!(
                "window_days must not be negative (got {})",
                days
            )));
        }
        let days = days as usize;
        if days > MAX_WINDOW_DAYS {
            return Err(Error::invalid_config(format!(
                "window_days must not exceed {} (got {})",
                MAX_WINDOW_DAYS, days
            )));
        }
        Ok(AttendanceWindow(days))
    }
}

impl From<AttendanceWindow> for i64 {
    fn from(window: AttendanceWindow) -> Self {
        window.0 as i64
    }
}

impl fmt::Display for AttendanceWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// `r = (i*17 + 7) mod 10`: r < 7 Present, r < 9 Absent, else On Leave.
pub fn status_for_offset(offset: usize) -> AttendanceStatus {
    // 17 ≡ 7 (mod 10), reducing first keeps the product small
    let r = ((offset % 10) * 17 + 7) % 10;
    if r < 7 {
        AttendanceStatus::Present
    } else if r < 9 {
        AttendanceStatus::Absent
    } else {
        AttendanceStatus::OnLeave
    }
}

/// One record per day for `days` days ending at `today`, newest first.
///
/// Exactly `days` records come back as long as `today` is at least
/// `days - 1` days after `NaiveDate::MIN`. Closer to it the window is cut
/// off at the earliest representable date, so fewer records are returned.
pub fn generate_attendance(days: usize, today: NaiveDate) -> Vec<AttendanceRecord> {
    (0..days)
        .map_while(|i| {
            today
                .checked_sub_days(Days::new(i as u64))
                .map(|date| AttendanceRecord::new(date, status_for_offset(i)))
        })
        .collect()
}
