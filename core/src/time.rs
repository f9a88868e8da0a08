use chrono::{Days, Local, NaiveDate};

use crate::error::{Error, Result};

/// The reference day every generated window ends on.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// `MM-DD` slice of the ISO date, used as the chart axis label.
pub fn short_label(date: NaiveDate) -> String {
    date.format("%m-%d").to_string()
}

/// Resolve a `--today` override relative to `now`.
///
/// Accepts `today`, `yesterday`, `-Nd`, `-Nw` and `YYYY-MM-DD`.
pub fn parse_reference_date(input: &str, now: NaiveDate) -> Result<NaiveDate> {
    let input = input.trim();
    let invalid = || Error::InvalidDate {
        input: input.to_string(),
    };

    match input.to_lowercase().as_str() {
        "today" | "tod" => return Ok(now),
        "yesterday" => return now.checked_sub_days(Days::new(1)).ok_or_else(invalid),
        _ => {}
    }

    if let Some(rest) = input.strip_prefix('-') {
        if rest.len() < 2 {
            return Err(invalid());
        }
        let (num_str, unit) = rest.split_at(rest.len() - 1);
        let count: u64 = num_str.parse().map_err(|_| invalid())?;
        let days = match unit {
            "d" => count,
            "w" => count.checked_mul(7).ok_or_else(invalid)?,
            _ => return Err(invalid()),
        };
        return now.checked_sub_days(Days::new(days)).ok_or_else(invalid);
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn test_keywords() {
        assert_eq!(parse_reference_date("today", anchor()).unwrap(), anchor());
        assert_eq!(
            parse_reference_date("Yesterday", anchor()).unwrap(),
            NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
        );
    }

    #[test]
    fn test_relative() {
        assert_eq!(
            parse_reference_date("-3d", anchor()).unwrap(),
            NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
        );
        assert_eq!(
            parse_reference_date("-2w", anchor()).unwrap(),
            NaiveDate::from_ymd_opt(2026, 10, 5).unwrap()
        );
        assert!(parse_reference_date("-d", anchor()).is_err());
        assert!(parse_reference_date("-3m", anchor()).is_err());
    }

    #[test]
    fn test_iso_date() {
        assert_eq!(
            parse_reference_date("2025-01-31", anchor()).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()
        );
        let err = parse_reference_date("31/01/2025", anchor()).unwrap_err();
        assert!(err.to_string().contains("31/01/2025"));
    }

    #[test]
    fn test_short_label() {
        assert_eq!(short_label(anchor()), "10-19");
    }
}
