//! Time helpers: business time zone conversion
//!
//! Raffle dates are calendar dates in the business time zone, stored as
//! `YYYY-MM-DD`. Every instant is stored as `i64` unix millis.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use super::{AppError, AppResult};

/// `YYYY-MM-DD` storage format for raffle dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a raffle date string (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// Format a business date for storage
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Business date of an instant
pub fn business_date(now: DateTime<Utc>, tz: Tz) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}

/// Date + HH:MM:SS → unix millis (business time zone)
///
/// DST gap fallback: if the local time does not exist, fall back to UTC.
pub fn date_hms_to_millis(date: NaiveDate, hour: u32, min: u32, sec: u32, tz: Tz) -> i64 {
    let Some(naive) = date.and_hms_opt(hour, min, sec) else {
        return date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp_millis();
    };
    naive
        .and_local_timezone(tz)
        .latest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| naive.and_utc().timestamp_millis())
}

/// Whole days from `date` to `today`; negative for future dates.
pub fn days_between(date: NaiveDate, today: NaiveDate) -> i64 {
    (today - date).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_and_format_date() {
        let d = parse_date("2026-10-19").unwrap();
        assert_eq!(format_date(d), "2026-10-19");
        assert!(parse_date("19/10/2026").is_err());
    }

    #[test]
    fn test_business_date_follows_timezone() {
        // 2026-10-19 23:30 UTC is already the 20th in Madrid (UTC+2)
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 23, 30, 0).unwrap();
        assert_eq!(
            business_date(now, chrono_tz::UTC),
            NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
        );
        assert_eq!(
            business_date(now, chrono_tz::Europe::Madrid),
            NaiveDate::from_ymd_opt(2026, 10, 20).unwrap()
        );
    }

    #[test]
    fn test_draw_hour_in_business_timezone() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let utc = date_hms_to_millis(date, 20, 0, 0, chrono_tz::UTC);
        let madrid = date_hms_to_millis(date, 20, 0, 0, chrono_tz::Europe::Madrid);
        assert_eq!(utc - madrid, 2 * 3600 * 1000);
    }

    #[test]
    fn test_days_between() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(days_between(today, today), 0);
        assert_eq!(days_between(today.pred_opt().unwrap(), today), 1);
        assert_eq!(days_between(today.succ_opt().unwrap(), today), -1);
    }
}
