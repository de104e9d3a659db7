//! Timestamp utilities

use chrono::{DateTime, NaiveDate, Utc};

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Get current UTC calendar date
///
/// Used as "today" by the age rule and the future-birth-date check.
pub fn today() -> NaiveDate {
    now().date_naive()
}

/// Format a timestamp as its calendar month key (`YYYY-MM`, UTC)
pub fn month_key(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_now_returns_valid_timestamp() {
        let timestamp = now();
        // Should be a reasonable timestamp (after year 2000)
        assert!(timestamp.timestamp() > 946_684_800);
    }

    #[test]
    fn test_today_matches_now() {
        let before = now().date_naive();
        let day = today();
        let after = now().date_naive();
        assert!(day >= before && day <= after);
    }

    #[test]
    fn test_month_key_zero_pads() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 9, 23, 59, 59).unwrap();
        assert_eq!(month_key(&ts), "2024-03");
    }

    #[test]
    fn test_month_key_december() {
        let ts = Utc.with_ymd_and_hms(1999, 12, 31, 0, 0, 0).unwrap();
        assert_eq!(month_key(&ts), "1999-12");
    }
}
