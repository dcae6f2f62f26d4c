//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Checks if this timestamp is after another.
    pub fn is_after(&self, other: &Timestamp) -> bool {
        self.0 > other.0
    }

    /// Creates a new timestamp by adding the specified number of days.
    ///
    /// Negative values subtract days.
    pub fn add_days(&self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }

    /// Creates a new timestamp by subtracting the specified number of days.
    pub fn minus_days(&self, days: i64) -> Self {
        Self(self.0 - Duration::days(days))
    }

    /// Creates a new timestamp by adding the specified number of seconds.
    pub fn plus_secs(&self, secs: u64) -> Self {
        Self(self.0 + Duration::seconds(secs as i64))
    }

    /// Interprets a calendar date as the last second of that day, UTC.
    ///
    /// Manual expiration dates are entered as plain dates and the
    /// membership stays valid through the whole day.
    pub fn end_of_day(date: NaiveDate) -> Self {
        // 23:59:59 exists on every calendar date.
        let dt = date
            .and_hms_opt(23, 59, 59)
            .unwrap()
            .and_utc();
        Self(dt)
    }

    /// Formats the timestamp as `DD/MM/YYYY` for customer-facing text.
    pub fn format_day_month_year(&self) -> String {
        self.0.format("%d/%m/%Y").to_string()
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn timestamp_now_creates_current_time() {
        let before = Utc::now();
        let ts = Timestamp::now();
        let after = Utc::now();

        assert!(ts.as_datetime() >= &before);
        assert!(ts.as_datetime() <= &after);
    }

    #[test]
    fn timestamp_is_before_works_correctly() {
        let ts1 = Timestamp::now();
        sleep(Duration::from_millis(10));
        let ts2 = Timestamp::now();

        assert!(ts1.is_before(&ts2));
        assert!(!ts2.is_before(&ts1));
    }

    #[test]
    fn timestamp_add_days_moves_forward() {
        let ts = Timestamp::now();
        let later = ts.add_days(365);
        assert!(later.is_after(&ts));
        assert_eq!(
            later.as_datetime().signed_duration_since(ts.as_datetime()),
            chrono::Duration::days(365)
        );
    }

    #[test]
    fn end_of_day_covers_whole_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let ts = Timestamp::end_of_day(date);
        let dt = ts.as_datetime();
        assert_eq!(dt.date_naive(), date);
        assert_eq!(dt.format("%H:%M:%S").to_string(), "23:59:59");
    }

    #[test]
    fn format_day_month_year_uses_slashes() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let ts = Timestamp::end_of_day(date);
        assert_eq!(ts.format_day_month_year(), "14/03/2025");
    }

    #[test]
    fn timestamp_serializes_to_json() {
        let dt = DateTime::parse_from_rfc3339("2024-01-15T10:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let ts = Timestamp::from_datetime(dt);

        let json = serde_json::to_string(&ts).unwrap();
        assert!(json.contains("2024-01-15"));
    }

    #[test]
    fn timestamp_deserializes_from_json() {
        let json = "\"2024-01-15T10:30:00Z\"";
        let ts: Timestamp = serde_json::from_str(json).unwrap();

        assert_eq!(ts.as_datetime().year(), 2024);
    }

    #[test]
    fn timestamp_ordering_works() {
        let ts1 = Timestamp::now();
        let ts2 = ts1.plus_secs(60);

        assert!(ts1 < ts2);
        assert!(ts2 > ts1);
    }
}
