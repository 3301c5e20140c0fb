use std::fmt::{self, Display};
use std::str::FromStr;

use chrono::{DateTime, Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

/// Canonical identifier for one calendar day, rendered as `YYYY-MM-DD`.
///
/// Completion is tracked at day granularity only: every instant within the
/// same calendar day (in the system's local time zone) maps to the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayKey(NaiveDate);

#[derive(Debug, Error)]
#[error("invalid day key '{0}', expected YYYY-MM-DD")]
pub struct InvalidDayKey(String);

impl DayKey {
    /// Truncate an instant to its calendar day in the local time zone.
    pub fn from_instant(instant: DateTime<Local>) -> Self {
        Self(instant.date_naive())
    }

    /// Today's key in the local time zone.
    pub fn today() -> Self {
        Self::from_instant(Local::now())
    }

    /// Signed whole-day difference, positive when `self` is the later day.
    pub fn days_since(self, earlier: DayKey) -> i64 {
        self.0.signed_duration_since(earlier.0).num_days()
    }

    /// The key `n` days earlier, or `None` past the calendar boundary.
    pub fn days_before(self, n: u64) -> Option<Self> {
        self.0.checked_sub_days(Days::new(n)).map(Self)
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DAY_KEY_FORMAT))
    }
}

impl FromStr for DayKey {
    type Err = InvalidDayKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, DAY_KEY_FORMAT)
            .map(Self)
            .map_err(|_| InvalidDayKey(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn parse_and_display_round_trip() {
        let key: DayKey = "2024-06-01".parse().unwrap();
        assert_eq!(key.to_string(), "2024-06-01");
    }

    #[test]
    fn rejects_malformed_keys() {
        assert!("not-a-date".parse::<DayKey>().is_err());
        assert!("2024-13-40".parse::<DayKey>().is_err());
        assert!("01/02/2024".parse::<DayKey>().is_err());
        assert!("".parse::<DayKey>().is_err());
    }

    #[test]
    fn same_day_instants_share_a_key() {
        let morning = Local.with_ymd_and_hms(2024, 6, 1, 0, 5, 0).unwrap();
        let night = Local.with_ymd_and_hms(2024, 6, 1, 23, 59, 59).unwrap();
        assert_eq!(DayKey::from_instant(morning), DayKey::from_instant(night));
    }

    #[test]
    fn days_since_is_signed() {
        let earlier: DayKey = "2024-05-30".parse().unwrap();
        let later: DayKey = "2024-06-02".parse().unwrap();
        assert_eq!(later.days_since(earlier), 3);
        assert_eq!(earlier.days_since(later), -3);
        assert_eq!(later.days_since(later), 0);
    }

    #[test]
    fn days_before_crosses_month_and_year_boundaries() {
        let key: DayKey = "2024-01-01".parse().unwrap();
        assert_eq!(key.days_before(1).unwrap().to_string(), "2023-12-31");
        assert_eq!(key.days_before(0).unwrap(), key);

        let march: DayKey = "2024-03-01".parse().unwrap();
        // 2024 is a leap year
        assert_eq!(march.days_before(1).unwrap().to_string(), "2024-02-29");
    }

    #[test]
    fn serializes_as_plain_string() {
        let key: DayKey = "2024-06-01".parse().unwrap();
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"2024-06-01\"");

        let parsed: DayKey = serde_json::from_str("\"2024-06-01\"").unwrap();
        assert_eq!(parsed, key);
        assert!(serde_json::from_str::<DayKey>("\"junk\"").is_err());
    }
}
