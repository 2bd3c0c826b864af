//! Calendar day keys (`YYYY-MM-DD`).

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{YearPlanError, YearPlanResult};

const FORMAT: &str = "%Y-%m-%d";

/// One calendar day, keyed the same way locally and on the remote endpoint.
///
/// Keys are plain dates in the client's local calendar. There is no time or
/// timezone component, so a key never shifts across midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn new(date: NaiveDate) -> Self {
        DateKey(date)
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> YearPlanResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(DateKey)
            .ok_or_else(|| YearPlanError::InvalidDate(format!("{year:04}-{month:02}-{day:02}")))
    }

    /// Today's key in the local timezone.
    pub fn today() -> Self {
        DateKey(Local::now().date_naive())
    }

    /// Parse a canonical `YYYY-MM-DD` key. Unpadded or space-padded forms like
    /// `2026-3-2` or `2026- 3-02` are rejected, so one day has exactly one key.
    pub fn parse(s: &str) -> YearPlanResult<Self> {
        let invalid = || YearPlanError::InvalidDate(s.to_string());
        if s.len() != 10 {
            return Err(invalid());
        }
        let key = NaiveDate::parse_from_str(s, FORMAT)
            .map(DateKey)
            .map_err(|_| invalid())?;
        if key.to_string() != s {
            return Err(invalid());
        }
        Ok(key)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn succ(&self) -> Option<Self> {
        self.0.succ_opt().map(DateKey)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0.format(FORMAT))
    }
}

impl FromStr for DateKey {
    type Err = YearPlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateKey::parse(s)
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        DateKey(date)
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        DateKey::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_zero_padded() {
        let key = DateKey::from_ymd(2026, 3, 2).unwrap();
        assert_eq!(key.to_string(), "2026-03-02");
    }

    #[test]
    fn test_parse_roundtrips_display() {
        let key: DateKey = "2026-12-31".parse().unwrap();
        assert_eq!(key.to_string(), "2026-12-31");
        assert_eq!(key.year(), 2026);
    }

    #[test]
    fn test_parse_rejects_non_canonical() {
        assert!(DateKey::parse("2026-3-2").is_err());
        assert!(DateKey::parse("2026-02-30").is_err());
        assert!(DateKey::parse("").is_err());
        assert!(DateKey::parse("2026-03-02T00:00:00Z").is_err());
        assert!(DateKey::parse("2026- 1-01").is_err());
        assert!(DateKey::parse("2026-1- 01").is_err());
        assert!(DateKey::parse("2026-01- 1").is_err());
        assert!(DateKey::parse(" 2026-1-1").is_err());
    }

    #[test]
    fn test_serde_uses_plain_string() {
        let key = DateKey::from_ymd(2026, 1, 1).unwrap();
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"2026-01-01\"");

        let back: DateKey = serde_json::from_str("\"2026-01-01\"").unwrap();
        assert_eq!(back, key);
        assert!(serde_json::from_str::<DateKey>("\"01/01/2026\"").is_err());
    }

    #[test]
    fn test_today_matches_local_calendar() {
        let expected = Local::now().date_naive().format("%Y-%m-%d").to_string();
        assert_eq!(DateKey::today().to_string(), expected);
    }
}
