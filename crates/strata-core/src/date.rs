//! Calendar dates used to address well reports and series start times.

use chrono::{Datelike, NaiveDate};
use std::fmt;

/// A validated `(year, month, day)` calendar date.
///
/// Report lookups match dates exactly; there is no nearest-date fallback.
/// Ordering is chronological. The default is 1970-01-01.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReportDate(NaiveDate);

impl ReportDate {
    /// Create a date, returning `None` if it is not a real calendar day.
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self::from)
    }

    /// Calendar year.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Month, 1..=12.
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Day of month, 1..=31.
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// The date as a `chrono` value.
    pub fn to_naive(self) -> NaiveDate {
        self.0
    }

    /// The persisted `[day, month, year]` triple used by `DATE` and
    /// `STARTDAT` records.
    pub fn to_dmy(self) -> [i32; 3] {
        [self.day() as i32, self.month() as i32, self.year()]
    }

    /// Parse a persisted `[day, month, year]` triple.
    pub fn from_dmy(dmy: &[i32]) -> Option<Self> {
        match dmy {
            [d, m, y, ..] if *d > 0 && *m > 0 => Self::new(*y, *m as u32, *d as u32),
            _ => None,
        }
    }
}

impl From<NaiveDate> for ReportDate {
    fn from(d: NaiveDate) -> Self {
        Self(d)
    }
}

impl fmt::Display for ReportDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_impossible_dates() {
        assert!(ReportDate::new(2010, 2, 30).is_none());
        assert!(ReportDate::new(2010, 13, 1).is_none());
        assert!(ReportDate::new(2012, 2, 29).is_some());
    }

    #[test]
    fn default_is_epoch() {
        assert_eq!(ReportDate::default(), ReportDate::new(1970, 1, 1).unwrap());
    }

    #[test]
    fn ordering_is_chronological() {
        let a = ReportDate::new(2010, 12, 31).unwrap();
        let b = ReportDate::new(2011, 1, 1).unwrap();
        assert!(a < b);
    }

    #[test]
    fn dmy_round_trip() {
        let d = ReportDate::new(2010, 1, 2).unwrap();
        assert_eq!(d.to_dmy(), [2, 1, 2010]);
        assert_eq!(ReportDate::from_dmy(&d.to_dmy()), Some(d));
        assert_eq!(ReportDate::from_dmy(&[0, 1, 2010]), None);
        assert_eq!(ReportDate::from_dmy(&[1, 1]), None);
    }

    #[test]
    fn display_is_iso() {
        assert_eq!(ReportDate::new(2010, 1, 1).unwrap().to_string(), "2010-01-01");
    }
}
