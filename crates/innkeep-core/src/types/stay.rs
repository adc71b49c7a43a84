//! Half-open date intervals for stays.
//!
//! A stay `[check_in, check_out)` covers the nights starting on each day from
//! `check_in` up to, but not including, `check_out`. A guest leaving on day
//! `D` and another arriving on day `D` therefore never collide.

use std::fmt;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// A non-empty half-open range of calendar dates.
///
/// The invariant `check_in < check_out` is enforced on construction and on
/// deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawStayRange")]
pub struct StayRange {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

#[derive(Deserialize)]
struct RawStayRange {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl TryFrom<RawStayRange> for StayRange {
    type Error = String;

    fn try_from(raw: RawStayRange) -> Result<Self, Self::Error> {
        Self::new(raw.check_in, raw.check_out).ok_or_else(|| {
            format!(
                "check_out ({}) must be after check_in ({})",
                raw.check_out, raw.check_in
            )
        })
    }
}

impl StayRange {
    /// Build a stay, returning `None` unless `check_out` is strictly after
    /// `check_in`.
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Option<Self> {
        (check_out > check_in).then_some(Self {
            check_in,
            check_out,
        })
    }

    /// Arrival day (first occupied night).
    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    /// Departure day (not occupied).
    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    /// Number of nights in the stay. Always at least 1.
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Two stays overlap iff `a.check_in < b.check_out && b.check_in < a.check_out`.
    pub fn overlaps(&self, other: &StayRange) -> bool {
        self.check_in < other.check_out && other.check_in < self.check_out
    }

    /// Whether the night starting on `day` belongs to this stay.
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.check_in <= day && day < self.check_out
    }

    /// Whether the stay occupies at least one day of the inclusive window
    /// `[first, last]`.
    pub fn occupies_any(&self, first: NaiveDate, last: NaiveDate) -> bool {
        self.check_in <= last && self.check_out > first
    }

    /// The range of extra nights added by extending the stay, i.e.
    /// `[check_out, check_out + days)`. `None` for zero days or on calendar
    /// overflow.
    pub fn extension(&self, days: u32) -> Option<StayRange> {
        let new_check_out = self.check_out.checked_add_days(Days::new(u64::from(days)))?;
        Self::new(self.check_out, new_check_out)
    }

    /// The whole stay pushed out by `days` extra nights.
    pub fn extended_by(&self, days: u32) -> Option<StayRange> {
        let extra = self.extension(days)?;
        Some(Self {
            check_in: self.check_in,
            check_out: extra.check_out,
        })
    }
}

impl fmt::Display for StayRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.check_in, self.check_out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().expect("valid date")
    }

    fn stay(a: &str, b: &str) -> StayRange {
        StayRange::new(d(a), d(b)).expect("valid stay")
    }

    #[test]
    fn test_rejects_empty_and_inverted() {
        assert!(StayRange::new(d("2024-06-05"), d("2024-06-05")).is_none());
        assert!(StayRange::new(d("2024-06-05"), d("2024-06-01")).is_none());
    }

    #[test]
    fn test_nights() {
        assert_eq!(stay("2024-06-01", "2024-06-05").nights(), 4);
        assert_eq!(stay("2024-02-28", "2024-03-01").nights(), 2);
    }

    #[test]
    fn test_same_day_turnover_does_not_overlap() {
        let first = stay("2024-06-01", "2024-06-05");
        let second = stay("2024-06-05", "2024-06-08");
        assert!(!first.overlaps(&second));
        assert!(!second.overlaps(&first));
    }

    #[test]
    fn test_partial_and_nested_overlap() {
        let base = stay("2024-06-01", "2024-06-05");
        assert!(base.overlaps(&stay("2024-06-03", "2024-06-06")));
        assert!(base.overlaps(&stay("2024-06-02", "2024-06-03")));
        assert!(base.overlaps(&stay("2024-05-01", "2024-07-01")));
    }

    #[test]
    fn test_contains_excludes_checkout_day() {
        let s = stay("2024-06-01", "2024-06-05");
        assert!(s.contains(d("2024-06-01")));
        assert!(s.contains(d("2024-06-04")));
        assert!(!s.contains(d("2024-06-05")));
        assert!(!s.contains(d("2024-05-31")));
    }

    #[test]
    fn test_occupies_any() {
        let s = stay("2024-06-01", "2024-06-05");
        assert!(s.occupies_any(d("2024-06-03"), d("2024-06-09")));
        assert!(!s.occupies_any(d("2024-06-05"), d("2024-06-11")));
        assert!(s.occupies_any(d("2024-05-26"), d("2024-06-01")));
    }

    #[test]
    fn test_extension() {
        let s = stay("2024-06-01", "2024-06-05");
        assert_eq!(s.extension(2), Some(stay("2024-06-05", "2024-06-07")));
        assert_eq!(s.extended_by(2), Some(stay("2024-06-01", "2024-06-07")));
        assert_eq!(s.extension(0), None);
    }

    #[test]
    fn test_deserialize_rejects_inverted() {
        let ok: Result<StayRange, _> =
            serde_json::from_str(r#"{"check_in":"2024-06-01","check_out":"2024-06-02"}"#);
        assert!(ok.is_ok());
        let bad: Result<StayRange, _> =
            serde_json::from_str(r#"{"check_in":"2024-06-02","check_out":"2024-06-02"}"#);
        assert!(bad.is_err());
    }
}
