//! # Booking quote: nightly rate × stay interval
//!
//! [`quote`] turns the dates typed into a booking form and the listing's
//! nightly rate into the total shown to the guest. It is pure and cheap, meant
//! to be called on every edit. The server computes the authoritative price
//! when the reservation is created.
//!
//! `nights = ceil((end - start) / 1 day)`, so any positive gap is at least one
//! night, including gaps shortened by a daylight-saving change.
//!
//! Accepted date forms: `2024-03-01`, `2024-03-01T14:00[:00[.000]]`, and RFC
//! 3339 with an offset. Values without an offset are taken as UTC.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Why a quote could not be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotComputable {
    MissingStart,
    MissingEnd,
    InvalidStart,
    InvalidEnd,
    /// `start >= end`.
    EmptyInterval,
    InvalidRate,
}

impl fmt::Display for NotComputable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            NotComputable::MissingStart => "check-in date is missing",
            NotComputable::MissingEnd => "check-out date is missing",
            NotComputable::InvalidStart => "check-in date is not a valid date",
            NotComputable::InvalidEnd => "check-out date is not a valid date",
            NotComputable::EmptyInterval => "check-out must be after check-in",
            NotComputable::InvalidRate => "nightly rate is invalid",
        };
        f.write_str(reason)
    }
}

/// Result of [`quote`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    Computable { nights: u32, total: Decimal },
    NotComputable(NotComputable),
}

impl Quote {
    pub fn total(&self) -> Option<Decimal> {
        match self {
            Quote::Computable { total, .. } => Some(*total),
            Quote::NotComputable(_) => None,
        }
    }

    pub fn nights(&self) -> Option<u32> {
        match self {
            Quote::Computable { nights, .. } => Some(*nights),
            Quote::NotComputable(_) => None,
        }
    }

    pub fn is_computable(&self) -> bool {
        matches!(self, Quote::Computable { .. })
    }
}

/// A guest-proposed `[start, end)` stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayInterval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl StayInterval {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Interval between two calendar dates, midnight to midnight.
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Self {
        Self::new(start.and_time(NaiveTime::MIN), end.and_time(NaiveTime::MIN))
    }

    /// Parse both ends; see the module docs for accepted forms.
    pub fn parse(start: Option<&str>, end: Option<&str>) -> Result<Self, NotComputable> {
        let start = start
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(NotComputable::MissingStart)?;
        let end = end
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(NotComputable::MissingEnd)?;
        let start = parse_instant(start).ok_or(NotComputable::InvalidStart)?;
        let end = parse_instant(end).ok_or(NotComputable::InvalidEnd)?;
        Ok(Self::new(start, end))
    }

    pub fn is_valid(&self) -> bool {
        self.start < self.end
    }

    /// Whole nights, rounding partial days up. `None` unless valid.
    pub fn nights(&self) -> Option<u32> {
        if !self.is_valid() {
            return None;
        }
        let seconds = (self.end - self.start).num_seconds();
        let nights = (seconds + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY;
        // Sub-second gaps still count as one night.
        u32::try_from(nights.max(1)).ok()
    }
}

fn parse_instant(s: &str) -> Option<NaiveDateTime> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

/// Quote a stay from textual dates.
pub fn quote(nightly_rate: Decimal, start: Option<&str>, end: Option<&str>) -> Quote {
    match StayInterval::parse(start, end) {
        Ok(interval) => quote_interval(nightly_rate, interval),
        Err(reason) => Quote::NotComputable(reason),
    }
}

/// Quote an already-parsed stay.
pub fn quote_interval(nightly_rate: Decimal, interval: StayInterval) -> Quote {
    if nightly_rate.is_sign_negative() && !nightly_rate.is_zero() {
        return Quote::NotComputable(NotComputable::InvalidRate);
    }
    let Some(nights) = interval.nights() else {
        return Quote::NotComputable(NotComputable::EmptyInterval);
    };
    match nightly_rate.checked_mul(Decimal::from(nights)) {
        Some(total) => Quote::Computable { nights, total },
        None => Quote::NotComputable(NotComputable::InvalidRate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rate(n: i64) -> Decimal {
        Decimal::new(n, 0)
    }

    #[test]
    fn test_three_nights() {
        let q = quote(rate(100), Some("2024-03-01"), Some("2024-03-04"));
        assert_eq!(
            q,
            Quote::Computable {
                nights: 3,
                total: rate(300)
            }
        );
        assert_eq!(q.total(), Some(rate(300)));
        assert_eq!(q.nights(), Some(3));
    }

    #[test]
    fn test_end_before_start_is_not_computable() {
        let q = quote(rate(100), Some("2024-03-04"), Some("2024-03-01"));
        assert_eq!(q, Quote::NotComputable(NotComputable::EmptyInterval));
        assert_eq!(q.total(), None);
    }

    #[test]
    fn test_equal_dates_are_not_computable() {
        let q = quote(rate(100), Some("2024-03-01"), Some("2024-03-01"));
        assert_eq!(q, Quote::NotComputable(NotComputable::EmptyInterval));
        assert!(!q.is_computable());
    }

    #[test]
    fn test_missing_or_garbage_dates() {
        assert_eq!(
            quote(rate(100), None, Some("2024-03-01")),
            Quote::NotComputable(NotComputable::MissingStart)
        );
        assert_eq!(
            quote(rate(100), Some("2024-03-01"), Some("  ")),
            Quote::NotComputable(NotComputable::MissingEnd)
        );
        assert_eq!(
            quote(rate(100), Some("yesterday"), Some("2024-03-01")),
            Quote::NotComputable(NotComputable::InvalidStart)
        );
        assert_eq!(
            quote(rate(100), Some("2024-03-01"), Some("2024-02-30")),
            Quote::NotComputable(NotComputable::InvalidEnd)
        );
    }

    #[test]
    fn test_partial_days_round_up() {
        // 23 hours, as across a spring-forward change
        let q = quote(
            rate(80),
            Some("2024-03-30T15:00:00+01:00"),
            Some("2024-03-31T15:00:00+02:00"),
        );
        assert_eq!(q.nights(), Some(1));
        assert_eq!(q.total(), Some(rate(80)));

        let q = quote(rate(80), Some("2024-03-01T14:00"), Some("2024-03-03T11:00"));
        assert_eq!(q.nights(), Some(2));

        let q = quote(rate(80), Some("2024-03-01T14:00"), Some("2024-03-03T15:00"));
        assert_eq!(q.nights(), Some(3));

        let q = quote(
            rate(80),
            Some("2024-03-01T00:00:00.000"),
            Some("2024-03-01T00:00:00.500"),
        );
        assert_eq!(q.nights(), Some(1));
    }

    #[test]
    fn test_decimal_rates_are_exact() {
        let q = quote(Decimal::new(9999, 2), Some("2024-01-01"), Some("2024-01-04"));
        assert_eq!(q.total(), Some(Decimal::new(29997, 2)));
    }

    #[test]
    fn test_zero_and_negative_rates() {
        let q = quote(Decimal::ZERO, Some("2024-01-01"), Some("2024-01-02"));
        assert_eq!(
            q,
            Quote::Computable {
                nights: 1,
                total: Decimal::ZERO
            }
        );
        assert_eq!(
            quote(rate(-5), Some("2024-01-01"), Some("2024-01-02")),
            Quote::NotComputable(NotComputable::InvalidRate)
        );
    }

    #[test]
    fn test_quote_is_deterministic() {
        let a = quote(rate(120), Some("2024-12-30"), Some("2025-01-02"));
        let b = quote(rate(120), Some("2024-12-30"), Some("2025-01-02"));
        assert_eq!(a, b);
        assert_eq!(a.nights(), Some(3));
    }

    #[test]
    fn test_interval_from_dates() {
        let start = NaiveDate::from_ymd_opt(2024, 2, 28).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let interval = StayInterval::from_dates(start, end);
        assert_eq!(interval.nights(), Some(2));
        assert_eq!(
            quote_interval(rate(50), interval).total(),
            Some(rate(100))
        );
        assert_eq!(StayInterval::from_dates(end, start).nights(), None);
    }
}
