//! # Date Range Filter
//!
//! Narrows a transaction collection to an inclusive calendar-day window.
//!
//! ## Window Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  filter_by_date_range(sales, "2024-01-01", "2024-01-07")                │
//! │                                                                         │
//! │  start = 2024-01-01T00:00:00.000Z        end = 2024-01-07T23:59:59.999Z │
//! │          │                                        │                     │
//! │  ────────[████████████████████████████████████████]────────► time       │
//! │          ▲ included                     included ▲                      │
//! │                                                                         │
//! │  A sale is kept iff  start <= occurred_at <= end                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Bounds that are not calendar dates fail with
//! [`CoreError::InvalidDateRange`] instead of quietly producing an empty
//! report. A sale whose own timestamp does not parse can never be shown to
//! be inside the window and is left out.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::error::{CoreError, CoreResult};
use crate::types::Sale;

/// Calendar date format accepted for window bounds.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Parsing
// =============================================================================

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Parses a sale timestamp into an instant.
///
/// ## Accepted Forms
/// - RFC 3339 with offset: `2024-01-01T23:59:00Z`, `2024-01-01T18:00:00-05:00`
/// - Naive date-time, read as UTC: `2024-01-01T23:59:00`, `2024-01-01 23:59:00.250`
/// - Bare date, read as UTC midnight: `2024-01-01`
///
/// ## Example
/// ```rust
/// use tally_core::filter::parse_timestamp;
///
/// let offset = parse_timestamp("2024-01-01T20:00:00-05:00").unwrap();
/// assert_eq!(offset.to_rfc3339(), "2024-01-02T01:00:00+00:00");
/// assert!(parse_timestamp("yesterday").is_none());
/// ```
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Some(instant.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }

    parse_date(value).map(start_of_day)
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// 23:59:59.999 UTC on `date`. Defined for every date up to `NaiveDate::MAX`.
fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_milli_opt(23, 59, 59, 999)
        .map_or(DateTime::<Utc>::MAX_UTC, |end| end.and_utc())
}

// =============================================================================
// Date Range
// =============================================================================

/// A closed reporting window `[start, end]` in UTC.
///
/// ## Example
/// ```rust
/// use tally_core::filter::{parse_timestamp, DateRange};
///
/// let range = DateRange::parse("2024-01-01", "2024-01-01").unwrap();
/// assert!(range.contains(parse_timestamp("2024-01-01T23:59:00Z").unwrap()));
/// assert!(!range.contains(parse_timestamp("2024-01-02T00:00:01Z").unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DateRange {
    /// Parses two `YYYY-MM-DD` bounds into a window.
    ///
    /// ## Errors
    /// [`CoreError::InvalidDateRange`] when either bound is not a calendar
    /// date. A start after the end is accepted and matches nothing.
    pub fn parse(start_date: &str, end_date: &str) -> CoreResult<Self> {
        let invalid = |reason: String| CoreError::InvalidDateRange {
            start: start_date.to_string(),
            end: end_date.to_string(),
            reason,
        };

        let start = parse_date(start_date).ok_or_else(|| {
            invalid(format!("start date '{}' is not a YYYY-MM-DD calendar date", start_date))
        })?;
        let end = parse_date(end_date).ok_or_else(|| {
            invalid(format!("end date '{}' is not a YYYY-MM-DD calendar date", end_date))
        })?;

        Ok(DateRange::from_dates(start, end))
    }

    /// Builds a window covering whole days from `start` through `end`.
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange {
            start: start_of_day(start),
            end: end_of_day(end),
        }
    }

    /// First instant inside the window.
    #[inline]
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Last instant inside the window.
    #[inline]
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Calendar date of the first day.
    pub fn start_date(&self) -> NaiveDate {
        self.start.date_naive()
    }

    /// Calendar date of the last day.
    pub fn end_date(&self) -> NaiveDate {
        self.end.date_naive()
    }

    /// True when `instant` lies inside the closed window.
    #[inline]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// True when the sale's timestamp parses and lies inside the window.
    pub fn contains_sale(&self, sale: &Sale) -> bool {
        sale.occurred_at_utc()
            .is_some_and(|instant| self.contains(instant))
    }

    /// Returns the sales inside the window, in input order.
    pub fn filter(&self, sales: &[Sale]) -> Vec<Sale> {
        sales
            .iter()
            .filter(|sale| self.contains_sale(sale))
            .cloned()
            .collect()
    }
}

// =============================================================================
// Filter Entry Point
// =============================================================================

/// Keeps the sales that happened between `start_date` and `end_date`,
/// both inclusive whole days in UTC.
///
/// ## Fast Path
/// An empty collection returns immediately, before the bounds are parsed.
///
/// ## Example
/// ```rust
/// use tally_core::filter::filter_by_date_range;
/// use tally_core::types::Sale;
///
/// let sales = vec![
///     Sale::from_items("in", "2024-01-01T23:59:00Z", "", vec![]),
///     Sale::from_items("out", "2024-01-02T00:00:01Z", "", vec![]),
/// ];
/// let kept = filter_by_date_range(&sales, "2024-01-01", "2024-01-01").unwrap();
/// assert_eq!(kept.len(), 1);
/// assert_eq!(kept[0].id, "in");
///
/// assert!(filter_by_date_range(&sales, "2024-02-30", "2024-03-01").is_err());
/// ```
pub fn filter_by_date_range(
    sales: &[Sale],
    start_date: &str,
    end_date: &str,
) -> CoreResult<Vec<Sale>> {
    if sales.is_empty() {
        return Ok(Vec::new());
    }

    let range = DateRange::parse(start_date, end_date)?;
    Ok(range.filter(sales))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{arb_sales, sale_at};
    use proptest::prelude::*;

    #[test]
    fn test_single_day_window_is_inclusive() {
        let sales = vec![
            sale_at("late", "2024-01-01T23:59:00Z"),
            sale_at("next-day", "2024-01-02T00:00:01Z"),
            sale_at("midnight", "2024-01-01T00:00:00Z"),
            sale_at("last-ms", "2024-01-01T23:59:59.999Z"),
        ];

        let kept = filter_by_date_range(&sales, "2024-01-01", "2024-01-01").unwrap();
        let ids: Vec<&str> = kept.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["late", "midnight", "last-ms"]);
    }

    #[test]
    fn test_offsets_are_normalized_to_utc() {
        // 20:00 at UTC-5 is 01:00 the next day in UTC
        let sales = vec![sale_at("evening", "2024-01-01T20:00:00-05:00")];
        assert!(filter_by_date_range(&sales, "2024-01-01", "2024-01-01")
            .unwrap()
            .is_empty());
        assert_eq!(
            filter_by_date_range(&sales, "2024-01-02", "2024-01-02")
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn test_invalid_bounds_are_errors() {
        let sales = vec![sale_at("s", "2024-01-01T10:00:00Z")];

        for (start, end) in [
            ("2024-13-01", "2024-12-31"),
            ("2024-01-01", "not a date"),
            ("", "2024-01-01"),
            ("2023-02-29", "2023-03-01"),
        ] {
            let err = filter_by_date_range(&sales, start, end).unwrap_err();
            assert!(
                matches!(err, CoreError::InvalidDateRange { .. }),
                "expected InvalidDateRange for {start}..{end}"
            );
        }
    }

    #[test]
    fn test_extreme_calendar_bounds() {
        let sales = vec![sale_at("s", "2024-01-01T10:00:00Z")];
        let last_day = NaiveDate::MAX.format(DATE_FORMAT).to_string();

        let kept = filter_by_date_range(&sales, "2024-01-01", &last_day).unwrap();
        assert_eq!(kept.len(), 1);

        let kept = filter_by_date_range(&sales, &last_day, &last_day).unwrap();
        assert!(kept.is_empty());

        let range = DateRange::from_dates(NaiveDate::MAX, NaiveDate::MAX);
        assert_eq!(range.end_date(), NaiveDate::MAX);
        assert!(range.end() > range.start());
    }

    #[test]
    fn test_empty_input_short_circuits() {
        let kept = filter_by_date_range(&[], "garbage", "garbage").unwrap();
        assert!(kept.is_empty());
    }

    #[test]
    fn test_unparsable_sale_timestamp_is_excluded() {
        let sales = vec![
            sale_at("bad", "last tuesday"),
            sale_at("good", "2024-01-05T08:00:00Z"),
        ];
        let kept = filter_by_date_range(&sales, "2024-01-01", "2024-01-31").unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "good");
    }

    #[test]
    fn test_naive_and_date_only_timestamps() {
        assert_eq!(
            parse_timestamp("2024-01-01T10:00:00"),
            parse_timestamp("2024-01-01T10:00:00Z")
        );
        assert_eq!(
            parse_timestamp("2024-01-01 10:00:00.5"),
            parse_timestamp("2024-01-01T10:00:00.500Z")
        );
        assert_eq!(
            parse_timestamp("2024-01-01"),
            parse_timestamp("2024-01-01T00:00:00Z")
        );
    }

    #[test]
    fn test_reversed_range_matches_nothing() {
        let sales = vec![sale_at("s", "2024-01-03T10:00:00Z")];
        let kept = filter_by_date_range(&sales, "2024-01-05", "2024-01-01").unwrap();
        assert!(kept.is_empty());
    }

    #[test]
    fn test_range_accessors() {
        let range = DateRange::parse("2024-02-28", "2024-02-29").unwrap();
        assert_eq!(range.start_date(), NaiveDate::from_ymd_opt(2024, 2, 28).unwrap());
        assert_eq!(range.end_date(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(range.end().to_rfc3339(), "2024-02-29T23:59:59.999+00:00");
    }

    /// True when `subset` appears in `full` in the same relative order.
    fn is_subsequence(subset: &[Sale], full: &[Sale]) -> bool {
        let mut remaining = full.iter();
        subset
            .iter()
            .all(|wanted| remaining.any(|candidate| candidate == wanted))
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Property: the filter keeps an order-preserving subset of its input.
        #[test]
        fn filter_is_ordered_subset(
            sales in arb_sales(),
            first_day in 1u32..=14,
            span in 0u32..7,
        ) {
            let start = format!("2024-01-{:02}", first_day);
            let end = format!("2024-01-{:02}", (first_day + span).min(28));

            let kept = filter_by_date_range(&sales, &start, &end).unwrap();
            prop_assert!(kept.len() <= sales.len());
            prop_assert!(is_subsequence(&kept, &sales));
        }

        /// Property: filtering twice with the same window changes nothing.
        #[test]
        fn filter_is_idempotent(
            sales in arb_sales(),
            first_day in 1u32..=14,
            span in 0u32..7,
        ) {
            let start = format!("2024-01-{:02}", first_day);
            let end = format!("2024-01-{:02}", (first_day + span).min(28));

            let once = filter_by_date_range(&sales, &start, &end).unwrap();
            let twice = filter_by_date_range(&once, &start, &end).unwrap();
            prop_assert_eq!(once, twice);
        }
    }
}
