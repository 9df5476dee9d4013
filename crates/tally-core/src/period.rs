//! # Reporting Periods
//!
//! The fixed set of periods the sales dashboard offers, and their labels.
//!
//! ```text
//! code   period        window (today = 2024-03-31)
//! ────   ───────────   ─────────────────────────────
//! "1"    Today         2024-03-31 ..= 2024-03-31
//! "7"    Last 7 days   2024-03-25 ..= 2024-03-31
//! "30"   Last 30 days  2024-03-02 ..= 2024-03-31
//! "90"   Last 90 days  2024-01-02 ..= 2024-03-31
//! other  Custom period (caller supplies both dates)
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::filter::DateRange;

/// Label for any code outside the fixed set.
pub const CUSTOM_PERIOD_LABEL: &str = "Custom period";

/// A dashboard reporting period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReportPeriod {
    #[serde(rename = "1")]
    Today,
    #[serde(rename = "7")]
    Last7Days,
    #[default]
    #[serde(rename = "30")]
    Last30Days,
    #[serde(rename = "90")]
    Last90Days,
}

impl ReportPeriod {
    /// All periods, shortest first.
    pub const ALL: [ReportPeriod; 4] = [
        ReportPeriod::Today,
        ReportPeriod::Last7Days,
        ReportPeriod::Last30Days,
        ReportPeriod::Last90Days,
    ];

    /// The code used by the dashboard and the config file.
    pub const fn code(&self) -> &'static str {
        match self {
            ReportPeriod::Today => "1",
            ReportPeriod::Last7Days => "7",
            ReportPeriod::Last30Days => "30",
            ReportPeriod::Last90Days => "90",
        }
    }

    /// Number of calendar days covered, today included.
    pub const fn days(&self) -> u64 {
        match self {
            ReportPeriod::Today => 1,
            ReportPeriod::Last7Days => 7,
            ReportPeriod::Last30Days => 30,
            ReportPeriod::Last90Days => 90,
        }
    }

    /// Human-readable label.
    pub const fn label(&self) -> &'static str {
        match self {
            ReportPeriod::Today => "Today",
            ReportPeriod::Last7Days => "Last 7 days",
            ReportPeriod::Last30Days => "Last 30 days",
            ReportPeriod::Last90Days => "Last 90 days",
        }
    }

    /// First and last calendar day of the period ending on `today`.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::NaiveDate;
    /// use tally_core::period::ReportPeriod;
    ///
    /// let today = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
    /// let (start, end) = ReportPeriod::Last7Days.bounds(today);
    /// assert_eq!(start, NaiveDate::from_ymd_opt(2024, 3, 25).unwrap());
    /// assert_eq!(end, today);
    /// ```
    pub fn bounds(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let start = today
            .checked_sub_days(Days::new(self.days() - 1))
            .unwrap_or(NaiveDate::MIN);
        (start, today)
    }

    /// The reporting window of the period ending on `today`.
    pub fn window(&self, today: NaiveDate) -> DateRange {
        let (start, end) = self.bounds(today);
        DateRange::from_dates(start, end)
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ReportPeriod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportPeriod::ALL
            .into_iter()
            .find(|period| period.code() == s.trim())
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "period".to_string(),
                allowed: ReportPeriod::ALL
                    .iter()
                    .map(|period| period.code().to_string())
                    .collect(),
            })
    }
}

/// Label for a period code. Unknown codes get [`CUSTOM_PERIOD_LABEL`].
///
/// ## Example
/// ```rust
/// use tally_core::period::label_for_period;
///
/// assert_eq!(label_for_period("7"), "Last 7 days");
/// assert_eq!(label_for_period("365"), "Custom period");
/// ```
pub fn label_for_period(period_code: &str) -> &'static str {
    period_code
        .parse::<ReportPeriod>()
        .map(|period| period.label())
        .unwrap_or(CUSTOM_PERIOD_LABEL)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_window_at_last_representable_day() {
        let window = ReportPeriod::Last7Days.window(NaiveDate::MAX);
        assert_eq!(window.end_date(), NaiveDate::MAX);
        assert_eq!(window.start_date(), NaiveDate::MAX - Days::new(6));
    }

    #[test]
    fn test_labels() {
        assert_eq!(label_for_period("1"), "Today");
        assert_eq!(label_for_period("7"), "Last 7 days");
        assert_eq!(label_for_period("30"), "Last 30 days");
        assert_eq!(label_for_period("90"), "Last 90 days");
        assert_eq!(label_for_period(""), CUSTOM_PERIOD_LABEL);
        assert_eq!(label_for_period("14"), CUSTOM_PERIOD_LABEL);
        assert_eq!(label_for_period("week"), CUSTOM_PERIOD_LABEL);
    }

    #[test]
    fn test_parse_codes() {
        for period in ReportPeriod::ALL {
            assert_eq!(period.code().parse::<ReportPeriod>().unwrap(), period);
        }
        assert_eq!(" 30 ".parse::<ReportPeriod>().unwrap(), ReportPeriod::Last30Days);

        let err = "365".parse::<ReportPeriod>().unwrap_err();
        assert!(matches!(err, ValidationError::NotAllowed { .. }));
    }

    #[test]
    fn test_bounds() {
        let today = date(2024, 3, 31);
        assert_eq!(ReportPeriod::Today.bounds(today), (today, today));
        assert_eq!(ReportPeriod::Last30Days.bounds(today).0, date(2024, 3, 2));
        // 2024 is a leap year: Jan 2 + 89 days = Mar 31
        assert_eq!(ReportPeriod::Last90Days.bounds(today).0, date(2024, 1, 2));
    }

    #[test]
    fn test_window_covers_whole_days() {
        let window = ReportPeriod::Today.window(date(2024, 1, 1));
        assert_eq!(window.start().to_rfc3339(), "2024-01-01T00:00:00+00:00");
        assert_eq!(window.end().to_rfc3339(), "2024-01-01T23:59:59.999+00:00");
    }

    #[test]
    fn test_serde_uses_codes() {
        let json = serde_json::to_string(&ReportPeriod::Last7Days).unwrap();
        assert_eq!(json, "\"7\"");
        let parsed: ReportPeriod = serde_json::from_str("\"90\"").unwrap();
        assert_eq!(parsed, ReportPeriod::Last90Days);
        assert_eq!(ReportPeriod::default(), ReportPeriod::Last30Days);
    }
}
