//! # Sales Report
//!
//! Packages the filter → summarize pipeline as one call.
//!
//! ```text
//! sales ──► DateRange::filter ──► summarize ──► SalesReport
//!              (window)                          ├── period_label
//!                                                ├── start_date / end_date
//!                                                ├── transactions_in_export
//!                                                └── summary
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::filter::{filter_by_date_range, DateRange, DATE_FORMAT};
use crate::period::ReportPeriod;
use crate::summary::{summarize, SalesSummary};
use crate::types::Sale;

/// A summary together with the window it covers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalesReport {
    pub period_label: String,
    /// First day of the window, `YYYY-MM-DD`.
    pub start_date: String,
    /// Last day of the window, `YYYY-MM-DD`.
    pub end_date: String,
    /// Sales supplied before filtering.
    pub transactions_in_export: usize,
    pub summary: SalesSummary,
}

/// Filters `sales` to `[start_date, end_date]` and summarizes the result.
///
/// ## Errors
/// [`crate::CoreError::InvalidDateRange`] when a bound is not a calendar
/// date (unless `sales` is empty, which short-circuits like
/// [`filter_by_date_range`]).
///
/// ## Example
/// ```rust
/// use tally_core::money::Money;
/// use tally_core::report::generate_report;
/// use tally_core::types::{Sale, SaleItem};
///
/// let sales = vec![
///     Sale::from_items("a", "2024-01-01T10:00:00Z", "", vec![
///         SaleItem::free("Repair", 1, Money::from_cents(2500)),
///     ]),
///     Sale::from_items("b", "2024-02-01T10:00:00Z", "", vec![]),
/// ];
///
/// let report = generate_report(&sales, "2024-01-01", "2024-01-31", "January").unwrap();
/// assert_eq!(report.transactions_in_export, 2);
/// assert_eq!(report.summary.total_transactions, 1);
/// assert_eq!(report.summary.total_sales.cents(), 2500);
/// ```
pub fn generate_report(
    sales: &[Sale],
    start_date: &str,
    end_date: &str,
    period_label: &str,
) -> CoreResult<SalesReport> {
    let in_window = filter_by_date_range(sales, start_date, end_date)?;

    Ok(SalesReport {
        period_label: period_label.to_string(),
        start_date: start_date.trim().to_string(),
        end_date: end_date.trim().to_string(),
        transactions_in_export: sales.len(),
        summary: summarize(&in_window),
    })
}

/// Report for a dashboard period ending on `today`.
pub fn report_for_period(sales: &[Sale], period: ReportPeriod, today: NaiveDate) -> SalesReport {
    report_for_window(sales, period.window(today), period.label())
}

/// Report for an already-parsed window.
pub fn report_for_window(sales: &[Sale], window: DateRange, period_label: &str) -> SalesReport {
    SalesReport {
        period_label: period_label.to_string(),
        start_date: window.start_date().format(DATE_FORMAT).to_string(),
        end_date: window.end_date().format(DATE_FORMAT).to_string(),
        transactions_in_export: sales.len(),
        summary: summarize(&window.filter(sales)),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
