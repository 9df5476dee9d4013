//! # tally-core: Pure Sales Reporting Logic
//!
//! This crate turns a list of completed sale transactions into summarized
//! analytics (totals, margins, top-product rankings) over a date window.
//! Everything here is a pure function with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Tally Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │           Hosted data service (external collaborator)           │   │
//! │  │        products, variants, customers, completed sales           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ sales export (JSON)                    │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                tally-report (CLI, apps/report-cli)              │   │
//! │  │          config, logging, input cap, output formatting          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  filter   │  │  summary  │  │  period   │  │   │
//! │  │   │   Sale    │  │ DateRange │  │ summarize │  │  labels   │  │   │
//! │  │   │ SaleItem  │  │           │  │ rankings  │  │  windows  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOGGING • NO SHARED STATE • PURE FUNCTIONS       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Sale and SaleItem records
//! - [`money`] - Money type with integer arithmetic
//! - [`filter`] - Inclusive calendar-day window filter
//! - [`summary`] - Totals, averages and top-5 rankings
//! - [`period`] - Dashboard period codes and labels
//! - [`report`] - Filter + summarize in one call
//! - [`validation`] - Opt-in checks for a sales export
//! - [`error`] - Domain error types
//!
//! ## Preconditions
//! Callers hand over one reporting cycle of already-materialized sales. The
//! work is linear in the number of sale lines, so the caller is responsible
//! for capping the collection (for example by fetching only the window it
//! is about to report on).
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_core::{filter_by_date_range, summarize, Money, Sale, SaleItem};
//!
//! let sales = vec![
//!     Sale::from_items("s1", "2024-01-01T09:00:00Z", "Ana", vec![
//!         SaleItem::new("A", "Product A", 2, Money::from_cents(5000),
//!                       Money::from_cents(5000), Money::from_cents(4000)),
//!     ]),
//!     Sale::from_items("s2", "2024-01-01T17:00:00Z", "Ben", vec![
//!         SaleItem::new("B", "Product B", 5, Money::from_cents(1000),
//!                       Money::from_cents(1000), Money::from_cents(800)),
//!     ]),
//! ];
//!
//! let in_window = filter_by_date_range(&sales, "2024-01-01", "2024-01-01").unwrap();
//! let summary = summarize(&in_window);
//!
//! assert_eq!(summary.total_sales.cents(), 15000);
//! assert_eq!(summary.average_sale.cents(), 7500);
//! assert_eq!(summary.average_margin, 20.0);
//! assert_eq!(summary.top_products[0].0, "B");
//! assert_eq!(summary.most_profitable_products[0].0, "A");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod filter;
pub mod money;
pub mod period;
pub mod report;
pub mod summary;
pub mod types;
pub mod validation;

#[cfg(test)]
mod test_support;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use filter::{filter_by_date_range, DateRange};
pub use money::Money;
pub use period::{label_for_period, ReportPeriod};
pub use report::{generate_report, report_for_period, SalesReport};
pub use summary::{summarize, ProductData, RankedProduct, SalesSummary};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum entries in each product ranking of a summary.
pub const TOP_PRODUCTS_LIMIT: usize = 5;

/// Product key shared by every free (non-catalog) sale line.
pub const FREE_ITEM_KEY: &str = "";
