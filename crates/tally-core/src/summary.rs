//! # Sales Summary
//!
//! Turns a list of completed sales into one summary record: totals,
//! averages, and two top-5 product rankings.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        summarize(&[Sale])                               │
//! │                                                                         │
//! │  1. Totals        Σ total, Σ total_profit (missing = 0), count          │
//! │         │                                                               │
//! │  2. Averages      total / count, profit / total × 100  (guarded → 0)    │
//! │         │                                                               │
//! │  3. Per product   every item of every sale → ProductData bucket         │
//! │         │         keyed by product id ("" collects all free items)      │
//! │         │                                                               │
//! │  4. Rankings      by quantity ─► top_products            (≤ 5)          │
//! │                   by profit   ─► most_profitable_products (≤ 5)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Notes
//! - Quantities and amounts are not validated here. Negative lines flow into
//!   the totals as negative contributions; see [`crate::validation`] for the
//!   opt-in checks.
//! - Per-product margin is the cumulative ratio `profit / revenue × 100`,
//!   not an average of per-sale margins.
//! - Ties in either ranking keep the order in which products were first
//!   seen.
//! - Each call owns its accumulators. Calls over independent inputs can run
//!   on as many threads as needed.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Sale, SaleItem};
use crate::TOP_PRODUCTS_LIMIT;

// =============================================================================
// Product Data
// =============================================================================

/// Running totals for one product across a reporting window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductData {
    pub name: String,
    pub quantity: i64,
    pub revenue: Money,
    pub profit: Money,
    /// profit / revenue × 100, refreshed whenever revenue is positive.
    pub margin: f64,
}

impl ProductData {
    /// Starts an empty bucket.
    pub fn new(name: impl Into<String>) -> Self {
        ProductData {
            name: name.into(),
            quantity: 0,
            revenue: Money::zero(),
            profit: Money::zero(),
            margin: 0.0,
        }
    }

    /// Adds one sale line to the bucket.
    ///
    /// The margin keeps its previous value while revenue is zero or
    /// negative.
    pub fn record(&mut self, item: &SaleItem) {
        self.quantity += item.quantity;
        self.revenue += item.subtotal;
        self.profit += item.profit_or_zero();

        if self.revenue.is_positive() {
            self.margin = self.profit.percent_of(self.revenue);
        }
    }
}

/// A ranking entry: product identifier and its totals.
pub type RankedProduct = (String, ProductData);

// =============================================================================
// Sales Summary
// =============================================================================

/// Summary of a reporting window.
///
/// `Default` is the summary of no sales: all zeros, empty rankings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    pub total_sales: Money,
    pub total_profit: Money,
    pub total_transactions: usize,
    pub average_sale: Money,
    pub average_margin: f64,
    /// Best sellers by units, at most five.
    pub top_products: Vec<RankedProduct>,
    /// Best earners by profit, at most five.
    pub most_profitable_products: Vec<RankedProduct>,
}

impl SalesSummary {
    /// True when the summary covers no transactions.
    pub fn is_empty(&self) -> bool {
        self.total_transactions == 0
    }
}

// =============================================================================
// Product Accumulator
// =============================================================================

/// Insertion-ordered product buckets for one `summarize` call.
#[derive(Debug, Default)]
struct ProductAccumulator {
    index: HashMap<String, usize>,
    products: Vec<RankedProduct>,
}

impl ProductAccumulator {
    fn record(&mut self, item: &SaleItem) {
        let key = item.product_key();

        let slot = match self.index.get(key) {
            Some(&slot) => slot,
            None => {
                self.products
                    .push((key.to_string(), ProductData::new(item.name.clone())));
                self.index.insert(key.to_string(), self.products.len() - 1);
                self.products.len() - 1
            }
        };

        let (_, data) = &mut self.products[slot];
        // The shared free-item bucket is labelled by the latest free line
        if item.is_free_item() {
            data.name.clone_from(&item.name);
        }
        data.record(item);
    }

    fn ranked_by<K, F>(&self, key: F) -> Vec<RankedProduct>
    where
        K: Ord,
        F: Fn(&ProductData) -> K,
    {
        let mut ranked = self.products.clone();
        // sort_by is stable: ties keep first-seen order
        ranked.sort_by(|a, b| key(&b.1).cmp(&key(&a.1)));
        ranked.truncate(TOP_PRODUCTS_LIMIT);
        ranked
    }
}

// =============================================================================
// Summarize
// =============================================================================

/// Computes the summary of a set of sales.
///
/// ## Example
/// ```rust
/// use tally_core::money::Money;
/// use tally_core::summary::{summarize, SalesSummary};
/// use tally_core::types::{Sale, SaleItem};
///
/// let item = SaleItem::new(
///     "prod-a",
///     "Product A",
///     2,
///     Money::from_cents(5000),
///     Money::from_cents(5000),
///     Money::from_cents(4000),
/// );
/// let sale = Sale::from_items("sale-1", "2024-01-01T10:00:00Z", "", vec![item]);
///
/// let summary = summarize(&[sale]);
/// assert_eq!(summary.total_sales.cents(), 10000);
/// assert_eq!(summary.average_margin, 20.0);
/// assert_eq!(summary.top_products[0].0, "prod-a");
///
/// assert_eq!(summarize(&[]), SalesSummary::default());
/// ```
pub fn summarize(sales: &[Sale]) -> SalesSummary {
    let total_sales: Money = sales.iter().map(|sale| sale.total).sum();
    let total_profit: Money = sales.iter().map(Sale::total_profit_or_zero).sum();
    let total_transactions = sales.len();

    let average_sale = total_sales.divide_rounded(total_transactions);
    let average_margin = total_profit.percent_of(total_sales);

    let mut products = ProductAccumulator::default();
    for item in sales.iter().flat_map(|sale| sale.items.iter()) {
        products.record(item);
    }

    SalesSummary {
        total_sales,
        total_profit,
        total_transactions,
        average_sale,
        average_margin,
        top_products: products.ranked_by(|data| data.quantity),
        most_profitable_products: products.ranked_by(|data| data.profit),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
