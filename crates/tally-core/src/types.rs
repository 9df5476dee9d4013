//! # Domain Types
//!
//! The transaction records a sales report is computed from.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────┐        ┌──────────────────────────┐          │
//! │  │        Sale          │ 1    * │        SaleItem          │          │
//! │  │  ──────────────────  │───────►│  ──────────────────────  │          │
//! │  │  id                  │        │  product_id ("" = free)  │          │
//! │  │  occurred_at (ISO)   │        │  quantity                │          │
//! │  │  customer_name       │        │  final_unit_price        │          │
//! │  │  total               │        │  subtotal / profit       │          │
//! │  │  total_profit?       │        │  margin (%)              │          │
//! │  └──────────────────────┘        └──────────────────────────┘          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Fields are camelCase in JSON so an export from the hosted data service
//! deserializes directly. Amounts are integer cents (see [`Money`]).
//! Optional computed fields may be absent and default to "not computed".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::filter::parse_timestamp;
use crate::money::Money;
use crate::FREE_ITEM_KEY;

// =============================================================================
// Sale Item
// =============================================================================

/// One line of a completed transaction.
///
/// ## Line Math
/// ```text
/// subtotal = final_unit_price × quantity
/// profit   = subtotal − cost_price × quantity
/// margin   = profit / subtotal × 100   (0 when subtotal <= 0)
/// ```
///
/// `unit_price` is the catalog list price; `final_unit_price` is what the
/// cashier actually charged after editing the line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    /// Catalog product identifier. Empty for a free (non-catalog) item.
    pub product_id: String,

    /// Display name at time of sale.
    pub name: String,

    /// Variant reference, when the product has variants.
    #[serde(default)]
    pub variant_id: Option<String>,

    /// Quantity sold.
    pub quantity: i64,

    /// Catalog list price per unit.
    pub unit_price: Money,

    /// Price per unit actually charged.
    pub final_unit_price: Money,

    /// Cost per unit.
    #[serde(default)]
    pub cost_price: Money,

    /// Line total (final_unit_price × quantity).
    pub subtotal: Money,

    /// Line profit. Older exports may not carry it.
    #[serde(default)]
    pub profit: Option<Money>,

    /// Line margin in percent.
    #[serde(default)]
    pub margin: f64,
}

impl SaleItem {
    /// Builds a catalog line with subtotal, profit and margin computed.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    /// use tally_core::types::SaleItem;
    ///
    /// let item = SaleItem::new(
    ///     "prod-1",
    ///     "Espresso beans 1kg",
    ///     2,
    ///     Money::from_cents(5000),
    ///     Money::from_cents(5000),
    ///     Money::from_cents(4000),
    /// );
    /// assert_eq!(item.subtotal.cents(), 10000);
    /// assert_eq!(item.profit, Some(Money::from_cents(2000)));
    /// assert_eq!(item.margin, 20.0);
    /// ```
    pub fn new(
        product_id: impl Into<String>,
        name: impl Into<String>,
        quantity: i64,
        unit_price: Money,
        final_unit_price: Money,
        cost_price: Money,
    ) -> Self {
        let mut item = SaleItem {
            product_id: product_id.into(),
            name: name.into(),
            variant_id: None,
            quantity,
            unit_price,
            final_unit_price,
            cost_price,
            subtotal: Money::zero(),
            profit: None,
            margin: 0.0,
        };
        item.recompute();
        item
    }

    /// Builds a free (non-catalog) line such as a service fee.
    ///
    /// Free lines carry no cost, so the whole subtotal is profit.
    pub fn free(name: impl Into<String>, quantity: i64, price: Money) -> Self {
        SaleItem::new(FREE_ITEM_KEY, name, quantity, price, price, Money::zero())
    }

    /// Attaches a variant reference.
    pub fn with_variant(mut self, variant_id: impl Into<String>) -> Self {
        self.variant_id = Some(variant_id.into());
        self
    }

    /// Changes the charged unit price and recomputes the line.
    pub fn reprice(&mut self, final_unit_price: Money) {
        self.final_unit_price = final_unit_price;
        self.recompute();
    }

    /// Recomputes subtotal, profit and margin from price, cost and quantity.
    pub fn recompute(&mut self) {
        let subtotal = self.final_unit_price.multiply_quantity(self.quantity);
        let profit = subtotal - self.cost_price.multiply_quantity(self.quantity);
        self.subtotal = subtotal;
        self.profit = Some(profit);
        self.margin = profit.percent_of(subtotal);
    }

    /// True when the line is not tied to a catalog product.
    #[inline]
    pub fn is_free_item(&self) -> bool {
        self.product_id == FREE_ITEM_KEY
    }

    /// Key this line aggregates under. All free lines share one key.
    pub fn product_key(&self) -> &str {
        if self.is_free_item() {
            FREE_ITEM_KEY
        } else {
            &self.product_id
        }
    }

    /// Line profit, treating a missing value as zero.
    #[inline]
    pub fn profit_or_zero(&self) -> Money {
        self.profit.unwrap_or_default()
    }
}

// =============================================================================
// Sale
// =============================================================================

/// One completed transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: String,

    /// When the sale happened, as an ISO 8601 string.
    pub occurred_at: String,

    /// Customer label shown on the receipt.
    #[serde(default)]
    pub customer_name: String,

    /// Lines in the order they were rung up.
    #[serde(default)]
    pub items: Vec<SaleItem>,

    /// Sum of line subtotals.
    pub total: Money,

    /// Sum of line profits, when computed at checkout.
    #[serde(default)]
    pub total_profit: Option<Money>,

    /// total_profit / total × 100, when computed at checkout.
    #[serde(default)]
    pub average_margin: Option<f64>,
}

impl Sale {
    /// Builds a sale whose totals are derived from its lines.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    /// use tally_core::types::{Sale, SaleItem};
    ///
    /// let sale = Sale::from_items(
    ///     "sale-1",
    ///     "2024-01-01T10:30:00Z",
    ///     "Walk-in",
    ///     vec![SaleItem::free("Gift wrap", 1, Money::from_cents(300))],
    /// );
    /// assert_eq!(sale.total.cents(), 300);
    /// assert_eq!(sale.total_profit, Some(Money::from_cents(300)));
    /// assert_eq!(sale.average_margin, Some(100.0));
    /// ```
    pub fn from_items(
        id: impl Into<String>,
        occurred_at: impl Into<String>,
        customer_name: impl Into<String>,
        items: Vec<SaleItem>,
    ) -> Self {
        let total: Money = items.iter().map(|item| item.subtotal).sum();
        let total_profit: Money = items.iter().map(SaleItem::profit_or_zero).sum();

        Sale {
            id: id.into(),
            occurred_at: occurred_at.into(),
            customer_name: customer_name.into(),
            items,
            total,
            total_profit: Some(total_profit),
            average_margin: Some(total_profit.percent_of(total)),
        }
    }

    /// Parses the occurrence timestamp. `None` when it is not a valid instant.
    pub fn occurred_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.occurred_at)
    }

    /// Sale profit, treating a missing value as zero.
    #[inline]
    pub fn total_profit_or_zero(&self) -> Money {
        self.total_profit.unwrap_or_default()
    }

    /// Number of units across all lines.
    pub fn units_sold(&self) -> i64 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
