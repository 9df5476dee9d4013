//! Builders and proptest strategies shared by the unit tests.

use proptest::prelude::*;

use crate::money::Money;
use crate::types::{Sale, SaleItem};

/// A sale with no lines at the given timestamp.
pub fn sale_at(id: &str, occurred_at: &str) -> Sale {
    Sale::from_items(id, occurred_at, "Walk-in", Vec::new())
}

/// A line with explicit subtotal and profit, bypassing the price math.
pub fn line(product_id: &str, name: &str, quantity: i64, subtotal: i64, profit: i64) -> SaleItem {
    SaleItem {
        product_id: product_id.to_string(),
        name: name.to_string(),
        variant_id: None,
        quantity,
        unit_price: Money::zero(),
        final_unit_price: Money::zero(),
        cost_price: Money::zero(),
        subtotal: Money::from_cents(subtotal),
        profit: Some(Money::from_cents(profit)),
        margin: Money::from_cents(profit).percent_of(Money::from_cents(subtotal)),
    }
}

/// A sale whose totals come from its lines.
pub fn sale_with(id: &str, items: Vec<SaleItem>) -> Sale {
    Sale::from_items(id, "2024-01-01T12:00:00Z", "Walk-in", items)
}

pub fn arb_item() -> impl Strategy<Value = SaleItem> {
    (
        prop::sample::select(vec!["", "a", "b", "c", "d", "e", "f", "g"]),
        1i64..20,
        0i64..5_000,
        0i64..5_000,
    )
        .prop_map(|(id, quantity, price, cost)| {
            SaleItem::new(
                id,
                format!("Product {id}"),
                quantity,
                Money::from_cents(price),
                Money::from_cents(price),
                Money::from_cents(cost),
            )
        })
}

pub fn arb_sale() -> impl Strategy<Value = Sale> {
    (
        0u32..28,
        0u32..86_400,
        prop::collection::vec(arb_item(), 0..6),
    )
        .prop_map(|(day, secs, items)| {
            let occurred_at = format!(
                "2024-01-{:02}T{:02}:{:02}:{:02}Z",
                day + 1,
                secs / 3600,
                (secs / 60) % 60,
                secs % 60
            );
            Sale::from_items(format!("sale-{day}-{secs}"), occurred_at, "Walk-in", items)
        })
}

pub fn arb_sales() -> impl Strategy<Value = Vec<Sale>> {
    prop::collection::vec(arb_sale(), 0..40)
}
