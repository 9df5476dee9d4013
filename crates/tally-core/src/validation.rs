//! # Validation Module
//!
//! Opt-in checks for a sales export before it is aggregated.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Data entry (checkout screen)                                 │
//! │  ├── Quantity and price checks while the sale is rung up               │
//! │  └── Primary owner of input correctness                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Reporting caller (optional)                                  │
//! │  └── THIS MODULE: re-check the export before trusting the totals       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: summarize()                                                  │
//! │  └── Accepts anything; negative lines flow into the totals             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::validation::{validate_date, validate_quantity};
//!
//! assert!(validate_date("2024-01-31").is_ok());
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::filter::parse_date;
use crate::money::Money;
use crate::types::{Sale, SaleItem};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a price or cost amount.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (giveaways)
///
/// ## Example
/// ```rust
/// use tally_core::money::Money;
/// use tally_core::validation::validate_amount;
///
/// assert!(validate_amount("cost price", Money::from_cents(0)).is_ok());
/// assert!(validate_amount("cost price", Money::from_cents(-1)).is_err());
/// ```
pub fn validate_amount(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a `YYYY-MM-DD` calendar date.
pub fn validate_date(value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "date".to_string(),
        });
    }

    parse_date(value)
        .map(|_| ())
        .ok_or_else(|| ValidationError::InvalidFormat {
            field: "date".to_string(),
            reason: format!("'{}' is not a YYYY-MM-DD calendar date", value),
        })
}

fn ensure_matches(field: &str, expected: Money, actual: Money) -> ValidationResult<()> {
    if expected != actual {
        return Err(ValidationError::Mismatch {
            field: field.to_string(),
            expected: expected.cents(),
            actual: actual.cents(),
        });
    }

    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates one sale line.
///
/// ## Rules
/// - Quantity positive
/// - List price, final price and cost non-negative
/// - `subtotal == final_unit_price × quantity`
/// - `profit == subtotal − cost_price × quantity`, when profit is present
pub fn validate_sale_item(item: &SaleItem) -> ValidationResult<()> {
    validate_quantity(item.quantity)?;
    validate_amount("unit price", item.unit_price)?;
    validate_amount("final unit price", item.final_unit_price)?;
    validate_amount("cost price", item.cost_price)?;

    ensure_matches(
        "subtotal",
        item.final_unit_price.multiply_quantity(item.quantity),
        item.subtotal,
    )?;

    if let Some(profit) = item.profit {
        ensure_matches(
            "profit",
            item.subtotal - item.cost_price.multiply_quantity(item.quantity),
            profit,
        )?;
    }

    Ok(())
}

/// Validates a whole sale.
///
/// ## Rules
/// - Id and timestamp present, timestamp parses
/// - Every line valid
/// - `total == Σ subtotal`
/// - `total_profit == Σ profit`, when the sale carries a total profit
pub fn validate_sale(sale: &Sale) -> ValidationResult<()> {
    if sale.id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "sale id".to_string(),
        });
    }

    if sale.occurred_at_utc().is_none() {
        return Err(ValidationError::InvalidFormat {
            field: format!("sale {} timestamp", sale.id),
            reason: format!("'{}' is not an ISO 8601 timestamp", sale.occurred_at),
        });
    }

    for item in &sale.items {
        validate_sale_item(item)?;
    }

    ensure_matches(
        "total",
        sale.items.iter().map(|item| item.subtotal).sum(),
        sale.total,
    )?;

    if let Some(total_profit) = sale.total_profit {
        ensure_matches(
            "total profit",
            sale.items.iter().map(SaleItem::profit_or_zero).sum(),
            total_profit,
        )?;
    }

    Ok(())
}

/// Validates every sale, stopping at the first failure.
pub fn validate_sales(sales: &[Sale]) -> ValidationResult<()> {
    sales.iter().try_for_each(validate_sale)
}

// =============================================================================
// Unit Tests
// =============================================================================
