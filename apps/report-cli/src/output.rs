//! # Report Output
//!
//! Renders a [`SalesReport`] as JSON (the dashboard payload) or as a short
//! plain-text summary for the terminal.

use std::borrow::Cow;
use std::fmt;

use tally_core::{ProductData, RankedProduct, SalesReport, FREE_ITEM_KEY};

use crate::config::OutputFormat;
use crate::error::ReportResult;

/// Renders `report` in the requested format.
pub fn render(report: &SalesReport, format: OutputFormat, pretty: bool) -> ReportResult<String> {
    let rendered = match format {
        OutputFormat::Json if pretty => serde_json::to_string_pretty(report)?,
        OutputFormat::Json => serde_json::to_string(report)?,
        OutputFormat::Text => TextReport(report).to_string(),
    };
    Ok(rendered)
}

/// Plain-text view of a report.
pub struct TextReport<'a>(pub &'a SalesReport);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let summary = &report.summary;

        writeln!(
            f,
            "{} ({} to {})",
            report.period_label, report.start_date, report.end_date
        )?;
        writeln!(
            f,
            "Transactions: {} of {} in export",
            summary.total_transactions, report.transactions_in_export
        )?;
        writeln!(f, "Total sales:  {}", summary.total_sales)?;
        writeln!(f, "Total profit: {}", summary.total_profit)?;
        writeln!(f, "Average sale: {}", summary.average_sale)?;
        writeln!(f, "Margin:       {:.1}%", summary.average_margin)?;

        if summary.is_empty() {
            return writeln!(f, "No sales in this period.");
        }

        writeln!(f)?;
        writeln!(f, "Top products (units)")?;
        for (rank, entry) in summary.top_products.iter().enumerate() {
            let (name, product) = ranked_name(entry);
            writeln!(f, "  {}. {} - {} units", rank + 1, name, product.quantity)?;
        }

        writeln!(f)?;
        writeln!(f, "Most profitable")?;
        for (rank, entry) in summary.most_profitable_products.iter().enumerate() {
            let (name, product) = ranked_name(entry);
            writeln!(
                f,
                "  {}. {} - {} ({:.1}%)",
                rank + 1,
                name,
                product.profit,
                product.margin
            )?;
        }

        Ok(())
    }
}

/// Display name for a ranking entry; the free-item bucket is marked.
fn ranked_name(entry: &RankedProduct) -> (Cow<'_, str>, &ProductData) {
    let (key, product) = entry;
    let name = if key == FREE_ITEM_KEY {
        Cow::Owned(format!("{} (free item)", product.name))
    } else {
        Cow::Borrowed(product.name.as_str())
    };
    (name, product)
}
