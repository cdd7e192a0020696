//! # Text Rendering
//!
//! Fixed-width console tables for the core's report structures.
//!
//! ```text
//! Report date: 2025-12-25
//! Product name              Product code         Available units        Minimum threshold
//! Widget                    W-1                  2                      2
//! Total quantity of products: 2
//! Warning! The product "Widget" is below the minimum threshold.
//! ```

use stockbook_core::{
    BatchSale, FullListing, Product, ProfitReport, StockReport, WarningKind,
};

use crate::config::AppConfig;

/// Message printed instead of an empty profit table.
pub const NO_SALES: &str = "There hasn't been any sales made.";

/// Pushes a line with trailing padding stripped.
fn push_line(out: &mut String, line: &str) {
    out.push_str(line.trim_end());
    out.push('\n');
}

pub fn stock_report(report: &StockReport) -> String {
    let mut out = String::new();
    push_line(&mut out, &format!("Report date: {}", report.as_of));
    push_line(
        &mut out,
        &format!(
            "{:<25} {:<20} {:<22} {:<15}",
            "Product name", "Product code", "Available units", "Minimum threshold"
        ),
    );

    for row in &report.rows {
        push_line(
            &mut out,
            &format!(
                "{:<25} {:<20} {:<22} {:<15}",
                row.name, row.code, row.available_units, row.minimum_threshold
            ),
        );
    }

    push_line(
        &mut out,
        &format!("Total quantity of products: {}", report.total_units),
    );

    for warning in &report.warnings {
        let line = match warning.kind {
            WarningKind::OutOfStock => format!(
                "Warning! The product \"{}\" has 0 available units.",
                warning.name
            ),
            WarningKind::BelowThreshold => format!(
                "Warning! The product \"{}\" is below the minimum threshold.",
                warning.name
            ),
        };
        push_line(&mut out, &line);
    }

    out
}

pub fn profit_report(report: &ProfitReport, config: &AppConfig) -> String {
    let (as_of, rows, total_profit) = match report {
        ProfitReport::NoSales { .. } => return format!("{}\n", NO_SALES),
        ProfitReport::Sales {
            as_of,
            rows,
            total_profit,
        } => (as_of, rows, *total_profit),
    };

    let mut out = String::new();
    push_line(&mut out, &format!("Report date: {}", as_of));
    push_line(
        &mut out,
        &format!("{:<26} {:<30}", "Product name", "Total product profits"),
    );
    for row in rows {
        push_line(
            &mut out,
            &format!("{:<26} {:<30}", row.name, row.total_profit),
        );
    }
    push_line(
        &mut out,
        &format!("Total profits: {}", config.format_money(total_profit)),
    );

    out
}

pub fn full_listing(listing: &FullListing) -> String {
    let mut out = String::new();
    push_line(&mut out, &format!("Report date: {}", listing.as_of));
    push_line(
        &mut out,
        &format!(
            "{:<20} {:<15} {:<12} {:<10} {:<12} {:<10} {:<10}",
            "Name", "Category", "Price", "VAT (%)", "Code", "Units", "Threshold"
        ),
    );

    for row in &listing.rows {
        push_line(
            &mut out,
            &format!(
                "{:<20} {:<15} {:<12} {:<10} {:<12} {:<10} {:<10}",
                row.name,
                row.category,
                row.sale_price,
                row.vat,
                row.code,
                row.available_units,
                row.minimum_threshold
            ),
        );
    }

    out
}

pub fn product(product: &Product) -> String {
    let mut out = String::new();
    push_line(&mut out, "Product found:");
    push_line(&mut out, &format!("Name: {}", product.name()));
    push_line(&mut out, &format!("Category: {}", product.category()));
    push_line(&mut out, &format!("Price: {}", product.sale_price()));
    push_line(&mut out, &format!("VAT (%): {}", product.vat()));
    push_line(&mut out, &format!("Code: {}", product.code()));
    push_line(
        &mut out,
        &format!("Available units: {}", product.available_units()),
    );
    push_line(
        &mut out,
        &format!("Minimum threshold: {}", product.minimum_threshold()),
    );
    out
}

/// Per-item errors followed by the purchase total.
pub fn batch_sale(batch: &BatchSale, config: &AppConfig) -> String {
    let mut out = String::new();

    for line in batch.sold() {
        push_line(
            &mut out,
            &format!(
                "Sold {} x {}: {}",
                line.units,
                line.name,
                config.format_money(line.amount)
            ),
        );
    }

    for (request, err) in batch.failures() {
        push_line(
            &mut out,
            &format!("Error: {} ({}): {}", request.name, request.units, err),
        );
    }

    if batch.sold().next().is_some() {
        push_line(
            &mut out,
            &format!(
                "The total cost of this purchase (VAT included) is: {}",
                config.format_money(batch.total())
            ),
        );
    }

    out
}
