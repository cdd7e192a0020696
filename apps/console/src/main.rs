//! # Stockbook Console Entry Point
//!
//! ```text
//! $ STOCKBOOK_CURRENCY_SYMBOL='$' stockbook
//! Stockbook inventory (2025-12-25). Type 'help' for commands.
//! add Widget;tools;10;10;W-1;5;2
//! Registered 1 new product(s).
//! sell Widget:3
//! Sold 3 x Widget: $33.00
//! The total cost of this purchase (VAT included) is: $33.00
//! ```

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // The actual setup is in lib.rs for testability
    stockbook_console::run()
}
