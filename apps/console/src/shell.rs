//! # Interactive Shell
//!
//! Executes parsed [`Command`]s against the shared [`InventoryState`] and
//! drives the read-eval-print loop.
//!
//! ## Loop
//! ```text
//! read line ──► blank? ──yes──► skip
//!                  │no
//!                  ▼
//!            command::parse ──► Shell::execute ──► print output
//!                  │                  │
//!                  └──── AppError ────┴──► "Error: <message>", keep going
//! ```
//!
//! The report date is passed in by the caller, so execution is
//! deterministic under test.

use std::io::{BufRead, Write};

use chrono::NaiveDate;
use serde::Serialize;
use stockbook_core::Product;
use tracing::{debug, info, warn};

use crate::command::{self, Command, OutputFormat, ProductDraft, HELP};
use crate::config::AppConfig;
use crate::error::AppError;
use crate::render;
use crate::state::InventoryState;

/// Result of executing one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Text to print
    Output(String),
    /// The operator asked to leave
    Quit,
}

pub struct Shell {
    state: InventoryState,
    config: AppConfig,
}

impl Shell {
    pub fn new(state: InventoryState, config: AppConfig) -> Self {
        Shell { state, config }
    }

    pub fn state(&self) -> &InventoryState {
        &self.state
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Executes one command.
    pub fn execute(&self, command: Command, today: NaiveDate) -> Result<Outcome, AppError> {
        let output = match command {
            Command::Add(drafts) => self.add(drafts)?,
            Command::Remove(name) => self.remove(&name),
            Command::Find(name) => self.find(&name),
            Command::Restock { name, units } => self.restock(&name, units)?,
            Command::Sell(requests) => {
                debug!(items = requests.len(), "Processing sale");
                let batch = self.state.sell_each(requests);
                for (request, err) in batch.failures() {
                    warn!(product = %request.name, units = request.units, "Sale rejected: {}", err);
                }
                info!(total = %batch.total(), "Sale completed");
                render::batch_sale(&batch, &self.config)
            }
            Command::Update { name, field } => {
                let updated = self
                    .state
                    .with_inventory_mut(|inv| inv.update(&name, field).map(render::product))?;
                info!(product = %name, "Product updated");
                updated.replacen("Product found:", "Product updated:", 1)
            }
            Command::Stock(format) => {
                let report = self.state.with_inventory(|inv| inv.stock_report(today));
                match format {
                    OutputFormat::Text => render::stock_report(&report),
                    OutputFormat::Json => to_json(&report)?,
                }
            }
            Command::Profit(format) => {
                let report = self.state.with_inventory(|inv| inv.profit_report(today));
                match format {
                    OutputFormat::Text => render::profit_report(&report, &self.config),
                    OutputFormat::Json => to_json(&report)?,
                }
            }
            Command::List(format) => {
                let listing = self.state.with_inventory(|inv| inv.full_listing(today));
                match format {
                    OutputFormat::Text => render::full_listing(&listing),
                    OutputFormat::Json => to_json(&listing)?,
                }
            }
            Command::Help => format!("{}\n", HELP),
            Command::Quit => return Ok(Outcome::Quit),
        };

        Ok(Outcome::Output(output))
    }

    /// Builds every draft, then registers the ones that validated.
    fn add(&self, drafts: Vec<ProductDraft>) -> Result<String, AppError> {
        let mut out = String::new();
        let mut products = Vec::with_capacity(drafts.len());

        for draft in drafts {
            match Product::new(
                &draft.name,
                &draft.category,
                draft.price,
                draft.vat,
                &draft.code,
                draft.units,
                draft.minimum_threshold,
            ) {
                Ok(product) => products.push(product),
                Err(err) => {
                    warn!(product = %draft.name, "Rejected product: {}", err);
                    out.push_str(&format!("Error: {}: {}\n", draft.name, AppError::from(err).message));
                }
            }
        }

        if products.is_empty() {
            return Ok(out);
        }

        let received = products.len();
        let added = self.state.with_inventory_mut(|inv| inv.register(products))?;
        info!(added, merged = received - added, "Products registered");

        out.push_str(&format!("Registered {} new product(s)", added));
        if received > added {
            out.push_str(&format!(", merged stock into {}", received - added));
        }
        out.push_str(".\n");
        Ok(out)
    }

    fn remove(&self, name: &str) -> String {
        if self.state.with_inventory_mut(|inv| inv.remove(name)) {
            info!(product = %name, "Product removed");
            "Product removed.\n".to_string()
        } else {
            "Product not found.\n".to_string()
        }
    }

    fn find(&self, name: &str) -> String {
        self.state
            .with_inventory(|inv| inv.find(name).map(render::product))
            .unwrap_or_else(|| "Product not found.\n".to_string())
    }

    fn restock(&self, name: &str, units: i64) -> Result<String, AppError> {
        let available = self
            .state
            .with_inventory_mut(|inv| inv.restock(name, units).map(|p| p.available_units()))?;
        info!(product = %name, units, available, "Product restocked");
        Ok(format!("Restocked. Available units: {}\n", available))
    }

    /// Reads commands from `input` until EOF or `quit`.
    pub fn run<R, W>(&self, input: R, output: &mut W, today: NaiveDate) -> std::io::Result<()>
    where
        R: BufRead,
        W: Write,
    {
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            debug!(input = %line.trim(), "Command received");
            let outcome = command::parse(&line)
                .map_err(AppError::from)
                .and_then(|cmd| self.execute(cmd, today));

            match outcome {
                Ok(Outcome::Output(text)) => output.write_all(text.as_bytes())?,
                Ok(Outcome::Quit) => break,
                Err(err) => {
                    debug!(code = ?err.code, "Command failed");
                    writeln!(output, "Error: {}", err.message)?;
                }
            }
            output.flush()?;
        }

        Ok(())
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, AppError> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    Ok(text)
}
