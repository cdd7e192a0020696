//! # Configuration
//!
//! Settings loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`STOCKBOOK_*`)
//! 2. Defaults (this file)
//!
//! Configuration is read-only after initialization, so no mutex needed.

use stockbook_core::Money;

/// Default tracing filter when neither `RUST_LOG` nor `STOCKBOOK_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "info,stockbook=debug";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Shown in the banner and report headers
    pub store_name: String,

    /// Prefix for totals ("$", "€", or empty)
    pub currency_symbol: String,

    /// tracing-subscriber filter directive
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            store_name: "Stockbook".to_string(),
            currency_symbol: String::new(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    /// Creates the configuration from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `STOCKBOOK_STORE_NAME`: Override store name
    /// - `STOCKBOOK_CURRENCY_SYMBOL`: Prefix for money totals
    /// - `STOCKBOOK_LOG`: Log filter (`RUST_LOG` still wins if set)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();

        if let Some(store_name) = lookup("STOCKBOOK_STORE_NAME").filter(|s| !s.trim().is_empty()) {
            config.store_name = store_name.trim().to_string();
        }

        if let Some(symbol) = lookup("STOCKBOOK_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol.trim().to_string();
        }

        if let Some(filter) = lookup("STOCKBOOK_LOG").filter(|s| !s.trim().is_empty()) {
            config.log_filter = filter;
        }

        config
    }

    /// Formats money with the configured symbol ("$33.00", "-€5.50").
    pub fn format_money(&self, amount: Money) -> String {
        let sign = if amount.is_negative() { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            self.currency_symbol,
            amount.major().abs(),
            amount.minor()
        )
    }
}
