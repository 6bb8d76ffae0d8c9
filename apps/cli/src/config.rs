//! # Configuration
//!
//! Application configuration loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--db`)
//! 2. Environment variables (`NIMBUS_*`)
//! 3. Defaults (this file)
//!
//! Configuration is read-only after start-up.

use std::path::PathBuf;

use serde::Serialize;
use tracing::warn;

use nimbus_core::validation::validate_tax_rate_bps;
use nimbus_core::{Money, TaxRate, DEFAULT_TAX_RATE};

/// Application configuration.
#[derive(Debug, Clone, Serialize)]
pub struct AppConfig {
    /// Shown in the dashboard header.
    pub company_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Rate used to pre-fill invoice line tax when a product is selected.
    pub default_tax_rate: TaxRate,

    /// Database file override (`NIMBUS_DB_PATH`).
    pub db_path: Option<PathBuf>,
}

impl Default for AppConfig {
    /// Development defaults: "Nimbus ERP", `$`, 10 % tax, platform data dir.
    fn default() -> Self {
        AppConfig {
            company_name: "Nimbus ERP".to_string(),
            currency_symbol: "$".to_string(),
            default_tax_rate: DEFAULT_TAX_RATE,
            db_path: None,
        }
    }
}

impl AppConfig {
    /// Creates a configuration from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `NIMBUS_DB_PATH`: Database file
    /// - `NIMBUS_COMPANY_NAME`: Company name
    /// - `NIMBUS_CURRENCY_SYMBOL`: Currency symbol
    /// - `NIMBUS_TAX_RATE`: Default tax rate as a percentage (e.g., "8.25")
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();

        if let Some(path) = lookup("NIMBUS_DB_PATH").filter(|p| !p.trim().is_empty()) {
            config.db_path = Some(PathBuf::from(path));
        }

        if let Some(name) = lookup("NIMBUS_COMPANY_NAME").filter(|n| !n.trim().is_empty()) {
            config.company_name = name.trim().to_string();
        }

        if let Some(symbol) = lookup("NIMBUS_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(raw) = lookup("NIMBUS_TAX_RATE") {
            match raw.trim().parse::<f64>() {
                Ok(pct) if pct.is_finite() && pct >= 0.0 => {
                    let rate = TaxRate::from_percentage(pct);
                    match validate_tax_rate_bps(rate.bps()) {
                        Ok(()) => config.default_tax_rate = rate,
                        Err(e) => warn!(value = %raw, error = %e, "Ignoring NIMBUS_TAX_RATE"),
                    }
                }
                _ => warn!(value = %raw, "Ignoring NIMBUS_TAX_RATE: not a percentage"),
            }
        }

        config
    }

    /// Formats an amount with the configured currency symbol.
    ///
    /// ## Example
    /// ```rust
    /// use nimbus_cli::config::AppConfig;
    /// use nimbus_core::Money;
    ///
    /// let config = AppConfig::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        format!(
            "{}{}{}.{:02}",
            if amount.is_negative() { "-" } else { "" },
            self.currency_symbol,
            amount.dollars().abs(),
            amount.cents_part()
        )
    }
}
