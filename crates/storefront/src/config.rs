//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `MERCHSTAND_DATA_DIR` - Data directory for the file store (default: `.merchstand`)
//! - `MERCHSTAND_SHIPPING_FEE` - Flat shipping fee in dollars (default: `5.00`)
//! - `MERCHSTAND_TAX_RATE` - Tax rate as a fraction (default: `0.10`)

use std::path::PathBuf;

use rust_decimal::{Decimal, dec};
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory the file store writes into.
    pub data_dir: PathBuf,
    /// Checkout pricing rules.
    pub pricing: PricingConfig,
}

/// The pricing rules applied at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingConfig {
    /// Flat shipping fee added to every order.
    pub shipping_fee: Decimal,
    /// Tax rate applied to the order subtotal.
    pub tax_rate: Decimal,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            shipping_fee: dec!(5.00),
            tax_rate: dec!(0.10),
        }
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".merchstand"),
            pricing: PricingConfig::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be
    /// parsed, or if a pricing amount is negative.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let data_dir = PathBuf::from(get_env_or_default("MERCHSTAND_DATA_DIR", ".merchstand"));
        let shipping_fee = get_decimal_or_default("MERCHSTAND_SHIPPING_FEE", dec!(5.00))?;
        let tax_rate = get_decimal_or_default("MERCHSTAND_TAX_RATE", dec!(0.10))?;

        Ok(Self {
            data_dir,
            pricing: PricingConfig {
                shipping_fee,
                tax_rate,
            },
        })
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get a non-negative decimal environment variable with a default.
fn get_decimal_or_default(key: &str, default: Decimal) -> Result<Decimal, ConfigError> {
    let Ok(raw) = std::env::var(key) else {
        return Ok(default);
    };
    let value: Decimal = raw
        .parse()
        .map_err(|e: rust_decimal::Error| ConfigError::InvalidEnvVar(key.to_owned(), e.to_string()))?;
    if value < Decimal::ZERO {
        return Err(ConfigError::InvalidEnvVar(
            key.to_owned(),
            "must not be negative".to_owned(),
        ));
    }
    Ok(value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pricing() {
        let pricing = PricingConfig::default();
        assert_eq!(pricing.shipping_fee, dec!(5.00));
        assert_eq!(pricing.tax_rate, dec!(0.10));
    }

    #[test]
    fn test_default_data_dir() {
        let config = StorefrontConfig::default();
        assert_eq!(config.data_dir, PathBuf::from(".merchstand"));
    }
}
