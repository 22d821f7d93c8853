//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `BRIGHTBUY_DATA_FILE` - Path of the JSON storage file (default: `.brightbuy/storage.json`)
//! - `BRIGHTBUY_TAX_RATE` - Sales tax as a fraction of the subtotal (default: 0.08)
//! - `BRIGHTBUY_FREE_SHIPPING_THRESHOLD` - Subtotal above which shipping is free (default: 50)
//! - `BRIGHTBUY_FLAT_SHIPPING` - Shipping charge below the threshold (default: 9.99)
//! - `BRIGHTBUY_LOG_FORMAT` - `pretty` or `json` (default: pretty)

use std::path::PathBuf;
use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

/// Default location of the storage file, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = ".brightbuy/storage.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Top-level storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Where [`crate::storage::FileStorage`] keeps its data.
    pub data_file: PathBuf,
    /// Checkout pricing rules.
    pub pricing: PricingConfig,
    /// Log output format for binaries.
    pub log_format: LogFormat,
}

/// Checkout pricing rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingConfig {
    /// Tax as a fraction of the subtotal.
    pub tax_rate: Decimal,
    /// Subtotals strictly above this ship free.
    pub free_shipping_threshold: Decimal,
    /// Shipping charged at or below the threshold.
    pub flat_shipping: Decimal,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            tax_rate: Decimal::new(8, 2),
            free_shipping_threshold: Decimal::new(50, 0),
            flat_shipping: Decimal::new(999, 2),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable, colored output.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("expected `pretty` or `json`, got `{other}`")),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            pricing: PricingConfig::default(),
            log_format: LogFormat::default(),
        }
    }
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_file = get_optional_env(&lookup, "BRIGHTBUY_DATA_FILE")
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_FILE), PathBuf::from);

        let defaults = PricingConfig::default();
        let pricing = PricingConfig {
            tax_rate: get_amount(&lookup, "BRIGHTBUY_TAX_RATE", defaults.tax_rate)?,
            free_shipping_threshold: get_amount(
                &lookup,
                "BRIGHTBUY_FREE_SHIPPING_THRESHOLD",
                defaults.free_shipping_threshold,
            )?,
            flat_shipping: get_amount(&lookup, "BRIGHTBUY_FLAT_SHIPPING", defaults.flat_shipping)?,
        };

        let log_format = get_env_or_default(&lookup, "BRIGHTBUY_LOG_FORMAT", "pretty")
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::InvalidEnvVar("BRIGHTBUY_LOG_FORMAT".to_string(), e))?;

        Ok(Self {
            data_file,
            pricing,
            log_format,
        })
    }
}

fn get_env_or_default(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> String {
    get_optional_env(lookup, key).unwrap_or_else(|| default.to_string())
}

fn get_optional_env(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key).filter(|v| !v.trim().is_empty())
}

/// Parse a non-negative decimal amount, falling back to `default` when unset.
fn get_amount(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: Decimal,
) -> Result<Decimal, ConfigError> {
    let Some(raw) = get_optional_env(lookup, key) else {
        return Ok(default);
    };

    let value = Decimal::from_str(raw.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if value.is_sign_negative() {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must not be negative".to_string(),
        ));
    }
    Ok(value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = StoreConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, StoreConfig::default());
        assert_eq!(config.pricing.tax_rate, Decimal::new(8, 2));
        assert_eq!(config.pricing.flat_shipping, Decimal::new(999, 2));
    }

    #[test]
    fn test_overrides() {
        let config = StoreConfig::from_lookup(lookup(&[
            ("BRIGHTBUY_DATA_FILE", "/tmp/shop.json"),
            ("BRIGHTBUY_TAX_RATE", "0.1"),
            ("BRIGHTBUY_FREE_SHIPPING_THRESHOLD", "75"),
            ("BRIGHTBUY_FLAT_SHIPPING", "4.50"),
            ("BRIGHTBUY_LOG_FORMAT", "JSON"),
        ]))
        .unwrap();

        assert_eq!(config.data_file, PathBuf::from("/tmp/shop.json"));
        assert_eq!(config.pricing.tax_rate, Decimal::new(1, 1));
        assert_eq!(config.pricing.free_shipping_threshold, Decimal::new(75, 0));
        assert_eq!(config.pricing.flat_shipping, Decimal::new(450, 2));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = StoreConfig::from_lookup(lookup(&[
            ("BRIGHTBUY_DATA_FILE", "  "),
            ("BRIGHTBUY_TAX_RATE", ""),
        ]))
        .unwrap();
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn test_invalid_amount() {
        let err = StoreConfig::from_lookup(lookup(&[("BRIGHTBUY_TAX_RATE", "eight")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "BRIGHTBUY_TAX_RATE"));

        let err =
            StoreConfig::from_lookup(lookup(&[("BRIGHTBUY_FLAT_SHIPPING", "-1")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, ref msg) if msg.contains("negative")));
    }

    #[test]
    fn test_invalid_log_format() {
        let err = StoreConfig::from_lookup(lookup(&[("BRIGHTBUY_LOG_FORMAT", "xml")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "BRIGHTBUY_LOG_FORMAT"));
    }
}
