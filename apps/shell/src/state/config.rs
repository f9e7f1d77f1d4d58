//! # Configuration State
//!
//! Store settings loaded once at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Loading Order                          │
//! │                                                                         │
//! │  1. Defaults (this file)                                               │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  2. TOML file ── path: explicit arg, else $STOREFRONT_CONFIG,          │
//! │        │         else <platform config dir>/storefront.toml            │
//! │        ▼                                                                │
//! │  3. Environment variables (STOREFRONT_*) ── highest priority           │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  4. validate()                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! store_name = "Snow Shop"
//! currency_code = "CAD"
//! currency_symbol = "$"
//! currency_decimals = 2
//! catalog_path = "/srv/storefront/products.json"
//!
//! [toast]
//! enter_ms = 300
//! dwell_ms = 2000
//! exit_ms = 300
//! ```
//!
//! Configuration is read-only after startup, so no mutex.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use storefront_core::{Money, ToastTimings};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "STOREFRONT_CONFIG";

/// Largest `currency_decimals` the formatter supports.
const MAX_CURRENCY_DECIMALS: u8 = 4;

/// Upper bound for any single toast phase.
const MAX_TOAST_PHASE_MS: u64 = 60_000;

// =============================================================================
// Errors
// =============================================================================

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

// =============================================================================
// Toast Settings
// =============================================================================

/// Toast phase durations in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastConfig {
    pub enter_ms: u64,
    pub dwell_ms: u64,
    pub exit_ms: u64,
}

impl Default for ToastConfig {
    fn default() -> Self {
        ToastConfig {
            enter_ms: 300,
            dwell_ms: 2000,
            exit_ms: 300,
        }
    }
}

impl ToastConfig {
    pub fn timings(&self) -> ToastTimings {
        ToastTimings::from_millis(self.enter_ms, self.dwell_ms, self.exit_ms)
    }
}

// =============================================================================
// Config State
// =============================================================================

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigState {
    /// Shown in the shell banner
    pub store_name: String,

    /// Currency code (ISO 4217)
    pub currency_code: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,

    /// Catalog JSON to load instead of the bundled fixture
    pub catalog_path: Option<PathBuf>,

    pub toast: ToastConfig,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Store: "Storefront"
    /// - Currency: CAD ($), two decimals
    /// - Catalog: bundled fixture
    /// - Toasts: 300ms in, 2s on screen, 300ms out
    fn default() -> Self {
        ConfigState {
            store_name: "Storefront".to_string(),
            currency_code: "CAD".to_string(),
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
            catalog_path: None,
            toast: ToastConfig::default(),
        }
    }
}

impl ConfigState {
    /// Loads configuration from file and environment.
    ///
    /// A missing file is not an error; defaults are used.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let path = config_path
            .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from))
            .or_else(Self::default_config_path);

        if let Some(path) = path {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads configuration, falling back to defaults on any error.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Saves configuration to file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)?;

        info!(?path, "Config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store_name.trim().is_empty() {
            return Err(ConfigError::Invalid("store_name must not be empty".into()));
        }

        if self.currency_code.len() != 3
            || !self.currency_code.chars().all(|c| c.is_ascii_uppercase())
        {
            return Err(ConfigError::Invalid(format!(
                "currency_code must be three uppercase letters, got: {}",
                self.currency_code
            )));
        }

        if self.currency_decimals > MAX_CURRENCY_DECIMALS {
            return Err(ConfigError::Invalid(format!(
                "currency_decimals must be at most {}",
                MAX_CURRENCY_DECIMALS
            )));
        }

        let toast = &self.toast;
        for (key, value) in [
            ("toast.enter_ms", toast.enter_ms),
            ("toast.dwell_ms", toast.dwell_ms),
            ("toast.exit_ms", toast.exit_ms),
        ] {
            if value > MAX_TOAST_PHASE_MS {
                return Err(ConfigError::Invalid(format!(
                    "{} must be at most {}",
                    key, MAX_TOAST_PHASE_MS
                )));
            }
        }

        Ok(())
    }

    /// Applies `STOREFRONT_*` environment variables.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup.
    ///
    /// Unparseable numbers are logged and ignored.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("STOREFRONT_STORE_NAME") {
            debug!(store_name = %name, "Overriding store name from environment");
            self.store_name = name;
        }

        if let Some(code) = lookup("STOREFRONT_CURRENCY_CODE") {
            self.currency_code = code;
        }

        if let Some(symbol) = lookup("STOREFRONT_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }

        if let Some(decimals) = lookup("STOREFRONT_CURRENCY_DECIMALS") {
            match decimals.parse::<u8>() {
                Ok(d) => self.currency_decimals = d,
                Err(_) => warn!(value = %decimals, "Ignoring STOREFRONT_CURRENCY_DECIMALS"),
            }
        }

        if let Some(path) = lookup("STOREFRONT_CATALOG_PATH") {
            debug!(path = %path, "Overriding catalog path from environment");
            self.catalog_path = Some(PathBuf::from(path));
        }

        for (key, slot) in [
            ("STOREFRONT_TOAST_ENTER_MS", &mut self.toast.enter_ms),
            ("STOREFRONT_TOAST_DWELL_MS", &mut self.toast.dwell_ms),
            ("STOREFRONT_TOAST_EXIT_MS", &mut self.toast.exit_ms),
        ] {
            if let Some(value) = lookup(key) {
                match value.parse::<u64>() {
                    Ok(ms) => *slot = ms,
                    Err(_) => warn!(key, value = %value, "Ignoring unparseable toast duration"),
                }
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "storefront", "shell")
            .map(|dirs| dirs.config_dir().join("storefront.toml"))
    }

    /// Toast phase durations.
    pub fn toast_timings(&self) -> ToastTimings {
        self.toast.timings()
    }

    /// Formats an amount with the configured symbol and decimals.
    ///
    /// Fewer than two decimals rounds half away from zero.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let decimals = u32::from(self.currency_decimals);
        let cents = i128::from(amount.cents());

        let minor = if decimals >= 2 {
            cents.abs() * 10_i128.pow(decimals - 2)
        } else {
            let divisor = 10_i128.pow(2 - decimals);
            (cents.abs() + divisor / 2) / divisor
        };

        let scale = 10_i128.pow(decimals);
        let whole = minor / scale;
        let frac = minor % scale;

        let sign = if cents < 0 && minor != 0 { "-" } else { "" };
        if decimals > 0 {
            format!(
                "{}{}{}.{:0width$}",
                sign,
                self.currency_symbol,
                whole,
                frac,
                width = decimals as usize
            )
        } else {
            format!("{}{}{}", sign, self.currency_symbol, whole)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    #[test]
    fn test_format_currency_default() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
        assert_eq!(config.format_currency(Money::from_cents(100)), "$1.00");
        assert_eq!(config.format_currency(Money::from_cents(1)), "$0.01");
        assert_eq!(config.format_currency(Money::zero()), "$0.00");
        assert_eq!(config.format_currency(Money::from_cents(-1234)), "-$12.34");
    }

    #[test]
    fn test_format_currency_other_decimals() {
        let mut config = ConfigState::default();
        config.currency_symbol = "€".to_string();

        config.currency_decimals = 0;
        assert_eq!(config.format_currency(Money::from_cents(1250)), "€13");
        assert_eq!(config.format_currency(Money::from_cents(1249)), "€12");

        config.currency_decimals = 3;
        assert_eq!(config.format_currency(Money::from_cents(1234)), "€12.340");
    }

    #[test]
    fn test_from_toml_partial() {
        let config = ConfigState::from_toml_str(
            r#"
            store_name = "Snow Shop"

            [toast]
            dwell_ms = 500
            "#,
        )
        .unwrap();

        assert_eq!(config.store_name, "Snow Shop");
        assert_eq!(config.currency_code, "CAD");
        assert_eq!(config.toast.enter_ms, 300);
        assert_eq!(config.toast_timings().dwell, Duration::from_millis(500));
    }

    #[test]
    fn test_from_toml_rejects_bad_types() {
        let err = ConfigState::from_toml_str("currency_decimals = \"two\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ConfigState::default();
        let rendered = config.to_toml().unwrap();
        assert!(rendered.contains("[toast]"));
        assert_eq!(ConfigState::from_toml_str(&rendered).unwrap(), config);
    }

    #[test]
    fn test_validation() {
        let mut config = ConfigState::default();
        assert!(config.validate().is_ok());

        config.currency_code = "cad".to_string();
        assert!(config.validate().is_err());

        config.currency_code = "USD".to_string();
        config.currency_decimals = 9;
        assert!(config.validate().is_err());

        config.currency_decimals = 2;
        config.toast.dwell_ms = 3_600_000;
        assert!(config.validate().is_err());

        config.toast.dwell_ms = 2000;
        config.store_name = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("STOREFRONT_STORE_NAME", "Env Shop"),
            ("STOREFRONT_CURRENCY_DECIMALS", "zero"),
            ("STOREFRONT_CATALOG_PATH", "/tmp/products.json"),
            ("STOREFRONT_TOAST_EXIT_MS", "150"),
        ]);

        let mut config = ConfigState::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.store_name, "Env Shop");
        assert_eq!(config.currency_decimals, 2);
        assert_eq!(config.catalog_path, Some(PathBuf::from("/tmp/products.json")));
        assert_eq!(config.toast.exit_ms, 150);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("storefront-test-does-not-exist.toml");
        let config = ConfigState::load(Some(path)).unwrap();
        assert_eq!(config.toast, ToastConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir()
            .join(format!("storefront-config-test-{}", std::process::id()))
            .join("storefront.toml");

        let mut config = ConfigState::default();
        config.store_name = "Saved Shop".to_string();
        config.save(&path).unwrap();

        let loaded = ConfigState::load(Some(path.clone())).unwrap();
        assert_eq!(loaded.store_name, "Saved Shop");

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
