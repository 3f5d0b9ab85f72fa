//! # Floor Configuration
//!
//! Venue settings shared by the three screens.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     BARRIO_VENUE_NAME="Barrio Palermo"                                 │
//! │     BARRIO_LATE_AFTER_MINUTES=20                                       │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/floor/floor.toml (Linux)                                 │
//! │     ~/Library/Application Support/com.barrio.floor/floor.toml (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     15 minute late threshold, $ with '.' grouping                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # floor.toml
//! [venue]
//! name = "Barrio Café & Bar"
//!
//! [currency]
//! symbol = "$"
//! thousands_separator = "."
//!
//! [kitchen]
//! late_after_minutes = 15
//!
//! [sales]
//! historical_baseline = 154300
//! ```

use barrio_core::{Money, DEFAULT_HISTORICAL_SALES, LATE_AFTER_MINUTES};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{FloorError, FloorResult};

// =============================================================================
// Sections
// =============================================================================

/// The venue shown in screen headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueSettings {
    #[serde(default = "default_venue_name")]
    pub name: String,
}

fn default_venue_name() -> String {
    "Barrio Café & Bar".to_string()
}

impl Default for VenueSettings {
    fn default() -> Self {
        Self {
            name: default_venue_name(),
        }
    }
}

/// How amounts are rendered. Amounts are whole units, so there are no decimals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencySettings {
    #[serde(default = "default_symbol")]
    pub symbol: String,

    /// Thousands grouping character ("7.400").
    #[serde(default = "default_separator")]
    pub thousands_separator: char,
}

fn default_symbol() -> String {
    barrio_core::money::DEFAULT_SYMBOL.to_string()
}

fn default_separator() -> char {
    barrio_core::money::DEFAULT_SEPARATOR
}

impl Default for CurrencySettings {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
            thousands_separator: default_separator(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KitchenSettings {
    /// A ticket is late once its oldest pending line has waited longer than this.
    #[serde(default = "default_late_after_minutes")]
    pub late_after_minutes: i64,
}

fn default_late_after_minutes() -> i64 {
    LATE_AFTER_MINUTES
}

impl Default for KitchenSettings {
    fn default() -> Self {
        Self {
            late_after_minutes: default_late_after_minutes(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesSettings {
    /// Earlier-in-the-day sales added to the live session for the daily estimate.
    #[serde(default = "default_historical_baseline")]
    pub historical_baseline: i64,
}

fn default_historical_baseline() -> i64 {
    DEFAULT_HISTORICAL_SALES.units()
}

impl Default for SalesSettings {
    fn default() -> Self {
        Self {
            historical_baseline: default_historical_baseline(),
        }
    }
}

// =============================================================================
// FloorConfig
// =============================================================================

/// Complete floor configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorConfig {
    #[serde(default)]
    pub venue: VenueSettings,

    #[serde(default)]
    pub currency: CurrencySettings,

    #[serde(default)]
    pub kitchen: KitchenSettings,

    #[serde(default)]
    pub sales: SalesSettings,
}

impl FloorConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (floor.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> FloorResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading floor config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load floor config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a `floor.toml` document. Missing sections and keys take defaults.
    pub fn from_toml(contents: &str) -> FloorResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> FloorResult<()> {
        barrio_core::validation::validate_name("venue.name", &self.venue.name)?;

        if self.currency.symbol.is_empty() {
            return Err(FloorError::InvalidConfig(
                "currency.symbol must not be empty".into(),
            ));
        }

        if self.currency.thousands_separator.is_ascii_digit() {
            return Err(FloorError::InvalidConfig(format!(
                "currency.thousands_separator cannot be a digit, got '{}'",
                self.currency.thousands_separator
            )));
        }

        if self.kitchen.late_after_minutes <= 0 {
            return Err(FloorError::InvalidConfig(
                "kitchen.late_after_minutes must be greater than 0".into(),
            ));
        }

        if self.sales.historical_baseline < 0 {
            return Err(FloorError::InvalidConfig(
                "sales.historical_baseline cannot be negative".into(),
            ));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `BARRIO_*` overrides read through `lookup`.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("BARRIO_VENUE_NAME") {
            debug!(venue = %name, "Overriding venue name from environment");
            self.venue.name = name;
        }

        if let Some(symbol) = lookup("BARRIO_CURRENCY_SYMBOL") {
            self.currency.symbol = symbol;
        }

        if let Some(minutes) = lookup("BARRIO_LATE_AFTER_MINUTES") {
            match minutes.parse::<i64>() {
                Ok(m) => {
                    debug!(minutes = m, "Overriding late threshold from environment");
                    self.kitchen.late_after_minutes = m;
                }
                Err(_) => warn!(value = %minutes, "Ignoring non-numeric BARRIO_LATE_AFTER_MINUTES"),
            }
        }

        if let Some(baseline) = lookup("BARRIO_HISTORICAL_SALES") {
            match baseline.parse::<i64>() {
                Ok(units) => self.sales.historical_baseline = units,
                Err(_) => warn!(value = %baseline, "Ignoring non-numeric BARRIO_HISTORICAL_SALES"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "barrio", "floor")
            .map(|dirs| dirs.config_dir().join("floor.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Renders an amount with the configured symbol and grouping.
    pub fn format_money(&self, amount: Money) -> String {
        amount.format_with(&self.currency.symbol, self.currency.thousands_separator)
    }

    pub fn late_after(&self) -> Duration {
        Duration::minutes(self.kitchen.late_after_minutes)
    }

    pub fn historical_baseline(&self) -> Money {
        Money::from_units(self.sales.historical_baseline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barrio_core::MAX_NAME_LEN;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = FloorConfig::default();
        assert_eq!(config.venue.name, "Barrio Café & Bar");
        assert_eq!(config.late_after(), Duration::minutes(15));
        assert_eq!(config.historical_baseline().units(), 154_300);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = FloorConfig::from_toml(
            r#"
            [kitchen]
            late_after_minutes = 20
            "#,
        )
        .unwrap();

        assert_eq!(config.kitchen.late_after_minutes, 20);
        assert_eq!(config.currency, CurrencySettings::default());
        assert_eq!(config.sales, SalesSettings::default());
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            FloorConfig::from_toml("[kitchen]\nlate_after_minutes = \"soon\""),
            Err(FloorError::TomlParse(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = FloorConfig::default();
        config.kitchen.late_after_minutes = 0;
        assert!(matches!(config.validate(), Err(FloorError::InvalidConfig(_))));

        let mut config = FloorConfig::default();
        config.currency.thousands_separator = '5';
        assert!(config.validate().is_err());

        let mut config = FloorConfig::default();
        config.venue.name = String::new();
        assert!(matches!(config.validate(), Err(FloorError::Core(_))));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("BARRIO_VENUE_NAME", "Barrio Palermo"),
            ("BARRIO_LATE_AFTER_MINUTES", "20"),
            ("BARRIO_HISTORICAL_SALES", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let mut config = FloorConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.venue.name, "Barrio Palermo");
        assert_eq!(config.kitchen.late_after_minutes, 20);
        // Unparseable values leave the previous setting in place.
        assert_eq!(config.sales.historical_baseline, 154_300);
        assert_eq!(config.currency.symbol, "$");
    }

    #[test]
    fn test_format_money() {
        let mut config = FloorConfig::default();
        assert_eq!(config.format_money(Money::from_units(161_700)), "$161.700");

        config.currency.symbol = "ARS ".into();
        config.currency.thousands_separator = ',';
        assert_eq!(config.format_money(Money::from_units(7400)), "ARS 7,400");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("barrio-floor-missing-config.toml");
        let config = FloorConfig::load_or_default(Some(path));
        assert_eq!(config.kitchen.late_after_minutes, 15);
    }

    #[test]
    fn test_venue_name_limit() {
        let mut config = FloorConfig::default();
        config.venue.name = "x".repeat(MAX_NAME_LEN + 1);
        assert!(config.validate().is_err());
    }
}
