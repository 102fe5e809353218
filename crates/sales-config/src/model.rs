use serde::{Deserialize, Serialize};
use std::{fmt, path::Path, path::PathBuf, str::FromStr};

use sales_domain::{Granularity, DEFAULT_TOP_N};

use crate::ConfigError;

/// Highest number of decimal places accepted for amounts.
pub const MAX_CURRENCY_PRECISION: u8 = 6;

/// Stores user-configurable CLI preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_currency")]
    pub currency: String,
    #[serde(default = "Config::default_locale")]
    pub locale: String,
    #[serde(default = "Config::default_currency_precision")]
    pub currency_precision: u8,
    #[serde(default)]
    pub default_granularity: Granularity,
    #[serde(default = "Config::default_top_n")]
    pub top_n: usize,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom sales data file. Defaults to `<home>/data/sales.json`.
    pub data_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: Self::default_currency(),
            locale: Self::default_locale(),
            currency_precision: Self::default_currency_precision(),
            default_granularity: Granularity::default(),
            top_n: Self::default_top_n(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            data_file: None,
        }
    }
}

impl Config {
    pub fn default_currency() -> String {
        "INR".into()
    }

    pub fn default_locale() -> String {
        "en-IN".into()
    }

    pub fn default_currency_precision() -> u8 {
        2
    }

    pub fn default_top_n() -> usize {
        DEFAULT_TOP_N
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn resolve_data_file(&self, home: &Path) -> PathBuf {
        match &self.data_file {
            Some(path) => path.clone(),
            None => home.join("data").join("sales.json"),
        }
    }

    /// Current value of `key`, rendered the way `set` accepts it.
    pub fn value_of(&self, key: ConfigKey) -> String {
        match key {
            ConfigKey::Currency => self.currency.clone(),
            ConfigKey::Locale => self.locale.clone(),
            ConfigKey::CurrencyPrecision => self.currency_precision.to_string(),
            ConfigKey::DefaultGranularity => self.default_granularity.as_str().to_string(),
            ConfigKey::TopN => self.top_n.to_string(),
            ConfigKey::UiColorEnabled => self.ui_color_enabled.to_string(),
            ConfigKey::DataFile => self
                .data_file
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_default(),
        }
    }

    /// Parses `raw` and assigns it to `key`. The config is unchanged on error.
    pub fn set(&mut self, key: ConfigKey, raw: &str) -> Result<(), ConfigError> {
        let value = raw.trim();
        let invalid = |reason: &str| ConfigError::InvalidValue {
            key: key.as_str(),
            value: value.to_string(),
            reason: reason.to_string(),
        };
        match key {
            ConfigKey::Currency => {
                if value.is_empty() {
                    return Err(invalid("currency code cannot be empty"));
                }
                self.currency = value.to_ascii_uppercase();
            }
            ConfigKey::Locale => {
                if value.is_empty() {
                    return Err(invalid("locale cannot be empty"));
                }
                self.locale = value.to_string();
            }
            ConfigKey::CurrencyPrecision => {
                let precision: u8 = value.parse().map_err(|_| invalid("expected a whole number"))?;
                if precision > MAX_CURRENCY_PRECISION {
                    return Err(invalid("precision must be between 0 and 6"));
                }
                self.currency_precision = precision;
            }
            ConfigKey::DefaultGranularity => {
                self.default_granularity = value
                    .parse()
                    .map_err(|err: sales_domain::ParseGranularityError| invalid(&err.to_string()))?;
            }
            ConfigKey::TopN => {
                self.top_n = value.parse().map_err(|_| invalid("expected a whole number"))?;
            }
            ConfigKey::UiColorEnabled => {
                self.ui_color_enabled = parse_flag(value).ok_or_else(|| invalid("expected on or off"))?;
            }
            ConfigKey::DataFile => {
                self.data_file = if value.is_empty() || value == "default" {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// Keys accepted by `config set`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    Currency,
    Locale,
    CurrencyPrecision,
    DefaultGranularity,
    TopN,
    UiColorEnabled,
    DataFile,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 7] = [
        ConfigKey::Currency,
        ConfigKey::Locale,
        ConfigKey::CurrencyPrecision,
        ConfigKey::DefaultGranularity,
        ConfigKey::TopN,
        ConfigKey::UiColorEnabled,
        ConfigKey::DataFile,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConfigKey::Currency => "currency",
            ConfigKey::Locale => "locale",
            ConfigKey::CurrencyPrecision => "currency_precision",
            ConfigKey::DefaultGranularity => "default_granularity",
            ConfigKey::TopN => "top_n",
            ConfigKey::UiColorEnabled => "ui_color_enabled",
            ConfigKey::DataFile => "data_file",
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        ConfigKey::ALL
            .into_iter()
            .find(|key| key.as_str() == normalized)
            .ok_or_else(|| ConfigError::UnknownKey(value.trim().to_string()))
    }
}
