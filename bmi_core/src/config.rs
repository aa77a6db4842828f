//! Configuration file support for the BMI tracker.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/bmi/config.toml`, or from
//! the path in `BMI_CONFIG` when that variable is set.

use crate::sort::{SortDirection, SortField, SortState};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "BMI_CONFIG";

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub calculator: CalculatorConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Calculation behaviour
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// Pause before a result is shown, in milliseconds
    #[serde(default = "default_result_delay_ms")]
    pub result_delay_ms: u64,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            result_delay_ms: default_result_delay_ms(),
        }
    }
}

/// History table presentation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_sort")]
    pub default_sort: SortField,

    #[serde(default)]
    pub default_ascending: bool,

    /// Decimal places for BMI and weights
    #[serde(default = "default_decimals")]
    pub decimals: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            default_sort: default_sort(),
            default_ascending: false,
            decimals: default_decimals(),
        }
    }
}

impl DisplayConfig {
    /// Initial sort state for the history table
    pub fn sort_state(&self) -> SortState {
        let direction = if self.default_ascending {
            SortDirection::Ascending
        } else {
            SortDirection::Descending
        };
        SortState::new(self.default_sort, direction)
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("bmi")
}

fn default_result_delay_ms() -> u64 {
    600
}

fn default_sort() -> SortField {
    SortField::Date
}

fn default_decimals() -> usize {
    1
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the config file path, honouring `BMI_CONFIG`
    pub fn default_config_path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return PathBuf::from(path);
        }
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        base.join("bmi").join("config.toml")
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.display.decimals > 6 {
            return Err(Error::Config(format!(
                "display.decimals must be at most 6 (got {})",
                self.display.decimals
            )));
        }
        Ok(())
    }
}
