//! Configuration file support for the training tracker.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/onepunchman/config.toml`.
//! The dark/light preference is part of the saved state, not of this file.

use crate::series::DEFAULT_WINDOW_DAYS;
use crate::transfer::APP_NAME;
use crate::weight_log::{DEFAULT_WEIGHT_KG, DEFAULT_WEIGHT_STEP_KG};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub weight: WeightConfig,

    #[serde(default)]
    pub series: SeriesConfig,
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

/// Where the filesystem exporter puts export documents
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            export_dir: default_export_dir(),
        }
    }
}

/// Weight entry parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WeightConfig {
    #[serde(default = "default_weight_kg")]
    pub default_kg: f64,

    #[serde(default = "default_step_kg")]
    pub step_kg: f64,
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            default_kg: default_weight_kg(),
            step_kg: default_step_kg(),
        }
    }
}

/// Trend graph parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SeriesConfig {
    #[serde(default = "default_window_days")]
    pub window_days: usize,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
        }
    }
}

// Default value functions
fn home_fallback(relative: &str) -> PathBuf {
    let home = std::env::var_os("HOME").unwrap_or_else(|| ".".into());
    PathBuf::from(home).join(relative)
}

fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| home_fallback(".local/share"));
    base.join(APP_NAME)
}

fn default_export_dir() -> PathBuf {
    let base = dirs::cache_dir().unwrap_or_else(|| home_fallback(".cache"));
    base.join(APP_NAME)
}

fn default_weight_kg() -> f64 {
    DEFAULT_WEIGHT_KG
}

fn default_step_kg() -> f64 {
    DEFAULT_WEIGHT_STEP_KG
}

fn default_window_days() -> usize {
    DEFAULT_WINDOW_DAYS
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

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| home_fallback(".config"));
        base.join(APP_NAME).join("config.toml")
    }

    /// Reject values the core cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.series.window_days == 0 {
            return Err(Error::Config("series.window_days must be at least 1".into()));
        }
        if !(self.weight.default_kg.is_finite() && self.weight.default_kg > 0.0) {
            return Err(Error::Config("weight.default_kg must be positive".into()));
        }
        if !(self.weight.step_kg.is_finite() && self.weight.step_kg > 0.0) {
            return Err(Error::Config("weight.step_kg must be positive".into()));
        }
        Ok(())
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.weight.default_kg, 70.0);
        assert_eq!(config.weight.step_kg, 0.5);
        assert_eq!(config.series.window_days, 30);
        assert!(config.data.data_dir.ends_with("onepunchman"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.series.window_days = 14;
        config.save_to(&path).unwrap();

        let parsed = Config::load_from(&path).unwrap();
        assert_eq!(parsed.series.window_days, 14);
        assert_eq!(parsed.data.data_dir, config.data.data_dir);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[weight]
default_kg = 82.5
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.weight.default_kg, 82.5);
        assert_eq!(config.weight.step_kg, 0.5); // default
        assert_eq!(config.series.window_days, 30); // default
    }

    #[test]
    fn test_validate_rejects_empty_window() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[series]\nwindow_days = 0\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));
    }
}
