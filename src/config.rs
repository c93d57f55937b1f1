//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.storelens.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Dataset settings.
    #[serde(default)]
    pub data: DataConfig,

    /// Chart rendering settings.
    #[serde(default)]
    pub charts: ChartsConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { verbose: false }
    }
}

/// Dataset settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path to the transactions CSV.
    #[serde(default = "default_dataset_path")]
    pub path: String,

    /// Show a progress spinner while parsing rows.
    #[serde(default = "default_true")]
    pub show_progress: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
            show_progress: true,
        }
    }
}

fn default_dataset_path() -> String {
    "superstore_dataset2011-2015.csv".to_string()
}

/// Chart rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartsConfig {
    /// Width of value bars in characters.
    #[serde(default = "default_bar_width")]
    pub bar_width: usize,

    /// Columns of the scatter grid.
    #[serde(default = "default_scatter_columns")]
    pub scatter_columns: usize,

    /// Rows of the scatter grid.
    #[serde(default = "default_scatter_rows")]
    pub scatter_rows: usize,
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            bar_width: default_bar_width(),
            scatter_columns: default_scatter_columns(),
            scatter_rows: default_scatter_rows(),
        }
    }
}

fn default_bar_width() -> usize {
    40
}

fn default_scatter_columns() -> usize {
    60
}

fn default_scatter_rows() -> usize {
    20
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".storelens.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        // Dataset path - only override if explicitly provided via CLI
        if let Some(ref data) = args.data {
            self.data.path = data.display().to_string();
        }

        // Quiet mode suppresses the parse spinner along with logging
        if args.quiet {
            self.data.show_progress = false;
        }

        // Flags always override
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.data.path, "superstore_dataset2011-2015.csv");
        assert!(config.data.show_progress);
        assert_eq!(config.charts.bar_width, 40);
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
verbose = true

[data]
path = "data/transactions.csv"
show_progress = false

[charts]
bar_width = 60
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert!(config.general.verbose);
        assert_eq!(config.data.path, "data/transactions.csv");
        assert!(!config.data.show_progress);
        assert_eq!(config.charts.bar_width, 60);
        // Unset values fall back to defaults
        assert_eq!(config.charts.scatter_columns, 60);
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[data]"));
        assert!(toml_str.contains("[charts]"));
    }
}
