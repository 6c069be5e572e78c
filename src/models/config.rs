use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Name of the optional config file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "colsplit.toml";

/// Configuration loaded from colsplit.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub split: SplitConfig,
    #[serde(default)]
    pub csv: CsvConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Default values for the `col` command flags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitConfig {
    /// 1-based column to split by
    #[serde(default = "default_column")]
    pub column: usize,
    /// Minimum number of rows before an output file is flushed
    #[serde(default = "default_line")]
    pub line: usize,
    /// Process groups by ascending row count
    #[serde(default)]
    pub sort: bool,
    /// Treat the first row as a title row
    #[serde(default)]
    pub tile: bool,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            column: default_column(),
            line: default_line(),
            sort: false,
            tile: false,
        }
    }
}

fn default_column() -> usize {
    1
}

fn default_line() -> usize {
    1
}

/// CSV reader configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CsvConfig {
    /// Accept records with a varying number of fields
    #[serde(default)]
    pub flexible: bool,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Write each output to a temp file and rename it into place
    #[serde(default = "default_atomic_writes")]
    pub atomic_writes: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            atomic_writes: default_atomic_writes(),
        }
    }
}

fn default_atomic_writes() -> bool {
    true
}

impl Config {
    /// Load config from a TOML file
    pub fn load_from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
        toml::from_str(&contents).map_err(|e| ConfigError::ParseError(path.clone(), e))
    }

    /// Try to load config from colsplit.toml in the given directory
    pub fn load_from_dir(dir: &PathBuf) -> Result<Self, ConfigError> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            Self::load_from_file(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Merge CLI overrides into the config
    pub fn with_overrides(
        mut self,
        column: Option<usize>,
        line: Option<usize>,
        sort: bool,
        tile: bool,
    ) -> Self {
        if let Some(c) = column {
            self.split.column = c;
        }
        if let Some(l) = line {
            self.split.line = l;
        }
        if sort {
            self.split.sort = true;
        }
        if tile {
            self.split.tile = true;
        }
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(PathBuf, std::io::Error),
    #[error("Failed to parse config file {0}: {1}")]
    ParseError(PathBuf, toml::de::Error),
}
