//! Runtime configuration.
//!
//! Values come from three layers, later ones winning:
//! 1. built-in defaults,
//! 2. a TOML file (`$DOCFILL_CONFIG`, or `docfill.toml` in the working directory if present),
//! 3. `DOCFILL_*` environment variables.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::{env, fs, io};
use thiserror::Error;

const DEFAULT_CONFIG_FILE: &str = "docfill.toml";
const CONFIG_PATH_VAR: &str = "DOCFILL_CONFIG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("invalid config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// SQLite database file.
    pub database_path: PathBuf,
    /// Directory holding rendered PDFs.
    pub contracts_dir: PathBuf,
    /// Directory with the TTF files used by the PDF renderer.
    pub fonts_dir: PathBuf,
    /// Font family names tried in order, e.g. `Arial` for `Arial-Regular.ttf`.
    pub font_families: Vec<String>,
    /// Largest accepted JSON body; signatures travel inline so this is generous.
    pub json_limit_bytes: usize,
    /// Seconds between orphaned-PDF sweeps; 0 disables the sweeper.
    pub sweep_interval_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database_path: PathBuf::from("contracts.sqlite"),
            contracts_dir: PathBuf::from("generated_contracts"),
            fonts_dir: PathBuf::from("./fonts"),
            font_families: vec!["Arial".to_string(), "LiberationSans".to_string()],
            json_limit_bytes: 10 * 1024 * 1024,
            sweep_interval_secs: 3600,
        }
    }
}

impl AppConfig {
    /// Loads the configuration from the file and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match env::var_os(CONFIG_PATH_VAR) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        config.apply_overrides(|key| env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies `DOCFILL_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("DOCFILL_HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("DOCFILL_PORT") {
            self.port = parse_number("DOCFILL_PORT", port)?;
        }
        if let Some(path) = lookup("DOCFILL_DATABASE") {
            self.database_path = PathBuf::from(path);
        }
        if let Some(dir) = lookup("DOCFILL_CONTRACTS_DIR") {
            self.contracts_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("DOCFILL_FONTS_DIR") {
            self.fonts_dir = PathBuf::from(dir);
        }
        if let Some(secs) = lookup("DOCFILL_SWEEP_INTERVAL_SECS") {
            self.sweep_interval_secs = parse_number("DOCFILL_SWEEP_INTERVAL_SECS", secs)?;
        }
        Ok(())
    }

    pub fn bind_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { key, value })
}
