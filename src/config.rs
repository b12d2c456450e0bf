//! Runtime configuration.
//!
//! Loaded from `~/.finfacts/config.json` when present, otherwise defaults.
//! Every field is individually defaulted so a partial file only overrides
//! what it names.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog;
use crate::db::PeriodRange;
use crate::index::DEFAULT_EF_SEARCH;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config at {path}: {source}")]
    Invalid {
        path: String,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Root for the database, downloaded workbooks, and the model cache.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Universe of tickers to fetch and load.
    #[serde(default = "default_tickers")]
    pub tickers: Vec<String>,

    /// Quarter range the period table is generated over.
    #[serde(default)]
    pub periods: PeriodRange,

    /// HNSW search effort; higher trades latency for recall.
    #[serde(default = "default_ef_search")]
    pub ef_search: usize,
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_default().join(".finfacts")
}

fn default_tickers() -> Vec<String> {
    catalog::COMPANIES
        .iter()
        .map(|c| c.ticker.to_string())
        .collect()
}

fn default_ef_search() -> usize {
    DEFAULT_EF_SEARCH
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            tickers: default_tickers(),
            periods: PeriodRange::default(),
            ef_search: default_ef_search(),
        }
    }
}

impl Config {
    /// Load `~/.finfacts/config.json`, falling back to defaults when absent.
    pub fn load() -> Result<Self, ConfigError> {
        let path = default_data_dir().join("config.json");
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| ConfigError::Invalid {
            path: path.display().to_string(),
            source: e,
        })
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("finfacts.db")
    }

    /// Where downloaded workbooks land, one `<TICKER>.xlsx` each.
    pub fn statements_dir(&self) -> PathBuf {
        self.data_dir.join("statements")
    }

    /// fastembed model cache.
    pub fn models_dir(&self) -> PathBuf {
        self.data_dir.join("models")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.tickers.len(), 10);
        assert!(config.tickers.contains(&"KCHOL".to_string()));
        assert_eq!(config.ef_search, DEFAULT_EF_SEARCH);
        assert_eq!(config.periods.start_year, 2006);
    }

    #[test]
    fn test_partial_file_only_overrides_named_fields() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "tickers": ["KCHOL", "SAHOL"], "efSearch": 64 }"#).unwrap();

        let config = Config::load_from(&path).expect("load");
        assert_eq!(config.tickers, vec!["KCHOL", "SAHOL"]);
        assert_eq!(config.ef_search, 64);
        // Unnamed fields keep their defaults
        assert_eq!(config.periods.end_year, 2025);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn test_derived_paths() {
        let config = Config {
            data_dir: PathBuf::from("/tmp/ff"),
            ..Config::default()
        };
        assert_eq!(config.db_path(), PathBuf::from("/tmp/ff/finfacts.db"));
        assert_eq!(config.statements_dir(), PathBuf::from("/tmp/ff/statements"));
        assert_eq!(config.models_dir(), PathBuf::from("/tmp/ff/models"));
    }
}
