// ⚙️ Configuration - TOML file, environment, then command line
//
// [ledger]
// path = "insurance-ledger.db"
//
// [log]
// level = "info"

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment variable that overrides `ledger.path`
pub const LEDGER_DB_ENV: &str = "INSURANCE_LEDGER_DB";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub ledger: LedgerConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LedgerConfig {
    /// SQLite file holding world state and history
    pub path: PathBuf,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        LedgerConfig {
            path: PathBuf::from("insurance-ledger.db"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// Default filter directive when RUST_LOG is unset
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Read `path` if given, else start from defaults; then apply the environment
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let config = match path {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file {}", path.display()))?;
                Config::from_toml_str(&text)
                    .with_context(|| format!("Invalid config file {}", path.display()))?
            }
            None => Config::default(),
        };

        Ok(config.apply_env_from(|name| std::env::var(name).ok()))
    }

    pub fn from_toml_str(text: &str) -> Result<Config> {
        let config = toml::from_str(text)?;
        Ok(config)
    }

    /// Apply environment overrides read through `lookup`
    pub fn apply_env_from<F>(mut self, lookup: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(LEDGER_DB_ENV).filter(|p| !p.is_empty()) {
            self.ledger.path = PathBuf::from(path);
        }
        self
    }
}
