//! Scrape configuration.
//!
//! The command-line tools always run with [`ScrapeConfig::default`]; library
//! callers can load overrides from TOML. Missing keys fall back to defaults.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default desktop browser user agent; Yahoo rejects obvious bot agents.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/124.0 Safari/537.36";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    /// Parent of every per-ticker directory.
    pub data_root: PathBuf,
    /// First day requested for historical series.
    pub history_start: NaiveDate,
    pub user_agent: String,
    /// Host serving the Yahoo JSON APIs, e.g. `https://query2.finance.yahoo.com`.
    pub query_host: String,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            data_root: PathBuf::from("data/stock_info"),
            history_start: NaiveDate::from_ymd_opt(1970, 1, 1).expect("valid epoch date"),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            query_host: "https://query2.finance.yahoo.com".to_string(),
        }
    }
}

impl ScrapeConfig {
    /// Load a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("read config file: {e}"))?;
        Self::from_toml(&content)
    }

    /// Parse a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("parse config TOML: {e}"))
    }
}
