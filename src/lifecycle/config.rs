//! # Console Configuration
//!
//! [`ConsoleConfig`] holds everything the console needs to reach the API and tune its
//! controllers. Defaults suit a local backend; `FOLIO_*` environment variables override them.
//!
//! | Variable | Field |
//! |---|---|
//! | `FOLIO_API_BASE_URL` | `api_base_url` |
//! | `FOLIO_REQUEST_TIMEOUT_MS` | `request_timeout_ms` |
//! | `FOLIO_AUTH_TOKEN` | `auth_token` |
//! | `FOLIO_SEARCH_DEBOUNCE_MS` | `search_debounce_ms` |
//! | `FOLIO_SEARCH_MIN_LENGTH` | `search_min_length` |
//! | `FOLIO_AUDIT_PAGE_SIZE` | `audit_page_size` |
//! | `FOLIO_MAILBOX_CAPACITY` | `mailbox_capacity` |
//! | `FOLIO_DEMO_MODE` | `demo_mode` |
//! | `FOLIO_DOWNLOAD_DIR` | `download_dir` |

use crate::controllers::SearchSettings;
use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {var}")]
    Invalid { var: &'static str, value: String },

    #[error("malformed config file: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub api_base_url: String,
    pub request_timeout_ms: u64,
    pub auth_token: Option<String>,
    pub search_debounce_ms: u64,
    pub search_min_length: usize,
    pub audit_page_size: u32,
    pub mailbox_capacity: usize,
    pub demo_mode: bool,
    pub download_dir: PathBuf,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080/api".to_string(),
            request_timeout_ms: 10_000,
            auth_token: None,
            search_debounce_ms: 300,
            search_min_length: 2,
            audit_page_size: 20,
            mailbox_capacity: 32,
            demo_mode: false,
            download_dir: PathBuf::from("."),
        }
    }
}

impl ConsoleConfig {
    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().overlay(|key| std::env::var(key).ok())
    }

    pub fn from_json_str(body: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(body)?)
    }

    /// Applies every `FOLIO_*` variable `lookup` knows about.
    pub fn overlay(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        if let Some(url) = lookup("FOLIO_API_BASE_URL") {
            self.api_base_url = url;
        }
        if let Some(token) = lookup("FOLIO_AUTH_TOKEN") {
            self.auth_token = Some(token).filter(|t| !t.is_empty());
        }
        if let Some(dir) = lookup("FOLIO_DOWNLOAD_DIR") {
            self.download_dir = PathBuf::from(dir);
        }
        parse_into(&lookup, "FOLIO_REQUEST_TIMEOUT_MS", &mut self.request_timeout_ms)?;
        parse_into(&lookup, "FOLIO_SEARCH_DEBOUNCE_MS", &mut self.search_debounce_ms)?;
        parse_into(&lookup, "FOLIO_SEARCH_MIN_LENGTH", &mut self.search_min_length)?;
        parse_into(&lookup, "FOLIO_AUDIT_PAGE_SIZE", &mut self.audit_page_size)?;
        parse_into(&lookup, "FOLIO_MAILBOX_CAPACITY", &mut self.mailbox_capacity)?;
        if let Some(value) = lookup("FOLIO_DEMO_MODE") {
            self.demo_mode = match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" | "" => false,
                _ => return Err(ConfigError::Invalid { var: "FOLIO_DEMO_MODE", value }),
            };
        }
        Ok(self)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn search_settings(&self) -> SearchSettings {
        SearchSettings {
            debounce: Duration::from_millis(self.search_debounce_ms),
            min_length: self.search_min_length,
        }
    }
}

fn parse_into<V: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    slot: &mut V,
) -> Result<(), ConfigError> {
    if let Some(value) = lookup(var) {
        *slot = value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value })?;
    }
    Ok(())
}
