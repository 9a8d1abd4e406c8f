//! Configuration management for nl-ask.
//!
//! Handles loading configuration from TOML files and environment variables,
//! with support for named backend profiles and the golden-question list.

use crate::api::HttpConfig;
use crate::error::{AskError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Main configuration structure for nl-ask.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// The default backend.
    #[serde(default)]
    pub backend: ProfileConfig,

    /// Named backend profiles, selected with `--profile`.
    #[serde(default)]
    pub backends: HashMap<String, ProfileConfig>,

    /// Questions offered as one-keystroke shortcuts in the sidebar.
    #[serde(default = "default_golden_questions")]
    pub golden_questions: Vec<String>,
}

/// One backend's settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileConfig {
    /// Base URL of the backend.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds. Absent means wait indefinitely.
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_golden_questions() -> Vec<String> {
    vec![
        "Show top 5 customers by balance".to_string(),
        "Show recent transactions".to_string(),
        "Show accounts in Istanbul".to_string(),
        "List customers".to_string(),
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: ProfileConfig::default(),
            backends: HashMap::new(),
            golden_questions: default_golden_questions(),
        }
    }
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

impl ProfileConfig {
    /// Applies environment variables as defaults for settings the config
    /// file left untouched.
    ///
    /// Reads `NL_ASK_URL` and `NL_ASK_TIMEOUT_SECS`.
    pub fn apply_env_defaults(&mut self) {
        if self.base_url == default_base_url() {
            if let Ok(url) = std::env::var("NL_ASK_URL") {
                self.base_url = url;
            }
        }
        if self.timeout_secs.is_none() {
            if let Ok(secs) = std::env::var("NL_ASK_TIMEOUT_SECS") {
                if let Ok(secs) = secs.parse() {
                    self.timeout_secs = Some(secs);
                }
            }
        }
    }

    /// Converts the profile into an HTTP client configuration.
    pub fn to_http_config(&self) -> HttpConfig {
        HttpConfig {
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("nl-ask")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| AskError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            AskError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })
    }

    /// Gets a named profile, or the default backend if name is None.
    pub fn get_profile(&self, name: Option<&str>) -> Option<&ProfileConfig> {
        match name {
            Some(name) => self.backends.get(name),
            None => Some(&self.backend),
        }
    }
}
