//! Configuration management for moltsolve

use crate::decode::Operation;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default verification API base URL
pub const DEFAULT_API_URL: &str = "https://www.moltbook.com/api/v1";

/// Environment variables that override the config file
pub mod env_vars {
    /// Bearer token for the verification endpoint
    pub const API_KEY: &str = "MOLTSOLVE_API_KEY";
    /// Base URL of the verification API
    pub const API_URL: &str = "MOLTSOLVE_API_URL";
}

/// Errors from validating configuration values
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Minimum token length must be at least 1, got {0}")]
    InvalidMinLength(usize),

    #[error("Short word '{0}' must be letters only")]
    InvalidShortWord(String),

    #[error("API base URL must start with http:// or https://, got '{0}'")]
    InvalidApiUrl(String),
}

/// Number matcher settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MatcherOptions {
    /// Normalized tokens shorter than this are ignored
    pub min_token_len: usize,
    /// Short words let through despite the length guard
    pub short_words: Vec<String>,
}

impl Default for MatcherOptions {
    fn default() -> Self {
        Self {
            min_token_len: 4,
            short_words: ["one", "two", "six", "ten"].map(String::from).to_vec(),
        }
    }
}

/// Value extractor settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExtractOptions {
    /// Merge adjacent tens and units word matches into one value
    pub compound_assembly: bool,
    /// Glue unmatched word fragments back together ("tWeN tY")
    pub rejoin_fragments: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            compound_assembly: true,
            rejoin_fragments: true,
        }
    }
}

/// Answer composer settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ComposerOptions {
    pub operation: Operation,
}

/// Verification API settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiOptions {
    /// Base URL; `/verify` is appended
    pub base_url: String,
    /// API key, if not given on the command line
    pub api_key: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub matcher: MatcherOptions,
    pub extract: ExtractOptions,
    pub composer: ComposerOptions,
    pub api: ApiOptions,
}

impl Config {
    /// Load configuration from file or use defaults, then apply environment
    /// overrides
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = match path {
            Some(p) => PathBuf::from(p),
            None => Self::default_config_path()?,
        };

        let mut config = if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config from {:?}", config_path))?;
            Self::from_toml(&contents)
                .with_context(|| format!("Failed to parse config from {:?}", config_path))?
        } else {
            Self::default()
        };

        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save configuration to file
    pub fn save(&self, path: Option<&str>) -> Result<()> {
        let config_path = match path {
            Some(p) => PathBuf::from(p),
            None => Self::default_config_path()?,
        };

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, contents)?;
        Ok(())
    }

    /// Get the default config file path
    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "moltsolve", "moltsolve")
            .context("Could not determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.toml"))
    }

    fn apply_env(&mut self) {
        self.apply_overrides(
            std::env::var(env_vars::API_KEY).ok(),
            std::env::var(env_vars::API_URL).ok(),
        );
    }

    fn apply_overrides(&mut self, api_key: Option<String>, api_url: Option<String>) {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.api.api_key = Some(key);
        }
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            self.api.base_url = url;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.matcher.min_token_len == 0 {
            return Err(ConfigError::InvalidMinLength(0));
        }
        if let Some(word) = self
            .matcher
            .short_words
            .iter()
            .find(|w| w.is_empty() || !w.chars().all(|c| c.is_ascii_lowercase()))
        {
            return Err(ConfigError::InvalidShortWord(word.clone()));
        }
        let url = &self.api.base_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidApiUrl(url.clone()));
        }
        Ok(())
    }

    /// Set the matcher's minimum token length
    pub fn set_min_token_len(&mut self, len: usize) -> Result<(), ConfigError> {
        if len == 0 {
            return Err(ConfigError::InvalidMinLength(len));
        }
        self.matcher.min_token_len = len;
        Ok(())
    }

    /// Whitelist a short word; returns false if it was already present
    pub fn add_short_word(&mut self, word: &str) -> Result<bool, ConfigError> {
        let word = word.trim().to_lowercase();
        if word.is_empty() || !word.chars().all(|c| c.is_ascii_lowercase()) {
            return Err(ConfigError::InvalidShortWord(word));
        }
        if self.matcher.short_words.contains(&word) {
            return Ok(false);
        }
        self.matcher.short_words.push(word);
        Ok(true)
    }

    /// Resolve the API key: explicit value first, then config/environment
    pub fn api_key<'a>(&'a self, explicit: Option<&'a str>) -> Option<&'a str> {
        explicit
            .filter(|k| !k.trim().is_empty())
            .or(self.api.api_key.as_deref())
            .filter(|k| !k.trim().is_empty())
    }
}
