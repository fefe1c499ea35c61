//! Configuration module
//!
//! The engine takes its two ambient knobs (index file name, terminal
//! language suffix) as explicit configuration data on every call; nothing
//! is read from shared state.

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub resources: ResourcesConfig,
}

/// Resource resolution configuration
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ResourcesConfig {
    /// File name appended to directory-shaped request paths
    #[serde(default = "default_index_file")]
    pub index_file: String,
    /// Language suffix probed last, after every client preference
    #[serde(default = "default_fallback_suffix")]
    pub fallback_suffix: String,
}

#[allow(clippy::missing_const_for_fn)]
fn default_index_file() -> String {
    "index.html".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_fallback_suffix() -> String {
    ".en".to_string()
}

impl Default for ResourcesConfig {
    fn default() -> Self {
        Self {
            index_file: default_index_file(),
            fallback_suffix: default_fallback_suffix(),
        }
    }
}

impl Config {
    /// Load configuration from specified file path (without extension)
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("STATIK"))
            .set_default("resources.index_file", "index.html")?
            .set_default("resources.fallback_suffix", ".en")?
            .build()?;

        settings.try_deserialize()
    }
}
