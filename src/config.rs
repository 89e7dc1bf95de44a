use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::BrowserError;
use crate::favorites::DEFAULT_FAVORITES_KEY;

/// Runtime settings for the recipe browser
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct BrowserConfig {
    /// File holding the local key-value storage (favorites live there)
    #[serde(default = "default_storage_path")]
    pub storage_path: PathBuf,
    /// Storage key for the favorites list
    #[serde(default = "default_favorites_key")]
    pub favorites_key: String,
    /// Quiet period in milliseconds before typed search text is applied
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            storage_path: default_storage_path(),
            favorites_key: default_favorites_key(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

// Default value functions
fn default_storage_path() -> PathBuf {
    PathBuf::from("recipe-browser-storage.json")
}

fn default_favorites_key() -> String {
    DEFAULT_FAVORITES_KEY.to_string()
}

fn default_debounce_ms() -> u64 {
    300
}

impl BrowserConfig {
    /// Load configuration from `recipe-browser.toml` (if present) and the
    /// environment
    pub fn load() -> Result<Self, BrowserError> {
        load_config(None)
    }

    /// Load configuration from an explicit file, which must exist, and the
    /// environment
    pub fn load_from(path: &Path) -> Result<Self, BrowserError> {
        load_config(Some(path))
    }
}

/// Load configuration from file and environment variables
///
/// Configuration is loaded with the following priority (highest to lowest):
/// 1. Environment variables with RECIPE_BROWSER__ prefix
/// 2. The given file, or recipe-browser.toml in the current directory
/// 3. Default values
///
/// Environment variable format: RECIPE_BROWSER__DEBOUNCE_MS
pub fn load_config(path: Option<&Path>) -> Result<BrowserConfig, BrowserError> {
    let file = match path {
        Some(path) => File::from(path).required(true),
        None => File::with_name("recipe-browser").required(false),
    };

    let settings = Config::builder()
        .add_source(file)
        .add_source(
            Environment::with_prefix("RECIPE_BROWSER")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
