//! Configuration management for snag.
//!
//! Configuration is read from `~/.config/snag/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.
//! It is loaded once and shared read-only by every pipeline run.

pub mod fetch;

pub use fetch::{FetchConfig, DEFAULT_USER_AGENT, DEFAULT_WORKERS};

use crate::extract::ExtractRules;
use crate::scraper::ScraperConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Main configuration struct.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fetch: FetchConfig,
    pub scraper: ScraperConfig,
    pub extract: ExtractRules,
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// If the config file exists but is invalid, returns an error.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_config_path()?)
    }

    /// Load configuration from `path`, with the same rules as [`Config::load`].
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            Self::create_default_config(path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/snag/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("snag").join("config.toml"))
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# snag configuration
#
# Every key is optional; anything left out keeps its default.

[fetch]
# Identity sent with the plain HTTP request
user_agent = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"

# Request timeout in seconds
timeout_secs = 10

# Pages extracted at once when several URLs are given
max_concurrency = 10

[scraper]
# Run browser in headless mode (no visible window)
headless = true

# Navigation timeout in seconds (clamped to 20..60)
timeout_secs = 30

# Wait time after page load for client-side rendering (milliseconds)
wait_after_load_ms = 0

# Maximum browsers running at once; each one is a full Chrome process
max_concurrency = 2

# Skip downloads the markup does not need
block_images = true
block_stylesheets = true
block_fonts = true

# Path to Chrome/Chromium (auto-detected when unset)
# chrome_executable = "/usr/bin/chromium"

[extract]
# Price sources in priority order. The `content` attribute is used when
# present, otherwise the element text.
price_selectors = [
    "meta[property=\"product:price:amount\"]",
    "meta[property=\"og:price:amount\"]",
    "span.price",
    "div.price",
    "span.current-price",
    "span.product-price",
]

# Where the currency code of a heuristic price comes from
currency_selectors = [
    "meta[property=\"product:price:currency\"]",
    "meta[property=\"og:price:currency\"]",
]

# Price candidates containing any of these (case-insensitive) are skipped
price_blacklist = ["menu"]

# Primary image sources
image_selectors = [
    "meta[property=\"og:image\"]",
    "meta[property=\"og:image:secure_url\"]",
]

# Every match becomes a gallery image
gallery_selectors = ["meta[property=\"og:image\"]"]

# <link rel> substring marking the site icon
icon_rel = "icon"

# The page title is cut at the first of these
title_delimiters = ["|", "–"]
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_deserializes() {
        let content = Config::default_config_content();
        let config: Config = toml::from_str(&content).expect("Default config should be valid TOML");

        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
[scraper]
max_concurrency = 1

[extract]
price_blacklist = ["menu", "was"]
"##;
        let config: Config = toml::from_str(content).expect("Partial config should work");

        // Custom values
        assert_eq!(config.scraper.max_concurrency, 1);
        assert_eq!(config.extract.price_blacklist, vec!["menu", "was"]);
        // Default values
        assert_eq!(config.scraper.timeout_secs, 30);
        assert_eq!(config.fetch, FetchConfig::default());
        assert_eq!(config.extract.icon_rel, "icon");
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").expect("Empty config should work");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());

        // The written file loads back to the same values.
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_load_from_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[fetch]\ntimeout_secs = \"soon\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
