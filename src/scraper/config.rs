use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Bounds for the rendered-page timeout, in seconds
pub const MIN_TIMEOUT_SECS: u64 = 20;
pub const MAX_TIMEOUT_SECS: u64 = 60;

/// Cap on browser start-up, in seconds
pub const LAUNCH_TIMEOUT_SECS: u64 = 10;

/// Configuration for the headless-browser tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Whether to run the browser in headless mode (default: true)
    pub headless: bool,

    /// Navigation timeout in seconds, clamped to 20..=60 (default: 30)
    pub timeout_secs: u64,

    /// Extra wait after load for client-side rendering in milliseconds (default: 0)
    pub wait_after_load_ms: u64,

    /// Maximum browsers alive at once (default: 2)
    pub max_concurrency: usize,

    /// Whether to block images for faster loading (default: true)
    pub block_images: bool,

    /// Whether to block stylesheets for faster loading (default: true)
    pub block_stylesheets: bool,

    /// Whether to block web fonts for faster loading (default: true)
    pub block_fonts: bool,

    /// Chrome/Chromium binary; auto-detected when unset
    pub chrome_executable: Option<PathBuf>,

    /// User agent override; the `[fetch]` user agent when unset
    pub user_agent: Option<String>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            headless: true,
            timeout_secs: 30,
            wait_after_load_ms: 0,
            max_concurrency: 2,
            block_images: true,
            block_stylesheets: true,
            block_fonts: true,
            chrome_executable: None,
            user_agent: None,
        }
    }
}

impl ScraperConfig {
    /// Get the navigation timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.clamp(MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS))
    }

    /// Get the wait time after load as a Duration
    pub fn wait_after_load(&self) -> Duration {
        Duration::from_millis(self.wait_after_load_ms)
    }

    /// Upper bound on starting the browser process.
    ///
    /// Launch and render share one deadline of [`ScraperConfig::timeout`];
    /// this only keeps a hung launch from using all of it.
    pub fn launch_timeout(&self) -> Duration {
        Duration::from_secs(LAUNCH_TIMEOUT_SECS).min(self.timeout())
    }

    /// URL patterns the browser refuses to load, per the blocking switches.
    ///
    /// Patterns use URLPattern syntax and must be absolute. Only markup is
    /// serialized, so none of these affect extraction.
    pub fn blocked_url_patterns(&self) -> Vec<String> {
        let images: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "avif", "svg", "ico"];
        let stylesheets: &[&str] = &["css"];
        let fonts: &[&str] = &["woff", "woff2", "ttf", "otf", "eot"];

        [
            self.block_images.then_some(images),
            self.block_stylesheets.then_some(stylesheets),
            self.block_fonts.then_some(fonts),
        ]
        .into_iter()
        .flatten()
        .flatten()
        .map(|extension| format!("*://*:*/*.{extension}"))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = ScraperConfig::default();
        assert!(config.headless);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.wait_after_load_ms, 0);
        assert_eq!(config.max_concurrency, 2);
        assert!(config.block_images);
        assert!(config.block_stylesheets);
        assert!(config.block_fonts);
        assert!(config.chrome_executable.is_none());
    }

    #[test]
    fn test_launch_timeout_capped() {
        let config = ScraperConfig::default();
        assert_eq!(config.launch_timeout(), Duration::from_secs(10));
        assert!(config.launch_timeout() < config.timeout());
    }

    #[test]
    fn test_nothing_blocked_when_switches_off() {
        let config = ScraperConfig {
            block_images: false,
            block_stylesheets: false,
            block_fonts: false,
            ..Default::default()
        };
        assert!(config.blocked_url_patterns().is_empty());
    }

    #[test]
    fn test_blocked_patterns_are_absolute() {
        let patterns = ScraperConfig::default().blocked_url_patterns();
        assert!(!patterns.is_empty());
        for pattern in &patterns {
            assert!(pattern.starts_with("*://"), "{pattern} is not absolute");
        }
    }

    #[test]
    fn test_timeout_is_clamped() {
        let short = ScraperConfig {
            timeout_secs: 1,
            ..Default::default()
        };
        assert_eq!(short.timeout(), Duration::from_secs(20));

        let long = ScraperConfig {
            timeout_secs: 600,
            ..Default::default()
        };
        assert_eq!(long.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_blocked_patterns_follow_switches() {
        let config = ScraperConfig {
            block_images: false,
            ..Default::default()
        };
        let patterns = config.blocked_url_patterns();
        assert!(patterns.contains(&"*://*:*/*.css".to_string()));
        assert!(patterns.contains(&"*://*:*/*.woff2".to_string()));
        assert!(!patterns.contains(&"*://*:*/*.png".to_string()));
    }
}
