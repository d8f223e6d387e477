//! Settings for the static HTTP tier.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Desktop browser identity sent by both tiers unless overridden.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Default number of pages extracted at once by batch runs.
pub const DEFAULT_WORKERS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// User agent for the plain GET (and the browser when it has none)
    pub user_agent: String,

    /// Whole-request timeout in seconds (default: 10)
    pub timeout_secs: u64,

    /// Pages processed concurrently by batch extraction (default: 10)
    pub max_concurrency: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 10,
            max_concurrency: DEFAULT_WORKERS,
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FetchConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.max_concurrency, DEFAULT_WORKERS);
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn test_zero_timeout_is_raised() {
        let config = FetchConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(1));
    }
}
