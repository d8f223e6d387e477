use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum SnagError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Timed out after {secs}s fetching {url}")]
    Timeout { url: String, secs: u64 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Other(String),
}

impl SnagError {
    /// True for failures of a fetch tier. The pipeline logs these as
    /// warnings and anything else as an error.
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            SnagError::Http(_)
                | SnagError::Status { .. }
                | SnagError::Browser(_)
                | SnagError::Timeout { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, SnagError>;
