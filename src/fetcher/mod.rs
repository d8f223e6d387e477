pub mod http_fetcher;

use async_trait::async_trait;

use crate::app::Result;

/// Raw markup of a page and the URL it was actually served from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    pub html: String,
    /// Final URL after redirects; the base for relative references
    pub url: String,
}

/// One tier of page retrieval.
///
/// An `Err` is a fetch failure the pipeline recovers from; it never
/// reaches the pipeline's caller.
#[async_trait]
pub trait Fetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResult>;
}
