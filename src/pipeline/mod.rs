//! Two-tier extraction: a cheap static fetch, escalating to a rendered
//! fetch only when the cheap result is incomplete.
//!
//! ```text
//! static fetch → extract → complete? ──yes──→ record
//!                              │ no
//!                              ↓
//!                 rendered fetch → extract → record
//! ```
//!
//! A record is complete when it has both a primary image and a price.
//! Nothing escapes [`Pipeline::run`]: fetch failures degrade to the partial
//! static record or to [`ProductRecord::fallback`].

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

use crate::app::{Result, SnagError};
use crate::config::Config;
use crate::domain::{site_name_of, ProductRecord};
use crate::extract::Extractor;
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::{FetchResult, Fetcher};
use crate::scraper::ChromeFetcher;

/// Which tier produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordSource {
    Static,
    Rendered,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineOutcome {
    pub record: ProductRecord,
    pub source: RecordSource,
}

#[derive(Clone)]
pub struct Pipeline {
    static_fetcher: Arc<dyn Fetcher + Send + Sync>,
    rendered_fetcher: Option<Arc<dyn Fetcher + Send + Sync>>,
    extractor: Arc<Extractor>,
    semaphore: Arc<Semaphore>,
}

impl Pipeline {
    pub fn new(
        static_fetcher: Arc<dyn Fetcher + Send + Sync>,
        rendered_fetcher: Option<Arc<dyn Fetcher + Send + Sync>>,
        extractor: Extractor,
        workers: usize,
    ) -> Self {
        Self {
            static_fetcher,
            rendered_fetcher,
            extractor: Arc::new(extractor),
            semaphore: Arc::new(Semaphore::new(workers.max(1))),
        }
    }

    /// Static HTTP tier backed by a headless Chrome tier.
    pub fn from_config(config: &Config) -> Result<Self> {
        let rendered: Arc<dyn Fetcher + Send + Sync> = Arc::new(ChromeFetcher::new(
            config.scraper.clone(),
            &config.fetch.user_agent,
        ));
        Self::build(config, Some(rendered))
    }

    /// Static HTTP tier only; incomplete records are returned as they are.
    pub fn static_only(config: &Config) -> Result<Self> {
        Self::build(config, None)
    }

    fn build(
        config: &Config,
        rendered: Option<Arc<dyn Fetcher + Send + Sync>>,
    ) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::new(&config.fetch)?);
        Ok(Self::new(
            fetcher,
            rendered,
            Extractor::new(&config.extract),
            config.fetch.max_concurrency,
        ))
    }

    /// Extract product metadata from `url`. Never fails.
    pub async fn extract_product(&self, url: &str) -> ProductRecord {
        self.run(url).await.record
    }

    /// Like [`Pipeline::extract_product`], also reporting the tier used.
    pub async fn run(&self, url: &str) -> PipelineOutcome {
        let url = url.trim();

        let partial = match self.static_fetcher.fetch(url).await {
            Ok(page) => {
                let record = self.extract(&page, url);
                if record.is_complete() {
                    info!("Static fetch complete for {}", url);
                    return PipelineOutcome {
                        record,
                        source: RecordSource::Static,
                    };
                }
                info!("Static result for {} lacks image or price", url);
                Some(record)
            }
            Err(e) => {
                report_failure("Static", url, &e);
                None
            }
        };

        if let Some(ref rendered) = self.rendered_fetcher {
            info!("Escalating {} to rendered fetch", url);
            match rendered.fetch(url).await {
                Ok(page) => {
                    return PipelineOutcome {
                        record: self.extract(&page, url),
                        source: RecordSource::Rendered,
                    };
                }
                Err(e) => report_failure("Rendered", url, &e),
            }
        }

        match partial {
            Some(record) => PipelineOutcome {
                record,
                source: RecordSource::Static,
            },
            None => PipelineOutcome {
                record: ProductRecord::fallback(url),
                source: RecordSource::Fallback,
            },
        }
    }

    /// Run many URLs concurrently, bounded by the worker count.
    ///
    /// Results are returned in input order.
    pub async fn extract_many(&self, urls: &[String]) -> Vec<PipelineOutcome> {
        let mut handles = Vec::new();

        for url in urls {
            let pipeline = self.clone();
            let url = url.clone();

            let handle = tokio::spawn(async move {
                let _permit = match pipeline.semaphore.acquire().await {
                    Ok(permit) => permit,
                    Err(e) => {
                        error!("Worker pool closed before {} could run: {}", url, e);
                        return PipelineOutcome {
                            record: ProductRecord::fallback(&url),
                            source: RecordSource::Fallback,
                        };
                    }
                };
                pipeline.run(&url).await
            });

            handles.push(handle);
        }

        let mut results = Vec::with_capacity(urls.len());
        for (url, handle) in urls.iter().zip(handles) {
            match handle.await {
                Ok(outcome) => results.push(outcome),
                Err(e) => {
                    error!("Task join error for {}: {}", url, e);
                    results.push(PipelineOutcome {
                        record: ProductRecord::fallback(url),
                        source: RecordSource::Fallback,
                    });
                }
            }
        }

        results
    }

    fn extract(&self, page: &FetchResult, url: &str) -> ProductRecord {
        let mut record = self.extractor.extract(&page.html, &page.url);
        record.site_name = site_name_of(url);
        record
    }
}

/// Network and browser failures are expected on the open web; anything else
/// points at a local problem.
fn report_failure(tier: &str, url: &str, e: &SnagError) {
    if e.is_fetch_error() {
        warn!("{} fetch failed for {}: {}", tier, url, e);
    } else {
        error!("{} fetch failed for {}: {}", tier, url, e);
    }
}
