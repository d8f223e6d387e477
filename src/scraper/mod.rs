//! Headless-browser tier for pages that only render client-side.
//!
//! # Architecture
//!
//! ```text
//! URL → permit → launch browser → navigate → serialize DOM → close browser
//! ```
//!
//! Each call owns a whole browser process, so the number of concurrent calls
//! is bounded by a semaphore sized from [`ScraperConfig::max_concurrency`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use snag::fetcher::Fetcher;
//! use snag::scraper::{ChromeFetcher, ScraperConfig};
//!
//! let fetcher = ChromeFetcher::new(ScraperConfig::default(), "Mozilla/5.0 ...");
//! let page = fetcher.fetch("https://example.com/product/1").await?;
//! println!("{} bytes from {}", page.html.len(), page.url);
//! ```

mod chrome;
mod config;

pub use chrome::ChromeFetcher;
pub use config::{ScraperConfig, LAUNCH_TIMEOUT_SECS, MAX_TIMEOUT_SECS, MIN_TIMEOUT_SECS};
