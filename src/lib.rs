//! # snag
//!
//! Product metadata extraction from arbitrary shop pages: title, price,
//! primary image, site icon, site name and an image gallery, given only a URL.
//!
//! ## Architecture
//!
//! ```text
//! Static fetch → Extractors → complete? → [Rendered fetch → Extractors] → ProductRecord
//! ```
//!
//! - [`fetcher`]: plain HTTP tier, cheap and tried first
//! - [`scraper`]: headless Chrome tier for client-rendered pages
//! - [`extract`]: structured data, meta/class heuristics and title fallback
//! - [`normalizer`]: URL resolution and price normalization
//! - [`pipeline`]: escalation policy between the two tiers
//!
//! ## Quick Start
//!
//! ```bash
//! # One page, pretty JSON
//! snag extract https://shop.example.com/product/1
//!
//! # Several pages, never launching a browser
//! snag extract --static-only https://a.example.com/p https://b.example.com/q
//! ```
//!
//! ```rust,ignore
//! use snag::config::Config;
//! use snag::pipeline::Pipeline;
//!
//! let pipeline = Pipeline::from_config(&Config::default())?;
//! let record = pipeline.extract_product("https://shop.example.com/p/1").await;
//! println!("{} costs {:?}", record.title, record.price);
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together configuration
/// and the pipeline.
pub mod app;

/// Command-line interface using clap.
///
/// - `extract <url>...` - Extract records and print JSON
/// - `config` - Show the effective configuration
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/snag/config.toml`: fetch identity and timeouts,
/// browser limits, and the extraction rule tables.
pub mod config;

/// Core domain models.
///
/// - [`ProductRecord`](domain::ProductRecord): the pipeline's output
/// - [`ExtractionCandidate`](domain::ExtractionCandidate): per-strategy partial record
pub mod domain;

/// Field extraction strategies and their rule tables.
pub mod extract;

/// HTTP fetching.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait shared by both tiers
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// URL resolution and price normalization.
pub mod normalizer;

/// Two-tier orchestration.
pub mod pipeline;

/// Headless browser tier.
///
/// Uses headless Chrome via chromiumoxide to render pages whose markup is
/// built client-side.
///
/// - [`ChromeFetcher`](scraper::ChromeFetcher): one isolated browser per call
/// - [`ScraperConfig`](scraper::ScraperConfig): Configuration options
pub mod scraper;
