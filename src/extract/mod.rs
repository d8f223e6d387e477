//! Multi-strategy field extraction from a parsed product page.
//!
//! Strategies run in a fixed priority order and each fills only the fields
//! still empty:
//!
//! ```text
//! StructuredData → MetaHeuristics → TitleFallback
//! ```
//!
//! The gallery is collected independently from the strategies.

mod meta;
mod rules;
mod structured;
mod title;

pub use meta::MetaHeuristics;
pub use rules::ExtractRules;
pub use structured::StructuredData;
pub use title::{first_segment, TitleFallback};

use std::collections::HashSet;

use scraper::{Html, Selector};
use tracing::debug;

use crate::domain::{site_name_of, ExtractionCandidate, ProductRecord, UNKNOWN_PRODUCT};
use crate::normalizer::resolve_url;

/// A parsed document together with the URL relative references resolve against.
pub struct Page<'a> {
    pub document: &'a Html,
    pub base_url: String,
}

impl<'a> Page<'a> {
    pub fn new(document: &'a Html, base_url: &str) -> Self {
        Self {
            document,
            base_url: base_url.to_string(),
        }
    }

    pub fn resolve(&self, href: &str) -> String {
        resolve_url(href, &self.base_url)
    }
}

/// One source of product signals.
pub trait Strategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Produce whatever fields this strategy can find; never fails.
    fn extract(&self, page: &Page<'_>) -> ExtractionCandidate;
}

/// Runs every strategy over a document and assembles the final record.
pub struct Extractor {
    strategies: Vec<Box<dyn Strategy>>,
    gallery: Vec<Selector>,
    base: Option<Selector>,
}

impl Extractor {
    pub fn new(rules: &ExtractRules) -> Self {
        let strategies: Vec<Box<dyn Strategy>> = vec![
            Box::new(StructuredData::new()),
            Box::new(MetaHeuristics::new(rules.clone())),
            Box::new(TitleFallback::new(rules.title_delimiters.clone())),
        ];

        Self {
            strategies,
            gallery: rules::compile(&rules.gallery_selectors),
            base: rules::parse("base[href]"),
        }
    }

    /// Extract a record from `html` fetched from `page_url`.
    pub fn extract(&self, html: &str, page_url: &str) -> ProductRecord {
        let document = Html::parse_document(html);
        let page = Page::new(&document, &self.base_url(&document, page_url));

        let mut merged = ExtractionCandidate::default();
        for strategy in &self.strategies {
            if merged.is_full() {
                break;
            }
            let candidate = strategy.extract(&page);
            debug!(
                strategy = strategy.name(),
                title = candidate.title.is_some(),
                price = candidate.price.is_some(),
                image = candidate.image_url.is_some(),
                icon = candidate.site_icon_url.is_some(),
                "Strategy finished"
            );
            merged.merge(candidate);
        }

        let image_url = merged.image_url.unwrap_or_default();
        let images = self.gallery(&page, &image_url);

        ProductRecord {
            title: merged.title.unwrap_or_else(|| UNKNOWN_PRODUCT.to_string()),
            price: merged.price,
            image_url,
            site_icon_url: merged.site_icon_url.unwrap_or_default(),
            site_name: site_name_of(page_url),
            images,
        }
    }

    /// Every gallery declaration, resolved and deduplicated in document
    /// order; the primary image alone when there are none.
    fn gallery(&self, page: &Page<'_>, primary: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        let images: Vec<String> = self
            .gallery
            .iter()
            .flat_map(|selector| page.document.select(selector))
            .filter_map(|el| el.value().attr("content"))
            .map(|href| page.resolve(href))
            .filter(|url| !url.is_empty() && seen.insert(url.clone()))
            .collect();

        if images.is_empty() {
            vec![primary.to_string()]
        } else {
            images
        }
    }

    /// `<base href>` resolved against the page URL, else the page URL.
    fn base_url(&self, document: &Html, page_url: &str) -> String {
        self.base
            .as_ref()
            .and_then(|selector| document.select(selector).next())
            .and_then(|el| el.value().attr("href"))
            .map(|href| resolve_url(href, page_url))
            .filter(|candidate| url::Url::parse(candidate).is_ok())
            .unwrap_or_else(|| page_url.to_string())
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(&ExtractRules::default())
    }
}
