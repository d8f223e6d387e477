//! Open Graph / meta tag / CSS class heuristics.

use scraper::{ElementRef, Selector};
use tracing::debug;

use crate::domain::ExtractionCandidate;
use crate::extract::rules::{self, ExtractRules};
use crate::extract::{Page, Strategy};
use crate::normalizer::normalize_price;

pub struct MetaHeuristics {
    rules: ExtractRules,
    price: Vec<Selector>,
    currency: Vec<Selector>,
    image: Vec<Selector>,
    icon_links: Option<Selector>,
}

impl MetaHeuristics {
    pub fn new(rules: ExtractRules) -> Self {
        Self {
            price: rules::compile(&rules.price_selectors),
            currency: rules::compile(&rules.currency_selectors),
            image: rules::compile(&rules.image_selectors),
            icon_links: rules::parse("link[rel][href]"),
            rules,
        }
    }

    /// First price candidate that is not blacklisted, in rule order.
    fn price(&self, page: &Page<'_>) -> Option<String> {
        let currency = self
            .currency
            .iter()
            .flat_map(|selector| page.document.select(selector))
            .find_map(|el| el.value().attr("content"))
            .map(str::trim)
            .filter(|code| !code.is_empty());

        for selector in &self.price {
            for element in page.document.select(selector) {
                let raw = value_of(&element);
                if raw.is_empty() {
                    continue;
                }
                if self.rules.is_blacklisted(&raw) {
                    debug!("Rejected price candidate {:?}", raw);
                    continue;
                }
                if let Some(price) = normalize_price(&raw, currency) {
                    return Some(price);
                }
            }
        }

        None
    }

    fn image(&self, page: &Page<'_>) -> Option<String> {
        self.image
            .iter()
            .flat_map(|selector| page.document.select(selector))
            .filter_map(|el| el.value().attr("content"))
            .map(|href| page.resolve(href))
            .find(|url| !url.is_empty())
    }

    fn icon(&self, page: &Page<'_>) -> Option<String> {
        let selector = self.icon_links.as_ref()?;
        let token = self.rules.icon_rel.to_lowercase();

        page.document
            .select(selector)
            .filter(|el| {
                el.value()
                    .attr("rel")
                    .is_some_and(|rel| rel.to_lowercase().contains(&token))
            })
            .filter_map(|el| el.value().attr("href"))
            .map(|href| page.resolve(href))
            .find(|url| !url.is_empty())
    }
}

impl Strategy for MetaHeuristics {
    fn name(&self) -> &'static str {
        "meta-heuristics"
    }

    fn extract(&self, page: &Page<'_>) -> ExtractionCandidate {
        let image_url = self.image(page);
        let site_icon_url = self.icon(page).or_else(|| image_url.clone());

        ExtractionCandidate {
            price: self.price(page),
            image_url,
            site_icon_url,
            ..Default::default()
        }
    }
}

/// The `content` attribute when present and non-empty, else the text.
fn value_of(element: &ElementRef<'_>) -> String {
    match element.value().attr("content").map(str::trim) {
        Some(content) if !content.is_empty() => content.to_string(),
        _ => element
            .text()
            .collect::<String>()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" "),
    }
}
