use scraper::Selector;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Declarative selector tables driving the heuristic strategies.
///
/// Adding a site-specific rule is a matter of adding a selector here (or in
/// the `[extract]` section of the config file), in priority order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractRules {
    /// Price sources in priority order; `content` attribute first, then text
    pub price_selectors: Vec<String>,

    /// Sources for the currency code of a heuristic price
    pub currency_selectors: Vec<String>,

    /// Case-insensitive substrings that disqualify a price candidate
    pub price_blacklist: Vec<String>,

    /// Primary image sources (read from the `content` attribute)
    pub image_selectors: Vec<String>,

    /// Gallery sources; every match contributes one image
    pub gallery_selectors: Vec<String>,

    /// Substring of a `<link rel>` value marking a site icon
    pub icon_rel: String,

    /// Title separators; the text before the first one is kept
    pub title_delimiters: Vec<String>,
}

impl Default for ExtractRules {
    fn default() -> Self {
        Self {
            price_selectors: vec![
                r#"meta[property="product:price:amount"]"#.to_string(),
                r#"meta[property="og:price:amount"]"#.to_string(),
                "span.price".to_string(),
                "div.price".to_string(),
                "span.current-price".to_string(),
                "span.product-price".to_string(),
            ],
            currency_selectors: vec![
                r#"meta[property="product:price:currency"]"#.to_string(),
                r#"meta[property="og:price:currency"]"#.to_string(),
            ],
            price_blacklist: vec!["menu".to_string()],
            image_selectors: vec![
                r#"meta[property="og:image"]"#.to_string(),
                r#"meta[property="og:image:secure_url"]"#.to_string(),
            ],
            gallery_selectors: vec![r#"meta[property="og:image"]"#.to_string()],
            icon_rel: "icon".to_string(),
            title_delimiters: vec!["|".to_string(), "–".to_string()],
        }
    }
}

impl ExtractRules {
    /// Whether `text` contains any blacklisted substring.
    pub fn is_blacklisted(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.price_blacklist
            .iter()
            .filter(|needle| !needle.is_empty())
            .any(|needle| lower.contains(&needle.to_lowercase()))
    }
}

/// Compile a selector table, dropping (and logging) invalid entries.
pub(crate) fn compile(selectors: &[String]) -> Vec<Selector> {
    selectors.iter().filter_map(|css| parse(css)).collect()
}

/// Compile a single selector, logging it when invalid.
pub(crate) fn parse(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            warn!("Ignoring invalid selector {:?}: {:?}", css, e);
            None
        }
    }
}
