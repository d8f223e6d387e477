use serde::{Deserialize, Serialize};
use url::Url;

/// Title used when no strategy finds one.
pub const UNKNOWN_PRODUCT: &str = "Unknown Product";

/// Product metadata extracted from a single page.
///
/// URL-valued fields are either empty or absolute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub title: String,
    pub price: Option<String>,
    pub image_url: String,
    pub site_icon_url: String,
    pub site_name: String,
    pub images: Vec<String>,
}

impl ProductRecord {
    /// The record returned when every fetch tier failed.
    ///
    /// Only `site_name` carries information, derived from the URL alone.
    pub fn fallback(url: &str) -> Self {
        Self {
            title: UNKNOWN_PRODUCT.to_string(),
            price: None,
            image_url: String::new(),
            site_icon_url: String::new(),
            site_name: site_name_of(url),
            images: Vec::new(),
        }
    }

    /// Whether the record is good enough to skip rendering.
    pub fn is_complete(&self) -> bool {
        !self.image_url.is_empty() && self.price.is_some()
    }
}

/// Partial record produced by one extraction strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionCandidate {
    pub title: Option<String>,
    pub price: Option<String>,
    pub image_url: Option<String>,
    pub site_icon_url: Option<String>,
}

impl ExtractionCandidate {
    /// Fill every field still empty in `self` from `other`.
    pub fn merge(&mut self, other: ExtractionCandidate) {
        fill(&mut self.title, other.title);
        fill(&mut self.price, other.price);
        fill(&mut self.image_url, other.image_url);
        fill(&mut self.site_icon_url, other.site_icon_url);
    }

    /// Whether every single-valued field is already populated.
    pub fn is_full(&self) -> bool {
        self.title.is_some()
            && self.price.is_some()
            && self.image_url.is_some()
            && self.site_icon_url.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.price.is_none()
            && self.image_url.is_none()
            && self.site_icon_url.is_none()
    }
}

fn fill(slot: &mut Option<String>, value: Option<String>) {
    if slot.is_none() {
        *slot = value.filter(|v| !v.trim().is_empty());
    }
}

/// Registrable host of `url` with any leading `www.` removed.
///
/// Never fails: unparseable input falls back to the text between the
/// scheme separator and the first slash.
pub fn site_name_of(url: &str) -> String {
    let host = match Url::parse(url.trim()) {
        Ok(parsed) => parsed.host_str().map(str::to_string),
        Err(_) => None,
    };

    let host = host.unwrap_or_else(|| {
        let rest = url.trim().rsplit("//").next().unwrap_or("");
        let rest = rest.split(['/', '?', '#']).next().unwrap_or("");
        rest.split(':').next().unwrap_or("").to_string()
    });

    let host = host.to_ascii_lowercase();
    match host.strip_prefix("www.") {
        Some(stripped) => stripped.to_string(),
        None => host,
    }
}
