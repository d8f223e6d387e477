//! Embedded structured product data (`application/ld+json` blocks).

use scraper::Selector;
use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::ExtractionCandidate;
use crate::extract::rules;
use crate::extract::{Page, Strategy};
use crate::normalizer::normalize_price;

pub struct StructuredData {
    scripts: Option<Selector>,
}

impl StructuredData {
    pub fn new() -> Self {
        Self {
            scripts: rules::parse(r#"script[type*="ld+json"]"#),
        }
    }
}

impl Default for StructuredData {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for StructuredData {
    fn name(&self) -> &'static str {
        "structured-data"
    }

    fn extract(&self, page: &Page<'_>) -> ExtractionCandidate {
        let mut candidate = ExtractionCandidate::default();
        let Some(ref selector) = self.scripts else {
            return candidate;
        };

        for script in page.document.select(selector) {
            let text: String = script.text().collect();
            let text = text.trim();
            if text.is_empty() {
                continue;
            }

            let value: Value = match serde_json::from_str(text) {
                Ok(value) => value,
                Err(e) => {
                    debug!("Skipping malformed structured data block: {}", e);
                    continue;
                }
            };

            let mut products = Vec::new();
            collect_products(&value, &mut products);
            for product in products {
                candidate.merge(product_candidate(product, page));
            }
        }

        candidate
    }
}

/// Collect every `Product` object, looking inside lists, `@graph`
/// containers and `mainEntity`.
fn collect_products<'v>(value: &'v Value, out: &mut Vec<&'v Map<String, Value>>) {
    match value {
        Value::Array(entries) => {
            for entry in entries {
                collect_products(entry, out);
            }
        }
        Value::Object(obj) => {
            if is_product(obj) {
                out.push(obj);
            }
            if let Some(graph) = obj.get("@graph") {
                collect_products(graph, out);
            }
            if let Some(entity) = obj.get("mainEntity") {
                collect_products(entity, out);
            }
        }
        _ => {}
    }
}

fn is_product(obj: &Map<String, Value>) -> bool {
    let product_type = |name: &str| name == "Product" || name.ends_with("/Product");
    match obj.get("@type") {
        Some(Value::String(name)) => product_type(name.as_str()),
        Some(Value::Array(names)) => names.iter().filter_map(Value::as_str).any(product_type),
        _ => false,
    }
}

fn product_candidate(product: &Map<String, Value>, page: &Page<'_>) -> ExtractionCandidate {
    let title = product
        .get("name")
        .and_then(Value::as_str)
        .map(|name| name.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|name| !name.is_empty());

    let image_url = product
        .get("image")
        .and_then(first_image)
        .map(|href| page.resolve(href))
        .filter(|url| !url.is_empty());

    let price = product.get("offers").and_then(offer_price);

    ExtractionCandidate {
        title,
        price,
        image_url,
        ..Default::default()
    }
}

/// `image` may be a URL, a list of URLs, or an `ImageObject`.
fn first_image(value: &Value) -> Option<&str> {
    match value {
        Value::String(href) => Some(href.as_str()).filter(|href| !href.trim().is_empty()),
        Value::Array(entries) => entries.iter().find_map(first_image),
        Value::Object(obj) => obj
            .get("url")
            .and_then(first_image)
            .or_else(|| obj.get("contentUrl").and_then(first_image)),
        _ => None,
    }
}

/// Normalized price of the first offer carrying one.
fn offer_price(offers: &Value) -> Option<String> {
    match offers {
        Value::Array(entries) => entries.iter().find_map(offer_price),
        Value::Object(offer) => {
            let raw = offer
                .get("price")
                .and_then(scalar_text)
                .or_else(|| offer.get("lowPrice").and_then(scalar_text))?;
            let currency = offer.get("priceCurrency").and_then(Value::as_str);
            normalize_price(&raw, currency)
        }
        _ => None,
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn run(html: &str) -> ExtractionCandidate {
        let document = Html::parse_document(html);
        let page = Page::new(&document, "https://shop.com/product/1");
        StructuredData::new().extract(&page)
    }

    fn ld(json: &str) -> String {
        format!(r#"<html><head><script type="application/ld+json">{json}</script></head></html>"#)
    }

    #[test]
    fn test_product_with_currency() {
        let candidate = run(&ld(
            r#"{"@type":"Product","offers":{"price":"9.5","priceCurrency":"GBP"}}"#,
        ));
        assert_eq!(candidate.price.as_deref(), Some("£9.50"));
    }

    #[test]
    fn test_name_and_relative_image() {
        let candidate = run(&ld(
            r#"{"@context":"https://schema.org","@type":"Product","name":" Linen  Shirt ","image":"/img/shirt.jpg"}"#,
        ));
        assert_eq!(candidate.title.as_deref(), Some("Linen Shirt"));
        assert_eq!(candidate.image_url.as_deref(), Some("https://shop.com/img/shirt.jpg"));
        assert_eq!(candidate.price, None);
    }

    #[test]
    fn test_list_of_objects() {
        let candidate = run(&ld(
            r#"[{"@type":"BreadcrumbList","name":"Crumbs"},{"@type":"Product","name":"Lamp","offers":[{"priceCurrency":"USD"},{"price":42,"priceCurrency":"USD"}]}]"#,
        ));
        assert_eq!(candidate.title.as_deref(), Some("Lamp"));
        assert_eq!(candidate.price.as_deref(), Some("$42"));
    }

    #[test]
    fn test_graph_and_type_array() {
        let candidate = run(&ld(
            r#"{"@graph":[{"@type":"WebPage","name":"Page"},{"@type":["Product","Thing"],"name":"Chair","image":["//cdn.shop.com/c.jpg"],"offers":{"@type":"AggregateOffer","lowPrice":"1,250.00","priceCurrency":"EUR"}}]}"#,
        ));
        assert_eq!(candidate.title.as_deref(), Some("Chair"));
        assert_eq!(candidate.image_url.as_deref(), Some("https://cdn.shop.com/c.jpg"));
        assert_eq!(candidate.price.as_deref(), Some("€1250"));
    }

    #[test]
    fn test_image_object() {
        let candidate = run(&ld(
            r#"{"@type":"Product","image":{"@type":"ImageObject","url":"https://cdn.shop.com/x.png"}}"#,
        ));
        assert_eq!(candidate.image_url.as_deref(), Some("https://cdn.shop.com/x.png"));
    }

    #[test]
    fn test_image_object_content_url() {
        let candidate = run(&ld(
            r#"{"@type":"Product","image":{"@type":"ImageObject","contentUrl":"/media/y.webp"}}"#,
        ));
        assert_eq!(candidate.image_url.as_deref(), Some("https://shop.com/media/y.webp"));

        let candidate = run(&ld(
            r#"{"@type":"Product","image":{"url":"","contentUrl":"/media/z.webp"}}"#,
        ));
        assert_eq!(candidate.image_url.as_deref(), Some("https://shop.com/media/z.webp"));
    }

    #[test]
    fn test_main_entity_product() {
        let candidate = run(&ld(
            r#"{"@context":"https://schema.org","@type":"ItemPage","name":"Item page","mainEntity":{"@type":"Product","name":"Desk","image":"/desk.jpg","offers":{"price":"310","priceCurrency":"EUR"}}}"#,
        ));
        assert_eq!(candidate.title.as_deref(), Some("Desk"));
        assert_eq!(candidate.image_url.as_deref(), Some("https://shop.com/desk.jpg"));
        assert_eq!(candidate.price.as_deref(), Some("€310"));
    }

    #[test]
    fn test_non_product_ignored() {
        let candidate = run(&ld(
            r#"{"@type":"Organization","name":"Shop","offers":{"price":"1"}}"#,
        ));
        assert!(candidate.is_empty());
    }

    #[test]
    fn test_malformed_block_skipped() {
        let html = r#"<html><head>
            <script type="application/ld+json">{ not json</script>
            <script type="application/ld+json">{"@type":"Product","name":"Kettle"}</script>
        </head></html>"#;
        let candidate = run(html);
        assert_eq!(candidate.title.as_deref(), Some("Kettle"));
    }

    #[test]
    fn test_first_product_wins_per_field() {
        let html = r#"<html><head>
            <script type="application/ld+json">{"@type":"Product","name":"First"}</script>
            <script type="application/ld+json">{"@type":"Product","name":"Second","offers":{"price":"3"}}</script>
        </head></html>"#;
        let candidate = run(html);
        assert_eq!(candidate.title.as_deref(), Some("First"));
        assert_eq!(candidate.price.as_deref(), Some("3"));
    }
}
