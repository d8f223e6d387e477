use scraper::Selector;

use crate::domain::ExtractionCandidate;
use crate::extract::rules;
use crate::extract::{Page, Strategy};

/// Names the product from the document `<title>`.
pub struct TitleFallback {
    title: Option<Selector>,
    delimiters: Vec<String>,
}

impl TitleFallback {
    pub fn new(delimiters: Vec<String>) -> Self {
        Self {
            title: rules::parse("title"),
            delimiters,
        }
    }
}

impl Strategy for TitleFallback {
    fn name(&self) -> &'static str {
        "title-fallback"
    }

    fn extract(&self, page: &Page<'_>) -> ExtractionCandidate {
        let title = self
            .title
            .as_ref()
            .and_then(|selector| page.document.select(selector).next())
            .map(|el| el.text().collect::<String>())
            .map(|text| first_segment(&text, &self.delimiters))
            .filter(|text| !text.is_empty());

        ExtractionCandidate {
            title,
            ..Default::default()
        }
    }
}

/// Text before the earliest delimiter, whitespace-collapsed.
pub fn first_segment(text: &str, delimiters: &[String]) -> String {
    let cut = delimiters
        .iter()
        .filter(|d| !d.is_empty())
        .filter_map(|d| text.find(d.as_str()))
        .min()
        .unwrap_or(text.len());

    text[..cut].split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::rules::ExtractRules;
    use scraper::Html;

    fn run(html: &str) -> Option<String> {
        let document = Html::parse_document(html);
        let page = Page::new(&document, "https://shop.com/p");
        TitleFallback::new(ExtractRules::default().title_delimiters)
            .extract(&page)
            .title
    }

    #[test]
    fn test_split_on_pipe() {
        assert_eq!(
            run("<title> Wool Coat | Shop </title>").as_deref(),
            Some("Wool Coat")
        );
    }

    #[test]
    fn test_split_on_en_dash() {
        assert_eq!(
            run("<title>Desk Lamp – Lights – Shop</title>").as_deref(),
            Some("Desk Lamp")
        );
    }

    #[test]
    fn test_earliest_delimiter_wins() {
        let delimiters = ExtractRules::default().title_delimiters;
        assert_eq!(first_segment("A – B | C", &delimiters), "A");
        assert_eq!(first_segment("A | B – C", &delimiters), "A");
    }

    #[test]
    fn test_missing_or_empty_title() {
        assert_eq!(run("<html><body></body></html>"), None);
        assert_eq!(run("<title>  | Shop</title>"), None);
    }
}
