// ABOUTME: Semantic element techniques reading document structure instead of metadata.
// ABOUTME: Html5SemanticTags reads article/video elements; SemanticTags is the generic fallback.

//! Semantic element techniques.
//!
//! These read the document body rather than its metadata, so they rank last
//! in the default order: their guesses are only used where the structured
//! techniques found nothing.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use crate::clean::normalize_whitespace;
use crate::error::ExtractError;
use crate::techniques::{push_value, RawFields, Technique};

static ARTICLE: Lazy<Selector> = Lazy::new(|| Selector::parse("article").expect("valid selector"));
static H1: Lazy<Selector> = Lazy::new(|| Selector::parse("h1").expect("valid selector"));
static P: Lazy<Selector> = Lazy::new(|| Selector::parse("p").expect("valid selector"));
static VIDEO_SOURCE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("video source[src]").expect("valid selector"));

/// Extracts data from HTML5 semantic elements.
///
/// Each `<article>` contributes its first `<h1>` as a title candidate and its
/// first `<p>` as a description candidate; every `<source src>` inside a
/// `<video>` contributes a video URL.
#[derive(Debug, Clone, Copy, Default)]
pub struct Html5SemanticTags;

impl Technique for Html5SemanticTags {
    fn extract(&self, html: &str) -> Result<RawFields, ExtractError> {
        let doc = Html::parse_document(html);
        let mut fields = RawFields::new();

        for article in doc.select(&ARTICLE) {
            if let Some(h1) = article.select(&H1).next() {
                let text = normalize_whitespace(&h1.text().collect::<String>());
                if !text.is_empty() {
                    push_value(&mut fields, "titles", &text);
                }
            }
            if let Some(p) = article.select(&P).next() {
                let text = normalize_whitespace(&p.text().collect::<String>());
                if !text.is_empty() {
                    push_value(&mut fields, "descriptions", &text);
                }
            }
        }

        for source in doc.select(&VIDEO_SOURCE) {
            if let Some(src) = source.value().attr("src") {
                push_value(&mut fields, "videos", src);
            }
        }

        Ok(fields)
    }
}

/// Text rules for the generic fallback: tag, destination field, and how many
/// matches to take. Listed in preference order; h1 titles outrank h2 titles.
const TEXT_RULES: &[(&str, &str, usize)] = &[
    ("h1", "titles", 3),
    ("h2", "titles", 3),
    ("h3", "titles", 1),
    ("p", "descriptions", 5),
];

/// Attribute rules for the generic fallback: tag, attribute, destination
/// field, and how many matches to take.
const ATTR_RULES: &[(&str, &str, &str, usize)] = &[("img", "src", "images", 10)];

/// Generic semantic fallback.
///
/// Guesses titles from headings, descriptions from paragraphs, and images
/// from `<img>` tags, each capped to a small count. Low quality, but
/// something is better than nothing when every other technique came up empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct SemanticTags;

impl Technique for SemanticTags {
    fn extract(&self, html: &str) -> Result<RawFields, ExtractError> {
        let doc = Html::parse_document(html);
        let mut fields = RawFields::new();

        for &(tag, dest, count) in TEXT_RULES {
            let sel = match Selector::parse(tag) {
                Ok(s) => s,
                Err(_) => continue,
            };
            for el in doc.select(&sel).take(count) {
                let text = normalize_whitespace(&el.text().collect::<String>());
                if !text.is_empty() {
                    push_value(&mut fields, dest, &text);
                }
            }
        }

        for &(tag, attr, dest, count) in ATTR_RULES {
            let sel = match Selector::parse(tag) {
                Ok(s) => s,
                Err(_) => continue,
            };
            for el in doc.select(&sel).take(count) {
                if let Some(value) = el.value().attr(attr) {
                    push_value(&mut fields, dest, value);
                }
            }
        }

        Ok(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::techniques::FieldValue;

    #[test]
    fn test_html5_article_title_and_description() {
        let html = r#"
            <body>
                <article>
                    <h1>Article One</h1>
                    <p>First paragraph of article one.</p>
                    <p>Second paragraph.</p>
                </article>
                <article>
                    <h1>Article Two</h1>
                    <p>First paragraph of article two.</p>
                </article>
            </body>
        "#;
        let fields = Html5SemanticTags.extract(html).unwrap();
        assert_eq!(
            fields.get("titles"),
            Some(&FieldValue::values(["Article One", "Article Two"]))
        );
        assert_eq!(
            fields.get("descriptions"),
            Some(&FieldValue::values([
                "First paragraph of article one.",
                "First paragraph of article two.",
            ]))
        );
    }

    #[test]
    fn test_html5_video_sources() {
        let html = r#"
            <video controls>
                <source src="movie.mp4" type="video/mp4">
                <source src="movie.ogg" type="video/ogg">
            </video>
        "#;
        let fields = Html5SemanticTags.extract(html).unwrap();
        assert_eq!(
            fields.get("videos"),
            Some(&FieldValue::values(["movie.mp4", "movie.ogg"]))
        );
    }

    #[test]
    fn test_html5_ignores_headings_outside_articles() {
        let html = "<h1>Loose Heading</h1><p>Loose paragraph.</p>";
        let fields = Html5SemanticTags.extract(html).unwrap();
        assert!(fields.is_empty());
    }

    #[test]
    fn test_fallback_heading_priority_order() {
        let html = r#"
            <body>
                <h2>Second Level</h2>
                <h1>Top Level</h1>
                <h3>Third Level</h3>
            </body>
        "#;
        let fields = SemanticTags.extract(html).unwrap();
        // h1 candidates come first regardless of document order.
        assert_eq!(
            fields.get("titles"),
            Some(&FieldValue::values([
                "Top Level",
                "Second Level",
                "Third Level"
            ]))
        );
    }

    #[test]
    fn test_fallback_caps_candidate_counts() {
        let mut html = String::new();
        for i in 0..5 {
            html.push_str(&format!("<h1>Heading {}</h1>", i));
        }
        for i in 0..7 {
            html.push_str(&format!("<p>Paragraph {}</p>", i));
        }
        for i in 0..12 {
            html.push_str(&format!("<img src=\"/img/{}.png\">", i));
        }

        let fields = SemanticTags.extract(&html).unwrap();
        let FieldValue::Values(titles) = fields.get("titles").unwrap() else {
            panic!("titles must be a value list");
        };
        let FieldValue::Values(descriptions) = fields.get("descriptions").unwrap() else {
            panic!("descriptions must be a value list");
        };
        let FieldValue::Values(images) = fields.get("images").unwrap() else {
            panic!("images must be a value list");
        };
        assert_eq!(titles.len(), 3);
        assert_eq!(descriptions.len(), 5);
        assert_eq!(images.len(), 10);
        assert_eq!(titles[0], "Heading 0");
        assert_eq!(images[9], "/img/9.png");
    }

    #[test]
    fn test_fallback_empty_document() {
        let fields = SemanticTags.extract("").unwrap();
        assert!(fields.is_empty());
    }
}
