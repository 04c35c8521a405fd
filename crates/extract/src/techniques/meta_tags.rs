// ABOUTME: Structured meta tag techniques for Open Graph and Twitter Card data.
// ABOUTME: Maps og:* properties and twitter:* names onto the core field schema.

//! Structured meta tag techniques.
//!
//! Open Graph and Twitter Card tags are ubiquitous on high quality sites and
//! tend to be better curated than anything found in the document body, which
//! is why they lead the default technique order.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use crate::error::ExtractError;
use crate::techniques::{push_value, RawFields, Technique};

static META_PROPERTY: Lazy<Selector> =
    Lazy::new(|| Selector::parse("meta[property][content]").expect("valid selector"));

static META_NAME: Lazy<Selector> =
    Lazy::new(|| Selector::parse("meta[name][content]").expect("valid selector"));

/// Destination field per `og:*` property, in no particular order; document
/// order decides ranking within each field.
const OG_PROPERTY_MAP: &[(&str, &str)] = &[
    ("og:title", "titles"),
    ("og:url", "urls"),
    ("og:image", "images"),
    ("og:description", "descriptions"),
];

const TWITTER_NAME_MAP: &[(&str, &str)] = &[
    ("twitter:title", "titles"),
    ("twitter:description", "descriptions"),
    ("twitter:image", "images"),
];

/// Extracts Open Graph `<meta property="og:*" content=...>` tags.
///
/// Example tags from the Open Graph protocol docs:
///
/// ```html
/// <meta property="og:title" content="The Rock"/>
/// <meta property="og:url" content="http://www.imdb.com/title/tt0117500/"/>
/// <meta property="og:image" content="http://ia.media-imdb.com/rock.jpg"/>
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenGraphTags;

impl Technique for OpenGraphTags {
    fn extract(&self, html: &str) -> Result<RawFields, ExtractError> {
        let doc = Html::parse_document(html);
        let mut fields = RawFields::new();
        for el in doc.select(&META_PROPERTY) {
            let (Some(property), Some(content)) =
                (el.value().attr("property"), el.value().attr("content"))
            else {
                continue;
            };
            if let Some((_, dest)) = OG_PROPERTY_MAP.iter().find(|(p, _)| *p == property) {
                push_value(&mut fields, dest, content);
            }
        }
        Ok(fields)
    }
}

/// Extracts Twitter Card `<meta name="twitter:*" content=...>` tags.
#[derive(Debug, Clone, Copy, Default)]
pub struct TwitterCardTags;

impl Technique for TwitterCardTags {
    fn extract(&self, html: &str) -> Result<RawFields, ExtractError> {
        let doc = Html::parse_document(html);
        let mut fields = RawFields::new();
        for el in doc.select(&META_NAME) {
            let (Some(name), Some(content)) = (el.value().attr("name"), el.value().attr("content"))
            else {
                continue;
            };
            if let Some((_, dest)) = TWITTER_NAME_MAP.iter().find(|(n, _)| *n == name) {
                push_value(&mut fields, dest, content);
            }
        }
        Ok(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::techniques::FieldValue;

    const OG_HTML: &str = r#"
        <html><head>
            <meta property="og:title" content="The Rock"/>
            <meta property="og:type" content="movie"/>
            <meta property="og:url" content="http://www.imdb.com/title/tt0117500/"/>
            <meta property="og:image" content="http://ia.media-imdb.com/rock.jpg"/>
            <meta property="og:image" content="http://ia.media-imdb.com/rock2.jpg"/>
            <meta property="fb:admins" content="USER_ID"/>
        </head></html>
    "#;

    #[test]
    fn test_open_graph_extracts_mapped_properties() {
        let fields = OpenGraphTags.extract(OG_HTML).unwrap();
        assert_eq!(fields.get("titles"), Some(&FieldValue::values(["The Rock"])));
        assert_eq!(
            fields.get("urls"),
            Some(&FieldValue::values(["http://www.imdb.com/title/tt0117500/"]))
        );
    }

    #[test]
    fn test_open_graph_preserves_document_order() {
        let fields = OpenGraphTags.extract(OG_HTML).unwrap();
        assert_eq!(
            fields.get("images"),
            Some(&FieldValue::values([
                "http://ia.media-imdb.com/rock.jpg",
                "http://ia.media-imdb.com/rock2.jpg",
            ]))
        );
    }

    #[test]
    fn test_open_graph_ignores_unmapped_properties() {
        let fields = OpenGraphTags.extract(OG_HTML).unwrap();
        assert!(!fields.contains_key("admins"));
        assert!(!fields.contains_key("og:type"));
    }

    #[test]
    fn test_open_graph_empty_document() {
        let fields = OpenGraphTags.extract("").unwrap();
        assert!(fields.is_empty());
    }

    #[test]
    fn test_twitter_card_extracts_mapped_names() {
        let html = r#"
            <head>
                <meta name="twitter:title" content="Card Title">
                <meta name="twitter:description" content="Card description.">
                <meta name="twitter:image" content="https://example.com/card.png">
                <meta name="description" content="Plain description">
            </head>
        "#;
        let fields = TwitterCardTags.extract(html).unwrap();
        assert_eq!(
            fields.get("titles"),
            Some(&FieldValue::values(["Card Title"]))
        );
        assert_eq!(
            fields.get("descriptions"),
            Some(&FieldValue::values(["Card description."]))
        );
        assert_eq!(
            fields.get("images"),
            Some(&FieldValue::values(["https://example.com/card.png"]))
        );
    }

    #[test]
    fn test_twitter_card_ignores_plain_meta_names() {
        let html = r#"<head><meta name="description" content="Plain"></head>"#;
        let fields = TwitterCardTags.extract(html).unwrap();
        assert!(fields.is_empty());
    }
}
