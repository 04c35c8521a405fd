// ABOUTME: Head tag technique reading title, meta, and link tags.
// ABOUTME: Low quality but reliable signals; usually runs after the structured meta techniques.

//! Generic head tag technique.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use crate::clean::normalize_whitespace;
use crate::error::ExtractError;
use crate::techniques::{push_value, RawFields, Technique};

static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("title").expect("valid selector"));

static META_NAME: Lazy<Selector> =
    Lazy::new(|| Selector::parse("meta[name][content]").expect("valid selector"));

static LINK_REL: Lazy<Selector> =
    Lazy::new(|| Selector::parse("link[rel][href]").expect("valid selector"));

/// Destination field per `<meta name=...>`. `authors` is not part of the
/// core schema and reaches the result through the overflow mapping.
const META_NAME_MAP: &[(&str, &str)] = &[("description", "descriptions"), ("author", "authors")];

/// Extracts info from standard HTML head tags, for example:
///
/// ```html
/// <head>
///     <meta name="author" content="Will Larson" />
///     <meta name="description" content="A blog about programming." />
///     <link rel="alternate" type="application/rss+xml" title="Page Feed" href="/feeds/" />
///     <link rel="canonical" href="http://lethain.com/digg-v4-architecture-process/">
///     <title>Digg v4's Architecture and Development Processes</title>
/// </head>
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadTags;

impl Technique for HeadTags {
    fn extract(&self, html: &str) -> Result<RawFields, ExtractError> {
        let doc = Html::parse_document(html);
        let mut fields = RawFields::new();

        if let Some(el) = doc.select(&TITLE).next() {
            let text = normalize_whitespace(&el.text().collect::<String>());
            // An empty <title> counts as absent so a later technique can
            // supply the title instead.
            if !text.is_empty() {
                push_value(&mut fields, "titles", &text);
            }
        }

        for el in doc.select(&META_NAME) {
            let (Some(name), Some(content)) = (el.value().attr("name"), el.value().attr("content"))
            else {
                continue;
            };
            if let Some((_, dest)) = META_NAME_MAP.iter().find(|(n, _)| *n == name) {
                push_value(&mut fields, dest, content);
            }
        }

        for el in doc.select(&LINK_REL) {
            let (Some(rel), Some(href)) = (el.value().attr("rel"), el.value().attr("href")) else {
                continue;
            };
            if has_rel_token(rel, "alternate")
                && el.value().attr("type") == Some("application/rss+xml")
            {
                push_value(&mut fields, "feeds", href);
            } else if has_rel_token(rel, "canonical") {
                push_value(&mut fields, "urls", href);
            }
        }

        Ok(fields)
    }
}

/// Matches one token of a space-separated `rel` attribute value.
fn has_rel_token(rel: &str, token: &str) -> bool {
    rel.split_whitespace()
        .any(|t| t.eq_ignore_ascii_case(token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::techniques::FieldValue;

    const HEAD_HTML: &str = r#"
        <html><head>
            <meta http-equiv="content-type" content="text/html; charset=UTF-8" />
            <meta name="author" content="Will Larson" />
            <meta name="description" content="Will Larson's blog about programming and other things." />
            <meta name="keywords" content="Blog Will Larson Programming Life" />
            <link rel="alternate" type="application/rss+xml" title="Page Feed" href="/feeds/" />
            <link rel="canonical" href="http://lethain.com/digg-v4-architecture-process/">
            <title>Digg v4's Architecture and Development Processes</title>
        </head></html>
    "#;

    #[test]
    fn test_extracts_title() {
        let fields = HeadTags.extract(HEAD_HTML).unwrap();
        assert_eq!(
            fields.get("titles"),
            Some(&FieldValue::values([
                "Digg v4's Architecture and Development Processes"
            ]))
        );
    }

    #[test]
    fn test_extracts_description_and_author() {
        let fields = HeadTags.extract(HEAD_HTML).unwrap();
        assert_eq!(
            fields.get("descriptions"),
            Some(&FieldValue::values([
                "Will Larson's blog about programming and other things."
            ]))
        );
        assert_eq!(
            fields.get("authors"),
            Some(&FieldValue::values(["Will Larson"]))
        );
        assert!(!fields.contains_key("keywords"));
    }

    #[test]
    fn test_extracts_canonical_and_feed_links() {
        let fields = HeadTags.extract(HEAD_HTML).unwrap();
        assert_eq!(
            fields.get("urls"),
            Some(&FieldValue::values([
                "http://lethain.com/digg-v4-architecture-process/"
            ]))
        );
        assert_eq!(fields.get("feeds"), Some(&FieldValue::values(["/feeds/"])));
    }

    #[test]
    fn test_empty_title_treated_as_absent() {
        let html = "<html><head><title></title></head><body><h1>H1</h1></body></html>";
        let fields = HeadTags.extract(html).unwrap();
        assert!(!fields.contains_key("titles"));
    }

    #[test]
    fn test_whitespace_only_title_treated_as_absent() {
        let html = "<html><head><title>   \n\t  </title></head></html>";
        let fields = HeadTags.extract(html).unwrap();
        assert!(!fields.contains_key("titles"));
    }

    #[test]
    fn test_multi_token_rel_values() {
        let html = r#"
            <head>
                <link rel="canonical nofollow" href="http://example.com/page">
                <link rel="stylesheet alternate" type="application/rss+xml" href="/rss.xml">
            </head>
        "#;
        let fields = HeadTags.extract(html).unwrap();
        assert_eq!(
            fields.get("urls"),
            Some(&FieldValue::values(["http://example.com/page"]))
        );
        assert_eq!(fields.get("feeds"), Some(&FieldValue::values(["/rss.xml"])));
    }

    #[test]
    fn test_alternate_without_rss_type_ignored() {
        let html = r#"<head><link rel="alternate" type="text/html" href="/en/"></head>"#;
        let fields = HeadTags.extract(html).unwrap();
        assert!(!fields.contains_key("feeds"));
    }

    #[test]
    fn test_empty_document() {
        let fields = HeadTags.extract("").unwrap();
        assert!(fields.is_empty());
    }
}
