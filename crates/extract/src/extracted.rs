// ABOUTME: Extracted result container holding ranked field lists from a parsed page.
// ABOUTME: Includes best-singleton accessors and the FromFields wrapper seam.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::extractor::MergedFields;

/// Builds a result wrapper from the merged field mapping.
///
/// The orchestrator is generic over this seam: callers wanting their own
/// result shape (say, one with an `address()` accessor) implement it and use
/// `Extractor::extract_as` instead of subclassing anything.
pub trait FromFields: Sized {
    /// Wraps the merged output of one extraction.
    fn from_fields(fields: MergedFields) -> Self;
}

/// Data extracted from a page.
///
/// Every core field is an ordered list, best candidate first, and is always
/// present; an empty list means no technique contributed. The lists suit a
/// curation flow where a user picks among options; without one, the singular
/// accessors return the best candidate directly.
///
/// Read-only after construction. Built by the orchestrator, never mutated.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Extracted {
    pub titles: Vec<String>,
    pub descriptions: Vec<String>,
    pub images: Vec<String>,
    pub urls: Vec<String>,
    pub videos: Vec<String>,
    pub feeds: Vec<String>,
    /// Extension fields registered as text or url types: cleaned, deduped,
    /// and always present, like the named fields above.
    pub extensions: BTreeMap<String, Vec<String>>,
    /// Overflow fields passed through untouched from whichever technique
    /// produced them.
    pub extra: BTreeMap<String, Value>,
}

impl Extracted {
    /// Returns the best title, if any.
    pub fn title(&self) -> Option<&str> {
        self.titles.first().map(String::as_str)
    }

    /// Returns the best description, if any.
    pub fn description(&self) -> Option<&str> {
        self.descriptions.first().map(String::as_str)
    }

    /// Returns the best image, if any.
    pub fn image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Returns the best canonical url, if any.
    ///
    /// When absent, callers typically default to the url they fetched the
    /// document from; the extractor is agnostic to where the HTML came from.
    pub fn url(&self) -> Option<&str> {
        self.urls.first().map(String::as_str)
    }

    /// Returns the best video, if any.
    pub fn video(&self) -> Option<&str> {
        self.videos.first().map(String::as_str)
    }

    /// Returns the best feed, if any.
    pub fn feed(&self) -> Option<&str> {
        self.feeds.first().map(String::as_str)
    }

    /// Returns the ordered candidates for any classified field, core or
    /// extension.
    pub fn values(&self, name: &str) -> Option<&[String]> {
        match name {
            "titles" => Some(&self.titles),
            "descriptions" => Some(&self.descriptions),
            "images" => Some(&self.images),
            "urls" => Some(&self.urls),
            "videos" => Some(&self.videos),
            "feeds" => Some(&self.feeds),
            _ => self.extensions.get(name).map(Vec::as_slice),
        }
    }

    /// Returns the best candidate for any classified field.
    pub fn best(&self, name: &str) -> Option<&str> {
        self.values(name)?.first().map(String::as_str)
    }

    /// Returns true if no technique contributed anything.
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
            && self.descriptions.is_empty()
            && self.images.is_empty()
            && self.urls.is_empty()
            && self.videos.is_empty()
            && self.feeds.is_empty()
            && self.extensions.values().all(Vec::is_empty)
            && self.extra.is_empty()
    }
}

impl FromFields for Extracted {
    fn from_fields(mut fields: MergedFields) -> Self {
        let mut take = |name: &str| fields.fields.remove(name).unwrap_or_default();
        let titles = take("titles");
        let descriptions = take("descriptions");
        let images = take("images");
        let urls = take("urls");
        let videos = take("videos");
        let feeds = take("feeds");
        Self {
            titles,
            descriptions,
            images,
            urls,
            videos,
            feeds,
            extensions: fields.fields,
            extra: fields.extra,
        }
    }
}
