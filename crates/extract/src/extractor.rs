// ABOUTME: Extractor orchestrator running techniques in priority order and merging their output.
// ABOUTME: Includes FieldTypes classification, ExtractorBuilder, and the MergedFields dictionary form.

//! The extraction orchestrator.
//!
//! [`Extractor`] runs an ordered list of techniques against one document and
//! folds their cleaned outputs into a single merged mapping.
//!
//! Key behaviors:
//! - Techniques run strictly in configured order; for any field, an earlier
//!   technique's values always outrank a later one's.
//! - A later technique contributes only values not already present for a
//!   field; it can extend a list but never reorder or replace it.
//! - Fields classified as text or url types are cleaned and deduplicated;
//!   anything else is dropped in strict mode or passed through untouched
//!   into the overflow mapping.
//! - An unresolvable technique key or a failing technique aborts the call;
//!   skip-and-continue resilience is a caller-level policy.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::clean::{clean_url, dedup, mark_provenance, normalize_whitespace};
use crate::error::ExtractError;
use crate::extracted::{Extracted, FromFields};
use crate::techniques::{
    FieldValue, RawFields, Technique, TechniqueRegistry, HEAD_TAGS, HTML5_SEMANTIC, OPEN_GRAPH,
    SEMANTIC_FALLBACK, TWITTER_CARD,
};

/// Default technique order, best signal first.
pub const DEFAULT_TECHNIQUES: &[&str] = &[
    OPEN_GRAPH,
    TWITTER_CARD,
    HEAD_TAGS,
    HTML5_SEMANTIC,
    SEMANTIC_FALLBACK,
];

/// Which cleanup a classified field receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Whitespace normalization.
    Text,
    /// Relative-to-absolute rewriting.
    Url,
}

/// Classification of field names into the text and url cleanup classes.
///
/// Fields in either class are "core": always present on the result, cleaned,
/// and deduplicated. Everything else is overflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldTypes {
    text: BTreeSet<String>,
    url: BTreeSet<String>,
}

impl FieldTypes {
    /// The standard schema: titles and descriptions as text; images, urls,
    /// feeds, and videos as urls.
    pub fn standard() -> Self {
        Self {
            text: ["titles", "descriptions"]
                .into_iter()
                .map(String::from)
                .collect(),
            url: ["images", "urls", "feeds", "videos"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }

    /// Classifies an additional field as a text type.
    pub fn add_text(&mut self, name: impl Into<String>) {
        self.text.insert(name.into());
    }

    /// Classifies an additional field as a url type.
    pub fn add_url(&mut self, name: impl Into<String>) {
        self.url.insert(name.into());
    }

    /// Looks up a field's cleanup class, if it has one.
    pub fn kind(&self, name: &str) -> Option<FieldKind> {
        if self.text.contains(name) {
            Some(FieldKind::Text)
        } else if self.url.contains(name) {
            Some(FieldKind::Url)
        } else {
            None
        }
    }

    /// Iterates over every classified field name.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.text
            .iter()
            .chain(self.url.iter())
            .map(String::as_str)
    }
}

impl Default for FieldTypes {
    fn default() -> Self {
        Self::standard()
    }
}

/// The merged, cleaned output of one extraction ("dictionary mode").
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MergedFields {
    /// Classified fields. Every registered text/url field is present, even
    /// when empty; index 0 of each list is the best candidate.
    pub fields: BTreeMap<String, Vec<String>>,
    /// Overflow fields, passed through from whichever technique produced
    /// them. Never cleaned, never deduplicated.
    pub extra: BTreeMap<String, Value>,
}

/// Extracts structured metadata from an HTML document.
///
/// Stateless across calls: each `extract` resolves fresh technique instances
/// and holds nothing afterwards, so one extractor can serve concurrent
/// callers on separate documents.
#[derive(Debug, Clone)]
pub struct Extractor {
    techniques: Vec<String>,
    registry: TechniqueRegistry,
    field_types: FieldTypes,
    strict_types: bool,
    mark_provenance: bool,
}

impl Extractor {
    /// Creates an extractor with the default configuration.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Returns a builder for custom configuration.
    pub fn builder() -> ExtractorBuilder {
        ExtractorBuilder::new()
    }

    /// Extracts from a document with no source URL; relative URL values pass
    /// through unchanged.
    pub fn extract(&self, html: &str) -> Result<Extracted, ExtractError> {
        self.extract_with_source(html, None)
    }

    /// Extracts from a document, resolving relative URL values against
    /// `source_url` when one is supplied.
    pub fn extract_with_source(
        &self,
        html: &str,
        source_url: Option<&str>,
    ) -> Result<Extracted, ExtractError> {
        self.extract_as(html, source_url)
    }

    /// Extracts into a caller-chosen result wrapper.
    pub fn extract_as<R: FromFields>(
        &self,
        html: &str,
        source_url: Option<&str>,
    ) -> Result<R, ExtractError> {
        Ok(R::from_fields(self.extract_fields(html, source_url)?))
    }

    /// Extracts and returns the merged field mapping without wrapping.
    pub fn extract_fields(
        &self,
        html: &str,
        source_url: Option<&str>,
    ) -> Result<MergedFields, ExtractError> {
        let base = match source_url {
            Some(raw) => Some(Url::parse(raw).map_err(|source| ExtractError::SourceUrl {
                url: raw.to_string(),
                source,
            })?),
            None => None,
        };

        let mut merged = MergedFields::default();
        for name in self.field_types.names() {
            merged.fields.insert(name.to_string(), Vec::new());
        }

        for key in &self.techniques {
            let technique = self.registry.resolve(key)?;
            let raw = technique.extract(html)?;
            self.merge_technique(&mut merged, key, raw, base.as_ref())?;
        }
        Ok(merged)
    }

    /// Folds one technique's cleaned output into the accumulator.
    fn merge_technique(
        &self,
        merged: &mut MergedFields,
        key: &str,
        raw: RawFields,
        base: Option<&Url>,
    ) -> Result<(), ExtractError> {
        for (name, value) in raw {
            match self.field_types.kind(&name) {
                Some(kind) => {
                    let FieldValue::Values(values) = value else {
                        return Err(ExtractError::field_type(key, name));
                    };
                    let cleaned = self.clean_values(key, kind, values, base);
                    let slot = merged.fields.entry(name).or_default();
                    for value in cleaned {
                        if !slot.contains(&value) {
                            slot.push(value);
                        }
                    }
                }
                None if self.strict_types => {}
                None => merge_extra(&mut merged.extra, name, value),
            }
        }
        Ok(())
    }

    fn clean_values(
        &self,
        key: &str,
        kind: FieldKind,
        values: Vec<String>,
        base: Option<&Url>,
    ) -> Vec<String> {
        let cleaned = values
            .iter()
            .map(|value| {
                let cleaned = match kind {
                    FieldKind::Text => normalize_whitespace(value),
                    FieldKind::Url => clean_url(value, base),
                };
                if self.mark_provenance {
                    mark_provenance(key, &cleaned)
                } else {
                    cleaned
                }
            })
            .collect();
        dedup(cleaned)
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Merges an overflow contribution. List-shaped contributions to the same
/// field concatenate without dedup; otherwise the earlier technique wins.
fn merge_extra(extra: &mut BTreeMap<String, Value>, name: String, value: FieldValue) {
    let incoming = match value {
        FieldValue::Values(values) => Value::from(values),
        FieldValue::Raw(raw) => raw,
    };
    match extra.entry(name) {
        Entry::Vacant(slot) => {
            slot.insert(incoming);
        }
        Entry::Occupied(mut slot) => {
            if let (Value::Array(existing), Value::Array(mut items)) = (slot.get_mut(), incoming) {
                existing.append(&mut items);
            }
        }
    }
}

/// Builder for constructing [`Extractor`] instances with custom configuration.
#[derive(Debug, Clone)]
pub struct ExtractorBuilder {
    techniques: Vec<String>,
    registry: TechniqueRegistry,
    field_types: FieldTypes,
    strict_types: bool,
    mark_provenance: bool,
}

impl ExtractorBuilder {
    /// Creates a builder with the default configuration.
    pub fn new() -> Self {
        Self {
            techniques: DEFAULT_TECHNIQUES.iter().map(|s| s.to_string()).collect(),
            registry: TechniqueRegistry::builtin(),
            field_types: FieldTypes::standard(),
            strict_types: false,
            mark_provenance: false,
        }
    }

    /// Replaces the technique order with the given keys.
    pub fn techniques<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.techniques = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Appends one technique key to the order.
    pub fn technique(mut self, key: impl Into<String>) -> Self {
        self.techniques.push(key.into());
        self
    }

    /// Registers a custom technique factory.
    pub fn register<F>(mut self, key: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Box<dyn Technique> + Send + Sync + 'static,
    {
        self.registry.register(key, factory);
        self
    }

    /// Replaces the technique registry entirely.
    pub fn registry(mut self, registry: TechniqueRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Drops, rather than preserves, fields not classified as text or url types.
    pub fn strict_types(mut self, strict: bool) -> Self {
        self.strict_types = strict;
        self
    }

    /// Prefixes every cleaned value with the technique that produced it.
    pub fn mark_provenance(mut self, mark: bool) -> Self {
        self.mark_provenance = mark;
        self
    }

    /// Classifies an additional field as a text type.
    pub fn text_field(mut self, name: impl Into<String>) -> Self {
        self.field_types.add_text(name);
        self
    }

    /// Classifies an additional field as a url type.
    pub fn url_field(mut self, name: impl Into<String>) -> Self {
        self.field_types.add_url(name);
        self
    }

    /// Builds the extractor.
    pub fn build(self) -> Extractor {
        Extractor {
            techniques: self.techniques,
            registry: self.registry,
            field_types: self.field_types,
            strict_types: self.strict_types,
            mark_provenance: self.mark_provenance,
        }
    }
}

impl Default for ExtractorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
