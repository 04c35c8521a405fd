// ABOUTME: Technique trait, raw field types, and the technique registry.
// ABOUTME: Techniques are independent extraction strategies resolved by stable string keys.

//! Extraction techniques.
//!
//! A technique is a single independent strategy for pulling structured fields
//! out of one HTML document. Each returns a mapping from field name to an
//! ordered candidate list (best first); the orchestrator merges the outputs
//! of all configured techniques in priority order.
//!
//! Techniques are looked up in a [`TechniqueRegistry`] by stable string key,
//! so out-of-tree techniques plug in without orchestrator changes. A fresh
//! instance is built per extraction call; any per-technique configuration is
//! baked into the factory closure at registration time.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::ExtractError;

pub mod head_tags;
pub mod meta_tags;
pub mod semantic;

pub use head_tags::HeadTags;
pub use meta_tags::{OpenGraphTags, TwitterCardTags};
pub use semantic::{Html5SemanticTags, SemanticTags};

/// Registry key for [`OpenGraphTags`].
pub const OPEN_GRAPH: &str = "open_graph";
/// Registry key for [`TwitterCardTags`].
pub const TWITTER_CARD: &str = "twitter_card";
/// Registry key for [`HeadTags`].
pub const HEAD_TAGS: &str = "head_tags";
/// Registry key for [`Html5SemanticTags`].
pub const HTML5_SEMANTIC: &str = "html5_semantic";
/// Registry key for [`SemanticTags`].
pub const SEMANTIC_FALLBACK: &str = "semantic_fallback";

/// One technique's contribution for a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Ordered candidate strings, best first. Fields classified as text or
    /// url types must use this shape.
    Values(Vec<String>),
    /// Free-form payload for an overflow field. Passed through untouched.
    Raw(Value),
}

impl FieldValue {
    /// Builds an ordered candidate list.
    pub fn values<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldValue::Values(items.into_iter().map(Into::into).collect())
    }
}

/// Raw per-technique output: field name to contribution.
///
/// Absent fields and empty lists both mean "no contribution".
pub type RawFields = BTreeMap<String, FieldValue>;

/// Appends a candidate value to a field's list, creating the list on first use.
pub(crate) fn push_value(fields: &mut RawFields, name: &str, value: &str) {
    match fields
        .entry(name.to_string())
        .or_insert_with(|| FieldValue::Values(Vec::new()))
    {
        FieldValue::Values(values) => values.push(value.to_string()),
        FieldValue::Raw(_) => {}
    }
}

/// A single extraction strategy.
///
/// `extract` must tolerate any input, including the empty string; absence of
/// a signal is an empty mapping, not an error. Errors are reserved for real
/// failures, which the orchestrator propagates without skipping.
pub trait Technique {
    /// Reads the document and returns this technique's raw field lists.
    fn extract(&self, html: &str) -> Result<RawFields, ExtractError>;
}

type TechniqueFactory = dyn Fn() -> Box<dyn Technique> + Send + Sync;

/// Registry mapping stable string keys to technique factories.
#[derive(Clone, Default)]
pub struct TechniqueRegistry {
    map: HashMap<String, Arc<TechniqueFactory>>,
}

impl TechniqueRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the builtin techniques registered.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(OPEN_GRAPH, || Box::new(OpenGraphTags));
        registry.register(TWITTER_CARD, || Box::new(TwitterCardTags));
        registry.register(HEAD_TAGS, || Box::new(HeadTags));
        registry.register(HTML5_SEMANTIC, || Box::new(Html5SemanticTags));
        registry.register(SEMANTIC_FALLBACK, || Box::new(SemanticTags));
        registry
    }

    /// Registers a factory under a key, replacing any previous registration.
    pub fn register<F>(&mut self, key: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn Technique> + Send + Sync + 'static,
    {
        self.map.insert(key.into(), Arc::new(factory));
    }

    /// Builds a fresh technique instance for a key.
    ///
    /// An unregistered key is a configuration error, surfaced immediately.
    pub fn resolve(&self, key: &str) -> Result<Box<dyn Technique>, ExtractError> {
        match self.map.get(key) {
            Some(factory) => Ok(factory()),
            None => Err(ExtractError::UnknownTechnique(key.to_string())),
        }
    }

    /// Returns true if a key is registered.
    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    /// Returns the number of registered techniques.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if no techniques are registered.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl fmt::Debug for TechniqueRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<_> = self.map.keys().collect();
        keys.sort();
        f.debug_struct("TechniqueRegistry")
            .field("keys", &keys)
            .finish()
    }
}
