// ABOUTME: Error types for extraction operations.
// ABOUTME: Provides ExtractError with configuration, contract, and technique-failure variants.

use thiserror::Error;

/// Errors that can occur while configuring or running an extraction.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The configured technique key is not present in the registry.
    #[error("unknown technique: {0}")]
    UnknownTechnique(String),

    /// The per-call source URL could not be parsed.
    #[error("invalid source url {url:?}")]
    SourceUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// A technique returned a non-list value for a field classified as a
    /// text or url type.
    #[error("technique {technique:?} returned field {field:?} without a candidate list")]
    FieldType { technique: String, field: String },

    /// A technique failed while reading the document. Propagated as-is;
    /// the orchestrator never skips a failing technique.
    #[error("technique {technique:?} failed")]
    Technique {
        technique: String,
        #[source]
        source: anyhow::Error,
    },
}

impl ExtractError {
    /// Creates a Technique error wrapping an underlying failure.
    pub fn technique(technique: impl Into<String>, source: anyhow::Error) -> Self {
        ExtractError::Technique {
            technique: technique.into(),
            source,
        }
    }

    /// Creates a FieldType contract-violation error.
    pub fn field_type(technique: impl Into<String>, field: impl Into<String>) -> Self {
        ExtractError::FieldType {
            technique: technique.into(),
            field: field.into(),
        }
    }
}
