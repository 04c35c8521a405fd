// ABOUTME: Main library entry point for the pagesift extraction core.
// ABOUTME: Re-exports the public API: Extractor, ExtractorBuilder, Extracted, Technique, ExtractError.

//! pagesift - structured metadata extraction from HTML documents.
//!
//! This crate runs a prioritized list of independent extraction strategies
//! ("techniques") over one HTML document and merges their output into a
//! single ranked result: titles, descriptions, images, canonical urls, feed
//! links, videos, and whatever extra fields custom techniques report.
//!
//! # Example
//!
//! ```
//! use pagesift_extract::Extractor;
//!
//! # fn main() -> Result<(), pagesift_extract::ExtractError> {
//! let html = r#"
//!     <head>
//!         <meta property="og:title" content="The Rock">
//!         <meta property="og:image" content="http://ia.media-imdb.com/rock.jpg">
//!     </head>
//! "#;
//! let extracted = Extractor::new().extract(html)?;
//! assert_eq!(extracted.title(), Some("The Rock"));
//! assert_eq!(extracted.image(), Some("http://ia.media-imdb.com/rock.jpg"));
//! # Ok(())
//! # }
//! ```
//!
//! Techniques run in configured order, best signal first: for any field, an
//! earlier technique's values outrank a later one's, and later techniques
//! only append candidates not already present. Pass a source URL with
//! [`Extractor::extract_with_source`] to have relative URL values resolved
//! to absolute ones.

pub mod clean;
pub mod error;
pub mod extracted;
pub mod extractor;
pub mod techniques;

pub use crate::error::ExtractError;
pub use crate::extracted::{Extracted, FromFields};
pub use crate::extractor::{
    Extractor, ExtractorBuilder, FieldKind, FieldTypes, MergedFields, DEFAULT_TECHNIQUES,
};
pub use crate::techniques::{FieldValue, RawFields, Technique, TechniqueRegistry};
