//! # docx-context
//!
//! Context extraction for Office Open XML word-processing documents.
//!
//! Most of a `.docx` lives in `word/document.xml`, but rendering it correctly
//! needs the parts around it: the relationship graph (headers, footers,
//! images), numbering definitions for bullets and numbered lists, and the core
//! document properties. This crate collects those into one [`DocxContext`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use docx_context::DocxSession;
//!
//! let mut session = DocxSession::open("document.docx")?;
//!
//! let context = session.context();
//! println!("Author: {:?}", context.property("creator")?);
//! for header in context.relationships_of_type("header") {
//!     println!("{} -> {} ({} nested)", header.id, header.path(), header.nested().len());
//! }
//!
//! // Numbered paragraphs advance per-list counters
//! if session.context().has_numbering() {
//!     let marker = session.context_mut().next_marker("1", 0)?;
//!     println!("{} first item", marker);
//! }
//!
//! // Images keyed by file name, optionally written to disk
//! let images = session.pull_image_files(Some("images".as_ref()))?;
//! println!("Images: {}", images.len());
//! # Ok::<(), docx_context::Error>(())
//! ```
//!
//! ## Lists that are absent, empty or broken
//!
//! A document without `word/numbering.xml` has no lists; numbering accessors
//! then fail with [`Error::FeatureNotPresent`]. Inconsistent definitions fail
//! with [`Error::MalformedNumbering`]. An existing list that has not been
//! counted yet reads zero.

pub mod container;
pub mod context;
pub mod docx;
pub mod error;
pub mod images;
pub mod namespace;
pub mod options;

// Re-exports
pub use container::OoxmlContainer;
pub use context::{flatten_rels, ContextSummary, DocxContext, RelationshipRecord};
pub use docx::{DocumentProperties, DocxSession, NumFmt, NumberingCounters, NumberingIndex};
pub use error::{Error, Feature, Result};
pub use images::{pull_image_files, ImageMap};
pub use namespace::{qn, ExpandedName, Namespace};
pub use options::ContextOptions;

use std::path::Path;

/// Open a DOCX file and assemble its context.
///
/// # Example
///
/// ```no_run
/// let context = docx_context::get_context("document.docx")?;
/// println!("Relationships: {}", context.relationships().len());
/// # Ok::<(), docx_context::Error>(())
/// ```
pub fn get_context(path: impl AsRef<Path>) -> Result<DocxContext> {
    Ok(DocxSession::open(path)?.into_context())
}

/// Extract all images of a DOCX file, optionally writing them to a directory.
///
/// # Example
///
/// ```no_run
/// let images = docx_context::extract_images("document.docx", Some("out".as_ref()))?;
/// for name in images.keys() {
///     println!("{}", name);
/// }
/// # Ok::<(), docx_context::Error>(())
/// ```
pub fn extract_images(path: impl AsRef<Path>, image_directory: Option<&Path>) -> Result<ImageMap> {
    DocxSession::open(path)?.pull_image_files(image_directory)
}
