//! Error types for the docx-context library.

use std::fmt;
use std::io;
use thiserror::Error;

/// Result type alias for docx-context operations.
pub type Result<T> = std::result::Result<T, Error>;

/// An optional document feature whose absence is recorded rather than defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    /// Numbered and bulleted lists (`word/numbering.xml`).
    Numbering,
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feature::Numbering => write!(f, "numbering"),
        }
    }
}

/// Errors that can occur while collecting document context.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error reading ZIP archive.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// Error parsing XML content.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// A part is not present in the archive.
    #[error("Missing component: {0}")]
    MissingComponent(String),

    /// The package structure itself is broken (e.g. no `_rels/.rels`).
    #[error("Malformed archive: {0}")]
    MalformedArchive(String),

    /// The numbering definitions are inconsistent.
    #[error("Malformed numbering: {0}")]
    MalformedNumbering(String),

    /// The core properties part exists but could not be read.
    #[error("Malformed properties: {0}")]
    MalformedProperties(String),

    /// The document does not contain the requested feature at all.
    #[error("Feature not present in document: {0}")]
    FeatureNotPresent(Feature),

    /// A numbering id that the numbering definitions do not declare.
    #[error("Unknown numbering id: {0}")]
    UnknownNumbering(String),

    /// A namespace prefix missing from the namespace table.
    #[error("Unknown namespace prefix: {0}")]
    UnknownPrefix(String),
}

impl Error {
    /// Whether this error reports an absent feature rather than a failure.
    pub fn is_feature_absent(&self) -> bool {
        matches!(self, Error::FeatureNotPresent(_))
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipArchive(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::XmlParse(err.to_string())
    }
}
