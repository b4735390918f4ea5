//! Namespace table for the OOXML vocabularies read by this crate.
//!
//! Element and attribute names are matched against fully resolved namespace
//! URIs, never against the prefix a producer happened to choose. Logical names
//! such as `w:numFmt` are turned into [`ExpandedName`]s through [`qn`].

use crate::error::{Error, Result};
use quick_xml::name::{Namespace as XmlNs, ResolveResult};
use std::fmt;

/// An XML namespace known to the context extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// WordprocessingML main namespace (`w:`).
    Wordprocessing,
    /// Office document relationships, used for `r:id` references (`r:`).
    OfficeRelationships,
    /// Package relationship descriptors (`.rels` parts).
    PackageRelationships,
    /// Core properties (`cp:`).
    CoreProperties,
    /// Dublin Core elements (`dc:`).
    DublinCore,
    /// Dublin Core terms (`dcterms:`).
    DublinCoreTerms,
}

/// Conventional prefix of each namespace.
const PREFIXES: &[(&str, Namespace)] = &[
    ("w", Namespace::Wordprocessing),
    ("r", Namespace::OfficeRelationships),
    ("pr", Namespace::PackageRelationships),
    ("cp", Namespace::CoreProperties),
    ("dc", Namespace::DublinCore),
    ("dcterms", Namespace::DublinCoreTerms),
];

impl Namespace {
    /// Canonical (transitional) URI.
    pub fn uri(self) -> &'static str {
        self.uris()[0]
    }

    /// Every URI accepted for this namespace, canonical first.
    pub fn uris(self) -> &'static [&'static str] {
        match self {
            Namespace::Wordprocessing => &[
                "http://schemas.openxmlformats.org/wordprocessingml/2006/main",
                "http://purl.oclc.org/ooxml/wordprocessingml/main",
            ],
            Namespace::OfficeRelationships => &[
                "http://schemas.openxmlformats.org/officeDocument/2006/relationships",
                "http://purl.oclc.org/ooxml/officeDocument/relationships",
            ],
            Namespace::PackageRelationships => {
                &["http://schemas.openxmlformats.org/package/2006/relationships"]
            }
            Namespace::CoreProperties => &[
                "http://schemas.openxmlformats.org/package/2006/metadata/core-properties",
            ],
            Namespace::DublinCore => &["http://purl.org/dc/elements/1.1/"],
            Namespace::DublinCoreTerms => &["http://purl.org/dc/terms/"],
        }
    }

    /// Look up a namespace by its conventional prefix.
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        PREFIXES
            .iter()
            .find(|(p, _)| *p == prefix)
            .map(|(_, ns)| *ns)
    }

    /// Whether a raw namespace URI belongs to this namespace.
    pub fn contains(self, uri: &[u8]) -> bool {
        self.uris().iter().any(|u| u.as_bytes() == uri)
    }
}

/// A namespace-qualified local name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExpandedName {
    pub ns: Namespace,
    pub local: &'static str,
}

impl ExpandedName {
    pub const fn new(ns: Namespace, local: &'static str) -> Self {
        Self { ns, local }
    }

    /// Compare against a name resolved by a quick-xml `NsReader`.
    pub fn matches(&self, resolved: &ResolveResult<'_>, local: &[u8]) -> bool {
        match resolved {
            ResolveResult::Bound(XmlNs(uri)) => self.ns.contains(uri) && local == self.local.as_bytes(),
            _ => false,
        }
    }
}

impl fmt::Display for ExpandedName {
    /// Clark notation, `{uri}local`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}{}", self.ns.uri(), self.local)
    }
}

/// Resolve a prefixed logical name (`"w:numFmt"`) against the namespace table.
pub fn qn(tag: &'static str) -> Result<ExpandedName> {
    let (prefix, local) = tag
        .split_once(':')
        .ok_or_else(|| Error::UnknownPrefix(tag.to_string()))?;
    let ns = Namespace::from_prefix(prefix).ok_or_else(|| Error::UnknownPrefix(prefix.to_string()))?;
    Ok(ExpandedName::new(ns, local))
}

pub(crate) mod w {
    use super::{ExpandedName, Namespace::Wordprocessing};

    pub const ABSTRACT_NUM: ExpandedName = ExpandedName::new(Wordprocessing, "abstractNum");
    pub const ABSTRACT_NUM_ID: ExpandedName = ExpandedName::new(Wordprocessing, "abstractNumId");
    pub const LVL: ExpandedName = ExpandedName::new(Wordprocessing, "lvl");
    pub const ILVL: ExpandedName = ExpandedName::new(Wordprocessing, "ilvl");
    pub const NUM: ExpandedName = ExpandedName::new(Wordprocessing, "num");
    pub const NUM_ID: ExpandedName = ExpandedName::new(Wordprocessing, "numId");
    pub const NUM_FMT: ExpandedName = ExpandedName::new(Wordprocessing, "numFmt");
    pub const VAL: ExpandedName = ExpandedName::new(Wordprocessing, "val");
}
