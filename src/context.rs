//! Document context: everything outside `word/document.xml` that a body
//! walker needs while traversing paragraphs.
//!
//! Assembly reads every relationship descriptor, the core properties and the
//! numbering definitions once, then hands out a [`DocxContext`] that lives for
//! the rest of the processing session.

use crate::container::OoxmlContainer;
use crate::docx::counters::NumberingCounters;
use crate::docx::num_fmt::NumFmt;
use crate::docx::numbering::NumberingIndex;
use crate::docx::properties::DocumentProperties;
use crate::docx::rels::{
    collect_rels, described_part, owning_directory, rels_path_for, resolve_target, Relationship,
    RelsMap, PACKAGE_RELS,
};
use crate::error::{Error, Feature, Result};
use crate::options::ContextOptions;
use serde::Serialize;
use std::collections::BTreeMap;

const DEFAULT_MAIN_DOCUMENT: &str = "word/document.xml";
const DEFAULT_NUMBERING: &str = "word/numbering.xml";
const DEFAULT_CORE_PROPERTIES: &str = "docProps/core.xml";

/// A relationship tagged with the directory of the part that owns it.
///
/// Ids are unique per source descriptor only; `(source, id)` identifies a
/// record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationshipRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub rel_type: String,
    /// Target as written, relative to `owning_directory`
    pub target: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    /// Descriptor part this record was read from
    pub source: String,
    /// Directory of the referencing part (`""` for the package root)
    pub owning_directory: String,
    /// Relationships of the target part itself, if it has a descriptor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nested_rels: Option<Vec<RelationshipRecord>>,
}

impl RelationshipRecord {
    fn new(rel: &Relationship, source: &str, owning_directory: &str) -> Self {
        Self {
            id: rel.id.clone(),
            rel_type: rel.rel_type.clone(),
            target: rel.target.clone(),
            attributes: rel.attributes.clone(),
            source: source.to_string(),
            owning_directory: owning_directory.to_string(),
            nested_rels: None,
        }
    }

    /// Target resolved to a package path.
    pub fn path(&self) -> String {
        resolve_target(&self.owning_directory, &self.target)
    }

    /// Part that declares this relationship (`""` for the package root).
    pub fn owning_part(&self) -> String {
        described_part(&self.source)
    }

    pub fn is_external(&self) -> bool {
        self.attributes
            .get("TargetMode")
            .is_some_and(|mode| mode.eq_ignore_ascii_case("external"))
    }

    /// Last segment of the type URI, e.g. `"image"`.
    pub fn type_name(&self) -> &str {
        self.rel_type.rsplit('/').next().unwrap_or_default()
    }

    /// Nested relationships, empty when the target has no descriptor.
    pub fn nested(&self) -> &[RelationshipRecord] {
        self.nested_rels.as_deref().unwrap_or_default()
    }
}

/// Emit one record per relationship of every descriptor, then optionally
/// attach each target's own descriptor.
pub fn flatten_rels(rels: &RelsMap, cross_link: bool) -> Vec<RelationshipRecord> {
    let mut files = Vec::new();
    for (source, list) in rels {
        let dir = owning_directory(source);
        files.extend(list.iter().map(|rel| RelationshipRecord::new(rel, source, &dir)));
    }

    if cross_link {
        for file in files.iter_mut().filter(|f| !f.is_external()) {
            let nested_source = rels_path_for(&file.path());
            if let Some(nested) = rels.get(&nested_source) {
                let dir = owning_directory(&nested_source);
                file.nested_rels = Some(
                    nested
                        .iter()
                        .map(|rel| RelationshipRecord::new(rel, &nested_source, &dir))
                        .collect(),
                );
            }
        }
    }

    files
}

#[derive(Debug, Clone)]
enum Properties {
    /// Parsed properties; empty when the package has no core properties part.
    Present(DocumentProperties),
    /// The core properties part exists but could not be read.
    Malformed(String),
}

#[derive(Debug, Clone)]
enum Numbering {
    /// No numbering part: the document has no lists.
    Absent,
    /// The numbering part exists but could not be resolved.
    Malformed(String),
    Present {
        index: NumberingIndex,
        counters: NumberingCounters,
    },
}

/// Context of one DOCX processing session.
#[derive(Debug, Clone)]
pub struct DocxContext {
    files: Vec<RelationshipRecord>,
    properties: Properties,
    numbering: Numbering,
}

impl DocxContext {
    /// Assemble the context of an opened package with default options.
    pub fn collect(container: &OoxmlContainer) -> Result<Self> {
        Self::collect_with(container, &ContextOptions::default())
    }

    /// Assemble the context of an opened package.
    ///
    /// A package without `_rels/.rels` is rejected outright.
    pub fn collect_with(container: &OoxmlContainer, options: &ContextOptions) -> Result<Self> {
        let rels = collect_rels(container)?;
        if !rels.contains_key(PACKAGE_RELS) {
            return Err(Error::MalformedArchive(format!("missing {}", PACKAGE_RELS)));
        }
        log::debug!("collected {} relationship descriptors", rels.len());

        let files = flatten_rels(&rels, options.cross_link);
        let mut context = Self {
            files,
            properties: Properties::Present(DocumentProperties::default()),
            numbering: Numbering::Absent,
        };

        context.properties = context.read_properties(container, options)?;
        context.numbering = context.read_numbering(container, options)?;
        Ok(context)
    }

    fn read_properties(&self, container: &OoxmlContainer, options: &ContextOptions) -> Result<Properties> {
        let path = self
            .package_part("core-properties")
            .unwrap_or_else(|| DEFAULT_CORE_PROPERTIES.to_string());
        if !container.exists(&path) {
            log::debug!("no core properties part at {}", path);
            return Ok(Properties::Present(DocumentProperties::default()));
        }

        let parsed = container
            .read_xml(&path)
            .and_then(|xml| DocumentProperties::parse(&xml));
        match parsed {
            Ok(properties) => Ok(Properties::Present(properties)),
            Err(Error::XmlParse(reason)) => {
                if options.strict_properties {
                    return Err(Error::MalformedProperties(reason));
                }
                log::warn!("{}: {}; properties unavailable", path, reason);
                Ok(Properties::Malformed(reason))
            }
            Err(err) => Err(err),
        }
    }

    fn read_numbering(&self, container: &OoxmlContainer, options: &ContextOptions) -> Result<Numbering> {
        let main = self
            .package_part("officeDocument")
            .unwrap_or_else(|| DEFAULT_MAIN_DOCUMENT.to_string());
        let main_rels = rels_path_for(&main);
        let path = self
            .files
            .iter()
            .find(|f| f.source == main_rels && f.type_name() == "numbering" && !f.is_external())
            .map(RelationshipRecord::path)
            .unwrap_or_else(|| DEFAULT_NUMBERING.to_string());

        if !container.exists(&path) {
            log::debug!("no numbering part at {}; document has no lists", path);
            return Ok(Numbering::Absent);
        }

        let parsed = container
            .read_xml(&path)
            .and_then(|xml| NumberingIndex::parse(&xml));
        match parsed {
            Ok(index) => {
                let counters = NumberingCounters::for_index(&index);
                Ok(Numbering::Present { index, counters })
            }
            Err(err @ (Error::MalformedNumbering(_) | Error::XmlParse(_))) => {
                if options.strict_numbering {
                    return Err(err);
                }
                log::warn!("{}: {}; numbering unavailable", path, err);
                Ok(Numbering::Malformed(err.to_string()))
            }
            Err(err) => Err(err),
        }
    }

    /// Resolved path of a package-level relationship target by type name.
    fn package_part(&self, type_name: &str) -> Option<String> {
        self.files
            .iter()
            .find(|f| f.source == PACKAGE_RELS && f.type_name() == type_name && !f.is_external())
            .map(RelationshipRecord::path)
    }

    /// Every relationship record across all descriptors.
    pub fn relationships(&self) -> &[RelationshipRecord] {
        &self.files
    }

    /// Records whose type URI ends in `/{type_name}`.
    pub fn relationships_of_type<'a>(
        &'a self,
        type_name: &'a str,
    ) -> impl Iterator<Item = &'a RelationshipRecord> + 'a {
        self.files.iter().filter(move |f| f.type_name() == type_name)
    }

    /// Look up a record by the part that declares it and its id.
    pub fn relationship(&self, owning_part: &str, id: &str) -> Option<&RelationshipRecord> {
        let source = rels_path_for(owning_part);
        self.files.iter().find(|f| f.source == source && f.id == id)
    }

    /// Relationships owned by a record's target part.
    pub fn nested_relationships<'a>(&self, record: &'a RelationshipRecord) -> &'a [RelationshipRecord] {
        record.nested()
    }

    /// The package's `officeDocument` relationship.
    pub fn main_document(&self) -> Option<&RelationshipRecord> {
        self.files
            .iter()
            .find(|f| f.source == PACKAGE_RELS && f.type_name() == "officeDocument")
    }

    /// Core properties, empty when the package has none.
    pub fn properties(&self) -> Result<&DocumentProperties> {
        match &self.properties {
            Properties::Present(properties) => Ok(properties),
            Properties::Malformed(reason) => Err(Error::MalformedProperties(reason.clone())),
        }
    }

    /// Raw value of one core property.
    pub fn property(&self, name: &str) -> Result<Option<&str>> {
        Ok(self.properties()?.get(name))
    }

    /// Whether the document has usable numbering definitions.
    pub fn has_numbering(&self) -> bool {
        matches!(self.numbering, Numbering::Present { .. })
    }

    pub fn numbering_index(&self) -> Result<&NumberingIndex> {
        match &self.numbering {
            Numbering::Present { index, .. } => Ok(index),
            Numbering::Absent => Err(Error::FeatureNotPresent(Feature::Numbering)),
            Numbering::Malformed(reason) => Err(Error::MalformedNumbering(reason.clone())),
        }
    }

    pub fn numbering_counters(&self) -> Result<&NumberingCounters> {
        match &self.numbering {
            Numbering::Present { counters, .. } => Ok(counters),
            Numbering::Absent => Err(Error::FeatureNotPresent(Feature::Numbering)),
            Numbering::Malformed(reason) => Err(Error::MalformedNumbering(reason.clone())),
        }
    }

    pub fn numbering_counters_mut(&mut self) -> Result<&mut NumberingCounters> {
        match &mut self.numbering {
            Numbering::Present { counters, .. } => Ok(counters),
            Numbering::Absent => Err(Error::FeatureNotPresent(Feature::Numbering)),
            Numbering::Malformed(reason) => Err(Error::MalformedNumbering(reason.clone())),
        }
    }

    /// Level formats of a concrete numbering id.
    pub fn numbering_formats(&self, num_id: &str) -> Result<&[String]> {
        self.numbering_index()?
            .formats(num_id)
            .ok_or_else(|| Error::UnknownNumbering(num_id.to_string()))
    }

    /// Format name of `(num_id, level)`.
    pub fn numbering_format(&self, num_id: &str, level: usize) -> Result<&str> {
        self.numbering_formats(num_id)?
            .get(level)
            .map(String::as_str)
            .ok_or_else(|| Error::UnknownNumbering(format!("{} (level {})", num_id, level)))
    }

    /// Current count of `(num_id, level)`.
    pub fn counter(&self, num_id: &str, level: usize) -> Result<u32> {
        self.numbering_counters()?.count(num_id, level)
    }

    /// Count one more paragraph at `(num_id, level)` and return the new count.
    pub fn increment_counter(&mut self, num_id: &str, level: usize) -> Result<u32> {
        self.numbering_counters_mut()?.increment(num_id, level)
    }

    /// Count a numbered paragraph and render its marker, indented one tab
    /// per level (e.g. `"\tb)"`).
    pub fn next_marker(&mut self, num_id: &str, level: usize) -> Result<String> {
        let fmt = NumFmt::parse(self.numbering_format(num_id, level)?);
        let count = self.increment_counter(num_id, level)?;
        Ok(format!("{}{}", "\t".repeat(level), fmt.marker(count)))
    }

    /// Serializable view for reporting.
    pub fn summary(&self) -> ContextSummary<'_> {
        let numbering = match &self.numbering {
            Numbering::Absent => NumberingSummary::Absent,
            Numbering::Malformed(reason) => NumberingSummary::Malformed { reason },
            Numbering::Present { index, .. } => NumberingSummary::Present {
                formats: index
                    .num_ids()
                    .filter_map(|id| Some((id, index.formats(id)?)))
                    .collect(),
            },
        };
        let (properties, properties_error) = match &self.properties {
            Properties::Present(properties) => (Some(properties), None),
            Properties::Malformed(reason) => (None, Some(reason.as_str())),
        };
        ContextSummary {
            properties,
            properties_error,
            relationships: &self.files,
            numbering,
        }
    }
}

/// Borrowed, serializable snapshot of a [`DocxContext`].
#[derive(Debug, Serialize)]
pub struct ContextSummary<'a> {
    pub properties: Option<&'a DocumentProperties>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties_error: Option<&'a str>,
    pub relationships: &'a [RelationshipRecord],
    pub numbering: NumberingSummary<'a>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum NumberingSummary<'a> {
    Absent,
    Malformed { reason: &'a str },
    Present { formats: BTreeMap<&'a str, &'a [String]> },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::rels::parse_relationships;

    const PACKAGE: &str = r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

    const DOCUMENT: &str = r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/header" Target="header1.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/image1.png"/>
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="http://example.com/" TargetMode="External"/>
</Relationships>"#;

    const HEADER: &str = r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/image2.jpg"/>
</Relationships>"#;

    fn rels_map() -> RelsMap {
        let mut rels = RelsMap::new();
        for (path, xml) in [
            ("_rels/.rels", PACKAGE),
            ("word/_rels/document.xml.rels", DOCUMENT),
            ("word/_rels/header1.xml.rels", HEADER),
        ] {
            rels.insert(path.to_string(), parse_relationships(xml, path).unwrap());
        }
        rels
    }

    #[test]
    fn test_flatten_tags_owning_directory() {
        let files = flatten_rels(&rels_map(), true);
        assert_eq!(files.len(), 6);

        let main = files.iter().find(|f| f.type_name() == "officeDocument").unwrap();
        assert_eq!(main.owning_directory, "");
        assert_eq!(main.path(), "word/document.xml");

        let header_image = files
            .iter()
            .find(|f| f.source == "word/_rels/header1.xml.rels")
            .unwrap();
        assert_eq!(header_image.owning_directory, "word");
        assert_eq!(header_image.path(), "word/media/image2.jpg");
        assert_eq!(header_image.owning_part(), "word/header1.xml");
    }

    #[test]
    fn test_cross_link_nested_descriptors() {
        let files = flatten_rels(&rels_map(), true);

        let main = files.iter().find(|f| f.type_name() == "officeDocument").unwrap();
        let nested: Vec<_> = main.nested().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(nested, ["rId1", "rId2", "rId3"]);

        let header = files.iter().find(|f| f.type_name() == "header").unwrap();
        assert_eq!(header.nested().len(), 1);
        assert_eq!(header.nested()[0].path(), "word/media/image2.jpg");

        let image = files.iter().find(|f| f.target == "media/image1.png").unwrap();
        assert!(image.nested_rels.is_none());
    }

    #[test]
    fn test_flatten_without_cross_link() {
        let files = flatten_rels(&rels_map(), false);
        assert!(files.iter().all(|f| f.nested_rels.is_none()));
    }

    #[test]
    fn test_record_serializes_type_field() {
        let files = flatten_rels(&rels_map(), false);
        let json = serde_json::to_value(&files[0]).unwrap();
        assert_eq!(json["id"], "rId2");
        assert!(json["type"].as_str().unwrap().ends_with("/core-properties"));
        assert_eq!(json["owning_directory"], "");
        assert!(json.get("nested_rels").is_none());
    }
}
