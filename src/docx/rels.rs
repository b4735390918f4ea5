//! Relationship descriptor (`.rels`) collection.
//!
//! Every `.rels` part in the package lists the relationships owned by one
//! source part. A descriptor for `word/header1.xml` lives at
//! `word/_rels/header1.xml.rels`; the package itself is described by
//! `_rels/.rels`. Relationship ids are only unique within one descriptor.

use crate::container::{OoxmlContainer, RELS_SUFFIX};
use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use serde::Serialize;
use std::collections::BTreeMap;

/// Descriptor for the package root; every OOXML package carries one.
pub const PACKAGE_RELS: &str = "_rels/.rels";

const RELS_DIR: &str = "_rels";

/// One `<Relationship>` element, attributes kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1")
    pub id: String,
    /// Relationship type URI
    #[serde(rename = "type")]
    pub rel_type: String,
    /// Target path, relative to the source part's directory
    pub target: String,
    /// Any further attributes (e.g. `TargetMode`)
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl Relationship {
    /// Whether the target lives outside the package (`TargetMode="External"`).
    pub fn is_external(&self) -> bool {
        self.attributes
            .get("TargetMode")
            .is_some_and(|mode| mode.eq_ignore_ascii_case("external"))
    }

    /// Last segment of the type URI, e.g. `"image"` or `"header"`.
    pub fn type_name(&self) -> &str {
        self.rel_type.rsplit('/').next().unwrap_or_default()
    }
}

/// Descriptor part path mapped to its relationships in document order.
pub type RelsMap = BTreeMap<String, Vec<Relationship>>;

/// Read and parse every `.rels` part in the archive.
pub fn collect_rels(container: &OoxmlContainer) -> Result<RelsMap> {
    let mut rels = RelsMap::new();
    for path in container.rels_parts() {
        let xml = container.read_xml(&path)?;
        let parsed = parse_relationships(&xml, &path)?;
        log::debug!("{}: {} relationships", path, parsed.len());
        rels.insert(path, parsed);
    }
    Ok(rels)
}

/// Parse the `<Relationship>` children of a descriptor's root element.
///
/// `source` names the descriptor in log and error messages.
pub fn parse_relationships(xml: &str, source: &str) -> Result<Vec<Relationship>> {
    let mut rels = Vec::new();
    if xml.trim().is_empty() {
        return Ok(rels);
    }

    let mut reader = quick_xml::Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut depth = 0usize;
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                if depth == 1 && e.local_name().as_ref() == b"Relationship" {
                    push_relationship(&mut rels, &e, source)?;
                }
                depth += 1;
            }
            Ok(Event::Empty(e)) => {
                if depth == 1 && e.local_name().as_ref() == b"Relationship" {
                    push_relationship(&mut rels, &e, source)?;
                }
            }
            Ok(Event::End(_)) => depth = depth.saturating_sub(1),
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(format!("{}: {}", source, e))),
            _ => {}
        }
        buf.clear();
    }

    Ok(rels)
}

fn push_relationship(rels: &mut Vec<Relationship>, e: &BytesStart, source: &str) -> Result<()> {
    let mut id = None;
    let mut rel_type = String::new();
    let mut target = String::new();
    let mut attributes = BTreeMap::new();

    for attr in e.attributes() {
        let attr = attr.map_err(|err| Error::XmlParse(format!("{}: {}", source, err)))?;
        let value = attr.unescape_value()?.into_owned();
        match attr.key.as_ref() {
            b"Id" => id = Some(value),
            b"Type" => rel_type = value,
            b"Target" => target = value,
            key if key.starts_with(b"xmlns") => {}
            key => {
                attributes.insert(String::from_utf8_lossy(key).into_owned(), value);
            }
        }
    }

    match id {
        Some(id) => rels.push(Relationship {
            id,
            rel_type,
            target,
            attributes,
        }),
        None => log::warn!("{}: skipping relationship without Id (target {:?})", source, target),
    }
    Ok(())
}

/// Descriptor path for a part: `word/header1.xml` -> `word/_rels/header1.xml.rels`.
///
/// The empty string stands for the package root and maps to `_rels/.rels`.
pub fn rels_path_for(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, file)) => format!("{}/{}/{}{}", dir, RELS_DIR, file, RELS_SUFFIX),
        None => format!("{}/{}{}", RELS_DIR, part, RELS_SUFFIX),
    }
}

/// Directory of the part a descriptor describes: `word/_rels/document.xml.rels` -> `word`.
pub fn owning_directory(rels_path: &str) -> String {
    let parent = rels_path.rsplit_once('/').map_or("", |(dir, _)| dir);
    if parent == RELS_DIR {
        return String::new();
    }
    parent
        .strip_suffix(RELS_DIR)
        .and_then(|p| p.strip_suffix('/'))
        .unwrap_or(parent)
        .to_string()
}

/// Part a descriptor describes: `word/_rels/document.xml.rels` -> `word/document.xml`.
pub fn described_part(rels_path: &str) -> String {
    let file = rels_path.rsplit('/').next().unwrap_or_default();
    let file = file.strip_suffix(RELS_SUFFIX).unwrap_or(file);
    let dir = owning_directory(rels_path);
    if dir.is_empty() {
        file.to_string()
    } else {
        format!("{}/{}", dir, file)
    }
}

/// Resolve a relationship target against the directory of its source part.
///
/// Targets starting with `/` are package-absolute.
pub fn resolve_target(dir: &str, target: &str) -> String {
    let (base, relative) = match target.strip_prefix('/') {
        Some(absolute) => ("", absolute),
        None => (dir, target),
    };

    let mut segments: Vec<&str> = base.split('/').filter(|s| !s.is_empty()).collect();
    for segment in relative.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    segments.join("/")
}
