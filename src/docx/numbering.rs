//! DOCX numbering (list) definitions.
//!
//! `word/numbering.xml` has two sections. Abstract definitions describe the
//! format of every indentation level:
//!
//! ```xml
//! <w:abstractNum w:abstractNumId="0">
//!     <w:lvl w:ilvl="0"><w:numFmt w:val="decimal"/></w:lvl>
//!     <w:lvl w:ilvl="1"><w:numFmt w:val="lowerLetter"/></w:lvl>
//! </w:abstractNum>
//! ```
//!
//! Concrete definitions are what paragraphs reference through `w:numId`. Each
//! points at one abstract definition; several may share a template while
//! keeping separate counts.
//!
//! ```xml
//! <w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num>
//! ```

use crate::error::{Error, Result};
use crate::namespace::{w, ExpandedName};
use quick_xml::events::{BytesStart, Event};
use quick_xml::NsReader;
use std::collections::HashMap;

/// Abstract numbering id mapped to one format name per level (index = `w:ilvl`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumberingTable {
    abstract_nums: HashMap<String, Vec<String>>,
}

impl NumberingTable {
    /// Formats of an abstract definition.
    pub fn get(&self, abstract_num_id: &str) -> Option<&[String]> {
        self.abstract_nums.get(abstract_num_id).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.abstract_nums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.abstract_nums.is_empty()
    }

    /// Iterate over `(abstract id, formats)` in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.abstract_nums
            .iter()
            .map(|(id, fmts)| (id.as_str(), fmts.as_slice()))
    }
}

/// A `w:num` element: concrete id and the abstract definition it uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumInstance {
    pub num_id: String,
    pub abstract_num_id: String,
}

/// Both sections of a numbering part, before cross-referencing.
#[derive(Debug, Clone, Default)]
pub struct NumberingDefinitions {
    pub table: NumberingTable,
    /// Concrete definitions in document order
    pub instances: Vec<NumInstance>,
}

/// Concrete numbering id mapped to the formats of its abstract definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumberingIndex {
    formats: HashMap<String, Vec<String>>,
}

impl NumberingIndex {
    /// Parse a numbering part and resolve every concrete definition.
    pub fn parse(xml: &str) -> Result<Self> {
        Self::resolve(&NumberingDefinitions::parse(xml)?)
    }

    /// Dereference each concrete id to its abstract formats.
    ///
    /// A `w:num` naming an abstract id that was never defined is an error.
    pub fn resolve(defs: &NumberingDefinitions) -> Result<Self> {
        let mut formats = HashMap::with_capacity(defs.instances.len());
        for num in &defs.instances {
            let fmts = defs.table.get(&num.abstract_num_id).ok_or_else(|| {
                Error::MalformedNumbering(format!(
                    "num {} references undefined abstractNum {}",
                    num.num_id, num.abstract_num_id
                ))
            })?;
            formats.insert(num.num_id.clone(), fmts.to_vec());
        }
        Ok(Self { formats })
    }

    /// All level formats of a concrete id.
    pub fn formats(&self, num_id: &str) -> Option<&[String]> {
        self.formats.get(num_id).map(Vec::as_slice)
    }

    /// Format name of one level of a concrete id.
    pub fn format(&self, num_id: &str, level: usize) -> Option<&str> {
        self.formats(num_id)?.get(level).map(String::as_str)
    }

    pub fn contains(&self, num_id: &str) -> bool {
        self.formats.contains_key(num_id)
    }

    /// Concrete ids in no particular order.
    pub fn num_ids(&self) -> impl Iterator<Item = &str> {
        self.formats.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.formats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }
}

struct LevelDef {
    ilvl: usize,
    num_fmt: Option<String>,
}

struct AbstractDef {
    id: String,
    levels: Vec<LevelDef>,
}

impl AbstractDef {
    /// Order levels and require them to be exactly `0..n`.
    fn into_formats(mut self) -> Result<(String, Vec<String>)> {
        self.levels.sort_by_key(|l| l.ilvl);
        let mut formats = Vec::with_capacity(self.levels.len());
        for (expected, level) in self.levels.into_iter().enumerate() {
            if level.ilvl != expected {
                let problem = if level.ilvl < expected {
                    format!("duplicate level {}", level.ilvl)
                } else {
                    format!("missing level {}", expected)
                };
                return Err(Error::MalformedNumbering(format!(
                    "abstractNum {}: {}",
                    self.id, problem
                )));
            }
            let num_fmt = level.num_fmt.ok_or_else(|| {
                Error::MalformedNumbering(format!(
                    "abstractNum {}: level {} has no numFmt",
                    self.id, level.ilvl
                ))
            })?;
            formats.push(num_fmt);
        }
        Ok((self.id, formats))
    }
}

impl NumberingDefinitions {
    /// Parse the abstract and concrete sections of a numbering part.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut defs = NumberingDefinitions::default();
        let mut reader = NsReader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        // depth of the element being opened, root = 0
        let mut depth = 0usize;
        let mut current_abstract: Option<AbstractDef> = None;
        let mut current_level: Option<LevelDef> = None;
        let mut current_num: Option<(String, Option<String>)> = None;

        loop {
            buf.clear();
            let event = reader
                .read_event_into(&mut buf)
                .map_err(|e| Error::XmlParse(format!("numbering: {}", e)))?;
            match event {
                Event::Start(ref e) | Event::Empty(ref e) => {
                    let empty = matches!(event, Event::Empty(_));
                    let (ns, local) = reader.resolve_element(e.name());
                    let is = |name: ExpandedName| name.matches(&ns, local.as_ref());

                    if depth == 1 && is(w::ABSTRACT_NUM) {
                        let id = required_attr(&reader, e, w::ABSTRACT_NUM_ID, "abstractNum")?;
                        current_abstract = Some(AbstractDef {
                            id,
                            levels: Vec::new(),
                        });
                    } else if depth == 2 && current_abstract.is_some() && is(w::LVL) {
                        let raw = required_attr(&reader, e, w::ILVL, "lvl")?;
                        let ilvl = raw.trim().parse().map_err(|_| {
                            Error::MalformedNumbering(format!("invalid w:ilvl {:?}", raw))
                        })?;
                        current_level = Some(LevelDef {
                            ilvl,
                            num_fmt: None,
                        });
                    } else if depth == 3 && is(w::NUM_FMT) {
                        if let Some(level) = current_level.as_mut() {
                            level.num_fmt = Some(required_attr(&reader, e, w::VAL, "numFmt")?);
                        }
                    } else if depth == 1 && is(w::NUM) {
                        let num_id = required_attr(&reader, e, w::NUM_ID, "num")?;
                        current_num = Some((num_id, None));
                    } else if depth == 2 && is(w::ABSTRACT_NUM_ID) {
                        if let Some((_, reference)) = current_num.as_mut() {
                            *reference = Some(required_attr(&reader, e, w::VAL, "abstractNumId")?);
                        }
                    }

                    if empty {
                        close(depth, &mut defs, &mut current_abstract, &mut current_level, &mut current_num)?;
                    } else {
                        depth += 1;
                    }
                }
                Event::End(_) => {
                    depth = depth.saturating_sub(1);
                    close(depth, &mut defs, &mut current_abstract, &mut current_level, &mut current_num)?;
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(defs)
    }
}

/// Finish whichever definition the element closing at `depth` belongs to.
fn close(
    depth: usize,
    defs: &mut NumberingDefinitions,
    current_abstract: &mut Option<AbstractDef>,
    current_level: &mut Option<LevelDef>,
    current_num: &mut Option<(String, Option<String>)>,
) -> Result<()> {
    match depth {
        2 => {
            if let (Some(level), Some(abstract_num)) = (current_level.take(), current_abstract.as_mut()) {
                abstract_num.levels.push(level);
            }
        }
        1 => {
            if let Some(abstract_num) = current_abstract.take() {
                let (id, formats) = abstract_num.into_formats()?;
                if defs.table.abstract_nums.insert(id.clone(), formats).is_some() {
                    log::warn!("abstractNum {} defined more than once; keeping the last", id);
                }
            }
            if let Some((num_id, reference)) = current_num.take() {
                let abstract_num_id = reference.ok_or_else(|| {
                    Error::MalformedNumbering(format!("num {} has no abstractNumId", num_id))
                })?;
                defs.instances.push(NumInstance {
                    num_id,
                    abstract_num_id,
                });
            }
        }
        _ => {}
    }
    Ok(())
}

fn required_attr(
    reader: &NsReader<&[u8]>,
    e: &BytesStart,
    name: ExpandedName,
    element: &str,
) -> Result<String> {
    for attr in e.attributes() {
        let attr = attr.map_err(|err| Error::XmlParse(format!("numbering: {}", err)))?;
        let (ns, local) = reader.resolve_attribute(attr.key);
        if name.matches(&ns, local.as_ref()) {
            return Ok(attr.unescape_value()?.into_owned());
        }
    }
    Err(Error::MalformedNumbering(format!(
        "w:{} without w:{}",
        element, name.local
    )))
}
