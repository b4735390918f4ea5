//! Core document properties (`docProps/core.xml`).

use crate::error::{Error, Result};
use quick_xml::events::Event;
use serde::Serialize;
use std::collections::BTreeMap;

/// Property name (tag without prefix) mapped to its raw text.
///
/// Values are kept exactly as written: timestamps stay ISO-8601 strings and
/// surrounding whitespace is not trimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DocumentProperties {
    values: BTreeMap<String, String>,
}

impl DocumentProperties {
    /// Parse the direct children of the core-properties root element.
    ///
    /// ```
    /// use docx_context::docx::DocumentProperties;
    ///
    /// let props = DocumentProperties::parse(
    ///     r#"<cp:coreProperties
    ///            xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties"
    ///            xmlns:dc="http://purl.org/dc/elements/1.1/">
    ///          <dc:creator>Shay Hill</dc:creator>
    ///          <cp:revision>6</cp:revision>
    ///        </cp:coreProperties>"#,
    /// )?;
    /// assert_eq!(props.get("creator"), Some("Shay Hill"));
    /// assert_eq!(props.get("revision"), Some("6"));
    /// # Ok::<(), docx_context::Error>(())
    /// ```
    pub fn parse(xml: &str) -> Result<Self> {
        let mut values = BTreeMap::new();
        let mut reader = quick_xml::Reader::from_str(xml);
        reader.config_mut().trim_text(false);

        let mut buf = Vec::new();
        let mut depth = 0usize;
        // (name, text so far, still reading leading text)
        let mut current: Option<(String, String, bool)> = None;

        loop {
            buf.clear();
            let event = reader
                .read_event_into(&mut buf)
                .map_err(|e| Error::XmlParse(format!("core properties: {}", e)))?;
            match event {
                Event::Start(e) => {
                    if depth == 1 {
                        let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                        current = Some((name, String::new(), true));
                    } else if let Some((_, _, reading)) = current.as_mut() {
                        *reading = false;
                    }
                    depth += 1;
                }
                Event::Empty(e) => {
                    if depth == 1 {
                        let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                        values.insert(name, String::new());
                    } else if let Some((_, _, reading)) = current.as_mut() {
                        *reading = false;
                    }
                }
                Event::Text(e) if depth == 2 => {
                    if let Some((_, text, true)) = current.as_mut() {
                        text.push_str(&e.unescape()?);
                    }
                }
                Event::CData(e) if depth == 2 => {
                    if let Some((_, text, true)) = current.as_mut() {
                        text.push_str(&String::from_utf8_lossy(&e));
                    }
                }
                Event::End(_) => {
                    depth = depth.saturating_sub(1);
                    if depth == 1 {
                        if let Some((name, text, _)) = current.take() {
                            values.insert(name, text);
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(Self { values })
    }

    /// Raw value of a property by unprefixed name (e.g. `"creator"`).
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn title(&self) -> Option<&str> {
        self.get("title")
    }

    pub fn creator(&self) -> Option<&str> {
        self.get("creator")
    }

    pub fn last_modified_by(&self) -> Option<&str> {
        self.get("lastModifiedBy")
    }

    pub fn revision(&self) -> Option<&str> {
        self.get("revision")
    }

    pub fn created(&self) -> Option<&str> {
        self.get("created")
    }

    pub fn modified(&self) -> Option<&str> {
        self.get("modified")
    }
}
