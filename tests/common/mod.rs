//! Synthetic DOCX packages for integration tests.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub const PNG_BYTES: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x01, 0x02];
pub const JPG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46];

pub const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
pub const REL_CORE_PROPERTIES: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
pub const REL_IMAGE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";
pub const REL_HEADER: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/header";
pub const REL_NUMBERING: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering";
pub const REL_STYLES: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";

pub const CORE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <dc:title>Context test</dc:title>
  <dc:creator>Shay Hill</dc:creator>
  <cp:lastModifiedBy>Shay Hill</cp:lastModifiedBy>
  <cp:revision>6</cp:revision>
  <dcterms:created xsi:type="dcterms:W3CDTF">2019-01-10T07:21:00Z</dcterms:created>
  <dcterms:modified xsi:type="dcterms:W3CDTF">2019-01-11T11:41:00Z</dcterms:modified>
</cp:coreProperties>"#;

pub const NUMBERING_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:abstractNum w:abstractNumId="0">
    <w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="decimal"/><w:lvlText w:val="%1)"/></w:lvl>
    <w:lvl w:ilvl="1"><w:start w:val="1"/><w:numFmt w:val="lowerLetter"/><w:lvlText w:val="%2)"/></w:lvl>
    <w:lvl w:ilvl="2"><w:start w:val="1"/><w:numFmt w:val="lowerRoman"/><w:lvlText w:val="%3)"/></w:lvl>
  </w:abstractNum>
  <w:abstractNum w:abstractNumId="1">
    <w:lvl w:ilvl="0"><w:numFmt w:val="upperLetter"/></w:lvl>
    <w:lvl w:ilvl="1"><w:numFmt w:val="upperRoman"/></w:lvl>
  </w:abstractNum>
  <w:abstractNum w:abstractNumId="2">
    <w:lvl w:ilvl="0"><w:numFmt w:val="bullet"/><w:lvlText w:val="•"/></w:lvl>
  </w:abstractNum>
  <w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num>
  <w:num w:numId="2"><w:abstractNumId w:val="1"/></w:num>
  <w:num w:numId="3"><w:abstractNumId w:val="2"/></w:num>
  <w:num w:numId="4"><w:abstractNumId w:val="0"/></w:num>
</w:numbering>"#;

pub const DANGLING_NUMBERING_XML: &str = r#"<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:abstractNum w:abstractNumId="0"><w:lvl w:ilvl="0"><w:numFmt w:val="decimal"/></w:lvl></w:abstractNum>
  <w:num w:numId="1"><w:abstractNumId w:val="9"/></w:num>
</w:numbering>"#;

const DOCUMENT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body><w:p><w:r><w:t>Hello</w:t></w:r></w:p></w:body>
</w:document>"#;

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#;

/// `(id, type, target)` triples rendered as a `.rels` part.
pub fn rels_xml(rels: &[(&str, &str, &str)]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    for (id, rel_type, target) in rels {
        xml.push_str(&format!(
            "\n  <Relationship Id=\"{}\" Type=\"{}\" Target=\"{}\"/>",
            id, rel_type, target
        ));
    }
    xml.push_str("\n</Relationships>");
    xml
}

/// In-memory DOCX package assembled part by part.
#[derive(Debug, Default, Clone)]
pub struct DocxBuilder {
    parts: Vec<(String, Vec<u8>)>,
}

impl DocxBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content types, package relationships, an empty body and core properties.
    pub fn minimal() -> Self {
        Self::new()
            .part("[Content_Types].xml", CONTENT_TYPES_XML)
            .part(
                "_rels/.rels",
                rels_xml(&[
                    ("rId1", REL_OFFICE_DOCUMENT, "word/document.xml"),
                    ("rId2", REL_CORE_PROPERTIES, "docProps/core.xml"),
                ]),
            )
            .part("word/document.xml", DOCUMENT_XML)
            .part(
                "word/_rels/document.xml.rels",
                rels_xml(&[("rId1", REL_STYLES, "styles.xml")]),
            )
            .part("docProps/core.xml", CORE_XML)
    }

    /// Two images (one owned by a header), a header and numbering definitions.
    pub fn example() -> Self {
        Self::minimal()
            .part(
                "word/_rels/document.xml.rels",
                rels_xml(&[
                    ("rId1", REL_STYLES, "styles.xml"),
                    ("rId2", REL_NUMBERING, "numbering.xml"),
                    ("rId3", REL_IMAGE, "media/image1.png"),
                    ("rId4", REL_HEADER, "header1.xml"),
                ]),
            )
            .part("word/numbering.xml", NUMBERING_XML)
            .part("word/media/image1.png", PNG_BYTES)
            .part("word/header1.xml", DOCUMENT_XML)
            .part(
                "word/_rels/header1.xml.rels",
                rels_xml(&[("rId1", REL_IMAGE, "media/image2.jpg")]),
            )
            .part("word/media/image2.jpg", JPG_BYTES)
    }

    /// Add a part, replacing any part of the same name.
    pub fn part(mut self, name: &str, data: impl AsRef<[u8]>) -> Self {
        self.parts.retain(|(n, _)| n != name);
        self.parts.push((name.to_string(), data.as_ref().to_vec()));
        self
    }

    pub fn without(mut self, name: &str) -> Self {
        self.parts.retain(|(n, _)| n != name);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut buffer = Vec::new();
        let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
        let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        for (name, data) in &self.parts {
            zip.start_file(name.as_str(), options).unwrap();
            zip.write_all(data).unwrap();
        }
        zip.finish().unwrap();
        buffer
    }
}
