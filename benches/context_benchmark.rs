//! Benchmarks for context assembly.
//!
//! Run with: cargo bench
//!
//! Packages grow in numbering definitions and image relationships; the body
//! stays a single paragraph.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use docx_context::{DocxContext, DocxSession, OoxmlContainer};
use std::io::Cursor;

const FORMATS: [&str; 6] = [
    "decimal",
    "lowerLetter",
    "upperLetter",
    "lowerRoman",
    "upperRoman",
    "bullet",
];

/// Creates a synthetic DOCX with `list_count` numbering definitions and as
/// many image relationships.
fn create_test_docx(list_count: usize) -> Vec<u8> {
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    let mut buffer = Vec::new();
    let mut zip = ZipWriter::new(Cursor::new(&mut buffer));

    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);

    zip.start_file("_rels/.rels", options).unwrap();
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
</Relationships>"#,
    )
    .unwrap();

    zip.start_file("docProps/core.xml", options).unwrap();
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/">
  <dc:creator>Benchmark</dc:creator>
  <cp:revision>1</cp:revision>
</cp:coreProperties>"#,
    )
    .unwrap();

    zip.start_file("word/document.xml", options).unwrap();
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body><w:p><w:r><w:t>Benchmark</w:t></w:r></w:p></w:body>
</w:document>"#,
    )
    .unwrap();

    let mut rels = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering" Target="numbering.xml"/>"#,
    );
    for i in 0..list_count {
        rels.push_str(&format!(
            r#"
  <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/image{}.png"/>"#,
            i + 2,
            i
        ));
    }
    rels.push_str("\n</Relationships>");
    zip.start_file("word/_rels/document.xml.rels", options)
        .unwrap();
    zip.write_all(rels.as_bytes()).unwrap();

    let mut numbering = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
    );
    for i in 0..list_count {
        numbering.push_str(&format!(r#"
  <w:abstractNum w:abstractNumId="{}">"#, i));
        for level in 0..9 {
            numbering.push_str(&format!(
                r#"<w:lvl w:ilvl="{}"><w:start w:val="1"/><w:numFmt w:val="{}"/></w:lvl>"#,
                level,
                FORMATS[(i + level) % FORMATS.len()]
            ));
        }
        numbering.push_str("</w:abstractNum>");
    }
    for i in 0..list_count {
        numbering.push_str(&format!(
            r#"
  <w:num w:numId="{}"><w:abstractNumId w:val="{}"/></w:num>"#,
            i + 1,
            i
        ));
    }
    numbering.push_str("\n</w:numbering>");
    zip.start_file("word/numbering.xml", options).unwrap();
    zip.write_all(numbering.as_bytes()).unwrap();

    for i in 0..list_count {
        zip.start_file(format!("word/media/image{}.png", i), options)
            .unwrap();
        zip.write_all(&[0x89, 0x50, 0x4E, 0x47, i as u8]).unwrap();
    }

    zip.finish().unwrap();
    buffer
}

/// Benchmark context assembly at various sizes.
fn bench_context_assembly(c: &mut Criterion) {
    let mut group = c.benchmark_group("context_assembly");

    for list_count in [1, 10, 100, 500].iter() {
        let data = create_test_docx(*list_count);
        let size = data.len() as u64;

        group.throughput(Throughput::Bytes(size));
        group.bench_with_input(BenchmarkId::new("lists", list_count), &data, |b, data| {
            b.iter(|| {
                let container = OoxmlContainer::from_bytes(black_box(data.clone())).unwrap();
                let _ = DocxContext::collect(&container);
            });
        });
    }

    group.finish();
}

/// Benchmark marker rendering across every list and level.
fn bench_next_marker(c: &mut Criterion) {
    let mut group = c.benchmark_group("next_marker");

    for list_count in [10, 100].iter() {
        let data = create_test_docx(*list_count);
        let session = DocxSession::from_bytes(data).unwrap();

        group.bench_with_input(
            BenchmarkId::new("lists", list_count),
            session.context(),
            |b, context| {
                b.iter(|| {
                    let mut context = context.clone();
                    for id in 1..=*list_count {
                        let id = id.to_string();
                        for level in 0..9 {
                            let _ = black_box(context.next_marker(&id, level));
                        }
                    }
                });
            },
        );
    }

    group.finish();
}

/// Benchmark image extraction without writing to disk.
fn bench_image_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("image_extraction");

    for list_count in [10, 100, 500].iter() {
        let data = create_test_docx(*list_count);
        let session = DocxSession::from_bytes(data).unwrap();

        group.bench_with_input(BenchmarkId::new("images", list_count), &session, |b, session| {
            b.iter(|| {
                let _ = black_box(session).pull_image_files(None);
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_context_assembly,
    bench_next_marker,
    bench_image_extraction,
);
criterion_main!(benches);
