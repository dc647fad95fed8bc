//! Shared fixture builders for integration tests
#![allow(dead_code)]

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Build an in-memory zip archive from (entry name, content) pairs
pub fn zip_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, content) in entries {
        writer.start_file(*name, options).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// Minimal word-processing package with one run per paragraph
pub fn docx_bytes(paragraphs: &[&str]) -> Vec<u8> {
    let body: String = paragraphs
        .iter()
        .map(|text| format!("<w:p><w:r><w:t>{text}</w:t></w:r></w:p>"))
        .collect();
    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
    );
    zip_bytes(&[("word/document.xml", &document)])
}

/// Minimal slide package; each slide holds one shape per text
pub fn pptx_bytes(slides: &[Vec<&str>]) -> Vec<u8> {
    let entries: Vec<(String, String)> = slides
        .iter()
        .enumerate()
        .map(|(index, shapes)| {
            let sps: String = shapes
                .iter()
                .map(|text| {
                    format!("<p:sp><p:txBody><a:p><a:r><a:t>{text}</a:t></a:r></a:p></p:txBody></p:sp>")
                })
                .collect();
            let slide = format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree>{sps}</p:spTree></p:cSld></p:sld>"#
            );
            (format!("ppt/slides/slide{}.xml", index + 1), slide)
        })
        .collect();
    let borrowed: Vec<(&str, &str)> = entries
        .iter()
        .map(|(name, content)| (name.as_str(), content.as_str()))
        .collect();
    zip_bytes(&borrowed)
}

/// Minimal xlsx workbook with one sheet of inline-string cells
pub fn xlsx_bytes(rows: &[&[&str]]) -> Vec<u8> {
    let mut sheet_rows = String::new();
    for (row_index, cells) in rows.iter().enumerate() {
        let mut row_xml = String::new();
        for (col_index, cell) in cells.iter().enumerate() {
            let column = char::from(b'A' + u8::try_from(col_index).unwrap());
            row_xml.push_str(&format!(
                r#"<c r="{column}{}" t="inlineStr"><is><t>{cell}</t></is></c>"#,
                row_index + 1
            ));
        }
        sheet_rows.push_str(&format!(r#"<row r="{}">{row_xml}</row>"#, row_index + 1));
    }

    let content_types = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#;
    let root_rels = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;
    let workbook = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Sheet1" sheetId="1" r:id="rId1"/></sheets></workbook>"#;
    let workbook_rels = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#;
    let sheet = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{sheet_rows}</sheetData></worksheet>"#
    );

    zip_bytes(&[
        ("[Content_Types].xml", content_types),
        ("_rels/.rels", root_rels),
        ("xl/workbook.xml", workbook),
        ("xl/_rels/workbook.xml.rels", workbook_rels),
        ("xl/worksheets/sheet1.xml", &sheet),
    ])
}

/// A multipart/mixed message with a plain-text body and base64-encoded
/// attachments given as (filename, content type, payload)
pub fn mime_message(subject: &str, body: &str, attachments: &[(&str, &str, &[u8])]) -> Vec<u8> {
    let mut raw = String::new();
    raw.push_str("From: compliance@example.com\r\n");
    raw.push_str("To: desk@example.com\r\n");
    raw.push_str("Cc: audit@example.com\r\n");
    raw.push_str(&format!("Subject: {subject}\r\n"));
    raw.push_str("Date: Thu, 01 Jan 2025 12:00:00 +0000\r\n");
    raw.push_str("MIME-Version: 1.0\r\n");
    raw.push_str("Content-Type: multipart/mixed; boundary=\"fixture\"\r\n\r\n");

    raw.push_str("--fixture\r\nContent-Type: text/plain\r\n\r\n");
    raw.push_str(body);
    raw.push_str("\r\n");

    for (filename, content_type, payload) in attachments {
        raw.push_str("--fixture\r\n");
        raw.push_str(&format!("Content-Type: {content_type}; name=\"{filename}\"\r\n"));
        raw.push_str(&format!(
            "Content-Disposition: attachment; filename=\"{filename}\"\r\n"
        ));
        raw.push_str("Content-Transfer-Encoding: base64\r\n\r\n");
        raw.push_str(&STANDARD.encode(payload));
        raw.push_str("\r\n");
    }
    raw.push_str("--fixture--\r\n");
    raw.into_bytes()
}
