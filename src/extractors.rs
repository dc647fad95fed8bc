//! Format extractors: raw document bytes to plain text
//!
//! Every extractor is total. An unreadable payload yields an empty string,
//! and a fault in one sub-unit (a page, a slide, a sheet) never aborts
//! extraction of the remaining units.

use crate::types::AttachmentKind;
use calamine::{open_workbook_auto_from_rs, Data, Reader as WorkbookReader};
use quick_xml::events::Event;
use quick_xml::Reader as XmlReader;
use std::io::{Cursor, Read};
use tracing::{debug, warn};
use zip::ZipArchive;

/// Extract plain text from a document attachment payload.
///
/// Dispatches on `kind`; total inability to open the payload is logged and
/// yields an empty string rather than an error.
#[must_use]
pub fn extract_document(kind: AttachmentKind, bytes: &[u8]) -> String {
    let content = match kind {
        AttachmentKind::Pdf => pdf_text(bytes),
        AttachmentKind::WordProcessing => wordprocessing_text(bytes),
        AttachmentKind::SlideDeck => slidedeck_text(bytes),
        AttachmentKind::Spreadsheet => spreadsheet_text(bytes),
    };
    debug!("Extracted {kind} text ({} chars)", content.len());
    content
}

/// Per-page PDF text; pages that fail to decode are skipped
fn pdf_text(bytes: &[u8]) -> String {
    let document = match lopdf::Document::load_mem(bytes) {
        Ok(document) => document,
        Err(e) => {
            warn!("Unreadable PDF payload: {e}");
            return String::new();
        }
    };

    let mut pages = Vec::new();
    for page_number in document.get_pages().keys() {
        match document.extract_text(&[*page_number]) {
            Ok(text) => {
                let text = text.trim();
                if !text.is_empty() {
                    pages.push(text.to_string());
                }
            }
            Err(e) => debug!("Skipping unreadable PDF page {page_number}: {e}"),
        }
    }
    pages.join("\n")
}

/// Paragraph text from a word-processing OOXML package
fn wordprocessing_text(bytes: &[u8]) -> String {
    read_package_entry(bytes, "word/document.xml")
        .map(|xml| document_paragraphs(&xml).join("\n"))
        .unwrap_or_default()
}

/// Shape text from every slide of a presentation OOXML package, in slide
/// order; a corrupt slide entry is skipped
fn slidedeck_text(bytes: &[u8]) -> String {
    let mut archive = match ZipArchive::new(Cursor::new(bytes)) {
        Ok(archive) => archive,
        Err(e) => {
            warn!("Unreadable slide package: {e}");
            return String::new();
        }
    };

    let mut slides: Vec<(u32, String)> = archive
        .file_names()
        .filter_map(slide_entry)
        .collect();
    slides.sort_unstable();

    let mut shapes = Vec::new();
    for (_, name) in slides {
        let Ok(mut entry) = archive.by_name(&name) else {
            continue;
        };
        let mut xml = String::new();
        if entry.read_to_string(&mut xml).is_err() {
            debug!("Skipping unreadable slide entry '{name}'");
            continue;
        }
        shapes.extend(slide_shape_texts(&xml));
    }
    shapes.join("\n")
}

/// Cell text from every sheet of a spreadsheet workbook: non-empty cells
/// joined with tabs, non-empty rows joined with line feeds
fn spreadsheet_text(bytes: &[u8]) -> String {
    let mut workbook = match open_workbook_auto_from_rs(Cursor::new(bytes)) {
        Ok(workbook) => workbook,
        Err(e) => {
            warn!("Unreadable spreadsheet payload: {e}");
            return String::new();
        }
    };

    let mut rows = Vec::new();
    let names = workbook.sheet_names().to_owned();
    for name in names {
        match workbook.worksheet_range(&name) {
            Ok(range) => {
                for row in range.rows() {
                    let cells: Vec<String> = row
                        .iter()
                        .filter(|cell| !matches!(cell, Data::Empty))
                        .map(ToString::to_string)
                        .collect();
                    if !cells.is_empty() {
                        rows.push(cells.join("\t"));
                    }
                }
            }
            Err(e) => debug!("Skipping unreadable sheet '{name}': {e}"),
        }
    }
    rows.join("\n").trim().to_string()
}

/// Read one entry of a zip package to a string
fn read_package_entry(bytes: &[u8], name: &str) -> Option<String> {
    let mut archive = match ZipArchive::new(Cursor::new(bytes)) {
        Ok(archive) => archive,
        Err(e) => {
            warn!("Unreadable document package: {e}");
            return None;
        }
    };
    let mut entry = match archive.by_name(name) {
        Ok(entry) => entry,
        Err(e) => {
            warn!("Document package has no '{name}' entry: {e}");
            return None;
        }
    };
    let mut xml = String::new();
    if let Err(e) = entry.read_to_string(&mut xml) {
        warn!("Failed reading package entry '{name}': {e}");
        return None;
    }
    Some(xml)
}

/// Non-empty paragraph texts from a WordprocessingML document stream.
/// A malformed stream keeps the paragraphs gathered up to the fault.
fn document_paragraphs(xml: &str) -> Vec<String> {
    let mut reader = XmlReader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_paragraph = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(element)) if element.local_name().as_ref() == b"p" => {
                in_paragraph = true;
                current.clear();
            }
            Ok(Event::End(element)) if element.local_name().as_ref() == b"p" => {
                in_paragraph = false;
                let text = current.trim();
                if !text.is_empty() {
                    paragraphs.push(text.to_string());
                }
            }
            Ok(Event::Empty(element)) if in_paragraph => {
                match element.local_name().as_ref() {
                    b"tab" => current.push('\t'),
                    b"br" => current.push('\n'),
                    _ => {}
                }
            }
            Ok(Event::Text(text)) if in_paragraph => {
                current.push_str(&text.unescape().unwrap_or_default());
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                debug!("Malformed document XML, keeping text gathered so far: {e}");
                break;
            }
        }
    }
    paragraphs
}

/// Non-empty shape texts from one DrawingML slide stream, paragraph breaks
/// rendered as line feeds
fn slide_shape_texts(xml: &str) -> Vec<String> {
    let mut reader = XmlReader::from_str(xml);
    let mut texts = Vec::new();
    let mut current = String::new();
    let mut in_text_body = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(element)) if element.local_name().as_ref() == b"txBody" => {
                in_text_body = true;
                current.clear();
            }
            Ok(Event::End(element)) => match element.local_name().as_ref() {
                b"txBody" => {
                    in_text_body = false;
                    let text = current.trim();
                    if !text.is_empty() {
                        texts.push(text.to_string());
                    }
                }
                b"p" if in_text_body => current.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(element))
                if in_text_body && element.local_name().as_ref() == b"br" =>
            {
                current.push('\n');
            }
            Ok(Event::Text(text)) if in_text_body => {
                current.push_str(&text.unescape().unwrap_or_default());
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                debug!("Malformed slide XML, keeping text gathered so far: {e}");
                break;
            }
        }
    }
    texts
}

/// Match a `ppt/slides/slideN.xml` entry and its ordinal
fn slide_entry(name: &str) -> Option<(u32, String)> {
    let number = name
        .strip_prefix("ppt/slides/slide")?
        .strip_suffix(".xml")?
        .parse()
        .ok()?;
    Some((number, name.to_string()))
}
