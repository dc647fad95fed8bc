//! Container walking: metadata coercion, body selection, attachment
//! dispatch, and depth-bounded recursion into embedded containers

use crate::config::{FormatKind, WalkerConfig};
use crate::error::{ParseError, Result};
use crate::extractors::extract_document;
use crate::normalize::{normalize_body, split_thread, strip_markup};
use crate::types::{AttachmentKind, ExtractedDocument, Metadata, ParsedMessage};
use chrono::DateTime;
use mailparse::{DispositionType, MailHeader, ParsedMail};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Access to one attachment entry: a display name and its raw payload.
///
/// Document kinds and embedded containers are dispatched uniformly through
/// this capability, regardless of how the container stores its entries.
pub trait AttachmentEntry {
    /// Display name the container recorded for this entry, empty when omitted
    fn display_name(&self) -> String;

    /// Decoded raw payload bytes
    fn raw_bytes(&self) -> Result<Vec<u8>>;
}

/// A MIME leaf part viewed as an attachment entry
struct MimeEntry<'m> {
    part: &'m ParsedMail<'m>,
}

impl AttachmentEntry for MimeEntry<'_> {
    fn display_name(&self) -> String {
        let disposition = self.part.get_content_disposition();
        disposition
            .params
            .get("filename")
            .cloned()
            .or_else(|| self.part.ctype.params.get("name").cloned())
            .unwrap_or_default()
    }

    fn raw_bytes(&self) -> Result<Vec<u8>> {
        self.part
            .get_body_raw()
            .map_err(|e| ParseError::Extraction {
                filename: self.display_name(),
                details: e.to_string(),
            })
    }
}

/// Walks a mail container into a [`ParsedMessage`] tree
#[derive(Debug, Clone, Default)]
pub struct ContainerWalker {
    config: WalkerConfig,
}

impl ContainerWalker {
    /// Create a walker with the given configuration
    #[must_use]
    pub const fn new(config: WalkerConfig) -> Self {
        Self { config }
    }

    /// The configuration this walker was built with
    #[must_use]
    pub const fn config(&self) -> &WalkerConfig {
        &self.config
    }

    /// Parse a top-level container from raw bytes.
    ///
    /// The only fatal outcome is [`ParseError::UnsupportedContainer`]; every
    /// per-attachment condition is contained and degrades the output instead.
    pub fn parse(&self, raw: &[u8]) -> Result<ParsedMessage> {
        self.walk(raw, 0)
    }

    fn walk(&self, raw: &[u8], depth: usize) -> Result<ParsedMessage> {
        let mail = mailparse::parse_mail(raw)
            .map_err(|e| ParseError::UnsupportedContainer(e.to_string()))?;
        if mail.headers.is_empty() {
            return Err(ParseError::UnsupportedContainer(
                "no message headers present".to_string(),
            ));
        }

        let metadata = extract_metadata(&mail.headers);
        debug!("Walking container '{}' at depth {depth}", metadata.subject);

        let raw_body = extract_raw_body(&mail);
        let body = split_thread(&normalize_body(&raw_body), &self.config.thread_delimiter);

        let mut attachments_by_kind: BTreeMap<AttachmentKind, Vec<ExtractedDocument>> =
            BTreeMap::new();
        let mut nested_messages = Vec::new();

        let mut parts = Vec::new();
        collect_attachment_parts(&mail, &mut parts);
        debug!("Found {} attachment entries", parts.len());

        for part in parts {
            let entry = MimeEntry { part };
            self.ingest(&entry, depth, &mut attachments_by_kind, &mut nested_messages);
        }

        Ok(ParsedMessage {
            metadata,
            body,
            attachments_by_kind,
            nested_messages,
        })
    }

    /// Process one attachment entry. Failures are contained here so sibling
    /// entries and the parent message always proceed.
    fn ingest(
        &self,
        entry: &dyn AttachmentEntry,
        depth: usize,
        buckets: &mut BTreeMap<AttachmentKind, Vec<ExtractedDocument>>,
        nested: &mut Vec<ParsedMessage>,
    ) {
        let filename = entry.display_name();
        match self.config.classify(&filename) {
            None => debug!("Skipping attachment '{filename}' of unrecognized kind"),
            Some(FormatKind::Document(kind)) => match entry.raw_bytes() {
                Ok(bytes) => {
                    let content = extract_document(kind, &bytes);
                    buckets
                        .entry(kind)
                        .or_default()
                        .push(ExtractedDocument { filename, content });
                }
                Err(e) => warn!("Dropping attachment: {e}"),
            },
            Some(FormatKind::Container) => {
                if depth + 1 > self.config.max_depth {
                    warn!(
                        "Dropping nested container '{filename}': {}",
                        ParseError::DepthExceeded(depth + 1)
                    );
                    return;
                }
                match entry
                    .raw_bytes()
                    .and_then(|bytes| self.walk(&bytes, depth + 1))
                {
                    Ok(child) => nested.push(child),
                    Err(e) => warn!("Dropping nested container '{filename}': {e}"),
                }
            }
        }
    }
}

/// Parse a container with the default configuration
pub fn parse_container(raw: &[u8]) -> Result<ParsedMessage> {
    ContainerWalker::default().parse(raw)
}

fn header_value(headers: &[MailHeader], name: &str) -> Option<String> {
    headers
        .iter()
        .find(|h| h.get_key().to_lowercase() == name)
        .map(MailHeader::get_value)
}

/// Header metadata with every field coerced to a string; individually
/// missing fields become empty strings rather than failing the parse
fn extract_metadata(headers: &[MailHeader]) -> Metadata {
    Metadata {
        from: header_value(headers, "from").unwrap_or_default(),
        to: header_value(headers, "to").unwrap_or_default(),
        cc: header_value(headers, "cc").unwrap_or_default(),
        bcc: header_value(headers, "bcc").unwrap_or_default(),
        date: normalize_date(header_value(headers, "date")),
        subject: header_value(headers, "subject").unwrap_or_default(),
    }
}

/// ISO-8601 when the header parses as an RFC 2822 date, otherwise the raw
/// header text, otherwise empty
fn normalize_date(raw: Option<String>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };
    match mailparse::dateparse(&raw) {
        Ok(timestamp) => DateTime::from_timestamp(timestamp, 0)
            .map_or(raw, |moment| moment.to_rfc3339()),
        Err(e) => {
            debug!(
                "Keeping raw date text: {}",
                ParseError::Metadata {
                    field: "date".to_string(),
                    details: e.to_string(),
                }
            );
            raw
        }
    }
}

/// Body text for one container level, preferring plain text over markup
fn extract_raw_body(mail: &ParsedMail) -> String {
    let mut text = String::new();
    let mut html: Option<String> = None;
    collect_body_parts(mail, &mut text, &mut html);

    if !text.is_empty() {
        return text;
    }
    html.as_deref().map(strip_markup).unwrap_or_default()
}

fn collect_body_parts(part: &ParsedMail, text: &mut String, html: &mut Option<String>) {
    if part.subparts.is_empty() {
        if is_attachment_part(part) {
            return;
        }
        let mimetype = part.ctype.mimetype.to_lowercase();
        if let Ok(body) = part.get_body() {
            if mimetype.contains("text/html") {
                if html.is_none() {
                    *html = Some(body);
                }
            } else if mimetype.starts_with("text/") && text.is_empty() {
                *text = body;
            }
        }
        return;
    }
    for sub in &part.subparts {
        collect_body_parts(sub, text, html);
    }
}

fn is_attachment_part(part: &ParsedMail) -> bool {
    let disposition = part.get_content_disposition();
    disposition.disposition == DispositionType::Attachment
        || disposition.params.contains_key("filename")
        || part.ctype.params.contains_key("name")
}

/// Every leaf part carrying an attachment, in document order
fn collect_attachment_parts<'m>(part: &'m ParsedMail<'m>, found: &mut Vec<&'m ParsedMail<'m>>) {
    if part.subparts.is_empty() {
        if is_attachment_part(part) {
            found.push(part);
        }
        return;
    }
    for sub in &part.subparts {
        collect_attachment_parts(sub, found);
    }
}
