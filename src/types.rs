//! Core types for parsed mail containers

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Header metadata for one container level.
///
/// Every field is always present; values the container omitted are empty
/// strings rather than absent keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Sender, as recorded by the container
    pub from: String,

    /// Primary recipients
    pub to: String,

    /// CC recipients
    pub cc: String,

    /// BCC recipients (usually empty; containers rarely record them)
    pub bcc: String,

    /// ISO-8601 timestamp when the source date was parseable, otherwise the
    /// raw header text
    pub date: String,

    /// Subject line
    pub subject: String,
}

/// A message body, either whole or split at thread delimiters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Body {
    /// Body without any detected thread delimiter
    Single(String),

    /// Ordered, non-empty segments split at a thread delimiter.
    /// Segments share the parent message's metadata.
    Thread(Vec<String>),
}

impl Body {
    /// Number of text segments carried
    #[must_use]
    pub fn segment_count(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Thread(segments) => segments.len(),
        }
    }

    /// Whether no body text was recovered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(text) => text.is_empty(),
            Self::Thread(segments) => segments.iter().all(String::is_empty),
        }
    }
}

impl Default for Body {
    fn default() -> Self {
        Self::Single(String::new())
    }
}

/// Classification of a document attachment, driving extractor dispatch
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    /// Portable document payload
    Pdf,
    /// Word-processing document (OOXML package)
    WordProcessing,
    /// Slide presentation (OOXML package)
    SlideDeck,
    /// Spreadsheet workbook
    Spreadsheet,
}

impl fmt::Display for AttachmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pdf => "pdf",
            Self::WordProcessing => "wordprocessing",
            Self::SlideDeck => "slidedeck",
            Self::Spreadsheet => "spreadsheet",
        })
    }
}

/// Text extracted from one document attachment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedDocument {
    /// Display name the container recorded, empty when it omitted one
    pub filename: String,

    /// Extracted plain text; empty when the payload was unreadable
    pub content: String,
}

/// One parsed container level: metadata, body, extracted documents, and
/// recursively parsed embedded containers.
///
/// Trees are immutable after construction and owned by the caller of the
/// parse that produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedMessage {
    /// Header metadata, coerced to strings
    pub metadata: Metadata,

    /// Normalized body, split when a thread delimiter was detected
    pub body: Body,

    /// Extracted documents grouped by kind; a kind appears only when at
    /// least one document of that kind was recorded
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attachments_by_kind: BTreeMap<AttachmentKind, Vec<ExtractedDocument>>,

    /// Child containers, one per successfully parsed embedded message
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nested_messages: Vec<ParsedMessage>,
}

impl ParsedMessage {
    /// Total extracted documents across all kinds at this level
    #[must_use]
    pub fn document_count(&self) -> usize {
        self.attachments_by_kind.values().map(Vec::len).sum()
    }

    /// Documents recorded for one kind, if any
    #[must_use]
    pub fn documents(&self, kind: AttachmentKind) -> Option<&[ExtractedDocument]> {
        self.attachments_by_kind.get(&kind).map(Vec::as_slice)
    }

    /// Depth of the nested-message tree below this level; a message with no
    /// embedded containers has depth zero
    #[must_use]
    pub fn nesting_depth(&self) -> usize {
        self.nested_messages
            .iter()
            .map(Self::nesting_depth)
            .max()
            .map_or(0, |deepest| deepest + 1)
    }
}
