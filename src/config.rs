//! Walker configuration
//!
//! Everything the walker's behavior depends on — recursion bound, thread
//! delimiter, recognized format kinds — travels in an explicit config object
//! handed to [`crate::ContainerWalker`] at construction.

use crate::types::AttachmentKind;
use std::collections::BTreeMap;
use std::path::Path;

/// Default bound on nested-container recursion depth
pub const DEFAULT_MAX_DEPTH: usize = 25;

/// Default delimiter marking the start of a quoted prior message in a body
pub const DEFAULT_THREAD_DELIMITER: &str = "-----Original Message-----";

/// How a recognized filename extension is handled by the walker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatKind {
    /// A document attachment, dispatched to the extractor for the kind
    Document(AttachmentKind),

    /// An embedded mail container, parsed recursively
    Container,
}

/// Configuration for a [`crate::ContainerWalker`]
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Maximum nesting depth for embedded containers; branches beyond it are
    /// dropped, never the whole parse
    pub max_depth: usize,

    /// Literal delimiter handed to the thread splitter
    pub thread_delimiter: String,

    /// Lowercase filename extension to format kind; extensions absent from
    /// the map are silently skipped
    pub format_map: BTreeMap<String, FormatKind>,
}

impl WalkerConfig {
    /// Replace the recursion depth bound
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Replace the thread delimiter
    #[must_use]
    pub fn with_thread_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.thread_delimiter = delimiter.into();
        self
    }

    /// Route an additional filename extension (case-insensitive) to a kind
    #[must_use]
    pub fn with_format(mut self, extension: &str, kind: FormatKind) -> Self {
        self.format_map.insert(extension.to_ascii_lowercase(), kind);
        self
    }

    /// Classify a display name by its extension, case-insensitively.
    /// Names without a recognized extension yield `None`.
    #[must_use]
    pub fn classify(&self, filename: &str) -> Option<FormatKind> {
        let extension = Path::new(filename)
            .extension()?
            .to_str()?
            .to_ascii_lowercase();
        self.format_map.get(&extension).copied()
    }
}

impl Default for WalkerConfig {
    fn default() -> Self {
        let mut format_map = BTreeMap::new();
        format_map.insert("pdf".to_string(), FormatKind::Document(AttachmentKind::Pdf));
        format_map.insert(
            "docx".to_string(),
            FormatKind::Document(AttachmentKind::WordProcessing),
        );
        format_map.insert(
            "pptx".to_string(),
            FormatKind::Document(AttachmentKind::SlideDeck),
        );
        format_map.insert(
            "xlsx".to_string(),
            FormatKind::Document(AttachmentKind::Spreadsheet),
        );
        format_map.insert(
            "xls".to_string(),
            FormatKind::Document(AttachmentKind::Spreadsheet),
        );
        format_map.insert("eml".to_string(), FormatKind::Container);

        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            thread_delimiter: DEFAULT_THREAD_DELIMITER.to_string(),
            format_map,
        }
    }
}
