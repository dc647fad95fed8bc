// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! Recursive Mail Container Extraction
//!
//! A modular, strongly-typed library that walks a mail container — its body,
//! document attachments, and arbitrarily nested embedded messages — into a
//! normalized text tree, and parses free-form analysis answers back into
//! named fields.
//!
//! # Features
//!
//! - Depth-bounded recursive walking of embedded mail containers
//! - Text extraction from pdf, wordprocessing, slidedeck, and spreadsheet
//!   attachments
//! - Body normalization and quoted-thread splitting
//! - Partial-failure isolation: one bad attachment never poisons its
//!   siblings or the parent message
//! - Resilient two-layout parsing of analysis answers into field maps
//!
//! # Example
//!
//! ```rust
//! use mailtree::{parse_container, AnalysisFieldSet};
//!
//! let raw = b"From: sender@example.com\r\nSubject: Quarterly numbers\r\n\r\nSee attached.";
//! let message = parse_container(raw).unwrap();
//!
//! assert_eq!(message.metadata.subject, "Quarterly numbers");
//! assert_eq!(message.metadata.from, "sender@example.com");
//!
//! let fields = AnalysisFieldSet::parse("Classification: None\nCategory: None");
//! assert_eq!(fields.get("classification"), Some("None"));
//! ```

mod analysis;
mod config;
mod error;
mod extractors;
mod normalize;
mod report;
mod types;
mod walker;

pub use analysis::{answer_text, AnalysisFieldSet};
pub use config::{FormatKind, WalkerConfig, DEFAULT_MAX_DEPTH, DEFAULT_THREAD_DELIMITER};
pub use error::{ParseError, Result};
pub use extractors::extract_document;
pub use normalize::{normalize_body, split_thread, strip_markup};
pub use report::{analysis_document, message_json, AnalysisReport, THREAD_SEPARATOR};
pub use types::*;
pub use walker::{parse_container, AttachmentEntry, ContainerWalker};
