//! Structured field parsing for analysis answers
//!
//! The analysis collaborator returns variably-formatted text. Two grammar
//! layouts are tried in priority order and the first one producing any
//! fields commits — partial results from different layouts are never merged.

use crate::error::ParseError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;
use tracing::debug;

/// Anchor opening a numbered unit: an integer, a period, then whitespace
static NUMBERED_ANCHOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+\.\s").unwrap());

/// Label and value within one numbered unit
static UNIT_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^\s*([\w\s]+):\s*(.*)").unwrap());

/// A plain-layout unit opener: a line beginning with a label and a colon
static LINE_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([\w\s]+):\s*(.*)$").unwrap());

type GrammarStrategy = fn(&str) -> BTreeMap<String, String>;

/// Grammar strategies in priority order; the first non-empty result commits
const STRATEGIES: &[(&str, GrammarStrategy)] =
    &[("numbered", numbered_layout), ("plain", plain_layout)];

/// Named fields recovered from one analysis answer.
///
/// Field names are normalized (trimmed, lowercased, spaces replaced with
/// underscores); the verbatim source text is retained for audit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisFieldSet {
    /// Normalized field name to trimmed value
    pub fields: BTreeMap<String, String>,

    /// Verbatim answer text the fields were derived from
    pub raw: String,
}

impl AnalysisFieldSet {
    /// Parse an analysis answer into named fields.
    ///
    /// Never fails: an answer without recognizable structure yields an empty
    /// field map.
    ///
    /// The value boundary rule is deliberately syntactic — the next unit
    /// anchor or end of text — so values containing colons or numbered list
    /// references can mis-terminate a field. That trade-off is applied
    /// deterministically rather than guessed around.
    #[must_use]
    pub fn parse(answer: &str) -> Self {
        for (layout, strategy) in STRATEGIES {
            let fields = strategy(answer);
            if !fields.is_empty() {
                debug!("Parsed {} analysis fields via {layout} layout", fields.len());
                return Self {
                    fields,
                    raw: answer.to_string(),
                };
            }
        }
        debug!("{}", ParseError::AnalysisLayout);
        Self {
            fields: BTreeMap::new(),
            raw: answer.to_string(),
        }
    }

    /// Value for a normalized field name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Whether no fields were recovered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of recovered fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

/// Unwrap the collaborator's optional JSON envelope.
///
/// A JSON object response yields its `answer` string (or empty text when the
/// object carries none); anything else passes through verbatim.
#[must_use]
pub fn answer_text(response: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(response) {
        Ok(serde_json::Value::Object(envelope)) => envelope
            .get("answer")
            .and_then(serde_json::Value::as_str)
            .map(ToString::to_string)
            .unwrap_or_default(),
        _ => response.to_string(),
    }
}

/// Numbered layout: `1. Label: value 2. Label: value ...`
///
/// A unit's value extends to the next anchor or end of text. A malformed
/// unit contributes nothing, and one matching unit commits the layout.
fn numbered_layout(answer: &str) -> BTreeMap<String, String> {
    let anchors: Vec<regex::Match> = NUMBERED_ANCHOR.find_iter(answer).collect();

    let mut fields = BTreeMap::new();
    for (index, anchor) in anchors.iter().enumerate() {
        let end = anchors
            .get(index + 1)
            .map_or(answer.len(), regex::Match::start);
        let unit = &answer[anchor.end()..end];
        if let Some(captures) = UNIT_FIELD.captures(unit) {
            fields.insert(normalize_label(&captures[1]), captures[2].trim().to_string());
        }
    }
    fields
}

/// Plain layout: `Label: value` units separated by line breaks, a value
/// running through subsequent lines until the next label line
fn plain_layout(answer: &str) -> BTreeMap<String, String> {
    let mut fields = BTreeMap::new();
    let mut current: Option<(String, String)> = None;

    for line in answer.lines() {
        if let Some(captures) = LINE_FIELD.captures(line) {
            if let Some((label, value)) = current.take() {
                fields.insert(label, value.trim().to_string());
            }
            current = Some((normalize_label(&captures[1]), captures[2].to_string()));
        } else if let Some((_, value)) = &mut current {
            value.push('\n');
            value.push_str(line);
        }
    }
    if let Some((label, value)) = current {
        fields.insert(label, value.trim().to_string());
    }
    fields
}

/// Normalize a field label: trim, lowercase, spaces to underscores
fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase().replace(' ', "_")
}
