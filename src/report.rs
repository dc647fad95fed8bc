//! Result aggregation: flattened analysis documents and assembled reports
//!
//! The serialized [`ParsedMessage`] tree is itself the external output
//! schema; this module additionally flattens a tree level into the text
//! document handed to the analysis collaborator and assembles the
//! collaborator's answers back into a report tree.

use crate::analysis::{answer_text, AnalysisFieldSet};
use crate::types::{Body, Metadata, ParsedMessage};
use serde::{Deserialize, Serialize};

/// Banner joining thread segments in a flattened analysis document
pub const THREAD_SEPARATOR: &str = "----- Thread Separator -----";

/// Section label introducing one extracted document
const ATTACHMENT_LABEL: &str = "ATTACHMENT";

/// Flatten one container level into the text handed to the analysis
/// collaborator: body segments joined with the thread banner, then one
/// labeled section per extracted document in kind order.
///
/// Nested messages are not inlined; each level is analyzed on its own.
#[must_use]
pub fn analysis_document(message: &ParsedMessage) -> String {
    let mut document = match &message.body {
        Body::Single(text) => text.clone(),
        Body::Thread(segments) => segments.join(&format!("\n\n{THREAD_SEPARATOR}\n\n")),
    };

    for documents in message.attachments_by_kind.values() {
        for extracted in documents {
            document.push_str(&format!(
                "\n\n{ATTACHMENT_LABEL}: {}\n{}",
                extracted.filename, extracted.content
            ));
        }
    }
    document
}

/// Serialize a parsed tree into the external output schema
pub fn message_json(message: &ParsedMessage) -> serde_json::Result<serde_json::Value> {
    serde_json::to_value(message)
}

/// Assembled analysis for one container level and its nested messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Metadata of the analyzed level
    pub metadata: Metadata,

    /// Parsed fields from the collaborator's answer for this level
    pub analysis: AnalysisFieldSet,

    /// Reports for embedded containers, one per nested message
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nested_reports: Vec<AnalysisReport>,
}

impl AnalysisReport {
    /// Assemble a report tree by handing each level's flattened document to
    /// the analysis collaborator.
    ///
    /// The collaborator is a black box: any `FnMut(&str) -> String` that
    /// turns a document into an answer (bare text or a JSON `answer`
    /// envelope).
    pub fn assemble<F>(message: &ParsedMessage, analyze: &mut F) -> Self
    where
        F: FnMut(&str) -> String,
    {
        let document = analysis_document(message);
        let answer = answer_text(&analyze(&document));
        let analysis = AnalysisFieldSet::parse(&answer);

        let nested_reports = message
            .nested_messages
            .iter()
            .map(|nested| Self::assemble(nested, analyze))
            .collect();

        Self {
            metadata: message.metadata.clone(),
            analysis,
            nested_reports,
        }
    }
}
