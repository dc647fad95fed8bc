//! Body normalization, markup stripping, and thread splitting

use crate::types::Body;
use regex::Regex;
use std::sync::LazyLock;

static HORIZONTAL_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+").unwrap());

static BLANK_LINE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n").unwrap());

/// Normalize a message body:
///
/// - convert CRLF/CR line endings to LF
/// - collapse runs of spaces and tabs to a single space
/// - collapse runs of blank lines to exactly one blank line
/// - trim leading and trailing whitespace
///
/// Idempotent: applying it twice yields the same result as once.
#[must_use]
pub fn normalize_body(body: &str) -> String {
    let unified = body.replace("\r\n", "\n").replace('\r', "\n");
    let collapsed = HORIZONTAL_WHITESPACE.replace_all(&unified, " ");
    let collapsed = BLANK_LINE_RUN.replace_all(&collapsed, "\n\n");
    collapsed.trim().to_string()
}

/// Split a normalized body at every occurrence of a literal thread
/// delimiter, trimming each segment and discarding empty ones.
///
/// A body without the delimiter comes back unchanged as
/// [`Body::Single`]. A body consisting only of delimiters and whitespace
/// has no recoverable segments and collapses to an empty single body.
#[must_use]
pub fn split_thread(body: &str, delimiter: &str) -> Body {
    if delimiter.is_empty() || !body.contains(delimiter) {
        return Body::Single(body.to_string());
    }

    let segments: Vec<String> = body
        .split(delimiter)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(ToString::to_string)
        .collect();

    if segments.is_empty() {
        return Body::Single(String::new());
    }
    Body::Thread(segments)
}

/// Best-effort markup-to-text conversion for bodies that only carry HTML.
///
/// Tags are dropped, block-level closers become line breaks, script and
/// style content is suppressed, and common entities are decoded.
#[must_use]
pub fn strip_markup(html: &str) -> String {
    let chars: Vec<char> = html.chars().collect();
    let lower: Vec<char> = html.to_lowercase().chars().collect();

    let mut text = String::new();
    let mut in_tag = false;
    let mut in_script = false;
    let mut in_style = false;
    let mut tag_start = 0usize;

    let mut i = 0;
    while i < chars.len() {
        if !in_tag && chars[i] == '<' {
            tag_start = i;
            let remaining: String = lower[i..].iter().collect();
            if remaining.starts_with("<script") {
                in_script = true;
            } else if remaining.starts_with("<style") {
                in_style = true;
            } else if remaining.starts_with("</script") {
                in_script = false;
            } else if remaining.starts_with("</style") {
                in_style = false;
            }
            in_tag = true;
        } else if in_tag && chars[i] == '>' {
            in_tag = false;
            // Line break after block elements
            let tag: String = lower[tag_start + 1..i].iter().collect();
            if tag.starts_with("br")
                || tag.starts_with("/p")
                || tag.starts_with("/div")
                || tag.starts_with("/li")
                || tag.starts_with("/tr")
                || tag.starts_with("/h")
            {
                text.push('\n');
            }
        } else if !in_tag && !in_script && !in_style {
            text.push(chars[i]);
        }
        i += 1;
    }

    // Decode common entities
    let decoded = text
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");

    decoded
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
