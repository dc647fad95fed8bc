use mailtree::{message_json, parse_container, AttachmentKind, Body, ParsedMessage};

mod common;

const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[test]
fn test_serialized_tree_matches_output_schema() {
    let docx = common::docx_bytes(&["Memo text"]);
    let raw = common::mime_message("Schema", "plain body", &[("memo.docx", DOCX_MIME, &docx)]);
    let message = parse_container(&raw).unwrap();

    let value = message_json(&message).unwrap();

    let metadata = value.get("metadata").unwrap();
    for key in ["from", "to", "cc", "bcc", "date", "subject"] {
        assert!(metadata.get(key).unwrap().is_string(), "metadata.{key}");
    }

    assert!(value.get("body").unwrap().is_string());

    let buckets = value.get("attachments_by_kind").unwrap();
    let wordprocessing = buckets.get("wordprocessing").unwrap().as_array().unwrap();
    assert_eq!(
        wordprocessing[0].get("filename").unwrap().as_str(),
        Some("memo.docx")
    );
    assert_eq!(
        wordprocessing[0].get("content").unwrap().as_str(),
        Some("Memo text")
    );

    // Only kinds with recorded documents appear
    assert!(buckets.get("pdf").is_none());
    // An empty nesting list is omitted entirely
    assert!(value.get("nested_messages").is_none());
}

#[test]
fn test_thread_body_serializes_as_string_array() {
    let raw = common::mime_message("T", "Hi\n-----Original Message-----\nOlder text", &[]);
    let message = parse_container(&raw).unwrap();

    let value = message_json(&message).unwrap();

    let body = value.get("body").unwrap().as_array().unwrap();
    assert_eq!(body.len(), 2);
    assert_eq!(body[0].as_str(), Some("Hi"));
    assert_eq!(body[1].as_str(), Some("Older text"));
}

#[test]
fn test_parsed_tree_round_trips_through_json() {
    let inner = common::mime_message("Inner", "Nested body", &[]);
    let raw = common::mime_message("Outer", "Top body", &[("fwd.eml", "message/rfc822", &inner)]);
    let message = parse_container(&raw).unwrap();

    let value = message_json(&message).unwrap();
    let back: ParsedMessage = serde_json::from_value(value).unwrap();

    assert_eq!(back, message);
}

#[test]
fn test_body_helpers() {
    let single = Body::Single(String::new());
    assert!(single.is_empty());
    assert_eq!(single.segment_count(), 1);

    let thread = Body::Thread(vec!["a".to_string(), "b".to_string()]);
    assert!(!thread.is_empty());
    assert_eq!(thread.segment_count(), 2);
}

#[test]
fn test_attachment_kind_serializes_lowercase() {
    for (kind, name) in [
        (AttachmentKind::Pdf, "\"pdf\""),
        (AttachmentKind::WordProcessing, "\"wordprocessing\""),
        (AttachmentKind::SlideDeck, "\"slidedeck\""),
        (AttachmentKind::Spreadsheet, "\"spreadsheet\""),
    ] {
        assert_eq!(serde_json::to_string(&kind).unwrap(), name);
    }
}

#[test]
fn test_nesting_depth_counts_levels_below_root() {
    let leaf = ParsedMessage::default();
    assert_eq!(leaf.nesting_depth(), 0);

    let parent = ParsedMessage {
        nested_messages: vec![leaf],
        ..ParsedMessage::default()
    };
    assert_eq!(parent.nesting_depth(), 1);
}
