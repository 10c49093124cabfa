#![allow(missing_docs, dead_code)]

use core::fmt::{Debug, Write};

use yamlmodem::{DocumentEvent, EventQueue, EventSource, TokenKind, YamlParser};

/// Wraps content events in a single implicit document.
pub fn document(content: impl IntoIterator<Item = DocumentEvent>) -> EventQueue {
    let mut events = vec![
        DocumentEvent::StreamStart,
        DocumentEvent::DocumentStart { explicit: false },
    ];
    events.extend(content);
    events.extend([DocumentEvent::DocumentEnd, DocumentEvent::StreamEnd]);
    EventQueue::from_events(events)
}

pub fn anchored_mapping(anchor: &str) -> DocumentEvent {
    DocumentEvent::MappingStart {
        anchor: Some(anchor.into()),
        tag: None,
        implicit: true,
        style: yamlmodem::CollectionStyle::Block,
    }
}

pub fn alias(anchor: &str) -> DocumentEvent {
    DocumentEvent::Alias {
        anchor: anchor.into(),
    }
}

/// Renders tokens up to the end of the current document, one per line.
pub fn transcript<S>(parser: &mut YamlParser<S>) -> String
where
    S: EventSource,
    S::Error: Debug,
{
    let mut lines = Vec::new();
    while let Some(kind) = parser.next_token().expect("parse error") {
        let mut line = kind.to_string();
        if kind.as_str().is_none() {
            write!(line, " {:?}", parser.text().unwrap_or_default()).unwrap();
        }
        if let Some(anchor) = parser.current_anchor() {
            write!(line, " &{anchor}").unwrap();
        }
        if let Some(type_id) = parser.type_id() {
            write!(line, " !{type_id}").unwrap();
        }
        if parser.is_current_alias() {
            line.push_str(" (alias)");
        }
        if kind == TokenKind::ValueNumberInt || kind == TokenKind::ValueNumberFloat {
            write!(line, " {:?}", parser.number_type().expect("number")).unwrap();
        }
        lines.push(line);
    }
    lines.push(String::from("<end>"));
    lines.join("\n")
}

/// Renders events with their node metadata, one per line.
pub fn render_events(events: &[DocumentEvent]) -> String {
    let lines: Vec<String> = events
        .iter()
        .map(|event| match event {
            DocumentEvent::Scalar {
                anchor,
                tag,
                value,
                style,
                ..
            } => format!("scalar {value:?} style={style:?}{}", metadata(anchor, tag)),
            DocumentEvent::MappingStart {
                anchor, tag, style, ..
            } => format!("mapping-start {style:?}{}", metadata(anchor, tag)),
            DocumentEvent::SequenceStart {
                anchor, tag, style, ..
            } => format!("sequence-start {style:?}{}", metadata(anchor, tag)),
            DocumentEvent::DocumentStart { explicit } => format!("document-start explicit={explicit}"),
            other => other.to_string(),
        })
        .collect();
    lines.join("\n")
}

fn metadata(anchor: &Option<String>, tag: &Option<String>) -> String {
    let mut out = String::new();
    if let Some(anchor) = anchor {
        write!(out, " &{anchor}").unwrap();
    }
    if let Some(tag) = tag {
        write!(out, " {tag}").unwrap();
    }
    out
}
