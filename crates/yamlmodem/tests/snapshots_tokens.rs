#![allow(missing_docs)]

mod common;

use common::{alias, anchored_mapping, document, transcript};
use yamlmodem::{CollectionStyle, DocumentEvent, EventQueue, ParserOptions, YamlParser};

fn parse(content: impl IntoIterator<Item = DocumentEvent>) -> String {
    let mut parser = YamlParser::new(document(content), ParserOptions::default());
    transcript(&mut parser)
}

#[test]
fn snapshot_simple_mapping() {
    let out = parse([
        DocumentEvent::mapping_start(),
        DocumentEvent::plain("name"),
        DocumentEvent::plain("Brad"),
        DocumentEvent::plain("age"),
        DocumentEvent::plain("39"),
        DocumentEvent::MappingEnd,
    ]);
    insta::assert_snapshot!(out, @r#"
    START_OBJECT
    FIELD_NAME "name"
    VALUE_STRING "Brad"
    FIELD_NAME "age"
    VALUE_NUMBER_INT "39" Int
    END_OBJECT
    <end>
    "#);
}

#[test]
fn snapshot_self_reference() {
    let out = parse([
        anchored_mapping("1"),
        DocumentEvent::plain("name"),
        DocumentEvent::plain("first"),
        DocumentEvent::plain("next"),
        alias("1"),
        DocumentEvent::MappingEnd,
    ]);
    insta::assert_snapshot!(out, @r#"
    START_OBJECT &1
    FIELD_NAME "name"
    VALUE_STRING "first"
    FIELD_NAME "next"
    VALUE_STRING "1" (alias)
    END_OBJECT
    <end>
    "#);
}

#[test]
fn snapshot_anchors_and_references() {
    let out = parse([
        DocumentEvent::mapping_start(),
        DocumentEvent::plain("parent"),
        anchored_mapping("id1"),
        DocumentEvent::plain("name"),
        DocumentEvent::plain("Bob"),
        DocumentEvent::MappingEnd,
        DocumentEvent::plain("child"),
        anchored_mapping("id2"),
        DocumentEvent::plain("name"),
        DocumentEvent::plain("Bill"),
        DocumentEvent::plain("parentRef"),
        alias("id1"),
        DocumentEvent::MappingEnd,
        DocumentEvent::MappingEnd,
    ]);
    insta::assert_snapshot!(out, @r#"
    START_OBJECT
    FIELD_NAME "parent"
    START_OBJECT &id1
    FIELD_NAME "name"
    VALUE_STRING "Bob"
    END_OBJECT
    FIELD_NAME "child"
    START_OBJECT &id2
    FIELD_NAME "name"
    VALUE_STRING "Bill"
    FIELD_NAME "parentRef"
    VALUE_STRING "id1" (alias)
    END_OBJECT
    END_OBJECT
    <end>
    "#);
}

#[test]
fn snapshot_scalar_typing() {
    let out = parse([
        DocumentEvent::mapping_start(),
        DocumentEvent::plain("num"),
        DocumentEvent::plain("+1_000.25"),
        DocumentEvent::plain("ip"),
        DocumentEvent::plain("10.12.45.127"),
        DocumentEvent::plain("text"),
        DocumentEvent::plain("foo:bar"),
        DocumentEvent::plain("big"),
        DocumentEvent::plain("9223372036854775808"),
        DocumentEvent::plain("flag"),
        DocumentEvent::plain("off"),
        DocumentEvent::plain("nothing"),
        DocumentEvent::plain("null"),
        DocumentEvent::MappingEnd,
    ]);
    insta::assert_snapshot!(out, @r#"
    START_OBJECT
    FIELD_NAME "num"
    VALUE_NUMBER_FLOAT "+1_000.25" Double
    FIELD_NAME "ip"
    VALUE_STRING "10.12.45.127"
    FIELD_NAME "text"
    VALUE_STRING "foo:bar"
    FIELD_NAME "big"
    VALUE_NUMBER_INT "9223372036854775808" BigInteger
    FIELD_NAME "flag"
    VALUE_FALSE
    FIELD_NAME "nothing"
    VALUE_NULL
    END_OBJECT
    <end>
    "#);
}

#[test]
fn snapshot_type_ids() {
    let out = parse([
        DocumentEvent::SequenceStart {
            anchor: None,
            tag: None,
            implicit: true,
            style: CollectionStyle::Flow,
        },
        DocumentEvent::MappingStart {
            anchor: None,
            tag: Some("!impl".into()),
            implicit: false,
            style: CollectionStyle::Block,
        },
        DocumentEvent::plain("a"),
        DocumentEvent::plain("13"),
        DocumentEvent::MappingEnd,
        DocumentEvent::MappingStart {
            anchor: Some("x".into()),
            tag: Some("!<other>".into()),
            implicit: false,
            style: CollectionStyle::Block,
        },
        DocumentEvent::MappingEnd,
        DocumentEvent::SequenceEnd,
    ]);
    insta::assert_snapshot!(out, @r#"
    START_ARRAY
    START_OBJECT !impl
    FIELD_NAME "a"
    VALUE_NUMBER_INT "13" Int
    END_OBJECT
    START_OBJECT &x !other
    END_OBJECT
    END_ARRAY
    <end>
    "#);
}

#[test]
fn snapshot_multiple_documents() {
    let source = EventQueue::from_events([
        DocumentEvent::StreamStart,
        DocumentEvent::DocumentStart { explicit: true },
        DocumentEvent::plain("1"),
        DocumentEvent::DocumentEnd,
        DocumentEvent::DocumentStart { explicit: true },
        DocumentEvent::sequence_start(),
        DocumentEvent::plain("x"),
        DocumentEvent::SequenceEnd,
        DocumentEvent::DocumentEnd,
        DocumentEvent::StreamEnd,
    ]);
    let mut parser = YamlParser::new(source, ParserOptions::default());
    let documents = [
        transcript(&mut parser),
        transcript(&mut parser),
        transcript(&mut parser),
    ];
    insta::assert_snapshot!(documents.join("\n---\n"), @r#"
    VALUE_NUMBER_INT "1" Int
    <end>
    ---
    START_ARRAY
    VALUE_STRING "x"
    END_ARRAY
    <end>
    ---
    <end>
    "#);
    assert!(parser.is_closed());
}
