#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use yamlmodem::{
    CollectionStyle, DocumentEvent, EventQueue, EventRecorder, GeneratorError, GeneratorOptions,
    ParserOptions, ScalarStyle, StructureError, Token, YamlGenerator, YamlParser,
};

#[derive(Debug, Arbitrary)]
enum Style {
    Plain,
    SingleQuoted,
    DoubleQuoted,
    Literal,
    Folded,
    Unset,
}

impl Style {
    fn to_style(&self) -> Option<ScalarStyle> {
        match self {
            Self::Plain => Some(ScalarStyle::Plain),
            Self::SingleQuoted => Some(ScalarStyle::SingleQuoted),
            Self::DoubleQuoted => Some(ScalarStyle::DoubleQuoted),
            Self::Literal => Some(ScalarStyle::Literal),
            Self::Folded => Some(ScalarStyle::Folded),
            Self::Unset => None,
        }
    }
}

/// Loosely structured events; nothing guarantees they nest correctly.
#[derive(Debug, Arbitrary)]
enum FuzzEvent {
    StreamStart,
    StreamEnd,
    DocumentStart,
    DocumentEnd,
    MappingStart(Option<String>, Option<String>),
    MappingEnd,
    SequenceStart(Option<String>, Option<String>),
    SequenceEnd,
    Scalar(Option<String>, Option<String>, String, Style),
    Alias(String),
}

impl FuzzEvent {
    fn into_event(self) -> DocumentEvent {
        match self {
            Self::StreamStart => DocumentEvent::StreamStart,
            Self::StreamEnd => DocumentEvent::StreamEnd,
            Self::DocumentStart => DocumentEvent::DocumentStart { explicit: true },
            Self::DocumentEnd => DocumentEvent::DocumentEnd,
            Self::MappingStart(anchor, tag) => DocumentEvent::MappingStart {
                anchor,
                implicit: tag.is_none(),
                tag,
                style: CollectionStyle::Block,
            },
            Self::MappingEnd => DocumentEvent::MappingEnd,
            Self::SequenceStart(anchor, tag) => DocumentEvent::SequenceStart {
                anchor,
                implicit: tag.is_none(),
                tag,
                style: CollectionStyle::Flow,
            },
            Self::SequenceEnd => DocumentEvent::SequenceEnd,
            Self::Scalar(anchor, tag, value, style) => DocumentEvent::Scalar {
                anchor,
                implicit: tag.is_none(),
                tag,
                value,
                style: style.to_style(),
            },
            Self::Alias(anchor) => DocumentEvent::Alias { anchor },
        }
    }
}

#[derive(Debug, Arbitrary)]
struct Input {
    events: Vec<FuzzEvent>,
    decimal_floats: bool,
}

fn run(input: Input) {
    let queue = EventQueue::from_events(input.events.into_iter().map(FuzzEvent::into_event));
    let mut parser = YamlParser::new(
        queue,
        ParserOptions {
            decimal_floats: input.decimal_floats,
        },
    );

    // Every successfully parsed document must replay through the generator.
    loop {
        let mut tokens: Vec<Token> = Vec::new();
        let mut failed = false;
        for token in parser.by_ref() {
            match token {
                Ok(token) => tokens.push(token),
                Err(_) => {
                    failed = true;
                    break;
                }
            }
        }
        if failed || parser.is_closed() || tokens.is_empty() {
            break;
        }

        let mut sink = EventRecorder::new();
        let mut generator = YamlGenerator::new(&mut sink, GeneratorOptions::default()).unwrap();
        for token in &tokens {
            match generator.write_token(token) {
                Ok(()) => {}
                // several root scalars in one document are read but not written
                Err(GeneratorError::Structure(StructureError::SecondRootValue(_))) => break,
                Err(e) => panic!("replaying {token:?} failed: {e}"),
            }
        }
        generator.close().unwrap();
    }
}

fuzz_target!(|input: Input| run(input));
