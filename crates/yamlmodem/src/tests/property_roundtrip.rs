use alloc::vec::Vec;

use quickcheck::QuickCheck;

use super::arbitrary::Node;
use crate::{
    EventQueue, EventRecorder, GeneratorOptions, ParserOptions, Token, YamlGenerator, YamlParser,
    parse_float,
};

fn read(queue: EventQueue, decimal_floats: bool) -> Vec<Token> {
    YamlParser::new(queue, ParserOptions { decimal_floats })
        .map(Result::unwrap)
        .collect()
}

/// Finite floats read in decimal mode come back as decimal text of the same
/// value; everything else must match exactly.
#[allow(clippy::float_cmp)]
fn same_token(actual: &Token, expected: &Token, decimal_floats: bool) -> bool {
    match (actual, expected) {
        (Token::ValueNumberBigDecimal(text), Token::ValueNumberFloat(value))
            if decimal_floats && value.is_finite() =>
        {
            parse_float(text).is_ok_and(|parsed| parsed == *value)
        }
        _ => actual == expected,
    }
}

/// Property: writing a value through the generator and reading the recorded
/// events back through the parser yields the tokens of that value. Integers
/// come back at their narrowest width.
#[test]
fn generate_then_parse_roundtrip_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(node: Node, canonical: bool, decimal_floats: bool) -> bool {
        let mut sink = EventRecorder::new();
        {
            let options = GeneratorOptions {
                canonical_output: canonical,
                ..Default::default()
            };
            let mut generator = YamlGenerator::new(&mut sink, options).unwrap();
            node.write(&mut generator).unwrap();
            generator.close().unwrap();
        }

        let tokens = read(sink.to_queue(), decimal_floats);
        let expected = node.tokens();
        tokens.len() == expected.len()
            && tokens
                .iter()
                .zip(&expected)
                .all(|(actual, expected)| same_token(actual, expected, decimal_floats))
    }

    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(miri)]
    let tests = 10;

    QuickCheck::new()
        .tests(tests)
        .quickcheck(prop as fn(Node, bool, bool) -> bool);
}

/// Property: every token the parser yields, written back through the
/// generator, reads back as the same token. Without decimal floats the
/// rewritten events are identical too.
#[test]
fn parse_then_generate_roundtrip_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(node: Node, decimal_floats: bool) -> bool {
        let mut first = EventRecorder::new();
        {
            let mut generator = YamlGenerator::new(&mut first, GeneratorOptions::default()).unwrap();
            node.write(&mut generator).unwrap();
        }
        let tokens = read(first.to_queue(), decimal_floats);

        let mut second = EventRecorder::new();
        {
            let mut generator =
                YamlGenerator::new(&mut second, GeneratorOptions::default()).unwrap();
            for token in &tokens {
                generator.write_token(token).unwrap();
            }
        }

        if !decimal_floats && first.events() != second.events() {
            return false;
        }
        read(second.to_queue(), decimal_floats) == tokens
    }

    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 5_000 } else { 500 };
    #[cfg(miri)]
    let tests = 10;

    QuickCheck::new()
        .tests(tests)
        .quickcheck(prop as fn(Node, bool) -> bool);
}
