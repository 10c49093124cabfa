//! Implicit and explicit typing of scalar nodes.
//!
//! The resolver only classifies. Numeric values are realized separately with
//! [`parse_integer`], [`parse_float`] and [`parse_decimal`], so callers that
//! only want the literal text never pay for number parsing.
//!
//! The plain-scalar boolean vocabulary is deliberately narrow: single-letter
//! `y`/`n`, and `yes`/`no`/`on`/`off`/`true`/`false` in any case. Other YAML 1.1
//! spellings stay strings.

mod numbers;

pub(crate) use numbers::special_float;
pub use numbers::{
    IntegerValue, NumberLexeme, decimal_literal, f32_literal, float_literal, lex_number,
    normalize_float_text, parse_decimal, parse_float, parse_integer,
};

use crate::{event::ScalarStyle, token::TokenKind};

/// Classification of a scalar node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Integer,
    Float,
    String,
}

impl Scalar {
    #[must_use]
    pub fn token_kind(self) -> TokenKind {
        match self {
            Self::Null => TokenKind::ValueNull,
            Self::Bool(true) => TokenKind::ValueTrue,
            Self::Bool(false) => TokenKind::ValueFalse,
            Self::Integer => TokenKind::ValueNumberInt,
            Self::Float => TokenKind::ValueNumberFloat,
            Self::String => TokenKind::ValueString,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CoreTag {
    Null,
    Bool,
    Int,
    Float,
    Str,
}

const CORE_TAG_PREFIX: &str = "tag:yaml.org,2002:";

/// Full form of the core `float` tag.
pub const FLOAT_TAG: &str = "tag:yaml.org,2002:float";

impl CoreTag {
    fn from_tag(tag: &str) -> Option<Self> {
        let name = tag
            .strip_prefix(CORE_TAG_PREFIX)
            .or_else(|| tag.strip_prefix("!!"))?;
        match name {
            "null" => Some(Self::Null),
            "bool" => Some(Self::Bool),
            "int" => Some(Self::Int),
            "float" => Some(Self::Float),
            "str" => Some(Self::Str),
            _ => None,
        }
    }
}

/// Decides the type of a scalar from its text, explicit tag and style.
///
/// A core tag (`!!null`, `!!bool`, `!!int`, `!!float`, `!!str`, or the full
/// `tag:yaml.org,2002:` form) wins over the text. Without one, only plain
/// scalars are typed implicitly; quoted and block scalars are strings. A
/// missing style counts as plain.
///
/// ```rust
/// use yamlmodem::{Scalar, ScalarStyle, resolve};
///
/// assert_eq!(resolve("TRUE", None, Some(ScalarStyle::Plain)), Scalar::Bool(true));
/// assert_eq!(resolve("true", None, Some(ScalarStyle::DoubleQuoted)), Scalar::String);
/// assert_eq!(resolve("10.12.45.127", None, None), Scalar::String);
/// ```
#[must_use]
pub fn resolve(text: &str, explicit_tag: Option<&str>, style: Option<ScalarStyle>) -> Scalar {
    if let Some(tag) = explicit_tag.and_then(CoreTag::from_tag) {
        return match tag {
            CoreTag::Null if text == "null" => Scalar::Null,
            CoreTag::Bool => match_bool(text).map_or(Scalar::String, Scalar::Bool),
            CoreTag::Int => Scalar::Integer,
            CoreTag::Float => Scalar::Float,
            CoreTag::Null | CoreTag::Str => Scalar::String,
        };
    }
    match style {
        None | Some(ScalarStyle::Plain) => resolve_plain(text),
        Some(_) => Scalar::String,
    }
}

fn resolve_plain(text: &str) -> Scalar {
    if text == "null" {
        return Scalar::Null;
    }
    if let Some(b'0'..=b'9' | b'+' | b'-' | b'.') = text.as_bytes().first() {
        if text == "0" {
            return Scalar::Integer;
        }
        // Anything numeric-looking that fails both patterns is text, e.g. an
        // IP address.
        return match lex_number(text) {
            Some(NumberLexeme::Integer(_)) => Scalar::Integer,
            Some(NumberLexeme::Float(_)) => Scalar::Float,
            None => Scalar::String,
        };
    }
    match_bool(text).map_or(Scalar::String, Scalar::Bool)
}

/// Matches the plain-scalar boolean table, bucketed by length.
#[must_use]
pub fn match_bool(text: &str) -> Option<bool> {
    match text.len() {
        1 => match text {
            "y" | "Y" => Some(true),
            "n" | "N" => Some(false),
            _ => None,
        },
        2 => {
            if text.eq_ignore_ascii_case("no") {
                Some(false)
            } else if text.eq_ignore_ascii_case("on") {
                Some(true)
            } else {
                None
            }
        }
        3 => {
            if text.eq_ignore_ascii_case("yes") {
                Some(true)
            } else if text.eq_ignore_ascii_case("off") {
                Some(false)
            } else {
                None
            }
        }
        4 => text.eq_ignore_ascii_case("true").then_some(true),
        5 => text.eq_ignore_ascii_case("false").then_some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    const PLAIN: Option<ScalarStyle> = Some(ScalarStyle::Plain);

    #[rstest]
    #[case("true", Scalar::Bool(true))]
    #[case("TRUE", Scalar::Bool(true))]
    #[case("False", Scalar::Bool(false))]
    #[case("y", Scalar::Bool(true))]
    #[case("N", Scalar::Bool(false))]
    #[case("oN", Scalar::Bool(true))]
    #[case("OFF", Scalar::Bool(false))]
    #[case("Yes", Scalar::Bool(true))]
    #[case("no", Scalar::Bool(false))]
    #[case("null", Scalar::Null)]
    #[case("0", Scalar::Integer)]
    #[case("39", Scalar::Integer)]
    #[case("-17", Scalar::Integer)]
    #[case("1.25", Scalar::Float)]
    #[case("+1_000.25", Scalar::Float)]
    #[case("10.12.45.127", Scalar::String)]
    #[case("+5", Scalar::String)]
    #[case("1_000", Scalar::String)]
    #[case("foo:bar", Scalar::String)]
    #[case("Null", Scalar::String)]
    #[case("~", Scalar::String)]
    #[case("", Scalar::String)]
    #[case("yess", Scalar::String)]
    #[case("nope", Scalar::String)]
    fn plain_scalars(#[case] text: &str, #[case] expected: Scalar) {
        assert_eq!(resolve(text, None, PLAIN), expected, "{text:?}");
    }

    #[rstest]
    #[case(ScalarStyle::SingleQuoted)]
    #[case(ScalarStyle::DoubleQuoted)]
    #[case(ScalarStyle::Literal)]
    #[case(ScalarStyle::Folded)]
    fn styled_scalars_are_strings(#[case] style: ScalarStyle) {
        for text in ["true", "null", "39", "1.25"] {
            assert_eq!(resolve(text, None, Some(style)), Scalar::String, "{text:?}");
        }
    }

    #[test]
    fn missing_style_counts_as_plain() {
        assert_eq!(resolve("39", None, None), Scalar::Integer);
    }

    #[rstest]
    #[case("tag:yaml.org,2002:int", "0x1F", Scalar::Integer)]
    #[case("!!int", "42", Scalar::Integer)]
    #[case("!!float", "1", Scalar::Float)]
    #[case("!!float", ".inf", Scalar::Float)]
    #[case("!!bool", "yes", Scalar::Bool(true))]
    #[case("!!bool", "maybe", Scalar::String)]
    #[case("!!null", "null", Scalar::Null)]
    #[case("!!null", "nil", Scalar::String)]
    #[case("!!str", "123", Scalar::String)]
    #[case("!impl", "123", Scalar::Integer)]
    fn explicit_tags(#[case] tag: &str, #[case] text: &str, #[case] expected: Scalar) {
        assert_eq!(resolve(text, Some(tag), PLAIN), expected);
    }

    #[test]
    fn core_tag_overrides_quoting() {
        assert_eq!(
            resolve("12", Some("!!int"), Some(ScalarStyle::DoubleQuoted)),
            Scalar::Integer
        );
    }
}
