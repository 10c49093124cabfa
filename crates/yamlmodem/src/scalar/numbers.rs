//! Numeric literal matching and realization.
//!
//! Matching only classifies a literal; the value is realized later, and only
//! when somebody asks for it.

use alloc::{
    borrow::Cow,
    string::{String, ToString},
};
use core::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::{BigInt, Sign};

use crate::{error::ValueError, token::NumberType};

/// Lexical hint distinguishing integer from float literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberLexeme<'a> {
    Integer(&'a str), // optional '-', digits only
    Float(&'a str),   // has '.'
}

/// Classifies `text` as an integer or float literal, or neither.
///
/// Integers are an optional `-` followed by ASCII digits. Floats are an
/// optional sign, optional integer digits (underscores allowed after the first
/// digit), a mandatory `.`, optional fraction digits and an optional exponent
/// whose sign is mandatory. At least one mantissa digit is required.
#[must_use]
pub fn lex_number(text: &str) -> Option<NumberLexeme<'_>> {
    if is_integer_literal(text) {
        Some(NumberLexeme::Integer(text))
    } else if is_float_literal(text) {
        Some(NumberLexeme::Float(text))
    } else {
        None
    }
}

fn is_integer_literal(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn is_float_literal(text: &str) -> bool {
    let bytes = text.as_bytes();
    let len = bytes.len();
    let mut i = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let mut mantissa_digits = 0usize;

    if i < len && bytes[i].is_ascii_digit() {
        while i < len && (bytes[i].is_ascii_digit() || bytes[i] == b'_') {
            if bytes[i] != b'_' {
                mantissa_digits += 1;
            }
            i += 1;
        }
    }

    if i >= len || bytes[i] != b'.' {
        return false;
    }
    i += 1;

    while i < len && bytes[i].is_ascii_digit() {
        mantissa_digits += 1;
        i += 1;
    }
    if mantissa_digits == 0 {
        return false;
    }
    if i == len {
        return true;
    }

    if !matches!(bytes[i], b'e' | b'E') {
        return false;
    }
    i += 1;
    if i >= len || !matches!(bytes[i], b'+' | b'-') {
        return false;
    }
    i += 1;
    let exponent_start = i;
    while i < len && bytes[i].is_ascii_digit() {
        i += 1;
    }
    i == len && i > exponent_start
}

/// An integer realized at the narrowest width that holds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegerValue {
    Int(i32),
    Long(i64),
    Big(BigInt),
}

impl IntegerValue {
    #[must_use]
    pub fn number_type(&self) -> NumberType {
        match self {
            Self::Int(_) => NumberType::Int,
            Self::Long(_) => NumberType::Long,
            Self::Big(_) => NumberType::BigInteger,
        }
    }

    fn narrow(value: i64) -> Self {
        i32::try_from(value).map_or(Self::Long(value), Self::Int)
    }

    /// The value as an `i64`, when it fits.
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(i64::from(*v)),
            Self::Long(v) => Some(*v),
            Self::Big(v) => i64::try_from(v).ok(),
        }
    }

    #[must_use]
    pub fn to_big(&self) -> BigInt {
        match self {
            Self::Int(v) => BigInt::from(*v),
            Self::Long(v) => BigInt::from(*v),
            Self::Big(v) => v.clone(),
        }
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_f64(&self) -> f64 {
        match self {
            Self::Int(v) => f64::from(*v),
            Self::Long(v) => *v as f64,
            // BigInt -> f64 saturates to infinity; go through the literal.
            Self::Big(v) => f64::from_str(&v.to_string()).unwrap_or(f64::NAN),
        }
    }
}

fn strip_underscores(literal: &str) -> Cow<'_, str> {
    if literal.contains('_') {
        Cow::Owned(literal.chars().filter(|&c| c != '_').collect::<String>())
    } else {
        Cow::Borrowed(literal)
    }
}

/// Realizes an integer literal, escalating from `i32` to `i64` to
/// arbitrary precision. Big values are parsed from the literal directly and
/// never pass through a float.
///
/// # Errors
///
/// Returns [`ValueError::MalformedNumber`] when the literal is not an integer.
pub fn parse_integer(literal: &str) -> Result<IntegerValue, ValueError> {
    let cleaned = strip_underscores(literal);
    let text: &str = &cleaned;
    let digits = text.strip_prefix(['-', '+']).unwrap_or(text).len();

    // Digit-count shortcut: up to 9 digits always fit an i32, up to 18 an i64.
    if digits <= 9 {
        return i32::from_str(text)
            .map(IntegerValue::Int)
            .map_err(|e| ValueError::malformed(literal, e));
    }
    if digits <= 19 {
        if let Ok(value) = i64::from_str(text) {
            return Ok(IntegerValue::narrow(value));
        }
    }
    let big = BigInt::from_str(text).map_err(|e| ValueError::malformed(literal, e))?;
    Ok(match i64::try_from(&big) {
        Ok(value) => IntegerValue::narrow(value),
        Err(_) => IntegerValue::Big(big),
    })
}

pub(crate) fn special_float(text: &str) -> Option<f64> {
    let (negative, body) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    match body {
        ".inf" | ".Inf" | ".INF" => Some(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        }),
        ".nan" | ".NaN" | ".NAN" if text == body => Some(f64::NAN),
        _ => None,
    }
}

/// Realizes a float literal as `f64`. Underscores are dropped, a leading `+`
/// is kept. The `.inf`/`.nan` spellings are accepted here so explicitly tagged
/// values can be read; implicit typing never classifies them as floats.
///
/// # Errors
///
/// Returns [`ValueError::MalformedNumber`] when the literal is not a float.
pub fn parse_float(literal: &str) -> Result<f64, ValueError> {
    if let Some(value) = special_float(literal) {
        return Ok(value);
    }
    let cleaned = strip_underscores(literal);
    f64::from_str(&cleaned).map_err(|e| ValueError::malformed(literal, e))
}

/// Realizes a float (or integer) literal at arbitrary decimal precision.
///
/// # Errors
///
/// Returns [`ValueError::MalformedNumber`] when the literal is not a number.
pub fn parse_decimal(literal: &str) -> Result<BigDecimal, ValueError> {
    let cleaned = strip_underscores(literal);
    let (sign, body) = match cleaned.as_bytes().first() {
        Some(b'-') => ("-", &cleaned[1..]),
        Some(b'+') => ("", &cleaned[1..]),
        _ => ("", &cleaned[..]),
    };
    // `.5` and `5.` are valid literals but not valid decimal syntax.
    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(at) => body.split_at(at),
        None => (body, ""),
    };
    let mut normalized = String::with_capacity(cleaned.len() + 2);
    normalized.push_str(sign);
    if mantissa.starts_with('.') {
        normalized.push('0');
    }
    normalized.push_str(mantissa);
    if mantissa.ends_with('.') {
        normalized.push('0');
    }
    normalized.push_str(exponent);

    BigDecimal::from_str(&normalized).map_err(|e| ValueError::malformed(literal, e))
}

/// Renders a float so that it reads back as a float: a `.` is always present
/// and exponents carry an explicit sign. Non-finite values use the YAML
/// spellings.
#[must_use]
pub fn float_literal(value: f64) -> String {
    if value.is_nan() {
        return String::from(".nan");
    }
    if value.is_infinite() {
        return String::from(if value > 0.0 { ".inf" } else { "-.inf" });
    }
    normalize_float_text(&alloc::format!("{value:?}"))
}

/// Same as [`float_literal`], for `f32`.
#[must_use]
pub fn f32_literal(value: f32) -> String {
    if value.is_nan() {
        return String::from(".nan");
    }
    if value.is_infinite() {
        return String::from(if value > 0.0 { ".inf" } else { "-.inf" });
    }
    normalize_float_text(&alloc::format!("{value:?}"))
}

/// Renders a decimal as a float literal in one canonical form: trailing
/// zeros are dropped, and values below `1e-4` or from `1e16` up use a single
/// leading digit and a signed exponent. Equal values always render the same,
/// whatever scale they were parsed with.
#[must_use]
pub fn decimal_literal(value: &BigDecimal) -> String {
    let (unscaled, scale) = value.normalized().into_bigint_and_exponent();
    let (negative, digits) = match unscaled.sign() {
        Sign::NoSign => return String::from("0.0"),
        Sign::Minus => (true, unscaled.magnitude().to_str_radix(10)),
        Sign::Plus => (false, unscaled.magnitude().to_str_radix(10)),
    };
    let len = i64::try_from(digits.len()).unwrap_or(i64::MAX);
    let exponent = len - 1 - scale;

    let mut out = String::with_capacity(digits.len() + 8);
    if negative {
        out.push('-');
    }
    if (-4..16).contains(&exponent) {
        if scale <= 0 {
            out.push_str(&digits);
            out.extend(core::iter::repeat_n('0', usize::try_from(-scale).unwrap_or(0)));
            out.push_str(".0");
        } else if scale >= len {
            out.push_str("0.");
            out.extend(core::iter::repeat_n('0', usize::try_from(scale - len).unwrap_or(0)));
            out.push_str(&digits);
        } else {
            let (int_part, fraction) = digits.split_at(usize::try_from(len - scale).unwrap_or(0));
            out.push_str(int_part);
            out.push('.');
            out.push_str(fraction);
        }
    } else {
        let (lead, rest) = digits.split_at(1);
        out.push_str(lead);
        out.push('.');
        out.push_str(if rest.is_empty() { "0" } else { rest });
        out.push('e');
        out.push(if exponent < 0 { '-' } else { '+' });
        out.push_str(&exponent.unsigned_abs().to_string());
    }
    out
}

/// Forces an already formatted number into float literal shape.
#[must_use]
pub fn normalize_float_text(text: &str) -> String {
    let (mantissa, exponent) = match text.find(['e', 'E']) {
        Some(at) => (&text[..at], &text[at + 1..]),
        None => (text, ""),
    };
    let mut out = String::with_capacity(text.len() + 3);
    out.push_str(mantissa);
    if !mantissa.contains('.') {
        out.push_str(".0");
    }
    if !exponent.is_empty() {
        out.push('e');
        if !exponent.starts_with(['+', '-']) {
            out.push('+');
        }
        out.push_str(exponent);
    }
    out
}
