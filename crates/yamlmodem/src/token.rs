use alloc::string::String;
use core::fmt;

/// A token of the structured token stream, with its value materialized.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Token {
    StartObject,
    EndObject,
    StartArray,
    EndArray,
    FieldName(String),
    ValueString(String),
    ValueNull,
    ValueBool(bool),
    ValueNumberInt(i32),
    ValueNumberLong(i64),
    /// Integer too large for `i64`, as its decimal literal.
    ValueNumberBigInt(String),
    ValueNumberFloat(f64),
    /// Floating point value kept at full precision, as its decimal literal.
    ValueNumberBigDecimal(String),
}

impl Token {
    #[must_use]
    pub fn kind(&self) -> TokenKind {
        match self {
            Self::StartObject => TokenKind::StartObject,
            Self::EndObject => TokenKind::EndObject,
            Self::StartArray => TokenKind::StartArray,
            Self::EndArray => TokenKind::EndArray,
            Self::FieldName(_) => TokenKind::FieldName,
            Self::ValueString(_) => TokenKind::ValueString,
            Self::ValueNull => TokenKind::ValueNull,
            Self::ValueBool(true) => TokenKind::ValueTrue,
            Self::ValueBool(false) => TokenKind::ValueFalse,
            Self::ValueNumberInt(_) | Self::ValueNumberLong(_) | Self::ValueNumberBigInt(_) => {
                TokenKind::ValueNumberInt
            }
            Self::ValueNumberFloat(_) | Self::ValueNumberBigDecimal(_) => {
                TokenKind::ValueNumberFloat
            }
        }
    }
}

/// Payload-free classification of a token, as returned by
/// [`YamlParser::next_token`](crate::YamlParser::next_token).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    StartObject,
    EndObject,
    StartArray,
    EndArray,
    FieldName,
    ValueString,
    ValueNull,
    ValueTrue,
    ValueFalse,
    ValueNumberInt,
    ValueNumberFloat,
}

impl TokenKind {
    /// Fixed textual form of the structural and literal tokens.
    #[must_use]
    pub fn as_str(self) -> Option<&'static str> {
        match self {
            Self::StartObject => Some("{"),
            Self::EndObject => Some("}"),
            Self::StartArray => Some("["),
            Self::EndArray => Some("]"),
            Self::ValueNull => Some("null"),
            Self::ValueTrue => Some("true"),
            Self::ValueFalse => Some("false"),
            Self::FieldName | Self::ValueString | Self::ValueNumberInt | Self::ValueNumberFloat => {
                None
            }
        }
    }

    #[must_use]
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::ValueNumberInt | Self::ValueNumberFloat)
    }

    #[must_use]
    pub fn is_scalar_value(self) -> bool {
        matches!(
            self,
            Self::ValueString
                | Self::ValueNull
                | Self::ValueTrue
                | Self::ValueFalse
                | Self::ValueNumberInt
                | Self::ValueNumberFloat
        )
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::StartObject => "START_OBJECT",
            Self::EndObject => "END_OBJECT",
            Self::StartArray => "START_ARRAY",
            Self::EndArray => "END_ARRAY",
            Self::FieldName => "FIELD_NAME",
            Self::ValueString => "VALUE_STRING",
            Self::ValueNull => "VALUE_NULL",
            Self::ValueTrue => "VALUE_TRUE",
            Self::ValueFalse => "VALUE_FALSE",
            Self::ValueNumberInt => "VALUE_NUMBER_INT",
            Self::ValueNumberFloat => "VALUE_NUMBER_FLOAT",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Representation a numeric token was realized as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NumberType {
    Int,
    Long,
    BigInteger,
    Double,
    BigDecimal,
}
