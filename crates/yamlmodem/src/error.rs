use alloc::string::String;
use core::fmt;

use thiserror::Error;

/// A 1-based position in the markup source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl From<crate::event::Mark> for Location {
    fn from(mark: crate::event::Mark) -> Self {
        Self {
            line: mark.line + 1,
            column: mark.column + 1,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Error produced by [`YamlParser`](crate::YamlParser). Always fatal for the
/// stream it came from.
#[derive(Error, Debug)]
#[error("{kind} at {line}:{column}")]
pub struct ParserError<E> {
    pub(crate) kind: ErrorSource<E>,
    pub line: usize,
    pub column: usize,
}

impl<E> ParserError<E> {
    pub(crate) fn new(kind: ErrorSource<E>, at: Location) -> Self {
        Self {
            kind,
            line: at.line,
            column: at.column,
        }
    }

    /// What went wrong.
    #[must_use]
    pub fn kind(&self) -> &ErrorSource<E> {
        &self.kind
    }

    #[must_use]
    pub fn into_kind(self) -> ErrorSource<E> {
        self.kind
    }

    #[must_use]
    pub fn location(&self) -> Location {
        Location {
            line: self.line,
            column: self.column,
        }
    }
}

#[derive(Error, Debug)]
pub enum ErrorSource<E> {
    #[error("event source error: {0}")]
    Source(E),
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    #[error("malformed value: {0}")]
    Value(#[from] ValueError),
}

/// Structural problems in the event stream.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("expected a field name (scalar value in YAML), got {0} instead")]
    ExpectedFieldName(&'static str),
    #[error("not expecting end-of-object but a value")]
    UnexpectedEndOfObject,
    #[error("unexpected close marker '{found}': expected '{expected}'")]
    MismatchedEndMarker { expected: char, found: char },
    #[error("unexpected close marker '{0}' outside of any structure")]
    UnbalancedEndMarker(char),
    #[error("unexpected end of input in {0}")]
    UnexpectedEndOfInput(&'static str),
}

/// A token could not be converted to the requested representation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("current token ({0}) is not numeric")]
    NotNumeric(&'static str),
    #[error("current token ({0}) is not a string, cannot access as binary")]
    NotText(&'static str),
    #[error("invalid numeric literal {literal:?}: {reason}")]
    MalformedNumber { literal: String, reason: String },
    #[error("numeric value ({literal}) out of range of {target}")]
    OutOfRange {
        literal: String,
        target: &'static str,
    },
    #[error("invalid base64 content: {0}")]
    Base64(String),
}

impl ValueError {
    pub(crate) fn malformed(literal: &str, reason: impl fmt::Display) -> Self {
        use alloc::string::ToString;
        Self::MalformedNumber {
            literal: literal.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Error produced by [`YamlGenerator`](crate::YamlGenerator).
#[derive(Error, Debug)]
pub enum GeneratorError<E> {
    #[error("event sink error: {0}")]
    Sink(E),
    #[error("{0}")]
    Structure(#[from] StructureError),
    #[error("operation not supported by the YAML generator: {0}")]
    Unsupported(&'static str),
    #[error("invalid UTF-8 in string value: {0}")]
    InvalidUtf8(String),
}

/// Out-of-order or mismatched write calls.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StructureError {
    #[error("expected a value, got {0} request while expecting a field name")]
    ExpectedValue(&'static str),
    #[error("cannot write a field name, expecting a value")]
    ExpectedFieldName,
    #[error("current context not {expected} but {found}")]
    MismatchedEnd {
        expected: &'static str,
        found: &'static str,
    },
    #[error("cannot end an object while its last field has no value")]
    DanglingFieldName,
    #[error("cannot write {0}: the document already has a root value")]
    SecondRootValue(&'static str),
    #[error("cannot write {0}: generator is closed")]
    Closed(&'static str),
}
