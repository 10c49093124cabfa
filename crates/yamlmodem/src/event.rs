//! Document events exchanged with the YAML engine.
//!
//! The engine that turns markup text into events (and back) lives outside this
//! crate. [`EventSource`] is the pull side used by the parser, [`EventSink`] the
//! push side used by the generator. Nothing finer grained than
//! [`DocumentEvent`] crosses this boundary.

use alloc::string::String;
use core::fmt;

/// Rendering style of a scalar node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScalarStyle {
    /// Unquoted flow scalar; the only style eligible for implicit typing.
    Plain,
    /// `'single quoted'`
    SingleQuoted,
    /// `"double quoted"`
    DoubleQuoted,
    /// `|` block scalar
    Literal,
    /// `>` block scalar
    Folded,
}

impl ScalarStyle {
    /// Returns `true` for the quoted styles.
    #[must_use]
    pub fn is_quoted(self) -> bool {
        matches!(self, Self::SingleQuoted | Self::DoubleQuoted)
    }

    /// Returns `true` for the block styles.
    #[must_use]
    pub fn is_block(self) -> bool {
        matches!(self, Self::Literal | Self::Folded)
    }
}

/// Rendering style of a mapping or sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CollectionStyle {
    /// Indentation based.
    #[default]
    Block,
    /// Inline, bracketed.
    Flow,
}

/// A single event of the document event stream.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DocumentEvent {
    StreamStart,
    StreamEnd,
    DocumentStart {
        /// Whether the `---` marker is written out.
        explicit: bool,
    },
    DocumentEnd,
    MappingStart {
        anchor: Option<String>,
        tag: Option<String>,
        /// `true` when no tag needs to be rendered.
        implicit: bool,
        style: CollectionStyle,
    },
    MappingEnd,
    SequenceStart {
        anchor: Option<String>,
        tag: Option<String>,
        implicit: bool,
        style: CollectionStyle,
    },
    SequenceEnd,
    Scalar {
        anchor: Option<String>,
        tag: Option<String>,
        implicit: bool,
        value: String,
        /// `None` leaves the choice of style to the engine.
        style: Option<ScalarStyle>,
    },
    Alias {
        anchor: String,
    },
}

impl DocumentEvent {
    /// A plain, untagged scalar. Mostly useful for building test input.
    #[must_use]
    pub fn plain(value: impl Into<String>) -> Self {
        Self::Scalar {
            anchor: None,
            tag: None,
            implicit: true,
            value: value.into(),
            style: Some(ScalarStyle::Plain),
        }
    }

    /// An untagged scalar with the given style.
    #[must_use]
    pub fn styled(value: impl Into<String>, style: ScalarStyle) -> Self {
        Self::Scalar {
            anchor: None,
            tag: None,
            implicit: true,
            value: value.into(),
            style: Some(style),
        }
    }

    /// A block mapping start without anchor or tag.
    #[must_use]
    pub fn mapping_start() -> Self {
        Self::MappingStart {
            anchor: None,
            tag: None,
            implicit: true,
            style: CollectionStyle::Block,
        }
    }

    /// A block sequence start without anchor or tag.
    #[must_use]
    pub fn sequence_start() -> Self {
        Self::SequenceStart {
            anchor: None,
            tag: None,
            implicit: true,
            style: CollectionStyle::Block,
        }
    }

    /// Short, stable name of the event kind, used in error messages.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::StreamStart => "stream-start",
            Self::StreamEnd => "stream-end",
            Self::DocumentStart { .. } => "document-start",
            Self::DocumentEnd => "document-end",
            Self::MappingStart { .. } => "mapping-start",
            Self::MappingEnd => "mapping-end",
            Self::SequenceStart { .. } => "sequence-start",
            Self::SequenceEnd => "sequence-end",
            Self::Scalar { .. } => "scalar",
            Self::Alias { .. } => "alias",
        }
    }
}

impl fmt::Display for DocumentEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar { value, .. } => write!(f, "scalar {value:?}"),
            Self::Alias { anchor } => write!(f, "alias *{anchor}"),
            other => f.write_str(other.kind_name()),
        }
    }
}

/// A position in the markup source, as reported by the engine (0-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mark {
    pub index: usize,
    pub line: usize,
    pub column: usize,
}

/// An event together with the source span it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarkedEvent {
    pub event: DocumentEvent,
    pub start: Mark,
    pub end: Mark,
}

impl MarkedEvent {
    #[must_use]
    pub fn new(event: DocumentEvent, start: Mark, end: Mark) -> Self {
        Self { event, start, end }
    }
}

/// Layout hints forwarded to the engine before the first event is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmitterLayout {
    /// Render the canonical form (explicit tags, flow collections).
    pub canonical: bool,
    /// Allow the engine to fold long scalars over several lines.
    pub split_lines: bool,
}

/// Pull side of the engine: yields parsed events one at a time.
pub trait EventSource {
    type Error;

    /// Returns the next event, or `None` once the input is exhausted.
    fn next_event(&mut self) -> Result<Option<MarkedEvent>, Self::Error>;

    /// Releases the underlying input.
    fn close(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Push side of the engine: receives events to render.
pub trait EventSink {
    type Error;

    /// Called once, before `StreamStart`.
    fn configure(&mut self, _layout: &EmitterLayout) {}

    fn emit(&mut self, event: DocumentEvent) -> Result<(), Self::Error>;

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Flushes and releases the underlying output.
    fn close(&mut self) -> Result<(), Self::Error> {
        self.flush()
    }
}

impl<S: EventSource + ?Sized> EventSource for &mut S {
    type Error = S::Error;

    fn next_event(&mut self) -> Result<Option<MarkedEvent>, Self::Error> {
        (**self).next_event()
    }

    fn close(&mut self) -> Result<(), Self::Error> {
        (**self).close()
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    type Error = S::Error;

    fn configure(&mut self, layout: &EmitterLayout) {
        (**self).configure(layout);
    }

    fn emit(&mut self, event: DocumentEvent) -> Result<(), Self::Error> {
        (**self).emit(event)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        (**self).flush()
    }

    fn close(&mut self) -> Result<(), Self::Error> {
        (**self).close()
    }
}
