//! Pull parser turning document events into tokens.
//!
//! The parser keeps one event of lookahead at most: every call to
//! [`YamlParser::next_token`] pulls events from the [`EventSource`] until one of
//! them maps to a token. Document and stream framing events are consumed
//! silently, except that a document end makes `next_token` return `None`
//! without closing the source, so multi-document streams can be read by
//! calling `next_token` again.

use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use base64::Engine as _;
use bigdecimal::{BigDecimal, ToPrimitive};
use num_bigint::BigInt;
use tracing::{debug, trace, warn};

use crate::{
    context::{ContextKind, ContextStack},
    error::{ErrorSource, Location, ParserError, SyntaxError, ValueError},
    event::{DocumentEvent, EventSource, Mark, MarkedEvent},
    options::ParserOptions,
    scalar::{
        IntegerValue, decimal_literal, parse_decimal, parse_float, parse_integer, resolve,
        special_float,
    },
    token::{NumberType, Token, TokenKind},
};


type Error<S> = ParserError<<S as EventSource>::Error>;

/// What the parser expects from the next content event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    /// Top level of a document.
    Root,
    /// Inside a mapping, before a key or the mapping end.
    ExpectFieldNameOrEnd,
    /// Inside a sequence, or after a key.
    ExpectValue,
}

/// A numeric token after realization.
#[derive(Debug, Clone)]
enum NumberValue {
    Integer(IntegerValue),
    Double(f64),
    Decimal(BigDecimal),
}

/// Streaming token parser over an [`EventSource`].
///
/// ```rust
/// use yamlmodem::{DocumentEvent, EventQueue, ParserOptions, TokenKind, YamlParser};
///
/// let source = EventQueue::from_events([
///     DocumentEvent::StreamStart,
///     DocumentEvent::DocumentStart { explicit: false },
///     DocumentEvent::mapping_start(),
///     DocumentEvent::plain("a"),
///     DocumentEvent::plain("1"),
///     DocumentEvent::MappingEnd,
///     DocumentEvent::DocumentEnd,
///     DocumentEvent::StreamEnd,
/// ]);
/// let mut parser = YamlParser::new(source, ParserOptions::default());
///
/// assert_eq!(parser.next_token().unwrap(), Some(TokenKind::StartObject));
/// assert_eq!(parser.next_token().unwrap(), Some(TokenKind::FieldName));
/// assert_eq!(parser.current_name(), Some("a"));
/// assert_eq!(parser.next_token().unwrap(), Some(TokenKind::ValueNumberInt));
/// assert_eq!(parser.int_value().unwrap(), 1);
/// assert_eq!(parser.next_token().unwrap(), Some(TokenKind::EndObject));
/// assert_eq!(parser.next_token().unwrap(), None);
/// ```
#[derive(Debug)]
pub struct YamlParser<S: EventSource> {
    source: S,
    options: ParserOptions,
    context: ContextStack,

    current: Option<TokenKind>,
    /// Field name, scalar literal or alias name of the current token.
    text: String,
    anchor: Option<String>,
    tag: Option<String>,
    alias: bool,
    number: Option<NumberValue>,

    token_start: Option<Mark>,
    token_end: Option<Mark>,

    closed: bool,
    failed: bool,
}

impl<S: EventSource> YamlParser<S> {
    pub fn new(source: S, options: ParserOptions) -> Self {
        Self {
            source,
            options,
            context: ContextStack::new(),
            current: None,
            text: String::new(),
            anchor: None,
            tag: None,
            alias: false,
            number: None,
            token_start: None,
            token_end: None,
            closed: false,
            failed: false,
        }
    }

    #[must_use]
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// The event source.
    #[must_use]
    pub fn get_ref(&self) -> &S {
        &self.source
    }

    #[must_use]
    pub fn get_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Advances to the next token.
    ///
    /// Returns `Ok(None)` at the end of a document, at the end of the stream,
    /// after [`close`](Self::close), and after an error has been reported.
    ///
    /// # Errors
    ///
    /// Returns an error when the event source fails or the events do not form
    /// a well nested structure. Errors are fatal: every later call returns
    /// `Ok(None)`.
    pub fn next_token(&mut self) -> Result<Option<TokenKind>, Error<S>> {
        if self.closed || self.failed {
            return Ok(None);
        }
        self.anchor = None;
        self.tag = None;
        self.alias = false;
        self.number = None;

        loop {
            let next = self
                .source
                .next_event()
                .map_err(|e| self.fail(ErrorSource::Source(e)))?;
            let Some(MarkedEvent { event, start, end }) = next else {
                if !self.context.is_root() {
                    return Err(self.end_inside_structure());
                }
                debug!("event source exhausted");
                return Ok(self.finish(None));
            };
            self.token_start = Some(start);
            self.token_end = Some(end);

            if self.state() == ParseState::ExpectFieldNameOrEnd {
                return self.next_in_mapping(event).map(Some);
            }

            match event {
                DocumentEvent::Scalar {
                    anchor,
                    tag,
                    value,
                    style,
                    ..
                } => {
                    let kind = resolve(&value, tag.as_deref(), style).token_kind();
                    self.text = value;
                    self.anchor = anchor;
                    self.tag = tag;
                    return Ok(self.finish(Some(kind)));
                }
                DocumentEvent::MappingStart { anchor, tag, .. } => {
                    self.context.push(ContextKind::Object);
                    self.anchor = anchor;
                    self.tag = tag;
                    return Ok(self.finish(Some(TokenKind::StartObject)));
                }
                DocumentEvent::SequenceStart { anchor, tag, .. } => {
                    self.context.push(ContextKind::Array);
                    self.anchor = anchor;
                    self.tag = tag;
                    return Ok(self.finish(Some(TokenKind::StartArray)));
                }
                DocumentEvent::SequenceEnd => {
                    if self.context.in_array() {
                        self.context.pop();
                        return Ok(self.finish(Some(TokenKind::EndArray)));
                    }
                    let error = match self.context.kind() {
                        ContextKind::Root => SyntaxError::UnbalancedEndMarker(']'),
                        kind => SyntaxError::MismatchedEndMarker {
                            expected: kind.close_marker(),
                            found: ']',
                        },
                    };
                    return Err(self.fail(error));
                }
                DocumentEvent::MappingEnd => {
                    return Err(self.fail(SyntaxError::UnexpectedEndOfObject));
                }
                DocumentEvent::Alias { anchor } => {
                    self.text = anchor;
                    self.alias = true;
                    return Ok(self.finish(Some(TokenKind::ValueString)));
                }
                DocumentEvent::DocumentEnd => {
                    if !self.context.is_root() {
                        return Err(self.end_inside_structure());
                    }
                    debug!("document end");
                    return Ok(self.finish(None));
                }
                DocumentEvent::StreamEnd => {
                    if !self.context.is_root() {
                        return Err(self.end_inside_structure());
                    }
                    debug!("stream end, closing event source");
                    self.close()?;
                    return Ok(self.finish(None));
                }
                DocumentEvent::StreamStart | DocumentEvent::DocumentStart { .. } => {
                    trace!(event = event.kind_name(), "skipping framing event");
                }
            }
        }
    }

    /// Inside a mapping, only a key or the end of the mapping may follow.
    fn next_in_mapping(&mut self, event: DocumentEvent) -> Result<TokenKind, Error<S>> {
        match event {
            DocumentEvent::Scalar { value, .. } => {
                self.context.set_current_name(value.clone());
                self.text = value;
                Ok(self.finish_kind(TokenKind::FieldName))
            }
            DocumentEvent::MappingEnd => {
                self.context.pop();
                Ok(self.finish_kind(TokenKind::EndObject))
            }
            DocumentEvent::DocumentEnd | DocumentEvent::StreamEnd => {
                Err(self.end_inside_structure())
            }
            other => Err(self.fail(SyntaxError::ExpectedFieldName(other.kind_name()))),
        }
    }

    fn finish(&mut self, kind: Option<TokenKind>) -> Option<TokenKind> {
        match kind {
            Some(kind) => Some(self.finish_kind(kind)),
            None => {
                self.current = None;
                self.text.clear();
                None
            }
        }
    }

    fn finish_kind(&mut self, kind: TokenKind) -> TokenKind {
        #[cfg(any(test, feature = "fuzzing"))]
        assert!(
            kind != TokenKind::FieldName || self.context.in_object(),
            "Internal error: field name outside of an object"
        );
        trace!(token = %kind, depth = self.context.depth(), "token");
        self.current = Some(kind);
        kind
    }

    fn end_inside_structure(&mut self) -> Error<S> {
        let within = match self.context.kind() {
            ContextKind::Object => "an object",
            ContextKind::Array => "an array",
            ContextKind::Root => "the document",
        };
        self.fail(SyntaxError::UnexpectedEndOfInput(within))
    }

    fn fail(&mut self, kind: impl Into<ErrorSource<S::Error>>) -> Error<S> {
        self.failed = true;
        self.current = None;
        ParserError::new(kind.into(), self.token_location().unwrap_or_default())
    }

    /// What the next content event may be.
    #[must_use]
    pub fn state(&self) -> ParseState {
        match self.context.kind() {
            ContextKind::Root => ParseState::Root,
            ContextKind::Object if self.current != Some(TokenKind::FieldName) => {
                ParseState::ExpectFieldNameOrEnd
            }
            ContextKind::Object | ContextKind::Array => ParseState::ExpectValue,
        }
    }

    /// Kind of the current token, `None` before the first token and after the
    /// end of a document.
    #[must_use]
    pub fn current_token_kind(&self) -> Option<TokenKind> {
        self.current
    }

    /// The current token with its value materialized.
    ///
    /// # Errors
    ///
    /// Returns an error when a numeric literal cannot be realized, for example
    /// an explicitly tagged `!!int` that is not a decimal integer.
    pub fn current_token(&mut self) -> Result<Option<Token>, Error<S>> {
        let Some(kind) = self.current else {
            return Ok(None);
        };
        let token = match kind {
            TokenKind::StartObject => Token::StartObject,
            TokenKind::EndObject => Token::EndObject,
            TokenKind::StartArray => Token::StartArray,
            TokenKind::EndArray => Token::EndArray,
            TokenKind::FieldName => Token::FieldName(self.text.clone()),
            TokenKind::ValueString => Token::ValueString(self.text.clone()),
            TokenKind::ValueNull => Token::ValueNull,
            TokenKind::ValueTrue => Token::ValueBool(true),
            TokenKind::ValueFalse => Token::ValueBool(false),
            TokenKind::ValueNumberInt | TokenKind::ValueNumberFloat => match self.number()? {
                NumberValue::Integer(IntegerValue::Int(v)) => Token::ValueNumberInt(*v),
                NumberValue::Integer(IntegerValue::Long(v)) => Token::ValueNumberLong(*v),
                NumberValue::Integer(IntegerValue::Big(v)) => Token::ValueNumberBigInt(v.to_string()),
                NumberValue::Double(v) => Token::ValueNumberFloat(*v),
                NumberValue::Decimal(v) => Token::ValueNumberBigDecimal(decimal_literal(v)),
            },
        };
        Ok(Some(token))
    }

    /// Textual form of the current token: the field name, the scalar literal
    /// as written, the alias name, or the marker of a structural token.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        let kind = self.current?;
        match kind {
            TokenKind::StartObject
            | TokenKind::EndObject
            | TokenKind::StartArray
            | TokenKind::EndArray => kind.as_str(),
            _ => Some(&self.text),
        }
    }

    /// Name of the field the current token belongs to.
    ///
    /// For a field name token this is the name itself. For the start of a
    /// nested structure it is the field that structure is the value of.
    #[must_use]
    pub fn current_name(&self) -> Option<&str> {
        match self.current? {
            TokenKind::FieldName => Some(&self.text),
            TokenKind::StartObject | TokenKind::StartArray => self.context.parent_name(),
            _ => self.context.current_name(),
        }
    }

    /// Anchor declared on the current node. Field names never carry one.
    #[must_use]
    pub fn current_anchor(&self) -> Option<&str> {
        self.anchor.as_deref()
    }

    /// Tag declared on the current node, as reported by the engine.
    #[must_use]
    pub fn current_tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Type id of the current node: its tag with a single leading `!`
    /// removed, or the body of a verbatim `!<...>` tag. Secondary `!!` tags
    /// are returned unchanged.
    #[must_use]
    pub fn type_id(&self) -> Option<&str> {
        let tag = self.tag.as_deref()?;
        if let Some(verbatim) = tag.strip_prefix("!<").and_then(|t| t.strip_suffix('>')) {
            return Some(verbatim);
        }
        if tag.starts_with("!!") {
            return Some(tag);
        }
        Some(tag.strip_prefix('!').unwrap_or(tag))
    }

    /// Object id of the current node, which is its anchor.
    #[must_use]
    pub fn object_id(&self) -> Option<&str> {
        self.current_anchor()
    }

    /// Whether the current token is an alias. Its [`text`](Self::text) is
    /// then the anchor it refers to.
    #[must_use]
    pub fn is_current_alias(&self) -> bool {
        self.alias
    }

    #[must_use]
    pub fn can_read_object_id(&self) -> bool {
        true
    }

    #[must_use]
    pub fn can_read_type_id(&self) -> bool {
        true
    }

    /// Start of the current token in the markup source.
    #[must_use]
    pub fn token_location(&self) -> Option<Location> {
        self.token_start.map(Location::from)
    }

    /// Position right after the current token in the markup source.
    #[must_use]
    pub fn current_location(&self) -> Option<Location> {
        self.token_end.map(Location::from)
    }

    /// Number of open structures.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.context.depth()
    }

    fn number(&mut self) -> Result<&NumberValue, Error<S>> {
        let value = match self.number.take() {
            Some(value) => value,
            None => {
                let realized = match self.current {
                    Some(TokenKind::ValueNumberInt) => {
                        parse_integer(&self.text).map(NumberValue::Integer)
                    }
                    // no decimal form for the non-finite spellings
                    Some(TokenKind::ValueNumberFloat) if self.options.decimal_floats => {
                        match special_float(&self.text) {
                            Some(value) => Ok(NumberValue::Double(value)),
                            None => parse_decimal(&self.text).map(NumberValue::Decimal),
                        }
                    }
                    Some(TokenKind::ValueNumberFloat) => {
                        parse_float(&self.text).map(NumberValue::Double)
                    }
                    other => Err(ValueError::NotNumeric(other.map_or("none", TokenKind::name))),
                };
                realized.map_err(|e| self.fail(e))?
            }
        };
        Ok(self.number.insert(value))
    }

    fn out_of_range(&mut self, target: &'static str) -> Error<S> {
        let literal = self.text.clone();
        self.fail(ValueError::OutOfRange { literal, target })
    }

    /// Representation the current numeric token is realized as.
    ///
    /// # Errors
    ///
    /// Returns an error when the current token is not numeric or its literal
    /// cannot be realized.
    pub fn number_type(&mut self) -> Result<NumberType, Error<S>> {
        Ok(match self.number()? {
            NumberValue::Integer(v) => v.number_type(),
            NumberValue::Double(_) => NumberType::Double,
            NumberValue::Decimal(_) => NumberType::BigDecimal,
        })
    }

    /// The current numeric token as an `i32`. Floats are truncated.
    ///
    /// # Errors
    ///
    /// Returns an error when the current token is not numeric or its value
    /// does not fit an `i32`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn int_value(&mut self) -> Result<i32, Error<S>> {
        let value = match self.number()? {
            NumberValue::Integer(IntegerValue::Int(v)) => Some(*v),
            NumberValue::Integer(_) => None,
            NumberValue::Double(v) => {
                let v = v.trunc();
                (v >= f64::from(i32::MIN) && v <= f64::from(i32::MAX)).then_some(v as i32)
            }
            NumberValue::Decimal(v) => v.with_scale(0).to_i32(),
        };
        value.ok_or_else(|| self.out_of_range("int"))
    }

    /// The current numeric token as an `i64`. Floats are truncated.
    ///
    /// # Errors
    ///
    /// Returns an error when the current token is not numeric or its value
    /// does not fit an `i64`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn long_value(&mut self) -> Result<i64, Error<S>> {
        let value = match self.number()? {
            NumberValue::Integer(v) => v.to_i64(),
            NumberValue::Double(v) => {
                let v = v.trunc();
                (v >= i64::MIN as f64 && v < i64::MAX as f64).then_some(v as i64)
            }
            NumberValue::Decimal(v) => v.with_scale(0).to_i64(),
        };
        value.ok_or_else(|| self.out_of_range("long"))
    }

    /// The current numeric token as an arbitrary precision integer. Floats are
    /// truncated.
    ///
    /// # Errors
    ///
    /// Returns an error when the current token is not numeric or is a
    /// non-finite float.
    pub fn big_integer_value(&mut self) -> Result<BigInt, Error<S>> {
        let finite = match self.number()? {
            NumberValue::Integer(v) => return Ok(v.to_big()),
            NumberValue::Decimal(v) => return Ok(v.with_scale(0).into_bigint_and_exponent().0),
            NumberValue::Double(v) => v.is_finite(),
        };
        if !finite {
            return Err(self.out_of_range("big integer"));
        }
        let decimal = parse_decimal(&self.text).map_err(|e| self.fail(e))?;
        Ok(decimal.with_scale(0).into_bigint_and_exponent().0)
    }

    /// The current numeric token as an `f64`.
    ///
    /// # Errors
    ///
    /// Returns an error when the current token is not numeric.
    pub fn double_value(&mut self) -> Result<f64, Error<S>> {
        match self.number()? {
            NumberValue::Integer(v) => Ok(v.to_f64()),
            NumberValue::Double(v) => Ok(*v),
            NumberValue::Decimal(_) => parse_float(&self.text).map_err(|e| self.fail(e)),
        }
    }

    /// The current numeric token at full decimal precision, read straight
    /// from its literal.
    ///
    /// # Errors
    ///
    /// Returns an error when the current token is not numeric or is a
    /// non-finite float.
    pub fn decimal_value(&mut self) -> Result<BigDecimal, Error<S>> {
        match self.number()? {
            NumberValue::Decimal(v) => Ok(v.clone()),
            NumberValue::Integer(v) => Ok(BigDecimal::from(v.to_big())),
            NumberValue::Double(_) => parse_decimal(&self.text).map_err(|e| self.fail(e)),
        }
    }

    /// Decodes the current string token as standard base64. Line breaks and
    /// other whitespace inside the literal are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error when the current token is not a string or is not
    /// valid base64.
    pub fn binary_value(&mut self) -> Result<Vec<u8>, Error<S>> {
        if self.current != Some(TokenKind::ValueString) || self.alias {
            let found = self.current.map_or("none", TokenKind::name);
            return Err(self.fail(ValueError::NotText(found)));
        }
        let compact: String = self.text.split_ascii_whitespace().collect();
        base64::engine::general_purpose::STANDARD
            .decode(compact)
            .map_err(|e| self.fail(ValueError::Base64(e.to_string())))
    }

    /// Skips to the end of the structure the current token starts. Does
    /// nothing unless positioned on a start token.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`next_token`](Self::next_token).
    pub fn skip_children(&mut self) -> Result<(), Error<S>> {
        if !matches!(
            self.current,
            Some(TokenKind::StartObject | TokenKind::StartArray)
        ) {
            return Ok(());
        }
        let target = self.context.depth() - 1;
        while self.context.depth() > target {
            if self.next_token()?.is_none() {
                break;
            }
        }
        Ok(())
    }

    /// Closes the event source. Later calls to
    /// [`next_token`](Self::next_token) return `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns the event source's error when closing it fails.
    pub fn close(&mut self) -> Result<(), Error<S>> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.source.close().map_err(|e| {
            ParserError::new(
                ErrorSource::Source(e),
                self.token_location().unwrap_or_default(),
            )
        })
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl<S: EventSource> Iterator for YamlParser<S> {
    type Item = Result<Token, Error<S>>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            Ok(Some(_)) => self.current_token().transpose(),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

impl<S: EventSource> Drop for YamlParser<S> {
    fn drop(&mut self) {
        if self.close().is_err() {
            warn!("event source failed to close while dropping parser");
        }
    }
}
