//! Push generator turning write calls into document events.

use alloc::string::{String, ToString};

use base64::Engine as _;
use bigdecimal::BigDecimal;
use bstr::ByteSlice;
use num_bigint::BigInt;
use tracing::{debug, trace, warn};

use crate::{
    context::{ContextKind, ContextStack, ValueSlot},
    error::{GeneratorError, StructureError},
    event::{CollectionStyle, DocumentEvent, EmitterLayout, EventSink, ScalarStyle},
    options::GeneratorOptions,
    scalar::{
        FLOAT_TAG, decimal_literal, f32_literal, float_literal, normalize_float_text,
        parse_decimal,
    },
    token::Token,
};


type Error<S> = GeneratorError<<S as EventSink>::Error>;

/// Style for field names; left to the engine.
const NAME_STYLE: Option<ScalarStyle> = None;
/// Style for numbers, booleans and null; left to the engine.
const SCALAR_STYLE: Option<ScalarStyle> = None;
const STRING_STYLE: Option<ScalarStyle> = Some(ScalarStyle::DoubleQuoted);
const BINARY_STYLE: Option<ScalarStyle> = Some(ScalarStyle::DoubleQuoted);

/// Anchor and tag recorded for the next node.
#[derive(Debug, Default)]
struct Pending {
    anchor: Option<String>,
    tag: Option<String>,
}

/// Streaming generator writing into an [`EventSink`].
///
/// The stream and document are opened on construction and closed by
/// [`close`](Self::close), which also closes any structure left open.
///
/// ```rust
/// use yamlmodem::{DocumentEvent, EventRecorder, GeneratorOptions, YamlGenerator};
///
/// let mut sink = EventRecorder::new();
/// let mut generator = YamlGenerator::new(&mut sink, GeneratorOptions::default()).unwrap();
/// generator.write_start_object().unwrap();
/// generator.write_string_field("name", "Bob").unwrap();
/// generator.write_end_object().unwrap();
/// generator.close().unwrap();
/// drop(generator);
///
/// assert_eq!(sink.events().len(), 8);
/// assert_eq!(sink.events()[6], DocumentEvent::DocumentEnd);
/// ```
#[derive(Debug)]
pub struct YamlGenerator<S: EventSink> {
    sink: S,
    options: GeneratorOptions,
    context: ContextStack,
    pending: Option<Pending>,
    closed: bool,
}

impl<S: EventSink> YamlGenerator<S> {
    /// Configures the sink and opens the stream and the first document.
    ///
    /// # Errors
    ///
    /// Returns the sink's error when the opening events cannot be emitted.
    pub fn new(mut sink: S, options: GeneratorOptions) -> Result<Self, Error<S>> {
        sink.configure(&EmitterLayout {
            canonical: options.canonical_output,
            split_lines: options.split_lines,
        });
        let mut generator = Self {
            sink,
            options,
            context: ContextStack::new(),
            pending: None,
            closed: false,
        };
        generator.emit(DocumentEvent::StreamStart)?;
        generator.emit(DocumentEvent::DocumentStart {
            explicit: options.write_doc_start_marker,
        })?;
        Ok(generator)
    }

    #[must_use]
    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// The event sink.
    #[must_use]
    pub fn get_ref(&self) -> &S {
        &self.sink
    }

    #[must_use]
    pub fn get_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Kind of the innermost open structure.
    #[must_use]
    pub fn output_context(&self) -> ContextKind {
        self.context.kind()
    }

    /// Number of open structures.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.context.depth()
    }

    /// Last field name written in the innermost open object.
    #[must_use]
    pub fn current_name(&self) -> Option<&str> {
        self.context.current_name()
    }

    #[must_use]
    pub fn can_write_object_id(&self) -> bool {
        self.options.use_native_object_id
    }

    #[must_use]
    pub fn can_write_type_id(&self) -> bool {
        self.options.use_native_type_id
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn emit(&mut self, event: DocumentEvent) -> Result<(), Error<S>> {
        trace!(event = event.kind_name(), depth = self.context.depth(), "emit");
        self.sink.emit(event).map_err(GeneratorError::Sink)
    }

    fn ensure_open(&self, what: &'static str) -> Result<(), Error<S>> {
        if self.closed {
            return Err(StructureError::Closed(what).into());
        }
        Ok(())
    }

    /// Claims the slot for a value, or fails with the reason it is not
    /// available.
    fn verify_value_write(&mut self, what: &'static str) -> Result<(), Error<S>> {
        self.ensure_open(what)?;
        match self.context.write_value() {
            ValueSlot::Accepted => Ok(()),
            ValueSlot::ExpectFieldName => Err(StructureError::ExpectedValue(what).into()),
            ValueSlot::RootTaken => Err(StructureError::SecondRootValue(what).into()),
        }
    }

    fn take_pending(&mut self) -> (Option<String>, Option<String>) {
        self.pending
            .take()
            .map_or((None, None), |p| (p.anchor, p.tag))
    }

    fn discard_pending(&mut self, reason: &'static str) {
        if let Some(pending) = self.pending.take() {
            debug!(
                anchor = pending.anchor.as_deref(),
                tag = pending.tag.as_deref(),
                reason,
                "discarding pending node metadata"
            );
        }
    }

    fn collection_style(&self) -> CollectionStyle {
        if self.options.canonical_output {
            CollectionStyle::Flow
        } else {
            CollectionStyle::Block
        }
    }

    fn write_scalar(
        &mut self,
        what: &'static str,
        value: String,
        style: Option<ScalarStyle>,
    ) -> Result<(), Error<S>> {
        self.write_scalar_tagged(what, value, style, None)
    }

    /// `core_tag` applies when no type id is pending.
    fn write_scalar_tagged(
        &mut self,
        what: &'static str,
        value: String,
        style: Option<ScalarStyle>,
        core_tag: Option<&'static str>,
    ) -> Result<(), Error<S>> {
        self.verify_value_write(what)?;
        let (anchor, tag) = self.take_pending();
        let tag = tag.or_else(|| core_tag.map(String::from));
        self.emit(DocumentEvent::Scalar {
            anchor,
            implicit: tag.is_none(),
            tag,
            value,
            style,
        })
    }

    /*
     * Structure
     */

    /// # Errors
    ///
    /// Fails when a field name is expected, when the document already has a
    /// root value, or when the sink fails.
    pub fn write_start_object(&mut self) -> Result<(), Error<S>> {
        self.verify_value_write("start-of-object")?;
        let (anchor, tag) = self.take_pending();
        let style = self.collection_style();
        self.context.push(ContextKind::Object);
        self.emit(DocumentEvent::MappingStart {
            anchor,
            implicit: tag.is_none(),
            tag,
            style,
        })
    }

    /// # Errors
    ///
    /// Fails when a field name is expected, when the document already has a
    /// root value, or when the sink fails.
    pub fn write_start_array(&mut self) -> Result<(), Error<S>> {
        self.verify_value_write("start-of-array")?;
        let (anchor, tag) = self.take_pending();
        let style = self.collection_style();
        self.context.push(ContextKind::Array);
        self.emit(DocumentEvent::SequenceStart {
            anchor,
            implicit: tag.is_none(),
            tag,
            style,
        })
    }

    /// # Errors
    ///
    /// Fails unless the innermost open structure is an object whose last
    /// field has a value.
    pub fn write_end_object(&mut self) -> Result<(), Error<S>> {
        self.ensure_open("end-of-object")?;
        if !self.context.in_object() {
            return Err(StructureError::MismatchedEnd {
                expected: ContextKind::Object.type_desc(),
                found: self.context.kind().type_desc(),
            }
            .into());
        }
        if self.context.awaiting_value() {
            return Err(StructureError::DanglingFieldName.into());
        }
        self.context.pop();
        self.discard_pending("end of object");
        self.emit(DocumentEvent::MappingEnd)
    }

    /// # Errors
    ///
    /// Fails unless the innermost open structure is an array.
    pub fn write_end_array(&mut self) -> Result<(), Error<S>> {
        self.ensure_open("end-of-array")?;
        if !self.context.in_array() {
            return Err(StructureError::MismatchedEnd {
                expected: ContextKind::Array.type_desc(),
                found: self.context.kind().type_desc(),
            }
            .into());
        }
        self.context.pop();
        self.discard_pending("end of array");
        self.emit(DocumentEvent::SequenceEnd)
    }

    /// Writes a key. Keys never carry an anchor or a tag; pending metadata
    /// is dropped.
    ///
    /// # Errors
    ///
    /// Fails unless the innermost open structure is an object expecting a
    /// key.
    pub fn write_field_name(&mut self, name: &str) -> Result<(), Error<S>> {
        self.ensure_open("field name")?;
        if !self.context.write_field_name(name) {
            return Err(StructureError::ExpectedFieldName.into());
        }
        self.discard_pending("field name");
        self.emit(DocumentEvent::Scalar {
            anchor: None,
            tag: None,
            implicit: true,
            value: name.to_string(),
            style: NAME_STYLE,
        })
    }

    /// Writes a key followed by its string value.
    ///
    /// # Errors
    ///
    /// See [`write_field_name`](Self::write_field_name) and
    /// [`write_string`](Self::write_string).
    pub fn write_string_field(&mut self, name: &str, value: &str) -> Result<(), Error<S>> {
        self.write_field_name(name)?;
        self.write_string(value)
    }

    /*
     * Values
     */

    /// Writes a double-quoted string.
    ///
    /// # Errors
    ///
    /// Fails when a value cannot be written here, or when the sink fails.
    pub fn write_string(&mut self, value: &str) -> Result<(), Error<S>> {
        self.write_scalar("string", value.to_string(), STRING_STYLE)
    }

    /// Writes a string given as raw bytes.
    ///
    /// # Errors
    ///
    /// Fails with [`GeneratorError::InvalidUtf8`] when the bytes are not
    /// UTF-8, otherwise as [`write_string`](Self::write_string).
    pub fn write_utf8_string(&mut self, value: &[u8]) -> Result<(), Error<S>> {
        let text = value
            .to_str()
            .map_err(|_| GeneratorError::InvalidUtf8(value.to_str_lossy().into_owned()))?;
        self.write_string(text)
    }

    /// # Errors
    ///
    /// Fails when a value cannot be written here, or when the sink fails.
    pub fn write_i32(&mut self, value: i32) -> Result<(), Error<S>> {
        self.write_scalar("number", value.to_string(), SCALAR_STYLE)
    }

    /// Writes an `i64`, in `i32` form when it fits.
    ///
    /// # Errors
    ///
    /// Fails when a value cannot be written here, or when the sink fails.
    pub fn write_i64(&mut self, value: i64) -> Result<(), Error<S>> {
        match i32::try_from(value) {
            Ok(narrow) => self.write_i32(narrow),
            Err(_) => self.write_scalar("number", value.to_string(), SCALAR_STYLE),
        }
    }

    /// # Errors
    ///
    /// Fails when a value cannot be written here, or when the sink fails.
    pub fn write_big_integer(&mut self, value: &BigInt) -> Result<(), Error<S>> {
        self.write_scalar("number", value.to_string(), SCALAR_STYLE)
    }

    /// Writes an `f64`. Infinities and NaN carry the core float tag, unless a
    /// type id is pending, since their plain spellings would read back as
    /// strings.
    ///
    /// # Errors
    ///
    /// Fails when a value cannot be written here, or when the sink fails.
    pub fn write_f64(&mut self, value: f64) -> Result<(), Error<S>> {
        let tag = (!value.is_finite()).then_some(FLOAT_TAG);
        self.write_scalar_tagged("number", float_literal(value), SCALAR_STYLE, tag)
    }

    /// # Errors
    ///
    /// Fails when a value cannot be written here, or when the sink fails.
    pub fn write_f32(&mut self, value: f32) -> Result<(), Error<S>> {
        let tag = (!value.is_finite()).then_some(FLOAT_TAG);
        self.write_scalar_tagged("number", f32_literal(value), SCALAR_STYLE, tag)
    }

    /// Writes a decimal, always in float form so it reads back as a float.
    /// Equal values are written identically regardless of their scale.
    ///
    /// # Errors
    ///
    /// Fails when a value cannot be written here, or when the sink fails.
    pub fn write_decimal(&mut self, value: &BigDecimal) -> Result<(), Error<S>> {
        self.write_scalar("number", decimal_literal(value), SCALAR_STYLE)
    }

    /// Writes an already encoded number verbatim.
    ///
    /// # Errors
    ///
    /// Fails when a value cannot be written here, or when the sink fails.
    pub fn write_number_str(&mut self, encoded: &str) -> Result<(), Error<S>> {
        self.write_scalar("number", encoded.to_string(), SCALAR_STYLE)
    }

    /// # Errors
    ///
    /// Fails when a value cannot be written here, or when the sink fails.
    pub fn write_bool(&mut self, value: bool) -> Result<(), Error<S>> {
        let text = if value { "true" } else { "false" };
        self.write_scalar("boolean", text.to_string(), SCALAR_STYLE)
    }

    /// # Errors
    ///
    /// Fails when a value cannot be written here, or when the sink fails.
    pub fn write_null(&mut self) -> Result<(), Error<S>> {
        self.write_scalar("null", String::from("null"), SCALAR_STYLE)
    }

    /// Writes bytes as a double-quoted standard base64 string.
    ///
    /// # Errors
    ///
    /// Fails when a value cannot be written here, or when the sink fails.
    pub fn write_binary(&mut self, data: &[u8]) -> Result<(), Error<S>> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(data);
        self.write_scalar("binary", encoded, BINARY_STYLE)
    }

    /// Writes a materialized token, as read from a
    /// [`YamlParser`](crate::YamlParser).
    ///
    /// # Errors
    ///
    /// Fails as the matching `write_*` call would.
    pub fn write_token(&mut self, token: &Token) -> Result<(), Error<S>> {
        match token {
            Token::StartObject => self.write_start_object(),
            Token::EndObject => self.write_end_object(),
            Token::StartArray => self.write_start_array(),
            Token::EndArray => self.write_end_array(),
            Token::FieldName(name) => self.write_field_name(name),
            Token::ValueString(value) => self.write_string(value),
            Token::ValueNull => self.write_null(),
            Token::ValueBool(value) => self.write_bool(*value),
            Token::ValueNumberInt(value) => self.write_i32(*value),
            Token::ValueNumberLong(value) => self.write_i64(*value),
            Token::ValueNumberBigInt(text) => self.write_number_str(text),
            Token::ValueNumberFloat(value) => self.write_f64(*value),
            Token::ValueNumberBigDecimal(text) => {
                let text = parse_decimal(text)
                    .map_or_else(|_| normalize_float_text(text), |v| decimal_literal(&v));
                self.write_scalar("number", text, SCALAR_STYLE)
            }
        }
    }

    /*
     * Native ids
     */

    /// Records an anchor for the next node. Emits nothing.
    ///
    /// # Errors
    ///
    /// Fails when the generator is closed.
    pub fn write_object_id(&mut self, id: &str) -> Result<(), Error<S>> {
        self.ensure_open("object id")?;
        self.pending.get_or_insert_with(Pending::default).anchor = Some(id.to_string());
        Ok(())
    }

    /// Records a tag for the next node. Emits nothing.
    ///
    /// # Errors
    ///
    /// Fails when the generator is closed.
    pub fn write_type_id(&mut self, id: &str) -> Result<(), Error<S>> {
        self.ensure_open("type id")?;
        self.pending.get_or_insert_with(Pending::default).tag = Some(id.to_string());
        Ok(())
    }

    /// Writes an alias to a previously anchored node. Pending metadata is
    /// dropped; an alias carries none.
    ///
    /// # Errors
    ///
    /// Fails when a value cannot be written here, or when the sink fails.
    pub fn write_object_ref(&mut self, id: &str) -> Result<(), Error<S>> {
        self.verify_value_write("object reference")?;
        self.discard_pending("object reference");
        self.emit(DocumentEvent::Alias {
            anchor: id.to_string(),
        })
    }

    /*
     * Raw content
     */

    /// Raw content has no event representation.
    ///
    /// # Errors
    ///
    /// Always fails with [`GeneratorError::Unsupported`].
    pub fn write_raw(&mut self, _text: &str) -> Result<(), Error<S>> {
        Err(GeneratorError::Unsupported("write_raw"))
    }

    /// # Errors
    ///
    /// Always fails with [`GeneratorError::Unsupported`].
    pub fn write_raw_value(&mut self, _text: &str) -> Result<(), Error<S>> {
        Err(GeneratorError::Unsupported("write_raw_value"))
    }

    /// # Errors
    ///
    /// Always fails with [`GeneratorError::Unsupported`].
    pub fn write_raw_utf8_string(&mut self, _text: &[u8]) -> Result<(), Error<S>> {
        Err(GeneratorError::Unsupported("write_raw_utf8_string"))
    }

    /*
     * Lifecycle
     */

    /// Flushes the sink. Does nothing once closed.
    ///
    /// # Errors
    ///
    /// Returns the sink's error.
    pub fn flush(&mut self) -> Result<(), Error<S>> {
        if self.closed {
            return Ok(());
        }
        self.sink.flush().map_err(GeneratorError::Sink)
    }

    /// Closes open structures, ends the document and the stream, then
    /// flushes and closes the sink. Calling it again does nothing.
    ///
    /// A field name still waiting for its value gets a null.
    ///
    /// # Errors
    ///
    /// Returns the sink's error.
    pub fn close(&mut self) -> Result<(), Error<S>> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        debug!(open = self.context.depth(), "closing generator");
        self.pending = None;

        while !self.context.is_root() {
            if self.context.awaiting_value() {
                self.context.write_value();
                self.emit(DocumentEvent::Scalar {
                    anchor: None,
                    tag: None,
                    implicit: true,
                    value: String::from("null"),
                    style: SCALAR_STYLE,
                })?;
            }
            let end = match self.context.pop() {
                Some(ContextKind::Array) => DocumentEvent::SequenceEnd,
                _ => DocumentEvent::MappingEnd,
            };
            self.emit(end)?;
        }
        self.emit(DocumentEvent::DocumentEnd)?;
        self.emit(DocumentEvent::StreamEnd)?;
        self.sink.flush().map_err(GeneratorError::Sink)?;
        self.sink.close().map_err(GeneratorError::Sink)
    }
}

impl<S: EventSink> Drop for YamlGenerator<S> {
    fn drop(&mut self) {
        if self.close().is_err() {
            warn!("event sink failed while closing dropped generator");
        }
    }
}
