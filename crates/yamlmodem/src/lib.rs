//! Token stream adapter over YAML document events.
//!
//! [`YamlParser`] pulls [`DocumentEvent`]s from an [`EventSource`] and turns
//! them into a flat token stream (`{`, `}`, `[`, `]`, field names and typed
//! scalars), resolving the type of every plain scalar along the way.
//! [`YamlGenerator`] does the reverse: it accepts token-oriented write calls
//! and pushes the matching events into an [`EventSink`].
//!
//! Reading and writing markup text is left to a YAML engine behind those two
//! traits. [`EventQueue`] and [`EventRecorder`] are in-memory stand-ins.
//!
//! ```rust
//! use yamlmodem::{EventRecorder, Token, YamlFactory};
//!
//! let factory = YamlFactory::new();
//! let mut sink = EventRecorder::new();
//! let mut generator = factory.create_generator(&mut sink).unwrap();
//! generator.write_start_array().unwrap();
//! generator.write_i64(7).unwrap();
//! generator.write_f64(0.5).unwrap();
//! generator.write_end_array().unwrap();
//! generator.close().unwrap();
//! drop(generator);
//!
//! let tokens: Result<Vec<_>, _> = factory.create_parser(sink.to_queue()).collect();
//! assert_eq!(
//!     tokens.unwrap(),
//!     [
//!         Token::StartArray,
//!         Token::ValueNumberInt(7),
//!         Token::ValueNumberFloat(0.5),
//!         Token::EndArray,
//!     ]
//! );
//! ```

#![no_std]
#![allow(missing_docs)]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod buffer;
mod context;
mod error;
mod event;
mod factory;
mod generator;
mod options;
mod parser;
mod scalar;
mod token;

#[cfg(test)]
mod tests;

pub use buffer::{EventQueue, EventRecorder};
pub use context::ContextKind;
pub use error::{
    ErrorSource, GeneratorError, Location, ParserError, StructureError, SyntaxError, ValueError,
};
pub use event::{
    CollectionStyle, DocumentEvent, EmitterLayout, EventSink, EventSource, Mark, MarkedEvent,
    ScalarStyle,
};
pub use factory::{FORMAT_NAME, VERSION, YamlFactory};
pub use generator::YamlGenerator;
pub use options::{GeneratorFeature, GeneratorOptions, ParserOptions};
pub use parser::{ParseState, YamlParser};
pub use scalar::{
    FLOAT_TAG, IntegerValue, NumberLexeme, Scalar, decimal_literal, f32_literal, float_literal,
    lex_number, match_bool, normalize_float_text, parse_decimal, parse_float, parse_integer,
    resolve,
};
pub use token::{NumberType, Token, TokenKind};

pub use bigdecimal::BigDecimal;
pub use num_bigint::BigInt;
