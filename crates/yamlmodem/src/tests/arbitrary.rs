use alloc::{string::String, vec, vec::Vec};

use quickcheck::{Arbitrary, Gen};

use crate::{EventSink, GeneratorError, Token, YamlGenerator};

/// A value tree that can be written through the generator.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Array(Vec<Node>),
    Object(Vec<(String, Node)>),
}

impl Node {
    pub(crate) fn write<S: EventSink>(
        &self,
        g: &mut YamlGenerator<S>,
    ) -> Result<(), GeneratorError<S::Error>> {
        match self {
            Self::Null => g.write_null(),
            Self::Bool(b) => g.write_bool(*b),
            Self::Int(i) => g.write_i64(*i),
            Self::Float(f) => g.write_f64(*f),
            Self::Str(s) => g.write_string(s),
            Self::Array(items) => {
                g.write_start_array()?;
                for item in items {
                    item.write(g)?;
                }
                g.write_end_array()
            }
            Self::Object(fields) => {
                g.write_start_object()?;
                for (name, value) in fields {
                    g.write_field_name(name)?;
                    value.write(g)?;
                }
                g.write_end_object()
            }
        }
    }

    /// Tokens a parser is expected to yield for this value.
    pub(crate) fn tokens(&self) -> Vec<Token> {
        let mut out = Vec::new();
        self.push_tokens(&mut out);
        out
    }

    fn push_tokens(&self, out: &mut Vec<Token>) {
        match self {
            Self::Null => out.push(Token::ValueNull),
            Self::Bool(b) => out.push(Token::ValueBool(*b)),
            Self::Int(i) => out.push(match i32::try_from(*i) {
                Ok(narrow) => Token::ValueNumberInt(narrow),
                Err(_) => Token::ValueNumberLong(*i),
            }),
            Self::Float(f) => out.push(Token::ValueNumberFloat(*f)),
            Self::Str(s) => out.push(Token::ValueString(s.clone())),
            Self::Array(items) => {
                out.push(Token::StartArray);
                for item in items {
                    item.push_tokens(out);
                }
                out.push(Token::EndArray);
            }
            Self::Object(fields) => {
                out.push(Token::StartObject);
                for (name, value) in fields {
                    out.push(Token::FieldName(name.clone()));
                    value.push_tokens(out);
                }
                out.push(Token::EndObject);
            }
        }
    }
}

/// Any `f64` but NaN, which never compares equal. Infinities are kept.
fn comparable_f64(g: &mut Gen) -> f64 {
    let mut value = f64::arbitrary(g);
    while value.is_nan() {
        value = f64::arbitrary(g);
    }
    value
}

impl Arbitrary for Node {
    fn arbitrary(g: &mut Gen) -> Self {
        fn gen_node(g: &mut Gen, depth: usize) -> Node {
            let choices = if depth == 0 { 5 } else { 7 };
            match usize::arbitrary(g) % choices {
                0 => Node::Null,
                1 => Node::Bool(bool::arbitrary(g)),
                2 => Node::Int(i64::arbitrary(g)),
                3 => Node::Float(comparable_f64(g)),
                4 => Node::Str(String::arbitrary(g)),
                5 => {
                    let len = usize::arbitrary(g) % 4;
                    Node::Array((0..len).map(|_| gen_node(g, depth - 1)).collect())
                }
                _ => {
                    let len = usize::arbitrary(g) % 4;
                    Node::Object(
                        (0..len)
                            .map(|_| (String::arbitrary(g), gen_node(g, depth - 1)))
                            .collect(),
                    )
                }
            }
        }

        let depth = usize::arbitrary(g) % 3;
        gen_node(g, depth)
    }

    fn shrink(&self) -> alloc::boxed::Box<dyn Iterator<Item = Self>> {
        match self {
            Self::Array(items) if !items.is_empty() => {
                let mut smaller = vec![Self::Array(Vec::new())];
                smaller.extend(items.iter().cloned());
                alloc::boxed::Box::new(smaller.into_iter())
            }
            Self::Object(fields) if !fields.is_empty() => {
                let mut smaller = vec![Self::Object(Vec::new())];
                smaller.extend(fields.iter().map(|(_, v)| v.clone()));
                alloc::boxed::Box::new(smaller.into_iter())
            }
            _ => quickcheck::empty_shrinker(),
        }
    }
}
