//! Nesting context shared by the parser and the generator.

use alloc::{string::String, vec::Vec};

/// Kind of a context frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContextKind {
    Root,
    Array,
    Object,
}

impl ContextKind {
    #[must_use]
    pub fn type_desc(self) -> &'static str {
        match self {
            Self::Root => "ROOT",
            Self::Array => "ARRAY",
            Self::Object => "OBJECT",
        }
    }

    pub(crate) fn close_marker(self) -> char {
        match self {
            Self::Root => '/',
            Self::Array => ']',
            Self::Object => '}',
        }
    }
}

#[derive(Debug, Clone)]
struct Frame {
    kind: ContextKind,
    name: Option<String>,
    /// Object frames only: a field name was seen and its value is pending.
    awaiting_value: bool,
}

/// Outcome of trying to place a value in the current context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValueSlot {
    Accepted,
    ExpectFieldName,
    RootTaken,
}

/// Stack of nested frames. The root frame is implicit: an empty stack means
/// the root context.
#[derive(Debug, Clone, Default)]
pub(crate) struct ContextStack {
    frames: Vec<Frame>,
    root_values: usize,
}

impl ContextStack {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn kind(&self) -> ContextKind {
        self.frames.last().map_or(ContextKind::Root, |f| f.kind)
    }

    pub(crate) fn depth(&self) -> usize {
        self.frames.len()
    }

    pub(crate) fn is_root(&self) -> bool {
        self.frames.is_empty()
    }

    pub(crate) fn in_object(&self) -> bool {
        self.kind() == ContextKind::Object
    }

    pub(crate) fn in_array(&self) -> bool {
        self.kind() == ContextKind::Array
    }

    pub(crate) fn push(&mut self, kind: ContextKind) {
        debug_assert!(kind != ContextKind::Root, "root frame is implicit");
        self.frames.push(Frame {
            kind,
            name: None,
            awaiting_value: false,
        });
    }

    pub(crate) fn pop(&mut self) -> Option<ContextKind> {
        self.frames.pop().map(|f| f.kind)
    }

    /// Name of the field whose value is being read or written, if the current
    /// frame is an object that has seen one.
    pub(crate) fn current_name(&self) -> Option<&str> {
        self.frames.last().and_then(|f| f.name.as_deref())
    }

    /// Field name of the enclosing frame, for tokens that open a frame.
    pub(crate) fn parent_name(&self) -> Option<&str> {
        let index = self.frames.len().checked_sub(2)?;
        self.frames[index].name.as_deref()
    }

    pub(crate) fn set_current_name(&mut self, name: String) {
        if let Some(frame) = self.frames.last_mut() {
            frame.name = Some(name);
        }
    }

    /// Write side: whether the current object frame still waits for the value
    /// of its last field name.
    pub(crate) fn awaiting_value(&self) -> bool {
        self.frames.last().is_some_and(|f| f.awaiting_value)
    }

    /// Write side: claims the slot for a field name. Fails unless the current
    /// frame is an object expecting a name.
    pub(crate) fn write_field_name(&mut self, name: &str) -> bool {
        match self.frames.last_mut() {
            Some(frame) if frame.kind == ContextKind::Object && !frame.awaiting_value => {
                frame.awaiting_value = true;
                frame.name = Some(String::from(name));
                true
            }
            _ => false,
        }
    }

    /// Write side: claims the slot for a value (scalar, alias or the start of
    /// a nested structure).
    pub(crate) fn write_value(&mut self) -> ValueSlot {
        match self.frames.last_mut() {
            None if self.root_values > 0 => ValueSlot::RootTaken,
            None => {
                self.root_values += 1;
                ValueSlot::Accepted
            }
            Some(frame) if frame.kind == ContextKind::Object => {
                if frame.awaiting_value {
                    frame.awaiting_value = false;
                    ValueSlot::Accepted
                } else {
                    ValueSlot::ExpectFieldName
                }
            }
            Some(_) => ValueSlot::Accepted,
        }
    }
}
