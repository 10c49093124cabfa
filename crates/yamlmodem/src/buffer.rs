//! In-memory event source and sink.

use alloc::{collections::VecDeque, vec::Vec};
use core::convert::Infallible;

use crate::event::{DocumentEvent, EmitterLayout, EventSink, EventSource, Mark, MarkedEvent};

/// An [`EventSource`] over events that are already in memory.
///
/// Events built from plain [`DocumentEvent`]s get synthetic marks: the `n`-th
/// event spans line `n`, so error locations point at the offending event.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: VecDeque<MarkedEvent>,
    closed: bool,
}

impl EventQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a queue from unmarked events.
    pub fn from_events(events: impl IntoIterator<Item = DocumentEvent>) -> Self {
        events.into_iter().collect()
    }

    /// Builds a queue from events carrying their own marks.
    pub fn from_marked(events: impl IntoIterator<Item = MarkedEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
            closed: false,
        }
    }

    pub fn push(&mut self, event: DocumentEvent) {
        let line = self.events.back().map_or(0, |e| e.end.line + 1);
        let start = Mark {
            index: line,
            line,
            column: 0,
        };
        let end = Mark { column: 1, ..start };
        self.events.push_back(MarkedEvent::new(event, start, end));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Whether [`EventSource::close`] has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl FromIterator<DocumentEvent> for EventQueue {
    fn from_iter<I: IntoIterator<Item = DocumentEvent>>(iter: I) -> Self {
        let mut queue = Self::new();
        for event in iter {
            queue.push(event);
        }
        queue
    }
}

impl EventSource for EventQueue {
    type Error = Infallible;

    fn next_event(&mut self) -> Result<Option<MarkedEvent>, Self::Error> {
        if self.closed {
            return Ok(None);
        }
        Ok(self.events.pop_front())
    }

    fn close(&mut self) -> Result<(), Self::Error> {
        self.closed = true;
        Ok(())
    }
}

/// An [`EventSink`] that records every emitted event.
#[derive(Debug, Clone, Default)]
pub struct EventRecorder {
    events: Vec<DocumentEvent>,
    layout: Option<EmitterLayout>,
    flushes: usize,
    closed: bool,
}

impl EventRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> &[DocumentEvent] {
        &self.events
    }

    #[must_use]
    pub fn into_events(self) -> Vec<DocumentEvent> {
        self.events
    }

    /// The layout passed by the generator, if any.
    #[must_use]
    pub fn layout(&self) -> Option<EmitterLayout> {
        self.layout
    }

    #[must_use]
    pub fn flush_count(&self) -> usize {
        self.flushes
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Replays the recorded events as a parser input.
    #[must_use]
    pub fn to_queue(&self) -> EventQueue {
        self.events.iter().cloned().collect()
    }
}

impl EventSink for EventRecorder {
    type Error = Infallible;

    fn configure(&mut self, layout: &EmitterLayout) {
        self.layout = Some(*layout);
    }

    fn emit(&mut self, event: DocumentEvent) -> Result<(), Self::Error> {
        self.events.push(event);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.flushes += 1;
        Ok(())
    }

    fn close(&mut self) -> Result<(), Self::Error> {
        self.flush()?;
        self.closed = true;
        Ok(())
    }
}
