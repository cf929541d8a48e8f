// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use pulse_core::{Event, Observer};
use std::sync::Arc;

/// Records every event delivered to its observer for later assertion.
///
/// Cheap to clone; all clones share the same recorded sequence.
pub struct Recording<T, E> {
    events: Arc<Mutex<Vec<Event<T, E>>>>,
}

impl<T, E> Clone for Recording<T, E> {
    fn clone(&self) -> Self {
        Self {
            events: Arc::clone(&self.events),
        }
    }
}

impl<T, E> Default for Recording<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> Recording<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// An empty recording.
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// An observer that appends every received event to this recording.
    pub fn observer(&self) -> impl Observer<T, E> + 'static {
        let events = Arc::clone(&self.events);
        move |event: Event<T, E>| events.lock().push(event)
    }

    /// Every recorded event, in delivery order.
    pub fn events(&self) -> Vec<Event<T, E>>
    where
        T: Clone,
        E: Clone,
    {
        self.events.lock().clone()
    }

    /// The recorded values, in delivery order.
    pub fn values(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                Event::Next(value) => Some(value.clone()),
                Event::Failed(_) | Event::Completed => None,
            })
            .collect()
    }

    /// The recorded failure payload, if the sequence failed.
    pub fn failure(&self) -> Option<E>
    where
        E: Clone,
    {
        self.events.lock().iter().find_map(|event| match event {
            Event::Failed(error) => Some(error.clone()),
            Event::Next(_) | Event::Completed => None,
        })
    }

    /// Whether the recorded sequence ended with `Completed`.
    pub fn is_completed(&self) -> bool {
        matches!(self.events.lock().last(), Some(Event::Completed))
    }

    /// Whether the recorded sequence ended with either terminal.
    pub fn is_terminated(&self) -> bool {
        self.events
            .lock()
            .last()
            .map_or(false, |event| event.is_terminal())
    }

    /// Number of recorded events (terminals included).
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Asserts the recorded sequence respects the event grammar:
    /// `Next* (Completed | Failed)?`.
    pub fn assert_grammar(&self) {
        let events = self.events.lock();
        for (index, event) in events.iter().enumerate() {
            if event.is_terminal() {
                assert_eq!(
                    index,
                    events.len() - 1,
                    "event observed after a terminal event"
                );
            }
        }
    }
}
