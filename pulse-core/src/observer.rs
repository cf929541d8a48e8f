// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::event::Event;

/// A consumer of the event sequence of one subscription.
///
/// Observers must be `Send + Sync`: a scheduled callback may deliver an
/// event from a thread other than the subscribing one, though never
/// concurrently for the same subscription.
pub trait Observer<T, E>: Send + Sync {
    /// Receive one event.
    fn on(&self, event: Event<T, E>);

    /// Receive a value.
    fn next(&self, value: T) {
        self.on(Event::Next(value));
    }

    /// Receive a failure, terminating the sequence.
    fn fail(&self, error: E) {
        self.on(Event::Failed(error));
    }

    /// Receive completion, terminating the sequence.
    fn complete(&self) {
        self.on(Event::Completed);
    }
}

impl<T, E, F> Observer<T, E> for F
where
    F: Fn(Event<T, E>) + Send + Sync,
{
    fn on(&self, event: Event<T, E>) {
        self(event);
    }
}
