// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Prepends a synthetic value before any upstream event.

use pulse_core::{Event, Signal};

/// Extension trait providing the `start_with` operator.
pub trait StartWithExt<T, E> {
    /// Emits `value` to every new subscription before forwarding the
    /// upstream events.
    fn start_with(self, value: T) -> Signal<T, E>
    where
        T: Clone + Sync;
}

impl<T, E> StartWithExt<T, E> for Signal<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    fn start_with(self, value: T) -> Signal<T, E>
    where
        T: Clone + Sync,
    {
        Signal::new(move |emitter| {
            emitter.next(value.clone());
            self.observe(move |event: Event<T, E>| emitter.on(event))
        })
    }
}
