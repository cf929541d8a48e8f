// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Sequential concatenation of two signals.

use pulse_core::{Event, SerialDisposable, Signal};

/// Extension trait providing the `concat_with` operator.
pub trait ConcatWithExt<T, E> {
    /// Exhausts this signal through its completion before subscribing to
    /// `other`; a failure short-circuits and never starts `other`.
    fn concat_with(self, other: Signal<T, E>) -> Signal<T, E>;
}

impl<T, E> ConcatWithExt<T, E> for Signal<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    fn concat_with(self, other: Signal<T, E>) -> Signal<T, E> {
        Signal::new(move |emitter| {
            let serial = SerialDisposable::new();
            // Pre-registered slots keep the live subscription reachable
            // from `serial` even when the handover happens mid-emission.
            let head = SerialDisposable::new();
            serial.set(head.to_disposable());
            let other = other.clone();
            head.set(self.observe({
                let serial = serial.clone();
                let emitter = emitter.clone();
                move |event: Event<T, E>| match event {
                    Event::Next(value) => emitter.next(value),
                    Event::Failed(error) => emitter.fail(error),
                    Event::Completed => {
                        let tail = SerialDisposable::new();
                        serial.set(tail.to_disposable());
                        let emitter = emitter.clone();
                        tail.set(other.observe(move |event: Event<T, E>| emitter.on(event)));
                    }
                }
            }));
            serial.to_disposable()
        })
    }
}
