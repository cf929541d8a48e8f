// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Gate-controlled value suppression.

use pulse_core::{DisposeBag, Event, Signal};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Extension trait providing the `pausable` operator.
pub trait PausableExt<T, E> {
    /// Suppresses values while the most recent boolean observed on
    /// `gate` is `false`.
    ///
    /// The gate starts open; a gate terminal freezes the last gate state
    /// without affecting the source. Terminal events from the source
    /// always pass through, whatever the gate says.
    fn pausable<E2>(self, gate: Signal<bool, E2>) -> Signal<T, E>
    where
        E2: Send + 'static;
}

impl<T, E> PausableExt<T, E> for Signal<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    fn pausable<E2>(self, gate: Signal<bool, E2>) -> Signal<T, E>
    where
        E2: Send + 'static,
    {
        Signal::new(move |emitter| {
            let open = Arc::new(AtomicBool::new(true));
            let bag = DisposeBag::new();

            bag.add(gate.observe({
                let open = Arc::clone(&open);
                move |event: Event<bool, E2>| {
                    if let Event::Next(allowed) = event {
                        open.store(allowed, Ordering::Release);
                    }
                }
            }));

            bag.add(self.observe({
                let open = Arc::clone(&open);
                move |event: Event<T, E>| match event {
                    Event::Next(value) => {
                        if open.load(Ordering::Acquire) {
                            emitter.next(value);
                        }
                    }
                    terminal => emitter.on(terminal),
                }
            }));

            bag.into_disposable()
        })
    }
}
