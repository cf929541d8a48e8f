// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Race between two signals: the first to emit any event wins.

use pulse_core::{DisposeBag, Event, SerialDisposable, Signal};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const UNDECIDED: usize = 0;
const LEFT: usize = 1;
const RIGHT: usize = 2;

/// Extension trait providing the `amb_with` operator.
pub trait AmbExt<T, E> {
    /// Subscribes to both signals; once either produces its first event,
    /// the other is disposed and the winner is forwarded exclusively.
    fn amb_with(self, other: Signal<T, E>) -> Signal<T, E>;
}

impl<T, E> AmbExt<T, E> for Signal<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    fn amb_with(self, other: Signal<T, E>) -> Signal<T, E> {
        Signal::new(move |emitter| {
            let winner = Arc::new(AtomicUsize::new(UNDECIDED));
            let left_slot = SerialDisposable::new();
            let right_slot = SerialDisposable::new();

            left_slot.set(self.observe({
                let winner = Arc::clone(&winner);
                let right_slot = right_slot.clone();
                let emitter = emitter.clone();
                move |event: Event<T, E>| {
                    match winner.compare_exchange(
                        UNDECIDED,
                        LEFT,
                        Ordering::AcqRel,
                        Ordering::Acquire,
                    ) {
                        Ok(_) => {
                            right_slot.dispose();
                            emitter.on(event);
                        }
                        Err(LEFT) => emitter.on(event),
                        Err(_) => {}
                    }
                }
            }));

            right_slot.set(other.observe({
                let winner = Arc::clone(&winner);
                let left_slot = left_slot.clone();
                let emitter = emitter.clone();
                move |event: Event<T, E>| {
                    match winner.compare_exchange(
                        UNDECIDED,
                        RIGHT,
                        Ordering::AcqRel,
                        Ordering::Acquire,
                    ) {
                        Ok(_) => {
                            left_slot.dispose();
                            emitter.on(event);
                        }
                        Err(RIGHT) => emitter.on(event),
                        Err(_) => {}
                    }
                }
            }));

            let bag = DisposeBag::new();
            bag.add(left_slot.to_disposable());
            bag.add(right_slot.to_disposable());
            bag.into_disposable()
        })
    }
}
