// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Two-source interleaving.

use pulse_core::{DisposeBag, Event, Signal};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Extension trait providing the `merge_with` operator.
pub trait MergeWithExt<T, E> {
    /// Interleaves values from both sources as they arrive.
    ///
    /// Completes only once both sources have completed; the first failure
    /// from either ends the merged signal immediately.
    fn merge_with(self, other: Signal<T, E>) -> Signal<T, E>;
}

impl<T, E> MergeWithExt<T, E> for Signal<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    fn merge_with(self, other: Signal<T, E>) -> Signal<T, E> {
        Signal::new(move |emitter| {
            let remaining = Arc::new(AtomicUsize::new(2));
            let bag = DisposeBag::new();
            for source in [self.clone(), other.clone()] {
                let remaining = Arc::clone(&remaining);
                let emitter = emitter.clone();
                bag.add(source.observe(move |event: Event<T, E>| match event {
                    Event::Next(value) => emitter.next(value),
                    Event::Failed(error) => emitter.fail(error),
                    Event::Completed => {
                        if remaining.fetch_sub(1, Ordering::AcqRel) == 1 {
                            emitter.complete();
                        }
                    }
                }));
            }
            bag.into_disposable()
        })
    }
}
