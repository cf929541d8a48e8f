// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Trailing debounce.
//!
//! Each value schedules a deferred re-emission after the interval; a
//! newer value cancels the pending one, so only the last value in a quiet
//! period is ultimately emitted. When the source completes, any pending
//! value is flushed immediately before completion. Failures pass through
//! without debounce.

use parking_lot::Mutex;
use pulse_core::{DisposeBag, Event, SerialDisposable, Signal};
use pulse_runtime::ExecutionContext;
use std::sync::Arc;
use std::time::Duration;

/// Extension trait providing the `debounce` operator.
pub trait DebounceExt<T, E> {
    /// Emits a value only once `interval` has elapsed without a newer
    /// one.
    fn debounce(self, interval: Duration, ctx: Arc<dyn ExecutionContext>) -> Signal<T, E>;
}

impl<T, E> DebounceExt<T, E> for Signal<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    fn debounce(self, interval: Duration, ctx: Arc<dyn ExecutionContext>) -> Signal<T, E> {
        Signal::new(move |emitter| {
            let pending = SerialDisposable::new();
            let latest = Arc::new(Mutex::new(None::<T>));
            let upstream = self.observe({
                let pending = pending.clone();
                let latest = Arc::clone(&latest);
                let ctx = Arc::clone(&ctx);
                move |event: Event<T, E>| match event {
                    Event::Next(value) => {
                        *latest.lock() = Some(value);
                        let latest = Arc::clone(&latest);
                        let emitter = emitter.clone();
                        pending.set(ctx.run_after(
                            interval,
                            Box::new(move || {
                                let quiet = latest.lock().take();
                                if let Some(value) = quiet {
                                    emitter.next(value);
                                }
                            }),
                        ));
                    }
                    Event::Failed(error) => emitter.fail(error),
                    Event::Completed => {
                        let flushed = latest.lock().take();
                        if let Some(value) = flushed {
                            emitter.next(value);
                        }
                        emitter.complete();
                    }
                }
            });
            let bag = DisposeBag::new();
            bag.add(upstream);
            bag.add(pending.to_disposable());
            bag.into_disposable()
        })
    }
}
