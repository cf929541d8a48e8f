// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Deadline supervision: synthesize a failure when the source goes
//! silent.

use parking_lot::Mutex;
use pulse_core::{DisposeBag, Event, SerialDisposable, Signal};
use pulse_runtime::ExecutionContext;
use std::sync::Arc;
use std::time::Duration;

/// Extension trait providing the `timeout` operator.
pub trait TimeoutExt<T, E> {
    /// Starts a timer before the first event and resets it on every
    /// event; if the timer fires first, `error` is synthesized as a
    /// failure and the signal ends.
    fn timeout(self, interval: Duration, error: E, ctx: Arc<dyn ExecutionContext>) -> Signal<T, E>
    where
        E: Clone + Sync;
}

impl<T, E> TimeoutExt<T, E> for Signal<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    fn timeout(self, interval: Duration, error: E, ctx: Arc<dyn ExecutionContext>) -> Signal<T, E>
    where
        E: Clone + Sync,
    {
        Signal::new(move |emitter| {
            let timer = SerialDisposable::new();
            // The error moves into the slot once per subscription; the
            // deadline task that wins takes it out.
            let slot = Arc::new(Mutex::new(Some(error.clone())));
            let arm: Arc<dyn Fn() + Send + Sync> = {
                let timer = timer.clone();
                let ctx = Arc::clone(&ctx);
                let slot = Arc::clone(&slot);
                let emitter = emitter.clone();
                Arc::new(move || {
                    let slot = Arc::clone(&slot);
                    let emitter = emitter.clone();
                    timer.set(ctx.run_after(
                        interval,
                        Box::new(move || {
                            let expired = slot.lock().take();
                            if let Some(error) = expired {
                                emitter.fail(error);
                            }
                        }),
                    ));
                })
            };
            arm();
            let upstream = self.observe({
                let arm = Arc::clone(&arm);
                move |event: Event<T, E>| match event {
                    Event::Next(value) => {
                        emitter.next(value);
                        arm();
                    }
                    terminal => emitter.on(terminal),
                }
            });
            let bag = DisposeBag::new();
            bag.add(upstream);
            bag.add(timer.to_disposable());
            bag.into_disposable()
        })
    }
}
