// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error recovery: `flat_map_error` and bounded `retry`.

use parking_lot::Mutex;
use pulse_core::{Emitter, Event, SerialDisposable, Signal};
use std::sync::Arc;

/// Extension trait providing the error-recovery operators.
pub trait RecoverExt<T, E> {
    /// On failure, subscribes the signal produced by `recover` and
    /// forwards its events; failures of the recovery signal propagate
    /// uncaught.
    ///
    /// The failed subscription is fully torn down before the recovery
    /// subscription starts: terminal delivery disposes the upstream
    /// first, and the single-slot handover re-disposes it on
    /// replacement.
    fn flat_map_error<E2, F>(self, recover: F) -> Signal<T, E2>
    where
        E2: Send + 'static,
        F: Fn(E) -> Signal<T, E2> + Send + Sync + 'static;

    /// On failure, resubscribes the original producer up to `times`
    /// additional times; once the budget is exhausted the final failure
    /// propagates. Completion at any attempt ends the loop.
    fn retry(self, times: usize) -> Signal<T, E>;
}

impl<T, E> RecoverExt<T, E> for Signal<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    fn flat_map_error<E2, F>(self, recover: F) -> Signal<T, E2>
    where
        E2: Send + 'static,
        F: Fn(E) -> Signal<T, E2> + Send + Sync + 'static,
    {
        let recover = Arc::new(recover);
        Signal::new(move |emitter| {
            let serial = SerialDisposable::new();
            let primary = SerialDisposable::new();
            serial.set(primary.to_disposable());
            primary.set(self.observe({
                let serial = serial.clone();
                let recover = Arc::clone(&recover);
                move |event: Event<T, E>| match event {
                    Event::Next(value) => emitter.next(value),
                    Event::Completed => emitter.complete(),
                    Event::Failed(error) => {
                        let fallback = SerialDisposable::new();
                        serial.set(fallback.to_disposable());
                        let emitter = emitter.clone();
                        fallback
                            .set(recover(error).observe(move |event: Event<T, E2>| emitter.on(event)));
                    }
                }
            }));
            serial.to_disposable()
        })
    }

    fn retry(self, times: usize) -> Signal<T, E> {
        Signal::new(move |emitter| {
            let serial = SerialDisposable::new();
            let remaining = Arc::new(Mutex::new(times));
            subscribe_attempt(self.clone(), emitter, serial.clone(), remaining);
            serial.to_disposable()
        })
    }
}

fn subscribe_attempt<T, E>(
    source: Signal<T, E>,
    emitter: Emitter<T, E>,
    serial: SerialDisposable,
    remaining: Arc<Mutex<usize>>,
) where
    T: Send + 'static,
    E: Send + 'static,
{
    let attempt = SerialDisposable::new();
    serial.set(attempt.to_disposable());
    attempt.set(source.clone().observe(move |event: Event<T, E>| match event {
        Event::Next(value) => emitter.next(value),
        Event::Completed => emitter.complete(),
        Event::Failed(error) => {
            let retry_now = {
                let mut remaining = remaining.lock();
                if *remaining > 0 {
                    *remaining -= 1;
                    true
                } else {
                    false
                }
            };
            if retry_now {
                subscribe_attempt(
                    source.clone(),
                    emitter.clone(),
                    serial.clone(),
                    Arc::clone(&remaining),
                );
            } else {
                emitter.fail(error);
            }
        }
    }));
}
