// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Timer-driven sampling of the most recent value.

use parking_lot::Mutex;
use pulse_core::{DisposeBag, Event, Signal};
use pulse_runtime::ExecutionContext;
use std::sync::Arc;
use std::time::Duration;

/// Extension trait providing the `sample` operator.
pub trait SampleExt<T, E> {
    /// On each tick of a repeating timer, emits the most recent value
    /// seen since the previous tick, if any. Terminals pass through
    /// immediately.
    fn sample(self, interval: Duration, ctx: Arc<dyn ExecutionContext>) -> Signal<T, E>;
}

impl<T, E> SampleExt<T, E> for Signal<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    fn sample(self, interval: Duration, ctx: Arc<dyn ExecutionContext>) -> Signal<T, E> {
        Signal::new(move |emitter| {
            let latest = Arc::new(Mutex::new(None::<T>));
            let ticker = ctx.run_every(
                interval,
                Box::new({
                    let latest = Arc::clone(&latest);
                    let emitter = emitter.clone();
                    move || {
                        let sampled = latest.lock().take();
                        if let Some(value) = sampled {
                            emitter.next(value);
                        }
                    }
                }),
            );
            let upstream = self.observe({
                let latest = Arc::clone(&latest);
                move |event: Event<T, E>| match event {
                    Event::Next(value) => {
                        *latest.lock() = Some(value);
                    }
                    terminal => emitter.on(terminal),
                }
            });
            let bag = DisposeBag::new();
            bag.add(upstream);
            bag.add(ticker);
            bag.into_disposable()
        })
    }
}
