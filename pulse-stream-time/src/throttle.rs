// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Leading-edge throttle.

use pulse_core::{DisposeBag, Event, SerialDisposable, Signal};
use pulse_runtime::ExecutionContext;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Extension trait providing the `throttle` operator.
pub trait ThrottleExt<T, E> {
    /// Emits a value immediately, then suppresses (drops) subsequent
    /// values until `interval` has elapsed since the last emission.
    fn throttle(self, interval: Duration, ctx: Arc<dyn ExecutionContext>) -> Signal<T, E>;
}

impl<T, E> ThrottleExt<T, E> for Signal<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    fn throttle(self, interval: Duration, ctx: Arc<dyn ExecutionContext>) -> Signal<T, E> {
        Signal::new(move |emitter| {
            let suppressing = Arc::new(AtomicBool::new(false));
            let cooldown = SerialDisposable::new();
            let upstream = self.observe({
                let suppressing = Arc::clone(&suppressing);
                let cooldown = cooldown.clone();
                let ctx = Arc::clone(&ctx);
                move |event: Event<T, E>| match event {
                    Event::Next(value) => {
                        if !suppressing.swap(true, Ordering::AcqRel) {
                            emitter.next(value);
                            let suppressing = Arc::clone(&suppressing);
                            cooldown.set(ctx.run_after(
                                interval,
                                Box::new(move || suppressing.store(false, Ordering::Release)),
                            ));
                        }
                    }
                    terminal => emitter.on(terminal),
                }
            });
            let bag = DisposeBag::new();
            bag.add(upstream);
            bag.add(cooldown.to_disposable());
            bag.into_disposable()
        })
    }
}
