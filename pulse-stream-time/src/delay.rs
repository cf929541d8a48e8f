// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Order-preserving delayed delivery.

use parking_lot::Mutex;
use pulse_core::{Event, Signal};
use pulse_runtime::ExecutionContext;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

/// Extension trait providing the `delay` operator.
pub trait DelayExt<T, E> {
    /// Shifts the delivery of every event (terminals included) by
    /// `interval`, preserving relative order.
    fn delay(self, interval: Duration, ctx: Arc<dyn ExecutionContext>) -> Signal<T, E>;
}

impl<T, E> DelayExt<T, E> for Signal<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    fn delay(self, interval: Duration, ctx: Arc<dyn ExecutionContext>) -> Signal<T, E> {
        Signal::new(move |emitter| {
            // All timers carry the same interval, so delivering the front
            // of the queue on each fire preserves the original order even
            // if the scheduler wakes the timers out of order.
            let queue: Arc<Mutex<VecDeque<Event<T, E>>>> = Arc::new(Mutex::new(VecDeque::new()));
            let ctx = Arc::clone(&ctx);
            self.observe(move |event: Event<T, E>| {
                queue.lock().push_back(event);
                let queue = Arc::clone(&queue);
                let emitter = emitter.clone();
                // Timer handles are not retained: after disposal the
                // emitter is inactive, so a late fire delivers nothing.
                let _ = ctx.run_after(
                    interval,
                    Box::new(move || {
                        let due = queue.lock().pop_front();
                        if let Some(event) = due {
                            emitter.on(event);
                        }
                    }),
                );
            })
        })
    }
}
