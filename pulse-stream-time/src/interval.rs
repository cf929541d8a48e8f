// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Timed sources.

use pulse_core::Signal;
use pulse_runtime::ExecutionContext;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// A signal emitting 0, 1, 2, … on every tick of a repeating timer.
///
/// Each subscription drives its own timer and counter; the signal never
/// completes on its own.
pub fn interval<E>(period: Duration, ctx: Arc<dyn ExecutionContext>) -> Signal<u64, E>
where
    E: Send + 'static,
{
    Signal::new(move |emitter| {
        let counter = Arc::new(AtomicU64::new(0));
        ctx.run_every(
            period,
            Box::new(move || {
                let tick = counter.fetch_add(1, Ordering::AcqRel);
                emitter.next(tick);
            }),
        )
    })
}

/// A signal emitting `value` once, `delay` from subscription, then
/// completing.
pub fn after<T, E>(value: T, delay: Duration, ctx: Arc<dyn ExecutionContext>) -> Signal<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Send + 'static,
{
    Signal::new(move |emitter| {
        let value = value.clone();
        ctx.run_after(
            delay,
            Box::new(move || {
                emitter.next(value);
                emitter.complete();
            }),
        )
    })
}
