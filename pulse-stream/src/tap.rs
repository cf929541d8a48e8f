// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Side effects on a passing event stream.

use pulse_core::{Event, Signal};
use std::sync::Arc;

/// Extension trait providing the `tap` operator.
pub trait TapExt<T, E> {
    /// Invokes `f` with a reference to every event, forwarding the event
    /// unchanged.
    fn tap<F>(self, f: F) -> Signal<T, E>
    where
        F: Fn(&Event<T, E>) + Send + Sync + 'static;
}

impl<T, E> TapExt<T, E> for Signal<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    fn tap<F>(self, f: F) -> Signal<T, E>
    where
        F: Fn(&Event<T, E>) + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        self.lift(move |emitter| {
            let f = Arc::clone(&f);
            Box::new(move |event: Event<T, E>| {
                f(&event);
                emitter.on(event);
            })
        })
    }
}
