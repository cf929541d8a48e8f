// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Diagnostics pass-through reporting to the `tracing` sink.

use pulse_core::{Disposable, Event, Signal};
use std::fmt;
use std::sync::Arc;

/// Extension trait providing the `debug` diagnostics operator.
pub trait DebugExt<T, E> {
    /// Reports every lifecycle point of a subscription (observe, next,
    /// failed, completed, dispose) to the `tracing` sink under the
    /// `pulse` target, labelled with `label`. The event sequence is
    /// never altered.
    fn debug(self, label: &str) -> Signal<T, E>
    where
        T: fmt::Debug,
        E: fmt::Debug;
}

impl<T, E> DebugExt<T, E> for Signal<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    fn debug(self, label: &str) -> Signal<T, E>
    where
        T: fmt::Debug,
        E: fmt::Debug,
    {
        let label: Arc<str> = Arc::from(label);
        Signal::new(move |emitter| {
            tracing::debug!(target: "pulse", signal = %label, "observe");
            let subscription = self.observe({
                let label = Arc::clone(&label);
                move |event: Event<T, E>| {
                    match &event {
                        Event::Next(value) => {
                            tracing::debug!(target: "pulse", signal = %label, value = ?value, "next");
                        }
                        Event::Failed(error) => {
                            tracing::debug!(target: "pulse", signal = %label, error = ?error, "failed");
                        }
                        Event::Completed => {
                            tracing::debug!(target: "pulse", signal = %label, "completed");
                        }
                    }
                    emitter.on(event);
                }
            });
            let label = Arc::clone(&label);
            Disposable::new(move || {
                tracing::debug!(target: "pulse", signal = %label, "dispose");
                subscription.dispose();
            })
        })
    }
}
