// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Bridges from tokio channels into hot signals.

use pulse_core::{PushSignal, Signal};
use tokio::sync::mpsc::UnboundedReceiver;

/// Extension trait turning an unbounded receiver into a hot signal.
pub trait UnboundedReceiverExt<T> {
    /// Consumes the receiver into a hot signal fed by a spawned
    /// forwarding task.
    ///
    /// Values sent into the channel are broadcast to the signal's current
    /// observers; closing the channel (dropping every sender) completes
    /// the signal.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime, since the forwarding
    /// task is spawned onto the ambient runtime.
    fn into_signal<E>(self) -> Signal<T, E>
    where
        E: Clone + Send + Sync + 'static;
}

impl<T> UnboundedReceiverExt<T> for UnboundedReceiver<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn into_signal<E>(mut self) -> Signal<T, E>
    where
        E: Clone + Send + Sync + 'static,
    {
        let push = PushSignal::new();
        let signal = push.signal();
        tokio::spawn(async move {
            while let Some(value) = self.recv().await {
                if push.next(value).is_err() {
                    break;
                }
            }
            let _ = push.complete();
        });
        signal
    }
}
