// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Bridge from a signal subscription to a `futures` stream.

use futures::channel::mpsc;
use futures::Stream;
use parking_lot::Mutex;
use pulse_core::{Disposable, Event, Signal};
use std::pin::Pin;
use std::task::{Context, Poll};

/// A [`Stream`] over one signal subscription.
///
/// Values arrive as `Ok`, a failure as the final `Err`, and completion
/// closes the stream. Dropping the stream disposes the subscription.
pub struct SignalStream<T, E> {
    receiver: mpsc::UnboundedReceiver<Result<T, E>>,
    subscription: Disposable,
}

impl<T, E> Stream for SignalStream<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    type Item = Result<T, E>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.receiver).poll_next(cx)
    }
}

impl<T, E> Drop for SignalStream<T, E> {
    fn drop(&mut self) {
        self.subscription.dispose();
    }
}

/// Extension trait turning a signal into a [`Stream`].
pub trait SignalStreamExt<T, E> {
    /// Subscribes and exposes the event sequence as an async stream of
    /// `Result<T, E>`.
    fn into_stream(self) -> SignalStream<T, E>;
}

impl<T, E> SignalStreamExt<T, E> for Signal<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    fn into_stream(self) -> SignalStream<T, E> {
        let (sender, receiver) = mpsc::unbounded();
        let sender = Mutex::new(Some(sender));
        let subscription = self.observe(move |event: Event<T, E>| match event {
            Event::Next(value) => {
                if let Some(sender) = sender.lock().as_ref() {
                    let _ = sender.unbounded_send(Ok(value));
                }
            }
            Event::Failed(error) => {
                if let Some(sender) = sender.lock().take() {
                    let _ = sender.unbounded_send(Err(error));
                }
            }
            // Dropping the sender closes the stream after the buffered
            // items drain.
            Event::Completed => {
                sender.lock().take();
            }
        });
        SignalStream {
            receiver,
            subscription,
        }
    }
}
