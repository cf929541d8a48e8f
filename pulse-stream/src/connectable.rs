// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Deferred-start multicast: connectable signals, replay buffering and
//! ref-counted auto-connect.

use parking_lot::Mutex;
use pulse_core::{Disposable, Event, Observer, ReplaySubject, Signal};
use std::sync::Arc;

/// A signal whose underlying production starts only on [`connect`].
///
/// Observers may register before or after connecting; they all share the
/// single underlying run through an internal replay subject (buffering
/// nothing for `publish`, the last `limit` values for `replay`).
///
/// [`connect`]: ConnectableSignal::connect
pub struct ConnectableSignal<T, E> {
    source: Signal<T, E>,
    subject: ReplaySubject<T, E>,
    connection: Arc<Mutex<Option<Disposable>>>,
}

impl<T, E> Clone for ConnectableSignal<T, E> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            subject: self.subject.clone(),
            connection: Arc::clone(&self.connection),
        }
    }
}

impl<T, E> ConnectableSignal<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    fn new(source: Signal<T, E>, subject: ReplaySubject<T, E>) -> Self {
        Self {
            source,
            subject,
            connection: Arc::new(Mutex::new(None)),
        }
    }

    /// Register an observer without starting production.
    pub fn observe(&self, observer: impl Observer<T, E> + 'static) -> Disposable {
        self.subject.observe(observer)
    }

    /// The shared signal view over this connectable.
    pub fn to_signal(&self) -> Signal<T, E> {
        self.subject.to_signal()
    }

    /// Start the underlying production.
    ///
    /// Policy: connecting while already connected never starts a second
    /// production. The same handle for the ongoing run is returned, and
    /// disposing it (through any copy) stops the shared run for every
    /// observer. Connecting again after disposal starts a fresh run.
    pub fn connect(&self) -> Disposable {
        let mut connection = self.connection.lock();
        if let Some(existing) = connection.as_ref() {
            if !existing.is_disposed() {
                return existing.clone();
            }
        }
        tracing::trace!(target: "pulse", "connectable: starting production");
        let run = self.source.observe(self.subject.clone());
        let handle = Disposable::new(move || run.dispose());
        *connection = Some(handle.clone());
        handle
    }

    /// Wrap this connectable so production follows the observer count:
    /// the first registration connects, and when the count returns to
    /// zero the connection is disposed. A later registration triggers a
    /// fresh connection.
    ///
    /// Note that a run that *terminated* (rather than being disposed)
    /// latches its terminal in the shared subject, so observers arriving
    /// afterwards receive that terminal immediately.
    pub fn ref_count(&self) -> Signal<T, E> {
        let connectable = self.clone();
        let shared = Arc::new(Mutex::new(RefCountState {
            observers: 0,
            connection: None,
        }));
        Signal::new(move |emitter| {
            let registration = connectable.observe(move |event: Event<T, E>| emitter.on(event));
            {
                let mut shared = shared.lock();
                shared.observers += 1;
                if shared.observers == 1 {
                    shared.connection = Some(connectable.connect());
                }
            }
            let shared = Arc::clone(&shared);
            Disposable::new(move || {
                registration.dispose();
                let connection = {
                    let mut shared = shared.lock();
                    shared.observers -= 1;
                    if shared.observers == 0 {
                        shared.connection.take()
                    } else {
                        None
                    }
                };
                if let Some(connection) = connection {
                    connection.dispose();
                }
            })
        })
    }
}

struct RefCountState {
    observers: usize,
    connection: Option<Disposable>,
}

/// Extension trait wrapping a cold signal into the multicast layer.
pub trait MulticastExt<T, E>: Sized {
    /// A connectable that buffers nothing: observers receive only events
    /// emitted while they are registered.
    fn publish(self) -> ConnectableSignal<T, E>;

    /// A connectable that replays the last `limit` values (plus the
    /// terminal, if reached) to every new observer.
    fn replay(self, limit: usize) -> ConnectableSignal<T, E>;

    /// A connectable that replays the entire history.
    fn replay_all(self) -> ConnectableSignal<T, E>;

    /// Ref-counted shared signal replaying the last `limit` values:
    /// `replay(limit)` + `ref_count`.
    fn share(self, limit: usize) -> Signal<T, E>;
}

impl<T, E> MulticastExt<T, E> for Signal<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    fn publish(self) -> ConnectableSignal<T, E> {
        ConnectableSignal::new(self, ReplaySubject::new(0))
    }

    fn replay(self, limit: usize) -> ConnectableSignal<T, E> {
        ConnectableSignal::new(self, ReplaySubject::new(limit))
    }

    fn replay_all(self) -> ConnectableSignal<T, E> {
        ConnectableSignal::new(self, ReplaySubject::unbounded())
    }

    fn share(self, limit: usize) -> Signal<T, E> {
        self.replay(limit).ref_count()
    }
}
