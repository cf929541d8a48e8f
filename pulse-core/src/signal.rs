// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The producer/observer contract and the lift composition primitive.
//!
//! A [`Signal`] is an immutable description of how to produce events, not
//! a running computation. Subscribing runs the producer with a fresh
//! [`Emitter`]; the emitter enforces the event grammar
//! (`Next* (Completed | Failed)?`) and ties terminal delivery to upstream
//! teardown, so no operator has to re-implement either guarantee.

use crate::disposable::{Disposable, SerialDisposable};
use crate::event::Event;
use crate::observer::Observer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

type Producer<T, E> = dyn Fn(Emitter<T, E>) -> Disposable + Send + Sync;

/// An immutable, cheaply clonable description of how to produce events.
///
/// A signal owns a single capability: given an observer, start a fresh
/// production run and return the [`Disposable`] for it. Signals are cold:
/// every call to [`observe`](Signal::observe) runs the producer again,
/// independently, until the signal is wrapped by the multicast layer.
pub struct Signal<T, E> {
    producer: Arc<Producer<T, E>>,
}

impl<T, E> Clone for Signal<T, E> {
    fn clone(&self) -> Self {
        Self {
            producer: Arc::clone(&self.producer),
        }
    }
}

impl<T, E> Signal<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Create a signal from a producer closure.
    ///
    /// The producer is invoked once per subscription with a fresh
    /// [`Emitter`] and must return the disposable that cancels whatever
    /// work it started. Emitting a terminal event through the emitter
    /// disposes that returned handle automatically.
    pub fn new(producer: impl Fn(Emitter<T, E>) -> Disposable + Send + Sync + 'static) -> Self {
        Self {
            producer: Arc::new(producer),
        }
    }

    /// Start a fresh production run delivering events to `observer`.
    ///
    /// The returned disposable cancels the run; after `dispose()` returns
    /// no further events reach `observer`, although an in-flight scheduled
    /// callback may still fire and find the subscription inactive.
    pub fn observe(&self, observer: impl Observer<T, E> + 'static) -> Disposable {
        let upstream = SerialDisposable::new();
        let shared = Arc::new(EmitterState {
            active: AtomicBool::new(true),
            observer: Box::new(observer),
            upstream: upstream.clone(),
        });
        let emitter = Emitter {
            shared: Arc::clone(&shared),
        };
        let produced = (self.producer)(emitter);
        // A producer that terminated synchronously has already disposed
        // the serial slot; set() then tears `produced` down immediately.
        upstream.set(produced);
        Disposable::new(move || {
            shared.active.store(false, Ordering::Release);
            shared.upstream.dispose();
        })
    }

    /// Observe values only, ignoring terminal events.
    pub fn observe_next(&self, f: impl Fn(T) + Send + Sync + 'static) -> Disposable {
        self.observe(move |event: Event<T, E>| {
            if let Event::Next(value) = event {
                f(value);
            }
        })
    }

    /// Observe failures only.
    pub fn observe_failed(&self, f: impl Fn(E) + Send + Sync + 'static) -> Disposable {
        self.observe(move |event: Event<T, E>| {
            if let Event::Failed(error) = event {
                f(error);
            }
        })
    }

    /// Observe completion only.
    pub fn observe_completed(&self, f: impl Fn() + Send + Sync + 'static) -> Disposable {
        self.observe(move |event: Event<T, E>| {
            if let Event::Completed = event {
                f();
            }
        })
    }

    /// The composition primitive every operator is built from.
    ///
    /// `transform` is called once per subscription with the downstream
    /// emitter and returns the synthetic observer that re-interprets each
    /// incoming event, forwarding zero or more events downstream. The
    /// source's subscription handle doubles as the operator's handle, so
    /// lifted operators compose without knowing each other's internals.
    pub fn lift<U, E2>(
        &self,
        transform: impl Fn(Emitter<U, E2>) -> Box<dyn Fn(Event<T, E>) + Send + Sync>
            + Send
            + Sync
            + 'static,
    ) -> Signal<U, E2>
    where
        U: Send + 'static,
        E2: Send + 'static,
    {
        let source = self.clone();
        Signal::new(move |emitter| source.observe(transform(emitter)))
    }

    /// A signal that emits `value` once, then completes.
    pub fn just(value: T) -> Self
    where
        T: Clone + Sync,
    {
        Signal::new(move |emitter| {
            emitter.next(value.clone());
            emitter.complete();
            Disposable::noop()
        })
    }

    /// A signal that emits the given sequence, then completes.
    ///
    /// The iterator is re-run for every subscription, keeping the signal
    /// cold. The sequence is expected to be finite: emission is
    /// synchronous, and the loop can only observe a cancellation that
    /// happened on another thread, not a termination synthesized further
    /// down the same call stack.
    pub fn from_iter<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T> + Clone + Send + Sync + 'static,
    {
        Signal::new(move |emitter| {
            for value in values.clone() {
                if !emitter.is_active() {
                    break;
                }
                emitter.next(value);
            }
            emitter.complete();
            Disposable::noop()
        })
    }

    /// A signal that fails immediately.
    pub fn failed(error: E) -> Self
    where
        E: Clone + Sync,
    {
        Signal::new(move |emitter| {
            emitter.fail(error.clone());
            Disposable::noop()
        })
    }

    /// A signal that completes immediately without values.
    pub fn completed() -> Self {
        Signal::new(|emitter| {
            emitter.complete();
            Disposable::noop()
        })
    }

    /// A signal that never emits anything.
    pub fn never() -> Self {
        Signal::new(|_| Disposable::noop())
    }
}

struct EmitterState<T, E> {
    active: AtomicBool,
    observer: Box<dyn Observer<T, E>>,
    upstream: SerialDisposable,
}

/// The grammar-enforcing handle a producer delivers events through.
///
/// Values are dropped once the subscription is no longer active; at most
/// one terminal event is ever delivered; and delivering a terminal event
/// disposes the upstream subscription *before* the terminal reaches the
/// observer, so recovery operators start their replacement subscription
/// against fully released resources.
pub struct Emitter<T, E> {
    shared: Arc<EmitterState<T, E>>,
}

impl<T, E> Clone for Emitter<T, E> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T, E> Emitter<T, E> {
    /// Deliver a value, unless the subscription has terminated or been
    /// disposed.
    pub fn next(&self, value: T) {
        if self.shared.active.load(Ordering::Acquire) {
            self.shared.observer.on(Event::Next(value));
        }
    }

    /// Deliver a failure and end the sequence.
    pub fn fail(&self, error: E) {
        self.terminate(Event::Failed(error));
    }

    /// Deliver completion and end the sequence.
    pub fn complete(&self) {
        self.terminate(Event::Completed);
    }

    /// Deliver an arbitrary event, routing it through the grammar guard.
    pub fn on(&self, event: Event<T, E>) {
        match event {
            Event::Next(value) => self.next(value),
            Event::Failed(error) => self.fail(error),
            Event::Completed => self.complete(),
        }
    }

    /// Whether the subscription can still receive events.
    ///
    /// Scheduled callbacks must re-check this before emitting: disposal
    /// does not guarantee an in-flight callback is prevented from firing.
    pub fn is_active(&self) -> bool {
        self.shared.active.load(Ordering::Acquire)
    }

    fn terminate(&self, event: Event<T, E>) {
        if self.shared.active.swap(false, Ordering::AcqRel) {
            self.shared.upstream.dispose();
            self.shared.observer.on(event);
        }
    }
}

impl<T, E> Observer<T, E> for Emitter<T, E> {
    fn on(&self, event: Event<T, E>) {
        Emitter::on(self, event);
    }
}
