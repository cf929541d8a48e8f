// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Hot, multicast subjects.
//!
//! A [`Subject`] is a signal that is also an observer: events fed into it
//! are broadcast synchronously, in registration order, to every currently
//! registered observer. [`ReplaySubject`] additionally buffers recent
//! values for late observers, and [`PushSignal`] exposes only the feeding
//! side for callers who drive a stream imperatively.
//!
//! ## Reentrancy
//!
//! Broadcast state is guarded by a plain (non-recursive) mutex. Every
//! broadcast snapshots the observer list inside the critical section and
//! delivers outside it, so an observer's side effect may feed the same
//! subject again without deadlocking. Each observer always sees a
//! grammar-conforming sequence; observers the outer broadcast has not yet
//! reached will see such a nested event before the outer one.

use crate::disposable::Disposable;
use crate::errors::SubjectError;
use crate::event::Event;
use crate::observer::Observer;
use crate::signal::Signal;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

type SharedObserver<T, E> = Arc<dyn Observer<T, E>>;

#[derive(Clone)]
enum Terminal<E> {
    Completed,
    Failed(E),
}

impl<E: Clone> Terminal<E> {
    fn to_event<T>(&self) -> Event<T, E> {
        match self {
            Terminal::Completed => Event::Completed,
            Terminal::Failed(error) => Event::Failed(error.clone()),
        }
    }
}

struct SubjectState<T, E> {
    terminal: Option<Terminal<E>>,
    observers: Vec<(u64, SharedObserver<T, E>)>,
    next_id: u64,
}

/// A hot subject with no buffered history.
///
/// Observers registering after an event has been broadcast do not see it;
/// observers registering after a terminal event immediately receive that
/// terminal, keeping every observed sequence inside the grammar.
///
/// Cheap to clone; all clones share the same broadcast state.
pub struct Subject<T, E> {
    state: Arc<Mutex<SubjectState<T, E>>>,
}

impl<T, E> Clone for Subject<T, E> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T, E> Default for Subject<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> Subject<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// Create a subject with no observers.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(SubjectState {
                terminal: None,
                observers: Vec::new(),
                next_id: 0,
            })),
        }
    }

    /// Feed one event to every currently registered observer.
    ///
    /// Values are broadcast to a snapshot of the observer list taken
    /// under the subject lock; the lock is released before any observer
    /// runs. A terminal event is latched, the observer list is drained,
    /// and every further `send` returns [`SubjectError::Terminated`].
    pub fn send(&self, event: Event<T, E>) -> Result<(), SubjectError> {
        match event {
            Event::Next(value) => {
                let snapshot: Vec<SharedObserver<T, E>> = {
                    let state = self.state.lock();
                    if state.terminal.is_some() {
                        return Err(SubjectError::Terminated);
                    }
                    state
                        .observers
                        .iter()
                        .map(|(_, observer)| Arc::clone(observer))
                        .collect()
                };
                for observer in snapshot {
                    observer.on(Event::Next(value.clone()));
                }
            }
            Event::Failed(error) => {
                self.send_terminal(Terminal::Failed(error))?;
            }
            Event::Completed => {
                self.send_terminal(Terminal::Completed)?;
            }
        }
        Ok(())
    }

    fn send_terminal(&self, terminal: Terminal<E>) -> Result<(), SubjectError> {
        let drained = {
            let mut state = self.state.lock();
            if state.terminal.is_some() {
                return Err(SubjectError::Terminated);
            }
            state.terminal = Some(terminal.clone());
            std::mem::take(&mut state.observers)
        };
        for (_, observer) in drained {
            observer.on(terminal.to_event());
        }
        Ok(())
    }

    /// Broadcast a value.
    pub fn next(&self, value: T) -> Result<(), SubjectError> {
        self.send(Event::Next(value))
    }

    /// Broadcast a failure and terminate the subject.
    pub fn fail(&self, error: E) -> Result<(), SubjectError> {
        self.send(Event::Failed(error))
    }

    /// Broadcast completion and terminate the subject.
    pub fn complete(&self) -> Result<(), SubjectError> {
        self.send(Event::Completed)
    }

    /// Whether a terminal event has been broadcast.
    pub fn is_terminated(&self) -> bool {
        self.state.lock().terminal.is_some()
    }

    /// Number of currently registered observers.
    pub fn observer_count(&self) -> usize {
        self.state.lock().observers.len()
    }

    /// Register a downstream observer.
    ///
    /// The returned disposable removes the observer from the broadcast
    /// list. If the subject has already terminated, the observer receives
    /// the latched terminal immediately and an already-disposed handle is
    /// returned.
    pub fn observe(&self, observer: impl Observer<T, E> + 'static) -> Disposable {
        let observer: SharedObserver<T, E> = Arc::new(observer);
        let mut registered_id = None;
        let replay = {
            let mut state = self.state.lock();
            match &state.terminal {
                Some(terminal) => Some(terminal.clone()),
                None => {
                    let id = state.next_id;
                    state.next_id += 1;
                    state.observers.push((id, Arc::clone(&observer)));
                    registered_id = Some(id);
                    None
                }
            }
        };
        if let Some(terminal) = replay {
            observer.on(terminal.to_event());
            return Disposable::disposed();
        }
        let state = Arc::clone(&self.state);
        let id = registered_id.unwrap_or_default();
        Disposable::new(move || {
            state.lock().observers.retain(|(oid, _)| *oid != id);
        })
    }

    /// View this subject as a cold-subscribable [`Signal`] handle.
    pub fn to_signal(&self) -> Signal<T, E> {
        let subject = self.clone();
        Signal::new(move |emitter| subject.observe(move |event: Event<T, E>| emitter.on(event)))
    }
}

impl<T, E> Observer<T, E> for Subject<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    // Events arriving after termination are dropped: as an observer the
    // subject sits inside pipelines whose emitters already enforce the
    // grammar, so the rejection carries no information.
    fn on(&self, event: Event<T, E>) {
        let _ = self.send(event);
    }
}

struct ReplayState<T, E> {
    limit: Option<usize>,
    buffer: VecDeque<T>,
    terminal: Option<Terminal<E>>,
    observers: Vec<(u64, SharedObserver<T, E>)>,
    next_id: u64,
}

impl<T, E> ReplayState<T, E> {
    fn push(&mut self, value: T) {
        if let Some(limit) = self.limit {
            if limit == 0 {
                return;
            }
            while self.buffer.len() >= limit {
                self.buffer.pop_front();
            }
        }
        self.buffer.push_back(value);
    }
}

/// A subject that buffers the most recent values for late observers.
///
/// A newly registered observer first receives the buffered history in
/// original order (and the terminal, if one was reached), then live
/// events. `limit` bounds the buffer to the last `limit` values;
/// [`ReplaySubject::unbounded`] keeps everything.
pub struct ReplaySubject<T, E> {
    state: Arc<Mutex<ReplayState<T, E>>>,
}

impl<T, E> Clone for ReplaySubject<T, E> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T, E> ReplaySubject<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// A replay subject keeping the last `limit` values.
    ///
    /// `limit` of zero buffers nothing: late observers get live events
    /// only, which is exactly the publish (non-replaying) behavior.
    pub fn new(limit: usize) -> Self {
        Self::with_limit(Some(limit))
    }

    /// A replay subject that buffers every value.
    pub fn unbounded() -> Self {
        Self::with_limit(None)
    }

    fn with_limit(limit: Option<usize>) -> Self {
        Self {
            state: Arc::new(Mutex::new(ReplayState {
                limit,
                buffer: VecDeque::new(),
                terminal: None,
                observers: Vec::new(),
                next_id: 0,
            })),
        }
    }

    /// Feed one event: buffer values, latch terminals, broadcast to the
    /// current observers. Same locking discipline as [`Subject::send`].
    pub fn send(&self, event: Event<T, E>) -> Result<(), SubjectError> {
        match event {
            Event::Next(value) => {
                let snapshot: Vec<SharedObserver<T, E>> = {
                    let mut state = self.state.lock();
                    if state.terminal.is_some() {
                        return Err(SubjectError::Terminated);
                    }
                    state.push(value.clone());
                    state
                        .observers
                        .iter()
                        .map(|(_, observer)| Arc::clone(observer))
                        .collect()
                };
                for observer in snapshot {
                    observer.on(Event::Next(value.clone()));
                }
            }
            Event::Failed(error) => self.send_terminal(Terminal::Failed(error))?,
            Event::Completed => self.send_terminal(Terminal::Completed)?,
        }
        Ok(())
    }

    fn send_terminal(&self, terminal: Terminal<E>) -> Result<(), SubjectError> {
        let drained = {
            let mut state = self.state.lock();
            if state.terminal.is_some() {
                return Err(SubjectError::Terminated);
            }
            state.terminal = Some(terminal.clone());
            std::mem::take(&mut state.observers)
        };
        for (_, observer) in drained {
            observer.on(terminal.to_event());
        }
        Ok(())
    }

    /// Broadcast a value.
    pub fn next(&self, value: T) -> Result<(), SubjectError> {
        self.send(Event::Next(value))
    }

    /// Broadcast a failure and terminate.
    pub fn fail(&self, error: E) -> Result<(), SubjectError> {
        self.send(Event::Failed(error))
    }

    /// Broadcast completion and terminate.
    pub fn complete(&self) -> Result<(), SubjectError> {
        self.send(Event::Completed)
    }

    /// Whether a terminal event has been reached.
    pub fn is_terminated(&self) -> bool {
        self.state.lock().terminal.is_some()
    }

    /// Number of currently registered observers.
    pub fn observer_count(&self) -> usize {
        self.state.lock().observers.len()
    }

    /// Register an observer: buffered history first, then live events.
    pub fn observe(&self, observer: impl Observer<T, E> + 'static) -> Disposable {
        let observer: SharedObserver<T, E> = Arc::new(observer);
        let mut registered_id = None;
        let (history, terminal) = {
            let mut state = self.state.lock();
            let history: Vec<T> = state.buffer.iter().cloned().collect();
            let terminal = state.terminal.clone();
            if terminal.is_none() {
                let id = state.next_id;
                state.next_id += 1;
                state.observers.push((id, Arc::clone(&observer)));
                registered_id = Some(id);
            }
            (history, terminal)
        };
        for value in history {
            observer.on(Event::Next(value));
        }
        if let Some(terminal) = terminal {
            observer.on(terminal.to_event());
            return Disposable::disposed();
        }
        let state = Arc::clone(&self.state);
        let id = registered_id.unwrap_or_default();
        Disposable::new(move || {
            state.lock().observers.retain(|(oid, _)| *oid != id);
        })
    }

    /// View this replay subject as a [`Signal`] handle.
    pub fn to_signal(&self) -> Signal<T, E> {
        let subject = self.clone();
        Signal::new(move |emitter| subject.observe(move |event: Event<T, E>| emitter.on(event)))
    }
}

impl<T, E> Observer<T, E> for ReplaySubject<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    fn on(&self, event: Event<T, E>) {
        let _ = self.send(event);
    }
}

/// An imperative entry point into a pipeline.
///
/// Exposes only the event-feeding interface plus a [`Signal`] view, with
/// no subscribe-time side effects: the broadcast capability of a subject
/// without its subscription internals.
pub struct PushSignal<T, E> {
    subject: Subject<T, E>,
}

impl<T, E> Clone for PushSignal<T, E> {
    fn clone(&self) -> Self {
        Self {
            subject: self.subject.clone(),
        }
    }
}

impl<T, E> Default for PushSignal<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> PushSignal<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// Create a push signal with no observers.
    pub fn new() -> Self {
        Self {
            subject: Subject::new(),
        }
    }

    /// Push a value to all current observers of the signal view.
    pub fn next(&self, value: T) -> Result<(), SubjectError> {
        self.subject.next(value)
    }

    /// Push a failure, terminating the signal.
    pub fn fail(&self, error: E) -> Result<(), SubjectError> {
        self.subject.fail(error)
    }

    /// Push completion, terminating the signal.
    pub fn complete(&self) -> Result<(), SubjectError> {
        self.subject.complete()
    }

    /// The observable view of this push signal.
    pub fn signal(&self) -> Signal<T, E> {
        self.subject.to_signal()
    }

    /// An observer handle feeding this signal, for bridging external
    /// event sources into a pipeline.
    pub fn observer(&self) -> impl Observer<T, E> {
        self.subject.clone()
    }
}
