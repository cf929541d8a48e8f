// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Flattening a signal of inner signals under the three policies: merge
//! (concurrent), switch-to-latest (newest wins) and concat (strict
//! arrival order).

use parking_lot::Mutex;
use pulse_core::{Disposable, DisposeBag, Emitter, Event, SerialDisposable, Signal};
use std::collections::VecDeque;
use std::sync::Arc;

use crate::transform::TransformExt;

/// Extension trait providing the flattening policies for a signal of
/// signals.
pub trait FlattenExt<T, E> {
    /// Subscribes every inner signal as it arrives, forwarding all their
    /// values concurrently.
    ///
    /// Completes once the outer signal and every subscribed inner signal
    /// have completed; any inner or outer failure ends everything
    /// immediately.
    fn merge(self) -> Signal<T, E>;

    /// Forwards only the most recently arrived inner signal, disposing
    /// the previous inner subscription before the new one starts.
    ///
    /// Completes once the outer signal and the currently active inner
    /// signal have completed.
    fn switch_to_latest(self) -> Signal<T, E>;

    /// Subscribes inner signals strictly in arrival order, starting the
    /// next only after the previous one completed.
    ///
    /// A failure from the active inner signal or the outer signal ends
    /// the flattening.
    fn concat(self) -> Signal<T, E>;
}

struct MergeState {
    outer_done: bool,
    active: usize,
}

struct SwitchState {
    outer_done: bool,
    inner_active: bool,
    generation: u64,
}

struct ConcatState<T, E> {
    queue: VecDeque<Signal<T, E>>,
    inner_active: bool,
    outer_done: bool,
}

impl<T, E> FlattenExt<T, E> for Signal<Signal<T, E>, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    fn merge(self) -> Signal<T, E> {
        Signal::new(move |emitter| {
            let state = Arc::new(Mutex::new(MergeState {
                outer_done: false,
                active: 0,
            }));
            let bag = Arc::new(DisposeBag::new());

            let outer = self.observe({
                let state = Arc::clone(&state);
                let bag = Arc::clone(&bag);
                let emitter = emitter.clone();
                move |event: Event<Signal<T, E>, E>| match event {
                    Event::Next(inner) => {
                        state.lock().active += 1;
                        let subscription = inner.observe({
                            let state = Arc::clone(&state);
                            let emitter = emitter.clone();
                            move |event: Event<T, E>| match event {
                                Event::Next(value) => emitter.next(value),
                                Event::Failed(error) => emitter.fail(error),
                                Event::Completed => {
                                    let finished = {
                                        let mut state = state.lock();
                                        state.active -= 1;
                                        state.outer_done && state.active == 0
                                    };
                                    if finished {
                                        emitter.complete();
                                    }
                                }
                            }
                        });
                        bag.add(subscription);
                    }
                    Event::Failed(error) => emitter.fail(error),
                    Event::Completed => {
                        let finished = {
                            let mut state = state.lock();
                            state.outer_done = true;
                            state.active == 0
                        };
                        if finished {
                            emitter.complete();
                        }
                    }
                }
            });
            bag.add(outer);

            let bag = Arc::clone(&bag);
            Disposable::new(move || bag.dispose())
        })
    }

    fn switch_to_latest(self) -> Signal<T, E> {
        Signal::new(move |emitter| {
            let state = Arc::new(Mutex::new(SwitchState {
                outer_done: false,
                inner_active: false,
                generation: 0,
            }));
            let inner_serial = SerialDisposable::new();

            let outer = self.observe({
                let state = Arc::clone(&state);
                let inner_serial = inner_serial.clone();
                let emitter = emitter.clone();
                move |event: Event<Signal<T, E>, E>| match event {
                    Event::Next(inner) => {
                        let generation = {
                            let mut state = state.lock();
                            state.generation += 1;
                            state.inner_active = true;
                            state.generation
                        };
                        // Installing the fresh slot disposes the previous
                        // inner subscription before the new one starts.
                        let slot = SerialDisposable::new();
                        inner_serial.set(slot.to_disposable());
                        slot.set(inner.observe({
                            let state = Arc::clone(&state);
                            let emitter = emitter.clone();
                            move |event: Event<T, E>| match event {
                                Event::Next(value) => emitter.next(value),
                                Event::Failed(error) => emitter.fail(error),
                                Event::Completed => {
                                    let finished = {
                                        let mut state = state.lock();
                                        if state.generation == generation {
                                            state.inner_active = false;
                                            state.outer_done
                                        } else {
                                            // A replaced inner raced its
                                            // completion; the live inner is
                                            // unaffected.
                                            false
                                        }
                                    };
                                    if finished {
                                        emitter.complete();
                                    }
                                }
                            }
                        }));
                    }
                    Event::Failed(error) => emitter.fail(error),
                    Event::Completed => {
                        let finished = {
                            let mut state = state.lock();
                            state.outer_done = true;
                            !state.inner_active
                        };
                        if finished {
                            emitter.complete();
                        }
                    }
                }
            });

            let bag = DisposeBag::new();
            bag.add(outer);
            bag.add(inner_serial.to_disposable());
            bag.into_disposable()
        })
    }

    fn concat(self) -> Signal<T, E> {
        Signal::new(move |emitter| {
            let state = Arc::new(Mutex::new(ConcatState {
                queue: VecDeque::new(),
                inner_active: false,
                outer_done: false,
            }));
            let serial = SerialDisposable::new();

            let outer = self.observe({
                let state = Arc::clone(&state);
                let serial = serial.clone();
                let emitter = emitter.clone();
                move |event: Event<Signal<T, E>, E>| match event {
                    Event::Next(inner) => {
                        let start = {
                            let mut state = state.lock();
                            if state.inner_active {
                                state.queue.push_back(inner);
                                None
                            } else {
                                state.inner_active = true;
                                Some(inner)
                            }
                        };
                        if let Some(inner) = start {
                            subscribe_next_inner(
                                inner,
                                emitter.clone(),
                                Arc::clone(&state),
                                serial.clone(),
                            );
                        }
                    }
                    Event::Failed(error) => emitter.fail(error),
                    Event::Completed => {
                        let finished = {
                            let mut state = state.lock();
                            state.outer_done = true;
                            !state.inner_active
                        };
                        if finished {
                            emitter.complete();
                        }
                    }
                }
            });

            let bag = DisposeBag::new();
            bag.add(outer);
            bag.add(serial.to_disposable());
            bag.into_disposable()
        })
    }
}

enum AfterInner<T, E> {
    StartNext(Signal<T, E>),
    Finish,
    Wait,
}

fn subscribe_next_inner<T, E>(
    inner: Signal<T, E>,
    emitter: Emitter<T, E>,
    state: Arc<Mutex<ConcatState<T, E>>>,
    serial: SerialDisposable,
) where
    T: Send + 'static,
    E: Send + 'static,
{
    let slot = SerialDisposable::new();
    serial.set(slot.to_disposable());
    slot.set(inner.observe(move |event: Event<T, E>| match event {
        Event::Next(value) => emitter.next(value),
        Event::Failed(error) => emitter.fail(error),
        Event::Completed => {
            let after = {
                let mut guard = state.lock();
                match guard.queue.pop_front() {
                    Some(next) => AfterInner::StartNext(next),
                    None => {
                        guard.inner_active = false;
                        if guard.outer_done {
                            AfterInner::Finish
                        } else {
                            AfterInner::Wait
                        }
                    }
                }
            };
            match after {
                AfterInner::StartNext(next) => subscribe_next_inner(
                    next,
                    emitter.clone(),
                    Arc::clone(&state),
                    serial.clone(),
                ),
                AfterInner::Finish => emitter.complete(),
                AfterInner::Wait => {}
            }
        }
    }));
}

/// Map-then-flatten conveniences.
pub trait FlatMapExt<T, E> {
    /// Maps each value to an inner signal and merges all of them.
    fn flat_map_merge<U, F>(self, f: F) -> Signal<U, E>
    where
        U: Send + 'static,
        F: Fn(T) -> Signal<U, E> + Send + Sync + 'static;

    /// Maps each value to an inner signal, forwarding only the latest.
    fn flat_map_latest<U, F>(self, f: F) -> Signal<U, E>
    where
        U: Send + 'static,
        F: Fn(T) -> Signal<U, E> + Send + Sync + 'static;

    /// Maps each value to an inner signal, draining them in order.
    fn flat_map_concat<U, F>(self, f: F) -> Signal<U, E>
    where
        U: Send + 'static,
        F: Fn(T) -> Signal<U, E> + Send + Sync + 'static;
}

impl<T, E> FlatMapExt<T, E> for Signal<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    fn flat_map_merge<U, F>(self, f: F) -> Signal<U, E>
    where
        U: Send + 'static,
        F: Fn(T) -> Signal<U, E> + Send + Sync + 'static,
    {
        self.map(f).merge()
    }

    fn flat_map_latest<U, F>(self, f: F) -> Signal<U, E>
    where
        U: Send + 'static,
        F: Fn(T) -> Signal<U, E> + Send + Sync + 'static,
    {
        self.map(f).switch_to_latest()
    }

    fn flat_map_concat<U, F>(self, f: F) -> Signal<U, E>
    where
        U: Send + 'static,
        F: Fn(T) -> Signal<U, E> + Send + Sync + 'static,
    {
        self.map(f).concat()
    }
}
