// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Pairwise combine-latest.
//!
//! Emits once both sides have produced a value, then on every value from
//! either side. A completed side keeps its last value as a fixed partner;
//! a side that completes without ever emitting completes the combination
//! (no pair can ever form). The first failure from either side fails the
//! combination immediately, discarding partner state. All terminal
//! pairings are explicit states below; there is no unreachable branch.

use parking_lot::Mutex;
use pulse_core::{DisposeBag, Event, Signal};
use std::sync::Arc;

struct CombineState<T, U> {
    left: Option<T>,
    right: Option<U>,
    left_done: bool,
    right_done: bool,
}

/// Extension trait providing the `combine_latest_with` operator.
pub trait CombineLatestExt<T, E> {
    /// Combines this signal with `other`, emitting a pair carrying both
    /// sides' latest values.
    fn combine_latest_with<U>(self, other: Signal<U, E>) -> Signal<(T, U), E>
    where
        U: Clone + Send + Sync + 'static;
}

impl<T, E> CombineLatestExt<T, E> for Signal<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Send + 'static,
{
    fn combine_latest_with<U>(self, other: Signal<U, E>) -> Signal<(T, U), E>
    where
        U: Clone + Send + Sync + 'static,
    {
        Signal::new(move |emitter| {
            let state = Arc::new(Mutex::new(CombineState {
                left: None,
                right: None,
                left_done: false,
                right_done: false,
            }));
            let bag = DisposeBag::new();

            bag.add(self.observe({
                let state = Arc::clone(&state);
                let emitter = emitter.clone();
                move |event: Event<T, E>| match event {
                    Event::Next(value) => {
                        let pair = {
                            let mut state = state.lock();
                            state.left = Some(value.clone());
                            state.right.as_ref().map(|right: &U| (value.clone(), right.clone()))
                        };
                        if let Some(pair) = pair {
                            emitter.next(pair);
                        }
                    }
                    Event::Failed(error) => emitter.fail(error),
                    Event::Completed => {
                        let finished = {
                            let mut state = state.lock();
                            state.left_done = true;
                            state.right_done || state.left.is_none()
                        };
                        if finished {
                            emitter.complete();
                        }
                    }
                }
            }));

            bag.add(other.observe({
                let state = Arc::clone(&state);
                let emitter = emitter.clone();
                move |event: Event<U, E>| match event {
                    Event::Next(value) => {
                        let pair = {
                            let mut state = state.lock();
                            state.right = Some(value.clone());
                            state.left.as_ref().map(|left| (left.clone(), value.clone()))
                        };
                        if let Some(pair) = pair {
                            emitter.next(pair);
                        }
                    }
                    Event::Failed(error) => emitter.fail(error),
                    Event::Completed => {
                        let finished = {
                            let mut state = state.lock();
                            state.right_done = true;
                            state.left_done || state.right.is_none()
                        };
                        if finished {
                            emitter.complete();
                        }
                    }
                }
            }));

            bag.into_disposable()
        })
    }
}
