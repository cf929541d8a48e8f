// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Positional pairing: `zip_with` and `zip_with_previous`.

use parking_lot::Mutex;
use pulse_core::{DisposeBag, Event, Signal};
use std::collections::VecDeque;
use std::sync::Arc;

struct ZipState<T, U> {
    left: VecDeque<T>,
    right: VecDeque<U>,
}

/// Extension trait providing the zip operators.
pub trait ZipExt<T, E> {
    /// Pairs values strictly by arrival position, buffering the faster
    /// side.
    ///
    /// Completion of either side completes the zip immediately; buffered
    /// but unpaired values are discarded. A failure from either side
    /// fails immediately.
    fn zip_with<U>(self, other: Signal<U, E>) -> Signal<(T, U), E>
    where
        U: Send + 'static;

    /// Pairs each value with the immediately preceding one, `None`
    /// marking the absent previous on the first emission.
    fn zip_with_previous(self) -> Signal<(Option<T>, T), E>
    where
        T: Clone;
}

impl<T, E> ZipExt<T, E> for Signal<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    fn zip_with<U>(self, other: Signal<U, E>) -> Signal<(T, U), E>
    where
        U: Send + 'static,
    {
        Signal::new(move |emitter| {
            let state = Arc::new(Mutex::new(ZipState {
                left: VecDeque::new(),
                right: VecDeque::new(),
            }));
            let bag = DisposeBag::new();

            bag.add(self.observe({
                let state = Arc::clone(&state);
                let emitter = emitter.clone();
                move |event: Event<T, E>| match event {
                    Event::Next(value) => {
                        let pair = {
                            let mut state = state.lock();
                            match state.right.pop_front() {
                                Some(right) => Some((value, right)),
                                None => {
                                    state.left.push_back(value);
                                    None
                                }
                            }
                        };
                        if let Some(pair) = pair {
                            emitter.next(pair);
                        }
                    }
                    Event::Failed(error) => emitter.fail(error),
                    Event::Completed => emitter.complete(),
                }
            }));

            bag.add(other.observe({
                let state = Arc::clone(&state);
                let emitter = emitter.clone();
                move |event: Event<U, E>| match event {
                    Event::Next(value) => {
                        let pair = {
                            let mut state = state.lock();
                            match state.left.pop_front() {
                                Some(left) => Some((left, value)),
                                None => {
                                    state.right.push_back(value);
                                    None
                                }
                            }
                        };
                        if let Some(pair) = pair {
                            emitter.next(pair);
                        }
                    }
                    Event::Failed(error) => emitter.fail(error),
                    Event::Completed => emitter.complete(),
                }
            }));

            bag.into_disposable()
        })
    }

    fn zip_with_previous(self) -> Signal<(Option<T>, T), E>
    where
        T: Clone,
    {
        self.lift(move |emitter| {
            let previous = Mutex::new(None::<T>);
            Box::new(move |event: Event<T, E>| match event {
                Event::Next(value) => {
                    let prior = previous.lock().replace(value.clone());
                    emitter.next((prior, value));
                }
                Event::Failed(error) => emitter.fail(error),
                Event::Completed => emitter.complete(),
            })
        })
    }
}
