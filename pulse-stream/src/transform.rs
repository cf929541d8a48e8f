// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Value and error transform operators: `map`, `map_err`, `try_map`,
//! `scan`, `reduce` and `collect`.

use parking_lot::Mutex;
use pulse_core::{Event, Signal};
use std::sync::Arc;

/// Extension trait providing the transform operators.
pub trait TransformExt<T, E> {
    /// Applies `f` to each value; terminals pass through unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use pulse_core::Signal;
    /// use pulse_stream::TransformExt;
    /// use pulse_test_utils::Recording;
    ///
    /// let recording = Recording::new();
    /// Signal::<i32, ()>::from_iter(vec![1, 2, 3])
    ///     .map(|n| n * 10)
    ///     .observe(recording.observer());
    ///
    /// assert_eq!(recording.values(), vec![10, 20, 30]);
    /// assert!(recording.is_completed());
    /// ```
    fn map<U, F>(self, f: F) -> Signal<U, E>
    where
        U: Send + 'static,
        F: Fn(T) -> U + Send + Sync + 'static;

    /// Applies `f` to the failure payload; values and completion pass
    /// through unchanged.
    fn map_err<E2, F>(self, f: F) -> Signal<T, E2>
    where
        E2: Send + 'static,
        F: Fn(E) -> E2 + Send + Sync + 'static;

    /// Applies a fallible `f` to each value; an `Err` result becomes a
    /// failure and ends the stream.
    fn try_map<U, F>(self, f: F) -> Signal<U, E>
    where
        U: Send + 'static,
        F: Fn(T) -> Result<U, E> + Send + Sync + 'static;

    /// Emits the seed immediately, then the running accumulation for
    /// every value.
    fn scan<A, F>(self, seed: A, combine: F) -> Signal<A, E>
    where
        A: Clone + Send + Sync + 'static,
        F: Fn(A, T) -> A + Send + Sync + 'static;

    /// Emits only the final accumulation, immediately before completion.
    ///
    /// A source that completes without values yields the seed alone.
    fn reduce<A, F>(self, seed: A, combine: F) -> Signal<A, E>
    where
        A: Clone + Send + Sync + 'static,
        F: Fn(A, T) -> A + Send + Sync + 'static;

    /// Reduces into the ordered sequence of all values, emitted on
    /// completion.
    fn collect(self) -> Signal<Vec<T>, E>;
}

impl<T, E> TransformExt<T, E> for Signal<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    fn map<U, F>(self, f: F) -> Signal<U, E>
    where
        U: Send + 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        self.lift(move |emitter| {
            let f = Arc::clone(&f);
            Box::new(move |event: Event<T, E>| emitter.on(event.map(|value| f(value))))
        })
    }

    fn map_err<E2, F>(self, f: F) -> Signal<T, E2>
    where
        E2: Send + 'static,
        F: Fn(E) -> E2 + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        self.lift(move |emitter| {
            let f = Arc::clone(&f);
            Box::new(move |event: Event<T, E>| emitter.on(event.map_err(|error| f(error))))
        })
    }

    fn try_map<U, F>(self, f: F) -> Signal<U, E>
    where
        U: Send + 'static,
        F: Fn(T) -> Result<U, E> + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        self.lift(move |emitter| {
            let f = Arc::clone(&f);
            Box::new(move |event: Event<T, E>| match event {
                Event::Next(value) => match f(value) {
                    Ok(mapped) => emitter.next(mapped),
                    Err(error) => emitter.fail(error),
                },
                Event::Failed(error) => emitter.fail(error),
                Event::Completed => emitter.complete(),
            })
        })
    }

    fn scan<A, F>(self, seed: A, combine: F) -> Signal<A, E>
    where
        A: Clone + Send + Sync + 'static,
        F: Fn(A, T) -> A + Send + Sync + 'static,
    {
        let combine = Arc::new(combine);
        self.lift(move |emitter| {
            let combine = Arc::clone(&combine);
            let accumulator = Mutex::new(seed.clone());
            emitter.next(seed.clone());
            Box::new(move |event: Event<T, E>| match event {
                Event::Next(value) => {
                    let next = {
                        let mut accumulator = accumulator.lock();
                        let updated = combine(accumulator.clone(), value);
                        *accumulator = updated.clone();
                        updated
                    };
                    emitter.next(next);
                }
                Event::Failed(error) => emitter.fail(error),
                Event::Completed => emitter.complete(),
            })
        })
    }

    fn reduce<A, F>(self, seed: A, combine: F) -> Signal<A, E>
    where
        A: Clone + Send + Sync + 'static,
        F: Fn(A, T) -> A + Send + Sync + 'static,
    {
        let combine = Arc::new(combine);
        self.lift(move |emitter| {
            let combine = Arc::clone(&combine);
            // Option lets the accumulator move through `combine` without
            // cloning per value; it is always Some between events.
            let accumulator = Mutex::new(Some(seed.clone()));
            Box::new(move |event: Event<T, E>| match event {
                Event::Next(value) => {
                    let mut accumulator = accumulator.lock();
                    if let Some(current) = accumulator.take() {
                        *accumulator = Some(combine(current, value));
                    }
                }
                Event::Failed(error) => emitter.fail(error),
                Event::Completed => {
                    let finished = accumulator.lock().take();
                    if let Some(finished) = finished {
                        emitter.next(finished);
                    }
                    emitter.complete();
                }
            })
        })
    }

    fn collect(self) -> Signal<Vec<T>, E> {
        self.lift(move |emitter| {
            let values = Mutex::new(Vec::new());
            Box::new(move |event: Event<T, E>| match event {
                Event::Next(value) => values.lock().push(value),
                Event::Failed(error) => emitter.fail(error),
                Event::Completed => {
                    let collected = std::mem::take(&mut *values.lock());
                    emitter.next(collected);
                    emitter.complete();
                }
            })
        })
    }
}
