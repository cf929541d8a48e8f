// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Filtering and slicing operators: `filter`, `distinct`, the
//! `take`/`skip` family, `first`/`last`, `element_at`, `ignore_elements`
//! and `compact`.

use parking_lot::Mutex;
use pulse_core::{Event, Signal};
use std::collections::VecDeque;
use std::sync::Arc;

/// Extension trait providing the filtering and slicing operators.
pub trait FilterExt<T, E>: Sized {
    /// Drops values failing `pred`; terminals pass through.
    fn filter<F>(self, pred: F) -> Signal<T, E>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static;

    /// Maps each value through `f`, dropping `None` results.
    fn filter_map<U, F>(self, f: F) -> Signal<U, E>
    where
        U: Send + 'static,
        F: Fn(T) -> Option<U> + Send + Sync + 'static;

    /// Emits the first value unconditionally, then only values that
    /// differ from the previously emitted one.
    fn distinct(self) -> Signal<T, E>
    where
        T: Clone + PartialEq;

    /// Like [`distinct`](FilterExt::distinct) with a caller-supplied
    /// equality.
    fn distinct_by<F>(self, eq: F) -> Signal<T, E>
    where
        T: Clone,
        F: Fn(&T, &T) -> bool + Send + Sync + 'static;

    /// Emits the first `count` values, then completes and disposes the
    /// upstream subscription.
    fn take(self, count: usize) -> Signal<T, E>;

    /// Emits the last `count` values, buffered until completion.
    fn take_last(self, count: usize) -> Signal<T, E>;

    /// Drops the first `count` values.
    fn skip(self, count: usize) -> Signal<T, E>;

    /// Drops the last `count` values, emitting each value once `count`
    /// newer ones have arrived.
    fn skip_last(self, count: usize) -> Signal<T, E>;

    /// The first value, with completion forced after it.
    fn first(self) -> Signal<T, E>;

    /// The last value, emitted on completion.
    fn last(self) -> Signal<T, E>;

    /// Emits only the value at position `index`, then completes.
    ///
    /// A source that completes before reaching `index` completes this
    /// signal without a value; no failure is synthesized.
    fn element_at(self, index: usize) -> Signal<T, E>;

    /// Suppresses every value, forwarding only terminals.
    fn ignore_elements(self) -> Signal<T, E>;
}

impl<T, E> FilterExt<T, E> for Signal<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    fn filter<F>(self, pred: F) -> Signal<T, E>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let pred = Arc::new(pred);
        self.lift(move |emitter| {
            let pred = Arc::clone(&pred);
            Box::new(move |event: Event<T, E>| match event {
                Event::Next(value) => {
                    if pred(&value) {
                        emitter.next(value);
                    }
                }
                terminal => emitter.on(terminal),
            })
        })
    }

    fn filter_map<U, F>(self, f: F) -> Signal<U, E>
    where
        U: Send + 'static,
        F: Fn(T) -> Option<U> + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        self.lift(move |emitter| {
            let f = Arc::clone(&f);
            Box::new(move |event: Event<T, E>| match event {
                Event::Next(value) => {
                    if let Some(mapped) = f(value) {
                        emitter.next(mapped);
                    }
                }
                Event::Failed(error) => emitter.fail(error),
                Event::Completed => emitter.complete(),
            })
        })
    }

    fn distinct(self) -> Signal<T, E>
    where
        T: Clone + PartialEq,
    {
        self.distinct_by(|previous, current| previous == current)
    }

    fn distinct_by<F>(self, eq: F) -> Signal<T, E>
    where
        T: Clone,
        F: Fn(&T, &T) -> bool + Send + Sync + 'static,
    {
        let eq = Arc::new(eq);
        self.lift(move |emitter| {
            let eq = Arc::clone(&eq);
            let previous = Mutex::new(None::<T>);
            Box::new(move |event: Event<T, E>| match event {
                Event::Next(value) => {
                    let fresh = {
                        let mut previous = previous.lock();
                        let changed = previous
                            .as_ref()
                            .map_or(true, |previous| !eq(previous, &value));
                        if changed {
                            *previous = Some(value.clone());
                        }
                        changed
                    };
                    if fresh {
                        emitter.next(value);
                    }
                }
                terminal => emitter.on(terminal),
            })
        })
    }

    fn take(self, count: usize) -> Signal<T, E> {
        self.lift(move |emitter| {
            if count == 0 {
                emitter.complete();
            }
            let remaining = Mutex::new(count);
            Box::new(move |event: Event<T, E>| match event {
                Event::Next(value) => {
                    let exhausted = {
                        let mut remaining = remaining.lock();
                        if *remaining == 0 {
                            return;
                        }
                        *remaining -= 1;
                        *remaining == 0
                    };
                    emitter.next(value);
                    if exhausted {
                        emitter.complete();
                    }
                }
                terminal => emitter.on(terminal),
            })
        })
    }

    fn take_last(self, count: usize) -> Signal<T, E> {
        self.lift(move |emitter| {
            let buffered = Mutex::new(VecDeque::new());
            Box::new(move |event: Event<T, E>| match event {
                Event::Next(value) => {
                    if count == 0 {
                        return;
                    }
                    let mut buffered = buffered.lock();
                    while buffered.len() >= count {
                        buffered.pop_front();
                    }
                    buffered.push_back(value);
                }
                Event::Failed(error) => emitter.fail(error),
                Event::Completed => {
                    let drained = std::mem::take(&mut *buffered.lock());
                    for value in drained {
                        emitter.next(value);
                    }
                    emitter.complete();
                }
            })
        })
    }

    fn skip(self, count: usize) -> Signal<T, E> {
        self.lift(move |emitter| {
            let remaining = Mutex::new(count);
            Box::new(move |event: Event<T, E>| match event {
                Event::Next(value) => {
                    let pass = {
                        let mut remaining = remaining.lock();
                        if *remaining == 0 {
                            true
                        } else {
                            *remaining -= 1;
                            false
                        }
                    };
                    if pass {
                        emitter.next(value);
                    }
                }
                terminal => emitter.on(terminal),
            })
        })
    }

    fn skip_last(self, count: usize) -> Signal<T, E> {
        self.lift(move |emitter| {
            let buffered = Mutex::new(VecDeque::new());
            Box::new(move |event: Event<T, E>| match event {
                Event::Next(value) => {
                    if count == 0 {
                        emitter.next(value);
                        return;
                    }
                    let displaced = {
                        let mut buffered = buffered.lock();
                        buffered.push_back(value);
                        if buffered.len() > count {
                            buffered.pop_front()
                        } else {
                            None
                        }
                    };
                    if let Some(displaced) = displaced {
                        emitter.next(displaced);
                    }
                }
                terminal => emitter.on(terminal),
            })
        })
    }

    fn first(self) -> Signal<T, E> {
        self.take(1)
    }

    fn last(self) -> Signal<T, E> {
        self.take_last(1)
    }

    fn element_at(self, index: usize) -> Signal<T, E> {
        self.lift(move |emitter| {
            let position = Mutex::new(0usize);
            Box::new(move |event: Event<T, E>| match event {
                Event::Next(value) => {
                    let matched = {
                        let mut position = position.lock();
                        let matched = *position == index;
                        *position += 1;
                        matched
                    };
                    if matched {
                        emitter.next(value);
                        emitter.complete();
                    }
                }
                terminal => emitter.on(terminal),
            })
        })
    }

    fn ignore_elements(self) -> Signal<T, E> {
        self.lift(move |emitter| {
            Box::new(move |event: Event<T, E>| match event {
                Event::Next(_) => {}
                terminal => emitter.on(terminal),
            })
        })
    }
}

/// `compact` for signals of optional values.
pub trait CompactExt<T, E> {
    /// Drops `None` values and unwraps `Some` ones.
    fn compact(self) -> Signal<T, E>;
}

impl<T, E> CompactExt<T, E> for Signal<Option<T>, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    fn compact(self) -> Signal<T, E> {
        self.lift(move |emitter| {
            Box::new(move |event: Event<Option<T>, E>| match event {
                Event::Next(Some(value)) => emitter.next(value),
                Event::Next(None) => {}
                Event::Failed(error) => emitter.fail(error),
                Event::Completed => emitter.complete(),
            })
        })
    }
}
