// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Idempotent cancellation handles.
//!
//! A [`Disposable`] represents one active unit of work: a subscription, a
//! scheduled timer, a resource. Disposing is idempotent and safe from any
//! thread; after `dispose()` returns, the work is cancelled and the
//! cancellation action has been dropped.
//!
//! [`SerialDisposable`] models transfer of ownership (one child at a
//! time, replacement disposes the previous child) and [`DisposeBag`]
//! models aggregate ownership (dispose everything, in addition order,
//! exactly once).

use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

type Action = Box<dyn FnOnce() + Send>;

/// An idempotent cancellation handle for one subscription or scheduled
/// action.
///
/// Clones share the same underlying state: disposing any clone disposes
/// them all. Dropping a `Disposable` does *not* cancel the work it
/// represents; cancellation is always explicit.
#[derive(Clone)]
pub struct Disposable {
    inner: Arc<DisposableState>,
}

struct DisposableState {
    disposed: AtomicBool,
    action: Mutex<Option<Action>>,
}

impl Disposable {
    /// Create a disposable that runs `action` exactly once when disposed.
    pub fn new(action: impl FnOnce() + Send + 'static) -> Self {
        Self {
            inner: Arc::new(DisposableState {
                disposed: AtomicBool::new(false),
                action: Mutex::new(Some(Box::new(action))),
            }),
        }
    }

    /// A disposable with no associated work.
    pub fn noop() -> Self {
        Self {
            inner: Arc::new(DisposableState {
                disposed: AtomicBool::new(false),
                action: Mutex::new(None),
            }),
        }
    }

    /// A disposable that is already disposed.
    pub fn disposed() -> Self {
        Self {
            inner: Arc::new(DisposableState {
                disposed: AtomicBool::new(true),
                action: Mutex::new(None),
            }),
        }
    }

    /// Cancel the associated work.
    ///
    /// The first call runs the cancellation action; every further call,
    /// from any thread, is a no-op.
    pub fn dispose(&self) {
        if !self.inner.disposed.swap(true, Ordering::AcqRel) {
            // Take the action out before running it so that a reentrant
            // dispose from inside the action cannot deadlock on the slot.
            let action = self.inner.action.lock().take();
            if let Some(action) = action {
                action();
            }
        }
    }

    /// Whether `dispose` has been called.
    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.load(Ordering::Acquire)
    }
}

impl fmt::Debug for Disposable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Disposable")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

/// Holds exactly one child disposable at a time.
///
/// Replacing the child disposes the previous one; setting a child after
/// the serial handle itself was disposed disposes the incoming child
/// immediately. Used wherever a subscription is handed over to a
/// successor (recovery, retry, switch-to-latest, connectable runs).
#[derive(Clone, Default)]
pub struct SerialDisposable {
    inner: Arc<Mutex<SerialState>>,
}

#[derive(Default)]
struct SerialState {
    disposed: bool,
    current: Option<Disposable>,
}

impl SerialDisposable {
    /// Create an empty serial handle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `child`, disposing whatever was held before.
    pub fn set(&self, child: Disposable) {
        let (previous, rejected) = {
            let mut state = self.inner.lock();
            if state.disposed {
                (None, true)
            } else {
                (state.current.replace(child.clone()), false)
            }
        };
        // User code may run inside these dispose calls; the slot lock is
        // already released so reentrant set/dispose cannot deadlock.
        if rejected {
            child.dispose();
        }
        if let Some(previous) = previous {
            previous.dispose();
        }
    }

    /// Dispose the held child (if any) and reject all future children.
    pub fn dispose(&self) {
        let current = {
            let mut state = self.inner.lock();
            if state.disposed {
                None
            } else {
                state.disposed = true;
                state.current.take()
            }
        };
        if let Some(current) = current {
            current.dispose();
        }
    }

    /// Whether this serial handle has been disposed.
    pub fn is_disposed(&self) -> bool {
        self.inner.lock().disposed
    }

    /// A plain [`Disposable`] view over this handle.
    pub fn to_disposable(&self) -> Disposable {
        let this = self.clone();
        Disposable::new(move || this.dispose())
    }
}

impl fmt::Debug for SerialDisposable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerialDisposable")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

/// Aggregates disposables and disposes all of them, in addition order,
/// exactly once.
///
/// The bag also disposes its contents when dropped, so tying a group of
/// subscriptions to an owner's lifetime is a matter of keeping the bag as
/// a field. Share a bag between closures through an `Arc`.
#[derive(Default)]
pub struct DisposeBag {
    inner: Mutex<BagState>,
}

#[derive(Default)]
struct BagState {
    disposed: bool,
    items: Vec<Disposable>,
}

impl DisposeBag {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `disposable` to the bag.
    ///
    /// If the bag has already been disposed, `disposable` is disposed
    /// immediately instead of being stored.
    pub fn add(&self, disposable: Disposable) {
        let rejected = {
            let mut state = self.inner.lock();
            if state.disposed {
                true
            } else {
                state.items.push(disposable.clone());
                false
            }
        };
        if rejected {
            disposable.dispose();
        }
    }

    /// Dispose every held disposable, in addition order.
    pub fn dispose(&self) {
        let items = {
            let mut state = self.inner.lock();
            if state.disposed {
                Vec::new()
            } else {
                state.disposed = true;
                std::mem::take(&mut state.items)
            }
        };
        for item in items {
            item.dispose();
        }
    }

    /// Whether the bag has been disposed.
    pub fn is_disposed(&self) -> bool {
        self.inner.lock().disposed
    }

    /// Number of disposables currently held.
    pub fn len(&self) -> usize {
        self.inner.lock().items.len()
    }

    /// Whether the bag currently holds nothing.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consume the bag into a plain [`Disposable`].
    pub fn into_disposable(self) -> Disposable {
        Disposable::new(move || self.dispose())
    }
}

impl Drop for DisposeBag {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for DisposeBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisposeBag")
            .field("disposed", &self.is_disposed())
            .field("len", &self.len())
            .finish()
    }
}
