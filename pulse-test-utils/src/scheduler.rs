// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A deterministic virtual-time execution context.
//!
//! Nothing runs until [`TestContext::advance`] is called; due tasks then
//! execute in deadline order (insertion order breaking ties), with the
//! virtual clock set to each task's deadline while it runs so that nested
//! scheduling lands where it would in real time.

use parking_lot::Mutex;
use pulse_core::Disposable;
use pulse_runtime::{ExecutionContext, RepeatingTask, Task};
use std::cmp::Ordering as CmpOrdering;
use std::collections::BinaryHeap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

enum ScheduledKind {
    Once(Task),
    Every {
        interval: Duration,
        task: Arc<dyn Fn() + Send + Sync>,
    },
}

struct Scheduled {
    due: Duration,
    sequence: u64,
    cancelled: Arc<AtomicBool>,
    kind: ScheduledKind,
}

impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.sequence == other.sequence
    }
}

impl Eq for Scheduled {}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<CmpOrdering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scheduled {
    // Reversed so the max-heap pops the earliest deadline first.
    fn cmp(&self, other: &Self) -> CmpOrdering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

struct SchedulerState {
    now: Duration,
    sequence: u64,
    queue: BinaryHeap<Scheduled>,
}

/// A virtual-time [`ExecutionContext`] for deterministic tests.
///
/// Cheap to clone; all clones drive the same clock and queue. Coerce an
/// `Arc<TestContext>` into `Arc<dyn ExecutionContext>` to hand it to
/// time-control operators while keeping a handle for advancing time.
pub struct TestContext {
    state: Arc<Mutex<SchedulerState>>,
}

impl Clone for TestContext {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    /// A context with the clock at zero and nothing scheduled.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(SchedulerState {
                now: Duration::ZERO,
                sequence: 0,
                queue: BinaryHeap::new(),
            })),
        }
    }

    /// The current virtual time.
    pub fn now(&self) -> Duration {
        self.state.lock().now
    }

    /// Number of tasks currently queued (cancelled ones included until
    /// their deadline passes).
    pub fn pending(&self) -> usize {
        self.state.lock().queue.len()
    }

    /// Move the clock forward by `by`, running every task that falls due.
    ///
    /// Tasks scheduled while advancing run too when their deadline lies
    /// within the window. The lock is never held while a task runs, so
    /// tasks may freely schedule or cancel.
    pub fn advance(&self, by: Duration) {
        let target = self.state.lock().now + by;
        loop {
            let due_entry = {
                let mut state = self.state.lock();
                let due_now = state
                    .queue
                    .peek()
                    .map_or(false, |entry| entry.due <= target);
                if due_now {
                    state.queue.pop().map(|entry| {
                        state.now = state.now.max(entry.due);
                        entry
                    })
                } else {
                    state.now = target;
                    None
                }
            };
            let Some(entry) = due_entry else {
                break;
            };
            if entry.cancelled.load(Ordering::Acquire) {
                continue;
            }
            match entry.kind {
                ScheduledKind::Once(task) => task(),
                ScheduledKind::Every { interval, task } => {
                    task();
                    if !entry.cancelled.load(Ordering::Acquire) {
                        let mut state = self.state.lock();
                        let sequence = state.sequence;
                        state.sequence += 1;
                        state.queue.push(Scheduled {
                            due: entry.due + interval,
                            sequence,
                            cancelled: entry.cancelled,
                            kind: ScheduledKind::Every { interval, task },
                        });
                    }
                }
            }
        }
    }
}

impl ExecutionContext for TestContext {
    fn run(&self, task: Task) {
        task();
    }

    fn run_after(&self, delay: Duration, task: Task) -> Disposable {
        let cancelled = Arc::new(AtomicBool::new(false));
        {
            let mut state = self.state.lock();
            let sequence = state.sequence;
            state.sequence += 1;
            let due = state.now + delay;
            state.queue.push(Scheduled {
                due,
                sequence,
                cancelled: Arc::clone(&cancelled),
                kind: ScheduledKind::Once(task),
            });
        }
        Disposable::new(move || cancelled.store(true, Ordering::Release))
    }

    fn run_every(&self, interval: Duration, task: RepeatingTask) -> Disposable {
        let cancelled = Arc::new(AtomicBool::new(false));
        {
            let mut state = self.state.lock();
            let sequence = state.sequence;
            state.sequence += 1;
            let due = state.now + interval;
            state.queue.push(Scheduled {
                due,
                sequence,
                cancelled: Arc::clone(&cancelled),
                kind: ScheduledKind::Every {
                    interval,
                    task: Arc::from(task),
                },
            });
        }
        Disposable::new(move || cancelled.store(true, Ordering::Release))
    }
}
