// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::context::{ExecutionContext, RepeatingTask, Task};
use pulse_core::Disposable;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::time::MissedTickBehavior;

/// An execution context backed by a Tokio runtime handle.
///
/// Immediate work runs inline on the calling thread; delayed and
/// repeating work is spawned onto the runtime and cancelled by aborting
/// the backing task.
#[derive(Clone, Debug)]
pub struct TokioContext {
    handle: Handle,
}

impl TokioContext {
    /// A context driving work through the given runtime handle.
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// A context bound to the current Tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime, as
    /// [`Handle::current`] does.
    pub fn current() -> Self {
        Self::new(Handle::current())
    }
}

impl ExecutionContext for TokioContext {
    fn run(&self, task: Task) {
        task();
    }

    fn run_after(&self, delay: Duration, task: Task) -> Disposable {
        let join = self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });
        Disposable::new(move || join.abort())
    }

    fn run_every(&self, interval: Duration, task: RepeatingTask) -> Disposable {
        let join = self.handle.spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick of a tokio interval resolves immediately;
            // consume it so the task first fires one full interval in.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                task();
            }
        });
        Disposable::new(move || join.abort())
    }
}
