// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use pulse_core::Disposable;
use std::time::Duration;

/// A unit of work handed to an execution context.
pub type Task = Box<dyn FnOnce() + Send>;

/// A repeating unit of work handed to an execution context.
pub type RepeatingTask = Box<dyn Fn() + Send + Sync>;

/// The scheduling capability consumed by time-control operators.
///
/// The engine never blocks and never spawns threads of its own: all
/// waiting is expressed as callbacks scheduled through this trait.
/// Cancellation of a scheduled task is best-effort: a callback already
/// handed to the underlying scheduler may still fire after its disposable
/// was disposed, which is why emission paths re-check
/// [`Emitter::is_active`](pulse_core::Emitter::is_active) before acting.
pub trait ExecutionContext: Send + Sync {
    /// Run `task` immediately, on the calling thread.
    fn run(&self, task: Task);

    /// Run `task` once, `delay` from now.
    ///
    /// The returned disposable cancels the pending task.
    fn run_after(&self, delay: Duration, task: Task) -> Disposable;

    /// Run `task` every `interval`, first firing one full interval from
    /// now.
    ///
    /// The returned disposable stops the repetition.
    fn run_every(&self, interval: Duration, task: RepeatingTask) -> Disposable;
}
