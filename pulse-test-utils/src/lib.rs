// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities for the pulse workspace.
//!
//! [`Recording`] captures the event sequence seen by one observer for
//! later assertion, and [`TestContext`] is a virtual-time
//! [`ExecutionContext`](pulse_runtime::ExecutionContext) that makes every
//! time-control operator deterministic: nothing fires until the test
//! advances the clock. For development and testing only.

pub mod helpers;
pub mod recording;
pub mod scheduler;

pub use self::recording::Recording;
pub use self::scheduler::TestContext;
