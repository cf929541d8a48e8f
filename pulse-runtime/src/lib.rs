// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The execution-context capability for pulse pipelines.
//!
//! Time-control operators depend only on the [`ExecutionContext`] trait:
//! run work now, once after a delay, or repeatedly at an interval, with a
//! [`Disposable`](pulse_core::Disposable) cancelling pending work. The
//! Tokio-backed [`TokioContext`] is the production implementation; a
//! deterministic virtual-time context for tests lives in
//! `pulse-test-utils`.

pub mod context;
pub mod impls;

pub use self::context::{ExecutionContext, RepeatingTask, Task};
pub use self::impls::tokio::TokioContext;
