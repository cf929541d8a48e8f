// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Time-control operators for pulse signals.
//!
//! All waiting is expressed through the
//! [`ExecutionContext`](pulse_runtime::ExecutionContext) capability;
//! nothing here blocks. Operators hold at most one pending timer per
//! concern and rely on the emitter's active flag to neutralize timers
//! that fire after disposal.

pub mod debounce;
pub mod delay;
pub mod interval;
pub mod prelude;
pub mod sample;
pub mod throttle;
pub mod timeout;

pub use self::debounce::DebounceExt;
pub use self::delay::DelayExt;
pub use self::interval::{after, interval};
pub use self::sample::SampleExt;
pub use self::throttle::ThrottleExt;
pub use self::timeout::TimeoutExt;
