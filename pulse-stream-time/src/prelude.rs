// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! One-stop import for the time-control extension traits.

pub use crate::debounce::DebounceExt;
pub use crate::delay::DelayExt;
pub use crate::interval::{after, interval};
pub use crate::sample::SampleExt;
pub use crate::throttle::ThrottleExt;
pub use crate::timeout::TimeoutExt;
