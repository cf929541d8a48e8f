// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Operator library for pulse signals.
//!
//! Every operator is built with the lift pattern from `pulse-core`:
//! wrap the downstream observer, reinterpret each incoming event, forward
//! zero or more events, and reuse the source subscription as the handle.
//! Operators are exposed as extension traits over
//! [`Signal`](pulse_core::Signal); import [`prelude`] to bring them all
//! into scope.

pub mod amb;
pub mod combine_latest;
pub mod concat_with;
pub mod connectable;
pub mod debug;
pub mod filtering;
pub mod flatten;
pub mod merge_with;
pub mod pausable;
pub mod prelude;
pub mod recover;
pub mod start_with;
pub mod tap;
pub mod transform;
pub mod zip;

pub use self::amb::AmbExt;
pub use self::combine_latest::CombineLatestExt;
pub use self::concat_with::ConcatWithExt;
pub use self::connectable::{ConnectableSignal, MulticastExt};
pub use self::debug::DebugExt;
pub use self::filtering::{CompactExt, FilterExt};
pub use self::flatten::{FlatMapExt, FlattenExt};
pub use self::merge_with::MergeWithExt;
pub use self::pausable::PausableExt;
pub use self::recover::RecoverExt;
pub use self::start_with::StartWithExt;
pub use self::tap::TapExt;
pub use self::transform::TransformExt;
pub use self::zip::ZipExt;
