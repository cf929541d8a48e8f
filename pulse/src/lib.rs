// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Pulse: a push-based, composable reactive stream library.
//!
//! Pipelines are built from cold [`Signal`]s carrying a two-channel event
//! model (values and typed failures) with deterministic termination,
//! idempotent cancellation and optional multicast sharing. The umbrella
//! crate re-exports the whole surface; import [`prelude`] to get the
//! operator extension traits in one line.
//!
//! ```
//! use pulse_rx::prelude::*;
//! use pulse_test_utils::Recording;
//!
//! let recording = Recording::new();
//! Signal::<i32, ()>::from_iter(1..=5)
//!     .filter(|n| n % 2 == 1)
//!     .map(|n| n * n)
//!     .observe(recording.observer());
//!
//! assert_eq!(recording.values(), vec![1, 9, 25]);
//! assert!(recording.is_completed());
//! ```

pub mod channel_ext;
pub mod stream_ext;

pub use pulse_core::{
    Disposable, DisposeBag, Emitter, Event, Observer, PushSignal, ReplaySubject, SerialDisposable,
    Signal, Subject, SubjectError,
};
pub use pulse_runtime::{ExecutionContext, TokioContext};
pub use pulse_stream::{
    AmbExt, CombineLatestExt, CompactExt, ConcatWithExt, ConnectableSignal, DebugExt, FilterExt,
    FlatMapExt, FlattenExt, MergeWithExt, MulticastExt, PausableExt, RecoverExt, StartWithExt,
    TapExt, TransformExt, ZipExt,
};
pub use pulse_stream_time::{after, interval, DebounceExt, DelayExt, SampleExt, ThrottleExt, TimeoutExt};

pub use self::channel_ext::UnboundedReceiverExt;
pub use self::stream_ext::{SignalStream, SignalStreamExt};

/// Everything needed to build and observe pipelines.
pub mod prelude {
    pub use pulse_core::{
        Disposable, DisposeBag, Emitter, Event, Observer, PushSignal, ReplaySubject,
        SerialDisposable, Signal, Subject, SubjectError,
    };
    pub use pulse_runtime::{ExecutionContext, TokioContext};
    pub use pulse_stream::prelude::*;
    pub use pulse_stream_time::prelude::*;

    pub use crate::channel_ext::UnboundedReceiverExt;
    pub use crate::stream_ext::{SignalStream, SignalStreamExt};
}
