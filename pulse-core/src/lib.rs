// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Core contracts for push-based reactive pipelines.
//!
//! This crate defines the event grammar ([`Event`]), the observer and
//! producer contracts ([`Observer`], [`Signal`], [`Emitter`]), the
//! disposal primitives ([`Disposable`], [`SerialDisposable`],
//! [`DisposeBag`]) and the multicast subjects ([`Subject`],
//! [`ReplaySubject`], [`PushSignal`]). Operators live in `pulse-stream`
//! and `pulse-stream-time`; the concrete execution context lives in
//! `pulse-runtime`.

pub mod disposable;
pub mod errors;
pub mod event;
pub mod observer;
pub mod signal;
pub mod subject;

pub use self::disposable::{Disposable, DisposeBag, SerialDisposable};
pub use self::errors::SubjectError;
pub use self::event::Event;
pub use self::observer::Observer;
pub use self::signal::{Emitter, Signal};
pub use self::subject::{PushSignal, ReplaySubject, Subject};
