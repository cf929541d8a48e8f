// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// Errors surfaced by the imperative subject interface.
///
/// The engine's failure channel itself is a caller-defined payload type
/// carried by [`Event::Failed`](crate::Event::Failed); `SubjectError`
/// only covers misuse of the feeding side of a subject.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SubjectError {
    /// The subject has already delivered a terminal event; further events
    /// are rejected to preserve the event grammar.
    #[error("subject already terminated")]
    Terminated,
}
