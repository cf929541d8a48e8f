// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::recording::Recording;
use std::fmt::Debug;

/// Asserts the recorded values equal `expected`, in order.
pub fn assert_values<T, E>(recording: &Recording<T, E>, expected: &[T])
where
    T: Clone + PartialEq + Debug + Send + 'static,
    E: Send + 'static,
{
    assert_eq!(recording.values(), expected);
}

/// Asserts the sequence completed (and respected the grammar).
pub fn assert_completed<T, E>(recording: &Recording<T, E>)
where
    T: Send + 'static,
    E: Send + 'static,
{
    recording.assert_grammar();
    assert!(recording.is_completed(), "expected a completed sequence");
}

/// Asserts the sequence failed with `expected`.
pub fn assert_failed<T, E>(recording: &Recording<T, E>, expected: &E)
where
    T: Send + 'static,
    E: Clone + PartialEq + Debug + Send + 'static,
{
    recording.assert_grammar();
    assert_eq!(recording.failure().as_ref(), Some(expected));
}

/// Asserts no terminal event has been recorded yet.
pub fn assert_live<T, E>(recording: &Recording<T, E>)
where
    T: Send + 'static,
    E: Send + 'static,
{
    assert!(!recording.is_terminated(), "expected a live sequence");
}
