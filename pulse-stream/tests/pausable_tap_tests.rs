// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use pulse_core::{Event, Signal, Subject};
use pulse_stream::{DebugExt, PausableExt, TapExt};
use pulse_test_utils::helpers::{assert_completed, assert_values};
use pulse_test_utils::Recording;
use std::sync::Arc;

#[test]
fn test_pausable_suppresses_values_while_the_gate_is_closed() -> anyhow::Result<()> {
    // Arrange
    let source = Subject::<i32, ()>::new();
    let gate = Subject::<bool, ()>::new();
    let recording = Recording::new();
    source
        .to_signal()
        .pausable(gate.to_signal())
        .observe(recording.observer());

    // Act: gate starts open.
    source.next(1)?;
    gate.next(false)?;
    source.next(2)?;
    source.next(3)?;
    gate.next(true)?;
    source.next(4)?;

    // Assert
    assert_values(&recording, &[1, 4]);
    Ok(())
}

#[test]
fn test_pausable_terminals_pass_through_a_closed_gate() -> anyhow::Result<()> {
    let source = Subject::<i32, ()>::new();
    let gate = Subject::<bool, ()>::new();
    let recording = Recording::new();
    source
        .to_signal()
        .pausable(gate.to_signal())
        .observe(recording.observer());

    gate.next(false)?;
    source.next(1)?;
    source.complete()?;

    assert_values(&recording, &[]);
    assert_completed(&recording);
    Ok(())
}

#[test]
fn test_pausable_gate_termination_freezes_the_last_state() -> anyhow::Result<()> {
    let source = Subject::<i32, ()>::new();
    let gate = Subject::<bool, ()>::new();
    let recording = Recording::new();
    source
        .to_signal()
        .pausable(gate.to_signal())
        .observe(recording.observer());

    gate.next(false)?;
    gate.complete()?;
    source.next(1)?;

    assert_values(&recording, &[]);
    Ok(())
}

#[test]
fn test_tap_sees_every_event_without_altering_the_sequence() {
    // Arrange
    let seen = Arc::new(Mutex::new(Vec::new()));
    let recording = Recording::new();

    // Act
    Signal::<i32, ()>::from_iter(vec![1, 2])
        .tap({
            let seen = Arc::clone(&seen);
            move |event: &Event<i32, ()>| seen.lock().push(event.clone())
        })
        .observe(recording.observer());

    // Assert
    assert_eq!(
        *seen.lock(),
        vec![Event::Next(1), Event::Next(2), Event::Completed]
    );
    assert_values(&recording, &[1, 2]);
    assert_completed(&recording);
}

#[test]
fn test_debug_is_a_pure_pass_through() {
    let recording = Recording::new();

    Signal::<i32, &'static str>::from_iter(vec![1, 2])
        .debug("pipeline")
        .observe(recording.observer());

    assert_values(&recording, &[1, 2]);
    assert_completed(&recording);
}

#[test]
fn test_debug_preserves_failures() {
    let recording = Recording::new();

    Signal::<i32, &'static str>::failed("boom")
        .debug("pipeline")
        .observe(recording.observer());

    assert_eq!(recording.failure(), Some("boom"));
}
