// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use pulse_core::{Event, Signal, Subject};
use pulse_runtime::ExecutionContext;
use pulse_stream_time::{DelayExt, TimeoutExt};
use pulse_test_utils::helpers::{assert_completed, assert_live, assert_values};
use pulse_test_utils::{Recording, TestContext};
use std::sync::Arc;
use std::time::Duration;

const INTERVAL: Duration = Duration::from_millis(100);

fn context() -> (TestContext, Arc<dyn ExecutionContext>) {
    let clock = TestContext::new();
    let ctx: Arc<dyn ExecutionContext> = Arc::new(clock.clone());
    (clock, ctx)
}

#[test]
fn test_delay_shifts_every_event_preserving_order() -> anyhow::Result<()> {
    // Arrange
    let (clock, ctx) = context();
    let subject = Subject::<i32, ()>::new();
    let recording = Recording::new();
    subject
        .to_signal()
        .delay(INTERVAL, ctx)
        .observe(recording.observer());

    // Act
    subject.next(1)?;
    subject.next(2)?;
    subject.complete()?;
    clock.advance(Duration::from_millis(99));
    assert_values(&recording, &[]);

    clock.advance(Duration::from_millis(1));

    // Assert: values and the terminal arrive shifted, in order.
    assert_values(&recording, &[1, 2]);
    assert_completed(&recording);
    Ok(())
}

#[test]
fn test_delay_keeps_relative_spacing_of_staggered_events() -> anyhow::Result<()> {
    let (clock, ctx) = context();
    let subject = Subject::<i32, ()>::new();
    let recording = Recording::new();
    subject
        .to_signal()
        .delay(INTERVAL, ctx)
        .observe(recording.observer());

    subject.next(1)?;
    clock.advance(Duration::from_millis(50));
    subject.next(2)?;

    clock.advance(Duration::from_millis(50));
    assert_values(&recording, &[1]);
    clock.advance(Duration::from_millis(50));
    assert_values(&recording, &[1, 2]);
    Ok(())
}

#[test]
fn test_timeout_on_a_silent_source_synthesizes_the_failure() {
    // Arrange
    let (clock, ctx) = context();
    let recording = Recording::new();
    Signal::<i32, &'static str>::never()
        .timeout(INTERVAL, "deadline", ctx)
        .observe(recording.observer());

    // Act
    clock.advance(Duration::from_millis(99));
    assert_live(&recording);
    clock.advance(Duration::from_millis(1));

    // Assert: exactly one event, the synthesized failure.
    assert_eq!(recording.events(), vec![Event::Failed("deadline")]);
}

#[test]
fn test_timeout_resets_on_every_event() -> anyhow::Result<()> {
    let (clock, ctx) = context();
    let subject = Subject::<i32, &'static str>::new();
    let recording = Recording::new();
    subject
        .to_signal()
        .timeout(INTERVAL, "deadline", ctx)
        .observe(recording.observer());

    clock.advance(Duration::from_millis(60));
    subject.next(1)?;
    clock.advance(Duration::from_millis(60));
    subject.next(2)?;
    clock.advance(Duration::from_millis(60));

    // Assert: no gap ever reached the full interval.
    assert_values(&recording, &[1, 2]);
    assert_live(&recording);

    clock.advance(Duration::from_millis(40));
    assert_eq!(recording.failure(), Some("deadline"));
    Ok(())
}

#[test]
fn test_timeout_completion_beats_the_deadline() -> anyhow::Result<()> {
    let (clock, ctx) = context();
    let subject = Subject::<i32, &'static str>::new();
    let recording = Recording::new();
    subject
        .to_signal()
        .timeout(INTERVAL, "deadline", ctx)
        .observe(recording.observer());

    subject.next(1)?;
    subject.complete()?;
    clock.advance(INTERVAL);

    assert_values(&recording, &[1]);
    assert_completed(&recording);
    Ok(())
}
