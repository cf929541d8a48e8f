// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use pulse_core::Subject;
use pulse_runtime::ExecutionContext;
use pulse_stream_time::{SampleExt, ThrottleExt};
use pulse_test_utils::helpers::{assert_completed, assert_values};
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
fn test_throttle_emits_the_leading_value_and_drops_the_window() -> anyhow::Result<()> {
    // Arrange
    let (clock, ctx) = context();
    let subject = Subject::<i32, ()>::new();
    let recording = Recording::new();
    subject
        .to_signal()
        .throttle(INTERVAL, ctx)
        .observe(recording.observer());

    // Act
    subject.next(1)?;
    clock.advance(Duration::from_millis(10));
    subject.next(2)?;
    subject.next(3)?;

    // Assert: values inside the window are dropped, not deferred.
    assert_values(&recording, &[1]);

    clock.advance(Duration::from_millis(90));
    subject.next(4)?;
    assert_values(&recording, &[1, 4]);
    Ok(())
}

#[test]
fn test_throttle_terminals_are_never_suppressed() -> anyhow::Result<()> {
    let (clock, ctx) = context();
    let subject = Subject::<i32, ()>::new();
    let recording = Recording::new();
    subject
        .to_signal()
        .throttle(INTERVAL, ctx)
        .observe(recording.observer());

    subject.next(1)?;
    subject.complete()?;

    assert_values(&recording, &[1]);
    assert_completed(&recording);

    clock.advance(INTERVAL);
    assert_eq!(recording.len(), 2);
    Ok(())
}

#[test]
fn test_sample_emits_the_latest_unseen_value_per_tick() -> anyhow::Result<()> {
    // Arrange
    let (clock, ctx) = context();
    let subject = Subject::<i32, ()>::new();
    let recording = Recording::new();
    subject
        .to_signal()
        .sample(INTERVAL, ctx)
        .observe(recording.observer());

    // Act: two values inside the first tick window.
    subject.next(1)?;
    subject.next(2)?;
    clock.advance(INTERVAL);
    assert_values(&recording, &[2]);

    // A quiet tick emits nothing.
    clock.advance(INTERVAL);
    assert_values(&recording, &[2]);

    subject.next(3)?;
    clock.advance(INTERVAL);

    // Assert
    assert_values(&recording, &[2, 3]);
    Ok(())
}

#[test]
fn test_sample_disposal_stops_the_ticker() -> anyhow::Result<()> {
    let (clock, ctx) = context();
    let subject = Subject::<i32, ()>::new();
    let recording = Recording::new();
    let subscription = subject
        .to_signal()
        .sample(INTERVAL, ctx)
        .observe(recording.observer());

    subject.next(1)?;
    subscription.dispose();
    clock.advance(INTERVAL);

    assert_values(&recording, &[]);
    Ok(())
}
