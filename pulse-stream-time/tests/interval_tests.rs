// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use pulse_runtime::ExecutionContext;
use pulse_stream_time::{after, interval};
use pulse_test_utils::helpers::{assert_completed, assert_live, assert_values};
use pulse_test_utils::{Recording, TestContext};
use std::sync::Arc;
use std::time::Duration;

const PERIOD: Duration = Duration::from_millis(100);

fn context() -> (TestContext, Arc<dyn ExecutionContext>) {
    let clock = TestContext::new();
    let ctx: Arc<dyn ExecutionContext> = Arc::new(clock.clone());
    (clock, ctx)
}

#[test]
fn test_interval_counts_ticks_from_zero() {
    // Arrange
    let (clock, ctx) = context();
    let recording = Recording::<u64, ()>::new();
    interval(PERIOD, ctx).observe(recording.observer());

    // Act / Assert: first tick lands one full period in.
    clock.advance(Duration::from_millis(99));
    assert_values(&recording, &[]);

    clock.advance(Duration::from_millis(151));
    assert_values(&recording, &[0, 1]);
    assert_live(&recording);

    clock.advance(Duration::from_millis(50));
    assert_values(&recording, &[0, 1, 2]);
}

#[test]
fn test_interval_subscriptions_are_independent() {
    let (clock, ctx) = context();
    let first = Recording::<u64, ()>::new();
    let second = Recording::<u64, ()>::new();
    let ticks = interval(PERIOD, Arc::clone(&ctx));

    ticks.observe(first.observer());
    clock.advance(PERIOD);
    ticks.observe(second.observer());
    clock.advance(PERIOD);

    // Each subscription drives its own timer and counter.
    assert_values(&first, &[0, 1]);
    assert_values(&second, &[0]);
}

#[test]
fn test_interval_disposal_stops_the_ticks() {
    let (clock, ctx) = context();
    let recording = Recording::<u64, ()>::new();
    let subscription = interval(PERIOD, ctx).observe(recording.observer());

    clock.advance(PERIOD);
    subscription.dispose();
    clock.advance(PERIOD);
    clock.advance(PERIOD);

    assert_values(&recording, &[0]);
}

#[test]
fn test_after_fires_once_then_completes() {
    // Arrange
    let (clock, ctx) = context();
    let recording = Recording::<i32, ()>::new();
    after(7, PERIOD, ctx).observe(recording.observer());

    // Act
    clock.advance(Duration::from_millis(99));
    assert_values(&recording, &[]);
    clock.advance(Duration::from_millis(1));

    // Assert
    assert_values(&recording, &[7]);
    assert_completed(&recording);
}

#[test]
fn test_after_disposal_cancels_the_pending_value() {
    let (clock, ctx) = context();
    let recording = Recording::<i32, ()>::new();
    let subscription = after(7, PERIOD, ctx).observe(recording.observer());

    subscription.dispose();
    clock.advance(PERIOD);

    assert_values(&recording, &[]);
    assert!(recording.is_empty());
}
