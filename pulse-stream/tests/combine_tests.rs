// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use pulse_core::{Signal, Subject};
use pulse_stream::{
    AmbExt, CombineLatestExt, ConcatWithExt, MergeWithExt, StartWithExt, ZipExt,
};
use pulse_test_utils::helpers::{assert_completed, assert_failed, assert_live, assert_values};
use pulse_test_utils::Recording;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[test]
fn test_combine_latest_waits_for_both_sides() -> anyhow::Result<()> {
    // Arrange
    let left = Subject::<&'static str, ()>::new();
    let right = Subject::<&'static str, ()>::new();
    let recording = Recording::new();
    left.to_signal()
        .combine_latest_with(right.to_signal())
        .observe(recording.observer());

    // Act / Assert: nothing before both sides have emitted once.
    left.next("a1")?;
    assert!(recording.is_empty());

    right.next("b1")?;
    left.next("a2")?;

    assert_values(&recording, &[("a1", "b1"), ("a2", "b1")]);
    assert_live(&recording);
    Ok(())
}

#[test]
fn test_combine_latest_completed_side_becomes_a_fixed_partner() -> anyhow::Result<()> {
    let left = Subject::<i32, ()>::new();
    let right = Subject::<i32, ()>::new();
    let recording = Recording::new();
    left.to_signal()
        .combine_latest_with(right.to_signal())
        .observe(recording.observer());

    left.next(1)?;
    right.next(10)?;
    left.complete()?;
    right.next(20)?;
    right.complete()?;

    assert_values(&recording, &[(1, 10), (1, 20)]);
    assert_completed(&recording);
    Ok(())
}

#[test]
fn test_combine_latest_valueless_completion_completes_the_pairing() -> anyhow::Result<()> {
    // A side completing without ever emitting means no pair can form.
    let left = Subject::<i32, ()>::new();
    let right = Subject::<i32, ()>::new();
    let recording = Recording::new();
    left.to_signal()
        .combine_latest_with(right.to_signal())
        .observe(recording.observer());

    left.complete()?;

    assert_values(&recording, &[]);
    assert_completed(&recording);
    Ok(())
}

#[test]
fn test_combine_latest_failure_discards_partner_state() -> anyhow::Result<()> {
    let left = Subject::<i32, &'static str>::new();
    let right = Subject::<i32, &'static str>::new();
    let recording = Recording::new();
    left.to_signal()
        .combine_latest_with(right.to_signal())
        .observe(recording.observer());

    left.next(1)?;
    right.fail("boom")?;

    assert_values(&recording, &[]);
    assert_failed(&recording, &"boom");
    Ok(())
}

#[test]
fn test_zip_pairs_strictly_by_position() -> anyhow::Result<()> {
    // Arrange
    let left = Subject::<&'static str, ()>::new();
    let right = Subject::<&'static str, ()>::new();
    let recording = Recording::new();
    left.to_signal()
        .zip_with(right.to_signal())
        .observe(recording.observer());

    // Act: A emits three values, B two, then B completes.
    left.next("a1")?;
    left.next("a2")?;
    right.next("b1")?;
    left.next("a3")?;
    right.next("b2")?;
    right.complete()?;

    // Assert: a3 is never paired.
    assert_values(&recording, &[("a1", "b1"), ("a2", "b2")]);
    assert_completed(&recording);
    Ok(())
}

#[test]
fn test_zip_failure_from_either_side_fails_immediately() -> anyhow::Result<()> {
    let left = Subject::<i32, &'static str>::new();
    let right = Subject::<i32, &'static str>::new();
    let recording = Recording::new();
    left.to_signal()
        .zip_with(right.to_signal())
        .observe(recording.observer());

    left.next(1)?;
    left.fail("boom")?;

    assert_failed(&recording, &"boom");
    Ok(())
}

#[test]
fn test_merge_with_interleaves_and_completes_when_both_do() -> anyhow::Result<()> {
    // Arrange
    let left = Subject::<i32, ()>::new();
    let right = Subject::<i32, ()>::new();
    let recording = Recording::new();
    left.to_signal()
        .merge_with(right.to_signal())
        .observe(recording.observer());

    // Act
    left.next(1)?;
    right.next(10)?;
    left.next(2)?;
    left.complete()?;
    right.next(20)?;

    // Assert: still live with one side open.
    assert_values(&recording, &[1, 10, 2, 20]);
    assert_live(&recording);

    right.complete()?;
    assert_completed(&recording);
    Ok(())
}

#[test]
fn test_concat_with_exhausts_the_source_first() {
    let recording = Recording::new();

    Signal::<i32, ()>::from_iter(vec![1, 2])
        .concat_with(Signal::from_iter(vec![3, 4]))
        .observe(recording.observer());

    assert_values(&recording, &[1, 2, 3, 4]);
    assert_completed(&recording);
}

#[test]
fn test_concat_with_failure_never_starts_the_continuation() {
    // Arrange: count subscriptions to the continuation.
    let continuation_runs = Arc::new(AtomicUsize::new(0));
    let continuation = Signal::<i32, &'static str>::new({
        let continuation_runs = Arc::clone(&continuation_runs);
        move |emitter| {
            continuation_runs.fetch_add(1, Ordering::SeqCst);
            emitter.complete();
            pulse_core::Disposable::noop()
        }
    });
    let recording = Recording::new();

    // Act
    Signal::<i32, &'static str>::failed("boom")
        .concat_with(continuation)
        .observe(recording.observer());

    // Assert
    assert_failed(&recording, &"boom");
    assert_eq!(continuation_runs.load(Ordering::SeqCst), 0);
}

#[test]
fn test_amb_forwards_only_the_first_side_to_emit() -> anyhow::Result<()> {
    // Arrange
    let left = Subject::<i32, ()>::new();
    let right = Subject::<i32, ()>::new();
    let recording = Recording::new();
    left.to_signal()
        .amb_with(right.to_signal())
        .observe(recording.observer());

    // Act: the right side wins the race.
    right.next(10)?;
    left.next(1)?;
    right.next(20)?;
    right.complete()?;

    // Assert: the losing side was disposed on the first event.
    assert_values(&recording, &[10, 20]);
    assert_completed(&recording);
    assert_eq!(left.observer_count(), 0);
    Ok(())
}

#[test]
fn test_start_with_prepends_before_upstream_events() {
    let recording = Recording::new();

    Signal::<i32, ()>::from_iter(vec![2, 3])
        .start_with(1)
        .observe(recording.observer());

    assert_values(&recording, &[1, 2, 3]);
    assert_completed(&recording);
}

#[test]
fn test_zip_with_previous_marks_the_absent_first_previous() {
    let recording = Recording::new();

    Signal::<i32, ()>::from_iter(vec![1, 2, 3])
        .zip_with_previous()
        .observe(recording.observer());

    assert_values(&recording, &[(None, 1), (Some(1), 2), (Some(2), 3)]);
    assert_completed(&recording);
}
