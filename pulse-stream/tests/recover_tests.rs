// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use pulse_core::{Disposable, Signal, Subject};
use pulse_stream::RecoverExt;
use pulse_test_utils::helpers::{assert_completed, assert_failed, assert_values};
use pulse_test_utils::Recording;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[test]
fn test_flat_map_error_switches_to_the_recovery_signal() {
    // Arrange
    let recording = Recording::new();
    let source = Signal::<i32, &'static str>::new(|emitter| {
        emitter.next(1);
        emitter.fail("boom");
        Disposable::noop()
    });

    // Act
    source
        .flat_map_error(|_| Signal::<i32, ()>::from_iter(vec![8, 9]))
        .observe(recording.observer());

    // Assert
    assert_values(&recording, &[1, 8, 9]);
    assert_completed(&recording);
}

#[test]
fn test_flat_map_error_untouched_when_source_completes() {
    let recording = Recording::new();

    Signal::<i32, &'static str>::from_iter(vec![1, 2])
        .flat_map_error(|_| Signal::<i32, ()>::just(99))
        .observe(recording.observer());

    assert_values(&recording, &[1, 2]);
    assert_completed(&recording);
}

#[test]
fn test_flat_map_error_tears_the_failed_subscription_down_first() {
    // Arrange: the source hands its emitter out so the failure can be
    // triggered after the subscription is fully wired; its disposable
    // reports teardown, and the recovery factory checks that teardown
    // already happened.
    let emitter_slot = Arc::new(parking_lot::Mutex::new(None));
    let source_disposed = Arc::new(AtomicUsize::new(0));
    let source = Signal::<i32, &'static str>::new({
        let emitter_slot = Arc::clone(&emitter_slot);
        let source_disposed = Arc::clone(&source_disposed);
        move |emitter| {
            *emitter_slot.lock() = Some(emitter);
            let source_disposed = Arc::clone(&source_disposed);
            Disposable::new(move || {
                source_disposed.fetch_add(1, Ordering::SeqCst);
            })
        }
    });
    let recording = Recording::new();
    let disposed_before_recovery = Arc::new(AtomicUsize::new(0));

    source
        .flat_map_error({
            let source_disposed = Arc::clone(&source_disposed);
            let disposed_before_recovery = Arc::clone(&disposed_before_recovery);
            move |_| {
                disposed_before_recovery
                    .store(source_disposed.load(Ordering::SeqCst), Ordering::SeqCst);
                Signal::<i32, ()>::just(5)
            }
        })
        .observe(recording.observer());

    // Act
    let held = emitter_slot.lock().take().expect("producer ran");
    held.fail("boom");

    // Assert
    assert_eq!(disposed_before_recovery.load(Ordering::SeqCst), 1);
    assert_values(&recording, &[5]);
    assert_completed(&recording);
}

#[test]
fn test_flat_map_error_recovery_failures_propagate_uncaught() {
    let recording = Recording::new();

    Signal::<i32, &'static str>::failed("first")
        .flat_map_error(|_| Signal::<i32, &'static str>::failed("second"))
        .observe(recording.observer());

    assert_failed(&recording, &"second");
}

#[test]
fn test_retry_makes_exactly_budgeted_attempts_then_fails() {
    // Arrange: a source that fails every attempt, counting subscriptions.
    let attempts = Arc::new(AtomicUsize::new(0));
    let source = Signal::<i32, &'static str>::new({
        let attempts = Arc::clone(&attempts);
        move |emitter| {
            attempts.fetch_add(1, Ordering::SeqCst);
            emitter.fail("always");
            Disposable::noop()
        }
    });
    let recording = Recording::new();

    // Act
    source.retry(2).observe(recording.observer());

    // Assert: initial attempt plus two retries, final failure observed.
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
    assert_failed(&recording, &"always");
}

#[test]
fn test_retry_succeeding_attempt_ends_the_loop() {
    // Arrange: fail twice, then deliver values.
    let attempts = Arc::new(AtomicUsize::new(0));
    let source = Signal::<i32, &'static str>::new({
        let attempts = Arc::clone(&attempts);
        move |emitter| {
            let attempt = attempts.fetch_add(1, Ordering::SeqCst);
            if attempt < 2 {
                emitter.fail("flaky");
            } else {
                emitter.next(7);
                emitter.complete();
            }
            Disposable::noop()
        }
    });
    let recording = Recording::new();

    // Act
    source.retry(5).observe(recording.observer());

    // Assert
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
    assert_values(&recording, &[7]);
    assert_completed(&recording);
}

#[test]
fn test_retry_zero_propagates_the_first_failure() {
    let recording = Recording::new();

    Signal::<i32, &'static str>::failed("boom")
        .retry(0)
        .observe(recording.observer());

    assert_failed(&recording, &"boom");
}

#[test]
fn test_retry_values_from_failed_attempts_still_flow() -> anyhow::Result<()> {
    // Values before each failure reach the observer; retry only rewinds
    // the subscription, not the delivered history.
    let attempts = Arc::new(AtomicUsize::new(0));
    let source = Signal::<i32, &'static str>::new({
        let attempts = Arc::clone(&attempts);
        move |emitter| {
            let attempt = attempts.fetch_add(1, Ordering::SeqCst);
            emitter.next(attempt as i32);
            if attempt == 0 {
                emitter.fail("flaky");
            } else {
                emitter.complete();
            }
            Disposable::noop()
        }
    });
    let recording = Recording::new();

    source.retry(1).observe(recording.observer());

    assert_values(&recording, &[0, 1]);
    assert_completed(&recording);
    Ok(())
}

#[test]
fn test_retry_disposal_stops_resubscription() -> anyhow::Result<()> {
    let subject = Subject::<i32, &'static str>::new();
    let recording = Recording::new();
    let subscription = subject.to_signal().retry(3).observe(recording.observer());

    subject.next(1)?;
    subscription.dispose();

    assert_eq!(subject.observer_count(), 0);
    assert_values(&recording, &[1]);
    Ok(())
}
