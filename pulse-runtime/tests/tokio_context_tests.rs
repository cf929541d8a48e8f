// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use pulse_runtime::{ExecutionContext, TokioContext};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

fn counter() -> (Arc<AtomicUsize>, Box<dyn FnOnce() + Send>) {
    let count = Arc::new(AtomicUsize::new(0));
    let task = {
        let count = Arc::clone(&count);
        Box::new(move || {
            count.fetch_add(1, Ordering::SeqCst);
        })
    };
    (count, task)
}

#[tokio::test]
async fn test_run_executes_inline_on_the_calling_thread() {
    let ctx = TokioContext::current();
    let (count, task) = counter();

    ctx.run(task);

    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_run_after_fires_once_after_the_delay() {
    // Arrange
    let ctx = TokioContext::current();
    let (count, task) = counter();

    // Act
    ctx.run_after(Duration::from_millis(20), task);
    assert_eq!(count.load(Ordering::SeqCst), 0);
    sleep(Duration::from_millis(150)).await;

    // Assert
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_run_after_disposal_cancels_the_pending_task() {
    // Arrange
    let ctx = TokioContext::current();
    let (count, task) = counter();

    // Act
    let pending = ctx.run_after(Duration::from_millis(50), task);
    pending.dispose();
    sleep(Duration::from_millis(200)).await;

    // Assert
    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_run_every_repeats_until_disposed() {
    // Arrange
    let ctx = TokioContext::current();
    let count = Arc::new(AtomicUsize::new(0));
    let ticking = ctx.run_every(
        Duration::from_millis(20),
        Box::new({
            let count = Arc::clone(&count);
            move || {
                count.fetch_add(1, Ordering::SeqCst);
            }
        }),
    );

    // Act
    sleep(Duration::from_millis(150)).await;
    let observed = count.load(Ordering::SeqCst);
    ticking.dispose();
    sleep(Duration::from_millis(100)).await;

    // Assert: it ticked while live and stopped after disposal.
    assert!(observed >= 2, "expected at least two ticks, saw {observed}");
    assert_eq!(count.load(Ordering::SeqCst), observed);
}
