// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::sync::atomic::{AtomicU32, Ordering};

fn fast_policy(times: u32) -> RetryPolicy {
    RetryPolicy { times, backoff: Duration::from_millis(1) }
}

#[tokio::test]
async fn always_failing_action_runs_exactly_times_attempts() -> anyhow::Result<()> {
    let calls = AtomicU32::new(0);
    let calls = &calls;
    let result: anyhow::Result<()> = catch_and_retry(&fast_policy(10), move || async move {
        calls.fetch_add(1, Ordering::Relaxed);
        anyhow::bail!("always fails")
    })
    .await;

    assert!(result.is_err());
    assert_eq!(calls.load(Ordering::Relaxed), 10);
    Ok(())
}

#[tokio::test]
async fn returns_first_success() -> anyhow::Result<()> {
    let calls = AtomicU32::new(0);
    let calls = &calls;
    let value = catch_and_retry(&fast_policy(10), move || async move {
        let n = calls.fetch_add(1, Ordering::Relaxed);
        if n < 2 {
            anyhow::bail!("not yet")
        }
        Ok(n)
    })
    .await?;

    assert_eq!(value, 2);
    assert_eq!(calls.load(Ordering::Relaxed), 3);
    Ok(())
}

#[tokio::test]
async fn predicate_short_circuits() -> anyhow::Result<()> {
    let calls = AtomicU32::new(0);
    let calls = &calls;
    let result: anyhow::Result<()> = catch_and_retry_if(
        &fast_policy(10),
        |e| !e.to_string().contains("fatal"),
        move || async move {
            calls.fetch_add(1, Ordering::Relaxed);
            anyhow::bail!("fatal: bad client credentials")
        },
    )
    .await;

    assert!(result.is_err());
    assert_eq!(calls.load(Ordering::Relaxed), 1);
    Ok(())
}

#[tokio::test]
async fn zero_times_still_attempts_once() -> anyhow::Result<()> {
    let calls = AtomicU32::new(0);
    let calls = &calls;
    let result: anyhow::Result<()> = catch_and_retry(&fast_policy(0), move || async move {
        calls.fetch_add(1, Ordering::Relaxed);
        anyhow::bail!("nope")
    })
    .await;

    assert!(result.is_err());
    assert_eq!(calls.load(Ordering::Relaxed), 1);
    Ok(())
}
