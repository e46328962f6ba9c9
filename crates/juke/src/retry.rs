// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded retry with a fixed delay between attempts.
//!
//! Used around the authorization-code exchange right after the OAuth
//! redirect, where transient network or provider hiccups are most likely.

use std::future::Future;
use std::time::Duration;

/// Retry bounds: `times` is the total number of attempts, not the number
/// of re-tries after the first failure.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub times: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { times: 10, backoff: Duration::from_secs(1) }
    }
}

/// Run `action` until it succeeds or the policy is exhausted.
pub async fn catch_and_retry<T, F, Fut>(policy: &RetryPolicy, action: F) -> anyhow::Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = anyhow::Result<T>>,
{
    catch_and_retry_if(policy, |_| true, action).await
}

/// Like [`catch_and_retry`], but gives up early when `should_retry`
/// rejects the error.
pub async fn catch_and_retry_if<T, F, Fut, P>(
    policy: &RetryPolicy,
    should_retry: P,
    mut action: F,
) -> anyhow::Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = anyhow::Result<T>>,
    P: Fn(&anyhow::Error) -> bool,
{
    let times = policy.times.max(1);
    for attempt in 1..=times {
        match action().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                if attempt == times || !should_retry(&e) {
                    return Err(e);
                }
                tracing::debug!(attempt, max = times, err = %e, "attempt failed, retrying");
                tokio::time::sleep(policy.backoff).await;
            }
        }
    }

    anyhow::bail!("retries exhausted")
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod tests;
