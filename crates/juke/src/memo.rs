// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! TTL memo cache for provider lookups that rarely change (albums, artists,
//! search results), to avoid burning API calls on repeat requests.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde_json::Value;
use tokio::sync::RwLock;

/// Default entry lifetime: one hour.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

struct Entry {
    cached_at: Instant,
    data: Value,
}

/// In-memory TTL cache keyed by colon-joined strings.
pub struct Memo {
    items: RwLock<HashMap<String, Entry>>,
}

impl Memo {
    pub fn new() -> Self {
        Self { items: RwLock::new(HashMap::new()) }
    }

    /// Build a cache key from parts (`["album", id]` -> `"album:<id>"`).
    pub fn key(parts: &[&str]) -> String {
        parts.join(":")
    }

    /// Return the cached value for `key` if it is younger than `ttl`.
    pub async fn get_fresh(&self, key: &str, ttl: Duration) -> Option<Value> {
        let items = self.items.read().await;
        let entry = items.get(key)?;
        if entry.cached_at.elapsed() < ttl {
            Some(entry.data.clone())
        } else {
            None
        }
    }

    pub async fn save(&self, key: &str, data: Value) {
        let mut items = self.items.write().await;
        items.insert(key.to_owned(), Entry { cached_at: Instant::now(), data });
    }

    pub async fn delete(&self, key: &str) {
        self.items.write().await.remove(key);
    }

    /// Check the cache first; on a miss (or stale entry) run `fetch`, save
    /// the result, and return it.
    pub async fn use_cached<F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        fetch: F,
    ) -> anyhow::Result<Value>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = anyhow::Result<Value>>,
    {
        if let Some(data) = self.get_fresh(key, ttl).await {
            return Ok(data);
        }
        self.delete(key).await;
        let data = fetch().await?;
        self.save(key, data.clone()).await;
        Ok(data)
    }
}

impl Default for Memo {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "memo_tests.rs"]
mod tests;
