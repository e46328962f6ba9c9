// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Credential persistence: one JSON token file with atomic writes.
//!
//! Loading swallows every failure — a missing or corrupt file means "no
//! prior session", which is an expected first-run state, not an error.

use std::path::{Path, PathBuf};

use crate::config::PartyOptions;
use crate::spotify::token::AccessToken;

/// Name of the template user-config file seeded next to the token file on
/// first run.
const TEMPLATE_CONFIG: &str = "juke.config.json";

/// Token file handle bound to a resolved path.
#[derive(Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Bind to `location`, expanding a leading `~` to the home directory.
    pub fn new(location: &str) -> Self {
        Self { path: expand_home(location) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted token. Read and parse failures both map to
    /// `None` so first-run has a clean "no prior auth" path.
    pub fn load(&self) -> Option<AccessToken> {
        let contents = std::fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    /// Persist the token, creating parent directories on first save and
    /// seeding a template user-config file alongside the token.
    ///
    /// Writes are atomic (unique tmp file + rename) so a crash mid-write
    /// never leaves a truncated token file behind.
    pub fn save(&self, token: &AccessToken) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
                seed_template_config(parent);
            }
        }

        use std::sync::atomic::{AtomicU32, Ordering};
        static COUNTER: AtomicU32 = AtomicU32::new(0);

        let json = serde_json::to_string_pretty(token)?;
        let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
        let tmp_name = format!(
            "{}.{}.{}.tmp",
            self.path.file_name().unwrap_or_default().to_string_lossy(),
            std::process::id(),
            seq,
        );
        let tmp_path = self.path.with_file_name(tmp_name);
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

/// Write a default options file into `dir` unless one already exists.
/// Best-effort bootstrap: failure is logged, never fatal.
fn seed_template_config(dir: &Path) {
    let target = dir.join(TEMPLATE_CONFIG);
    if target.exists() {
        return;
    }
    let template = match serde_json::to_string_pretty(&PartyOptions::default()) {
        Ok(json) => json,
        Err(_) => return,
    };
    if let Err(e) = std::fs::write(&target, template) {
        tracing::warn!(path = %target.display(), err = %e, "failed to seed template config");
    } else {
        tracing::info!(path = %target.display(), "seeded template config");
    }
}

/// Expand a leading `~` to `$HOME`.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(stripped);
        }
    } else if path == "~" {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
