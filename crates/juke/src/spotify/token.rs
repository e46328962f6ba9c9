// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Access token data model.

use serde::{Deserialize, Serialize};

/// An issued access token, as persisted to disk.
///
/// `expires` is derived (absolute epoch milliseconds) and computed exactly
/// once when a token without it is first wrapped; the provider only sends
/// the relative `expires_in`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    #[serde(default)]
    pub access_token: String,
    /// Long-lived. Refresh responses may omit it; the previous value is
    /// retained in that case, never dropped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_type: String,
    /// Lifetime in seconds, as returned by the token endpoint.
    #[serde(default)]
    pub expires_in: u64,
    /// Absolute expiry, epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<u64>,
    /// Space-delimited granted scopes.
    #[serde(default)]
    pub scope: String,
}

impl AccessToken {
    /// The all-empty token used to force re-authentication.
    pub fn zeroed() -> Self {
        Self::default()
    }

    /// Compute `expires` from `expires_in` if it is not already set.
    pub fn ensure_expires(&mut self, now_ms: u64) {
        if self.expires.is_none() {
            self.expires = Some(now_ms + self.expires_in * 1000);
        }
    }

    /// A token with no known expiry counts as expired and triggers a
    /// refresh on first use.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        match self.expires {
            Some(expires) => expires <= now_ms,
            None => true,
        }
    }

    /// Carry the previous refresh token forward when the provider omitted
    /// one from a refresh response.
    pub fn retain_refresh_token(&mut self, previous: &AccessToken) {
        if self.refresh_token.is_none() {
            self.refresh_token = previous.refresh_token.clone();
        }
    }
}

/// Body returned by the token endpoint.
///
/// The provider reports grant failures as a body-level `error` field with
/// HTTP 200, so transport success does not mean the grant succeeded —
/// callers must check.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(flatten)]
    pub token: AccessToken,
}

impl TokenResponse {
    /// Reject body-level errors and yield the token.
    pub fn into_token(self) -> anyhow::Result<AccessToken> {
        if let Some(error) = self.error {
            anyhow::bail!(
                "token endpoint error: {error}: {}",
                self.error_description.unwrap_or_default()
            );
        }
        Ok(self.token)
    }
}

#[cfg(test)]
#[path = "token_tests.rs"]
mod tests;
