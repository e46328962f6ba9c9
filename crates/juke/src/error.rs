// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorized error codes for the juke API.
///
/// The wire codes double as event identifiers: every provider-side failure
/// is broadcast to subscribers under its code before the call errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCategory {
    General,
    /// No session attached to the request (never logged in, or invalidated).
    Unauthenticated,
    /// OAuth redirect came back with an `error` parameter, or the provider
    /// rejected the credentials outright (403 with a generic body).
    SpotifyUnauthenticated,
    /// Provider returned 401 — only re-running the OAuth flow recovers.
    SpotifyReauthenticate,
    /// Provider returned 403 "Restricted device" — the active playback
    /// device cannot accept the command; re-auth does not help.
    SpotifyRestricted,
    /// Provider returned 429.
    SpotifyRateLimit,
    /// Any other non-2xx provider response.
    SpotifyError,
}

impl ErrorCategory {
    pub fn http_status(&self) -> u16 {
        match self {
            Self::General => 500,
            Self::Unauthenticated => 401,
            Self::SpotifyUnauthenticated => 403,
            Self::SpotifyReauthenticate => 401,
            Self::SpotifyRestricted => 403,
            Self::SpotifyRateLimit => 429,
            Self::SpotifyError => 502,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "api/general",
            Self::Unauthenticated => "api/unauthenticated",
            Self::SpotifyUnauthenticated => "api/spotify_unauthenticated",
            Self::SpotifyReauthenticate => "api/spotify_reauthenticate",
            Self::SpotifyRestricted => "api/spotify_restricted",
            Self::SpotifyRateLimit => "api/spotify_rate_limit",
            Self::SpotifyError => "api/spotify_error",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified failure: category plus the structured detail the
/// classification produced (raw body, retry-after seconds, ...).
///
/// Raised by the provider client after the matching event has been
/// broadcast; route handlers downcast it back out of `anyhow::Error` to
/// build the HTTP envelope.
#[derive(Debug, Clone)]
pub struct Failure {
    pub category: ErrorCategory,
    pub message: String,
    pub detail: Option<serde_json::Value>,
}

impl Failure {
    pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self { category, message: message.into(), detail: None }
    }

    pub fn with_detail(
        category: ErrorCategory,
        message: impl Into<String>,
        detail: serde_json::Value,
    ) -> Self {
        Self { category, message: message.into(), detail: Some(detail) }
    }

    pub fn to_http_response(&self) -> (StatusCode, Json<ErrorResponse>) {
        let status = StatusCode::from_u16(self.category.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.category.as_str().to_owned(),
                message: self.message.clone(),
            },
        };
        (status, Json(body))
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category, self.message)
    }
}

impl std::error::Error for Failure {}

/// Top-level error response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

/// Error body with machine-readable code and human-readable message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
