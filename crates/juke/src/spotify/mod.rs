// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Spotify integration: token lifecycle, resilient API client, and the
//! reshaped projections served to the party frontend.

pub mod client;
pub mod exchange;
pub mod interact;
pub mod model;
pub mod session;
pub mod store;
pub mod token;

/// Install the process-wide rustls crypto provider exactly once.
///
/// The `reqwest` build uses the `rustls-no-provider` feature, so a
/// `CryptoProvider` must be installed before any `Client` is constructed.
/// Called at every reqwest `Client` build site.
pub(crate) fn ensure_crypto_provider() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = rustls::crypto::ring::default_provider().install_default();
    });
}

/// Fixed OAuth authorize endpoint.
pub const AUTHORIZE_URL: &str = "https://accounts.spotify.com/authorize";

/// Fixed token endpoint (authorization code and refresh grants).
pub const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Web API base.
pub const API_URL: &str = "https://api.spotify.com/v1";

/// Scopes the app always requests — playback display and control do not
/// work without these.
pub const REQUIRED_SCOPES: [&str; 3] = [
    "user-read-currently-playing",
    "user-read-playback-state",
    "user-modify-playback-state",
];

/// Merge caller-supplied scopes with the required set, de-duplicated and
/// order-preserving (required scopes first), space-joined.
pub fn merge_scopes(extra: &[String]) -> String {
    let mut merged: Vec<&str> = REQUIRED_SCOPES.to_vec();
    for scope in extra {
        if !merged.contains(&scope.as_str()) {
            merged.push(scope);
        }
    }
    merged.join(" ")
}

/// Build the full authorize URL for the authorization-code grant.
pub fn build_authorize_url(client_id: &str, scope: &str, redirect_uri: &str) -> String {
    format!(
        "{AUTHORIZE_URL}?response_type=code\
         &client_id={client_id}\
         &scope={scope}\
         &redirect_uri={redirect_uri}",
        client_id = urlencoded(client_id),
        scope = urlencoded(scope),
        redirect_uri = urlencoded(redirect_uri),
    )
}

/// Form-style encoding for URL query parameters (spaces as `+`).
pub(crate) fn urlencoded(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char);
            }
            b' ' => out.push('+'),
            _ => {
                out.push('%');
                out.push(char::from(HEX[(b >> 4) as usize]));
                out.push(char::from(HEX[(b & 0xf) as usize]));
            }
        }
    }
    out
}

const HEX: &[u8; 16] = b"0123456789ABCDEF";

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
