// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The two OAuth token-endpoint exchanges: authorization code -> token and
//! refresh token -> token.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::spotify::token::TokenResponse;
use crate::spotify::TOKEN_URL;

/// Client for the provider's token endpoint, bound to one application's
/// credentials.
#[derive(Clone)]
pub struct TokenExchange {
    http: reqwest::Client,
    token_url: String,
    client_id: String,
    client_secret: String,
}

impl TokenExchange {
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self::with_token_url(client_id, client_secret, TOKEN_URL.to_owned())
    }

    /// Bind to a non-default token endpoint (tests point this at a stub).
    pub fn with_token_url(client_id: String, client_secret: String, token_url: String) -> Self {
        crate::spotify::ensure_crypto_provider();
        Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            token_url,
            client_id,
            client_secret,
        }
    }

    /// The bound application client ID (used to build the authorize URL).
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Exchange an authorization code for a token.
    ///
    /// Credentials travel in an HTTP Basic header, per the provider's
    /// authorization-code convention. A body-level `error` comes back with
    /// HTTP 200 and is NOT an `Err` here — check the response.
    pub async fn exchange_code(
        &self,
        code: &str,
        redirect_uri: &str,
    ) -> anyhow::Result<TokenResponse> {
        let basic = STANDARD.encode(format!("{}:{}", self.client_id, self.client_secret));
        let resp = self
            .http
            .post(&self.token_url)
            .header("Authorization", format!("Basic {basic}"))
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", redirect_uri),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            anyhow::bail!("token exchange failed ({status}): {text}");
        }

        let token: TokenResponse = resp.json().await?;
        Ok(token)
    }

    /// Exchange a refresh token for a new access token.
    ///
    /// Same body-level-error convention as [`TokenExchange::exchange_code`].
    pub async fn refresh(&self, refresh_token: &str) -> anyhow::Result<TokenResponse> {
        let resp = self
            .http
            .post(&self.token_url)
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            anyhow::bail!("token refresh failed ({status}): {text}");
        }

        let token: TokenResponse = resp.json().await?;
        Ok(token)
    }
}
