//
//  hydra-sdk
//  auth/oauth.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # OAuth 2.0 Client-Credentials Grant
//!
//! Exchanges the configured client id and secret for a bearer token. No
//! end user is involved.
//!
//! ## Exchange
//!
//! ```text
//! POST https://{domain}/oauth/token
//! Content-Type: application/x-www-form-urlencoded
//!
//! grant_type=client_credentials&client_id=..&client_secret=..&audience=..&organization=..
//! ```
//!
//! The response must carry `access_token`; `expires_in` is optional and is
//! accepted as a number or a numeric string.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use hydra_sdk::auth::{ClientCredentials, TokenExchange};
//! use hydra_sdk::config::Config;
//!
//! async fn fetch() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load()?;
//!     let exchange = ClientCredentials::from_settings(&config.oauth, Duration::from_secs(30))?;
//!     let grant = exchange.exchange().await?;
//!     println!("token expires in {:?}s", grant.expires_in);
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::api::common::{ApiError, RequestInfo};
use crate::config::OAuthSettings;
use crate::error::ClientError;

/// Path of the token endpoint on the authorization server.
pub const TOKEN_PATH: &str = "/oauth/token";

/// Source of fresh access tokens.
#[async_trait]
pub trait TokenExchange: Send + Sync {
    /// Performs one network exchange.
    ///
    /// # Errors
    ///
    /// Any network, HTTP or decoding failure, as a [`ClientError`] carrying
    /// the original cause.
    async fn exchange(&self) -> Result<TokenGrant, ClientError>;

    /// Performs one network exchange and reports only the token lifetime.
    ///
    /// Decoding is best-effort: a body without a readable `expires_in`
    /// yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Network and HTTP failures, as for [`exchange`](Self::exchange).
    async fn lifetime(&self) -> Result<Option<u64>, ClientError> {
        Ok(self.exchange().await?.expires_in)
    }
}

/// The result of a successful exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenGrant {
    pub access_token: String,
    /// Lifetime in seconds, when the server reported one.
    pub expires_in: Option<u64>,
}

impl TokenGrant {
    /// Reads a grant from a token endpoint response body.
    ///
    /// # Errors
    ///
    /// A missing or non-string `access_token` is a [`ClientError`].
    pub fn from_response(body: &Value) -> Result<Self, ClientError> {
        let access_token = body
            .get("access_token")
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ClientError::new("token response has no access_token"))?;

        Ok(Self {
            access_token: access_token.to_string(),
            expires_in: parse_expires_in(body.get("expires_in")),
        })
    }
}

fn parse_expires_in(value: Option<&Value>) -> Option<u64> {
    match value? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => match s.trim().parse::<u64>() {
            Ok(seconds) => Some(seconds),
            Err(_) => {
                warn!("Ignoring non-numeric expires_in: {:?}", s);
                None
            }
        },
        Value::Null => None,
        other => {
            warn!("Ignoring expires_in of unexpected shape: {}", other);
            None
        }
    }
}

/// Client-credentials exchange against the configured authorization server.
pub struct ClientCredentials {
    http: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    audience: String,
    organization_id: String,
}

impl ClientCredentials {
    /// Builds the exchange from configuration.
    ///
    /// # Parameters
    ///
    /// * `settings` - The `[oauth]` configuration section
    /// * `timeout` - Timeout applied to each exchange
    ///
    /// # Errors
    ///
    /// A missing setting, or an HTTP client that cannot be built, as a
    /// [`ClientError`].
    pub fn from_settings(settings: &OAuthSettings, timeout: Duration) -> Result<Self, ClientError> {
        settings.validate()?;

        let http = Client::builder()
            .user_agent(format!("hydra-sdk/{}", crate::VERSION))
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::with_source("failed to initialise OAuth client", e))?;

        Ok(Self {
            http,
            token_url: token_url(&settings.domain),
            client_id: settings.client_id.clone(),
            client_secret: settings.client_secret.clone(),
            audience: settings.audience.clone(),
            organization_id: settings.organization_id.clone(),
        })
    }

    /// The resolved token endpoint URL.
    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// Posts the credentials and returns the raw body of a 2xx response.
    async fn request(&self) -> Result<String, ClientError> {
        debug!("Requesting client-credentials token from {}", self.token_url);

        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("audience", self.audience.as_str()),
            ("organization", self.organization_id.as_str()),
        ];

        let request = RequestInfo::new("POST", self.token_url.clone());
        let response = match self.http.post(&self.token_url).form(&params).send().await {
            Ok(response) => response,
            Err(e) => {
                return Err(ClientError::with_source(
                    "token exchange failed",
                    ApiError::from_transport_failure(request, e),
                ))
            }
        };

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::with_source("failed to read token response", e))?;

        if !status.is_success() {
            return Err(ClientError::with_source(
                format!("token exchange failed with status {}", status.as_u16()),
                ApiError::from_response(request, status.as_u16(), body),
            ));
        }

        Ok(body)
    }
}

/// Resolves the token endpoint for a domain.
///
/// # Example
///
/// ```rust
/// use hydra_sdk::auth::token_url;
///
/// assert_eq!(token_url("tenant.auth.example.com"), "https://tenant.auth.example.com/oauth/token");
/// assert_eq!(token_url("http://127.0.0.1:8080/"), "http://127.0.0.1:8080/oauth/token");
/// ```
pub fn token_url(domain: &str) -> String {
    let domain = domain.trim().trim_end_matches('/');
    if crate::util::is_absolute_url(domain) {
        format!("{domain}{TOKEN_PATH}")
    } else {
        format!("https://{domain}{TOKEN_PATH}")
    }
}

#[async_trait]
impl TokenExchange for ClientCredentials {
    async fn exchange(&self) -> Result<TokenGrant, ClientError> {
        let body = self.request().await?;
        let json: Value = serde_json::from_str(&body)
            .map_err(|e| ClientError::with_source("failed to parse token response", e))?;

        TokenGrant::from_response(&json)
    }

    async fn lifetime(&self) -> Result<Option<u64>, ClientError> {
        let body = self.request().await?;
        match serde_json::from_str::<Value>(&body) {
            Ok(json) => Ok(parse_expires_in(json.get("expires_in"))),
            Err(e) => {
                warn!("Ignoring undecodable token response: {}", e);
                Ok(None)
            }
        }
    }
}

/// Reads the `exp` claim of a JWT access token without verifying it.
///
/// Returns `None` for opaque tokens or a payload that cannot be decoded.
pub fn jwt_expiration(token: &str) -> Option<DateTime<Utc>> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claims: Value = serde_json::from_slice(&bytes).ok()?;
    let exp = claims.get("exp")?.as_i64()?;
    DateTime::from_timestamp(exp, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigurationError;
    use serde_json::json;

    #[test]
    fn test_grant_accepts_numeric_and_string_lifetimes() {
        let grant = TokenGrant::from_response(&json!({"access_token": "t", "expires_in": 3600})).unwrap();
        assert_eq!(grant.expires_in, Some(3600));

        let grant = TokenGrant::from_response(&json!({"access_token": "t", "expires_in": "86400"})).unwrap();
        assert_eq!(grant.expires_in, Some(86400));

        let grant = TokenGrant::from_response(&json!({"access_token": "t", "expires_in": "soon"})).unwrap();
        assert_eq!(grant.expires_in, None);

        let grant = TokenGrant::from_response(&json!({"access_token": "t"})).unwrap();
        assert_eq!(grant.expires_in, None);
    }

    #[test]
    fn test_grant_requires_access_token() {
        let err = TokenGrant::from_response(&json!({"expires_in": 3600})).unwrap_err();
        assert_eq!(err.message(), "token response has no access_token");
    }

    #[test]
    fn test_token_url() {
        assert_eq!(token_url("auth.example.com"), "https://auth.example.com/oauth/token");
        assert_eq!(token_url("https://auth.example.com/"), "https://auth.example.com/oauth/token");
    }

    #[test]
    fn test_from_settings_requires_every_field() {
        let settings = OAuthSettings {
            domain: "auth.example.com".to_string(),
            client_id: "id".to_string(),
            ..Default::default()
        };
        let err = ClientCredentials::from_settings(&settings, Duration::from_secs(5))
            .err()
            .unwrap();
        assert_eq!(
            err.cause_as::<ConfigurationError>(),
            Some(&ConfigurationError::Missing("oauth.client_secret"))
        );
    }

    #[test]
    fn test_jwt_expiration() {
        let payload = URL_SAFE_NO_PAD.encode(br#"{"sub":"client","exp":1700000000}"#);
        let token = format!("eyJhbGciOiJub25lIn0.{payload}.sig");
        assert_eq!(
            jwt_expiration(&token),
            DateTime::from_timestamp(1_700_000_000, 0)
        );
        assert_eq!(jwt_expiration("opaque-token"), None);
        assert_eq!(jwt_expiration("a.!!!.c"), None);
    }
}
