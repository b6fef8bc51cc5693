//
//  hydra-sdk
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Produces a bearer token for every outbound API call, keeping network
//! round-trips to the authorization server to a minimum.
//!
//! ## Token lifecycle
//!
//! Per organization, the cached token is in one of two states:
//!
//! - **Cold** (no cache entry): [`TokenHandler::access_token`] performs a
//!   client-credentials exchange. When the server reports `expires_in`, the
//!   token is cached with a TTL of `expires_in - buffer` so that a token
//!   is never handed out moments before it expires.
//! - **Warm** (cache hit): the cached token is returned, no network call.
//!
//! The cache moves an entry back to cold by itself when its TTL elapses.
//!
//! ## Module Structure
//!
//! - [`oauth`](self::ClientCredentials): client-credentials exchange
//! - [`cache`](self::TokenCache): cache trait and in-memory cache
//! - [`keyring`](self::KeyringCache): keyring-backed persistent cache
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use hydra_sdk::auth::{ClientCredentials, MemoryCache, TokenHandler};
//! use hydra_sdk::config::Config;
//!
//! async fn token() -> Result<String, Box<dyn std::error::Error>> {
//!     let config = Config::load()?;
//!     let exchange = ClientCredentials::from_settings(&config.oauth, Duration::from_secs(30))?;
//!     let handler = TokenHandler::new(
//!         Arc::new(exchange),
//!         Arc::new(MemoryCache::new()),
//!         config.oauth.organization_id.clone(),
//!     );
//!     Ok(handler.access_token().await?)
//! }
//! ```

mod cache;
mod keyring;
mod oauth;

pub use self::cache::*;
pub use self::keyring::*;
pub use self::oauth::*;

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, warn};

use crate::error::{ClientError, ConfigurationError};

/// Default safety margin subtracted from a token's lifetime.
pub const EXPIRATION_BUFFER: Duration = Duration::from_secs(30);

/// Obtains and caches bearer tokens.
///
/// Concurrent misses are not coalesced: two callers that miss at the same
/// time both perform an exchange and the last cache write wins.
pub struct TokenHandler {
    exchange: Arc<dyn TokenExchange>,
    cache: Arc<dyn TokenCache>,
    organization_id: String,
    expiration_buffer: Duration,
}

impl TokenHandler {
    /// Creates a handler with the default 30 second buffer.
    ///
    /// # Parameters
    ///
    /// * `exchange` - Source of fresh tokens
    /// * `cache` - Where tokens and expiry instants are kept
    /// * `organization_id` - Keys the cache entries
    pub fn new(
        exchange: Arc<dyn TokenExchange>,
        cache: Arc<dyn TokenCache>,
        organization_id: impl Into<String>,
    ) -> Self {
        Self {
            exchange,
            cache,
            organization_id: organization_id.into(),
            expiration_buffer: EXPIRATION_BUFFER,
        }
    }

    /// Replaces the expiry buffer.
    pub fn with_expiration_buffer(mut self, buffer: Duration) -> Self {
        self.expiration_buffer = buffer;
        self
    }

    /// Cache key of the access token.
    pub fn access_token_key(&self) -> String {
        format!("hydra_access_token_{}", self.organization_id)
    }

    /// Cache key of the expiry instant.
    pub fn expiration_key(&self) -> String {
        format!("hydra_token_expiration_{}", self.organization_id)
    }

    /// Returns a bearer token, from the cache when possible.
    ///
    /// # Errors
    ///
    /// A failed exchange, a cache failure, or a token lifetime that does
    /// not exceed the buffer, each as a [`ClientError`] carrying the cause.
    pub async fn access_token(&self) -> Result<String, ClientError> {
        let key = self.access_token_key();

        if let Some(token) = self.cache.get(&key)? {
            debug!("Access token cache hit for '{}'", key);
            return Ok(token);
        }

        debug!("Access token cache miss for '{}', exchanging credentials", key);
        let grant = self.exchange.exchange().await?;

        match grant.expires_in {
            Some(expires_in) => {
                let ttl = self.cache_ttl(expires_in)?;
                self.cache.set(&key, &grant.access_token, Some(ttl))?;
                if let Some(expires_at) = after(Utc::now(), expires_in) {
                    self.cache
                        .set(&self.expiration_key(), &expires_at.to_rfc3339(), Some(ttl))?;
                }
            }
            None => debug!("Token response has no expires_in, not caching"),
        }

        Ok(grant.access_token)
    }

    /// Returns the absolute expiry instant of `token`.
    ///
    /// Tries, in order: the cached expiry instant, the token's own JWT `exp`
    /// claim, and a fresh exchange's `expires_in`. When none of these
    /// yields a usable value the current time is returned. An exchange
    /// response that cannot be decoded counts as an unknown lifetime.
    ///
    /// # Errors
    ///
    /// Cache failures, and network or HTTP failures of the exchange, as a
    /// [`ClientError`].
    pub async fn token_expiration(&self, token: &str) -> Result<DateTime<Utc>, ClientError> {
        let key = self.expiration_key();
        let now = Utc::now();

        if let Some(raw) = self.cache.get(&key)? {
            match DateTime::parse_from_rfc3339(&raw) {
                Ok(at) => return Ok(at.with_timezone(&Utc)),
                Err(e) => warn!("Ignoring malformed cached expiry {:?}: {}", raw, e),
            }
        }

        let expires_at = match jwt_expiration(token) {
            Some(at) => at,
            None => match self.exchange.lifetime().await?.and_then(|secs| after(now, secs)) {
                Some(at) => at,
                None => {
                    warn!("Token lifetime unknown, reporting expiry as now");
                    now
                }
            },
        };

        if let Some(ttl) = (expires_at - now).to_std().ok().filter(|ttl| !ttl.is_zero()) {
            self.cache.set(&key, &expires_at.to_rfc3339(), Some(ttl))?;
        }

        Ok(expires_at)
    }

    fn cache_ttl(&self, expires_in: u64) -> Result<Duration, ConfigurationError> {
        let buffer = self.expiration_buffer.as_secs();
        if expires_in <= buffer {
            return Err(ConfigurationError::TokenLifetimeTooShort { expires_in, buffer });
        }
        Ok(Duration::from_secs(expires_in - buffer))
    }
}

fn after(now: DateTime<Utc>, seconds: u64) -> Option<DateTime<Utc>> {
    let delta = TimeDelta::try_seconds(i64::try_from(seconds).ok()?)?;
    now.checked_add_signed(delta)
}
