//
//  hydra-sdk
//  auth/keyring.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Keyring Token Cache
//!
//! A [`TokenCache`] that persists entries in the system's native
//! keyring/keychain, so a token survives across process runs.
//!
//! ## Platform Support
//!
//! - **macOS**: Keychain Services
//! - **Linux**: Secret Service API (GNOME Keyring, KWallet)
//! - **Windows**: Windows Credential Manager
//!
//! ## Storage Model
//!
//! - **Service**: `hydra-sdk`
//! - **Username/Key**: the cache key
//! - **Password/Value**: `{"value": "...", "expires_at": <unix seconds>}`
//!
//! The keyring has no native expiry. Expired entries are reported as a miss
//! and removed on read.

use std::time::Duration;

use chrono::Utc;
use keyring::Entry;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::cache::{validate_key, CacheError, TokenCache};

const SERVICE_NAME: &str = "hydra-sdk";

/// Token cache stored in the system keyring.
#[derive(Debug, Clone)]
pub struct KeyringCache {
    service: String,
}

impl Default for KeyringCache {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyringCache {
    /// Creates a cache under the default service name.
    pub fn new() -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
        }
    }

    /// Creates a cache under a custom service name.
    pub fn with_service(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self, key: &str) -> Result<Entry, CacheError> {
        validate_key(key)?;
        Entry::new(&self.service, key).map_err(|e| CacheError::Backend(e.into()))
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct StoredEntry {
    value: String,
    #[serde(default)]
    expires_at: Option<i64>,
}

impl StoredEntry {
    fn new(value: &str, ttl: Option<Duration>, now: i64) -> Self {
        let expires_at = ttl
            .and_then(|ttl| i64::try_from(ttl.as_secs()).ok())
            .map(|secs| now.saturating_add(secs));
        Self {
            value: value.to_string(),
            expires_at,
        }
    }

    fn is_expired(&self, now: i64) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

impl TokenCache for KeyringCache {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let entry = self.entry(key)?;
        let raw = match entry.get_password() {
            Ok(raw) => raw,
            Err(keyring::Error::NoEntry) => return Ok(None),
            Err(e) => return Err(CacheError::Backend(e.into())),
        };

        let stored: StoredEntry = match serde_json::from_str(&raw) {
            Ok(stored) => stored,
            Err(e) => {
                warn!("Ignoring unreadable keyring entry '{}': {}", key, e);
                return Ok(None);
            }
        };

        if stored.is_expired(Utc::now().timestamp()) {
            debug!("Keyring entry '{}' expired", key);
            self.delete(key)?;
            return Ok(None);
        }

        Ok(Some(stored.value))
    }

    fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), CacheError> {
        let entry = self.entry(key)?;
        let stored = StoredEntry::new(value, ttl, Utc::now().timestamp());
        let raw = serde_json::to_string(&stored).map_err(|e| CacheError::Backend(e.into()))?;
        entry
            .set_password(&raw)
            .map_err(|e| CacheError::Backend(e.into()))
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        let entry = self.entry(key)?;
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(CacheError::Backend(e.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_entry_expiry() {
        let entry = StoredEntry::new("abc", Some(Duration::from_secs(3570)), 1_000);
        assert_eq!(entry.expires_at, Some(4_570));
        assert!(!entry.is_expired(4_569));
        assert!(entry.is_expired(4_570));

        let forever = StoredEntry::new("abc", None, 1_000);
        assert!(!forever.is_expired(i64::MAX));
    }

    #[test]
    fn test_stored_entry_format() {
        let entry = StoredEntry::new("abc", Some(Duration::from_secs(10)), 5);
        let raw = serde_json::to_string(&entry).unwrap();
        assert_eq!(raw, r#"{"value":"abc","expires_at":15}"#);
        assert_eq!(serde_json::from_str::<StoredEntry>(&raw).unwrap(), entry);
    }

    #[test]
    fn test_invalid_key_never_reaches_the_keyring() {
        let cache = KeyringCache::new();
        assert!(matches!(cache.get("org/1"), Err(CacheError::InvalidKey(_))));
    }
}
