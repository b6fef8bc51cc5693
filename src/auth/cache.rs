//
//  hydra-sdk
//  auth/cache.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Token Cache
//!
//! The key-value store the [`TokenHandler`](super::TokenHandler) keeps
//! tokens in. Entries expire on their own once their TTL elapses; the
//! handler never polls for expiry.
//!
//! Implementations must be safe for concurrent use. Two concurrent misses
//! may both write the same key, and the last write wins.
//!
//! | Implementation | Storage | Survives restart |
//! |----------------|---------|------------------|
//! | [`MemoryCache`] | in-process map | no |
//! | [`KeyringCache`](super::KeyringCache) | system keyring | yes |

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::error::{BoxError, ClientError};

/// Characters that may not appear in a cache key.
pub const RESERVED_KEY_CHARACTERS: &str = "{}()/\\@:";

/// A token cache failure.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The key is empty or contains a reserved character.
    #[error("invalid cache key '{0}'")]
    InvalidKey(String),

    /// The storage backend failed.
    #[error("cache backend failure: {0}")]
    Backend(#[source] BoxError),
}

impl From<CacheError> for ClientError {
    fn from(err: CacheError) -> Self {
        ClientError::with_source("token cache failure", err)
    }
}

/// Rejects keys that are empty or contain a reserved character.
pub fn validate_key(key: &str) -> Result<(), CacheError> {
    if key.is_empty() || key.chars().any(|c| RESERVED_KEY_CHARACTERS.contains(c)) {
        return Err(CacheError::InvalidKey(key.to_string()));
    }
    Ok(())
}

/// A key-value store with per-entry expiry.
pub trait TokenCache: Send + Sync {
    /// Returns the value, or `None` on a miss or an expired entry.
    fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Stores a value. `None` means the entry never expires.
    fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), CacheError>;

    /// Removes a value. Removing a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), CacheError>;
}

/// In-process cache backed by a mutex-guarded map.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, MemoryEntry>>,
}

#[derive(Debug)]
struct MemoryEntry {
    value: String,
    expires_at: Option<Instant>,
}

impl MemoryCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, MemoryEntry>> {
        // A panic while holding the lock cannot leave an entry half-written.
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TokenCache for MemoryCache {
    fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        validate_key(key)?;
        let mut entries = self.entries();
        let expired = match entries.get(key) {
            None => return Ok(None),
            Some(entry) => entry.expires_at.is_some_and(|at| at <= Instant::now()),
        };
        if expired {
            entries.remove(key);
            return Ok(None);
        }
        Ok(entries.get(key).map(|entry| entry.value.clone()))
    }

    fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), CacheError> {
        validate_key(key)?;
        let entry = MemoryEntry {
            value: value.to_string(),
            // A TTL past the clock's range never expires.
            expires_at: ttl.and_then(|ttl| Instant::now().checked_add(ttl)),
        };
        self.entries().insert(key.to_string(), entry);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        validate_key(key)?;
        self.entries().remove(key);
        Ok(())
    }
}
