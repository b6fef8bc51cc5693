//
//  hydra-sdk
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Loads the client configuration from a TOML file stored in a
//! platform-specific directory.
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/hydra/config.toml`
//! - **macOS**: `~/Library/Application Support/hydra/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\hydra\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! [api]
//! base_url = "https://api.example.com"
//! timeout = 30
//! debug = false
//!
//! [api.http]
//! connect_timeout = 10
//! headers = { "X-Tenant" = "acme" }
//!
//! [oauth]
//! domain = "tenant.auth.example.com"
//! client_id = "client"
//! client_secret = "secret"
//! audience = "https://api.example.com"
//! organization_id = "org_123"
//!
//! [defaults]
//! store = "/stores/1"
//! ```
//!
//! Missing sections take their defaults and unknown keys are ignored.
//! [`Config::validate`] checks that everything the client needs is set.
//!
//! ## Submodules
//!
//! - [`file`]: Low-level configuration file I/O operations

mod file;

pub use file::*;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::api::resources::ResourceKind;
use crate::error::ConfigurationError;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP transport settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Client-credentials grant settings.
    #[serde(default)]
    pub oauth: OAuthSettings,

    /// Default IRIs used by the resource façade.
    #[serde(default)]
    pub defaults: DefaultIris,
}

/// HTTP transport settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every relative path is joined to.
    #[serde(default)]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Logs request and response bodies when set.
    #[serde(default)]
    pub debug: bool,

    /// Transport option overrides.
    #[serde(default)]
    pub http: HttpOptions,
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("hydra-sdk/{}", crate::VERSION)
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout: default_timeout(),
            user_agent: default_user_agent(),
            debug: false,
            http: HttpOptions::default(),
        }
    }
}

impl ApiConfig {
    /// The request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Options passed through to the HTTP client.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HttpOptions {
    /// Connection timeout in seconds.
    #[serde(default)]
    pub connect_timeout: Option<u64>,

    /// Proxy URL applied to every scheme.
    #[serde(default)]
    pub proxy: Option<String>,

    #[serde(default)]
    pub accept_invalid_certs: bool,

    /// Extra headers sent with every request.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

/// Client-credentials grant settings.
#[derive(Clone, Serialize, Deserialize, Default)]
pub struct OAuthSettings {
    /// Authorization server host, or a full URL including the scheme.
    #[serde(default)]
    pub domain: String,

    #[serde(default)]
    pub client_id: String,

    #[serde(default)]
    pub client_secret: String,

    /// Accepted for provider compatibility; the client-credentials grant
    /// does not use it.
    #[serde(default)]
    pub cookie_secret: Option<String>,

    #[serde(default)]
    pub audience: String,

    /// Organization the token is issued for. Also keys the token cache.
    #[serde(default)]
    pub organization_id: String,
}

impl OAuthSettings {
    /// Checks that every setting the exchange needs is present.
    ///
    /// `cookie_secret` is optional.
    ///
    /// # Errors
    ///
    /// The first empty setting, as [`ConfigurationError::Missing`].
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let required = [
            ("oauth.domain", &self.domain),
            ("oauth.client_id", &self.client_id),
            ("oauth.client_secret", &self.client_secret),
            ("oauth.audience", &self.audience),
            ("oauth.organization_id", &self.organization_id),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigurationError::Missing(key));
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for OAuthSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthSettings")
            .field("domain", &self.domain)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("cookie_secret", &self.cookie_secret.as_ref().map(|_| "<redacted>"))
            .field("audience", &self.audience)
            .field("organization_id", &self.organization_id)
            .finish()
    }
}

/// Default IRIs for the façade's `get_default` and store scoping.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DefaultIris {
    #[serde(default)]
    pub store: Option<String>,

    #[serde(default)]
    pub integration: Option<String>,

    #[serde(default)]
    pub inventory_location: Option<String>,
}

impl DefaultIris {
    /// The configured default IRI for `kind`, if that kind has one.
    pub fn iri_for(&self, kind: ResourceKind) -> Option<&str> {
        match kind {
            ResourceKind::Store => self.store.as_deref(),
            ResourceKind::Integration => self.integration.as_deref(),
            ResourceKind::InventoryLocation => self.inventory_location.as_deref(),
            _ => None,
        }
        .filter(|iri| !iri.is_empty())
    }
}

impl Config {
    /// Loads configuration from the default location.
    ///
    /// Returns the default configuration when no file exists yet.
    pub fn load() -> Result<Self, ConfigurationError> {
        let path = Self::config_path()?;
        if config_exists(&path) {
            Self::from_path(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from an explicit file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigurationError> {
        let content = read_config_file(path)?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigurationError> {
        toml::from_str(content).map_err(|e| ConfigurationError::Parse(e.to_string()))
    }

    /// Writes this configuration to `path` as TOML.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigurationError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigurationError::Parse(e.to_string()))?;
        write_config_file(path, &content)
    }

    /// Returns the path to the configuration file.
    pub fn config_path() -> Result<PathBuf, ConfigurationError> {
        let dirs = ProjectDirs::from("", "", "hydra").ok_or(ConfigurationError::Invalid {
            key: "config_path",
            reason: "could not determine config directory".to_string(),
        })?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Checks that every setting the client needs is present.
    ///
    /// # Errors
    ///
    /// The first missing or invalid setting, as a [`ConfigurationError`].
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigurationError::Missing("api.base_url"));
        }
        Url::parse(&self.api.base_url).map_err(|e| ConfigurationError::Invalid {
            key: "api.base_url",
            reason: e.to_string(),
        })?;
        if self.api.timeout == 0 {
            return Err(ConfigurationError::Invalid {
                key: "api.timeout",
                reason: "must be greater than zero".to_string(),
            });
        }

        self.oauth.validate()
    }
}
