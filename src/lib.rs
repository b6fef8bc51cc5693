//
//  hydra-sdk
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Hydra SDK
//!
//! A typed client library for a JSON-LD/Hydra REST API.
//!
//! ## Overview
//!
//! Callers build typed request DTOs, the [`DataMapper`] serializes them
//! using static field tables, the HTTP transport sends them with a bearer
//! token obtained through the OAuth 2.0 client-credentials grant, and the
//! JSON-LD response is mapped back to a typed response DTO (or a typed
//! collection page). Every HTTP failure is classified into a typed
//! [`ApiError`](api::ApiError) before it reaches the caller.
//!
//! ## Features
//!
//! - **Typed Resources**: Stores, brands, categories, attributes, integrations and inventory locations
//! - **Metadata-Driven Mapping**: Wire names, skip/unmapped fields and value transformers per field
//! - **Discriminator Dispatch**: `@type` selects the response type; collections check every member
//! - **Token Caching**: In-memory or system keyring, with an expiry buffer
//! - **Typed Failures**: 400/401/403/404/422/5xx each map to their own error variant
//!
//! ## Module Structure
//!
//! - [`api`]: HTTP transport, resource endpoints, resource catalogue, error family
//! - [`auth`]: OAuth 2.0 client-credentials exchange and token caching
//! - [`mapper`]: Field metadata, transformers and the data mapper
//! - [`config`]: Configuration file management
//! - [`error`]: Crate-level error types
//! - [`cli`]: Command-line interface of the `hydra` binary
//! - [`util`]: IRI and path helpers
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use hydra_sdk::{Config, HydraClient};
//! use hydra_sdk::auth::KeyringCache;
//!
//! # async fn example() -> Result<(), hydra_sdk::Error> {
//! let config = Config::load()?;
//! let client = HydraClient::from_config(&config, Arc::new(KeyringCache::new()))?;
//!
//! for store in client.stores().list(None, None).await?.members {
//!     println!("{}: {}", store.code(), store.name());
//! }
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions.
///
/// Contains the `hydra` commands defined using the clap derive API.
pub mod cli;

/// Typed API client.
///
/// The HTTP transport, per-kind endpoints, the resource catalogue and the
/// classified HTTP error family.
pub mod api;

/// Authentication and token caching.
///
/// Handles:
/// - OAuth 2.0 client-credentials exchange
/// - Token caching with an expiry buffer
/// - Persistent token storage via the system keychain
pub mod auth;

/// Configuration file management.
///
/// Manages the client configuration stored in platform-specific locations:
/// - Linux: `~/.config/hydra/config.toml`
/// - macOS: `~/Library/Application Support/hydra/config.toml`
/// - Windows: `%APPDATA%\hydra\config.toml`
pub mod config;

/// Crate-level error types.
pub mod error;

/// Metadata-driven mapping between typed DTOs and the wire format.
pub mod mapper;

/// IRI and path helpers.
pub mod util;

/// Re-export of the main client.
pub use api::HydraClient;

/// Re-export of the command-line root.
pub use cli::Cli;

/// Re-export of the configuration struct.
///
/// # Example
///
/// ```rust,no_run
/// use hydra_sdk::Config;
///
/// let config = Config::load().expect("Failed to load config");
/// println!("API: {}", config.api.base_url);
/// ```
pub use config::Config;

/// Re-export of the crate error.
pub use error::Error;

/// Re-export of the data mapper.
pub use mapper::DataMapper;

/// Application name constant.
///
/// The name of the CLI binary, used for display purposes and configuration paths.
///
/// # Value
///
/// `"hydra"`
pub const APP_NAME: &str = "hydra";

/// Library version constant.
///
/// Derived from Cargo.toml at compile time.
///
/// # Example
///
/// ```rust
/// use hydra_sdk::VERSION;
///
/// println!("hydra-sdk version {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// Standardized exit codes following Unix conventions, allowing scripts
/// to programmatically detect the outcome of CLI operations.
///
/// # Exit Code Ranges
///
/// - `0`: Success
/// - `1-3`: General errors and usage issues
/// - `4-7`: Authentication-related issues
/// - `8-15`: Resource-related issues
/// - `32+`: External service issues
///
/// # Example
///
/// ```rust
/// use hydra_sdk::api::common::{ApiError, RequestInfo};
/// use hydra_sdk::{exit_codes, Error};
///
/// let err = Error::from(ApiError::from_response(RequestInfo::new("GET", "/stores/9"), 404, ""));
/// assert_eq!(exit_codes::for_error(&err), exit_codes::NOT_FOUND);
/// ```
pub mod exit_codes {
    use crate::api::ApiError;
    use crate::error::Error;

    /// Successful execution.
    ///
    /// # Value
    ///
    /// `0`
    pub const SUCCESS: i32 = 0;

    /// General error.
    ///
    /// An unspecified error occurred during execution.
    /// Check stderr for details.
    ///
    /// # Value
    ///
    /// `1`
    pub const ERROR: i32 = 1;

    /// Invalid usage, arguments or configuration.
    ///
    /// # Value
    ///
    /// `2`
    pub const USAGE: i32 = 2;

    /// Authentication failed.
    ///
    /// The API rejected the bearer token (401 or 403).
    /// Check the `[oauth]` settings.
    ///
    /// # Value
    ///
    /// `4`
    pub const AUTH_ERROR: i32 = 4;

    /// Resource not found.
    ///
    /// # Value
    ///
    /// `8`
    pub const NOT_FOUND: i32 = 8;

    /// The API rejected the request payload (400 or 422).
    ///
    /// # Value
    ///
    /// `10`
    pub const VALIDATION: i32 = 10;

    /// The API failed with a 5xx status.
    ///
    /// # Value
    ///
    /// `32`
    pub const SERVER: i32 = 32;

    /// Maps an error to the exit code the CLI reports.
    pub fn for_error(err: &Error) -> i32 {
        match err {
            Error::Api(api) => for_api_error(api),
            Error::Configuration(_) => USAGE,
            _ => ERROR,
        }
    }

    /// Maps a classified HTTP failure to an exit code.
    pub fn for_api_error(err: &ApiError) -> i32 {
        match err {
            ApiError::Authentication(_) => AUTH_ERROR,
            ApiError::NotFound { .. } => NOT_FOUND,
            ApiError::BadRequest(_) | ApiError::Validation { .. } => VALIDATION,
            ApiError::Server(_) => SERVER,
            ApiError::GenericHttp(_) => ERROR,
        }
    }
}
