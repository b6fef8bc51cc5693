//
//  hydra-sdk
//  error.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Crate Error Types
//!
//! Every public operation of the client returns [`Error`], which groups the
//! failure families a caller may want to dispatch on:
//!
//! | Variant | Raised by |
//! |---------|-----------|
//! | `RequestMapping` | Serializing a request DTO |
//! | `ResponseMapping` | Deserializing a response or collection |
//! | `Api` | Any HTTP failure, classified by status code |
//! | `Client` | Token acquisition, JSON decoding, client setup |
//! | `Configuration` | Invalid or incomplete configuration |
//!
//! Program logic should match on the variant (and on the [`ApiError`]
//! kind), never on message text.

use thiserror::Error;

use crate::api::ApiError;
use crate::mapper::{RequestMappingError, ResponseMappingError};

/// Boxed error used to preserve an underlying cause.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error returned by the client.
#[derive(Error, Debug)]
pub enum Error {
    /// A request DTO could not be serialized to a wire payload.
    #[error(transparent)]
    RequestMapping(#[from] RequestMappingError),

    /// A wire payload could not be mapped to a response DTO.
    #[error(transparent)]
    ResponseMapping(#[from] ResponseMappingError),

    /// The API call failed; see [`ApiError`] for the classification.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A client-side failure without a more specific classification.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The configuration is incomplete or invalid.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

impl Error {
    /// Returns the API error if this is an HTTP failure.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }
}

/// Catch-all client failure.
///
/// Used for token exchange failures, cache failures on the token path,
/// undecodable response bodies, and HTTP client initialisation. The
/// original cause, when there is one, is available via
/// [`std::error::Error::source`].
#[derive(Error, Debug)]
#[error("{message}")]
pub struct ClientError {
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl ClientError {
    /// Creates an error without an underlying cause.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an error wrapping the original cause.
    pub fn with_source(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// The error message, without the cause.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the wrapped cause if it is of type `E`.
    pub fn cause_as<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.source.as_deref().and_then(|s| s.downcast_ref::<E>())
    }
}

impl From<ConfigurationError> for ClientError {
    fn from(err: ConfigurationError) -> Self {
        Self::with_source("invalid client configuration", err)
    }
}

/// Invalid or incomplete configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// A required setting is missing or empty.
    #[error("missing required setting `{0}`")]
    Missing(&'static str),

    /// A setting is present but unusable.
    #[error("invalid setting `{key}`: {reason}")]
    Invalid {
        /// The offending key.
        key: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// The configuration file could not be read or written.
    #[error("cannot access config file {path}: {reason}")]
    File {
        /// The file path.
        path: String,
        /// The I/O error message.
        reason: String,
    },

    /// The configuration file is not valid TOML for the expected layout.
    #[error("invalid config file: {0}")]
    Parse(String),

    /// The token lifetime does not exceed the expiry buffer, which would
    /// yield a zero or negative cache TTL.
    #[error("token lifetime of {expires_in}s does not exceed the {buffer}s expiration buffer")]
    TokenLifetimeTooShort {
        /// Lifetime reported by the authorization server, in seconds.
        expires_in: u64,
        /// Configured expiry buffer, in seconds.
        buffer: u64,
    },
}
