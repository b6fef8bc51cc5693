//
//  hydra-sdk
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module provides the typed client for the Hydra REST API.
//!
//! ## Architecture
//!
//! The API layer is organized as follows:
//!
//! - [`client`]: HTTP transport with bearer authentication and failure classification
//! - [`endpoint`]: Typed CRUD operations per resource kind
//! - [`resources`]: Resource catalogue (request/response DTOs and their field tables)
//! - [`common`]: Shared types (error family, collection pagination)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use hydra_sdk::api::HydraClient;
//! use hydra_sdk::api::resources::BrandRequest;
//! use hydra_sdk::auth::MemoryCache;
//! use hydra_sdk::config::Config;
//! use hydra_sdk::mapper::ResponseDto;
//!
//! # async fn example() -> Result<(), hydra_sdk::Error> {
//! let config = Config::load()?;
//! let client = HydraClient::from_config(&config, Arc::new(MemoryCache::new()))?;
//!
//! let brand = client
//!     .brands()
//!     .create(&BrandRequest {
//!         name: Some("Acme".to_string()),
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("created {}", brand.meta().iri());
//!
//! let page = client.brands().list(None, Some(2)).await?;
//! println!("{} of {} brands", page.members.len(), page.total_items);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! HTTP failures are returned as [`ApiError`] variants:
//!
//! - `BadRequest`: 400
//! - `Authentication`: 401 or 403
//! - `NotFound`: 404
//! - `Validation`: 422, with the violation map
//! - `Server`: 500, 502, 503, 504
//! - `GenericHttp`: anything else, or no response

/// HTTP transport.
///
/// Provides the [`HttpTransport`](client::HttpTransport) struct which handles:
/// - Bearer token injection
/// - Default headers and timeouts
/// - Failure classification
pub mod client;

/// Shared error and pagination types.
pub mod common;

/// Typed per-kind CRUD operations.
pub mod endpoint;

/// The resource catalogue.
pub mod resources;

pub use common::{ApiError, CollectionResponse};

use std::sync::Arc;

use serde_json::Value;

use crate::auth::{ClientCredentials, TokenCache, TokenHandler};
use crate::config::{Config, DefaultIris};
use crate::error::{ConfigurationError, Error};
use crate::mapper::DataMapper;

use self::client::HttpTransport;
use self::endpoint::Endpoint;
use self::resources::*;

/// Entry point of the library: one configured client per API tenant.
pub struct HydraClient {
    transport: HttpTransport,
    mapper: DataMapper,
    defaults: DefaultIris,
}

impl HydraClient {
    /// Builds a client from configuration.
    ///
    /// # Parameters
    ///
    /// * `config` - Validated before anything is built
    /// * `cache` - Token cache, e.g. [`MemoryCache`](crate::auth::MemoryCache)
    ///   or [`KeyringCache`](crate::auth::KeyringCache)
    ///
    /// # Errors
    ///
    /// [`Error::Configuration`] for an incomplete configuration,
    /// [`Error::Client`] when an HTTP client cannot be built.
    pub fn from_config(config: &Config, cache: Arc<dyn TokenCache>) -> Result<Self, Error> {
        config.validate()?;

        let exchange = ClientCredentials::from_settings(&config.oauth, config.api.timeout())?;
        let tokens = TokenHandler::new(
            Arc::new(exchange),
            cache,
            config.oauth.organization_id.clone(),
        );
        let transport = HttpTransport::new(&config.api, Arc::new(tokens))?;

        Ok(Self::new(transport, config.defaults.clone()))
    }

    /// Builds a client around an existing transport.
    pub fn new(transport: HttpTransport, defaults: DefaultIris) -> Self {
        Self {
            transport,
            mapper: DataMapper::new(),
            defaults,
        }
    }

    /// The underlying HTTP transport.
    pub fn transport(&self) -> &HttpTransport {
        &self.transport
    }

    /// The mapper used for every response.
    pub fn mapper(&self) -> &DataMapper {
        &self.mapper
    }

    /// Default IRIs from configuration.
    pub fn defaults(&self) -> &DefaultIris {
        &self.defaults
    }

    /// The token handler behind the transport.
    pub fn token_handler(&self) -> &TokenHandler {
        self.transport.token_handler()
    }

    /// Store endpoints (`/stores`).
    pub fn stores(&self) -> Endpoint<'_, StoreRequest, StoreResponse> {
        Endpoint::new(self)
    }

    /// Brand endpoints, scoped to a store.
    pub fn brands(&self) -> Endpoint<'_, BrandRequest, BrandResponse> {
        Endpoint::new(self)
    }

    /// Category endpoints, scoped to a store.
    pub fn categories(&self) -> Endpoint<'_, CategoryRequest, CategoryResponse> {
        Endpoint::new(self)
    }

    /// Attribute endpoints, scoped to a store.
    pub fn attributes(&self) -> Endpoint<'_, AttributeRequest, AttributeResponse> {
        Endpoint::new(self)
    }

    /// Integration endpoints, scoped to a store.
    pub fn integrations(&self) -> Endpoint<'_, IntegrationRequest, IntegrationResponse> {
        Endpoint::new(self)
    }

    /// Inventory location endpoints, scoped to a store.
    pub fn inventory_locations(
        &self,
    ) -> Endpoint<'_, InventoryLocationRequest, InventoryLocationResponse> {
        Endpoint::new(self)
    }

    /// Resolves the collection path of `kind`.
    ///
    /// Store-scoped kinds live under `scope`, falling back to
    /// `defaults.store`.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::Missing`] when a store-scoped kind has neither.
    pub fn collection_path(
        &self,
        kind: ResourceKind,
        scope: Option<&str>,
    ) -> Result<String, ConfigurationError> {
        if !kind.is_store_scoped() {
            return Ok(format!("/{}", kind.collection_segment()));
        }

        let store = scope
            .or(self.defaults.store.as_deref())
            .filter(|store| !store.is_empty())
            .ok_or(ConfigurationError::Missing("defaults.store"))?;

        Ok(format!(
            "{}/{}",
            store.trim_end_matches('/'),
            kind.collection_segment()
        ))
    }

    /// Fetches any resource by IRI, typed by its `@type`.
    pub async fn fetch(&self, iri: &str) -> Result<Resource, Error> {
        let body = self.transport.get(iri, &[]).await?;
        let wire = Value::Object(HttpTransport::decode_response(&body)?);
        Ok(self.mapper.from_response(&wire)?)
    }

    /// Lists one page of any collection, typed by its `@context`.
    pub async fn fetch_collection(
        &self,
        path: &str,
        page: Option<u32>,
    ) -> Result<CollectionResponse<Resource>, Error> {
        let query: Vec<(&str, String)> = page
            .map(|page| vec![("page", page.to_string())])
            .unwrap_or_default();
        let body = self.transport.get(path, &query).await?;
        let wire = Value::Object(HttpTransport::decode_response(&body)?);
        Ok(self.mapper.from_collection_response(&wire)?)
    }
}
