//
//  hydra-sdk
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Transport
//!
//! This module provides the HTTP transport every resource call goes
//! through. It merges the default headers, timeout and bearer token into
//! each request and turns every failure into a typed error.
//!
//! ## Features
//!
//! - Bearer token fetched from the [`TokenHandler`] on every call
//! - JSON-LD content negotiation (`application/ld+json`)
//! - Merge-patch updates (`application/merge-patch+json`)
//! - Transport failures and non-2xx responses classified into [`ApiError`]
//! - Optional request/response body logging when `debug` is set
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use hydra_sdk::api::client::HttpTransport;
//! use hydra_sdk::auth::{ClientCredentials, MemoryCache, TokenHandler};
//! use hydra_sdk::config::Config;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load()?;
//! let exchange = ClientCredentials::from_settings(&config.oauth, config.api.timeout())?;
//! let tokens = TokenHandler::new(
//!     Arc::new(exchange),
//!     Arc::new(MemoryCache::new()),
//!     config.oauth.organization_id.clone(),
//! );
//! let transport = HttpTransport::new(&config.api, Arc::new(tokens))?;
//!
//! let body = transport.get("/stores", &[]).await?;
//! let envelope = HttpTransport::decode_response(&body)?;
//! println!("{} stores", envelope["totalItems"]);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, Proxy};
use serde_json::{Map, Value};
use tracing::debug;
use url::Url;

use crate::api::common::{ApiError, RequestInfo};
use crate::auth::TokenHandler;
use crate::config::ApiConfig;
use crate::error::{ClientError, Error};
use crate::util::{base_url, join_url};

/// Media type of JSON-LD documents.
pub const LD_JSON: &str = "application/ld+json";

/// Media type of JSON merge-patch documents.
pub const MERGE_PATCH_JSON: &str = "application/merge-patch+json";

/// The HTTP transport.
///
/// Cheap to share behind an [`Arc`]; the underlying `reqwest` client pools
/// connections.
pub struct HttpTransport {
    /// The underlying HTTP client, with default headers applied
    http: Client,
    /// Base URL relative paths are joined to, always ending in `/`
    base_url: Url,
    /// Source of bearer tokens
    tokens: Arc<TokenHandler>,
    /// Logs bodies when set
    debug: bool,
}

impl HttpTransport {
    /// Creates a transport from the `[api]` configuration.
    ///
    /// # Parameters
    ///
    /// * `config` - Base URL, timeout, user agent and option overrides
    /// * `tokens` - Token handler consulted on every call
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if the base URL, a configured header or
    /// the proxy is invalid, or the HTTP client cannot be built.
    pub fn new(config: &ApiConfig, tokens: Arc<TokenHandler>) -> Result<Self, ClientError> {
        let base = base_url(&config.base_url).map_err(|e| {
            ClientError::with_source(format!("invalid base URL '{}'", config.base_url), e)
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(LD_JSON));
        for (key, value) in &config.http.headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| ClientError::with_source(format!("invalid header name '{key}'"), e))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| ClientError::with_source(format!("invalid value for header '{key}'"), e))?;
            headers.insert(name, value);
        }

        let mut builder = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(config.timeout());

        if let Some(secs) = config.http.connect_timeout {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        if let Some(proxy) = &config.http.proxy {
            let proxy = Proxy::all(proxy)
                .map_err(|e| ClientError::with_source(format!("invalid proxy '{proxy}'"), e))?;
            builder = builder.proxy(proxy);
        }
        if config.http.accept_invalid_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let http = builder
            .build()
            .map_err(|e| ClientError::with_source("failed to initialise HTTP client", e))?;

        Ok(Self {
            http,
            base_url: base,
            tokens,
            debug: config.debug,
        })
    }

    /// Returns the base URL relative paths are joined to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves a path or IRI to a full URL.
    ///
    /// # Errors
    ///
    /// A path that cannot be resolved, as a [`ClientError`].
    pub fn url(&self, path: &str) -> Result<Url, ClientError> {
        join_url(&self.base_url, path)
            .map_err(|e| ClientError::with_source(format!("invalid request path '{path}'"), e))
    }

    /// The token handler used by this transport.
    pub fn token_handler(&self) -> &Arc<TokenHandler> {
        &self.tokens
    }

    /// Makes an HTTP GET request.
    ///
    /// # Parameters
    ///
    /// * `path` - Path or IRI, e.g. `/stores/1/brands`
    /// * `query` - Query parameters appended to the URL
    ///
    /// # Returns
    ///
    /// The raw response body.
    ///
    /// # Errors
    ///
    /// [`Error::Client`] when no token can be obtained, [`Error::Api`] for
    /// transport failures and non-2xx responses.
    pub async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<String, Error> {
        self.send(Method::GET, path, query, None).await
    }

    /// Makes an HTTP POST request with a full JSON-LD representation.
    ///
    /// # Errors
    ///
    /// As [`get`](Self::get).
    pub async fn post(&self, path: &str, body: &Map<String, Value>) -> Result<String, Error> {
        self.send(Method::POST, path, &[], Some((LD_JSON, body))).await
    }

    /// Makes an HTTP PATCH request with a merge-patch document.
    ///
    /// # Errors
    ///
    /// As [`get`](Self::get).
    pub async fn patch(&self, path: &str, body: &Map<String, Value>) -> Result<String, Error> {
        self.send(Method::PATCH, path, &[], Some((MERGE_PATCH_JSON, body))).await
    }

    /// Makes an HTTP DELETE request.
    ///
    /// # Returns
    ///
    /// The raw response body, usually empty.
    ///
    /// # Errors
    ///
    /// As [`get`](Self::get).
    pub async fn delete(&self, path: &str) -> Result<String, Error> {
        self.send(Method::DELETE, path, &[], None).await
    }

    /// Decodes a response body into a JSON object.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] if the body is not valid JSON or is not
    /// an object. This is a client-side failure, not an HTTP one.
    pub fn decode_response(body: &str) -> Result<Map<String, Value>, ClientError> {
        match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(ClientError::new(format!(
                "expected a JSON object in response body, got {}",
                json_kind(&other)
            ))),
            Err(e) => Err(ClientError::with_source("failed to decode response body", e)),
        }
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<(&'static str, &Map<String, Value>)>,
    ) -> Result<String, Error> {
        let url = self.url(path)?;
        let info = RequestInfo::new(method.as_str(), url.as_str());

        let token = self.tokens.access_token().await?;

        debug!("{} {}", method, url);
        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .query(query)
            .bearer_auth(token);
        if let Some((content_type, body)) = body {
            if self.debug {
                let payload = serde_json::Value::Object(body.clone());
                debug!("Request body: {}", payload);
            }
            request = request.header(CONTENT_TYPE, content_type).json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => return Err(ApiError::from_transport_failure(info, e).into()),
        };

        let status = response.status();
        debug!("{} {} -> {}", method, url, status.as_u16());

        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => return Err(ApiError::from_transport_failure(info, e).into()),
        };

        if self.debug && !text.is_empty() {
            debug!("Response body: {}", text);
        }

        if !status.is_success() {
            return Err(ApiError::from_response(info, status.as_u16(), text).into());
        }

        Ok(text)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
