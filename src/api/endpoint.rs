//
//  hydra-sdk
//  api/endpoint.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Resource Endpoints
//!
//! Typed CRUD operations for one resource kind. An [`Endpoint`] composes
//! the [`HttpTransport`](super::client::HttpTransport) and the
//! [`DataMapper`](crate::mapper::DataMapper): it serializes the request
//! DTO, sends it, decodes the body and maps it to the response DTO.
//!
//! ## Paths
//!
//! | Operation | Method | Path |
//! |-----------|--------|------|
//! | `list` | GET | `{store}/{segment}` or `/stores` |
//! | `get` | GET | resource IRI |
//! | `create` | POST | `{store}/{segment}` or `/stores` |
//! | `update` | PATCH | request IRI |
//! | `delete` | DELETE | resource IRI |
//!
//! The store IRI for store-scoped kinds is taken from the explicit scope,
//! then the request's `store`, then `defaults.store`.

use std::marker::PhantomData;

use serde_json::Value;
use tracing::debug;

use super::client::HttpTransport;
use super::common::CollectionResponse;
use super::resources::ResourceKind;
use super::HydraClient;
use crate::error::{ClientError, ConfigurationError, Error};
use crate::mapper::{RequestDto, ResponseDto};

/// CRUD operations for the resource type `Resp`, created from `Req`.
pub struct Endpoint<'a, Req, Resp> {
    client: &'a HydraClient,
    _types: PhantomData<fn(&Req) -> Resp>,
}

impl<'a, Req, Resp> Endpoint<'a, Req, Resp>
where
    Req: RequestDto,
    Resp: ResponseDto,
{
    pub(crate) fn new(client: &'a HydraClient) -> Self {
        Self {
            client,
            _types: PhantomData,
        }
    }

    /// The resource kind this endpoint serves.
    pub fn kind(&self) -> ResourceKind {
        Resp::KIND
    }

    /// Lists one page of the collection.
    ///
    /// # Parameters
    ///
    /// * `scope` - Store IRI for store-scoped kinds; ignored for stores
    /// * `page` - 1-based page number, server default when `None`
    ///
    /// # Errors
    ///
    /// [`Error::Configuration`] when a store-scoped kind has no store IRI,
    /// otherwise any transport or mapping failure.
    pub async fn list(
        &self,
        scope: Option<&str>,
        page: Option<u32>,
    ) -> Result<CollectionResponse<Resp>, Error> {
        let path = self.collection_path(scope, None)?;
        let query: Vec<(&str, String)> = page
            .map(|page| vec![("page", page.to_string())])
            .unwrap_or_default();

        let body = self.client.transport().get(&path, &query).await?;
        let wire = decode(&body)?;
        Ok(self.client.mapper().from_collection_response_as::<Resp>(&wire)?)
    }

    /// Fetches one resource by IRI.
    pub async fn get(&self, iri: &str) -> Result<Resp, Error> {
        let body = self.client.transport().get(iri, &[]).await?;
        let wire = decode(&body)?;
        Ok(self.client.mapper().from_response_as::<Resp>(&wire)?)
    }

    /// Creates a resource from `request`.
    ///
    /// # Errors
    ///
    /// As [`list`](Self::list), plus [`Error::RequestMapping`] when a field
    /// cannot be serialized.
    pub async fn create(&self, request: &Req) -> Result<Resp, Error> {
        let path = self.collection_path(None, request.store())?;
        let data = request.to_wire()?;

        let body = self.client.transport().post(&path, &data).await?;
        let wire = decode(&body)?;
        Ok(self.client.mapper().from_response_as::<Resp>(&wire)?)
    }

    /// Updates the resource named by the request's IRI.
    ///
    /// The body is the request's full wire payload sent as a merge-patch,
    /// so an unset request field is sent as `null` and clears the stored
    /// value. Start from the current values to change a single field.
    ///
    /// # Errors
    ///
    /// A request without an IRI is a [`ClientError`].
    pub async fn update(&self, request: &Req) -> Result<Resp, Error> {
        let iri = request
            .iri()
            .filter(|iri| !iri.is_empty())
            .ok_or_else(|| ClientError::new(format!("{} has no IRI to update", Req::TYPE_NAME)))?;
        let data = request.to_wire()?;

        let body = self.client.transport().patch(iri, &data).await?;
        let wire = decode(&body)?;
        Ok(self.client.mapper().from_response_as::<Resp>(&wire)?)
    }

    /// Deletes a resource by IRI.
    pub async fn delete(&self, iri: &str) -> Result<(), Error> {
        self.client.transport().delete(iri).await?;
        Ok(())
    }

    /// Fetches the configured default resource of this kind.
    ///
    /// Returns `None` when no default IRI is configured, or when the kind
    /// has no default at all.
    pub async fn get_default(&self) -> Result<Option<Resp>, Error> {
        let Some(iri) = self.client.defaults().iri_for(Resp::KIND) else {
            debug!("No default {} configured", Resp::KIND);
            return Ok(None);
        };
        self.get(iri).await.map(Some)
    }

    /// Resolves the collection path, honouring the store scope fallback.
    pub fn collection_path(
        &self,
        scope: Option<&str>,
        request_store: Option<&str>,
    ) -> Result<String, ConfigurationError> {
        self.client.collection_path(Resp::KIND, scope.or(request_store))
    }
}

fn decode(body: &str) -> Result<Value, ClientError> {
    HttpTransport::decode_response(body).map(Value::Object)
}
