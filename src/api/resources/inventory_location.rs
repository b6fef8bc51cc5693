//
//  hydra-sdk
//  api/resources/inventory_location.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use once_cell::sync::Lazy;
use serde::Serialize;

use super::{ResourceKind, ResourceMeta};
use crate::mapper::{
    FieldMap, FieldValue, RequestDto, RequestField, ResponseDto, ResponseField,
    ResponseMappingFailure,
};

/// Create/update payload for an inventory location.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryLocationRequest {
    pub iri: Option<String>,
    pub store: Option<String>,
    pub name: Option<String>,
    pub code: Option<String>,
    /// IRI of the integration that feeds this location.
    pub integration: Option<String>,
    pub is_default: Option<bool>,
}

static INVENTORY_LOCATION_REQUEST_FIELDS: Lazy<Vec<RequestField<InventoryLocationRequest>>> =
    Lazy::new(|| {
        vec![
            RequestField::skip("iri", |r: &InventoryLocationRequest| {
                FieldValue::from(r.iri.clone())
            }),
            RequestField::unmapped("store", |r: &InventoryLocationRequest| {
                FieldValue::from(r.store.clone())
            }),
            RequestField::new("name", "name", |r: &InventoryLocationRequest| {
                FieldValue::from(r.name.clone())
            }),
            RequestField::new("code", "code", |r: &InventoryLocationRequest| {
                FieldValue::from(r.code.clone())
            }),
            RequestField::new("integration", "integration", |r: &InventoryLocationRequest| {
                FieldValue::from(r.integration.clone())
            }),
            RequestField::new("is_default", "isDefault", |r: &InventoryLocationRequest| {
                FieldValue::from(r.is_default)
            }),
        ]
    });

impl RequestDto for InventoryLocationRequest {
    const TYPE_NAME: &'static str = "InventoryLocationRequest";

    fn fields() -> &'static [RequestField<Self>] {
        INVENTORY_LOCATION_REQUEST_FIELDS.as_slice()
    }

    fn iri(&self) -> Option<&str> {
        self.iri.as_deref()
    }

    fn store(&self) -> Option<&str> {
        self.store.as_deref()
    }
}

/// An inventory location as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryLocationResponse {
    #[serde(flatten)]
    meta: ResourceMeta,
    store: String,
    name: String,
    code: Option<String>,
    integration: Option<String>,
    is_default: bool,
}

const INVENTORY_LOCATION_RESPONSE_FIELDS: &[ResponseField] = &[
    ResponseField::required("store", "store"),
    ResponseField::required("name", "name"),
    ResponseField::optional("code", "code"),
    ResponseField::optional("integration", "integration"),
    ResponseField::required("is_default", "isDefault"),
];

impl InventoryLocationResponse {
    /// IRI of the owning store.
    pub fn store(&self) -> &str {
        &self.store
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Short code used by external systems, if any.
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// IRI of the integration that feeds this location, if any.
    pub fn integration(&self) -> Option<&str> {
        self.integration.as_deref()
    }

    /// Whether stock is allocated here when no location is given.
    pub fn is_default(&self) -> bool {
        self.is_default
    }
}

impl ResponseDto for InventoryLocationResponse {
    const KIND: ResourceKind = ResourceKind::InventoryLocation;
    const TYPE_NAME: &'static str = "InventoryLocationResponse";

    fn fields() -> &'static [ResponseField] {
        INVENTORY_LOCATION_RESPONSE_FIELDS
    }

    fn from_fields(meta: ResourceMeta, mut fields: FieldMap) -> Result<Self, ResponseMappingFailure> {
        Ok(Self {
            meta,
            store: fields.string("store")?,
            name: fields.string("name")?,
            code: fields.opt_string("code")?,
            integration: fields.opt_string("integration")?,
            is_default: fields.bool("is_default")?,
        })
    }

    fn meta(&self) -> &ResourceMeta {
        &self.meta
    }
}
