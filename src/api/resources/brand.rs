//
//  hydra-sdk
//  api/resources/brand.rs
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

/// Create/update payload for a brand.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrandRequest {
    pub iri: Option<String>,
    /// Owning store; selects the collection, not part of the body.
    pub store: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    /// Logo URL.
    pub logo: Option<String>,
}

static BRAND_REQUEST_FIELDS: Lazy<Vec<RequestField<BrandRequest>>> = Lazy::new(|| {
    vec![
        RequestField::skip("iri", |r: &BrandRequest| FieldValue::from(r.iri.clone())),
        RequestField::unmapped("store", |r: &BrandRequest| FieldValue::from(r.store.clone())),
        RequestField::new("name", "name", |r: &BrandRequest| FieldValue::from(r.name.clone())),
        RequestField::new("description", "description", |r: &BrandRequest| {
            FieldValue::from(r.description.clone())
        }),
        RequestField::new("logo", "logo", |r: &BrandRequest| FieldValue::from(r.logo.clone())),
    ]
});

impl RequestDto for BrandRequest {
    const TYPE_NAME: &'static str = "BrandRequest";

    fn fields() -> &'static [RequestField<Self>] {
        BRAND_REQUEST_FIELDS.as_slice()
    }

    fn iri(&self) -> Option<&str> {
        self.iri.as_deref()
    }

    fn store(&self) -> Option<&str> {
        self.store.as_deref()
    }
}

/// A brand as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandResponse {
    #[serde(flatten)]
    meta: ResourceMeta,
    store: String,
    name: String,
    description: Option<String>,
    logo: Option<String>,
}

const BRAND_RESPONSE_FIELDS: &[ResponseField] = &[
    ResponseField::required("store", "store"),
    ResponseField::required("name", "name"),
    ResponseField::optional("description", "description"),
    ResponseField::optional("logo", "logo"),
];

impl BrandResponse {
    /// IRI of the owning store.
    pub fn store(&self) -> &str {
        &self.store
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-text description, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Logo URL, if one has been uploaded.
    pub fn logo(&self) -> Option<&str> {
        self.logo.as_deref()
    }
}

impl ResponseDto for BrandResponse {
    const KIND: ResourceKind = ResourceKind::Brand;
    const TYPE_NAME: &'static str = "BrandResponse";

    fn fields() -> &'static [ResponseField] {
        BRAND_RESPONSE_FIELDS
    }

    fn from_fields(meta: ResourceMeta, mut fields: FieldMap) -> Result<Self, ResponseMappingFailure> {
        Ok(Self {
            meta,
            store: fields.string("store")?,
            name: fields.string("name")?,
            description: fields.opt_string("description")?,
            logo: fields.opt_string("logo")?,
        })
    }

    fn meta(&self) -> &ResourceMeta {
        &self.meta
    }
}
