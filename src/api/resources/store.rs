//
//  hydra-sdk
//  api/resources/store.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Store resource.

use once_cell::sync::Lazy;
use serde::Serialize;

use super::{ResourceKind, ResourceMeta};
use crate::mapper::{
    FieldMap, FieldValue, RequestDto, RequestField, ResponseDto, ResponseField,
    ResponseMappingFailure,
};

/// Create/update payload for a store.
///
/// # Example
///
/// ```rust
/// use hydra_sdk::api::resources::StoreRequest;
/// use hydra_sdk::mapper::RequestDto;
///
/// let request = StoreRequest {
///     name: Some("Main".to_string()),
///     code: Some("main".to_string()),
///     ..Default::default()
/// };
/// let wire = request.to_wire().unwrap();
/// assert_eq!(wire["code"], "main");
/// assert!(wire["currency"].is_null());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreRequest {
    /// IRI of an existing store; never serialized.
    pub iri: Option<String>,
    pub name: Option<String>,
    pub code: Option<String>,
    /// BCP 47 locale, e.g. `en_GB`.
    pub default_locale: Option<String>,
    /// ISO 4217 currency code.
    pub currency: Option<String>,
}

static STORE_REQUEST_FIELDS: Lazy<Vec<RequestField<StoreRequest>>> = Lazy::new(|| {
    vec![
        RequestField::skip("iri", |r: &StoreRequest| FieldValue::from(r.iri.clone())),
        RequestField::new("name", "name", |r: &StoreRequest| FieldValue::from(r.name.clone())),
        RequestField::new("code", "code", |r: &StoreRequest| FieldValue::from(r.code.clone())),
        RequestField::new("default_locale", "defaultLocale", |r: &StoreRequest| {
            FieldValue::from(r.default_locale.clone())
        }),
        RequestField::new("currency", "currency", |r: &StoreRequest| {
            FieldValue::from(r.currency.clone())
        }),
    ]
});

impl RequestDto for StoreRequest {
    const TYPE_NAME: &'static str = "StoreRequest";

    fn fields() -> &'static [RequestField<Self>] {
        STORE_REQUEST_FIELDS.as_slice()
    }

    fn iri(&self) -> Option<&str> {
        self.iri.as_deref()
    }
}

/// A store as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreResponse {
    #[serde(flatten)]
    meta: ResourceMeta,
    name: String,
    code: String,
    default_locale: Option<String>,
    currency: Option<String>,
}

const STORE_RESPONSE_FIELDS: &[ResponseField] = &[
    ResponseField::required("name", "name"),
    ResponseField::required("code", "code"),
    ResponseField::optional("default_locale", "defaultLocale"),
    ResponseField::optional("currency", "currency"),
];

impl StoreResponse {
    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unique store code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Locale used when a request does not name one, e.g. `en_GB`.
    pub fn default_locale(&self) -> Option<&str> {
        self.default_locale.as_deref()
    }

    /// ISO 4217 currency code, e.g. `GBP`.
    pub fn currency(&self) -> Option<&str> {
        self.currency.as_deref()
    }
}

impl ResponseDto for StoreResponse {
    const KIND: ResourceKind = ResourceKind::Store;
    const TYPE_NAME: &'static str = "StoreResponse";

    fn fields() -> &'static [ResponseField] {
        STORE_RESPONSE_FIELDS
    }

    fn from_fields(meta: ResourceMeta, mut fields: FieldMap) -> Result<Self, ResponseMappingFailure> {
        Ok(Self {
            meta,
            name: fields.string("name")?,
            code: fields.string("code")?,
            default_locale: fields.opt_string("default_locale")?,
            currency: fields.opt_string("currency")?,
        })
    }

    fn meta(&self) -> &ResourceMeta {
        &self.meta
    }
}
