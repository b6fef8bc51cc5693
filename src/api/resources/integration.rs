//
//  hydra-sdk
//  api/resources/integration.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Integration resource: a store's connection to an external commerce
//! platform.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use once_cell::sync::Lazy;
use serde::Serialize;

use super::{serialize_opt_datetime, ResourceKind, ResourceMeta};
use crate::mapper::{
    EnumFamily, EnumValue, FieldMap, FieldValue, RequestDto, RequestField, ResponseDto,
    ResponseField, ResponseMappingFailure, TransformerKind, WireEnum,
};

/// External platform an integration talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationPlatform {
    /// Shopify, wire value `shopify`.
    Shopify,
    /// WooCommerce, wire value `woocommerce`.
    WooCommerce,
    /// Magento, wire value `magento`.
    Magento,
    /// BigCommerce, wire value `bigcommerce`.
    BigCommerce,
    /// A bespoke connector.
    Custom,
}

impl IntegrationPlatform {
    pub const ALL: [IntegrationPlatform; 5] = [
        Self::Shopify,
        Self::WooCommerce,
        Self::Magento,
        Self::BigCommerce,
        Self::Custom,
    ];
}

impl WireEnum for IntegrationPlatform {
    const FAMILY: EnumFamily = EnumFamily::IntegrationPlatform;

    fn from_wire(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_wire() == value)
    }

    fn as_wire(&self) -> &'static str {
        match self {
            Self::Shopify => "shopify",
            Self::WooCommerce => "woocommerce",
            Self::Magento => "magento",
            Self::BigCommerce => "bigcommerce",
            Self::Custom => "custom",
        }
    }

    fn from_value(value: EnumValue) -> Option<Self> {
        match value {
            EnumValue::IntegrationPlatform(p) => Some(p),
            _ => None,
        }
    }
}

impl fmt::Display for IntegrationPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// Create/update payload for an integration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntegrationRequest {
    pub iri: Option<String>,
    pub store: Option<String>,
    pub name: Option<String>,
    pub platform: Option<IntegrationPlatform>,
    pub enabled: Option<bool>,
    pub last_synced_at: Option<DateTime<FixedOffset>>,
}

static INTEGRATION_REQUEST_FIELDS: Lazy<Vec<RequestField<IntegrationRequest>>> = Lazy::new(|| {
    vec![
        RequestField::skip("iri", |r: &IntegrationRequest| FieldValue::from(r.iri.clone())),
        RequestField::unmapped("store", |r: &IntegrationRequest| {
            FieldValue::from(r.store.clone())
        }),
        RequestField::new("name", "name", |r: &IntegrationRequest| {
            FieldValue::from(r.name.clone())
        }),
        RequestField::new("platform", "platform", |r: &IntegrationRequest| {
            FieldValue::from(r.platform)
        })
        .with_transformer(TransformerKind::Enum(EnumFamily::IntegrationPlatform)),
        RequestField::new("enabled", "enabled", |r: &IntegrationRequest| {
            FieldValue::from(r.enabled)
        }),
        RequestField::new("last_synced_at", "lastSyncedAt", |r: &IntegrationRequest| {
            FieldValue::from(r.last_synced_at)
        })
        .with_transformer(TransformerKind::DateTime),
    ]
});

impl RequestDto for IntegrationRequest {
    const TYPE_NAME: &'static str = "IntegrationRequest";

    fn fields() -> &'static [RequestField<Self>] {
        INTEGRATION_REQUEST_FIELDS.as_slice()
    }

    fn iri(&self) -> Option<&str> {
        self.iri.as_deref()
    }

    fn store(&self) -> Option<&str> {
        self.store.as_deref()
    }
}

/// An integration as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationResponse {
    #[serde(flatten)]
    meta: ResourceMeta,
    store: String,
    name: String,
    platform: IntegrationPlatform,
    enabled: bool,
    #[serde(serialize_with = "serialize_opt_datetime")]
    last_synced_at: Option<DateTime<FixedOffset>>,
}

const INTEGRATION_RESPONSE_FIELDS: &[ResponseField] = &[
    ResponseField::required("store", "store"),
    ResponseField::required("name", "name"),
    ResponseField::required("platform", "platform")
        .with_transformer(TransformerKind::Enum(EnumFamily::IntegrationPlatform)),
    ResponseField::required("enabled", "enabled"),
    ResponseField::optional("last_synced_at", "lastSyncedAt")
        .with_transformer(TransformerKind::DateTime),
];

impl IntegrationResponse {
    /// IRI of the owning store.
    pub fn store(&self) -> &str {
        &self.store
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Platform the integration synchronises with.
    pub fn platform(&self) -> IntegrationPlatform {
        self.platform
    }

    /// Whether synchronisation is switched on.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// `None` until the first synchronisation has run.
    pub fn last_synced_at(&self) -> Option<DateTime<FixedOffset>> {
        self.last_synced_at
    }
}

impl ResponseDto for IntegrationResponse {
    const KIND: ResourceKind = ResourceKind::Integration;
    const TYPE_NAME: &'static str = "IntegrationResponse";

    fn fields() -> &'static [ResponseField] {
        INTEGRATION_RESPONSE_FIELDS
    }

    fn from_fields(meta: ResourceMeta, mut fields: FieldMap) -> Result<Self, ResponseMappingFailure> {
        Ok(Self {
            meta,
            store: fields.string("store")?,
            name: fields.string("name")?,
            platform: fields.enum_value("platform")?,
            enabled: fields.bool("enabled")?,
            last_synced_at: fields.opt_datetime("last_synced_at")?,
        })
    }

    fn meta(&self) -> &ResourceMeta {
        &self.meta
    }
}
