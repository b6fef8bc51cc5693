//
//  hydra-sdk
//  api/resources/attribute.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Attribute Resource
//!
//! Attributes describe the custom product fields a store collects. The
//! attribute `type` is a closed enum and travels through the enum
//! transformer in both directions.

use std::fmt;

use once_cell::sync::Lazy;
use serde::Serialize;

use super::{ResourceKind, ResourceMeta};
use crate::mapper::{
    EnumFamily, EnumValue, FieldMap, FieldValue, RequestDto, RequestField, ResponseDto,
    ResponseField, ResponseMappingFailure, TransformerKind, WireEnum,
};

/// Input type of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    /// Single-line text.
    Text,
    /// Multi-line text.
    Textarea,
    /// One value from `options`.
    Select,
    /// Any number of values from `options`.
    Multiselect,
    Boolean,
    Number,
    /// Calendar date, without a time.
    Date,
}

impl AttributeType {
    /// All variants.
    pub const ALL: [AttributeType; 7] = [
        Self::Text,
        Self::Textarea,
        Self::Select,
        Self::Multiselect,
        Self::Boolean,
        Self::Number,
        Self::Date,
    ];

    /// Returns `true` for types whose values come from `options`.
    pub fn has_options(&self) -> bool {
        matches!(self, Self::Select | Self::Multiselect)
    }
}

impl WireEnum for AttributeType {
    const FAMILY: EnumFamily = EnumFamily::AttributeType;

    fn from_wire(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_wire() == value)
    }

    fn as_wire(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Select => "select",
            Self::Multiselect => "multiselect",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::Date => "date",
        }
    }

    fn from_value(value: EnumValue) -> Option<Self> {
        match value {
            EnumValue::AttributeType(t) => Some(t),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// Create/update payload for an attribute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeRequest {
    pub iri: Option<String>,
    pub store: Option<String>,
    pub name: Option<String>,
    /// Machine name, unique per store.
    pub code: Option<String>,
    pub attribute_type: Option<AttributeType>,
    pub required: Option<bool>,
    /// Allowed values for `select` and `multiselect`.
    pub options: Option<Vec<String>>,
}

static ATTRIBUTE_REQUEST_FIELDS: Lazy<Vec<RequestField<AttributeRequest>>> = Lazy::new(|| {
    vec![
        RequestField::skip("iri", |r: &AttributeRequest| FieldValue::from(r.iri.clone())),
        RequestField::unmapped("store", |r: &AttributeRequest| FieldValue::from(r.store.clone())),
        RequestField::new("name", "name", |r: &AttributeRequest| FieldValue::from(r.name.clone())),
        RequestField::new("code", "code", |r: &AttributeRequest| FieldValue::from(r.code.clone())),
        RequestField::new("attribute_type", "type", |r: &AttributeRequest| {
            FieldValue::from(r.attribute_type)
        })
        .with_transformer(TransformerKind::Enum(EnumFamily::AttributeType)),
        RequestField::new("required", "required", |r: &AttributeRequest| {
            FieldValue::from(r.required)
        }),
        RequestField::new("options", "options", |r: &AttributeRequest| {
            FieldValue::from(r.options.clone())
        }),
    ]
});

impl RequestDto for AttributeRequest {
    const TYPE_NAME: &'static str = "AttributeRequest";

    fn fields() -> &'static [RequestField<Self>] {
        ATTRIBUTE_REQUEST_FIELDS.as_slice()
    }

    fn iri(&self) -> Option<&str> {
        self.iri.as_deref()
    }

    fn store(&self) -> Option<&str> {
        self.store.as_deref()
    }
}

/// An attribute as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeResponse {
    #[serde(flatten)]
    meta: ResourceMeta,
    store: String,
    name: String,
    code: String,
    #[serde(rename = "type")]
    attribute_type: AttributeType,
    required: bool,
    options: Vec<String>,
}

const ATTRIBUTE_RESPONSE_FIELDS: &[ResponseField] = &[
    ResponseField::required("store", "store"),
    ResponseField::required("name", "name"),
    ResponseField::required("code", "code"),
    ResponseField::required("attribute_type", "type")
        .with_transformer(TransformerKind::Enum(EnumFamily::AttributeType)),
    ResponseField::required("required", "required"),
    ResponseField::optional("options", "options"),
];

impl AttributeResponse {
    /// IRI of the owning store.
    pub fn store(&self) -> &str {
        &self.store
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unique attribute code within the store.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Input type, which decides how values are entered and validated.
    pub fn attribute_type(&self) -> AttributeType {
        self.attribute_type
    }

    /// Whether every product must carry a value.
    pub fn required(&self) -> bool {
        self.required
    }

    /// Allowed values; empty for types without options.
    pub fn options(&self) -> &[String] {
        &self.options
    }
}

impl ResponseDto for AttributeResponse {
    const KIND: ResourceKind = ResourceKind::Attribute;
    const TYPE_NAME: &'static str = "AttributeResponse";

    fn fields() -> &'static [ResponseField] {
        ATTRIBUTE_RESPONSE_FIELDS
    }

    fn from_fields(meta: ResourceMeta, mut fields: FieldMap) -> Result<Self, ResponseMappingFailure> {
        Ok(Self {
            meta,
            store: fields.string("store")?,
            name: fields.string("name")?,
            code: fields.string("code")?,
            attribute_type: fields.enum_value("attribute_type")?,
            required: fields.bool("required")?,
            options: fields.string_list("options")?,
        })
    }

    fn meta(&self) -> &ResourceMeta {
        &self.meta
    }
}
