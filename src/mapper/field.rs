//
//  hydra-sdk
//  mapper/field.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Field Metadata
//!
//! Static per-field tables that drive the [`DataMapper`](super::DataMapper).
//!
//! Request types declare an ordered list of [`RequestField`]s, each with an
//! accessor that reads the current value out of the DTO. Response types
//! declare an ordered list of [`ResponseField`]s; the mapper collects the
//! decoded values into a [`FieldMap`] keyed by struct field name, and the
//! response type builds itself from that map.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset};
use serde_json::Value;
use uuid::Uuid;

use super::error::{describe, ResponseMappingFailure};
use super::transformer::{format_datetime, EnumValue, TransformerKind, WireEnum};
use crate::api::resources::{AttributeType, IntegrationPlatform, ResourceKind};

/// A typed field value, as produced by transformers and accessors.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Absent or null.
    Null,
    /// A plain JSON value, used as-is on the wire.
    Json(Value),
    /// A date-time with its original offset.
    DateTime(DateTime<FixedOffset>),
    /// A UUID.
    Uuid(Uuid),
    /// A member of an enum family.
    Enum(EnumValue),
}

impl FieldValue {
    /// Returns `true` for [`FieldValue::Null`] and a JSON `null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null | Self::Json(Value::Null))
    }

    /// Short name of the value shape, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Json(value) => describe(value),
            Self::DateTime(_) => "date-time",
            Self::Uuid(_) => "uuid",
            Self::Enum(_) => "enum",
        }
    }

    /// Converts the value to JSON without any transformer.
    ///
    /// Typed values fall back to their canonical string form.
    pub fn into_json(self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Json(value) => value,
            Self::DateTime(at) => Value::String(format_datetime(&at)),
            Self::Uuid(id) => Value::String(id.hyphenated().to_string()),
            Self::Enum(variant) => Value::String(variant.as_wire().to_string()),
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Json(Value::String(value))
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Json(Value::String(value.to_string()))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Json(Value::Bool(value))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Json(Value::from(value))
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        Self::Json(Value::from(value))
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        Self::Json(Value::from(value))
    }
}

impl From<DateTime<FixedOffset>> for FieldValue {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Self::DateTime(value)
    }
}

impl From<Uuid> for FieldValue {
    fn from(value: Uuid) -> Self {
        Self::Uuid(value)
    }
}

impl From<EnumValue> for FieldValue {
    fn from(value: EnumValue) -> Self {
        Self::Enum(value)
    }
}

impl From<ResourceKind> for FieldValue {
    fn from(value: ResourceKind) -> Self {
        Self::Enum(value.into())
    }
}

impl From<AttributeType> for FieldValue {
    fn from(value: AttributeType) -> Self {
        Self::Enum(value.into())
    }
}

impl From<IntegrationPlatform> for FieldValue {
    fn from(value: IntegrationPlatform) -> Self {
        Self::Enum(value.into())
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Outbound metadata for one field of a request type.
pub struct RequestField<T> {
    /// Struct field name.
    pub name: &'static str,
    /// Wire key; `None` means the field has no outbound metadata.
    pub wire_name: Option<&'static str>,
    /// Transformer applied to non-null values.
    pub transformer: Option<TransformerKind>,
    /// Never serialized when set.
    pub skip: bool,
    /// Reads the current value.
    pub value: fn(&T) -> FieldValue,
}

impl<T> RequestField<T> {
    /// A field serialized under `wire_name` as-is.
    pub fn new(name: &'static str, wire_name: &'static str, value: fn(&T) -> FieldValue) -> Self {
        Self {
            name,
            wire_name: Some(wire_name),
            transformer: None,
            skip: false,
            value,
        }
    }

    /// A field that is never serialized, e.g. the resource's own IRI.
    pub fn skip(name: &'static str, value: fn(&T) -> FieldValue) -> Self {
        Self {
            name,
            wire_name: None,
            transformer: None,
            skip: true,
            value,
        }
    }

    /// A field without outbound metadata.
    pub fn unmapped(name: &'static str, value: fn(&T) -> FieldValue) -> Self {
        Self {
            name,
            wire_name: None,
            transformer: None,
            skip: false,
            value,
        }
    }

    /// Attaches an outbound transformer.
    pub fn with_transformer(mut self, transformer: TransformerKind) -> Self {
        self.transformer = Some(transformer);
        self
    }
}

/// Inbound metadata for one field of a response type.
#[derive(Debug, Clone, Copy)]
pub struct ResponseField {
    /// Struct field name, the key in the resulting [`FieldMap`].
    pub name: &'static str,
    /// Wire key.
    pub wire_name: &'static str,
    /// Transformer applied to non-null values.
    pub transformer: Option<TransformerKind>,
    /// Absent keys map to null instead of failing.
    pub optional: bool,
}

impl ResponseField {
    /// A field whose key must be present.
    pub const fn required(name: &'static str, wire_name: &'static str) -> Self {
        Self {
            name,
            wire_name,
            transformer: None,
            optional: false,
        }
    }

    /// A field whose key may be absent.
    pub const fn optional(name: &'static str, wire_name: &'static str) -> Self {
        Self {
            name,
            wire_name,
            transformer: None,
            optional: true,
        }
    }

    /// Attaches an inbound transformer.
    pub const fn with_transformer(self, transformer: TransformerKind) -> Self {
        Self {
            transformer: Some(transformer),
            ..self
        }
    }
}

/// Decoded field values of one response object, keyed by struct field name.
///
/// Response types take their values out of the map with the typed
/// accessors below. Each accessor checks the value shape and reports a
/// [`ResponseMappingFailure`] naming the field.
#[derive(Debug, Default)]
pub struct FieldMap {
    values: HashMap<&'static str, FieldValue>,
}

impl FieldMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a decoded value.
    pub fn insert(&mut self, name: &'static str, value: FieldValue) {
        self.values.insert(name, value);
    }

    /// Removes and returns a raw value, [`FieldValue::Null`] when absent.
    pub fn take(&mut self, name: &str) -> FieldValue {
        self.values.remove(name).unwrap_or(FieldValue::Null)
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when no values are stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Takes a required string.
    pub fn string(&mut self, name: &str) -> Result<String, ResponseMappingFailure> {
        self.opt_string(name)?.ok_or_else(|| invalid(name, "string", "null"))
    }

    /// Takes a nullable string.
    pub fn opt_string(&mut self, name: &str) -> Result<Option<String>, ResponseMappingFailure> {
        match self.take(name) {
            v if v.is_null() => Ok(None),
            FieldValue::Json(Value::String(s)) => Ok(Some(s)),
            other => Err(invalid(name, "string", other.type_name())),
        }
    }

    /// Takes a required boolean.
    pub fn bool(&mut self, name: &str) -> Result<bool, ResponseMappingFailure> {
        self.opt_bool(name)?.ok_or_else(|| invalid(name, "boolean", "null"))
    }

    /// Takes a nullable boolean.
    pub fn opt_bool(&mut self, name: &str) -> Result<Option<bool>, ResponseMappingFailure> {
        match self.take(name) {
            v if v.is_null() => Ok(None),
            FieldValue::Json(Value::Bool(b)) => Ok(Some(b)),
            other => Err(invalid(name, "boolean", other.type_name())),
        }
    }

    /// Takes a required non-negative integer.
    pub fn u64(&mut self, name: &str) -> Result<u64, ResponseMappingFailure> {
        match self.take(name) {
            FieldValue::Json(Value::Number(n)) => n
                .as_u64()
                .ok_or_else(|| invalid(name, "non-negative integer", "number")),
            other => Err(invalid(name, "non-negative integer", other.type_name())),
        }
    }

    /// Takes a list of strings; null maps to an empty list.
    pub fn string_list(&mut self, name: &str) -> Result<Vec<String>, ResponseMappingFailure> {
        match self.take(name) {
            v if v.is_null() => Ok(Vec::new()),
            FieldValue::Json(Value::Array(items)) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s),
                    other => Err(invalid(name, "array of strings", describe(&other))),
                })
                .collect(),
            other => Err(invalid(name, "array of strings", other.type_name())),
        }
    }

    /// Takes a required date-time.
    pub fn datetime(&mut self, name: &str) -> Result<DateTime<FixedOffset>, ResponseMappingFailure> {
        self.opt_datetime(name)?.ok_or_else(|| invalid(name, "date-time", "null"))
    }

    /// Takes a nullable date-time.
    pub fn opt_datetime(
        &mut self,
        name: &str,
    ) -> Result<Option<DateTime<FixedOffset>>, ResponseMappingFailure> {
        match self.take(name) {
            v if v.is_null() => Ok(None),
            FieldValue::DateTime(at) => Ok(Some(at)),
            other => Err(invalid(name, "date-time", other.type_name())),
        }
    }

    /// Takes a required UUID.
    pub fn uuid(&mut self, name: &str) -> Result<Uuid, ResponseMappingFailure> {
        match self.take(name) {
            FieldValue::Uuid(id) => Ok(id),
            other => Err(invalid(name, "uuid", other.type_name())),
        }
    }

    /// Takes a required enum of family `E`.
    pub fn enum_value<E: WireEnum>(&mut self, name: &str) -> Result<E, ResponseMappingFailure> {
        self.opt_enum(name)?
            .ok_or_else(|| invalid(name, E::FAMILY.name(), "null"))
    }

    /// Takes a nullable enum of family `E`.
    pub fn opt_enum<E: WireEnum>(&mut self, name: &str) -> Result<Option<E>, ResponseMappingFailure> {
        match self.take(name) {
            v if v.is_null() => Ok(None),
            FieldValue::Enum(variant) => E::from_value(variant)
                .map(Some)
                .ok_or_else(|| invalid(name, E::FAMILY.name(), variant.family().name())),
            other => Err(invalid(name, E::FAMILY.name(), other.type_name())),
        }
    }
}

fn invalid(field: &str, expected: &'static str, found: &str) -> ResponseMappingFailure {
    ResponseMappingFailure::InvalidField {
        field: field.to_string(),
        expected,
        found: found.to_string(),
    }
}
