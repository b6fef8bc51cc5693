//
//  hydra-sdk
//  mapper/transformer.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Field Transformers
//!
//! A transformer converts one field between its wire representation and its
//! typed value. Transformers are stateless and deterministic; the mapper
//! only calls them for non-null values.
//!
//! | Kind | Wire | Typed |
//! |------|------|-------|
//! | `DateTime` | ISO-8601 string with offset | `DateTime<FixedOffset>` |
//! | `Uuid` | hyphenated string | `Uuid` |
//! | `Enum(family)` | string | [`EnumValue`] of that family |
//! | `Custom` | anything | anything |
//!
//! Field metadata refers to a transformer through a [`TransformerKind`] tag,
//! so no dynamic lookup is involved when a field is mapped.

use std::fmt;

use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde_json::Value;
use uuid::Uuid;

use super::error::{describe, TransformationError};
use super::field::FieldValue;
use crate::api::resources::{AttributeType, IntegrationPlatform, ResourceKind};

/// A bidirectional converter for a single field.
pub trait Transformer: Send + Sync {
    /// Converts a non-null wire value into its typed form.
    fn transform(&self, value: &Value) -> Result<FieldValue, TransformationError>;

    /// Converts a non-null typed value back into its wire form.
    fn reverse_transform(&self, value: &FieldValue) -> Result<Value, TransformationError>;
}

/// Reference to a transformer, as stored in field metadata.
#[derive(Clone, Copy)]
pub enum TransformerKind {
    /// ISO-8601 date-time.
    DateTime,
    /// RFC 4122 UUID.
    Uuid,
    /// A string-backed enum family.
    Enum(EnumFamily),
    /// Any other transformer.
    Custom(&'static dyn Transformer),
}

impl TransformerKind {
    /// Applies the inbound conversion.
    pub fn transform(&self, value: &Value) -> Result<FieldValue, TransformationError> {
        match self {
            Self::DateTime => DateTimeTransformer.transform(value),
            Self::Uuid => UuidTransformer.transform(value),
            Self::Enum(family) => EnumTransformer::new(*family).transform(value),
            Self::Custom(transformer) => transformer.transform(value),
        }
    }

    /// Applies the outbound conversion.
    pub fn reverse_transform(&self, value: &FieldValue) -> Result<Value, TransformationError> {
        match self {
            Self::DateTime => DateTimeTransformer.reverse_transform(value),
            Self::Uuid => UuidTransformer.reverse_transform(value),
            Self::Enum(family) => EnumTransformer::new(*family).reverse_transform(value),
            Self::Custom(transformer) => transformer.reverse_transform(value),
        }
    }
}

impl fmt::Debug for TransformerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DateTime => f.write_str("DateTime"),
            Self::Uuid => f.write_str("Uuid"),
            Self::Enum(family) => f.debug_tuple("Enum").field(family).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// ISO-8601 date-time transformer.
///
/// Accepts RFC 3339 (`2024-01-15T10:30:00+00:00`, `...Z`, fractional
/// seconds) and the compact offset form `2024-01-15T10:30:00+0000`.
/// Always writes RFC 3339 with a numeric offset.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateTimeTransformer;

impl Transformer for DateTimeTransformer {
    fn transform(&self, value: &Value) -> Result<FieldValue, TransformationError> {
        let raw = value
            .as_str()
            .ok_or_else(|| TransformationError::unexpected("date-time string", describe(value)))?;

        DateTime::parse_from_rfc3339(raw)
            .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z"))
            .map(FieldValue::DateTime)
            .map_err(|e| TransformationError::Malformed {
                kind: "date-time",
                value: raw.to_string(),
                reason: e.to_string(),
            })
    }

    fn reverse_transform(&self, value: &FieldValue) -> Result<Value, TransformationError> {
        match value {
            FieldValue::DateTime(at) => Ok(Value::String(format_datetime(at))),
            other => Err(TransformationError::unexpected("date-time", other.type_name())),
        }
    }
}

pub(crate) fn format_datetime(at: &DateTime<FixedOffset>) -> String {
    at.to_rfc3339_opts(SecondsFormat::AutoSi, false)
}

/// UUID transformer.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidTransformer;

impl Transformer for UuidTransformer {
    fn transform(&self, value: &Value) -> Result<FieldValue, TransformationError> {
        let raw = value
            .as_str()
            .ok_or_else(|| TransformationError::unexpected("uuid string", describe(value)))?;

        Uuid::parse_str(raw)
            .map(FieldValue::Uuid)
            .map_err(|e| TransformationError::Malformed {
                kind: "uuid",
                value: raw.to_string(),
                reason: e.to_string(),
            })
    }

    fn reverse_transform(&self, value: &FieldValue) -> Result<Value, TransformationError> {
        match value {
            FieldValue::Uuid(id) => Ok(Value::String(id.hyphenated().to_string())),
            other => Err(TransformationError::unexpected("uuid", other.type_name())),
        }
    }
}

/// Transformer for one string-backed enum family.
#[derive(Debug, Clone, Copy)]
pub struct EnumTransformer {
    family: EnumFamily,
}

impl EnumTransformer {
    /// Creates a transformer for `family`.
    pub const fn new(family: EnumFamily) -> Self {
        Self { family }
    }
}

impl Transformer for EnumTransformer {
    fn transform(&self, value: &Value) -> Result<FieldValue, TransformationError> {
        let raw = value
            .as_str()
            .ok_or_else(|| TransformationError::unexpected("enum string", describe(value)))?;

        self.family
            .parse(raw)
            .map(FieldValue::Enum)
            .ok_or_else(|| TransformationError::UnknownVariant {
                family: self.family.name(),
                value: raw.to_string(),
            })
    }

    fn reverse_transform(&self, value: &FieldValue) -> Result<Value, TransformationError> {
        match value {
            FieldValue::Enum(variant) if variant.family() == self.family => {
                Ok(Value::String(variant.as_wire().to_string()))
            }
            other => Err(TransformationError::unexpected(self.family.name(), other.type_name())),
        }
    }
}

/// A closed enum that is carried on the wire as a string.
pub trait WireEnum: Copy + Sized {
    /// The family this enum belongs to.
    const FAMILY: EnumFamily;

    /// Parses the wire string.
    fn from_wire(value: &str) -> Option<Self>;

    /// The wire string for this variant.
    fn as_wire(&self) -> &'static str;

    /// Extracts this enum from a family-tagged value.
    fn from_value(value: EnumValue) -> Option<Self>;
}

/// The enum families known to the mapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumFamily {
    /// The `@type` discriminator.
    ResourceKind,
    /// Attribute input types.
    AttributeType,
    /// Integration platforms.
    IntegrationPlatform,
}

impl EnumFamily {
    /// Human readable name, used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ResourceKind => "resource type",
            Self::AttributeType => "attribute type",
            Self::IntegrationPlatform => "integration platform",
        }
    }

    /// Parses a wire string into a value of this family.
    pub fn parse(&self, raw: &str) -> Option<EnumValue> {
        match self {
            Self::ResourceKind => ResourceKind::from_wire(raw).map(EnumValue::ResourceKind),
            Self::AttributeType => AttributeType::from_wire(raw).map(EnumValue::AttributeType),
            Self::IntegrationPlatform => {
                IntegrationPlatform::from_wire(raw).map(EnumValue::IntegrationPlatform)
            }
        }
    }
}

/// A typed enum value tagged with its family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumValue {
    /// See [`ResourceKind`].
    ResourceKind(ResourceKind),
    /// See [`AttributeType`].
    AttributeType(AttributeType),
    /// See [`IntegrationPlatform`].
    IntegrationPlatform(IntegrationPlatform),
}

impl EnumValue {
    /// The family of this value.
    pub fn family(&self) -> EnumFamily {
        match self {
            Self::ResourceKind(_) => EnumFamily::ResourceKind,
            Self::AttributeType(_) => EnumFamily::AttributeType,
            Self::IntegrationPlatform(_) => EnumFamily::IntegrationPlatform,
        }
    }

    /// The wire string of the wrapped variant.
    pub fn as_wire(&self) -> &'static str {
        match self {
            Self::ResourceKind(v) => v.as_wire(),
            Self::AttributeType(v) => v.as_wire(),
            Self::IntegrationPlatform(v) => v.as_wire(),
        }
    }
}

impl From<ResourceKind> for EnumValue {
    fn from(value: ResourceKind) -> Self {
        Self::ResourceKind(value)
    }
}

impl From<AttributeType> for EnumValue {
    fn from(value: AttributeType) -> Self {
        Self::AttributeType(value)
    }
}

impl From<IntegrationPlatform> for EnumValue {
    fn from(value: IntegrationPlatform) -> Self {
        Self::IntegrationPlatform(value)
    }
}
