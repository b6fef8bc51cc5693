//
//  hydra-sdk
//  mapper/error.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Mapping error types.
//!
//! A [`TransformationError`] is always local to a single field. The mapper
//! never surfaces it on its own: it is wrapped into a
//! [`RequestMappingError`] or a [`ResponseMappingError`] that names the DTO
//! type being processed.

use serde_json::Value;
use thiserror::Error;

/// A single field value could not be converted in either direction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransformationError {
    /// The value has the wrong shape for the transformer.
    #[error("expected {expected}, found {found}")]
    UnexpectedType {
        /// What the transformer accepts.
        expected: &'static str,
        /// What it was given.
        found: String,
    },

    /// The value has the right shape but cannot be parsed.
    #[error("invalid {kind} {value:?}: {reason}")]
    Malformed {
        /// The value kind, e.g. `date-time`.
        kind: &'static str,
        /// The offending input.
        value: String,
        /// Parser message.
        reason: String,
    },

    /// The value is not a member of the enum family.
    #[error("unknown {family} {value:?}")]
    UnknownVariant {
        /// Human readable family name.
        family: &'static str,
        /// The offending input.
        value: String,
    },
}

impl TransformationError {
    pub(crate) fn unexpected(expected: &'static str, found: impl Into<String>) -> Self {
        Self::UnexpectedType {
            expected,
            found: found.into(),
        }
    }
}

/// A request DTO could not be serialized to a wire payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to map {dto_type}.{field} to request data: {source}")]
pub struct RequestMappingError {
    dto_type: &'static str,
    field: &'static str,
    #[source]
    source: TransformationError,
}

impl RequestMappingError {
    pub(crate) fn new(dto_type: &'static str, field: &'static str, source: TransformationError) -> Self {
        Self {
            dto_type,
            field,
            source,
        }
    }

    /// Name of the request DTO type.
    pub fn dto_type(&self) -> &'static str {
        self.dto_type
    }

    /// Name of the struct field that failed.
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// The underlying transformer failure.
    pub fn transformation(&self) -> &TransformationError {
        &self.source
    }
}

/// Why a response could not be mapped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResponseMappingFailure {
    /// The wire value is not a JSON object.
    #[error("expected a JSON object")]
    NotAnObject,

    /// The object carries no usable `@type`.
    #[error("missing discriminator `{0}`")]
    MissingDiscriminator(&'static str),

    /// No response type is registered for the `@type` value.
    #[error("unknown discriminator {0:?}")]
    UnknownDiscriminator(String),

    /// The `@type` names a different resource than the one requested.
    #[error("discriminator {found:?} does not match expected {expected:?}")]
    DiscriminatorMismatch {
        /// Discriminator of the requested type.
        expected: String,
        /// Discriminator found on the wire.
        found: String,
    },

    /// A required key is absent.
    #[error("missing required field `{0}`")]
    MissingField(String),

    /// A key is present with a value of the wrong shape.
    #[error("field `{field}` expected {expected}, found {found}")]
    InvalidField {
        /// Struct field name.
        field: String,
        /// Expected shape.
        expected: &'static str,
        /// Actual shape.
        found: String,
    },

    /// The inbound transformer rejected the value.
    #[error("field `{field}`: {source}")]
    Transformation {
        /// Struct field name.
        field: String,
        /// Transformer failure.
        #[source]
        source: TransformationError,
    },

    /// The envelope is not a Hydra collection.
    #[error("expected a collection, found `@type` {0:?}")]
    NotACollection(String),

    /// The `@context` does not name a known resource type.
    #[error("cannot resolve member type from context {0:?}")]
    UnknownContext(String),
}

/// A wire payload could not be mapped to a response DTO.
///
/// Carries the target type name and the raw input for diagnostics.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("failed to map response to {target_type}: {failure}")]
pub struct ResponseMappingError {
    target_type: String,
    raw: Value,
    #[source]
    failure: ResponseMappingFailure,
}

impl ResponseMappingError {
    pub(crate) fn new(target_type: impl Into<String>, raw: Value, failure: ResponseMappingFailure) -> Self {
        Self {
            target_type: target_type.into(),
            raw,
            failure,
        }
    }

    /// Name of the type the mapper tried to build.
    pub fn target_type(&self) -> &str {
        &self.target_type
    }

    /// The wire value that failed to map.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// The root cause.
    pub fn failure(&self) -> &ResponseMappingFailure {
        &self.failure
    }
}

/// Describes the shape of a JSON value for error messages.
pub(crate) fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
