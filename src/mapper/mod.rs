//
//  hydra-sdk
//  mapper/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Data Mapper
//!
//! Bidirectional translation between wire JSON and typed DTOs, driven
//! entirely by the static field tables each DTO declares.
//!
//! | Operation | Input | Output |
//! |-----------|-------|--------|
//! | [`DataMapper::to_request_data`] | any [`RequestDto`] | flat wire map |
//! | [`DataMapper::from_response`] | single resource object | [`Resource`] chosen by `@type` |
//! | [`DataMapper::from_response_as`] | single resource object | a specific [`ResponseDto`] |
//! | [`DataMapper::from_collection_response`] | Hydra collection | [`CollectionResponse<Resource>`] |
//! | [`DataMapper::from_collection_response_as`] | Hydra collection | [`CollectionResponse<T>`] |
//!
//! Transformers run only on non-null values. Nulls pass through untouched
//! in both directions.
//!
//! # Example
//!
//! ```rust
//! use hydra_sdk::api::resources::CategoryRequest;
//! use hydra_sdk::mapper::DataMapper;
//! use serde_json::json;
//!
//! let request = CategoryRequest {
//!     name: Some("Electronics".to_string()),
//!     store: Some("/stores/1".to_string()),
//!     ..Default::default()
//! };
//!
//! let wire = DataMapper::new().to_request_data(&request).unwrap();
//! assert_eq!(
//!     serde_json::Value::Object(wire),
//!     json!({"name": "Electronics", "description": null, "parent": null, "image": null})
//! );
//! ```

mod error;
mod field;
mod transformer;

pub use error::{RequestMappingError, ResponseMappingError, ResponseMappingFailure, TransformationError};
pub use field::{FieldMap, FieldValue, RequestField, ResponseField};
pub use transformer::{
    DateTimeTransformer, EnumFamily, EnumTransformer, EnumValue, Transformer, TransformerKind,
    UuidTransformer, WireEnum,
};

pub(crate) use transformer::format_datetime;

use serde_json::{Map, Value};

use crate::api::common::CollectionResponse;
use crate::api::resources::{Resource, ResourceKind, ResourceMeta};
use crate::util::last_segment;

/// Wire key of the type discriminator.
pub const DISCRIMINATOR: &str = "@type";

/// Accepted `@type` values of a collection envelope.
pub const COLLECTION_TYPES: &[&str] = &["Collection", "hydra:Collection"];

/// Envelope fields shared by every response type.
pub const ENVELOPE_FIELDS: &[ResponseField] = &[
    ResponseField::required("iri", "@id"),
    ResponseField::required("kind", DISCRIMINATOR)
        .with_transformer(TransformerKind::Enum(EnumFamily::ResourceKind)),
    ResponseField::required("uuid", "uuid").with_transformer(TransformerKind::Uuid),
    ResponseField::required("created_at", "createdAt").with_transformer(TransformerKind::DateTime),
    ResponseField::required("updated_at", "updatedAt").with_transformer(TransformerKind::DateTime),
];

/// A caller-built request type with an outbound field table.
pub trait RequestDto: Sized + 'static {
    /// Type name used in diagnostics.
    const TYPE_NAME: &'static str;

    /// Outbound field table, in declaration order.
    fn fields() -> &'static [RequestField<Self>];

    /// The resource's own IRI; `None` for a create.
    fn iri(&self) -> Option<&str>;

    /// The owning store IRI, for store-scoped resources.
    fn store(&self) -> Option<&str> {
        None
    }

    /// Serializes this request to a flat wire map.
    fn to_wire(&self) -> Result<Map<String, Value>, RequestMappingError> {
        DataMapper::new().to_request_data(self)
    }
}

/// A mapper-built response type with an inbound field table.
///
/// The envelope (`@id`, `@type`, `uuid`, timestamps) is decoded by the
/// mapper into a [`ResourceMeta`]; `fields()` lists only the
/// resource-specific fields.
pub trait ResponseDto: Sized {
    /// The `@type` value this type is registered under.
    const KIND: ResourceKind;

    /// Type name used in diagnostics.
    const TYPE_NAME: &'static str;

    /// Inbound field table, in declaration order.
    fn fields() -> &'static [ResponseField];

    /// Builds the response from its decoded envelope and fields.
    fn from_fields(meta: ResourceMeta, fields: FieldMap) -> Result<Self, ResponseMappingFailure>;

    /// The decoded envelope.
    fn meta(&self) -> &ResourceMeta;
}

/// The mapping engine. Stateless; all behaviour comes from field tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataMapper;

impl DataMapper {
    /// Creates a mapper.
    pub fn new() -> Self {
        Self
    }

    /// Serializes a request DTO to a flat wire map.
    ///
    /// Fields marked skip and fields without outbound metadata are left
    /// out. Every other field appears exactly once, null values included.
    ///
    /// # Errors
    ///
    /// Returns a [`RequestMappingError`] naming the DTO type and field when
    /// a transformer rejects a value.
    pub fn to_request_data<T: RequestDto>(
        &self,
        request: &T,
    ) -> Result<Map<String, Value>, RequestMappingError> {
        let mut data = Map::new();

        for field in T::fields() {
            if field.skip {
                continue;
            }
            let Some(wire_name) = field.wire_name else {
                continue;
            };

            let value = (field.value)(request);
            let wire_value = match field.transformer {
                Some(transformer) if !value.is_null() => transformer
                    .reverse_transform(&value)
                    .map_err(|e| RequestMappingError::new(T::TYPE_NAME, field.name, e))?,
                _ => value.into_json(),
            };

            data.insert(wire_name.to_string(), wire_value);
        }

        Ok(data)
    }

    /// Maps a single resource object to the response type named by its
    /// `@type`.
    ///
    /// # Errors
    ///
    /// Returns a [`ResponseMappingError`] for a missing or unknown
    /// discriminator, a missing required key, or a transformer failure.
    pub fn from_response(&self, wire: &Value) -> Result<Resource, ResponseMappingError> {
        let fail = |failure| ResponseMappingError::new("Resource", wire.clone(), failure);

        let object = wire
            .as_object()
            .ok_or_else(|| fail(ResponseMappingFailure::NotAnObject))?;
        let found = discriminator(object).map_err(fail)?;
        let kind = ResourceKind::from_discriminator(found)
            .ok_or_else(|| fail(ResponseMappingFailure::UnknownDiscriminator(found.to_string())))?;

        kind.decode(self, wire)
    }

    /// Maps a single resource object to `T`.
    ///
    /// # Errors
    ///
    /// In addition to the [`from_response`](Self::from_response) failures,
    /// a `@type` naming a different resource is a
    /// [`ResponseMappingFailure::DiscriminatorMismatch`].
    pub fn from_response_as<T: ResponseDto>(&self, wire: &Value) -> Result<T, ResponseMappingError> {
        let fail = |failure| ResponseMappingError::new(T::TYPE_NAME, wire.clone(), failure);

        let object = wire
            .as_object()
            .ok_or_else(|| fail(ResponseMappingFailure::NotAnObject))?;
        let found = discriminator(object).map_err(fail)?;
        if found != T::KIND.discriminator() {
            return Err(fail(ResponseMappingFailure::DiscriminatorMismatch {
                expected: T::KIND.discriminator().to_string(),
                found: found.to_string(),
            }));
        }

        let mut fields = FieldMap::new();
        for field in ENVELOPE_FIELDS.iter().chain(T::fields()) {
            let value = read_field(object, field).map_err(fail)?;
            fields.insert(field.name, value);
        }

        let meta = ResourceMeta::from_fields(&mut fields).map_err(fail)?;
        T::from_fields(meta, fields).map_err(fail)
    }

    /// Maps a Hydra collection whose member type is named by `@context`.
    ///
    /// # Errors
    ///
    /// Returns a [`ResponseMappingError`] when the envelope is not a
    /// collection, the context cannot be resolved, or any member fails to
    /// map (the first member failure is returned as-is).
    pub fn from_collection_response(
        &self,
        wire: &Value,
    ) -> Result<CollectionResponse<Resource>, ResponseMappingError> {
        let fail = |failure| {
            ResponseMappingError::new("CollectionResponse<Resource>", wire.clone(), failure)
        };

        let object = wire
            .as_object()
            .ok_or_else(|| fail(ResponseMappingFailure::NotAnObject))?;
        let context = collection_context(object).map_err(fail)?;
        let kind = last_segment(context)
            .as_deref()
            .and_then(ResourceKind::from_discriminator)
            .ok_or_else(|| fail(ResponseMappingFailure::UnknownContext(context.to_string())))?;

        collect(object, fail, |member| {
            let resource = self.from_response(member)?;
            if resource.kind() != kind {
                return Err(ResponseMappingError::new(
                    kind.discriminator(),
                    member.clone(),
                    ResponseMappingFailure::DiscriminatorMismatch {
                        expected: kind.discriminator().to_string(),
                        found: resource.kind().discriminator().to_string(),
                    },
                ));
            }
            Ok(resource)
        })
    }

    /// Maps a Hydra collection of `T`.
    ///
    /// # Errors
    ///
    /// As [`from_collection_response`](Self::from_collection_response); a
    /// `@context` naming another resource is a
    /// [`ResponseMappingFailure::DiscriminatorMismatch`].
    pub fn from_collection_response_as<T: ResponseDto>(
        &self,
        wire: &Value,
    ) -> Result<CollectionResponse<T>, ResponseMappingError> {
        let target = format!("CollectionResponse<{}>", T::TYPE_NAME);
        let fail = |failure| ResponseMappingError::new(target.clone(), wire.clone(), failure);

        let object = wire
            .as_object()
            .ok_or_else(|| fail(ResponseMappingFailure::NotAnObject))?;
        let context = collection_context(object).map_err(fail)?;
        let member_type = last_segment(context).unwrap_or_default();
        if member_type != T::KIND.discriminator() {
            return Err(fail(ResponseMappingFailure::DiscriminatorMismatch {
                expected: T::KIND.discriminator().to_string(),
                found: member_type,
            }));
        }

        collect(object, fail, |member| self.from_response_as::<T>(member))
    }
}

fn discriminator(object: &Map<String, Value>) -> Result<&str, ResponseMappingFailure> {
    object
        .get(DISCRIMINATOR)
        .and_then(Value::as_str)
        .ok_or(ResponseMappingFailure::MissingDiscriminator(DISCRIMINATOR))
}

/// Reads one declared field. Absent optional keys and explicit nulls
/// become [`FieldValue::Null`] without touching the transformer.
fn read_field(
    object: &Map<String, Value>,
    field: &ResponseField,
) -> Result<FieldValue, ResponseMappingFailure> {
    match object.get(field.wire_name) {
        None if field.optional => Ok(FieldValue::Null),
        None => Err(ResponseMappingFailure::MissingField(field.wire_name.to_string())),
        Some(Value::Null) => Ok(FieldValue::Null),
        Some(value) => match field.transformer {
            Some(transformer) => {
                transformer
                    .transform(value)
                    .map_err(|source| ResponseMappingFailure::Transformation {
                        field: field.name.to_string(),
                        source,
                    })
            }
            None => Ok(FieldValue::Json(value.clone())),
        },
    }
}

/// Validates the collection `@type` and returns its `@context`.
fn collection_context(object: &Map<String, Value>) -> Result<&str, ResponseMappingFailure> {
    let kind = discriminator(object)?;
    if !COLLECTION_TYPES.contains(&kind) {
        return Err(ResponseMappingFailure::NotACollection(kind.to_string()));
    }
    required_str(object, "@context")
}

fn required_str<'a>(
    object: &'a Map<String, Value>,
    key: &str,
) -> Result<&'a str, ResponseMappingFailure> {
    match object.get(key) {
        None => Err(ResponseMappingFailure::MissingField(key.to_string())),
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(other) => Err(ResponseMappingFailure::InvalidField {
            field: key.to_string(),
            expected: "string",
            found: error::describe(other).to_string(),
        }),
    }
}

fn optional_str(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Builds the collection from its envelope, mapping members with `map`.
fn collect<T, F, M>(
    object: &Map<String, Value>,
    fail: F,
    map: M,
) -> Result<CollectionResponse<T>, ResponseMappingError>
where
    F: Fn(ResponseMappingFailure) -> ResponseMappingError,
    M: Fn(&Value) -> Result<T, ResponseMappingError>,
{
    let context = required_str(object, "@context").map_err(&fail)?.to_string();
    let iri = required_str(object, "@id").map_err(&fail)?.to_string();
    let kind = discriminator(object).map_err(&fail)?.to_string();

    let total_items = match object.get("totalItems") {
        Some(Value::Number(n)) => n.as_u64().ok_or_else(|| {
            fail(ResponseMappingFailure::InvalidField {
                field: "totalItems".to_string(),
                expected: "non-negative integer",
                found: "number".to_string(),
            })
        })?,
        Some(other) => {
            return Err(fail(ResponseMappingFailure::InvalidField {
                field: "totalItems".to_string(),
                expected: "non-negative integer",
                found: error::describe(other).to_string(),
            }))
        }
        None => return Err(fail(ResponseMappingFailure::MissingField("totalItems".to_string()))),
    };

    let members = match object.get("member") {
        Some(Value::Array(items)) => items.iter().map(map).collect::<Result<Vec<_>, _>>()?,
        Some(other) => {
            return Err(fail(ResponseMappingFailure::InvalidField {
                field: "member".to_string(),
                expected: "array",
                found: error::describe(other).to_string(),
            }))
        }
        None => return Err(fail(ResponseMappingFailure::MissingField("member".to_string()))),
    };

    // `view` is either a plain IRI or a Hydra view object.
    let view_object = object.get("view").and_then(Value::as_object);
    let view = match object.get("view") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Object(v)) => optional_str(v, "@id"),
        _ => None,
    };
    let page = |key: &str, fallback: &str| {
        optional_str(object, key).or_else(|| view_object.and_then(|v| optional_str(v, fallback)))
    };

    Ok(CollectionResponse {
        context,
        iri,
        kind,
        members,
        total_items,
        first_page: page("firstPage", "first"),
        last_page: page("lastPage", "last"),
        next_page: page("nextPage", "next"),
        previous_page: page("previousPage", "previous"),
        view,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::resources::{AttributeResponse, AttributeType, CategoryRequest, StoreResponse};
    use serde_json::json;

    fn attribute_wire() -> Value {
        json!({
            "@id": "/stores/1/attributes/7",
            "@type": "Attribute",
            "uuid": "9b2f3c4e-8d1a-4f6b-a2c3-5e7d9f1b3a5c",
            "createdAt": "2024-01-15T10:30:00+00:00",
            "updatedAt": "2024-02-01T08:00:00+00:00",
            "store": "/stores/1",
            "name": "Colour",
            "code": "colour",
            "type": "select",
            "required": true,
            "options": ["red", "blue"]
        })
    }

    #[test]
    fn test_skip_and_unmapped_fields_are_not_serialized() {
        let request = CategoryRequest {
            iri: Some("/stores/1/categories/3".to_string()),
            name: Some("Electronics".to_string()),
            store: Some("/stores/1".to_string()),
            ..Default::default()
        };
        let wire = DataMapper::new().to_request_data(&request).unwrap();
        assert!(!wire.contains_key("iri"));
        assert!(!wire.contains_key("@id"));
        assert!(!wire.contains_key("store"));
        assert_eq!(wire.len(), 4);
    }

    #[test]
    fn test_discriminator_dispatch() {
        let resource = DataMapper::new().from_response(&attribute_wire()).unwrap();
        match resource {
            Resource::Attribute(attribute) => {
                assert_eq!(attribute.name(), "Colour");
                assert_eq!(attribute.attribute_type(), AttributeType::Select);
                assert_eq!(attribute.options(), ["red", "blue"]);
                assert_eq!(attribute.meta().iri(), "/stores/1/attributes/7");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_unknown_discriminator() {
        let mut wire = attribute_wire();
        wire["@type"] = json!("Widget");
        let err = DataMapper::new().from_response(&wire).unwrap_err();
        assert_eq!(
            err.failure(),
            &ResponseMappingFailure::UnknownDiscriminator("Widget".to_string())
        );
        assert_eq!(err.raw(), &wire);
    }

    #[test]
    fn test_discriminator_mismatch() {
        let err = DataMapper::new()
            .from_response_as::<StoreResponse>(&attribute_wire())
            .unwrap_err();
        assert_eq!(err.target_type(), "StoreResponse");
        assert!(matches!(
            err.failure(),
            ResponseMappingFailure::DiscriminatorMismatch { .. }
        ));
    }

    #[test]
    fn test_missing_required_field() {
        let mut wire = attribute_wire();
        wire.as_object_mut().unwrap().remove("createdAt");
        let err = DataMapper::new()
            .from_response_as::<AttributeResponse>(&wire)
            .unwrap_err();
        assert_eq!(
            err.failure(),
            &ResponseMappingFailure::MissingField("createdAt".to_string())
        );
    }

    #[test]
    fn test_transformer_failure_names_field() {
        let mut wire = attribute_wire();
        wire["uuid"] = json!("nope");
        let err = DataMapper::new().from_response(&wire).unwrap_err();
        assert_eq!(err.target_type(), "AttributeResponse");
        match err.failure() {
            ResponseMappingFailure::Transformation { field, .. } => assert_eq!(field, "uuid"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_collection_totals_and_view_object() {
        let wire = json!({
            "@context": "/contexts/Attribute",
            "@id": "/stores/1/attributes",
            "@type": "hydra:Collection",
            "totalItems": 50,
            "member": [attribute_wire(), attribute_wire()],
            "view": {
                "@id": "/stores/1/attributes?page=1",
                "first": "/stores/1/attributes?page=1",
                "last": "/stores/1/attributes?page=25",
                "next": "/stores/1/attributes?page=2"
            }
        });

        let collection = DataMapper::new()
            .from_collection_response_as::<AttributeResponse>(&wire)
            .unwrap();
        assert_eq!(collection.members.len(), 2);
        assert_eq!(collection.total_items, 50);
        assert_eq!(collection.view.as_deref(), Some("/stores/1/attributes?page=1"));
        assert_eq!(collection.last_page.as_deref(), Some("/stores/1/attributes?page=25"));
        assert!(collection.has_next());
        assert!(!collection.has_previous());
    }

    #[test]
    fn test_collection_rejects_other_type() {
        let wire = json!({"@context": "/contexts/Attribute", "@id": "/x", "@type": "Attribute"});
        let err = DataMapper::new().from_collection_response(&wire).unwrap_err();
        assert_eq!(
            err.failure(),
            &ResponseMappingFailure::NotACollection("Attribute".to_string())
        );
    }

    #[test]
    fn test_collection_member_must_match_context() {
        let wire = json!({
            "@context": "/contexts/Store",
            "@id": "/stores",
            "@type": "Collection",
            "totalItems": 1,
            "member": [attribute_wire()]
        });
        let err = DataMapper::new().from_collection_response(&wire).unwrap_err();
        assert!(matches!(
            err.failure(),
            ResponseMappingFailure::DiscriminatorMismatch { .. }
        ));
    }
}
