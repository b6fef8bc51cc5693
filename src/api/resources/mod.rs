//
//  hydra-sdk
//  api/resources/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Resource Catalogue
//!
//! Every resource type the client knows about, with its request and
//! response DTOs and their field tables.
//!
//! | Kind | Collection path | Store-scoped |
//! |------|-----------------|--------------|
//! | [`Store`](ResourceKind::Store) | `/stores` | no |
//! | [`Brand`](ResourceKind::Brand) | `{store}/brands` | yes |
//! | [`Category`](ResourceKind::Category) | `{store}/categories` | yes |
//! | [`Attribute`](ResourceKind::Attribute) | `{store}/attributes` | yes |
//! | [`Integration`](ResourceKind::Integration) | `{store}/integrations` | yes |
//! | [`InventoryLocation`](ResourceKind::InventoryLocation) | `{store}/inventory-locations` | yes |
//!
//! Adding a resource type means adding a variant to [`ResourceKind`] and
//! [`Resource`] and declaring the field tables of its DTOs. The compiler
//! points at every match that needs a new arm.

mod attribute;
mod brand;
mod category;
mod integration;
mod inventory_location;
mod store;

pub use attribute::{AttributeRequest, AttributeResponse, AttributeType};
pub use brand::{BrandRequest, BrandResponse};
pub use category::{CategoryRequest, CategoryResponse};
pub use integration::{IntegrationPlatform, IntegrationRequest, IntegrationResponse};
pub use inventory_location::{InventoryLocationRequest, InventoryLocationResponse};
pub use store::{StoreRequest, StoreResponse};

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use serde::{Serialize, Serializer};
use serde_json::Value;
use uuid::Uuid;

use crate::mapper::{
    DataMapper, EnumFamily, EnumValue, FieldMap, ResponseDto, ResponseMappingError,
    ResponseMappingFailure, WireEnum,
};

/// The `@type` discriminator of a single resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ResourceKind {
    /// A store, the root of every other resource.
    Store,
    /// A product brand.
    Brand,
    /// A product category.
    Category,
    /// A product attribute definition.
    Attribute,
    /// A connection to an external commerce platform.
    Integration,
    /// A place stock is held.
    InventoryLocation,
}

impl ResourceKind {
    /// All kinds, in declaration order.
    pub const ALL: [ResourceKind; 6] = [
        Self::Store,
        Self::Brand,
        Self::Category,
        Self::Attribute,
        Self::Integration,
        Self::InventoryLocation,
    ];

    /// The `@type` value.
    pub fn discriminator(&self) -> &'static str {
        match self {
            Self::Store => "Store",
            Self::Brand => "Brand",
            Self::Category => "Category",
            Self::Attribute => "Attribute",
            Self::Integration => "Integration",
            Self::InventoryLocation => "InventoryLocation",
        }
    }

    /// Looks up the kind registered for a `@type` value.
    pub fn from_discriminator(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.discriminator() == value)
    }

    /// Path segment of the collection endpoint.
    pub fn collection_segment(&self) -> &'static str {
        match self {
            Self::Store => "stores",
            Self::Brand => "brands",
            Self::Category => "categories",
            Self::Attribute => "attributes",
            Self::Integration => "integrations",
            Self::InventoryLocation => "inventory-locations",
        }
    }

    /// Returns `true` when the collection lives under a store IRI.
    pub fn is_store_scoped(&self) -> bool {
        !matches!(self, Self::Store)
    }

    /// Maps `wire` with the response type registered for this kind.
    pub fn decode(self, mapper: &DataMapper, wire: &Value) -> Result<Resource, ResponseMappingError> {
        match self {
            Self::Store => mapper.from_response_as(wire).map(Resource::Store),
            Self::Brand => mapper.from_response_as(wire).map(Resource::Brand),
            Self::Category => mapper.from_response_as(wire).map(Resource::Category),
            Self::Attribute => mapper.from_response_as(wire).map(Resource::Attribute),
            Self::Integration => mapper.from_response_as(wire).map(Resource::Integration),
            Self::InventoryLocation => mapper.from_response_as(wire).map(Resource::InventoryLocation),
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.discriminator())
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    /// Accepts the discriminator or the collection segment, ignoring case,
    /// so `InventoryLocation`, `inventory-locations` and
    /// `inventory_location` all resolve.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Self::ALL
            .into_iter()
            .find(|kind| {
                normalize(kind.discriminator()) == wanted
                    || normalize(kind.collection_segment()) == wanted
            })
            .ok_or_else(|| format!("unknown resource type '{s}'"))
    }
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

impl WireEnum for ResourceKind {
    const FAMILY: EnumFamily = EnumFamily::ResourceKind;

    fn from_wire(value: &str) -> Option<Self> {
        Self::from_discriminator(value)
    }

    fn as_wire(&self) -> &'static str {
        self.discriminator()
    }

    fn from_value(value: EnumValue) -> Option<Self> {
        match value {
            EnumValue::ResourceKind(kind) => Some(kind),
            _ => None,
        }
    }
}

/// A response of any kind, as produced by discriminator dispatch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Resource {
    /// See [`StoreResponse`].
    Store(StoreResponse),
    /// See [`BrandResponse`].
    Brand(BrandResponse),
    /// See [`CategoryResponse`].
    Category(CategoryResponse),
    /// See [`AttributeResponse`].
    Attribute(AttributeResponse),
    /// See [`IntegrationResponse`].
    Integration(IntegrationResponse),
    /// See [`InventoryLocationResponse`].
    InventoryLocation(InventoryLocationResponse),
}

impl Resource {
    /// The concrete kind.
    pub fn kind(&self) -> ResourceKind {
        self.meta().kind()
    }

    /// The decoded envelope.
    pub fn meta(&self) -> &ResourceMeta {
        match self {
            Self::Store(r) => r.meta(),
            Self::Brand(r) => r.meta(),
            Self::Category(r) => r.meta(),
            Self::Attribute(r) => r.meta(),
            Self::Integration(r) => r.meta(),
            Self::InventoryLocation(r) => r.meta(),
        }
    }
}

/// The JSON-LD envelope carried by every resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceMeta {
    #[serde(rename = "@id")]
    iri: String,
    #[serde(rename = "@type")]
    kind: ResourceKind,
    uuid: Uuid,
    #[serde(rename = "createdAt", serialize_with = "serialize_datetime")]
    created_at: DateTime<FixedOffset>,
    #[serde(rename = "updatedAt", serialize_with = "serialize_datetime")]
    updated_at: DateTime<FixedOffset>,
}

impl ResourceMeta {
    /// Takes the envelope values out of a decoded field map.
    pub fn from_fields(fields: &mut FieldMap) -> Result<Self, ResponseMappingFailure> {
        Ok(Self {
            iri: fields.string("iri")?,
            kind: fields.enum_value("kind")?,
            uuid: fields.uuid("uuid")?,
            created_at: fields.datetime("created_at")?,
            updated_at: fields.datetime("updated_at")?,
        })
    }

    /// The resource IRI.
    pub fn iri(&self) -> &str {
        &self.iri
    }

    /// The `@type` discriminator.
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// The resource UUID.
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<FixedOffset> {
        self.created_at
    }

    /// Last update timestamp.
    pub fn updated_at(&self) -> DateTime<FixedOffset> {
        self.updated_at
    }
}

/// Writes date-times in the same form the date transformer produces.
pub(crate) fn serialize_datetime<S: Serializer>(
    at: &DateTime<FixedOffset>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&crate::mapper::format_datetime(at))
}

pub(crate) fn serialize_opt_datetime<S: Serializer>(
    at: &Option<DateTime<FixedOffset>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match at {
        Some(at) => serialize_datetime(at, serializer),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discriminator_lookup() {
        for kind in ResourceKind::ALL {
            assert_eq!(ResourceKind::from_discriminator(kind.discriminator()), Some(kind));
        }
        assert_eq!(ResourceKind::from_discriminator("store"), None);
    }

    #[test]
    fn test_from_str_accepts_segments() {
        assert_eq!("stores".parse::<ResourceKind>(), Ok(ResourceKind::Store));
        assert_eq!(
            "inventory-locations".parse::<ResourceKind>(),
            Ok(ResourceKind::InventoryLocation)
        );
        assert_eq!(
            "inventory_location".parse::<ResourceKind>(),
            Ok(ResourceKind::InventoryLocation)
        );
        assert!("widgets".parse::<ResourceKind>().is_err());
    }

    #[test]
    fn test_store_is_the_only_root_collection() {
        let roots: Vec<_> = ResourceKind::ALL
            .into_iter()
            .filter(|kind| !kind.is_store_scoped())
            .collect();
        assert_eq!(roots, vec![ResourceKind::Store]);
    }
}
