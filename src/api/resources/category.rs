//
//  hydra-sdk
//  api/resources/category.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Category resource. Categories form a tree through `parent`.

use once_cell::sync::Lazy;
use serde::Serialize;

use super::{ResourceKind, ResourceMeta};
use crate::mapper::{
    FieldMap, FieldValue, RequestDto, RequestField, ResponseDto, ResponseField,
    ResponseMappingFailure,
};

/// Create/update payload for a category.
///
/// `store` only selects the collection the category is created in; it is
/// not part of the request body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryRequest {
    pub iri: Option<String>,
    pub store: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    /// IRI of the parent category.
    pub parent: Option<String>,
    /// Image URL.
    pub image: Option<String>,
}

static CATEGORY_REQUEST_FIELDS: Lazy<Vec<RequestField<CategoryRequest>>> = Lazy::new(|| {
    vec![
        RequestField::skip("iri", |r: &CategoryRequest| FieldValue::from(r.iri.clone())),
        RequestField::unmapped("store", |r: &CategoryRequest| FieldValue::from(r.store.clone())),
        RequestField::new("name", "name", |r: &CategoryRequest| FieldValue::from(r.name.clone())),
        RequestField::new("description", "description", |r: &CategoryRequest| {
            FieldValue::from(r.description.clone())
        }),
        RequestField::new("parent", "parent", |r: &CategoryRequest| {
            FieldValue::from(r.parent.clone())
        }),
        RequestField::new("image", "image", |r: &CategoryRequest| {
            FieldValue::from(r.image.clone())
        }),
    ]
});

impl RequestDto for CategoryRequest {
    const TYPE_NAME: &'static str = "CategoryRequest";

    fn fields() -> &'static [RequestField<Self>] {
        CATEGORY_REQUEST_FIELDS.as_slice()
    }

    fn iri(&self) -> Option<&str> {
        self.iri.as_deref()
    }

    fn store(&self) -> Option<&str> {
        self.store.as_deref()
    }
}

/// A category as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    #[serde(flatten)]
    meta: ResourceMeta,
    store: String,
    name: String,
    description: Option<String>,
    parent: Option<String>,
    image: Option<String>,
}

const CATEGORY_RESPONSE_FIELDS: &[ResponseField] = &[
    ResponseField::required("store", "store"),
    ResponseField::required("name", "name"),
    ResponseField::optional("description", "description"),
    ResponseField::optional("parent", "parent"),
    ResponseField::optional("image", "image"),
];

impl CategoryResponse {
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

    /// IRI of the parent category, `None` for a root category.
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// Image URL, if one has been uploaded.
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }
}

impl ResponseDto for CategoryResponse {
    const KIND: ResourceKind = ResourceKind::Category;
    const TYPE_NAME: &'static str = "CategoryResponse";

    fn fields() -> &'static [ResponseField] {
        CATEGORY_RESPONSE_FIELDS
    }

    fn from_fields(meta: ResourceMeta, mut fields: FieldMap) -> Result<Self, ResponseMappingFailure> {
        Ok(Self {
            meta,
            store: fields.string("store")?,
            name: fields.string("name")?,
            description: fields.opt_string("description")?,
            parent: fields.opt_string("parent")?,
            image: fields.opt_string("image")?,
        })
    }

    fn meta(&self) -> &ResourceMeta {
        &self.meta
    }
}
