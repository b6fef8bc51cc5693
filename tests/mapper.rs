//
//  hydra-sdk
//  tests/mapper.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use std::sync::atomic::{AtomicUsize, Ordering};

use once_cell::sync::Lazy;
use serde_json::{json, Map, Value};

use hydra_sdk::api::resources::*;
use hydra_sdk::mapper::*;

const UUID: &str = "0b9f5d2e-4c1a-4f7e-9a3b-2d6c8e1f0a47";
const CREATED: &str = "2024-01-15T10:30:00+00:00";
const UPDATED: &str = "2024-03-02T08:05:09+02:00";

fn envelope(kind: &str, iri: &str) -> Map<String, Value> {
    let Value::Object(map) = json!({
        "@id": iri,
        "@type": kind,
        "uuid": UUID,
        "createdAt": CREATED,
        "updatedAt": UPDATED,
    }) else {
        unreachable!()
    };
    map
}

fn resource(kind: &str, iri: &str, fields: Value) -> Value {
    let mut map = envelope(kind, iri);
    if let Value::Object(fields) = fields {
        map.extend(fields);
    }
    Value::Object(map)
}

fn wire_for(kind: ResourceKind) -> Value {
    match kind {
        ResourceKind::Store => resource(
            "Store",
            "/stores/1",
            json!({"name": "Main", "code": "main", "defaultLocale": "en_GB", "currency": "GBP"}),
        ),
        ResourceKind::Brand => resource(
            "Brand",
            "/stores/1/brands/42",
            json!({"store": "/stores/1", "name": "Acme", "description": "Anvils", "logo": null}),
        ),
        ResourceKind::Category => resource(
            "Category",
            "/stores/1/categories/7",
            json!({
                "store": "/stores/1",
                "name": "Electronics",
                "description": null,
                "parent": "/stores/1/categories/1",
                "image": "https://cdn.example.com/e.png"
            }),
        ),
        ResourceKind::Attribute => resource(
            "Attribute",
            "/stores/1/attributes/3",
            json!({
                "store": "/stores/1",
                "name": "Colour",
                "code": "colour",
                "type": "select",
                "required": true,
                "options": ["red", "green"]
            }),
        ),
        ResourceKind::Integration => resource(
            "Integration",
            "/stores/1/integrations/5",
            json!({
                "store": "/stores/1",
                "name": "Shop",
                "platform": "woocommerce",
                "enabled": false,
                "lastSyncedAt": "2024-02-01T00:00:00-05:00"
            }),
        ),
        ResourceKind::InventoryLocation => resource(
            "InventoryLocation",
            "/stores/1/inventory-locations/9",
            json!({
                "store": "/stores/1",
                "name": "Warehouse",
                "code": "wh-1",
                "integration": "/stores/1/integrations/5",
                "isDefault": true
            }),
        ),
    }
}

#[test]
fn every_kind_round_trips_through_its_response_type() {
    let mapper = DataMapper::new();
    for kind in ResourceKind::ALL {
        let wire = wire_for(kind);
        let resource = mapper
            .from_response(&wire)
            .unwrap_or_else(|e| panic!("{kind}: {e}"));

        assert_eq!(resource.kind(), kind);
        assert_eq!(serde_json::to_value(&resource).unwrap(), wire, "{kind}");
    }
}

#[test]
fn envelope_is_decoded_into_meta() {
    let brand: BrandResponse = DataMapper::new()
        .from_response_as(&wire_for(ResourceKind::Brand))
        .unwrap();

    let meta = brand.meta();
    assert_eq!(meta.iri(), "/stores/1/brands/42");
    assert_eq!(meta.kind(), ResourceKind::Brand);
    assert_eq!(meta.uuid().to_string(), UUID);
    assert_eq!(meta.created_at().to_rfc3339(), CREATED);
    assert_eq!(meta.updated_at().offset().local_minus_utc(), 2 * 3600);
    assert_eq!(brand.name(), "Acme");
    assert_eq!(brand.logo(), None);
}

#[test]
fn discriminator_selects_attribute_response() {
    let resource = DataMapper::new()
        .from_response(&wire_for(ResourceKind::Attribute))
        .unwrap();

    match resource {
        Resource::Attribute(attribute) => {
            assert_eq!(attribute.attribute_type(), AttributeType::Select);
            assert_eq!(attribute.options(), ["red", "green"]);
        }
        other => panic!("expected an attribute, got {other:?}"),
    }
}

#[test]
fn unknown_discriminator_is_a_mapping_error() {
    let wire = resource("Widget", "/widgets/1", json!({}));
    let err = DataMapper::new().from_response(&wire).unwrap_err();

    assert_eq!(
        err.failure(),
        &ResponseMappingFailure::UnknownDiscriminator("Widget".to_string())
    );
    assert_eq!(err.raw(), &wire);
}

#[test]
fn category_request_example() {
    let request = CategoryRequest {
        name: Some("Electronics".to_string()),
        store: Some("/stores/1".to_string()),
        ..Default::default()
    };

    let wire = DataMapper::new().to_request_data(&request).unwrap();

    assert_eq!(
        Value::Object(wire),
        json!({"name": "Electronics", "description": null, "parent": null, "image": null})
    );
}

#[test]
fn serialization_is_idempotent() {
    let request = IntegrationRequest {
        iri: Some("/stores/1/integrations/5".to_string()),
        store: Some("/stores/1".to_string()),
        name: Some("Shop".to_string()),
        platform: Some(IntegrationPlatform::Shopify),
        enabled: Some(true),
        last_synced_at: chrono::DateTime::parse_from_rfc3339(CREATED).ok(),
    };

    let first = request.to_wire().unwrap();
    let second = request.to_wire().unwrap();
    assert_eq!(first, second);
    assert_eq!(first.get("platform"), Some(&json!("shopify")));
    assert_eq!(first.get("lastSyncedAt"), Some(&json!(CREATED)));
}

#[test]
fn skip_marked_fields_never_reach_the_wire() {
    let iri = Some("/stores/1/x/1".to_string());
    let store = Some("/stores/1".to_string());
    let maps = [
        StoreRequest { iri: iri.clone(), ..Default::default() }.to_wire().unwrap(),
        BrandRequest { iri: iri.clone(), store: store.clone(), ..Default::default() }.to_wire().unwrap(),
        CategoryRequest { iri: iri.clone(), store: store.clone(), ..Default::default() }.to_wire().unwrap(),
        AttributeRequest { iri: iri.clone(), store: store.clone(), ..Default::default() }.to_wire().unwrap(),
        IntegrationRequest { iri: iri.clone(), store: store.clone(), ..Default::default() }.to_wire().unwrap(),
        InventoryLocationRequest { iri, store, ..Default::default() }.to_wire().unwrap(),
    ];

    for map in maps {
        assert!(!map.contains_key("iri"), "{map:?}");
        assert!(!map.contains_key("@id"), "{map:?}");
        assert!(!map.contains_key("store"), "{map:?}");
    }
}

#[test]
fn collection_totals() {
    let wire = json!({
        "@context": "/contexts/Brand",
        "@id": "/stores/1/brands",
        "@type": "Collection",
        "totalItems": 50,
        "member": [wire_for(ResourceKind::Brand), wire_for(ResourceKind::Brand)],
        "view": "/stores/1/brands?page=1",
        "nextPage": "/stores/1/brands?page=2"
    });

    let page = DataMapper::new().from_collection_response(&wire).unwrap();
    assert_eq!(page.members.len(), 2);
    assert_eq!(page.total_items, 50);
    assert_eq!(page.view.as_deref(), Some("/stores/1/brands?page=1"));
    assert!(page.has_next());
    assert!(!page.has_previous());

    let typed = DataMapper::new()
        .from_collection_response_as::<BrandResponse>(&wire)
        .unwrap();
    assert_eq!(typed.members[1].name(), "Acme");
}

// Null passthrough: a transformer that fails the test whenever it is called
// with null, and counts every call.

static CALLS: AtomicUsize = AtomicUsize::new(0);

struct NullRejecting;

impl Transformer for NullRejecting {
    fn transform(&self, value: &Value) -> Result<FieldValue, TransformationError> {
        assert!(!value.is_null(), "transform called with null");
        CALLS.fetch_add(1, Ordering::SeqCst);
        Ok(FieldValue::Json(value.clone()))
    }

    fn reverse_transform(&self, value: &FieldValue) -> Result<Value, TransformationError> {
        assert!(!value.is_null(), "reverse_transform called with null");
        CALLS.fetch_add(1, Ordering::SeqCst);
        Err(TransformationError::Malformed {
            kind: "note",
            value: format!("{value:?}"),
            reason: "rejected".to_string(),
        })
    }
}

#[derive(Debug, Default)]
struct NoteRequest {
    note: Option<String>,
}

static NOTE_REQUEST_FIELDS: Lazy<Vec<RequestField<NoteRequest>>> = Lazy::new(|| {
    vec![RequestField::new("note", "note", |r: &NoteRequest| FieldValue::from(r.note.clone()))
        .with_transformer(TransformerKind::Custom(&NullRejecting))]
});

impl RequestDto for NoteRequest {
    const TYPE_NAME: &'static str = "NoteRequest";

    fn fields() -> &'static [RequestField<Self>] {
        NOTE_REQUEST_FIELDS.as_slice()
    }

    fn iri(&self) -> Option<&str> {
        None
    }
}

#[derive(Debug)]
struct NoteResponse {
    meta: ResourceMeta,
    note: Option<String>,
}

const NOTE_RESPONSE_FIELDS: &[ResponseField] = &[ResponseField::optional("note", "note")
    .with_transformer(TransformerKind::Custom(&NullRejecting))];

impl ResponseDto for NoteResponse {
    const KIND: ResourceKind = ResourceKind::Brand;
    const TYPE_NAME: &'static str = "NoteResponse";

    fn fields() -> &'static [ResponseField] {
        NOTE_RESPONSE_FIELDS
    }

    fn from_fields(meta: ResourceMeta, mut fields: FieldMap) -> Result<Self, ResponseMappingFailure> {
        Ok(Self {
            meta,
            note: fields.opt_string("note")?,
        })
    }

    fn meta(&self) -> &ResourceMeta {
        &self.meta
    }
}

#[test]
fn null_values_bypass_transformers() {
    let mapper = DataMapper::new();
    let before = CALLS.load(Ordering::SeqCst);

    let wire = mapper.to_request_data(&NoteRequest::default()).unwrap();
    assert_eq!(wire.get("note"), Some(&Value::Null));

    let explicit_null = resource("Brand", "/stores/1/brands/1", json!({"note": null}));
    let absent = resource("Brand", "/stores/1/brands/1", json!({}));
    for wire in [explicit_null, absent] {
        let note: NoteResponse = mapper.from_response_as(&wire).unwrap();
        assert_eq!(note.note, None);
        assert_eq!(note.meta().iri(), "/stores/1/brands/1");
    }

    assert_eq!(CALLS.load(Ordering::SeqCst), before);
}

#[test]
fn non_null_values_go_through_transformers() {
    let mapper = DataMapper::new();

    let note: NoteResponse = mapper
        .from_response_as(&resource("Brand", "/stores/1/brands/1", json!({"note": "hi"})))
        .unwrap();
    assert_eq!(note.note.as_deref(), Some("hi"));

    let err = mapper
        .to_request_data(&NoteRequest {
            note: Some("hi".to_string()),
        })
        .unwrap_err();
    assert_eq!(err.dto_type(), "NoteRequest");
    assert_eq!(err.field(), "note");
}
