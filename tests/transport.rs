//
//  hydra-sdk
//  tests/transport.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use std::sync::Arc;

use chrono::Utc;
use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::json;

use hydra_sdk::api::resources::{
    BrandRequest, CategoryRequest, Resource, ResourceKind, StoreRequest,
};
use hydra_sdk::api::{ApiError, HydraClient};
use hydra_sdk::auth::MemoryCache;
use hydra_sdk::config::Config;
use hydra_sdk::error::ConfigurationError;
use hydra_sdk::mapper::ResponseDto;
use hydra_sdk::Error;

fn config(server: &ServerGuard) -> Config {
    let mut config = Config::default();
    config.api.base_url = server.url();
    config.api.timeout = 5;
    config
        .api
        .http
        .headers
        .insert("X-Tenant".to_string(), "acme".to_string());
    config.oauth.domain = server.url();
    config.oauth.client_id = "client".to_string();
    config.oauth.client_secret = "secret".to_string();
    config.oauth.audience = "https://api.example.com".to_string();
    config.oauth.organization_id = "org_123".to_string();
    config
}

fn client(config: &Config) -> HydraClient {
    HydraClient::from_config(config, Arc::new(MemoryCache::new())).unwrap()
}

async fn token_mock(server: &mut ServerGuard) -> Mock {
    server
        .mock("POST", "/oauth/token")
        .match_header("content-type", "application/x-www-form-urlencoded")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("grant_type".into(), "client_credentials".into()),
            Matcher::UrlEncoded("client_id".into(), "client".into()),
            Matcher::UrlEncoded("client_secret".into(), "secret".into()),
            Matcher::UrlEncoded("audience".into(), "https://api.example.com".into()),
            Matcher::UrlEncoded("organization".into(), "org_123".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"access_token": "tok-1", "expires_in": 3600, "token_type": "Bearer"}"#)
        .expect(1)
        .create_async()
        .await
}

fn brand(iri: &str, name: &str) -> serde_json::Value {
    json!({
        "@id": iri,
        "@type": "Brand",
        "uuid": "6f1c2a9e-8d3b-4e5f-a7c6-1b2d3e4f5a6b",
        "createdAt": "2024-01-15T10:30:00+00:00",
        "updatedAt": "2024-01-15T10:30:00+00:00",
        "store": "/stores/1",
        "name": name,
        "description": null,
        "logo": null
    })
}

fn category(iri: &str, name: &str) -> serde_json::Value {
    json!({
        "@id": iri,
        "@type": "Category",
        "uuid": "a3c1e5f7-2b4d-4f6a-8c0e-9d1b3f5a7c9e",
        "createdAt": "2024-01-15T10:30:00+00:00",
        "updatedAt": "2024-01-16T11:00:00+00:00",
        "store": "/stores/1",
        "name": name,
        "description": null,
        "parent": null,
        "image": null
    })
}

#[tokio::test]
async fn get_attaches_bearer_token_and_default_headers() {
    let mut server = Server::new_async().await;
    let token = token_mock(&mut server).await;
    let api = server
        .mock("GET", "/stores/1/brands/42")
        .match_header("authorization", "Bearer tok-1")
        .match_header("accept", "application/ld+json")
        .match_header("x-tenant", "acme")
        .match_header("user-agent", Matcher::Regex("^hydra-sdk/".to_string()))
        .with_status(200)
        .with_header("content-type", "application/ld+json")
        .with_body(brand("/stores/1/brands/42", "Acme").to_string())
        .expect(2)
        .create_async()
        .await;

    let client = client(&config(&server));
    for _ in 0..2 {
        let brand = client.brands().get("/stores/1/brands/42").await.unwrap();
        assert_eq!(brand.name(), "Acme");
        assert_eq!(brand.meta().iri(), "/stores/1/brands/42");
    }

    // The second call reuses the cached token.
    token.assert_async().await;
    api.assert_async().await;
}

#[tokio::test]
async fn list_uses_default_store_and_page_parameter() {
    let mut server = Server::new_async().await;
    let _token = token_mock(&mut server).await;
    let api = server
        .mock("GET", "/stores/1/brands")
        .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
        .with_status(200)
        .with_body(
            json!({
                "@context": "/contexts/Brand",
                "@id": "/stores/1/brands",
                "@type": "Collection",
                "totalItems": 12,
                "member": [brand("/stores/1/brands/11", "Eleven"), brand("/stores/1/brands/12", "Twelve")],
                "view": {
                    "@id": "/stores/1/brands?page=2",
                    "first": "/stores/1/brands?page=1",
                    "previous": "/stores/1/brands?page=1"
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let mut config = config(&server);
    config.defaults.store = Some("/stores/1".to_string());
    let client = client(&config);

    let page = client.brands().list(None, Some(2)).await.unwrap();
    assert_eq!(page.total_items, 12);
    assert_eq!(page.members.len(), 2);
    assert_eq!(page.previous_page.as_deref(), Some("/stores/1/brands?page=1"));
    assert!(!page.has_next());
    api.assert_async().await;
}

#[tokio::test]
async fn store_scoped_paths_need_a_store() {
    let server = Server::new_async().await;
    let client = client(&config(&server));

    let err = client.brands().list(None, None).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Configuration(ConfigurationError::Missing("defaults.store"))
    ));

    assert_eq!(client.stores().collection_path(None, None).unwrap(), "/stores");
    assert_eq!(
        client
            .inventory_locations()
            .collection_path(Some("/stores/2/"), Some("/stores/1"))
            .unwrap(),
        "/stores/2/inventory-locations"
    );
    assert_eq!(
        client.collection_path(ResourceKind::Category, Some("/stores/3")).unwrap(),
        "/stores/3/categories"
    );
}

#[tokio::test]
async fn create_posts_json_ld_to_the_request_store() {
    let mut server = Server::new_async().await;
    let _token = token_mock(&mut server).await;
    let api = server
        .mock("POST", "/stores/1/categories")
        .match_header("content-type", "application/ld+json")
        .match_body(Matcher::Json(json!({
            "name": "Electronics",
            "description": null,
            "parent": null,
            "image": null
        })))
        .with_status(201)
        .with_body(category("/stores/1/categories/7", "Electronics").to_string())
        .create_async()
        .await;

    let client = client(&config(&server));
    let created = client
        .categories()
        .create(&CategoryRequest {
            name: Some("Electronics".to_string()),
            store: Some("/stores/1".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(created.meta().iri(), "/stores/1/categories/7");
    api.assert_async().await;
}

#[tokio::test]
async fn update_sends_full_payload_as_merge_patch() {
    let mut server = Server::new_async().await;
    let _token = token_mock(&mut server).await;
    let api = server
        .mock("PATCH", "/stores/1/brands/42")
        .match_header("content-type", "application/merge-patch+json")
        .match_body(Matcher::Json(json!({
            "name": "Renamed",
            "description": "Anvils",
            "logo": null
        })))
        .with_status(200)
        .with_body(brand("/stores/1/brands/42", "Renamed").to_string())
        .create_async()
        .await;

    let client = client(&config(&server));
    let updated = client
        .brands()
        .update(&BrandRequest {
            iri: Some("/stores/1/brands/42".to_string()),
            store: Some("/stores/1".to_string()),
            name: Some("Renamed".to_string()),
            description: Some("Anvils".to_string()),
            // Cleared on the server.
            logo: None,
        })
        .await
        .unwrap();

    assert_eq!(updated.name(), "Renamed");
    api.assert_async().await;
}

#[tokio::test]
async fn debug_mode_logs_and_still_sends_bodies() {
    let mut server = Server::new_async().await;
    let _token = token_mock(&mut server).await;
    let api = server
        .mock("POST", "/stores")
        .match_body(Matcher::PartialJson(json!({"name": "Main", "code": "main"})))
        .with_status(201)
        .with_body(
            json!({
                "@id": "/stores/1",
                "@type": "Store",
                "uuid": "0b9f5d2e-4c1a-4f7e-9a3b-2d6c8e1f0a47",
                "createdAt": "2024-01-15T10:30:00+00:00",
                "updatedAt": "2024-01-15T10:30:00+00:00",
                "name": "Main",
                "code": "main",
                "defaultLocale": null,
                "currency": null
            })
            .to_string(),
        )
        .create_async()
        .await;

    let mut config = config(&server);
    config.api.debug = true;
    let client = client(&config);

    let store = client
        .stores()
        .create(&StoreRequest {
            name: Some("Main".to_string()),
            code: Some("main".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(store.code(), "main");
    api.assert_async().await;
}

#[tokio::test]
async fn update_without_iri_is_a_client_error() {
    let server = Server::new_async().await;
    let client = client(&config(&server));

    let err = client
        .brands()
        .update(&BrandRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Client(_)));
}

#[tokio::test]
async fn not_found_carries_resource_context() {
    let mut server = Server::new_async().await;
    let _token = token_mock(&mut server).await;
    let _api = server
        .mock("GET", "/stores/1/brands/999")
        .with_status(404)
        .with_body(r#"{"detail": "Not Found"}"#)
        .create_async()
        .await;

    let client = client(&config(&server));
    let err = client.brands().get("/stores/1/brands/999").await.unwrap_err();

    match err.as_api() {
        Some(ApiError::NotFound {
            resource_type,
            identifier,
            details,
        }) => {
            assert_eq!(resource_type, "brands");
            assert_eq!(identifier, "999");
            assert_eq!(details.request().map(|r| r.method.as_str()), Some("GET"));
            assert_eq!(details.response().map(|r| r.status), Some(404));
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn unprocessable_entity_is_a_validation_error() {
    let mut server = Server::new_async().await;
    let _token = token_mock(&mut server).await;
    let _api = server
        .mock("POST", "/stores")
        .with_status(422)
        .with_body(r#"{"violations": {"name": ["too short"]}}"#)
        .create_async()
        .await;

    let client = client(&config(&server));
    let err = client
        .stores()
        .create(&Default::default())
        .await
        .unwrap_err();

    let api = err.as_api().expect("an API error");
    assert!(matches!(api, ApiError::Validation { .. }));
    assert_eq!(
        api.violations().and_then(|v| v.get("name")),
        Some(&vec!["too short".to_string()])
    );
    assert!(err.to_string().contains("name: too short"));
    assert!(err.to_string().contains("POST"));
}

#[tokio::test]
async fn server_errors_are_classified() {
    let mut server = Server::new_async().await;
    let _token = token_mock(&mut server).await;
    let _api = server
        .mock("DELETE", "/stores/1/brands/42")
        .with_status(503)
        .create_async()
        .await;

    let client = client(&config(&server));
    let err = client.brands().delete("/stores/1/brands/42").await.unwrap_err();
    assert!(matches!(err.as_api(), Some(ApiError::Server(_))));
    assert_eq!(err.as_api().and_then(ApiError::status), Some(503));
}

#[tokio::test]
async fn network_failure_is_a_generic_http_error() {
    let mut server = Server::new_async().await;
    let _token = token_mock(&mut server).await;

    let mut config = config(&server);
    config.api.base_url = "http://127.0.0.1:1".to_string();
    let client = client(&config);

    let err = client.stores().get("/stores/1").await.unwrap_err();
    let api = err.as_api().expect("an API error");
    assert!(matches!(api, ApiError::GenericHttp(_)));
    assert_eq!(api.status(), None);
    assert!(api.details().message().starts_with("HTTP request failed"));
    assert!(std::error::Error::source(api).is_some());
}

#[tokio::test]
async fn rejected_credentials_surface_as_client_error() {
    let mut server = Server::new_async().await;
    let _token = server
        .mock("POST", "/oauth/token")
        .with_status(401)
        .with_body(r#"{"error": "access_denied"}"#)
        .create_async()
        .await;

    let client = client(&config(&server));
    let err = client.stores().get("/stores/1").await.unwrap_err();

    match err {
        Error::Client(err) => {
            let cause = err.cause_as::<ApiError>().expect("classified cause");
            assert!(matches!(cause, ApiError::Authentication(_)));
            assert_eq!(cause.status(), Some(401));
        }
        other => panic!("expected a client error, got {other:?}"),
    }
}

#[tokio::test]
async fn undecodable_body_is_a_client_error() {
    let mut server = Server::new_async().await;
    let _token = token_mock(&mut server).await;
    let _api = server
        .mock("GET", "/stores/1")
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let client = client(&config(&server));
    let err = client.stores().get("/stores/1").await.unwrap_err();
    match err {
        Error::Client(err) => assert!(err.cause_as::<serde_json::Error>().is_some()),
        other => panic!("expected a client error, got {other:?}"),
    }
}

#[tokio::test]
async fn fetch_dispatches_on_type() {
    let mut server = Server::new_async().await;
    let _token = token_mock(&mut server).await;
    let _api = server
        .mock("GET", "/stores/1/categories/7")
        .with_status(200)
        .with_body(category("/stores/1/categories/7", "Electronics").to_string())
        .create_async()
        .await;

    let client = client(&config(&server));
    let resource = client.fetch("/stores/1/categories/7").await.unwrap();
    assert!(matches!(resource, Resource::Category(_)));
    assert_eq!(resource.kind(), ResourceKind::Category);
}

#[tokio::test]
async fn get_default_follows_configured_iri() {
    let mut server = Server::new_async().await;
    let _token = token_mock(&mut server).await;
    let _api = server
        .mock("GET", "/stores/1/inventory-locations/9")
        .with_status(200)
        .with_body(
            json!({
                "@id": "/stores/1/inventory-locations/9",
                "@type": "InventoryLocation",
                "uuid": "c7e9a1b3-5d7f-4a9c-8e1a-3b5d7f9a1c3e",
                "createdAt": "2024-01-15T10:30:00+00:00",
                "updatedAt": "2024-01-15T10:30:00+00:00",
                "store": "/stores/1",
                "name": "Warehouse",
                "isDefault": true
            })
            .to_string(),
        )
        .create_async()
        .await;

    let mut config = config(&server);
    config.defaults.inventory_location = Some("/stores/1/inventory-locations/9".to_string());
    let client = client(&config);

    let location = client.inventory_locations().get_default().await.unwrap().unwrap();
    assert!(location.is_default());
    assert_eq!(location.code(), None);

    assert!(client.brands().get_default().await.unwrap().is_none());
    assert!(client.integrations().get_default().await.unwrap().is_none());
}

#[tokio::test]
async fn undecodable_token_response_reports_expiry_as_now() {
    let mut server = Server::new_async().await;
    let _token = server
        .mock("POST", "/oauth/token")
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let client = client(&config(&server));
    let before = Utc::now();
    let at = client.token_handler().token_expiration("opaque").await.unwrap();
    assert!(at >= before && at <= Utc::now());
}

#[tokio::test]
async fn token_expiration_needs_only_a_lifetime() {
    let mut server = Server::new_async().await;
    let _token = server
        .mock("POST", "/oauth/token")
        .with_status(200)
        .with_body(r#"{"expires_in": 600}"#)
        .create_async()
        .await;

    let client = client(&config(&server));
    let before = Utc::now();
    let at = client.token_handler().token_expiration("opaque").await.unwrap();
    let remaining = (at - before).num_seconds();
    assert!((599..=601).contains(&remaining), "{remaining}");
}

#[tokio::test]
async fn token_expiration_propagates_rejected_exchange() {
    let mut server = Server::new_async().await;
    let _token = server
        .mock("POST", "/oauth/token")
        .with_status(500)
        .create_async()
        .await;

    let client = client(&config(&server));
    let err = client
        .token_handler()
        .token_expiration("opaque")
        .await
        .unwrap_err();
    assert!(matches!(err.cause_as::<ApiError>(), Some(ApiError::Server(_))));
}

#[tokio::test]
async fn oversized_token_lifetime_is_cached() {
    let mut server = Server::new_async().await;
    let token = server
        .mock("POST", "/oauth/token")
        .with_status(200)
        .with_body(r#"{"access_token": "t", "expires_in": 18446744073709551615}"#)
        .expect(1)
        .create_async()
        .await;

    let client = client(&config(&server));
    for _ in 0..2 {
        assert_eq!(client.token_handler().access_token().await.unwrap(), "t");
    }
    token.assert_async().await;
}

#[test]
fn from_config_validates_first() {
    let err = HydraClient::from_config(&Config::default(), Arc::new(MemoryCache::new()))
        .err()
        .unwrap();
    assert!(matches!(
        err,
        Error::Configuration(ConfigurationError::Missing("api.base_url"))
    ));
}

#[test]
fn invalid_header_is_rejected() {
    let mut config = Config::default();
    config.api.base_url = "https://api.example.com".to_string();
    config.api.http.headers.insert("Bad Header".to_string(), "x".to_string());
    config.oauth.domain = "auth.example.com".to_string();
    config.oauth.client_id = "client".to_string();
    config.oauth.client_secret = "secret".to_string();
    config.oauth.audience = "aud".to_string();
    config.oauth.organization_id = "org".to_string();

    let err = HydraClient::from_config(&config, Arc::new(MemoryCache::new()))
        .err()
        .unwrap();
    match err {
        Error::Client(err) => assert_eq!(err.message(), "invalid header name 'Bad Header'"),
        other => panic!("expected a client error, got {other:?}"),
    }
}
