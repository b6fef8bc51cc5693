//
//  hydra-sdk
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Common API Types
//!
//! The typed HTTP failure family and the pagination wrapper shared by
//! every resource type.
//!
//! ## Failure classification
//!
//! [`ApiError::create`] maps an HTTP outcome to exactly one [`ApiError`]
//! variant:
//!
//! | Condition | Variant | Message |
//! |-----------|---------|---------|
//! | no response (network failure) | `GenericHttp` | `HTTP request failed: <cause>` |
//! | 400 | `BadRequest` | `Bad request` |
//! | 401, 403 | `Authentication` | `Authentication failed` |
//! | 404 | `NotFound` | `Resource not found: <type> <id>` |
//! | 422 | `Validation` | `Validation failed: field: msg1, msg2; ...` |
//! | 500, 502, 503, 504 | `Server` | `Server error` |
//! | anything else | `GenericHttp` | `HTTP request failed with status <code>` |
//!
//! The rendered form of every variant also includes the method, URI,
//! status and body when they are known. It is meant for logs; program
//! logic should match on the variant.

mod pagination;

pub use pagination::*;

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::error::BoxError;
use crate::util::path_segments;

/// Field name to validation messages, as returned with a 422.
pub type Violations = BTreeMap<String, Vec<String>>;

/// The request half of a failed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestInfo {
    /// HTTP method, e.g. `GET`.
    pub method: String,
    /// Full request URI.
    pub uri: String,
}

impl RequestInfo {
    /// Creates request info.
    pub fn new(method: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            uri: uri.into(),
        }
    }
}

/// The response half of a failed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseInfo {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: String,
}

impl ResponseInfo {
    /// Creates response info.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Diagnostics carried by every [`ApiError`].
#[derive(Debug)]
pub struct ErrorDetails {
    message: String,
    request: Option<RequestInfo>,
    response: Option<ResponseInfo>,
    cause: Option<BoxError>,
    context: BTreeMap<String, String>,
}

impl ErrorDetails {
    /// Creates details with only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            request: None,
            response: None,
            cause: None,
            context: BTreeMap::new(),
        }
    }

    /// Attaches the request.
    pub fn with_request(mut self, request: RequestInfo) -> Self {
        self.request = Some(request);
        self
    }

    /// Attaches the response.
    pub fn with_response(mut self, response: ResponseInfo) -> Self {
        self.response = Some(response);
        self
    }

    /// Attaches the underlying cause.
    pub fn with_cause(mut self, cause: BoxError) -> Self {
        self.cause = Some(cause);
        self
    }

    /// Adds a free-form diagnostic entry.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// The summary message, without request/response details.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The request, when one was built.
    pub fn request(&self) -> Option<&RequestInfo> {
        self.request.as_ref()
    }

    /// The response, `None` when none was received.
    pub fn response(&self) -> Option<&ResponseInfo> {
        self.response.as_ref()
    }

    /// The underlying cause, if any.
    pub fn cause(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// Free-form diagnostic entries.
    pub fn context(&self) -> &BTreeMap<String, String> {
        &self.context
    }
}

impl fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(request) = &self.request {
            write!(f, " [{} {}]", request.method, request.uri)?;
        }
        if let Some(response) = &self.response {
            write!(f, " status={}", response.status)?;
            if !response.body.is_empty() {
                write!(f, " body={}", response.body)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ErrorDetails {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn std::error::Error + 'static))
    }
}

/// A classified HTTP failure.
///
/// Every variant renders as its [`ErrorDetails`]. The single-field variants
/// forward [`std::error::Error::source`] to the underlying cause; for
/// `NotFound` and `Validation` the cause, if any, is on
/// [`details`](Self::details).
#[derive(Error, Debug)]
pub enum ApiError {
    /// 400.
    #[error(transparent)]
    BadRequest(ErrorDetails),

    /// 401 or 403. The two are not distinguished here; use
    /// [`ApiError::status`] to tell them apart.
    #[error(transparent)]
    Authentication(ErrorDetails),

    /// 404.
    #[error("{details}")]
    NotFound {
        /// Resource type, derived from the request path when possible.
        resource_type: String,
        /// Resource identifier, derived from the request path when possible.
        identifier: String,
        details: ErrorDetails,
    },

    /// 422, with the parsed violation map.
    #[error("{details}")]
    Validation {
        violations: Violations,
        details: ErrorDetails,
    },

    /// 500, 502, 503 or 504.
    #[error(transparent)]
    Server(ErrorDetails),

    /// Any other status, or no response at all.
    #[error(transparent)]
    GenericHttp(ErrorDetails),
}

impl ApiError {
    /// Classifies an HTTP outcome.
    ///
    /// # Parameters
    ///
    /// * `request` - The request that was sent
    /// * `response` - The response, `None` when the exchange failed before
    ///   a response arrived
    /// * `cause` - The underlying transport error, if any
    ///
    /// # Example
    ///
    /// ```rust
    /// use hydra_sdk::api::common::{ApiError, RequestInfo, ResponseInfo};
    ///
    /// let err = ApiError::create(
    ///     RequestInfo::new("POST", "https://api.example.com/stores/1/brands"),
    ///     Some(ResponseInfo::new(422, r#"{"violations": {"name": ["too short"]}}"#)),
    ///     None,
    /// );
    ///
    /// assert!(matches!(err, ApiError::Validation { .. }));
    /// assert!(err.to_string().contains("name: too short"));
    /// ```
    pub fn create(
        request: RequestInfo,
        response: Option<ResponseInfo>,
        cause: Option<BoxError>,
    ) -> Self {
        let Some(response) = response else {
            let message = match &cause {
                Some(cause) => format!("HTTP request failed: {cause}"),
                None => "HTTP request failed".to_string(),
            };
            return Self::GenericHttp(details(message, request, None, cause));
        };

        let status = response.status;
        match status {
            400 => Self::BadRequest(details("Bad request", request, Some(response), cause)),
            401 | 403 => {
                Self::Authentication(details("Authentication failed", request, Some(response), cause))
            }
            404 => {
                let (resource_type, identifier) = resource_from_uri(&request.uri);
                let message = format!("Resource not found: {resource_type} {identifier}");
                Self::NotFound {
                    details: details(message, request, Some(response), cause)
                        .with_context("resource_type", resource_type.clone())
                        .with_context("identifier", identifier.clone()),
                    resource_type,
                    identifier,
                }
            }
            422 => {
                let violations = parse_violations(&response.body);
                let message = validation_message(&violations);
                Self::Validation {
                    violations,
                    details: details(message, request, Some(response), cause),
                }
            }
            500 | 502 | 503 | 504 => {
                Self::Server(details("Server error", request, Some(response), cause))
            }
            _ => Self::GenericHttp(
                details(
                    format!("HTTP request failed with status {status}"),
                    request,
                    Some(response),
                    cause,
                )
                .with_context("status", status.to_string()),
            ),
        }
    }

    /// Classifies a non-success response.
    pub fn from_response(request: RequestInfo, status: u16, body: impl Into<String>) -> Self {
        Self::create(request, Some(ResponseInfo::new(status, body)), None)
    }

    /// Classifies a failure that produced no response.
    pub fn from_transport_failure(request: RequestInfo, cause: impl Into<BoxError>) -> Self {
        Self::create(request, None, Some(cause.into()))
    }

    /// The diagnostics common to every variant.
    pub fn details(&self) -> &ErrorDetails {
        match self {
            Self::BadRequest(d)
            | Self::Authentication(d)
            | Self::Server(d)
            | Self::GenericHttp(d) => d,
            Self::NotFound { details, .. } | Self::Validation { details, .. } => details,
        }
    }

    /// The HTTP status, `None` when no response was received.
    pub fn status(&self) -> Option<u16> {
        self.details().response().map(|r| r.status)
    }

    /// The violation map of a [`ApiError::Validation`].
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            Self::Validation { violations, .. } => Some(violations),
            _ => None,
        }
    }
}

fn details(
    message: impl Into<String>,
    request: RequestInfo,
    response: Option<ResponseInfo>,
    cause: Option<BoxError>,
) -> ErrorDetails {
    ErrorDetails {
        message: message.into(),
        request: Some(request),
        response,
        cause,
        context: BTreeMap::new(),
    }
}

/// Best-effort `(type, identifier)` from the last two path segments.
fn resource_from_uri(uri: &str) -> (String, String) {
    let mut segments = path_segments(uri).into_iter().rev();
    match (segments.next(), segments.next()) {
        (Some(identifier), Some(resource_type)) => (resource_type, identifier),
        _ => ("unknown".to_string(), "unknown".to_string()),
    }
}

fn validation_message(violations: &Violations) -> String {
    if violations.is_empty() {
        return "Validation failed".to_string();
    }
    let summary = violations
        .iter()
        .map(|(field, messages)| format!("{field}: {}", messages.join(", ")))
        .collect::<Vec<_>>()
        .join("; ");
    format!("Validation failed: {summary}")
}

/// Extracts the violation map from a 422 body.
///
/// Accepts the map form `{"violations": {"field": ["msg"]}}` and the
/// API Platform list form `{"violations": [{"propertyPath": "field",
/// "message": "msg"}]}`. A body that cannot be read yields an empty map.
pub fn parse_violations(body: &str) -> Violations {
    let mut violations = Violations::new();

    let json: Value = match serde_json::from_str(body) {
        Ok(json) => json,
        Err(e) => {
            warn!("Ignoring unreadable validation body: {}", e);
            return violations;
        }
    };

    match json.get("violations") {
        Some(Value::Object(map)) => {
            for (field, messages) in map {
                let entry = violations.entry(field.clone()).or_default();
                match messages {
                    Value::String(message) => entry.push(message.clone()),
                    Value::Array(items) => entry.extend(
                        items.iter().filter_map(Value::as_str).map(str::to_string),
                    ),
                    other => warn!("Ignoring violation for '{}' of unexpected shape: {}", field, other),
                }
            }
        }
        Some(Value::Array(items)) => {
            for item in items {
                let field = item.get("propertyPath").and_then(Value::as_str);
                let message = item.get("message").and_then(Value::as_str);
                match (field, message) {
                    (Some(field), Some(message)) => violations
                        .entry(field.to_string())
                        .or_default()
                        .push(message.to_string()),
                    _ => warn!("Ignoring malformed violation entry: {}", item),
                }
            }
        }
        Some(other) => warn!("Ignoring violations of unexpected shape: {}", other),
        None => {}
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> RequestInfo {
        RequestInfo::new("GET", "https://api.example.com/stores/1/brands/42")
    }

    fn classify(status: u16) -> ApiError {
        ApiError::from_response(request(), status, "")
    }

    #[test]
    fn test_classification_table() {
        assert!(matches!(classify(400), ApiError::BadRequest(_)));
        assert!(matches!(classify(401), ApiError::Authentication(_)));
        assert!(matches!(classify(403), ApiError::Authentication(_)));
        assert!(matches!(classify(404), ApiError::NotFound { .. }));
        assert!(matches!(classify(422), ApiError::Validation { .. }));
        for status in [500, 502, 503, 504] {
            assert!(matches!(classify(status), ApiError::Server(_)));
        }
        assert!(matches!(classify(418), ApiError::GenericHttp(_)));
        assert!(matches!(classify(501), ApiError::GenericHttp(_)));

        let err = ApiError::create(request(), None, None);
        assert!(matches!(err, ApiError::GenericHttp(_)));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_authentication_keeps_status() {
        assert_eq!(classify(401).status(), Some(401));
        assert_eq!(classify(403).status(), Some(403));
        assert_eq!(classify(403).details().message(), "Authentication failed");
    }

    #[test]
    fn test_generic_includes_status() {
        let err = classify(418);
        assert_eq!(err.details().message(), "HTTP request failed with status 418");
        assert_eq!(err.details().context().get("status").map(String::as_str), Some("418"));
    }

    #[test]
    fn test_not_found_context() {
        match classify(404) {
            ApiError::NotFound {
                resource_type,
                identifier,
                details,
            } => {
                assert_eq!(resource_type, "brands");
                assert_eq!(identifier, "42");
                assert_eq!(details.message(), "Resource not found: brands 42");
            }
            other => panic!("unexpected {other:?}"),
        }

        let err = ApiError::from_response(RequestInfo::new("GET", "https://api.example.com/"), 404, "");
        assert_eq!(err.details().message(), "Resource not found: unknown unknown");
    }

    #[test]
    fn test_validation_map_form() {
        let err = ApiError::from_response(request(), 422, r#"{"violations": {"name": ["too short"]}}"#);
        let expected: Violations = [("name".to_string(), vec!["too short".to_string()])].into();
        assert_eq!(err.violations(), Some(&expected));
        assert!(err.to_string().contains("name: too short"));
    }

    #[test]
    fn test_validation_list_form() {
        let body = r#"{"violations": [
            {"propertyPath": "name", "message": "too short"},
            {"propertyPath": "name", "message": "not unique"},
            {"propertyPath": "code", "message": "required"}
        ]}"#;
        let err = ApiError::from_response(request(), 422, body);
        assert_eq!(
            err.details().message(),
            "Validation failed: code: required; name: too short, not unique"
        );
    }

    #[test]
    fn test_validation_tolerates_garbage() {
        let err = ApiError::from_response(request(), 422, "<html>oops</html>");
        assert_eq!(err.violations(), Some(&Violations::new()));
        assert_eq!(err.details().message(), "Validation failed");
    }

    #[test]
    fn test_display_includes_exchange() {
        let err = ApiError::from_response(request(), 500, "boom");
        assert_eq!(
            err.to_string(),
            "Server error [GET https://api.example.com/stores/1/brands/42] status=500 body=boom"
        );
    }

    #[test]
    fn test_not_found_renders_its_details() {
        let err = classify(404);
        assert_eq!(err.to_string(), err.details().to_string());
        assert!(std::error::Error::source(&err).is_none());
    }

    #[test]
    fn test_transport_failure_keeps_cause() {
        let cause = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = ApiError::from_transport_failure(request(), cause);
        assert!(matches!(err, ApiError::GenericHttp(_)));
        assert_eq!(err.details().message(), "HTTP request failed: refused");
        assert!(std::error::Error::source(&err).is_some());
    }
}
