//
//  hydra-sdk
//  util/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Utility Functions
//!
//! Small helpers for working with IRIs and request paths. IRIs returned by
//! the API are path-shaped (`/stores/12/brands/42`) and are resolved against
//! the configured base URL before a request is sent.

use url::{ParseError, Url};

/// Base that path-shaped IRIs are parsed against when only their path
/// matters.
const IRI_BASE: &str = "http://localhost/";

/// Parses an absolute URL or a path-shaped IRI.
fn parse_iri(iri: &str) -> Option<Url> {
    match Url::parse(iri) {
        Ok(url) => Some(url),
        Err(ParseError::RelativeUrlWithoutBase) => Url::parse(IRI_BASE).ok()?.join(iri).ok(),
        Err(_) => None,
    }
}

/// Returns the last non-empty path segment of an IRI or URL.
///
/// Query strings and fragments are ignored.
///
/// # Example
///
/// ```rust
/// use hydra_sdk::util::last_segment;
///
/// assert_eq!(last_segment("/contexts/Category").as_deref(), Some("Category"));
/// assert_eq!(last_segment("/stores/1/brands?page=2").as_deref(), Some("brands"));
/// assert_eq!(last_segment("/"), None);
/// ```
pub fn last_segment(iri: &str) -> Option<String> {
    path_segments(iri).pop()
}

/// Splits an IRI or URL into its non-empty path segments.
///
/// For absolute URLs the scheme and authority are skipped, so
/// `https://api.example.com/stores/1` yields `["stores", "1"]`. Segments
/// keep their percent-encoding.
pub fn path_segments(iri: &str) -> Vec<String> {
    let Some(url) = parse_iri(iri) else {
        return Vec::new();
    };
    url.path_segments()
        .map(|segments| {
            segments
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Returns `true` when the path is an absolute `http(s)` URL.
///
/// # Example
///
/// ```rust
/// use hydra_sdk::util::is_absolute_url;
///
/// assert!(is_absolute_url("HTTPS://cdn.example.com/logo.png"));
/// assert!(!is_absolute_url("/stores/1"));
/// ```
pub fn is_absolute_url(path: &str) -> bool {
    Url::parse(path.trim()).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}

/// Parses a base URL, making sure its path ends in `/` so that joined
/// paths nest under it.
///
/// # Errors
///
/// A base URL that cannot be parsed.
pub fn base_url(base: &str) -> Result<Url, ParseError> {
    let mut url = Url::parse(base.trim())?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Joins a request path onto a base URL.
///
/// Absolute URLs are returned unchanged. Other paths nest under the base
/// URL's path, whether or not they start with `/`.
///
/// # Errors
///
/// A path that cannot be resolved against the base.
///
/// # Example
///
/// ```rust
/// use hydra_sdk::util::{base_url, join_url};
///
/// let base = base_url("https://api.example.com/v1").unwrap();
/// assert_eq!(join_url(&base, "/stores/1").unwrap().as_str(), "https://api.example.com/v1/stores/1");
/// assert_eq!(join_url(&base, "stores").unwrap().as_str(), "https://api.example.com/v1/stores");
/// ```
pub fn join_url(base: &Url, path: &str) -> Result<Url, ParseError> {
    if is_absolute_url(path) {
        return Url::parse(path.trim());
    }
    base.join(path.trim_start_matches('/'))
}
