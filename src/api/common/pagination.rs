//
//  hydra-sdk
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pagination Types for Hydra Collections
//!
//! A Hydra collection carries one page of members plus the total count
//! across all pages and optional links to neighbouring pages. Pages are
//! requested with the 1-based `page` query parameter.
//!
//! # Notes
//!
//! - `total_items` counts every item across all pages, not just `members`
//! - `next_page` and `previous_page` are `None` at the collection boundaries
//! - Traversal is left to the caller

use serde::Serialize;

/// One page of a Hydra collection.
///
/// # Type Parameters
///
/// - `T` - The member type
///
/// # Fields
///
/// | Field | Wire key | Description |
/// |-------|----------|-------------|
/// | `context` | `@context` | Context IRI naming the member type |
/// | `iri` | `@id` | The collection IRI |
/// | `kind` | `@type` | `Collection` or `hydra:Collection` |
/// | `members` | `member` | Members on this page |
/// | `total_items` | `totalItems` | Item count across all pages |
/// | `view` | `view` | IRI of the current page view |
/// | `first_page` | `firstPage` | IRI of the first page |
/// | `last_page` | `lastPage` | IRI of the last page |
/// | `next_page` | `nextPage` | IRI of the next page |
/// | `previous_page` | `previousPage` | IRI of the previous page |
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionResponse<T> {
    #[serde(rename = "@context")]
    pub context: String,

    #[serde(rename = "@id")]
    pub iri: String,

    #[serde(rename = "@type")]
    pub kind: String,

    #[serde(rename = "member")]
    pub members: Vec<T>,

    pub total_items: u64,

    pub view: Option<String>,

    pub first_page: Option<String>,

    pub last_page: Option<String>,

    pub next_page: Option<String>,

    pub previous_page: Option<String>,
}

impl<T> CollectionResponse<T> {
    /// Checks if a next page is linked.
    pub fn has_next(&self) -> bool {
        self.next_page.is_some()
    }

    /// Checks if a previous page is linked.
    pub fn has_previous(&self) -> bool {
        self.previous_page.is_some()
    }

    /// Returns `true` when this page has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Maps every member, keeping the pagination metadata.
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> CollectionResponse<U> {
        CollectionResponse {
            context: self.context,
            iri: self.iri,
            kind: self.kind,
            members: self.members.into_iter().map(f).collect(),
            total_items: self.total_items,
            view: self.view,
            first_page: self.first_page,
            last_page: self.last_page,
            next_page: self.next_page,
            previous_page: self.previous_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(next: Option<&str>) -> CollectionResponse<u32> {
        CollectionResponse {
            context: "/contexts/Store".to_string(),
            iri: "/stores".to_string(),
            kind: "Collection".to_string(),
            members: vec![1, 2],
            total_items: 50,
            view: None,
            first_page: None,
            last_page: None,
            next_page: next.map(str::to_string),
            previous_page: None,
        }
    }

    #[test]
    fn test_has_next() {
        assert!(page(Some("/stores?page=2")).has_next());
        assert!(!page(None).has_next());
        assert!(!page(None).has_previous());
    }

    #[test]
    fn test_map_keeps_metadata() {
        let mapped = page(Some("/stores?page=2")).map(|n| n * 10);
        assert_eq!(mapped.members, vec![10, 20]);
        assert_eq!(mapped.total_items, 50);
        assert_eq!(mapped.next_page.as_deref(), Some("/stores?page=2"));
    }
}
