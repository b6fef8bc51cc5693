//
//  hydra-sdk
//  cli/resource.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Resource commands
//!
//! ## Examples
//!
//! ```bash
//! # Fetch one resource; the response type follows its @type
//! hydra get /stores/1/brands/42
//!
//! # List the second page of a store's categories
//! hydra list categories --scope /stores/1 --page 2
//!
//! # Delete a resource
//! hydra delete /stores/1/brands/42
//! ```

use anyhow::Result;
use clap::Args;
use serde_json::json;

use crate::api::resources::ResourceKind;

use super::GlobalOptions;

/// Fetch a resource by IRI
#[derive(Args, Debug)]
pub struct GetCommand {
    /// Resource IRI (e.g., /stores/1/brands/42)
    pub iri: String,
}

impl GetCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let resource = client.fetch(&self.iri).await?;
        println!("{}", serde_json::to_string_pretty(&resource)?);
        Ok(())
    }
}

/// List a resource collection
#[derive(Args, Debug)]
pub struct ListCommand {
    /// Resource type (e.g., stores, brands, inventory-locations)
    pub kind: ResourceKind,

    /// Store IRI for store-scoped types (defaults to `defaults.store`)
    #[arg(long, short = 's')]
    pub scope: Option<String>,

    /// Page number
    #[arg(long, short = 'p', value_parser = clap::value_parser!(u32).range(1..))]
    pub page: Option<u32>,
}

impl ListCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let path = client.collection_path(self.kind, self.scope.as_deref())?;
        let page = client.fetch_collection(&path, self.page).await?;
        println!("{}", serde_json::to_string_pretty(&page)?);
        Ok(())
    }
}

/// Delete a resource by IRI
#[derive(Args, Debug)]
pub struct DeleteCommand {
    /// Resource IRI
    pub iri: String,
}

impl DeleteCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        client.transport().delete(&self.iri).await?;
        let result = json!({ "deleted": self.iri });
        println!("{}", serde_json::to_string_pretty(&result)?);
        Ok(())
    }
}
