//
//  hydra-sdk
//  cli/token.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Token command
//!
//! Runs the client-credentials exchange (or reuses the cached token) and
//! reports when the token expires. The token itself is only printed with
//! `--show`.

use anyhow::Result;
use clap::Args;
use serde_json::json;

use super::GlobalOptions;

/// Obtain an access token and show when it expires
#[derive(Args, Debug)]
pub struct TokenCommand {
    /// Print the access token itself
    #[arg(long)]
    pub show: bool,
}

impl TokenCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = global.client()?;
        let tokens = client.token_handler();

        let token = tokens.access_token().await?;
        let expires_at = tokens.token_expiration(&token).await?;

        let mut result = json!({
            "token_type": "Bearer",
            "expires_at": expires_at.to_rfc3339(),
            "cache_key": tokens.access_token_key(),
        });
        if self.show {
            result["access_token"] = json!(token);
        }

        println!("{}", serde_json::to_string_pretty(&result)?);
        Ok(())
    }
}
