//
//  hydra-sdk
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod config;
mod resource;
mod token;

pub use config::ConfigCommand;
pub use resource::{DeleteCommand, GetCommand, ListCommand};
pub use token::TokenCommand;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use crate::api::HydraClient;
use crate::auth::{KeyringCache, MemoryCache, TokenCache};
use crate::config::Config;

/// Hydra CLI - Inspect a Hydra API from the command line
#[derive(Parser, Debug)]
#[command(
    name = "hydra",
    version,
    about = "Inspect a Hydra API from the command line",
    long_about = "hydra is a debugging companion for the hydra-sdk client library.\n\n\
                  It fetches, lists and deletes resources and prints the mapped result as JSON.",
    propagate_version = true,
    after_help = "Use 'hydra <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true, env = "HYDRA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Cache tokens in the system keyring instead of in memory
    #[arg(long, global = true, env = "HYDRA_KEYRING")]
    pub keyring: bool,

    /// Log requests and response bodies
    #[arg(long, global = true, env = "HYDRA_DEBUG")]
    pub debug: bool,
}

impl GlobalOptions {
    /// Path of the configuration file in use.
    pub fn config_path(&self) -> Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Ok(Config::config_path()?),
        }
    }

    /// Loads the configuration, applying command-line overrides.
    pub fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_path(path)
                .with_context(|| format!("Failed to load {}", path.display()))?,
            None => Config::load()?,
        };
        if self.debug {
            config.api.debug = true;
        }
        Ok(config)
    }

    /// The token cache selected on the command line.
    pub fn token_cache(&self) -> Arc<dyn TokenCache> {
        if self.keyring {
            debug!("Using keyring token cache");
            Arc::new(KeyringCache::new())
        } else {
            Arc::new(MemoryCache::new())
        }
    }

    /// Builds a client from the loaded configuration.
    pub fn client(&self) -> Result<HydraClient> {
        let config = self.load_config()?;
        Ok(HydraClient::from_config(&config, self.token_cache())?)
    }
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Obtain an access token and show when it expires
    Token(TokenCommand),

    /// Fetch a resource by IRI
    Get(GetCommand),

    /// List a resource collection
    #[command(visible_alias = "ls")]
    List(ListCommand),

    /// Delete a resource by IRI
    #[command(visible_alias = "rm")]
    Delete(DeleteCommand),

    /// Manage client configuration
    Config(ConfigCommand),

    /// Print version information
    Version,
}
