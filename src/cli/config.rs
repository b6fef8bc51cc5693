//
//  hydra-sdk
//  cli/config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Configuration commands
//!
//! Shows where the configuration lives, writes a starter file and checks
//! that the current file is complete.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use serde_json::json;

use crate::config::{config_exists, Config};

use super::GlobalOptions;

/// Manage client configuration
#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Show configuration file path
    Path,

    /// Write a configuration file with default values
    Init(InitArgs),

    /// Check that every required setting is present
    Validate,
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// API base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl ConfigCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ConfigSubcommand::Path => self.path(global),
            ConfigSubcommand::Init(args) => self.init(args, global),
            ConfigSubcommand::Validate => self.validate(global),
        }
    }

    fn path(&self, global: &GlobalOptions) -> Result<()> {
        let path = global.config_path()?;
        println!("{}", path.display());
        Ok(())
    }

    fn init(&self, args: &InitArgs, global: &GlobalOptions) -> Result<()> {
        let path = global.config_path()?;
        if config_exists(&path) && !args.force {
            bail!(
                "{} already exists. Use --force to overwrite it.",
                path.display()
            );
        }

        let mut config = Config::default();
        if let Some(base_url) = &args.base_url {
            config.api.base_url = base_url.clone();
        }
        config.save_to(&path)?;

        println!("{}", serde_json::to_string_pretty(&json!({ "written": path }))?);
        Ok(())
    }

    fn validate(&self, global: &GlobalOptions) -> Result<()> {
        let config = global.load_config()?;
        config.validate()?;
        println!("{}", serde_json::to_string_pretty(&json!({ "valid": true }))?);
        Ok(())
    }
}
