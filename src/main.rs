//
//  hydra-sdk
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use hydra_sdk::api::ApiError;
use hydra_sdk::cli::{Cli, Commands};
use hydra_sdk::error::ConfigurationError;
use hydra_sdk::{exit_codes, Error};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.global.debug);

    // Execute command
    let result = run(cli).await;

    // Handle result and exit
    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_code(&e));
        }
    }
}

/// Initialize logging based on environment
fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("HYDRA_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn exit_code(err: &anyhow::Error) -> i32 {
    if let Some(err) = err.downcast_ref::<Error>() {
        exit_codes::for_error(err)
    } else if let Some(err) = err.downcast_ref::<ApiError>() {
        exit_codes::for_api_error(err)
    } else if err.downcast_ref::<ConfigurationError>().is_some() {
        exit_codes::USAGE
    } else {
        exit_codes::ERROR
    }
}

/// Main command dispatcher
async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Token(cmd) => cmd.run(&cli.global).await,
        Commands::Get(cmd) => cmd.run(&cli.global).await,
        Commands::List(cmd) => cmd.run(&cli.global).await,
        Commands::Delete(cmd) => cmd.run(&cli.global).await,
        Commands::Config(cmd) => cmd.run(&cli.global).await,
        Commands::Version => {
            println!("hydra version {}", hydra_sdk::VERSION);
            Ok(())
        }
    }
}
