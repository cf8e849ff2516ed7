//! `flightdeck` - CLI for the flight record server
//!
//! This binary runs the HTTP server and offers a few commands for inspecting
//! its configuration.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::sync::Arc;

use clap::Parser;

use flightdeck::cli::{Cli, Command, ConfigCommand, ServeCommand};
use flightdeck::server::shutdown_signal;
use flightdeck::{init_logging, Config, MemoryRepository, Server};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    match cli.command {
        Command::Serve(serve_cmd) => handle_serve(&config, &serve_cmd).await,
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

async fn handle_serve(
    config: &Config,
    cmd: &ServeCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    let server_config = cmd.apply(config.server.clone());
    let repository = Arc::new(MemoryRepository::new());

    let server = Server::bind(&server_config, repository).await?;
    server.run(shutdown_signal()).await?;
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Server]");
                println!("  Listen address:     {}", config.server.addr());
                println!(
                    "  Request timeout:    {}s",
                    config.server.request_timeout_secs
                );
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_existing(path) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
