//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::config::ServerConfig;

/// Serve command arguments.
#[derive(Debug, Clone, Default, Args)]
pub struct ServeCommand {
    /// Address to listen on (overrides configuration)
    #[arg(long, value_name = "IP")]
    pub host: Option<IpAddr>,

    /// Port to listen on (overrides configuration)
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl ServeCommand {
    /// Apply command-line overrides on top of the loaded server configuration.
    #[must_use]
    pub fn apply(&self, mut server: ServerConfig) -> ServerConfig {
        if let Some(host) = self.host {
            server.host = host;
        }
        if let Some(port) = self.port {
            server.port = port;
        }
        server
    }
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}
