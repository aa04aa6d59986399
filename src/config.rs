//! Configuration and CLI argument handling

use std::path::PathBuf;
use clap::Parser;

use crate::{error::SettingsError, services::JsonFileStore};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "breaktime")]
#[command(about = "Work/break interval timer served over a local HTTP API")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Settings file (defaults to <config dir>/breaktime/settings.json)
    #[arg(short, long)]
    pub settings: Option<PathBuf>,

    /// Start a work phase as soon as the server is up
    #[arg(long)]
    pub start: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Settings store at the configured path, or the platform default
    pub fn settings_store(&self) -> Result<JsonFileStore, SettingsError> {
        match &self.settings {
            Some(path) => Ok(JsonFileStore::new(path)),
            None => JsonFileStore::in_config_dir(),
        }
    }
}
