//! CLI command definitions and dispatch.

pub mod checkin;
pub mod distance;
pub mod token;

use clap::{Parser, Subcommand};

use checkin_core::config::AppConfig;
use checkin_core::error::AppError;

/// AutPayroll — geofenced QR attendance check-in
#[derive(Debug, Parser)]
#[command(name = "checkin", version, about, long_about = None)]
pub struct Cli {
    /// Environment name used to select the configuration overlay
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Evaluate a device fix against the office geofence
    Distance(distance::DistanceArgs),
    /// Generate or verify attendance QR payloads
    Token(token::TokenArgs),
    /// Run a check-in attempt end to end
    Checkin(checkin::CheckinArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Distance(args) => distance::execute(args, config),
            Commands::Token(args) => token::execute(args, config),
            Commands::Checkin(args) => checkin::execute(args, config).await,
        }
    }
}
