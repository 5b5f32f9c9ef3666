//! Attendance token CLI commands.

use clap::{Args, Subcommand};

use checkin_core::config::AppConfig;
use checkin_core::error::AppError;
use checkin_core::types::ShiftId;
use checkin_token::{TokenCodec, TokenDecodeError};

/// Arguments for token commands
#[derive(Debug, Args)]
pub struct TokenArgs {
    /// Token subcommand
    #[command(subcommand)]
    pub command: TokenCommand,
}

/// Token subcommands
#[derive(Debug, Subcommand)]
pub enum TokenCommand {
    /// Generate a QR payload for a shift
    Generate {
        /// Shift identifier the code is for
        #[arg(short, long)]
        shift_id: String,
    },
    /// Verify a scanned QR payload
    Verify {
        /// The raw payload text
        payload: String,
    },
}

/// Execute token commands
pub fn execute(args: &TokenArgs, config: &AppConfig) -> Result<(), AppError> {
    let codec = TokenCodec::new(&config.token);

    match &args.command {
        TokenCommand::Generate { shift_id } => {
            let payload = codec.encode(&ShiftId::new(shift_id.clone()))?;
            println!("{}", payload);
            Ok(())
        }
        TokenCommand::Verify { payload } => match codec.decode(payload) {
            Ok(token) => {
                println!("Valid token for shift '{}'", token.shift_id);
                println!("Issued at:    {} (epoch ms)", token.issued_at_ms);
                println!("Location tag: {}", token.location_tag);
                Ok(())
            }
            Err(TokenDecodeError::Expired { age_ms }) => {
                println!("Rejected: QR code has expired ({} s old)", age_ms / 1000);
                Err(TokenDecodeError::Expired { age_ms }.into())
            }
            Err(err) => {
                println!("Rejected: {}", err);
                Err(err.into())
            }
        },
    }
}
