//! End-to-end check-in CLI command.
//!
//! Drives a full attempt through the orchestrator: a supplied device
//! fix stands in for the platform location capability and a supplied
//! (or freshly generated) payload stands in for the camera. Submission
//! goes to the real attendance API when a session token is given,
//! otherwise to a local simulator that accepts everything.

use std::sync::Arc;

use async_trait::async_trait;
use clap::Args;
use dialoguer::Confirm;

use checkin_core::config::AppConfig;
use checkin_core::error::AppError;
use checkin_core::types::{EmployeeId, ShiftId};
use checkin_flow::{
    CheckInFlow, CheckInReceipt, CheckInRequest, CheckInSubmitter, HttpCheckInSubmitter, Phase,
    QrScanner, StaticScanner, SubmitError,
};
use checkin_geo::GeoPoint;
use checkin_location::StaticProvider;
use checkin_token::TokenCodec;

/// Arguments for the checkin command
#[derive(Debug, Args)]
pub struct CheckinArgs {
    /// Device latitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,
    /// Device longitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lon: f64,
    /// Reported fix accuracy in meters
    #[arg(long, default_value = "10.0")]
    pub accuracy: f64,
    /// Scanned QR payload; generated for --shift-id when omitted
    #[arg(long)]
    pub payload: Option<String>,
    /// Shift to generate a fresh payload for when --payload is omitted
    #[arg(long, default_value = "shift-demo")]
    pub shift_id: String,
    /// Employee identifier (UUID); random when omitted
    #[arg(long)]
    pub employee: Option<EmployeeId>,
    /// Session token for the attendance API; simulate locally when omitted
    #[arg(long)]
    pub session_token: Option<String>,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Submitter that accepts everything without touching the network.
#[derive(Debug)]
struct SimulatedSubmitter;

#[async_trait]
impl CheckInSubmitter for SimulatedSubmitter {
    async fn submit(&self, request: &CheckInRequest) -> Result<CheckInReceipt, SubmitError> {
        tracing::info!(employee_id = %request.employee_id, "simulated check-in accepted");
        Ok(CheckInReceipt {
            message: "Checked in (simulated)".to_string(),
            checked_in_at_ms: Some(chrono::Utc::now().timestamp_millis()),
        })
    }
}

/// Execute the checkin command
pub async fn execute(args: &CheckinArgs, config: &AppConfig) -> Result<(), AppError> {
    let provider = Arc::new(StaticProvider::new(GeoPoint::new(
        args.lat,
        args.lon,
        args.accuracy,
    )));

    let submitter: Arc<dyn CheckInSubmitter> = match &args.session_token {
        Some(token) => Arc::new(HttpCheckInSubmitter::new(&config.api, token.clone())),
        None => Arc::new(SimulatedSubmitter),
    };

    let employee_id = args.employee.unwrap_or_default();
    let flow = CheckInFlow::new(config, provider, submitter, employee_id);

    let payload = match &args.payload {
        Some(p) => p.clone(),
        None => TokenCodec::new(&config.token).encode(&ShiftId::new(args.shift_id.clone()))?,
    };
    let scanner = StaticScanner::new(payload);

    println!("Verifying location...");
    let phase = flow.start().await?;
    match &phase {
        Phase::AwaitingScan { verdict } => {
            println!(
                "Location verified ({} from the office). Scanning...",
                checkin_geo::format_distance(verdict.distance_meters)
            );
        }
        Phase::LocationRejected { reason, .. } => {
            println!("{}", reason);
            return Ok(());
        }
        other => {
            return Err(AppError::internal(format!(
                "Unexpected phase after verification: {}",
                other.name()
            )));
        }
    }

    let phase = flow.scan_with(&scanner as &dyn QrScanner).await?;
    match &phase {
        Phase::TokenAccepted { token } => {
            println!("Token accepted for shift '{}'.", token.shift_id);
        }
        Phase::TokenRejected { reason } => {
            println!("{}", reason);
            return Ok(());
        }
        other => {
            return Err(AppError::internal(format!(
                "Unexpected phase after scan: {}",
                other.name()
            )));
        }
    }

    if !args.yes {
        let confirmed = Confirm::new()
            .with_prompt("Submit this check-in?")
            .default(true)
            .interact()
            .map_err(|e| AppError::internal(format!("Prompt failed: {e}")))?;
        if !confirmed {
            flow.cancel();
            println!("Cancelled.");
            return Ok(());
        }
    }

    match flow.confirm().await? {
        Phase::Success { receipt } => {
            println!("{}", receipt.message);
            Ok(())
        }
        Phase::SubmitFailed { reason } => Err(AppError::submission(reason)),
        other => Err(AppError::internal(format!(
            "Unexpected phase after submission: {}",
            other.name()
        ))),
    }
}
