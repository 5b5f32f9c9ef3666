//! The check-in attempt state machine.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::broadcast;

use checkin_core::config::AppConfig;
use checkin_core::error::AppError;
use checkin_core::events::CheckInEvent;
use checkin_core::types::{AttemptId, EmployeeId};
use checkin_geo::{GeofenceEvaluator, GeoPoint, format_distance};
use checkin_location::{LocationAcquirer, LocationOptions, LocationProvider};
use checkin_token::TokenCodec;

use crate::scanner::QrScanner;
use crate::state::Phase;
use crate::submit::{CheckInRequest, CheckInSubmitter, SubmitError};

/// Buffered events per subscriber before lagging.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Mutable attempt state behind the flow's lock.
#[derive(Debug)]
struct Inner {
    /// Bumped by every start, cancel, and reset. A suspended operation
    /// records the generation it began under and discards its result if
    /// the counter moved while it was away.
    generation: u64,
    /// Identifier of the current attempt.
    attempt_id: AttemptId,
    /// Current phase.
    phase: Phase,
    /// Fix held for submission, present from verification onward.
    fix: Option<GeoPoint>,
    /// Raw payload held for submission, present from acceptance onward.
    scanned_payload: Option<String>,
}

/// Orchestrates check-in attempts.
///
/// One flow per user session; at most one attempt is in flight at a
/// time, and starting a new attempt discards any prior incomplete one.
/// Methods take `&self` so a host can cancel while an acquisition or
/// submission is suspended; `cancel` takes effect synchronously and any
/// late-arriving result is discarded.
#[derive(Debug)]
pub struct CheckInFlow {
    /// Geofence evaluator for the registered office.
    evaluator: GeofenceEvaluator,
    /// Location acquisition with timeout and cache policy.
    acquirer: LocationAcquirer,
    /// Attendance token codec.
    codec: TokenCodec,
    /// External attendance API boundary.
    submitter: Arc<dyn CheckInSubmitter>,
    /// Session identity, injected by the host.
    employee_id: EmployeeId,
    /// Deadline for one submission request.
    submit_timeout: Duration,
    /// Attempt state.
    inner: Mutex<Inner>,
    /// Event fan-out to host subscribers.
    events: broadcast::Sender<CheckInEvent>,
}

impl CheckInFlow {
    /// Creates a flow from configuration and the host's capability
    /// implementations.
    pub fn new(
        config: &AppConfig,
        provider: Arc<dyn LocationProvider>,
        submitter: Arc<dyn CheckInSubmitter>,
        employee_id: EmployeeId,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            evaluator: GeofenceEvaluator::new(&config.office),
            acquirer: LocationAcquirer::new(provider, LocationOptions::from(&config.location)),
            codec: TokenCodec::new(&config.token),
            submitter,
            employee_id,
            submit_timeout: Duration::from_millis(config.api.submit_timeout_ms),
            inner: Mutex::new(Inner {
                generation: 0,
                attempt_id: AttemptId::new(),
                phase: Phase::Idle,
                fix: None,
                scanned_payload: None,
            }),
            events,
        }
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        self.lock().phase.clone()
    }

    /// Returns the identifier of the current attempt.
    pub fn attempt_id(&self) -> AttemptId {
        self.lock().attempt_id
    }

    /// Subscribes to attempt events.
    pub fn subscribe(&self) -> broadcast::Receiver<CheckInEvent> {
        self.events.subscribe()
    }

    /// Starts a new attempt: acquires a location fix and evaluates it
    /// against the office geofence.
    ///
    /// Starting while a prior attempt is incomplete discards it. A
    /// retry after a location rejection forces a fresh fix; no stale
    /// cached reading is reused.
    pub async fn start(&self) -> Result<Phase, AppError> {
        let (attempt_id, generation) = {
            let mut inner = self.lock();
            if matches!(inner.phase, Phase::LocationRejected { .. }) {
                self.acquirer.invalidate_cache();
            }
            inner.generation += 1;
            inner.attempt_id = AttemptId::new();
            inner.phase = Phase::LocationPending;
            inner.fix = None;
            inner.scanned_payload = None;
            (inner.attempt_id, inner.generation)
        };

        tracing::info!(%attempt_id, "check-in attempt started");
        self.emit(CheckInEvent::AttemptStarted {
            attempt_id: attempt_id.into_uuid(),
        });

        let result = self.acquirer.acquire().await;

        let mut inner = self.lock();
        if inner.generation != generation {
            tracing::debug!(%attempt_id, "discarding stale location result");
            return Ok(inner.phase.clone());
        }

        match result {
            Ok(fix) => {
                let verdict = self.evaluator.evaluate(&fix);
                if verdict.within_radius {
                    tracing::info!(
                        %attempt_id,
                        distance_m = verdict.distance_meters,
                        "location verified, awaiting scan"
                    );
                    inner.fix = Some(fix);
                    inner.phase = Phase::AwaitingScan { verdict };
                    self.emit(CheckInEvent::LocationVerified {
                        attempt_id: attempt_id.into_uuid(),
                        distance_meters: verdict.distance_meters,
                    });
                } else {
                    let reason = format!(
                        "You are {} from the office; check-in requires being within {}.",
                        format_distance(verdict.distance_meters),
                        format_distance(verdict.max_allowed_meters),
                    );
                    tracing::info!(
                        %attempt_id,
                        distance_m = verdict.distance_meters,
                        max_m = verdict.max_allowed_meters,
                        "location outside geofence"
                    );
                    inner.phase = Phase::LocationRejected {
                        reason: reason.clone(),
                        verdict: Some(verdict),
                    };
                    self.emit(CheckInEvent::LocationRejected {
                        attempt_id: attempt_id.into_uuid(),
                        reason,
                        distance_meters: Some(verdict.distance_meters),
                        max_allowed_meters: verdict.max_allowed_meters,
                    });
                }
            }
            Err(err) => {
                let reason = err.to_string();
                tracing::warn!(%attempt_id, error = %err, "location acquisition failed");
                inner.phase = Phase::LocationRejected {
                    reason: reason.clone(),
                    verdict: None,
                };
                self.emit(CheckInEvent::LocationRejected {
                    attempt_id: attempt_id.into_uuid(),
                    reason,
                    distance_meters: None,
                    max_allowed_meters: self.evaluator.radius_meters(),
                });
            }
        }

        Ok(inner.phase.clone())
    }

    /// Feeds a scanned payload into the attempt.
    ///
    /// Only honored while scanning is active for the *current* attempt;
    /// a scan against a stale verification fails closed with an
    /// invalid-state error, forcing re-verification.
    pub fn scan(&self, payload: &str) -> Result<Phase, AppError> {
        let mut inner = self.lock();
        if !inner.phase.accepts_scan() {
            return Err(AppError::invalid_state(format!(
                "Cannot accept a scan while {}; verify location first",
                inner.phase.name()
            )));
        }
        let attempt_id = inner.attempt_id;

        match self.codec.decode(payload) {
            Ok(token) => {
                tracing::info!(%attempt_id, shift_id = %token.shift_id, "token accepted");
                inner.scanned_payload = Some(payload.to_string());
                self.emit(CheckInEvent::TokenAccepted {
                    attempt_id: attempt_id.into_uuid(),
                    shift_id: token.shift_id.clone(),
                });
                inner.phase = Phase::TokenAccepted { token };
            }
            Err(err) => {
                let reason = err.to_string();
                tracing::info!(%attempt_id, error = %err, "token rejected");
                inner.phase = Phase::TokenRejected {
                    reason: reason.clone(),
                };
                self.emit(CheckInEvent::TokenRejected {
                    attempt_id: attempt_id.into_uuid(),
                    reason,
                });
            }
        }

        Ok(inner.phase.clone())
    }

    /// Captures one symbol from a scanner and feeds it into the attempt.
    pub async fn scan_with(&self, scanner: &dyn QrScanner) -> Result<Phase, AppError> {
        {
            // Same gate as `scan`, checked before waking the camera.
            let inner = self.lock();
            if !inner.phase.accepts_scan() {
                return Err(AppError::invalid_state(format!(
                    "Cannot accept a scan while {}; verify location first",
                    inner.phase.name()
                )));
            }
        }
        let payload = scanner.capture().await?;
        self.scan(&payload)
    }

    /// Confirms the accepted token and submits the check-in record.
    pub async fn confirm(&self) -> Result<Phase, AppError> {
        let (attempt_id, generation, request, shift_id) = {
            let mut inner = self.lock();
            let Phase::TokenAccepted { token } = &inner.phase else {
                return Err(AppError::invalid_state(format!(
                    "Cannot submit while {}; scan a code first",
                    inner.phase.name()
                )));
            };
            let shift_id = token.shift_id.clone();
            let (Some(fix), Some(payload)) = (inner.fix, inner.scanned_payload.clone()) else {
                return Err(AppError::internal(
                    "Accepted attempt is missing its fix or payload",
                ));
            };
            inner.phase = Phase::Submitting;
            (
                inner.attempt_id,
                inner.generation,
                CheckInRequest {
                    employee_id: self.employee_id,
                    scanned_payload: payload,
                    location: fix,
                },
                shift_id,
            )
        };

        tracing::info!(%attempt_id, shift_id = %shift_id, "submitting check-in");

        let result = match tokio::time::timeout(
            self.submit_timeout,
            self.submitter.submit(&request),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(SubmitError::Timeout),
        };

        let mut inner = self.lock();
        if inner.generation != generation {
            tracing::debug!(%attempt_id, "discarding stale submission result");
            return Ok(inner.phase.clone());
        }

        match result {
            Ok(receipt) => {
                tracing::info!(%attempt_id, shift_id = %shift_id, "check-in acknowledged");
                inner.phase = Phase::Success { receipt };
                self.emit(CheckInEvent::Submitted {
                    attempt_id: attempt_id.into_uuid(),
                    shift_id,
                });
            }
            Err(err) => {
                let reason = err.to_string();
                tracing::warn!(%attempt_id, error = %err, "check-in submission failed");
                inner.phase = Phase::SubmitFailed {
                    reason: reason.clone(),
                };
                self.emit(CheckInEvent::SubmitFailed {
                    attempt_id: attempt_id.into_uuid(),
                    reason,
                });
            }
        }

        Ok(inner.phase.clone())
    }

    /// Cancels the attempt, returning to idle immediately.
    ///
    /// Effective synchronously even while an acquisition or submission
    /// is suspended; the late result is discarded when it arrives. A
    /// no-op in idle and terminal phases.
    pub fn cancel(&self) -> Phase {
        let mut inner = self.lock();
        if matches!(inner.phase, Phase::Idle) || inner.phase.is_terminal() {
            return inner.phase.clone();
        }
        let attempt_id = inner.attempt_id;
        tracing::info!(%attempt_id, phase = inner.phase.name(), "attempt cancelled");
        inner.generation += 1;
        inner.phase = Phase::Idle;
        inner.fix = None;
        inner.scanned_payload = None;
        self.emit(CheckInEvent::Cancelled {
            attempt_id: attempt_id.into_uuid(),
        });
        inner.phase.clone()
    }

    /// Returns a terminal attempt to idle so a fresh one can start.
    pub fn reset(&self) -> Result<Phase, AppError> {
        let mut inner = self.lock();
        if !inner.phase.is_terminal() {
            return Err(AppError::invalid_state(format!(
                "Cannot reset while {}; cancel instead",
                inner.phase.name()
            )));
        }
        inner.generation += 1;
        inner.phase = Phase::Idle;
        inner.fix = None;
        inner.scanned_payload = None;
        Ok(inner.phase.clone())
    }

    fn emit(&self, event: CheckInEvent) {
        // Nobody listening is fine.
        let _ = self.events.send(event);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("attempt state lock poisoned")
    }
}
