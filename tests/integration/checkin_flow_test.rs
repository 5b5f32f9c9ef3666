//! End-to-end tests for the check-in orchestrator.

mod helpers;

use std::sync::Arc;
use std::time::Duration;

use checkin_core::events::CheckInEvent;
use checkin_core::types::{EmployeeId, ShiftId};
use checkin_flow::{CheckInFlow, Phase};
use checkin_geo::GeoPoint;
use checkin_location::StaticProvider;
use checkin_token::TokenCodec;

use helpers::{GatedProvider, QueueProvider, RecordingSubmitter, office_fix, test_config};

fn valid_payload(shift: &str) -> String {
    TokenCodec::new(&test_config().token)
        .encode(&ShiftId::new(shift))
        .expect("encode")
}

#[tokio::test]
async fn test_full_check_in_from_the_office() {
    let config = test_config();
    let submitter = Arc::new(RecordingSubmitter::accepting());
    let flow = CheckInFlow::new(
        &config,
        Arc::new(StaticProvider::new(office_fix())),
        submitter.clone(),
        EmployeeId::new(),
    );
    let mut events = flow.subscribe();

    let phase = flow.start().await.expect("start");
    match &phase {
        Phase::AwaitingScan { verdict } => {
            assert!(verdict.within_radius);
            assert_eq!(verdict.distance_meters, 0.0);
        }
        other => panic!("expected awaiting_scan, got {}", other.name()),
    }

    let payload = valid_payload("shift-morning");
    let phase = flow.scan(&payload).expect("scan");
    assert!(matches!(phase, Phase::TokenAccepted { .. }));

    let phase = flow.confirm().await.expect("confirm");
    assert!(matches!(phase, Phase::Success { .. }));

    // The API received exactly the payload and fix that passed the gates.
    let requests = submitter.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].scanned_payload, payload);
    assert_eq!(requests[0].location, office_fix());

    // Events arrived in gate order.
    assert!(matches!(
        events.try_recv(),
        Ok(CheckInEvent::AttemptStarted { .. })
    ));
    assert!(matches!(
        events.try_recv(),
        Ok(CheckInEvent::LocationVerified { .. })
    ));
    assert!(matches!(
        events.try_recv(),
        Ok(CheckInEvent::TokenAccepted { .. })
    ));
    assert!(matches!(
        events.try_recv(),
        Ok(CheckInEvent::Submitted { .. })
    ));
}

#[tokio::test]
async fn test_fix_33_meters_away_is_rejected_with_distance() {
    let config = test_config();
    // 0.0003 degrees of latitude north of the office, about 33 m.
    let away = GeoPoint::new(4.1028, 9.3908, 5.0);
    let flow = CheckInFlow::new(
        &config,
        Arc::new(QueueProvider::new([away], office_fix())),
        Arc::new(RecordingSubmitter::accepting()),
        EmployeeId::new(),
    );

    let phase = flow.start().await.expect("start");
    match phase {
        Phase::LocationRejected { reason, verdict } => {
            let verdict = verdict.expect("distance was computed");
            assert!((verdict.distance_meters - 33.0).abs() < 1.0);
            assert_eq!(verdict.max_allowed_meters, 20.0);
            assert!(reason.contains("33 m"), "reason was: {reason}");
        }
        other => panic!("expected location_rejected, got {}", other.name()),
    }

    // Scanning is not active after a rejection.
    assert!(flow.scan("{}").is_err());

    // A retry after moving inside the fence restarts acquisition fully.
    let phase = flow.start().await.expect("retry");
    assert!(matches!(phase, Phase::AwaitingScan { .. }));
}

#[tokio::test]
async fn test_six_minute_old_code_is_rejected() {
    let config = test_config();
    let flow = CheckInFlow::new(
        &config,
        Arc::new(StaticProvider::new(office_fix())),
        Arc::new(RecordingSubmitter::accepting()),
        EmployeeId::new(),
    );

    flow.start().await.expect("start");

    let codec = TokenCodec::new(&config.token);
    let stale = codec
        .encode_at(
            &ShiftId::new("shift-morning"),
            chrono::Utc::now().timestamp_millis() - 6 * 60 * 1000,
        )
        .expect("encode");

    let phase = flow.scan(&stale).expect("scan");
    match &phase {
        Phase::TokenRejected { reason } => {
            assert!(reason.contains("expired"), "reason was: {reason}");
        }
        other => panic!("expected token_rejected, got {}", other.name()),
    }

    // Submission is unreachable without an accepted token.
    assert!(flow.confirm().await.is_err());
}

#[tokio::test]
async fn test_cancel_mid_acquisition_discards_late_fix() {
    let config = test_config();
    let (provider, gate) = GatedProvider::new(office_fix());
    let flow = Arc::new(CheckInFlow::new(
        &config,
        Arc::new(provider),
        Arc::new(RecordingSubmitter::accepting()),
        EmployeeId::new(),
    ));
    let mut events = flow.subscribe();

    let running = tokio::spawn({
        let flow = Arc::clone(&flow);
        async move { flow.start().await }
    });

    // Let the attempt reach the pending acquisition.
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(flow.phase(), Phase::LocationPending);

    // Cancel takes effect synchronously.
    let phase = flow.cancel();
    assert_eq!(phase, Phase::Idle);

    // Release the provider; the late fix must be discarded.
    gate.notify_one();
    let settled = running.await.expect("join").expect("start");
    assert_eq!(settled, Phase::Idle);
    assert_eq!(flow.phase(), Phase::Idle);

    // No verification outcome was ever reported.
    assert!(matches!(
        events.try_recv(),
        Ok(CheckInEvent::AttemptStarted { .. })
    ));
    assert!(matches!(
        events.try_recv(),
        Ok(CheckInEvent::Cancelled { .. })
    ));
    assert!(events.try_recv().is_err());

    // A scan against the cancelled attempt fails closed.
    assert!(flow.scan(&valid_payload("shift-morning")).is_err());
}

#[tokio::test]
async fn test_server_rejection_surfaces_message_and_requires_fresh_attempt() {
    let config = test_config();
    let flow = CheckInFlow::new(
        &config,
        Arc::new(StaticProvider::new(office_fix())),
        Arc::new(RecordingSubmitter::rejecting("Already checked in for this shift")),
        EmployeeId::new(),
    );

    flow.start().await.expect("start");
    flow.scan(&valid_payload("shift-morning")).expect("scan");

    let phase = flow.confirm().await.expect("confirm");
    match &phase {
        Phase::SubmitFailed { reason } => {
            assert_eq!(reason, "Already checked in for this shift");
        }
        other => panic!("expected submit_failed, got {}", other.name()),
    }

    // Terminal: no partial resume, only reset then a full restart.
    assert!(flow.scan(&valid_payload("shift-morning")).is_err());
    assert_eq!(flow.reset().expect("reset"), Phase::Idle);
    let phase = flow.start().await.expect("restart");
    assert!(matches!(phase, Phase::AwaitingScan { .. }));
}

#[tokio::test(start_paused = true)]
async fn test_submission_deadline_maps_to_submit_failed() {
    let config = test_config();
    let submitter =
        Arc::new(RecordingSubmitter::accepting().with_delay(Duration::from_secs(120)));
    let flow = CheckInFlow::new(
        &config,
        Arc::new(StaticProvider::new(office_fix())),
        submitter,
        EmployeeId::new(),
    );

    flow.start().await.expect("start");
    flow.scan(&valid_payload("shift-morning")).expect("scan");

    let phase = flow.confirm().await.expect("confirm");
    match &phase {
        Phase::SubmitFailed { reason } => {
            assert!(reason.contains("timed out"), "reason was: {reason}");
        }
        other => panic!("expected submit_failed, got {}", other.name()),
    }
}
