mod common;

use std::time::{Duration, Instant};

use chrono::{Duration as ChronoDuration, Utc};
use common::{api_error, fixture, session, session_entered_at};
use parkctl::error::ParkError;
use parkctl::models::{ExitOutcome, ExitVerdict, ParkingDuration, LICENSE_PLATE_MISMATCH};
use parkctl::workflow::exit::GENERIC_EXIT_ERROR;
use parkctl::workflow::{ExitForm, ExitPhase, ExitWorkflow, CONFIRMED_RESULT_TTL};

fn lane_with(card: &str, plate: &str, image: &str) -> ExitWorkflow {
    let mut lane = ExitWorkflow::new();
    *lane.form_mut() = ExitForm::new(card, plate, image);
    lane
}

fn matched(id: &str) -> ExitOutcome {
    ExitOutcome {
        verdict: ExitVerdict::Matched,
        session: Some(session(id, "59A1-2345", "CARD001")),
        exit_plate: "59A1-2345".to_string(),
        exit_image: None,
        message: "Exit validation successful - please confirm to delete log".to_string(),
    }
}

fn mismatched(candidate_id: Option<&str>) -> ExitOutcome {
    ExitOutcome {
        verdict: ExitVerdict::Mismatched,
        session: candidate_id.map(|id| session(id, "59A1-2345", "CARD001")),
        exit_plate: "59B9-9999".to_string(),
        exit_image: Some("http://cams.local/out.jpg".to_string()),
        message: "License plate mismatch. Expected: 59A1-2345, Got: 59B9-9999".to_string(),
    }
}

fn not_found() -> ExitOutcome {
    ExitOutcome {
        verdict: ExitVerdict::NotFound,
        session: None,
        exit_plate: "59A1-2345".to_string(),
        exit_image: None,
        message: "No active entry found for card CARD404".to_string(),
    }
}

#[tokio::test]
async fn test_submit_records_exit_time_and_uppercases_plate() {
    let (gateway, _refresh) = fixture();
    gateway.answer_exit(Ok(matched("log-1")));
    let mut lane = lane_with("CARD001", "59a1-2345", "");
    let now = Utc::now();

    lane.submit(&gateway, now).await.unwrap();

    assert_eq!(lane.exit_time(), Some(now));
    let calls = gateway.exit_calls.lock().unwrap().clone();
    assert_eq!(
        calls,
        vec![("CARD001".to_string(), "59A1-2345".to_string(), None)]
    );
    assert_eq!(lane.phase(), ExitPhase::ResultMatched);
    assert_eq!(lane.form(), &ExitForm::default());
}

#[tokio::test]
async fn test_matched_waits_for_confirmation() {
    let (gateway, refresh) = fixture();
    gateway.answer_exit(Ok(matched("log-1")));
    let mut lane = lane_with("CARD001", "59A1-2345", "");

    lane.submit(&gateway, Utc::now()).await.unwrap();
    assert_eq!(gateway.calls("remove"), 0);
    assert!(lane.can_confirm());
    assert!(!lane.can_force_exit());

    let receipt = lane
        .confirm(&gateway, &refresh, Instant::now())
        .await
        .unwrap();

    assert_eq!(receipt.message.as_deref(), Some("Log log-1 deleted successfully"));
    assert_eq!(
        gateway.events(),
        vec!["exit:CARD001", "remove:log-1", "refresh"]
    );
    assert_eq!(lane.phase(), ExitPhase::Confirmed);
    assert!(!lane.can_confirm());
}

#[tokio::test]
async fn test_failed_confirmation_keeps_result_and_skips_refresh() {
    let (gateway, refresh) = fixture();
    gateway.answer_exit(Ok(matched("log-1")));
    gateway.fail_next_remove(api_error(500, Some("database unavailable")));
    let mut lane = lane_with("CARD001", "59A1-2345", "");
    lane.submit(&gateway, Utc::now()).await.unwrap();

    let result = lane.confirm(&gateway, &refresh, Instant::now()).await;

    assert!(result.is_err());
    assert_eq!(
        lane.error(),
        Some("Failed to confirm exit: database unavailable")
    );
    assert_eq!(lane.phase(), ExitPhase::ResultMatched);
    assert_eq!(gateway.calls("refresh"), 0);

    // Operator retries from the same result.
    lane.confirm(&gateway, &refresh, Instant::now())
        .await
        .unwrap();
    assert_eq!(gateway.calls("remove:log-1"), 2);
    assert_eq!(gateway.calls("refresh"), 1);
}

#[tokio::test]
async fn test_confirmed_result_clears_after_delay() {
    let (gateway, refresh) = fixture();
    gateway.answer_exit(Ok(matched("log-1")));
    let mut lane = lane_with("CARD001", "59A1-2345", "");
    lane.submit(&gateway, Utc::now()).await.unwrap();
    let now = Instant::now();
    lane.confirm(&gateway, &refresh, now).await.unwrap();

    lane.tick(now + Duration::from_millis(500));
    assert_eq!(lane.phase(), ExitPhase::Confirmed);

    lane.tick(now + CONFIRMED_RESULT_TTL);
    assert_eq!(lane.phase(), ExitPhase::Idle);
    assert!(lane.outcome().is_none());
    assert!(lane.exit_time().is_none());
}

#[tokio::test]
async fn test_mismatch_shows_both_plates_and_allows_force() {
    let (gateway, refresh) = fixture();
    gateway.answer_exit(Ok(mismatched(Some("log-9"))));
    let mut lane = lane_with("CARD001", "59B9-9999", "http://cams.local/out.jpg");

    let outcome = lane.submit(&gateway, Utc::now()).await.unwrap();

    assert_eq!(outcome.code(), Some(LICENSE_PLATE_MISMATCH));
    assert_eq!(
        outcome.plate_details(),
        Some(("59A1-2345".to_string(), "59B9-9999".to_string()))
    );
    assert_eq!(lane.phase(), ExitPhase::ResultMismatched);
    assert_eq!(lane.error(), Some(outcome.message.as_str()));
    assert!(!lane.can_confirm());
    assert!(lane.can_force_exit());
    // Form is kept so the operator can correct it.
    assert_eq!(lane.form().card_id, "CARD001");

    lane.force_exit(&gateway, &refresh, Instant::now())
        .await
        .unwrap();

    // The id comes from the attached candidate, with no fresh lookup.
    assert_eq!(
        gateway.events(),
        vec!["exit:CARD001", "remove:log-9", "refresh"]
    );
}

#[tokio::test]
async fn test_confirm_rejected_for_mismatch() {
    let (gateway, refresh) = fixture();
    gateway.answer_exit(Ok(mismatched(Some("log-9"))));
    let mut lane = lane_with("CARD001", "59B9-9999", "");
    lane.submit(&gateway, Utc::now()).await.unwrap();

    let result = lane.confirm(&gateway, &refresh, Instant::now()).await;

    assert!(matches!(result, Err(ParkError::Validation(_))));
    assert_eq!(gateway.calls("remove"), 0);
}

#[tokio::test]
async fn test_mismatch_without_candidate_cannot_be_forced() {
    let (gateway, refresh) = fixture();
    gateway.answer_exit(Ok(mismatched(None)));
    let mut lane = lane_with("CARD001", "59B9-9999", "");
    lane.submit(&gateway, Utc::now()).await.unwrap();

    assert!(!lane.can_force_exit());
    let result = lane.force_exit(&gateway, &refresh, Instant::now()).await;

    assert!(matches!(result, Err(ParkError::Validation(_))));
    assert_eq!(gateway.calls("remove"), 0);
}

#[tokio::test]
async fn test_not_found_offers_no_action() {
    let (gateway, refresh) = fixture();
    gateway.answer_exit(Ok(not_found()));
    let mut lane = lane_with("CARD404", "59A1-2345", "");

    lane.submit(&gateway, Utc::now()).await.unwrap();

    assert_eq!(lane.phase(), ExitPhase::ResultNotFound);
    assert_eq!(lane.error(), Some("No active entry found for card CARD404"));
    assert!(!lane.can_confirm());
    assert!(!lane.can_force_exit());
    assert!(lane.confirm(&gateway, &refresh, Instant::now()).await.is_err());
    assert!(lane.force_exit(&gateway, &refresh, Instant::now()).await.is_err());
    assert_eq!(gateway.calls("remove"), 0);
}

#[tokio::test]
async fn test_transport_error_surfaces_generic_message() {
    let (gateway, _refresh) = fixture();
    gateway.answer_exit(Err(api_error(503, None)));
    let mut lane = lane_with("CARD001", "59A1-2345", "");

    let result = lane.submit(&gateway, Utc::now()).await;

    assert!(result.is_err());
    assert_eq!(lane.error(), Some(GENERIC_EXIT_ERROR));
    assert!(lane.outcome().is_none());
    assert_eq!(lane.phase(), ExitPhase::Idle);
}

#[tokio::test]
async fn test_blank_card_blocks_submission() {
    let (gateway, _refresh) = fixture();
    let mut lane = lane_with("", "59A1-2345", "");

    let result = lane.submit(&gateway, Utc::now()).await;

    assert!(matches!(result, Err(ParkError::Validation(_))));
    assert!(gateway.events().is_empty());
    assert!(lane.exit_time().is_none());
}

#[tokio::test]
async fn test_duration_prefers_backend_value() {
    let (gateway, _refresh) = fixture();
    let mut outcome = matched("log-1");
    if let Some(session) = outcome.session.as_mut() {
        session.parking_duration = Some(ParkingDuration {
            formatted: "3h 5m".to_string(),
            minutes: 185,
        });
    }
    gateway.answer_exit(Ok(outcome));
    let mut lane = lane_with("CARD001", "59A1-2345", "");
    lane.submit(&gateway, Utc::now()).await.unwrap();

    assert_eq!(lane.duration_text(), "3h 5m");
}

#[tokio::test]
async fn test_duration_computed_from_exit_time() {
    let (gateway, _refresh) = fixture();
    let now = Utc::now();
    let mut outcome = matched("log-1");
    outcome.session = Some(session_entered_at(
        "log-1",
        "59A1-2345",
        "CARD001",
        now - ChronoDuration::minutes(75),
    ));
    gateway.answer_exit(Ok(outcome));
    let mut lane = lane_with("CARD001", "59A1-2345", "");
    lane.submit(&gateway, now).await.unwrap();

    assert_eq!(lane.duration_text(), "1h 15m");
}
