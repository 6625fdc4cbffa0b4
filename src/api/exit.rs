use reqwest::StatusCode;
use serde::Serialize;

use crate::models::{ExitOutcome, ExitVerdict, ParkingSession};

pub const DEFAULT_MATCH_MESSAGE: &str = "Exit validated, confirm to close the session";
pub const DEFAULT_NOT_FOUND_MESSAGE: &str = "No entry record found for this card";
pub const DEFAULT_MISMATCH_MESSAGE: &str = "License plate does not match";

/// Body for `PUT /parking/logs/exit`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExitRequest<'a> {
    pub card_id: &'a str,
    pub exit_license_plate: &'a str,
    pub exit_image: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitFailure {
    NoEntry,
    PlateMismatch,
}

/// The exit endpoint's status codes carry domain meaning; nothing else does.
pub fn classify_exit_status(status: StatusCode) -> Option<ExitFailure> {
    match status {
        StatusCode::NOT_FOUND => Some(ExitFailure::NoEntry),
        StatusCode::BAD_REQUEST => Some(ExitFailure::PlateMismatch),
        _ => None,
    }
}

pub(crate) fn matched(
    mut session: Option<ParkingSession>,
    exit_plate: &str,
    exit_image: Option<&str>,
    message: Option<String>,
) -> ExitOutcome {
    if let Some(session) = session.as_mut() {
        if session.exit_image.is_none() {
            session.exit_image = exit_image.map(str::to_string);
        }
    }

    ExitOutcome {
        verdict: ExitVerdict::Matched,
        session,
        exit_plate: exit_plate.to_string(),
        exit_image: exit_image.map(str::to_string),
        message: message.unwrap_or_else(|| DEFAULT_MATCH_MESSAGE.to_string()),
    }
}

pub(crate) fn not_found(exit_plate: &str, exit_image: Option<&str>, detail: Option<&str>) -> ExitOutcome {
    ExitOutcome {
        verdict: ExitVerdict::NotFound,
        session: None,
        exit_plate: exit_plate.to_string(),
        exit_image: exit_image.map(str::to_string),
        message: detail.unwrap_or(DEFAULT_NOT_FOUND_MESSAGE).to_string(),
    }
}

pub(crate) fn mismatched(
    candidate: Option<ParkingSession>,
    exit_plate: &str,
    exit_image: Option<&str>,
    detail: Option<&str>,
) -> ExitOutcome {
    ExitOutcome {
        verdict: ExitVerdict::Mismatched,
        session: candidate,
        exit_plate: exit_plate.to_string(),
        exit_image: exit_image.map(str::to_string),
        message: detail.unwrap_or(DEFAULT_MISMATCH_MESSAGE).to_string(),
    }
}
