use std::time::Instant;

use chrono::{DateTime, Utc};

use super::{Refresh, CONFIRMED_RESULT_TTL};
use crate::api::ParkingGateway;
use crate::error::{ParkError, Result};
use crate::models::{ExitOutcome, ExitVerdict, RemovalReceipt};
use crate::ui::format::duration_between;

pub const GENERIC_EXIT_ERROR: &str = "Failed to process vehicle exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitPhase {
    Idle,
    Processing,
    ResultMatched,
    ResultMismatched,
    ResultNotFound,
    Confirming,
    Confirmed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExitForm {
    pub card_id: String,
    pub exit_license_plate: String,
    pub exit_image: String,
}

impl ExitForm {
    pub fn new(
        card_id: impl Into<String>,
        exit_license_plate: impl Into<String>,
        exit_image: impl Into<String>,
    ) -> Self {
        Self {
            card_id: card_id.into(),
            exit_license_plate: exit_license_plate.into(),
            exit_image: exit_image.into(),
        }
    }
}

/// Exit lane: checks a card against its entry, then closes the session only
/// once the operator confirms (or forces) it.
#[derive(Debug, Default)]
pub struct ExitWorkflow {
    form: ExitForm,
    processing: bool,
    deleting: bool,
    outcome: Option<ExitOutcome>,
    exit_time: Option<DateTime<Utc>>,
    error: Option<String>,
    confirmed: bool,
    clear_at: Option<Instant>,
}

impl ExitWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> ExitPhase {
        if self.processing {
            return ExitPhase::Processing;
        }
        if self.deleting {
            return ExitPhase::Confirming;
        }
        if self.confirmed {
            return ExitPhase::Confirmed;
        }
        match self.outcome.as_ref().map(|o| o.verdict) {
            Some(ExitVerdict::Matched) => ExitPhase::ResultMatched,
            Some(ExitVerdict::Mismatched) => ExitPhase::ResultMismatched,
            Some(ExitVerdict::NotFound) => ExitPhase::ResultNotFound,
            None => ExitPhase::Idle,
        }
    }

    pub fn form(&self) -> &ExitForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ExitForm {
        &mut self.form
    }

    pub fn outcome(&self) -> Option<&ExitOutcome> {
        self.outcome.as_ref()
    }

    /// Operator-facing exit time, taken when processing began.
    pub fn exit_time(&self) -> Option<DateTime<Utc>> {
        self.exit_time
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    pub fn can_confirm(&self) -> bool {
        !self.confirmed
            && self
                .outcome
                .as_ref()
                .is_some_and(|o| o.verdict == ExitVerdict::Matched && o.removable_id().is_some())
    }

    pub fn can_force_exit(&self) -> bool {
        !self.confirmed
            && self.outcome.as_ref().is_some_and(|o| {
                o.verdict == ExitVerdict::Mismatched && o.removable_id().is_some()
            })
    }

    /// Backend duration when it sent one, else entry time to the recorded exit time.
    pub fn duration_text(&self) -> String {
        let session = self.outcome.as_ref().and_then(|o| o.session.as_ref());
        if let Some(duration) = session.and_then(|s| s.parking_duration.as_ref()) {
            if !duration.formatted.is_empty() {
                return duration.formatted.clone();
            }
        }
        duration_between(session.and_then(|s| s.entry_time), self.exit_time)
    }

    pub fn tick(&mut self, now: Instant) {
        if self.clear_at.is_some_and(|at| now >= at) {
            self.outcome = None;
            self.exit_time = None;
            self.confirmed = false;
            self.clear_at = None;
        }
    }

    pub async fn submit<G>(&mut self, gateway: &G, now: DateTime<Utc>) -> Result<ExitOutcome>
    where
        G: ParkingGateway + ?Sized,
    {
        self.error = None;
        self.outcome = None;
        self.confirmed = false;
        self.clear_at = None;

        let card_id = self.form.card_id.trim().to_string();
        let plate = self.form.exit_license_plate.trim().to_uppercase();
        if card_id.is_empty() || plate.is_empty() {
            let message = "Card id and exit license plate are required";
            self.error = Some(message.to_string());
            return Err(ParkError::Validation(message.to_string()));
        }
        let image = Some(self.form.exit_image.trim().to_string()).filter(|s| !s.is_empty());

        self.exit_time = Some(now);
        self.processing = true;
        let result = gateway
            .process_exit(&card_id, &plate, image.as_deref())
            .await;
        self.processing = false;

        match result {
            Ok(outcome) => {
                if outcome.is_success() {
                    self.form = ExitForm::default();
                } else {
                    self.error = Some(outcome.message.clone());
                }
                self.outcome = Some(outcome.clone());
                Ok(outcome)
            }
            Err(err) => {
                self.error = Some(err.backend_message().unwrap_or(GENERIC_EXIT_ERROR).to_string());
                Err(err)
            }
        }
    }

    /// Close the session of a matched outcome.
    pub async fn confirm<G, R>(
        &mut self,
        gateway: &G,
        refresh: &R,
        now: Instant,
    ) -> Result<RemovalReceipt>
    where
        G: ParkingGateway + ?Sized,
        R: Refresh + ?Sized,
    {
        if !self.can_confirm() {
            return Err(ParkError::Validation(
                "There is no matched exit to confirm".to_string(),
            ));
        }
        self.finalize(gateway, refresh, now).await
    }

    /// Close the candidate session despite a plate mismatch.
    pub async fn force_exit<G, R>(
        &mut self,
        gateway: &G,
        refresh: &R,
        now: Instant,
    ) -> Result<RemovalReceipt>
    where
        G: ParkingGateway + ?Sized,
        R: Refresh + ?Sized,
    {
        if !self.can_force_exit() {
            return Err(ParkError::Validation(
                "There is no mismatched session to force out".to_string(),
            ));
        }
        self.finalize(gateway, refresh, now).await
    }

    async fn finalize<G, R>(
        &mut self,
        gateway: &G,
        refresh: &R,
        now: Instant,
    ) -> Result<RemovalReceipt>
    where
        G: ParkingGateway + ?Sized,
        R: Refresh + ?Sized,
    {
        let id = match self.outcome.as_ref().and_then(|o| o.removable_id()) {
            Some(id) => id.to_string(),
            None => {
                return Err(ParkError::Validation(
                    "Exit result has no session to close".to_string(),
                ))
            }
        };

        self.error = None;
        self.deleting = true;
        let result = gateway.remove(&id).await;
        self.deleting = false;

        match result {
            Ok(receipt) => {
                self.confirmed = true;
                refresh.refresh().await;
                self.clear_at = Some(now + CONFIRMED_RESULT_TTL);
                Ok(receipt)
            }
            Err(err) => {
                let detail = err
                    .backend_message()
                    .map(str::to_string)
                    .unwrap_or_else(|| err.to_string());
                self.error = Some(format!("Failed to confirm exit: {}", detail));
                Err(err)
            }
        }
    }
}
