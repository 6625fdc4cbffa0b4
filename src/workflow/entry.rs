use std::time::Instant;

use super::{Notice, Refresh, SUCCESS_NOTICE_TTL};
use crate::api::ParkingGateway;
use crate::error::{ParkError, Result};
use crate::models::{NewSession, ParkingSession};

pub const GENERIC_ENTRY_ERROR: &str = "Failed to add vehicle";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryPhase {
    Idle,
    FormOpen,
    Submitting,
    Success,
    Error,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryForm {
    pub license_plate: String,
    pub card_id: String,
    pub image: String,
}

impl EntryForm {
    pub fn new(
        license_plate: impl Into<String>,
        card_id: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            license_plate: license_plate.into(),
            card_id: card_id.into(),
            image: image.into(),
        }
    }

    fn missing_field(&self) -> Option<&'static str> {
        if self.license_plate.trim().is_empty() {
            Some("License plate is required")
        } else if self.card_id.trim().is_empty() {
            Some("Card id is required")
        } else {
            None
        }
    }
}

/// Entry lane: records new sessions and tracks which one is highlighted.
#[derive(Debug, Default)]
pub struct EntryWorkflow {
    form_open: bool,
    submitting: bool,
    form: EntryForm,
    error: Option<String>,
    notice: Option<Notice>,
    selected: Option<ParkingSession>,
    last_latest: Option<ParkingSession>,
}

impl EntryWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> EntryPhase {
        if self.submitting {
            EntryPhase::Submitting
        } else if self.error.is_some() {
            EntryPhase::Error
        } else if self.notice.is_some() {
            EntryPhase::Success
        } else if self.form_open {
            EntryPhase::FormOpen
        } else {
            EntryPhase::Idle
        }
    }

    pub fn is_form_open(&self) -> bool {
        self.form_open
    }

    /// Visibility is independent of any submission in progress.
    pub fn toggle_form(&mut self) {
        self.form_open = !self.form_open;
    }

    pub fn form(&self) -> &EntryForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut EntryForm {
        &mut self.form
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn visible_notice(&self, now: Instant) -> Option<&str> {
        self.notice
            .as_ref()
            .filter(|n| !n.is_expired(now))
            .map(|n| n.text.as_str())
    }

    pub fn selected(&self) -> Option<&ParkingSession> {
        self.selected.as_ref()
    }

    /// What the detail panel shows: the selection, else the latest entry.
    pub fn displayed<'a>(
        &'a self,
        latest: Option<&'a ParkingSession>,
    ) -> Option<&'a ParkingSession> {
        self.selected.as_ref().or(latest)
    }

    pub fn tick(&mut self, now: Instant) {
        if self.notice.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.notice = None;
        }
    }

    /// Submit the form. Returns the created session on success.
    ///
    /// Failures are recorded in `error()` as well as returned; the form stays
    /// open so the operator can correct it.
    pub async fn submit<G, R>(
        &mut self,
        gateway: &G,
        refresh: &R,
        now: Instant,
    ) -> Result<ParkingSession>
    where
        G: ParkingGateway + ?Sized,
        R: Refresh + ?Sized,
    {
        self.error = None;
        self.notice = None;

        if let Some(missing) = self.form.missing_field() {
            self.error = Some(missing.to_string());
            return Err(ParkError::Validation(missing.to_string()));
        }

        let plate = self.form.license_plate.trim().to_uppercase();
        let mut request = NewSession::new(plate.clone(), self.form.card_id.trim());
        if !self.form.image.trim().is_empty() {
            request = request.with_image(self.form.image.trim());
        }

        self.submitting = true;
        let result = gateway.create(request).await;
        self.submitting = false;

        match result {
            Ok(created) => {
                self.notice = Some(Notice::new(
                    format!("Vehicle {} entered the lot", plate),
                    now,
                    SUCCESS_NOTICE_TTL,
                ));
                self.form = EntryForm::default();
                self.form_open = false;
                refresh.refresh().await;
                self.selected = Some(created.clone());
                Ok(created)
            }
            Err(err) => {
                self.error = Some(
                    err.backend_message()
                        .unwrap_or(GENERIC_ENTRY_ERROR)
                        .to_string(),
                );
                Err(err)
            }
        }
    }

    /// Highlight `entry` now, then replace it with the authoritative copy.
    ///
    /// A failed re-fetch keeps the highlighted copy.
    pub async fn select<G>(&mut self, gateway: &G, entry: ParkingSession)
    where
        G: ParkingGateway + ?Sized,
    {
        let id = entry.id.clone();
        self.selected = Some(entry);

        match gateway.get_by_id(&id).await {
            Ok(fresh) => self.selected = Some(fresh),
            Err(e) => tracing::warn!(error = %e, id, "Keeping stale selection"),
        }
    }

    /// Feed the parent's most recent entry. A changed value takes over the selection.
    pub fn observe_latest(&mut self, latest: Option<&ParkingSession>) {
        if self.last_latest.as_ref() == latest {
            return;
        }
        self.last_latest = latest.cloned();
        if let Some(latest) = latest {
            self.selected = Some(latest.clone());
        }
    }
}
