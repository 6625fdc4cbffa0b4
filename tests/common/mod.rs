#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use parkctl::api::ParkingGateway;
use parkctl::error::{ParkError, Result};
use parkctl::models::{
    ExitOutcome, ExitVerdict, LogPage, NewSession, ParkingDuration, ParkingSession,
    RemovalReceipt,
};
use parkctl::workflow::Refresh;

pub type EventLog = Arc<Mutex<Vec<String>>>;

pub fn session(id: &str, plate: &str, card: &str) -> ParkingSession {
    ParkingSession {
        id: id.to_string(),
        license_plate: plate.to_string(),
        card_id: card.to_string(),
        entry_time: Some(Utc::now() - Duration::minutes(42)),
        entry_image: Some(format!("http://cams.local/{}-in.jpg", id)),
        exit_time: None,
        exit_image: None,
        parking_duration: None,
    }
}

pub fn session_entered_at(id: &str, plate: &str, card: &str, at: DateTime<Utc>) -> ParkingSession {
    ParkingSession {
        entry_time: Some(at),
        ..session(id, plate, card)
    }
}

pub fn api_error(status: u16, message: Option<&str>) -> ParkError {
    ParkError::ApiError {
        status,
        message: message.map(str::to_string),
    }
}

/// In-memory gateway that records every call into a shared event log.
pub struct FakeGateway {
    pub events: EventLog,
    pub sessions: Mutex<Vec<ParkingSession>>,
    pub create_error: Mutex<Option<ParkError>>,
    pub get_error: Mutex<Option<ParkError>>,
    pub remove_errors: Mutex<Vec<ParkError>>,
    pub exit_result: Mutex<Option<Result<ExitOutcome>>>,
    pub created: Mutex<Vec<NewSession>>,
    pub exit_calls: Mutex<Vec<(String, String, Option<String>)>>,
    next_id: Mutex<u32>,
}

impl FakeGateway {
    pub fn new(events: EventLog) -> Self {
        Self {
            events,
            sessions: Mutex::new(Vec::new()),
            create_error: Mutex::new(None),
            get_error: Mutex::new(None),
            remove_errors: Mutex::new(Vec::new()),
            exit_result: Mutex::new(None),
            created: Mutex::new(Vec::new()),
            exit_calls: Mutex::new(Vec::new()),
            next_id: Mutex::new(1),
        }
    }

    pub fn with_sessions(self, sessions: Vec<ParkingSession>) -> Self {
        *self.sessions.lock().unwrap() = sessions;
        self
    }

    pub fn fail_create(&self, err: ParkError) {
        *self.create_error.lock().unwrap() = Some(err);
    }

    pub fn fail_get(&self, err: ParkError) {
        *self.get_error.lock().unwrap() = Some(err);
    }

    pub fn fail_next_remove(&self, err: ParkError) {
        self.remove_errors.lock().unwrap().push(err);
    }

    pub fn answer_exit(&self, result: Result<ExitOutcome>) {
        *self.exit_result.lock().unwrap() = Some(result);
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    pub fn calls(&self, prefix: &str) -> usize {
        self.events()
            .iter()
            .filter(|e| e.starts_with(prefix))
            .count()
    }

    fn record(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

#[async_trait]
impl ParkingGateway for FakeGateway {
    async fn get_by_id(&self, id: &str) -> Result<ParkingSession> {
        self.record(format!("get:{}", id));
        if let Some(err) = self.get_error.lock().unwrap().take() {
            return Err(err);
        }
        self.sessions
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| ParkError::NotFound(id.to_string()))
    }

    async fn create(&self, session: NewSession) -> Result<ParkingSession> {
        self.record(format!("create:{}", session.license_plate));
        self.created.lock().unwrap().push(session.clone());
        if let Some(err) = self.create_error.lock().unwrap().take() {
            return Err(err);
        }

        let mut next_id = self.next_id.lock().unwrap();
        let payload = session.into_payload();
        let created = ParkingSession {
            id: format!("log-{}", *next_id),
            license_plate: payload.license_plate,
            card_id: payload.card_id,
            entry_time: Some(Utc::now()),
            entry_image: payload.entry_image,
            exit_time: None,
            exit_image: None,
            parking_duration: None,
        };
        *next_id += 1;
        self.sessions.lock().unwrap().insert(0, created.clone());
        Ok(created)
    }

    async fn remove(&self, id: &str) -> Result<RemovalReceipt> {
        self.record(format!("remove:{}", id));
        let mut errors = self.remove_errors.lock().unwrap();
        if !errors.is_empty() {
            return Err(errors.remove(0));
        }
        self.sessions.lock().unwrap().retain(|s| s.id != id);
        Ok(RemovalReceipt {
            message: Some(format!("Log {} deleted successfully", id)),
            parking_duration: Some(ParkingDuration {
                formatted: "42m".to_string(),
                minutes: 42,
            }),
        })
    }

    async fn list_current(&self) -> Result<LogPage> {
        self.record("list_current".to_string());
        Ok(LogPage {
            parking_logs: self.sessions.lock().unwrap().clone(),
            pagination: None,
        })
    }

    async fn process_exit(
        &self,
        card_id: &str,
        exit_plate: &str,
        exit_image: Option<&str>,
    ) -> Result<ExitOutcome> {
        self.record(format!("exit:{}", card_id));
        self.exit_calls.lock().unwrap().push((
            card_id.to_string(),
            exit_plate.to_string(),
            exit_image.map(str::to_string),
        ));
        self.exit_result.lock().unwrap().take().unwrap_or_else(|| {
            Ok(ExitOutcome {
                verdict: ExitVerdict::NotFound,
                session: None,
                exit_plate: exit_plate.to_string(),
                exit_image: exit_image.map(str::to_string),
                message: format!("No active entry found for card {}", card_id),
            })
        })
    }
}

/// Refresh hook that appends `refresh` to the shared event log.
pub struct RecordingRefresh {
    pub events: EventLog,
}

#[async_trait]
impl Refresh for RecordingRefresh {
    async fn refresh(&self) {
        self.events.lock().unwrap().push("refresh".to_string());
    }
}

pub fn fixture() -> (FakeGateway, RecordingRefresh) {
    let events: EventLog = Arc::new(Mutex::new(Vec::new()));
    (
        FakeGateway::new(events.clone()),
        RecordingRefresh { events },
    )
}
