use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ParkingDuration {
    #[serde(default)]
    pub formatted: String,
    #[serde(default)]
    pub minutes: i64,
}

/// One vehicle's stay, as held by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingSession {
    #[serde(alias = "_id")]
    pub id: String,
    pub license_plate: String,
    pub card_id: String,
    #[serde(default, with = "super::timestamp")]
    pub entry_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub entry_image: Option<String>,
    #[serde(default, with = "super::timestamp")]
    pub exit_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub exit_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parking_duration: Option<ParkingDuration>,
}

impl ParkingSession {
    pub fn is_open(&self) -> bool {
        self.exit_time.is_none()
    }
}

/// Input for recording a vehicle entry.
///
/// `image` is the operator-facing name; the backend only knows `entryImage`.
#[derive(Debug, Clone, Default)]
pub struct NewSession {
    pub license_plate: String,
    pub card_id: String,
    pub image: Option<String>,
    pub entry_image: Option<String>,
}

impl NewSession {
    pub fn new(license_plate: impl Into<String>, card_id: impl Into<String>) -> Self {
        Self {
            license_plate: license_plate.into(),
            card_id: card_id.into(),
            ..Default::default()
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn into_payload(self) -> CreatePayload {
        let entry_image = self
            .image
            .filter(|s| !s.is_empty())
            .or(self.entry_image.filter(|s| !s.is_empty()));

        CreatePayload {
            license_plate: self.license_plate,
            card_id: self.card_id,
            entry_image,
        }
    }
}

/// Wire body for `POST /parking/logs`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePayload {
    pub license_plate: String,
    pub card_id: String,
    pub entry_image: Option<String>,
}

/// Partial update; only populated fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_plate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_image: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "super::timestamp::serialize"
    )]
    pub entry_time: Option<DateTime<Utc>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "super::timestamp::serialize"
    )]
    pub exit_time: Option<DateTime<Utc>>,
}

impl SessionUpdate {
    pub fn is_empty(&self) -> bool {
        self.license_plate.is_none()
            && self.card_id.is_none()
            && self.entry_image.is_none()
            && self.exit_image.is_none()
            && self.entry_time.is_none()
            && self.exit_time.is_none()
    }
}
