use chrono::{DateTime, Days, Local, TimeZone, Utc};
use serde::Serialize;

/// Query parameters for `GET /parking/logs`. Unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_plate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl LogFilter {
    pub fn by_card_id(card_id: impl Into<String>) -> Self {
        Self {
            card_id: Some(card_id.into()),
            ..Default::default()
        }
    }

    pub fn by_license_plate(license_plate: impl Into<String>) -> Self {
        Self {
            license_plate: Some(license_plate.into()),
            ..Default::default()
        }
    }

    pub fn date_range(start: Option<String>, end: Option<String>) -> Self {
        Self {
            start_date: start,
            end_date: end,
            ..Default::default()
        }
    }

    /// Local midnight of `now`'s day up to the following local midnight.
    pub fn today(now: DateTime<Local>) -> Self {
        let midnight = now.date_naive().and_hms_opt(0, 0, 0).unwrap_or_default();
        let start = Local
            .from_local_datetime(&midnight)
            .earliest()
            .unwrap_or(now);
        let end = start.checked_add_days(Days::new(1)).unwrap_or(start);

        Self::date_range(
            Some(start.with_timezone(&Utc).to_rfc3339()),
            Some(end.with_timezone(&Utc).to_rfc3339()),
        )
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
