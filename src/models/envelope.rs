use serde::Deserialize;
use serde_json::Value;

use super::{ParkingDuration, ParkingSession};

/// Response wrapper used by every backend endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub pages: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogPage {
    #[serde(default)]
    pub parking_logs: Vec<ParkingSession>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// Confirmation returned when a session is closed.
#[derive(Debug, Clone, Default)]
pub struct RemovalReceipt {
    pub message: Option<String>,
    pub parking_duration: Option<ParkingDuration>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RemovalData {
    #[serde(default)]
    pub parking_duration: Option<ParkingDuration>,
}
