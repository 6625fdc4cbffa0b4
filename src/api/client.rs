use chrono::{Local, Utc};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::api::exit::{self, classify_exit_status, ExitFailure, ExitRequest};
use crate::api::response::error_message_from_text;
use crate::api::{compute_statistics, merge_results};
use crate::error::{ParkError, Result};
use crate::models::{
    ApiEnvelope, ExitOutcome, LogFilter, LogPage, NewSession, ParkingSession, RemovalData,
    RemovalReceipt, SessionUpdate, Statistics,
};

/// HTTP client for the parking backend's `/parking/logs` resource.
#[derive(Debug, Clone)]
pub struct ParkingLogClient {
    http: reqwest::Client,
    base_url: String,
}

impl ParkingLogClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn logs_url(&self, suffix: &str) -> String {
        format!("{}/parking/logs{}", self.base_url, suffix)
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<ApiEnvelope<T>> {
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ParkError::ApiError {
                status: status.as_u16(),
                message: error_message_from_text(&text),
            });
        }

        if text.trim().is_empty() {
            return Ok(ApiEnvelope {
                success: true,
                data: None,
                message: None,
                error: None,
            });
        }

        Ok(serde_json::from_str(&text)?)
    }

    async fn fetch_page(&self, suffix: &str, filter: Option<&LogFilter>) -> Result<LogPage> {
        let mut request = self.http.get(self.logs_url(suffix));
        if let Some(filter) = filter {
            request = request.query(filter);
        }
        let envelope = self.execute::<LogPage>(request).await?;
        Ok(envelope.data.unwrap_or_default())
    }

    fn require_data<T>(envelope: ApiEnvelope<T>, what: &str) -> Result<T> {
        envelope
            .data
            .ok_or_else(|| ParkError::Other(format!("Response for {} carried no data", what)))
    }

    pub async fn list(&self, filter: &LogFilter) -> Result<LogPage> {
        tracing::debug!(?filter, "Fetching parking logs");
        self.fetch_page("", Some(filter))
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Error fetching parking logs"))
    }

    pub async fn list_by_card_id(&self, card_id: &str) -> Result<LogPage> {
        self.list(&LogFilter::by_card_id(card_id)).await
    }

    pub async fn list_by_license_plate(&self, license_plate: &str) -> Result<LogPage> {
        self.list(&LogFilter::by_license_plate(license_plate)).await
    }

    pub async fn list_by_date_range(
        &self,
        start: Option<String>,
        end: Option<String>,
    ) -> Result<LogPage> {
        self.list(&LogFilter::date_range(start, end)).await
    }

    pub async fn list_today(&self) -> Result<LogPage> {
        self.list(&LogFilter::today(Local::now())).await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<ParkingSession> {
        tracing::debug!(id, "Fetching parking log");
        let result: Result<ParkingSession> = async {
            let request = self.http.get(self.logs_url(&format!("/{}", id)));
            let envelope = self
                .execute::<ParkingSession>(request)
                .await
                .map_err(|e| match e.status() {
                    Some(404) => ParkError::NotFound(id.to_string()),
                    _ => e,
                })?;
            Self::require_data(envelope, "parking log")
        }
        .await;

        result.inspect_err(|e| tracing::error!(error = %e, id, "Error fetching parking log"))
    }

    pub async fn create(&self, session: NewSession) -> Result<ParkingSession> {
        if session.license_plate.trim().is_empty() || session.card_id.trim().is_empty() {
            return Err(ParkError::Validation(
                "License plate and card id are required".to_string(),
            ));
        }

        let payload = session.into_payload();
        let result: Result<ParkingSession> = async {
            let request = self.http.post(self.logs_url("")).json(&payload);
            let envelope = self.execute::<ParkingSession>(request).await?;
            Self::require_data(envelope, "created parking log")
        }
        .await;

        match &result {
            Ok(created) => tracing::info!(
                id = %created.id,
                card_id = %created.card_id,
                "Created parking log"
            ),
            Err(e) => tracing::error!(error = %e, "Error creating parking log"),
        }
        result
    }

    pub async fn update(&self, id: &str, update: &SessionUpdate) -> Result<ParkingSession> {
        let result: Result<ParkingSession> = async {
            let request = self
                .http
                .put(self.logs_url(&format!("/{}", id)))
                .json(update);
            let envelope = self.execute::<ParkingSession>(request).await?;
            Self::require_data(envelope, "updated parking log")
        }
        .await;

        result.inspect_err(|e| tracing::error!(error = %e, id, "Error updating parking log"))
    }

    pub async fn remove(&self, id: &str) -> Result<RemovalReceipt> {
        let result: Result<RemovalReceipt> = async {
            let request = self.http.delete(self.logs_url(&format!("/{}", id)));
            let envelope = self.execute::<RemovalData>(request).await?;
            Ok(RemovalReceipt {
                message: envelope.message,
                parking_duration: envelope.data.and_then(|d| d.parking_duration),
            })
        }
        .await;

        match &result {
            Ok(_) => tracing::info!(id, "Closed parking log"),
            Err(e) => tracing::error!(error = %e, id, "Error deleting parking log"),
        }
        result
    }

    pub async fn list_current(&self) -> Result<LogPage> {
        tracing::debug!("Fetching current parking");
        self.fetch_page("/current", None)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Error fetching current parking"))
    }

    /// Match `term` against plates and card ids at once.
    ///
    /// Both lookups must succeed; either failure fails the search.
    pub async fn search(&self, term: &str) -> Result<LogPage> {
        let by_plate = LogFilter::by_license_plate(term);
        let by_card = LogFilter::by_card_id(term);

        let (plate_page, card_page) =
            futures::try_join!(self.list(&by_plate), self.list(&by_card))
                .inspect_err(|e| tracing::error!(error = %e, term, "Error searching parking logs"))?;

        Ok(merge_results(plate_page, card_page))
    }

    pub async fn process_exit(
        &self,
        card_id: &str,
        exit_plate: &str,
        exit_image: Option<&str>,
    ) -> Result<ExitOutcome> {
        let body = ExitRequest {
            card_id,
            exit_license_plate: exit_plate,
            exit_image,
        };
        let request = self.http.put(self.logs_url("/exit")).json(&body);

        let err = match self.execute::<ParkingSession>(request).await {
            Ok(envelope) => {
                tracing::info!(card_id, "Exit validated, awaiting confirmation");
                return Ok(exit::matched(
                    envelope.data,
                    exit_plate,
                    exit_image,
                    envelope.message,
                ));
            }
            Err(err) => err,
        };

        tracing::error!(error = %err, card_id, "Error processing vehicle exit");

        let failure = err
            .status()
            .and_then(|code| StatusCode::from_u16(code).ok())
            .and_then(classify_exit_status);

        match failure {
            Some(ExitFailure::NoEntry) => Ok(exit::not_found(
                exit_plate,
                exit_image,
                err.backend_message(),
            )),
            Some(ExitFailure::PlateMismatch) => {
                // The mismatch body has no record, so look the candidate up separately.
                let candidate = self
                    .list_current()
                    .await
                    .ok()
                    .and_then(|page| {
                        page.parking_logs
                            .into_iter()
                            .find(|log| log.card_id == card_id)
                    });
                Ok(exit::mismatched(
                    candidate,
                    exit_plate,
                    exit_image,
                    err.backend_message(),
                ))
            }
            None => Err(err),
        }
    }

    pub async fn statistics(
        &self,
        start: Option<String>,
        end: Option<String>,
    ) -> Result<Statistics> {
        let page = self
            .list_by_date_range(start, end)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Error fetching parking statistics"))?;
        Ok(compute_statistics(&page.parking_logs, Utc::now()))
    }
}
