use async_trait::async_trait;

use crate::api::ParkingLogClient;
use crate::error::Result;
use crate::models::{ExitOutcome, LogPage, NewSession, ParkingSession, RemovalReceipt};

/// The gateway operations the entry and exit workflows depend on.
#[async_trait]
pub trait ParkingGateway: Send + Sync {
    async fn get_by_id(&self, id: &str) -> Result<ParkingSession>;

    async fn create(&self, session: NewSession) -> Result<ParkingSession>;

    /// Close a session. Nothing else ends a session's lifecycle.
    async fn remove(&self, id: &str) -> Result<RemovalReceipt>;

    async fn list_current(&self) -> Result<LogPage>;

    async fn process_exit(
        &self,
        card_id: &str,
        exit_plate: &str,
        exit_image: Option<&str>,
    ) -> Result<ExitOutcome>;
}

#[async_trait]
impl ParkingGateway for ParkingLogClient {
    async fn get_by_id(&self, id: &str) -> Result<ParkingSession> {
        ParkingLogClient::get_by_id(self, id).await
    }

    async fn create(&self, session: NewSession) -> Result<ParkingSession> {
        ParkingLogClient::create(self, session).await
    }

    async fn remove(&self, id: &str) -> Result<RemovalReceipt> {
        ParkingLogClient::remove(self, id).await
    }

    async fn list_current(&self) -> Result<LogPage> {
        ParkingLogClient::list_current(self).await
    }

    async fn process_exit(
        &self,
        card_id: &str,
        exit_plate: &str,
        exit_image: Option<&str>,
    ) -> Result<ExitOutcome> {
        ParkingLogClient::process_exit(self, card_id, exit_plate, exit_image).await
    }
}
