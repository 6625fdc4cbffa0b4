pub mod client;
pub mod exit;
pub mod gateway;
pub mod response;
pub mod search;
pub mod statistics;

pub use client::ParkingLogClient;
pub use exit::{classify_exit_status, ExitFailure, ExitRequest};
pub use gateway::ParkingGateway;
pub use search::merge_results;
pub use statistics::compute_statistics;
