mod envelope;
mod exit;
mod filter;
mod session;
mod statistics;
pub mod timestamp;

pub use envelope::{ApiEnvelope, ApiErrorBody, LogPage, Pagination, RemovalReceipt};
pub(crate) use envelope::RemovalData;
pub use exit::{ExitOutcome, ExitVerdict, LICENSE_PLATE_MISMATCH, NO_ENTRY_FOUND};
pub use filter::LogFilter;
pub use session::{CreatePayload, NewSession, ParkingDuration, ParkingSession, SessionUpdate};
pub use statistics::Statistics;
