//! Operator-facing state machines for the entry and exit lanes.
//!
//! Neither workflow renders anything; the console in `orchestrator` reads their
//! state after each transition. Time is passed in explicitly so transient
//! notices can expire deterministically.

pub mod entry;
pub mod exit;

use std::time::{Duration, Instant};

use async_trait::async_trait;

pub use entry::{EntryForm, EntryPhase, EntryWorkflow};
pub use exit::{ExitForm, ExitPhase, ExitWorkflow};

/// How long the entry success notice stays up.
pub const SUCCESS_NOTICE_TTL: Duration = Duration::from_secs(3);

/// How long a confirmed exit result stays up before clearing itself.
pub const CONFIRMED_RESULT_TTL: Duration = Duration::from_secs(2);

/// Parent-supplied hook run after a state-changing operation succeeds.
#[async_trait]
pub trait Refresh: Send + Sync {
    async fn refresh(&self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub expires_at: Instant,
}

impl Notice {
    pub fn new(text: impl Into<String>, now: Instant, ttl: Duration) -> Self {
        Self {
            text: text.into(),
            expires_at: now + ttl,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}
