use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::models::{ParkingSession, Statistics};

/// Summarize a set of sessions as of `now`.
///
/// The average measures how long each session has been open up to `now`,
/// not its recorded exit time. It feeds live occupancy views.
pub fn compute_statistics(sessions: &[ParkingSession], now: DateTime<Utc>) -> Statistics {
    if sessions.is_empty() {
        return Statistics::default();
    }

    let unique_vehicles = sessions
        .iter()
        .map(|s| s.license_plate.as_str())
        .collect::<HashSet<_>>()
        .len();
    let unique_cards = sessions
        .iter()
        .map(|s| s.card_id.as_str())
        .collect::<HashSet<_>>()
        .len();

    let elapsed_ms: f64 = sessions
        .iter()
        .filter_map(|s| s.entry_time)
        .map(|entry| (now - entry).num_milliseconds() as f64)
        .sum();

    Statistics {
        total: sessions.len(),
        unique_vehicles,
        unique_cards,
        average_parking_duration: elapsed_ms / sessions.len() as f64,
    }
}
