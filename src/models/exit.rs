use regex::Regex;

use super::ParkingSession;

pub const NO_ENTRY_FOUND: &str = "NO_ENTRY_FOUND";
pub const LICENSE_PLATE_MISMATCH: &str = "LICENSE_PLATE_MISMATCH";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitVerdict {
    Matched,
    Mismatched,
    NotFound,
}

/// Result of checking a card and plate at the exit lane.
///
/// Mismatch and not-found are ordinary outcomes, not errors: each one drives a
/// different operator branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitOutcome {
    pub verdict: ExitVerdict,
    pub session: Option<ParkingSession>,
    pub exit_plate: String,
    pub exit_image: Option<String>,
    pub message: String,
}

impl ExitOutcome {
    pub fn is_success(&self) -> bool {
        self.verdict == ExitVerdict::Matched
    }

    pub fn code(&self) -> Option<&'static str> {
        match self.verdict {
            ExitVerdict::Matched => None,
            ExitVerdict::Mismatched => Some(LICENSE_PLATE_MISMATCH),
            ExitVerdict::NotFound => Some(NO_ENTRY_FOUND),
        }
    }

    /// Id that a confirmation (or forced exit) would close.
    pub fn removable_id(&self) -> Option<&str> {
        match self.verdict {
            ExitVerdict::Matched | ExitVerdict::Mismatched => {
                self.session.as_ref().map(|s| s.id.as_str())
            }
            ExitVerdict::NotFound => None,
        }
    }

    /// `(entry plate, exit plate)` for a mismatch.
    ///
    /// Falls back to the backend's `Expected: X, Got: Y` text when no candidate
    /// session could be loaded.
    pub fn plate_details(&self) -> Option<(String, String)> {
        if self.verdict != ExitVerdict::Mismatched {
            return None;
        }

        if let Some(session) = &self.session {
            return Some((session.license_plate.clone(), self.exit_plate.clone()));
        }

        let re = Regex::new(r"Expected:\s*([^,]+),\s*Got:\s*(.+)$").ok()?;
        let caps = re.captures(self.message.trim())?;
        Some((caps[1].trim().to_string(), caps[2].trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mismatch(message: &str) -> ExitOutcome {
        ExitOutcome {
            verdict: ExitVerdict::Mismatched,
            session: None,
            exit_plate: "59B9-9999".to_string(),
            exit_image: None,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_plate_details_from_backend_detail() {
        let outcome =
            mismatch("License plate mismatch. Expected: 59A1-2345, Got: 59B9-9999");
        assert_eq!(
            outcome.plate_details(),
            Some(("59A1-2345".to_string(), "59B9-9999".to_string()))
        );
    }

    #[test]
    fn test_plate_details_unparseable_message() {
        assert_eq!(mismatch("License plate does not match").plate_details(), None);
    }

    #[test]
    fn test_not_found_has_nothing_to_remove() {
        let outcome = ExitOutcome {
            verdict: ExitVerdict::NotFound,
            session: None,
            exit_plate: "59A1-2345".to_string(),
            exit_image: None,
            message: "No active entry found for card CARD404".to_string(),
        };
        assert_eq!(outcome.code(), Some(NO_ENTRY_FOUND));
        assert_eq!(outcome.removable_id(), None);
    }
}
