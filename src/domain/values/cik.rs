use serde::{Deserialize, Serialize};
use std::fmt;

/// SEC Central Index Key, stored zero-padded to 10 digits. The padded form is
/// what the submissions API expects; the Archives URL wants it unpadded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cik(String);

impl Cik {
    pub fn new(raw: u64) -> Self {
        Cik(format!("{raw:010}"))
    }

    pub fn from_padded(s: &str) -> Result<Self, String> {
        let digits: String = s.trim().chars().collect();
        if digits.is_empty() || digits.len() > 10 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(format!("Invalid CIK: {s}"));
        }
        Ok(Cik(format!("{:0>10}", digits)))
    }

    /// Padded 10-digit form, e.g. "0000320193".
    pub fn padded(&self) -> &str {
        &self.0
    }

    /// Unpadded form used in Archives document URLs, e.g. "320193".
    pub fn unpadded(&self) -> &str {
        self.0.trim_start_matches('0')
    }
}

impl fmt::Display for Cik {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
