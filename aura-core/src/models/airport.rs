use serde::{Deserialize, Serialize};
use std::fmt;

/// An uppercase airport code.
///
/// Normalization only trims and uppercases; whether the code is a real
/// four-letter ICAO identifier is answered by [`AirportIdentifier::is_icao`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AirportIdentifier(String);

impl AirportIdentifier {
    /// Trim and uppercase a raw token
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Exactly four ASCII letters
    pub fn is_icao(&self) -> bool {
        self.0.len() == 4 && self.0.chars().all(|c| c.is_ascii_uppercase())
    }

    /// Join identifiers into the comma-separated form providers expect
    pub fn join(airports: &[AirportIdentifier]) -> String {
        airports
            .iter()
            .map(AirportIdentifier::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for AirportIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AirportIdentifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
