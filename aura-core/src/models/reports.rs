//! Report records returned by the weather provider and the REST store
//!
//! METAR and TAF records are opaque provider snapshots: the two fields the
//! briefing needs are typed, everything else rides along in `extra` so the
//! API can hand the provider payload back to clients untouched.

use super::null_as_empty;
use crate::recency::parse_utc;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Current observation (METAR) for one station
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObservationReport {
    #[serde(
        rename = "icaoId",
        alias = "stationId",
        default,
        deserialize_with = "null_as_empty"
    )]
    pub station_id: String,
    #[serde(rename = "rawOb", default, deserialize_with = "null_as_empty")]
    pub raw_text: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ObservationReport {
    pub fn new(station_id: &str, raw_text: &str) -> Self {
        Self {
            station_id: station_id.to_string(),
            raw_text: raw_text.to_string(),
            extra: Map::new(),
        }
    }
}

/// Terminal aerodrome forecast (TAF) for one station
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastReport {
    #[serde(
        rename = "icaoId",
        alias = "stationId",
        default,
        deserialize_with = "null_as_empty"
    )]
    pub station_id: String,
    #[serde(rename = "rawTAF", default, deserialize_with = "null_as_empty")]
    pub raw_text: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ForecastReport {
    pub fn new(station_id: &str, raw_text: &str) -> Self {
        Self {
            station_id: station_id.to_string(),
            raw_text: raw_text.to_string(),
            extra: Map::new(),
        }
    }
}

/// A stored pilot report row from the `pireps` table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PilotReport {
    /// Stored timestamp, kept verbatim so a malformed value can still be shown
    #[serde(default, deserialize_with = "null_as_empty")]
    pub time_utc: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub icao: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub pirep: String,
    #[serde(default)]
    pub aircraft_name: Option<String>,
}

impl PilotReport {
    /// Parsed report time, `None` when the stored value is malformed
    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        parse_utc(&self.time_utc)
    }

    /// Aircraft designation when present and non-blank
    pub fn aircraft(&self) -> Option<&str> {
        self.aircraft_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// A pilot report row about to be inserted into the `pireps` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPilotReport {
    pub time_utc: String,
    /// Empty when no identifier could be inferred
    pub icao: String,
    pub pirep: String,
    /// Empty when the submitter gave no aircraft
    pub aircraft_name: String,
}

/// A notice (NOTAM) row from the `notams` table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub icao_code: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub notam_type: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
}
