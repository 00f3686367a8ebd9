//! Best-effort PIREP ingestion
//!
//! Recording never fails the conversion that triggered it: every store
//! error is folded into an [`IngestOutcome`] and logged.

use crate::identifiers::extract_icao;
use crate::models::reports::NewPilotReport;
use crate::recency::format_iso_utc;
use crate::sources::{PirepStore, SourceError};
use chrono::{DateTime, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A converted report ready to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PirepSubmission {
    pub received_at: DateTime<Utc>,
    pub pirep: String,
    /// Identifier supplied by the client, used when the report has no `/OV`
    pub icao_hint: Option<String>,
    pub aircraft_name: Option<String>,
}

impl PirepSubmission {
    /// Identifier from the `/OV` group, else the uppercased hint, else empty
    pub fn resolved_icao(&self) -> String {
        extract_icao(&self.pirep)
            .map(|id| id.to_string())
            .or_else(|| {
                self.icao_hint
                    .as_deref()
                    .map(|hint| hint.trim().to_uppercase())
                    .filter(|hint| !hint.is_empty())
            })
            .unwrap_or_default()
    }

    pub fn to_row(&self) -> NewPilotReport {
        NewPilotReport {
            time_utc: format_iso_utc(self.received_at),
            icao: self.resolved_icao(),
            pirep: self.pirep.clone(),
            aircraft_name: self
                .aircraft_name
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_string(),
        }
    }
}

/// Result of one recording attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    Recorded,
    Skipped { reason: String },
    Failed { error: String },
}

impl Serialize for IngestOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            IngestOutcome::Recorded => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("success", &true)?;
                map.end()
            }
            IngestOutcome::Skipped { reason } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("skipped", &true)?;
                map.serialize_entry("reason", reason)?;
                map.end()
            }
            IngestOutcome::Failed { error } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("error", error)?;
                map.end()
            }
        }
    }
}

/// Writes submitted PIREPs to the pilot-report store
#[derive(Clone)]
pub struct PirepRecorder {
    store: Arc<dyn PirepStore>,
}

impl PirepRecorder {
    pub fn new(store: Arc<dyn PirepStore>) -> Self {
        Self { store }
    }

    pub async fn record(&self, submission: &PirepSubmission) -> IngestOutcome {
        let row = submission.to_row();
        match self.store.insert_report(&row).await {
            Ok(()) => {
                info!(icao = %row.icao, "Recorded PIREP");
                IngestOutcome::Recorded
            }
            Err(SourceError::NotConfigured) => {
                debug!("PIREP store not configured; skipping insert");
                IngestOutcome::Skipped {
                    reason: "PIREP store not configured".to_string(),
                }
            }
            Err(err) => {
                warn!(icao = %row.icao, error = %err, "Failed to record PIREP");
                IngestOutcome::Failed {
                    error: err.to_string(),
                }
            }
        }
    }
}
