//! Data source seams
//!
//! Every provider and store call returns `SourceResult`. Callers decide how
//! to degrade; nothing here swallows an error.

use crate::models::airport::AirportIdentifier;
use crate::models::reports::{ForecastReport, NewPilotReport, Notice, ObservationReport, PilotReport};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub type SourceResult<T> = std::result::Result<T, SourceError>;

/// Failure kinds for provider and store calls
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    /// No URL or credentials configured for this source
    #[error("source not configured")]
    NotConfigured,

    /// Connection or protocol failure before a response arrived
    #[error("transport error: {0}")]
    Transport(String),

    /// Non-2xx response
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body did not match the expected shape
    #[error("malformed payload: {0}")]
    Decode(String),

    /// No response within the configured timeout
    #[error("request timed out after {seconds}s")]
    Timeout { seconds: u64 },
}

impl SourceError {
    /// Classify a `reqwest` failure
    pub fn from_reqwest(err: &reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            SourceError::Timeout {
                seconds: timeout_secs,
            }
        } else if err.is_decode() {
            SourceError::Decode(err.to_string())
        } else {
            SourceError::Transport(err.to_string())
        }
    }

    /// Absent configuration is expected, not a fault worth a warning
    pub fn is_not_configured(&self) -> bool {
        matches!(self, SourceError::NotConfigured)
    }
}

/// METAR and TAF provider
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn observations(&self, airports: &[AirportIdentifier]) -> SourceResult<Vec<ObservationReport>>;

    async fn forecasts(&self, airports: &[AirportIdentifier]) -> SourceResult<Vec<ForecastReport>>;
}

/// Append-only pilot-report table
#[async_trait]
pub trait PirepStore: Send + Sync {
    /// Reports at or after `since` for the given airports, newest first
    async fn recent_reports(
        &self,
        airports: &[AirportIdentifier],
        since: DateTime<Utc>,
    ) -> SourceResult<Vec<PilotReport>>;

    async fn insert_report(&self, report: &NewPilotReport) -> SourceResult<()>;
}

/// Read-only notice table
#[async_trait]
pub trait NoticeStore: Send + Sync {
    /// Notices for the given airports, newest start time first
    async fn notices(&self, airports: &[AirportIdentifier]) -> SourceResult<Vec<Notice>>;
}

/// Stand-in used when no store URL or key is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredStore;

#[async_trait]
impl PirepStore for UnconfiguredStore {
    async fn recent_reports(
        &self,
        _airports: &[AirportIdentifier],
        _since: DateTime<Utc>,
    ) -> SourceResult<Vec<PilotReport>> {
        Err(SourceError::NotConfigured)
    }

    async fn insert_report(&self, _report: &NewPilotReport) -> SourceResult<()> {
        Err(SourceError::NotConfigured)
    }
}

#[async_trait]
impl NoticeStore for UnconfiguredStore {
    async fn notices(&self, _airports: &[AirportIdentifier]) -> SourceResult<Vec<Notice>> {
        Err(SourceError::NotConfigured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_store_reports_not_configured() {
        let store = UnconfiguredStore;
        let airports = vec![AirportIdentifier::new("KSFO")];

        let reports = store.recent_reports(&airports, Utc::now()).await;
        assert_eq!(reports, Err(SourceError::NotConfigured));

        let notices = store.notices(&airports).await;
        assert!(notices.as_ref().is_err_and(SourceError::is_not_configured));
    }

    #[test]
    fn test_error_messages() {
        let err = SourceError::Status {
            status: 503,
            body: "maintenance".to_string(),
        };
        assert_eq!(err.to_string(), "unexpected status 503: maintenance");
        assert_eq!(
            SourceError::Timeout { seconds: 10 }.to_string(),
            "request timed out after 10s"
        );
    }
}
