//! PostgREST (Supabase) client for the `pireps` and `notams` tables

use super::ensure_success;
use crate::models::airport::AirportIdentifier;
use crate::models::reports::{NewPilotReport, Notice, PilotReport};
use crate::recency::format_iso_utc;
use crate::sources::{NoticeStore, PirepStore, SourceError, SourceResult};
use async_trait::async_trait;
use aura_utils::StoreSettings;
use chrono::{DateTime, Utc};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::info;

const PIREPS_TABLE: &str = "pireps";
const NOTAMS_TABLE: &str = "notams";

/// REST client for the pilot-report and notice tables
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    client: Client,
    base_url: String,
    service_key: String,
    timeout_secs: u64,
}

impl SupabaseClient {
    pub fn new(base_url: &str, service_key: &str, timeout: Duration) -> crate::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key: service_key.to_string(),
            timeout_secs: timeout.as_secs(),
        })
    }

    /// `None` when the URL or service key is missing
    pub fn from_settings(settings: &StoreSettings) -> crate::Result<Option<Self>> {
        if !settings.is_configured() {
            return Ok(None);
        }
        let (Some(url), Some(key)) = (settings.url.as_deref(), settings.service_key.as_deref())
        else {
            return Ok(None);
        };
        Self::new(url, key, Duration::from_secs(settings.timeout_secs)).map(Some)
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/rest/v1/{table}", self.base_url))
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> SourceResult<Vec<T>> {
        let response = self
            .request(Method::GET, table)
            .query(query)
            .send()
            .await
            .map_err(|e| SourceError::from_reqwest(&e, self.timeout_secs))?;
        let response = ensure_success(response).await?;
        response
            .json()
            .await
            .map_err(|e| SourceError::from_reqwest(&e, self.timeout_secs))
    }
}

/// PostgREST `in.("A","B")` filter value
fn in_filter(airports: &[AirportIdentifier]) -> String {
    let quoted = airports
        .iter()
        .filter(|id| !id.is_empty())
        .map(|id| format!("\"{id}\""))
        .collect::<Vec<_>>()
        .join(",");
    format!("in.({quoted})")
}

fn has_identifiers(airports: &[AirportIdentifier]) -> bool {
    airports.iter().any(|id| !id.is_empty())
}

#[async_trait]
impl PirepStore for SupabaseClient {
    async fn recent_reports(
        &self,
        airports: &[AirportIdentifier],
        since: DateTime<Utc>,
    ) -> SourceResult<Vec<PilotReport>> {
        if !has_identifiers(airports) {
            return Ok(Vec::new());
        }
        let query = [
            ("time_utc", format!("gte.{}", format_iso_utc(since))),
            ("icao", in_filter(airports)),
            ("order", "time_utc.desc".to_string()),
        ];
        let reports: Vec<PilotReport> = self.select(PIREPS_TABLE, &query).await?;
        info!(
            count = reports.len(),
            airports = %AirportIdentifier::join(airports),
            "Retrieved recent PIREPs"
        );
        Ok(reports)
    }

    async fn insert_report(&self, report: &NewPilotReport) -> SourceResult<()> {
        let response = self
            .request(Method::POST, PIREPS_TABLE)
            .header("Prefer", "return=minimal")
            .json(&[report])
            .send()
            .await
            .map_err(|e| SourceError::from_reqwest(&e, self.timeout_secs))?;
        ensure_success(response).await?;
        Ok(())
    }
}

#[async_trait]
impl NoticeStore for SupabaseClient {
    async fn notices(&self, airports: &[AirportIdentifier]) -> SourceResult<Vec<Notice>> {
        if !has_identifiers(airports) {
            return Ok(Vec::new());
        }
        let query = [
            ("icao_code", in_filter(airports)),
            ("order", "start_time.desc".to_string()),
        ];
        let notices: Vec<Notice> = self.select(NOTAMS_TABLE, &query).await?;
        info!(
            count = notices.len(),
            airports = %AirportIdentifier::join(airports),
            "Retrieved NOTAMs"
        );
        Ok(notices)
    }
}
