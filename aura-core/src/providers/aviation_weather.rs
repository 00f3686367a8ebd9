//! aviationweather.gov data API client (METAR and TAF)

use super::ensure_success;
use crate::models::airport::AirportIdentifier;
use crate::models::reports::{ForecastReport, ObservationReport};
use crate::sources::{SourceError, SourceResult, WeatherProvider};
use async_trait::async_trait;
use aura_utils::WeatherSettings;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

const METAR_PATH: &str = "/api/data/metar";
const TAF_PATH: &str = "/api/data/taf";

/// Weather provider backed by the aviationweather.gov JSON API
#[derive(Debug, Clone)]
pub struct AviationWeatherClient {
    client: Client,
    base_url: String,
    timeout_secs: u64,
}

impl AviationWeatherClient {
    pub fn new(base_url: &str, timeout: Duration) -> crate::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs: timeout.as_secs(),
        })
    }

    pub fn from_settings(settings: &WeatherSettings) -> crate::Result<Self> {
        Self::new(&settings.base_url, Duration::from_secs(settings.timeout_secs))
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        airports: &[AirportIdentifier],
        extra_query: &[(&str, &str)],
    ) -> SourceResult<Vec<T>> {
        if airports.is_empty() {
            return Ok(Vec::new());
        }
        let ids = AirportIdentifier::join(airports);
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .query(&[("ids", ids.as_str()), ("format", "json")])
            .query(extra_query)
            .send()
            .await
            .map_err(|e| SourceError::from_reqwest(&e, self.timeout_secs))?;

        // The API answers 204 with an empty body when no station has data
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(Vec::new());
        }
        let response = ensure_success(response).await?;
        let body = response
            .bytes()
            .await
            .map_err(|e| SourceError::from_reqwest(&e, self.timeout_secs))?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        serde_json::from_slice(&body).map_err(|e| SourceError::Decode(e.to_string()))
    }
}

#[async_trait]
impl WeatherProvider for AviationWeatherClient {
    async fn observations(&self, airports: &[AirportIdentifier]) -> SourceResult<Vec<ObservationReport>> {
        self.fetch(METAR_PATH, airports, &[("latlon", "true")]).await
    }

    async fn forecasts(&self, airports: &[AirportIdentifier]) -> SourceResult<Vec<ForecastReport>> {
        self.fetch(TAF_PATH, airports, &[]).await
    }
}
