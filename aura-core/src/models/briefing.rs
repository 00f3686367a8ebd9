use super::airport::AirportIdentifier;
use super::reports::{ForecastReport, Notice, ObservationReport, PilotReport};
use crate::briefing::{Narrative, NarrativeSource, WeatherBlock};
use serde::{Deserialize, Serialize};

/// One incoming briefing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BriefingRequest {
    pub airports: Vec<AirportIdentifier>,
    pub include_notices: bool,
}

impl BriefingRequest {
    pub fn new(airports: Vec<AirportIdentifier>, include_notices: bool) -> Self {
        Self {
            airports,
            include_notices,
        }
    }
}

/// The four report lists gathered for one briefing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BriefingData {
    #[serde(rename = "metar_reports")]
    pub observations: Vec<ObservationReport>,
    #[serde(rename = "taf_reports")]
    pub forecasts: Vec<ForecastReport>,
    #[serde(rename = "pirep_reports")]
    pub pilot_reports: Vec<PilotReport>,
    #[serde(rename = "notam_reports")]
    pub notices: Vec<Notice>,
}

impl BriefingData {
    /// Raw METAR and TAF text for the prompt
    pub fn weather_block(&self) -> WeatherBlock {
        WeatherBlock::from_reports(&self.observations, &self.forecasts)
    }
}

/// Narrative plus the data it was built from, as returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BriefingResult {
    pub summary: String,
    #[serde(skip)]
    pub narrative_source: NarrativeSource,
    #[serde(flatten)]
    pub data: BriefingData,
}

impl BriefingResult {
    pub fn new(narrative: Narrative, data: BriefingData) -> Self {
        Self {
            summary: narrative.html,
            narrative_source: narrative.source,
            data,
        }
    }
}
