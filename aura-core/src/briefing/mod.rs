//! Briefing assembler
//!
//! Turns the gathered report lists into either the prompt sent to the
//! summarization model or one of the deterministic fallback narratives.

pub mod fallback;
pub mod prompt;

pub use fallback::{render_fallback, FallbackKind};
pub use prompt::{build_prompt, PromptBuilder, PromptContext};

use crate::models::reports::{ForecastReport, Notice, ObservationReport, PilotReport};
use crate::recency::parse_utc;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Returned instead of a narrative when there is no METAR or TAF text
pub const INSUFFICIENT_DATA_MESSAGE: &str = "Not enough data to generate a summary.";

/// Route label used when no observation names a station
pub const UNKNOWN_ROUTE: &str = "Unknown route";

pub const ROUTE_SEPARATOR: &str = " → ";

/// Which narrative path produced the briefing text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrativeSource {
    /// No summarization model configured; fallback narrative A
    #[default]
    ModelUnavailable,
    /// No METAR or TAF text to summarize
    InsufficientData,
    /// Model output returned verbatim
    Generated,
    /// Model call failed; fallback narrative B
    ModelFailed,
}

impl fmt::Display for NarrativeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NarrativeSource::ModelUnavailable => "model_unavailable",
            NarrativeSource::InsufficientData => "insufficient_data",
            NarrativeSource::Generated => "generated",
            NarrativeSource::ModelFailed => "model_failed",
        };
        f.write_str(name)
    }
}

/// Briefing text (HTML unless it is the insufficient-data message)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Narrative {
    pub html: String,
    pub source: NarrativeSource,
}

impl Narrative {
    pub fn new(html: impl Into<String>, source: NarrativeSource) -> Self {
        Self {
            html: html.into(),
            source,
        }
    }

    pub fn insufficient_data() -> Self {
        Self::new(INSUFFICIENT_DATA_MESSAGE, NarrativeSource::InsufficientData)
    }
}

/// Station ids from the observations, first appearance wins
pub fn route_stations(observations: &[ObservationReport]) -> Vec<&str> {
    let mut seen = HashSet::new();
    observations
        .iter()
        .map(|obs| obs.station_id.trim())
        .filter(|id| !id.is_empty() && seen.insert(*id))
        .collect()
}

/// `KSFO → KOAK`, or `Unknown route` without observations
pub fn route_label(observations: &[ObservationReport]) -> String {
    let stations = route_stations(observations);
    if stations.is_empty() {
        UNKNOWN_ROUTE.to_string()
    } else {
        stations.join(ROUTE_SEPARATOR)
    }
}

/// Raw METAR and TAF lines for one briefing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeatherBlock {
    pub metar_text: String,
    pub taf_text: String,
}

impl WeatherBlock {
    pub fn from_reports(observations: &[ObservationReport], forecasts: &[ForecastReport]) -> Self {
        Self {
            metar_text: join_lines(observations.iter().map(|o| o.raw_text.as_str())),
            taf_text: join_lines(forecasts.iter().map(|f| f.raw_text.as_str())),
        }
    }

    /// No raw METAR or TAF text at all
    pub fn is_empty(&self) -> bool {
        self.metar_text.trim().is_empty() && self.taf_text.trim().is_empty()
    }

    pub fn render(&self) -> String {
        format!("METARs:\n{}\nTAFs:\n{}", self.metar_text, self.taf_text)
    }
}

fn join_lines<'a>(lines: impl Iterator<Item = &'a str>) -> String {
    lines.collect::<Vec<_>>().join("\n")
}

/// `[HH:MM UTC] ICAO: text (Aircraft: name)`
pub fn format_pirep_line(report: &PilotReport) -> String {
    let time = report.observed_at().map_or_else(
        || report.time_utc.clone(),
        |at| at.format("%H:%M UTC").to_string(),
    );
    let mut line = format!("[{time}] {}: {}", report.icao, report.pirep);
    if let Some(aircraft) = report.aircraft() {
        line.push_str(&format!(" (Aircraft: {aircraft})"));
    }
    line
}

/// `ICAO - TYPE: description (Active: start to end)`
pub fn format_notice_line(notice: &Notice) -> String {
    format!(
        "{} - {}: {} (Active: {} to {})",
        notice.icao_code,
        notice.notam_type,
        notice.description,
        format_notice_time(notice.start_time.as_deref()),
        format_notice_time(notice.end_time.as_deref()),
    )
}

fn format_notice_time(raw: Option<&str>) -> String {
    let raw = raw.unwrap_or_default();
    parse_utc(raw).map_or_else(
        || raw.to_string(),
        |at| at.format("%Y-%m-%d %H:%M UTC").to_string(),
    )
}
