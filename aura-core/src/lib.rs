//! Aura Core - Briefing Domain and Data Sources
//!
//! This crate holds everything the briefing pipeline needs short of the
//! summarization model itself:
//! - Report models (METAR, TAF, PIREP, NOTAM) and briefing request/result types
//! - Identifier normalization and `/OV` extraction
//! - The PIREP recency window
//! - The briefing assembler (prompt builder and fallback narratives)
//! - Source traits plus HTTP clients for the weather provider and REST store
//! - The best-effort PIREP ingestion recorder

#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
)]

pub mod models;
pub mod identifiers;
pub mod recency;
pub mod briefing;
pub mod sources;
pub mod providers;
pub mod ingest;

pub use models::{
    airport::AirportIdentifier,
    briefing::{BriefingData, BriefingRequest, BriefingResult},
    reports::{ForecastReport, NewPilotReport, Notice, ObservationReport, PilotReport},
};
pub use identifiers::{extract_icao, normalize_identifiers};
pub use recency::{format_iso_utc, parse_utc, RecencyWindow};
pub use briefing::{
    build_prompt, render_fallback, route_label, FallbackKind, Narrative, NarrativeSource,
    PromptContext, WeatherBlock, INSUFFICIENT_DATA_MESSAGE,
};
pub use sources::{NoticeStore, PirepStore, SourceError, SourceResult, UnconfiguredStore, WeatherProvider};
pub use providers::{aviation_weather::AviationWeatherClient, supabase::SupabaseClient};
pub use ingest::{IngestOutcome, PirepRecorder, PirepSubmission};

/// Result type used throughout Aura core
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Aura core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP client construction failed
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Data source error
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Utility error
    #[error("Utility error: {0}")]
    Util(#[from] aura_utils::UtilError),
}
