//! Aura LLM - Summarization Model Integration
//!
//! The briefing narrative and the free-text to PIREP conversion both go
//! through a [`TextGenerator`]. Which narrative strategy runs is decided once
//! at startup by [`ModelStack::from_settings`]:
//! - API key present: [`ModelNarrator`] over the Gemini client
//! - no API key: [`FallbackNarrator`], deterministic HTML only

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

pub mod gemini;
pub mod generator;
pub mod narrator;
pub mod converter;

pub use gemini::GeminiClient;
pub use generator::TextGenerator;
pub use narrator::{FallbackNarrator, ModelNarrator, NarrativeBackend};
pub use converter::{ModelPirepConverter, PirepConverter, UnavailableConverter};
pub use narrator::select_backend;

use aura_utils::ModelSettings;
use std::sync::Arc;
use tracing::{info, warn};

/// Result type for LLM operations
pub type LlmResult<T> = std::result::Result<T, LlmError>;

/// Error types for LLM operations
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// HTTP request error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Model inference error
    #[error("Model inference error: {0}")]
    Inference(String),

    /// Model call exceeded its timeout
    #[error("Model call timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// Model answered without usable text
    #[error("Model returned an empty response")]
    EmptyResponse,
}

/// Narrative backend and PIREP converter chosen for this process
#[derive(Clone)]
pub struct ModelStack {
    pub narrator: Arc<dyn NarrativeBackend>,
    pub converter: Arc<dyn PirepConverter>,
}

impl ModelStack {
    /// Pick model-backed strategies when an API key is configured
    pub fn from_settings(settings: &ModelSettings) -> LlmResult<Self> {
        if !settings.is_configured() {
            warn!("No summarization API key configured; briefings will use fallback narratives");
            return Ok(Self::unavailable());
        }
        let client: Arc<dyn TextGenerator> = Arc::new(GeminiClient::from_settings(settings)?);
        info!(model = %settings.name, "Summarization model configured");
        Ok(Self::with_generator(client))
    }

    /// Both strategies driven by one generator
    pub fn with_generator(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            narrator: Arc::new(ModelNarrator::new(generator.clone())),
            converter: Arc::new(ModelPirepConverter::new(generator)),
        }
    }

    /// No model: fallback narratives and a converter that always fails
    pub fn unavailable() -> Self {
        Self {
            narrator: Arc::new(FallbackNarrator),
            converter: Arc::new(UnavailableConverter),
        }
    }

    pub fn is_model_backed(&self) -> bool {
        self.narrator.is_model_backed()
    }
}
