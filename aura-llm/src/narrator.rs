//! Narrative strategies for the briefing summary

use crate::{LlmResult, ModelStack, TextGenerator};
use async_trait::async_trait;
use aura_utils::ModelSettings;
use aura_core::briefing::{build_prompt, render_fallback, FallbackKind, Narrative, NarrativeSource, PromptContext};
use aura_core::BriefingData;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Produces the `summary` HTML for a briefing; never fails
#[async_trait]
pub trait NarrativeBackend: Send + Sync {
    async fn narrate(&self, data: &BriefingData, ctx: &PromptContext<'_>) -> Narrative;

    fn name(&self) -> &'static str;

    fn is_model_backed(&self) -> bool {
        false
    }
}

/// Used when no model is configured: a fixed table, whatever the data
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackNarrator;

#[async_trait]
impl NarrativeBackend for FallbackNarrator {
    async fn narrate(&self, data: &BriefingData, _ctx: &PromptContext<'_>) -> Narrative {
        debug!("Summarization model unavailable; rendering fallback narrative");
        Narrative::new(
            render_fallback(FallbackKind::ModelUnavailable, data),
            NarrativeSource::ModelUnavailable,
        )
    }

    fn name(&self) -> &'static str {
        "fallback"
    }
}

/// Asks the model for the briefing HTML and returns it unmodified
#[derive(Clone)]
pub struct ModelNarrator {
    generator: Arc<dyn TextGenerator>,
}

impl ModelNarrator {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl NarrativeBackend for ModelNarrator {
    async fn narrate(&self, data: &BriefingData, ctx: &PromptContext<'_>) -> Narrative {
        if data.weather_block().is_empty() {
            info!("No METAR or TAF text available; skipping summarization");
            return Narrative::insufficient_data();
        }

        let prompt = build_prompt(data, ctx);
        debug!(prompt_chars = prompt.len(), "Invoking summarization model");

        match self.generator.generate(&prompt).await {
            Ok(html) => Narrative::new(html, NarrativeSource::Generated),
            Err(e) => {
                warn!(error = %e, "Summarization failed; rendering fallback narrative");
                Narrative::new(
                    render_fallback(FallbackKind::ModelFailed, data),
                    NarrativeSource::ModelFailed,
                )
            }
        }
    }

    fn name(&self) -> &'static str {
        "model"
    }

    fn is_model_backed(&self) -> bool {
        true
    }
}

/// Narrative strategy for this process: model-backed when an API key is set
pub fn select_backend(settings: &ModelSettings) -> LlmResult<Arc<dyn NarrativeBackend>> {
    Ok(ModelStack::from_settings(settings)?.narrator)
}
