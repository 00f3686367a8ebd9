//! Plain-English pilot report to standard PIREP conversion

use crate::{LlmError, LlmResult, TextGenerator};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

const CONVERSION_INSTRUCTIONS: &str = "\
You convert plain-English pilot weather reports into a single standard PIREP line.

Use the format: UA /OV location/TM time/FL altitude/TP aircraft type/SK sky cover/WX weather/TA temperature/WV wind/TB turbulence/IC icing/RM remarks
- Start with UUA instead of UA for urgent reports (severe or extreme turbulence, severe icing, low-level wind shear, volcanic ash, tornado or funnel cloud).
- /OV must start with the four-letter ICAO identifier of the nearest airport when one is mentioned, optionally followed by radial and distance (e.g. /OV KSFO 270010).
- /TM is the UTC time as four digits; /FL is the altitude in hundreds of feet as three digits.
- Omit any group whose information is not given. Never invent values.
- Reply with the PIREP line only: no explanation, no quotes, no code fences.";

#[async_trait]
pub trait PirepConverter: Send + Sync {
    async fn convert(&self, text: &str) -> LlmResult<String>;
}

/// Converts through the summarization model
#[derive(Clone)]
pub struct ModelPirepConverter {
    generator: Arc<dyn TextGenerator>,
}

impl ModelPirepConverter {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl PirepConverter for ModelPirepConverter {
    async fn convert(&self, text: &str) -> LlmResult<String> {
        let prompt = format!("{CONVERSION_INSTRUCTIONS}\n\nPilot report:\n{}", text.trim());
        let raw = self.generator.generate(&prompt).await?;
        let pirep = clean_pirep(&raw);
        if pirep.is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        debug!(pirep = %pirep, "Converted free text to PIREP");
        Ok(pirep)
    }
}

/// Used when no model is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableConverter;

#[async_trait]
impl PirepConverter for UnavailableConverter {
    async fn convert(&self, _text: &str) -> LlmResult<String> {
        Err(LlmError::Config(
            "PIREP conversion requires a summarization model API key".to_string(),
        ))
    }
}

/// Drop code fences and collapse the remaining lines into one
fn clean_pirep(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("```"))
        .collect::<Vec<_>>()
        .join(" ")
}
