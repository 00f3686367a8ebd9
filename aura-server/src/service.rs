//! Briefing orchestration
//!
//! Gathers the four report lists concurrently, then hands them to the
//! configured narrative backend. A failing source contributes an empty list
//! and never fails the briefing.

use aura_core::briefing::PromptContext;
use aura_core::{
    BriefingData, BriefingRequest, BriefingResult, NoticeStore, PirepStore, RecencyWindow, SourceError,
    SourceResult, WeatherProvider,
};
use aura_llm::NarrativeBackend;
use std::sync::Arc;
use tracing::{debug, info, warn};

const DEFAULT_PILOT_PROFILE: &str = "General aviation VFR pilot";

pub struct BriefingService {
    weather: Arc<dyn WeatherProvider>,
    pireps: Arc<dyn PirepStore>,
    notices: Arc<dyn NoticeStore>,
    narrator: Arc<dyn NarrativeBackend>,
    pilot_profile: String,
    window: RecencyWindow,
}

impl BriefingService {
    pub fn new(
        weather: Arc<dyn WeatherProvider>,
        pireps: Arc<dyn PirepStore>,
        notices: Arc<dyn NoticeStore>,
        narrator: Arc<dyn NarrativeBackend>,
    ) -> Self {
        Self {
            weather,
            pireps,
            notices,
            narrator,
            pilot_profile: DEFAULT_PILOT_PROFILE.to_string(),
            window: RecencyWindow::default(),
        }
    }

    pub fn with_pilot_profile(mut self, profile: impl Into<String>) -> Self {
        self.pilot_profile = profile.into();
        self
    }

    pub fn with_window(mut self, window: RecencyWindow) -> Self {
        self.window = window;
        self
    }

    pub fn narrator_name(&self) -> &'static str {
        self.narrator.name()
    }

    pub async fn brief(&self, request: &BriefingRequest) -> BriefingResult {
        let airports = request.airports.as_slice();
        let since = self.window.boundary();

        let notices = async {
            if request.include_notices {
                Some(self.notices.notices(airports).await)
            } else {
                None
            }
        };

        let (observations, forecasts, pilot_reports, notices) = tokio::join!(
            self.weather.observations(airports),
            self.weather.forecasts(airports),
            self.pireps.recent_reports(airports, since),
            notices,
        );

        let data = BriefingData {
            observations: or_empty("METAR", observations),
            forecasts: or_empty("TAF", forecasts),
            pilot_reports: or_empty("PIREP", pilot_reports),
            notices: notices.map(|result| or_empty("NOTAM", result)).unwrap_or_default(),
        };

        info!(
            metars = data.observations.len(),
            tafs = data.forecasts.len(),
            pireps = data.pilot_reports.len(),
            notams = data.notices.len(),
            "Gathered briefing data"
        );

        let ctx = PromptContext {
            pilot_profile: &self.pilot_profile,
            airports,
            pirep_window_hours: self.window.hours(),
        };
        let narrative = self.narrator.narrate(&data, &ctx).await;
        info!(narrative = %narrative.source, backend = self.narrator.name(), "Briefing narrative ready");

        BriefingResult::new(narrative, data)
    }
}

fn or_empty<T>(source: &'static str, result: SourceResult<Vec<T>>) -> Vec<T> {
    match result {
        Ok(items) => items,
        Err(SourceError::NotConfigured) => {
            debug!(source, "Source not configured; using empty list");
            Vec::new()
        }
        Err(err) => {
            warn!(source, error = %err, "Retrieval failed; using empty list");
            Vec::new()
        }
    }
}
