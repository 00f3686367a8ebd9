use crate::error::ServerError;
use crate::service::BriefingService;
use aura_core::{
    AviationWeatherClient, NoticeStore, PirepRecorder, PirepStore, RecencyWindow, SupabaseClient,
    UnconfiguredStore, WeatherProvider,
};
use aura_llm::{ModelStack, PirepConverter};
use aura_utils::AppConfig;
use std::sync::Arc;
use tracing::warn;

/// Shared handles for the HTTP routes
#[derive(Clone)]
pub struct AppState {
    pub briefing: Arc<BriefingService>,
    pub converter: Arc<dyn PirepConverter>,
    pub recorder: PirepRecorder,
}

impl AppState {
    pub fn new(
        briefing: BriefingService,
        converter: Arc<dyn PirepConverter>,
        recorder: PirepRecorder,
    ) -> Self {
        Self {
            briefing: Arc::new(briefing),
            converter,
            recorder,
        }
    }

    /// Build the real clients described by `config`
    pub fn from_config(config: &AppConfig) -> Result<Self, ServerError> {
        let weather: Arc<dyn WeatherProvider> =
            Arc::new(AviationWeatherClient::from_settings(&config.weather)?);

        let (pireps, notices): (Arc<dyn PirepStore>, Arc<dyn NoticeStore>) =
            match SupabaseClient::from_settings(&config.store)? {
                Some(client) => {
                    let client = Arc::new(client);
                    let pireps: Arc<dyn PirepStore> = client.clone();
                    let notices: Arc<dyn NoticeStore> = client;
                    (pireps, notices)
                }
                None => {
                    warn!("Report store not configured; PIREPs and NOTAMs will be empty and nothing is recorded");
                    let pireps: Arc<dyn PirepStore> = Arc::new(UnconfiguredStore);
                    let notices: Arc<dyn NoticeStore> = Arc::new(UnconfiguredStore);
                    (pireps, notices)
                }
            };

        let models = ModelStack::from_settings(&config.model)?;

        let briefing = BriefingService::new(weather, pireps.clone(), notices, models.narrator)
            .with_pilot_profile(config.briefing.pilot_profile.clone())
            .with_window(RecencyWindow::new(config.briefing.pirep_window_hours));

        Ok(Self::new(briefing, models.converter, PirepRecorder::new(pireps)))
    }
}
