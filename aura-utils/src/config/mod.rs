//! Layered configuration for the briefing service
//!
//! Values resolve, lowest to highest precedence, from built-in defaults, an
//! optional TOML file, `AURA__SECTION__KEY` environment variables and finally
//! the legacy unprefixed variables (`GEMINI_API_KEY`, `SUPABASE_URL`,
//! `SUPABASE_SERVICE_KEY`, `PILOT_PROFILE`).

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "aura.toml";

const ENV_PREFIX: &str = "AURA";
const ENV_SEPARATOR: &str = "__";

const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:5001";
const DEFAULT_WEATHER_URL: &str = "https://aviationweather.gov";
const DEFAULT_MODEL_NAME: &str = "gemini-2.5-flash";
const DEFAULT_MODEL_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const DEFAULT_PILOT_PROFILE: &str = "General aviation VFR pilot";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
const DEFAULT_MODEL_TIMEOUT_SECS: u64 = 60;
const DEFAULT_TEMPERATURE: f32 = 0.4;
const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 2048;
const DEFAULT_PIREP_WINDOW_HOURS: u32 = 6;
/// Longest accepted PIREP window, one week
pub const MAX_PIREP_WINDOW_HOURS: u32 = 168;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub weather: WeatherSettings,
    pub store: StoreSettings,
    pub model: ModelSettings,
    pub briefing: BriefingSettings,
    pub logging: LoggingSettings,
}

/// HTTP front door settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    pub listen_addr: String,
    /// Directory of static single-page assets served as the router fallback
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            static_dir: None,
        }
    }
}

/// METAR/TAF provider settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for WeatherSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_WEATHER_URL.to_string(),
            timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

/// Pilot-report and notice store (PostgREST) settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSettings {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub service_key: Option<String>,
    pub timeout_secs: u64,
}

impl StoreSettings {
    /// Both the URL and the service key are present and non-blank
    pub fn is_configured(&self) -> bool {
        non_blank(self.url.as_deref()) && non_blank(self.service_key.as_deref())
    }
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            url: None,
            service_key: None,
            timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

/// Summarization model settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSettings {
    #[serde(default)]
    pub api_key: Option<String>,
    pub name: String,
    pub base_url: String,
    pub timeout_secs: u64,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl ModelSettings {
    /// An API key is present and non-blank
    pub fn is_configured(&self) -> bool {
        non_blank(self.api_key.as_deref())
    }
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            name: DEFAULT_MODEL_NAME.to_string(),
            base_url: DEFAULT_MODEL_URL.to_string(),
            timeout_secs: DEFAULT_MODEL_TIMEOUT_SECS,
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }
}

/// Briefing content settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BriefingSettings {
    pub pilot_profile: String,
    pub pirep_window_hours: u32,
}

impl Default for BriefingSettings {
    fn default() -> Self {
        Self {
            pilot_profile: DEFAULT_PILOT_PROFILE.to_string(),
            pirep_window_hours: DEFAULT_PIREP_WINDOW_HOURS,
        }
    }
}

/// Log output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub ansi: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            ansi: true,
        }
    }
}

/// Unprefixed environment variables honoured for compatibility with
/// existing deployments
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegacyEnv {
    pub gemini_api_key: Option<String>,
    pub supabase_url: Option<String>,
    pub supabase_service_key: Option<String>,
    pub pilot_profile: Option<String>,
}

impl LegacyEnv {
    /// Read the legacy variables from the process environment
    pub fn from_process_env() -> Self {
        let read = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        Self {
            gemini_api_key: read("GEMINI_API_KEY"),
            supabase_url: read("SUPABASE_URL"),
            supabase_service_key: read("SUPABASE_SERVICE_KEY"),
            pilot_profile: read("PILOT_PROFILE"),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment and an optional file.
    ///
    /// An explicit `path` must exist; without one, `aura.toml` in the
    /// working directory is read if present.
    pub fn load(path: Option<&Path>) -> crate::Result<Self> {
        Self::load_with(path, &LegacyEnv::from_process_env())
    }

    /// Load configuration with an explicit set of legacy variables
    pub fn load_with(path: Option<&Path>, legacy: &LegacyEnv) -> crate::Result<Self> {
        let file = match path {
            Some(path) => File::from(path).format(FileFormat::Toml).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE)
                .format(FileFormat::Toml)
                .required(false),
        };

        let defaults = Self::default();
        let builder = Config::builder()
            .set_default("server.listen_addr", defaults.server.listen_addr)?
            .set_default("weather.base_url", defaults.weather.base_url)?
            .set_default("weather.timeout_secs", to_i64(defaults.weather.timeout_secs))?
            .set_default("store.timeout_secs", to_i64(defaults.store.timeout_secs))?
            .set_default("model.name", defaults.model.name)?
            .set_default("model.base_url", defaults.model.base_url)?
            .set_default("model.timeout_secs", to_i64(defaults.model.timeout_secs))?
            .set_default("model.temperature", f64::from(defaults.model.temperature))?
            .set_default(
                "model.max_output_tokens",
                i64::from(defaults.model.max_output_tokens),
            )?
            .set_default("briefing.pilot_profile", defaults.briefing.pilot_profile)?
            .set_default(
                "briefing.pirep_window_hours",
                i64::from(defaults.briefing.pirep_window_hours),
            )?
            .set_default("logging.level", defaults.logging.level)?
            .set_default("logging.ansi", defaults.logging.ansi)?
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX).separator(ENV_SEPARATOR))
            .set_override_option("model.api_key", legacy.gemini_api_key.clone())?
            .set_override_option("store.url", legacy.supabase_url.clone())?
            .set_override_option("store.service_key", legacy.supabase_service_key.clone())?
            .set_override_option("briefing.pilot_profile", legacy.pilot_profile.clone())?;

        let mut config: AppConfig = builder.build()?.try_deserialize()?;
        config.store.url = config
            .store
            .url
            .take()
            .map(|url| url.trim_end_matches('/').to_string());
        config.briefing.validate()?;
        Ok(config)
    }
}

impl BriefingSettings {
    /// Reject a PIREP window outside `1..=MAX_PIREP_WINDOW_HOURS`
    pub fn validate(&self) -> crate::Result<()> {
        if (1..=MAX_PIREP_WINDOW_HOURS).contains(&self.pirep_window_hours) {
            Ok(())
        } else {
            Err(crate::UtilError::Config(format!(
                "briefing.pirep_window_hours must be between 1 and {MAX_PIREP_WINDOW_HOURS}, got {}",
                self.pirep_window_hours
            )))
        }
    }
}

fn non_blank(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_config(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("aura.toml");
        std::fs::write(&path, body).expect("write config");
        path
    }

    #[test]
    fn test_defaults_without_file() -> crate::Result<()> {
        let temp_dir = tempdir()?;
        let path = write_config(temp_dir.path(), "");

        let config = AppConfig::load_with(Some(&path), &LegacyEnv::default())?;

        assert_eq!(config.server.listen_addr, "127.0.0.1:5001");
        assert_eq!(config.weather.timeout_secs, 10);
        assert_eq!(config.store.timeout_secs, 10);
        assert_eq!(config.model.name, "gemini-2.5-flash");
        assert_eq!(config.briefing.pilot_profile, "General aviation VFR pilot");
        assert_eq!(config.briefing.pirep_window_hours, 6);
        assert!(!config.model.is_configured());
        assert!(!config.store.is_configured());
        Ok(())
    }

    #[test]
    fn test_file_overrides_defaults() -> crate::Result<()> {
        let temp_dir = tempdir()?;
        let path = write_config(
            temp_dir.path(),
            r#"
[server]
listen_addr = "0.0.0.0:8080"
static_dir = "public"

[store]
url = "https://db.example.com/"
service_key = "secret"

[briefing]
pilot_profile = "IFR commercial crew"
pirep_window_hours = 3
"#,
        );

        let config = AppConfig::load_with(Some(&path), &LegacyEnv::default())?;

        assert_eq!(config.server.listen_addr, "0.0.0.0:8080");
        assert_eq!(config.server.static_dir, Some(PathBuf::from("public")));
        assert_eq!(config.store.url.as_deref(), Some("https://db.example.com"));
        assert!(config.store.is_configured());
        assert_eq!(config.briefing.pilot_profile, "IFR commercial crew");
        assert_eq!(config.briefing.pirep_window_hours, 3);
        Ok(())
    }

    #[test]
    fn test_pirep_window_out_of_range_is_rejected() -> crate::Result<()> {
        let temp_dir = tempdir()?;
        for hours in ["0", "169", "4294967295"] {
            let path = write_config(
                temp_dir.path(),
                &format!("[briefing]\npirep_window_hours = {hours}\n"),
            );
            let result = AppConfig::load_with(Some(&path), &LegacyEnv::default());
            assert!(
                matches!(result, Err(crate::UtilError::Config(ref msg)) if msg.contains("pirep_window_hours")),
                "window of {hours} hours should be rejected"
            );
        }

        let path = write_config(temp_dir.path(), "[briefing]\npirep_window_hours = 168\n");
        let config = AppConfig::load_with(Some(&path), &LegacyEnv::default())?;
        assert_eq!(config.briefing.pirep_window_hours, 168);
        Ok(())
    }

    #[test]
    fn test_legacy_env_wins_over_file() -> crate::Result<()> {
        let temp_dir = tempdir()?;
        let path = write_config(
            temp_dir.path(),
            r#"
[briefing]
pilot_profile = "From file"
"#,
        );
        let legacy = LegacyEnv {
            gemini_api_key: Some("key-123".to_string()),
            pilot_profile: Some("From env".to_string()),
            ..LegacyEnv::default()
        };

        let config = AppConfig::load_with(Some(&path), &legacy)?;

        assert_eq!(config.model.api_key.as_deref(), Some("key-123"));
        assert!(config.model.is_configured());
        assert_eq!(config.briefing.pilot_profile, "From env");
        Ok(())
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = AppConfig::load_with(
            Some(Path::new("/nonexistent/aura.toml")),
            &LegacyEnv::default(),
        );
        assert!(matches!(result, Err(crate::UtilError::Config(_))));
    }

    #[test]
    fn test_blank_credentials_are_not_configured() {
        let store = StoreSettings {
            url: Some("https://db.example.com".to_string()),
            service_key: Some("   ".to_string()),
            ..StoreSettings::default()
        };
        assert!(!store.is_configured());
    }
}
