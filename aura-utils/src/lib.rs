//! Aura Utilities - Configuration and Logging
//!
//! This crate provides the ambient pieces shared by every Aura crate:
//! layered configuration loading and tracing subscriber setup.

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod logging;

pub use config::{
    AppConfig, BriefingSettings, LegacyEnv, LoggingSettings, ModelSettings, ServerSettings,
    StoreSettings, WeatherSettings,
};
pub use logging::{init_logging, LogLevel, LoggerConfig};

/// Result type used throughout Aura utilities
pub type Result<T> = std::result::Result<T, UtilError>;

/// Error types for utility operations
#[derive(Debug, thiserror::Error)]
pub enum UtilError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Logging setup error
    #[error("Logging error: {0}")]
    Logging(String),
}

impl From<::config::ConfigError> for UtilError {
    fn from(err: ::config::ConfigError) -> Self {
        UtilError::Config(err.to_string())
    }
}
