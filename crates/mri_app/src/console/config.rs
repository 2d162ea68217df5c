//! Environment-driven configuration for the console.
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file by `dotenvy` before [`AppConfig::from_env`] runs.

use std::path::PathBuf;
use std::time::Duration;

use log::LevelFilter;
use mri_core::ConfidenceScale;
use mri_engine::ClassifierSettings;
use thiserror::Error;
use url::Url;

use super::logging::LogDestination;

const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/api/predict/";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not a valid http(s) URL: {reason}")]
    InvalidUrl { var: &'static str, reason: String },
    #[error("{var} must be a positive whole number of seconds, got '{value}'")]
    InvalidSeconds { var: &'static str, value: String },
    #[error("{var} has an unsupported value: {reason}")]
    InvalidValue { var: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub classifier: ClassifierSettings,
    pub report_dir: PathBuf,
    pub state_dir: PathBuf,
    pub log_destination: LogDestination,
    pub log_level: LevelFilter,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; tests pass a map.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let endpoint = get("MRI_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        check_url("MRI_ENDPOINT", &endpoint)?;
        let health_url = get("MRI_HEALTH_URL");
        if let Some(url) = health_url.as_deref() {
            check_url("MRI_HEALTH_URL", url)?;
        }

        let defaults = ClassifierSettings::default();
        let request_timeout =
            seconds("MRI_REQUEST_TIMEOUT_SECS", get("MRI_REQUEST_TIMEOUT_SECS"))?
                .unwrap_or(defaults.request_timeout);
        let connect_timeout =
            seconds("MRI_CONNECT_TIMEOUT_SECS", get("MRI_CONNECT_TIMEOUT_SECS"))?
                .unwrap_or(defaults.connect_timeout);

        let confidence_scale = match get("MRI_CONFIDENCE_SCALE") {
            Some(raw) => raw
                .parse::<ConfidenceScale>()
                .map_err(|reason| ConfigError::InvalidValue {
                    var: "MRI_CONFIDENCE_SCALE",
                    reason,
                })?,
            None => ConfidenceScale::default(),
        };

        let log_destination = match get("MRI_LOG") {
            Some(raw) => raw
                .parse::<LogDestination>()
                .map_err(|reason| ConfigError::InvalidValue {
                    var: "MRI_LOG",
                    reason,
                })?,
            None => LogDestination::File,
        };
        let log_level = match get("MRI_LOG_LEVEL") {
            Some(raw) => raw
                .parse::<LevelFilter>()
                .map_err(|err| ConfigError::InvalidValue {
                    var: "MRI_LOG_LEVEL",
                    reason: err.to_string(),
                })?,
            None => LevelFilter::Info,
        };

        let report_dir = get("MRI_REPORT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("reports"));
        let state_dir = get("MRI_STATE_DIR")
            .map(PathBuf::from)
            .or_else(|| dirs::config_dir().map(|dir| dir.join("mri_app")))
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self {
            classifier: ClassifierSettings {
                endpoint,
                health_url,
                connect_timeout,
                request_timeout,
                confidence_scale,
                ..defaults
            },
            report_dir,
            state_dir,
            log_destination,
            log_level,
        })
    }
}

fn check_url(var: &'static str, raw: &str) -> Result<(), ConfigError> {
    let url = Url::parse(raw).map_err(|err| ConfigError::InvalidUrl {
        var,
        reason: err.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::InvalidUrl {
            var,
            reason: format!("unsupported scheme {other}"),
        }),
    }
}

fn seconds(var: &'static str, raw: Option<String>) -> Result<Option<Duration>, ConfigError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    match raw.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Some(Duration::from_secs(secs))),
        _ => Err(ConfigError::InvalidSeconds { var, value: raw }),
    }
}
