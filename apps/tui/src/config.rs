use dotenv::dotenv;
use sensor_radar_core::{POLL_INTERVAL, REQUEST_TIMEOUT};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a whole number of milliseconds, got {value:?}")]
    InvalidMillis { name: &'static str, value: String },

    #[error("{name} must be greater than zero")]
    ZeroMillis { name: &'static str },
}

/// Runtime settings, resolved from `.env`, the environment and CLI flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub endpoint: Option<String>,
    pub poll_interval: Duration,
    pub request_timeout: Duration,
    pub log_file: PathBuf,
    pub debug: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            poll_interval: POLL_INTERVAL,
            request_timeout: REQUEST_TIMEOUT,
            log_file: PathBuf::from("sensor_radar.log"),
            debug: false,
        }
    }
}

/// Initializes the application configuration
pub fn init_app_config() -> color_eyre::eyre::Result<AppConfig> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = config_from_lookup(|name| env::var(name).ok())?;
    Ok(config)
}

/// Builds the configuration from a variable lookup.
pub fn config_from_lookup(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<AppConfig, ConfigError> {
    let defaults = AppConfig::default();

    let endpoint = lookup("SENSOR_ENDPOINT")
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());

    let poll_interval = millis(&lookup, "POLL_INTERVAL_MS")?.unwrap_or(defaults.poll_interval);
    let request_timeout =
        millis(&lookup, "POLL_TIMEOUT_MS")?.unwrap_or(defaults.request_timeout);

    let log_file = lookup("SENSOR_LOG_FILE").map_or(defaults.log_file, PathBuf::from);
    let debug = lookup("DEBUG").is_some_and(|value| !value.is_empty() && value != "0");

    Ok(AppConfig {
        endpoint,
        poll_interval,
        request_timeout,
        log_file,
        debug,
    })
}

fn millis(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<Duration>, ConfigError> {
    let Some(value) = lookup(name) else {
        return Ok(None);
    };

    let parsed = value
        .trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidMillis {
            name,
            value: value.clone(),
        })?;

    if parsed == 0 {
        return Err(ConfigError::ZeroMillis { name });
    }

    Ok(Some(Duration::from_millis(parsed)))
}

#[cfg(test)]
mod tests {
    use super::{config_from_lookup, AppConfig, ConfigError};
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::time::Duration;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = config_from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.poll_interval, Duration::from_millis(250));
        assert_eq!(config.request_timeout, Duration::from_millis(2000));
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = config_from_lookup(lookup(&[
            ("SENSOR_ENDPOINT", " 10.0.0.2:8080 "),
            ("POLL_INTERVAL_MS", "1000"),
            ("POLL_TIMEOUT_MS", "300"),
            ("SENSOR_LOG_FILE", "/var/log/radar.log"),
            ("DEBUG", "1"),
        ]))
        .unwrap();

        assert_eq!(config.endpoint.as_deref(), Some("10.0.0.2:8080"));
        assert_eq!(config.poll_interval, Duration::from_millis(1000));
        assert_eq!(config.request_timeout, Duration::from_millis(300));
        assert_eq!(config.log_file, PathBuf::from("/var/log/radar.log"));
        assert!(config.debug);
    }

    #[test]
    fn blank_endpoint_is_unset() {
        let config = config_from_lookup(lookup(&[("SENSOR_ENDPOINT", "   ")])).unwrap();
        assert_eq!(config.endpoint, None);
    }

    #[test]
    fn bad_interval_is_rejected() {
        let error = config_from_lookup(lookup(&[("POLL_INTERVAL_MS", "fast")])).unwrap_err();
        assert_eq!(
            error,
            ConfigError::InvalidMillis {
                name: "POLL_INTERVAL_MS",
                value: "fast".to_string()
            }
        );

        let error = config_from_lookup(lookup(&[("POLL_TIMEOUT_MS", "0")])).unwrap_err();
        assert_eq!(error, ConfigError::ZeroMillis { name: "POLL_TIMEOUT_MS" });
    }
}
