//! Configuration types.

use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Intake engine configuration.
#[derive(Debug, Clone)]
pub struct IntakeConfig {
    /// Base URL of the analysis API.
    pub api_base_url: String,
    /// Opaque bearer credential attached to outbound requests, if any.
    ///
    /// Supplied by the session/auth collaborator; the engine never reads or
    /// validates it.
    pub bearer_token: Option<SecretString>,
    /// Timeout for the submission request.
    pub submit_timeout: Duration,
    /// Progress ticks per analysis stage.
    pub ticks_per_stage: u32,
    /// Pause at 100% before completion is signaled.
    pub trailing_pause: Duration,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000/api/v1".to_string(),
            bearer_token: None,
            submit_timeout: Duration::from_secs(30),
            ticks_per_stage: 20,
            trailing_pause: Duration::from_millis(500),
        }
    }
}

impl IntakeConfig {
    /// Build configuration from `GLUCOLENS_*` environment variables, falling
    /// back to defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let api_base_url =
            std::env::var("GLUCOLENS_API_URL").unwrap_or(defaults.api_base_url);

        let bearer_token = std::env::var("GLUCOLENS_API_TOKEN")
            .ok()
            .filter(|t| !t.is_empty())
            .map(SecretString::from);

        let submit_timeout = match std::env::var("GLUCOLENS_SUBMIT_TIMEOUT_SECS") {
            Ok(raw) => Duration::from_secs(parse_env("GLUCOLENS_SUBMIT_TIMEOUT_SECS", &raw)?),
            Err(_) => defaults.submit_timeout,
        };

        let config = Self {
            api_base_url,
            bearer_token,
            submit_timeout,
            ..defaults
        };
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges. `Default` always passes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base_url.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "api_base_url".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.ticks_per_stage == 0 {
            return Err(ConfigError::InvalidValue {
                key: "ticks_per_stage".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.submit_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                key: "submit_timeout".to_string(),
                message: "must be non-zero".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_env(key: &str, raw: &str) -> Result<u64, ConfigError> {
    raw.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        message: format!("expected an integer, got {raw:?}"),
    })
}
