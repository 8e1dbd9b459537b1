//! Process configuration, read once at startup and injected into clients.
//!
//! | Variable | Required | Default |
//! |----------|----------|---------|
//! | `OPENAI_API_KEY` | yes | |
//! | `ALPHA_VANTAGE_API_KEY` | yes | |
//! | `TRADEWISE_MODEL` | no | `gpt-3.5-turbo` |
//! | `TRADEWISE_TEMPERATURE` | no | `0.7` |
//! | `TRADEWISE_ALPHA_VANTAGE_BASE_URL` | no | `https://www.alphavantage.co` |
//! | `TRADEWISE_OPENAI_BASE_URL` | no | `https://api.openai.com/v1` |
//! | `TRADEWISE_TIMEOUT_MS` | no | `10000` |

use std::fmt::{Debug, Formatter};

use crate::ConfigError;

pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const ALPHA_VANTAGE_API_KEY: &str = "ALPHA_VANTAGE_API_KEY";
pub const MODEL: &str = "TRADEWISE_MODEL";
pub const TEMPERATURE: &str = "TRADEWISE_TEMPERATURE";
pub const ALPHA_VANTAGE_BASE_URL: &str = "TRADEWISE_ALPHA_VANTAGE_BASE_URL";
pub const OPENAI_BASE_URL: &str = "TRADEWISE_OPENAI_BASE_URL";
pub const TIMEOUT_MS: &str = "TRADEWISE_TIMEOUT_MS";

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_ALPHA_VANTAGE_BASE_URL: &str = "https://www.alphavantage.co";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

const MAX_TEMPERATURE: f32 = 2.0;

/// API key wrapper whose `Debug` output never shows the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl Debug for Secret {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Everything the two clients need, built once per process.
#[derive(Debug, Clone, PartialEq)]
pub struct AssistantConfig {
    pub openai_api_key: Secret,
    pub alpha_vantage_api_key: Secret,
    pub model: String,
    pub temperature: f32,
    pub alpha_vantage_base_url: String,
    pub openai_base_url: String,
    pub timeout_ms: u64,
}

impl AssistantConfig {
    pub fn new(openai_api_key: impl Into<String>, alpha_vantage_api_key: impl Into<String>) -> Self {
        Self {
            openai_api_key: Secret::new(openai_api_key),
            alpha_vantage_api_key: Secret::new(alpha_vantage_api_key),
            model: String::from(DEFAULT_MODEL),
            temperature: DEFAULT_TEMPERATURE,
            alpha_vantage_base_url: String::from(DEFAULT_ALPHA_VANTAGE_BASE_URL),
            openai_base_url: String::from(DEFAULT_OPENAI_BASE_URL),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_owned())
                .filter(|raw| !raw.is_empty())
        };

        let openai_api_key = value(OPENAI_API_KEY).ok_or(ConfigError::MissingSecret {
            name: OPENAI_API_KEY,
        })?;
        let alpha_vantage_api_key =
            value(ALPHA_VANTAGE_API_KEY).ok_or(ConfigError::MissingSecret {
                name: ALPHA_VANTAGE_API_KEY,
            })?;

        let mut config = Self::new(openai_api_key, alpha_vantage_api_key);

        if let Some(model) = value(MODEL) {
            config.model = model;
        }
        if let Some(raw) = value(TEMPERATURE) {
            let temperature = raw.parse::<f32>().map_err(|e| ConfigError::InvalidValue {
                name: TEMPERATURE,
                value: raw.clone(),
                reason: e.to_string(),
            })?;
            config = config.with_temperature(temperature)?;
        }
        if let Some(url) = value(ALPHA_VANTAGE_BASE_URL) {
            config.alpha_vantage_base_url = normalize_base_url(ALPHA_VANTAGE_BASE_URL, &url)?;
        }
        if let Some(url) = value(OPENAI_BASE_URL) {
            config.openai_base_url = normalize_base_url(OPENAI_BASE_URL, &url)?;
        }
        if let Some(raw) = value(TIMEOUT_MS) {
            let timeout_ms = raw.parse::<u64>().map_err(|e| ConfigError::InvalidValue {
                name: TIMEOUT_MS,
                value: raw.clone(),
                reason: e.to_string(),
            })?;
            if timeout_ms == 0 {
                return Err(ConfigError::InvalidValue {
                    name: TIMEOUT_MS,
                    value: raw,
                    reason: String::from("must be greater than zero"),
                });
            }
            config.timeout_ms = timeout_ms;
        }

        Ok(config)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Result<Self, ConfigError> {
        if !temperature.is_finite() || !(0.0..=MAX_TEMPERATURE).contains(&temperature) {
            return Err(ConfigError::InvalidValue {
                name: TEMPERATURE,
                value: temperature.to_string(),
                reason: format!("must be within 0.0..={MAX_TEMPERATURE}"),
            });
        }
        self.temperature = temperature;
        Ok(self)
    }

    pub fn with_alpha_vantage_base_url(mut self, url: impl Into<String>) -> Self {
        self.alpha_vantage_base_url = url.into().trim_end_matches('/').to_owned();
        self
    }

    pub fn with_openai_base_url(mut self, url: impl Into<String>) -> Self {
        self.openai_base_url = url.into().trim_end_matches('/').to_owned();
        self
    }
}

fn normalize_base_url(name: &'static str, url: &str) -> Result<String, ConfigError> {
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::InvalidValue {
            name,
            value: url.to_owned(),
            reason: String::from("must start with http:// or https://"),
        });
    }
    Ok(url.trim_end_matches('/').to_owned())
}
