use crate::error::ConfigError;
use crate::presenter::Locale;
use reqwest::Url;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Settings resolved once at process start from `.env` and the environment.
#[derive(Debug)]
pub struct WidgetConfig {
    pub api_base_url: Url,
    pub host: String,
    pub port: u16,
    pub title: String,
    pub locale: Locale,
    pub request_timeout: Duration,
}

impl WidgetConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests don't touch the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_base = lookup("API_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("API_BASE_URL"))?;
        let api_base_url = Url::parse(raw_base.trim()).map_err(|e| ConfigError::Invalid {
            key: "API_BASE_URL",
            reason: e.to_string(),
        })?;

        let timeout_secs: u64 = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 15)?;

        Ok(Self {
            api_base_url,
            host: lookup("WIDGET_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "WIDGET_PORT", 8080)?,
            title: lookup("WIDGET_TITLE").unwrap_or_else(|| "HateGuard".to_string()),
            locale: parse_or(&lookup, "WIDGET_LOCALE", Locale::Tr)?,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}
