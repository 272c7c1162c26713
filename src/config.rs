use std::env;
use std::fmt;

use thiserror::Error;

use crate::weather::openweather::DEFAULT_API_URL;

const WEATHER_API_KEY_ENV: &str = "WEATHER_API_KEY";
const TELEGRAM_BOT_TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";
const WEATHER_API_URL_ENV: &str = "WEATHER_API_URL";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
}

#[derive(Clone)]
pub struct Config {
    pub weather_api_key: String,
    pub telegram_bot_token: String,
    pub weather_api_url: String,
}

// Secrets stay out of logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("weather_api_key", &"<redacted>")
            .field("telegram_bot_token", &"<redacted>")
            .field("weather_api_url", &self.weather_api_url)
            .finish()
    }
}

impl Config {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let weather_api_key = required(WEATHER_API_KEY_ENV)?;
        let telegram_bot_token = required(TELEGRAM_BOT_TOKEN_ENV)?;
        let weather_api_url = lookup(WEATHER_API_URL_ENV)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Ok(Config {
            weather_api_key,
            telegram_bot_token,
            weather_api_url,
        })
    }
}
