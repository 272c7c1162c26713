pub mod openweather;
pub mod types;

use async_trait::async_trait;

pub use openweather::OpenWeatherClient;

/// Result of a current-weather lookup that reached the provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CityWeather {
    Found { kelvin: f64 },
    NotFound,
}

/// Source of current temperatures, keyed by the city name exactly as typed.
///
/// Anything other than a found/not-found answer (transport failure, bad
/// status, unreadable body) is an error.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn fetch_current(&self, city: &str) -> anyhow::Result<CityWeather>;
}
