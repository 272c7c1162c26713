use serde::Deserialize;

/// Subset of the OpenWeatherMap `/data/2.5/weather` response we read.
#[derive(Clone, Debug, Deserialize)]
pub struct CurrentWeatherResponse {
    pub main: MainReadings,
}

/// Temperatures are in Kelvin since no `units` parameter is sent.
#[derive(Clone, Debug, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
}
