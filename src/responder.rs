use std::sync::Arc;

use crate::models::{PayloadError, TemperatureReading, ToggleRequest};
use crate::weather::{CityWeather, WeatherProvider};

pub const START_PROMPT: &str = "Write a city name to get the weather.";
pub const HELP_TEXT: &str = "Use /start to test this bot.";
pub const START_REMINDER: &str = "Please start by typing /start to initiate the process.";
pub const CITY_NOT_FOUND: &str = "City not found. Please enter a valid city name.";
pub const LOOKUP_FAILED: &str =
    "Sorry, something went wrong while fetching the weather. Please try again later.";

/// Text to send or edit in, with the unit toggle to attach, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingMessage {
    pub text: String,
    pub toggle: Option<ToggleRequest>,
}

impl OutgoingMessage {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            toggle: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Found(TemperatureReading),
    NotFound,
}

#[derive(Clone)]
pub struct TemperatureResponder {
    weather: Arc<dyn WeatherProvider>,
}

impl TemperatureResponder {
    pub fn new(weather: Arc<dyn WeatherProvider>) -> Self {
        Self { weather }
    }

    /// Looks the city up exactly as typed and converts the result to Celsius.
    pub async fn lookup_city(&self, city: &str) -> anyhow::Result<Lookup> {
        match self.weather.fetch_current(city).await? {
            CityWeather::Found { kelvin } => {
                Ok(Lookup::Found(TemperatureReading::from_kelvin(city, kelvin)))
            }
            CityWeather::NotFound => Ok(Lookup::NotFound),
        }
    }
}

pub fn city_accepted(city: &str) -> OutgoingMessage {
    OutgoingMessage::plain(format!(
        "You entered the city: {}. Now I will retrieve the weather for this city.",
        city
    ))
}

pub fn render_initial(reading: &TemperatureReading) -> OutgoingMessage {
    OutgoingMessage {
        text: reading.text(),
        toggle: Some(reading.toggle()),
    }
}

/// Converts the value carried by a toggle button. No provider call is made.
pub fn handle_toggle(payload: &str) -> Result<OutgoingMessage, PayloadError> {
    let request = ToggleRequest::decode(payload)?;
    let reading = request.apply();
    // Huge inputs overflow and would not survive the next JSON round trip.
    if !reading.value.is_finite() {
        return Err(PayloadError::NonFinite(reading.value));
    }
    Ok(render_initial(&reading))
}
