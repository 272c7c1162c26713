use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const KELVIN_OFFSET: f64 = 273.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Celsius,
    Fahrenheit,
}

impl Unit {
    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Celsius => "°C",
            Unit::Fahrenheit => "°F",
        }
    }

    pub fn opposite(self) -> Unit {
        match self {
            Unit::Celsius => Unit::Fahrenheit,
            Unit::Fahrenheit => Unit::Celsius,
        }
    }

    /// Label of the button that switches a message to this unit.
    pub fn switch_label(self) -> &'static str {
        match self {
            Unit::Celsius => "Show in Celsius",
            Unit::Fahrenheit => "Show in Fahrenheit",
        }
    }
}

/// Rounds to 2 decimals using exact decimal rounding of the binary value.
pub fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    round2(kelvin - KELVIN_OFFSET)
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    round2(celsius * 9.0 / 5.0 + 32.0)
}

pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    round2((fahrenheit - 32.0) * 5.0 / 9.0)
}

/// Integral values keep one decimal ("15.0"), everything else uses the
/// shortest form that round-trips ("21.11").
pub fn format_degrees(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// A temperature as displayed in one message. Only one unit is live.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureReading {
    pub city: String,
    pub value: f64,
    pub unit: Unit,
}

impl TemperatureReading {
    pub fn new(city: impl Into<String>, value: f64, unit: Unit) -> Self {
        Self {
            city: city.into(),
            value,
            unit,
        }
    }

    pub fn from_kelvin(city: impl Into<String>, kelvin: f64) -> Self {
        Self::new(city, kelvin_to_celsius(kelvin), Unit::Celsius)
    }

    pub fn text(&self) -> String {
        format!(
            "The temperature in {} is {}{}",
            self.city,
            format_degrees(self.value),
            self.unit.symbol()
        )
    }

    /// The request carried by this message's toggle button.
    pub fn toggle(&self) -> ToggleRequest {
        ToggleRequest {
            unit: self.unit.opposite(),
            value: self.value,
            city: self.city.clone(),
        }
    }
}

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("malformed toggle payload: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("toggle value is not a finite number: {0}")]
    NonFinite(f64),
}

/// State round-tripped through the toggle button's callback data.
///
/// `unit` is the unit to switch to, `value` is the number currently shown
/// in the other unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToggleRequest {
    pub unit: Unit,
    pub value: f64,
    pub city: String,
}

impl ToggleRequest {
    pub fn label(&self) -> &'static str {
        self.unit.switch_label()
    }

    pub fn encode(&self) -> Result<String, PayloadError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn decode(data: &str) -> Result<Self, PayloadError> {
        let request: ToggleRequest = serde_json::from_str(data)?;
        if !request.value.is_finite() {
            return Err(PayloadError::NonFinite(request.value));
        }
        Ok(request)
    }

    /// Converts the shown value and returns the reading to display next.
    pub fn apply(&self) -> TemperatureReading {
        let value = match self.unit {
            Unit::Fahrenheit => celsius_to_fahrenheit(self.value),
            Unit::Celsius => fahrenheit_to_celsius(self.value),
        };
        TemperatureReading::new(self.city.clone(), value, self.unit)
    }
}
