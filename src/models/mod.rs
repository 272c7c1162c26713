pub mod session;
pub mod temperature;

pub use session::SessionState;
pub use temperature::{PayloadError, TemperatureReading, ToggleRequest, Unit};
