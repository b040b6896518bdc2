//! Pure display transforms over an already fetched snapshot.
//!
//! Nothing here touches the network: toggling units or picking an icon never
//! triggers a refetch.

use serde::{Deserialize, Serialize};

/// Temperature unit used for rendering. Snapshots always hold Fahrenheit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Fahrenheit,
    Celsius,
}

impl TemperatureUnit {
    pub fn toggled(self) -> Self {
        match self {
            TemperatureUnit::Fahrenheit => TemperatureUnit::Celsius,
            TemperatureUnit::Celsius => TemperatureUnit::Fahrenheit,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            TemperatureUnit::Fahrenheit => "°F",
            TemperatureUnit::Celsius => "°C",
        }
    }

    /// Label for the toggle control, naming the conversion it performs.
    pub fn toggle_label(self) -> &'static str {
        match self {
            TemperatureUnit::Fahrenheit => "°F to °C",
            TemperatureUnit::Celsius => "°C to °F",
        }
    }

    pub fn from_fahrenheit(self, fahrenheit: f64) -> f64 {
        match self {
            TemperatureUnit::Fahrenheit => fahrenheit,
            TemperatureUnit::Celsius => fahrenheit_to_celsius(fahrenheit),
        }
    }

    /// One decimal place plus unit, e.g. `72.0°F`.
    pub fn format(self, fahrenheit: f64) -> String {
        format!("{:.1}{}", self.from_fahrenheit(fahrenheit), self.symbol())
    }
}

pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Icon category for a provider condition text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionCategory {
    #[default]
    Sunny,
    Cloudy,
    Rain,
    Wind,
}

impl ConditionCategory {
    /// Case-insensitive exact match; unknown text maps to the default.
    pub fn from_condition(text: &str) -> Self {
        match text.trim().to_lowercase().as_str() {
            "sunny" | "clear" => Self::Sunny,
            "partly cloudy" | "cloudy" | "overcast" => Self::Cloudy,
            "rain" | "light rain" | "heavy rain" => Self::Rain,
            "wind" | "windy" => Self::Wind,
            _ => Self::default(),
        }
    }

    /// Single glyph for terminal output.
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Sunny => "☀",
            Self::Cloudy => "☁",
            Self::Rain => "☂",
            Self::Wind => "≋",
        }
    }
}

pub const HOT_ADVICE: &str =
    "It's hot out there! Don't forget to stay hydrated and wear sunscreen.";
pub const COLD_ADVICE: &str = "It's chilly today. Bundle up before heading out!";
pub const RAIN_ADVICE: &str = "Don't forget your umbrella!";
pub const WIND_ADVICE: &str = "It's windy today. Secure any loose items outdoors.";
pub const PLEASANT_ADVICE: &str = "Enjoy the pleasant weather today!";

/// Advice for a Celsius temperature and condition. First match wins:
/// hot, cold, rain, wind, pleasant.
pub fn recommendation(temperature_c: f64, condition: &str) -> &'static str {
    let condition = condition.to_lowercase();

    if temperature_c > 30.0 {
        HOT_ADVICE
    } else if temperature_c < 10.0 {
        COLD_ADVICE
    } else if condition.contains("rain") {
        RAIN_ADVICE
    } else if condition.contains("wind") {
        WIND_ADVICE
    } else {
        PLEASANT_ADVICE
    }
}

/// [`recommendation`] for a Fahrenheit reading, independent of display unit.
pub fn recommendation_for_fahrenheit(temperature_f: f64, condition: &str) -> &'static str {
    recommendation(fahrenheit_to_celsius(temperature_f), condition)
}
