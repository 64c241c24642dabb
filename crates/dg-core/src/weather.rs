//! Current-weather report and the gardening tip derived from it.

use crate::model::null_as_default;
use serde::{Deserialize, Serialize};

pub const TIP_NO_WEATHER: &str = "Check your local weather for plant care tips";
pub const TIP_HOT: &str = "High temperature today - water your plants early morning or evening";
pub const TIP_HUMID: &str = "High humidity - reduce watering frequency to prevent root rot";
pub const TIP_COOL: &str = "Cool weather - protect sensitive plants and reduce watering";
pub const TIP_MILD: &str = "Perfect weather for gardening - maintain regular care routine";

/// Above this temperature (°C) the heat tip applies.
pub const HOT_ABOVE_C: f64 = 25.0;
/// Above this relative humidity (%) the humidity tip applies.
pub const HUMID_ABOVE_PCT: f64 = 80.0;
/// Below this temperature (°C) the cool-weather tip applies.
pub const COOL_BELOW_C: f64 = 10.0;

/// Subset of the upstream current-weather payload. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherReport {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub main: WeatherMain,
    #[serde(deserialize_with = "null_as_default")]
    pub weather: Vec<WeatherCondition>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherMain {
    /// Degrees Celsius.
    pub temp: Option<f64>,
    /// Relative humidity in percent.
    pub humidity: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherCondition {
    #[serde(deserialize_with = "null_as_default")]
    pub main: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
}

impl WeatherReport {
    pub fn new(name: &str, temp: f64, humidity: f64) -> Self {
        Self {
            name: name.to_string(),
            main: WeatherMain {
                temp: Some(temp),
                humidity: Some(humidity),
            },
            weather: Vec::new(),
        }
    }

    /// Canned report served when no live weather is available.
    pub fn demo() -> Self {
        let mut report = Self::new("Demo Location", 22.0, 65.0);
        report.weather.push(WeatherCondition {
            main: "Clear".to_string(),
            description: "clear sky".to_string(),
        });
        report
    }

    /// Headline such as `London - 18°C`.
    pub fn headline(&self) -> String {
        match self.main.temp {
            Some(t) => format!("{} - {}°C", self.name, t.round()),
            None => self.name.clone(),
        }
    }

    /// First condition description, if any.
    pub fn condition(&self) -> Option<&str> {
        self.weather.first().map(|c| c.description.as_str())
    }
}

/// Pick the care tip for the current weather.
///
/// The checks run hot, humid, cool in that order, so a hot and humid day
/// gets the heat tip and a cool but humid day gets the humidity tip.
/// Missing readings never match a threshold.
pub fn weather_tip(report: Option<&WeatherReport>) -> &'static str {
    let Some(report) = report else {
        return TIP_NO_WEATHER;
    };
    let temp = report.main.temp;
    let humidity = report.main.humidity;

    if temp.is_some_and(|t| t > HOT_ABOVE_C) {
        TIP_HOT
    } else if humidity.is_some_and(|h| h > HUMID_ABOVE_PCT) {
        TIP_HUMID
    } else if temp.is_some_and(|t| t < COOL_BELOW_C) {
        TIP_COOL
    } else {
        TIP_MILD
    }
}
