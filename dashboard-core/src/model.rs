use serde::{Deserialize, Serialize};

/// Number of entries in the forecast strip. Day 0 is "Today".
pub const FORECAST_DAYS: usize = 5;

/// Icon shown next to a condition label.
///
/// Keys are `sun`, `cloud` and `cloud-rain`. Anything else parses to
/// [`IconKey::Cloud`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum IconKey {
    Sun,
    #[default]
    Cloud,
    CloudRain,
}

impl IconKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            IconKey::Sun => "sun",
            IconKey::Cloud => "cloud",
            IconKey::CloudRain => "cloud-rain",
        }
    }

    pub fn from_key(key: &str) -> Self {
        match key.trim().to_lowercase().as_str() {
            "sun" => IconKey::Sun,
            "cloud-rain" => IconKey::CloudRain,
            _ => IconKey::Cloud,
        }
    }

    /// Terminal glyph for this icon.
    pub fn glyph(&self) -> &'static str {
        match self {
            IconKey::Sun => "☀",
            IconKey::Cloud => "☁",
            IconKey::CloudRain => "🌧",
        }
    }
}

impl std::fmt::Display for IconKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for IconKey {
    fn from(value: &str) -> Self {
        IconKey::from_key(value)
    }
}

impl From<String> for IconKey {
    fn from(value: String) -> Self {
        IconKey::from_key(&value)
    }
}

/// Conditions at the active location right now.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub location_name: String,
    pub temperature_c: f64,
    pub condition: String,
    pub humidity_pct: u8,
    pub wind_speed_kmh: f64,
    pub feels_like_c: f64,
    pub icon: IconKey,
}

/// One card of the forecast strip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub day_label: String,
    pub date_label: String,
    pub high_c: f64,
    pub low_c: f64,
    pub condition: String,
    pub icon: IconKey,
}

/// Everything a provider returns for one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub current: CurrentConditions,
    pub forecast: [ForecastDay; FORECAST_DAYS],
}
