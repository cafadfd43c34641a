use std::{
    sync::{Mutex, PoisonError},
    time::Duration,
};

use async_trait::async_trait;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::model::{CurrentConditions, ForecastDay, IconKey, WeatherReport};

use super::{ProviderError, WeatherProvider};

pub const DEFAULT_LATENCY: Duration = Duration::from_millis(800);

/// Stand-in data source. Serves a fixed template with the temperatures
/// redrawn on every fetch, after a simulated network delay.
#[derive(Debug)]
pub struct MockWeatherProvider {
    latency: Duration,
    rng: Mutex<StdRng>,
}

impl MockWeatherProvider {
    pub fn new() -> Self {
        Self {
            latency: DEFAULT_LATENCY,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Make the temperature draws reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    fn randomized_report(&self, location: &str) -> WeatherReport {
        let mut report = base_report(location);
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);

        report.current.temperature_c = f64::from(rng.gen_range(18..=27_i32));
        for day in report.forecast.iter_mut() {
            day.high_c = f64::from(rng.gen_range(20..=27_i32));
            day.low_c = f64::from(rng.gen_range(15..=22_i32));
        }

        report
    }
}

impl Default for MockWeatherProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WeatherProvider for MockWeatherProvider {
    fn default_report(&self, location: &str) -> WeatherReport {
        base_report(location)
    }

    async fn fetch(&self, location: &str) -> Result<WeatherReport, ProviderError> {
        tokio::time::sleep(self.latency).await;
        Ok(self.randomized_report(location))
    }
}

fn base_report(location: &str) -> WeatherReport {
    WeatherReport {
        current: CurrentConditions {
            location_name: location.to_string(),
            temperature_c: 22.0,
            condition: "Partly Cloudy".to_string(),
            humidity_pct: 65,
            wind_speed_kmh: 12.0,
            feels_like_c: 21.0,
            icon: IconKey::Cloud,
        },
        forecast: [
            forecast_day("Today", "Oct 15", 24.0, 18.0, "Sunny", IconKey::Sun),
            forecast_day("Tue", "Oct 16", 23.0, 17.0, "Cloudy", IconKey::Cloud),
            forecast_day("Wed", "Oct 17", 21.0, 16.0, "Rain", IconKey::CloudRain),
            forecast_day("Thu", "Oct 18", 22.0, 17.0, "Partly Cloudy", IconKey::Cloud),
            forecast_day("Fri", "Oct 19", 25.0, 19.0, "Sunny", IconKey::Sun),
        ],
    }
}

fn forecast_day(
    day: &str,
    date: &str,
    high_c: f64,
    low_c: f64,
    condition: &str,
    icon: IconKey,
) -> ForecastDay {
    ForecastDay {
        day_label: day.to_string(),
        date_label: date.to_string(),
        high_c,
        low_c,
        condition: condition.to_string(),
        icon,
    }
}
