use crate::{Config, WeatherReport, provider::mock::MockWeatherProvider};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod mock;

/// Failures a real data source could report. The mock never produces them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("Location not found: {0}")]
    LocationNotFound(String),

    #[error("Weather provider unavailable: {0}")]
    ProviderUnavailable(String),
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Dataset shown before the first search.
    fn default_report(&self, location: &str) -> WeatherReport;

    async fn fetch(&self, location: &str) -> Result<WeatherReport, ProviderError>;
}

/// Construct the mock provider with latency and seed taken from config.
pub fn provider_from_config(config: &Config) -> Box<dyn WeatherProvider> {
    let mut provider =
        MockWeatherProvider::new().with_latency(config.latency());

    if let Some(seed) = config.seed {
        provider = provider.with_seed(seed);
    }

    Box::new(provider)
}
