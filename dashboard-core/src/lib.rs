//! Core library for the weather dashboard.
//!
//! This crate defines:
//! - Shared domain models (current conditions, forecast days, reports)
//! - The `ViewState` store and the `SearchController` that mutates it
//! - Abstraction over weather providers, with a mock implementation
//! - Configuration handling
//!
//! It is used by `weather-dashboard`, but any other front end can drive the
//! same controller and subscribe to its state.

pub mod config;
pub mod controller;
pub mod model;
pub mod provider;
pub mod state;

pub use config::Config;
pub use controller::{PRESET_LOCATIONS, SearchController};
pub use model::{CurrentConditions, FORECAST_DAYS, ForecastDay, IconKey, WeatherReport};
pub use provider::{ProviderError, WeatherProvider, mock::MockWeatherProvider, provider_from_config};
pub use state::ViewState;
