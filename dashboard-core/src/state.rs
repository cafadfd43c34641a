//! The single snapshot of what the dashboard displays.
//!
//! Fields are read through getters; every mutation goes through one of the
//! named operations below so a snapshot never mixes old and new data.

use chrono::{DateTime, Local};

use crate::{
    model::{CurrentConditions, ForecastDay, WeatherReport},
    provider::ProviderError,
};

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    active_location: String,
    pending_search_text: String,
    current: Option<CurrentConditions>,
    forecast: Vec<ForecastDay>,
    is_loading: bool,
    last_error: Option<String>,
    last_updated: Option<DateTime<Local>>,
}

impl ViewState {
    /// Seed the state with the default location's dataset.
    pub fn initialize(location: &str, report: WeatherReport) -> Self {
        let mut state = Self {
            active_location: String::new(),
            pending_search_text: String::new(),
            current: None,
            forecast: Vec::new(),
            is_loading: false,
            last_error: None,
            last_updated: None,
        };
        state.apply_update(location, report);
        state
    }

    /// Swap in a provider result. Location, conditions and all forecast
    /// days are replaced together; the busy flag and search text are reset.
    pub fn apply_update(&mut self, location: &str, report: WeatherReport) {
        let WeatherReport { current, forecast } = report;

        self.active_location = location.to_string();
        self.current = Some(current);
        self.forecast = Vec::from(forecast);
        self.is_loading = false;
        self.pending_search_text.clear();
        self.last_error = None;
        self.last_updated = Some(Local::now());
    }

    /// Record a provider failure. Displayed data stays as it was.
    pub fn apply_failure(&mut self, error: &ProviderError) {
        self.is_loading = false;
        self.last_error = Some(error.to_string());
    }

    pub(crate) fn begin_search(&mut self, location: &str) {
        self.is_loading = true;
        self.active_location = location.to_string();
    }

    /// Returns whether the text changed.
    pub(crate) fn set_pending_search_text(&mut self, text: &str) -> bool {
        if self.pending_search_text == text {
            return false;
        }
        self.pending_search_text = text.to_string();
        true
    }

    pub fn active_location(&self) -> &str {
        &self.active_location
    }

    pub fn pending_search_text(&self) -> &str {
        &self.pending_search_text
    }

    pub fn current(&self) -> Option<&CurrentConditions> {
        self.current.as_ref()
    }

    /// Empty before the first update, otherwise exactly five days.
    pub fn forecast(&self) -> &[ForecastDay] {
        &self.forecast
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn last_updated(&self) -> Option<DateTime<Local>> {
        self.last_updated
    }
}
