use std::sync::Arc;

use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, info, warn};

use crate::{provider::WeatherProvider, state::ViewState};

/// Sidebar shortcuts, in display order.
pub const PRESET_LOCATIONS: [&str; 6] = ["New York", "London", "Tokyo", "Paris", "Sydney", "Dubai"];

/// Owns the [`ViewState`] store and is the only thing that mutates it.
///
/// The store is published on a `watch` channel: renderers call
/// [`subscribe`](Self::subscribe) and redraw whenever it changes.
#[derive(Debug, Clone)]
pub struct SearchController {
    store: Arc<watch::Sender<ViewState>>,
    provider: Arc<dyn WeatherProvider>,
}

impl SearchController {
    /// Build the store seeded with `default_location`'s dataset.
    pub fn initialize(provider: Arc<dyn WeatherProvider>, default_location: &str) -> Self {
        let report = provider.default_report(default_location);
        let (store, _) = watch::channel(ViewState::initialize(default_location, report));

        Self { store: Arc::new(store), provider }
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.store.subscribe()
    }

    pub fn snapshot(&self) -> ViewState {
        self.store.borrow().clone()
    }

    /// Mirror the search field.
    pub fn set_search_text(&self, text: &str) {
        self.store.send_if_modified(|state| state.set_pending_search_text(text));
    }

    /// Start a search for `raw_text`.
    ///
    /// Blank input is ignored and returns `None`. Otherwise the state turns
    /// busy, the active location switches to the trimmed text right away and
    /// the fetch runs on a spawned task whose handle is returned. Nothing
    /// stops a second submit while one is pending; the last fetch to finish
    /// overwrites the state.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit(&self, raw_text: &str) -> Option<JoinHandle<()>> {
        let location = raw_text.trim();
        if location.is_empty() {
            return None;
        }
        let location = location.to_string();

        self.store.send_modify(|state| state.begin_search(&location));
        info!(%location, "search submitted");

        let store = Arc::clone(&self.store);
        let provider = Arc::clone(&self.provider);

        Some(tokio::spawn(async move {
            match provider.fetch(&location).await {
                Ok(report) => {
                    debug!(%location, temperature_c = report.current.temperature_c, "applying update");
                    store.send_modify(|state| state.apply_update(&location, report));
                }
                Err(err) => {
                    warn!(%location, error = %err, "weather fetch failed");
                    store.send_modify(|state| state.apply_failure(&err));
                }
            }
        }))
    }

    /// Submit whatever is in the search field.
    pub fn submit_pending(&self) -> Option<JoinHandle<()>> {
        let text = self.store.borrow().pending_search_text().to_string();
        self.submit(&text)
    }

    /// Sidebar shortcut: fill the search field with a preset and submit it.
    pub fn select_preset(&self, name: &str) -> Option<JoinHandle<()>> {
        debug!(preset = name, "preset selected");
        self.set_search_text(name);
        self.submit(name)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use super::*;
    use crate::{
        model::{FORECAST_DAYS, WeatherReport},
        provider::{ProviderError, mock::MockWeatherProvider},
    };

    fn controller_with(provider: impl WeatherProvider + 'static) -> SearchController {
        SearchController::initialize(Arc::new(provider), "Shanghai")
    }

    fn instant_controller() -> SearchController {
        controller_with(MockWeatherProvider::new().with_latency(Duration::ZERO))
    }

    /// Holds every fetch until `release` is called.
    #[derive(Debug, Default)]
    struct GatedProvider {
        gate: Notify,
    }

    impl GatedProvider {
        fn release(&self) {
            self.gate.notify_one();
        }
    }

    #[async_trait]
    impl WeatherProvider for Arc<GatedProvider> {
        fn default_report(&self, location: &str) -> WeatherReport {
            MockWeatherProvider::new().default_report(location)
        }

        async fn fetch(&self, location: &str) -> Result<WeatherReport, ProviderError> {
            self.gate.notified().await;
            Ok(self.default_report(location))
        }
    }

    /// Answers "Tokyo" slowly and everything else quickly.
    #[derive(Debug)]
    struct SlowTokyoProvider;

    #[async_trait]
    impl WeatherProvider for SlowTokyoProvider {
        fn default_report(&self, location: &str) -> WeatherReport {
            MockWeatherProvider::new().default_report(location)
        }

        async fn fetch(&self, location: &str) -> Result<WeatherReport, ProviderError> {
            let delay = if location == "Tokyo" { 50 } else { 10 };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Ok(self.default_report(location))
        }
    }

    #[derive(Debug)]
    struct UnavailableProvider;

    #[async_trait]
    impl WeatherProvider for UnavailableProvider {
        fn default_report(&self, location: &str) -> WeatherReport {
            MockWeatherProvider::new().default_report(location)
        }

        async fn fetch(&self, _location: &str) -> Result<WeatherReport, ProviderError> {
            Err(ProviderError::ProviderUnavailable("offline".into()))
        }
    }

    #[tokio::test]
    async fn blank_submissions_leave_state_untouched() {
        let controller = instant_controller();
        let mut rx = controller.subscribe();

        for input in ["", "   ", "\t\n"] {
            let before = controller.snapshot();
            assert!(controller.submit(input).is_none());
            assert_eq!(controller.snapshot(), before);
        }
        assert!(!rx.has_changed().unwrap());

        controller.set_search_text("  ");
        rx.borrow_and_update();
        let before = controller.snapshot();
        assert!(controller.submit_pending().is_none());
        assert_eq!(controller.snapshot(), before);
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn blank_submission_while_loading_is_ignored() {
        let gated = Arc::new(GatedProvider::default());
        let controller = controller_with(Arc::clone(&gated));

        let handle = controller.submit("Madrid").unwrap();
        let before = controller.snapshot();
        assert!(controller.submit(" ").is_none());
        assert_eq!(controller.snapshot(), before);

        gated.release();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn search_for_paris_lands_after_latency() {
        let controller = instant_controller();
        controller.set_search_text("Paris");

        controller.submit_pending().unwrap().await.unwrap();

        let state = controller.snapshot();
        assert_eq!(state.active_location(), "Paris");
        assert_eq!(state.current().unwrap().location_name, "Paris");
        assert_eq!(state.forecast().len(), FORECAST_DAYS);
        assert!(!state.is_loading());
        assert_eq!(state.pending_search_text(), "");
    }

    #[tokio::test]
    async fn busy_flag_brackets_the_fetch() {
        let gated = Arc::new(GatedProvider::default());
        let controller = controller_with(Arc::clone(&gated));
        assert!(!controller.snapshot().is_loading());

        controller.set_search_text("Berlin");
        let handle = controller.submit("Berlin").unwrap();

        let pending = controller.snapshot();
        assert!(pending.is_loading());
        assert_eq!(pending.active_location(), "Berlin");
        assert_eq!(pending.pending_search_text(), "Berlin");
        assert_eq!(pending.current().unwrap().location_name, "Shanghai");

        gated.release();
        handle.await.unwrap();

        let done = controller.snapshot();
        assert!(!done.is_loading());
        assert_eq!(done.pending_search_text(), "");
        assert_eq!(done.current().unwrap().location_name, "Berlin");
    }

    #[tokio::test]
    async fn active_location_is_the_trimmed_input() {
        let controller = instant_controller();

        for (input, expected) in [
            ("  São Paulo  ", "São Paulo"),
            ("New   York", "New   York"),
            ("東京", "東京"),
            ("\tKraków\n", "Kraków"),
        ] {
            controller.submit(input).unwrap().await.unwrap();

            let state = controller.snapshot();
            assert_eq!(state.active_location(), expected);
            assert_eq!(state.current().unwrap().location_name, expected);
        }
    }

    #[tokio::test]
    async fn every_update_is_fully_populated() {
        let controller = instant_controller();

        for city in PRESET_LOCATIONS {
            controller.select_preset(city).unwrap().await.unwrap();

            let state = controller.snapshot();
            let current = state.current().expect("current conditions present");
            assert_eq!(current.location_name, city);
            assert_eq!(state.forecast().len(), FORECAST_DAYS);
            assert_eq!(state.forecast()[0].day_label, "Today");
        }
    }

    #[tokio::test]
    async fn preset_fills_search_field_until_applied() {
        let gated = Arc::new(GatedProvider::default());
        let controller = controller_with(Arc::clone(&gated));

        let handle = controller.select_preset("Sydney").unwrap();

        let pending = controller.snapshot();
        assert!(pending.is_loading());
        assert_eq!(pending.pending_search_text(), "Sydney");
        assert_eq!(pending.active_location(), "Sydney");

        gated.release();
        handle.await.unwrap();

        let done = controller.snapshot();
        assert_eq!(done.pending_search_text(), "");
        assert_eq!(done.current().unwrap().location_name, "Sydney");
    }

    #[tokio::test]
    async fn overlapping_searches_settle_on_one_of_them() {
        let controller = instant_controller();

        let tokyo = controller.submit("Tokyo").unwrap();
        let oslo = controller.submit("Oslo").unwrap();
        tokyo.await.unwrap();
        oslo.await.unwrap();

        let state = controller.snapshot();
        assert!(["Tokyo", "Oslo"].contains(&state.active_location()));
        assert_eq!(state.current().unwrap().location_name, state.active_location());
        assert!(!state.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn last_completion_wins_over_last_submission() {
        let controller = controller_with(SlowTokyoProvider);

        let tokyo = controller.submit("Tokyo").unwrap();
        let oslo = controller.submit("Oslo").unwrap();

        oslo.await.unwrap();
        assert_eq!(controller.snapshot().active_location(), "Oslo");

        tokyo.await.unwrap();
        assert_eq!(controller.snapshot().active_location(), "Tokyo");
    }

    #[tokio::test]
    async fn provider_failure_is_surfaced() {
        let controller = controller_with(UnavailableProvider);

        controller.submit("Nairobi").unwrap().await.unwrap();

        let state = controller.snapshot();
        assert!(!state.is_loading());
        assert_eq!(state.last_error(), Some("Weather provider unavailable: offline"));
        assert_eq!(state.current().unwrap().location_name, "Shanghai");
    }

    #[tokio::test]
    async fn subscribers_see_each_transition() {
        let controller = instant_controller();
        let mut rx = controller.subscribe();

        let handle = controller.select_preset("London").unwrap();
        assert!(rx.borrow_and_update().is_loading());

        handle.await.unwrap();
        assert!(rx.has_changed().unwrap());
        assert!(!rx.borrow_and_update().is_loading());
    }

    #[test]
    fn six_presets() {
        assert_eq!(PRESET_LOCATIONS.len(), 6);
        assert_eq!(PRESET_LOCATIONS[0], "New York");
    }
}
