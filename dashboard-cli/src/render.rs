//! Text projection of a [`ViewState`] snapshot.

use std::fmt::Write;

use chrono::{DateTime, Local};

use weather_dashboard_core::{CurrentConditions, ForecastDay, ViewState};

const CARD_WIDTH: usize = 16;

const WEATHER_TIPS: [&str; 3] = [
    "Perfect day for outdoor activities",
    "UV index is moderate today",
    "Light jacket recommended for evening",
];

/// `now` supplies the date shown in the current-conditions panel.
pub fn render_dashboard(state: &ViewState, presets: &[&str], now: DateTime<Local>) -> String {
    let mut out = String::new();

    out.push_str("☁ Weather Dashboard\n");
    out.push_str("Real-time weather updates and 5-day forecast\n\n");

    render_search_bar(&mut out, state);

    if let Some(error) = state.last_error() {
        let _ = writeln!(out, "! {error}\n");
    }

    if let Some(current) = state.current() {
        render_current(&mut out, current, now);
    }

    render_forecast(&mut out, state.forecast());
    render_sidebar(&mut out, presets);
    render_footer(&mut out, state);

    out
}

fn render_search_bar(out: &mut String, state: &ViewState) {
    let button = if state.is_loading() { "Searching..." } else { "Search" };
    let _ = writeln!(out, "🔍 [{:<30}] ({button})", state.pending_search_text());
    let _ = writeln!(out, "Showing: {}\n", state.active_location());
}

fn render_current(out: &mut String, current: &CurrentConditions, now: DateTime<Local>) {
    let _ = writeln!(out, "{}  {}", current.location_name, current.icon.glyph());
    let _ = writeln!(out, "{}", current.condition);
    let _ = writeln!(out, "{:.0}°C", current.temperature_c);

    let _ = writeln!(out, "{}", now.format("%A, %B %-d"));

    let _ = writeln!(
        out,
        "Feels Like {:.0}°C · Humidity {}% · Wind {:.0} km/h · Updated Just now\n",
        current.feels_like_c, current.humidity_pct, current.wind_speed_kmh,
    );
}

fn render_forecast(out: &mut String, days: &[ForecastDay]) {
    out.push_str("5-Day Forecast\n");
    if days.is_empty() {
        out.push('\n');
        return;
    }

    card_row(out, days, |i, d| {
        if i == 0 { format!("*{}", d.day_label) } else { d.day_label.clone() }
    });
    card_row(out, days, |_, d| d.date_label.clone());
    card_row(out, days, |_, d| d.icon.glyph().to_string());
    card_row(out, days, |_, d| d.condition.clone());
    card_row(out, days, |_, d| format!("{:.0}° / {:.0}°", d.high_c, d.low_c));
    out.push('\n');
}

fn card_row(out: &mut String, days: &[ForecastDay], cell: impl Fn(usize, &ForecastDay) -> String) {
    let line: String = days
        .iter()
        .enumerate()
        .map(|(i, day)| format!("{:<width$}", cell(i, day), width = CARD_WIDTH))
        .collect();
    let _ = writeln!(out, "{}", line.trim_end());
}

fn render_sidebar(out: &mut String, presets: &[&str]) {
    out.push_str("Popular Cities\n");
    for (i, name) in presets.iter().enumerate() {
        let _ = writeln!(out, "  {}. {:<20} 22°C", i + 1, name);
    }

    out.push_str("\nWeather Tips\n");
    for tip in WEATHER_TIPS {
        let _ = writeln!(out, "  • {tip}");
    }
    out.push('\n');
}

fn render_footer(out: &mut String, state: &ViewState) {
    out.push_str("Weather data updates every 15 minutes");
    if let Some(updated) = state.last_updated() {
        let _ = write!(out, " • Last updated: {}", updated.format("%H:%M"));
    }
    out.push('\n');
}
