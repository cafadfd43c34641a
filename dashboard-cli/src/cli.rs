use std::sync::Arc;

use anyhow::{Context, anyhow};
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use inquire::{CustomType, Text};
use weather_dashboard_core::{Config, PRESET_LOCATIONS, SearchController, provider_from_config};

use crate::{dashboard, render::render_dashboard};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-dashboard", version, about = "Weather dashboard with mock data")]
pub struct Cli {
    #[command(flatten)]
    pub overrides: Overrides,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Flags that take precedence over the config file.
#[derive(Debug, Default, Args)]
pub struct Overrides {
    /// Location shown at startup.
    #[arg(long, global = true)]
    pub location: Option<String>,

    /// Simulated provider latency in milliseconds.
    #[arg(long, global = true)]
    pub latency_ms: Option<u64>,

    /// Seed for reproducible mock temperatures.
    #[arg(long, global = true)]
    pub seed: Option<u64>,
}

impl Overrides {
    pub fn apply(&self, config: &mut Config) -> anyhow::Result<()> {
        if let Some(location) = &self.location {
            config.set_default_location(location)?;
        }
        if let Some(latency_ms) = self.latency_ms {
            config.latency_ms = latency_ms;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        Ok(())
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Open the interactive dashboard (default).
    Dashboard,

    /// Search once and print the dashboard for a location.
    Show {
        /// Location name.
        location: String,

        /// Print the weather data as JSON instead of the dashboard.
        #[arg(long)]
        json: bool,
    },

    /// List the popular-cities shortcuts.
    Presets,

    /// Edit and save the default location, latency and seed.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load()?;
        self.overrides.apply(&mut config)?;

        match self.command.unwrap_or(Command::Dashboard) {
            Command::Dashboard => dashboard::run(controller_for(&config)).await,
            Command::Show { location, json } => show(controller_for(&config), &location, json).await,
            Command::Presets => {
                for (i, name) in PRESET_LOCATIONS.iter().enumerate() {
                    println!("{}. {name}", i + 1);
                }
                Ok(())
            }
            Command::Configure => configure(config).await,
        }
    }
}

fn controller_for(config: &Config) -> SearchController {
    let provider = Arc::from(provider_from_config(config));
    SearchController::initialize(provider, &config.default_location)
}

async fn show(controller: SearchController, location: &str, json: bool) -> anyhow::Result<()> {
    let handle = controller
        .submit(location)
        .ok_or_else(|| anyhow!("Location must not be empty."))?;
    handle.await.context("Weather fetch task failed")?;

    let state = controller.snapshot();
    if json {
        let current = state.current().context("No current conditions available")?;
        let payload = serde_json::json!({
            "location": state.active_location(),
            "current": current,
            "forecast": state.forecast(),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        print!("{}", render_dashboard(&state, &PRESET_LOCATIONS, Local::now()));
    }

    Ok(())
}

async fn configure(mut config: Config) -> anyhow::Result<()> {
    let config = tokio::task::spawn_blocking(move || -> anyhow::Result<Config> {
        let location = Text::new("Default location:")
            .with_default(&config.default_location)
            .prompt()?;
        config.set_default_location(&location)?;

        config.latency_ms = CustomType::<u64>::new("Simulated latency (ms):")
            .with_default(config.latency_ms)
            .with_error_message("Please enter a whole number of milliseconds")
            .prompt()?;

        let seed = Text::new("Random seed (leave empty for none):")
            .with_default(&config.seed.map(|s| s.to_string()).unwrap_or_default())
            .prompt()?;
        config.seed = match seed.trim() {
            "" => None,
            s => Some(s.parse().with_context(|| format!("Invalid seed '{s}'"))?),
        };

        Ok(config)
    })
    .await
    .context("Configuration prompt failed")??;

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}
