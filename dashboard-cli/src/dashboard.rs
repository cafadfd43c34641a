//! Interactive dashboard: a menu standing in for the search form and the
//! popular-cities sidebar, redrawn from the controller's state channel.

use std::fmt;

use anyhow::Context;
use chrono::Local;
use inquire::{InquireError, Select, Text};
use tokio::sync::watch;
use weather_dashboard_core::{PRESET_LOCATIONS, SearchController, ViewState};

use crate::render::render_dashboard;

#[derive(Debug, Clone, PartialEq, Eq)]
enum MenuChoice {
    Search,
    Preset(&'static str),
    Quit,
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuChoice::Search => f.write_str("Search for a city..."),
            MenuChoice::Preset(name) => write!(f, "★ {name}"),
            MenuChoice::Quit => f.write_str("Quit"),
        }
    }
}

fn menu() -> Vec<MenuChoice> {
    std::iter::once(MenuChoice::Search)
        .chain(PRESET_LOCATIONS.into_iter().map(MenuChoice::Preset))
        .chain(std::iter::once(MenuChoice::Quit))
        .collect()
}

pub async fn run(controller: SearchController) -> anyhow::Result<()> {
    let mut updates = controller.subscribe();
    redraw(&updates.borrow_and_update());

    loop {
        let choice = match prompt(|| Select::new("Dashboard", menu()).prompt()).await? {
            Some(choice) => choice,
            None => break,
        };

        let pending = match choice {
            MenuChoice::Quit => break,
            MenuChoice::Preset(name) => controller.select_preset(name),
            MenuChoice::Search => {
                let Some(text) = prompt(|| Text::new("Search for a city...").prompt()).await?
                else {
                    continue;
                };
                controller.set_search_text(&text);
                controller.submit_pending()
            }
        };

        if pending.is_some() {
            follow_until_idle(&mut updates).await;
        }
    }

    Ok(())
}

/// Redraw on every state change until the busy flag drops.
async fn follow_until_idle(updates: &mut watch::Receiver<ViewState>) {
    loop {
        let idle = {
            let state = updates.borrow_and_update();
            redraw(&state);
            !state.is_loading()
        };
        if idle || updates.changed().await.is_err() {
            break;
        }
    }
}

fn redraw(state: &ViewState) {
    // Clear screen, cursor home.
    print!("\x1B[2J\x1B[H");
    print!("{}", render_dashboard(state, &PRESET_LOCATIONS, Local::now()));
}

/// Run a blocking inquire prompt off the runtime. Esc and Ctrl-C map to `None`.
async fn prompt<T, F>(ask: F) -> anyhow::Result<Option<T>>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, InquireError> + Send + 'static,
{
    let answer = tokio::task::spawn_blocking(ask).await.context("Prompt task failed")?;

    match answer {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(err) => Err(err.into()),
    }
}
