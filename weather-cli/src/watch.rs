use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use console::Term;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
};
use tracing::{debug, info};
use weather_core::{
    DashboardState, Lookup, LookupService, RequestTag, TemperatureUnit, Theme, WeatherError,
};

use crate::render;

type Completion = (RequestTag, Result<Lookup, WeatherError>);

// DECSC/DECRC: the user's half-typed input line survives a clock update.
const SAVE_CURSOR: &str = "\x1b7";
const RESTORE_CURSOR: &str = "\x1b8";
const HOME_AND_CLEAR_LINE: &str = "\x1b[H\x1b[2K";

/// How much of the screen an event invalidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Redraw {
    Clock,
    Full,
}

/// A line typed under the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Search(String),
    ToggleUnit,
    ToggleTheme,
    Quit,
    Nothing,
}

impl Input {
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            "" => Input::Nothing,
            ":u" => Input::ToggleUnit,
            ":t" => Input::ToggleTheme,
            ":q" => Input::Quit,
            city => Input::Search(city.to_string()),
        }
    }
}

/// Run the live dashboard until `:q` or end of input.
pub async fn run(service: LookupService, city: String, unit: TemperatureUnit, theme: Theme) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Completion>();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    let term = Term::stdout();

    let mut state = DashboardState::new(Utc::now(), unit, theme);
    state = start_search(state, &city, &service, &tx);
    info!(%city, "Dashboard started");
    draw(&term, &state)?;

    loop {
        let redraw = tokio::select! {
            _ = ticker.tick() => {
                state = state.tick(Utc::now());
                Redraw::Clock
            }
            Some((tag, result)) = rx.recv() => {
                state = match result {
                    Ok(lookup) => state.fetch_succeeded(tag, lookup),
                    Err(err) => state.fetch_failed(tag, &err),
                };
                Redraw::Full
            }
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    break;
                };
                state = match Input::parse(&line) {
                    Input::Search(city) => start_search(state, &city, &service, &tx),
                    Input::ToggleUnit => state.unit_toggled(),
                    Input::ToggleTheme => state.theme_toggled(),
                    Input::Quit => break,
                    Input::Nothing => state,
                };
                Redraw::Full
            }
        };

        match redraw {
            Redraw::Clock => term
                .write_str(&clock_frame(&state))
                .context("Failed to update clock")?,
            Redraw::Full => draw(&term, &state)?,
        }
    }

    Ok(())
}

/// Issue a tagged lookup in the background; its completion comes back through `tx`.
fn start_search(
    state: DashboardState,
    city: &str,
    service: &LookupService,
    tx: &mpsc::UnboundedSender<Completion>,
) -> DashboardState {
    let (state, tag) = state.search_requested(city);
    let Some(tag) = tag else {
        return state;
    };

    let service = service.clone();
    let city = city.trim().to_string();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = service.lookup(&city, Utc::now()).await;
        if tx.send((tag, result)).is_err() {
            debug!(tag = tag.value(), "Dashboard closed before lookup finished");
        }
    });

    state
}

/// Rewrites only the top row, leaving the rest of the screen and the cursor alone.
fn clock_frame(state: &DashboardState) -> String {
    format!(
        "{SAVE_CURSOR}{HOME_AND_CLEAR_LINE}{}{RESTORE_CURSOR}",
        render::clock_line(state)
    )
}

fn draw(term: &Term, state: &DashboardState) -> Result<()> {
    term.clear_screen().context("Failed to clear terminal")?;
    term.write_str(&render::render(state))
        .context("Failed to write dashboard")?;
    term.write_line("")?;
    term.write_line(&render::controls(state))?;
    Ok(())
}
