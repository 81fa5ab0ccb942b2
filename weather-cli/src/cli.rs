use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::debug;
use weather_core::{
    Config, DashboardState, LookupService, OpenWeatherProvider, TemperatureUnit, Theme,
};

use crate::{configure, render, watch};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather dashboard for the terminal")]
pub struct Cli {
    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and preferences.
    Configure,

    /// Look up a city once and print the dashboard.
    Show(DisplayArgs),

    /// Live dashboard: the clock ticks every second, type a city to search.
    Watch(DisplayArgs),
}

#[derive(Debug, Args)]
pub struct DisplayArgs {
    /// City name; defaults to the configured default city.
    pub city: Option<String>,

    /// Show temperatures in Fahrenheit.
    #[arg(long)]
    pub fahrenheit: bool,

    #[arg(long, value_enum, default_value_t = ThemeArg::Light)]
    pub theme: ThemeArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(value: ThemeArg) -> Self {
        match value {
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
        }
    }
}

impl DisplayArgs {
    fn unit(&self) -> TemperatureUnit {
        if self.fahrenheit {
            TemperatureUnit::Fahrenheit
        } else {
            TemperatureUnit::Celsius
        }
    }

    fn city<'a>(&'a self, config: &'a Config) -> &'a str {
        self.city.as_deref().unwrap_or_else(|| config.default_city())
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure::run(),
            Command::Show(args) => {
                let (config, service) = startup()?;
                show(&service, args.city(&config), args.unit(), args.theme.into()).await
            }
            Command::Watch(args) => {
                let (config, service) = startup()?;
                let city = args.city(&config).to_string();
                watch::run(service, city, args.unit(), args.theme.into()).await
            }
        }
    }
}

/// Load config and check credentials before anything touches the network.
fn startup() -> anyhow::Result<(Config, LookupService)> {
    let config = Config::load().context("Failed to load configuration")?;
    let credentials = config.credentials()?;
    debug!(base_url = %credentials.base_url, "Configuration loaded");

    let provider = OpenWeatherProvider::new(credentials);
    Ok((config, LookupService::new(Arc::new(provider))))
}

async fn show(
    service: &LookupService,
    city: &str,
    unit: TemperatureUnit,
    theme: Theme,
) -> anyhow::Result<()> {
    let (state, tag) = DashboardState::new(Utc::now(), unit, theme).search_requested(city);
    let tag = tag.context("City name must not be empty")?;

    let lookup = service.lookup(city.trim(), Utc::now()).await?;
    let state = state.fetch_succeeded(tag, lookup).tick(Utc::now());

    print!("{}", render::render(&state));
    Ok(())
}
