//! Core library for the `weather` dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client behind the `WeatherProvider` abstraction
//! - Forecast aggregation into one reading per day
//! - The dashboard state and its transitions
//!
//! It is used by `weather-cli`, but can also be reused by other front ends.

pub mod clock;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod forecast;
pub mod model;
pub mod provider;
pub mod service;
pub mod units;

pub use config::{Config, Credentials};
pub use dashboard::{DashboardState, FetchStatus, RequestTag};
pub use error::WeatherError;
pub use model::{
    CurrentWeatherSnapshot, DailyForecastEntry, RawForecastSample, TemperatureUnit, Theme,
    WeatherCondition,
};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider};
pub use service::{Lookup, LookupService};
