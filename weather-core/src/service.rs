use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, instrument, warn};

use crate::{
    clock::local_today,
    error::WeatherError,
    forecast::aggregate,
    model::{CurrentWeatherSnapshot, DailyForecastEntry},
    provider::WeatherProvider,
};

/// Result of one search.
///
/// The forecast is carried separately: once current conditions (and with
/// them the city's UTC offset) are known, a failed forecast call does not
/// take the snapshot down with it.
#[derive(Debug, Clone, PartialEq)]
pub struct Lookup {
    pub current: CurrentWeatherSnapshot,
    pub forecast: Result<Vec<DailyForecastEntry>, WeatherError>,
}

/// Runs the current-then-forecast sequence against a provider.
#[derive(Debug, Clone)]
pub struct LookupService {
    provider: Arc<dyn WeatherProvider>,
}

impl LookupService {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }

    /// Fetch current conditions, then the forecast, and aggregate the latter
    /// using the city's own notion of "today" at `now`.
    #[instrument(skip(self))]
    pub async fn lookup(&self, city: &str, now: DateTime<Utc>) -> Result<Lookup, WeatherError> {
        let current = self.provider.fetch_current(city).await?;
        let offset = current.offset();
        info!(city = %current.city, utc_offset = current.utc_offset_secs, "Current weather received");

        let forecast = match self.provider.fetch_forecast_series(city).await {
            Ok(samples) => Ok(aggregate(&samples, local_today(now, offset), offset)),
            Err(err) => {
                warn!(kind = err.kind(), %err, "Forecast unavailable, keeping current conditions");
                Err(err)
            }
        };

        Ok(Lookup { current, forecast })
    }
}
