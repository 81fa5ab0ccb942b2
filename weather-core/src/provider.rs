use crate::{
    Config,
    error::WeatherError,
    model::{CurrentWeatherSnapshot, RawForecastSample},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// The two calls a lookup is made of. They are independent requests keyed by
/// the same city name and fail independently.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_current(&self, city: &str) -> Result<CurrentWeatherSnapshot, WeatherError>;

    /// The raw 3-hourly series, ascending by timestamp.
    async fn fetch_forecast_series(&self, city: &str) -> Result<Vec<RawForecastSample>, WeatherError>;
}

/// Construct the OpenWeather provider from config.
///
/// Missing credentials are reported here, before anything touches the network.
pub fn provider_from_config(config: &Config) -> Result<Box<dyn WeatherProvider>, WeatherError> {
    let credentials = config.credentials()?;
    Ok(Box::new(OpenWeatherProvider::new(credentials)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = provider_from_config(&cfg).unwrap_err();
        assert_eq!(err, WeatherError::ConfigMissing("api_key"));
    }

    #[test]
    fn provider_from_config_works_when_configured() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());

        let provider = provider_from_config(&cfg).expect("provider must build");
        assert!(format!("{provider:?}").contains("OpenWeatherProvider"));
    }
}
