use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use tracing::{debug, instrument, warn};

use crate::{
    config::Credentials,
    error::WeatherError,
    model::{CurrentWeatherSnapshot, RawForecastSample},
};

use super::WeatherProvider;

const UNKNOWN_CONDITION: &str = "Unknown";

#[derive(Clone)]
pub struct OpenWeatherProvider {
    credentials: Credentials,
    http: Client,
}

// Keeps the API key out of logs.
impl std::fmt::Debug for OpenWeatherProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherProvider")
            .field("base_url", &self.credentials.base_url)
            .finish_non_exhaustive()
    }
}

impl OpenWeatherProvider {
    pub fn new(credentials: Credentials) -> Self {
        Self::with_client(credentials, Client::new())
    }

    pub fn with_client(credentials: Credentials, http: Client) -> Self {
        Self { credentials, http }
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str, city: &str) -> Result<T, WeatherError> {
        let url = format!("{}/{}", self.credentials.base_url, endpoint);
        debug!(%url, city, "Sending OpenWeather request");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.credentials.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(network_error)?;

        let status = res.status();
        let body = res.text().await.map_err(network_error)?;

        if !status.is_success() {
            let err = WeatherError::from_status(status.as_u16(), city);
            warn!(
                endpoint,
                status = status.as_u16(),
                kind = err.kind(),
                body = %truncate_body(&body),
                "OpenWeather request failed"
            );
            return Err(err);
        }

        serde_json::from_str(&body).map_err(|e| {
            WeatherError::InvalidResponse(format!("{endpoint}: {e}"))
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    #[serde(default)]
    timezone: i32,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwForecastMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

fn first_condition(weather: Vec<OwWeather>) -> String {
    weather
        .into_iter()
        .next()
        .map(|w| w.main)
        .unwrap_or_else(|| UNKNOWN_CONDITION.to_string())
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self))]
    async fn fetch_current(&self, city: &str) -> Result<CurrentWeatherSnapshot, WeatherError> {
        let parsed: OwCurrentResponse = self.get_json("weather", city).await?;

        Ok(CurrentWeatherSnapshot {
            city: parsed.name,
            utc_offset_secs: parsed.timezone,
            temperature_c: parsed.main.temp.round() as i64,
            condition: first_condition(parsed.weather),
            humidity_pct: parsed.main.humidity,
            wind_speed_mps: parsed.wind.speed,
            feels_like_c: parsed.main.feels_like.round() as i64,
        })
    }

    #[instrument(skip(self))]
    async fn fetch_forecast_series(&self, city: &str) -> Result<Vec<RawForecastSample>, WeatherError> {
        let parsed: OwForecastResponse = self.get_json("forecast", city).await?;
        debug!(samples = parsed.list.len(), "Received forecast series");

        Ok(parsed
            .list
            .into_iter()
            .map(|entry| RawForecastSample {
                timestamp: entry.dt,
                temperature_c: entry.main.temp,
                condition: first_condition(entry.weather),
            })
            .collect())
    }
}

/// reqwest puts the request URL, `appid` included, into its message.
fn network_error(err: reqwest::Error) -> WeatherError {
    WeatherError::Network(err.without_url().to_string())
}

fn truncate_body(body: &str) -> &str {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body;
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
