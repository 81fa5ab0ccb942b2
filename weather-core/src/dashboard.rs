//! Dashboard state and its transitions.
//!
//! The whole dashboard is one value. Each event consumes the current state
//! and returns the next one, so the event loop only ever holds a single
//! `DashboardState` and nothing is mutated behind its back.
//!
//! Every search is stamped with a [`RequestTag`]. A completion is applied
//! only when its tag is the latest one issued; anything older is dropped,
//! so a slow response for an earlier search can never overwrite a newer one.

use chrono::{DateTime, FixedOffset, Utc};
use tracing::debug;

use crate::{
    clock::city_now,
    error::WeatherError,
    model::{CurrentWeatherSnapshot, DailyForecastEntry, TemperatureUnit, Theme, utc_offset},
    service::Lookup,
};

/// Monotonically increasing search number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RequestTag(u64);

impl RequestTag {
    fn next(self) -> Self {
        RequestTag(self.0 + 1)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Lifecycle of the latest search.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Pending {
        city: String,
    },
    Succeeded,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub unit: TemperatureUnit,
    pub theme: Theme,
    /// City wall-clock time as of the last tick.
    pub clock: DateTime<FixedOffset>,
    pub current: Option<CurrentWeatherSnapshot>,
    pub forecast: Vec<DailyForecastEntry>,
    pub forecast_error: Option<String>,
    pub status: FetchStatus,
    offset: FixedOffset,
    latest_tag: RequestTag,
}

impl DashboardState {
    pub fn new(now: DateTime<Utc>, unit: TemperatureUnit, theme: Theme) -> Self {
        let offset = utc_offset();
        Self {
            unit,
            theme,
            clock: city_now(now, offset),
            current: None,
            forecast: Vec::new(),
            forecast_error: None,
            status: FetchStatus::Idle,
            offset,
            latest_tag: RequestTag::default(),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, FetchStatus::Pending { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            FetchStatus::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    /// Offset applied to the clock: the last successfully looked-up city's.
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn latest_tag(&self) -> RequestTag {
        self.latest_tag
    }

    pub fn tick(self, utc_now: DateTime<Utc>) -> Self {
        Self {
            clock: city_now(utc_now, self.offset),
            ..self
        }
    }

    /// Start a new search. Blank input is ignored and yields no tag.
    ///
    /// Prior error state is cleared straight away, before any response.
    pub fn search_requested(self, city: &str) -> (Self, Option<RequestTag>) {
        let city = city.trim();
        if city.is_empty() {
            return (self, None);
        }

        let tag = self.latest_tag.next();
        debug!(tag = tag.value(), city, "Search requested");
        let next = Self {
            status: FetchStatus::Pending { city: city.to_string() },
            forecast_error: None,
            latest_tag: tag,
            ..self
        };
        (next, Some(tag))
    }

    pub fn fetch_succeeded(self, tag: RequestTag, lookup: Lookup) -> Self {
        if self.is_stale(tag) {
            return self;
        }

        let offset = lookup.current.offset();
        let (forecast, forecast_error) = match lookup.forecast {
            Ok(days) => (days, None),
            Err(err) => (Vec::new(), Some(err.to_string())),
        };

        Self {
            clock: self.clock.with_timezone(&offset),
            current: Some(lookup.current),
            forecast,
            forecast_error,
            status: FetchStatus::Succeeded,
            offset,
            ..self
        }
    }

    /// The previous snapshot, if any, stays on screen under the error.
    pub fn fetch_failed(self, tag: RequestTag, error: &WeatherError) -> Self {
        if self.is_stale(tag) {
            return self;
        }

        Self {
            status: FetchStatus::Failed(error.to_string()),
            ..self
        }
    }

    pub fn unit_toggled(self) -> Self {
        Self {
            unit: self.unit.toggled(),
            ..self
        }
    }

    pub fn theme_toggled(self) -> Self {
        Self {
            theme: self.theme.toggled(),
            ..self
        }
    }

    fn is_stale(&self, tag: RequestTag) -> bool {
        let stale = tag != self.latest_tag;
        if stale {
            debug!(
                tag = tag.value(),
                latest = self.latest_tag.value(),
                "Discarding stale response"
            );
        }
        stale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Weekday};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 10, 0, 0).unwrap()
    }

    fn fresh() -> DashboardState {
        DashboardState::new(now(), TemperatureUnit::Celsius, Theme::Light)
    }

    fn lookup(city: &str, offset_secs: i32) -> Lookup {
        Lookup {
            current: CurrentWeatherSnapshot {
                city: city.to_string(),
                utc_offset_secs: offset_secs,
                temperature_c: 12,
                condition: "Rain".into(),
                humidity_pct: 80,
                wind_speed_mps: 5.0,
                feels_like_c: 10,
            },
            forecast: Ok(vec![DailyForecastEntry {
                date: NaiveDate::from_ymd_opt(2026, 10, 20).unwrap(),
                weekday: Weekday::Tue,
                temperature_c: 14,
                condition: "Clouds".into(),
            }]),
        }
    }

    #[test]
    fn search_sets_pending_and_clears_error() {
        let (state, tag) = fresh().search_requested("Nowhere");
        let state = state.fetch_failed(tag.unwrap(), &WeatherError::CityNotFound("Nowhere".into()));
        assert_eq!(state.error(), Some("City not found: Nowhere"));

        let (state, _) = state.search_requested("  Oslo ");

        assert!(state.is_loading());
        assert_eq!(state.error(), None);
        assert_eq!(state.status, FetchStatus::Pending { city: "Oslo".into() });
    }

    #[test]
    fn blank_search_is_ignored() {
        let before = fresh();
        let (after, tag) = before.clone().search_requested("   ");
        assert!(tag.is_none());
        assert_eq!(after, before);
    }

    #[test]
    fn tags_increase() {
        let (state, first) = fresh().search_requested("Oslo");
        let (_, second) = state.search_requested("Lima");
        assert!(second.unwrap() > first.unwrap());
    }

    #[test]
    fn success_replaces_snapshot_and_moves_clock() {
        let (state, tag) = fresh().search_requested("Oslo");
        let state = state.fetch_succeeded(tag.unwrap(), lookup("Oslo", 3600));

        assert_eq!(state.status, FetchStatus::Succeeded);
        assert_eq!(state.current.as_ref().map(|c| c.city.as_str()), Some("Oslo"));
        assert_eq!(state.forecast.len(), 1);
        assert_eq!(state.offset().local_minus_utc(), 3600);
        assert_eq!(state.clock.format("%H:%M:%S").to_string(), "11:00:00");

        let state = state.tick(now() + chrono::Duration::seconds(1));
        assert_eq!(state.clock.format("%H:%M:%S").to_string(), "11:00:01");
    }

    #[test]
    fn stale_response_does_not_overwrite_newer_one() {
        let (state, old) = fresh().search_requested("Oslo");
        let (state, new) = state.search_requested("Lima");

        let state = state.fetch_succeeded(new.unwrap(), lookup("Lima", -5 * 3600));
        let state = state.fetch_succeeded(old.unwrap(), lookup("Oslo", 3600));

        assert_eq!(state.current.as_ref().map(|c| c.city.as_str()), Some("Lima"));
        assert_eq!(state.offset().local_minus_utc(), -5 * 3600);
    }

    #[test]
    fn stale_failure_is_ignored_while_newer_pending() {
        let (state, old) = fresh().search_requested("Oslo");
        let (state, _) = state.search_requested("Lima");

        let state = state.fetch_failed(old.unwrap(), &WeatherError::Network("reset".into()));

        assert!(state.is_loading());
        assert_eq!(state.error(), None);
    }

    #[test]
    fn forecast_error_is_kept_beside_snapshot() {
        let (state, tag) = fresh().search_requested("Oslo");
        let mut result = lookup("Oslo", 3600);
        result.forecast = Err(WeatherError::Upstream(500));

        let state = state.fetch_succeeded(tag.unwrap(), result);

        assert!(state.current.is_some());
        assert!(state.forecast.is_empty());
        assert_eq!(state.forecast_error.as_deref(), Some("API error: 500"));
        assert_eq!(state.error(), None);
    }

    #[test]
    fn failure_keeps_previous_snapshot() {
        let (state, tag) = fresh().search_requested("Oslo");
        let state = state.fetch_succeeded(tag.unwrap(), lookup("Oslo", 3600));
        let (state, tag) = state.search_requested("Atlantis");

        let state = state.fetch_failed(tag.unwrap(), &WeatherError::CityNotFound("Atlantis".into()));

        assert_eq!(state.error(), Some("City not found: Atlantis"));
        assert_eq!(state.current.as_ref().map(|c| c.city.as_str()), Some("Oslo"));
    }

    #[test]
    fn toggles_only_touch_their_field() {
        let state = fresh().unit_toggled();
        assert_eq!(state.unit, TemperatureUnit::Fahrenheit);
        assert_eq!(state.theme, Theme::Light);

        let state = state.theme_toggled();
        assert_eq!(state.theme, Theme::Dark);
        assert_eq!(state.unit, TemperatureUnit::Fahrenheit);
    }
}
