use chrono::{FixedOffset, NaiveDate, Offset, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// One 3-hour slot of the provider's forecast series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawForecastSample {
    /// Unix seconds.
    pub timestamp: i64,
    pub temperature_c: f64,
    pub condition: String,
}

/// The representative reading for one upcoming calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyForecastEntry {
    pub date: NaiveDate,
    pub weekday: Weekday,
    pub temperature_c: i64,
    pub condition: String,
}

impl DailyForecastEntry {
    /// Three-letter label, e.g. "Tue".
    pub fn weekday_label(&self) -> &'static str {
        weekday_label(self.weekday)
    }
}

/// Current conditions for the searched city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeatherSnapshot {
    pub city: String,
    /// Seconds east of UTC, as reported by the provider.
    pub utc_offset_secs: i32,
    pub temperature_c: i64,
    pub condition: String,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub feels_like_c: i64,
}

impl CurrentWeatherSnapshot {
    /// The city's offset; out-of-range values from the provider collapse to UTC.
    pub fn offset(&self) -> FixedOffset {
        offset_from_secs(self.utc_offset_secs)
    }
}

pub fn offset_from_secs(secs: i32) -> FixedOffset {
    FixedOffset::east_opt(secs).unwrap_or_else(utc_offset)
}

pub fn utc_offset() -> FixedOffset {
    Utc.fix()
}

pub fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Sun",
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            TemperatureUnit::Celsius => TemperatureUnit::Fahrenheit,
            TemperatureUnit::Fahrenheit => TemperatureUnit::Celsius,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Condition groups reported in `weather[0].main`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherCondition {
    Clear,
    Clouds,
    Rain,
    Snow,
    Thunderstorm,
    Drizzle,
    Mist,
    Smoke,
    Haze,
    Dust,
    Fog,
    Other,
}

impl WeatherCondition {
    pub fn from_main(main: &str) -> Self {
        match main {
            "Clear" => Self::Clear,
            "Clouds" => Self::Clouds,
            "Rain" => Self::Rain,
            "Snow" => Self::Snow,
            "Thunderstorm" => Self::Thunderstorm,
            "Drizzle" => Self::Drizzle,
            "Mist" => Self::Mist,
            "Smoke" => Self::Smoke,
            "Haze" => Self::Haze,
            "Dust" => Self::Dust,
            "Fog" => Self::Fog,
            _ => Self::Other,
        }
    }

    /// Terminal glyph. Unknown conditions get the clear-sky look.
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Clear | Self::Other => "☀",
            Self::Clouds => "☁",
            Self::Rain => "🌧",
            Self::Snow => "❄",
            Self::Thunderstorm => "⚡",
            Self::Drizzle => "🌦",
            Self::Mist | Self::Smoke | Self::Haze | Self::Dust | Self::Fog => "🌫",
        }
    }
}
