//! Turns a `DashboardState` into terminal text.

use std::fmt::Write;

use console::Style;
use weather_core::{
    DashboardState, TemperatureUnit, Theme, WeatherCondition,
    clock::format_clock,
    units::format_temperature,
};

struct Palette {
    accent: Style,
    text: Style,
    muted: Style,
    error: Style,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Palette {
                accent: Style::new().blue().bold(),
                text: Style::new().black(),
                muted: Style::new().black().dim(),
                error: Style::new().red().bold(),
            },
            Theme::Dark => Palette {
                accent: Style::new().cyan().bold(),
                text: Style::new().white(),
                muted: Style::new().white().dim(),
                error: Style::new().red().bright().bold(),
            },
        }
    }
}

/// The first row of the dashboard, without a trailing newline.
pub fn clock_line(state: &DashboardState) -> String {
    let palette = Palette::for_theme(state.theme);
    let clock = format_clock(&state.clock);
    format!(
        "{}  {}",
        palette.accent.apply_to(&clock.time),
        palette.muted.apply_to(format!("{} · {}", clock.weekday, clock.date)),
    )
}

pub fn render(state: &DashboardState) -> String {
    let palette = Palette::for_theme(state.theme);
    let mut out = clock_line(state);
    out.push_str("\n\n");

    if state.is_loading() {
        let _ = writeln!(out, "{}", palette.muted.apply_to("Loading weather data..."));
        return out;
    }

    if let Some(message) = state.error() {
        let _ = writeln!(out, "{}", palette.error.apply_to(format!("Error: {message}")));
        out.push('\n');
    }

    let Some(current) = &state.current else {
        return out;
    };

    let unit = state.unit;
    let glyph = WeatherCondition::from_main(&current.condition).glyph();
    let _ = writeln!(out, "{}", palette.accent.apply_to(&current.city));
    let _ = writeln!(
        out,
        "{glyph} {}  {}",
        palette.accent.apply_to(format_temperature(current.temperature_c, unit)),
        palette.text.apply_to(&current.condition),
    );
    let _ = writeln!(
        out,
        "{}",
        palette.muted.apply_to(format!(
            "Feels like {} · Humidity {}% · Wind {} m/s",
            format_temperature(current.feels_like_c, unit),
            current.humidity_pct,
            current.wind_speed_mps,
        )),
    );
    out.push('\n');

    let _ = writeln!(out, "{}", palette.accent.apply_to("5-Day Forecast"));
    if let Some(message) = &state.forecast_error {
        let _ = writeln!(out, "{}", palette.error.apply_to(format!("Forecast unavailable: {message}")));
    }
    for day in &state.forecast {
        let glyph = WeatherCondition::from_main(&day.condition).glyph();
        let _ = writeln!(
            out,
            "{}  {glyph} {:>5}  {}",
            palette.text.apply_to(day.weekday_label()),
            format_temperature(day.temperature_c, unit),
            palette.muted.apply_to(&day.condition),
        );
    }

    out
}

/// Key help shown under the live dashboard.
pub fn controls(state: &DashboardState) -> String {
    let unit = match state.unit {
        TemperatureUnit::Celsius => "Switch to °F",
        TemperatureUnit::Fahrenheit => "Switch to °C",
    };
    let theme = match state.theme {
        Theme::Light => "Dark Mode",
        Theme::Dark => "Light Mode",
    };
    let palette = Palette::for_theme(state.theme);
    palette
        .muted
        .apply_to(format!("Type a city to search · :u {unit} · :t {theme} · :q quit"))
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc, Weekday};
    use weather_core::{CurrentWeatherSnapshot, DailyForecastEntry, Lookup, WeatherError};

    fn plain(s: &str) -> String {
        console::strip_ansi_codes(s).into_owned()
    }

    fn loaded(forecast: Result<Vec<DailyForecastEntry>, WeatherError>) -> DashboardState {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 10, 0, 0).unwrap();
        let (state, tag) = DashboardState::new(now, TemperatureUnit::Celsius, Theme::Light)
            .search_requested("Johannesburg");
        state.fetch_succeeded(
            tag.unwrap(),
            Lookup {
                current: CurrentWeatherSnapshot {
                    city: "Johannesburg".into(),
                    utc_offset_secs: 7200,
                    temperature_c: 22,
                    condition: "Clouds".into(),
                    humidity_pct: 40,
                    wind_speed_mps: 3.1,
                    feels_like_c: 20,
                },
                forecast,
            },
        )
    }

    fn tuesday() -> DailyForecastEntry {
        DailyForecastEntry {
            date: NaiveDate::from_ymd_opt(2026, 10, 20).unwrap(),
            weekday: Weekday::Tue,
            temperature_c: 25,
            condition: "Clear".into(),
        }
    }

    #[test]
    fn renders_clock_current_and_forecast() {
        let out = plain(&render(&loaded(Ok(vec![tuesday()]))));

        assert!(out.contains("12:00:00"), "{out}");
        assert!(out.contains("Monday · Oct 19, 2026"), "{out}");
        assert!(out.contains("Johannesburg"));
        assert!(out.contains("22°C"));
        assert!(out.contains("Feels like 20°C · Humidity 40% · Wind 3.1 m/s"));
        assert!(out.contains("Tue"));
        assert!(out.contains("25°C"));
    }

    #[test]
    fn clock_line_is_the_first_row() {
        let state = loaded(Ok(vec![tuesday()]));
        let out = render(&state);

        assert_eq!(out.lines().next(), Some(clock_line(&state).as_str()));
        assert_eq!(plain(&clock_line(&state)), "12:00:00  Monday · Oct 19, 2026");
    }

    #[test]
    fn fahrenheit_converts_every_reading() {
        let state = loaded(Ok(vec![tuesday()])).unit_toggled();
        let out = plain(&render(&state));

        assert!(out.contains("72°F"));
        assert!(out.contains("Feels like 68°F"));
        assert!(out.contains("77°F"));
        assert!(!out.contains("°C"));
    }

    #[test]
    fn loading_hides_weather() {
        let (state, _) = loaded(Ok(vec![tuesday()])).search_requested("Oslo");
        let out = plain(&render(&state));

        assert!(out.contains("Loading weather data..."));
        assert!(!out.contains("Johannesburg"));
    }

    #[test]
    fn forecast_error_is_shown_beside_current() {
        let out = plain(&render(&loaded(Err(WeatherError::Upstream(500)))));

        assert!(out.contains("Johannesburg"));
        assert!(out.contains("Forecast unavailable: API error: 500"));
    }

    #[test]
    fn controls_describe_the_next_toggle() {
        let state = loaded(Ok(Vec::new()));
        let out = plain(&controls(&state));
        assert!(out.contains("Switch to °F"));
        assert!(out.contains("Dark Mode"));

        let out = plain(&controls(&state.unit_toggled().theme_toggled()));
        assert!(out.contains("Switch to °C"));
        assert!(out.contains("Light Mode"));
    }
}
