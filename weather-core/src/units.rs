use crate::model::TemperatureUnit;

/// `F = round(C * 9/5 + 32)`, rounding half away from zero.
pub fn celsius_to_fahrenheit(celsius: f64) -> i64 {
    (celsius * 9.0 / 5.0 + 32.0).round() as i64
}

/// Convert an already rounded Celsius reading for display in `unit`.
pub fn convert(celsius: i64, unit: TemperatureUnit) -> i64 {
    match unit {
        TemperatureUnit::Celsius => celsius,
        TemperatureUnit::Fahrenheit => celsius_to_fahrenheit(celsius as f64),
    }
}

/// e.g. `21°C` or `70°F`.
pub fn format_temperature(celsius: i64, unit: TemperatureUnit) -> String {
    format!("{}{}", convert(celsius, unit), unit.symbol())
}
