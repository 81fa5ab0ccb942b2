use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

/// Formatted pieces of the dashboard clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockReading {
    /// `HH:MM:SS`, 24-hour.
    pub time: String,
    /// Full weekday name, e.g. "Monday".
    pub weekday: String,
    /// Short date, e.g. "Oct 19, 2026".
    pub date: String,
}

/// Wall-clock time in the city.
pub fn city_now(utc_now: DateTime<Utc>, offset: FixedOffset) -> DateTime<FixedOffset> {
    utc_now.with_timezone(&offset)
}

/// The city's current calendar date; the forecast cut-off uses this.
pub fn local_today(utc_now: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    city_now(utc_now, offset).date_naive()
}

pub fn format_clock(at: &DateTime<FixedOffset>) -> ClockReading {
    ClockReading {
        time: at.format("%H:%M:%S").to_string(),
        weekday: at.format("%A").to_string(),
        date: at.format("%b %-d, %Y").to_string(),
    }
}
