//! Reduction of the provider's 3-hourly forecast series to one reading per day.
//!
//! Samples are grouped by their calendar date in the city's local time. For
//! each date the first sample seen stands for the day, unless a sample taken
//! at exactly 12:00 local time shows up, in which case that one wins. Only
//! days strictly after `today` are kept, in date order, at most
//! [`FORECAST_DAYS`] of them.

use std::collections::BTreeMap;
use std::ops::Bound::{Excluded, Unbounded};

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Timelike};
use tracing::warn;

use crate::model::{DailyForecastEntry, RawForecastSample};

/// Upper bound on the number of days returned.
pub const FORECAST_DAYS: usize = 5;

const REPRESENTATIVE_HOUR: u32 = 12;

/// Build the daily forecast shown under the current conditions.
///
/// `today` must be computed with the same `offset` that is used for the
/// visible clock, see [`crate::clock::local_today`].
pub fn aggregate(
    samples: &[RawForecastSample],
    today: NaiveDate,
    offset: FixedOffset,
) -> Vec<DailyForecastEntry> {
    let mut by_date: BTreeMap<NaiveDate, &RawForecastSample> = BTreeMap::new();

    for sample in samples {
        let Some(local) = local_time(sample.timestamp, offset) else {
            warn!(timestamp = sample.timestamp, "Skipping forecast sample with out-of-range timestamp");
            continue;
        };

        by_date
            .entry(local.date_naive())
            .and_modify(|representative| {
                if local.hour() == REPRESENTATIVE_HOUR {
                    *representative = sample;
                }
            })
            .or_insert(sample);
    }

    by_date
        .range((Excluded(today), Unbounded))
        .take(FORECAST_DAYS)
        .map(|(date, sample)| DailyForecastEntry {
            date: *date,
            weekday: date.weekday(),
            temperature_c: sample.temperature_c.round() as i64,
            condition: sample.condition.clone(),
        })
        .collect()
}

fn local_time(timestamp: i64, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    DateTime::from_timestamp(timestamp, 0).map(|utc| utc.with_timezone(&offset))
}
