//! Temporal equi-joins between trips and weather.
//!
//! Both joins are inner and multiplicative: a trip without a matching weather
//! row is dropped, and a trip matching several rows appears once per row.
//! Results follow trip order, then weather order within a key.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use std::collections::HashMap;
use std::hash::Hash;

use crate::analyzers::types::{DailyWeather, HourlyWeather, Trip};

/// Calendar date plus hour-of-day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HourKey {
    pub date: NaiveDate,
    pub hour: u32,
}

impl HourKey {
    pub fn of(ts: &NaiveDateTime) -> Self {
        Self {
            date: ts.date(),
            hour: ts.hour(),
        }
    }
}

/// A trip paired with one matching weather row.
#[derive(Debug, Clone, Copy)]
pub struct Joined<'a, W> {
    pub trip: &'a Trip,
    pub weather: &'a W,
}

/// Joins trips to weather rows wherever the two derived keys are equal.
pub fn join_on<'a, W, K, TK, WK>(
    trips: &'a [Trip],
    weather: &'a [W],
    trip_key: TK,
    weather_key: WK,
) -> Vec<Joined<'a, W>>
where
    K: Eq + Hash,
    TK: Fn(&Trip) -> K,
    WK: Fn(&W) -> K,
{
    let mut index: HashMap<K, Vec<&'a W>> = HashMap::new();
    for w in weather {
        index.entry(weather_key(w)).or_default().push(w);
    }

    let mut joined = Vec::new();
    for trip in trips {
        if let Some(matches) = index.get(&trip_key(trip)) {
            joined.extend(matches.iter().map(|w| Joined { trip, weather: *w }));
        }
    }
    joined
}

/// Joins on the calendar date of the trip start.
pub fn join_daily<'a>(trips: &'a [Trip], daily: &'a [DailyWeather]) -> Vec<Joined<'a, DailyWeather>> {
    let joined = join_on(trips, daily, |t| t.started_at.date(), |w| w.date);
    tracing::debug!(trips = trips.len(), rows = joined.len(), "Daily join");
    joined
}

/// Joins on the calendar date and hour of the trip start.
pub fn join_hourly<'a>(
    trips: &'a [Trip],
    hourly: &'a [HourlyWeather],
) -> Vec<Joined<'a, HourlyWeather>> {
    let joined = join_on(
        trips,
        hourly,
        |t| HourKey::of(&t.started_at),
        |w| HourKey::of(&w.date_time),
    );
    tracing::debug!(trips = trips.len(), rows = joined.len(), "Hourly join");
    joined
}
