use serde::Serialize;

use crate::analyzers::geometry::trip_distance_km;
use crate::analyzers::join::join_hourly;
use crate::analyzers::types::{HourlyWeather, Trip};
use crate::analyzers::utility::{group_by_first_seen, mean, round_to};

pub const BRACKET_WIDTH: f64 = 5.0;

/// Computed speeds at or above this (km/h) are GPS noise, not rides.
pub const MAX_PLAUSIBLE_SPEED_KMH: f64 = 60.0;

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct WindSpeedBracket {
    pub wind_range: String,
    pub average_speed: f64,
    pub trip_count: usize,
}

/// Lower bound of the wind bracket containing `wind`.
///
/// Truncates toward zero, unlike [`temperature_bracket`] which floors:
/// `-3.0` lands in bracket `0` here but in `-5` for temperature.
///
/// [`temperature_bracket`]: crate::analyzers::reports::temperature::temperature_bracket
pub fn wind_bracket(wind: f64) -> i64 {
    (wind / BRACKET_WIDTH) as i64 * BRACKET_WIDTH as i64
}

/// False for speeds at or above [`MAX_PLAUSIBLE_SPEED_KMH`].
pub fn is_plausible_speed(speed_kmh: f64) -> bool {
    speed_kmh < MAX_PLAUSIBLE_SPEED_KMH
}

/// Average riding speed per 5 km/h wind bracket, ascending by bracket.
///
/// Trips with a non-positive duration or distance are skipped, as are
/// speeds of 60 km/h or more.
#[tracing::instrument(skip_all, fields(trips = trips.len(), hours = hourly.len()))]
pub fn speed_by_wind(trips: &[Trip], hourly: &[HourlyWeather]) -> Vec<WindSpeedBracket> {
    let samples: Vec<(i64, f64)> = join_hourly(trips, hourly)
        .into_iter()
        .filter_map(|j| {
            let minutes = j.trip.duration_minutes();
            let km = trip_distance_km(j.trip);
            if minutes <= 0.0 || km <= 0.0 {
                return None;
            }
            let speed = km / (minutes / 60.0);
            is_plausible_speed(speed).then_some((wind_bracket(j.weather.wind_speed), speed))
        })
        .collect();

    let mut groups = group_by_first_seen(samples, |(bracket, _)| *bracket);
    groups.sort_by_key(|(bracket, _)| *bracket);

    groups
        .into_iter()
        .map(|(lower, rows)| {
            let speeds: Vec<f64> = rows.iter().map(|(_, s)| *s).collect();
            WindSpeedBracket {
                wind_range: format!("{}-{} km/h", lower, lower + BRACKET_WIDTH as i64),
                average_speed: round_to(mean(&speeds), 2),
                trip_count: speeds.len(),
            }
        })
        .collect()
}
