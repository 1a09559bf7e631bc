use chrono::NaiveDateTime;
use serde::Serialize;

use crate::analyzers::types::Trip;
use crate::analyzers::utility::round_to;

pub const NO_VALID_TRIPS: &str = "No valid trips found.";

/// Ride-time statistics over trips with a positive duration.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RideTimeReport {
    NoData(NoData),
    Stats(RideTimeStats),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NoData {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RideTimeStats {
    pub summary: RideTimeSummary,
    pub longest_trip: LongestTrip,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RideTimeSummary {
    pub analyzed_trips: usize,
    pub total_time_minutes: f64,
    pub avg_time_minutes: f64,
    pub max_time_minutes: f64,
    /// How many trips share the maximum duration.
    pub trips_tied_at_max: usize,
}

/// The first trip, in input order, whose duration equals the maximum.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LongestTrip {
    pub ride_id: String,
    pub start_station_name: String,
    pub end_station_name: String,
    pub started_at: NaiveDateTime,
    pub duration: f64,
}

impl RideTimeReport {
    pub fn is_no_data(&self) -> bool {
        matches!(self, RideTimeReport::NoData(_))
    }
}

#[tracing::instrument(skip_all, fields(trips = trips.len()))]
pub fn ride_time_stats(trips: &[Trip]) -> RideTimeReport {
    let valid: Vec<(&Trip, f64)> = trips
        .iter()
        .map(|t| (t, t.duration_minutes()))
        .filter(|(_, d)| *d > 0.0)
        .collect();

    // First maximum wins: later trips only replace it when strictly longer.
    let mut longest: Option<(&Trip, f64)> = None;
    let mut total = 0.0;
    for &(trip, d) in &valid {
        total += d;
        if longest.is_none_or(|(_, max)| d > max) {
            longest = Some((trip, d));
        }
    }

    let Some((longest_trip, max)) = longest else {
        tracing::debug!("No trip with a positive duration");
        return RideTimeReport::NoData(NoData {
            message: NO_VALID_TRIPS.to_string(),
        });
    };

    let tied = valid.iter().filter(|(_, d)| *d == max).count();

    RideTimeReport::Stats(RideTimeStats {
        summary: RideTimeSummary {
            analyzed_trips: valid.len(),
            total_time_minutes: round_to(total, 2),
            avg_time_minutes: round_to(total / valid.len() as f64, 2),
            max_time_minutes: round_to(max, 2),
            trips_tied_at_max: tied,
        },
        longest_trip: LongestTrip {
            ride_id: longest_trip.ride_id.clone(),
            start_station_name: longest_trip.start_station_name.clone(),
            end_station_name: longest_trip.end_station_name.clone(),
            started_at: longest_trip.started_at,
            duration: round_to(max, 2),
        },
    })
}
