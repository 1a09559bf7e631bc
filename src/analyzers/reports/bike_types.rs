use serde::Serialize;

use crate::analyzers::types::{RiderClass, Trip};
use crate::analyzers::utility::{Tally, group_by_first_seen, round_to};

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BikeTypeStats {
    pub bike_type: String,
    pub durations: Durations,
    pub user_counts: UserCounts,
    pub top_stations: TopStations,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Durations {
    pub average_minutes: f64,
    pub max_minutes: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserCounts {
    pub casual: usize,
    pub member: usize,
    pub total: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TopStations {
    pub most_frequent_start: String,
    pub most_frequent_end: String,
}

/// Per bike-type durations, rider mix and busiest stations, busiest type first.
///
/// Durations cover every trip of the type, including malformed ones.
#[tracing::instrument(skip_all, fields(trips = trips.len()))]
pub fn compare_bike_types(trips: &[Trip]) -> Vec<BikeTypeStats> {
    let mut stats: Vec<BikeTypeStats> = group_by_first_seen(trips, |t| t.rideable_type.as_str())
        .into_iter()
        .map(|(bike_type, group)| summarize(bike_type, &group))
        .collect();

    stats.sort_by(|a, b| b.user_counts.total.cmp(&a.user_counts.total));
    stats
}

fn summarize(bike_type: &str, group: &[&Trip]) -> BikeTypeStats {
    let durations: Vec<f64> = group.iter().map(|t| t.duration_minutes()).collect();
    let average = durations.iter().sum::<f64>() / durations.len() as f64;
    let max = durations.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let starts: Tally<&str> = group
        .iter()
        .map(|t| t.start_station_name.as_str())
        .filter(|s| !s.is_empty())
        .collect();
    let ends: Tally<&str> = group
        .iter()
        .map(|t| t.end_station_name.as_str())
        .filter(|s| !s.is_empty())
        .collect();

    BikeTypeStats {
        bike_type: bike_type.to_string(),
        durations: Durations {
            average_minutes: round_to(average, 2),
            max_minutes: round_to(max, 2),
        },
        user_counts: UserCounts {
            casual: group.iter().filter(|t| t.rider() == RiderClass::Casual).count(),
            member: group.iter().filter(|t| t.rider() == RiderClass::Member).count(),
            total: group.len(),
        },
        top_stations: TopStations {
            most_frequent_start: station_label(&starts),
            most_frequent_end: station_label(&ends),
        },
    }
}

fn station_label(tally: &Tally<&str>) -> String {
    match tally.most_frequent() {
        Some((name, count)) => format!("{name} ({count})"),
        None => "N/A".to_string(),
    }
}
