use serde::Serialize;

use crate::analyzers::types::Trip;
use crate::analyzers::utility::Tally;

pub const TOP_N: usize = 5;

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PopularityReport {
    pub top_stations: Vec<StationVisits>,
    pub top_routes: Vec<RouteCount>,
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct StationVisits {
    pub station_name: String,
    pub total_visits: usize,
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RouteCount {
    pub from: String,
    pub to: String,
    pub trip_count: usize,
}

/// Most visited stations and most ridden routes.
///
/// A station is counted once per start mention and once per end mention.
/// Ties keep first-seen order, with all start mentions scanned before any
/// end mention.
#[tracing::instrument(skip_all, fields(trips = trips.len()))]
pub fn popular_spots(trips: &[Trip]) -> PopularityReport {
    let stations: Tally<&str> = trips
        .iter()
        .map(|t| t.start_station_name.as_str())
        .chain(trips.iter().map(|t| t.end_station_name.as_str()))
        .filter(|s| !s.is_empty())
        .collect();

    let routes: Tally<(&str, &str)> = trips
        .iter()
        .filter(|t| !t.start_station_name.is_empty() && !t.end_station_name.is_empty())
        .map(|t| (t.start_station_name.as_str(), t.end_station_name.as_str()))
        .collect();

    tracing::debug!(
        stations = stations.len(),
        routes = routes.len(),
        "Distinct stations and routes"
    );

    PopularityReport {
        top_stations: stations
            .top(TOP_N)
            .into_iter()
            .map(|(name, count)| StationVisits {
                station_name: name.to_string(),
                total_visits: count,
            })
            .collect(),
        top_routes: routes
            .top(TOP_N)
            .into_iter()
            .map(|((from, to), count)| RouteCount {
                from: from.to_string(),
                to: to.to_string(),
                trip_count: count,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::testing::{route, trip};

    fn ride(from: &str, to: &str) -> Trip {
        route(trip("r", "2025-09-01 08:00", 10.0), from, to)
    }

    #[test]
    fn test_empty_trips() {
        let report = popular_spots(&[]);
        assert!(report.top_stations.is_empty());
        assert!(report.top_routes.is_empty());
    }

    #[test]
    fn test_station_counts_start_and_end_mentions() {
        let trips = vec![ride("A", "B"), ride("B", "A"), ride("B", "C")];
        let report = popular_spots(&trips);

        assert_eq!(
            report.top_stations[0],
            StationVisits {
                station_name: "B".into(),
                total_visits: 3
            }
        );
        assert_eq!(report.top_stations[1].station_name, "A");
        assert_eq!(report.top_stations[1].total_visits, 2);
        assert_eq!(report.top_stations[2].station_name, "C");
    }

    #[test]
    fn test_empty_station_names_excluded() {
        let trips = vec![ride("", "B"), ride("A", ""), ride("", "")];
        let report = popular_spots(&trips);

        assert_eq!(report.top_stations.len(), 2);
        assert!(report.top_stations.iter().all(|s| !s.station_name.is_empty()));
        assert!(report.top_routes.is_empty());
    }

    #[test]
    fn test_routes_are_ordered_pairs() {
        let trips = vec![ride("A", "B"), ride("B", "A"), ride("A", "B")];
        let report = popular_spots(&trips);

        assert_eq!(
            report.top_routes,
            vec![
                RouteCount {
                    from: "A".into(),
                    to: "B".into(),
                    trip_count: 2
                },
                RouteCount {
                    from: "B".into(),
                    to: "A".into(),
                    trip_count: 1
                },
            ]
        );
    }

    #[test]
    fn test_top_five_descending_with_first_seen_ties() {
        let trips: Vec<Trip> = ["S1", "S2", "S3", "S4", "S5", "S6", "S7"]
            .iter()
            .map(|s| ride(s, ""))
            .chain(std::iter::once(ride("S7", "")))
            .collect();
        let report = popular_spots(&trips);

        assert_eq!(report.top_stations.len(), TOP_N);
        let names: Vec<&str> = report
            .top_stations
            .iter()
            .map(|s| s.station_name.as_str())
            .collect();
        assert_eq!(names, vec!["S7", "S1", "S2", "S3", "S4"]);
        assert!(
            report
                .top_stations
                .windows(2)
                .all(|w| w[0].total_visits >= w[1].total_visits)
        );
    }

    #[test]
    fn test_counts_invariant_under_permutation() {
        let trips = vec![ride("A", "B"), ride("C", "B"), ride("A", "B"), ride("B", "C")];
        let mut reversed = trips.clone();
        reversed.reverse();

        let count_of = |report: &PopularityReport, name: &str| {
            report
                .top_stations
                .iter()
                .find(|s| s.station_name == name)
                .map(|s| s.total_visits)
        };

        let a = popular_spots(&trips);
        let b = popular_spots(&reversed);
        for name in ["A", "B", "C"] {
            assert_eq!(count_of(&a, name), count_of(&b, name));
        }
        assert_eq!(a.top_routes[0], b.top_routes[0]);
    }
}
