use haversine::{Location, Units, distance};

use crate::analyzers::types::Trip;

/// Coordinates at or below this magnitude mean the dock reported no GPS fix.
const GPS_SENTINEL_EPSILON: f64 = 0.001;

/// Great-circle distance in kilometers (haversine, Earth radius 6371 km).
///
/// Inputs are not validated; callers filter out sentinel coordinates.
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    distance(
        Location {
            latitude: lat1,
            longitude: lon1,
        },
        Location {
            latitude: lat2,
            longitude: lon2,
        },
        Units::Kilometers,
    )
}

pub fn trip_distance_km(trip: &Trip) -> f64 {
    distance_km(trip.start_lat, trip.start_lng, trip.end_lat, trip.end_lng)
}

/// True when neither endpoint carries the (0, 0) "no fix" sentinel.
pub fn has_gps_fix(trip: &Trip) -> bool {
    [trip.start_lat, trip.start_lng, trip.end_lat, trip.end_lng]
        .iter()
        .all(|c| c.abs() > GPS_SENTINEL_EPSILON)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn trip_at(start: (f64, f64), end: (f64, f64)) -> Trip {
        let t = NaiveDate::from_ymd_opt(2025, 9, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        Trip {
            ride_id: "r".into(),
            rideable_type: "classic_bike".into(),
            started_at: t,
            ended_at: t,
            start_station_name: String::new(),
            end_station_name: String::new(),
            start_lat: start.0,
            start_lng: start.1,
            end_lat: end.0,
            end_lng: end.1,
            member_casual: "member".into(),
        }
    }

    #[test]
    fn test_distance_same_point_is_zero() {
        assert_eq!(distance_km(40.74, -74.04, 40.74, -74.04), 0.0);
    }

    #[test]
    fn test_distance_one_degree_latitude() {
        let d = distance_km(0.0, 0.0, 1.0, 0.0);
        assert!((d - 111.195).abs() < 0.01, "got {d}");
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = distance_km(40.7178, -74.0431, 40.7359, -74.0303);
        let b = distance_km(40.7359, -74.0303, 40.7178, -74.0431);
        assert!((a - b).abs() < 1e-9);
        assert!(a > 2.0 && a < 2.5, "got {a}");
    }

    #[test]
    fn test_has_gps_fix() {
        assert!(has_gps_fix(&trip_at((40.7, -74.0), (40.8, -74.1))));
        assert!(!has_gps_fix(&trip_at((40.7, -74.0), (0.0, 0.0))));
        assert!(!has_gps_fix(&trip_at((0.0005, -74.0), (40.8, -74.1))));
    }
}
