use serde::Serialize;

use crate::analyzers::join::join_hourly;
use crate::analyzers::types::{HourlyWeather, Trip};
use crate::analyzers::utility::{group_by_first_seen, mean, round_to};

pub const BRACKET_WIDTH: f64 = 5.0;

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TemperatureBracket {
    pub temperature_range: String,
    pub trip_count: usize,
    pub average_temp_in_bracket: f64,
}

/// Lower bound of the half-open bracket containing `temp` (floored, so
/// `-0.5` falls in `[-5, 0)`).
pub fn temperature_bracket(temp: f64) -> i64 {
    ((temp / BRACKET_WIDTH).floor() * BRACKET_WIDTH) as i64
}

/// Trip counts per 5°C bracket of the hourly temperature at departure,
/// busiest bracket first.
#[tracing::instrument(skip_all, fields(trips = trips.len(), hours = hourly.len()))]
pub fn temperature_brackets(trips: &[Trip], hourly: &[HourlyWeather]) -> Vec<TemperatureBracket> {
    let temps = join_hourly(trips, hourly)
        .into_iter()
        .map(|j| j.weather.temperature);

    let mut brackets: Vec<TemperatureBracket> = group_by_first_seen(temps, |t| temperature_bracket(*t))
        .into_iter()
        .map(|(lower, temps)| TemperatureBracket {
            temperature_range: format!("{} - {}°C", lower, lower + BRACKET_WIDTH as i64),
            trip_count: temps.len(),
            average_temp_in_bracket: round_to(mean(&temps), 1),
        })
        .collect();

    brackets.sort_by(|a, b| b.trip_count.cmp(&a.trip_count));
    brackets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::testing::{hourly, trip};

    #[test]
    fn test_bracket_floors() {
        assert_eq!(temperature_bracket(0.0), 0);
        assert_eq!(temperature_bracket(4.99), 0);
        assert_eq!(temperature_bracket(5.0), 5);
        assert_eq!(temperature_bracket(23.4), 20);
        assert_eq!(temperature_bracket(-0.5), -5);
        assert_eq!(temperature_bracket(-5.0), -5);
        assert_eq!(temperature_bracket(-5.1), -10);
    }

    #[test]
    fn test_brackets_ordered_by_count_not_temperature() {
        let trips = vec![
            trip("a", "2025-09-01 08:10", 10.0),
            trip("b", "2025-09-01 14:10", 10.0),
            trip("c", "2025-09-01 15:20", 10.0),
        ];
        let weather = vec![
            hourly("2025-09-01 08:00", 12.0, 0.0, 0.0),
            hourly("2025-09-01 14:00", 21.0, 0.0, 0.0),
            hourly("2025-09-01 15:00", 23.0, 0.0, 0.0),
        ];

        let report = temperature_brackets(&trips, &weather);

        assert_eq!(report.len(), 2);
        assert_eq!(report[0].temperature_range, "20 - 25°C");
        assert_eq!(report[0].trip_count, 2);
        assert_eq!(report[0].average_temp_in_bracket, 22.0);
        assert_eq!(report[1].temperature_range, "10 - 15°C");
        assert_eq!(report[1].trip_count, 1);
    }

    #[test]
    fn test_negative_bracket_label() {
        let trips = vec![trip("a", "2025-01-10 08:10", 10.0)];
        let weather = vec![hourly("2025-01-10 08:00", -2.3, 0.0, 0.0)];

        let report = temperature_brackets(&trips, &weather);

        assert_eq!(report[0].temperature_range, "-5 - 0°C");
        assert_eq!(report[0].average_temp_in_bracket, -2.3);
    }

    #[test]
    fn test_two_weather_rows_same_hour_count_twice() {
        let trips = vec![trip("a", "2025-09-01 08:10", 10.0)];
        let weather = vec![
            hourly("2025-09-01 08:00", 16.0, 0.0, 0.0),
            hourly("2025-09-01 08:00", 18.0, 0.0, 0.0),
        ];

        let report = temperature_brackets(&trips, &weather);

        assert_eq!(report.len(), 1);
        assert_eq!(report[0].trip_count, 2);
        assert_eq!(report[0].average_temp_in_bracket, 17.0);
    }

    #[test]
    fn test_trips_outside_weather_coverage_are_excluded() {
        let trips = vec![trip("a", "2025-09-01 08:10", 10.0)];
        let weather = vec![hourly("2025-09-01 09:00", 16.0, 0.0, 0.0)];
        assert!(temperature_brackets(&trips, &weather).is_empty());
    }
}
