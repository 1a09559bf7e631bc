//! Typed records shared by the loader and every report pipeline.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// Hourly readings above this precipitation (mm) count as rain.
pub const HOURLY_RAIN_THRESHOLD: f64 = 0.1;

/// Days whose summed precipitation (mm) exceeds this count as rainy.
pub const DAILY_RAIN_THRESHOLD: f64 = 1.0;

pub const ELECTRIC_BIKE: &str = "electric_bike";
pub const CLASSIC_BIKE: &str = "classic_bike";

/// A single bike-share ride as it appears in the trip export.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    pub ride_id: String,
    pub rideable_type: String,
    pub started_at: NaiveDateTime,
    pub ended_at: NaiveDateTime,
    pub start_station_name: String,
    pub end_station_name: String,
    pub start_lat: f64,
    pub start_lng: f64,
    pub end_lat: f64,
    pub end_lng: f64,
    pub member_casual: String,
}

impl Trip {
    /// Ride length in minutes. Negative or zero for malformed records.
    pub fn duration_minutes(&self) -> f64 {
        (self.ended_at - self.started_at).num_milliseconds() as f64 / 60_000.0
    }

    pub fn rider(&self) -> RiderClass {
        RiderClass::from_tag(&self.member_casual)
    }
}

/// Rider classification. Tags other than `member` and `casual` are kept
/// as [`RiderClass::Unknown`] and never counted in either class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiderClass {
    Member,
    Casual,
    Unknown,
}

impl RiderClass {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "member" => RiderClass::Member,
            "casual" => RiderClass::Casual,
            _ => RiderClass::Unknown,
        }
    }
}

/// Two-valued weather classification used by both granularities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Condition {
    Sunny,
    Rainy,
}

/// One hourly observation from the weather export.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyWeather {
    pub date_time: NaiveDateTime,
    pub temperature: f64,
    pub precipitation: f64,
    pub wind_speed: f64,
}

impl HourlyWeather {
    pub fn condition(&self) -> Condition {
        if self.precipitation > HOURLY_RAIN_THRESHOLD {
            Condition::Rainy
        } else {
            Condition::Sunny
        }
    }
}

/// Weather collapsed to a calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DailyWeather {
    pub date: NaiveDate,
    pub avg_temp: f64,
    pub total_rain: f64,
}

impl DailyWeather {
    pub fn dominant_condition(&self) -> Condition {
        if self.total_rain > DAILY_RAIN_THRESHOLD {
            Condition::Rainy
        } else {
            Condition::Sunny
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn hourly(precipitation: f64) -> HourlyWeather {
        HourlyWeather {
            date_time: at("2025-09-01 08:00:00"),
            temperature: 20.0,
            precipitation,
            wind_speed: 5.0,
        }
    }

    fn daily(total_rain: f64) -> DailyWeather {
        DailyWeather {
            date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            avg_temp: 20.0,
            total_rain,
        }
    }

    #[test]
    fn test_duration_minutes_fractional() {
        let trip = Trip {
            ride_id: "r".into(),
            rideable_type: CLASSIC_BIKE.into(),
            started_at: at("2025-09-01 08:00:00"),
            ended_at: at("2025-09-01 08:12:30"),
            start_station_name: String::new(),
            end_station_name: String::new(),
            start_lat: 0.0,
            start_lng: 0.0,
            end_lat: 0.0,
            end_lng: 0.0,
            member_casual: "member".into(),
        };
        assert_eq!(trip.duration_minutes(), 12.5);
    }

    #[test]
    fn test_duration_minutes_negative_when_end_before_start() {
        let trip = Trip {
            ride_id: "r".into(),
            rideable_type: CLASSIC_BIKE.into(),
            started_at: at("2025-09-01 08:10:00"),
            ended_at: at("2025-09-01 08:00:00"),
            start_station_name: String::new(),
            end_station_name: String::new(),
            start_lat: 0.0,
            start_lng: 0.0,
            end_lat: 0.0,
            end_lng: 0.0,
            member_casual: "casual".into(),
        };
        assert_eq!(trip.duration_minutes(), -10.0);
    }

    #[test]
    fn test_hourly_condition_threshold_is_exclusive() {
        assert_eq!(hourly(0.0).condition(), Condition::Sunny);
        assert_eq!(hourly(0.1).condition(), Condition::Sunny);
        assert_eq!(hourly(0.11).condition(), Condition::Rainy);
    }

    #[test]
    fn test_daily_condition_uses_separate_threshold() {
        assert_eq!(daily(0.5).dominant_condition(), Condition::Sunny);
        assert_eq!(daily(1.0).dominant_condition(), Condition::Sunny);
        assert_eq!(daily(1.01).dominant_condition(), Condition::Rainy);
    }

    #[test]
    fn test_rider_class_passthrough() {
        assert_eq!(RiderClass::from_tag("member"), RiderClass::Member);
        assert_eq!(RiderClass::from_tag("casual"), RiderClass::Casual);
        assert_eq!(RiderClass::from_tag("Member"), RiderClass::Unknown);
        assert_eq!(RiderClass::from_tag(""), RiderClass::Unknown);
    }
}
