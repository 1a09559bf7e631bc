//! Fixture builders shared by the analyzer unit tests.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::analyzers::types::{DailyWeather, HourlyWeather, Trip};

pub fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
}

/// A member classic-bike trip with no stations and no GPS fix.
pub fn trip(ride_id: &str, started_at: &str, duration_minutes: f64) -> Trip {
    let start = ts(started_at);
    Trip {
        ride_id: ride_id.to_string(),
        rideable_type: "classic_bike".to_string(),
        started_at: start,
        ended_at: start + Duration::milliseconds((duration_minutes * 60_000.0).round() as i64),
        start_station_name: String::new(),
        end_station_name: String::new(),
        start_lat: 0.0,
        start_lng: 0.0,
        end_lat: 0.0,
        end_lng: 0.0,
        member_casual: "member".to_string(),
    }
}

pub fn route(mut t: Trip, from: &str, to: &str) -> Trip {
    t.start_station_name = from.to_string();
    t.end_station_name = to.to_string();
    t
}

pub fn rider(mut t: Trip, bike: &str, member_casual: &str) -> Trip {
    t.rideable_type = bike.to_string();
    t.member_casual = member_casual.to_string();
    t
}

pub fn coords(mut t: Trip, start: (f64, f64), end: (f64, f64)) -> Trip {
    t.start_lat = start.0;
    t.start_lng = start.1;
    t.end_lat = end.0;
    t.end_lng = end.1;
    t
}

pub fn daily(date: &str, total_rain: f64) -> DailyWeather {
    DailyWeather {
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        avg_temp: 20.0,
        total_rain,
    }
}

pub fn hourly(date_time: &str, temperature: f64, precipitation: f64, wind_speed: f64) -> HourlyWeather {
    HourlyWeather {
        date_time: ts(date_time),
        temperature,
        precipitation,
        wind_speed,
    }
}
