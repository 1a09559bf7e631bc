use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;
use std::collections::HashSet;

use crate::analyzers::join::{Joined, join_daily};
use crate::analyzers::types::{Condition, DailyWeather, Trip};
use crate::analyzers::utility::{group_by_first_seen, share};

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct WeekdayTrend {
    pub day: String,
    pub total_trips: usize,
    pub sunny_weather: ConditionTrips,
    pub rainy_weather: ConditionTrips,
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConditionTrips {
    pub trips: usize,
    pub share: String,
    pub distinct_days: usize,
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Trips per day of week, split by the day's dominant weather.
///
/// Ordered Monday through Sunday. Weekdays with no joined trip are omitted.
#[tracing::instrument(skip_all, fields(trips = trips.len(), days = daily.len()))]
pub fn weekly_trends(trips: &[Trip], daily: &[DailyWeather]) -> Vec<WeekdayTrend> {
    let joined = join_daily(trips, daily);

    let mut buckets = group_by_first_seen(joined, |j| j.trip.started_at.weekday());
    // Sunday sorts last.
    buckets.sort_by_key(|(day, _)| day.number_from_monday());

    buckets
        .into_iter()
        .map(|(day, rows)| WeekdayTrend {
            day: weekday_name(day).to_string(),
            total_trips: rows.len(),
            sunny_weather: condition_trips(&rows, Condition::Sunny),
            rainy_weather: condition_trips(&rows, Condition::Rainy),
        })
        .collect()
}

fn condition_trips(rows: &[Joined<'_, DailyWeather>], condition: Condition) -> ConditionTrips {
    let matching: Vec<&Joined<'_, DailyWeather>> = rows
        .iter()
        .filter(|j| j.weather.dominant_condition() == condition)
        .collect();
    let distinct_days = matching
        .iter()
        .map(|j| j.trip.started_at.date())
        .collect::<HashSet<NaiveDate>>()
        .len();

    ConditionTrips {
        trips: matching.len(),
        share: share(matching.len(), rows.len(), 0),
        distinct_days,
    }
}
