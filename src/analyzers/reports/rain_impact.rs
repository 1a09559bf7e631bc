use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashSet;

use crate::analyzers::join::{Joined, join_daily};
use crate::analyzers::types::{
    CLASSIC_BIKE, Condition, DailyWeather, ELECTRIC_BIKE, RiderClass, Trip,
};
use crate::analyzers::utility::{group_by_first_seen, round_to, share};

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RainImpact {
    pub condition: Condition,
    pub general: General,
    pub user_distribution: UserDistribution,
    pub bike_distribution: BikeDistribution,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct General {
    pub days_in_analysis: usize,
    pub total_trips: usize,
    pub avg_trips_per_day: f64,
    pub avg_duration_min: f64,
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CountShare {
    pub count: usize,
    pub share: String,
}

impl CountShare {
    fn of(count: usize, total: usize) -> Self {
        Self {
            count,
            share: share(count, total, 1),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserDistribution {
    pub member: CountShare,
    pub casual: CountShare,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BikeDistribution {
    pub electric: CountShare,
    pub classic: CountShare,
}

/// Compares riding on rainy and sunny days, classified by daily precipitation.
///
/// Groups appear in the order their condition is first seen in the join.
#[tracing::instrument(skip_all, fields(trips = trips.len(), days = daily.len()))]
pub fn rain_impact(trips: &[Trip], daily: &[DailyWeather]) -> Vec<RainImpact> {
    let joined = join_daily(trips, daily);

    group_by_first_seen(joined, |j| j.weather.dominant_condition())
        .into_iter()
        .map(|(condition, rows)| summarize(condition, &rows))
        .collect()
}

fn summarize(condition: Condition, rows: &[Joined<'_, DailyWeather>]) -> RainImpact {
    let total = rows.len();
    let days = rows
        .iter()
        .map(|j| j.trip.started_at.date())
        .collect::<HashSet<NaiveDate>>()
        .len();
    let duration_sum: f64 = rows.iter().map(|j| j.trip.duration_minutes()).sum();

    let riders = |class: RiderClass| rows.iter().filter(|j| j.trip.rider() == class).count();
    let bikes = |tag: &str| rows.iter().filter(|j| j.trip.rideable_type == tag).count();

    RainImpact {
        condition,
        general: General {
            days_in_analysis: days,
            total_trips: total,
            avg_trips_per_day: if days > 0 {
                round_to(total as f64 / days as f64, 1)
            } else {
                0.0
            },
            avg_duration_min: if total > 0 {
                round_to(duration_sum / total as f64, 2)
            } else {
                0.0
            },
        },
        user_distribution: UserDistribution {
            member: CountShare::of(riders(RiderClass::Member), total),
            casual: CountShare::of(riders(RiderClass::Casual), total),
        },
        bike_distribution: BikeDistribution {
            electric: CountShare::of(bikes(ELECTRIC_BIKE), total),
            classic: CountShare::of(bikes(CLASSIC_BIKE), total),
        },
    }
}
