use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

use crate::analyzers::daily::aggregate_daily;
use crate::analyzers::reports::{
    BikeTypeStats, PopularityReport, RainImpact, RideTimeReport, TemperatureBracket,
    WeekdayTrend, WindSpeedBracket, compare_bike_types, popular_spots, rain_impact,
    ride_time_stats, speed_by_wind, temperature_brackets, weekly_trends,
};
use crate::analyzers::types::{DailyWeather, HourlyWeather, Trip};

/// Loaded inputs shared read-only by every report.
#[derive(Debug)]
pub struct Dataset {
    pub trips: Vec<Trip>,
    pub hourly: Vec<HourlyWeather>,
    pub daily: Vec<DailyWeather>,
}

impl Dataset {
    /// Wraps loaded records and derives the daily weather summary.
    pub fn new(trips: Vec<Trip>, hourly: Vec<HourlyWeather>) -> Self {
        let daily = aggregate_daily(&hourly);
        Self {
            trips,
            hourly,
            daily,
        }
    }
}

/// Identifies one of the seven reports. Declaration order is run order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportKind {
    RideTime,
    Popularity,
    BikeTypes,
    RainImpact,
    Weekly,
    Temperature,
    WindSpeed,
}

impl ReportKind {
    pub const ALL: [ReportKind; 7] = [
        ReportKind::RideTime,
        ReportKind::Popularity,
        ReportKind::BikeTypes,
        ReportKind::RainImpact,
        ReportKind::Weekly,
        ReportKind::Temperature,
        ReportKind::WindSpeed,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::RideTime => "1. Ride Time Statistics",
            ReportKind::Popularity => "2. Popularity of stations and routes",
            ReportKind::BikeTypes => "3. Bike Type Comparison",
            ReportKind::RainImpact => "4. Rain impact",
            ReportKind::Weekly => "5. Weekly analysis (with weather)",
            ReportKind::Temperature => "6. Trip popularity by temp. brackets",
            ReportKind::WindSpeed => "7. Avg Trip speed vs Wind Speed (km/h)",
        }
    }

    /// File name (without extension) used when reports are written to disk.
    pub fn file_stem(&self) -> &'static str {
        match self {
            ReportKind::RideTime => "1_ride_time",
            ReportKind::Popularity => "2_popularity",
            ReportKind::BikeTypes => "3_bike_types",
            ReportKind::RainImpact => "4_rain_impact",
            ReportKind::Weekly => "5_weekly",
            ReportKind::Temperature => "6_temperature",
            ReportKind::WindSpeed => "7_wind_speed",
        }
    }
}

/// The result of any report, serialized without a wrapping tag.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Report {
    RideTime(RideTimeReport),
    Popularity(PopularityReport),
    BikeTypes(Vec<BikeTypeStats>),
    RainImpact(Vec<RainImpact>),
    Weekly(Vec<WeekdayTrend>),
    Temperature(Vec<TemperatureBracket>),
    WindSpeed(Vec<WindSpeedBracket>),
}

/// Runs a single report against the dataset.
pub fn run_report(kind: ReportKind, data: &Dataset) -> Report {
    debug!(report = ?kind, "Running report");
    match kind {
        ReportKind::RideTime => Report::RideTime(ride_time_stats(&data.trips)),
        ReportKind::Popularity => Report::Popularity(popular_spots(&data.trips)),
        ReportKind::BikeTypes => Report::BikeTypes(compare_bike_types(&data.trips)),
        ReportKind::RainImpact => Report::RainImpact(rain_impact(&data.trips, &data.daily)),
        ReportKind::Weekly => Report::Weekly(weekly_trends(&data.trips, &data.daily)),
        ReportKind::Temperature => {
            Report::Temperature(temperature_brackets(&data.trips, &data.hourly))
        }
        ReportKind::WindSpeed => Report::WindSpeed(speed_by_wind(&data.trips, &data.hourly)),
    }
}

/// Runs the requested reports one after another, in the order given.
pub fn run_reports(kinds: &[ReportKind], data: &Dataset) -> Vec<(ReportKind, Report)> {
    kinds.iter().map(|&kind| (kind, run_report(kind, data))).collect()
}

/// Runs each report on the blocking pool at the same time.
///
/// Results come back in the order of `kinds`, whatever order the reports
/// finish in.
pub async fn run_reports_parallel(
    kinds: &[ReportKind],
    data: Arc<Dataset>,
) -> Result<Vec<(ReportKind, Report)>> {
    info!(reports = kinds.len(), "Running reports in parallel");

    let tasks: Vec<_> = kinds
        .iter()
        .map(|&kind| {
            let data = Arc::clone(&data);
            (kind, tokio::task::spawn_blocking(move || run_report(kind, &data)))
        })
        .collect();

    let mut results = Vec::with_capacity(tasks.len());
    for (kind, task) in tasks {
        let report = task
            .await
            .with_context(|| format!("Report task {kind:?} did not complete"))?;
        results.push((kind, report));
    }
    Ok(results)
}
