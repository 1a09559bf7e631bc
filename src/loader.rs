//! Fetches and parses the two inputs into a [`Dataset`].

use anyhow::{Context, Result, bail};
use tracing::info;

use crate::analyzers::analyzer::Dataset;
use crate::analyzers::types::{HourlyWeather, Trip};
use crate::fetch::{HttpClient, read_source};
use crate::parser::{parse_trips, parse_weather};

pub async fn load_trips<C: HttpClient>(client: &C, source: &str) -> Result<Vec<Trip>> {
    let bytes = read_source(client, source).await?;
    let outcome = parse_trips(&bytes).with_context(|| format!("Failed to parse trips from '{source}'"))?;
    info!(source, trips = outcome.records.len(), skipped = outcome.skipped, "Trips loaded");
    Ok(outcome.records)
}

pub async fn load_weather<C: HttpClient>(client: &C, source: &str) -> Result<Vec<HourlyWeather>> {
    let bytes = read_source(client, source).await?;
    let outcome =
        parse_weather(&bytes).with_context(|| format!("Failed to parse weather from '{source}'"))?;
    info!(source, hours = outcome.records.len(), skipped = outcome.skipped, "Weather loaded");
    Ok(outcome.records)
}

/// Loads both inputs concurrently. Either set coming back empty is an error.
pub async fn load_dataset<C: HttpClient>(
    client: &C,
    trips_source: &str,
    weather_source: &str,
) -> Result<Dataset> {
    let (trips, hourly) = tokio::try_join!(
        load_trips(client, trips_source),
        load_weather(client, weather_source)
    )?;

    if trips.is_empty() {
        bail!("Trip data error! No trips in '{trips_source}'");
    }
    if hourly.is_empty() {
        bail!("Weather data error! No observations in '{weather_source}'");
    }

    let data = Dataset::new(trips, hourly);
    info!(days = data.daily.len(), "Daily weather derived");
    Ok(data)
}
