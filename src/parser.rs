//! CSV parsers for the trip and weather exports.
//!
//! Rows that cannot be turned into a typed record are dropped and counted,
//! never fatal. Gzip-compressed input is decompressed transparently.

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use flate2::read::GzDecoder;
use serde::Deserialize;
use std::borrow::Cow;
use std::io::Read;
use tracing::{debug, warn};

use crate::analyzers::types::{HourlyWeather, Trip};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Lines before the data header in an Open-Meteo export when no `time`
/// header can be found.
const WEATHER_PREAMBLE_LINES: usize = 4;

const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parsed records plus the number of rows that were dropped.
#[derive(Debug)]
pub struct LoadOutcome<T> {
    pub records: Vec<T>,
    pub skipped: usize,
}

/// One row of the trip export. Station ids are present in the file but unused.
#[derive(Debug, Deserialize)]
struct TripRow {
    ride_id: String,
    rideable_type: String,
    started_at: String,
    ended_at: String,
    start_station_name: String,
    end_station_name: String,
    start_lat: String,
    start_lng: String,
    end_lat: String,
    end_lng: String,
    member_casual: String,
}

impl TripRow {
    fn into_trip(self) -> Option<Trip> {
        Some(Trip {
            started_at: parse_timestamp(&self.started_at)?,
            ended_at: parse_timestamp(&self.ended_at)?,
            ride_id: self.ride_id,
            rideable_type: self.rideable_type,
            start_station_name: self.start_station_name,
            end_station_name: self.end_station_name,
            start_lat: lenient_f64(&self.start_lat),
            start_lng: lenient_f64(&self.start_lng),
            end_lat: lenient_f64(&self.end_lat),
            end_lng: lenient_f64(&self.end_lng),
            member_casual: self.member_casual,
        })
    }
}

/// Returns the input, gunzipped when it carries the gzip magic bytes.
pub fn decompress(bytes: &[u8]) -> Result<Cow<'_, [u8]>> {
    if !bytes.starts_with(&GZIP_MAGIC) {
        return Ok(Cow::Borrowed(bytes));
    }
    let mut out = Vec::new();
    GzDecoder::new(bytes)
        .read_to_end(&mut out)
        .context("Failed to decompress gzip input")?;
    debug!(compressed = bytes.len(), decompressed = out.len(), "Input gunzipped");
    Ok(Cow::Owned(out))
}

/// Accepts `YYYY-MM-DD HH:MM[:SS[.fff]]`, the same with a `T` separator, or
/// a bare date (midnight).
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Numeric fields fall back to 0.0, which for coordinates is the
/// "no GPS fix" sentinel.
fn lenient_f64(s: &str) -> f64 {
    s.trim().parse().unwrap_or(0.0)
}

/// Parses a Citi Bike trip export (header row required).
pub fn parse_trips(bytes: &[u8]) -> Result<LoadOutcome<Trip>> {
    let bytes = decompress(bytes)?;
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(bytes.as_ref());

    let mut records = Vec::new();
    let mut skipped = 0;

    for result in rdr.deserialize::<TripRow>() {
        match result.ok().and_then(TripRow::into_trip) {
            Some(trip) => records.push(trip),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!(skipped, kept = records.len(), "Dropped unparseable trip rows");
    }
    debug!(trips = records.len(), "Trips parsed");

    Ok(LoadOutcome { records, skipped })
}

/// Parses an Open-Meteo hourly export.
///
/// The metadata preamble is skipped up to the header line starting with
/// `time`. Columns are read by position: time, temperature, precipitation
/// (index 3) and wind speed (index 6, 0.0 when absent).
pub fn parse_weather(bytes: &[u8]) -> Result<LoadOutcome<HourlyWeather>> {
    let bytes = decompress(bytes)?;
    let text = String::from_utf8_lossy(&bytes);

    let lines: Vec<&str> = text.lines().collect();
    let header = lines
        .iter()
        .position(|l| l.split(',').next().map(str::trim) == Some("time"));
    let data_start = match header {
        Some(i) => i + 1,
        None => {
            warn!("No `time` header in weather file, assuming fixed preamble");
            WEATHER_PREAMBLE_LINES
        }
    };
    let body = lines.get(data_start..).unwrap_or_default().join("\n");

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(body.as_bytes());

    let mut records = Vec::new();
    let mut skipped = 0;

    for result in rdr.records() {
        let parsed = result.ok().and_then(|row| {
            if row.len() < 4 {
                return None;
            }
            Some(HourlyWeather {
                date_time: parse_timestamp(row.get(0)?)?,
                temperature: lenient_f64(row.get(1)?),
                precipitation: lenient_f64(row.get(3)?),
                wind_speed: row.get(6).map(lenient_f64).unwrap_or(0.0),
            })
        });
        match parsed {
            Some(w) => records.push(w),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!(skipped, kept = records.len(), "Dropped unparseable weather rows");
    }
    debug!(hours = records.len(), "Weather parsed");

    Ok(LoadOutcome { records, skipped })
}
