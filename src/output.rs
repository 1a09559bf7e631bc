//! Rendering of analysis results.
//!
//! Reports go to stdout as pretty JSON so they never interleave with logs on
//! stderr. They can also be written to one JSON file per report.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::analyzers::types::Trip;

const MISSING_STATION: &str = "[NO DATA]";

/// Writes a titled report as pretty JSON to `out`.
pub fn write_titled<W: Write>(out: &mut W, title: &str, report: &impl Serialize) -> Result<()> {
    writeln!(out, "{title}")?;
    writeln!(out, "{}", serde_json::to_string_pretty(report)?)?;
    Ok(())
}

/// Prints a titled report as pretty JSON to stdout.
pub fn print_report(title: &str, report: &impl Serialize) -> Result<()> {
    info!(title, "Report ready");
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    write_titled(&mut lock, title, report)?;
    lock.flush()?;
    Ok(())
}

/// Writes `report` to `<dir>/<file_stem>.json`, creating `dir` if needed.
pub fn write_report(dir: &Path, file_stem: &str, report: &impl Serialize) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    let path = dir.join(format!("{file_stem}.json"));

    let json = serde_json::to_vec_pretty(report)?;
    fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;

    debug!(path = %path.display(), "Report written");
    Ok(path)
}

/// One line per trip: `RIDE ID: <id> : <start> -> <end>`.
pub fn format_trips<'a>(trips: impl IntoIterator<Item = &'a Trip>) -> String {
    let lines: Vec<String> = trips
        .into_iter()
        .map(|t| {
            format!(
                "RIDE ID: {} : {} -> {}",
                t.ride_id,
                station_or_placeholder(&t.start_station_name),
                station_or_placeholder(&t.end_station_name)
            )
        })
        .collect();

    if lines.is_empty() {
        return "No data.".to_string();
    }
    lines.join("\n")
}

fn station_or_placeholder(name: &str) -> &str {
    if name.is_empty() { MISSING_STATION } else { name }
}
