//! Defaults and environment-driven settings.
//!
//! Command-line flags take precedence over the environment variables named
//! here; `.env` is loaded before either is read.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub const TRIPS_SOURCE_ENV: &str = "TRIPS_SOURCE";
pub const WEATHER_SOURCE_ENV: &str = "WEATHER_SOURCE";
pub const REPORT_OUTPUT_DIR_ENV: &str = "REPORT_OUTPUT_DIR";
pub const LOG_FILE_PATH_ENV: &str = "LOG_FILE_PATH";

pub const DEFAULT_TRIPS_SOURCE: &str = "JC-202509-citibike-tripdata.csv";
pub const DEFAULT_WEATHER_SOURCE: &str = "open-meteo-40.74N74.04W11m.csv";
pub const DEFAULT_LOG_FILE_PATH: &str = "logs/citibike_weather.log";

/// Directory and file name for the rolling JSON log.
#[derive(Debug, Clone, PartialEq)]
pub struct LogFile {
    pub dir: PathBuf,
    pub file_name: OsString,
}

impl LogFile {
    /// Splits `path`, falling back to the default location for missing parts.
    pub fn from_path(path: &str) -> Self {
        let path = Path::new(path);
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("logs"))
            .to_path_buf();
        let file_name = path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| OsString::from("citibike_weather.log"));
        Self { dir, file_name }
    }

    pub fn from_env() -> Self {
        let path = std::env::var(LOG_FILE_PATH_ENV)
            .unwrap_or_else(|_| DEFAULT_LOG_FILE_PATH.to_string());
        Self::from_path(&path)
    }
}
