//! CLI entry point for the bike-share weather analysis.
//!
//! Loads a trip export and an hourly weather export, then prints the
//! requested reports as JSON on stdout.

use anyhow::Result;
use citibike_weather::analyzers::analyzer::{
    Dataset, ReportKind, run_reports, run_reports_parallel,
};
use citibike_weather::analyzers::daily::aggregate_daily;
use citibike_weather::analyzers::geometry::has_gps_fix;
use citibike_weather::config::{
    DEFAULT_TRIPS_SOURCE, DEFAULT_WEATHER_SOURCE, LogFile, REPORT_OUTPUT_DIR_ENV,
    TRIPS_SOURCE_ENV, WEATHER_SOURCE_ENV,
};
use citibike_weather::fetch::BasicClient;
use citibike_weather::loader::{load_dataset, load_trips, load_weather};
use citibike_weather::output::{format_trips, print_report, write_report};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "citibike_weather")]
#[command(about = "Correlate bike-share trips with hourly weather", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct TripSource {
    /// Trip CSV path or URL (gzip accepted)
    #[arg(short, long, env = TRIPS_SOURCE_ENV, default_value = DEFAULT_TRIPS_SOURCE)]
    trips: String,
}

#[derive(Args)]
struct WeatherSource {
    /// Open-Meteo hourly CSV path or URL (gzip accepted)
    #[arg(short, long, env = WEATHER_SOURCE_ENV, default_value = DEFAULT_WEATHER_SOURCE)]
    weather: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the analysis reports
    Analyze {
        #[command(flatten)]
        trips: TripSource,

        #[command(flatten)]
        weather: WeatherSource,

        /// Reports to run (default: all, in order)
        #[arg(long, value_enum, value_delimiter = ',')]
        only: Vec<ReportKind>,

        /// Also write each report as JSON into this directory
        #[arg(short, long, env = REPORT_OUTPUT_DIR_ENV)]
        output_dir: Option<PathBuf>,

        /// Run the reports concurrently
        #[arg(long, default_value_t = false)]
        parallel: bool,
    },
    /// Print trips one per line
    ListTrips {
        #[command(flatten)]
        trips: TripSource,

        /// Maximum number of trips to print
        #[arg(short = 'n', long, default_value_t = 20)]
        limit: usize,

        /// Only trips with GPS coordinates on both ends
        #[arg(long, default_value_t = false)]
        gps_only: bool,

        /// Only trips with a non-positive duration
        #[arg(long, default_value_t = false)]
        invalid: bool,
    },
    /// Print the per-day weather summary
    DailyWeather {
        #[command(flatten)]
        weather: WeatherSource,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file = LogFile::from_env();
    let file_appender = tracing_appender::rolling::daily(&log_file.dir, &log_file.file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let client = BasicClient::new();

    match cli.command {
        Commands::Analyze {
            trips,
            weather,
            only,
            output_dir,
            parallel,
        } => {
            let data = load_dataset(&client, &trips.trips, &weather.weather).await?;
            let kinds = if only.is_empty() {
                ReportKind::ALL.to_vec()
            } else {
                only
            };
            analyze(data, &kinds, output_dir, parallel).await?;
        }
        Commands::ListTrips {
            trips,
            limit,
            gps_only,
            invalid,
        } => {
            let all = load_trips(&client, &trips.trips).await?;
            let selected: Vec<_> = all
                .iter()
                .filter(|t| !gps_only || has_gps_fix(t))
                .filter(|t| !invalid || t.duration_minutes() <= 0.0)
                .take(limit)
                .collect();
            info!(total = all.len(), shown = selected.len(), "Listing trips");
            println!("{}", format_trips(selected));
        }
        Commands::DailyWeather { weather } => {
            let hourly = load_weather(&client, &weather.weather).await?;
            if hourly.is_empty() {
                warn!("Weather data error! No observations loaded");
            }
            print_report("Daily weather", &aggregate_daily(&hourly))?;
        }
    }

    Ok(())
}

/// Runs the selected reports and renders each one.
#[tracing::instrument(skip(data, output_dir), fields(reports = kinds.len()))]
async fn analyze(
    data: Dataset,
    kinds: &[ReportKind],
    output_dir: Option<PathBuf>,
    parallel: bool,
) -> Result<()> {
    let results = if parallel {
        run_reports_parallel(kinds, Arc::new(data)).await?
    } else {
        run_reports(kinds, &data)
    };

    for (kind, report) in &results {
        print_report(kind.title(), report)?;
        if let Some(dir) = &output_dir {
            let path = write_report(dir, kind.file_stem(), report)?;
            info!(report = ?kind, path = %path.display(), "Report saved");
        }
    }

    info!("Analysis finished.");
    Ok(())
}
