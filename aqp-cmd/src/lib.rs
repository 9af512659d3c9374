//! Command implementations for the AQP CLI.
//!
//! The command layer is the thin caller in front of the core: it validates
//! parameters, resolves defaults against the injected catalog, invokes the
//! generators or the renderer, and serializes responses.

use aqp_core::catalog::TelemetryCatalog;
use clap::{Subcommand, ValueEnum};

pub mod query;
pub mod render;

#[derive(Subcommand)]
pub enum Command {
    /// List stations, optionally filtered by region
    Stations {
        /// Exact region match (e.g. "Delhi NCR")
        #[arg(long)]
        region: Option<String>,

        #[arg(long, default_value_t = 50)]
        limit: usize,

        #[arg(long, default_value_t = 0)]
        offset: usize,
    },

    /// Look up a single station by id
    Station {
        /// Station identifier (e.g. ST-DEL-001)
        station_id: String,
    },

    /// List alerts, optionally filtered by region and cutoff timestamp
    Alerts {
        #[arg(long)]
        region: Option<String>,

        /// Only include alerts at or after this RFC 3339 timestamp
        #[arg(long)]
        since: Option<String>,
    },

    /// Generate a pollutant forecast
    Forecast {
        /// Station id; defaults to the first known station
        #[arg(long)]
        station_id: Option<String>,

        #[arg(long, default_value = "PM2.5")]
        pollutant: String,

        /// Horizon label: 24h, 72h or 7d
        #[arg(long, default_value = "24h")]
        horizon: String,
    },

    /// Generate an observed time series
    Timeseries {
        /// Station id; defaults to the first known station
        #[arg(long)]
        station_id: Option<String>,

        #[arg(long, default_value = "PM2.5")]
        pollutant: String,

        /// Backward-looking window, e.g. 48h
        #[arg(long, default_value = "48h")]
        window: String,
    },

    /// Generate a regional risk summary
    Risk {
        #[arg(long)]
        region: Option<String>,
    },

    /// Generate a source attribution breakdown
    Attribution {
        #[arg(long, default_value = "PM2.5")]
        pollutant: String,
    },

    /// Render a chart as a PNG image or a chart-description JSON document
    Render {
        /// Chart kind
        #[arg(long, value_enum)]
        chart: ChartKind,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Png)]
        format: OutputFormat,

        /// Output file path
        #[arg(short = 'o', long)]
        out: String,

        /// Station id for line charts; defaults to the first known station
        #[arg(long)]
        station_id: Option<String>,

        #[arg(long, default_value = "PM2.5")]
        pollutant: String,

        #[arg(long, default_value = "Delhi NCR")]
        region: String,

        /// Hour span for line charts
        #[arg(long, default_value_t = 24)]
        hours: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChartKind {
    Timeseries,
    Forecast,
    RiskDial,
    Attribution,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Png,
    Json,
}

pub fn run(command: Command, catalog: &TelemetryCatalog) -> anyhow::Result<()> {
    match command {
        Command::Stations {
            region,
            limit,
            offset,
        } => query::run_stations(catalog, region.as_deref(), limit, offset),
        Command::Station { station_id } => query::run_station(catalog, &station_id),
        Command::Alerts { region, since } => {
            query::run_alerts(catalog, region.as_deref(), since.as_deref())
        }
        Command::Forecast {
            station_id,
            pollutant,
            horizon,
        } => query::run_forecast(catalog, station_id.as_deref(), &pollutant, &horizon),
        Command::Timeseries {
            station_id,
            pollutant,
            window,
        } => query::run_timeseries(catalog, station_id.as_deref(), &pollutant, &window),
        Command::Risk { region } => query::run_risk(region.as_deref()),
        Command::Attribution { pollutant } => query::run_attribution(&pollutant),
        Command::Render {
            chart,
            format,
            out,
            station_id,
            pollutant,
            region,
            hours,
        } => render::run_render(
            catalog,
            chart,
            format,
            &out,
            station_id.as_deref(),
            &pollutant,
            &region,
            hours,
        ),
    }
}
