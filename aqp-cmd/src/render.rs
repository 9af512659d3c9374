//! Chart render command: generates one telemetry series and writes either
//! its PNG image or its chart-description JSON document to a file. Both
//! forms are projections of the same generated values.

use crate::{ChartKind, OutputFormat};
use aqp_chart::series::{DialChart, SeriesChart, StackedBarChart};
use aqp_chart::{document, raster};
use aqp_core::attribution::generate_attribution;
use aqp_core::catalog::TelemetryCatalog;
use aqp_core::forecast::generate_forecast;
use aqp_core::risk::generate_risk_scores;
use aqp_core::timeseries::generate_timeseries;
use log::info;

#[allow(clippy::too_many_arguments)]
pub fn run_render(
    catalog: &TelemetryCatalog,
    chart: ChartKind,
    format: OutputFormat,
    out: &str,
    station_id: Option<&str>,
    pollutant: &str,
    region: &str,
    hours: u32,
) -> anyhow::Result<()> {
    let bytes = match chart {
        ChartKind::Timeseries => {
            let station_id = crate::query::resolve_station_id(catalog, station_id)?;
            let series = generate_timeseries(&station_id, pollutant, hours);
            let chart = SeriesChart::from_observations(&series, pollutant, region);
            line_chart_bytes(&chart, format)?
        }
        ChartKind::Forecast => {
            let station_id = crate::query::resolve_station_id(catalog, station_id)?;
            let forecast = generate_forecast(&station_id, pollutant, hours);
            let chart = SeriesChart::from_forecast(&forecast, pollutant, region);
            line_chart_bytes(&chart, format)?
        }
        ChartKind::RiskDial => {
            let scores = generate_risk_scores(region);
            let dial = DialChart::from_top_risk(&scores, region)
                .ok_or_else(|| anyhow::anyhow!("risk summary produced no scores"))?;
            match format {
                OutputFormat::Png => raster::risk_dial_png(&dial)?,
                OutputFormat::Json => serde_json::to_vec_pretty(&document::risk_dial(&dial))?,
            }
        }
        ChartKind::Attribution => {
            let response = generate_attribution(pollutant);
            let bar = StackedBarChart::from_attribution(&response);
            match format {
                OutputFormat::Png => raster::attribution_bar_png(&bar)?,
                OutputFormat::Json => serde_json::to_vec_pretty(&document::attribution_bar(&bar))?,
            }
        }
    };
    std::fs::write(out, &bytes)?;
    info!("wrote {} bytes to {}", bytes.len(), out);
    Ok(())
}

fn line_chart_bytes(chart: &SeriesChart, format: OutputFormat) -> anyhow::Result<Vec<u8>> {
    Ok(match format {
        OutputFormat::Png => raster::line_chart_png(chart)?,
        OutputFormat::Json => serde_json::to_vec_pretty(&document::line_chart(chart))?,
    })
}
