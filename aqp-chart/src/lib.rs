//! Dual-format chart rendering for AQP telemetry.
//!
//! Every chart is built from one shared intermediate value
//! ([`series::SeriesChart`], [`series::DialChart`] or
//! [`series::StackedBarChart`]) computed once per call, then projected by
//! two independent side-effect-free formatters: [`raster`] draws a PNG
//! pixel buffer, [`document`] emits the equivalent chart-description
//! document. Both forms always encode the identical numeric series.

pub mod document;
pub mod raster;
pub mod series;
