/// Errors surfaced by catalog lookups and caller-side parameter validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TelemetryError {
    #[error("station not found: {0}")]
    StationNotFound(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}
