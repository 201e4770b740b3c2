use thiserror::Error;

/// Errors from constructing core values with invalid parameters.
///
/// Interactive operations never produce these; only setup and resizing do.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid max iterations: {0} (must be >= 1)")]
    InvalidMaxIterations(u32),

    #[error("invalid viewport: {reason}")]
    InvalidViewport { reason: String },

    #[error("invalid build step: {0} (must be in (0, 1])")]
    InvalidBuildStep(f64),

    #[error("tour must contain at least one waypoint")]
    EmptyTour,
}
