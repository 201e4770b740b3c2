use serde::{Deserialize, Serialize};

/// Derives the per-frame iteration ceiling from zoom depth and reveal progress.
///
/// Deeper views expose finer structure, so the ceiling grows with the log of
/// the effective zoom. The build animation only ever lowers the ceiling below
/// that value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IterationBudget {
    /// Ceiling at zoom 1 and below.
    pub base: f64,
    /// Extra iterations per natural-log unit of zoom.
    pub log_slope: f64,
}

impl IterationBudget {
    pub const DEFAULT_BASE: f64 = 150.0;
    pub const DEFAULT_LOG_SLOPE: f64 = 50.0;

    pub fn new(base: f64, log_slope: f64) -> Self {
        Self { base, log_slope }
    }

    /// `floor(base + max(0, ln(zoom) · slope))`, never below 1.
    pub fn max_iterations(&self, effective_zoom: f64) -> u32 {
        let depth = if effective_zoom > 0.0 && effective_zoom.is_finite() {
            (effective_zoom.ln() * self.log_slope).max(0.0)
        } else {
            0.0
        };
        // `as` saturates, so a huge zoom cannot wrap the ceiling.
        ((self.base + depth).floor() as u32).max(1)
    }

    /// The ceiling actually used this frame: `max(1, floor(reveal · max))`.
    pub fn iteration_limit(max_iterations: u32, reveal_progress: f64) -> u32 {
        let reveal = if reveal_progress.is_nan() {
            1.0
        } else {
            reveal_progress.clamp(0.0, 1.0)
        };
        ((reveal * max_iterations as f64).floor() as u32).max(1)
    }
}

impl Default for IterationBudget {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE, Self::DEFAULT_LOG_SLOPE)
    }
}
