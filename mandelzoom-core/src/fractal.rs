use crate::error::CoreError;

/// `|z|²` above which an orbit counts as escaped (escape radius 2).
pub const ESCAPE_NORM_SQ: f64 = 4.0;

/// The outcome of iterating one sample point.
///
/// Only the step count is kept; coloring normalizes it by the ceiling the
/// frame used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterationResult {
    /// `|z|²` passed [`ESCAPE_NORM_SQ`] on step `iterations` (zero-based).
    Escaped { iterations: u32 },

    /// The orbit stayed bounded for the whole ceiling.
    Interior,
}

impl IterationResult {
    #[inline]
    pub fn escaped(&self) -> bool {
        matches!(self, Self::Escaped { .. })
    }

    /// The loop counter `i` reached; `Interior` reports the ceiling itself.
    #[inline]
    pub fn iterations(&self, limit: u32) -> u32 {
        match *self {
            Self::Escaped { iterations } => iterations,
            Self::Interior => limit,
        }
    }

    /// Normalized escape fraction `t = i / N`, or `None` for the interior
    /// sentinel.
    #[inline]
    pub fn escape_fraction(&self, limit: u32) -> Option<f64> {
        match *self {
            Self::Escaped { iterations } => Some(iterations as f64 / limit.max(1) as f64),
            Self::Interior => None,
        }
    }
}

/// Parameters shared by every sample of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FractalParams {
    /// Iteration ceiling `N`, always at least 1.
    pub max_iterations: u32,
}

impl FractalParams {
    pub fn new(max_iterations: u32) -> crate::Result<Self> {
        if max_iterations < 1 {
            return Err(CoreError::InvalidMaxIterations(max_iterations));
        }
        Ok(Self { max_iterations })
    }
}

/// An escape-time iteration over sample points of type `Point`.
///
/// Implementations hold no mutable state, so a renderer can share one value
/// across all worker threads of a frame. Renderers should stay generic over
/// `F: Fractal` so the inner loop is monomorphized per precision.
pub trait Fractal {
    /// Plane coordinate type: [`Complex`](crate::Complex) in native mode,
    /// [`ComplexDD`](crate::ComplexDD) in extended mode.
    type Point: Copy;

    fn iterate(&self, c: Self::Point) -> IterationResult;

    fn params(&self) -> &FractalParams;
}
