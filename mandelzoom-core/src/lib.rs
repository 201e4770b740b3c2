pub mod animator;
pub mod budget;
pub mod complex;
pub mod complex_dd;
pub mod double_double;
pub mod error;
pub mod explorer;
pub mod fractal;
pub mod frame;
pub mod mandelbrot;
pub mod mandelbrot_dd;
pub mod viewport;

// Re-export primary types for convenience.
pub use animator::{AnimationState, Animator, Preset, Tour, Waypoint, ZoomSpeed};
pub use budget::IterationBudget;
pub use complex::Complex;
pub use complex_dd::ComplexDD;
pub use double_double::RealDD;
pub use error::CoreError;
pub use explorer::{Command, Explorer, ExplorerSettings};
pub use fractal::{Fractal, FractalParams, IterationResult};
pub use frame::{ColorTheme, FrameDescriptor};
pub use mandelbrot::Mandelbrot;
pub use mandelbrot_dd::MandelbrotDD;
pub use viewport::{Camera, PrecisionMode, Viewport};

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
