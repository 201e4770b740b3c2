use std::path::PathBuf;

use thiserror::Error;

/// Errors that end a driver run.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to read scenario {}: {source}", path.display())]
    ScenarioRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse scenario {}: {source}", path.display())]
    ScenarioParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Core(#[from] mandelzoom_core::CoreError),

    #[error(transparent)]
    Render(#[from] mandelzoom_render::RenderError),
}

pub type Result<T> = std::result::Result<T, AppError>;
