use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use mandelzoom_core::animator::DEFAULT_BUILD_STEP;
use mandelzoom_core::{
    ColorTheme, ExplorerSettings, IterationBudget, PrecisionMode, Tour, ZoomSpeed,
};

// ---------------------------------------------------------------------------
// Driver preferences
// ---------------------------------------------------------------------------

/// Startup preferences. Read once; the driver never writes them back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppPreferences {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default)]
    pub color_theme: ColorTheme,
    #[serde(default)]
    pub zoom_speed: ZoomSpeed,
    /// Iteration ceiling at zoom 1.
    #[serde(default = "default_budget_base")]
    pub budget_base: f64,
    /// Extra iterations per natural-log unit of zoom.
    #[serde(default = "default_budget_log_slope")]
    pub budget_log_slope: f64,
    /// Reveal increment per frame of the build animation.
    #[serde(default = "default_build_step")]
    pub build_step: f64,
    #[serde(default)]
    pub start_in_deep_zoom: bool,
    /// Replaces the built-in tour when set.
    #[serde(default)]
    pub tour: Option<Tour>,
}

fn default_width() -> u32 {
    1280
}
fn default_height() -> u32 {
    720
}
fn default_budget_base() -> f64 {
    IterationBudget::DEFAULT_BASE
}
fn default_budget_log_slope() -> f64 {
    IterationBudget::DEFAULT_LOG_SLOPE
}
fn default_build_step() -> f64 {
    DEFAULT_BUILD_STEP
}

impl Default for AppPreferences {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            color_theme: ColorTheme::default(),
            zoom_speed: ZoomSpeed::default(),
            budget_base: default_budget_base(),
            budget_log_slope: default_budget_log_slope(),
            build_step: default_build_step(),
            start_in_deep_zoom: false,
            tour: None,
        }
    }
}

impl AppPreferences {
    /// Load preferences from `path`, falling back to defaults when the file
    /// is missing or unreadable.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            debug!("No preferences file at {}", path.display());
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<AppPreferences>(&json) {
                Ok(prefs) => {
                    info!("Loaded preferences from {}", path.display());
                    return prefs;
                }
                Err(e) => error!("Failed to parse preferences: {e}"),
            },
            Err(e) => error!("Failed to read preferences file: {e}"),
        }
        Self::default()
    }

    /// Load from the OS config directory.
    pub fn load() -> Self {
        Self::load_from(&crate::app_dir::preferences_path())
    }

    pub fn explorer_settings(&self) -> ExplorerSettings {
        ExplorerSettings {
            width: self.width,
            height: self.height,
            color_theme: self.color_theme,
            zoom_speed: self.zoom_speed,
            budget: IterationBudget::new(self.budget_base, self.budget_log_slope),
            build_step: self.build_step,
            precision: if self.start_in_deep_zoom {
                PrecisionMode::Extended
            } else {
                PrecisionMode::Native
            },
            tour: self.tour.clone().unwrap_or_default(),
        }
    }
}
