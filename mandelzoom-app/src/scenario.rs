use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use mandelzoom_core::{Command, Explorer, FrameDescriptor, Preset};
use mandelzoom_render::{colorize, export_png, render, ExportMetadata};

use crate::error::{AppError, Result};

/// One scripted event, in the order the host would deliver it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Command(Command),
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp,
    Wheel { delta: f64, x: f64, y: f64 },
    Resize { width: u32, height: u32 },
    /// Advance this many display frames.
    Ticks(u32),
    /// Render the current frame and write it as a PNG under this name.
    Export(String),
}

/// An ordered list of steps, stored as a JSON array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scenario {
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|source| AppError::ScenarioRead {
            path: path.to_path_buf(),
            source,
        })?;
        let scenario: Scenario =
            serde_json::from_str(&json).map_err(|source| AppError::ScenarioParse {
                path: path.to_path_buf(),
                source,
            })?;
        info!(steps = scenario.steps.len(), "Loaded scenario from {}", path.display());
        Ok(scenario)
    }

    /// Built-in run: the full build reveal, the first two tour stops, then a
    /// wheel notch into the third preset in extended precision.
    pub fn demo() -> Self {
        let export = |name: &str| Step::Export(name.to_string());
        Self {
            steps: vec![
                Step::Command(Command::Build),
                Step::Ticks(100),
                export("build_10"),
                Step::Ticks(400),
                export("build_50"),
                Step::Ticks(500),
                export("build_done"),
                Step::Command(Command::StartTour),
                Step::Ticks(399),
                export("tour_seahorse"),
                Step::Ticks(200),
                export("tour_elephant"),
                Step::Command(Command::GoToPreset {
                    preset: Preset::TripleSpiral,
                }),
                Step::Command(Command::ToggleDeepZoom),
                Step::Wheel {
                    delta: -1.0,
                    x: 640.0,
                    y: 360.0,
                },
                export("deep_start"),
            ],
        }
    }
}

/// Outcome of a finished run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub frames: u64,
    pub exported: Vec<PathBuf>,
}

/// Plays a scenario through an [`Explorer`] and writes requested frames.
pub struct Player {
    explorer: Explorer,
    out_dir: PathBuf,
    exported: Vec<PathBuf>,
}

impl Player {
    pub fn new(explorer: Explorer, out_dir: PathBuf) -> Self {
        Self {
            explorer,
            out_dir,
            exported: Vec::new(),
        }
    }

    pub fn explorer(&self) -> &Explorer {
        &self.explorer
    }

    pub fn run(mut self, scenario: &Scenario) -> Result<RunSummary> {
        for (index, step) in scenario.steps.iter().enumerate() {
            debug!(index, ?step, "Scenario step");
            self.apply(step)?;
        }
        Ok(RunSummary {
            frames: self.explorer.frame_count(),
            exported: self.exported,
        })
    }

    fn apply(&mut self, step: &Step) -> Result<()> {
        let e = &mut self.explorer;
        match step {
            Step::Command(command) => e.handle(*command),
            Step::PointerDown { x, y } => e.pointer_down(*x, *y),
            Step::PointerMove { x, y } => e.pointer_move(*x, *y),
            Step::PointerUp => e.pointer_up(),
            Step::Wheel { delta, x, y } => e.wheel(*delta, *x, *y),
            Step::Resize { width, height } => e.resize(*width, *height)?,
            Step::Ticks(n) => {
                for _ in 0..*n {
                    e.tick();
                }
            }
            Step::Export(name) => {
                let descriptor = e.descriptor();
                let path = self.export(&descriptor, name)?;
                self.exported.push(path);
            }
        }
        Ok(())
    }

    fn export(&self, descriptor: &FrameDescriptor, name: &str) -> Result<PathBuf> {
        if let Some(warning) = descriptor.camera().precision_warning() {
            warn!("{warning}");
        }
        fs::create_dir_all(&self.out_dir).map_err(|source| AppError::OutputDir {
            path: self.out_dir.clone(),
            source,
        })?;

        let mut path = self.out_dir.join(name);
        if path.extension().is_none() {
            path.set_extension("png");
        }

        let result = render(descriptor)?;
        let buffer = colorize(&result.iterations, descriptor.color_theme);
        export_png(&buffer, &path, &ExportMetadata::from_descriptor(descriptor))?;
        info!(
            frame = self.explorer.frame_count(),
            limit = descriptor.iteration_limit(),
            "Exported {}",
            path.display()
        );
        Ok(path)
    }
}
