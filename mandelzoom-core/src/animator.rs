use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::complex::Complex;
use crate::error::CoreError;
use crate::viewport::Camera;

/// Reveal increment per frame for the build animation.
pub const DEFAULT_BUILD_STEP: f64 = 0.001;

// ---------------------------------------------------------------------------
// Zoom speed
// ---------------------------------------------------------------------------

/// Named per-frame zoom multipliers for auto-zoom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoomSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

impl ZoomSpeed {
    pub fn factor(self) -> f64 {
        match self {
            Self::Slow => 1.0005,
            Self::Normal => 1.005,
            Self::Fast => 1.01,
        }
    }

    /// Slow → Normal → Fast → Slow.
    pub fn next(self) -> Self {
        match self {
            Self::Slow => Self::Normal,
            Self::Normal => Self::Fast,
            Self::Fast => Self::Slow,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Slow => "Slow",
            Self::Normal => "Normal",
            Self::Fast => "Fast",
        }
    }
}

// ---------------------------------------------------------------------------
// Locations
// ---------------------------------------------------------------------------

/// Named locations reachable directly, each entered with auto-zoom running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    SeahorseValley,
    ElephantValley,
    TripleSpiral,
}

impl Preset {
    pub const ALL: [Preset; 3] = [
        Preset::SeahorseValley,
        Preset::ElephantValley,
        Preset::TripleSpiral,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::SeahorseValley => "Seahorse Valley",
            Self::ElephantValley => "Elephant Valley",
            Self::TripleSpiral => "Triple Spiral",
        }
    }

    /// `(offset, zoom)` the camera jumps to.
    pub fn location(self) -> (Complex, f64) {
        match self {
            Self::SeahorseValley => (Complex::new(-0.745, 0.1), 20.0),
            Self::ElephantValley => (Complex::new(0.275, 0.008), 20.0),
            Self::TripleSpiral => (Complex::new(-0.088, 0.655), 30.0),
        }
    }
}

/// One stop of the guided tour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub name: String,
    pub offset: Complex,
    pub start_zoom: f64,
    pub duration_frames: u32,
}

impl Waypoint {
    fn from_preset(preset: Preset, duration_frames: u32) -> Self {
        let (offset, start_zoom) = preset.location();
        Self {
            name: preset.name().to_string(),
            offset,
            start_zoom,
            duration_frames,
        }
    }
}

/// A fixed, ordered, non-empty sequence of waypoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Waypoint>", into = "Vec<Waypoint>")]
pub struct Tour {
    waypoints: Vec<Waypoint>,
}

impl Tour {
    pub const DEFAULT_STOP_FRAMES: u32 = 400;

    pub fn new(waypoints: Vec<Waypoint>) -> crate::Result<Self> {
        if waypoints.is_empty() {
            return Err(CoreError::EmptyTour);
        }
        Ok(Self { waypoints })
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn get(&self, index: usize) -> Option<&Waypoint> {
        self.waypoints.get(index)
    }

    pub fn first(&self) -> &Waypoint {
        &self.waypoints[0]
    }

    /// Frames from the first stop to the end of the last one.
    pub fn total_frames(&self) -> u64 {
        self.waypoints
            .iter()
            .map(|w| u64::from(w.duration_frames.max(1)))
            .sum()
    }
}

impl Default for Tour {
    fn default() -> Self {
        Self {
            waypoints: Preset::ALL
                .iter()
                .map(|&p| Waypoint::from_preset(p, Self::DEFAULT_STOP_FRAMES))
                .collect(),
        }
    }
}

impl TryFrom<Vec<Waypoint>> for Tour {
    type Error = CoreError;

    fn try_from(waypoints: Vec<Waypoint>) -> Result<Self, Self::Error> {
        Self::new(waypoints)
    }
}

impl From<Tour> for Vec<Waypoint> {
    fn from(tour: Tour) -> Self {
        tour.waypoints
    }
}

// ---------------------------------------------------------------------------
// Animation state
// ---------------------------------------------------------------------------

/// What drives the camera between frames. Exactly one variant is active.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationState {
    Idle,
    /// A drag gesture is in progress; `last` is the previous pointer position
    /// in screen pixels.
    Dragging { last: (f64, f64) },
    AutoZooming { per_frame_factor: f64 },
    Touring { stop_index: usize, frame_index: u32 },
    /// Reveal animation; `progress` runs from 0 to 1.
    Building { progress: f64 },
}

impl AnimationState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Dragging { .. } => "dragging",
            Self::AutoZooming { .. } => "auto-zooming",
            Self::Touring { .. } => "touring",
            Self::Building { .. } => "building",
        }
    }

    /// Fraction of the iteration ceiling in use: the build progress while
    /// building, full otherwise.
    pub fn reveal_progress(&self) -> f64 {
        match *self {
            Self::Building { progress } => progress,
            _ => 1.0,
        }
    }
}

/// The camera state machine.
///
/// Commands replace [`state`](Self::state) wholesale; [`advance`](Self::advance)
/// applies one frame of whatever the current state does to the camera.
#[derive(Debug, Clone)]
pub struct Animator {
    state: AnimationState,
    speed: ZoomSpeed,
    tour: Tour,
    build_step: f64,
}

impl Animator {
    pub fn new(speed: ZoomSpeed, tour: Tour, build_step: f64) -> crate::Result<Self> {
        if !(build_step > 0.0 && build_step <= 1.0) {
            return Err(CoreError::InvalidBuildStep(build_step));
        }
        Ok(Self {
            state: AnimationState::Idle,
            speed,
            tour,
            build_step,
        })
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn speed(&self) -> ZoomSpeed {
        self.speed
    }

    pub fn reveal_progress(&self) -> f64 {
        self.state.reveal_progress()
    }

    /// Replace the current state.
    pub fn set_state(&mut self, state: AnimationState) {
        if std::mem::discriminant(&state) != std::mem::discriminant(&self.state) {
            debug!(from = self.state.label(), to = state.label(), "Animation state change");
        }
        self.state = state;
    }

    /// Move to the next speed. A running auto-zoom picks it up immediately.
    pub fn cycle_speed(&mut self) -> ZoomSpeed {
        self.speed = self.speed.next();
        if let AnimationState::AutoZooming { .. } = self.state {
            self.state = AnimationState::AutoZooming {
                per_frame_factor: self.speed.factor(),
            };
        }
        self.speed
    }

    /// Enter auto-zoom at the current speed.
    pub fn start_auto_zoom(&mut self) {
        self.set_state(AnimationState::AutoZooming {
            per_frame_factor: self.speed.factor(),
        });
    }

    /// Put the camera on the first waypoint and start touring.
    pub fn start_tour(&mut self, camera: &mut Camera) {
        let first = self.tour.first();
        *camera = Camera::located(camera.mode(), first.offset, first.start_zoom);
        debug!(
            stop = %first.name,
            frames = self.tour.total_frames(),
            "Tour started"
        );
        self.set_state(AnimationState::Touring {
            stop_index: 0,
            frame_index: 0,
        });
    }

    /// Reset the camera home and start the reveal from zero.
    pub fn start_build(&mut self, camera: &mut Camera) {
        *camera = Camera::home(camera.mode());
        self.set_state(AnimationState::Building { progress: 0.0 });
    }

    /// Apply one frame of the current state to `camera`.
    pub fn advance(&mut self, camera: &mut Camera) {
        match self.state {
            AnimationState::Idle | AnimationState::Dragging { .. } => {}
            AnimationState::AutoZooming { per_frame_factor } => {
                camera.apply_zoom_rate(per_frame_factor);
            }
            AnimationState::Touring {
                stop_index,
                frame_index,
            } => self.advance_tour(camera, stop_index, frame_index + 1),
            AnimationState::Building { progress } => {
                let progress = progress + self.build_step;
                // Half a step of slack absorbs the rounding of repeated adds,
                // so the reveal ends after exactly ceil(1 / step) frames.
                if progress >= 1.0 - self.build_step * 0.5 {
                    self.set_state(AnimationState::Idle);
                } else {
                    self.state = AnimationState::Building { progress };
                }
            }
        }
    }

    fn advance_tour(&mut self, camera: &mut Camera, stop_index: usize, frame_index: u32) {
        camera.apply_zoom_rate(ZoomSpeed::Normal.factor());

        let duration = self
            .tour
            .get(stop_index)
            .map_or(0, |stop| stop.duration_frames);
        if frame_index < duration {
            self.state = AnimationState::Touring {
                stop_index,
                frame_index,
            };
            return;
        }

        match self.tour.get(stop_index + 1) {
            Some(next) => {
                debug!(stop = %next.name, index = stop_index + 1, "Tour advancing");
                *camera = Camera::located(camera.mode(), next.offset, next.start_zoom);
                self.state = AnimationState::Touring {
                    stop_index: stop_index + 1,
                    frame_index: 0,
                };
            }
            None => {
                debug!("Tour finished");
                *camera = Camera::home(camera.mode());
                self.set_state(AnimationState::Idle);
            }
        }
    }
}

impl Default for Animator {
    fn default() -> Self {
        Self {
            state: AnimationState::Idle,
            speed: ZoomSpeed::default(),
            tour: Tour::default(),
            build_step: DEFAULT_BUILD_STEP,
        }
    }
}
