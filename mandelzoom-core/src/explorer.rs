use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::animator::{AnimationState, Animator, Preset, Tour, ZoomSpeed, DEFAULT_BUILD_STEP};
use crate::budget::IterationBudget;
use crate::frame::{ColorTheme, FrameDescriptor};
use crate::viewport::{Camera, PrecisionMode, Viewport};

/// Wheel zoom factor applied to the scale for one notch inward.
pub const WHEEL_ZOOM_IN: f64 = 1.0 / 1.1;
/// Wheel zoom factor applied to the scale for one notch outward.
pub const WHEEL_ZOOM_OUT: f64 = 1.0 / 0.9;

/// Discrete user commands. Each one replaces the animation state outright.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Reset home and replay the progressive reveal.
    Build,
    StartTour,
    GoToPreset { preset: Preset },
    /// Switch between native and extended precision, keeping the view.
    ToggleDeepZoom,
    CycleSpeed,
    Reset,
    SetColorTheme { theme: ColorTheme },
}

/// Startup parameters for an [`Explorer`].
#[derive(Debug, Clone, PartialEq)]
pub struct ExplorerSettings {
    pub width: u32,
    pub height: u32,
    pub color_theme: ColorTheme,
    pub zoom_speed: ZoomSpeed,
    pub budget: IterationBudget,
    pub build_step: f64,
    pub precision: PrecisionMode,
    pub tour: Tour,
}

impl Default for ExplorerSettings {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            color_theme: ColorTheme::default(),
            zoom_speed: ZoomSpeed::default(),
            budget: IterationBudget::default(),
            build_step: DEFAULT_BUILD_STEP,
            precision: PrecisionMode::default(),
            tour: Tour::default(),
        }
    }
}

/// The interactive session: camera, animation and display settings.
///
/// The host calls [`tick`](Self::tick) once per display frame and forwards
/// pointer, wheel and command events as they arrive. Malformed input
/// (non-finite coordinates or deltas) is dropped without touching state.
#[derive(Debug, Clone)]
pub struct Explorer {
    viewport: Viewport,
    animator: Animator,
    color_theme: ColorTheme,
    budget: IterationBudget,
    frames: u64,
}

impl Explorer {
    pub fn new(settings: ExplorerSettings) -> crate::Result<Self> {
        let viewport = Viewport::new(
            Camera::home(settings.precision),
            settings.width,
            settings.height,
        )?;
        let animator = Animator::new(settings.zoom_speed, settings.tour, settings.build_step)?;
        Ok(Self {
            viewport,
            animator,
            color_theme: settings.color_theme,
            budget: settings.budget,
            frames: 0,
        })
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn camera(&self) -> &Camera {
        &self.viewport.camera
    }

    pub fn state(&self) -> AnimationState {
        self.animator.state()
    }

    pub fn zoom_speed(&self) -> ZoomSpeed {
        self.animator.speed()
    }

    pub fn color_theme(&self) -> ColorTheme {
        self.color_theme
    }

    pub fn precision_mode(&self) -> PrecisionMode {
        self.viewport.camera.mode()
    }

    /// Frames produced by [`tick`](Self::tick) so far.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    pub fn handle(&mut self, command: Command) {
        debug!(?command, state = self.animator.state().label(), "Command");
        let camera = &mut self.viewport.camera;
        match command {
            Command::Build => self.animator.start_build(camera),
            Command::StartTour => self.animator.start_tour(camera),
            Command::GoToPreset { preset } => {
                let (offset, zoom) = preset.location();
                *camera = Camera::located(camera.mode(), offset, zoom);
                self.animator.start_auto_zoom();
            }
            Command::ToggleDeepZoom => {
                let mode = camera.mode().toggled();
                *camera = camera.converted(mode);
                info!(mode = mode.label(), zoom = camera.effective_zoom(), "Precision mode switched");
                self.animator.set_state(AnimationState::Idle);
            }
            Command::CycleSpeed => {
                let speed = self.animator.cycle_speed();
                debug!(speed = speed.label(), "Zoom speed changed");
            }
            Command::Reset => {
                *camera = Camera::home(camera.mode());
                self.animator.set_state(AnimationState::Idle);
            }
            Command::SetColorTheme { theme } => self.color_theme = theme,
        }
    }

    // -----------------------------------------------------------------------
    // Pointer input
    // -----------------------------------------------------------------------

    /// Start a drag at screen position `(x, y)`.
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        if !(x.is_finite() && y.is_finite()) {
            return;
        }
        self.animator
            .set_state(AnimationState::Dragging { last: (x, y) });
    }

    /// Pan so the plane point under the previous position follows the
    /// pointer. Ignored unless a drag is in progress.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        if !(x.is_finite() && y.is_finite()) {
            return;
        }
        if let AnimationState::Dragging { last } = self.animator.state() {
            let last_uv = self.viewport.screen_to_uv(last.0, last.1);
            let now_uv = self.viewport.screen_to_uv(x, y);
            self.viewport.camera.translate(last_uv, now_uv);
            self.animator
                .set_state(AnimationState::Dragging { last: (x, y) });
        }
    }

    pub fn pointer_up(&mut self) {
        if let AnimationState::Dragging { .. } = self.animator.state() {
            self.animator.set_state(AnimationState::Idle);
        }
    }

    /// Zoom one notch about the cursor. Negative `delta` zooms in.
    ///
    /// Any animation stops; a drag in progress carries on. A zero delta only
    /// stops the animation: it is not treated as an outward notch, unlike
    /// hosts that map every non-negative delta to zooming out.
    pub fn wheel(&mut self, delta: f64, x: f64, y: f64) {
        if !(delta.is_finite() && x.is_finite() && y.is_finite()) {
            return;
        }
        if !matches!(self.animator.state(), AnimationState::Dragging { .. }) {
            self.animator.set_state(AnimationState::Idle);
        }
        let factor = if delta < 0.0 {
            WHEEL_ZOOM_IN
        } else if delta > 0.0 {
            WHEEL_ZOOM_OUT
        } else {
            return;
        };
        let uv = self.viewport.screen_to_uv(x, y);
        self.viewport.camera.zoom_about(uv, factor);
    }

    /// Change the output raster. The camera is untouched.
    pub fn resize(&mut self, width: u32, height: u32) -> crate::Result<()> {
        self.viewport.resize(width, height)?;
        debug!(
            width,
            height,
            aspect = self.viewport.aspect_ratio(),
            "Viewport resized"
        );
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Frames
    // -----------------------------------------------------------------------

    /// Advance one display frame and describe what to draw.
    pub fn tick(&mut self) -> FrameDescriptor {
        self.animator.advance(&mut self.viewport.camera);
        self.frames += 1;
        self.descriptor()
    }

    /// Describe the current frame without advancing.
    pub fn descriptor(&self) -> FrameDescriptor {
        FrameDescriptor::capture(
            &self.viewport,
            self.color_theme,
            &self.budget,
            self.animator.reveal_progress(),
        )
    }
}
