use serde::{Deserialize, Serialize};

use crate::budget::IterationBudget;
use crate::complex::Complex;
use crate::complex_dd::ComplexDD;
use crate::double_double::RealDD;
use crate::viewport::{screen_to_uv, Camera, PrecisionMode, Viewport};

/// How escape counts are turned into colour. Serialized as its wire index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ColorTheme {
    #[default]
    Hue,
    Grayscale,
    Sinusoidal,
}

impl ColorTheme {
    pub const ALL: [ColorTheme; 3] = [Self::Hue, Self::Grayscale, Self::Sinusoidal];

    pub fn index(self) -> u8 {
        match self {
            Self::Hue => 0,
            Self::Grayscale => 1,
            Self::Sinusoidal => 2,
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Hue => "Hue",
            Self::Grayscale => "Grayscale",
            Self::Sinusoidal => "Sinusoidal",
        }
    }
}

impl From<ColorTheme> for u8 {
    fn from(theme: ColorTheme) -> Self {
        theme.index()
    }
}

impl TryFrom<u8> for ColorTheme {
    type Error = String;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::from_index(index).ok_or_else(|| format!("unknown color theme index {index}"))
    }
}

/// The native half of a descriptor's camera block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NativeCamera {
    pub zoom: f64,
    pub offset: Complex,
}

/// The extended half of a descriptor's camera block, as separate limbs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExtendedCamera {
    pub center_hi: Complex,
    pub center_lo: Complex,
    pub scale_hi: f64,
    pub scale_lo: f64,
}

/// Everything a renderer needs for one frame.
///
/// Both camera blocks are filled: the live one exactly, the other as a
/// projection of the same view. `precision_mode` says which one to read.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameDescriptor {
    pub resolution: (u32, u32),
    pub color_theme: ColorTheme,
    pub max_iterations: u32,
    pub reveal_progress: f64,
    pub precision_mode: PrecisionMode,
    pub native: NativeCamera,
    pub extended: ExtendedCamera,
}

impl FrameDescriptor {
    pub fn capture(
        viewport: &Viewport,
        color_theme: ColorTheme,
        budget: &IterationBudget,
        reveal_progress: f64,
    ) -> Self {
        let camera = viewport.camera;
        let (zoom, offset) = camera.native_view();
        let (center, scale) = camera.extended_view();
        Self {
            resolution: (viewport.width, viewport.height),
            color_theme,
            max_iterations: budget.max_iterations(camera.effective_zoom()),
            reveal_progress,
            precision_mode: camera.mode(),
            native: NativeCamera { zoom, offset },
            extended: ExtendedCamera {
                center_hi: center.hi(),
                center_lo: center.lo(),
                scale_hi: scale.hi,
                scale_lo: scale.lo,
            },
        }
    }

    pub fn width(&self) -> u32 {
        self.resolution.0
    }

    pub fn height(&self) -> u32 {
        self.resolution.1
    }

    /// The ceiling a renderer iterates to this frame.
    pub fn iteration_limit(&self) -> u32 {
        IterationBudget::iteration_limit(self.max_iterations, self.reveal_progress)
    }

    /// Rebuild the live camera from its block.
    pub fn camera(&self) -> Camera {
        match self.precision_mode {
            PrecisionMode::Native => Camera::Native {
                zoom: self.native.zoom,
                offset: self.native.offset,
            },
            PrecisionMode::Extended => Camera::Extended {
                center: ComplexDD::new(
                    RealDD::new(self.extended.center_hi.re, self.extended.center_lo.re),
                    RealDD::new(self.extended.center_hi.im, self.extended.center_lo.im),
                ),
                scale: RealDD::new(self.extended.scale_hi, self.extended.scale_lo),
            },
        }
    }

    /// Screen-space coordinate of a pixel's centre.
    #[inline]
    pub fn pixel_uv(&self, px: u32, py: u32) -> Complex {
        screen_to_uv(
            self.resolution.0,
            self.resolution.1,
            px as f64 + 0.5,
            py as f64 + 0.5,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(camera: Camera) -> Viewport {
        Viewport::new(camera, 160, 100).unwrap()
    }

    #[test]
    fn theme_wire_values() {
        for (i, theme) in ColorTheme::ALL.iter().enumerate() {
            assert_eq!(theme.index() as usize, i);
            assert_eq!(ColorTheme::from_index(i as u8), Some(*theme));
        }
        assert_eq!(ColorTheme::from_index(3), None);
        assert_eq!(serde_json::to_string(&ColorTheme::Sinusoidal).unwrap(), "2");
        assert!(serde_json::from_str::<ColorTheme>("7").is_err());
    }

    #[test]
    fn native_capture_copies_live_camera() {
        let vp = viewport(Camera::located(PrecisionMode::Native, Complex::new(-0.745, 0.1), 20.0));
        let d = FrameDescriptor::capture(&vp, ColorTheme::Hue, &IterationBudget::default(), 1.0);
        assert_eq!(d.resolution, (160, 100));
        assert_eq!(d.precision_mode, PrecisionMode::Native);
        assert_eq!(d.native.zoom, 20.0);
        assert_eq!(d.native.offset, Complex::new(-0.745, 0.1));
        assert_eq!(d.max_iterations, 299);
        assert_eq!(d.iteration_limit(), 299);
        assert_eq!(d.camera(), vp.camera);
        // Projection of the same view.
        assert_eq!(d.extended.center_hi, Complex::new(-0.745, 0.1));
        assert_eq!(d.extended.center_lo, Complex::ZERO);
        assert!((d.extended.scale_hi - 0.05).abs() < 1e-17);
    }

    #[test]
    fn extended_capture_keeps_low_limbs() {
        let center = ComplexDD::new(RealDD::new(-0.745, 3e-20), RealDD::new(0.1, -2e-21));
        let camera = Camera::Extended {
            center,
            scale: RealDD::new(1e-20, 4e-37),
        };
        let d = FrameDescriptor::capture(&viewport(camera), ColorTheme::Grayscale, &IterationBudget::default(), 1.0);
        assert_eq!(d.precision_mode, PrecisionMode::Extended);
        assert_eq!(d.extended.center_lo, Complex::new(3e-20, -2e-21));
        assert_eq!(d.extended.scale_lo, 4e-37);
        assert_eq!(d.camera(), camera);
        assert_eq!(d.max_iterations, 2452);
        assert!((d.native.zoom - 1e20).abs() / 1e20 < 1e-15);
    }

    #[test]
    fn reveal_scales_iteration_limit() {
        let vp = viewport(Camera::home(PrecisionMode::Native));
        let d = FrameDescriptor::capture(&vp, ColorTheme::Hue, &IterationBudget::default(), 0.5);
        assert_eq!(d.max_iterations, 150);
        assert_eq!(d.iteration_limit(), 75);
        let d = FrameDescriptor::capture(&vp, ColorTheme::Hue, &IterationBudget::default(), 0.0);
        assert_eq!(d.iteration_limit(), 1);
    }

    #[test]
    fn pixel_centres_are_symmetric() {
        let vp = viewport(Camera::home(PrecisionMode::Native));
        let d = FrameDescriptor::capture(&vp, ColorTheme::Hue, &IterationBudget::default(), 1.0);
        let first = d.pixel_uv(0, 0);
        let last = d.pixel_uv(159, 99);
        assert!((first.re + last.re).abs() < 1e-12);
        assert!((first.im + last.im).abs() < 1e-12);
        assert!(first.re < 0.0 && first.im > 0.0);
        assert!(first.re.abs() < 1.6 && first.im < 1.0);
    }

    #[test]
    fn serializes_with_camera_blocks() {
        let vp = viewport(Camera::home(PrecisionMode::Extended));
        let d = FrameDescriptor::capture(&vp, ColorTheme::Sinusoidal, &IterationBudget::default(), 1.0);
        let v: serde_json::Value = serde_json::to_value(d).unwrap();
        assert_eq!(v["color_theme"], 2);
        assert_eq!(v["precision_mode"], "extended");
        assert_eq!(v["extended"]["scale_hi"], 1.0);
        assert_eq!(v["native"]["offset"]["re"], -0.5);
    }
}
