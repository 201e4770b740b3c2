use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::complex::Complex;
use crate::complex_dd::ComplexDD;
use crate::double_double::RealDD;
use crate::error::CoreError;

/// Smallest plane half-height per screen unit. Below this the double-double
/// mantissa can no longer separate neighbouring pixels.
pub const MIN_SCALE: f64 = 1e-28;

/// Largest plane half-height per screen unit (zoomed all the way out).
pub const MAX_SCALE: f64 = 1e2;

/// Below this scale a native camera has exhausted `f64`.
pub const NATIVE_PRECISION_SCALE: f64 = 1e-13;

/// Canonical starting view: the whole set, centred on its bulk.
pub const HOME_OFFSET: Complex = Complex { re: -0.5, im: 0.0 };
pub const HOME_ZOOM: f64 = 1.0;

/// Which numeric representation the camera currently lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrecisionMode {
    #[default]
    Native,
    Extended,
}

impl PrecisionMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Native => Self::Extended,
            Self::Extended => Self::Native,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Native => "f64",
            Self::Extended => "f64\u{00d7}2",
        }
    }
}

/// The authoritative camera, in exactly one representation at a time.
///
/// The other representation is never stored: it is derived on demand when a
/// frame descriptor needs it, and materialized only by an explicit
/// [`converted`](Self::converted) at a mode switch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Camera {
    /// `plane = uv / zoom + offset`, all in `f64`.
    Native { zoom: f64, offset: Complex },
    /// `plane = uv · scale + center` with `scale = 1 / zoom`, in double-double.
    Extended { center: ComplexDD, scale: RealDD },
}

#[inline]
fn clamp_zoom(zoom: f64) -> f64 {
    let clamped = zoom.clamp(1.0 / MAX_SCALE, 1.0 / MIN_SCALE);
    if clamped != zoom {
        debug!(requested = zoom, clamped, "Zoom clamped to precision range");
    }
    clamped
}

#[inline]
fn clamp_scale(scale: RealDD) -> RealDD {
    let clamped = scale.clamp(MIN_SCALE, MAX_SCALE);
    if clamped != scale {
        debug!(requested = scale.hi, clamped = clamped.hi, "Scale clamped to precision range");
    }
    clamped
}

impl Camera {
    /// The home view in the given representation.
    pub fn home(mode: PrecisionMode) -> Self {
        Self::located(mode, HOME_OFFSET, HOME_ZOOM)
    }

    /// A camera centred on `offset` at `zoom`, in the given representation.
    pub fn located(mode: PrecisionMode, offset: Complex, zoom: f64) -> Self {
        let zoom = clamp_zoom(zoom);
        match mode {
            PrecisionMode::Native => Self::Native { zoom, offset },
            PrecisionMode::Extended => Self::Extended {
                center: ComplexDD::from(offset),
                scale: RealDD::split(zoom).recip(),
            },
        }
    }

    pub fn mode(&self) -> PrecisionMode {
        match self {
            Self::Native { .. } => PrecisionMode::Native,
            Self::Extended { .. } => PrecisionMode::Extended,
        }
    }

    /// `zoom` in native mode, `1 / scale` in extended mode.
    pub fn effective_zoom(&self) -> f64 {
        self.native_view().0
    }

    /// `(zoom, offset)` as a native camera sees this view. Extended cameras
    /// collapse `hi + lo`, losing whatever the low limbs carried.
    pub fn native_view(&self) -> (f64, Complex) {
        match *self {
            Self::Native { zoom, offset } => (zoom, offset),
            Self::Extended { center, scale } => {
                (clamp_zoom(scale.recip().to_f64()), center.to_complex())
            }
        }
    }

    /// `(center, scale)` as an extended camera sees this view. The split of a
    /// native offset is exact.
    pub fn extended_view(&self) -> (ComplexDD, RealDD) {
        match *self {
            Self::Native { zoom, offset } => (ComplexDD::from(offset), RealDD::split(zoom).recip()),
            Self::Extended { center, scale } => (center, scale),
        }
    }

    /// Materialize the view in `mode`. Only called at a mode switch.
    pub fn converted(self, mode: PrecisionMode) -> Self {
        match mode {
            PrecisionMode::Native => {
                let (zoom, offset) = self.native_view();
                Self::Native { zoom, offset }
            }
            PrecisionMode::Extended => {
                let (center, scale) = self.extended_view();
                Self::Extended { center, scale }
            }
        }
    }

    /// Screen→plane in the live precision. Native results are lifted exactly.
    pub fn plane_point(&self, uv: Complex) -> ComplexDD {
        match *self {
            Self::Native { zoom, offset } => ComplexDD::from(uv * zoom.recip() + offset),
            Self::Extended { center, scale } => center + ComplexDD::scaled(uv, scale),
        }
    }

    /// Screen→plane in `f64`. Exact for native cameras; extended cameras
    /// collapse their result.
    #[inline]
    pub fn plane_point_native(&self, uv: Complex) -> Complex {
        match *self {
            Self::Native { zoom, offset } => uv * zoom.recip() + offset,
            Self::Extended { .. } => self.plane_point(uv).to_complex(),
        }
    }

    /// Drag: shift the center by the plane distance between two consecutive
    /// pointer positions, so the point under the pointer follows it.
    pub fn translate(&mut self, last_uv: Complex, now_uv: Complex) {
        match self {
            Self::Native { zoom, offset } => {
                let inv = zoom.recip();
                let delta = (now_uv * inv + *offset) - (last_uv * inv + *offset);
                *offset = *offset - delta;
            }
            Self::Extended { center, scale } => {
                let delta = (*center + ComplexDD::scaled(now_uv, *scale))
                    - (*center + ComplexDD::scaled(last_uv, *scale));
                *center = *center - delta;
            }
        }
    }

    /// Zoom by `factor` (`> 1` out, `< 1` in) keeping the plane point under
    /// `uv` fixed.
    ///
    /// With `cursor` the anchored point, `center' = cursor − (cursor −
    /// center) · f` and `scale' = scale · f`. Since `cursor − center = uv ·
    /// scale`, the center is computed as `cursor − uv · scale'`, which stays
    /// exact when the new scale is clamped.
    pub fn zoom_about(&mut self, uv: Complex, factor: f64) {
        match *self {
            Self::Native { zoom, offset } => {
                let cursor = uv * zoom.recip() + offset;
                let zoom = clamp_zoom(zoom / factor);
                *self = Self::Native {
                    zoom,
                    offset: cursor - uv * zoom.recip(),
                };
            }
            Self::Extended { center, scale } => {
                let cursor = center + ComplexDD::scaled(uv, scale);
                let scale = clamp_scale(scale * factor);
                *self = Self::Extended {
                    center: cursor - ComplexDD::scaled(uv, scale),
                    scale,
                };
            }
        }
    }

    /// One frame of automated zoom about the center. Native multiplies the
    /// zoom by `per_frame_factor`; extended multiplies the scale by
    /// `2 − per_frame_factor`, the first-order reciprocal.
    pub fn apply_zoom_rate(&mut self, per_frame_factor: f64) {
        match self {
            Self::Native { zoom, .. } => *zoom = clamp_zoom(*zoom * per_frame_factor),
            Self::Extended { scale, .. } => *scale = clamp_scale(*scale * (2.0 - per_frame_factor)),
        }
    }

    /// A hint when the live representation is running out of digits.
    pub fn precision_warning(&self) -> Option<&'static str> {
        match *self {
            Self::Native { zoom, .. } if zoom.recip() < NATIVE_PRECISION_SCALE => {
                Some("f64 precision exhausted; switch to deep zoom")
            }
            Self::Extended { scale, .. } if scale.hi <= MIN_SCALE * 10.0 => {
                Some("Approaching double-double precision limits; artifacts may appear")
            }
            _ => None,
        }
    }
}

/// Map a screen position (pixels, y down) to the centred, aspect-corrected
/// unit square: y spans `[-1, 1]` upward, x spans `[-w/h, w/h]`.
#[inline]
pub fn screen_to_uv(width: u32, height: u32, x: f64, y: f64) -> Complex {
    let (w, h) = (width as f64, height as f64);
    Complex::new(((x / w) * 2.0 - 1.0) * (w / h), 1.0 - (y / h) * 2.0)
}

/// The camera together with the output raster it is projected onto.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub camera: Camera,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(camera: Camera, width: u32, height: u32) -> crate::Result<Self> {
        validate_dimensions(width, height)?;
        Ok(Self {
            camera,
            width,
            height,
        })
    }

    /// Change the raster size; the camera is untouched.
    pub fn resize(&mut self, width: u32, height: u32) -> crate::Result<()> {
        validate_dimensions(width, height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    #[inline]
    pub fn screen_to_uv(&self, x: f64, y: f64) -> Complex {
        screen_to_uv(self.width, self.height, x, y)
    }

    /// The plane point under a screen position, in the live precision.
    pub fn screen_to_plane(&self, x: f64, y: f64) -> ComplexDD {
        self.camera.plane_point(self.screen_to_uv(x, y))
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

fn validate_dimensions(width: u32, height: u32) -> crate::Result<()> {
    if width == 0 || height == 0 {
        return Err(CoreError::InvalidViewport {
            reason: format!("dimensions must be > 0, got {width}×{height}"),
        });
    }
    Ok(())
}
