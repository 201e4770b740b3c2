use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::{debug, info};

use mandelzoom_core::{
    Camera, Complex, Fractal, FractalParams, FrameDescriptor, IterationResult, Mandelbrot,
    MandelbrotDD, PrecisionMode,
};

use crate::error::RenderError;
use crate::iteration_buffer::IterationBuffer;

/// The result of a full-frame render.
///
/// Contains raw iteration data (no coloring); the caller applies a theme to
/// produce displayable pixels.
#[derive(Debug, Clone)]
pub struct RenderResult {
    pub iterations: IterationBuffer,
    pub precision_mode: PrecisionMode,
    pub elapsed: Duration,
}

/// Evaluate every row of the frame in parallel.
///
/// `point` maps a pixel-centre `uv` to the evaluator's point type.
fn render_rows<F, P>(fractal: &F, descriptor: &FrameDescriptor, data: &mut [IterationResult], point: P)
where
    F: Fractal + Sync,
    P: Fn(Complex) -> F::Point + Sync,
{
    let width = descriptor.width() as usize;
    data.par_chunks_mut(width)
        .enumerate()
        .for_each(|(py, row)| {
            for (px, out) in row.iter_mut().enumerate() {
                let uv = descriptor.pixel_uv(px as u32, py as u32);
                *out = fractal.iterate(point(uv));
            }
        });
}

/// Render a full frame in the descriptor's precision mode, iterating each
/// pixel centre to `descriptor.iteration_limit()`.
///
/// Rows are distributed over the Rayon pool. The output only depends on the
/// descriptor, so repeated calls give identical buffers.
pub fn render(descriptor: &FrameDescriptor) -> crate::Result<RenderResult> {
    let (width, height) = descriptor.resolution;
    if width == 0 || height == 0 {
        return Err(RenderError::InvalidDimensions { width, height });
    }

    let start = Instant::now();
    let limit = descriptor.iteration_limit();
    let params = FractalParams::new(limit)?;
    let camera = descriptor.camera();
    debug!(
        width,
        height,
        limit,
        mode = camera.mode().label(),
        "Starting render"
    );

    let mut iterations = IterationBuffer::new(width, height, limit);
    match camera {
        Camera::Native { .. } => {
            let fractal = Mandelbrot::new(params);
            render_rows(&fractal, descriptor, &mut iterations.data, |uv| {
                camera.plane_point_native(uv)
            });
        }
        Camera::Extended { .. } => {
            let fractal = MandelbrotDD::new(params);
            render_rows(&fractal, descriptor, &mut iterations.data, |uv| {
                camera.plane_point(uv)
            });
        }
    }

    let elapsed = start.elapsed();
    info!(
        elapsed_ms = elapsed.as_millis(),
        interior = iterations.interior_count(),
        "Render complete"
    );

    Ok(RenderResult {
        iterations,
        precision_mode: camera.mode(),
        elapsed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mandelzoom_core::{ColorTheme, IterationBudget, Viewport};

    fn descriptor(camera: Camera, w: u32, h: u32, reveal: f64) -> FrameDescriptor {
        let vp = Viewport::new(camera, w, h).unwrap();
        FrameDescriptor::capture(&vp, ColorTheme::Hue, &IterationBudget::default(), reveal)
    }

    #[test]
    fn home_frame_has_both_classes() {
        let d = descriptor(Camera::home(PrecisionMode::Native), 64, 48, 1.0);
        let result = render(&d).unwrap();
        assert_eq!(result.iterations.data.len(), 64 * 48);
        assert_eq!(result.iterations.iteration_limit, 150);
        let interior = result.iterations.interior_count();
        assert!(interior > 0 && interior < 64 * 48);
    }

    #[test]
    fn frame_outside_the_set_escapes_everywhere() {
        let d = descriptor(
            Camera::located(PrecisionMode::Native, Complex::new(5.0, 5.0), 1000.0),
            16,
            16,
            1.0,
        );
        let it = render(&d).unwrap().iterations;
        assert_eq!(it.interior_count(), 0);
        assert!(it
            .data
            .iter()
            .all(|r| *r == IterationResult::Escaped { iterations: 0 }));
    }

    #[test]
    fn zero_reveal_iterates_once() {
        let d = descriptor(Camera::home(PrecisionMode::Native), 32, 32, 0.0);
        let it = render(&d).unwrap().iterations;
        assert_eq!(it.iteration_limit, 1);
        for r in &it.data {
            if let IterationResult::Escaped { iterations } = r {
                assert_eq!(*iterations, 0);
            }
        }
    }

    #[test]
    fn extended_mode_uses_extended_evaluator() {
        let d = descriptor(Camera::home(PrecisionMode::Extended), 32, 24, 1.0);
        let result = render(&d).unwrap();
        assert_eq!(result.precision_mode, PrecisionMode::Extended);
        assert!(result.iterations.interior_count() > 0);
    }

    #[test]
    fn rejects_empty_resolution() {
        let mut d = descriptor(Camera::home(PrecisionMode::Native), 8, 8, 1.0);
        d.resolution = (0, 8);
        assert!(matches!(
            render(&d),
            Err(RenderError::InvalidDimensions { width: 0, height: 8 })
        ));
    }

    #[test]
    fn render_is_deterministic() {
        let d = descriptor(
            Camera::located(PrecisionMode::Extended, Complex::new(-0.745, 0.1), 200.0),
            48,
            32,
            0.7,
        );
        let a = render(&d).unwrap().iterations.data;
        let b = render(&d).unwrap().iterations.data;
        assert_eq!(a, b);
    }
}
