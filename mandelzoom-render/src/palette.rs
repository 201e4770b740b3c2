use mandelzoom_core::{ColorTheme, IterationResult};
use rayon::prelude::*;

use crate::buffer::RenderBuffer;
use crate::iteration_buffer::IterationBuffer;

const INTERIOR: [u8; 4] = [0, 0, 0, 255];

// ---------------------------------------------------------------------------
// Color math
// ---------------------------------------------------------------------------

#[inline]
fn fract(x: f64) -> f64 {
    x - x.floor()
}

#[inline]
fn to_byte(channel: f64) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// HSV to RGB with every component in `[0, 1]`. Hue wraps.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> [f64; 3] {
    const K: [f64; 3] = [1.0, 2.0 / 3.0, 1.0 / 3.0];
    let channel = |k: f64| {
        let p = (fract(h + k) * 6.0 - 3.0).abs();
        v * (1.0 + ((p - 1.0).clamp(0.0, 1.0) - 1.0) * s)
    };
    [channel(K[0]), channel(K[1]), channel(K[2])]
}

/// Map a normalized escape fraction `t` to RGB under `theme`.
fn shade(theme: ColorTheme, t: f64) -> [f64; 3] {
    match theme {
        ColorTheme::Hue => hsv_to_rgb(t, 1.0, 1.0),
        ColorTheme::Grayscale => [t, t, t],
        ColorTheme::Sinusoidal => [
            (t * 10.0 + 0.5).sin() * 0.5 + 0.5,
            (t * 15.0 + 1.0).sin() * 0.5 + 0.5,
            (t * 20.0 + 1.5).sin() * 0.5 + 0.5,
        ],
    }
}

// ---------------------------------------------------------------------------
// Coloring
// ---------------------------------------------------------------------------

/// Map one iteration result to an RGBA color.
///
/// Escaped points are shaded by `t = i / limit`; the interior is black.
pub fn color(theme: ColorTheme, result: IterationResult, limit: u32) -> [u8; 4] {
    match result.escape_fraction(limit) {
        None => INTERIOR,
        Some(t) => {
            let [r, g, b] = shade(theme, t);
            [to_byte(r), to_byte(g), to_byte(b), 255]
        }
    }
}

/// Colorize an entire iteration buffer into an RGBA pixel buffer.
pub fn colorize(iter_buf: &IterationBuffer, theme: ColorTheme) -> RenderBuffer {
    let limit = iter_buf.iteration_limit;
    let mut pixels = vec![0u8; iter_buf.data.len() * 4];
    pixels
        .par_chunks_mut(4)
        .zip(iter_buf.data.par_iter())
        .for_each(|(pixel, &result)| {
            pixel.copy_from_slice(&color(theme, result, limit));
        });
    RenderBuffer {
        width: iter_buf.width,
        height: iter_buf.height,
        pixels,
    }
}
