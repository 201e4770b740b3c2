use crate::complex::Complex;
use crate::fractal::{Fractal, FractalParams, IterationResult, ESCAPE_NORM_SQ};

/// The quadratic map `z ← z² + c` from `z = 0`, iterated in `f64`.
#[derive(Debug, Clone)]
pub struct Mandelbrot {
    params: FractalParams,
}

impl Mandelbrot {
    pub fn new(params: FractalParams) -> Self {
        Self { params }
    }
}

/// Closed-form membership test for the main cardioid.
#[inline]
fn in_cardioid(re: f64, im: f64) -> bool {
    let im2 = im * im;
    let q = (re - 0.25) * (re - 0.25) + im2;
    q * (q + (re - 0.25)) <= 0.25 * im2
}

/// Closed-form membership test for the period-2 bulb.
#[inline]
fn in_period2_bulb(re: f64, im: f64) -> bool {
    (re + 1.0) * (re + 1.0) + im * im <= 0.0625
}

impl Fractal for Mandelbrot {
    type Point = Complex;

    fn iterate(&self, c: Complex) -> IterationResult {
        // Neither region ever escapes, so skipping the loop changes nothing
        // but the cost.
        if in_cardioid(c.re, c.im) || in_period2_bulb(c.re, c.im) {
            return IterationResult::Interior;
        }

        let mut z = Complex::ZERO;
        for i in 0..self.params.max_iterations {
            z = z.square() + c;
            if z.norm_sq() > ESCAPE_NORM_SQ {
                return IterationResult::Escaped { iterations: i };
            }
        }
        IterationResult::Interior
    }

    fn params(&self) -> &FractalParams {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mb(n: u32) -> Mandelbrot {
        Mandelbrot::new(FractalParams::new(n).unwrap())
    }

    #[test]
    fn cardioid_point_never_escapes() {
        let r = mb(100).iterate(Complex::new(-0.5, 0.0));
        assert!(!r.escaped());
        assert_eq!(r.iterations(100), 100);
    }

    #[test]
    fn one_escapes_on_third_step() {
        // 0 → 1 → 2 → 5: |z|² = 25 > 4 at i = 2.
        assert_eq!(
            mb(100).iterate(Complex::new(1.0, 0.0)),
            IterationResult::Escaped { iterations: 2 }
        );
    }

    #[test]
    fn far_point_escapes_immediately() {
        assert_eq!(
            mb(100).iterate(Complex::new(10.0, 0.0)),
            IterationResult::Escaped { iterations: 0 }
        );
    }

    #[test]
    fn period2_bulb_is_interior() {
        assert_eq!(
            mb(50).iterate(Complex::new(-1.0, 0.0)),
            IterationResult::Interior
        );
    }

    #[test]
    fn shortcut_agrees_with_plain_loop() {
        // Points just inside both shortcut regions; the plain loop must agree
        // they stay bounded for a modest ceiling.
        for c in [
            Complex::new(0.24, 0.0),
            Complex::new(-0.1, 0.3),
            Complex::new(-1.1, 0.1),
        ] {
            let mut z = Complex::ZERO;
            let mut escaped = false;
            for _ in 0..500 {
                z = z.square() + c;
                if z.norm_sq() > ESCAPE_NORM_SQ {
                    escaped = true;
                    break;
                }
            }
            assert!(!escaped, "{c} escaped in the plain loop");
            assert_eq!(mb(500).iterate(c), IterationResult::Interior);
        }
    }

    #[test]
    fn ceiling_of_one_escapes_only_far_points() {
        let m = mb(1);
        assert!(m.iterate(Complex::new(3.0, 0.0)).escaped());
        assert!(!m.iterate(Complex::new(0.3, 0.5)).escaped());
    }
}
