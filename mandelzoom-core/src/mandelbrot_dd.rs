use crate::complex_dd::ComplexDD;
use crate::fractal::{Fractal, FractalParams, IterationResult, ESCAPE_NORM_SQ};

/// The quadratic map iterated in double-double precision.
///
/// `z² + c` is computed with full two-limb arithmetic on both components.
/// The escape test reads only the high limbs: by the time `|z|` nears the
/// radius the low limbs cannot change the decision.
///
/// There is no cardioid shortcut here. Near the cardioid boundary at deep
/// zoom an `f64` membership test would misclassify points the extended
/// camera can still tell apart.
#[derive(Debug, Clone)]
pub struct MandelbrotDD {
    params: FractalParams,
}

impl MandelbrotDD {
    pub fn new(params: FractalParams) -> Self {
        Self { params }
    }
}

impl Fractal for MandelbrotDD {
    type Point = ComplexDD;

    fn iterate(&self, c: ComplexDD) -> IterationResult {
        let mut z = ComplexDD::ZERO;
        for i in 0..self.params.max_iterations {
            z = z.square() + c;
            if z.hi_norm_sq() > ESCAPE_NORM_SQ {
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
    use crate::complex::Complex;
    use crate::double_double::RealDD;
    use crate::mandelbrot::Mandelbrot;

    fn params(n: u32) -> FractalParams {
        FractalParams::new(n).unwrap()
    }

    fn lift(re: f64, im: f64) -> ComplexDD {
        ComplexDD::from(Complex::new(re, im))
    }

    #[test]
    fn literal_cases() {
        let m = MandelbrotDD::new(params(100));
        let inside = m.iterate(lift(-0.5, 0.0));
        assert!(!inside.escaped());
        assert_eq!(inside.iterations(100), 100);
        assert_eq!(
            m.iterate(lift(1.0, 0.0)),
            IterationResult::Escaped { iterations: 2 }
        );
    }

    #[test]
    fn matches_native_counts_at_shallow_zoom() {
        let native = Mandelbrot::new(params(256));
        let extended = MandelbrotDD::new(params(256));
        let points = [
            Complex::new(0.0, 0.0),
            Complex::new(-0.75, 0.1),
            Complex::new(0.3, 0.5),
            Complex::new(-2.0, 0.0),
            Complex::new(1.0, 1.0),
            Complex::new(0.5, 0.0),
            Complex::new(-1.0, 0.0),
        ];
        for c in points {
            assert_eq!(
                native.iterate(c),
                extended.iterate(ComplexDD::from(c)),
                "mismatch at {c}"
            );
        }
    }

    #[test]
    fn distinguishes_points_below_f64_resolution() {
        // Two points 1e-20 apart collapse to the same f64 but not in DD. They
        // need not escape differently; the test is that the iteration reads
        // the low limb at all, so their orbits diverge within a few steps.
        let a = ComplexDD::new(RealDD::split(-0.745), RealDD::split(0.1));
        let b = ComplexDD::new(RealDD::new(-0.745, 1e-20), RealDD::split(0.1));
        assert_eq!(a.to_complex(), b.to_complex());

        let (mut za, mut zb) = (ComplexDD::ZERO, ComplexDD::ZERO);
        for _ in 0..5 {
            za = za.square() + a;
            zb = zb.square() + b;
        }
        assert_ne!(za, zb);
    }

    #[test]
    fn is_deterministic() {
        let m = MandelbrotDD::new(params(200));
        let c = ComplexDD::new(RealDD::new(-0.088, 1e-19), RealDD::new(0.655, -3e-19));
        assert_eq!(m.iterate(c), m.iterate(c));
    }
}
