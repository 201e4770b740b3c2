use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

use crate::complex::Complex;
use crate::double_double::RealDD;

/// A complex number with [`RealDD`] components.
///
/// Holds the extended camera center and the iterated `z` in deep-zoom mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplexDD {
    pub re: RealDD,
    pub im: RealDD,
}

impl ComplexDD {
    pub const ZERO: Self = Self {
        re: RealDD::ZERO,
        im: RealDD::ZERO,
    };

    #[inline]
    pub fn new(re: RealDD, im: RealDD) -> Self {
        Self { re, im }
    }

    /// A native direction stretched by an extended scale factor.
    ///
    /// This is the screen→plane step `uv · scale`; it uses the scalar
    /// multiply so the direction never needs two limbs.
    #[inline]
    pub fn scaled(direction: Complex, scale: RealDD) -> Self {
        Self {
            re: scale * direction.re,
            im: scale * direction.im,
        }
    }

    /// `z²` with every partial product carried in two limbs.
    #[inline]
    pub fn square(self) -> Self {
        let re = self.re * self.re - self.im * self.im;
        let im = self.re * self.im * 2.0;
        Self { re, im }
    }

    /// `re² + im²` from the high limbs only. Good enough for escape decisions,
    /// which only need to know that `|z|` has clearly passed the radius.
    #[inline]
    pub fn hi_norm_sq(self) -> f64 {
        self.re.hi * self.re.hi + self.im.hi * self.im.hi
    }

    /// Collapse each component to `hi + lo`.
    #[inline]
    pub fn to_complex(self) -> Complex {
        Complex::new(self.re.to_f64(), self.im.to_f64())
    }

    #[inline]
    pub fn hi(self) -> Complex {
        Complex::new(self.re.hi, self.im.hi)
    }

    #[inline]
    pub fn lo(self) -> Complex {
        Complex::new(self.re.lo, self.im.lo)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }
}

impl From<Complex> for ComplexDD {
    #[inline]
    fn from(c: Complex) -> Self {
        Self {
            re: RealDD::split(c.re),
            im: RealDD::split(c.im),
        }
    }
}

impl Add for ComplexDD {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl Sub for ComplexDD {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl Mul<f64> for ComplexDD {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.re * rhs, self.im * rhs)
    }
}

impl std::fmt::Display for ComplexDD {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}) + ({})i", self.re, self.im)
    }
}
