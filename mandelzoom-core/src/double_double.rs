use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// A real number carried as the unevaluated sum of two `f64` limbs.
///
/// `hi` is the nearest `f64` to the value and `lo` the rounding residual, so
/// after every operation `|lo| ≤ ulp(hi) / 2`. That doubles the usable
/// mantissa to roughly 106 bits (~31 decimal digits), which is what lets the
/// extended camera keep adjacent pixels distinct long after `f64` runs out.
///
/// All operations are pure and total. They are built from the error-free
/// transformations in Hida, Li & Bailey, "Library for Double-Double and
/// Quad-Double Arithmetic" (2001).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RealDD {
    pub hi: f64,
    pub lo: f64,
}

// ---------------------------------------------------------------------------
// Error-free building blocks
// ---------------------------------------------------------------------------

/// Knuth's TwoSum: `s + e == a + b` exactly, no precondition on magnitudes.
#[inline]
fn two_sum(a: f64, b: f64) -> (f64, f64) {
    let s = a + b;
    let bb = s - a;
    let e = (a - (s - bb)) + (b - bb);
    (s, e)
}

/// Dekker's FastTwoSum, valid when `|a| >= |b|`.
#[inline]
fn quick_two_sum(a: f64, b: f64) -> (f64, f64) {
    let s = a + b;
    (s, b - (s - a))
}

/// TwoProd via fused multiply-add: `p + e == a * b` exactly.
#[inline]
fn two_prod(a: f64, b: f64) -> (f64, f64) {
    let p = a * b;
    (p, a.mul_add(b, -p))
}

// ---------------------------------------------------------------------------
// Construction and inspection
// ---------------------------------------------------------------------------

impl RealDD {
    pub const ZERO: Self = Self { hi: 0.0, lo: 0.0 };
    pub const ONE: Self = Self { hi: 1.0, lo: 0.0 };

    /// Build from raw limbs, renormalizing so the invariant holds even if the
    /// caller passes an unnormalized pair.
    #[inline]
    pub fn new(hi: f64, lo: f64) -> Self {
        let (hi, lo) = two_sum(hi, lo);
        Self { hi, lo }
    }

    /// Split a native value into limbs. `f64` is the base type, so the split
    /// is exact and the residual is zero.
    #[inline]
    pub fn split(value: f64) -> Self {
        Self { hi: value, lo: 0.0 }
    }

    /// Collapse back to a single `f64`, dropping bits below `ulp(hi)`.
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.hi + self.lo
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.hi.is_finite() && self.lo.is_finite()
    }

    #[inline]
    pub fn is_positive(self) -> bool {
        self.hi > 0.0 || (self.hi == 0.0 && self.lo > 0.0)
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        self.hi < 0.0 || (self.hi == 0.0 && self.lo < 0.0)
    }

    #[inline]
    pub fn abs(self) -> Self {
        if self.is_negative() {
            -self
        } else {
            self
        }
    }

    /// `1 / self`, refined with one Newton correction on the residual.
    ///
    /// Callers guarantee `self != 0`; the camera never lets its scale reach
    /// zero.
    pub fn recip(self) -> Self {
        let q1 = 1.0 / self.hi;
        let residual = Self::ONE - self * q1;
        let q2 = residual.hi / self.hi;
        let (hi, lo) = quick_two_sum(q1, q2);
        Self { hi, lo }
    }

    /// Clamp into `[min, max]`, comparing the full two-limb value.
    pub fn clamp(self, min: f64, max: f64) -> Self {
        if self < Self::split(min) {
            Self::split(min)
        } else if self > Self::split(max) {
            Self::split(max)
        } else {
            self
        }
    }
}

impl From<f64> for RealDD {
    #[inline]
    fn from(value: f64) -> Self {
        Self::split(value)
    }
}

// ---------------------------------------------------------------------------
// Arithmetic
// ---------------------------------------------------------------------------

impl Add for RealDD {
    type Output = Self;

    /// IEEE-style double-double addition (accurate variant).
    #[inline]
    fn add(self, rhs: Self) -> Self {
        let (s, e) = two_sum(self.hi, rhs.hi);
        let (t, f) = two_sum(self.lo, rhs.lo);
        let (s, e) = quick_two_sum(s, e + t);
        let (hi, lo) = quick_two_sum(s, e + f);
        Self { hi, lo }
    }
}

impl Sub for RealDD {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self + (-rhs)
    }
}

impl Mul for RealDD {
    type Output = Self;

    /// The `lo × lo` term sits below the result's precision and is dropped.
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        let (p, e) = two_prod(self.hi, rhs.hi);
        let e = e + (self.hi * rhs.lo + self.lo * rhs.hi);
        let (hi, lo) = quick_two_sum(p, e);
        Self { hi, lo }
    }
}

/// Scalar multiply, used to stretch a screen-space direction by the camera
/// scale without promoting the direction to two limbs.
impl Mul<f64> for RealDD {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self {
        let (p, e) = two_prod(self.hi, rhs);
        let (hi, lo) = quick_two_sum(p, e + self.lo * rhs);
        Self { hi, lo }
    }
}

impl Neg for RealDD {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            hi: -self.hi,
            lo: -self.lo,
        }
    }
}

impl AddAssign for RealDD {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for RealDD {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign for RealDD {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

// ---------------------------------------------------------------------------
// Comparison and display
// ---------------------------------------------------------------------------

impl PartialEq for RealDD {
    fn eq(&self, other: &Self) -> bool {
        self.hi == other.hi && self.lo == other.lo
    }
}

impl PartialOrd for RealDD {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.hi.partial_cmp(&other.hi) {
            Some(Ordering::Equal) => self.lo.partial_cmp(&other.lo),
            ord => ord,
        }
    }
}

impl fmt::Display for RealDD {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+.17e} {:+.3e}", self.hi, self.lo)
    }
}
