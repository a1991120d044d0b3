//! Complex-number arithmetic for pole placement and frequency response.
//!
//! [`Complex`] is a plain `Copy` value with Cartesian storage. Powers are
//! computed through the polar form on the principal branch. Division by a
//! zero-magnitude value is an error ([`Complex::checked_div`]) rather than a
//! silent NaN.
//!
//! # Examples
//!
//! ```
//! use tfsynth::Complex;
//!
//! let z = Complex::new(0.0, 1.0);
//! let w = z * z;
//! assert!(w.approx_eq(Complex::new(-1.0, 0.0), 1e-12));
//!
//! // e^{jπ} = -1
//! let e = Complex::new(core::f64::consts::E, 0.0);
//! let minus_one = e.powc(Complex::new(0.0, core::f64::consts::PI));
//! assert!(minus_one.approx_eq(Complex::new(-1.0, 0.0), 1e-12));
//! ```

mod ops;


use core::fmt;

use crate::error::{SynthesisError, SynthesisResult};

/// Magnitude below which a value is treated as zero.
pub const NEARLY_ZERO: f64 = 1.0e-12;

/// `true` if `|value| < NEARLY_ZERO`.
#[inline]
pub fn is_nearly_zero(value: f64) -> bool {
    value.abs() < NEARLY_ZERO
}

/// A complex number `re + im·i`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub const ZERO: Complex = Complex { re: 0.0, im: 0.0 };
    pub const ONE: Complex = Complex { re: 1.0, im: 0.0 };
    /// The imaginary unit.
    pub const I: Complex = Complex { re: 0.0, im: 1.0 };

    #[inline]
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Build from polar coordinates `r∠θ`.
    #[inline]
    pub fn from_polar(r: f64, theta: f64) -> Self {
        Self::new(r * theta.cos(), r * theta.sin())
    }

    /// Complex conjugate.
    #[inline]
    pub fn conj(self) -> Self {
        Self::new(self.re, -self.im)
    }

    /// Polar length `√(re² + im²)`.
    #[inline]
    pub fn norm(self) -> f64 {
        self.re.hypot(self.im)
    }

    /// Polar angle `atan2(im, re)` in `(-π, π]`.
    #[inline]
    pub fn arg(self) -> f64 {
        self.im.atan2(self.re)
    }

    /// Raise to a real power via the polar form (principal branch).
    pub fn powf(self, power: f64) -> Self {
        let r = self.norm();
        if r == 0.0 {
            return if power == 0.0 { Self::ONE } else { Self::ZERO };
        }
        Self::from_polar(r.powf(power), self.arg() * power)
    }

    /// Raise to a complex power.
    ///
    /// With `self = r∠θ` and `p = a + b·i`, the result has magnitude
    /// `r^a · e^{-θb}` and angle `b·ln(r) + a·θ`.
    pub fn powc(self, power: Complex) -> Self {
        let r = self.norm();
        if r == 0.0 {
            return if power == Self::ZERO { Self::ONE } else { Self::ZERO };
        }
        let theta = self.arg();
        let magnitude = r.powf(power.re) * (-power.im * theta).exp();
        let angle = power.im * r.ln() + power.re * theta;
        Self::from_polar(magnitude, angle)
    }

    /// Divide, failing on a zero-magnitude divisor.
    pub fn checked_div(self, rhs: Complex) -> SynthesisResult<Complex> {
        let denom = rhs.re * rhs.re + rhs.im * rhs.im;
        if denom == 0.0 {
            return Err(SynthesisError::DivideByZero);
        }
        Ok(Self::new(
            (self.re * rhs.re + self.im * rhs.im) / denom,
            (self.im * rhs.re - self.re * rhs.im) / denom,
        ))
    }

    /// Divide by a real scalar, failing on zero.
    pub fn checked_div_scalar(self, rhs: f64) -> SynthesisResult<Complex> {
        if rhs == 0.0 {
            return Err(SynthesisError::DivideByZero);
        }
        Ok(Self::new(self.re / rhs, self.im / rhs))
    }

    /// Component-wise comparison within `eps`.
    #[inline]
    pub fn approx_eq(self, other: Complex, eps: f64) -> bool {
        (self.re - other.re).abs() <= eps && (self.im - other.im).abs() <= eps
    }

    /// `true` if the magnitude is below [`NEARLY_ZERO`].
    #[inline]
    pub fn is_nearly_zero(self) -> bool {
        self.norm() < NEARLY_ZERO
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.im >= 0.0 {
            write!(f, "{:.3} + {:.3} i", self.re, self.im)
        } else {
            write!(f, "{:.3} - {:.3} i", self.re, -self.im)
        }
    }
}

impl From<f64> for Complex {
    fn from(re: f64) -> Self {
        Self::new(re, 0.0)
    }
}

#[cfg(feature = "complex")]
impl From<num_complex::Complex64> for Complex {
    fn from(z: num_complex::Complex64) -> Self {
        Self::new(z.re, z.im)
    }
}

#[cfg(feature = "complex")]
impl From<Complex> for num_complex::Complex64 {
    fn from(z: Complex) -> Self {
        num_complex::Complex64::new(z.re, z.im)
    }
}
