use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use num_traits::{One, Zero};

use super::Complex;

// ── Complex ⊗ Complex ───────────────────────────────────────────────

impl Add for Complex {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl Sub for Complex {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl Mul for Complex {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

/// # Panics
///
/// Panics if `rhs` has zero magnitude. Use [`Complex::checked_div`] to
/// handle that case as an error.
impl Div for Complex {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        match self.checked_div(rhs) {
            Ok(q) => q,
            Err(_) => panic!("complex division by zero"),
        }
    }
}

impl Neg for Complex {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.re, -self.im)
    }
}

impl AddAssign for Complex {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Complex {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign for Complex {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl DivAssign for Complex {
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

// ── Complex ⊗ f64 ───────────────────────────────────────────────────

impl Add<f64> for Complex {
    type Output = Self;

    #[inline]
    fn add(self, rhs: f64) -> Self {
        Self::new(self.re + rhs, self.im)
    }
}

impl Sub<f64> for Complex {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: f64) -> Self {
        Self::new(self.re - rhs, self.im)
    }
}

impl Mul<f64> for Complex {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.re * rhs, self.im * rhs)
    }
}

/// # Panics
///
/// Panics if `rhs == 0.0`.
impl Div<f64> for Complex {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        match self.checked_div_scalar(rhs) {
            Ok(q) => q,
            Err(_) => panic!("complex division by zero"),
        }
    }
}

// ── f64 ⊗ Complex ───────────────────────────────────────────────────

impl Add<Complex> for f64 {
    type Output = Complex;

    #[inline]
    fn add(self, rhs: Complex) -> Complex {
        rhs + self
    }
}

impl Sub<Complex> for f64 {
    type Output = Complex;

    #[inline]
    fn sub(self, rhs: Complex) -> Complex {
        Complex::new(self - rhs.re, -rhs.im)
    }
}

impl Mul<Complex> for f64 {
    type Output = Complex;

    #[inline]
    fn mul(self, rhs: Complex) -> Complex {
        rhs * self
    }
}

// ── num-traits identities ───────────────────────────────────────────

impl Zero for Complex {
    #[inline]
    fn zero() -> Self {
        Complex::ZERO
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.re == 0.0 && self.im == 0.0
    }
}

impl One for Complex {
    #[inline]
    fn one() -> Self {
        Complex::ONE
    }
}
