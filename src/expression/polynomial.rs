use core::fmt::Write as _;
use core::ops::{Add, Mul, Neg, Sub};

use num_traits::Zero;

use crate::error::{SynthesisError, SynthesisResult};

/// Largest integer power a polynomial is raised to by repeated multiplication.
pub const MAX_EXPONENT: f64 = 1000.0;

/// Largest power magnitude any term may reach.
const MAX_POWER: i64 = 1_000_000;

/// One `coefficient * variable^power` term.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PolynomialTerm {
    pub power: i32,
    pub coefficient: f64,
}

impl PolynomialTerm {
    #[inline]
    pub fn new(power: i32, coefficient: f64) -> Self {
        Self { power, coefficient }
    }
}

/// Discrete convolution of two coefficient sequences.
///
/// Multiplying two polynomials whose coefficients are stored in the same
/// power order is a convolution of those coefficients. An empty input
/// gives an empty output.
pub fn convolve<T>(a: &[T], b: &[T]) -> Vec<T>
where
    T: Copy + Zero + Mul<Output = T>,
{
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let mut out = vec![T::zero(); a.len() + b.len() - 1];
    for (i, &x) in a.iter().enumerate() {
        for (j, &y) in b.iter().enumerate() {
            out[i + j] = out[i + j] + x * y;
        }
    }
    out
}

/// Dense Laurent polynomial in one variable.
///
/// `coefficients[k]` multiplies `variable^(low + k)`. Both ends are kept
/// free of exact zeros, so the zero polynomial has no coefficients.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polynomial {
    low: i32,
    coefficients: Vec<f64>,
}

impl Polynomial {
    fn normalized(low: i32, mut coefficients: Vec<f64>) -> Self {
        while coefficients.last() == Some(&0.0) {
            coefficients.pop();
        }
        let leading = coefficients.iter().take_while(|&&c| c == 0.0).count();
        if leading == coefficients.len() {
            return Self::zero();
        }
        coefficients.drain(..leading);
        Self {
            low: low + leading as i32,
            coefficients,
        }
    }

    pub fn zero() -> Self {
        Self {
            low: 0,
            coefficients: Vec::new(),
        }
    }

    pub fn constant(value: f64) -> Self {
        Self::normalized(0, vec![value])
    }

    pub fn monomial(coefficient: f64, power: i32) -> Self {
        Self::normalized(power, vec![coefficient])
    }

    /// Sum of the given terms. Repeated powers accumulate.
    pub fn from_terms(terms: &[PolynomialTerm]) -> Self {
        terms.iter().fold(Self::zero(), |acc, t| {
            &acc + &Self::monomial(t.coefficient, t.power)
        })
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// Highest power with a nonzero coefficient.
    pub fn degree(&self) -> Option<i32> {
        if self.is_zero() {
            None
        } else {
            Some(self.low + self.coefficients.len() as i32 - 1)
        }
    }

    /// Lowest power with a nonzero coefficient.
    pub fn lowest_power(&self) -> Option<i32> {
        if self.is_zero() {
            None
        } else {
            Some(self.low)
        }
    }

    /// Coefficient of `variable^power`, zero when absent.
    pub fn coefficient(&self, power: i32) -> f64 {
        let offset = power as i64 - self.low as i64;
        if offset < 0 {
            return 0.0;
        }
        self.coefficients.get(offset as usize).copied().unwrap_or(0.0)
    }

    /// The value of a polynomial with no variable terms.
    pub fn as_constant(&self) -> Option<f64> {
        match self.coefficients.as_slice() {
            [] => Some(0.0),
            [c] if self.low == 0 => Some(*c),
            _ => None,
        }
    }

    /// `(power, coefficient)` of a single nonzero term.
    pub fn as_monomial(&self) -> Option<(i32, f64)> {
        match self.coefficients.as_slice() {
            [c] => Some((self.low, *c)),
            _ => None,
        }
    }

    /// Nonzero terms in descending power order.
    pub fn terms(&self) -> Vec<PolynomialTerm> {
        self.coefficients
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, &c)| c != 0.0)
            .map(|(k, &c)| PolynomialTerm::new(self.low + k as i32, c))
            .collect()
    }

    pub fn is_finite(&self) -> bool {
        self.coefficients.iter().all(|c| c.is_finite())
    }

    pub fn scale(&self, factor: f64) -> Self {
        Self::normalized(
            self.low,
            self.coefficients.iter().map(|c| c * factor).collect(),
        )
    }

    /// Same coefficients starting at `low`, failing if the terms would
    /// leave `±MAX_POWER`.
    fn rebased(low: i64, coefficients: Vec<f64>) -> SynthesisResult<Self> {
        let high = low + coefficients.len() as i64 - 1;
        if low < -MAX_POWER || high > MAX_POWER {
            return Err(SynthesisError::evaluation(format!(
                "terms from power {} to {} exceed degree {}",
                low, high, MAX_POWER
            )));
        }
        Ok(Self::normalized(low as i32, coefficients))
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        self.coefficients
            .iter()
            .enumerate()
            .map(|(k, c)| c * x.powi(self.low + k as i32))
            .sum()
    }

    /// Divide by a constant or a single term.
    pub fn checked_div(&self, divisor: &Polynomial) -> SynthesisResult<Polynomial> {
        match divisor.as_monomial() {
            _ if divisor.is_zero() => Err(SynthesisError::evaluation("division by zero")),
            Some(_) if self.is_zero() => Ok(Polynomial::zero()),
            Some((power, coefficient)) => Self::rebased(
                self.low as i64 - power as i64,
                self.coefficients.iter().map(|c| c / coefficient).collect(),
            ),
            None => Err(SynthesisError::evaluation(
                "division by an expression with more than one term",
            )),
        }
    }

    /// Product of two polynomials.
    ///
    /// Fails with [`SynthesisError::Evaluation`] when a power of the result
    /// would exceed one million in magnitude.
    pub fn checked_mul(&self, rhs: &Polynomial) -> SynthesisResult<Polynomial> {
        if self.is_zero() || rhs.is_zero() {
            return Ok(Polynomial::zero());
        }
        Self::rebased(
            self.low as i64 + rhs.low as i64,
            convolve(&self.coefficients, &rhs.coefficients),
        )
    }

    /// `self * self * ... ` (`n` factors), with `p^0 = 1`.
    pub fn powi(&self, n: u32) -> SynthesisResult<Polynomial> {
        let mut out = Polynomial::constant(1.0);
        for _ in 0..n {
            out = out.checked_mul(self)?;
        }
        Ok(out)
    }

    /// Raise to a real power.
    ///
    /// Constants take any exponent with a real result. Anything else needs
    /// an integer exponent no larger than [`MAX_EXPONENT`] in magnitude, and
    /// a negative exponent only for single-term polynomials.
    pub fn pow(&self, exponent: f64) -> SynthesisResult<Polynomial> {
        if let Some(base) = self.as_constant() {
            let value = base.powf(exponent);
            if value.is_finite() {
                return Ok(Polynomial::constant(value));
            }
            if base == 0.0 && exponent < 0.0 {
                return Err(SynthesisError::evaluation("division by zero"));
            }
            return Err(SynthesisError::evaluation(format!(
                "{}^{} has no finite real value",
                base, exponent
            )));
        }

        let n = exponent.round();
        if (exponent - n).abs() > 1e-9 {
            return Err(SynthesisError::evaluation(format!(
                "non-integer power {} of a variable expression",
                exponent
            )));
        }
        if n.abs() > MAX_EXPONENT {
            return Err(SynthesisError::evaluation(format!(
                "power {} exceeds the limit of {}",
                n, MAX_EXPONENT
            )));
        }

        let n = n as i32;
        let high = self.low as i64 + self.coefficients.len() as i64 - 1;
        let reach = (self.low as i64).abs().max(high.abs()) * (n as i64).abs();
        if reach > MAX_POWER {
            return Err(SynthesisError::evaluation(format!(
                "power {} would produce terms beyond degree {}",
                n, MAX_POWER
            )));
        }
        if n >= 0 {
            return self.powi(n as u32);
        }
        match self.as_monomial() {
            Some((power, coefficient)) => {
                Self::rebased(power as i64 * n as i64, vec![coefficient.powi(n)])
            }
            None => Err(SynthesisError::evaluation(
                "negative power of an expression with more than one term",
            )),
        }
    }

    /// Canonical text in `variable`: descending powers, `coef*var^power`
    /// terms, unit coefficients elided, and `0` for the zero polynomial.
    pub fn to_expression(&self, variable: char) -> String {
        let mut out = String::new();
        for term in self.terms() {
            let magnitude = term.coefficient.abs();
            if term.coefficient < 0.0 {
                out.push('-');
            } else if !out.is_empty() {
                out.push('+');
            }
            if magnitude != 1.0 || term.power == 0 {
                let _ = write!(out, "{}", magnitude);
                if term.power != 0 {
                    out.push('*');
                }
            }
            match term.power {
                0 => {}
                1 => out.push(variable),
                p => {
                    let _ = write!(out, "{}^{}", variable, p);
                }
            }
        }
        if out.is_empty() {
            out.push('0');
        }
        out
    }
}

// ── Arithmetic ──────────────────────────────────────────────────────

impl Add for &Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: &Polynomial) -> Polynomial {
        let (Some(a_high), Some(b_high)) = (self.degree(), rhs.degree()) else {
            return if self.is_zero() { rhs.clone() } else { self.clone() };
        };
        let low = self.low.min(rhs.low);
        let high = a_high.max(b_high);
        let mut out = vec![0.0; (high as i64 - low as i64 + 1) as usize];
        for p in [self, rhs] {
            let offset = (p.low as i64 - low as i64) as usize;
            for (k, c) in p.coefficients.iter().enumerate() {
                out[offset + k] += c;
            }
        }
        Polynomial::normalized(low, out)
    }
}

impl Sub for &Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: &Polynomial) -> Polynomial {
        self + &(-rhs)
    }
}

impl Neg for &Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        Polynomial {
            low: self.low,
            coefficients: self.coefficients.iter().map(|c| -c).collect(),
        }
    }
}
