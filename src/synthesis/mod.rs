//! Continuous-time transfer functions and their bilinear discretization.
//!
//! A [`TransferFunction`] holds `H(s) = N(s)/D(s)` as highest-power-first
//! coefficient vectors. [`bilinear_transform`] maps it to the `z⁻¹`
//! coefficients a [`DigitalFilter`](crate::DigitalFilter) runs.
//!
//! # Example
//!
//! ```
//! use tfsynth::synthesis::TransferFunction;
//!
//! let tf = TransferFunction::from_expressions("4", "s^2+2*s+4").unwrap();
//! assert_eq!(tf.order(), 2);
//! assert_eq!(tf.steady_state_gain(), 1.0);
//!
//! let mut filter = tf.to_digital(100.0).unwrap();
//! let y = filter.apply(1.0);
//! assert!(y > 0.0 && y < 1.0);
//! ```

mod bilinear;


pub use bilinear::{bilinear_transform, substitution_tree};

use core::fmt;

use tracing::debug;

use crate::complex::Complex;
use crate::error::{SynthesisError, SynthesisResult};
use crate::expression::{coefficients_from_expression, Polynomial, PolynomialTerm};
use crate::filter::DigitalFilter;

/// Rational function `N(s)/D(s)` in the Laplace variable.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferFunction {
    numerator: Vec<f64>,
    denominator: Vec<f64>,
}

impl TransferFunction {
    /// Build from highest-power-first coefficients.
    ///
    /// Both vectors must be non-empty and finite, and the leading
    /// denominator coefficient nonzero. Leading zeros of the numerator are
    /// dropped (at least one coefficient is kept).
    pub fn new(mut numerator: Vec<f64>, denominator: Vec<f64>) -> SynthesisResult<Self> {
        if numerator.is_empty() || denominator.is_empty() {
            return Err(SynthesisError::configuration(
                "numerator and denominator need at least one coefficient",
            ));
        }
        if !numerator.iter().chain(&denominator).all(|c| c.is_finite()) {
            return Err(SynthesisError::configuration(
                "transfer function coefficients must be finite",
            ));
        }
        if denominator[0] == 0.0 {
            return Err(SynthesisError::configuration(
                "leading denominator coefficient must be nonzero",
            ));
        }

        let leading = numerator
            .iter()
            .position(|&c| c != 0.0)
            .unwrap_or(numerator.len() - 1);
        numerator.drain(..leading);

        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Parse numerator and denominator text written in `s`.
    ///
    /// Any expression that expands to an ordinary polynomial is accepted,
    /// e.g. `"(s+1)^2*(s+3)"`. A variable other than `s` is a
    /// [`SynthesisError::Parse`].
    pub fn from_expressions(numerator: &str, denominator: &str) -> SynthesisResult<Self> {
        let (num, num_var) = coefficients_from_expression(numerator)?;
        let (den, den_var) = coefficients_from_expression(denominator)?;
        if let Some(var) = [num_var, den_var].into_iter().flatten().find(|&v| v != 's') {
            return Err(SynthesisError::parse(
                0,
                format!("transfer functions are written in 's', found '{}'", var),
            ));
        }
        debug!(numerator, denominator, "parsed transfer function");
        Self::new(num, den)
    }

    pub fn numerator(&self) -> &[f64] {
        &self.numerator
    }

    pub fn denominator(&self) -> &[f64] {
        &self.denominator
    }

    /// Highest power of `s` in either polynomial.
    pub fn order(&self) -> usize {
        self.numerator.len().max(self.denominator.len()) - 1
    }

    /// `H(0)`: ratio of the constant coefficients.
    ///
    /// Infinite or NaN when the denominator has no constant term.
    pub fn steady_state_gain(&self) -> f64 {
        let num = self.numerator.last().copied().unwrap_or(0.0);
        let den = self.denominator.last().copied().unwrap_or(0.0);
        num / den
    }

    /// Evaluate `H(s)` at a complex frequency.
    ///
    /// Fails with [`SynthesisError::DivideByZero`] at a pole.
    pub fn evaluate(&self, s: Complex) -> SynthesisResult<Complex> {
        let horner = |coeffs: &[f64]| coeffs.iter().fold(Complex::ZERO, |acc, &c| acc * s + c);
        horner(&self.numerator).checked_div(horner(&self.denominator))
    }

    /// Discretize at `sample_rate` Hz.
    pub fn to_digital(&self, sample_rate: f64) -> SynthesisResult<DigitalFilter> {
        DigitalFilter::from_transfer_function(sample_rate, self)
    }

    fn polynomial(coefficients: &[f64]) -> Polynomial {
        let top = coefficients.len() as i32 - 1;
        let terms: Vec<PolynomialTerm> = coefficients
            .iter()
            .enumerate()
            .map(|(i, &c)| PolynomialTerm::new(top - i as i32, c))
            .collect();
        Polynomial::from_terms(&terms)
    }
}

impl fmt::Display for TransferFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}) / ({})",
            Self::polynomial(&self.numerator).to_expression('s'),
            Self::polynomial(&self.denominator).to_expression('s')
        )
    }
}
