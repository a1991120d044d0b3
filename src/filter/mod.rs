//! Recursive digital filter in direct form I.
//!
//! ```text
//! y[n] = (a0·u[n] + a1·u[n-1] + … − b1·y[n-1] − b2·y[n-2] − …) / b0
//! ```
//!
//! # Example
//!
//! ```
//! use tfsynth::DigitalFilter;
//!
//! // Two-point moving average
//! let mut avg = DigitalFilter::from_coefficients(100.0, vec![0.5, 0.5], vec![1.0]).unwrap();
//! assert_eq!(avg.apply(2.0), 1.0);
//! assert_eq!(avg.apply(4.0), 3.0);
//! ```

#[cfg(test)]
mod tests;

use core::f64::consts::PI;

use tracing::debug;

use crate::complex::Complex;
use crate::error::{SynthesisError, SynthesisResult};
use crate::synthesis::{bilinear_transform, TransferFunction};

/// A discrete-time IIR/FIR filter with its own sample history.
///
/// `a` multiplies the input history and `b` the output history, both
/// indexed by delay (`a[k]` goes with `z^-k`). `b[0]` is nonzero.
#[derive(Debug, Clone, PartialEq)]
pub struct DigitalFilter {
    sample_rate: f64,
    a: Vec<f64>,
    b: Vec<f64>,
    u: Vec<f64>,
    y: Vec<f64>,
}

impl DigitalFilter {
    /// Create a filter from `z⁻¹` coefficients.
    ///
    /// Histories start at zero. Fails with
    /// [`SynthesisError::Configuration`] unless the sample rate is positive
    /// and finite, both coefficient lists are non-empty and finite, and
    /// `b[0] != 0`.
    pub fn from_coefficients(sample_rate: f64, a: Vec<f64>, b: Vec<f64>) -> SynthesisResult<Self> {
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(SynthesisError::configuration(format!(
                "sample rate must be positive and finite, got {}",
                sample_rate
            )));
        }
        if a.is_empty() || b.is_empty() {
            return Err(SynthesisError::configuration(
                "filter needs at least one numerator and one denominator coefficient",
            ));
        }
        if !a.iter().chain(&b).all(|c| c.is_finite()) {
            return Err(SynthesisError::configuration("filter coefficients must be finite"));
        }
        if b[0] == 0.0 {
            return Err(SynthesisError::configuration(
                "leading denominator coefficient b[0] must be nonzero",
            ));
        }

        Ok(Self {
            sample_rate,
            u: vec![0.0; a.len()],
            y: vec![0.0; b.len()],
            a,
            b,
        })
    }

    /// Discretize `tf` with the bilinear transform at `sample_rate` Hz.
    pub fn from_transfer_function(
        sample_rate: f64,
        tf: &TransferFunction,
    ) -> SynthesisResult<Self> {
        let (a, b) = bilinear_transform(tf.numerator(), tf.denominator(), sample_rate)?;
        debug!(order = tf.order(), sample_rate, "synthesized digital filter");
        Self::from_coefficients(sample_rate, a, b)
    }

    /// Start with every history slot at `value` instead of zero.
    pub fn with_initial_value(mut self, value: f64) -> Self {
        self.initialize(value);
        self
    }

    /// Fill the input and output histories with `value`.
    pub fn initialize(&mut self, value: f64) {
        self.u.fill(value);
        self.y.fill(value);
    }

    /// Reset the histories to zero.
    pub fn reset(&mut self) {
        self.initialize(0.0);
    }

    /// Filter one sample and return the new output.
    #[inline]
    pub fn apply(&mut self, sample: f64) -> f64 {
        self.u.rotate_right(1);
        self.u[0] = sample;
        self.y.rotate_right(1);

        let forward: f64 = self.a.iter().zip(&self.u).map(|(a, u)| a * u).sum();
        let feedback: f64 = self
            .b
            .iter()
            .zip(&self.y)
            .skip(1)
            .map(|(b, y)| b * y)
            .sum();

        self.y[0] = (forward - feedback) / self.b[0];
        self.y[0]
    }

    /// Filter a slice of samples into an output slice.
    ///
    /// # Panics
    ///
    /// Panics if `output.len() < input.len()`.
    pub fn process(&mut self, input: &[f64], output: &mut [f64]) {
        assert!(output.len() >= input.len());
        for (x, y) in input.iter().zip(output.iter_mut()) {
            *y = self.apply(*x);
        }
    }

    /// Filter a slice of samples in place.
    pub fn process_inplace(&mut self, data: &mut [f64]) {
        for x in data.iter_mut() {
            *x = self.apply(*x);
        }
    }

    /// Zero-phase filtering: forward, then backward over the reversed result.
    ///
    /// The histories are initialized to the first sample before the forward
    /// pass and to the last filtered sample before the backward pass, which
    /// suppresses the start-up transient for signals with a DC offset.
    /// The magnitude response is applied twice.
    pub fn process_phaseless(&mut self, data: &mut [f64]) {
        let Some(&first) = data.first() else {
            return;
        };
        self.initialize(first);
        self.process_inplace(data);

        data.reverse();
        self.initialize(data[0]);
        self.process_inplace(data);
        data.reverse();
    }

    /// Latest input sample.
    pub fn raw_value(&self) -> f64 {
        self.u[0]
    }

    /// Latest output sample.
    pub fn filtered_value(&self) -> f64 {
        self.y[0]
    }

    pub fn numerator(&self) -> &[f64] {
        &self.a
    }

    pub fn denominator(&self) -> &[f64] {
        &self.b
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Number of delays in the longer coefficient list.
    pub fn order(&self) -> usize {
        self.a.len().max(self.b.len()) - 1
    }

    /// Gain at DC, `H(z = 1) = Σa / Σb`.
    pub fn steady_state_gain(&self) -> f64 {
        self.a.iter().sum::<f64>() / self.b.iter().sum::<f64>()
    }

    /// `H(e^{jωT})` at `freq_hz`.
    ///
    /// Fails with [`SynthesisError::DivideByZero`] at a pole on the unit
    /// circle.
    pub fn frequency_response(&self, freq_hz: f64) -> SynthesisResult<Complex> {
        let delay = Complex::from_polar(1.0, -2.0 * PI * freq_hz / self.sample_rate);
        let sum = |coeffs: &[f64]| {
            coeffs
                .iter()
                .rev()
                .fold(Complex::ZERO, |acc, &c| acc * delay + c)
        };
        sum(&self.a).checked_div(sum(&self.b))
    }
}
