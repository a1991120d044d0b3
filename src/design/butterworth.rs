use core::f64::consts::{E, PI};

use tracing::trace;

use crate::complex::Complex;
use crate::expression::convolve;

/// Poles of an analog Butterworth filter.
///
/// The `order` poles lie evenly spaced on the left half of the circle of
/// radius `cutoff_rad`:
///
/// ```text
/// p_k = cutoff · e^{jθ_k},   θ_k = π·(2k + order − 1) / (2·order),   k = 1..=order
/// ```
///
/// # Example
///
/// ```
/// use tfsynth::design::butterworth_poles;
///
/// let poles = butterworth_poles(2, 1.0);
/// let h = std::f64::consts::FRAC_1_SQRT_2;
/// assert!((poles[0].re + h).abs() < 1e-12 && (poles[0].im - h).abs() < 1e-12);
/// assert!((poles[1].re + h).abs() < 1e-12 && (poles[1].im + h).abs() < 1e-12);
/// ```
pub fn butterworth_poles(order: usize, cutoff_rad: f64) -> Vec<Complex> {
    let n = order as f64;
    let e = Complex::new(E, 0.0);
    (1..=order)
        .map(|k| {
            let theta = PI * (2.0 * k as f64 + n - 1.0) / (2.0 * n);
            e.powc(Complex::new(0.0, theta)) * cutoff_rad
        })
        .collect()
}

/// Coefficients of `Π (s − p_k)` over the Butterworth poles, highest first.
///
/// The poles come in conjugate pairs (plus `−cutoff` for odd orders), so
/// the product is real up to rounding; the imaginary residue is discarded.
pub fn butterworth_denominator(order: usize, cutoff_rad: f64) -> Vec<f64> {
    let coeffs = butterworth_poles(order, cutoff_rad)
        .into_iter()
        .fold(vec![Complex::ONE], |acc, pole| {
            convolve(&acc, &[Complex::ONE, -pole])
        });

    let residue = coeffs.iter().fold(0.0_f64, |m, c| m.max(c.im.abs()));
    trace!(order, cutoff_rad, residue, "butterworth denominator");

    coeffs.into_iter().map(|c| c.re).collect()
}
