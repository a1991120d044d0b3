use tracing::{debug, trace};

use crate::complex::NEARLY_ZERO;
use crate::error::{SynthesisError, SynthesisResult};
use crate::expression::{pad_missing_terms, Expr, Polynomial};

/// Discretize a continuous-time transfer function with the bilinear transform.
///
/// `numerator` and `denominator` are `s`-domain coefficients, highest power
/// first. Substituting `s = 2·fs·(1 − z⁻¹)/(1 + z⁻¹)` and clearing the
/// `(1 + z⁻¹)^order` denominator gives the returned `(a, b)`, where `a[k]`
/// and `b[k]` multiply `z^-k` and both have `order + 1` entries.
///
/// The cutoff is not pre-warped.
///
/// # Errors
///
/// [`SynthesisError::Configuration`] if the sample rate is not a positive
/// finite number, the denominator is empty, or the discrete `b[0]` vanishes
/// relative to the largest denominator coefficient.
///
/// # Example
///
/// ```
/// use tfsynth::synthesis::bilinear_transform;
///
/// // H(s) = 1 / (s + 1) at 10 Hz
/// let (a, b) = bilinear_transform(&[1.0], &[1.0, 1.0], 10.0).unwrap();
/// assert_eq!(a, vec![1.0, 1.0]);
/// assert_eq!(b, vec![21.0, -19.0]);
/// ```
pub fn bilinear_transform(
    numerator: &[f64],
    denominator: &[f64],
    sample_rate: f64,
) -> SynthesisResult<(Vec<f64>, Vec<f64>)> {
    if !(sample_rate.is_finite() && sample_rate > 0.0) {
        return Err(SynthesisError::configuration(format!(
            "sample rate must be positive and finite, got {}",
            sample_rate
        )));
    }
    if denominator.is_empty() {
        return Err(SynthesisError::configuration("empty denominator"));
    }

    let order = numerator.len().max(denominator.len()) - 1;
    let a = discretize(numerator, order, sample_rate)?;
    let b = discretize(denominator, order, sample_rate)?;

    let largest = b.iter().fold(0.0_f64, |m, c| m.max(c.abs()));
    if largest == 0.0 || b[0].abs() <= NEARLY_ZERO * largest {
        return Err(SynthesisError::configuration(
            "leading discrete denominator coefficient is zero",
        ));
    }

    debug!(order, sample_rate, "bilinear transform");
    Ok((a, b))
}

/// The substituted `z` expression for one `s` polynomial, before expansion.
///
/// Each nonzero coefficient `c` at power `p` becomes
/// `c*(2·fs*(1-z^-1))^p*(1+z^-1)^(order-p)`. Returns `None` when every
/// coefficient is zero.
pub fn substitution_tree(coefficients: &[f64], order: usize, sample_rate: f64) -> Option<Expr> {
    let delay = || Expr::variable('z').pow(-Expr::number(1.0));
    let top = coefficients.len().checked_sub(1)?;

    coefficients
        .iter()
        .enumerate()
        .filter(|(_, &c)| c != 0.0)
        .map(|(i, &c)| {
            let power = top - i;
            let difference = Expr::number(2.0 * sample_rate) * (Expr::number(1.0) - delay());
            let sum = Expr::number(1.0) + delay();
            Expr::number(c)
                * difference.pow(Expr::number(power as f64))
                * sum.pow(Expr::number((order - power) as f64))
        })
        .reduce(|acc, term| acc + term)
}

fn discretize(coefficients: &[f64], order: usize, sample_rate: f64) -> SynthesisResult<Vec<f64>> {
    let poly = match substitution_tree(coefficients, order, sample_rate) {
        Some(tree) => {
            trace!(tree = %tree, "bilinear substitution");
            tree.expand()?
        }
        None => Polynomial::zero(),
    };
    let padded = pad_missing_terms(&poly.terms(), -(order as i32), 0)?;
    Ok(padded.iter().map(|t| t.coefficient).collect())
}
