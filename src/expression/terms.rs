use std::collections::{BTreeMap, BTreeSet};

use tracing::trace;

use crate::error::{SynthesisError, SynthesisResult};

use super::polynomial::PolynomialTerm;
use super::{solve, ExpressionTree};

/// Split text at the binary `+` and `-` operators outside parentheses.
///
/// A term split off at a `-` keeps the sign. A sign that follows another
/// operator or an opening parenthesis is unary and does not split.
/// Whitespace is dropped.
///
/// ```
/// use tfsynth::expression::split_additive_terms;
///
/// assert_eq!(
///     split_additive_terms("s^2-(s+1)*2+-3"),
///     vec!["s^2", "-(s+1)*2", "-3"],
/// );
/// ```
pub fn split_additive_terms(text: &str) -> Vec<String> {
    let mut terms = Vec::new();
    let mut current = String::new();
    let mut depth = 0i32;
    let mut previous: Option<char> = None;

    for ch in text.chars().filter(|c| !c.is_whitespace()) {
        match ch {
            '(' => depth += 1,
            ')' => depth -= 1,
            '+' | '-'
                if depth == 0
                    && previous.is_some_and(|p| !matches!(p, '+' | '-' | '*' | '/' | '^' | '(')) =>
            {
                if !current.is_empty() {
                    terms.push(std::mem::take(&mut current));
                }
                if ch == '-' {
                    current.push('-');
                }
                previous = Some(ch);
                continue;
            }
            _ => {}
        }
        current.push(ch);
        previous = Some(ch);
    }

    if !current.is_empty() {
        terms.push(current);
    }
    terms
}

/// Read each term as `coefficient * variable ^ power`.
///
/// Every term must reduce to a single monomial, and all terms must share
/// one variable. Constant terms have power zero and zero-valued terms are
/// dropped. Like powers are summed and the result is sorted by descending
/// power.
pub fn extract_power_coefficient_pairs<S: AsRef<str>>(
    terms: &[S],
) -> SynthesisResult<Vec<PolynomialTerm>> {
    extract_with_variable(terms).map(|(pairs, _)| pairs)
}

pub(super) fn extract_with_variable<S: AsRef<str>>(
    terms: &[S],
) -> SynthesisResult<(Vec<PolynomialTerm>, Option<char>)> {
    let mut variable: Option<char> = None;
    let mut pairs = Vec::with_capacity(terms.len());

    for term in terms {
        let text = term.as_ref();
        let tree = ExpressionTree::parse(text)?;
        if let Some(name) = tree.variable() {
            match variable {
                Some(existing) if existing != name => {
                    return Err(SynthesisError::parse(
                        0,
                        format!("terms mix variables '{}' and '{}'", existing, name),
                    ));
                }
                _ => variable = Some(name),
            }
        }

        let poly = tree.expand()?;
        if poly.is_zero() {
            continue;
        }
        let (power, coefficient) = poly.as_monomial().ok_or_else(|| {
            SynthesisError::parse(
                0,
                format!("term '{}' is not of the form coefficient*variable^power", text),
            )
        })?;
        pairs.push(PolynomialTerm::new(power, coefficient));
    }

    Ok((collect_like_terms(pairs), variable))
}

/// Sum the coefficients of equal powers and sort by descending power.
pub fn collect_like_terms(terms: Vec<PolynomialTerm>) -> Vec<PolynomialTerm> {
    let mut collected: BTreeMap<i32, f64> = BTreeMap::new();
    for term in terms {
        *collected.entry(term.power).or_insert(0.0) += term.coefficient;
    }
    collected
        .into_iter()
        .rev()
        .map(|(power, coefficient)| PolynomialTerm::new(power, coefficient))
        .collect()
}

/// Fill every power in `low..=high` that has no term with a zero term.
///
/// The result runs from `high` down to `low`. A term whose power falls
/// outside the window is a [`SynthesisError::NumericDegeneracy`].
pub fn pad_missing_terms(
    terms: &[PolynomialTerm],
    low: i32,
    high: i32,
) -> SynthesisResult<Vec<PolynomialTerm>> {
    if low > high {
        return Err(SynthesisError::configuration(format!(
            "empty power window {}..={}",
            low, high
        )));
    }

    let mut dense = vec![0.0; (high - low + 1) as usize];
    let mut present = BTreeSet::new();
    for term in terms {
        if term.power < low || term.power > high {
            return Err(SynthesisError::NumericDegeneracy {
                power: term.power,
                low,
                high,
            });
        }
        dense[(term.power - low) as usize] += term.coefficient;
        present.insert(term.power);
    }

    let filled = dense.len() - present.len();
    if filled > 0 {
        trace!(low, high, filled, "zero-filled missing powers");
    }

    Ok((low..=high)
        .rev()
        .map(|power| PolynomialTerm::new(power, dense[(power - low) as usize]))
        .collect())
}

/// Coefficients of a polynomial expression, highest power first and down
/// to the constant term, together with its variable.
///
/// The text is canonicalized with [`solve`] first, so any expression that
/// reduces to an ordinary polynomial is accepted. Negative powers are a
/// [`SynthesisError::NumericDegeneracy`].
///
/// ```
/// use tfsynth::expression::coefficients_from_expression;
///
/// let (coeffs, var) = coefficients_from_expression("(s+1)*(s+2)").unwrap();
/// assert_eq!(coeffs, vec![1.0, 3.0, 2.0]);
/// assert_eq!(var, Some('s'));
///
/// let (coeffs, _) = coefficients_from_expression("s^3+1").unwrap();
/// assert_eq!(coeffs, vec![1.0, 0.0, 0.0, 1.0]);
/// ```
pub fn coefficients_from_expression(text: &str) -> SynthesisResult<(Vec<f64>, Option<char>)> {
    let canonical = solve(text)?;
    let terms = split_additive_terms(&canonical);
    let (pairs, variable) = extract_with_variable(&terms)?;
    let high = pairs.first().map_or(0, |t| t.power.max(0));
    let padded = pad_missing_terms(&pairs, 0, high)?;
    Ok((padded.iter().map(|t| t.coefficient).collect(), variable))
}
