use core::fmt::Write as _;

use crate::expression::format_number;

use super::butterworth::butterworth_denominator;
use super::TransferFunctionText;

/// Denominator text of a cascade of identical damped sections.
///
/// Each pair of poles contributes `s^2+2ζω*s+ω^2`. The quadratic is
/// parenthesized once the order exceeds two and raised to `order/2` once
/// it exceeds three. Odd orders append a real pole `(s+ω)`.
///
/// ```
/// use tfsynth::design::standard_denominator;
///
/// assert_eq!(standard_denominator(3, 2.0, 0.5, 15), "(s^2+2*s+4)*(s+2)");
/// assert_eq!(standard_denominator(4, 2.0, 0.5, 15), "(s^2+2*s+4)^2");
/// assert_eq!(standard_denominator(1, 2.0, 0.5, 15), "s+2");
/// ```
pub fn standard_denominator(
    order: usize,
    cutoff_rad: f64,
    damping: f64,
    precision: usize,
) -> String {
    let pairs = order / 2;
    let mut text = String::new();

    if pairs > 0 {
        let quadratic = format!(
            "s^2+{}*s+{}",
            format_number(2.0 * damping * cutoff_rad, precision),
            format_number(cutoff_rad * cutoff_rad, precision)
        );
        if order > 2 {
            text = format!("({})", quadratic);
        } else {
            text = quadratic;
        }
        if pairs > 1 {
            let _ = write!(text, "^{}", pairs);
        }
    }

    if order % 2 == 1 {
        let real = format!("s+{}", format_number(cutoff_rad, precision));
        if text.is_empty() {
            text = real;
        } else {
            let _ = write!(text, "*({})", real);
        }
    }

    if text.is_empty() {
        text.push('1');
    }
    text
}

/// Render highest-first `s` coefficients as expression text.
///
/// ```
/// use tfsynth::design::polynomial_expression;
///
/// assert_eq!(polynomial_expression(&[1.0, 0.0, -2.5, 4.0], 15), "s^3-2.5*s+4");
/// ```
pub fn polynomial_expression(coefficients: &[f64], precision: usize) -> String {
    let top = coefficients.len().saturating_sub(1);
    let mut out = String::new();

    for (i, &c) in coefficients.iter().enumerate() {
        if c == 0.0 {
            continue;
        }
        let power = top - i;
        let magnitude = format_number(c.abs(), precision);

        if c < 0.0 {
            out.push('-');
        } else if !out.is_empty() {
            out.push('+');
        }
        if magnitude != "1" || power == 0 {
            out.push_str(&magnitude);
            if power > 0 {
                out.push('*');
            }
        }
        match power {
            0 => {}
            1 => out.push('s'),
            p => {
                let _ = write!(out, "s^{}", p);
            }
        }
    }

    if out.is_empty() {
        out.push('0');
    }
    out
}

/// Pole polynomial for a low- or high-pass section.
pub(super) fn denominator_text(
    order: usize,
    cutoff_rad: f64,
    damping: f64,
    butterworth: bool,
    precision: usize,
) -> String {
    if butterworth {
        polynomial_expression(&butterworth_denominator(order, cutoff_rad), precision)
    } else {
        standard_denominator(order, cutoff_rad, damping, precision)
    }
}

/// `ω^n / D(s)`: unit gain at DC.
pub(super) fn lowpass_text(
    order: usize,
    cutoff_rad: f64,
    damping: f64,
    butterworth: bool,
    precision: usize,
) -> TransferFunctionText {
    TransferFunctionText {
        numerator: format_number(cutoff_rad.powi(order as i32), precision),
        denominator: denominator_text(order, cutoff_rad, damping, butterworth, precision),
    }
}

/// `s^n / D(s)`: unit gain at high frequency.
pub(super) fn highpass_text(
    order: usize,
    cutoff_rad: f64,
    damping: f64,
    butterworth: bool,
    precision: usize,
) -> TransferFunctionText {
    let numerator = match order {
        1 => "s".to_string(),
        n => format!("s^{}", n),
    };
    TransferFunctionText {
        numerator,
        denominator: denominator_text(order, cutoff_rad, damping, butterworth, precision),
    }
}
