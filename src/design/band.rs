use crate::expression::format_number;

use super::standard::{highpass_text, lowpass_text, standard_denominator};
use super::{FilterParameters, FilterType, TransferFunctionText};

/// Whether a band filter is built from separate low- and high-pass halves.
///
/// A band-stop is wide when `cutoff ≤ 1.5·width`, a band-pass when
/// `cutoff ≤ (5/6)·width`. Other filter types are never wide.
///
/// ```
/// use tfsynth::design::{is_wide_band, FilterType};
///
/// assert!(is_wide_band(FilterType::BandStop, 10.0, 7.0));
/// assert!(!is_wide_band(FilterType::BandPass, 10.0, 7.0));
/// ```
pub fn is_wide_band(filter_type: FilterType, cutoff_hz: f64, width_hz: f64) -> bool {
    match filter_type {
        FilterType::BandStop => cutoff_hz <= 1.5 * width_hz,
        FilterType::BandPass => cutoff_hz <= width_hz * 5.0 / 6.0,
        _ => false,
    }
}

/// Lower and upper edges of a wide band, geometrically centred on `center`.
///
/// `high = center + width/2` and `low = center²/high`, so
/// `low·high = center²`.
pub fn band_edges(center: f64, width: f64) -> (f64, f64) {
    let high = center + 0.5 * width;
    (center * center / high, high)
}

/// High-pass at the lower edge cascaded with low-pass at the upper edge.
pub(super) fn wide_band_pass(params: &FilterParameters) -> TransferFunctionText {
    let (low, high) = band_edges(params.cutoff_rad(), params.width_rad());
    let n = params.order;
    let (damping, butterworth, precision) =
        (params.damping_ratio, params.butterworth, params.precision);
    let lp = lowpass_text(n / 2, high, damping, butterworth, precision);
    let hp = highpass_text(n - n / 2, low, damping, butterworth, precision);

    TransferFunctionText {
        numerator: format!("({})*({})", hp.numerator, lp.numerator),
        denominator: format!("({})*({})", hp.denominator, lp.denominator),
    }
}

/// Low-pass at the lower edge in parallel with high-pass at the upper edge.
///
/// The halves are summed, `HPn·LPd + LPn·HPd` over `HPd·LPd`, not cascaded:
/// a low-pass below the band times a high-pass above it has no passband.
pub(super) fn wide_band_stop(params: &FilterParameters) -> TransferFunctionText {
    let (low, high) = band_edges(params.cutoff_rad(), params.width_rad());
    let n = params.order;
    let (damping, butterworth, precision) =
        (params.damping_ratio, params.butterworth, params.precision);
    let lp = lowpass_text(n / 2, low, damping, butterworth, precision);
    let hp = highpass_text(n - n / 2, high, damping, butterworth, precision);

    TransferFunctionText {
        numerator: format!(
            "({})*({})+({})*({})",
            hp.numerator, lp.denominator, lp.numerator, hp.denominator
        ),
        denominator: format!("({})*({})", hp.denominator, lp.denominator),
    }
}

/// Second-order resonator denominator `s^2 + w·s + ω^2`.
fn resonator(params: &FilterParameters) -> String {
    let cutoff = params.cutoff_rad();
    let damping = params.width_rad() / (2.0 * cutoff);
    standard_denominator(2, cutoff, damping, params.precision)
}

/// `w·s / (s^2 + w·s + ω^2)`: unit gain at the centre frequency.
pub(super) fn narrow_band_pass(params: &FilterParameters) -> TransferFunctionText {
    TransferFunctionText {
        numerator: format!("{}*s", format_number(params.width_rad(), params.precision)),
        denominator: resonator(params),
    }
}

/// `(s^2 + ω^2) / (s^2 + w·s + ω^2)`: zero gain at the centre frequency.
pub(super) fn narrow_band_stop(params: &FilterParameters) -> TransferFunctionText {
    let cutoff = params.cutoff_rad();
    TransferFunctionText {
        numerator: format!("s^2+{}", format_number(cutoff * cutoff, params.precision)),
        denominator: resonator(params),
    }
}
