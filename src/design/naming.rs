use crate::expression::format_number;

use super::{FilterParameters, FilterType};

/// Significant digits of the numbers shown in filter names.
const NAME_DIGITS: usize = 2;

/// `"1st Order"`, `"2nd Order"`, `"11th Order"`, ...
pub(super) fn order_string(order: usize) -> String {
    let suffix = match (order % 10, order % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{} Order", order, suffix)
}

pub(super) fn display_name(params: &FilterParameters) -> String {
    let mut name = match params.filter_type {
        FilterType::Custom => format!("{} / {}", params.numerator, params.denominator),
        kind => {
            let mut name = format!(
                "{} {}, {} Hz",
                order_string(params.order),
                kind.label(),
                format_number(params.cutoff_hz, NAME_DIGITS)
            );
            if kind.uses_width() {
                name.push_str(&format!(" x {} Hz", format_number(params.width_hz, NAME_DIGITS)));
            } else if params.order > 1 {
                if params.butterworth {
                    name.push_str(", Butterworth");
                } else {
                    name.push_str(&format!(
                        ", zeta = {}",
                        format_number(params.damping_ratio, NAME_DIGITS)
                    ));
                }
            }
            name
        }
    };

    if params.phaseless {
        name.push_str(", Phaseless");
    }
    name
}
