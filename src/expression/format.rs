/// Format `value` with `significant_digits` significant digits in plain
/// decimal notation, trailing zeros removed.
///
/// ```
/// use tfsynth::expression::format_number;
///
/// assert_eq!(format_number(62.831853071795862, 6), "62.8319");
/// assert_eq!(format_number(4.0, 15), "4");
/// assert_eq!(format_number(-0.000123456, 3), "-0.000123");
/// ```
pub fn format_number(value: f64, significant_digits: usize) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    let magnitude = value.abs().log10().floor() as i64;
    let decimals = (significant_digits as i64 - magnitude - 1).max(0) as usize;
    let mut text = format!("{:.*}", decimals, value);
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    if text == "-0" {
        text = "0".to_string();
    }
    text
}
