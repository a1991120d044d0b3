use super::*;
use crate::complex::Complex;

const TOL: f64 = 1e-12;
const LOOSE_TOL: f64 = 1e-6;

fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
    assert!(
        (a - b).abs() < tol,
        "{}: {} vs {} (diff {})",
        msg,
        a,
        b,
        (a - b).abs()
    );
}

fn assert_coeffs_near(a: &[f64], b: &[f64], tol: f64, msg: &str) {
    assert_eq!(a.len(), b.len(), "{}: length", msg);
    for (i, (x, y)) in a.iter().zip(b).enumerate() {
        assert_near(*x, *y, tol, &format!("{} [{}]", msg, i));
    }
}

/// Hz value whose angular frequency is `rad`.
fn hz(rad: f64) -> f64 {
    rad / (2.0 * PI)
}

fn params(filter_type: FilterType, order: usize, cutoff_hz: f64) -> FilterParameters {
    FilterParameters {
        filter_type,
        order,
        cutoff_hz,
        ..Default::default()
    }
}

// ═══════════════════════════════════════════════════════════════════
// Butterworth
// ═══════════════════════════════════════════════════════════════════

#[test]
fn butterworth_fourth_order_poles() {
    let poles = butterworth_poles(4, 1.0);
    let angles = [5.0, 7.0, 9.0, 11.0].map(|k| k * PI / 8.0);
    assert_eq!(poles.len(), 4);
    for (pole, theta) in poles.iter().zip(angles) {
        assert!(
            pole.approx_eq(Complex::from_polar(1.0, theta), TOL),
            "{:?} at {}",
            pole,
            theta
        );
        assert!(pole.re < 0.0);
    }
}

#[test]
fn butterworth_first_order_pole_is_real() {
    let poles = butterworth_poles(1, 3.0);
    assert_eq!(poles.len(), 1);
    assert!(poles[0].approx_eq(Complex::new(-3.0, 0.0), TOL));
}

#[test]
fn butterworth_denominators() {
    let sqrt2 = 2.0_f64.sqrt();
    assert_coeffs_near(&butterworth_denominator(1, 3.0), &[1.0, 3.0], TOL, "order 1");
    assert_coeffs_near(&butterworth_denominator(2, 1.0), &[1.0, sqrt2, 1.0], TOL, "order 2");
    assert_coeffs_near(
        &butterworth_denominator(2, 2.0),
        &[1.0, 2.0 * sqrt2, 4.0],
        TOL,
        "order 2, cutoff 2",
    );
    assert_coeffs_near(
        &butterworth_denominator(3, 1.0),
        &[1.0, 2.0, 2.0, 1.0],
        TOL,
        "order 3",
    );
}

// ═══════════════════════════════════════════════════════════════════
// Expression text
// ═══════════════════════════════════════════════════════════════════

#[test]
fn standard_denominator_text() {
    assert_eq!(standard_denominator(3, 2.0, 0.5, 15), "(s^2+2*s+4)*(s+2)");
    assert_eq!(standard_denominator(2, 2.0, 0.5, 15), "s^2+2*s+4");
    assert_eq!(standard_denominator(1, 2.0, 0.5, 15), "s+2");
    assert_eq!(standard_denominator(5, 1.0, 0.5, 15), "(s^2+1*s+1)^2*(s+1)");
    assert_eq!(standard_denominator(6, 3.0, 1.0, 15), "(s^2+6*s+9)^3");
}

#[test]
fn polynomial_expression_text() {
    assert_eq!(polynomial_expression(&[1.0], 15), "1");
    assert_eq!(polynomial_expression(&[], 15), "0");
    assert_eq!(polynomial_expression(&[-1.0, 1.0], 15), "-s+1");
    assert_eq!(polynomial_expression(&[2.0, 0.0], 15), "2*s");
    assert_eq!(
        polynomial_expression(&[1.0, 1.41421356237, 1.0], 3),
        "s^2+1.41*s+1"
    );
}

#[test]
fn lowpass_and_highpass_text() {
    let mut p = params(FilterType::LowPass, 1, hz(1.0));
    let text = p.build_expressions().unwrap();
    assert_eq!(text.numerator, "1");
    assert_eq!(text.denominator, "s+1");

    p.filter_type = FilterType::HighPass;
    p.order = 2;
    p.damping_ratio = 0.5;
    let text = p.build_expressions().unwrap();
    assert_eq!(text.numerator, "s^2");
    assert_eq!(text.denominator, "s^2+1*s+1");
}

#[test]
fn narrow_band_and_notch_text() {
    let mut p = FilterParameters {
        filter_type: FilterType::BandPass,
        cutoff_hz: hz(1.0),
        width_hz: hz(0.1),
        ..Default::default()
    };
    assert!(!p.is_wide_band());
    let text = p.build_expressions().unwrap();
    assert_eq!(text.numerator, "0.1*s");
    assert_eq!(text.denominator, "s^2+0.1*s+1");

    p.filter_type = FilterType::Notch;
    let text = p.build_expressions().unwrap();
    assert_eq!(text.numerator, "s^2+1");
    assert_eq!(text.denominator, "s^2+0.1*s+1");

    p.filter_type = FilterType::BandStop;
    assert_eq!(p.build_expressions().unwrap(), text);
}

#[test]
fn wide_band_text_shape() {
    let p = FilterParameters {
        filter_type: FilterType::BandStop,
        order: 4,
        cutoff_hz: 10.0,
        width_hz: 7.0,
        butterworth: true,
        ..Default::default()
    };
    let text = p.build_expressions().unwrap();
    assert!(text.numerator.contains(")+("), "{}", text.numerator);
    assert!(text.denominator.starts_with('(') && text.denominator.contains(")*("));
}

#[test]
fn custom_text_passes_through() {
    let p = FilterParameters {
        filter_type: FilterType::Custom,
        numerator: "(s+1)^2".to_string(),
        denominator: "s^3+2".to_string(),
        ..Default::default()
    };
    let text = p.build_expressions().unwrap();
    assert_eq!(text.numerator, "(s+1)^2");
    assert_eq!(text.denominator, "s^3+2");
}

// ═══════════════════════════════════════════════════════════════════
// Band policy
// ═══════════════════════════════════════════════════════════════════

#[test]
fn wide_band_policy() {
    assert!(is_wide_band(FilterType::BandStop, 10.0, 7.0));
    assert!(!is_wide_band(FilterType::BandPass, 10.0, 7.0));
    assert!(is_wide_band(FilterType::BandPass, 10.0, 12.0));
    assert!(!is_wide_band(FilterType::BandStop, 10.0, 6.0));
    assert!(!is_wide_band(FilterType::Notch, 1.0, 100.0));
    assert!(!is_wide_band(FilterType::LowPass, 1.0, 100.0));
}

#[test]
fn band_edges_are_log_symmetric() {
    let (low, high) = band_edges(10.0, 20.0);
    assert_eq!(high, 20.0);
    assert_eq!(low, 5.0);
    let (low, high) = band_edges(3.0, 1.0);
    assert_near(low * high, 9.0, TOL, "geometric centre");
}

// ═══════════════════════════════════════════════════════════════════
// Validation
// ═══════════════════════════════════════════════════════════════════

fn is_configuration_error(p: &FilterParameters) -> bool {
    matches!(p.validate(), Err(SynthesisError::Configuration(_)))
}

#[test]
fn validate_accepts_defaults() {
    assert!(FilterParameters::default().validate().is_ok());
}

#[test]
fn validate_rejects_bad_fields() {
    assert!(is_configuration_error(&params(FilterType::LowPass, 0, 1.0)));
    assert!(is_configuration_error(&params(FilterType::LowPass, 1, 0.0)));
    assert!(is_configuration_error(&params(FilterType::HighPass, 1, f64::NAN)));

    let mut p = params(FilterType::BandPass, 2, 10.0);
    p.width_hz = -1.0;
    assert!(is_configuration_error(&p));

    let mut p = params(FilterType::LowPass, 2, 10.0);
    p.damping_ratio = 0.0;
    assert!(is_configuration_error(&p));
    p.butterworth = true;
    assert!(p.validate().is_ok());
    p.butterworth = false;
    p.order = 1;
    assert!(p.validate().is_ok());

    let mut p = FilterParameters::default();
    p.precision = 0;
    assert!(is_configuration_error(&p));
    p.precision = 18;
    assert!(is_configuration_error(&p));
}

#[test]
fn validate_width_only_where_used() {
    let mut p = params(FilterType::LowPass, 2, 10.0);
    p.width_hz = 0.0;
    assert!(p.validate().is_ok());
    p.filter_type = FilterType::Notch;
    assert!(is_configuration_error(&p));
}

#[test]
fn validate_wide_band_order() {
    let mut p = params(FilterType::BandStop, 1, 10.0);
    p.width_hz = 7.0;
    assert!(is_configuration_error(&p));
    p.order = 2;
    assert!(p.validate().is_ok());
}

#[test]
fn validate_custom_text() {
    let mut p = FilterParameters {
        filter_type: FilterType::Custom,
        cutoff_hz: 0.0,
        ..Default::default()
    };
    assert!(p.validate().is_ok());
    p.numerator = "  ".to_string();
    assert!(is_configuration_error(&p));
}

// ═══════════════════════════════════════════════════════════════════
// Gains
// ═══════════════════════════════════════════════════════════════════

#[test]
fn lowpass_unit_dc_gain() {
    for &butterworth in &[true, false] {
        for order in 1..=6 {
            let mut p = params(FilterType::LowPass, order, 5.0);
            p.butterworth = butterworth;
            p.damping_ratio = 0.7;
            let tf = p.build_transfer_function().unwrap();
            assert_near(
                tf.steady_state_gain(),
                1.0,
                1e-9,
                &format!("order {} butterworth {}", order, butterworth),
            );
        }
    }
}

#[test]
fn highpass_rejects_dc() {
    let mut p = params(FilterType::HighPass, 3, 5.0);
    p.butterworth = true;
    let tf = p.build_transfer_function().unwrap();
    assert_eq!(tf.steady_state_gain(), 0.0);
    // unit gain far above the cutoff
    let h = tf.evaluate(Complex::new(0.0, 1e6)).unwrap();
    assert_near(h.norm(), 1.0, LOOSE_TOL, "high-frequency gain");
}

#[test]
fn butterworth_half_power_at_cutoff() {
    let mut p = params(FilterType::LowPass, 4, hz(10.0));
    p.butterworth = true;
    let tf = p.build_transfer_function().unwrap();
    let h = tf.evaluate(Complex::new(0.0, 10.0)).unwrap();
    assert_near(h.norm(), 0.5_f64.sqrt(), 1e-9, "|H(jω_c)|");
}

#[test]
fn narrow_band_centre_response() {
    let mut p = FilterParameters {
        filter_type: FilterType::BandPass,
        cutoff_hz: hz(4.0),
        width_hz: hz(0.5),
        ..Default::default()
    };
    let centre = Complex::new(0.0, 4.0);
    let h = p.build_transfer_function().unwrap().evaluate(centre).unwrap();
    assert!(h.approx_eq(Complex::ONE, 1e-9), "band-pass {:?}", h);

    p.filter_type = FilterType::Notch;
    let h = p.build_transfer_function().unwrap().evaluate(centre).unwrap();
    assert!(h.norm() < 1e-9, "notch {:?}", h);
}

#[test]
fn wide_band_gains() {
    let mut p = FilterParameters {
        filter_type: FilterType::BandPass,
        order: 4,
        cutoff_hz: 10.0,
        width_hz: 20.0,
        butterworth: true,
        ..Default::default()
    };
    assert!(p.is_wide_band());
    let tf = p.build_transfer_function().unwrap();
    assert_eq!(tf.order(), 4);
    assert_eq!(tf.steady_state_gain(), 0.0);

    p.filter_type = FilterType::BandStop;
    let tf = p.build_transfer_function().unwrap();
    assert_near(tf.steady_state_gain(), 1.0, 1e-9, "band-stop DC");
    let h = tf.evaluate(Complex::new(0.0, 1e7)).unwrap();
    assert_near(h.norm(), 1.0, LOOSE_TOL, "band-stop high frequency");
}

// ═══════════════════════════════════════════════════════════════════
// Digital filters
// ═══════════════════════════════════════════════════════════════════

#[test]
fn built_filter_dc_gain() {
    let mut p = params(FilterType::LowPass, 4, 5.0);
    p.butterworth = true;
    let filter = p.build_filter(1000.0).unwrap();
    assert_eq!(filter.order(), 4);
    assert_near(filter.steady_state_gain(), 1.0, LOOSE_TOL, "Σa/Σb");
}

#[test]
fn apply_settles_on_constant_input() {
    let mut p = params(FilterType::LowPass, 2, 5.0);
    p.damping_ratio = 0.7;
    let mut data = vec![2.0; 200];
    p.apply(1000.0, &mut data).unwrap();
    for (i, &x) in data.iter().enumerate() {
        assert_near(x, 2.0, LOOSE_TOL, &format!("sample {}", i));
    }

    p.phaseless = true;
    let mut data = vec![-1.5; 200];
    p.apply(1000.0, &mut data).unwrap();
    for (i, &x) in data.iter().enumerate() {
        assert_near(x, -1.5, LOOSE_TOL, &format!("phaseless sample {}", i));
    }
}

#[test]
fn apply_highpass_removes_offset() {
    let p = params(FilterType::HighPass, 1, 20.0);
    let mut data = vec![0.0; 2000];
    data.iter_mut().skip(1).for_each(|x| *x = 3.0);
    p.apply(1000.0, &mut data).unwrap();
    assert!(data[1999].abs() < LOOSE_TOL, "{}", data[1999]);
}

#[test]
fn apply_rejects_bad_configuration() {
    let p = params(FilterType::LowPass, 0, 5.0);
    let mut data = vec![1.0; 4];
    assert!(p.apply(100.0, &mut data).is_err());
    assert_eq!(data, vec![1.0; 4]);
    assert!(params(FilterType::LowPass, 1, 5.0).apply(0.0, &mut data).is_err());
}

// ═══════════════════════════════════════════════════════════════════
// Names
// ═══════════════════════════════════════════════════════════════════

#[test]
fn order_strings() {
    let expected = [
        (1, "1st Order"),
        (2, "2nd Order"),
        (3, "3rd Order"),
        (4, "4th Order"),
        (11, "11th Order"),
        (12, "12th Order"),
        (13, "13th Order"),
        (21, "21st Order"),
        (22, "22nd Order"),
        (111, "111th Order"),
    ];
    for (order, text) in expected {
        assert_eq!(naming::order_string(order), text);
    }
}

#[test]
fn display_names() {
    let mut p = params(FilterType::LowPass, 4, 10.0);
    p.butterworth = true;
    assert_eq!(p.display_name(), "4th Order Low-Pass, 10 Hz, Butterworth");

    let mut p = params(FilterType::HighPass, 2, 5.0);
    p.damping_ratio = 0.7;
    assert_eq!(p.display_name(), "2nd Order High-Pass, 5 Hz, zeta = 0.7");

    let mut p = params(FilterType::BandPass, 2, 100.0);
    p.width_hz = 20.0;
    assert_eq!(p.display_name(), "2nd Order Band-Pass, 100 Hz x 20 Hz");

    let mut p = params(FilterType::LowPass, 1, 2.5);
    p.phaseless = true;
    assert_eq!(p.display_name(), "1st Order Low-Pass, 2.5 Hz, Phaseless");

    let p = FilterParameters {
        filter_type: FilterType::Custom,
        ..Default::default()
    };
    assert_eq!(p.display_name(), "1 / s+1");
}
