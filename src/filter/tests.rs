use super::*;

const TOL: f64 = 1e-12;
const LOOSE_TOL: f64 = 1e-9;

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

/// 1/(s+1) discretized at `fs`.
fn first_order_lowpass(fs: f64) -> DigitalFilter {
    let tf = TransferFunction::new(vec![1.0], vec![1.0, 1.0]).unwrap();
    DigitalFilter::from_transfer_function(fs, &tf).unwrap()
}

// ═══════════════════════════════════════════════════════════════════
// Construction
// ═══════════════════════════════════════════════════════════════════

#[test]
fn rejects_zero_leading_denominator() {
    assert!(matches!(
        DigitalFilter::from_coefficients(10.0, vec![1.0], vec![0.0, 1.0]),
        Err(SynthesisError::Configuration(_))
    ));
}

#[test]
fn rejects_bad_construction() {
    let cases: [(f64, Vec<f64>, Vec<f64>); 5] = [
        (0.0, vec![1.0], vec![1.0]),
        (-5.0, vec![1.0], vec![1.0]),
        (f64::NAN, vec![1.0], vec![1.0]),
        (10.0, vec![], vec![1.0]),
        (10.0, vec![1.0], vec![1.0, f64::INFINITY]),
    ];
    for (i, (fs, a, b)) in cases.into_iter().enumerate() {
        assert!(
            matches!(
                DigitalFilter::from_coefficients(fs, a, b),
                Err(SynthesisError::Configuration(_))
            ),
            "case {}",
            i
        );
    }
}

#[test]
fn accessors() {
    let f = DigitalFilter::from_coefficients(48.0, vec![1.0, 2.0, 1.0], vec![4.0, 0.5]).unwrap();
    assert_eq!(f.sample_rate(), 48.0);
    assert_eq!(f.numerator(), &[1.0, 2.0, 1.0]);
    assert_eq!(f.denominator(), &[4.0, 0.5]);
    assert_eq!(f.order(), 2);
    assert_eq!(f.raw_value(), 0.0);
    assert_eq!(f.filtered_value(), 0.0);
}

// ═══════════════════════════════════════════════════════════════════
// Difference equation
// ═══════════════════════════════════════════════════════════════════

#[test]
fn pure_gain() {
    let mut f = DigitalFilter::from_coefficients(10.0, vec![6.0], vec![2.0]).unwrap();
    for &x in &[1.0, -2.5, 0.0, 7.25] {
        assert_eq!(f.apply(x), 3.0 * x);
    }
}

#[test]
fn moving_average() {
    let mut f = DigitalFilter::from_coefficients(10.0, vec![0.5, 0.5], vec![1.0]).unwrap();
    assert_eq!(f.apply(2.0), 1.0);
    assert_eq!(f.apply(4.0), 3.0);
    assert_eq!(f.apply(0.0), 2.0);
    assert_eq!(f.raw_value(), 0.0);
    assert_eq!(f.filtered_value(), 2.0);
}

#[test]
fn recursive_feedback() {
    // y[n] = x[n] + 0.5·y[n-1]
    let mut f = DigitalFilter::from_coefficients(10.0, vec![1.0], vec![1.0, -0.5]).unwrap();
    assert_eq!(f.apply(1.0), 1.0);
    assert_eq!(f.apply(0.0), 0.5);
    assert_eq!(f.apply(0.0), 0.25);
}

#[test]
fn initialize_fills_histories() {
    let mut f = DigitalFilter::from_coefficients(10.0, vec![1.0], vec![1.0, -0.5]).unwrap();
    f.initialize(2.0);
    assert_eq!(f.raw_value(), 2.0);
    assert_eq!(f.filtered_value(), 2.0);
    assert_eq!(f.apply(0.0), 1.0);

    let mut g = DigitalFilter::from_coefficients(10.0, vec![1.0], vec![1.0, -0.5])
        .unwrap()
        .with_initial_value(2.0);
    assert_eq!(g.apply(0.0), 1.0);

    g.reset();
    assert_eq!(g.apply(0.0), 0.0);
}

#[test]
fn lowpass_step_settles() {
    let mut f = first_order_lowpass(100.0);
    let mut y = 0.0;
    for _ in 0..5000 {
        y = f.apply(1.0);
    }
    assert_near(y, 1.0, LOOSE_TOL, "step response");
}

#[test]
fn process_matches_apply() {
    let input: Vec<f64> = (0..32).map(|i| ((i as f64) * 0.3).sin()).collect();

    let mut reference = first_order_lowpass(50.0);
    let expected: Vec<f64> = input.iter().map(|&x| reference.apply(x)).collect();

    let mut f = first_order_lowpass(50.0);
    let mut output = vec![0.0; input.len()];
    f.process(&input, &mut output);
    assert_eq!(output, expected);

    let mut g = first_order_lowpass(50.0);
    let mut data = input.clone();
    g.process_inplace(&mut data);
    assert_eq!(data, expected);
}

#[test]
#[should_panic]
fn process_output_too_short() {
    let mut f = first_order_lowpass(50.0);
    let mut output = [0.0; 2];
    f.process(&[1.0, 2.0, 3.0], &mut output);
}

#[test]
fn clones_are_independent() {
    let mut f = first_order_lowpass(20.0);
    f.apply(1.0);
    let mut g = f.clone();
    let from_g = g.apply(1.0);
    let from_f = f.apply(1.0);
    assert_eq!(from_f, from_g);
    g.apply(5.0);
    assert_ne!(f.filtered_value(), g.filtered_value());
}

// ═══════════════════════════════════════════════════════════════════
// Phaseless
// ═══════════════════════════════════════════════════════════════════

#[test]
fn phaseless_constant_passes_through() {
    let mut f = first_order_lowpass(100.0);
    let mut data = vec![3.5; 64];
    f.process_phaseless(&mut data);
    for (i, &x) in data.iter().enumerate() {
        assert_near(x, 3.5, LOOSE_TOL, &format!("sample {}", i));
    }
}

#[test]
fn phaseless_has_no_lag() {
    // A symmetric pulse stays symmetric under forward-backward filtering
    let mut f = first_order_lowpass(1.0);
    let mut data = vec![0.0; 41];
    data[20] = 1.0;
    f.process_phaseless(&mut data);
    for k in 1..=20 {
        assert_near(data[20 - k], data[20 + k], 1e-6, &format!("offset {}", k));
    }
}

#[test]
fn phaseless_empty_is_noop() {
    let mut f = first_order_lowpass(100.0);
    let mut data: Vec<f64> = Vec::new();
    f.process_phaseless(&mut data);
    assert!(data.is_empty());
}

// ═══════════════════════════════════════════════════════════════════
// Gain queries
// ═══════════════════════════════════════════════════════════════════

#[test]
fn steady_state_gain() {
    assert_near(first_order_lowpass(10.0).steady_state_gain(), 1.0, TOL, "lowpass");
    let f = DigitalFilter::from_coefficients(10.0, vec![6.0], vec![2.0]).unwrap();
    assert_eq!(f.steady_state_gain(), 3.0);
}

#[test]
fn frequency_response() {
    let f = first_order_lowpass(100.0);
    let dc = f.frequency_response(0.0).unwrap();
    assert!(dc.approx_eq(Complex::ONE, TOL), "{:?}", dc);
    // zero at z = -1
    let nyquist = f.frequency_response(50.0).unwrap();
    assert!(nyquist.norm() < TOL, "{:?}", nyquist);
    let mid = f.frequency_response(10.0).unwrap().norm();
    assert!(mid > 0.0 && mid < 1.0);
}
