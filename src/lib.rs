//! # tfsynth
//!
//! Transfer-function synthesis and recursive digital filtering. Analog
//! filters described by design parameters or by typed `s`-domain
//! expressions are discretized with the bilinear transform and run as
//! direct-form-I difference equations.
//!
//! ## Quick start
//!
//! ```
//! use tfsynth::{FilterParameters, FilterType};
//!
//! // 2nd-order low-pass at 5 Hz, damping 0.7, sampled at 1 kHz
//! let params = FilterParameters {
//!     filter_type: FilterType::LowPass,
//!     order: 2,
//!     cutoff_hz: 5.0,
//!     damping_ratio: 0.7,
//!     ..Default::default()
//! };
//! let mut filter = params.build_filter(1000.0).unwrap();
//! let y: Vec<f64> = (0..5).map(|_| filter.apply(1.0)).collect();
//! assert!(y.windows(2).all(|w| w[1] > w[0]));
//! ```
//!
//! ```
//! use tfsynth::{DigitalFilter, TransferFunction};
//!
//! // Any expression that expands to a polynomial in s
//! let tf = TransferFunction::from_expressions("4", "(s+1)*(s+4)").unwrap();
//! let filter = DigitalFilter::from_transfer_function(100.0, &tf).unwrap();
//! assert!((filter.steady_state_gain() - 1.0).abs() < 1e-9);
//! ```
//!
//! ## Modules
//!
//! - [`complex`] — `Complex` arithmetic with real and complex powers through
//!   the polar form, used for pole placement and frequency response.
//!
//! - [`expression`] — Parser for one-variable algebraic expressions
//!   (`+ - * / ^`, parentheses, negative powers such as `z^-1`). Trees
//!   expand into dense Laurent polynomials; [`solve`] prints canonical text
//!   and the term helpers turn it into coefficient vectors.
//!
//! - [`synthesis`] — [`TransferFunction`] in `s` and the bilinear transform
//!   to `z⁻¹` coefficients.
//!
//! - [`filter`] — [`DigitalFilter`]: sample histories, per-sample `apply`,
//!   slice processing, zero-phase forward-backward filtering, DC gain and
//!   frequency response.
//!
//! - [`design`] — Butterworth poles, cascaded damped sections, narrow and
//!   wide band decomposition, notch, and [`FilterParameters`] tying it all
//!   together.
//!
//! - [`error`] — [`SynthesisError`] and the [`SynthesisResult`] alias.
//!
//! ## Logging
//!
//! Synthesis and design milestones are emitted as `tracing` events at
//! `debug` level, expansion details at `trace`. Install any subscriber to
//! see them.
//!
//! ## Cargo features
//!
//! | Feature   | Default | Description |
//! |-----------|---------|-------------|
//! | `serde`   | yes     | `Serialize` / `Deserialize` for `FilterParameters`, `FilterType`, `Complex`, `PolynomialTerm` |
//! | `complex` | no      | `From` conversions between `Complex` and `num_complex::Complex64` |
//! | `all`     | no      | All features: `serde` + `complex` |

pub mod complex;
pub mod design;
pub mod error;
pub mod expression;
pub mod filter;
pub mod synthesis;

pub use complex::{is_nearly_zero, Complex, NEARLY_ZERO};
pub use design::{FilterParameters, FilterType, TransferFunctionText};
pub use error::{SynthesisError, SynthesisResult};
pub use expression::{solve, Expr, ExpressionTree, Polynomial, PolynomialTerm};
pub use filter::DigitalFilter;
pub use synthesis::{bilinear_transform, TransferFunction};
