//! Analog filter design: pole placement and transfer-function text.
//!
//! [`FilterParameters`] describes a filter the way a user would (type,
//! order, cutoff, damping, bandwidth). The design step renders the
//! `s`-domain numerator and denominator as expression text, which then goes
//! through the same parser and bilinear transform as a hand-written
//! transfer function.
//!
//! - **Low/high-pass**: `ω^n/D(s)` and `s^n/D(s)`, with `D` either the
//!   Butterworth pole polynomial or a cascade of identical damped sections.
//! - **Band-pass/band-stop**: a second-order resonator for narrow bands, or
//!   a low-pass and high-pass pair for wide bands (see [`is_wide_band`]).
//! - **Notch**: `(s^2+ω^2)/(s^2+w·s+ω^2)`.
//! - **Custom**: user-supplied numerator and denominator text in `s`.
//!
//! # Example
//!
//! ```
//! use tfsynth::design::{FilterParameters, FilterType};
//!
//! let params = FilterParameters {
//!     filter_type: FilterType::LowPass,
//!     order: 4,
//!     cutoff_hz: 2.0,
//!     butterworth: true,
//!     ..Default::default()
//! };
//! assert_eq!(params.display_name(), "4th Order Low-Pass, 2 Hz, Butterworth");
//!
//! let mut filter = params.build_filter(200.0).unwrap();
//! let y = filter.apply(1.0);
//! assert!(y > 0.0 && y < 1.0);
//! ```

mod band;
mod butterworth;
mod naming;
mod standard;

#[cfg(test)]
mod tests;

pub use band::{band_edges, is_wide_band};
pub use butterworth::{butterworth_denominator, butterworth_poles};
pub use standard::{polynomial_expression, standard_denominator};

use core::f64::consts::PI;

use tracing::debug;

use crate::error::{SynthesisError, SynthesisResult};
use crate::filter::DigitalFilter;
use crate::synthesis::TransferFunction;

/// Significant digits used when rendering design coefficients as text.
pub const DEFAULT_PRECISION: usize = 15;

/// Kind of filter to design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum FilterType {
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "low-pass"))]
    LowPass,
    #[cfg_attr(feature = "serde", serde(alias = "high-pass"))]
    HighPass,
    #[cfg_attr(feature = "serde", serde(alias = "band-pass"))]
    BandPass,
    #[cfg_attr(feature = "serde", serde(alias = "band-stop"))]
    BandStop,
    Notch,
    Custom,
}

/// Numerator and denominator of a transfer function as `s` expression text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferFunctionText {
    pub numerator: String,
    pub denominator: String,
}

impl FilterType {
    /// Name used in filter descriptions, e.g. `"Band-Pass"`.
    pub fn label(self) -> &'static str {
        match self {
            FilterType::LowPass => "Low-Pass",
            FilterType::HighPass => "High-Pass",
            FilterType::BandPass => "Band-Pass",
            FilterType::BandStop => "Band-Stop",
            FilterType::Notch => "Notch",
            FilterType::Custom => "Custom",
        }
    }

    /// Band and notch filters are parameterized by a width.
    pub fn uses_width(self) -> bool {
        matches!(
            self,
            FilterType::BandPass | FilterType::BandStop | FilterType::Notch
        )
    }

    /// Render the `s`-domain transfer function for `params`.
    ///
    /// Expects parameters that passed [`FilterParameters::validate`]; the
    /// filter type is taken from `self`.
    pub fn build_expressions(self, params: &FilterParameters) -> TransferFunctionText {
        let cutoff = params.cutoff_rad();
        let text = match self {
            FilterType::LowPass => standard::lowpass_text(
                params.order,
                cutoff,
                params.damping_ratio,
                params.butterworth,
                params.precision,
            ),
            FilterType::HighPass => standard::highpass_text(
                params.order,
                cutoff,
                params.damping_ratio,
                params.butterworth,
                params.precision,
            ),
            FilterType::BandPass if is_wide_band(self, params.cutoff_hz, params.width_hz) => {
                band::wide_band_pass(params)
            }
            FilterType::BandPass => band::narrow_band_pass(params),
            FilterType::BandStop if is_wide_band(self, params.cutoff_hz, params.width_hz) => {
                band::wide_band_stop(params)
            }
            FilterType::BandStop | FilterType::Notch => band::narrow_band_stop(params),
            FilterType::Custom => TransferFunctionText {
                numerator: params.numerator.clone(),
                denominator: params.denominator.clone(),
            },
        };
        debug!(
            filter_type = ?self,
            numerator = %text.numerator,
            denominator = %text.denominator,
            "designed transfer function"
        );
        text
    }
}

/// Everything needed to design a filter.
///
/// Frequencies are in Hz. Fields a filter type does not use are ignored.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct FilterParameters {
    /// Kind of filter
    pub filter_type: FilterType,
    /// Filter order (number of poles for low/high-pass and wide bands)
    pub order: usize,
    /// Cutoff, or centre frequency for band and notch filters
    pub cutoff_hz: f64,
    /// Damping ratio of each second-order section (non-Butterworth)
    pub damping_ratio: f64,
    /// Bandwidth for band and notch filters
    pub width_hz: f64,
    /// Place poles on the Butterworth circle instead of using `damping_ratio`
    pub butterworth: bool,
    /// Filter forward and backward for zero phase shift
    pub phaseless: bool,
    /// Numerator text in `s` (custom filters)
    pub numerator: String,
    /// Denominator text in `s` (custom filters)
    pub denominator: String,
    /// Significant digits of the rendered coefficients
    pub precision: usize,
}

impl Default for FilterParameters {
    fn default() -> Self {
        Self {
            filter_type: FilterType::LowPass,
            order: 1,
            cutoff_hz: 1.0,
            damping_ratio: 1.0,
            width_hz: 1.0,
            butterworth: false,
            phaseless: false,
            numerator: "1".to_string(),
            denominator: "s+1".to_string(),
            precision: DEFAULT_PRECISION,
        }
    }
}

impl FilterParameters {
    /// Cutoff in rad/s.
    pub fn cutoff_rad(&self) -> f64 {
        2.0 * PI * self.cutoff_hz
    }

    /// Bandwidth in rad/s.
    pub fn width_rad(&self) -> f64 {
        2.0 * PI * self.width_hz
    }

    pub fn is_wide_band(&self) -> bool {
        is_wide_band(self.filter_type, self.cutoff_hz, self.width_hz)
    }

    fn uses_damping(&self) -> bool {
        if self.butterworth {
            return false;
        }
        match self.filter_type {
            FilterType::LowPass | FilterType::HighPass => self.order > 1,
            FilterType::BandPass | FilterType::BandStop => self.is_wide_band() && self.order > 2,
            FilterType::Notch | FilterType::Custom => false,
        }
    }

    /// Check the fields the filter type uses.
    ///
    /// Returns [`SynthesisError::Configuration`] naming the first bad field.
    pub fn validate(&self) -> SynthesisResult<()> {
        let positive = |value: f64| value.is_finite() && value > 0.0;

        if !(1..=17).contains(&self.precision) {
            return Err(SynthesisError::configuration(format!(
                "precision must be between 1 and 17 digits, got {}",
                self.precision
            )));
        }

        if self.filter_type == FilterType::Custom {
            if self.numerator.trim().is_empty() || self.denominator.trim().is_empty() {
                return Err(SynthesisError::configuration(
                    "custom filters need numerator and denominator text",
                ));
            }
            return Ok(());
        }

        if self.order == 0 {
            return Err(SynthesisError::configuration("order must be at least 1"));
        }
        if !positive(self.cutoff_hz) {
            return Err(SynthesisError::configuration(format!(
                "cutoff frequency must be positive, got {}",
                self.cutoff_hz
            )));
        }
        if self.filter_type.uses_width() && !positive(self.width_hz) {
            return Err(SynthesisError::configuration(format!(
                "width must be positive, got {}",
                self.width_hz
            )));
        }
        if self.is_wide_band() && self.order < 2 {
            return Err(SynthesisError::configuration(
                "wide-band filters need order 2 or higher",
            ));
        }
        if self.uses_damping() && !positive(self.damping_ratio) {
            return Err(SynthesisError::configuration(format!(
                "damping ratio must be positive, got {}",
                self.damping_ratio
            )));
        }
        Ok(())
    }

    /// Validate, then render the transfer function text.
    pub fn build_expressions(&self) -> SynthesisResult<TransferFunctionText> {
        self.validate()?;
        Ok(self.filter_type.build_expressions(self))
    }

    pub fn build_transfer_function(&self) -> SynthesisResult<TransferFunction> {
        let text = self.build_expressions()?;
        TransferFunction::from_expressions(&text.numerator, &text.denominator)
    }

    /// Design and discretize at `sample_rate` Hz.
    pub fn build_filter(&self, sample_rate: f64) -> SynthesisResult<DigitalFilter> {
        DigitalFilter::from_transfer_function(sample_rate, &self.build_transfer_function()?)
    }

    /// Filter `data` in place, sampled at `sample_rate` Hz.
    ///
    /// The filter starts settled at the first sample. With `phaseless`
    /// set, the data is filtered forward and then backward.
    pub fn apply(&self, sample_rate: f64, data: &mut [f64]) -> SynthesisResult<()> {
        let mut filter = self.build_filter(sample_rate)?;
        debug!(name = %self.display_name(), samples = data.len(), "applying filter");

        if self.phaseless {
            filter.process_phaseless(data);
        } else if let Some(&first) = data.first() {
            filter.initialize(first);
            filter.process_inplace(data);
        }
        Ok(())
    }

    /// Human-readable description, e.g. `"2nd Order High-Pass, 5 Hz, zeta = 0.7"`.
    pub fn display_name(&self) -> String {
        naming::display_name(self)
    }
}
