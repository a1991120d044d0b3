/// Result type for parsing, synthesis, and design operations.
pub type SynthesisResult<T> = Result<T, SynthesisError>;

/// Errors produced while parsing expressions, synthesizing coefficients, or
/// designing filters.
///
/// None of these can occur inside [`DigitalFilter::apply`](crate::DigitalFilter::apply):
/// every filter is fully validated at construction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SynthesisError {
    /// Malformed expression syntax.
    #[error("parse error at position {position}: {message}")]
    Parse { position: usize, message: String },

    /// An expression could not be reduced to a polynomial.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Invalid filter parameters, sample rate, or coefficients.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A polynomial power fell outside the fixed-length coefficient window.
    #[error("polynomial power {power} lies outside the expected range {low}..={high}")]
    NumericDegeneracy { power: i32, low: i32, high: i32 },

    /// Complex division by a zero-magnitude value.
    #[error("division by zero")]
    DivideByZero,
}

impl SynthesisError {
    pub(crate) fn parse(position: usize, message: impl Into<String>) -> Self {
        SynthesisError::Parse {
            position,
            message: message.into(),
        }
    }

    pub(crate) fn evaluation(message: impl Into<String>) -> Self {
        SynthesisError::Evaluation(message.into())
    }

    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        SynthesisError::Configuration(message.into())
    }
}
