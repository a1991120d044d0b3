//! Symbolic expressions in one variable: parsing, expansion, canonical text.
//!
//! Text such as `(s+1)^2*(s+3)` or `2*(1-z^-1)` parses into an [`Expr`]
//! tree, which expands into a [`Polynomial`] with possibly negative powers.
//! [`solve`] renders the expansion back as canonical text, and the term
//! helpers turn canonical text into dense coefficient lists.
//!
//! # Grammar
//!
//! Numbers are decimal literals (`3`, `0.25`, `.5`). Any single ASCII letter
//! is the variable, and at most one distinct letter may appear. Operators
//! are `+ - * / ^` with parentheses; `^` is right-associative and its
//! exponent may carry a sign, so `z^-1` reads as `z^(-1)`. Parentheses,
//! signs and exponents may nest up to [`MAX_NESTING`] levels; chains of
//! `+ -` or `* /` operands have no length limit.
//!
//! # Examples
//!
//! ```
//! use tfsynth::expression::solve;
//!
//! assert_eq!(solve("(s+1)^2").unwrap(), "s^2+2*s+1");
//! assert_eq!(solve("2*(1-z^-1)").unwrap(), "2-2*z^-1");
//! assert_eq!(solve("s-s").unwrap(), "0");
//! ```

mod format;
mod lexer;
mod parser;
mod polynomial;
mod terms;
mod tree;


pub use format::format_number;
pub use polynomial::{convolve, Polynomial, PolynomialTerm, MAX_EXPONENT};
pub use terms::{
    coefficients_from_expression, collect_like_terms, extract_power_coefficient_pairs,
    pad_missing_terms, split_additive_terms,
};
pub use parser::MAX_NESTING;
pub use tree::{AddOp, Expr, MulOp};

use core::str::FromStr;

use tracing::trace;

use crate::error::{SynthesisError, SynthesisResult};

/// A parsed expression together with its free variable.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionTree {
    root: Expr,
    variable: Option<char>,
}

impl ExpressionTree {
    /// Parse expression text.
    ///
    /// Returns [`SynthesisError::Parse`] on malformed input or when more
    /// than one distinct variable appears.
    pub fn parse(text: &str) -> SynthesisResult<Self> {
        let (root, variable) = parser::parse(text)?;
        Ok(Self { root, variable })
    }

    pub fn root(&self) -> &Expr {
        &self.root
    }

    /// The variable letter, `None` for a constant expression.
    pub fn variable(&self) -> Option<char> {
        self.variable
    }

    pub fn expand(&self) -> SynthesisResult<Polynomial> {
        self.root.expand()
    }

    /// Canonical text of the expansion. See [`solve`].
    pub fn canonical(&self) -> SynthesisResult<String> {
        let poly = self.expand()?;
        Ok(poly.to_expression(self.variable.unwrap_or('x')))
    }
}

impl FromStr for ExpressionTree {
    type Err = SynthesisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Expand an expression into canonical polynomial text.
///
/// Terms appear in descending power order as `coef*var^power`. A unit
/// coefficient is written as a bare sign, power one as the bare variable,
/// and power zero as the bare coefficient. The zero polynomial is `0`.
/// Coefficients use the shortest text that reads back to the same `f64`,
/// so `solve(solve(x)) == solve(x)`.
pub fn solve(text: &str) -> SynthesisResult<String> {
    let canonical = ExpressionTree::parse(text)?.canonical()?;
    trace!(input = text, output = %canonical, "expanded expression");
    Ok(canonical)
}
