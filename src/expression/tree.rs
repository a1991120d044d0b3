use core::fmt;
use core::ops::{Add, Div, Mul, Neg, Sub};

use crate::error::{SynthesisError, SynthesisResult};

use super::polynomial::Polynomial;

/// Sign of an operand inside an [`Expr::Sum`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOp {
    Add,
    Sub,
}

/// Role of an operand inside an [`Expr::Product`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MulOp {
    Mul,
    Div,
}

/// Expression tree over real numbers and a single free variable.
///
/// Chains such as `a+b-c` or `a*b/c` are stored flat, so the depth of a
/// tree follows the nesting of parentheses, signs and exponents rather
/// than the number of terms. Trees are built by the parser or composed
/// directly with the arithmetic operators and [`Expr::pow`].
/// [`Expr::expand`] reduces a tree to a [`Polynomial`]; `Display` renders
/// text that parses back to the same tree.
///
/// ```
/// use tfsynth::expression::Expr;
///
/// let z = Expr::variable('z');
/// let e = Expr::number(2.0) * (Expr::number(1.0) - z.pow(Expr::number(-1.0)));
/// assert_eq!(e.to_string(), "2*(1-z^-1)");
/// assert_eq!(e.expand().unwrap().coefficient(-1), -2.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Variable(char),
    Neg(Box<Expr>),
    /// `first ± operand ± ...`
    Sum(Box<Expr>, Vec<(AddOp, Expr)>),
    /// `first ×/÷ operand ×/÷ ...`
    Product(Box<Expr>, Vec<(MulOp, Expr)>),
    Pow(Box<Expr>, Box<Expr>),
}

impl Expr {
    #[inline]
    pub fn number(value: f64) -> Self {
        Expr::Number(value)
    }

    #[inline]
    pub fn variable(name: char) -> Self {
        Expr::Variable(name)
    }

    /// `self ^ exponent`.
    pub fn pow(self, exponent: Expr) -> Self {
        Expr::Pow(Box::new(self), Box::new(exponent))
    }

    /// Append `op rhs` to an additive chain.
    ///
    /// A sum on the left is extended in place, and a sum added on the
    /// right is spliced in, so long chains stay one level deep.
    pub fn sum(self, op: AddOp, rhs: Expr) -> Self {
        let (first, mut rest) = match self {
            Expr::Sum(first, rest) => (first, rest),
            other => (Box::new(other), Vec::new()),
        };
        match (op, rhs) {
            (AddOp::Add, Expr::Sum(head, tail)) => {
                rest.push((AddOp::Add, *head));
                rest.extend(tail);
            }
            (op, rhs) => rest.push((op, rhs)),
        }
        Expr::Sum(first, rest)
    }

    /// Append `op rhs` to a multiplicative chain, flattening like [`Expr::sum`].
    pub fn product(self, op: MulOp, rhs: Expr) -> Self {
        let (first, mut rest) = match self {
            Expr::Product(first, rest) => (first, rest),
            other => (Box::new(other), Vec::new()),
        };
        match (op, rhs) {
            (MulOp::Mul, Expr::Product(head, tail)) => {
                rest.push((MulOp::Mul, *head));
                rest.extend(tail);
            }
            (op, rhs) => rest.push((op, rhs)),
        }
        Expr::Product(first, rest)
    }

    /// Reduce the tree to a polynomial in its variable.
    ///
    /// Integer powers of polynomials expand by repeated multiplication.
    /// Negative powers are accepted for single-term operands, real powers
    /// for constants, and division only by constants or single terms.
    /// Anything else, division by zero, a power beyond one million, or a
    /// non-finite result is an [`SynthesisError::Evaluation`].
    pub fn expand(&self) -> SynthesisResult<Polynomial> {
        let poly = match self {
            Expr::Number(value) => Polynomial::constant(*value),
            Expr::Variable(_) => Polynomial::monomial(1.0, 1),
            Expr::Neg(inner) => -&inner.expand()?,
            Expr::Sum(first, rest) => {
                let mut acc = first.expand()?;
                for (op, operand) in rest {
                    let value = operand.expand()?;
                    acc = match op {
                        AddOp::Add => &acc + &value,
                        AddOp::Sub => &acc - &value,
                    };
                }
                acc
            }
            Expr::Product(first, rest) => {
                let mut acc = first.expand()?;
                for (op, operand) in rest {
                    let value = operand.expand()?;
                    acc = match op {
                        MulOp::Mul => acc.checked_mul(&value)?,
                        MulOp::Div => acc.checked_div(&value)?,
                    };
                }
                acc
            }
            Expr::Pow(base, exponent) => {
                let exponent = exponent.expand()?.as_constant().ok_or_else(|| {
                    SynthesisError::evaluation(format!(
                        "exponent '{}' does not reduce to a constant",
                        exponent
                    ))
                })?;
                base.expand()?.pow(exponent)?
            }
        };

        if poly.is_finite() {
            Ok(poly)
        } else {
            Err(SynthesisError::evaluation(format!(
                "'{}' does not reduce to finite coefficients",
                self
            )))
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Expr::Sum(..) => 1,
            Expr::Product(..) => 2,
            Expr::Neg(_) => 3,
            Expr::Number(v) if v.is_sign_negative() => 3,
            Expr::Pow(..) => 4,
            Expr::Number(_) | Expr::Variable(_) => 5,
        }
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, operand: &Expr, parenthesize: bool) -> fmt::Result {
    if parenthesize {
        write!(f, "({})", operand)
    } else {
        write!(f, "{}", operand)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let own = self.precedence();
        match self {
            Expr::Number(value) => write!(f, "{}", value),
            Expr::Variable(name) => write!(f, "{}", name),
            Expr::Neg(inner) => {
                f.write_str("-")?;
                write_operand(f, inner, inner.precedence() < 3)
            }
            Expr::Sum(first, rest) => {
                write_operand(f, first, first.precedence() < own)?;
                for (op, operand) in rest {
                    f.write_str(match op {
                        AddOp::Add => "+",
                        AddOp::Sub => "-",
                    })?;
                    write_operand(f, operand, operand.precedence() <= own)?;
                }
                Ok(())
            }
            Expr::Product(first, rest) => {
                write_operand(f, first, first.precedence() < own)?;
                for (op, operand) in rest {
                    f.write_str(match op {
                        MulOp::Mul => "*",
                        MulOp::Div => "/",
                    })?;
                    write_operand(f, operand, operand.precedence() <= own)?;
                }
                Ok(())
            }
            Expr::Pow(base, exponent) => {
                write_operand(f, base, base.precedence() <= own)?;
                f.write_str("^")?;
                write_operand(f, exponent, exponent.precedence() < 3)
            }
        }
    }
}

// ── Builders ────────────────────────────────────────────────────────

impl Add for Expr {
    type Output = Expr;

    fn add(self, rhs: Expr) -> Expr {
        self.sum(AddOp::Add, rhs)
    }
}

impl Sub for Expr {
    type Output = Expr;

    fn sub(self, rhs: Expr) -> Expr {
        self.sum(AddOp::Sub, rhs)
    }
}

impl Mul for Expr {
    type Output = Expr;

    fn mul(self, rhs: Expr) -> Expr {
        self.product(MulOp::Mul, rhs)
    }
}

impl Div for Expr {
    type Output = Expr;

    fn div(self, rhs: Expr) -> Expr {
        self.product(MulOp::Div, rhs)
    }
}

impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        Expr::Neg(Box::new(self))
    }
}
