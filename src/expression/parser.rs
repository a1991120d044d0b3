use crate::error::{SynthesisError, SynthesisResult};

use super::lexer::{tokenize, Spanned, Token};
use super::tree::{AddOp, Expr, MulOp};

/// Deepest nesting of parentheses, unary signs and exponents accepted.
pub const MAX_NESTING: usize = 128;

/// Recursive-descent parser over a token stream.
///
/// Precedence, loosest first: binary `+ -`, binary `* /`, unary `- +`,
/// `^` (right-associative, exponent may carry a unary sign).
struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
    end: usize,
    depth: usize,
    variable: Option<char>,
}

/// Parse `text` into an expression tree and its free variable (if any).
pub(super) fn parse(text: &str) -> SynthesisResult<(Expr, Option<char>)> {
    let tokens = tokenize(text)?;
    if tokens.is_empty() {
        return Err(SynthesisError::parse(0, "empty expression"));
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        end: text.chars().count(),
        depth: 0,
        variable: None,
    };
    let expr = parser.expression()?;

    if let Some(next) = parser.peek() {
        let message = match next.token {
            Token::RParen => "imbalanced parentheses: unexpected ')'",
            _ => "expected an operator",
        };
        return Err(SynthesisError::parse(next.position, message));
    }

    Ok((expr, parser.variable))
}

impl Parser {
    fn peek(&self) -> Option<Spanned> {
        self.tokens.get(self.pos).copied()
    }

    fn peek_token(&self) -> Option<Token> {
        self.peek().map(|s| s.token)
    }

    fn position(&self) -> usize {
        self.peek().map_or(self.end, |s| s.position)
    }

    fn advance(&mut self) -> Option<Spanned> {
        let next = self.peek();
        if next.is_some() {
            self.pos += 1;
        }
        next
    }

    /// Run `parse` one nesting level deeper.
    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> SynthesisResult<T>,
    ) -> SynthesisResult<T> {
        if self.depth >= MAX_NESTING {
            return Err(SynthesisError::parse(
                self.position(),
                format!("expression nested deeper than {} levels", MAX_NESTING),
            ));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn expression(&mut self) -> SynthesisResult<Expr> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek_token() {
                Some(Token::Plus) => AddOp::Add,
                Some(Token::Minus) => AddOp::Sub,
                _ => return Ok(lhs),
            };
            self.advance();
            lhs = lhs.sum(op, self.term()?);
        }
    }

    fn term(&mut self) -> SynthesisResult<Expr> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek_token() {
                Some(Token::Star) => MulOp::Mul,
                Some(Token::Slash) => MulOp::Div,
                _ => return Ok(lhs),
            };
            self.advance();
            lhs = lhs.product(op, self.unary()?);
        }
    }

    fn unary(&mut self) -> SynthesisResult<Expr> {
        match self.peek_token() {
            Some(Token::Minus) => {
                self.advance();
                Ok(-self.nested(Self::unary)?)
            }
            Some(Token::Plus) => {
                self.advance();
                self.nested(Self::unary)
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> SynthesisResult<Expr> {
        let base = self.primary()?;
        if self.peek_token() == Some(Token::Caret) {
            self.advance();
            let exponent = self.nested(Self::unary)?;
            return Ok(base.pow(exponent));
        }
        Ok(base)
    }

    fn primary(&mut self) -> SynthesisResult<Expr> {
        let position = self.position();
        match self.advance() {
            Some(Spanned {
                token: Token::Number(value),
                ..
            }) => Ok(Expr::Number(value)),
            Some(Spanned {
                token: Token::Variable(name),
                position,
            }) => {
                match self.variable {
                    Some(existing) if existing != name => {
                        return Err(SynthesisError::parse(
                            position,
                            format!("more than one free variable: '{}' and '{}'", existing, name),
                        ));
                    }
                    _ => self.variable = Some(name),
                }
                Ok(Expr::Variable(name))
            }
            Some(Spanned {
                token: Token::LParen,
                position: open,
            }) => {
                let inner = self.nested(Self::expression)?;
                match self.advance() {
                    Some(Spanned {
                        token: Token::RParen,
                        ..
                    }) => Ok(inner),
                    _ => Err(SynthesisError::parse(
                        open,
                        "imbalanced parentheses: '(' is never closed",
                    )),
                }
            }
            Some(Spanned {
                token: Token::RParen,
                ..
            }) => Err(SynthesisError::parse(position, "imbalanced parentheses: unexpected ')'")),
            Some(_) | None => Err(SynthesisError::parse(position, "expected an operand")),
        }
    }
}
