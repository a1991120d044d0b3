use crate::error::{SynthesisError, SynthesisResult};

#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) enum Token {
    Number(f64),
    Variable(char),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

/// A token and the character offset it starts at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Spanned {
    pub token: Token,
    pub position: usize,
}

/// Split expression text into tokens. Whitespace is skipped.
pub(super) fn tokenize(text: &str) -> SynthesisResult<Vec<Spanned>> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        if ch.is_whitespace() {
            i += 1;
            continue;
        }

        if ch.is_ascii_digit() || ch == '.' {
            let start = i;
            let mut seen_point = false;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                if chars[i] == '.' {
                    if seen_point {
                        return Err(SynthesisError::parse(
                            i,
                            "malformed number: second decimal point",
                        ));
                    }
                    seen_point = true;
                }
                i += 1;
            }
            let literal: String = chars[start..i].iter().collect();
            let value = literal.parse::<f64>().map_err(|_| {
                SynthesisError::parse(start, format!("malformed number '{}'", literal))
            })?;
            tokens.push(Spanned {
                token: Token::Number(value),
                position: start,
            });
            continue;
        }

        let token = match ch {
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '^' => Token::Caret,
            '(' => Token::LParen,
            ')' => Token::RParen,
            c if c.is_ascii_alphabetic() => Token::Variable(c),
            other => {
                return Err(SynthesisError::parse(
                    i,
                    format!("unrecognized character '{}'", other),
                ))
            }
        };
        tokens.push(Spanned { token, position: i });
        i += 1;
    }

    Ok(tokens)
}
