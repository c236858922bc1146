//! Arithmetic evaluation for "solve <expression>"
//!
//! Supports `+ - * / % ^` (and `**`), parentheses, unary signs, decimals,
//! and the spoken operator words a recognizer produces ("plus", "times",
//! "divided by", "to the power of", ...).

use crate::router::strip_keyword;
use crate::{Error, Result};

/// Longest expression accepted, in characters
const MAX_EXPRESSION_LEN: usize = 1024;

/// Deepest nesting of parentheses and unary signs
const MAX_DEPTH: usize = 64;

/// Spoken phrases rewritten to operators before tokenizing (longest first)
const SPOKEN_OPERATORS: &[(&str, &str)] = &[
    (" to the power of ", " ^ "),
    (" multiplied by ", " * "),
    (" divided by ", " / "),
    (" squared ", " ^ 2 "),
    (" cubed ", " ^ 3 "),
    (" plus ", " + "),
    (" minus ", " - "),
    (" times ", " * "),
    (" over ", " / "),
    (" mod ", " % "),
    (" x ", " * "),
];

/// Evaluate the expression in a "solve ..." utterance
///
/// Never fails: malformed input yields an error sentence.
#[must_use]
pub fn handle_math(command: &str) -> String {
    let expression = strip_keyword(command, "solve");
    match evaluate(&expression) {
        Ok(value) => format!("The result is: {}", format_number(value)),
        Err(e) => {
            tracing::debug!(expression, error = %e, "math evaluation failed");
            format!("Error solving math problem: {e}")
        }
    }
}

/// Evaluate an arithmetic expression
///
/// # Errors
///
/// Returns `Error::Parse` on malformed, over-long or too deeply nested
/// input, division by zero, or a non-finite result
pub fn evaluate(expression: &str) -> Result<f64> {
    if expression.len() > MAX_EXPRESSION_LEN {
        return Err(Error::Parse("expression is too long".into()));
    }

    let normalized = normalize(expression);
    let tokens = tokenize(&normalized)?;
    if tokens.is_empty() {
        return Err(Error::Parse("empty expression".into()));
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let value = parser.expression()?;
    if let Some(token) = parser.peek() {
        return Err(Error::Parse(format!("unexpected {token}")));
    }

    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::Parse("result is not a finite number".into()))
    }
}

/// Render a result, dropping the fraction for whole numbers
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    let fixed = format!("{value:.10}");
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn normalize(expression: &str) -> String {
    let mut text = format!(" {} ", expression.to_lowercase());
    for (spoken, symbol) in SPOKEN_OPERATORS {
        // Repeat so adjacent matches sharing a space are all rewritten
        while text.contains(spoken) {
            text = text.replace(spoken, symbol);
        }
    }
    text.replace("**", "^")
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Op(char),
    Open,
    Close,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "number {n}"),
            Self::Op(c) => write!(f, "operator '{c}'"),
            Self::Open => write!(f, "'('"),
            Self::Close => write!(f, "')'"),
        }
    }
}

fn tokenize(text: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = text.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '0'..='9' | '.' => {
                let mut literal = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_digit() || d == '.' {
                        literal.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| Error::Parse(format!("invalid number '{literal}'")))?;
                tokens.push(Token::Number(value));
            }
            '+' | '-' | '*' | '/' | '%' | '^' => {
                tokens.push(Token::Op(c));
                chars.next();
            }
            '(' => {
                tokens.push(Token::Open);
                chars.next();
            }
            ')' => {
                tokens.push(Token::Close);
                chars.next();
            }
            other => return Err(Error::Parse(format!("unexpected character '{other}'"))),
        }
    }

    Ok(tokens)
}

/// Recursive-descent parser over the token stream
struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn descend(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(Error::Parse("expression is nested too deeply".into()));
        }
        Ok(())
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.peek();
        self.pos += 1;
        token
    }

    // expression := term (('+' | '-') term)*
    fn expression(&mut self) -> Result<f64> {
        let mut value = self.term()?;
        while let Some(Token::Op(op @ ('+' | '-'))) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            value = if op == '+' { value + rhs } else { value - rhs };
        }
        Ok(value)
    }

    // term := unary (('*' | '/' | '%') unary)*
    fn term(&mut self) -> Result<f64> {
        let mut value = self.unary()?;
        while let Some(Token::Op(op @ ('*' | '/' | '%'))) = self.peek() {
            self.pos += 1;
            let rhs = self.unary()?;
            value = match op {
                '*' => value * rhs,
                _ if rhs == 0.0 => return Err(Error::Parse("division by zero".into())),
                '/' => value / rhs,
                _ => value % rhs,
            };
        }
        Ok(value)
    }

    // unary := ('+' | '-') unary | power
    fn unary(&mut self) -> Result<f64> {
        match self.peek() {
            Some(Token::Op('-')) => {
                self.pos += 1;
                self.descend()?;
                let value = -self.unary()?;
                self.depth -= 1;
                Ok(value)
            }
            Some(Token::Op('+')) => {
                self.pos += 1;
                self.descend()?;
                let value = self.unary()?;
                self.depth -= 1;
                Ok(value)
            }
            _ => self.power(),
        }
    }

    // power := primary ('^' unary)?   (right-associative)
    fn power(&mut self) -> Result<f64> {
        let base = self.primary()?;
        if self.peek() == Some(Token::Op('^')) {
            self.pos += 1;
            self.descend()?;
            let exponent = self.unary()?;
            self.depth -= 1;
            return Ok(base.powf(exponent));
        }
        Ok(base)
    }

    // primary := number | '(' expression ')'
    fn primary(&mut self) -> Result<f64> {
        match self.next() {
            Some(Token::Number(n)) => Ok(n),
            Some(Token::Open) => {
                self.descend()?;
                let value = self.expression()?;
                self.depth -= 1;
                match self.next() {
                    Some(Token::Close) => Ok(value),
                    _ => Err(Error::Parse("missing closing parenthesis".into())),
                }
            }
            Some(token) => Err(Error::Parse(format!("unexpected {token}"))),
            None => Err(Error::Parse("incomplete expression".into())),
        }
    }
}
