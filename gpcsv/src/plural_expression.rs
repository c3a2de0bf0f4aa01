//! Parser and evaluator for gettext plural expressions such as
//! `n%10==1 && n%100!=11 ? 0 : n%10>=2 && n%10<=4 && (n%100<10 || n%100>=20) ? 1 : 2`.
//!
//! Arithmetic is unsigned and wrapping, booleans are `0`/`1`, and division or remainder by
//! zero evaluates to `0` instead of failing.

use std::{fmt::Display, str::FromStr};

use crate::error::Error;

/// Deepest nesting of parentheses, negations and ternaries a parse accepts.
const MAX_NESTING: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    N,
    Number(u64),
    Op(BinaryOp),
    Not,
    Question,
    Colon,
    LParen,
    RParen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BinaryOp {
    Or,
    And,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl BinaryOp {
    fn apply(self, lhs: u64, rhs: u64) -> u64 {
        match self {
            BinaryOp::Or => u64::from(lhs != 0 || rhs != 0),
            BinaryOp::And => u64::from(lhs != 0 && rhs != 0),
            BinaryOp::Eq => u64::from(lhs == rhs),
            BinaryOp::Ne => u64::from(lhs != rhs),
            BinaryOp::Lt => u64::from(lhs < rhs),
            BinaryOp::Le => u64::from(lhs <= rhs),
            BinaryOp::Gt => u64::from(lhs > rhs),
            BinaryOp::Ge => u64::from(lhs >= rhs),
            BinaryOp::Add => lhs.wrapping_add(rhs),
            BinaryOp::Sub => lhs.wrapping_sub(rhs),
            BinaryOp::Mul => lhs.wrapping_mul(rhs),
            BinaryOp::Div => lhs.checked_div(rhs).unwrap_or(0),
            BinaryOp::Rem => lhs.checked_rem(rhs).unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Expr {
    N,
    Literal(u64),
    Not(Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    Ternary(Box<Expr>, Box<Expr>, Box<Expr>),
}

impl Expr {
    fn evaluate(&self, n: u64) -> u64 {
        match self {
            Expr::N => n,
            Expr::Literal(value) => *value,
            Expr::Not(inner) => u64::from(inner.evaluate(n) == 0),
            Expr::Binary(op, lhs, rhs) => op.apply(lhs.evaluate(n), rhs.evaluate(n)),
            Expr::Ternary(condition, then, otherwise) => {
                if condition.evaluate(n) != 0 {
                    then.evaluate(n)
                } else {
                    otherwise.evaluate(n)
                }
            }
        }
    }
}

/// A compiled gettext plural expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluralExpression {
    source: String,
    root: Expr,
}

impl PluralExpression {
    /// Parses an expression. A trailing `;` is accepted, as found in `Plural-Forms` headers.
    pub fn parse(source: &str) -> Result<Self, Error> {
        let source = source.trim().trim_end_matches(';').trim();
        let tokens = tokenize(source)?;
        let mut parser = ExprParser {
            tokens,
            pos: 0,
            depth: 0,
        };
        let root = parser.ternary()?;
        if let Some(token) = parser.peek() {
            return Err(Error::invalid_expression(format!(
                "unexpected trailing token {:?} in `{}`",
                token, source
            )));
        }
        Ok(Self {
            source: source.to_string(),
            root,
        })
    }

    /// The expression text as parsed, without a trailing `;`.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn evaluate(&self, n: u64) -> u64 {
        self.root.evaluate(n)
    }
}

impl FromStr for PluralExpression {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for PluralExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source)
    }
}

fn tokenize(source: &str) -> Result<Vec<Token>, Error> {
    let mut tokens = Vec::new();
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        let token = match c {
            c if c.is_whitespace() => continue,
            'n' => Token::N,
            '0'..='9' => {
                let mut digits = String::from(c);
                while let Some(&d) = chars.peek() {
                    if !d.is_ascii_digit() {
                        break;
                    }
                    digits.push(d);
                    chars.next();
                }
                let value = digits.parse::<u64>().map_err(|_| {
                    Error::invalid_expression(format!("number `{}` is out of range", digits))
                })?;
                Token::Number(value)
            }
            '(' => Token::LParen,
            ')' => Token::RParen,
            '?' => Token::Question,
            ':' => Token::Colon,
            '+' => Token::Op(BinaryOp::Add),
            '-' => Token::Op(BinaryOp::Sub),
            '*' => Token::Op(BinaryOp::Mul),
            '/' => Token::Op(BinaryOp::Div),
            '%' => Token::Op(BinaryOp::Rem),
            '!' if chars.peek() == Some(&'=') => {
                chars.next();
                Token::Op(BinaryOp::Ne)
            }
            '!' => Token::Not,
            '=' if chars.peek() == Some(&'=') => {
                chars.next();
                Token::Op(BinaryOp::Eq)
            }
            '<' if chars.peek() == Some(&'=') => {
                chars.next();
                Token::Op(BinaryOp::Le)
            }
            '<' => Token::Op(BinaryOp::Lt),
            '>' if chars.peek() == Some(&'=') => {
                chars.next();
                Token::Op(BinaryOp::Ge)
            }
            '>' => Token::Op(BinaryOp::Gt),
            '&' if chars.peek() == Some(&'&') => {
                chars.next();
                Token::Op(BinaryOp::And)
            }
            '|' if chars.peek() == Some(&'|') => {
                chars.next();
                Token::Op(BinaryOp::Or)
            }
            other => {
                return Err(Error::invalid_expression(format!(
                    "unexpected character `{}` in `{}`",
                    other, source
                )));
            }
        };
        tokens.push(token);
    }

    if tokens.is_empty() {
        return Err(Error::invalid_expression("empty expression"));
    }
    Ok(tokens)
}

/// Recursive descent over C operator precedence, lowest first.
struct ExprParser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl ExprParser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.peek();
        self.pos += 1;
        token
    }

    fn expect(&mut self, expected: Token) -> Result<(), Error> {
        match self.next() {
            Some(token) if token == expected => Ok(()),
            Some(token) => Err(Error::invalid_expression(format!(
                "expected {:?}, found {:?}",
                expected, token
            ))),
            None => Err(Error::invalid_expression(format!(
                "expected {:?}, found end of expression",
                expected
            ))),
        }
    }

    /// Runs `parse` one nesting level deeper, failing past [`MAX_NESTING`].
    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, Error>,
    ) -> Result<T, Error> {
        if self.depth >= MAX_NESTING {
            return Err(Error::invalid_expression("expression nested too deeply"));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn ternary(&mut self) -> Result<Expr, Error> {
        self.nested(Self::ternary_unchecked)
    }

    fn ternary_unchecked(&mut self) -> Result<Expr, Error> {
        let condition = self.binary_level(0)?;
        if self.peek() != Some(Token::Question) {
            return Ok(condition);
        }
        self.next();
        let then = self.ternary()?;
        self.expect(Token::Colon)?;
        let otherwise = self.ternary()?;
        Ok(Expr::Ternary(
            Box::new(condition),
            Box::new(then),
            Box::new(otherwise),
        ))
    }

    /// Left-associative binary operators, grouped by precedence level.
    fn binary_level(&mut self, level: usize) -> Result<Expr, Error> {
        const LEVELS: &[&[BinaryOp]] = &[
            &[BinaryOp::Or],
            &[BinaryOp::And],
            &[BinaryOp::Eq, BinaryOp::Ne],
            &[BinaryOp::Lt, BinaryOp::Le, BinaryOp::Gt, BinaryOp::Ge],
            &[BinaryOp::Add, BinaryOp::Sub],
            &[BinaryOp::Mul, BinaryOp::Div, BinaryOp::Rem],
        ];

        let Some(ops) = LEVELS.get(level) else {
            return self.unary();
        };

        let mut lhs = self.binary_level(level + 1)?;
        while let Some(Token::Op(op)) = self.peek() {
            if !ops.contains(&op) {
                break;
            }
            self.next();
            let rhs = self.binary_level(level + 1)?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Expr, Error> {
        match self.next() {
            Some(Token::Not) => {
                let inner = self.nested(Self::unary)?;
                Ok(Expr::Not(Box::new(inner)))
            }
            Some(Token::N) => Ok(Expr::N),
            Some(Token::Number(value)) => Ok(Expr::Literal(value)),
            Some(Token::LParen) => {
                let inner = self.ternary()?;
                self.expect(Token::RParen)?;
                Ok(inner)
            }
            Some(token) => Err(Error::invalid_expression(format!(
                "unexpected token {:?}",
                token
            ))),
            None => Err(Error::invalid_expression("unexpected end of expression")),
        }
    }
}
