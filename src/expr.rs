use std::fmt;

use crate::{
    error::EvalError,
    function::{constant, function},
    parser::parse,
};

/// A number as it was written, plus its value.
#[derive(Debug, PartialEq, Clone)]
pub struct Literal {
    pub text: String,
    pub value: f64,
}

impl Literal {
    pub(crate) fn parse(text: &str) -> Option<Literal> {
        let value = text.parse().ok()?;
        Some(Literal {
            text: text.to_string(),
            value,
        })
    }

    /// Whether the literal is written as `1` or `1.0`.
    pub fn is_one(&self) -> bool {
        self.text == "1" || self.text == "1.0"
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expr {
    Number(Literal),
    Ident(String),
    Negate(Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
    Call(String, Box<Expr>),
}

impl Expr {
    /// Numbers, identifiers and function calls never need grouping.
    pub fn is_atomic(&self) -> bool {
        matches!(self, Expr::Number(_) | Expr::Ident(_) | Expr::Call(..))
    }

    pub fn evaluate(&self) -> Result<f64, EvalError> {
        Ok(match self {
            Expr::Number(literal) => literal.value,
            Expr::Ident(name) => {
                constant(name).ok_or_else(|| EvalError::UnknownConstant(name.clone()))?
            }
            Expr::Negate(operand) => -operand.evaluate()?,
            Expr::Add(l, r) => l.evaluate()? + r.evaluate()?,
            Expr::Sub(l, r) => l.evaluate()? - r.evaluate()?,
            Expr::Mul(l, r) => l.evaluate()? * r.evaluate()?,
            Expr::Div(l, r) => l.evaluate()? / r.evaluate()?,
            Expr::Pow(base, exponent) => base.evaluate()?.powf(exponent.evaluate()?),
            Expr::Call(name, argument) => {
                let f = function(name).ok_or_else(|| EvalError::UnknownFunction(name.clone()))?;
                f(argument.evaluate()?)
            }
        })
    }
}

/// Prints the expression back in input syntax, fully parenthesised.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(literal) => f.write_str(&literal.text),
            Expr::Ident(name) => f.write_str(name),
            // `pow` is only recognised above unary, so the operand is grouped
            Expr::Negate(operand) => write!(f, "(-({operand}))"),
            Expr::Add(l, r) => write!(f, "({l} + {r})"),
            Expr::Sub(l, r) => write!(f, "({l} - {r})"),
            Expr::Mul(l, r) => write!(f, "({l} * {r})"),
            Expr::Div(l, r) => write!(f, "({l} / {r})"),
            Expr::Pow(base, exponent) => write!(f, "pow({base}, {exponent})"),
            Expr::Call(name, argument) => write!(f, "{name}({argument})"),
        }
    }
}

pub fn evaluate(input: &str) -> Result<f64, EvalError> {
    let expr = parse(input)?;
    expr.evaluate()
}

/// Value of `input`, or `None` when it does not parse or names something unknown.
///
/// Callers that need a number substitute `0.0` for `None`.
pub fn number_evaluation(input: &str) -> Option<f64> {
    match evaluate(input) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::debug!("{input:?} has no value: {err}");
            None
        }
    }
}

/// [`number_evaluation`] with the missing-value default applied.
pub(crate) fn number_or_zero(input: &str) -> f64 {
    number_evaluation(input).unwrap_or(0.0)
}
