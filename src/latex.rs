//! LaTeX rendering of parsed expressions.
//!
//! Works on the same [`Expr`] tree the evaluator uses. Rendering is total: every
//! tree has a LaTeX form, so all failures happen while parsing.

use crate::{error::SyntaxError, expr::Expr, parser::parse};

const PI_NAMES: [&str; 4] = ["pi", "Double.pi", "Float.pi", "CGFloat.pi"];

/// What the node being rendered sits directly beneath.
#[derive(Debug, PartialEq, Clone, Copy)]
enum Parent {
    Atom,
    Sum,
    Product,
    Power,
    Unary,
}

fn wrap(s: String) -> String {
    format!("\\left({s}\\right)")
}

fn escape(name: &str) -> String {
    name.replace('_', "\\_")
}

fn render_ident(name: &str) -> String {
    if PI_NAMES.contains(&name) {
        return "\\pi".to_string();
    }
    escape(name)
}

// sums and products group themselves when they need to
fn groups_itself(expr: &Expr, parent: Parent) -> bool {
    match expr {
        Expr::Add(..) | Expr::Sub(..) => {
            matches!(parent, Parent::Product | Parent::Power | Parent::Unary)
        }
        Expr::Mul(..) => parent == Parent::Power,
        _ => false,
    }
}

fn render_call(name: &str, arg: &Expr) -> String {
    let a = render_in(arg, Parent::Atom);
    match name {
        "sqrt" => format!("\\sqrt{{{a}}}"),
        "sin" | "cos" | "tan" => format!("\\{name}{{{a}}}"),
        "log" | "ln" => format!("\\ln{{{a}}}"),
        "exp" => match arg {
            Expr::Number(literal) if literal.is_one() => "e".to_string(),
            _ => format!("e^{{{a}}}"),
        },
        _ => format!("\\mathrm{{{}}}\\left({a}\\right)", escape(name)),
    }
}

fn render_in(expr: &Expr, parent: Parent) -> String {
    match expr {
        Expr::Number(literal) => match literal.text.strip_suffix(".0") {
            Some("") => "0".to_string(),
            Some(whole) => whole.to_string(),
            None => literal.text.clone(),
        },
        Expr::Ident(name) => render_ident(name),
        Expr::Negate(operand) => {
            let inner = render_in(operand, Parent::Unary);
            if operand.is_atomic() || groups_itself(operand, Parent::Unary) {
                format!("-{inner}")
            } else {
                format!("-{}", wrap(inner))
            }
        }
        Expr::Add(l, r) | Expr::Sub(l, r) => {
            let op = if matches!(expr, Expr::Add(..)) { "+" } else { "-" };
            let s = format!(
                "{} {op} {}",
                render_in(l, Parent::Sum),
                render_in(r, Parent::Sum)
            );
            if groups_itself(expr, parent) {
                wrap(s)
            } else {
                s
            }
        }
        Expr::Mul(l, r) => {
            let s = format!(
                "{} \\cdot {}",
                render_in(l, Parent::Product),
                render_in(r, Parent::Product)
            );
            if groups_itself(expr, parent) {
                wrap(s)
            } else {
                s
            }
        }
        Expr::Div(numerator, denominator) => format!(
            "\\frac{{{}}}{{{}}}",
            render_in(numerator, Parent::Atom),
            render_in(denominator, Parent::Atom)
        ),
        Expr::Pow(base, exponent) => {
            let b = render_in(base, Parent::Power);
            let b = if base.is_atomic() || groups_itself(base, Parent::Power) {
                b
            } else {
                format!("{{{b}}}")
            };
            format!("{b}^{{{}}}", render_in(exponent, Parent::Power))
        }
        Expr::Call(name, arg) => render_call(name, arg),
    }
}

pub fn render(expr: &Expr) -> String {
    render_in(expr, Parent::Atom)
}

pub fn try_to_latex(input: &str) -> Result<String, SyntaxError> {
    Ok(render(&parse(input)?))
}

/// LaTeX for `input`, or an empty string when it does not parse.
pub fn to_latex(input: &str) -> String {
    try_to_latex(input).unwrap_or_else(|err| {
        tracing::debug!("no LaTeX for {input:?}: {err}");
        String::new()
    })
}
