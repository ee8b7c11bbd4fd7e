use thiserror::Error;

use crate::lexer::Token;

/// Failure to turn text into an expression tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyntaxError {
    // expected {token}, got {token} (in that order)
    #[error("expected {expected}, found {found}")]
    Unexpected { expected: Token, found: Token },
    #[error("unexpected {0}")]
    Unknown(Token),
    #[error("input ended in the middle of an expression")]
    StreamEnded,
    #[error("trailing {0} after a complete expression")]
    Trailing(Token),
    #[error("malformed number literal {0:?}")]
    MalformedNumber(String),
    #[error("expression nested deeper than {0} levels")]
    TooDeep(usize),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error("unknown constant `{0}`")]
    UnknownConstant(String),
    #[error("unknown function `{0}`")]
    UnknownFunction(String),
}

/// A state or gate that may not be applied or saved.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("qubit state must be normalized (|alpha|^2 + |beta|^2 has magnitude {magnitude})")]
    NotNormalized { magnitude: f64 },
    #[error("gate `{gate}` is not unitary")]
    NotUnitary { gate: String },
    #[error("a gate named `{0}` already exists")]
    DuplicateGate(String),
    #[error("a sequence named `{0}` already exists")]
    DuplicateSequence(String),
    #[error("sequence `{sequence}` refers to unknown gate `{gate}`")]
    UnknownGate { sequence: String, gate: String },
    #[error("no sequence named `{0}`")]
    UnknownSequence(String),
    #[error("names may not be empty")]
    EmptyName,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn syntax_error_message() {
        let err = SyntaxError::Unexpected {
            expected: Token::CloseParen,
            found: Token::Eof,
        };
        assert_eq!(err.to_string(), "expected `)`, found end of input");
    }

    #[test]
    fn eval_error_wraps_syntax() {
        let err: EvalError = SyntaxError::StreamEnded.into();
        assert_eq!(
            err.to_string(),
            "input ended in the middle of an expression"
        );
    }
}
