//! Math engine behind a single-qubit Bloch sphere viewer.
//!
//! Text typed by the user is parsed once into an [`expr::Expr`] and then either
//! evaluated to a number or rendered to LaTeX. Numbers feed 2×2 complex gate
//! matrices, which are checked for unitarity and decomposed into Z, Y and X
//! rotations, and qubit amplitudes, which map to a direction on the sphere.

pub mod error;
pub mod expr;
pub mod function;
pub mod ket;
pub mod latex;
pub mod lexer;
pub mod matrix;
pub mod parser;
pub mod unitary;
pub mod workspace;

pub use error::{EvalError, SyntaxError, ValidationError};
pub use expr::{evaluate, number_evaluation, Expr};
pub use ket::{Basis, Ket, Qubit, Vector3};
pub use latex::{render, to_latex};
pub use matrix::{Entry, Matrix, StringsMatrix};
pub use parser::parse;
pub use unitary::{decompose, Axis, Gate, GateStep};
pub use workspace::{apply_gates, Sequence, Workspace};
