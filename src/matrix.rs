use std::ops::Mul;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::expr::number_or_zero;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// Entry-wise tolerance of [`Matrix::approx_eq`]; only absorbs round-off.
pub const MATRIX_TOLERANCE: f64 = 3e-16;

/// A 2×2 complex matrix, row major.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Matrix {
    pub a11: Complex64,
    pub a12: Complex64,
    pub a21: Complex64,
    pub a22: Complex64,
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix::new(ZERO, ZERO, ZERO, ZERO)
    }
}

impl Matrix {
    pub const fn new(a11: Complex64, a12: Complex64, a21: Complex64, a22: Complex64) -> Self {
        Matrix { a11, a12, a21, a22 }
    }

    pub const fn identity() -> Self {
        Matrix::new(ONE, ZERO, ZERO, ONE)
    }

    pub fn from_real(rows: [[f64; 2]; 2]) -> Self {
        Matrix::new(
            rows[0][0].into(),
            rows[0][1].into(),
            rows[1][0].into(),
            rows[1][1].into(),
        )
    }

    fn entries(&self) -> [Complex64; 4] {
        [self.a11, self.a12, self.a21, self.a22]
    }

    /// Conjugate transpose.
    pub fn dagger(&self) -> Matrix {
        Matrix::new(
            self.a11.conj(),
            self.a21.conj(),
            self.a12.conj(),
            self.a22.conj(),
        )
    }

    pub fn determinant(&self) -> Complex64 {
        self.a11 * self.a22 - self.a12 * self.a21
    }

    pub fn scale(&self, factor: Complex64) -> Matrix {
        Matrix::new(
            self.a11 * factor,
            self.a12 * factor,
            self.a21 * factor,
            self.a22 * factor,
        )
    }

    /// Equality up to [`MATRIX_TOLERANCE`] on every entry.
    pub fn approx_eq(&self, other: &Matrix) -> bool {
        self.entries()
            .iter()
            .zip(other.entries())
            .all(|(l, r)| (l - r).norm() <= MATRIX_TOLERANCE)
    }

    pub fn is_identity(&self) -> bool {
        self.approx_eq(&Matrix::identity())
    }

    /// Whether `M†M` is the identity.
    pub fn is_unitary(&self) -> bool {
        (self.dagger() * *self).is_identity()
    }
}

impl Mul<Matrix> for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Matrix) -> Self::Output {
        Matrix::new(
            self.a11 * rhs.a11 + self.a12 * rhs.a21,
            self.a11 * rhs.a12 + self.a12 * rhs.a22,
            self.a21 * rhs.a11 + self.a22 * rhs.a21,
            self.a21 * rhs.a12 + self.a22 * rhs.a22,
        )
    }
}

/// One matrix entry as typed by the user.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Entry {
    pub real: String,
    pub imaginary: String,
}

impl Entry {
    pub fn new(real: &str, imaginary: &str) -> Self {
        Entry {
            real: real.to_string(),
            imaginary: imaginary.to_string(),
        }
    }

    pub fn real(real: &str) -> Self {
        Entry::new(real, "")
    }

    /// Parts that fail to evaluate count as zero.
    pub fn value(&self) -> Complex64 {
        Complex64::new(number_or_zero(&self.real), number_or_zero(&self.imaginary))
    }
}

/// The four entries of a gate, kept as text so symbolic input survives.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StringsMatrix {
    pub a11: Entry,
    pub a12: Entry,
    pub a21: Entry,
    pub a22: Entry,
}

impl StringsMatrix {
    pub fn from_real(rows: [[&str; 2]; 2]) -> Self {
        StringsMatrix {
            a11: Entry::real(rows[0][0]),
            a12: Entry::real(rows[0][1]),
            a21: Entry::real(rows[1][0]),
            a22: Entry::real(rows[1][1]),
        }
    }

    pub fn numeric_matrix(&self, scalar: f64) -> Matrix {
        Matrix::new(
            self.a11.value(),
            self.a12.value(),
            self.a21.value(),
            self.a22.value(),
        )
        .scale(scalar.into())
    }
}
