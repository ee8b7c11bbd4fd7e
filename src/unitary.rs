//! Gates and their decomposition into single-axis rotations.
//!
//! A unitary `U` is first stripped of its global phase by dividing through
//! by the principal square root of `det(U)`, leaving a representative with
//! unit determinant. Rotation angles about Z, Y and X are then read off its
//! entries and emitted as [`GateStep`]s, in that order, for playback.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::{
    error::ValidationError,
    expr::number_or_zero,
    ket::Vector3,
    matrix::{Matrix, StringsMatrix},
};

/// Seconds a single step takes to play back.
pub const STEP_SECONDS: f64 = 1.0;

fn one() -> String {
    "1".to_string()
}

/// A user-defined gate: a scalar times four complex entries, all kept as text.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Gate {
    pub name: String,
    #[serde(default = "one")]
    pub scalar: String,
    #[serde(flatten)]
    pub matrix: StringsMatrix,
}

impl Gate {
    pub fn new(name: &str, scalar: &str, matrix: StringsMatrix) -> Self {
        Gate {
            name: name.to_string(),
            scalar: scalar.to_string(),
            matrix,
        }
    }

    /// `scalar × entries`, evaluated afresh on every call.
    pub fn numeric_matrix(&self) -> Matrix {
        self.matrix.numeric_matrix(number_or_zero(&self.scalar))
    }

    pub fn is_unitary(&self) -> bool {
        self.numeric_matrix().is_unitary()
    }

    pub fn validate(&self) -> Result<Matrix, ValidationError> {
        let matrix = self.numeric_matrix();
        if matrix.is_unitary() {
            Ok(matrix)
        } else {
            tracing::warn!("gate `{}` is not unitary: {matrix:?}", self.name);
            Err(ValidationError::NotUnitary {
                gate: self.name.clone(),
            })
        }
    }

    /// Validates the gate and decomposes it.
    pub fn steps(&self) -> Result<[GateStep; 3], ValidationError> {
        Ok(decompose(&self.name, &self.validate()?))
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Rotation axis in the scene frame. Y is the depth direction and Z the
    /// vertical one.
    pub fn world_vector(self) -> Vector3 {
        match self {
            Axis::X => [1.0, 0.0, 0.0],
            Axis::Y => [0.0, 0.0, 1.0],
            Axis::Z => [0.0, 1.0, 0.0],
        }
    }
}

/// One rotation to animate, measured in full turns.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct GateStep {
    pub name: String,
    pub axis: Axis,
    pub revolutions: f64,
    pub axis_vector: Vector3,
}

impl GateStep {
    fn new(name: &str, axis: Axis, revolutions: f64) -> Self {
        GateStep {
            name: name.to_string(),
            axis,
            revolutions,
            axis_vector: axis.world_vector(),
        }
    }

    /// Zero-turn steps are still emitted; players skip them.
    pub fn is_noop(&self) -> bool {
        self.revolutions == 0.0
    }
}

/// Rotation angles in radians, before conversion to turns.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Angles {
    pub z: f64,
    pub y: f64,
    pub x: f64,
}

/// Angles of `u`, which must already be unitary.
///
/// The global phase is removed with the principal square root of the
/// determinant (`Complex64::sqrt`, branch cut on the negative real axis,
/// `-r + 0i` maps to `+i√r`).
pub fn angles(u: &Matrix) -> Angles {
    let s = u.determinant().sqrt();
    let (a, b, c, d) = (u.a11 / s, u.a12 / s, u.a21 / s, u.a22 / s);

    let ac_bd = a * c.conj() - b * d.conj();
    let y = ac_bd.re.clamp(-1.0, 1.0).asin();
    let x = ac_bd
        .im
        .atan2(a.norm_sqr() - b.norm_sqr() - c.norm_sqr() + d.norm_sqr());
    let z = (-(a * d.conj() - b * c.conj()).im).atan2((a * d.conj() + b * c.conj()).re);

    tracing::debug!("angles z={z} y={y} x={x} for {u:?}");
    Angles { z, y, x }
}

/// Steps for `u` in playback order: Z, then Y, then X.
pub fn decompose(name: &str, u: &Matrix) -> [GateStep; 3] {
    let Angles { z, y, x } = angles(u);
    [
        GateStep::new(name, Axis::Z, z / TAU),
        // turns about Y run opposite to the mathematical angle on screen
        GateStep::new(name, Axis::Y, -y / TAU),
        GateStep::new(name, Axis::X, x / TAU),
    ]
}
