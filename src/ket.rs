use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::{error::ValidationError, expr::number_or_zero, latex::to_latex};

pub type Vector3 = [f64; 3];

const NORM_LOWER: f64 = 1.0 - 2e-16;
const NORM_UPPER: f64 = 1.0 + 2e-16;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Basis {
    #[default]
    Computational,
    Hadamard,
    PauliY,
}

impl Basis {
    pub fn name(self) -> &'static str {
        match self {
            Basis::Computational => "Computational",
            Basis::Hadamard => "Hadamard",
            Basis::PauliY => "Pauli Y",
        }
    }

    /// LaTeX kets of the two basis states, first then second.
    pub fn states(self) -> (&'static str, &'static str) {
        match self {
            Basis::Computational => ("|0\\rangle", "|1\\rangle"),
            Basis::Hadamard => ("|+\\rangle", "|-\\rangle"),
            Basis::PauliY => ("|i\\rangle", "|-i\\rangle"),
        }
    }

    /// Orients a raw Bloch vector so the basis' first state sits on the
    /// matching pole of the rendered sphere.
    pub fn world_direction(self, [x, y, z]: Vector3) -> Vector3 {
        match self {
            Basis::Computational => [x, z, y],
            Basis::Hadamard => [z, x, -y],
            Basis::PauliY => [y, -x, z],
        }
    }
}

/// Numeric amplitudes of the first (`zero`) and second (`one`) basis state.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Ket {
    pub zero: Complex64,
    pub one: Complex64,
}

impl Ket {
    /// `sqrt(|zero|² + |one|²)`
    pub fn magnitude(&self) -> f64 {
        (self.zero.norm_sqr() + self.one.norm_sqr()).sqrt()
    }

    pub fn is_normalized(&self) -> bool {
        (NORM_LOWER..=NORM_UPPER).contains(&self.magnitude())
    }

    /// Bloch vector in the basis' own frame; assumes the ket is normalized.
    pub fn bloch(&self) -> Vector3 {
        let overlap = self.zero.conj() * self.one;
        [
            2.0 * overlap.re,
            2.0 * overlap.im,
            self.zero.norm_sqr() - self.one.norm_sqr(),
        ]
    }
}

/// A qubit as entered: each amplitude part is kept as expression text.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Qubit {
    pub basis: Basis,
    pub alpha_real: Option<String>,
    pub alpha_imaginary: Option<String>,
    pub beta_real: Option<String>,
    pub beta_imaginary: Option<String>,
}

fn part(text: &Option<String>) -> f64 {
    text.as_deref().map_or(0.0, number_or_zero)
}

fn latex_part(text: &Option<String>, imaginary: bool) -> String {
    let latex = to_latex(text.as_deref().unwrap_or_default());
    if imaginary && !latex.is_empty() {
        format!("+({latex})i")
    } else {
        latex
    }
}

impl Qubit {
    pub fn new(basis: Basis, alpha_real: &str, beta_real: &str) -> Self {
        Qubit {
            basis,
            alpha_real: Some(alpha_real.to_string()),
            beta_real: Some(beta_real.to_string()),
            ..Default::default()
        }
    }

    pub fn alpha(&self) -> Complex64 {
        Complex64::new(part(&self.alpha_real), part(&self.alpha_imaginary))
    }

    pub fn beta(&self) -> Complex64 {
        Complex64::new(part(&self.beta_real), part(&self.beta_imaginary))
    }

    pub fn ket(&self) -> Ket {
        Ket {
            zero: self.alpha(),
            one: self.beta(),
        }
    }

    pub fn is_normalized(&self) -> bool {
        self.ket().is_normalized()
    }

    /// Checks normalization; never rescales the amplitudes.
    pub fn validate(&self) -> Result<Ket, ValidationError> {
        let ket = self.ket();
        if ket.is_normalized() {
            Ok(ket)
        } else {
            let magnitude = ket.magnitude();
            tracing::warn!("qubit is not normalized, magnitude {magnitude}");
            Err(ValidationError::NotNormalized { magnitude })
        }
    }

    /// Direction of the state on the rendered sphere.
    pub fn bloch_vector(&self) -> Result<Vector3, ValidationError> {
        let ket = self.validate()?;
        Ok(self.basis.world_direction(ket.bloch()))
    }

    /// `|\psi\rangle = ...` in LaTeX, parts that do not parse are left out.
    pub fn state_equation(&self) -> String {
        let (first, second) = self.basis.states();
        format!(
            "|\\psi\\rangle = {} {} {first} + {} {} {second}",
            latex_part(&self.alpha_real, false),
            latex_part(&self.alpha_imaginary, true),
            latex_part(&self.beta_real, false),
            latex_part(&self.beta_imaginary, true),
        )
    }
}

#[cfg(test)]
mod test {
    use test_case::test_case;

    use super::*;

    fn test_frame_vector(qubit: Qubit, correct: Vector3) {
        let vector = qubit.bloch_vector().unwrap();
        for (got, want) in vector.iter().zip(correct) {
            assert!((got - want).abs() < 1e-12, "{vector:?} != {correct:?}");
        }
    }

    #[test_case("1/sqrt(2)", "1/sqrt(2)", true; "equal superposition")]
    #[test_case("1", "0", true; "first state")]
    #[test_case("0", "-1", true; "second state")]
    #[test_case("1", "1", false; "unnormalized")]
    #[test_case("0.6", "0.8", true; "three four five")]
    #[test_case("", "", false; "empty")]
    fn if_ket_is_normalized(alpha: &str, beta: &str, correct: bool) {
        assert_eq!(
            Qubit::new(Basis::Computational, alpha, beta).is_normalized(),
            correct
        );
    }

    #[test]
    fn if_ket_is_not_renormalized() {
        let qubit = Qubit::new(Basis::Hadamard, "1", "1");
        match qubit.validate() {
            Err(ValidationError::NotNormalized { magnitude }) => {
                assert!((magnitude - 2f64.sqrt()).abs() < 1e-12)
            }
            other => panic!("expected a normalization failure, got {other:?}"),
        }
        assert!(qubit.bloch_vector().is_err());
        assert_eq!(qubit.alpha(), Complex64::new(1.0, 0.0));
    }

    #[test]
    fn imaginary_parts() {
        let qubit = Qubit {
            basis: Basis::Computational,
            alpha_real: Some("1/sqrt(2)".to_string()),
            beta_imaginary: Some("1/sqrt(2)".to_string()),
            ..Default::default()
        };
        assert!(qubit.is_normalized());
        test_frame_vector(qubit, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn computational_zero_points_up() {
        test_frame_vector(Qubit::new(Basis::Computational, "1", "0"), [0.0, 1.0, 0.0]);
    }

    #[test]
    fn first_state_is_the_same_pole_in_every_basis() {
        test_frame_vector(Qubit::new(Basis::Hadamard, "1", "0"), [1.0, 0.0, 0.0]);
        test_frame_vector(Qubit::new(Basis::PauliY, "1", "0"), [0.0, 0.0, 1.0]);
    }

    #[test_case(Basis::Computational, [1.0, 3.0, 2.0]; "computational")]
    #[test_case(Basis::Hadamard, [3.0, 1.0, -2.0]; "hadamard")]
    #[test_case(Basis::PauliY, [2.0, -1.0, 3.0]; "pauli y")]
    fn world_direction(basis: Basis, correct: Vector3) {
        assert_eq!(basis.world_direction([1.0, 2.0, 3.0]), correct);
    }

    #[test]
    fn raw_bloch_vector() {
        let ket = Ket {
            zero: Complex64::new(0.6, 0.0),
            one: Complex64::new(0.0, 0.8),
        };
        let [x, y, z] = ket.bloch();
        assert!(x.abs() < 1e-12);
        assert!((y - 0.96).abs() < 1e-12);
        assert!((z - (0.36 - 0.64)).abs() < 1e-12);
    }

    #[test]
    fn state_equation() {
        let qubit = Qubit {
            basis: Basis::Hadamard,
            alpha_real: Some("1/sqrt(2)".to_string()),
            alpha_imaginary: None,
            beta_real: Some("".to_string()),
            beta_imaginary: Some("1.0/sqrt(2.0)".to_string()),
        };
        assert_eq!(
            qubit.state_equation(),
            "|\\psi\\rangle = \\frac{1}{\\sqrt{2}}  |+\\rangle +  +(\\frac{1}{\\sqrt{2}})i |-\\rangle"
        );
    }

    #[test]
    fn basis_labels() {
        assert_eq!(Basis::PauliY.name(), "Pauli Y");
        assert_eq!(Basis::PauliY.states(), ("|i\\rangle", "|-i\\rangle"));
        assert_eq!(Basis::default(), Basis::Computational);
    }
}
