use std::{
    fs,
    io::{stdin, Read},
    path::PathBuf,
};

use anyhow::{Context, Result};
use bloch::{
    ket::{Basis, Qubit, Vector3},
    latex::to_latex,
    unitary::{Gate, GateStep, STEP_SECONDS},
    workspace::{Sequence, Workspace},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "bloch")]
#[command(about = "Evaluates qubit states and decomposes gates into Bloch sphere rotations")]
struct Args {
    /// TOML document with a qubit, gates and sequences (stdin when absent)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Leave zero-turn steps out of the printed step lists
    #[arg(long, default_value_t = false)]
    skip_noops: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Document {
    qubit: Qubit,
    gates: Vec<Gate>,
    sequences: Vec<Sequence>,
}

#[derive(Serialize)]
struct QubitReport {
    basis: Basis,
    magnitude: f64,
    normalized: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    bloch_vector: Option<Vector3>,
    state_equation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct StepsReport {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    scalar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    /// Playback time of the listed steps.
    seconds: f64,
    steps: Vec<GateStep>,
}

#[derive(Serialize)]
struct Report {
    qubit: QubitReport,
    gates: Vec<StepsReport>,
    sequences: Vec<StepsReport>,
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading input {}", path.display())),
        None => {
            let mut file = String::new();
            let len = stdin()
                .lock()
                .read_to_string(&mut file)
                .context("reading stdin")?;
            tracing::debug!("read input with length {len}");
            Ok(file)
        }
    }
}

fn qubit_report(qubit: &Qubit) -> QubitReport {
    let ket = qubit.ket();
    let (bloch_vector, error) = match qubit.bloch_vector() {
        Ok(vector) => (Some(vector), None),
        Err(err) => (None, Some(err.to_string())),
    };
    QubitReport {
        basis: qubit.basis,
        magnitude: ket.magnitude(),
        normalized: ket.is_normalized(),
        bloch_vector,
        state_equation: qubit.state_equation(),
        error,
    }
}

fn steps_report(
    name: &str,
    scalar: Option<String>,
    steps: Result<Vec<GateStep>, bloch::ValidationError>,
    skip_noops: bool,
) -> StepsReport {
    let (steps, error) = match steps {
        Ok(steps) => (steps, None),
        Err(err) => (Vec::new(), Some(err.to_string())),
    };
    let steps: Vec<_> = steps
        .into_iter()
        .filter(|step| !(skip_noops && step.is_noop()))
        .collect();
    StepsReport {
        name: name.to_string(),
        scalar,
        error,
        seconds: steps.len() as f64 * STEP_SECONDS,
        steps,
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bloch=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let input = read_input(args.input.as_ref())?;
    let document: Document = toml::from_str(&input).context("parsing input document")?;

    let mut workspace = Workspace::new(document.qubit);
    let mut gates = Vec::with_capacity(document.gates.len());
    for gate in document.gates {
        let scalar = Some(to_latex(&gate.scalar));
        let saved = workspace.insert_gate(gate.clone());
        let steps = saved.and_then(|()| gate.steps().map(Vec::from));
        gates.push(steps_report(&gate.name, scalar, steps, args.skip_noops));
    }

    let mut sequences = Vec::with_capacity(document.sequences.len());
    for sequence in document.sequences {
        let name = sequence.name.clone();
        let steps = workspace
            .insert_sequence(sequence)
            .and_then(|()| workspace.apply_sequence(&name));
        sequences.push(steps_report(&name, None, steps, args.skip_noops));
    }

    let report = Report {
        qubit: qubit_report(&workspace.qubit),
        gates,
        sequences,
    };
    print!("{}", toml::to_string(&report).context("writing report")?);
    Ok(())
}

#[cfg(test)]
mod test {
    use bloch::{matrix::Entry, unitary::Axis};

    use super::*;

    fn test_frame_document(input: &str) -> Document {
        toml::from_str(input).unwrap()
    }

    #[test]
    fn document_defaults() {
        let document = test_frame_document(
            r#"
            [[gates]]
            name = "X"
            a12 = { real = "1" }
            a21 = { real = "1" }
            "#,
        );
        let gate = &document.gates[0];
        assert_eq!(gate.scalar, "1");
        assert_eq!(gate.matrix.a11, Entry::default());
        assert_eq!(gate.matrix.a12, Entry::real("1"));
        assert_eq!(document.qubit, Qubit::default());
        assert!(document.sequences.is_empty());
    }

    #[test]
    fn document_qubit() {
        let document = test_frame_document(
            r#"
            [qubit]
            basis = "pauliY"
            alpha_real = "1"
            "#,
        );
        assert_eq!(document.qubit.basis, Basis::PauliY);
        assert_eq!(document.qubit.beta_real, None);
        let report = qubit_report(&document.qubit);
        assert!(report.normalized);
        assert_eq!(report.bloch_vector, Some([0.0, 0.0, 1.0]));
        assert!(report.error.is_none());
    }

    #[test]
    fn unnormalized_qubit_reports_its_error() {
        let document = test_frame_document(
            r#"
            [qubit]
            alpha_real = "1"
            beta_real = "1"
            "#,
        );
        let report = qubit_report(&document.qubit);
        assert!(!report.normalized);
        assert_eq!(report.bloch_vector, None);
        let error = report.error.unwrap();
        assert!(error.starts_with("qubit state must be normalized"), "{error}");
        assert!(error.contains("magnitude 1.414"), "{error}");
    }

    #[test]
    fn skipping_noops() {
        let gate = Gate::new(
            "X",
            "1",
            bloch::StringsMatrix::from_real([["0", "1"], ["1", "0"]]),
        );
        let steps = gate.steps().map(Vec::from);
        let report = steps_report("X", None, steps, true);
        assert!(report.error.is_none());
        assert_eq!(report.steps.len(), 1);
        assert_eq!(report.steps[0].axis, Axis::X);
        assert_eq!(report.seconds, STEP_SECONDS);
    }

    #[test]
    fn invalid_gates_report_their_error() {
        let err = Err(bloch::ValidationError::NotUnitary {
            gate: "S".to_string(),
        });
        let report = steps_report("S", Some("1".to_string()), err, false);
        assert_eq!(report.error.as_deref(), Some("gate `S` is not unitary"));
        assert!(report.steps.is_empty());
        assert_eq!(report.seconds, 0.0);
    }
}
