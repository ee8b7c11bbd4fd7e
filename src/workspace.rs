use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    error::ValidationError,
    ket::Qubit,
    unitary::{Gate, GateStep},
};

type Ident = String;

/// A named, ordered list of gates, referenced by name.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Sequence {
    pub name: Ident,
    pub gates: Vec<Ident>,
}

impl Sequence {
    pub fn new(name: &str, gates: &[&str]) -> Self {
        Sequence {
            name: name.to_string(),
            gates: gates.iter().map(|gate| gate.to_string()).collect(),
        }
    }
}

/// Everything a user has entered, keyed by unique name.
///
/// Gates are only admitted once they pass the unitarity check, and sequences
/// only when every gate they name is already stored.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Workspace {
    pub qubit: Qubit,
    gates: HashMap<Ident, Gate>,
    sequences: HashMap<Ident, Sequence>,
}

impl Workspace {
    pub fn new(qubit: Qubit) -> Self {
        Workspace {
            qubit,
            ..Default::default()
        }
    }

    pub fn gate(&self, name: &str) -> Option<&Gate> {
        self.gates.get(name)
    }

    pub fn sequence(&self, name: &str) -> Option<&Sequence> {
        self.sequences.get(name)
    }

    /// Gate names in alphabetical order.
    pub fn gate_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.gates.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn sequence_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.sequences.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn insert_gate(&mut self, gate: Gate) -> Result<(), ValidationError> {
        if gate.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.gates.contains_key(&gate.name) {
            return Err(ValidationError::DuplicateGate(gate.name));
        }
        gate.validate()?;
        tracing::debug!("saved gate `{}`", gate.name);
        self.gates.insert(gate.name.clone(), gate);
        Ok(())
    }

    pub fn insert_sequence(&mut self, sequence: Sequence) -> Result<(), ValidationError> {
        if sequence.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.sequences.contains_key(&sequence.name) {
            return Err(ValidationError::DuplicateSequence(sequence.name));
        }
        if let Some(missing) = sequence.gates.iter().find(|g| !self.gates.contains_key(*g)) {
            tracing::warn!("sequence `{}` names unknown gate `{missing}`", sequence.name);
            return Err(ValidationError::UnknownGate {
                sequence: sequence.name.clone(),
                gate: missing.clone(),
            });
        }
        tracing::debug!("saved sequence `{}`", sequence.name);
        self.sequences.insert(sequence.name.clone(), sequence);
        Ok(())
    }

    pub fn remove_gate(&mut self, name: &str) -> Option<Gate> {
        self.gates.remove(name)
    }

    pub fn apply_sequence(&self, name: &str) -> Result<Vec<GateStep>, ValidationError> {
        let sequence = self
            .sequences
            .get(name)
            .ok_or_else(|| ValidationError::UnknownSequence(name.to_string()))?;
        let gates = sequence
            .gates
            .iter()
            .map(|gate| {
                self.gates
                    .get(gate)
                    .cloned()
                    .ok_or_else(|| ValidationError::UnknownGate {
                        sequence: name.to_string(),
                        gate: gate.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        apply_gates(&gates)
    }
}

/// Steps of every gate in `gates`, concatenated in order.
///
/// Each gate is re-validated, since its entries are evaluated afresh.
pub fn apply_gates(gates: &[Gate]) -> Result<Vec<GateStep>, ValidationError> {
    let mut steps = Vec::with_capacity(gates.len() * 3);
    for gate in gates {
        steps.extend(gate.steps()?);
    }
    Ok(steps)
}
