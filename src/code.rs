//! Stabilizer codes and the per-qubit measurement basis they induce.
//!
//! A code is an ordered set of stabilizer generators plus one logical
//! observable, all Pauli strings of equal length. Qubit 0 is the input/logical
//! qubit; qubits 1.. are the photons. Measuring every photon in the basis a
//! stabilizer acts with on it lets each stabilizer value be reconstructed as a
//! product of single-qubit outcomes.

use crate::error::SimError;

/// Single-qubit Pauli label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pauli {
    I,
    X,
    Y,
    Z,
}

impl Pauli {
    /// Parse one character of a Pauli string.
    pub fn from_label(label: char, position: usize) -> Result<Self, SimError> {
        match label {
            'I' => Ok(Pauli::I),
            'X' => Ok(Pauli::X),
            'Y' => Ok(Pauli::Y),
            'Z' => Ok(Pauli::Z),
            other => Err(SimError::UnknownLabel {
                label: other,
                position,
            }),
        }
    }
}

/// Per-qubit measurement basis labels, one per qubit.
pub type BasisAssignment = Vec<Pauli>;

/// A stabilizer code: generators plus one logical observable.
#[derive(Debug, Clone)]
pub struct StabilizerCode {
    generators: Vec<Vec<Pauli>>,
    logical: Vec<Pauli>,
}

fn parse_pauli_string(s: &str) -> Result<Vec<Pauli>, SimError> {
    s.chars()
        .enumerate()
        .map(|(position, label)| Pauli::from_label(label, position))
        .collect()
}

impl StabilizerCode {
    /// Build a code from generator strings and a logical-observable string.
    ///
    /// All strings must have equal length over the alphabet {I, X, Y, Z}.
    pub fn new(generators: &[&str], logical: &str) -> Result<Self, SimError> {
        let logical = parse_pauli_string(logical)?;
        if logical.is_empty() {
            return Err(SimError::EmptyLogical);
        }
        let expected = logical.len();
        let mut parsed = Vec::with_capacity(generators.len());
        for (index, generator) in generators.iter().enumerate() {
            let paulis = parse_pauli_string(generator)?;
            if paulis.len() != expected {
                return Err(SimError::LengthMismatch {
                    index,
                    found: paulis.len(),
                    expected,
                });
            }
            parsed.push(paulis);
        }
        Ok(Self {
            generators: parsed,
            logical,
        })
    }

    /// Total qubit count, including the input qubit at index 0.
    pub fn num_qubits(&self) -> usize {
        self.logical.len()
    }

    /// The stabilizer generators.
    pub fn generators(&self) -> &[Vec<Pauli>] {
        &self.generators
    }

    /// The logical observable.
    pub fn logical(&self) -> &[Pauli] {
        &self.logical
    }

    /// Derive the measurement basis for each qubit.
    ///
    /// Position 0 always takes the logical observable's basis. Every other
    /// position takes the first non-identity label found across the generator
    /// set at that position, defaulting to I when no generator acts there.
    pub fn basis_assignment(&self) -> BasisAssignment {
        let mut basis = vec![Pauli::I; self.num_qubits()];
        basis[0] = self.logical[0];
        for generator in &self.generators {
            for (position, &label) in generator.iter().enumerate().skip(1) {
                if basis[position] == Pauli::I && label != Pauli::I {
                    basis[position] = label;
                }
            }
        }
        basis
    }
}
