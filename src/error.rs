//! Error types for the simulation pipeline.
//!
//! Every failure is fatal to the current run and names the stage and key
//! that triggered it. Nothing is retried or silently defaulted.

use thiserror::Error;

/// Errors raised while building operators, enumerating configurations,
/// constructing the probability tree, or sampling from it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// The qubit count falls outside the enumerated range.
    #[error("unsupported qubit count {qubits}: branch enumeration covers 3..=8 qubits")]
    UnsupportedSize { qubits: usize },

    /// A sampled tree path reached a node with no recorded probability.
    /// The configuration set and the probability tree were built for
    /// different codes or qubit counts.
    #[error("no recorded probability for tree node {key}: configuration set and probability tree are inconsistent")]
    MissingNode { key: u32 },

    /// A projected branch pair failed its trace checks (non-real trace,
    /// negative probability, or a vanishing pair sum).
    #[error("normalization failure during {stage} at tree node {key}: offending value {value}")]
    Normalization {
        stage: &'static str,
        key: u32,
        value: f64,
    },

    /// A stabilizer generator's length disagrees with the logical observable.
    #[error("stabilizer generator {index} has {found} labels, expected {expected}")]
    LengthMismatch {
        index: usize,
        found: usize,
        expected: usize,
    },

    /// A Pauli string contained a character outside {I, X, Y, Z}.
    #[error("unrecognized Pauli label '{label}' at qubit {position}")]
    UnknownLabel { label: char, position: usize },

    /// The logical observable string was empty.
    #[error("logical observable string is empty")]
    EmptyLogical,
}
