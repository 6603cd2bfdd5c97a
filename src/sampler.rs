//! Monte Carlo sampling of outcome sequences and syndrome decoding.
//!
//! A sample walks the probability tree from the root: at each measured qubit
//! one uniform draw picks the up or down branch, yielding a ±1 observable per
//! qubit (qubit 0 is the fixed +1 reference from the input collapse). Each
//! stabilizer's measured value is the product of observables at its
//! non-identity positions, mirroring how a stabilizer measurement is read off
//! individually measured qubits; the logical value is the same product over
//! the logical observable.

use std::collections::HashMap;

use rand::Rng;
use smallvec::{smallvec, SmallVec};

use crate::code::{Pauli, StabilizerCode};
use crate::error::SimError;
use crate::interfaces::{CountedSamples, GraphTag, LossAwareCounter};
use crate::tree::{ProbabilityTree, ROOT_KEY};

/// One decoded Monte Carlo sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleOutcome {
    /// Measured logical value, +1 or -1.
    pub logical: i8,
    /// Measured stabilizer values, one ±1 per generator.
    pub syndrome: SmallVec<[i8; 8]>,
}

fn parity(paulis: &[Pauli], observables: &[i8]) -> i8 {
    paulis
        .iter()
        .zip(observables)
        .filter(|(label, _)| **label != Pauli::I)
        .map(|(_, value)| *value)
        .product()
}

/// Draw one outcome sequence and decode its syndrome and logical value.
pub fn sample_outcome<R: Rng>(
    tree: &ProbabilityTree,
    code: &StabilizerCode,
    rng: &mut R,
) -> Result<SampleOutcome, SimError> {
    assert_eq!(
        code.num_qubits(),
        tree.depth() + 1,
        "code and probability tree disagree on qubit count"
    );
    let num_qubits = code.num_qubits();
    let mut observables: SmallVec<[i8; 8]> = smallvec![1; num_qubits];
    let mut key = ROOT_KEY;
    for qubit in 1..num_qubits {
        let up_key = key << 1 | 1;
        let p_up = tree.branch_probability(up_key)?;
        if rng.gen::<f64>() < p_up {
            key = up_key;
        } else {
            key <<= 1;
            observables[qubit] = -1;
        }
    }

    let syndrome = code
        .generators()
        .iter()
        .map(|generator| parity(generator, &observables))
        .collect();
    let logical = parity(code.logical(), &observables);
    Ok(SampleOutcome { logical, syndrome })
}

/// Concatenated sign string identifying a syndrome, e.g. "1-11".
pub fn syndrome_key(syndrome: &[i8]) -> String {
    let mut key = String::with_capacity(syndrome.len() * 2);
    for value in syndrome {
        key.push_str(if *value >= 0 { "1" } else { "-1" });
    }
    key
}

/// Accumulate syndrome counts and logical-error co-occurrences over a batch
/// of samples. Every observed syndrome key is present in both maps.
pub fn count_outcomes<R: Rng>(
    tree: &ProbabilityTree,
    code: &StabilizerCode,
    steps: usize,
    rng: &mut R,
) -> Result<CountedSamples, SimError> {
    let mut syndrome_counts: HashMap<String, u64> = HashMap::new();
    let mut error_cooccurrence: HashMap<String, u64> = HashMap::new();
    for _ in 0..steps {
        let sample = sample_outcome(tree, code, rng)?;
        let key = syndrome_key(&sample.syndrome);
        *syndrome_counts.entry(key.clone()).or_insert(0) += 1;
        let errors = error_cooccurrence.entry(key).or_insert(0);
        if sample.logical < 0 {
            *errors += 1;
        }
    }
    Ok(CountedSamples {
        error_cooccurrence,
        syndrome_counts,
        effective_steps: steps as u64,
    })
}

/// Counter for lossless detection: every sample is kept, so the effective
/// step count equals the target.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroLossCounter;

impl LossAwareCounter for ZeroLossCounter {
    fn count<R: Rng>(
        &self,
        tree: &ProbabilityTree,
        code: &StabilizerCode,
        _loss_probability: f64,
        _graph: GraphTag,
        target_steps: usize,
        rng: &mut R,
    ) -> Result<CountedSamples, SimError> {
        count_outcomes(tree, code, target_steps, rng)
    }
}
