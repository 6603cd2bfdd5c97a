//! Seams to the collaborators surrounding the simulation core.
//!
//! The core consumes a density matrix, a loss-aware sample counter, and an
//! optional direct-transmission baseline; all three live behind traits so
//! sweeps can be driven with production implementations or test doubles.

use std::collections::HashMap;

use rand::Rng;

use crate::code::{Pauli, StabilizerCode};
use crate::error::SimError;
use crate::matrix::Matrix;
use crate::operators::RotationAxis;
use crate::tree::ProbabilityTree;

/// Graph topology used when preparing the encoded photonic state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphTag {
    /// Star graph with the input spin at the center.
    StarMiddle,
    /// Star graph with the input spin on a leaf.
    StarLeaf,
    /// Fully connected graph.
    Fully,
}

impl GraphTag {
    /// Conventional topology for a logical-observable basis: Z encodes on a
    /// star from the middle, Y on a fully connected graph, anything else on
    /// a star leaf.
    pub fn for_logical_basis(basis: Pauli) -> Self {
        match basis {
            Pauli::Z => GraphTag::StarMiddle,
            Pauli::Y => GraphTag::Fully,
            _ => GraphTag::StarLeaf,
        }
    }
}

/// Physical noise knobs threaded through state generation and measurement.
#[derive(Debug, Clone)]
pub struct NoiseParameters {
    /// Emitter coupling rate κ.
    pub kappa: f64,
    /// Dephasing time T2*.
    pub dephasing_t2: f64,
    /// Fidelity of the initial input-qubit preparation.
    pub input_fidelity: f64,
    /// Systematic measurement rotation angle θ.
    pub theta: f64,
    /// Axis of the measurement rotation.
    pub axis: RotationAxis,
}

impl Default for NoiseParameters {
    fn default() -> Self {
        Self {
            kappa: 0.021,
            dephasing_t2: 23.2,
            input_fidelity: 0.947,
            theta: 0.05,
            axis: RotationAxis::All,
        }
    }
}

/// Syndrome-keyed counts accumulated over one Monte Carlo batch.
///
/// `effective_steps` is the number of samples actually kept; counters that
/// discard lossy samples report fewer steps than they were asked for.
#[derive(Debug, Clone, Default)]
pub struct CountedSamples {
    /// Samples per syndrome key that co-occurred with a logical error.
    pub error_cooccurrence: HashMap<String, u64>,
    /// Samples per syndrome key.
    pub syndrome_counts: HashMap<String, u64>,
    /// Valid samples behind the counts.
    pub effective_steps: u64,
}

/// Produces the pre-measurement density matrix for an encoded state.
///
/// The returned matrix must be Hermitian with unit trace and dimension
/// 4^(photons + 1).
pub trait DensityMatrixGenerator {
    fn generate(
        &self,
        graph: GraphTag,
        noise: &NoiseParameters,
        num_photons: usize,
    ) -> Result<Matrix, SimError>;
}

/// Samples outcome sequences from a probability tree under per-photon loss
/// and accumulates syndrome statistics.
pub trait LossAwareCounter {
    fn count<R: Rng>(
        &self,
        tree: &ProbabilityTree,
        code: &StabilizerCode,
        loss_probability: f64,
        graph: GraphTag,
        target_steps: usize,
        rng: &mut R,
    ) -> Result<CountedSamples, SimError>;
}

/// Error estimate for sending the input qubit without encoding; used as a
/// comparison curve only.
pub trait DirectTransmissionBaseline {
    /// Returns (estimate, standard deviation).
    fn estimate(
        &self,
        noise: &NoiseParameters,
        loss_probability: f64,
    ) -> Result<(f64, f64), SimError>;
}
