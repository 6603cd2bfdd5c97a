//! # photonic-code-sim
//!
//! Monte Carlo estimation of the logical error rate of a stabilizer-encoded
//! qubit whose photons are measured one by one, under per-photon loss.
//!
//! Every qubit is modelled as a 4-level system (two spin components plus a
//! loss level), so states and operators are dense 4^n-dimensional complex
//! matrices. For a fixed code and initial density matrix the pipeline:
//!
//! 1. derives a per-qubit measurement basis from the stabilizers and builds
//!    rotated up/down projector pairs ([`operators`]),
//! 2. walks every outcome branch once and records the conditional probability
//!    at each node of the measurement tree ([`tree`]),
//! 3. samples outcome sequences from the tree and decodes a syndrome and a
//!    logical value per sample ([`sampler`]),
//! 4. reduces syndrome-keyed counts to corrected and uncorrected logical
//!    error rates ([`aggregate`]), swept over loss values ([`sweep`]).
//!
//! State generation, loss-aware counting, and the direct-transmission
//! baseline are consumed through the traits in [`interfaces`].

pub mod aggregate;
pub mod code;
pub mod configurations;
pub mod error;
pub mod interfaces;
pub mod matrix;
pub mod operators;
pub mod sampler;
pub mod sweep;
pub mod tree;

pub mod prelude {
    pub use crate::aggregate::{logical_error_rates, mean_std, TRIVIAL_SYNDROME};
    pub use crate::code::{BasisAssignment, Pauli, StabilizerCode};
    pub use crate::configurations::enumerate_configurations;
    pub use crate::error::SimError;
    pub use crate::interfaces::{
        CountedSamples, DensityMatrixGenerator, DirectTransmissionBaseline, GraphTag,
        LossAwareCounter, NoiseParameters,
    };
    pub use crate::matrix::Matrix;
    pub use crate::operators::{build_projector_pattern, ProjectorPattern, RotationAxis};
    pub use crate::sampler::{count_outcomes, sample_outcome, SampleOutcome, ZeroLossCounter};
    pub use crate::sweep::{
        run_loss_sweep, run_loss_sweep_with_baseline, LossSweepPoint, RunConfig,
    };
    pub use crate::tree::{ProbabilityTree, ROOT_KEY};
}
