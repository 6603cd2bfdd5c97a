//! Conditional-probability tree over sequential measurement outcomes.
//!
//! Qubit 0 is collapsed onto its up outcome once (a deterministic reference,
//! not sampled). Each remaining qubit is then measured in order, and for every
//! partial outcome prefix the tree records the conditional probability of the
//! branch taken next, normalized over the up/down pair so siblings sum to one.
//!
//! Nodes are keyed by an explicit binary-tree index: the root is 1 and a step
//! appends one bit, `key << 1 | 1` for "+" and `key << 1` for "-". Walking a
//! configuration left to right therefore visits the keys of exactly one
//! root-to-leaf path. Configurations sharing a prefix overwrite already
//! recorded keys with identical values, which is redundant but harmless.

use std::collections::HashMap;

use crate::error::SimError;
use crate::matrix::Matrix;
use crate::operators::ProjectorPattern;

/// Key of the tree root.
pub const ROOT_KEY: u32 = 1;

/// Tolerance for trace reality and branch-pair normalization checks.
const TRACE_TOL: f64 = 1e-9;

/// Map from tree-node key to the conditional probability of reaching that
/// node from its parent. Built once per (code, density matrix); read-only
/// during sampling.
#[derive(Debug, Clone)]
pub struct ProbabilityTree {
    probabilities: HashMap<u32, f64>,
    depth: usize,
}

/// Trace of op·ρ·op† with reality and finiteness checks, plus the projected
/// (unnormalized) matrix.
fn project(
    op: &Matrix,
    rho: &Matrix,
    stage: &'static str,
    key: u32,
) -> Result<(f64, Matrix), SimError> {
    let projected = op.mul(rho).mul(&op.dagger());
    let trace = projected.trace();
    if !trace.re.is_finite() || trace.im.abs() > TRACE_TOL {
        return Err(SimError::Normalization {
            stage,
            key,
            value: trace.im,
        });
    }
    if trace.re < -TRACE_TOL {
        return Err(SimError::Normalization {
            stage,
            key,
            value: trace.re,
        });
    }
    Ok((trace.re.max(0.0), projected))
}

impl ProbabilityTree {
    /// Build the tree by walking every configuration against the pattern.
    ///
    /// `initial` is the pre-measurement density matrix of dimension
    /// `pattern.dim()`; it is only read, never mutated.
    pub fn build(
        pattern: &ProjectorPattern,
        initial: &Matrix,
        configurations: &[String],
    ) -> Result<Self, SimError> {
        assert_eq!(
            initial.dim(),
            pattern.dim(),
            "density matrix dimension must match the projector pattern"
        );
        let depth = pattern.num_qubits() - 1;

        // Deterministic collapse of qubit 0 onto its up outcome.
        let (up0, _) = pattern.pair(0);
        let (p0, collapsed) = project(up0, initial, "input collapse", ROOT_KEY)?;
        if p0 <= TRACE_TOL {
            return Err(SimError::Normalization {
                stage: "input collapse",
                key: ROOT_KEY,
                value: p0,
            });
        }
        let collapsed = collapsed.scaled(1.0 / p0);

        let mut probabilities = HashMap::new();
        for configuration in configurations {
            assert_eq!(
                configuration.len(),
                depth,
                "configuration length must equal the photon count"
            );
            let mut key = ROOT_KEY;
            let mut state = collapsed.clone();
            for (step, symbol) in configuration.chars().enumerate() {
                let (up, down) = pattern.pair(step + 1);
                let (p_up, projected_up) = project(up, &state, "branch pair", key)?;
                let (p_down, projected_down) = project(down, &state, "branch pair", key)?;
                let norm = p_up + p_down;
                if norm <= TRACE_TOL {
                    return Err(SimError::Normalization {
                        stage: "branch pair",
                        key,
                        value: norm,
                    });
                }
                let (child, branch_raw, projected) = match symbol {
                    '+' => (key << 1 | 1, p_up, projected_up),
                    '-' => (key << 1, p_down, projected_down),
                    other => panic!("configuration symbol must be + or -, got {:?}", other),
                };
                probabilities.insert(child, branch_raw / norm);
                state = projected.scaled(1.0 / branch_raw);
                key = child;
            }
        }

        log::debug!(
            "probability tree built: {} nodes over depth {}",
            probabilities.len(),
            depth
        );
        Ok(Self {
            probabilities,
            depth,
        })
    }

    /// Number of measured qubits (tree depth).
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Conditional probability of reaching `key` from its parent.
    ///
    /// A missing key means the configuration set and the tree disagree; that
    /// is a structural fault and fails fast.
    pub fn branch_probability(&self, key: u32) -> Result<f64, SimError> {
        self.probabilities
            .get(&key)
            .copied()
            .ok_or(SimError::MissingNode { key })
    }

    /// All recorded node probabilities.
    pub fn probabilities(&self) -> &HashMap<u32, f64> {
        &self.probabilities
    }
}
