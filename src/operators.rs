//! Measurement projectors for sequential single-qubit readout.
//!
//! Every qubit is a 4-level system. Photons encode the qubit in components
//! {1, 2} with component 0 reserved for the lost-photon state; the input spin
//! qubit at index 0 lives in components {0, 1} and plays a distinguished role.
//!
//! For each Pauli basis the up/down eigenkets are turned into rank-one
//! projectors. Photonic projectors are conjugated by a systematic measurement
//! rotation U (basis misalignment by angle θ about a chosen axis), P ↦ U P U†;
//! the spin projectors are left unrotated. Full-system operators are n-fold
//! Kronecker products with the basis-appropriate projector at the measured
//! position and 4×4 identities everywhere else, built separately for the up
//! and the down branch of every qubit.

use num_complex::Complex;

use crate::code::{BasisAssignment, Pauli};
use crate::matrix::Matrix;

/// Axis of the systematic measurement-basis rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationAxis {
    X,
    Y,
    Z,
    /// Rotate by the same angle about x, then y, then z.
    All,
}

/// One (up, down) projector pair per qubit, each of dimension 4^n × 4^n.
#[derive(Debug, Clone)]
pub struct ProjectorPattern {
    num_qubits: usize,
    dim: usize,
    pairs: Vec<(Matrix, Matrix)>,
}

impl ProjectorPattern {
    /// Number of qubits covered by the pattern.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Full-system operator dimension, 4^n.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// The (up, down) operator pair for one qubit.
    pub fn pair(&self, qubit: usize) -> (&Matrix, &Matrix) {
        let (up, down) = &self.pairs[qubit];
        (up, down)
    }
}

fn mat2_mul(a: [Complex<f64>; 4], b: [Complex<f64>; 4]) -> [Complex<f64>; 4] {
    [
        a[0] * b[0] + a[1] * b[2],
        a[0] * b[1] + a[1] * b[3],
        a[2] * b[0] + a[3] * b[2],
        a[2] * b[1] + a[3] * b[3],
    ]
}

/// SU(2) rotation exp(-iθ/2 σ_axis) as a row-major 2×2.
fn su2_rotation(theta: f64, axis: RotationAxis) -> [Complex<f64>; 4] {
    let c = (theta / 2.0).cos();
    let s = (theta / 2.0).sin();
    let zero = Complex::new(0.0, 0.0);
    match axis {
        RotationAxis::X => [
            Complex::new(c, 0.0),
            Complex::new(0.0, -s),
            Complex::new(0.0, -s),
            Complex::new(c, 0.0),
        ],
        RotationAxis::Y => [
            Complex::new(c, 0.0),
            Complex::new(-s, 0.0),
            Complex::new(s, 0.0),
            Complex::new(c, 0.0),
        ],
        RotationAxis::Z => [Complex::new(c, -s), zero, zero, Complex::new(c, s)],
        RotationAxis::All => mat2_mul(
            su2_rotation(theta, RotationAxis::Z),
            mat2_mul(
                su2_rotation(theta, RotationAxis::Y),
                su2_rotation(theta, RotationAxis::X),
            ),
        ),
    }
}

/// The measurement rotation as a 4×4 unitary.
///
/// Acts on the photonic qubit subspace {1, 2}; the loss component 0 and the
/// unused component 3 are untouched.
pub fn rotation_unitary(theta: f64, axis: RotationAxis) -> Matrix {
    let r = su2_rotation(theta, axis);
    let mut u = Matrix::identity(4);
    u.set(1, 1, r[0]);
    u.set(1, 2, r[1]);
    u.set(2, 1, r[2]);
    u.set(2, 2, r[3]);
    u
}

/// Up/down eigenkets for a photonic qubit, components {1, 2}.
///
/// A basis label of I still yields a pair (the Z pair): the tree walk measures
/// every qubit, acted-on or not.
fn photon_kets(basis: Pauli) -> ([Complex<f64>; 4], [Complex<f64>; 4]) {
    let zero = Complex::new(0.0, 0.0);
    let one = Complex::new(1.0, 0.0);
    let h = Complex::new(std::f64::consts::FRAC_1_SQRT_2, 0.0);
    let ih = Complex::new(0.0, std::f64::consts::FRAC_1_SQRT_2);
    match basis {
        Pauli::X => ([zero, h, h, zero], [zero, h, -h, zero]),
        Pauli::Y => ([zero, h, ih, zero], [zero, h, -ih, zero]),
        Pauli::Z | Pauli::I => ([zero, one, zero, zero], [zero, zero, one, zero]),
    }
}

/// Up/down eigenkets for the input spin qubit, components {0, 1}.
fn spin_kets(basis: Pauli) -> ([Complex<f64>; 4], [Complex<f64>; 4]) {
    let zero = Complex::new(0.0, 0.0);
    let one = Complex::new(1.0, 0.0);
    let h = Complex::new(std::f64::consts::FRAC_1_SQRT_2, 0.0);
    let ih = Complex::new(0.0, std::f64::consts::FRAC_1_SQRT_2);
    match basis {
        Pauli::X => ([h, h, zero, zero], [h, -h, zero, zero]),
        Pauli::Y => ([h, ih, zero, zero], [h, -ih, zero, zero]),
        Pauli::Z | Pauli::I => ([one, zero, zero, zero], [zero, one, zero, zero]),
    }
}

/// Build the full-system projector pattern for a basis assignment.
///
/// Qubit 0 gets the spin pair selected by the assignment's 0th label; every
/// photon gets its rotated pair at its own Kronecker position.
pub fn build_projector_pattern(
    basis: &BasisAssignment,
    theta: f64,
    axis: RotationAxis,
) -> ProjectorPattern {
    let n = basis.len();
    let identity = Matrix::identity(4);
    let u = rotation_unitary(theta, axis);
    let u_dag = u.dagger();
    let rotated_pair = |label: Pauli| {
        let (up, down) = photon_kets(label);
        (
            u.mul(&Matrix::outer(&up)).mul(&u_dag),
            u.mul(&Matrix::outer(&down)).mul(&u_dag),
        )
    };

    let mut pairs = Vec::with_capacity(n);
    for qubit in 0..n {
        let (mut up, mut down) = if qubit == 0 {
            let (up0, down0) = spin_kets(basis[0]);
            (Matrix::outer(&up0), Matrix::outer(&down0))
        } else {
            (identity.clone(), identity.clone())
        };
        for position in 1..n {
            if position == qubit {
                let (pu, pd) = rotated_pair(basis[qubit]);
                up = up.kron(&pu);
                down = down.kron(&pd);
            } else {
                up = up.kron(&identity);
                down = down.kron(&identity);
            }
        }
        pairs.push((up, down));
    }

    ProjectorPattern {
        num_qubits: n,
        dim: 4usize.pow(n as u32),
        pairs,
    }
}
