//! Dense complex matrices for the measurement-operator algebra.
//!
//! Each photonic qubit carries an extra loss level on top of its two spin
//! components, so single-qubit operators are 4×4 and an n-qubit operator is
//! 4^n × 4^n. Matrices are stored flat in row-major order with inline index
//! accessors; Kronecker products assemble the full-system operators.

use num_complex::Complex;
use num_traits::Zero;

/// A square complex matrix stored flat in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    dim: usize,
    data: Vec<Complex<f64>>,
}

impl Matrix {
    /// Create a dim × dim zero matrix.
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            data: vec![Complex::zero(); dim * dim],
        }
    }

    /// Create a dim × dim identity matrix.
    pub fn identity(dim: usize) -> Self {
        let mut m = Self::zeros(dim);
        for k in 0..dim {
            m.data[k * dim + k] = Complex::new(1.0, 0.0);
        }
        m
    }

    /// The outer product |v⟩⟨v| of a ket with itself.
    pub fn outer(ket: &[Complex<f64>]) -> Self {
        let dim = ket.len();
        let mut m = Self::zeros(dim);
        for i in 0..dim {
            for j in 0..dim {
                m.data[i * dim + j] = ket[i] * ket[j].conj();
            }
        }
        m
    }

    /// Matrix dimension (rows = columns).
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Get element (i, j).
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Complex<f64> {
        self.data[i * self.dim + j]
    }

    /// Set element (i, j).
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: Complex<f64>) {
        self.data[i * self.dim + j] = value;
    }

    /// Matrix product self · other.
    ///
    /// Projectors and Kronecker-expanded operators are mostly zero, so rows
    /// are walked once and zero entries skipped.
    pub fn mul(&self, other: &Self) -> Self {
        assert_eq!(self.dim, other.dim, "matrix dimensions must agree");
        let d = self.dim;
        let mut out = Self::zeros(d);
        for i in 0..d {
            for k in 0..d {
                let a = self.data[i * d + k];
                if a.is_zero() {
                    continue;
                }
                for j in 0..d {
                    out.data[i * d + j] += a * other.data[k * d + j];
                }
            }
        }
        out
    }

    /// Conjugate transpose.
    pub fn dagger(&self) -> Self {
        let d = self.dim;
        let mut out = Self::zeros(d);
        for i in 0..d {
            for j in 0..d {
                out.data[j * d + i] = self.data[i * d + j].conj();
            }
        }
        out
    }

    /// Trace.
    pub fn trace(&self) -> Complex<f64> {
        (0..self.dim).map(|k| self.data[k * self.dim + k]).sum()
    }

    /// Kronecker product self ⊗ other.
    pub fn kron(&self, other: &Self) -> Self {
        let (da, db) = (self.dim, other.dim);
        let d = da * db;
        let mut out = Self::zeros(d);
        for i in 0..da {
            for j in 0..da {
                let a = self.data[i * da + j];
                if a.is_zero() {
                    continue;
                }
                for k in 0..db {
                    for l in 0..db {
                        out.data[(i * db + k) * d + (j * db + l)] = a * other.data[k * db + l];
                    }
                }
            }
        }
        out
    }

    /// Multiply every element by a real factor.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            dim: self.dim,
            data: self
                .data
                .iter()
                .map(|c| Complex::new(c.re * factor, c.im * factor))
                .collect(),
        }
    }
}
