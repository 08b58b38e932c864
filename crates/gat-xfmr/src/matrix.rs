//! Phase-frame 3×3 complex matrices and the six-matrix two-port bundle.
//!
//! Row and column `k` correspond to phase A, B, C for `k = 0, 1, 2`
//! ([`gat_core::Phase::index`]).

use num_complex::Complex64;
use std::ops::{Index, Mul};

const ZERO: Complex64 = Complex64::new(0.0, 0.0);

/// The two cyclic off-diagonal position sets of a 3×3 phase matrix.
///
/// Delta–wye couplings place their off-diagonal terms on one of these two
/// "rotations"; which one depends on the 30° shift direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclicShift {
    /// (A,B), (B,C), (C,A)
    Leading,
    /// (A,C), (B,A), (C,B)
    Lagging,
}

impl CyclicShift {
    pub const fn positions(self) -> [(usize, usize); 3] {
        match self {
            CyclicShift::Leading => [(0, 1), (1, 2), (2, 0)],
            CyclicShift::Lagging => [(0, 2), (1, 0), (2, 1)],
        }
    }
}

/// Dense 3×3 complex matrix in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Matrix3 {
    data: [[Complex64; 3]; 3],
}

impl Matrix3 {
    pub const fn zeros() -> Self {
        Self {
            data: [[ZERO; 3]; 3],
        }
    }

    pub fn from_rows(data: [[Complex64; 3]; 3]) -> Self {
        Self { data }
    }

    pub fn identity() -> Self {
        let mut m = Self::zeros();
        m.set_diagonal(Complex64::new(1.0, 0.0));
        m
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        self.data[row][col]
    }

    pub fn rows(&self) -> &[[Complex64; 3]; 3] {
        &self.data
    }

    pub fn diagonal(&self) -> [Complex64; 3] {
        [self.data[0][0], self.data[1][1], self.data[2][2]]
    }

    /// Matrix-vector product, the operation the sweep applies every pass.
    pub fn apply(&self, v: [Complex64; 3]) -> [Complex64; 3] {
        let mut out = [ZERO; 3];
        for (row, slot) in out.iter_mut().enumerate() {
            *slot = (0..3).map(|col| self.data[row][col] * v[col]).sum();
        }
        out
    }

    pub fn is_finite(&self) -> bool {
        self.data.iter().flatten().all(|z| z.is_finite())
    }

    pub fn is_zero(&self) -> bool {
        self.data.iter().flatten().all(|z| *z == ZERO)
    }

    /// Count of entries that are exactly zero.
    pub fn structural_zeros(&self) -> usize {
        self.data.iter().flatten().filter(|z| **z == ZERO).count()
    }

    // Mutation stays inside the crate: only topology builders write entries.

    #[inline]
    pub(crate) fn set(&mut self, row: usize, col: usize, value: Complex64) {
        self.data[row][col] = value;
    }

    pub(crate) fn set_diagonal(&mut self, value: Complex64) {
        for k in 0..3 {
            self.data[k][k] = value;
        }
    }

    pub(crate) fn set_off_diagonal(&mut self, value: Complex64) {
        for row in 0..3 {
            for col in 0..3 {
                if row != col {
                    self.data[row][col] = value;
                }
            }
        }
    }

    pub(crate) fn set_cyclic(&mut self, shift: CyclicShift, value: Complex64) {
        for (row, col) in shift.positions() {
            self.data[row][col] = value;
        }
    }
}

impl Index<(usize, usize)> for Matrix3 {
    type Output = Complex64;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.data[row][col]
    }
}

impl Mul for Matrix3 {
    type Output = Matrix3;

    fn mul(self, rhs: Matrix3) -> Self::Output {
        let mut out = Matrix3::zeros();
        for row in 0..3 {
            for col in 0..3 {
                out.data[row][col] = (0..3).map(|k| self.data[row][k] * rhs.data[k][col]).sum();
            }
        }
        out
    }
}

impl std::fmt::Display for Matrix3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.data {
            for (col, z) in row.iter().enumerate() {
                if col > 0 {
                    write!(f, "  ")?;
                }
                write!(f, "{:+.6e}{:+.6e}j", z.re, z.im)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// The six matrices a transformer contributes to the network equations.
///
/// ```text
///   forward (primary from secondary)        reverse (secondary from primary)
///   V_pri = a·V_sec + b·I_sec               V_sec = A·V_pri − B·I_sec
///   I_pri = c·V_sec + d·I_sec
/// ```
///
/// Under Gauss-Seidel `b` holds the series admittance instead of an
/// impedance, and `c`/`B` carry the delta–wye voltage and current transforms.
///
/// Values are produced once by a topology builder and never change.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoPortMatrices {
    pub(crate) a: Matrix3,
    pub(crate) b: Matrix3,
    pub(crate) c: Matrix3,
    pub(crate) d: Matrix3,
    pub(crate) a_rev: Matrix3,
    pub(crate) b_rev: Matrix3,
}

impl TwoPortMatrices {
    pub(crate) fn zeros() -> Self {
        Self {
            a: Matrix3::zeros(),
            b: Matrix3::zeros(),
            c: Matrix3::zeros(),
            d: Matrix3::zeros(),
            a_rev: Matrix3::zeros(),
            b_rev: Matrix3::zeros(),
        }
    }

    pub fn a(&self) -> &Matrix3 {
        &self.a
    }

    pub fn b(&self) -> &Matrix3 {
        &self.b
    }

    pub fn c(&self) -> &Matrix3 {
        &self.c
    }

    pub fn d(&self) -> &Matrix3 {
        &self.d
    }

    /// Reverse voltage matrix `A`.
    pub fn a_rev(&self) -> &Matrix3 {
        &self.a_rev
    }

    /// Reverse impedance (or current transform) matrix `B`.
    pub fn b_rev(&self) -> &Matrix3 {
        &self.b_rev
    }

    /// All six matrices with their conventional labels.
    pub fn labeled(&self) -> [(&'static str, &Matrix3); 6] {
        [
            ("a", &self.a),
            ("A", &self.a_rev),
            ("b", &self.b),
            ("B", &self.b_rev),
            ("c", &self.c),
            ("d", &self.d),
        ]
    }

    pub fn is_finite(&self) -> bool {
        self.labeled().iter().all(|(_, m)| m.is_finite())
    }

    /// Label of the first matrix holding a NaN or infinite entry.
    pub fn first_non_finite(&self) -> Option<&'static str> {
        self.labeled()
            .iter()
            .find(|(_, m)| !m.is_finite())
            .map(|(label, _)| *label)
    }
}

impl std::fmt::Display for TwoPortMatrices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (label, matrix) in self.labeled() {
            writeln!(f, "transformer:\t{} matrix", label)?;
            write!(f, "{}", matrix)?;
        }
        Ok(())
    }
}
