//! Dense complex matrices used by the decomposition pipeline.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::errors::{DmtError, ErrorInfo};

fn empty_matrix(nr: usize, nt: usize) -> DmtError {
    DmtError::Dimension(
        ErrorInfo::new("empty-matrix", "channel matrix must be non-empty")
            .with_context("nr", nr)
            .with_context("nt", nt),
    )
}

/// Random MIMO channel realization `H` with `Nr` rows and `Nt` columns.
///
/// Row index is the receive antenna, column index the transmit antenna.
/// The matrix is immutable once built; regeneration replaces it wholesale.
/// Serialized as a list of rows so that decoding revalidates the shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ChannelRows", into = "ChannelRows")]
pub struct ChannelMatrix {
    rows: usize,
    cols: usize,
    data: Vec<Complex64>,
}

impl ChannelMatrix {
    /// Builds a matrix from row vectors, rejecting empty or ragged input.
    pub fn from_rows(rows: Vec<Vec<Complex64>>) -> Result<Self, DmtError> {
        let nr = rows.len();
        let nt = rows.first().map(Vec::len).unwrap_or(0);
        if nr == 0 || nt == 0 {
            return Err(empty_matrix(nr, nt));
        }
        let mut data = Vec::with_capacity(nr * nt);
        for (idx, row) in rows.into_iter().enumerate() {
            if row.len() != nt {
                return Err(DmtError::Dimension(
                    ErrorInfo::new("ragged-matrix", "channel rows must share one length")
                        .with_context("row", idx)
                        .with_context("expected", nt)
                        .with_context("found", row.len()),
                ));
            }
            data.extend(row);
        }
        Ok(Self {
            rows: nr,
            cols: nt,
            data,
        })
    }

    /// Builds an `nr x nt` matrix by evaluating `entry(rx, tx)` in row-major order.
    pub fn from_fn<F>(nr: usize, nt: usize, mut entry: F) -> Result<Self, DmtError>
    where
        F: FnMut(usize, usize) -> Complex64,
    {
        if nr == 0 || nt == 0 {
            return Err(empty_matrix(nr, nt));
        }
        let mut data = Vec::with_capacity(nr * nt);
        for rx in 0..nr {
            for tx in 0..nt {
                data.push(entry(rx, tx));
            }
        }
        Ok(Self {
            rows: nr,
            cols: nt,
            data,
        })
    }

    /// Number of receive antennas `Nr`.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of transmit antennas `Nt`.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Entry `H[rx][tx]`. Panics when out of range, like slice indexing.
    #[inline]
    pub fn get(&self, rx: usize, tx: usize) -> Complex64 {
        self.data[rx * self.cols + tx]
    }

    /// Entry `H[rx][tx]` or `None` when either index is out of range.
    pub fn try_get(&self, rx: usize, tx: usize) -> Option<Complex64> {
        if rx < self.rows && tx < self.cols {
            Some(self.get(rx, tx))
        } else {
            None
        }
    }

    /// Row `rx` (gains from every transmit antenna to receive antenna `rx`).
    pub fn row(&self, rx: usize) -> &[Complex64] {
        &self.data[rx * self.cols..(rx + 1) * self.cols]
    }

    /// Row-major view over all entries.
    pub fn entries(&self) -> &[Complex64] {
        &self.data
    }

    /// `H v` for a transmit-side vector of length `Nt`.
    pub fn mul_vec(&self, v: &[Complex64]) -> Vec<Complex64> {
        (0..self.rows)
            .map(|rx| {
                self.row(rx)
                    .iter()
                    .zip(v.iter())
                    .fold(Complex64::new(0.0, 0.0), |acc, (h, x)| acc + *h * *x)
            })
            .collect()
    }

    /// `H^H u` for a receive-side vector of length `Nr`.
    pub fn mul_adjoint_vec(&self, u: &[Complex64]) -> Vec<Complex64> {
        let mut out = vec![Complex64::new(0.0, 0.0); self.cols];
        for (rx, weight) in u.iter().enumerate().take(self.rows) {
            for (tx, slot) in out.iter_mut().enumerate() {
                *slot += self.get(rx, tx).conj() * *weight;
            }
        }
        out
    }

    /// Empirical mean of `|h|^2` over all entries.
    pub fn mean_power(&self) -> f64 {
        let total: f64 = self.data.iter().map(|h| h.norm_sqr()).sum();
        total / self.data.len() as f64
    }
}

#[derive(Serialize, Deserialize)]
struct ChannelRows(Vec<Vec<Complex64>>);

impl TryFrom<ChannelRows> for ChannelMatrix {
    type Error = DmtError;

    fn try_from(value: ChannelRows) -> Result<Self, Self::Error> {
        ChannelMatrix::from_rows(value.0)
    }
}

impl From<ChannelMatrix> for ChannelRows {
    fn from(matrix: ChannelMatrix) -> Self {
        ChannelRows(
            matrix
                .data
                .chunks(matrix.cols)
                .map(<[Complex64]>::to_vec)
                .collect(),
        )
    }
}

/// Square complex matrix satisfying `A[i][j] = conj(A[j][i])`.
///
/// Produced by the Gram builders and consumed by the eigensolver, which
/// deflates a working copy in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HermitianMatrix {
    size: usize,
    data: Vec<Complex64>,
}

impl HermitianMatrix {
    /// Zero matrix of the given size.
    pub fn zeros(size: usize) -> Self {
        Self {
            size,
            data: vec![Complex64::new(0.0, 0.0); size * size],
        }
    }

    /// Matrix dimension.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Entry `A[i][j]`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Complex64 {
        self.data[i * self.size + j]
    }

    /// Overwrites entry `A[i][j]`; callers keep the Hermitian symmetry.
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: Complex64) {
        self.data[i * self.size + j] = value;
    }

    /// `A v`.
    pub fn mul_vec(&self, v: &[Complex64]) -> Vec<Complex64> {
        (0..self.size)
            .map(|i| {
                self.data[i * self.size..(i + 1) * self.size]
                    .iter()
                    .zip(v.iter())
                    .fold(Complex64::new(0.0, 0.0), |acc, (a, x)| acc + *a * *x)
            })
            .collect()
    }

    /// Real part of `v^H A v`.
    pub fn rayleigh_quotient(&self, v: &[Complex64]) -> f64 {
        let av = self.mul_vec(v);
        crate::complex::conj_dot(v, &av).re
    }

    /// In-place rank-one deflation `A <- A - lambda v v^H`.
    pub fn deflate(&mut self, lambda: f64, v: &[Complex64]) {
        for i in 0..self.size {
            for j in 0..self.size {
                let outer = v[i] * v[j].conj() * lambda;
                self.data[i * self.size + j] -= outer;
            }
        }
    }

    /// Whether `A[j][k]` matches `conj(A[k][j])` within `eps` for all entries.
    pub fn is_hermitian(&self, eps: f64) -> bool {
        (0..self.size).all(|j| {
            (0..self.size).all(|k| (self.get(j, k) - self.get(k, j).conj()).norm() <= eps)
        })
    }

    /// Sum of the diagonal's real parts.
    pub fn trace(&self) -> f64 {
        (0..self.size).map(|i| self.get(i, i).re).sum()
    }
}
