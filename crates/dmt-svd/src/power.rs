use dmt_core::complex::{random_unit_vector, vec_distance, vec_norm, NORM_FLOOR};
use dmt_core::errors::{DmtError, ErrorInfo};
use dmt_core::{Complex64, HermitianMatrix};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

fn default_iterations() -> usize {
    60
}

/// Options controlling the power-iteration eigensolver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerOpts {
    /// Upper bound on matrix-vector products per extracted eigenpair.
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    /// Stop a round early once successive iterates differ by less than this.
    #[serde(default)]
    pub tolerance: Option<f64>,
}

impl Default for PowerOpts {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            tolerance: None,
        }
    }
}

impl PowerOpts {
    /// Fixed iteration count without early exit.
    pub fn fixed(iterations: usize) -> Self {
        Self {
            iterations,
            tolerance: None,
        }
    }
}

/// Dominant eigenvalue estimate with its unit-norm eigenvector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EigenPair {
    /// Rayleigh quotient, clamped to be non-negative.
    pub eigenvalue: f64,
    /// Unit-norm eigenvector.
    pub eigenvector: Vec<Complex64>,
}

/// Extracts the `r` dominant eigenpairs of `a` by power iteration with deflation.
///
/// Each round starts from a random unit vector, iterates `v <- A v / ||A v||`,
/// estimates `lambda = Re(v^H A v)` and subtracts `lambda v v^H` from a working
/// copy. Pairs come out in decreasing eigenvalue order by construction. When
/// `A v` collapses below the norm floor the current unit vector is kept, so a
/// (near) zero matrix yields eigenvalues of zero with arbitrary directions.
pub fn top_r_eigenpairs<R: Rng + ?Sized>(
    a: &HermitianMatrix,
    r: usize,
    opts: &PowerOpts,
    rng: &mut R,
) -> Result<Vec<EigenPair>, DmtError> {
    let n = a.size();
    if r > n {
        return Err(DmtError::Dimension(
            ErrorInfo::new(
                "rank-exceeds-dimension",
                "requested rank exceeds matrix dimension",
            )
            .with_context("rank", r)
            .with_context("size", n),
        ));
    }

    let mut work = a.clone();
    let mut pairs = Vec::with_capacity(r);
    for round in 0..r {
        let mut v = random_unit_vector(n, rng);
        let mut used = 0;
        for _ in 0..opts.iterations {
            used += 1;
            let w = work.mul_vec(&v);
            let norm = vec_norm(&w);
            if norm <= NORM_FLOOR {
                break;
            }
            let next: Vec<Complex64> = w.into_iter().map(|z| z / norm).collect();
            let converged = opts
                .tolerance
                .map(|tol| vec_distance(&next, &v) < tol)
                .unwrap_or(false);
            v = next;
            if converged {
                break;
            }
        }

        let eigenvalue = work.rayleigh_quotient(&v).max(0.0);
        debug!(round, iterations = used, eigenvalue, "extracted eigenpair");
        work.deflate(eigenvalue, &v);
        pairs.push(EigenPair {
            eigenvalue,
            eigenvector: v,
        });
    }
    Ok(pairs)
}
