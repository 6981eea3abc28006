use dmt_channel::build_gram;
use dmt_core::complex::normalize;
use dmt_core::errors::{check_stream_count, DmtError, ErrorInfo};
use dmt_core::{ChannelMatrix, Complex64};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::power::{top_r_eigenpairs, EigenPair, PowerOpts};

/// Singular values at or below this are treated as zero during reconstruction.
pub const SINGULAR_FLOOR: f64 = 1e-12;

/// Approximate top-`r` singular triplets of a channel matrix.
///
/// `u[k]`, `v[k]` and `s[k]` describe the same mode; `s` is descending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SvdResult {
    /// Left singular vectors, each of length `Nr`.
    pub u: Vec<Vec<Complex64>>,
    /// Right singular vectors, each of length `Nt`.
    pub v: Vec<Vec<Complex64>>,
    /// Singular values.
    pub s: Vec<f64>,
}

impl SvdResult {
    /// Number of extracted modes.
    pub fn rank(&self) -> usize {
        self.s.len()
    }

    fn is_finite(&self) -> bool {
        self.s.iter().all(|s| s.is_finite())
            && self
                .u
                .iter()
                .chain(self.v.iter())
                .flatten()
                .all(|z| z.re.is_finite() && z.im.is_finite())
    }
}

/// Rebuilds singular triplets from eigenpairs of `H^H H`.
///
/// `sigma = sqrt(max(lambda, 0))`; `u = normalize(H v / sigma)`, or
/// `normalize(H v)` when `sigma` is at or below [`SINGULAR_FLOOR`].
pub fn reconstruct_svd(h: &ChannelMatrix, pairs: &[EigenPair]) -> SvdResult {
    let mut u = Vec::with_capacity(pairs.len());
    let mut v = Vec::with_capacity(pairs.len());
    let mut s = Vec::with_capacity(pairs.len());
    for pair in pairs {
        let sigma = pair.eigenvalue.max(0.0).sqrt();
        let hv = h.mul_vec(&pair.eigenvector);
        let left = if sigma > SINGULAR_FLOOR {
            let scaled: Vec<Complex64> = hv.iter().map(|z| *z / sigma).collect();
            normalize(&scaled)
        } else {
            normalize(&hv)
        };
        u.push(left);
        v.push(normalize(&pair.eigenvector));
        s.push(sigma);
    }
    SvdResult { u, v, s }
}

/// Approximates the top-`rank` SVD of `h` through power iteration on `H^H H`.
pub fn compute_approx_svd<R: Rng + ?Sized>(
    h: &ChannelMatrix,
    rank: usize,
    opts: &PowerOpts,
    rng: &mut R,
) -> Result<SvdResult, DmtError> {
    check_stream_count(h.cols(), h.rows(), rank)?;
    let gram = build_gram(h);
    let pairs = top_r_eigenpairs(&gram, rank, opts, rng)?;
    let svd = reconstruct_svd(h, &pairs);
    if !svd.is_finite() {
        return Err(DmtError::Computation(
            ErrorInfo::new("svd-unstable", "decomposition produced non-finite values")
                .with_context("rank", rank)
                .with_context("iterations", opts.iterations),
        ));
    }
    Ok(svd)
}

/// Like [`compute_approx_svd`] but logs failures and returns `None`,
/// meaning "cannot optimize yet".
pub fn try_compute_approx_svd<R: Rng + ?Sized>(
    h: &ChannelMatrix,
    rank: usize,
    opts: &PowerOpts,
    rng: &mut R,
) -> Option<SvdResult> {
    match compute_approx_svd(h, rank, opts, rng) {
        Ok(svd) => Some(svd),
        Err(err) => {
            warn!(%err, "approximate SVD unavailable");
            None
        }
    }
}
