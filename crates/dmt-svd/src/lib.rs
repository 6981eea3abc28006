#![deny(missing_docs)]
#![doc = "Approximate channel decomposition: power iteration with deflation on `H^H H`, singular triplet reconstruction and per-stream leader selection."]

/// Leader antenna selection from singular vectors.
pub mod leaders;
/// Power-iteration eigensolver with deflation.
pub mod power;
/// Singular value and vector reconstruction.
pub mod svd;

pub use leaders::{dominant_index, select_leaders, Leaders};
pub use power::{top_r_eigenpairs, EigenPair, PowerOpts};
pub use svd::{compute_approx_svd, reconstruct_svd, try_compute_approx_svd, SvdResult, SINGULAR_FLOOR};
