use dmt_core::errors::DmtError;
use serde::{Deserialize, Serialize};

use crate::check_antennas;
use crate::curve::diversity_gain;

/// Operating point returned by the inverse solvers.
///
/// When the target cannot be met the solvers fall back to `r = 0` (or, for
/// rates beyond full multiplexing, clamp to `min(nt, nr)`) and report
/// `achievable = false` rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperatingPoint {
    /// Multiplexing gain `r`.
    pub multiplexing: f64,
    /// Diversity gain `d(r)` at that point.
    pub diversity: f64,
    /// Whether the target is met without falling back or clamping.
    pub achievable: bool,
}

impl OperatingPoint {
    fn at(nt: usize, nr: usize, r: f64, achievable: bool) -> Self {
        Self {
            multiplexing: r,
            diversity: diversity_gain(nt, nr, r),
            achievable,
        }
    }
}

/// Solves `rate = r log2(1 + snr)` for `r`, with `snr` linear.
pub fn multiplexing_for_rate(
    rate: f64,
    snr: f64,
    nt: usize,
    nr: usize,
) -> Result<OperatingPoint, DmtError> {
    let max_rank = check_antennas(nt, nr)? as f64;
    let per_stream = (1.0 + snr).log2();
    if !rate.is_finite() || rate < 0.0 || !per_stream.is_finite() || per_stream <= 0.0 {
        return Ok(OperatingPoint::at(nt, nr, 0.0, false));
    }
    let r = rate / per_stream;
    if r > max_rank {
        return Ok(OperatingPoint::at(nt, nr, max_rank, false));
    }
    Ok(OperatingPoint::at(nt, nr, r, true))
}

/// Solves `pe = snr^-d` for `d`, then inverts `d = (nt - r)(nr - r)`.
///
/// The smaller root of the quadratic is taken since it is the more reliable
/// point. `snr` is linear and must exceed 1.
pub fn multiplexing_for_error_probability(
    error_probability: f64,
    snr: f64,
    nt: usize,
    nr: usize,
) -> Result<OperatingPoint, DmtError> {
    let max_rank = check_antennas(nt, nr)? as f64;
    let fallback = OperatingPoint::at(nt, nr, 0.0, false);
    if !(error_probability > 0.0 && error_probability < 1.0) || !(snr > 1.0) || !snr.is_finite() {
        return Ok(fallback);
    }

    let target_diversity = -error_probability.ln() / snr.ln();
    let sum = nt as f64 + nr as f64;
    let product = nt as f64 * nr as f64;
    let discriminant = sum * sum - 4.0 * (product - target_diversity);
    if discriminant < 0.0 {
        return Ok(fallback);
    }
    let r = (sum - discriminant.sqrt()) / 2.0;
    if !(0.0..=max_rank).contains(&r) {
        return Ok(fallback);
    }
    Ok(OperatingPoint::at(nt, nr, r, true))
}
