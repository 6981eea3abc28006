use dmt_core::errors::{DmtError, ErrorInfo};
use serde::{Deserialize, Serialize};

use crate::check_antennas;
use crate::curve::diversity_gain;

const NOISE_FLOOR: f64 = 1e-18;

/// Integer rank with its asymptotic diversity and the rate a channel
/// realization supports at that rank.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatePoint {
    /// Number of multiplexed streams.
    pub multiplexing: usize,
    /// `d(r)`.
    pub diversity: f64,
    /// Sum rate in bit/s/Hz.
    pub rate: f64,
}

/// Per-rank rate table for one channel realization.
///
/// For rank `r` the power is split equally over the `r` strongest singular
/// modes: `rate = sum_{i<r} log2(1 + s_i^2 (P/r) / N)`. `singular_values`
/// must be sorted descending and hold at least `min(nt, nr)` values.
pub fn achievable_rate_profile(
    singular_values: &[f64],
    total_power: f64,
    noise_variance: f64,
    nt: usize,
    nr: usize,
) -> Result<Vec<RatePoint>, DmtError> {
    let max_rank = check_antennas(nt, nr)?;
    if singular_values.len() < max_rank {
        return Err(DmtError::Dimension(
            ErrorInfo::new("length-mismatch", "need one singular value per possible stream")
                .with_context("expected", max_rank)
                .with_context("found", singular_values.len()),
        ));
    }
    if !total_power.is_finite() || total_power < 0.0 || !noise_variance.is_finite() {
        return Err(DmtError::Numeric(
            ErrorInfo::new("invalid-budget", "power must be finite and >= 0")
                .with_context("total_power", total_power)
                .with_context("noise_variance", noise_variance),
        ));
    }

    let noise = noise_variance.max(NOISE_FLOOR);
    Ok((0..=max_rank)
        .map(|r| {
            let rate = if r == 0 {
                0.0
            } else {
                let power = total_power / r as f64;
                singular_values[..r]
                    .iter()
                    .map(|s| (1.0 + s * s * power / noise).log2())
                    .sum()
            };
            RatePoint {
                multiplexing: r,
                diversity: diversity_gain(nt, nr, r as f64),
                rate,
            }
        })
        .collect())
}
