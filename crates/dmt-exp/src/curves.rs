use dmt_alloc::stats::NOISE_FLOOR;
use dmt_core::errors::{check_grid_points, DmtError, ErrorInfo};
use dmt_svd::PowerOpts;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SystemParams;
use crate::montecarlo::{run_monte_carlo, CancelToken};

/// Outage probability at one threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutagePoint {
    /// Threshold in dB.
    pub threshold_db: f64,
    /// Fraction of trials whose weakest stream fell strictly below the threshold.
    pub probability: f64,
}

/// Mean summed capacity at one operating SNR.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacityPoint {
    /// Transmit SNR `P / N` in dB.
    pub snr_db: f64,
    /// Average over trials of the summed stream capacity (bit/s/Hz).
    pub mean_capacity: f64,
}

/// Inclusive grid `min, min + step, ..., <= max`.
///
/// Grids longer than [`dmt_core::MAX_GRID_POINTS`] are rejected.
pub fn threshold_range(min: f64, max: f64, step: f64) -> Result<Vec<f64>, DmtError> {
    if !(step.is_finite() && step > 0.0) || !min.is_finite() || !max.is_finite() || min > max {
        return Err(DmtError::Config(
            ErrorInfo::new("threshold-range", "grid needs finite min <= max and step > 0")
                .with_context("min", min)
                .with_context("max", max)
                .with_context("step", step),
        ));
    }
    let count = check_grid_points(((max - min) / step + 1e-9).floor() + 1.0)? - 1;
    Ok((0..=count).map(|k| min + k as f64 * step).collect())
}

/// Outage probability of `samples` (minimum stream SNRs in dB) at each threshold.
///
/// An empty sample set gives probability zero everywhere.
pub fn outage_curve(samples: &[f64], thresholds: &[f64]) -> Vec<OutagePoint> {
    let total = samples.len().max(1) as f64;
    thresholds
        .iter()
        .map(|&threshold_db| OutagePoint {
            threshold_db,
            probability: samples.iter().filter(|&&s| s < threshold_db).count() as f64 / total,
        })
        .collect()
}

/// Linear interpolation of `curve` at `target`, `None` outside its range.
///
/// `curve` must be sorted by threshold.
pub fn interpolate_outage(curve: &[OutagePoint], target: f64) -> Option<f64> {
    let first = curve.first()?;
    let last = curve.last()?;
    if target < first.threshold_db || target > last.threshold_db {
        return None;
    }
    let upper = curve
        .iter()
        .position(|point| point.threshold_db >= target)
        .unwrap_or(curve.len() - 1);
    if upper == 0 {
        return Some(first.probability);
    }
    let (lo, hi) = (curve[upper - 1], curve[upper]);
    let span = hi.threshold_db - lo.threshold_db;
    if span <= 0.0 {
        return Some(hi.probability);
    }
    let t = (target - lo.threshold_db) / span;
    Some(lo.probability + t * (hi.probability - lo.probability))
}

/// Average summed capacity as the transmit SNR sweeps `snr_grid_db`.
///
/// At each grid point the total power is `10^(snr/10) * noise`, with the
/// noise floored at [`NOISE_FLOOR`] as in the stream statistics. Every point
/// reuses the same trial seeds, so the curve compares identical channels.
pub fn capacity_vs_snr(
    params: &SystemParams,
    opts: &PowerOpts,
    snr_grid_db: &[f64],
    trials: usize,
    seed: u64,
    cancel: &CancelToken,
    threads: usize,
) -> Result<Vec<CapacityPoint>, DmtError> {
    let noise = params.noise_variance.max(NOISE_FLOOR);
    let mut points = Vec::with_capacity(snr_grid_db.len());
    for &snr_db in snr_grid_db {
        let mut point_params = params.clone();
        point_params.total_power = 10f64.powf(snr_db / 10.0) * noise;
        let outcomes = run_monte_carlo(&point_params, opts, trials, seed, cancel, threads)?;
        let mean_capacity = if outcomes.is_empty() {
            0.0
        } else {
            outcomes.iter().map(|o| o.capacity).sum::<f64>() / outcomes.len() as f64
        };
        debug!(snr_db, mean_capacity, "capacity grid point");
        points.push(CapacityPoint {
            snr_db,
            mean_capacity,
        });
    }
    Ok(points)
}
