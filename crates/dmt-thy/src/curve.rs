use dmt_core::errors::{check_grid_points, DmtError, ErrorInfo};
use serde::{Deserialize, Serialize};

use crate::check_antennas;

/// One point of the tradeoff curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeoffPoint {
    /// Multiplexing gain `r`.
    pub multiplexing: f64,
    /// Diversity gain `d(r)`.
    pub diversity: f64,
}

/// `(nt - r)(nr - r)`, clamped at zero.
pub fn diversity_gain(nt: usize, nr: usize, r: f64) -> f64 {
    ((nt as f64 - r) * (nr as f64 - r)).max(0.0)
}

/// Samples the optimal tradeoff for `r` in `[0, min(nt, nr)]` at `step`.
///
/// The grid is `k * step`; the endpoint `min(nt, nr)` is always present even
/// when it is not a multiple of `step`. A step so small that the grid would
/// exceed [`dmt_core::MAX_GRID_POINTS`] is a `grid-too-large` config error.
pub fn tradeoff_curve(nt: usize, nr: usize, step: f64) -> Result<Vec<TradeoffPoint>, DmtError> {
    let max_rank = check_antennas(nt, nr)? as f64;
    if !step.is_finite() || step <= 0.0 {
        return Err(DmtError::Config(
            ErrorInfo::new("invalid-step", "curve step must be positive and finite")
                .with_context("step", step),
        ));
    }

    let capacity = check_grid_points((max_rank / step).ceil() + 1.0)?;
    let mut points = Vec::with_capacity(capacity);
    let mut k = 0u64;
    loop {
        let r = k as f64 * step;
        if r >= max_rank - 1e-9 {
            break;
        }
        points.push(TradeoffPoint {
            multiplexing: r,
            diversity: diversity_gain(nt, nr, r),
        });
        k += 1;
    }
    points.push(TradeoffPoint {
        multiplexing: max_rank,
        diversity: 0.0,
    });
    Ok(points)
}

/// Integer-stream view of the curve, `r = 0, 1, ..., min(nt, nr)`.
pub fn integer_tradeoff_curve(nt: usize, nr: usize) -> Result<Vec<TradeoffPoint>, DmtError> {
    tradeoff_curve(nt, nr, 1.0)
}
