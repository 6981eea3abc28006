use std::fmt;

use dmt_core::errors::{DmtError, ErrorInfo};
use dmt_core::ChannelMatrix;
use serde::{Deserialize, Serialize};

/// Floor applied to the noise variance before dividing.
pub const NOISE_FLOOR: f64 = 1e-18;
/// Offset added before taking `log10` of a linear SNR.
pub const SNR_LOG_EPS: f64 = 1e-12;

/// Power and noise budget shared by every stream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinkBudget {
    /// Total transmit power, split equally across streams.
    pub total_power: f64,
    /// Receiver noise variance.
    pub noise_variance: f64,
    /// A stream below this SNR (dB) is in outage.
    pub snr_threshold_db: f64,
}

impl LinkBudget {
    fn validate(&self) -> Result<(), DmtError> {
        for (name, value) in [
            ("total_power", self.total_power),
            ("noise_variance", self.noise_variance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(DmtError::Numeric(
                    ErrorInfo::new("invalid-budget", "power and noise must be finite and >= 0")
                        .with_context(name, value),
                ));
            }
        }
        if self.snr_threshold_db.is_nan() {
            return Err(DmtError::Numeric(ErrorInfo::new(
                "invalid-budget",
                "SNR threshold must not be NaN",
            )));
        }
        Ok(())
    }
}

/// Per-stream antenna grouping with its link statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamGroup {
    /// Stream position (0 = strongest singular mode).
    pub stream_index: usize,
    /// Transmit antennas, leader first.
    pub tx_antennas: Vec<usize>,
    /// Receive antennas, leader first.
    pub rx_antennas: Vec<usize>,
    /// Singular value of the stream's mode.
    pub strength: f64,
    /// Sum of `|H[rx][tx]|^2` over the group's antenna pairs.
    pub total_gain: f64,
    /// Linear SNR.
    pub snr_linear: f64,
    /// SNR in dB.
    pub snr_db: f64,
    /// Whether the stream falls below the outage threshold.
    pub outage: bool,
    /// Shannon capacity `log2(1 + snr)` in bit/s/Hz.
    pub capacity: f64,
}

impl fmt::Display for StreamGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stream {} ({}Tx × {}Rx)",
            self.stream_index + 1,
            self.tx_antennas.len(),
            self.rx_antennas.len()
        )
    }
}

/// `10 log10(snr + eps)`.
pub fn snr_to_db(snr_linear: f64) -> f64 {
    10.0 * (snr_linear + SNR_LOG_EPS).log10()
}

/// Computes SNR, outage and capacity for every stream group.
///
/// Power is allocated equally (`total_power / r`); the stream's gain is the
/// aggregate energy between its transmit and receive groups.
pub fn compute_stream_stats(
    h: &ChannelMatrix,
    tx_groups: &[Vec<usize>],
    rx_groups: &[Vec<usize>],
    strengths: &[f64],
    budget: &LinkBudget,
) -> Result<Vec<StreamGroup>, DmtError> {
    budget.validate()?;
    let r = tx_groups.len();
    if r == 0 || rx_groups.len() != r || strengths.len() != r {
        return Err(DmtError::Dimension(
            ErrorInfo::new("group-count", "tx, rx and strength counts must match and be >= 1")
                .with_context("tx_groups", r)
                .with_context("rx_groups", rx_groups.len())
                .with_context("strengths", strengths.len()),
        ));
    }

    let power_per_stream = budget.total_power / r as f64;
    let noise = budget.noise_variance.max(NOISE_FLOOR);
    let mut streams = Vec::with_capacity(r);
    for (stream_index, ((tx_set, rx_set), &strength)) in tx_groups
        .iter()
        .zip(rx_groups.iter())
        .zip(strengths.iter())
        .enumerate()
    {
        let mut total_gain = 0.0;
        for &tx in tx_set {
            for &rx in rx_set {
                let entry = h.try_get(rx, tx).ok_or_else(|| {
                    DmtError::Dimension(
                        ErrorInfo::new("antenna-out-of-range", "group references a missing antenna")
                            .with_context("stream", stream_index)
                            .with_context("tx", tx)
                            .with_context("rx", rx),
                    )
                })?;
                total_gain += entry.norm_sqr();
            }
        }
        let snr_linear = power_per_stream * total_gain / noise;
        let snr_db = snr_to_db(snr_linear);
        streams.push(StreamGroup {
            stream_index,
            tx_antennas: tx_set.clone(),
            rx_antennas: rx_set.clone(),
            strength,
            total_gain,
            snr_linear,
            snr_db,
            outage: snr_db < budget.snr_threshold_db,
            capacity: (1.0 + snr_linear).log2(),
        });
    }
    Ok(streams)
}

/// Index of the stream with the smallest strength (first on ties).
pub fn weakest_stream(streams: &[StreamGroup]) -> Option<usize> {
    let mut weakest: Option<usize> = None;
    for (idx, stream) in streams.iter().enumerate() {
        match weakest {
            Some(current) if stream.strength >= streams[current].strength => {}
            _ => weakest = Some(idx),
        }
    }
    weakest
}

/// Summed capacity of the first `multiplexed` streams.
pub fn multiplexed_capacity(streams: &[StreamGroup], multiplexed: usize) -> f64 {
    streams.iter().take(multiplexed).map(|s| s.capacity).sum()
}

/// Smallest linear SNR across streams, `None` when there are none.
pub fn min_snr_linear(streams: &[StreamGroup]) -> Option<f64> {
    streams.iter().map(|s| s.snr_linear).reduce(f64::min)
}

/// `10 log10(max(min_snr, 1e-12))`, the per-trial figure of merit.
pub fn min_snr_db(streams: &[StreamGroup]) -> Option<f64> {
    min_snr_linear(streams).map(|snr| 10.0 * snr.max(SNR_LOG_EPS).log10())
}

/// Number of streams currently in outage.
pub fn outage_count(streams: &[StreamGroup]) -> usize {
    streams.iter().filter(|s| s.outage).count()
}
