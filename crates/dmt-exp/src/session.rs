use dmt_alloc::{allocate_groups, compute_stream_stats, multiplexed_capacity, weakest_stream, StreamGroup};
use dmt_channel::generate_channel;
use dmt_core::errors::{DmtError, ErrorInfo};
use dmt_core::{ChannelMatrix, RngHandle};
use dmt_svd::{compute_approx_svd, select_leaders, Leaders, PowerOpts, SvdResult};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SystemParams;

/// Result of one decompose, allocate and measure pass over a channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizedSystem {
    /// Approximate top-`r` decomposition.
    pub svd: SvdResult,
    /// Leader antenna per stream on each side.
    pub leaders: Leaders,
    /// Transmit antenna groups, one per stream.
    pub tx_groups: Vec<Vec<usize>>,
    /// Receive antenna groups, one per stream.
    pub rx_groups: Vec<Vec<usize>>,
    /// Per-stream statistics.
    pub streams: Vec<StreamGroup>,
    /// Stream with the smallest singular value.
    pub weakest: Option<usize>,
    /// Summed capacity over every multiplexed stream.
    pub total_capacity: f64,
}

/// Runs SVD, leader selection, allocation and statistics for `h`.
pub fn optimize_channel<R: Rng + ?Sized>(
    h: &ChannelMatrix,
    params: &SystemParams,
    opts: &PowerOpts,
    rng: &mut R,
) -> Result<OptimizedSystem, DmtError> {
    let r = params.streams;
    let svd = compute_approx_svd(h, r, opts, rng)?;
    let leaders = select_leaders(&svd);
    let strengths = &svd.s;
    let tx_groups = allocate_groups(h.cols(), r, &leaders.tx, strengths)?;
    let rx_groups = allocate_groups(h.rows(), r, &leaders.rx, strengths)?;
    let streams = compute_stream_stats(h, &tx_groups, &rx_groups, strengths, &params.budget())?;
    let weakest = weakest_stream(&streams);
    let total_capacity = multiplexed_capacity(&streams, r);
    Ok(OptimizedSystem {
        svd,
        leaders,
        tx_groups,
        rx_groups,
        streams,
        weakest,
        total_capacity,
    })
}

/// Explicit context holding the current channel and its optimization.
///
/// Generating a new channel drops the previous optimization, so the two can
/// never describe different realizations.
#[derive(Debug, Clone)]
pub struct Session {
    params: SystemParams,
    opts: PowerOpts,
    seed: u64,
    rng: RngHandle,
    channel: Option<ChannelMatrix>,
    optimized: Option<OptimizedSystem>,
}

impl Session {
    /// Creates an empty session after validating `params`.
    pub fn new(params: SystemParams, opts: PowerOpts, seed: u64) -> Result<Self, DmtError> {
        params.validate()?;
        Ok(Self {
            params,
            opts,
            seed,
            rng: RngHandle::from_seed(seed),
            channel: None,
            optimized: None,
        })
    }

    /// Link parameters in effect.
    pub fn params(&self) -> &SystemParams {
        &self.params
    }

    /// Current channel, if one was generated or loaded.
    pub fn channel(&self) -> Option<&ChannelMatrix> {
        self.channel.as_ref()
    }

    /// Latest optimization of the current channel.
    pub fn optimized(&self) -> Option<&OptimizedSystem> {
        self.optimized.as_ref()
    }

    /// Draws a fresh channel, replacing the previous one.
    pub fn generate(&mut self) -> Result<&ChannelMatrix, DmtError> {
        let h = generate_channel(self.params.nr, self.params.nt, self.params.model, &mut self.rng)?;
        self.optimized = None;
        Ok(self.channel.insert(h))
    }

    /// Installs an externally supplied channel of matching shape.
    pub fn load_channel(&mut self, h: ChannelMatrix) -> Result<(), DmtError> {
        if h.rows() != self.params.nr || h.cols() != self.params.nt {
            return Err(DmtError::Dimension(
                ErrorInfo::new("channel-shape", "channel does not match the antenna counts")
                    .with_context("rows", h.rows())
                    .with_context("cols", h.cols())
                    .with_context("nr", self.params.nr)
                    .with_context("nt", self.params.nt),
            ));
        }
        self.optimized = None;
        self.channel = Some(h);
        Ok(())
    }

    /// Changes the stream count; the channel is kept, the optimization dropped.
    pub fn set_streams(&mut self, streams: usize) -> Result<(), DmtError> {
        let mut params = self.params.clone();
        params.streams = streams;
        params.validate()?;
        self.params = params;
        self.optimized = None;
        Ok(())
    }

    /// Decomposes the current channel and allocates its antennas.
    pub fn optimize(&mut self) -> Result<&OptimizedSystem, DmtError> {
        let h = self.channel.as_ref().ok_or_else(|| {
            DmtError::Computation(
                ErrorInfo::new("channel-missing", "no channel to optimize")
                    .with_hint("generate or load a channel first"),
            )
        })?;
        let system = optimize_channel(h, &self.params, &self.opts, &mut self.rng)?;
        debug!(
            streams = system.streams.len(),
            capacity = system.total_capacity,
            "optimized session channel"
        );
        Ok(self.optimized.insert(system))
    }

    /// Clears channel and optimization and rewinds the RNG to the seed.
    pub fn reset(&mut self) {
        self.rng = RngHandle::from_seed(self.seed);
        self.channel = None;
        self.optimized = None;
    }
}
