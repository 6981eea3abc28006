use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use dmt_alloc::min_snr_db;
use dmt_channel::generate_channel;
use dmt_core::errors::{DmtError, ErrorInfo};
use dmt_core::{derive_substream_seed, RngHandle};
use dmt_svd::PowerOpts;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::SystemParams;
use crate::session::optimize_channel;

const CANCELLED: &str = "cancelled";

/// Cooperative cancellation shared between a batch and its controller.
///
/// Cancelled once the flag is raised or the optional deadline has passed.
/// Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancelToken {
    /// Token that only cancels when [`CancelToken::cancel`] is called.
    pub fn new() -> Self {
        Self::default()
    }

    /// Token that additionally expires `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
            deadline: Some(Instant::now() + timeout),
        }
    }

    /// Raises the flag.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Shared flag, for signal handlers.
    pub fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }

    /// Whether the flag is raised or the deadline has passed.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
            || self
                .deadline
                .map(|deadline| Instant::now() >= deadline)
                .unwrap_or(false)
    }
}

/// Figures of merit for one generate, decompose, allocate pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrialOutcome {
    /// `10 log10(max(min stream SNR, 1e-12))`.
    pub min_snr_db: f64,
    /// Summed capacity of all multiplexed streams.
    pub capacity: f64,
}

/// Runs a single trial from its own seed.
pub fn run_trial(
    params: &SystemParams,
    opts: &PowerOpts,
    seed: u64,
) -> Result<TrialOutcome, DmtError> {
    let mut rng = RngHandle::from_seed(seed);
    let h = generate_channel(params.nr, params.nt, params.model, &mut rng)?;
    let system = optimize_channel(&h, params, opts, &mut rng)?;
    let worst = min_snr_db(&system.streams).ok_or_else(|| {
        DmtError::Computation(ErrorInfo::new("no-streams", "trial produced no streams"))
    })?;
    Ok(TrialOutcome {
        min_snr_db: worst,
        capacity: system.total_capacity,
    })
}

fn cancelled_error(completed: usize, trials: usize) -> DmtError {
    DmtError::Computation(
        ErrorInfo::new(CANCELLED, "trial batch cancelled")
            .with_context("completed", completed)
            .with_context("trials", trials),
    )
}

/// Runs `trials` independent trials on a pool of `threads` workers.
///
/// Trial `i` is seeded from substream `i` of `seed`, and outcomes are
/// returned in trial order, so the result does not depend on `threads`.
/// The token is polled before each trial; a cancelled batch is an error.
pub fn run_monte_carlo(
    params: &SystemParams,
    opts: &PowerOpts,
    trials: usize,
    seed: u64,
    cancel: &CancelToken,
    threads: usize,
) -> Result<Vec<TrialOutcome>, DmtError> {
    params.validate()?;
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads.max(1))
        .build()
        .map_err(|err| {
            DmtError::Computation(ErrorInfo::new("thread_pool", err.to_string()))
        })?;

    let completed = AtomicUsize::new(0);
    let results: Result<Vec<TrialOutcome>, DmtError> = pool.install(|| {
        (0..trials)
            .into_par_iter()
            .map(|trial| {
                if cancel.is_cancelled() {
                    return Err(cancelled_error(0, trials));
                }
                let outcome = run_trial(params, opts, derive_substream_seed(seed, trial as u64))?;
                completed.fetch_add(1, Ordering::Relaxed);
                Ok(outcome)
            })
            .collect()
    });

    match results {
        Ok(outcomes) => {
            info!(trials, threads, "monte carlo batch complete");
            Ok(outcomes)
        }
        Err(err) if err.code() == CANCELLED => {
            Err(cancelled_error(completed.load(Ordering::SeqCst), trials))
        }
        Err(err) => Err(err),
    }
}
