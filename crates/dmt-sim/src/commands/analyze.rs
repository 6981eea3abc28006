use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::atomic::Ordering;
use std::time::Duration;

use clap::Args;
use dmt_exp::{analyze, AnalysisConfig, AnalysisReport, CancelToken};
use tracing::{info, warn};

use super::{emit_csv, emit_json, SystemFlags};

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub system: SystemFlags,
    /// Trials per Monte Carlo batch.
    #[arg(long)]
    pub trials: Option<usize>,
    /// Worker threads.
    #[arg(long)]
    pub threads: Option<usize>,
    /// Abort the analysis after this many seconds.
    #[arg(long)]
    pub timeout_secs: Option<u64>,
    /// Output directory; prints to stdout when omitted.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Applies the analysis overrides on top of the shared flags and validates once.
pub fn resolve_config(args: &AnalyzeArgs) -> Result<AnalysisConfig, Box<dyn Error>> {
    let mut config = args.system.overlay()?;
    if let Some(trials) = args.trials {
        config.analysis.trials = trials;
    }
    if let Some(threads) = args.threads {
        config.runtime.threads = threads;
    }
    if args.timeout_secs.is_some() {
        config.runtime.timeout_secs = args.timeout_secs;
    }
    config.validate()?;
    Ok(config)
}

/// Builds the cancel token from the timeout and wires Ctrl-C into it.
pub fn run(args: &AnalyzeArgs) -> Result<(), Box<dyn Error>> {
    let config = resolve_config(args)?;
    let cancel = match config.runtime.timeout_secs {
        Some(secs) => CancelToken::with_timeout(Duration::from_secs(secs)),
        None => CancelToken::new(),
    };
    let flag = cancel.flag();
    if let Err(err) = ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);
    }) {
        warn!(%err, "could not install Ctrl-C handler");
    }
    run_with_cancel(&config, args.out.as_deref(), &cancel)
}

/// Runs a resolved analysis against an externally owned cancel token.
pub fn run_with_cancel(
    config: &AnalysisConfig,
    out: Option<&Path>,
    cancel: &CancelToken,
) -> Result<(), Box<dyn Error>> {
    info!(
        nt = config.system.nt,
        nr = config.system.nr,
        streams = config.system.streams,
        trials = config.analysis.trials,
        "starting analysis"
    );
    let report: AnalysisReport = analyze(config, cancel)?;

    emit_csv(out, "outage.csv", &report.outage)?;
    emit_csv(out, "threshold_marks.csv", &report.threshold_marks)?;
    emit_csv(out, "capacity.csv", &report.capacity)?;
    emit_json(out, "analysis_report.json", &report)
}
