#![deny(missing_docs)]
#![doc = "Orchestration for the DMT engine: explicit session context, parallel Monte Carlo trials, outage and capacity curves, YAML configuration and hashed analysis reports."]

/// YAML configuration and system parameters.
pub mod config;
/// Outage and capacity curves over Monte Carlo batches.
pub mod curves;
/// JSON and CSV artefact writers.
pub mod export;
/// Canonical hashing helpers.
pub mod hash;
/// Parallel, cancellable trial batches.
pub mod montecarlo;
/// Full analysis runs and their reports.
pub mod report;
/// Canonical JSON serde helpers.
pub mod serde;
/// Generate/optimize session context.
pub mod session;
/// Statistical aggregation primitives.
pub mod stat;

pub use config::{
    load_config, read_config, AnalysisConfig, AnalysisSpec, RuntimeSpec, SystemParams,
};
pub use curves::{
    capacity_vs_snr, interpolate_outage, outage_curve, threshold_range, CapacityPoint,
    OutagePoint,
};
pub use export::{write_csv, write_json};
pub use hash::stable_hash_string;
pub use montecarlo::{run_monte_carlo, run_trial, CancelToken, TrialOutcome};
pub use report::{analyze, AnalysisReport, ThresholdMark};
pub use session::{optimize_channel, OptimizedSystem, Session};
pub use stat::{summarize, Histogram, Quantiles, SampleSummary};

pub use crate::serde::{from_json_slice, from_yaml_slice, to_canonical_json_bytes, to_yaml_string};
