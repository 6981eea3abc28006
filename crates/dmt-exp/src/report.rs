use dmt_core::errors::DmtError;
use dmt_core::{RunProvenance, SchemaVersion};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::AnalysisConfig;
use crate::curves::{
    capacity_vs_snr, interpolate_outage, outage_curve, threshold_range, CapacityPoint,
    OutagePoint,
};
use crate::hash::stable_hash_string;
use crate::montecarlo::{run_monte_carlo, CancelToken};
use crate::stat::{summarize, SampleSummary};

/// Outage probability read off the curve at a marker threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdMark {
    /// Marker threshold in dB.
    pub threshold_db: f64,
    /// Interpolated probability, absent outside the simulated grid.
    pub probability: Option<f64>,
}

/// Complete output of an analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Schema of this payload.
    pub schema_version: SchemaVersion,
    /// Seed and solver provenance.
    pub provenance: RunProvenance,
    /// Configuration the report was produced from.
    pub config: AnalysisConfig,
    /// Distribution of the per-trial minimum stream SNR (dB).
    pub min_snr: SampleSummary,
    /// Outage probability over the threshold grid.
    pub outage: Vec<OutagePoint>,
    /// Outage probability at the configured marker thresholds.
    pub threshold_marks: Vec<ThresholdMark>,
    /// Mean capacity over the SNR grid.
    pub capacity: Vec<CapacityPoint>,
    /// SHA-256 of the canonical report with this field empty.
    pub analysis_hash: String,
}

impl AnalysisReport {
    /// Recomputes the content hash, ignoring the stored one.
    pub fn compute_hash(&self) -> Result<String, DmtError> {
        let mut unhashed = self.clone();
        unhashed.analysis_hash.clear();
        stable_hash_string(&unhashed)
    }

    /// Whether the stored hash matches the content.
    pub fn verify_hash(&self) -> Result<bool, DmtError> {
        Ok(self.compute_hash()? == self.analysis_hash)
    }
}

/// Runs the outage and capacity analysis described by `config`.
///
/// The outage batch and every capacity grid point share the master seed, so
/// a given configuration always reproduces the same report and hash.
pub fn analyze(config: &AnalysisConfig, cancel: &CancelToken) -> Result<AnalysisReport, DmtError> {
    config.validate()?;
    let spec = &config.analysis;
    let threads = config.runtime.threads;
    let grid = threshold_range(spec.min_snr_db, spec.max_snr_db, spec.snr_step_db)?;

    let outcomes = run_monte_carlo(
        &config.system,
        &config.solver,
        spec.trials,
        config.seed,
        cancel,
        threads,
    )?;
    let samples: Vec<f64> = outcomes.iter().map(|o| o.min_snr_db).collect();
    let outage = outage_curve(&samples, &grid);
    let threshold_marks = spec
        .thresholds
        .iter()
        .map(|&threshold_db| ThresholdMark {
            threshold_db,
            probability: interpolate_outage(&outage, threshold_db),
        })
        .collect();

    let capacity = capacity_vs_snr(
        &config.system,
        &config.solver,
        &grid,
        spec.trials,
        config.seed,
        cancel,
        threads,
    )?;

    let mut report = AnalysisReport {
        schema_version: SchemaVersion::default(),
        provenance: RunProvenance::new(config.seed, config.solver.iterations),
        config: config.clone(),
        min_snr: summarize(&samples, spec.histogram_bins),
        outage,
        threshold_marks,
        capacity,
        analysis_hash: String::new(),
    };
    report.analysis_hash = report.compute_hash()?;
    info!(
        trials = spec.trials,
        grid_points = grid.len(),
        hash = %report.analysis_hash,
        "analysis complete"
    );
    Ok(report)
}
