use std::fs;
use std::path::Path;

use dmt_alloc::LinkBudget;
use dmt_channel::ChannelModel;
use dmt_core::errors::{check_stream_count, DmtError, ErrorInfo};
use dmt_svd::PowerOpts;
use serde::{Deserialize, Serialize};

use crate::serde::{from_yaml_slice, to_yaml_string};

fn config_error(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
}

/// Link configuration shared by sessions and Monte Carlo trials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemParams {
    /// Transmit antennas `Nt`.
    #[serde(default = "SystemParams::default_antennas")]
    pub nt: usize,
    /// Receive antennas `Nr`.
    #[serde(default = "SystemParams::default_antennas")]
    pub nr: usize,
    /// Multiplexed streams `r`, `1 <= r <= min(Nt, Nr)`.
    #[serde(default = "SystemParams::default_streams")]
    pub streams: usize,
    /// Total transmit power, split equally across streams.
    #[serde(default = "SystemParams::default_total_power")]
    pub total_power: f64,
    /// Receiver noise variance.
    #[serde(default = "SystemParams::default_noise_variance")]
    pub noise_variance: f64,
    /// Per-stream outage threshold in dB.
    #[serde(default = "SystemParams::default_snr_threshold_db")]
    pub snr_threshold_db: f64,
    /// Entry distribution of generated channels.
    #[serde(default)]
    pub model: ChannelModel,
}

impl SystemParams {
    fn default_antennas() -> usize {
        4
    }

    fn default_streams() -> usize {
        2
    }

    fn default_total_power() -> f64 {
        1.0
    }

    fn default_noise_variance() -> f64 {
        0.1
    }

    fn default_snr_threshold_db() -> f64 {
        5.0
    }

    /// Rejects antenna/stream counts that cannot be served and non-finite budgets.
    pub fn validate(&self) -> Result<(), DmtError> {
        check_stream_count(self.nt, self.nr, self.streams)?;
        if !self.total_power.is_finite() || self.total_power < 0.0 {
            return Err(DmtError::Numeric(
                config_error("invalid-budget", "total power must be finite and >= 0")
                    .with_context("total_power", self.total_power),
            ));
        }
        if !self.noise_variance.is_finite() || self.noise_variance < 0.0 {
            return Err(DmtError::Numeric(
                config_error("invalid-budget", "noise variance must be finite and >= 0")
                    .with_context("noise_variance", self.noise_variance),
            ));
        }
        if self.snr_threshold_db.is_nan() {
            return Err(DmtError::Numeric(config_error(
                "invalid-budget",
                "SNR threshold must not be NaN",
            )));
        }
        Ok(())
    }

    /// `min(Nt, Nr)`.
    pub fn max_streams(&self) -> usize {
        self.nt.min(self.nr)
    }

    /// Budget handed to the stream statistics engine.
    pub fn budget(&self) -> LinkBudget {
        LinkBudget {
            total_power: self.total_power,
            noise_variance: self.noise_variance,
            snr_threshold_db: self.snr_threshold_db,
        }
    }
}

impl Default for SystemParams {
    fn default() -> Self {
        Self {
            nt: Self::default_antennas(),
            nr: Self::default_antennas(),
            streams: Self::default_streams(),
            total_power: Self::default_total_power(),
            noise_variance: Self::default_noise_variance(),
            snr_threshold_db: Self::default_snr_threshold_db(),
            model: ChannelModel::default(),
        }
    }
}

/// Monte Carlo analysis knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSpec {
    /// Trials per batch.
    #[serde(default = "AnalysisSpec::default_trials")]
    pub trials: usize,
    /// Lower end of the threshold and SNR grids (dB).
    #[serde(default = "AnalysisSpec::default_min_snr_db")]
    pub min_snr_db: f64,
    /// Upper end of the threshold and SNR grids (dB).
    #[serde(default = "AnalysisSpec::default_max_snr_db")]
    pub max_snr_db: f64,
    /// Grid spacing (dB).
    #[serde(default = "AnalysisSpec::default_snr_step_db")]
    pub snr_step_db: f64,
    /// Thresholds at which the outage curve is read off.
    #[serde(default = "AnalysisSpec::default_thresholds")]
    pub thresholds: Vec<f64>,
    /// Bins of the minimum-SNR histogram.
    #[serde(default = "AnalysisSpec::default_histogram_bins")]
    pub histogram_bins: usize,
}

impl AnalysisSpec {
    fn default_trials() -> usize {
        500
    }

    fn default_min_snr_db() -> f64 {
        -10.0
    }

    fn default_max_snr_db() -> f64 {
        30.0
    }

    fn default_snr_step_db() -> f64 {
        2.0
    }

    fn default_thresholds() -> Vec<f64> {
        vec![0.0, 5.0, 10.0]
    }

    fn default_histogram_bins() -> usize {
        20
    }
}

impl Default for AnalysisSpec {
    fn default() -> Self {
        Self {
            trials: Self::default_trials(),
            min_snr_db: Self::default_min_snr_db(),
            max_snr_db: Self::default_max_snr_db(),
            snr_step_db: Self::default_snr_step_db(),
            thresholds: Self::default_thresholds(),
            histogram_bins: Self::default_histogram_bins(),
        }
    }
}

/// Execution resources for batch runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeSpec {
    /// Worker threads in the trial pool.
    #[serde(default = "RuntimeSpec::default_threads")]
    pub threads: usize,
    /// Wall-clock budget for a whole analysis, in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl RuntimeSpec {
    fn default_threads() -> usize {
        1
    }
}

impl Default for RuntimeSpec {
    fn default() -> Self {
        Self {
            threads: Self::default_threads(),
            timeout_secs: None,
        }
    }
}

/// Top-level analysis configuration, usually loaded from YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Master seed; trial `i` draws from substream `i`.
    #[serde(default = "AnalysisConfig::default_seed")]
    pub seed: u64,
    /// Link parameters.
    #[serde(default)]
    pub system: SystemParams,
    /// Eigensolver options.
    #[serde(default)]
    pub solver: PowerOpts,
    /// Monte Carlo knobs.
    #[serde(default)]
    pub analysis: AnalysisSpec,
    /// Execution resources.
    #[serde(default)]
    pub runtime: RuntimeSpec,
}

impl AnalysisConfig {
    fn default_seed() -> u64 {
        42
    }

    /// Checks every section before any computation starts.
    pub fn validate(&self) -> Result<(), DmtError> {
        self.system.validate()?;
        if self.solver.iterations == 0 {
            return Err(DmtError::Config(config_error(
                "solver-iterations",
                "power iteration needs at least one iteration",
            )));
        }
        if let Some(tol) = self.solver.tolerance {
            if !tol.is_finite() || tol <= 0.0 {
                return Err(DmtError::Config(
                    config_error("solver-tolerance", "tolerance must be positive and finite")
                        .with_context("tolerance", tol),
                ));
            }
        }
        let analysis = &self.analysis;
        if analysis.trials == 0 {
            return Err(DmtError::Config(
                config_error("trials", "analysis needs at least one trial")
                    .with_hint("set analysis.trials to a positive count"),
            ));
        }
        if analysis.histogram_bins == 0 {
            return Err(DmtError::Config(config_error(
                "histogram-bins",
                "histogram needs at least one bin",
            )));
        }
        if analysis.thresholds.iter().any(|t| !t.is_finite()) {
            return Err(DmtError::Config(config_error(
                "thresholds",
                "marker thresholds must be finite",
            )));
        }
        crate::curves::threshold_range(
            analysis.min_snr_db,
            analysis.max_snr_db,
            analysis.snr_step_db,
        )?;
        if self.runtime.threads == 0 {
            return Err(DmtError::Config(config_error(
                "threads",
                "runtime.threads must be at least 1",
            )));
        }
        Ok(())
    }

    /// Canonical YAML rendering of the configuration.
    pub fn to_yaml_string(&self) -> Result<String, DmtError> {
        to_yaml_string(self)
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            seed: Self::default_seed(),
            system: SystemParams::default(),
            solver: PowerOpts::default(),
            analysis: AnalysisSpec::default(),
            runtime: RuntimeSpec::default(),
        }
    }
}

/// Parses a YAML configuration file without validating it.
pub fn read_config<P: AsRef<Path>>(path: P) -> Result<AnalysisConfig, DmtError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|err| {
        DmtError::Serde(
            ErrorInfo::new("config_read", err.to_string())
                .with_context("path", path.display()),
        )
    })?;
    from_yaml_slice(&bytes, "analysis config")
}

/// Loads and validates a YAML configuration file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AnalysisConfig, DmtError> {
    let config = read_config(path)?;
    config.validate()?;
    Ok(config)
}
