//! Subcommand implementations and the flags they share.

pub mod analyze;
pub mod curve;
pub mod generate;
pub mod operating_point;
pub mod optimize;

use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use dmt_channel::ChannelModel;
use dmt_exp::{read_config, write_csv, write_json, AnalysisConfig};
use serde::Serialize;

/// Channel entry distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModelArg {
    /// Complex Gaussian entries.
    Rayleigh,
    /// Uniform real and imaginary parts.
    Uniform,
}

impl From<ModelArg> for ChannelModel {
    fn from(value: ModelArg) -> Self {
        match value {
            ModelArg::Rayleigh => ChannelModel::Rayleigh,
            ModelArg::Uniform => ChannelModel::Uniform,
        }
    }
}

/// Link and solver flags; each one overrides the matching `--config` value.
#[derive(Args, Debug, Clone, Default)]
pub struct SystemFlags {
    /// YAML analysis configuration to start from.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Transmit antennas.
    #[arg(long)]
    pub nt: Option<usize>,
    /// Receive antennas.
    #[arg(long)]
    pub nr: Option<usize>,
    /// Multiplexed streams.
    #[arg(long)]
    pub streams: Option<usize>,
    /// Total transmit power.
    #[arg(long)]
    pub total_power: Option<f64>,
    /// Receiver noise variance.
    #[arg(long)]
    pub noise_variance: Option<f64>,
    /// Outage threshold in dB.
    #[arg(long)]
    pub snr_threshold_db: Option<f64>,
    /// Channel entry distribution.
    #[arg(long, value_enum)]
    pub model: Option<ModelArg>,
    /// Master seed.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Power-iteration cap per eigenpair.
    #[arg(long)]
    pub iterations: Option<usize>,
    /// Early-exit tolerance for power iteration.
    #[arg(long)]
    pub tolerance: Option<f64>,
}

impl SystemFlags {
    /// Loads `--config` (or the defaults) and validates it with every flag applied.
    pub fn resolve(&self) -> Result<AnalysisConfig, Box<dyn Error>> {
        let config = self.overlay()?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `--config` (or the defaults) and applies every flag on top.
    ///
    /// The result is not validated yet, so callers can still fix fields
    /// (such as the shape of a loaded channel) before checking it.
    pub fn overlay(&self) -> Result<AnalysisConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => AnalysisConfig::default(),
        };
        let system = &mut config.system;
        if let Some(nt) = self.nt {
            system.nt = nt;
        }
        if let Some(nr) = self.nr {
            system.nr = nr;
        }
        if let Some(streams) = self.streams {
            system.streams = streams;
        }
        if let Some(power) = self.total_power {
            system.total_power = power;
        }
        if let Some(noise) = self.noise_variance {
            system.noise_variance = noise;
        }
        if let Some(threshold) = self.snr_threshold_db {
            system.snr_threshold_db = threshold;
        }
        if let Some(model) = self.model {
            system.model = model.into();
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(iterations) = self.iterations {
            config.solver.iterations = iterations;
        }
        if self.tolerance.is_some() {
            config.solver.tolerance = self.tolerance;
        }
        Ok(config)
    }
}

/// Writes `value` to `out/file`, or prints it when no directory is given.
pub(crate) fn emit_json<T: Serialize>(
    out: Option<&Path>,
    file: &str,
    value: &T,
) -> Result<(), Box<dyn Error>> {
    match out {
        Some(dir) => write_json(&dir.join(file), value)?,
        None => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}

/// Writes a CSV table next to the JSON artefacts; skipped on stdout output.
pub(crate) fn emit_csv<T: Serialize>(
    out: Option<&Path>,
    file: &str,
    rows: &[T],
) -> Result<(), Box<dyn Error>> {
    if let Some(dir) = out {
        write_csv(&dir.join(file), rows)?;
    }
    Ok(())
}
