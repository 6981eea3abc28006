//! Command-line front end for the DMT engine.
//!
//! Every subcommand prints pretty JSON to stdout, or, with `--out DIR`,
//! writes JSON (plus CSV tables for curves) into that directory.

use std::error::Error;

use clap::{Parser, Subcommand};

pub mod commands;
mod logging;

pub use logging::init_logging;

use commands::{
    analyze::{self, AnalyzeArgs},
    curve::{self, CurveArgs},
    generate::{self, GenerateArgs},
    operating_point::{self, OperatingPointArgs},
    optimize::{self, OptimizeArgs},
};

/// Top-level parser.
#[derive(Parser, Debug)]
#[command(name = "dmt-sim", about = "MIMO diversity-multiplexing tradeoff explorer")]
pub struct Cli {
    /// Default log filter when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Draw a random channel matrix.
    Generate(GenerateArgs),
    /// Decompose a channel, allocate antenna groups and report stream statistics.
    Optimize(OptimizeArgs),
    /// Emit the theoretical tradeoff curve, optionally with per-rank rates.
    Curve(CurveArgs),
    /// Solve for the operating point meeting a target rate or error probability.
    OperatingPoint(OperatingPointArgs),
    /// Monte Carlo outage and capacity analysis.
    Analyze(AnalyzeArgs),
}

/// Runs one parsed subcommand.
pub fn dispatch(command: Command) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Generate(args) => generate::run(&args),
        Command::Optimize(args) => optimize::run(&args),
        Command::Curve(args) => curve::run(&args),
        Command::OperatingPoint(args) => operating_point::run(&args),
        Command::Analyze(args) => analyze::run(&args),
    }
}
