use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use dmt_core::ChannelMatrix;
use dmt_exp::Session;
use serde::Serialize;
use tracing::info;

use super::{emit_json, SystemFlags};

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub system: SystemFlags,
    /// Output directory; prints to stdout when omitted.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct GenerateOutput {
    seed: u64,
    nr: usize,
    nt: usize,
    mean_power: f64,
    channel: ChannelMatrix,
}

pub fn run(args: &GenerateArgs) -> Result<(), Box<dyn Error>> {
    let config = args.system.resolve()?;
    let mut session = Session::new(config.system.clone(), config.solver, config.seed)?;
    let channel = session.generate()?.clone();
    info!(nr = channel.rows(), nt = channel.cols(), "generated channel");
    let output = GenerateOutput {
        seed: config.seed,
        nr: channel.rows(),
        nt: channel.cols(),
        mean_power: channel.mean_power(),
        channel,
    };
    emit_json(args.out.as_deref(), "channel.json", &output)
}
