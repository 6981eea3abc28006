use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use dmt_core::ChannelMatrix;
use dmt_exp::{from_json_slice, OptimizedSystem, Session};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{emit_csv, emit_json, SystemFlags};

#[derive(Args, Debug, Clone)]
pub struct OptimizeArgs {
    #[command(flatten)]
    pub system: SystemFlags,
    /// Channel JSON written by `generate`; a fresh channel is drawn when omitted.
    #[arg(long)]
    pub channel: Option<PathBuf>,
    /// Output directory; prints to stdout when omitted.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct ChannelFile {
    channel: ChannelMatrix,
}

#[derive(Debug, Serialize)]
struct OptimizeOutput {
    seed: u64,
    channel: ChannelMatrix,
    system: OptimizedSystem,
}

#[derive(Debug, Serialize)]
struct StreamRow {
    stream: usize,
    tx_antennas: String,
    rx_antennas: String,
    strength: f64,
    total_gain: f64,
    snr_db: f64,
    outage: bool,
    capacity: f64,
}

fn join_indices(indices: &[usize]) -> String {
    indices
        .iter()
        .map(|idx| idx.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn run(args: &OptimizeArgs) -> Result<(), Box<dyn Error>> {
    let mut config = args.system.overlay()?;
    let loaded = match &args.channel {
        Some(path) => {
            let file: ChannelFile = from_json_slice(&fs::read(path)?, "channel file")?;
            Some(file.channel)
        }
        None => None,
    };
    if let Some(h) = &loaded {
        // A loaded channel fixes the antenna counts.
        config.system.nr = h.rows();
        config.system.nt = h.cols();
    }
    config.validate()?;

    let mut session = Session::new(config.system.clone(), config.solver, config.seed)?;
    match loaded {
        Some(h) => session.load_channel(h)?,
        None => {
            session.generate()?;
        }
    }
    let system = session.optimize()?.clone();
    for stream in &system.streams {
        info!(snr_db = stream.snr_db, outage = stream.outage, "{}", stream);
    }

    let rows: Vec<StreamRow> = system
        .streams
        .iter()
        .map(|s| StreamRow {
            stream: s.stream_index,
            tx_antennas: join_indices(&s.tx_antennas),
            rx_antennas: join_indices(&s.rx_antennas),
            strength: s.strength,
            total_gain: s.total_gain,
            snr_db: s.snr_db,
            outage: s.outage,
            capacity: s.capacity,
        })
        .collect();
    let channel = session
        .channel()
        .cloned()
        .ok_or("session lost its channel")?;
    let output = OptimizeOutput {
        seed: config.seed,
        channel,
        system,
    };
    emit_json(args.out.as_deref(), "optimize.json", &output)?;
    emit_csv(args.out.as_deref(), "streams.csv", &rows)
}
