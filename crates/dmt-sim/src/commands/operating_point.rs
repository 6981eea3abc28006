use std::error::Error;
use std::path::PathBuf;

use clap::{ArgGroup, Args};
use dmt_thy::{multiplexing_for_error_probability, multiplexing_for_rate, OperatingPoint};
use serde::Serialize;

use super::emit_json;

#[derive(Args, Debug, Clone)]
#[command(group(ArgGroup::new("target").required(true).multiple(true).args(["rate", "error_probability"])))]
pub struct OperatingPointArgs {
    /// Transmit antennas.
    #[arg(long, default_value_t = 4)]
    pub nt: usize,
    /// Receive antennas.
    #[arg(long, default_value_t = 4)]
    pub nr: usize,
    /// Operating SNR in dB.
    #[arg(long, allow_negative_numbers = true)]
    pub snr_db: f64,
    /// Target sum rate in bit/s/Hz.
    #[arg(long)]
    pub rate: Option<f64>,
    /// Target error probability in (0, 1).
    #[arg(long)]
    pub error_probability: Option<f64>,
    /// Output directory; prints to stdout when omitted.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct OperatingPointOutput {
    nt: usize,
    nr: usize,
    snr_db: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    for_rate: Option<OperatingPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    for_error_probability: Option<OperatingPoint>,
}

pub fn run(args: &OperatingPointArgs) -> Result<(), Box<dyn Error>> {
    let snr = 10f64.powf(args.snr_db / 10.0);
    let for_rate = args
        .rate
        .map(|rate| multiplexing_for_rate(rate, snr, args.nt, args.nr))
        .transpose()?;
    let for_error_probability = args
        .error_probability
        .map(|pe| multiplexing_for_error_probability(pe, snr, args.nt, args.nr))
        .transpose()?;
    let output = OperatingPointOutput {
        nt: args.nt,
        nr: args.nr,
        snr_db: args.snr_db,
        for_rate,
        for_error_probability,
    };
    emit_json(args.out.as_deref(), "operating_point.json", &output)
}
