use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use dmt_channel::generate_channel;
use dmt_core::RngHandle;
use dmt_svd::compute_approx_svd;
use dmt_thy::{achievable_rate_profile, integer_tradeoff_curve, tradeoff_curve, RatePoint, TradeoffPoint};
use serde::Serialize;

use super::{emit_csv, emit_json, SystemFlags};

#[derive(Args, Debug, Clone)]
pub struct CurveArgs {
    #[command(flatten)]
    pub system: SystemFlags,
    /// Spacing of the multiplexing gain grid.
    #[arg(long, default_value_t = 0.05)]
    pub step: f64,
    /// Integer stream counts only.
    #[arg(long)]
    pub integer: bool,
    /// Also draw a channel and tabulate the rate achievable at each rank.
    #[arg(long)]
    pub with_rates: bool,
    /// Output directory; prints to stdout when omitted.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct CurveOutput {
    nt: usize,
    nr: usize,
    curve: Vec<TradeoffPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rates: Option<Vec<RatePoint>>,
}

pub fn run(args: &CurveArgs) -> Result<(), Box<dyn Error>> {
    let config = args.system.resolve()?;
    let (nt, nr) = (config.system.nt, config.system.nr);
    let curve = if args.integer {
        integer_tradeoff_curve(nt, nr)?
    } else {
        tradeoff_curve(nt, nr, args.step)?
    };

    let rates = if args.with_rates {
        let mut rng = RngHandle::from_seed(config.seed);
        let h = generate_channel(nr, nt, config.system.model, &mut rng)?;
        let svd = compute_approx_svd(&h, nt.min(nr), &config.solver, &mut rng)?;
        Some(achievable_rate_profile(
            &svd.s,
            config.system.total_power,
            config.system.noise_variance,
            nt,
            nr,
        )?)
    } else {
        None
    };

    let out = args.out.as_deref();
    emit_csv(out, "tradeoff.csv", &curve)?;
    if let Some(rates) = &rates {
        emit_csv(out, "rates.csv", rates)?;
    }
    emit_json(out, "curve.json", &CurveOutput { nt, nr, curve, rates })
}
