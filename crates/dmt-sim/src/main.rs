use std::error::Error;

use clap::Parser;
use dmt_sim::{dispatch, init_logging, Cli};

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);
    dispatch(cli.command)
}
