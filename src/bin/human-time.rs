//! `human-time [SECONDS] [--all]` - print a number of seconds as
//! "1 days 2 hours 3 minutes 4 seconds".
//!
//! With no SECONDS argument the first line of standard input is converted.

use anyhow::Result;
use clap::Parser;

use logrus::cmd::{self, HumanTimeArgs};

#[derive(Parser, Debug)]
#[command(
    name = "human-time",
    version,
    about = "Convert seconds into days / hours / minutes / seconds"
)]
struct Cli {
    #[command(flatten)]
    args: HumanTimeArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let logger = cmd::shared::build_logger("human-time", 0, false)?;
    cmd::execute_human_time(cli.args, &logger)
}
