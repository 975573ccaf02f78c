/*!
`human_time.rs`

Implements `human-time [SECONDS] [--all]` (both the `logrus human-time`
subcommand and the standalone `human-time` binary).

  - SECONDS given : print its conversion
  - otherwise     : convert the first line of standard input and stop
  - `--all`       : with no SECONDS, convert every line of standard input
*/

use anyhow::Result;
use clap::Args;
use std::io::{self, Write};

use crate::humantime::{convert_lines, human_time};
use crate::utils::Logger;

#[derive(Args, Debug)]
pub struct HumanTimeArgs {
    /// Number of seconds (read from standard input when omitted)
    #[arg(allow_negative_numbers = true)]
    pub seconds: Option<i64>,

    /// Convert every line of standard input, not just the first
    #[arg(long)]
    pub all: bool,
}

pub fn execute_human_time(args: HumanTimeArgs, logger: &Logger) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some(seconds) = args.seconds {
        writeln!(out, "{}", human_time(seconds))?;
        return Ok(());
    }

    logger.debug(if args.all {
        "converting every line of standard input"
    } else {
        "converting the first line of standard input"
    });
    convert_lines(io::stdin().lock(), &mut out, args.all)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        args: HumanTimeArgs,
    }

    #[test]
    fn parses_seconds() {
        let cli = TestCli::try_parse_from(["t", "90061"]).unwrap();
        assert_eq!(cli.args.seconds, Some(90061));
        assert!(!cli.args.all);
    }

    #[test]
    fn parses_negative_seconds() {
        let cli = TestCli::try_parse_from(["t", "-90"]).unwrap();
        assert_eq!(cli.args.seconds, Some(-90));
    }

    #[test]
    fn no_argument_means_stdin() {
        let cli = TestCli::try_parse_from(["t", "--all"]).unwrap();
        assert_eq!(cli.args.seconds, None);
        assert!(cli.args.all);
    }

    #[test]
    fn rejects_non_numbers() {
        assert!(TestCli::try_parse_from(["t", "soon"]).is_err());
    }
}
