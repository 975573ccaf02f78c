/*!
`run.rs`

Implements `logrus run <COMMAND>...`: run a program and print its captured
stdout. A single argument is split with shell-word rules
(`logrus run "git log -1"`); several arguments are used as the argv directly.
*/

use anyhow::Result;
use clap::Args;

use crate::utils::{CommandLine, Logger, run};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Command line (one quoted string) or program followed by its arguments
    #[arg(
        value_name = "COMMAND",
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}

impl RunArgs {
    pub fn command_line(&self) -> CommandLine {
        match self.command.as_slice() {
            [line] => CommandLine::Line(line.clone()),
            argv => CommandLine::Argv(argv.to_vec()),
        }
    }
}

pub fn execute_run(args: RunArgs, logger: &Logger) -> Result<()> {
    let command = args.command_line();
    logger.debug(format!("running {command:?}"));
    print!("{}", run(command)?);
    Ok(())
}
