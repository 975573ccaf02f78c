use anyhow::Result;
use clap::{Parser, Subcommand};

use logrus::cmd::{
    self, DispatchArgs, HumanTimeArgs, MkdirArgs, ObfuscateArgs, ResolveArgs, RunArgs,
    SquashArgs,
};
use logrus::subcommand::SearchPath;

/// Logrus - git-style subcommand dispatch and shell-scripting helpers
///
/// Command layout:
///   logrus dispatch [--wait] <DRIVER> [TOKENS...]
///   logrus resolve  [--json] <DRIVER> [TOKENS...]
///   logrus human-time [SECONDS] [--all]
///   logrus obfuscate <TEXT> [--show N] [--smear C]
///   logrus squash [--yaml] <FILES...>
///   logrus mkdir <PATHS...>
///   logrus run <COMMAND...>
///
/// Global flags / env:
///   -v / -vv          Increase verbosity
///   -q / --quiet      Errors only
///   --path DIRS       Search path for subcommands (or LOGRUS_PATH, else PATH)
///   LOGRUS_LOG_LEVEL  CRITICAL|ERROR|WARNING|INFO|DEBUG, overrides -v/-q
///   LOGRUS_LOG_FORMAT Log line template ({time} {level} {name} {message})
///
/// Examples:
///   logrus resolve git remote add origin
///   logrus dispatch --wait mytool deploy staging
///   echo 90061 | logrus human-time
#[derive(Parser, Debug)]
#[command(
    name = "logrus",
    version,
    author,
    about = "Logrus - git-style subcommand dispatch and shell-scripting helpers",
    propagate_version = true,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Silence all non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Search path for subcommands (PATH syntax)
    #[arg(long = "path", global = true, value_name = "DIRS")]
    path: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Hand off to the git-style subcommand named by the arguments
    Dispatch(DispatchArgs),

    /// Show which subcommand `dispatch` would run
    Resolve(ResolveArgs),

    /// Convert seconds into days / hours / minutes / seconds
    HumanTime(HumanTimeArgs),

    /// Mask the middle of a string
    Obfuscate(ObfuscateArgs),

    /// Shallow-merge JSON / YAML mapping files
    Squash(SquashArgs),

    /// Create directories, parents included
    Mkdir(MkdirArgs),

    /// Run a command and print its stdout
    Run(RunArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let logger = cmd::shared::build_logger("logrus", cli.verbose, cli.quiet)?;

    // Search path: --path flag > LOGRUS_PATH env > PATH
    let search = cli
        .path
        .clone()
        .or_else(|| {
            std::env::var("LOGRUS_PATH")
                .ok()
                .filter(|s| !s.trim().is_empty())
        })
        .map(|raw| SearchPath::from_raw(raw))
        .unwrap_or_else(SearchPath::from_env);

    match cli.command {
        Commands::Dispatch(args) => cmd::execute_dispatch(args, &search, &logger),
        Commands::Resolve(args) => cmd::execute_resolve(args, &search, &logger),
        Commands::HumanTime(args) => cmd::execute_human_time(args, &logger),
        Commands::Obfuscate(args) => cmd::execute_obfuscate(args, &logger),
        Commands::Squash(args) => cmd::execute_squash(args, &logger),
        Commands::Mkdir(args) => cmd::execute_mkdir(args, &logger),
        Commands::Run(args) => cmd::execute_run(args, &logger),
    }
}
