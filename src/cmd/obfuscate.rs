/*!
`obfuscate.rs`

Implements `logrus obfuscate <TEXT> [--show N] [--smear C]`: keep N characters
at each end of TEXT and mask the rest, e.g. for logging tokens.
*/

use anyhow::Result;
use clap::Args;

use crate::utils::{DEFAULT_SHOW_LENGTH, DEFAULT_SMEAR, Logger, obfuscate};

#[derive(Args, Debug)]
pub struct ObfuscateArgs {
    /// Text to obfuscate
    pub text: String,

    /// Characters left visible at each end
    #[arg(short, long, default_value_t = DEFAULT_SHOW_LENGTH)]
    pub show: usize,

    /// Replacement character for hidden characters
    #[arg(long, default_value_t = DEFAULT_SMEAR)]
    pub smear: char,
}

pub fn execute_obfuscate(args: ObfuscateArgs, logger: &Logger) -> Result<()> {
    if args.show > 0 && args.text.chars().count() <= args.show.saturating_mul(2) {
        logger.warning("text is too short to hide anything; printing it unchanged");
    }
    println!("{}", obfuscate(&args.text, args.show, args.smear));
    Ok(())
}
