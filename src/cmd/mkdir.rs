/*!
`mkdir.rs`

Implements `logrus mkdir <PATHS>...` with `mkdir -p` semantics.
*/

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::utils::{Logger, mkdir_p};

#[derive(Args, Debug)]
pub struct MkdirArgs {
    /// Directories to create (parents included)
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<PathBuf>,
}

pub fn execute_mkdir(args: MkdirArgs, logger: &Logger) -> Result<()> {
    for path in &args.paths {
        mkdir_p(path)?;
        logger.info(format!("ensured {}", path.display()));
    }
    Ok(())
}
