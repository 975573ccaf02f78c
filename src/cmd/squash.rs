/*!
`squash.rs`

Implements `logrus squash [--yaml] <FILES>...`: shallow-merge JSON / YAML
mapping files, later files winning on key collisions, and print the result
(JSON by default, YAML with `--yaml`).
*/

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use crate::cmd::shared::load_mapping;
use crate::utils::{Logger, squash_json};

#[derive(Args, Debug)]
pub struct SquashArgs {
    /// Mapping files (JSON, or YAML by .yaml/.yml extension), lowest precedence first
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Print YAML instead of JSON
    #[arg(long)]
    pub yaml: bool,
}

pub fn execute_squash(args: SquashArgs, logger: &Logger) -> Result<()> {
    let mut values = Vec::with_capacity(args.files.len());
    for file in &args.files {
        logger.debug(format!("loading {}", file.display()));
        values.push(load_mapping(file)?);
    }

    let merged = squash_json(&values).context("only mapping files can be squashed")?;
    let rendered = if args.yaml {
        serde_yaml::to_string(&merged).context("failed to render YAML")?
    } else {
        serde_json::to_string_pretty(&merged)?
    };
    println!("{}", rendered.trim_end());
    Ok(())
}
