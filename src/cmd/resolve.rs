/*!
`resolve.rs`

Implements `logrus resolve [--json] <DRIVER> [TOKENS...]`: show which
executable `dispatch` would hand off to, without running it.

JSON Output Shape:
{
  "status": "ok",
  "command": "git-remote-add",
  "executable": "/usr/local/bin/git-remote-add",
  "remaining": ["origin"],
  "argv": ["git-remote-add", "origin"]
}

Not found (exit 1):
{
  "status": "error",
  "error": "Could not find a subcommand executable for git nosuch"
}
*/

use std::ffi::OsString;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::cmd::format::{Role, StyleOptions, color, lead};
use crate::cmd::shared::output_error;
use crate::subcommand::{self, Resolved, SearchPath};
use crate::utils::Logger;

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Output JSON instead of human-readable text
    #[arg(long)]
    pub json: bool,

    /// Driver name followed by the tokens to fold into a subcommand name
    #[arg(
        value_name = "ARGS",
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub args: Vec<OsString>,
}

pub fn execute_resolve(args: ResolveArgs, search: &SearchPath, logger: &Logger) -> Result<()> {
    match subcommand::prepare(&args.args, search) {
        Ok(resolved) => {
            logger.debug(format!("resolved {:?} -> {}", args.args, resolved.executable.display()));
            if args.json {
                println!("{}", serde_json::to_string_pretty(&to_json(&resolved))?);
            } else {
                println!("{}", render_human(&resolved, &StyleOptions::detect()));
            }
            Ok(())
        }
        Err(e) if e.is_not_found() => {
            output_error(args.json, &e.to_string());
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}

/// JSON view of a `Resolved`. Arguments that are not UTF-8 are shown lossily.
#[derive(Serialize)]
struct ResolveOutput {
    status: &'static str,
    command: String,
    executable: String,
    remaining: Vec<String>,
    argv: Vec<String>,
}

fn lossy(parts: &[OsString]) -> Vec<String> {
    parts
        .iter()
        .map(|p| p.to_string_lossy().into_owned())
        .collect()
}

fn to_json(resolved: &Resolved) -> serde_json::Value {
    let out = ResolveOutput {
        status: "ok",
        command: resolved.command.to_string_lossy().into_owned(),
        executable: resolved.executable.display().to_string(),
        remaining: lossy(&resolved.remaining),
        argv: lossy(&resolved.argv()),
    };
    serde_json::to_value(&out).unwrap_or_else(|_| serde_json::json!({"status":"ok"}))
}

fn render_human(resolved: &Resolved, style: &StyleOptions) -> String {
    format!(
        "{}{}\n  {} {}",
        lead("success", style),
        color(Role::Primary, resolved.to_string(), style),
        color(Role::Dim, "->", style),
        color(Role::Secondary, resolved.executable.display().to_string(), style),
    )
}
