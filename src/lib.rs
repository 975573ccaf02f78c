//! Logrus - shell-scripting conveniences.
//!
//!   subcommand : git-style "verb splitting" dispatch (`foo bar baz` -> `foo-bar baz`)
//!   humantime  : seconds -> "1 days 2 hours ..."
//!   utils      : caller-owned logging, mkdir -p, map squashing, obfuscation, run
//!   cmd        : clap front ends shared by the binaries

pub mod cmd;
pub mod humantime;
pub mod subcommand;
pub mod utils;

pub use humantime::human_time;
pub use subcommand::{DispatchError, Resolved, SearchPath, dispatch, dispatch_and_wait, resolve};
pub use utils::{CommandLine, mkdir_p, obfuscate, run, squash, squash_json};
