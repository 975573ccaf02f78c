/*!
Command front ends shared by the `logrus`, `human-time` and `subcommander`
binaries.

Conventions:
  - Each subcommand module exposes one `*Args` struct (clap `Args`) and one
    public `execute_*` function returning `anyhow::Result<()>`.
  - The caller-owned `Logger` (and the `SearchPath` where relevant) is passed
    in by reference; nothing here reads global logging state.
  - Styling helpers live in `format.rs`, cross-command helpers in `shared.rs`.

Layout:
  dispatch.rs    logrus dispatch [--wait] ARGS...
  resolve.rs     logrus resolve [--json] ARGS...
  human_time.rs  logrus human-time / human-time
  obfuscate.rs   logrus obfuscate TEXT
  squash.rs      logrus squash FILES...
  mkdir.rs       logrus mkdir PATHS...
  run.rs         logrus run COMMAND...
*/

pub mod dispatch;
pub mod format;
pub mod human_time;
pub mod mkdir;
pub mod obfuscate;
pub mod resolve;
pub mod run;
pub mod shared;
pub mod squash;

pub use dispatch::{DispatchArgs, execute_dispatch};
pub use human_time::{HumanTimeArgs, execute_human_time};
pub use mkdir::{MkdirArgs, execute_mkdir};
pub use obfuscate::{ObfuscateArgs, execute_obfuscate};
pub use resolve::{ResolveArgs, execute_resolve};
pub use run::{RunArgs, execute_run};
pub use squash::{SquashArgs, execute_squash};
