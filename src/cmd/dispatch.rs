/*!
`dispatch.rs`

Implements `logrus dispatch [--wait] <DRIVER> [TOKENS...]`.

`DRIVER` plays the role of `argv[0]` for a git-style driver:

```text
logrus dispatch git remote add origin
  -> tries git-remote-add-origin, git-remote-add origin, git-remote add origin
```

Without `--wait` the resolved executable replaces this process. With `--wait`
it runs as a child and its exit code becomes ours. Failing to find a
subcommand prints the usage diagnostic and exits 1.
*/

use std::ffi::OsString;

use anyhow::Result;
use clap::Args;

use crate::subcommand::{self, SearchPath};
use crate::utils::Logger;

#[derive(Args, Debug)]
pub struct DispatchArgs {
    /// Spawn the subcommand and wait for it instead of replacing this process
    #[arg(long)]
    pub wait: bool,

    /// Driver name followed by the tokens to fold into a subcommand name
    #[arg(
        value_name = "ARGS",
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub args: Vec<OsString>,
}

pub fn execute_dispatch(args: DispatchArgs, search: &SearchPath, logger: &Logger) -> Result<()> {
    logger.debug(format!(
        "dispatching {:?} (search path: {})",
        args.args,
        search.as_os_str().to_string_lossy()
    ));

    if !args.wait {
        subcommand::dispatch(&args.args, search, subcommand::usage(&args.args));
    }

    match subcommand::dispatch_and_wait(&args.args, search) {
        Ok(code) => {
            logger.info(format!("subcommand exited with status {code}"));
            std::process::exit(code);
        }
        Err(e) if e.is_not_found() => {
            subcommand::usage(&args.args)(&e.to_string());
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        args: DispatchArgs,
    }

    #[test]
    fn trailing_tokens_keep_their_flags() {
        let cli = TestCli::try_parse_from(["t", "--wait", "git", "commit", "-m", "msg"]).unwrap();
        assert!(cli.args.wait);
        assert_eq!(cli.args.args, vec!["git", "commit", "-m", "msg"]);
    }

    #[test]
    fn flags_after_driver_are_not_ours() {
        let cli = TestCli::try_parse_from(["t", "tool", "--wait"]).unwrap();
        assert!(!cli.args.wait);
        assert_eq!(cli.args.args, vec!["tool", "--wait"]);
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_tokens_are_accepted() {
        use std::os::unix::ffi::OsStrExt;

        let raw = std::ffi::OsStr::from_bytes(b"caf\xe9");
        let cli = TestCli::try_parse_from([
            std::ffi::OsStr::new("t"),
            std::ffi::OsStr::new("tool"),
            raw,
        ])
        .unwrap();
        assert_eq!(cli.args.args[1].as_os_str(), raw);
    }

    #[test]
    fn driver_is_required() {
        assert!(TestCli::try_parse_from(["t"]).is_err());
    }
}
