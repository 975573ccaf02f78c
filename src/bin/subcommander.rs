//! Generic git-style driver.
//!
//! Install (copy or symlink) as `foo`, then `foo bar baz` runs `foo-bar-baz`,
//! or `foo-bar baz`, whichever is found first on PATH, most specific first.
//! Arguments are handed over untouched, bytes included; subcommands parse
//! their own.
//!
//! On Unix the subcommand replaces this process, so it keeps the driver's PID
//! and its exit status reaches the caller directly. Setting
//! `LOGRUS_DISPATCH_WAIT` to a non-empty value runs it as a child instead; the
//! driver waits and exits with the child's code (`128 + signal` for signals).

use std::ffi::OsString;

use logrus::subcommand::{self, SearchPath};

const WAIT_ENV: &str = "LOGRUS_DISPATCH_WAIT";

fn main() {
    let args: Vec<OsString> = std::env::args_os().collect();
    let search = SearchPath::from_env();

    let wait = std::env::var_os(WAIT_ENV).is_some_and(|v| !v.is_empty());
    if !wait {
        subcommand::dispatch(&args, &search, subcommand::usage(&args));
    }

    match subcommand::dispatch_and_wait(&args, &search) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            if e.is_not_found() {
                subcommand::usage(&args)(&e.to_string());
            } else {
                eprintln!("{e}");
            }
            std::process::exit(1);
        }
    }
}
