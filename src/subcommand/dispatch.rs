/*!
`dispatch.rs`

Hand-off from a driver to the resolved subcommand.

Variants:
  - dispatch           : replace the current process image (Unix `exec`); never returns
  - dispatch_and_wait  : spawn the subcommand, wait, return its exit code

Both go through `prepare`, which is `SearchPath::resolve` plus the guard that
refuses to hand control back to the driver itself.

Non-Unix platforms have no image replacement primitive, so `exec` there spawns
the child, waits, and exits with its status. The PID of the driver survives.

The subcommand always receives `[command] + remaining` as its argument vector
and inherits stdin/stdout/stderr and the environment unchanged. Arguments are
`OsStr` throughout, so bytes that are not UTF-8 reach the subcommand as given.
*/

use std::ffi::{OsStr, OsString};
use std::io::{self, Write};
use std::process::ExitStatus;

use super::{DispatchError, Resolved, SearchPath, base_name, join_lossy};

/// Resolve `args` and refuse results that would re-run the driver.
pub fn prepare<S: AsRef<OsStr>>(
    args: &[S],
    search: &SearchPath,
) -> Result<Resolved, DispatchError> {
    let resolved = search.resolve(args)?;

    let driver = args.first().map(|a| base_name(a.as_ref()));
    if driver == Some(resolved.name()) {
        return Err(DispatchError::SelfDispatch {
            args: args.iter().map(|a| a.as_ref().to_os_string()).collect(),
        });
    }

    Ok(resolved)
}

/// Resolve and replace the current process with the subcommand.
///
/// On any failure `on_not_found` receives a diagnostic and the process exits 1.
pub fn dispatch<S, F>(args: &[S], search: &SearchPath, on_not_found: F) -> !
where
    S: AsRef<OsStr>,
    F: FnOnce(&str),
{
    let err = match prepare(args, search) {
        Ok(resolved) => exec(&resolved),
        Err(e) => e,
    };
    on_not_found(&err.to_string());
    flush_std_streams();
    std::process::exit(1)
}

/// Resolve, run the subcommand as a child, and return its exit code.
pub fn dispatch_and_wait<S: AsRef<OsStr>>(
    args: &[S],
    search: &SearchPath,
) -> Result<i32, DispatchError> {
    let resolved = prepare(args, search)?;
    run_and_wait(&resolved)
}

/// Replace the current process image. Only returns on failure.
#[cfg(unix)]
pub fn exec(resolved: &Resolved) -> DispatchError {
    use std::os::unix::process::CommandExt;

    flush_std_streams();
    let source = std::process::Command::new(&resolved.executable)
        .arg0(&resolved.command)
        .args(&resolved.remaining)
        .exec();
    DispatchError::Exec {
        program: resolved.command.to_string_lossy().into_owned(),
        source,
    }
}

/// Spawn-and-wait stand-in for image replacement. Only returns on failure.
#[cfg(not(unix))]
pub fn exec(resolved: &Resolved) -> DispatchError {
    match run_and_wait(resolved) {
        Ok(code) => std::process::exit(code),
        Err(e) => e,
    }
}

fn run_and_wait(resolved: &Resolved) -> Result<i32, DispatchError> {
    let spawn_err = |source| DispatchError::Spawn {
        program: resolved.command.to_string_lossy().into_owned(),
        source,
    };

    flush_std_streams();
    let rt = tokio::runtime::Runtime::new().map_err(spawn_err)?;
    let status = rt.block_on(wait_child(resolved)).map_err(spawn_err)?;
    Ok(exit_code(status))
}

async fn wait_child(resolved: &Resolved) -> io::Result<ExitStatus> {
    let mut cmd = tokio::process::Command::new(&resolved.executable);
    #[cfg(unix)]
    cmd.arg0(&resolved.command);
    cmd.args(&resolved.remaining);
    cmd.status().await
}

/// Exit code of a finished child; signal deaths map to `128 + signal`.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(sig) = status.signal() {
            return 128 + sig;
        }
    }
    1
}

fn flush_std_streams() {
    // Nothing useful to do if the terminal is gone.
    let _ = io::stdout().flush();
    let _ = io::stderr().flush();
}

/// Diagnostic printed by `usage` when no subcommand could be found.
pub fn usage_message<S: AsRef<OsStr>>(args: &[S], message: &str) -> String {
    let program = args
        .first()
        .map(|a| a.as_ref().to_string_lossy())
        .unwrap_or_default();
    format!(
        "{program}\nCalled as {}\nAttempted to find an executable using all the permutations of {} with no luck.\n{message}",
        join_lossy(args, " "),
        join_lossy(args, "-"),
    )
}

/// Default `on_not_found` handler: explains what was tried, on stderr.
pub fn usage<S: AsRef<OsStr>>(args: &[S]) -> impl FnOnce(&str) + use<S> {
    let args: Vec<OsString> = args.iter().map(|a| a.as_ref().to_os_string()).collect();
    move |message: &str| {
        eprintln!("{}", usage_message(&args, message));
    }
}

/* --------------------------------- Tests ---------------------------------- */
