//! Git-style subcommand resolution.
//!
//! SearchPath -> resolve(args) -> Resolved { command, executable, remaining }
//! Helpers: is_executable / find / base_name.
//! Hand-off (exec / spawn-and-wait) lives in `dispatch`.
//!
//! Given `foo bar baz qux`, the resolver tries `foo-bar-baz-qux`, then
//! `foo-bar-baz qux`, then `foo-bar baz qux`. The driver name on its own is
//! never a candidate, otherwise the driver would find and re-run itself.
//!
use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod dispatch;

pub use dispatch::{dispatch, dispatch_and_wait, exec, exit_code, prepare, usage, usage_message};

/// Search path used when `PATH` is not set at all.
#[cfg(unix)]
pub const DEFAULT_SEARCH_PATH: &str = "/bin:/usr/bin";
#[cfg(not(unix))]
pub const DEFAULT_SEARCH_PATH: &str = "";

/// Errors produced while resolving or handing off to a subcommand.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No prefix of the argument vector names an executable on the search path.
    #[error("Could not find a subcommand executable for {}", join_lossy(.args, " "))]
    SubcommandNotFound { args: Vec<OsString> },

    /// The only match is the driver itself.
    #[error("Could not find a subcommand for {}", join_lossy(.args, " "))]
    SelfDispatch { args: Vec<OsString> },

    /// Replacing the process image failed.
    #[error("failed to exec '{program}': {source}")]
    Exec {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Spawning (or waiting on) the child process failed.
    #[error("failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

impl DispatchError {
    /// Both "nothing matched" and "only the driver matched" are reported the same way.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DispatchError::SubcommandNotFound { .. } | DispatchError::SelfDispatch { .. }
        )
    }
}

/// Outcome of a successful resolution.
///
/// Arguments stay `OsString` end to end; only diagnostics go through lossy UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// Hyphen-joined candidate name (keeps any directory carried by `args[0]`).
    pub command: OsString,
    /// Concrete executable found on the search path.
    pub executable: PathBuf,
    /// Arguments not consumed into the command name.
    pub remaining: Vec<OsString>,
}

impl Resolved {
    /// Base name of the hyphen-joined command.
    pub fn name(&self) -> &OsStr {
        base_name(&self.command)
    }

    /// Argument vector handed to the subcommand: `[command] + remaining`.
    pub fn argv(&self) -> Vec<OsString> {
        let mut argv = Vec::with_capacity(self.remaining.len() + 1);
        argv.push(self.command.clone());
        argv.extend(self.remaining.iter().cloned());
        argv
    }
}

impl fmt::Display for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&join_lossy(&self.argv(), " "))
    }
}

/// Ordered list of directories consulted for executables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPath {
    raw: OsString,
}

impl SearchPath {
    /// Search path from the `PATH` environment variable.
    pub fn from_env() -> Self {
        Self::from_raw(env::var_os("PATH").unwrap_or_else(|| OsString::from(DEFAULT_SEARCH_PATH)))
    }

    /// Search path from a `PATH`-style string (platform separator).
    pub fn from_raw(raw: impl Into<OsString>) -> Self {
        Self { raw: raw.into() }
    }

    /// Search path from explicit directories.
    pub fn from_dirs<I, P>(dirs: I) -> Result<Self, env::JoinPathsError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<OsStr>,
    {
        Ok(Self {
            raw: env::join_paths(dirs)?,
        })
    }

    /// The directories, in lookup order.
    pub fn dirs(&self) -> Vec<PathBuf> {
        env::split_paths(&self.raw).collect()
    }

    pub fn as_os_str(&self) -> &OsStr {
        &self.raw
    }

    /// Locate an executable by base name; any directory part of `name` is ignored.
    ///
    /// Only the search path is consulted; the working directory is used solely
    /// to anchor relative search-path entries.
    pub fn find(&self, name: impl AsRef<OsStr>) -> Option<PathBuf> {
        let name = base_name(name.as_ref());
        if name.is_empty() {
            return None;
        }
        let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        which::which_in(name, Some(&self.raw), cwd).ok()
    }

    /// Whether `name` is an executable reachable through this search path.
    pub fn is_executable(&self, name: impl AsRef<OsStr>) -> bool {
        self.find(name).is_some()
    }

    /// Longest-prefix-first resolution of `args` into a subcommand.
    ///
    /// `args[0]` is the driver. Candidates always fold in at least one caller
    /// token, so vectors shorter than two never resolve.
    pub fn resolve<S: AsRef<OsStr>>(&self, args: &[S]) -> Result<Resolved, DispatchError> {
        let args: Vec<OsString> = args.iter().map(|a| a.as_ref().to_os_string()).collect();

        for i in 0..args.len().saturating_sub(1) {
            let prefix_len = args.len() - i;
            let command = join_os(&args[..prefix_len], "-");
            if let Some(executable) = self.find(&command) {
                return Ok(Resolved {
                    command,
                    executable,
                    remaining: args[prefix_len..].to_vec(),
                });
            }
        }

        Err(DispatchError::SubcommandNotFound { args })
    }
}

impl Default for SearchPath {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Resolve against the process `PATH`.
pub fn resolve<S: AsRef<OsStr>>(args: &[S]) -> Result<Resolved, DispatchError> {
    SearchPath::from_env().resolve(args)
}

/// Whether `name` is an executable on the process `PATH`.
pub fn is_executable(name: impl AsRef<OsStr>) -> bool {
    SearchPath::from_env().is_executable(name)
}

/// Final path component, or the input itself when it has none.
pub fn base_name<P: AsRef<OsStr> + ?Sized>(path: &P) -> &OsStr {
    let path = path.as_ref();
    Path::new(path).file_name().unwrap_or(path)
}

fn join_os<S: AsRef<OsStr>>(parts: &[S], sep: &str) -> OsString {
    let mut out = OsString::new();
    for (idx, part) in parts.iter().enumerate() {
        if idx > 0 {
            out.push(sep);
        }
        out.push(part);
    }
    out
}

/// Join for messages; invalid UTF-8 becomes U+FFFD.
pub fn join_lossy<S: AsRef<OsStr>>(parts: &[S], sep: &str) -> String {
    parts
        .iter()
        .map(|p| p.as_ref().to_string_lossy())
        .collect::<Vec<_>>()
        .join(sep)
}

/* --------------------------------- Tests ---------------------------------- */

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Create executables (and optionally plain files) in a fresh directory.
    pub(crate) fn bin_dir(executables: &[&str], plain: &[&str]) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        for name in executables {
            write_script(dir.path(), name, "exit 0", true);
        }
        for name in plain {
            write_script(dir.path(), name, "exit 0", false);
        }
        dir
    }

    pub(crate) fn write_script(dir: &Path, name: impl AsRef<OsStr>, body: &str, executable: bool) {
        let path = dir.join(name.as_ref());
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = if executable { 0o755 } else { 0o644 };
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(mode)).unwrap();
        }
        #[cfg(not(unix))]
        let _ = executable;
    }

    pub(crate) fn search(dir: &TempDir) -> SearchPath {
        SearchPath::from_dirs([dir.path()]).unwrap()
    }

    #[test]
    fn full_join_consumes_every_token() {
        let dir = bin_dir(&["tool-verb-noun", "tool-verb"], &[]);
        let r = search(&dir).resolve(&["tool", "verb", "noun"]).unwrap();
        assert_eq!(r.command, "tool-verb-noun");
        assert!(r.remaining.is_empty());
        assert_eq!(r.executable, dir.path().join("tool-verb-noun"));
    }

    #[test]
    fn git_remote_add_scenario() {
        let dir = bin_dir(&["git-remote-add"], &[]);
        let r = search(&dir)
            .resolve(&["git", "remote", "add", "origin"])
            .unwrap();
        assert_eq!(r.command, "git-remote-add");
        assert_eq!(r.remaining, vec!["origin"]);
        assert_eq!(r.argv(), vec!["git-remote-add", "origin"]);
    }

    #[test]
    fn longest_prefix_wins_over_shorter() {
        let dir = bin_dir(&["tool-a", "tool-a-b"], &[]);
        let r = search(&dir).resolve(&["tool", "a", "b", "c", "d"]).unwrap();
        assert_eq!(r.command, "tool-a-b");
        assert_eq!(r.remaining, vec!["c", "d"]);
    }

    #[test]
    fn falls_back_to_shortest_prefix() {
        let dir = bin_dir(&["tool-a"], &[]);
        let r = search(&dir).resolve(&["tool", "a", "--flag", "x"]).unwrap();
        assert_eq!(r.command, "tool-a");
        assert_eq!(r.remaining, vec!["--flag", "x"]);
    }

    #[test]
    fn unknown_verb_is_not_found() {
        let dir = bin_dir(&["tool-known"], &[]);
        let err = search(&dir).resolve(&["tool", "nosuchverb"]).unwrap_err();
        match err {
            DispatchError::SubcommandNotFound { args } => {
                assert_eq!(args, vec!["tool", "nosuchverb"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn short_vectors_never_resolve() {
        let dir = bin_dir(&["tool"], &[]);
        let sp = search(&dir);
        assert!(sp.resolve(&["tool"]).unwrap_err().is_not_found());
        assert!(sp.resolve::<&str>(&[]).unwrap_err().is_not_found());
    }

    #[test]
    fn driver_alone_is_never_a_candidate() {
        // Only the driver exists: nothing with a caller token folded in matches.
        let dir = bin_dir(&["tool"], &[]);
        let err = search(&dir).resolve(&["tool", "verb"]).unwrap_err();
        assert!(matches!(err, DispatchError::SubcommandNotFound { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn non_executable_files_are_ignored() {
        let dir = bin_dir(&["tool-a"], &["tool-a-b"]);
        let r = search(&dir).resolve(&["tool", "a", "b"]).unwrap();
        assert_eq!(r.command, "tool-a");
        assert_eq!(r.remaining, vec!["b"]);
    }

    #[test]
    fn driver_path_is_kept_but_lookup_uses_base_name() {
        let dir = bin_dir(&["tool-verb"], &[]);
        let r = search(&dir)
            .resolve(&["/opt/bin/tool", "verb", "x"])
            .unwrap();
        assert_eq!(r.command, "/opt/bin/tool-verb");
        assert_eq!(r.name(), OsStr::new("tool-verb"));
        assert_eq!(r.remaining, vec!["x"]);
    }

    #[test]
    fn later_search_dirs_are_consulted() {
        let empty = bin_dir(&[], &[]);
        let full = bin_dir(&["tool-verb"], &[]);
        let sp = SearchPath::from_dirs([empty.path(), full.path()]).unwrap();
        assert_eq!(sp.dirs().len(), 2);
        assert!(sp.is_executable("tool-verb"));
        assert_eq!(sp.find("tool-verb"), Some(full.path().join("tool-verb")));
    }

    #[test]
    fn lookup_uses_base_name_of_paths() {
        let dir = bin_dir(&["tool-verb"], &[]);
        let sp = search(&dir);
        assert!(sp.is_executable("/somewhere/else/tool-verb"));
        assert_eq!(sp.find("sub/tool-verb"), Some(dir.path().join("tool-verb")));
        assert!(!sp.is_executable(""));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_arguments_pass_through_untouched() {
        use std::os::unix::ffi::OsStrExt;

        let dir = bin_dir(&["tool-verb"], &[]);
        let latin1 = OsStr::from_bytes(b"caf\xe9");
        let args = [OsStr::new("tool"), OsStr::new("verb"), latin1];
        let r = search(&dir).resolve(&args).unwrap();
        assert_eq!(r.command, "tool-verb");
        assert_eq!(r.remaining, vec![latin1.to_os_string()]);
        assert_eq!(r.to_string(), "tool-verb caf\u{FFFD}");
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_tokens_can_name_the_subcommand() {
        use std::os::unix::ffi::OsStrExt;

        let name = OsStr::from_bytes(b"tool-caf\xe9");
        let dir = bin_dir(&[], &[]);
        write_script(dir.path(), name, "exit 0", true);
        let args = [OsStr::new("tool"), OsStr::from_bytes(b"caf\xe9")];
        let r = search(&dir).resolve(&args).unwrap();
        assert_eq!(r.command.as_os_str(), name);
        assert!(r.remaining.is_empty());
    }

    #[test]
    fn display_joins_command_and_remaining() {
        let r = Resolved {
            command: "git-remote-add".into(),
            executable: PathBuf::from("/bin/git-remote-add"),
            remaining: vec!["origin".into()],
        };
        assert_eq!(r.to_string(), "git-remote-add origin");
    }

    #[cfg(unix)]
    #[test]
    fn lookup_is_case_sensitive() {
        let dir = bin_dir(&["tool-verb"], &[]);
        assert!(!search(&dir).is_executable("Tool-Verb"));
    }

    #[test]
    fn base_name_helper() {
        assert_eq!(base_name("/usr/local/bin/foo-bar"), OsStr::new("foo-bar"));
        assert_eq!(base_name("foo"), OsStr::new("foo"));
    }

    #[test]
    fn not_found_message_lists_args() {
        let err = DispatchError::SubcommandNotFound {
            args: vec!["tool".into(), "x".into()],
        };
        assert_eq!(
            err.to_string(),
            "Could not find a subcommand executable for tool x"
        );
    }
}
