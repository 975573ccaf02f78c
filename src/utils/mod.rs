//! Utilities: leveled logging (caller-owned config), `mkdir -p`, map squashing,
//! string obfuscation, run-a-command-and-capture-stdout.
//!
//! Key items:
//!   logging::{LogLevel, LoggerConfig, Logger, get_custom_logger, derive_level}
//!   mkdir_p
//!   squash / squash_json
//!   obfuscate
//!   run / CommandLine

use anyhow::{Context, Result, bail};
use std::collections::HashMap;
use std::hash::Hash;
use std::path::Path;

/// Logging helpers.
///
/// There is no global logger: callers build a `Logger` once and pass it by
/// reference to whatever needs to log.
pub mod logging {
    use std::fmt;
    use std::str::FromStr;
    use std::time::{SystemTime, UNIX_EPOCH};
    use thiserror::Error;

    pub const DEFAULT_FORMAT: &str = "[{level}][{time}] {name}: {message}";

    #[derive(Debug, Error, PartialEq, Eq)]
    pub enum LoggingError {
        #[error("Invalid log level: {0}")]
        InvalidLevel(String),
        #[error("log format must contain {{message}}: {0:?}")]
        InvalidFormat(String),
    }

    /// Severity, most severe first.
    #[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
    pub enum LogLevel {
        Critical = 0,
        Error = 1,
        Warning = 2,
        Info = 3,
        Debug = 4,
    }

    impl LogLevel {
        pub fn as_str(&self) -> &'static str {
            match self {
                LogLevel::Critical => "CRITICAL",
                LogLevel::Error => "ERROR",
                LogLevel::Warning => "WARNING",
                LogLevel::Info => "INFO",
                LogLevel::Debug => "DEBUG",
            }
        }

        /// Case-insensitive; empty or unknown names fall back to `Debug`.
        pub fn parse_lenient(name: &str) -> Self {
            name.parse().unwrap_or(LogLevel::Debug)
        }
    }

    impl FromStr for LogLevel {
        type Err = LoggingError;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s.trim().to_ascii_uppercase().as_str() {
                "CRITICAL" => Ok(LogLevel::Critical),
                "ERROR" => Ok(LogLevel::Error),
                "WARNING" => Ok(LogLevel::Warning),
                "INFO" => Ok(LogLevel::Info),
                "DEBUG" => Ok(LogLevel::Debug),
                _ => Err(LoggingError::InvalidLevel(s.to_string())),
            }
        }
    }

    impl fmt::Display for LogLevel {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.as_str())
        }
    }

    /// Map `-v` / `-q` flags to a level.
    pub fn derive_level(verbose: u8, quiet: bool) -> LogLevel {
        if quiet {
            return LogLevel::Error;
        }
        match verbose {
            0 => LogLevel::Warning,
            1 => LogLevel::Info,
            _ => LogLevel::Debug,
        }
    }

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct LoggerConfig {
        pub name: String,
        pub level: LogLevel,
        format: String,
    }

    impl LoggerConfig {
        pub fn new(name: impl Into<String>, level: LogLevel) -> Self {
            Self {
                name: name.into(),
                level,
                format: DEFAULT_FORMAT.to_string(),
            }
        }

        /// Replace the line template. Placeholders: `{time}` `{level}` `{name}` `{message}`.
        pub fn with_format(mut self, format: impl Into<String>) -> Result<Self, LoggingError> {
            let format = format.into();
            if !format.contains("{message}") {
                return Err(LoggingError::InvalidFormat(format));
            }
            self.format = format;
            Ok(self)
        }
    }

    /// Logger handle built from a `LoggerConfig`. Writes to stderr.
    #[derive(Clone, Debug)]
    pub struct Logger {
        config: LoggerConfig,
    }

    impl Logger {
        pub fn new(config: LoggerConfig) -> Self {
            Self { config }
        }

        pub fn level(&self) -> LogLevel {
            self.config.level
        }

        pub fn enabled(&self, level: LogLevel) -> bool {
            level <= self.config.level
        }

        /// Format one line without emitting it.
        pub fn render(&self, level: LogLevel, msg: &str) -> String {
            self.render_at(level, msg, timestamp())
        }

        fn render_at(&self, level: LogLevel, msg: &str, time: u128) -> String {
            self.config
                .format
                .replace("{time}", &time.to_string())
                .replace("{level}", level.as_str())
                .replace("{name}", &self.config.name)
                .replace("{message}", msg)
        }

        pub fn log(&self, level: LogLevel, msg: impl AsRef<str>) {
            if self.enabled(level) {
                eprintln!("{}", self.render(level, msg.as_ref()));
            }
        }

        pub fn warning(&self, msg: impl AsRef<str>) {
            self.log(LogLevel::Warning, msg);
        }
        pub fn info(&self, msg: impl AsRef<str>) {
            self.log(LogLevel::Info, msg);
        }
        pub fn debug(&self, msg: impl AsRef<str>) {
            self.log(LogLevel::Debug, msg);
        }
    }

    /// One-call setup: lenient level parsing, optional custom format.
    pub fn get_custom_logger(
        name: &str,
        log_level: &str,
        log_format: Option<&str>,
    ) -> Result<Logger, LoggingError> {
        let mut config = LoggerConfig::new(name, LogLevel::parse_lenient(log_level));
        if let Some(format) = log_format {
            config = config.with_format(format)?;
        }
        Ok(Logger::new(config))
    }

    fn timestamp() -> u128 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0)
    }

}

pub use logging::{LogLevel, Logger, LoggerConfig, derive_level, get_custom_logger};

/* ---- Filesystem ---- */

/// `mkdir -p`: create `path` and any missing parents; existing directories are fine.
pub fn mkdir_p(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.exists() && !path.is_dir() {
        bail!("{} exists and is not a directory", path.display());
    }
    std::fs::create_dir_all(path)
        .with_context(|| format!("Failed to create directory {}", path.display()))
}

/* ---- Maps ---- */

/// Shallow-merge maps into a new one; later maps win on key collisions.
pub fn squash<'a, K, V, I>(maps: I) -> HashMap<K, V>
where
    K: Eq + Hash + Clone + 'a,
    V: Clone + 'a,
    I: IntoIterator<Item = &'a HashMap<K, V>>,
{
    let mut result = HashMap::new();
    for map in maps {
        result.extend(map.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    result
}

/// `squash` for JSON objects. Fails on any non-object value.
pub fn squash_json<'a, I>(values: I) -> Result<serde_json::Value>
where
    I: IntoIterator<Item = &'a serde_json::Value>,
{
    let mut result = serde_json::Map::new();
    for (idx, value) in values.into_iter().enumerate() {
        let Some(obj) = value.as_object() else {
            bail!("value #{} is not an object", idx + 1);
        };
        for (k, v) in obj {
            result.insert(k.clone(), v.clone());
        }
    }
    Ok(serde_json::Value::Object(result))
}

/* ---- Strings ---- */

pub const DEFAULT_SHOW_LENGTH: usize = 5;
pub const DEFAULT_SMEAR: char = '*';

/// Hide the middle of `snippet`, keeping `show_length` characters at each end.
///
/// When there is nothing left to hide (`2 * show_length >= len`) the snippet is
/// returned as-is.
pub fn obfuscate(snippet: &str, show_length: usize, smear: char) -> String {
    let chars: Vec<char> = snippet.chars().collect();
    let hidden = chars.len().saturating_sub(show_length.saturating_mul(2));
    if hidden == 0 && show_length > 0 {
        return snippet.to_string();
    }

    let mut out = String::with_capacity(snippet.len());
    out.extend(&chars[..show_length]);
    out.extend(std::iter::repeat_n(smear, hidden));
    out.extend(&chars[chars.len() - show_length..]);
    out
}

/* ---- Processes ---- */

/// A command given either as one shell-style line or as a ready argv.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandLine {
    Line(String),
    Argv(Vec<String>),
}

impl CommandLine {
    pub fn into_argv(self) -> Result<Vec<String>> {
        let argv = match self {
            CommandLine::Line(line) => shell_words::split(&line)
                .with_context(|| format!("Failed to parse command line: '{line}'"))?,
            CommandLine::Argv(argv) => argv,
        };
        if argv.first().is_none_or(|p| p.is_empty()) {
            bail!("Empty command");
        }
        Ok(argv)
    }
}

impl From<&str> for CommandLine {
    fn from(line: &str) -> Self {
        CommandLine::Line(line.to_string())
    }
}

impl From<String> for CommandLine {
    fn from(line: String) -> Self {
        CommandLine::Line(line)
    }
}

impl From<Vec<String>> for CommandLine {
    fn from(argv: Vec<String>) -> Self {
        CommandLine::Argv(argv)
    }
}

/// Run a command and return its stdout. Non-zero exit is an error.
///
/// Creates a temporary Tokio runtime; use `run_async` from async code.
pub fn run(command: impl Into<CommandLine>) -> Result<String> {
    let rt = tokio::runtime::Runtime::new().context("Failed to create Tokio runtime")?;
    rt.block_on(run_async(command))
}

pub async fn run_async(command: impl Into<CommandLine>) -> Result<String> {
    let argv = command.into().into_argv()?;
    let program = &argv[0];

    let output = tokio::process::Command::new(program)
        .args(&argv[1..])
        .stdin(std::process::Stdio::null())
        .output()
        .await
        .with_context(|| format!("Failed to spawn '{program}'"))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!(
            "'{}' failed with {}: {}",
            argv.join(" "),
            output.status,
            stderr.trim()
        );
    }

    String::from_utf8(output.stdout).with_context(|| format!("'{program}' wrote non-UTF-8 output"))
}
