/*!
shared.rs - helpers used by more than one subcommand.

  - output_error  : uniform JSON / human error reporting
  - load_mapping  : read a JSON or YAML file into a `serde_json::Value`
  - build_logger  : CLI flags + LOGRUS_LOG_LEVEL / LOGRUS_LOG_FORMAT -> Logger
*/

use anyhow::{Context, Result};
use std::path::Path;

use crate::cmd::format::{Role, StyleOptions, color, lead};
use crate::utils::logging::{LogLevel, Logger, LoggerConfig, derive_level};

pub const LOG_LEVEL_ENV: &str = "LOGRUS_LOG_LEVEL";
pub const LOG_FORMAT_ENV: &str = "LOGRUS_LOG_FORMAT";

/// Logger for a front end. Precedence: env level (if set) > -v/-q flags.
pub fn build_logger(name: &str, verbose: u8, quiet: bool) -> Result<Logger> {
    let env_level = std::env::var(LOG_LEVEL_ENV).ok();
    let env_format = std::env::var(LOG_FORMAT_ENV).ok();
    logger_from(name, verbose, quiet, env_level.as_deref(), env_format.as_deref())
}

fn logger_from(
    name: &str,
    verbose: u8,
    quiet: bool,
    env_level: Option<&str>,
    env_format: Option<&str>,
) -> Result<Logger> {
    let level = match env_level.filter(|s| !s.trim().is_empty()) {
        Some(raw) => LogLevel::parse_lenient(raw),
        None => derive_level(verbose, quiet),
    };
    let mut config = LoggerConfig::new(name, level);
    if let Some(format) = env_format.filter(|s| !s.trim().is_empty()) {
        config = config
            .with_format(format)
            .with_context(|| format!("invalid {LOG_FORMAT_ENV}"))?;
    }
    Ok(Logger::new(config))
}

/// Print an error in the requested mode. Does not exit.
pub fn output_error(json: bool, msg: &str) {
    if json {
        let err = serde_json::json!({"status":"error","error":msg});
        println!(
            "{}",
            serde_json::to_string_pretty(&err).unwrap_or_else(|_| err.to_string())
        );
    } else {
        let style = StyleOptions::detect();
        eprintln!("{}", error_line(msg, &style));
    }
}

fn error_line(msg: &str, style: &StyleOptions) -> String {
    format!("{}{}", lead("error", style), color(Role::Error, msg, style))
}

/// Load a mapping file. `.yaml` / `.yml` are parsed as YAML, everything else as JSON.
pub fn load_mapping(path: &Path) -> Result<serde_json::Value> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let lower = path.to_string_lossy().to_ascii_lowercase();
    let value = if lower.ends_with(".yaml") || lower.ends_with(".yml") {
        let yaml_v: serde_yaml::Value = serde_yaml::from_str(&raw)
            .with_context(|| format!("failed to parse YAML file {}", path.display()))?;
        serde_json::to_value(yaml_v).context("failed to convert YAML to JSON")?
    } else {
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse JSON file {}", path.display()))?
    };
    Ok(value)
}
