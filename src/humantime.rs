//! Seconds -> "1 days 2 hours 3 minutes 4 seconds".
//!
//! Only non-zero components are rendered; units are always plural. Days are
//! the largest unit.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};

const UNITS: [(&str, u64); 4] = [
    ("days", 86_400),
    ("hours", 3_600),
    ("minutes", 60),
    ("seconds", 1),
];

/// Render `seconds` as space-joined `"<value> <unit>"` components.
///
/// Negative input carries the sign on every component: `-90` is
/// `"-1 minutes -30 seconds"`. Zero renders as an empty string.
pub fn human_time(seconds: i64) -> String {
    let sign = if seconds < 0 { "-" } else { "" };
    let mut rest = seconds.unsigned_abs();

    let mut parts = Vec::with_capacity(UNITS.len());
    for (unit, size) in UNITS {
        let value = rest / size;
        rest %= size;
        if value != 0 {
            parts.push(format!("{sign}{value} {unit}"));
        }
    }
    parts.join(" ")
}

/// Parse one line of input as a count of seconds.
pub fn parse_seconds(raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .with_context(|| format!("invalid number of seconds: '{}'", raw.trim()))
}

/// The `human-time` stdin path.
///
/// Converts the first line and stops unless `all` is set. Stopping after one
/// line is long-standing behavior that scripts may depend on; `all` converts
/// every line.
pub fn convert_lines<R: BufRead, W: Write>(input: R, out: &mut W, all: bool) -> Result<()> {
    for line in input.lines() {
        let line = line.context("Failed to read standard input")?;
        writeln!(out, "{}", human_time(parse_seconds(&line)?))?;
        if !all {
            break;
        }
    }
    Ok(())
}
