//! Pure parsers for the text produced by the status commands.
//!
//! Nothing here performs I/O; the sampler feeds command output in and
//! decides what a failure defaults to.

use super::cpu::CpuCounters;
use super::error::ParseError;
use super::process::ProcessInfo;

/// Rows of the process table with fewer columns than this are dropped.
pub const MIN_PROCESS_COLUMNS: usize = 9;
pub const PID_COLUMN: usize = 0;
pub const CPU_COLUMN: usize = 2;
pub const MEMORY_COLUMN: usize = 3;

/// Key of the page-cache line in a meminfo dump.
pub const CACHE_KEY: &str = "Cached";

/// Counters from the first line of the aggregate CPU status text.
///
/// The leading label is discarded and tokens that are not integers are
/// skipped rather than zero-filled.
pub fn parse_cpu_counters(text: &str) -> CpuCounters {
    let Some(line) = text.lines().next() else {
        return CpuCounters::default();
    };
    line.split_whitespace()
        .skip(1)
        .filter_map(|token| token.parse::<u64>().ok())
        .collect::<Vec<_>>()
        .into()
}

/// Used share of total memory from a `free`-style summary.
///
/// The second line carries `label total used ...` as whole kilobyte counts.
/// A zero total yields 0 instead of dividing.
pub fn parse_memory_usage(text: &str) -> Result<f32, ParseError> {
    let line = text
        .lines()
        .nth(1)
        .ok_or(ParseError::MissingLine { expected: 2 })?;
    let mut tokens = line.split_whitespace().skip(1);
    let total = parse_number("total", tokens.next())?;
    let used = parse_number("used", tokens.next())?;

    if total == 0 {
        return Ok(0.0);
    }
    Ok((used as f64 / total as f64 * 100.0).clamp(0.0, 100.0) as f32)
}

/// Page cache size in MB from a meminfo dump; 0 when the line is missing
/// or unreadable.
pub fn parse_cache_mb(text: &str) -> f32 {
    text.lines()
        .find_map(|line| {
            let (key, rest) = line.split_once(':')?;
            if key.trim() != CACHE_KEY {
                return None;
            }
            rest.split_whitespace().next()?.parse::<u64>().ok()
        })
        .map(|kb| kb as f32 / 1024.0)
        .unwrap_or(0.0)
}

/// Rows of the process table, header excluded, in input order.
///
/// The process name is the last whitespace token of the row, so a command
/// name containing spaces is reported by its final word only.
pub fn parse_process_table(text: &str) -> Vec<ProcessInfo> {
    text.lines()
        .skip(1)
        .filter_map(parse_process_row)
        .collect()
}

fn parse_process_row(line: &str) -> Option<ProcessInfo> {
    let columns: Vec<&str> = line.split_whitespace().collect();
    if columns.len() < MIN_PROCESS_COLUMNS {
        return None;
    }
    Some(ProcessInfo {
        pid: columns[PID_COLUMN].to_string(),
        name: columns.last()?.to_string(),
        cpu_usage: columns[CPU_COLUMN].to_string(),
        memory_usage: columns[MEMORY_COLUMN].to_string(),
    })
}

fn parse_number(field: &'static str, token: Option<&str>) -> Result<u64, ParseError> {
    let token = token.ok_or(ParseError::MissingField(field))?;
    token.parse().map_err(|_| ParseError::InvalidNumber {
        field,
        value: token.to_string(),
    })
}
