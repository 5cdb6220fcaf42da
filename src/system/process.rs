use serde::Serialize;

/// One row of the process table as reported by the status command.
///
/// Fields hold the column text verbatim; the table is re-read every cycle
/// and rows are never merged with earlier ones.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProcessInfo {
    pub pid: String,
    pub name: String,
    pub cpu_usage: String,
    pub memory_usage: String,
}

impl ProcessInfo {
    pub fn cpu_percent(&self) -> f32 {
        self.cpu_usage.parse().unwrap_or(0.0)
    }

    pub fn memory_percent(&self) -> f32 {
        self.memory_usage.parse().unwrap_or(0.0)
    }
}

/// Rows whose name contains `query`, ignoring case. An empty query keeps
/// every row.
pub fn filter_processes<'a>(processes: &'a [ProcessInfo], query: &str) -> Vec<&'a ProcessInfo> {
    let query = query.to_lowercase();
    processes
        .iter()
        .filter(|p| query.is_empty() || p.name.to_lowercase().contains(&query))
        .collect()
}
