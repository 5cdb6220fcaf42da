use std::sync::Arc;

use serde::Serialize;

use super::process::ProcessInfo;

/// Aggregate host usage for one poll cycle. All-zero means every read failed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct SystemStats {
    pub cpu_usage_percent: f32,
    pub memory_usage_percent: f32,
    pub cache_mb: f32,
}

/// Everything published by one completed poll cycle.
#[derive(Clone, Debug, Serialize)]
pub struct Snapshot {
    pub cycle: u64,
    pub stats: SystemStats,
    pub processes: Arc<[ProcessInfo]>,
}
