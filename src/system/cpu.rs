/// Index of the idle counter in the aggregate `cpu` line.
pub const IDLE_INDEX: usize = 3;

/// Counters from one read of the aggregate CPU line, in kernel order
/// (user, nice, system, idle, iowait, irq, softirq, steal, ...).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CpuCounters(pub Vec<u64>);

impl CpuCounters {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn idle(&self) -> Option<u64> {
        self.0.get(IDLE_INDEX).copied()
    }

    fn total(&self) -> u128 {
        self.0.iter().map(|&v| v as u128).sum()
    }
}

impl From<Vec<u64>> for CpuCounters {
    fn from(values: Vec<u64>) -> Self {
        CpuCounters(values)
    }
}

/// Busy share of the time elapsed between two counter reads, in percent.
///
/// Returns 0 when either read has fewer than four counters or when the
/// totals did not move. The result is clamped to `[0, 100]` so counter
/// resets or wraparounds never produce out-of-range values.
pub fn calculate_cpu_usage(first: &CpuCounters, second: &CpuCounters) -> f32 {
    let (Some(idle_first), Some(idle_second)) = (first.idle(), second.idle()) else {
        return 0.0;
    };

    let total_delta = second.total() as i128 - first.total() as i128;
    if total_delta == 0 {
        return 0.0;
    }
    let idle_delta = idle_second as i128 - idle_first as i128;

    let busy = (total_delta - idle_delta) as f64 / total_delta as f64 * 100.0;
    busy.clamp(0.0, 100.0) as f32
}
