use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::command::CommandRunner;
use super::cpu::{CpuCounters, calculate_cpu_usage};
use super::error::SampleError;
use super::parse::{parse_cache_mb, parse_cpu_counters, parse_memory_usage, parse_process_table};
use super::process::ProcessInfo;
use super::snapshot::SystemStats;
use crate::config::CommandsConfig;

/// Placeholder substituted with the target pid in the kill template.
pub const PID_PLACEHOLDER: &str = "{pid}";

/// Reads and parses every status source. Each operation degrades to a zero
/// or empty value instead of failing, so one bad read never stops polling.
pub struct Sampler<R> {
    runner: R,
    commands: CommandsConfig,
    cpu_sample: Duration,
}

impl<R: CommandRunner> Sampler<R> {
    pub fn new(runner: R, commands: CommandsConfig, cpu_sample: Duration) -> Self {
        Self {
            runner,
            commands,
            cpu_sample,
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// CPU, memory and cache usage for this instant. CPU usage is measured
    /// over the configured sample interval; memory and cache are read while
    /// that measurement is in progress.
    pub async fn system_stats(&self) -> SystemStats {
        let (cpu_usage_percent, memory_usage_percent, cache_mb) =
            tokio::join!(self.cpu_usage(), self.memory_usage(), self.cache_mb());
        SystemStats {
            cpu_usage_percent,
            memory_usage_percent,
            cache_mb,
        }
    }

    pub async fn cpu_usage(&self) -> f32 {
        let first = self.read_cpu_counters().await;
        tokio::time::sleep(self.cpu_sample).await;
        let second = self.read_cpu_counters().await;
        calculate_cpu_usage(&first, &second)
    }

    /// Aggregate CPU counters, or an empty vector when the read fails.
    pub async fn read_cpu_counters(&self) -> CpuCounters {
        match self.runner.run(&self.commands.cpu).await {
            Ok(text) => parse_cpu_counters(&text),
            Err(err) => {
                warn!(error = %err, "cpu counter read failed");
                CpuCounters::default()
            }
        }
    }

    pub async fn memory_usage(&self) -> f32 {
        let result: Result<f32, SampleError> = async {
            let text = self.runner.run(&self.commands.memory).await?;
            Ok(parse_memory_usage(&text)?)
        }
        .await;
        result.unwrap_or_else(|err| {
            warn!(error = %err, "memory usage read failed");
            0.0
        })
    }

    pub async fn cache_mb(&self) -> f32 {
        match self.runner.run(&self.commands.meminfo).await {
            Ok(text) => parse_cache_mb(&text),
            Err(err) => {
                warn!(error = %err, "cache read failed");
                0.0
            }
        }
    }

    /// Current process table, or an empty list when it cannot be read.
    pub async fn process_list(&self) -> Vec<ProcessInfo> {
        match self.runner.run(&self.commands.processes).await {
            Ok(text) => {
                let processes = parse_process_table(&text);
                debug!(count = processes.len(), "process table parsed");
                processes
            }
            Err(err) => {
                warn!(error = %err, "process table read failed");
                Vec::new()
            }
        }
    }

    /// Sends the configured kill command for `pid`. Whether the process
    /// actually exits is not checked.
    pub async fn kill_process(&self, pid: &str) {
        if !is_valid_pid(pid) {
            warn!(pid, "refusing to kill: not a positive numeric pid");
            return;
        }
        let command = self.commands.kill.replace(PID_PLACEHOLDER, pid);
        match self.runner.run(&command).await {
            Ok(_) => info!(pid, "kill command sent"),
            Err(err) => warn!(pid, error = %err, "kill command failed"),
        }
    }
}

impl<R: CommandRunner + 'static> Sampler<R> {
    /// Fire-and-forget variant of [`Sampler::kill_process`]; returns as soon
    /// as the task is spawned.
    pub fn spawn_kill(self: &Arc<Self>, pid: String) -> JoinHandle<()> {
        let sampler = Arc::clone(self);
        tokio::spawn(async move { sampler.kill_process(&pid).await })
    }
}

/// Digits only, and not zero: `kill 0` signals the caller's process group.
fn is_valid_pid(pid: &str) -> bool {
    !pid.is_empty()
        && pid.bytes().all(|b| b.is_ascii_digit())
        && pid.bytes().any(|b| b != b'0')
}
