use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Notify, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::command::CommandRunner;
use super::sampler::Sampler;
use super::snapshot::Snapshot;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollerState {
    /// Spawned, task not yet running.
    Idle,
    Polling,
    Stopped,
}

/// Recurring sampling task. Each cycle reads stats and the process table
/// concurrently, publishes the result, then waits `interval` before the
/// next cycle. Cycles never overlap.
pub struct Poller;

impl Poller {
    pub fn spawn<R>(
        sampler: Arc<Sampler<R>>,
        interval: Duration,
        cancel: CancellationToken,
    ) -> PollerHandle
    where
        R: CommandRunner + 'static,
    {
        let (snapshot_tx, snapshot_rx) = watch::channel(None);
        let (state_tx, state_rx) = watch::channel(PollerState::Idle);
        let refresh = Arc::new(Notify::new());

        let task = tokio::spawn(run(
            sampler,
            interval,
            cancel.clone(),
            Arc::clone(&refresh),
            snapshot_tx,
            state_tx,
        ));

        PollerHandle {
            snapshots: snapshot_rx,
            state: state_rx,
            refresh,
            cancel,
            task,
        }
    }
}

async fn run<R: CommandRunner>(
    sampler: Arc<Sampler<R>>,
    interval: Duration,
    cancel: CancellationToken,
    refresh: Arc<Notify>,
    snapshot_tx: watch::Sender<Option<Snapshot>>,
    state_tx: watch::Sender<PollerState>,
) {
    info!(interval_ms = interval.as_millis() as u64, "poller started");
    state_tx.send_replace(PollerState::Polling);
    let mut cycle = 0u64;

    loop {
        let sample = async { tokio::join!(sampler.system_stats(), sampler.process_list()) };
        // Dropping an in-flight cycle kills its child processes.
        let (stats, processes) = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            sample = sample => sample,
        };

        cycle += 1;
        debug!(cycle, processes = processes.len(), "cycle complete");
        snapshot_tx.send_replace(Some(Snapshot {
            cycle,
            stats,
            processes: processes.into(),
        }));

        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = refresh.notified() => debug!("refresh requested"),
            _ = tokio::time::sleep(interval) => {}
        }
    }

    state_tx.send_replace(PollerState::Stopped);
    info!(cycles = cycle, "poller stopped");
}

pub struct PollerHandle {
    snapshots: watch::Receiver<Option<Snapshot>>,
    state: watch::Receiver<PollerState>,
    refresh: Arc<Notify>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Receiver for the latest published snapshot; `None` until the first
    /// cycle completes.
    pub fn subscribe(&self) -> watch::Receiver<Option<Snapshot>> {
        self.snapshots.clone()
    }

    pub fn latest(&self) -> Option<Snapshot> {
        self.snapshots.borrow().clone()
    }

    pub fn state(&self) -> PollerState {
        *self.state.borrow()
    }

    /// Ends the current wait early. A request made while a cycle is running
    /// is kept and ends the following wait immediately.
    pub fn refresh_now(&self) {
        self.refresh.notify_one();
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Cancels the loop and waits for it to exit, dropping any in-flight
    /// cycle.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        let _ = self.task.await;
    }
}
