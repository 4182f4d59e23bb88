//! One-second tick source for a running countdown

use std::time::Duration;
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::debug;

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Events delivered to the engine's owner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// One second elapsed for the countdown started as `generation`
    Tick { generation: u64 },
}

/// Owned handle to a spawned tick task. Dropping it cancels the task.
#[derive(Debug)]
pub struct TickHandle {
    generation: u64,
    handle: JoinHandle<()>,
}

impl TickHandle {
    /// Spawn a task sending a tick every second, starting one second from now
    pub fn spawn(generation: u64, events: mpsc::UnboundedSender<TimerEvent>) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + TICK_INTERVAL, TICK_INTERVAL);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                if events.send(TimerEvent::Tick { generation }).is_err() {
                    debug!("Tick receiver dropped, ending ticker {}", generation);
                    break;
                }
            }
        });

        debug!("Ticker {} started", generation);
        Self { generation, handle }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Stop the tick task
    pub fn cancel(self) {
        debug!("Ticker {} cancelled", self.generation);
        // Drop aborts
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
