//! Timer engine: the only owner of mutable timer state
//!
//! The engine wraps a [`Session`] and drives it from user actions and tick
//! events. While running it holds a [`TickHandle`]; every path out of the
//! running phase cancels that handle. Each countdown gets a new generation
//! number, and ticks carrying an older generation are dropped, so a tick
//! that was already queued when the user switched options can never touch
//! the new countdown.

use chrono::{DateTime, Local, TimeDelta};
use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::{
    catalog::CookingOption,
    error::EggTimerError,
    notify::Notifier,
    state::{format_time, Session, TickOutcome, TimerPhase},
    tasks::ticker::{TickHandle, TimerEvent},
};

/// Read-only view of the timer published after every change
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimerSnapshot {
    pub method: &'static str,
    pub option: &'static str,
    pub option_index: usize,
    pub remaining_seconds: u64,
    pub display: String,
    pub phase: TimerPhase,
    pub progress: f64,
    pub sound_enabled: bool,
    pub ready_at: Option<DateTime<Local>>,
}

impl TimerSnapshot {
    fn capture(session: &Session, ready_at: Option<DateTime<Local>>) -> Self {
        let timer = &session.timer;
        Self {
            method: session.method().key,
            option: session.selected_option().name,
            option_index: session.selected_index(),
            remaining_seconds: timer.remaining_seconds(),
            display: format_time(timer.remaining_seconds()),
            phase: timer.phase(),
            progress: timer.progress(),
            sound_enabled: session.sound_enabled,
            ready_at,
        }
    }
}

#[derive(Debug)]
pub struct TimerEngine {
    session: Session,
    notifier: Notifier,
    ticker: Option<TickHandle>,
    generation: u64,
    ready_at: Option<DateTime<Local>>,
    completions: u64,
    events_tx: mpsc::UnboundedSender<TimerEvent>,
    snapshot_tx: watch::Sender<TimerSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    _snapshot_rx: watch::Receiver<TimerSnapshot>,
}

impl TimerEngine {
    /// Create an engine and the receiver its tick events arrive on
    pub fn new(session: Session, notifier: Notifier) -> (Self, mpsc::UnboundedReceiver<TimerEvent>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(TimerSnapshot::capture(&session, None));

        let engine = Self {
            session,
            notifier,
            ticker: None,
            generation: 0,
            ready_at: None,
            completions: 0,
            events_tx,
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
        };
        (engine, events_rx)
    }

    /// Start the countdown. Returns `false` if the timer was not idle.
    pub fn start(&mut self) -> bool {
        if !self.session.timer.start() {
            return false;
        }

        self.generation += 1;
        self.ticker = Some(TickHandle::spawn(self.generation, self.events_tx.clone()));

        let remaining = i64::try_from(self.session.timer.remaining_seconds()).unwrap_or(i64::MAX);
        self.ready_at = TimeDelta::try_seconds(remaining)
            .and_then(|delta| Local::now().checked_add_signed(delta));

        self.publish();
        true
    }

    /// Abort the countdown without completing it
    pub fn stop(&mut self) -> bool {
        if !self.session.timer.stop() {
            return false;
        }
        self.cancel_ticker();
        self.publish();
        true
    }

    /// Return to the full duration after completion
    pub fn reset(&mut self) -> bool {
        if !self.session.timer.reset() {
            return false;
        }
        self.publish();
        true
    }

    /// Switch to the option at zero-based `index`, cancelling any countdown
    pub fn select_option(&mut self, index: usize) -> Result<&'static CookingOption, EggTimerError> {
        let option = self.session.select_option(index)?;
        self.cancel_ticker();
        self.publish();
        Ok(option)
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        if self.session.sound_enabled != enabled {
            info!("Sound {}", if enabled { "enabled" } else { "disabled" });
        }
        self.session.sound_enabled = enabled;
        self.publish();
    }

    /// Flip the sound preference, returning the new value
    pub fn toggle_sound(&mut self) -> bool {
        let enabled = !self.session.sound_enabled;
        self.set_sound_enabled(enabled);
        enabled
    }

    /// Apply a tick event
    pub fn on_event(&mut self, event: TimerEvent) -> TickOutcome {
        match event {
            TimerEvent::Tick { generation } => self.on_tick(generation),
        }
    }

    fn on_tick(&mut self, generation: u64) -> TickOutcome {
        let current = self.ticker.as_ref().map(TickHandle::generation);
        if current != Some(generation) {
            debug!("Dropping stale tick from generation {} (current {:?})", generation, current);
            return TickOutcome::Ignored;
        }

        let outcome = self.session.timer.tick();
        match outcome {
            TickOutcome::Completed => {
                self.cancel_ticker();
                self.completions += 1;
                self.notifier.notify(self.session.sound_enabled);
            }
            TickOutcome::Counting(remaining) => {
                debug!("Tick: {}s remaining", remaining);
            }
            TickOutcome::Ignored => {}
        }
        self.publish();
        outcome
    }

    /// Release the ticker when the view goes away
    pub fn shutdown(&mut self) {
        if self.session.timer.is_running() {
            info!("Shutting down with the timer still running");
        }
        self.cancel_ticker();
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        self.snapshot_tx.borrow().clone()
    }

    /// Watch snapshots as they change
    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Number of times a countdown has reached zero
    pub fn completions(&self) -> u64 {
        self.completions
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }

    fn cancel_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
        self.ready_at = None;
    }

    fn publish(&self) {
        let snapshot = TimerSnapshot::capture(&self.session, self.ready_at);
        if let Err(e) = self.snapshot_tx.send(snapshot) {
            warn!("Failed to send timer update: {}", e);
        }
    }
}

impl Drop for TimerEngine {
    fn drop(&mut self) {
        self.cancel_ticker();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::testing::RecordingTone;

    fn engine(key: &str, index: usize) -> (TimerEngine, mpsc::UnboundedReceiver<TimerEvent>, RecordingTone) {
        let tone = RecordingTone::default();
        let session = Session::for_key(key, index).unwrap();
        let (engine, rx) = TimerEngine::new(session, Notifier::new(Box::new(tone.clone())));
        (engine, rx, tone)
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_spawns_ticker() {
        let (mut engine, _rx, _tone) = engine("fried", 0);
        assert!(engine.start());
        assert!(engine.is_ticking());

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.phase, TimerPhase::Running);
        assert_eq!(snapshot.remaining_seconds, 120);
        assert_eq!(snapshot.display, "02:00");
        assert!(snapshot.ready_at.is_some());

        assert!(!engine.start());
    }

    #[tokio::test(start_paused = true)]
    async fn test_runs_to_completion() {
        let (mut engine, mut rx, tone) = engine("fried", 0);
        engine.start();

        let mut ticks = 0;
        while let Some(event) = rx.recv().await {
            ticks += 1;
            if engine.on_event(event) == TickOutcome::Completed {
                break;
            }
        }

        assert_eq!(ticks, 120);
        assert!(!engine.is_ticking());
        assert_eq!(engine.completions(), 1);
        assert_eq!(tone.count(), 1);

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.phase, TimerPhase::Complete);
        assert_eq!(snapshot.display, "00:00");
        assert_eq!(snapshot.progress, 1.0);
        assert_eq!(snapshot.ready_at, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_cancels_without_notifying() {
        let (mut engine, mut rx, tone) = engine("poached", 0);
        engine.start();
        let event = rx.recv().await.unwrap();
        engine.on_event(event);

        assert!(engine.stop());
        assert!(!engine.is_ticking());
        assert_eq!(engine.snapshot().remaining_seconds, 0);
        assert_eq!(engine.snapshot().phase, TimerPhase::Idle);
        assert_eq!(engine.completions(), 0);
        assert_eq!(tone.count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_cancels_ticker() {
        let (mut engine, mut rx, tone) = engine("boiled", 0);
        engine.start();
        let event = rx.recv().await.unwrap();
        engine.on_event(event);

        engine.shutdown();
        assert!(!engine.is_ticking());

        tokio::time::sleep(std::time::Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());

        // With the engine gone every sender is dropped
        drop(engine);
        assert_eq!(rx.recv().await, None);
        assert_eq!(tone.count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_running_engine_stops_ticks() {
        let (mut engine, mut rx, _tone) = engine("fried", 0);
        engine.start();
        drop(engine);

        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_tick_is_dropped() {
        let (mut engine, _rx, _tone) = engine("boiled", 0);
        engine.start();
        let stale = TimerEvent::Tick { generation: engine.generation };

        engine.select_option(1).unwrap();
        assert_eq!(engine.on_event(stale), TickOutcome::Ignored);
        assert_eq!(engine.snapshot().remaining_seconds, 480);

        // A fresh countdown does not accept the old generation either
        engine.start();
        assert_eq!(engine.on_event(stale), TickOutcome::Ignored);
        assert_eq!(engine.snapshot().remaining_seconds, 480);
    }

    #[tokio::test(start_paused = true)]
    async fn test_select_option_while_running() {
        let (mut engine, _rx, _tone) = engine("boiled", 0);
        engine.start();

        let option = engine.select_option(2).unwrap();
        assert_eq!(option.name, "Hard Boiled");
        assert!(!engine.is_ticking());

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.phase, TimerPhase::Idle);
        assert_eq!(snapshot.remaining_seconds, 720);
        assert_eq!(snapshot.option_index, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_muted_completion_counts_but_is_silent() {
        let (mut engine, mut rx, tone) = engine("fried", 0);
        engine.toggle_sound();
        assert!(!engine.snapshot().sound_enabled);

        engine.start();
        while let Some(event) = rx.recv().await {
            if engine.on_event(event) == TickOutcome::Completed {
                break;
            }
        }
        assert_eq!(engine.completions(), 1);
        assert_eq!(tone.count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribers_see_updates() {
        let (mut engine, _rx, _tone) = engine("scrambled", 0);
        let mut updates = engine.subscribe();

        engine.select_option(1).unwrap();
        updates.changed().await.unwrap();
        assert_eq!(updates.borrow_and_update().remaining_seconds, 300);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_after_completion() {
        let (mut engine, mut rx, _tone) = engine("fried", 0);
        engine.start();
        while let Some(event) = rx.recv().await {
            if engine.on_event(event) == TickOutcome::Completed {
                break;
            }
        }
        assert!(engine.reset());
        assert_eq!(engine.snapshot().phase, TimerPhase::Idle);
        assert_eq!(engine.snapshot().remaining_seconds, 120);
        assert!(engine.start());
    }
}
