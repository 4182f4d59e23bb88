//! Countdown state machine for a single cooking option

use serde::Serialize;
use tracing::{debug, info};

use crate::catalog::CookingOption;

/// Lifecycle phase of the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    Idle,
    Running,
    Complete,
}

/// Result of advancing the countdown by one second
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still running, this many seconds left
    Counting(u64),
    /// Just reached zero; fire the completion notification
    Completed,
    /// The timer was not running
    Ignored,
}

/// Timer state for the selected cooking option
#[derive(Debug, Clone)]
pub struct TimerState {
    option: CookingOption,
    remaining_seconds: u64,
    phase: TimerPhase,
}

impl TimerState {
    /// Create an idle timer seeded with the option's full duration
    pub fn new(option: CookingOption) -> Self {
        Self {
            option,
            remaining_seconds: option.duration_seconds(),
            phase: TimerPhase::Idle,
        }
    }

    /// Begin counting down from the full duration.
    ///
    /// Only valid from `Idle`; returns `false` when ignored.
    pub fn start(&mut self) -> bool {
        if self.phase != TimerPhase::Idle {
            debug!("Ignoring start while {:?}", self.phase);
            return false;
        }
        self.remaining_seconds = self.option.duration_seconds();
        self.phase = TimerPhase::Running;
        info!("Timer started for {} ({}s)", self.option.name, self.remaining_seconds);
        true
    }

    /// Abort a running countdown. Zeroes the remaining time without
    /// completing.
    pub fn stop(&mut self) -> bool {
        if self.phase != TimerPhase::Running {
            debug!("Ignoring stop while {:?}", self.phase);
            return false;
        }
        self.remaining_seconds = 0;
        self.phase = TimerPhase::Idle;
        info!("Timer stopped for {}", self.option.name);
        true
    }

    /// Restore the full duration and return to `Idle`.
    ///
    /// Ignored while running; a running countdown has to be stopped first.
    pub fn reset(&mut self) -> bool {
        if self.phase == TimerPhase::Running {
            debug!("Ignoring reset while running");
            return false;
        }
        self.remaining_seconds = self.option.duration_seconds();
        self.phase = TimerPhase::Idle;
        debug!("Timer reset to {}s", self.remaining_seconds);
        true
    }

    /// Replace the active option and reseed, whatever the current phase
    pub fn select_option(&mut self, option: CookingOption) {
        self.option = option;
        self.remaining_seconds = option.duration_seconds();
        self.phase = TimerPhase::Idle;
        info!("Selected option {} ({} min)", option.name, option.duration_minutes);
    }

    /// Advance by one second
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != TimerPhase::Running {
            return TickOutcome::Ignored;
        }
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.phase = TimerPhase::Complete;
            info!("Timer complete for {}", self.option.name);
            TickOutcome::Completed
        } else {
            TickOutcome::Counting(self.remaining_seconds)
        }
    }

    pub fn option(&self) -> &CookingOption {
        &self.option
    }

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.phase == TimerPhase::Running
    }

    pub fn is_complete(&self) -> bool {
        self.phase == TimerPhase::Complete
    }

    /// Elapsed fraction of the full duration in `[0, 1]`
    pub fn progress(&self) -> f64 {
        let full = self.option.duration_seconds();
        if full == 0 {
            return 1.0;
        }
        let elapsed = full.saturating_sub(self.remaining_seconds);
        (elapsed as f64 / full as f64).clamp(0.0, 1.0)
    }
}

/// Format seconds as "MM:SS"
pub fn format_time(seconds: u64) -> String {
    let m = seconds / 60;
    let s = seconds % 60;
    format!("{:02}:{:02}", m, s)
}
