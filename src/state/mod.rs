//! State management module
//!
//! This module contains the countdown state machine and the session context
//! that carries it.

pub mod session;
pub mod timer_state;

// Re-export main types
pub use session::Session;
pub use timer_state::{format_time, TickOutcome, TimerPhase, TimerState};
