//! Egg Timer - a terminal countdown for cooking eggs
//!
//! This library provides the static catalog of cooking methods, the countdown
//! state machine, and the engine that drives it once per second with a
//! completion chime.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod notify;
pub mod state;
pub mod tasks;
pub mod utils;
pub mod view;

// Re-export commonly used types
pub use catalog::{Catalog, CookingMethod, CookingOption};
pub use config::Config;
pub use engine::{TimerEngine, TimerSnapshot};
pub use error::EggTimerError;
pub use notify::{Notifier, ToneGenerator};
pub use state::{format_time, Session, TimerPhase, TimerState};
pub use utils::signals::shutdown_signal;
