//! Background tasks module
//!
//! This module contains the tasks that run alongside the interactive loop.

pub mod display;
pub mod ticker;

// Re-export main items
pub use display::display_task;
pub use ticker::{TickHandle, TimerEvent};
