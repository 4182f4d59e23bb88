//! Error types shared across the crate

use thiserror::Error;

/// Errors raised while setting up or driving a timer session
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EggTimerError {
    #[error("Method not found: {0}")]
    UnknownMethod(String),

    #[error("{method} has no option {index} (choose 1-{count})")]
    OptionOutOfRange {
        method: &'static str,
        index: usize,
        count: usize,
    },
}
