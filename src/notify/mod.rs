//! Completion notification
//!
//! When a countdown finishes the engine asks the [`Notifier`] to play the
//! chime. Audio is best effort: any failure is logged and dropped here so
//! it can never affect the timer.

pub mod tones;

use thiserror::Error;
use tracing::{debug, info};

pub use tones::{CommandTone, TerminalBell};

/// Audio output failures
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("Audio output failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Sound command is empty")]
    EmptyCommand,
}

/// One step of a frequency sweep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneStep {
    pub at_seconds: f32,
    pub frequency_hz: f32,
}

/// Description of the completion cue
#[derive(Debug, Clone, PartialEq)]
pub struct Chime {
    pub steps: Vec<ToneStep>,
    pub start_gain: f32,
    pub end_gain: f32,
    pub duration_seconds: f32,
}

impl Default for Chime {
    /// Short 800-600-800 Hz sweep fading out over half a second
    fn default() -> Self {
        Self {
            steps: vec![
                ToneStep { at_seconds: 0.0, frequency_hz: 800.0 },
                ToneStep { at_seconds: 0.1, frequency_hz: 600.0 },
                ToneStep { at_seconds: 0.2, frequency_hz: 800.0 },
            ],
            start_gain: 0.3,
            end_gain: 0.01,
            duration_seconds: 0.5,
        }
    }
}

/// Something that can make the completion sound
pub trait ToneGenerator: Send + Sync {
    fn play(&self, chime: &Chime) -> Result<(), AudioError>;
}

/// Fires the completion cue through a tone generator
pub struct Notifier {
    generator: Box<dyn ToneGenerator>,
    chime: Chime,
}

impl Notifier {
    pub fn new(generator: Box<dyn ToneGenerator>) -> Self {
        Self {
            generator,
            chime: Chime::default(),
        }
    }

    /// Notify that a countdown finished. Plays the chime only when sound is
    /// enabled; returns whether it played.
    pub fn notify(&self, sound_enabled: bool) -> bool {
        if !sound_enabled {
            info!("Timer finished (sound off)");
            return false;
        }
        match self.generator.play(&self.chime) {
            Ok(()) => {
                info!("Timer finished, chime played");
                true
            }
            Err(e) => {
                debug!("Audio notification failed: {}", e);
                false
            }
        }
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier").field("chime", &self.chime).finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use super::*;

    /// Counts play requests; optionally fails every one of them
    #[derive(Clone, Default)]
    pub struct RecordingTone {
        pub plays: Arc<AtomicUsize>,
        pub fail: bool,
    }

    impl RecordingTone {
        pub fn failing() -> Self {
            Self { fail: true, ..Self::default() }
        }

        pub fn count(&self) -> usize {
            self.plays.load(Ordering::SeqCst)
        }
    }

    impl ToneGenerator for RecordingTone {
        fn play(&self, _chime: &Chime) -> Result<(), AudioError> {
            self.plays.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AudioError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "no audio device",
                )));
            }
            Ok(())
        }
    }
}
