//! Tone generator backends

use std::{
    io::Write,
    process::Stdio,
    sync::Mutex,
};
use tokio::process::Command;
use tracing::debug;

use super::{AudioError, Chime, ToneGenerator};

/// Rings the terminal bell
pub struct TerminalBell<W> {
    out: Mutex<W>,
}

impl TerminalBell<std::io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

impl<W: Write + Send> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out: Mutex::new(out) }
    }

    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<W: Write + Send> ToneGenerator for TerminalBell<W> {
    fn play(&self, _chime: &Chime) -> Result<(), AudioError> {
        let mut out = self
            .out
            .lock()
            .map_err(|e| std::io::Error::other(format!("Failed to lock bell output: {}", e)))?;
        out.write_all(b"\x07")?;
        out.flush()?;
        Ok(())
    }
}

/// Runs an external player command, e.g. `paplay /usr/share/sounds/done.oga`.
///
/// The child is not awaited.
#[derive(Debug, Clone)]
pub struct CommandTone {
    program: String,
    args: Vec<String>,
}

impl CommandTone {
    /// Build from a whitespace separated command line
    pub fn parse(command: &str) -> Result<Self, AudioError> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or(AudioError::EmptyCommand)?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }
}

impl ToneGenerator for CommandTone {
    fn play(&self, chime: &Chime) -> Result<(), AudioError> {
        debug!("Spawning sound command: {} {:?}", self.program, self.args);

        let peak = chime.steps.iter().map(|s| s.frequency_hz).fold(0.0_f32, f32::max);
        Command::new(&self.program)
            .args(&self.args)
            .env("EGG_TIMER_CHIME_HZ", format!("{}", peak))
            .env("EGG_TIMER_CHIME_SECONDS", format!("{}", chime.duration_seconds))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        Ok(())
    }
}
