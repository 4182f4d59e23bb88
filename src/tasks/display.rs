//! Terminal output for the timer page
//!
//! Everything the timer page writes goes through a [`Console`]. In JSON mode
//! each write is a single JSON object on its own line, so the stream stays
//! machine readable even when the user types commands.

use std::{
    io::Write,
    sync::{Arc, Mutex},
};
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::{engine::TimerSnapshot, state::TimerPhase, view};

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum JsonLine<'a> {
    Snapshot(&'a TimerSnapshot),
    Message { text: &'a str },
}

/// Shared, line-oriented output sink
#[derive(Clone)]
pub struct Console {
    json: bool,
    out: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl Console {
    pub fn stdout(json: bool) -> Self {
        Self::new(json, Box::new(std::io::stdout()))
    }

    pub fn new(json: bool, out: Box<dyn Write + Send>) -> Self {
        Self {
            json,
            out: Arc::new(Mutex::new(out)),
        }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Print user-facing text, wrapped as a message object in JSON mode
    pub fn message(&self, text: &str) {
        let result = self.with_out(|out| {
            if self.json {
                serde_json::to_writer(&mut *out, &JsonLine::Message { text })?;
                writeln!(out)?;
            } else {
                writeln!(out, "{}", text)?;
            }
            Ok(())
        });
        if let Err(e) = result {
            warn!("Failed to print message: {}", e);
        }
    }

    /// Draw a snapshot. While running the text line is redrawn in place.
    fn snapshot(&self, snapshot: &TimerSnapshot, last_phase: Option<TimerPhase>) -> anyhow::Result<()> {
        self.with_out(|out| {
            if self.json {
                serde_json::to_writer(&mut *out, &JsonLine::Snapshot(snapshot))?;
                writeln!(out)?;
                return Ok(());
            }

            let line = view::render_status(snapshot);
            match (last_phase, snapshot.phase) {
                (Some(TimerPhase::Running), TimerPhase::Running) => {
                    write!(out, "\r\x1b[2K{}", line)?;
                }
                (Some(TimerPhase::Running), phase) => {
                    writeln!(out, "\r\x1b[2K{}", line)?;
                    if phase == TimerPhase::Complete {
                        writeln!(out, "{}", view::render_complete(snapshot.option))?;
                    }
                }
                (_, TimerPhase::Running) => write!(out, "{}", line)?,
                _ => writeln!(out, "{}", line)?,
            }
            Ok(())
        })
    }

    fn with_out<F>(&self, f: F) -> anyhow::Result<()>
    where
        F: FnOnce(&mut Box<dyn Write + Send>) -> anyhow::Result<()>,
    {
        let mut out = self
            .out
            .lock()
            .map_err(|e| anyhow::anyhow!("Failed to lock console: {}", e))?;
        f(&mut out)?;
        out.flush()?;
        Ok(())
    }
}

/// Print a status line whenever the engine publishes a new snapshot.
///
/// Ends when the engine is dropped.
pub async fn display_task(mut snapshots: watch::Receiver<TimerSnapshot>, console: Console) {
    debug!("Starting display task");

    let mut last_phase = None;
    loop {
        let snapshot = snapshots.borrow_and_update().clone();
        if let Err(e) = console.snapshot(&snapshot, last_phase) {
            warn!("Failed to draw timer status: {}", e);
        }
        last_phase = Some(snapshot.phase);

        if snapshots.changed().await.is_err() {
            break;
        }
    }

    if !console.is_json() && last_phase == Some(TimerPhase::Running) {
        console.message("");
    }
    debug!("Display task finished");
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// In-memory sink that can be read back after the console is done
    #[derive(Clone, Default)]
    pub struct SharedBuf(pub Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        pub fn contents(&self) -> String {
            let bytes = self.0.lock().unwrap().clone();
            String::from_utf8(bytes).unwrap()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }
}
