//! Command handlers for the `egg-timer` binary
//!
//! `list` and `show` render the catalog. `run` opens the timer page: a
//! single loop owns the [`TimerEngine`] and applies user input, tick events
//! and shutdown signals one at a time.

pub mod action;

use std::{future::Future, io::BufRead, process::ExitCode};

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{
    catalog::Catalog,
    config::RunArgs,
    engine::TimerEngine,
    notify::{CommandTone, Notifier, TerminalBell, ToneGenerator},
    state::{Session, TickOutcome, TimerPhase},
    tasks::display::{display_task, Console},
    utils::shutdown_signal,
    view,
};
use action::{UserAction, HELP};

/// Exit status used when the method key is unknown
pub const EXIT_NOT_FOUND: u8 = 2;

/// How a command finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    NotFound,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Done => ExitCode::SUCCESS,
            Outcome::NotFound => ExitCode::from(EXIT_NOT_FOUND),
        }
    }
}

/// Handle `egg-timer list`
pub fn list(json: bool) -> anyhow::Result<Outcome> {
    let methods = Catalog::list_all();
    if json {
        let text = serde_json::to_string_pretty(methods).context("Failed to encode catalog")?;
        println!("{}", text);
    } else {
        println!("{}", view::render_method_list(methods));
    }
    Ok(Outcome::Done)
}

/// Handle `egg-timer show <method>`
pub fn show(key: &str, json: bool) -> anyhow::Result<Outcome> {
    let Some(method) = Catalog::get(key) else {
        println!("{}", view::render_not_found(key));
        return Ok(Outcome::NotFound);
    };

    if json {
        let text = serde_json::to_string_pretty(method).context("Failed to encode method")?;
        println!("{}", text);
    } else {
        println!("{}", view::render_method_details(method, None));
    }
    Ok(Outcome::Done)
}

/// Handle `egg-timer run <method>` reading commands from stdin
pub async fn run(args: RunArgs) -> anyhow::Result<Outcome> {
    let generator: Box<dyn ToneGenerator> = match &args.sound_command {
        Some(command) => Box::new(
            CommandTone::parse(command).context("Invalid --sound-command")?,
        ),
        None => Box::new(TerminalBell::stderr()),
    };
    let console = Console::stdout(args.json);
    let input = spawn_line_reader(std::io::BufReader::new(std::io::stdin()));

    run_session(args, input, shutdown_signal(), Notifier::new(generator), console).await
}

/// Forward lines from a blocking reader over a channel.
///
/// The reader runs on its own thread so a pending read never holds up
/// shutdown; the thread ends at EOF, on a read error, or once the receiver
/// is gone and another line arrives.
pub fn spawn_line_reader<R>(reader: R) -> mpsc::UnboundedReceiver<String>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in reader.lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("Failed to read input: {}", e);
                    break;
                }
            }
        }
        debug!("Input reader finished");
    });
    rx
}

/// Run the timer page until the user quits, input ends, or `shutdown`
/// resolves
pub async fn run_session<S>(
    args: RunArgs,
    mut input: mpsc::UnboundedReceiver<String>,
    shutdown: S,
    notifier: Notifier,
    console: Console,
) -> anyhow::Result<Outcome>
where
    S: Future<Output = ()>,
{
    let Some(method) = Catalog::get(&args.method) else {
        console.message(&view::render_not_found(&args.method));
        return Ok(Outcome::NotFound);
    };
    if args.option == 0 {
        anyhow::bail!("Option numbers start at 1");
    }
    let session = Session::new(method, args.option - 1)?;

    let (mut engine, mut events) = TimerEngine::new(session, notifier);
    if args.mute {
        engine.set_sound_enabled(false);
    }

    info!("Opened timer for {} ({})", method.name, method.key);
    if !console.is_json() {
        console.message(&format!("{} {}", method.icon, method.name));
        console.message(&format!(
            "{}\n",
            view::render_options(method, Some(engine.session().selected_index()))
        ));
        console.message("Type 'help' for commands.");
    }

    let display = tokio::spawn(display_task(engine.subscribe(), console.clone()));

    if args.start {
        engine.start();
    }

    let mut input_open = true;
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            Some(event) = events.recv() => {
                let outcome = engine.on_event(event);
                if outcome == TickOutcome::Completed && !input_open {
                    debug!("Input closed and timer finished");
                    break;
                }
            }
            line = input.recv(), if input_open => {
                match line {
                    Some(line) => {
                        if line.trim().is_empty() {
                            continue;
                        }
                        match line.parse::<UserAction>() {
                            Ok(UserAction::Quit) => break,
                            Ok(action) => apply(&mut engine, action, &console),
                            Err(e) => console.message(&e.to_string()),
                        }
                    }
                    None => {
                        debug!("Input closed");
                        input_open = false;
                        if !engine.session().timer.is_running() {
                            break;
                        }
                    }
                }
            }
            _ = &mut shutdown => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    engine.shutdown();
    drop(engine);
    display.await.context("Display task failed")?;

    info!("Timer closed");
    Ok(Outcome::Done)
}

/// Apply one user action to the engine, reporting rejected ones
fn apply(engine: &mut TimerEngine, action: UserAction, console: &Console) {
    let phase = engine.session().timer.phase();
    match action {
        UserAction::Start => {
            if !engine.start() {
                match phase {
                    TimerPhase::Complete => {
                        console.message("Timer finished, 'reset' before starting again")
                    }
                    _ => console.message("Timer is already running"),
                }
            }
        }
        UserAction::Stop => {
            if !engine.stop() {
                console.message("Timer is not running");
            }
        }
        UserAction::Reset => {
            if !engine.reset() {
                console.message("Stop the timer before resetting");
            }
        }
        UserAction::Select(number) => {
            if let Err(e) = engine.select_option(number - 1) {
                console.message(&e.to_string());
            }
        }
        UserAction::Sound(Some(enabled)) => engine.set_sound_enabled(enabled),
        UserAction::Sound(None) => {
            engine.toggle_sound();
        }
        UserAction::Options => {
            let session = engine.session();
            console.message(&view::render_options(session.method(), Some(session.selected_index())));
        }
        UserAction::Tips => console.message(&view::render_tips(engine.session().method())),
        UserAction::Help => console.message(HELP),
        UserAction::Quit => {}
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{notify::testing::RecordingTone, tasks::display::testing::SharedBuf};

    fn args(method: &str, option: usize) -> RunArgs {
        RunArgs {
            method: method.to_string(),
            option,
            start: false,
            mute: false,
            sound_command: None,
            json: true,
        }
    }

    /// Input that has already been fully typed and then closed
    fn typed(lines: &[&str]) -> mpsc::UnboundedReceiver<String> {
        let (tx, rx) = mpsc::unbounded_channel();
        for line in lines {
            tx.send(line.to_string()).unwrap();
        }
        rx
    }

    async fn session(
        run_args: RunArgs,
        input: mpsc::UnboundedReceiver<String>,
        tone: &RecordingTone,
    ) -> anyhow::Result<Outcome> {
        let console = Console::new(run_args.json, Box::new(SharedBuf::default()));
        let notifier = Notifier::new(Box::new(tone.clone()));
        run_session(run_args, input, std::future::pending(), notifier, console).await
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_method_is_not_found() {
        let tone = RecordingTone::default();
        let code = session(args("omelette", 1), typed(&[]), &tone).await.unwrap();
        assert_eq!(code, Outcome::NotFound);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_method_wins_over_bad_option() {
        let tone = RecordingTone::default();
        let code = session(args("omelette", 0), typed(&[]), &tone).await.unwrap();
        assert_eq!(code, Outcome::NotFound);

        let err = session(args("boiled", 0), typed(&[]), &tone).await.unwrap_err();
        assert_eq!(err.to_string(), "Option numbers start at 1");
    }

    #[tokio::test(start_paused = true)]
    async fn test_option_out_of_range_is_error() {
        let tone = RecordingTone::default();
        let err = session(args("poached", 5), typed(&[]), &tone).await.unwrap_err();
        assert_eq!(err.to_string(), "poached has no option 5 (choose 1-2)");
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_then_eof_runs_to_completion() {
        let tone = RecordingTone::default();
        let code = session(args("fried", 1), typed(&["start"]), &tone).await.unwrap();
        assert_eq!(code, Outcome::Done);
        assert_eq!(tone.count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_aborts_without_chime() {
        let tone = RecordingTone::default();
        let input = typed(&["start", "stop", "quit"]);
        session(args("fried", 1), input, &tone).await.unwrap();
        assert_eq!(tone.count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_muted_run_is_silent() {
        let tone = RecordingTone::default();
        let mut run_args = args("poached", 2);
        run_args.start = true;
        run_args.mute = true;
        session(run_args, typed(&[]), &tone).await.unwrap();
        assert_eq!(tone.count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_bad_commands_do_not_abort() {
        let tone = RecordingTone::default();
        let input = typed(&[
            "boil", "select 9", "sound loud", "help", "tips", "options", "2", "m", "m", "start",
        ]);
        let code = session(args("scrambled", 1), input, &tone).await.unwrap();
        assert_eq!(code, Outcome::Done);
        assert_eq!(tone.count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_with_input_still_open() {
        let tone = RecordingTone::default();
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send("start".to_string()).unwrap();

        let console = Console::new(true, Box::new(SharedBuf::default()));
        let shutdown = tokio::time::sleep(Duration::from_secs(5));
        let code = run_session(args("boiled", 1), rx, shutdown, Notifier::new(Box::new(tone.clone())), console)
            .await
            .unwrap();

        assert_eq!(code, Outcome::Done);
        assert!(tx.is_closed());
        assert_eq!(tone.count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_json_mode_writes_only_json_lines() {
        let tone = RecordingTone::default();
        let buf = SharedBuf::default();
        let console = Console::new(true, Box::new(buf.clone()));
        let input = typed(&[
            "boil", "start", "start", "reset", "help", "tips", "options", "select 9", "stop",
            "stop", "sound loud", "m", "quit",
        ]);
        run_session(args("fried", 1), input, std::future::pending(), Notifier::new(Box::new(tone)), console)
            .await
            .unwrap();

        let output = buf.contents();
        let mut messages = 0;
        for line in output.lines() {
            let value: serde_json::Value = serde_json::from_str(line)
                .unwrap_or_else(|e| panic!("not JSON: {:?} ({})", line, e));
            if value["type"] == "message" {
                messages += 1;
            }
        }
        assert!(messages >= 9, "expected feedback messages, got {}", messages);
        assert!(output.contains("\"type\":\"snapshot\""));
    }

    #[test]
    fn test_line_reader_forwards_then_closes() {
        let mut rx = spawn_line_reader(std::io::Cursor::new("start\nquit\n"));
        assert_eq!(rx.blocking_recv(), Some("start".to_string()));
        assert_eq!(rx.blocking_recv(), Some("quit".to_string()));
        assert_eq!(rx.blocking_recv(), None);
    }
}
