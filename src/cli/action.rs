//! Interactive commands typed while a timer page is open

use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Start,
    Stop,
    Reset,
    /// One-based option number
    Select(usize),
    /// `None` toggles
    Sound(Option<bool>),
    Options,
    Tips,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionParseError {
    #[error("Type a command, or 'help' for the list")]
    Empty,

    #[error("Unknown command '{0}', type 'help' for the list")]
    Unknown(String),

    #[error("'{0}' is not an option number")]
    InvalidIndex(String),

    #[error("Sound takes 'on' or 'off', got '{0}'")]
    InvalidSound(String),
}

impl FromStr for UserAction {
    type Err = ActionParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut words = input.split_whitespace();
        let Some(command) = words.next() else {
            return Err(ActionParseError::Empty);
        };
        let argument = words.next();

        let action = match command.to_lowercase().as_str() {
            "start" | "s" => UserAction::Start,
            "stop" | "x" => UserAction::Stop,
            "reset" | "r" => UserAction::Reset,
            "options" | "o" => UserAction::Options,
            "tips" | "t" => UserAction::Tips,
            "help" | "h" | "?" => UserAction::Help,
            "quit" | "q" | "exit" => UserAction::Quit,
            "mute" | "m" => UserAction::Sound(None),
            "sound" => match argument.map(str::to_lowercase).as_deref() {
                None => UserAction::Sound(None),
                Some("on") => UserAction::Sound(Some(true)),
                Some("off") => UserAction::Sound(Some(false)),
                Some(other) => return Err(ActionParseError::InvalidSound(other.to_string())),
            },
            "select" | "option" => {
                let raw = argument.ok_or_else(|| ActionParseError::InvalidIndex(String::new()))?;
                UserAction::Select(parse_index(raw)?)
            }
            other if other.chars().all(|c| c.is_ascii_digit()) => UserAction::Select(parse_index(other)?),
            other => return Err(ActionParseError::Unknown(other.to_string())),
        };
        Ok(action)
    }
}

fn parse_index(raw: &str) -> Result<usize, ActionParseError> {
    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ActionParseError::InvalidIndex(raw.to_string())),
    }
}

pub const HELP: &str = "\
Commands:
  start, s         Start the timer
  stop, x          Abort the running timer
  reset, r         Reset a finished timer
  select N, N      Choose option N
  sound [on|off]   Toggle or set the completion sound (also: m)
  options, o       List the options
  tips, t          Show cooking tips
  help, h          Show this help
  quit, q          Leave";
