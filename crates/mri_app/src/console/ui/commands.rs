use std::path::PathBuf;

use mri_core::Theme;
use thiserror::Error;

pub const HELP_TEXT: &str = "\
Commands:
  open <path>         select a JPEG or PNG scan (no path cancels the selection)
  analyze             send the selected scan for classification
  retry               resend after a failed analysis
  reset               clear the selection and start over
  export              save a text report of the current result
  dismiss             hide the current message
  theme [light|dark]  toggle or set the colour theme
  health              check that the inference service is up
  status              redraw the current screen
  help                show this list
  quit                exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `None` behaves like a cancelled file picker.
    Open(Option<PathBuf>),
    Analyze,
    Retry,
    Reset,
    Export,
    Dismiss,
    /// `None` toggles.
    Theme(Option<Theme>),
    Health,
    Status,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command '{0}', type 'help' for a list")]
    Unknown(String),
    #[error("'{command}' takes no arguments")]
    UnexpectedArgument { command: &'static str },
    #[error("{0}")]
    InvalidTheme(String),
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "open" | "select" | "upload" => Command::Open(parse_path(rest)),
        "theme" => {
            if rest.is_empty() {
                Command::Theme(None)
            } else {
                Command::Theme(Some(rest.parse::<Theme>().map_err(CommandError::InvalidTheme)?))
            }
        }
        other => {
            let command = match other {
                "analyze" | "analyse" => Command::Analyze,
                "retry" => Command::Retry,
                "reset" | "new" => Command::Reset,
                "export" | "report" => Command::Export,
                "dismiss" => Command::Dismiss,
                "health" => Command::Health,
                "status" => Command::Status,
                "help" | "?" => Command::Help,
                "quit" | "exit" | "q" => Command::Quit,
                _ => return Err(CommandError::Unknown(word.to_string())),
            };
            if !rest.is_empty() {
                return Err(CommandError::UnexpectedArgument {
                    command: command.name(),
                });
            }
            command
        }
    };
    Ok(Some(command))
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Open(_) => "open",
            Command::Analyze => "analyze",
            Command::Retry => "retry",
            Command::Reset => "reset",
            Command::Export => "export",
            Command::Dismiss => "dismiss",
            Command::Theme(_) => "theme",
            Command::Health => "health",
            Command::Status => "status",
            Command::Help => "help",
            Command::Quit => "quit",
        }
    }
}

fn parse_path(raw: &str) -> Option<PathBuf> {
    let unquoted = raw
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| raw.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
        .unwrap_or(raw);
    if unquoted.is_empty() {
        None
    } else {
        Some(PathBuf::from(unquoted))
    }
}
