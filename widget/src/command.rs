//! User events read from the terminal.

use std::str::FromStr;
use std::sync::Arc;

use ratewatch_fx::ConversionEngine;
use thiserror::Error;

use crate::view;
use crate::widget::ConverterWidget;

/// Help text for the interactive prompt.
pub const HELP: &str = "\
Commands:
  <number> | amount <x>   set the amount
  swap | s                swap USD and INR
  refresh | r             fetch the rate now
  show                    print the panel
  help | ?                show this help
  quit | q | exit         leave";

/// One user event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Edit the amount field.
    Amount(String),
    /// Swap direction.
    Swap,
    /// Manual refresh.
    Refresh,
    /// Print the panel.
    Show,
    /// Print help.
    Help,
    /// Unmount and exit.
    Quit,
}

/// Input line that is not a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCommandError {
    #[error("Empty input")]
    Empty,

    #[error("Unknown command: {0} (type `help`)")]
    Unknown(String),

    #[error("`amount` needs a value")]
    MissingAmount,
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_lowercase().as_str() {
            "" => Err(ParseCommandError::Empty),
            "amount" | "a" if rest.is_empty() => Err(ParseCommandError::MissingAmount),
            "amount" | "a" => Ok(Command::Amount(rest.to_string())),
            "swap" | "s" => Ok(Command::Swap),
            "refresh" | "r" => Ok(Command::Refresh),
            "show" => Ok(Command::Show),
            "help" | "?" => Ok(Command::Help),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            _ if ConversionEngine::parse_amount(line).is_some() => {
                Ok(Command::Amount(line.to_string()))
            }
            _ => Err(ParseCommandError::Unknown(line.to_string())),
        }
    }
}

/// What the input loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to print; state subscribers will redraw.
    Continue,
    /// Print this text.
    Print(String),
    /// Leave the input loop.
    Quit,
}

impl Command {
    /// Apply the command to `widget`.
    ///
    /// A manual refresh runs on its own task so input keeps flowing while
    /// the request is in flight.
    pub fn apply(self, widget: &Arc<ConverterWidget>) -> Outcome {
        match self {
            Command::Amount(amount) => {
                widget.set_amount(amount);
                Outcome::Continue
            }
            Command::Swap => {
                widget.swap();
                Outcome::Continue
            }
            Command::Refresh => {
                let widget = widget.clone();
                tokio::spawn(async move {
                    widget.request_refresh().await;
                });
                Outcome::Continue
            }
            Command::Show => Outcome::Print(view::render(&widget.snapshot())),
            Command::Help => Outcome::Print(HELP.to_string()),
            Command::Quit => Outcome::Quit,
        }
    }
}
