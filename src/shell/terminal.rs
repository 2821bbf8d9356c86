use std::io::{self, BufRead, Write};

use shakmaty::Color;
use thiserror::Error;

use super::TerminalDisplay;
use crate::board::{Board, BoardError, ParseSquareError, Square};
use crate::game_logic::GameState;
use crate::{EventSource, SessionError, ShellEvent, run_session};

/// Error type for reading terminal input.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read from terminal: {0}")]
    Io(#[from] io::Error),
}

/// A line of terminal input that could not be understood.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Square(#[from] ParseSquareError),
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("unknown side to move: '{0}' (expected w or b)")]
    Turn(String),
    #[error("unknown command: '{0}'")]
    Unknown(String),
}

#[derive(Debug, PartialEq)]
enum Command {
    Event(ShellEvent),
    Quit,
}

/// Reads commands from any buffered reader, prompting on stdout.
///
/// Lines that fail to parse are reported and skipped; end of input and
/// `q` both end the session.
#[derive(Debug)]
pub struct StdinEvents<R> {
    reader: R,
}

impl StdinEvents<io::StdinLock<'static>> {
    /// Read commands from standard input.
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock())
    }
}

impl<R: BufRead> StdinEvents<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> EventSource for StdinEvents<R> {
    type Error = InputError;

    fn next_event(&mut self) -> Result<Option<ShellEvent>, Self::Error> {
        loop {
            print!("> ");
            io::stdout().flush()?;

            let mut input = String::new();
            if self.reader.read_line(&mut input)? == 0 {
                return Ok(None);
            }

            match parse_command(&input) {
                Ok(Some(Command::Event(event))) => return Ok(Some(event)),
                Ok(Some(Command::Quit)) => return Ok(None),
                Ok(None) => continue,
                Err(e) => {
                    log::debug!("rejected input {:?}: {e}", input.trim());
                    println!("❌ {e}");
                }
            }
        }
    }
}

/// Parse one line of terminal input. Blank lines yield `None`.
fn parse_command(input: &str) -> Result<Option<Command>, CommandError> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    let Some(&head) = parts.first() else {
        return Ok(None);
    };

    let command = match head {
        "q" | "quit" => Command::Quit,
        "r" | "reset" => Command::Event(ShellEvent::Reset),
        "p" => Command::Event(ShellEvent::Redraw),
        "load" => {
            let placement = match parts.get(1) {
                Some(&"startpos") => return Ok(Some(load(Board::initial(), Color::White))),
                Some(placement) => placement,
                None => return Err(CommandError::Usage("load <placement> [w|b] | load startpos")),
            };
            let board = Board::from_placement(placement)?;
            let turn = match parts.get(2) {
                None | Some(&"w") => Color::White,
                Some(&"b") => Color::Black,
                Some(other) => return Err(CommandError::Turn(other.to_string())),
            };
            load(board, turn)
        }
        _ if parts.len() == 1 && head.len() == 2 => {
            Command::Event(ShellEvent::Click(head.parse::<Square>()?))
        }
        _ => return Err(CommandError::Unknown(input.trim().to_string())),
    };

    Ok(Some(command))
}

fn load(board: Board, turn: Color) -> Command {
    Command::Event(ShellEvent::Load { board, turn })
}

/// Runs an interactive terminal session on stdin/stdout.
pub fn run_interactive_terminal() -> Result<(), SessionError<InputError, super::DisplayError>> {
    let mut events = StdinEvents::stdin();
    let mut display = TerminalDisplay::new();
    let mut game = GameState::new();

    run_session(&mut events, &mut display, &mut game)
}
