mod display;
mod script;
mod terminal;

pub use display::{DisplayError, TerminalDisplay, piece_glyph, status_line, winner_message};
pub use script::{ParseError, ScriptedEvents};
pub use terminal::{CommandError, InputError, StdinEvents, run_interactive_terminal};
