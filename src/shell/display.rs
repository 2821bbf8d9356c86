use std::io::{self, Write};

use shakmaty::{Color, Piece, Role};

use crate::BoardDisplay;
use crate::board::{BOARD_SIZE, Square};
use crate::feedback::{BoardFeedback, SquareFeedback, compute_feedback};
use crate::game_logic::GameState;

/// Terminal-based board display.
///
/// Renders the board as an 8×8 grid of piece glyphs with ANSI color-coded
/// highlights for the selection and its destinations.
#[derive(Debug, Default)]
pub struct TerminalDisplay;

impl TerminalDisplay {
    /// Create a new terminal display.
    pub fn new() -> Self {
        Self
    }
}

/// Error type for terminal display operations.
#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error("failed to write to terminal: {0}")]
    Io(#[from] io::Error),
}

impl BoardDisplay for TerminalDisplay {
    type Error = DisplayError;

    fn show(&mut self, game: &GameState) -> Result<(), Self::Error> {
        let mut out = io::stdout().lock();
        // Clear the screen and move the cursor to the top-left.
        write!(out, "\x1B[2J\x1B[H")?;
        writeln!(out, "♟️  Hotseat Chess")?;
        writeln!(out)?;
        writeln!(
            out,
            "Commands: <square> | r (reset) | load <placement> [w|b] | p (refresh) | q (quit)"
        )?;
        writeln!(out)?;
        render_board(&mut out, game)
    }

    fn announce_winner(&mut self, winner: Color) -> Result<(), Self::Error> {
        let mut out = io::stdout().lock();
        writeln!(out, "\n🏁 {}", winner_message(winner))?;
        out.flush()?;
        Ok(())
    }
}

/// Render the board and status line to any writer. Extracted for testability.
fn render_board(w: &mut impl Write, game: &GameState) -> Result<(), DisplayError> {
    let feedback = compute_feedback(game);

    for row in 0..BOARD_SIZE as u8 {
        write!(w, " {} ", BOARD_SIZE as u8 - row)?;
        for col in 0..BOARD_SIZE as u8 {
            let Some(square) = Square::new(row, col) else {
                continue;
            };
            write!(w, "{}", format_square(game.piece_at(square), &feedback, square))?;
        }
        writeln!(w)?;
    }
    writeln!(w, "    a  b  c  d  e  f  g  h")?;
    writeln!(w)?;
    writeln!(w, "{}", status_line(game))?;
    w.flush()?;
    Ok(())
}

/// A single cell: the piece glyph (or a dot) wrapped in the feedback color.
fn format_square(piece: Option<Piece>, feedback: &BoardFeedback, square: Square) -> String {
    let glyph = piece.map_or('·', piece_glyph);
    match feedback.get(square) {
        Some(SquareFeedback::Destination) => format!("\x1b[44m {glyph} \x1b[0m"),
        Some(SquareFeedback::Capture) => format!("\x1b[41m {glyph} \x1b[0m"),
        Some(SquareFeedback::Origin) => format!("\x1b[42m {glyph} \x1b[0m"),
        None => format!(" {glyph} "),
    }
}

/// Unicode chess symbol for a piece.
pub fn piece_glyph(piece: Piece) -> char {
    match (piece.role, piece.color) {
        (Role::King, Color::White) => '♔',
        (Role::Queen, Color::White) => '♕',
        (Role::Rook, Color::White) => '♖',
        (Role::Bishop, Color::White) => '♗',
        (Role::Knight, Color::White) => '♘',
        (Role::Pawn, Color::White) => '♙',
        (Role::King, Color::Black) => '♚',
        (Role::Queen, Color::Black) => '♛',
        (Role::Rook, Color::Black) => '♜',
        (Role::Bishop, Color::Black) => '♝',
        (Role::Knight, Color::Black) => '♞',
        (Role::Pawn, Color::Black) => '♟',
    }
}

/// Turn indicator shown under the board.
pub fn status_line(game: &GameState) -> String {
    if game.is_game_over() {
        return "Game Over".to_string();
    }
    format!("{}'s Turn", color_name(game.turn()))
}

/// Announcement for the end of the game.
pub fn winner_message(winner: Color) -> String {
    format!("{} wins!", color_name(winner))
}

fn color_name(color: Color) -> &'static str {
    match color {
        Color::White => "White",
        Color::Black => "Black",
    }
}
