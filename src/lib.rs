use shakmaty::Color;

use crate::board::{Board, Square};
use crate::game_logic::GameState;

pub mod board;
pub mod feedback;
pub mod game_logic;
pub mod shell;

/// Input from whatever shell the players interact with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellEvent {
    /// A player clicked a square
    Click(Square),
    /// Start over from the initial position
    Reset,
    /// Replace the game with a custom position
    Load { board: Board, turn: Color },
    /// Draw the current state again without changing it
    Redraw,
}

/// Trait for receiving player input.
///
/// Abstracts over the interactive terminal and scripted inputs,
/// providing a uniform interface for [`run_session`].
pub trait EventSource {
    /// Error type for input failures.
    type Error: std::fmt::Debug + std::fmt::Display;

    /// Wait for the next event. `Ok(None)` ends the session.
    fn next_event(&mut self) -> Result<Option<ShellEvent>, Self::Error>;
}

/// Trait for presenting the game to the players.
///
/// Mirrors [`EventSource`] on the output side of the session loop.
pub trait BoardDisplay {
    /// Error type for display update failures.
    type Error: std::fmt::Debug + std::fmt::Display;

    /// Show the board, highlights and whose turn it is.
    fn show(&mut self, game: &GameState) -> Result<(), Self::Error>;

    /// Tell the players the game has ended and who won.
    fn announce_winner(&mut self, winner: Color) -> Result<(), Self::Error>;
}

/// Error that stopped a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError<S, D> {
    #[error("event source failed: {0}")]
    Source(S),
    #[error("display failed: {0}")]
    Display(D),
}

/// Feed events from `source` into `game` until the source runs dry.
///
/// The display is refreshed once up front and after every event. When an
/// event ends the game, the winner is announced once.
pub fn run_session<S, D>(
    source: &mut S,
    display: &mut D,
    game: &mut GameState,
) -> Result<(), SessionError<S::Error, D::Error>>
where
    S: EventSource,
    D: BoardDisplay,
{
    display.show(game).map_err(SessionError::Display)?;

    while let Some(event) = source.next_event().map_err(SessionError::Source)? {
        let was_over = game.is_game_over();

        match event {
            ShellEvent::Click(square) => {
                game.click(square);
            }
            ShellEvent::Reset => game.reset(),
            ShellEvent::Load { board, turn } => {
                log::info!("loaded {}, {turn:?} to move", board.placement());
                *game = GameState::from_board(board, turn);
            }
            ShellEvent::Redraw => {}
        }

        refresh(display, game, was_over).map_err(SessionError::Display)?;
    }

    Ok(())
}

/// Redraw after an event, announcing the winner if that event ended the game.
fn refresh<D: BoardDisplay>(
    display: &mut D,
    game: &GameState,
    was_over: bool,
) -> Result<(), D::Error> {
    display.show(game)?;

    if !was_over && let Some(winner) = game.winner() {
        display.announce_winner(winner)?;
    }
    Ok(())
}
