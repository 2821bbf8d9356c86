use shakmaty::{Color, Piece};

use super::{movegen, rules};
use crate::board::{Board, Square};
use crate::feedback::FeedbackSource;

/// What a square click did to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Nothing changed
    Ignored,
    /// A piece of the side to move is now selected
    Selected(Square),
    /// The previous selection was dropped without moving
    Deselected,
    /// The selected piece moved; `captured` is whatever stood on `to`
    Moved {
        from: Square,
        to: Square,
        captured: Option<Piece>,
    },
}

/// A single game session: board, side to move and the player's selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    turn: Color,
    selection: Option<Square>,
    /// Destinations of the selected piece; empty without a selection.
    destinations: Vec<Square>,
    game_over: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedbackSource for GameState {
    fn selection(&self) -> Option<Square> {
        self.selection
    }

    fn destinations(&self) -> &[Square] {
        &self.destinations
    }

    fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board.piece_at(square)
    }
}

impl GameState {
    /// Starting position, white to move.
    #[inline]
    pub fn new() -> Self {
        Self::from_board(Board::initial(), Color::White)
    }

    /// Creates a game from an arbitrary board with `turn` to move.
    pub fn from_board(board: Board, turn: Color) -> Self {
        Self {
            board,
            turn,
            selection: None,
            destinations: Vec::new(),
            game_over: false,
        }
    }

    /// Throw the current game away and start over from the initial position.
    pub fn reset(&mut self) {
        *self = Self::new();
        log::info!("game reset");
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board.piece_at(square)
    }

    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    #[inline]
    pub fn selection(&self) -> Option<Square> {
        self.selection
    }

    #[inline]
    pub fn destinations(&self) -> &[Square] {
        &self.destinations
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// The side that did not make the final move, once the game is over.
    pub fn winner(&self) -> Option<Color> {
        self.game_over.then_some(!self.turn)
    }

    /// Destinations for whatever piece stands on `square`.
    #[inline]
    pub fn legal_destinations(&self, square: Square) -> Vec<Square> {
        movegen::legal_destinations(&self.board, square)
    }

    /// Handle a click on `square`.
    ///
    /// With a selection active, clicking one of its destinations plays the
    /// move, clicking another piece of ours re-selects, and any other click
    /// drops the selection. Without one, only our own pieces can be picked.
    /// Every click is ignored after the game has ended.
    pub fn click(&mut self, square: Square) -> ClickOutcome {
        if self.game_over {
            log::trace!("game over, ignoring click on {square}");
            return ClickOutcome::Ignored;
        }

        let ours = self
            .piece_at(square)
            .is_some_and(|piece| piece.color == self.turn);

        match self.selection {
            Some(from) if self.destinations.contains(&square) => {
                let captured = self.apply_move(from, square);
                ClickOutcome::Moved {
                    from,
                    to: square,
                    captured,
                }
            }
            _ if ours => {
                self.select(square);
                ClickOutcome::Selected(square)
            }
            Some(from) => {
                log::debug!("selection on {from} cleared by click on {square}");
                self.clear_selection();
                ClickOutcome::Deselected
            }
            None => {
                log::trace!("ignoring click on {square}");
                ClickOutcome::Ignored
            }
        }
    }

    /// Move whatever stands on `from` to `to` and pass the turn.
    ///
    /// No legality check is made here: the destination is simply
    /// overwritten, which is how captures happen. Returns the captured
    /// piece, if any. An empty `from` leaves the game untouched.
    pub fn apply_move(&mut self, from: Square, to: Square) -> Option<Piece> {
        let Some(piece) = self.board.take(from) else {
            log::warn!("no piece on {from}, move to {to} skipped");
            return None;
        };
        let captured = self.board.set(to, Some(piece));

        self.clear_selection();
        self.turn = !self.turn;
        log::info!("{:?} {:?} {from} -> {to}", piece.color, piece.role);
        if let Some(victim) = captured {
            log::debug!("captured {:?} {:?} on {to}", victim.color, victim.role);
        }

        if rules::is_checkmate(&self.board, self.turn) {
            self.game_over = true;
            log::info!("checkmate, {:?} wins", !self.turn);
        }

        captured
    }

    /// Mark the game as finished without a move, for tests of the end-of-game paths.
    #[cfg(test)]
    pub(crate) fn end_game(&mut self) {
        self.game_over = true;
    }

    fn select(&mut self, square: Square) {
        self.destinations = self.legal_destinations(square);
        self.selection = Some(square);
        log::debug!(
            "selected {square} with {} destinations",
            self.destinations.len()
        );
    }

    fn clear_selection(&mut self) {
        self.selection = None;
        self.destinations.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakmaty::Role;
    use test_case::test_case;

    fn sq(name: &str) -> Square {
        name.parse().expect("test square is invalid")
    }

    fn assert_piece(game: &GameState, square: &str, role: Role, color: Color) {
        let expected = Piece { role, color };
        assert_eq!(
            game.piece_at(sq(square)),
            Some(expected),
            "Expected {:?} at {}, found {:?}",
            expected,
            square,
            game.piece_at(sq(square))
        );
    }

    fn assert_empty(game: &GameState, square: &str) {
        assert_eq!(
            game.piece_at(sq(square)),
            None,
            "Expected empty at {}, found {:?}",
            square,
            game.piece_at(sq(square))
        );
    }

    impl GameState {
        fn from_placement(placement: &str, turn: Color) -> Self {
            let board = Board::from_placement(placement).expect("invalid placement");
            Self::from_board(board, turn)
        }
    }

    /// Click each whitespace-separated square in order.
    fn play(game: &mut GameState, clicks: &str) -> Vec<ClickOutcome> {
        clicks
            .split_whitespace()
            .map(|name| game.click(sq(name)))
            .collect()
    }

    #[test]
    fn new_game_is_white_to_move_without_selection() {
        let game = GameState::new();

        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.selection(), None);
        assert!(game.destinations().is_empty());
        assert!(!game.is_game_over());
        assert_eq!(game.winner(), None);
        assert_eq!(game.board(), &Board::initial());
    }

    #[test]
    fn clicking_empty_square_without_selection_changes_nothing() {
        let mut game = GameState::new();
        let before = game.clone();

        let outcome = game.click(sq("e4"));

        assert_eq!(outcome, ClickOutcome::Ignored);
        assert_eq!(game, before);
    }

    #[test]
    fn clicking_opponent_piece_without_selection_changes_nothing() {
        let mut game = GameState::new();
        let before = game.clone();

        assert_eq!(game.click(sq("e7")), ClickOutcome::Ignored);
        assert_eq!(game, before);
    }

    #[test]
    fn selecting_own_pawn_caches_destinations() {
        let mut game = GameState::new();

        let outcome = game.click(sq("e2"));

        assert_eq!(outcome, ClickOutcome::Selected(sq("e2")));
        assert_eq!(game.selection(), Some(sq("e2")));
        assert_eq!(game.destinations(), &[sq("e3"), sq("e4")]);
    }

    #[test]
    fn moved_pawn_loses_double_step() {
        let mut game = GameState::new();

        play(&mut game, "e2 e4 a7 a6");
        game.click(sq("e4"));

        assert_eq!(game.destinations(), &[sq("e5")]);
    }

    #[test]
    fn clicking_destination_moves_and_flips_turn() {
        let mut game = GameState::new();

        let outcomes = play(&mut game, "g1 f3");

        assert_eq!(
            outcomes[1],
            ClickOutcome::Moved {
                from: sq("g1"),
                to: sq("f3"),
                captured: None
            }
        );
        assert_empty(&game, "g1");
        assert_piece(&game, "f3", Role::Knight, Color::White);
        assert_eq!(game.turn(), Color::Black);
        assert_eq!(game.selection(), None);
        assert!(game.destinations().is_empty());
    }

    #[test]
    fn clicking_other_own_piece_reselects() {
        let mut game = GameState::new();

        play(&mut game, "e2 b1");

        assert_eq!(game.selection(), Some(sq("b1")));
        assert_eq!(game.destinations(), &[sq("a3"), sq("c3")]);
        assert_eq!(game.turn(), Color::White);
    }

    #[test_case("e5"; "empty non-destination")]
    #[test_case("e7"; "opponent piece out of reach")]
    fn clicking_elsewhere_clears_selection(target: &str) {
        let mut game = GameState::new();
        game.click(sq("e2"));

        let outcome = game.click(sq(target));

        assert_eq!(outcome, ClickOutcome::Deselected);
        assert_eq!(game.selection(), None);
        assert!(game.destinations().is_empty());
        assert_eq!(game.board(), &Board::initial());
        assert_eq!(game.turn(), Color::White);
    }

    #[test]
    fn clicking_selected_piece_again_keeps_it_selected() {
        let mut game = GameState::new();

        play(&mut game, "e2 e2");

        assert_eq!(game.selection(), Some(sq("e2")));
        assert_eq!(game.destinations().len(), 2);
    }

    #[test]
    fn black_cannot_move_on_whites_turn() {
        let mut game = GameState::new();

        play(&mut game, "e7 e5");

        assert_piece(&game, "e7", Role::Pawn, Color::Black);
        assert_empty(&game, "e5");
    }

    #[test]
    fn capture_overwrites_destination() {
        let mut game = GameState::from_placement(
            "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR",
            Color::White,
        );

        let outcomes = play(&mut game, "e4 d5");

        assert_eq!(
            outcomes[1],
            ClickOutcome::Moved {
                from: sq("e4"),
                to: sq("d5"),
                captured: Some(Color::Black.pawn())
            }
        );
        assert_piece(&game, "d5", Role::Pawn, Color::White);
        assert_empty(&game, "e4");
        assert_eq!(game.board().pieces().count(), 31);
    }

    #[test]
    fn king_capture_does_not_end_game() {
        let mut game = GameState::from_placement("4k3/8/8/8/8/8/8/4R1K1", Color::White);

        play(&mut game, "e1 e8");

        assert_piece(&game, "e8", Role::Rook, Color::White);
        assert!(!game.is_game_over());
        assert_eq!(game.turn(), Color::Black);
    }

    #[test]
    fn apply_move_flips_turn_once_per_move() {
        let mut game = GameState::new();

        game.apply_move(sq("e2"), sq("e4"));
        assert_eq!(game.turn(), Color::Black);

        game.apply_move(sq("e7"), sq("e5"));
        assert_eq!(game.turn(), Color::White);
    }

    #[test]
    fn apply_move_ignores_geometry() {
        let mut game = GameState::new();

        let captured = game.apply_move(sq("a1"), sq("h8"));

        assert_eq!(captured, Some(Color::Black.rook()));
        assert_piece(&game, "h8", Role::Rook, Color::White);
        assert_eq!(game.turn(), Color::Black);
    }

    #[test]
    fn apply_move_from_empty_square_is_noop() {
        let mut game = GameState::new();
        let before = game.clone();

        assert_eq!(game.apply_move(sq("e4"), sq("e5")), None);
        assert_eq!(game, before);
    }

    #[test]
    fn apply_move_clears_selection() {
        let mut game = GameState::new();
        game.click(sq("e2"));

        game.apply_move(sq("g1"), sq("f3"));

        assert_eq!(game.selection(), None);
        assert!(game.destinations().is_empty());
    }

    #[test]
    fn fools_mate_does_not_end_game() {
        let mut game = GameState::new();

        play(&mut game, "f2 f3 e7 e5 g2 g4 d8 h4");

        assert_piece(&game, "h4", Role::Queen, Color::Black);
        assert!(!game.is_game_over());
        assert_eq!(game.turn(), Color::White);
    }

    #[test]
    fn clicks_ignored_after_game_over() {
        let mut game = GameState::new();
        game.click(sq("e2"));
        game.end_game();
        let before = game.clone();

        assert_eq!(game.click(sq("e4")), ClickOutcome::Ignored);
        assert_eq!(game.click(sq("d2")), ClickOutcome::Ignored);
        assert_eq!(game, before);
    }

    #[test]
    fn winner_is_side_that_did_not_just_move() {
        let mut game = GameState::new();
        game.apply_move(sq("e2"), sq("e4"));
        game.end_game();

        assert_eq!(game.winner(), Some(Color::White));
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut game = GameState::new();
        play(&mut game, "e2 e4 e7 e5 g1");
        game.end_game();

        game.reset();

        assert_eq!(game, GameState::new());
    }

    #[test]
    fn legal_destinations_query_does_not_select() {
        let game = GameState::new();

        assert_eq!(game.legal_destinations(sq("b8")), vec![sq("a6"), sq("c6")]);
        assert_eq!(game.selection(), None);
    }
}
