use shakmaty::Piece;

use crate::board::Square;

/// Type of visual feedback for an individual square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SquareFeedback {
    /// Empty square the selected piece can move to
    Destination,
    /// Moving here captures an opponent piece
    Capture,
    /// The currently selected piece
    Origin,
}

/// Contains the set of squares and their associated feedback types for the current board state.
///
/// `BoardFeedback` is computed by [`compute_feedback`] and consumed by display
/// implementations to highlight the selection and where it can go.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardFeedback {
    squares: Vec<(Square, SquareFeedback)>,
}

impl BoardFeedback {
    /// Get all square feedback entries
    #[inline]
    pub fn squares(&self) -> &[(Square, SquareFeedback)] {
        &self.squares
    }

    /// Get feedback for a specific square, if any
    #[inline]
    pub fn get(&self, square: Square) -> Option<SquareFeedback> {
        self.squares
            .iter()
            .find(|(sq, _)| *sq == square)
            .map(|(_, feedback)| *feedback)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }
}

impl From<Vec<(Square, SquareFeedback)>> for BoardFeedback {
    fn from(squares: Vec<(Square, SquareFeedback)>) -> Self {
        Self { squares }
    }
}

/// Game state information needed to compute feedback
pub trait FeedbackSource {
    /// The square of the currently selected piece
    fn selection(&self) -> Option<Square>;

    /// Cached destinations of the selected piece
    fn destinations(&self) -> &[Square];

    /// Piece standing on `square`, if any
    fn piece_at(&self, square: Square) -> Option<Piece>;
}

/// Compute visual feedback based on current game state.
///
/// Without a selection nothing is highlighted. Otherwise the selected
/// square is the origin and each destination is marked as a plain move
/// or a capture.
pub fn compute_feedback(source: &impl FeedbackSource) -> BoardFeedback {
    let Some(from) = source.selection() else {
        return BoardFeedback::default();
    };

    std::iter::once((from, SquareFeedback::Origin))
        .chain(
            source
                .destinations()
                .iter()
                .map(|&to| classify_destination(source, to)),
        )
        .collect::<Vec<_>>()
        .into()
}

/// Destinations never hold our own pieces, so any occupant is a capture.
fn classify_destination(source: &impl FeedbackSource, to: Square) -> (Square, SquareFeedback) {
    if source.piece_at(to).is_some() {
        (to, SquareFeedback::Capture)
    } else {
        (to, SquareFeedback::Destination)
    }
}
