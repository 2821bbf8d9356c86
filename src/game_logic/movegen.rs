//! Geometric move generation.
//!
//! Destinations are computed from piece movement patterns and board
//! occupancy only. Check, pins, castling, en passant and promotion are
//! not considered.

use shakmaty::{Color, Role};

use super::rules;
use crate::board::{Board, Square};

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Destinations for the piece on `from` that pass [`rules::is_legal_destination`].
///
/// Returns an empty list when `from` is empty.
pub fn legal_destinations(board: &Board, from: Square) -> Vec<Square> {
    let Some(piece) = board.piece_at(from) else {
        return Vec::new();
    };

    candidate_destinations(board, from)
        .into_iter()
        .filter(|&to| rules::is_legal_destination(board, from, to, piece.color))
        .collect()
}

/// Unfiltered destinations for the piece on `from`.
pub fn candidate_destinations(board: &Board, from: Square) -> Vec<Square> {
    let Some(piece) = board.piece_at(from) else {
        return Vec::new();
    };
    let color = piece.color;

    match piece.role {
        Role::Pawn => pawn_destinations(board, from, color),
        Role::Knight => step_destinations(board, from, color, &KNIGHT_OFFSETS),
        Role::Bishop => slide_destinations(board, from, color, &BISHOP_DIRECTIONS),
        Role::Rook => slide_destinations(board, from, color, &ROOK_DIRECTIONS),
        Role::Queen => {
            let mut moves = slide_destinations(board, from, color, &ROOK_DIRECTIONS);
            moves.extend(slide_destinations(board, from, color, &BISHOP_DIRECTIONS));
            moves
        }
        Role::King => step_destinations(board, from, color, &KING_OFFSETS),
    }
}

/// Pawn pushes and diagonal captures.
///
/// Everything hangs off the single forward step: when that square is
/// blocked or off the board, the pawn gets no destinations at all,
/// captures included.
fn pawn_destinations(board: &Board, from: Square, color: Color) -> Vec<Square> {
    let (direction, start_row) = match color {
        Color::White => (-1, 6),
        Color::Black => (1, 1),
    };

    let mut moves = Vec::new();
    let Some(forward) = from.offset(direction, 0) else {
        return moves;
    };
    if board.piece_at(forward).is_some() {
        return moves;
    }
    moves.push(forward);

    if from.row() == start_row
        && let Some(double) = forward.offset(direction, 0)
        && board.piece_at(double).is_none()
    {
        moves.push(double);
    }

    for dc in [-1, 1] {
        if let Some(target) = forward.offset(0, dc)
            && board
                .piece_at(target)
                .is_some_and(|piece| piece.color != color)
        {
            moves.push(target);
        }
    }

    moves
}

/// Rays that run until the board edge or the first occupied square,
/// which is included only when it holds an opposing piece.
fn slide_destinations(
    board: &Board,
    from: Square,
    color: Color,
    directions: &[(i8, i8)],
) -> Vec<Square> {
    let mut moves = Vec::new();
    for &(dr, dc) in directions {
        let mut current = from;
        while let Some(next) = current.offset(dr, dc) {
            match board.piece_at(next) {
                Some(piece) => {
                    if piece.color != color {
                        moves.push(next);
                    }
                    break;
                }
                None => moves.push(next),
            }
            current = next;
        }
    }
    moves
}

/// Single jumps to fixed offsets, skipping squares held by our own pieces.
fn step_destinations(
    board: &Board,
    from: Square,
    color: Color,
    offsets: &[(i8, i8)],
) -> Vec<Square> {
    offsets
        .iter()
        .filter_map(|&(dr, dc)| from.offset(dr, dc))
        .filter(|&to| board.piece_at(to).is_none_or(|piece| piece.color != color))
        .collect()
}
