use std::fmt;
use std::str::FromStr;

use shakmaty::fen::ParseFenError;
use shakmaty::{Color, File, Piece, Rank, Role};
use thiserror::Error;

/// Number of rows (and columns) on the board
pub const BOARD_SIZE: usize = 8;

/// Piece order on both back ranks, from column 0 to column 7
const BACK_RANK: [Role; BOARD_SIZE] = [
    Role::Rook,
    Role::Knight,
    Role::Bishop,
    Role::Queen,
    Role::King,
    Role::Bishop,
    Role::Knight,
    Role::Rook,
];

/// Error when loading a board from a placement string.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("invalid board placement: {0}")]
    Placement(#[from] ParseFenError),
}

/// Error when parsing a square in algebraic notation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid square notation: '{0}'")]
pub struct ParseSquareError(String);

/// Board square addressed by (row, col).
///
/// Row 0 is black's back rank and row 7 is white's, so (0, 0) is a8
/// and (7, 7) is h1 in algebraic notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if (row as usize) < BOARD_SIZE && (col as usize) < BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// The square `dr` rows and `dc` columns away, if it is on the board.
    pub fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        let row = self.row as i8 + dr;
        let col = self.col as i8 + dc;
        if row < 0 || col < 0 {
            return None;
        }
        Self::new(row as u8, col as u8)
    }

    /// All 64 squares, row by row starting at (0, 0).
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE as u8)
            .flat_map(|row| (0..BOARD_SIZE as u8).map(move |col| Square { row, col }))
    }
}

impl From<Square> for shakmaty::Square {
    fn from(square: Square) -> Self {
        let rank = Rank::ALL[BOARD_SIZE - 1 - square.row as usize];
        shakmaty::Square::from_coords(File::ALL[square.col as usize], rank)
    }
}

impl From<shakmaty::Square> for Square {
    fn from(square: shakmaty::Square) -> Self {
        Self {
            row: (BOARD_SIZE - 1) as u8 - square.rank() as u8,
            col: square.file() as u8,
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", shakmaty::Square::from(*self))
    }
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<shakmaty::Square>()
            .map(Self::from)
            .map_err(|_| ParseSquareError(s.to_string()))
    }
}

/// The 8x8 grid of pieces.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl Board {
    /// A board with no pieces on it.
    pub const fn empty() -> Self {
        Self {
            squares: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// The standard starting position: black on rows 0-1, white on rows 6-7.
    pub fn initial() -> Self {
        let mut board = Self::empty();
        for (col, role) in BACK_RANK.into_iter().enumerate() {
            board.squares[0][col] = Some(Piece {
                role,
                color: Color::Black,
            });
            board.squares[1][col] = Some(Piece {
                role: Role::Pawn,
                color: Color::Black,
            });
            board.squares[6][col] = Some(Piece {
                role: Role::Pawn,
                color: Color::White,
            });
            board.squares[7][col] = Some(Piece {
                role,
                color: Color::White,
            });
        }
        board
    }

    /// Load a board from the piece-placement field of a FEN record.
    ///
    /// The first rank in the string (rank 8) becomes row 0.
    pub fn from_placement(placement: &str) -> Result<Self, BoardError> {
        let parsed: shakmaty::Board = placement.trim().parse()?;
        let mut board = Self::empty();
        for square in Square::all() {
            board.set(square, parsed.piece_at(square.into()));
        }
        Ok(board)
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.row as usize][square.col as usize]
    }

    /// Put `piece` on `square`, returning whatever was there before.
    pub fn set(&mut self, square: Square, piece: Option<Piece>) -> Option<Piece> {
        std::mem::replace(
            &mut self.squares[square.row as usize][square.col as usize],
            piece,
        )
    }

    /// Remove and return the piece on `square`.
    #[inline]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.set(square, None)
    }

    /// Occupied squares with their pieces, row by row.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|square| self.piece_at(square).map(|piece| (square, piece)))
    }

    /// Piece-placement field of a FEN record for this board.
    pub fn placement(&self) -> String {
        let mut out = String::with_capacity(64);
        for (row, cells) in self.squares.iter().enumerate() {
            if row > 0 {
                out.push('/');
            }
            let mut empty = 0u8;
            for cell in cells {
                match cell {
                    Some(piece) => {
                        if empty > 0 {
                            out.push((b'0' + empty) as char);
                            empty = 0;
                        }
                        out.push(piece.char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push((b'0' + empty) as char);
            }
        }
        out
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("placement", &self.placement())
            .finish()
    }
}
