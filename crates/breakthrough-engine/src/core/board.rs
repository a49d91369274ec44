use super::{
    side::Side,
    square::{BOARD_SIZE, Square},
};

/// Contents of a single square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::IsVariant)]
pub enum Cell {
    #[default]
    Empty,
    Pawn(Side),
}

impl Cell {
    /// Side owning the pawn on this cell, if any.
    #[must_use]
    pub const fn side(self) -> Option<Side> {
        match self {
            Cell::Empty => None,
            Cell::Pawn(side) => Some(side),
        }
    }

    #[must_use]
    pub fn is_pawn_of(self, side: Side) -> bool {
        self == Cell::Pawn(side)
    }
}

/// The 8×8 grid of cells.
///
/// Rows are stored rank-major: `ranks[0]` is rank 1, `ranks[7]` is rank 8. The
/// board is plain data; it has no notion of whose turn it is or which moves are
/// legal (see [`Position`](crate::Position)).
///
/// # Example
///
/// ```
/// use breakthrough_engine::{Board, Cell, Side};
///
/// let board = Board::INITIAL;
/// assert_eq!(board.pawn_count(Side::Player), 16);
/// assert_eq!(board.get("a2".parse().unwrap()), Cell::Pawn(Side::Player));
/// assert_eq!(board.get("a7".parse().unwrap()), Cell::Pawn(Side::Opponent));
/// assert!(board.get("d4".parse().unwrap()).is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    ranks: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl Board {
    /// A board without any pawns, useful for composing test positions.
    pub const EMPTY: Self = Self {
        ranks: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
    };

    /// Standard layout: each side fills its two home ranks.
    pub const INITIAL: Self = {
        let mut board = Self::EMPTY;
        let mut side_index = 0;
        while side_index < Side::ALL.len() {
            let side = Side::ALL[side_index];
            let home = side.home_rank() as usize;
            let front = side.starting_rank() as usize;
            let mut file = 0;
            while file < BOARD_SIZE {
                board.ranks[home][file] = Cell::Pawn(side);
                board.ranks[front][file] = Cell::Pawn(side);
                file += 1;
            }
            side_index += 1;
        }
        board
    };

    /// Builds a board holding exactly the given pawns.
    ///
    /// Later entries win if a square is listed twice.
    #[must_use]
    pub fn with_pawns(player: &[Square], opponent: &[Square]) -> Self {
        let mut board = Self::EMPTY;
        for &square in player {
            board.set(square, Cell::Pawn(Side::Player));
        }
        for &square in opponent {
            board.set(square, Cell::Pawn(Side::Opponent));
        }
        board
    }

    #[must_use]
    pub fn get(&self, square: Square) -> Cell {
        self.ranks[usize::from(square.rank())][usize::from(square.file())]
    }

    pub fn set(&mut self, square: Square, cell: Cell) {
        self.ranks[usize::from(square.rank())][usize::from(square.file())] = cell;
    }

    /// Empties the square and returns what was on it.
    pub fn take(&mut self, square: Square) -> Cell {
        let cell = self.get(square);
        self.set(square, Cell::Empty);
        cell
    }

    /// Iterates over the squares holding a pawn of `side`, in scan order.
    pub fn pawns(&self, side: Side) -> impl Iterator<Item = Square> + '_ {
        Square::all().filter(move |&square| self.get(square).is_pawn_of(side))
    }

    #[must_use]
    pub fn pawn_count(&self, side: Side) -> usize {
        self.ranks
            .iter()
            .flatten()
            .filter(|cell| cell.is_pawn_of(side))
            .count()
    }

    /// Iterates over the rows from rank 1 to rank 8.
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &[Cell; BOARD_SIZE]> {
        self.ranks.iter()
    }

    /// Iterates over all cells in scan order together with their squares.
    pub fn cells(&self) -> impl Iterator<Item = (Square, Cell)> + '_ {
        Square::all().map(|square| (square, self.get(square)))
    }
}
