use serde::{Deserialize, Serialize};

use super::{board::Board, moves::Move, side::Side, square::Square};
use crate::engine::{
    movegen::{self, MoveList},
    rules,
};

/// What happened when a move was played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    mover: Side,
    #[serde(rename = "move")]
    mv: Move,
    captured: Option<Square>,
    en_passant: bool,
}

impl MoveRecord {
    #[must_use]
    pub fn mover(&self) -> Side {
        self.mover
    }

    #[must_use]
    pub fn mv(&self) -> Move {
        self.mv
    }

    /// Square of the captured pawn, if the move captured one.
    ///
    /// For an en-passant capture this is the square of the jumped pawn, not the
    /// destination of the move.
    #[must_use]
    pub fn captured(&self) -> Option<Square> {
        self.captured
    }

    #[must_use]
    pub fn is_en_passant(&self) -> bool {
        self.en_passant
    }

    #[must_use]
    pub fn captured_count(&self) -> usize {
        usize::from(self.captured.is_some())
    }
}

/// A board together with the state needed to decide legality.
///
/// - side to move
/// - en-passant target: the square jumped over by a two-square advance made
///   on the previous ply, and only on that ply
/// - turn counter: starts at 1 and advances on each player move, so it reads
///   like the turn number shown to the human
/// - ply counter: every move played
///
/// `Position` does not check legality in [`play`](Self::play); the
/// [`Game`](crate::Game) state machine validates moves first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    board: Board,
    side_to_move: Side,
    en_passant_target: Option<Square>,
    turn: usize,
    ply: usize,
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl Position {
    /// Standard starting position with the player to move.
    #[must_use]
    pub fn new() -> Self {
        Self::from_board(Board::INITIAL, Side::Player)
    }

    #[must_use]
    pub fn from_board(board: Board, side_to_move: Side) -> Self {
        Self {
            board,
            side_to_move,
            en_passant_target: None,
            turn: 1,
            ply: 0,
        }
    }

    /// Overrides the en-passant target, as if a two-square advance had just been played.
    #[must_use]
    pub fn with_en_passant_target(mut self, target: Option<Square>) -> Self {
        self.en_passant_target = target;
        self
    }

    /// Overrides the turn counter.
    #[must_use]
    pub fn with_turn(mut self, turn: usize) -> Self {
        self.turn = turn;
        self
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    #[must_use]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }

    #[must_use]
    pub fn turn(&self) -> usize {
        self.turn
    }

    #[must_use]
    pub fn ply(&self) -> usize {
        self.ply
    }

    /// Whether the side to move may play `from` to `to`.
    ///
    /// See [`rules::is_legal`].
    #[must_use]
    pub fn is_legal(&self, from: Square, to: Square) -> bool {
        rules::is_legal(self, from, to)
    }

    #[must_use]
    pub fn is_en_passant(&self, mv: Move) -> bool {
        rules::is_en_passant(self, mv.from(), mv.to())
    }

    #[must_use]
    pub fn legal_moves(&self) -> MoveList {
        movegen::legal_moves(self)
    }

    /// Plays `mv` for the side to move without checking legality.
    pub(crate) fn play(&mut self, mv: Move) -> MoveRecord {
        let mover = self.side_to_move;
        let en_passant = self.is_en_passant(mv);

        let captured = if en_passant {
            let jumped = mv.to().offset(0, -mover.forward());
            if let Some(jumped) = jumped {
                self.board.take(jumped);
            }
            jumped
        } else if self.board.get(mv.to()).is_pawn() {
            Some(mv.to())
        } else {
            None
        };

        let pawn = self.board.take(mv.from());
        self.board.set(mv.to(), pawn);

        self.en_passant_target = if mv.rank_delta().abs() == 2 {
            mv.from().offset(0, mover.forward())
        } else {
            None
        };
        self.side_to_move = mover.opponent();
        self.ply += 1;
        if mover.is_player() {
            self.turn += 1;
        }

        MoveRecord {
            mover,
            mv,
            captured,
            en_passant,
        }
    }
}
