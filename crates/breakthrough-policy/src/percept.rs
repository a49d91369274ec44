//! Board percepts consulted by the strategy table.
//!
//! A [`PerceptRecord`] is built for one candidate move at a time. Each
//! [`Percept`] is a yes/no question about that record; the strategy table maps
//! percepts to [`Action`](crate::strategy_table::Action)s.

use arrayvec::ArrayVec;
use breakthrough_engine::{Board, Game, Move, Side, Square};
use serde::{Deserialize, Serialize};

/// Turn counter from which the game counts as an endgame.
pub const ENDGAME_TURN: usize = 60;

/// Last turn on which a two-square opening is still considered.
pub const OPENING_TURNS: usize = 2;

/// Opposing pawns at most this many ranks from the mover's home rank count as threats.
pub const THREAT_DISTANCE: u8 = 3;

/// Own pawns at least this many ranks from home count as near the goal.
pub const NEAR_GOAL_DISTANCE: u8 = 5;

const MAX_PAWNS: usize = 16;

/// A yes/no question about the game from the mover's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum Percept {
    /// The side to move is the side the policy plays for.
    #[display("machine_turn")]
    MachineTurn,
    /// The mover has a pawn close to its far rank.
    #[display("own_pawns_near_goal")]
    OwnPawnsNearGoal,
    /// Opposing pawns have advanced into the mover's half.
    #[display("threats_near_home")]
    ThreatsNearHome,
    /// The mover has at least one legal move.
    #[display("legal_moves")]
    LegalMoves,
    /// The candidate is a straight advance rather than a diagonal.
    #[display("forward_movement_only")]
    ForwardMovementOnly,
    /// The candidate is a two-square advance made during the opening.
    #[display("two_square_opening")]
    TwoSquareOpening,
    /// The candidate captures en passant.
    #[display("en_passant_available")]
    EnPassantAvailable,
    /// The turn counter has reached [`ENDGAME_TURN`].
    #[display("endgame")]
    Endgame,
    /// There are pawns on the board.
    #[display("board_state")]
    BoardState,
    /// Some side is to move.
    #[display("whose_turn")]
    WhoseTurn,
}

/// Everything the strategy table may ask about one candidate move.
#[derive(Debug, Clone)]
pub struct PerceptRecord<'a> {
    candidate: Move,
    machine_turn: bool,
    whose_turn: Side,
    turn: usize,
    threats_near_home: ArrayVec<Square, MAX_PAWNS>,
    own_pawns_near_goal: bool,
    two_square_opening: bool,
    en_passant_available: bool,
    legal_moves: &'a [Move],
    board: &'a Board,
}

impl<'a> PerceptRecord<'a> {
    /// Builds the record for `candidate` as seen by a policy playing `policy_side`.
    #[must_use]
    pub fn new(game: &'a Game, legal_moves: &'a [Move], candidate: Move, policy_side: Side) -> Self {
        let position = game.position();
        let mover = position.side_to_move();
        let board = position.board();
        let two_square_opening = game.turn() <= OPENING_TURNS
            && candidate.rank_delta().unsigned_abs() == 2
            && position.is_legal(candidate.from(), candidate.to());
        Self {
            candidate,
            machine_turn: mover == policy_side,
            whose_turn: mover,
            turn: game.turn(),
            threats_near_home: threats_near_home(board, mover),
            own_pawns_near_goal: board
                .pawns(mover)
                .any(|square| mover.distance_from_home(square.rank()) >= NEAR_GOAL_DISTANCE),
            two_square_opening,
            en_passant_available: position.is_en_passant(candidate),
            legal_moves,
            board,
        }
    }

    #[must_use]
    pub fn candidate(&self) -> Move {
        self.candidate
    }

    #[must_use]
    pub fn whose_turn(&self) -> Side {
        self.whose_turn
    }

    /// Opposing pawns nearest the mover's home rank, within [`THREAT_DISTANCE`].
    #[must_use]
    pub fn threats_near_home(&self) -> &[Square] {
        &self.threats_near_home
    }

    #[must_use]
    pub fn legal_moves(&self) -> &[Move] {
        self.legal_moves
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        self.board
    }

    /// Whether `percept` holds for this record.
    #[must_use]
    pub fn holds(&self, percept: Percept) -> bool {
        match percept {
            Percept::MachineTurn => self.machine_turn,
            Percept::OwnPawnsNearGoal => self.own_pawns_near_goal,
            Percept::ThreatsNearHome => !self.threats_near_home.is_empty(),
            Percept::LegalMoves => !self.legal_moves.is_empty(),
            Percept::ForwardMovementOnly => !self.candidate.is_diagonal(),
            Percept::TwoSquareOpening => self.two_square_opening,
            Percept::EnPassantAvailable => self.en_passant_available,
            Percept::Endgame => self.turn >= ENDGAME_TURN,
            Percept::BoardState => Side::ALL.iter().any(|&side| self.board.pawn_count(side) > 0),
            Percept::WhoseTurn => true,
        }
    }
}

fn threats_near_home(board: &Board, mover: Side) -> ArrayVec<Square, MAX_PAWNS> {
    let enemy = mover.opponent();
    let Some(nearest) = board
        .pawns(enemy)
        .map(|square| mover.distance_from_home(square.rank()))
        .min()
    else {
        return ArrayVec::new();
    };
    if nearest > THREAT_DISTANCE {
        return ArrayVec::new();
    }
    board
        .pawns(enemy)
        .filter(|square| mover.distance_from_home(square.rank()) == nearest)
        .collect()
}
