use serde::{Deserialize, Serialize};

use crate::{
    ApplyError, Board, Cell, Move, MoveRecord, Position, Side, Square, StateFingerprint,
    engine::{
        history::MoveHistory,
        movegen::{self, MoveList},
        rules,
    },
};

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum Reason {
    #[display("a pawn reached the far rank")]
    ReachedFarRank,
    #[display("no opposing pawns are left")]
    Eliminated,
    #[display("the other side has no legal move")]
    NoLegalMoves,
    #[display("the other side forfeited")]
    Forfeit,
}

/// Final result of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[display("{winner} wins: {reason}")]
pub struct Outcome {
    winner: Side,
    reason: Reason,
}

impl Outcome {
    #[must_use]
    pub const fn new(winner: Side, reason: Reason) -> Self {
        Self { winner, reason }
    }

    #[must_use]
    pub const fn winner(&self) -> Side {
        self.winner
    }

    #[must_use]
    pub const fn reason(&self) -> Reason {
        self.reason
    }
}

/// Result of a successfully applied move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum MoveOutcome {
    Continue,
    Finished(Outcome),
}

/// The game state machine.
///
/// Owns the [`Position`], both sides' move histories and the outcome once the
/// game is over. Moves go through [`apply`](Self::apply), which validates them,
/// mutates the position and reports whether the game has ended. A finished game
/// is frozen: every later [`apply`](Self::apply) returns [`ApplyError::GameOver`].
///
/// A game also ends when the side to move has no legal move; the other side is
/// declared the winner ([`Reason::NoLegalMoves`]).
///
/// # Example
///
/// ```
/// use breakthrough_engine::{ApplyError, Game, Reason, Side};
///
/// let mut game = Game::new();
/// let err = game.apply("b2-b5".parse().unwrap()).unwrap_err();
/// assert!(matches!(err, ApplyError::IllegalMove { .. }));
///
/// let outcome = game.forfeit(Side::Player).unwrap();
/// assert_eq!(outcome.winner(), Side::Opponent);
/// assert_eq!(outcome.reason(), Reason::Forfeit);
/// ```
#[derive(Debug, Clone)]
pub struct Game {
    position: Position,
    player_history: MoveHistory,
    opponent_history: MoveHistory,
    last_move: Option<MoveRecord>,
    outcome: Option<Outcome>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Starts a game from the standard layout with the player to move.
    #[must_use]
    pub fn new() -> Self {
        Self::from_position(Position::new())
    }

    /// Starts a game from an arbitrary board.
    ///
    /// The board is checked for an already decided result, so a board without
    /// pawns for one side starts finished.
    #[must_use]
    pub fn from_board(board: Board, side_to_move: Side) -> Self {
        Self::from_position(Position::from_board(board, side_to_move))
    }

    /// Starts a game from an arbitrary position (en-passant target and counters included).
    #[must_use]
    pub fn from_position(position: Position) -> Self {
        let outcome = initial_outcome(&position);
        Self {
            position,
            player_history: MoveHistory::new(),
            opponent_history: MoveHistory::new(),
            last_move: None,
            outcome,
        }
    }

    #[must_use]
    pub fn position(&self) -> &Position {
        &self.position
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        self.position.board()
    }

    #[must_use]
    pub fn side_to_move(&self) -> Side {
        self.position.side_to_move()
    }

    #[must_use]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.position.en_passant_target()
    }

    /// Turn number as shown to the human: starts at 1, advances on each player move.
    #[must_use]
    pub fn turn(&self) -> usize {
        self.position.turn()
    }

    #[must_use]
    pub fn ply(&self) -> usize {
        self.position.ply()
    }

    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    #[must_use]
    pub fn history(&self, side: Side) -> &MoveHistory {
        match side {
            Side::Player => &self.player_history,
            Side::Opponent => &self.opponent_history,
        }
    }

    #[must_use]
    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.last_move.as_ref()
    }

    #[must_use]
    pub fn fingerprint(&self) -> StateFingerprint {
        StateFingerprint::of(&self.position)
    }

    /// Legal moves for the side to move; empty once the game is finished.
    #[must_use]
    pub fn legal_moves(&self) -> MoveList {
        if self.is_finished() {
            return MoveList::new();
        }
        movegen::legal_moves(&self.position)
    }

    #[must_use]
    pub fn is_legal(&self, mv: Move) -> bool {
        !self.is_finished() && self.position.is_legal(mv.from(), mv.to())
    }

    /// Validates and plays `mv` for the side to move.
    ///
    /// Effects, in order: an en-passant capture removes the jumped pawn, the
    /// pawn is relocated, the en-passant target is set or cleared, terminal
    /// conditions are evaluated for the mover, the side to move flips, the move
    /// is appended to the mover's history and the counters advance.
    pub fn apply(&mut self, mv: Move) -> Result<MoveOutcome, ApplyError> {
        if self.is_finished() {
            return Err(ApplyError::GameOver);
        }
        let mover = self.side_to_move();
        match self.board().get(mv.from()) {
            Cell::Empty => return Err(ApplyError::NoPawn { square: mv.from() }),
            Cell::Pawn(owner) if owner != mover => {
                return Err(ApplyError::NotYourPawn { square: mv.from() });
            }
            Cell::Pawn(_) => {}
        }
        if !self.position.is_legal(mv.from(), mv.to()) {
            return Err(ApplyError::IllegalMove { mv });
        }

        let record = self.position.play(mv);
        if record.is_en_passant()
            && let Some(captured) = record.captured()
        {
            tracing::debug!(%mover, %mv, %captured, "en passant capture");
        }
        match mover {
            Side::Player => self.player_history.push(mv),
            Side::Opponent => self.opponent_history.push(mv),
        }
        self.last_move = Some(record);
        tracing::debug!(%mover, %mv, ply = self.ply(), "move applied");

        match self.outcome_after(&record) {
            Some(outcome) => {
                tracing::debug!(%outcome, "game finished");
                self.outcome = Some(outcome);
                Ok(MoveOutcome::Finished(outcome))
            }
            None => Ok(MoveOutcome::Continue),
        }
    }

    /// Ends the game with `side` giving up; the other side wins.
    ///
    /// Returns `None` if the game was already over.
    pub fn forfeit(&mut self, side: Side) -> Option<Outcome> {
        if self.is_finished() {
            return None;
        }
        let outcome = Outcome::new(side.opponent(), Reason::Forfeit);
        tracing::debug!(%outcome, "game forfeited");
        self.outcome = Some(outcome);
        Some(outcome)
    }

    fn outcome_after(&self, record: &MoveRecord) -> Option<Outcome> {
        let mover = record.mover();
        if rules::is_on_far_rank(mover, record.mv().to()) {
            return Some(Outcome::new(mover, Reason::ReachedFarRank));
        }
        if self.board().pawn_count(mover.opponent()) == 0 {
            return Some(Outcome::new(mover, Reason::Eliminated));
        }
        if !movegen::has_legal_moves(&self.position) {
            return Some(Outcome::new(mover, Reason::NoLegalMoves));
        }
        None
    }
}

fn initial_outcome(position: &Position) -> Option<Outcome> {
    let board = position.board();
    let side = position.side_to_move();
    if board.pawn_count(side) == 0 {
        return Some(Outcome::new(side.opponent(), Reason::Eliminated));
    }
    if board.pawn_count(side.opponent()) == 0 {
        return Some(Outcome::new(side, Reason::Eliminated));
    }
    for candidate in [side.opponent(), side] {
        if board
            .pawns(candidate)
            .any(|square| rules::is_on_far_rank(candidate, square))
        {
            return Some(Outcome::new(candidate, Reason::ReachedFarRank));
        }
    }
    if !movegen::has_legal_moves(position) {
        return Some(Outcome::new(side.opponent(), Reason::NoLegalMoves));
    }
    None
}
