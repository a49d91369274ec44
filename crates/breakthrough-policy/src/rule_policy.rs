//! Strategy-table decision policy.
//!
//! # How It Works
//!
//! 1. **Priority move** - a [priority move](crate::priority::priority_move) is
//!    played immediately
//! 2. **Per-candidate lookup** - for each legal move in enumeration order, a
//!    [`PerceptRecord`] is built and the [`StrategyTable`] yields an [`Action`]
//! 3. **Dispatch** - the action either turns the candidate into a concrete move
//!    or declines it, in which case the next candidate is tried
//! 4. **Fallback** - if every candidate was declined, the last legal move is
//!    played
//!
//! | action | plays | when |
//! |---|---|---|
//! | `MoveCloser` | the candidate | always |
//! | `Capture` | the nearest opposing pawn ahead on the destination file | that capture is legal |
//! | `BlockCapture` | the candidate | an opposing pawn stands on rank 4 or 5 |
//! | `TwoSquare` | the candidate | turn ≤ 2 and the candidate leaves one of the two initial ranks |
//! | `EnPassant` | the candidate | its destination is the en-passant target |
//! | `EndgameFocus` | the candidate | turn ≥ 60 |

use breakthrough_engine::{Game, Move, Side, Square};

use crate::{
    DecisionPolicy,
    percept::{ENDGAME_TURN, OPENING_TURNS, PerceptRecord},
    priority::priority_move,
    strategy_table::{Action, StrategyTable},
};

/// Ranks (0-indexed) where an opposing pawn makes `BlockCapture` apply.
const BLOCK_RANKS: [u8; 2] = [3, 4];

#[derive(Debug, Clone)]
pub struct RulePolicy {
    table: StrategyTable,
    side: Side,
}

impl RulePolicy {
    #[must_use]
    pub fn new(table: StrategyTable, side: Side) -> Self {
        Self { table, side }
    }

    #[must_use]
    pub fn table(&self) -> &StrategyTable {
        &self.table
    }
}

impl DecisionPolicy for RulePolicy {
    fn name(&self) -> &'static str {
        "rule"
    }

    fn side(&self) -> Side {
        self.side
    }

    fn select(&mut self, game: &Game, legal_moves: &[Move]) -> Option<Move> {
        if let Some(mv) = priority_move(game, legal_moves) {
            tracing::debug!(side = %self.side, %mv, "rule policy: priority move");
            return Some(mv);
        }

        for &candidate in legal_moves {
            let record = PerceptRecord::new(game, legal_moves, candidate, self.side);
            let action = self.table.lookup(&record);
            if let Some(mv) = dispatch(game, action, candidate) {
                tracing::debug!(side = %self.side, %candidate, %action, %mv, "rule policy: dispatched");
                return Some(mv);
            }
        }

        let fallback = legal_moves.last().copied();
        if let Some(mv) = fallback {
            tracing::debug!(side = %self.side, %mv, "rule policy: fallback to last candidate");
        }
        fallback
    }
}

/// Turns `action` into a move for `candidate`, or `None` if the action does not apply.
fn dispatch(game: &Game, action: Action, candidate: Move) -> Option<Move> {
    let position = game.position();
    let mover = position.side_to_move();
    match action {
        Action::MoveCloser => Some(candidate),
        Action::Capture => capture_target(game, candidate)
            .map(|target| Move::new(candidate.from(), target))
            .filter(|mv| position.is_legal(mv.from(), mv.to())),
        Action::BlockCapture => position
            .board()
            .pawns(mover.opponent())
            .any(|square| BLOCK_RANKS.contains(&square.rank()))
            .then_some(candidate),
        Action::TwoSquare => {
            let from_rank = candidate.from().rank();
            let initial_rank = from_rank == mover.home_rank() || from_rank == mover.starting_rank();
            (game.turn() <= OPENING_TURNS && initial_rank).then_some(candidate)
        }
        Action::EnPassant => (game.en_passant_target() == Some(candidate.to())).then_some(candidate),
        Action::EndgameFocus => (game.turn() >= ENDGAME_TURN).then_some(candidate),
    }
}

/// Nearest opposing pawn on the candidate's destination file, strictly ahead of its origin.
fn capture_target(game: &Game, candidate: Move) -> Option<Square> {
    let mover = game.side_to_move();
    let from = candidate.from();
    let ahead = |square: Square| {
        (i16::from(square.rank()) - i16::from(from.rank())) * i16::from(mover.forward())
    };
    game.board()
        .pawns(mover.opponent())
        .filter(|square| square.file() == candidate.to().file() && ahead(*square) > 0)
        .min_by_key(|square| ahead(*square))
}

#[cfg(test)]
mod tests {
    use breakthrough_engine::{Board, Position};

    use super::*;

    fn sq(label: &str) -> Square {
        label.parse().unwrap()
    }

    fn mv(text: &str) -> Move {
        text.parse().unwrap()
    }

    fn select(policy: &mut RulePolicy, game: &Game) -> Option<Move> {
        let moves = game.legal_moves();
        policy.select(game, &moves)
    }

    #[test]
    fn test_no_moves_no_selection() {
        let mut policy = RulePolicy::new(StrategyTable::default(), Side::Player);
        assert_eq!(policy.select(&Game::new(), &[]), None);
    }

    #[test]
    fn test_opening_two_square_advance() {
        let mut policy = RulePolicy::new(StrategyTable::default(), Side::Player);
        assert_eq!(select(&mut policy, &Game::new()), Some(mv("a2-a4")));
    }

    #[test]
    fn test_opponent_opening() {
        let mut game = Game::new();
        game.apply(mv("a2-a3")).unwrap();
        let mut policy = RulePolicy::new(StrategyTable::default(), Side::Opponent);
        assert_eq!(select(&mut policy, &game), Some(mv("a7-a5")));
    }

    #[test]
    fn test_priority_move_comes_first() {
        let board = Board::with_pawns(&[sq("a2"), sq("c2")], &[sq("d3"), sq("h7")]);
        let game = Game::from_board(board, Side::Player);
        let mut policy = RulePolicy::new(StrategyTable::default(), Side::Player);
        assert_eq!(select(&mut policy, &game), Some(mv("c2-d3")));
    }

    #[test]
    fn test_capture_takes_nearest_intruder() {
        let board = Board::with_pawns(&[sq("h1"), sq("b3")], &[sq("c4"), sq("h7")]);
        let game = Game::from_board(board, Side::Player);
        let mut policy = RulePolicy::new(StrategyTable::default(), Side::Player);
        // h1-h2 and b3-b4 also map to `Capture` but have nothing legal to take.
        assert_eq!(game.legal_moves()[0], mv("h1-h2"));
        assert_eq!(select(&mut policy, &game), Some(mv("b3-c4")));
    }

    #[test]
    fn test_falls_back_to_last_candidate() {
        let game = Game::from_position(Position::new().with_turn(OPENING_TURNS + 1));
        let mut policy = RulePolicy::new(StrategyTable::default(), Side::Player);
        assert_eq!(select(&mut policy, &game), Some(mv("h2-h4")));
    }

    #[test]
    fn test_dispatch_guards() {
        let board = Board::with_pawns(&[sq("a2"), sq("e5")], &[sq("d5"), sq("h7")]);
        let position = Position::from_board(board, Side::Player)
            .with_en_passant_target(Some(sq("d6")))
            .with_turn(ENDGAME_TURN);
        let game = Game::from_position(position);

        assert_eq!(dispatch(&game, Action::MoveCloser, mv("a2-a3")), Some(mv("a2-a3")));
        assert_eq!(dispatch(&game, Action::BlockCapture, mv("a2-a3")), Some(mv("a2-a3")));
        assert_eq!(dispatch(&game, Action::EnPassant, mv("e5-d6")), Some(mv("e5-d6")));
        assert_eq!(dispatch(&game, Action::EnPassant, mv("e5-e6")), None);
        assert_eq!(dispatch(&game, Action::EndgameFocus, mv("a2-a3")), Some(mv("a2-a3")));
        assert_eq!(dispatch(&game, Action::TwoSquare, mv("a2-a4")), None, "past the opening");
        assert_eq!(dispatch(&game, Action::Capture, mv("a2-a3")), None);
    }

    #[test]
    fn test_dispatch_guards_decline_early_game() {
        let game = Game::new();
        assert_eq!(dispatch(&game, Action::BlockCapture, mv("a2-a3")), None);
        assert_eq!(dispatch(&game, Action::EndgameFocus, mv("a2-a3")), None);
        assert_eq!(dispatch(&game, Action::EnPassant, mv("a2-a3")), None);
        assert_eq!(dispatch(&game, Action::TwoSquare, mv("a2-a4")), Some(mv("a2-a4")));
    }

    #[test]
    fn test_capture_redirects_to_nearest_pawn() {
        let board = Board::with_pawns(&[sq("c3")], &[sq("d4"), sq("d6")]);
        let game = Game::from_board(board, Side::Player);
        assert_eq!(capture_target(&game, mv("c3-d4")), Some(sq("d4")));
        assert_eq!(dispatch(&game, Action::Capture, mv("c3-d4")), Some(mv("c3-d4")));
        assert_eq!(capture_target(&game, mv("c3-c4")), None);
    }
}
