//! Legal move enumeration.
//!
//! Pawns of the side to move are visited in scan order (rank 1 to 8, file `a`
//! to `h`). For each pawn the candidates are tested in a fixed order:
//!
//! 1. straight advance
//! 2. two-square advance
//! 3. diagonal toward file `a`
//! 4. diagonal toward file `h`
//!
//! Policies that pick the first matching move depend on this order, so it is
//! part of the contract.

use arrayvec::ArrayVec;

use crate::{Move, Position};

/// Upper bound on the number of legal moves: 16 pawns with three one-step
/// candidates each, plus a two-square advance for each of the 8 pawns that can
/// stand on the starting rank.
pub const MAX_LEGAL_MOVES: usize = 16 * 3 + 8;

pub type MoveList = ArrayVec<Move, MAX_LEGAL_MOVES>;

/// Candidate `(file, rank)` steps, with rank steps counted in the mover's forward direction.
const CANDIDATE_STEPS: [(i8, i8); 4] = [(0, 1), (0, 2), (-1, 1), (1, 1)];

/// Enumerates all legal moves for the side to move.
#[must_use]
pub fn legal_moves(position: &Position) -> MoveList {
    let side = position.side_to_move();
    let forward = side.forward();
    let mut moves = MoveList::new();
    for from in position.board().pawns(side) {
        for (file_step, rank_step) in CANDIDATE_STEPS {
            let Some(to) = from.offset(file_step, rank_step * forward) else {
                continue;
            };
            if position.is_legal(from, to) {
                moves.push(Move::new(from, to));
            }
        }
    }
    moves
}

/// Whether the side to move has at least one legal move.
#[must_use]
pub fn has_legal_moves(position: &Position) -> bool {
    let side = position.side_to_move();
    let forward = side.forward();
    position.board().pawns(side).any(|from| {
        CANDIDATE_STEPS.iter().any(|&(file_step, rank_step)| {
            from.offset(file_step, rank_step * forward)
                .is_some_and(|to| position.is_legal(from, to))
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, Side, Square};

    fn sq(label: &str) -> Square {
        label.parse().unwrap()
    }

    fn labels(moves: &MoveList) -> Vec<String> {
        moves.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_initial_player_moves_in_scan_order() {
        let moves = legal_moves(&Position::new());
        assert_eq!(moves.len(), 16);
        assert_eq!(labels(&moves)[..4], ["a2-a3", "a2-a4", "b2-b3", "b2-b4"]);
        assert!(moves.iter().all(|m| m.from().rank() == 1));
    }

    #[test]
    fn test_initial_opponent_moves() {
        let moves = legal_moves(&Position::from_board(Board::INITIAL, Side::Opponent));
        assert_eq!(moves.len(), 16);
        assert_eq!(labels(&moves)[..2], ["a7-a6", "a7-a5"]);
    }

    #[test]
    fn test_candidate_order_per_pawn() {
        let board = Board::with_pawns(&[sq("d2")], &[sq("c3"), sq("e3")]);
        let moves = legal_moves(&Position::from_board(board, Side::Player));
        assert_eq!(labels(&moves), ["d2-d3", "d2-d4", "d2-c3", "d2-e3"]);
    }

    #[test]
    fn test_generated_moves_are_legal() {
        let board = Board::with_pawns(
            &[sq("a2"), sq("b5"), sq("d4"), sq("h7")],
            &[sq("a3"), sq("c5"), sq("e5"), sq("g8")],
        );
        let position =
            Position::from_board(board, Side::Player).with_en_passant_target(Some(sq("c6")));
        let moves = legal_moves(&position);
        assert_eq!(
            labels(&moves),
            ["d4-d5", "d4-c5", "d4-e5", "b5-b6", "b5-c6", "h7-h8", "h7-g8"]
        );
        for mv in &moves {
            assert!(position.is_legal(mv.from(), mv.to()), "{mv} rejected");
        }
        assert!(has_legal_moves(&position));
    }

    #[test]
    fn test_blocked_side_has_no_moves() {
        let board = Board::with_pawns(&[sq("a4")], &[sq("a5")]);
        let position = Position::from_board(board, Side::Player);
        assert!(legal_moves(&position).is_empty());
        assert!(!has_legal_moves(&position));
    }

    #[test]
    fn test_crowded_board_count() {
        let player: Vec<Square> = Square::all().filter(|s| matches!(s.rank(), 1 | 3)).collect();
        let opponent: Vec<Square> = Square::all().filter(|s| s.rank() == 4).collect();
        let board = Board::with_pawns(&player, &opponent);
        let moves = legal_moves(&Position::from_board(board, Side::Player));
        // 8 single steps from rank 2, 14 diagonal captures from rank 4.
        assert_eq!(moves.len(), 8 + 14);
        assert!(moves.len() <= MAX_LEGAL_MOVES);
    }
}
