//! The move every policy plays before consulting its own logic.
//!
//! A legal move is a priority move when it answers an opposing two-square
//! advance:
//!
//! - it captures the advancing pawn en passant, or
//! - it is a diagonal capture departing from the mover's starting rank, i.e.
//!   it removes an opposing pawn that has arrived right in front of the home
//!   ranks.
//!
//! The first such move in enumeration order wins.

use breakthrough_engine::{Game, Move};

/// First priority move among `legal_moves`, if any.
#[must_use]
pub fn priority_move(game: &Game, legal_moves: &[Move]) -> Option<Move> {
    let position = game.position();
    let side = position.side_to_move();
    legal_moves.iter().copied().find(|&mv| {
        if position.is_en_passant(mv) {
            return true;
        }
        mv.is_diagonal()
            && mv.from().rank() == side.starting_rank()
            && position.board().get(mv.to()).is_pawn_of(side.opponent())
    })
}
