//! Move legality oracle.
//!
//! A pawn of the side to move may play, with `d` its forward direction:
//!
//! | shape | destination | requirement |
//! |---|---|---|
//! | single step | `from + (0, d)` | destination empty |
//! | two-square advance | `from + (0, 2d)` | `from` on the starting rank, both squares ahead empty |
//! | diagonal capture | `from + (±1, d)` | destination holds an opposing pawn |
//! | en passant | `from + (±1, d)` | destination is the en-passant target and the jumped pawn is beside `from` |
//!
//! Every other shape is illegal. The oracle does not check that `from` holds a
//! pawn of the side to move; [`Game::apply`](crate::Game::apply) does that before
//! consulting it.

use crate::{Cell, Position, Side, Square};

/// Whether the side to move may move a pawn from `from` to `to`.
#[must_use]
pub fn is_legal(position: &Position, from: Square, to: Square) -> bool {
    let side = position.side_to_move();
    let board = position.board();
    if board.get(to).is_pawn_of(side) {
        return false;
    }

    let file_delta = i16::from(to.file()) - i16::from(from.file());
    let rank_delta = (i16::from(to.rank()) - i16::from(from.rank())) * i16::from(side.forward());

    match (file_delta, rank_delta) {
        (0, 1) => board.get(to).is_empty(),
        (0, 2) => is_two_square_advance(position, from, to),
        (-1 | 1, 1) => match board.get(to) {
            Cell::Pawn(owner) => owner != side,
            Cell::Empty => is_en_passant(position, from, to),
        },
        _ => false,
    }
}

/// Whether `from` to `to` is a legal two-square first advance for the side to move.
#[must_use]
pub fn is_two_square_advance(position: &Position, from: Square, to: Square) -> bool {
    let side = position.side_to_move();
    let board = position.board();
    let forward = side.forward();
    if from.rank() != side.starting_rank() {
        return false;
    }
    let (Some(middle), Some(target)) = (from.offset(0, forward), from.offset(0, 2 * forward))
    else {
        return false;
    };
    target == to && board.get(middle).is_empty() && board.get(to).is_empty()
}

/// Whether `from` to `to` is a legal en-passant capture for the side to move.
///
/// The destination must be the stored en-passant target, one step diagonally
/// forward, and the pawn that made the two-square advance must stand directly
/// behind it (beside `from`).
#[must_use]
pub fn is_en_passant(position: &Position, from: Square, to: Square) -> bool {
    let side = position.side_to_move();
    let board = position.board();
    if position.en_passant_target() != Some(to) || !board.get(to).is_empty() {
        return false;
    }
    let forward = side.forward();
    let diagonal = [-1, 1]
        .into_iter()
        .any(|file_delta| from.offset(file_delta, forward) == Some(to));
    diagonal
        && to
            .offset(0, -forward)
            .is_some_and(|jumped| board.get(jumped).is_pawn_of(side.opponent()))
}

/// Whether a pawn of `side` on `square` has reached its far rank.
#[must_use]
pub fn is_on_far_rank(side: Side, square: Square) -> bool {
    square.rank() == side.far_rank()
}
