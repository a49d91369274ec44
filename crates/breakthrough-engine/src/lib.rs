//! Game-state engine for Breakthrough, the 8×8 pawn race.
//!
//! - [`core`] - board data: squares, moves, cells, positions and fingerprints
//! - [`engine`] - the rules: legality oracle, move generator and the game state machine
//!
//! # Example
//!
//! ```
//! use breakthrough_engine::{Game, Move, MoveOutcome};
//!
//! let mut game = Game::new();
//! let mv: Move = "b2-b4".parse().unwrap();
//!
//! assert_eq!(game.apply(mv).unwrap(), MoveOutcome::Continue);
//! assert_eq!(game.en_passant_target(), Some("b3".parse().unwrap()));
//! ```

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Error returned when an algebraic square label cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseSquareError {
    #[display("square must be two characters like `c2`, got {label:?}")]
    Length { label: String },
    #[display("file must be a letter from `a` to `h`, got {file:?}")]
    File { file: char },
    #[display("rank must be a digit from `1` to `8`, got {rank:?}")]
    Rank { rank: char },
}

/// Error returned when a move string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseMoveError {
    #[display("move must be two squares like `b2b4` or `b2-b4`, got {text:?}")]
    Format { text: String },
    #[display("invalid square in move: {source}")]
    Square { source: ParseSquareError },
}

/// Error returned by [`Game::apply`] when a move is rejected.
///
/// The game is left untouched whenever this is returned.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ApplyError {
    #[display("the game is already over")]
    GameOver,
    #[display("no piece at {square}")]
    NoPawn { square: Square },
    #[display("the pawn at {square} does not belong to the side to move")]
    NotYourPawn { square: Square },
    #[display("illegal move {mv}")]
    IllegalMove { mv: Move },
}
