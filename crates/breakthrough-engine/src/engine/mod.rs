//! Game rules and state management.
//!
//! This module builds the game on top of the plain data in [`crate::core`]:
//!
//! - [`rules`] - the legality oracle for a single `(from, to)` pair
//! - [`movegen`] - enumeration of every legal move in a fixed order
//! - [`Game`] - the state machine that validates and applies moves, keeps the
//!   move histories and detects the end of the game
//!
//! # Game Flow
//!
//! 1. Create a [`Game`] (standard layout, player to move)
//! 2. The side to move picks one of [`Game::legal_moves`] (or types a move)
//! 3. [`Game::apply`] validates it and returns [`MoveOutcome::Continue`] or
//!    [`MoveOutcome::Finished`]
//! 4. Repeat until finished, or end early with [`Game::forfeit`]
//!
//! A game ends when a pawn reaches its far rank, when one side has no pawns
//! left, when the side to move has no legal move, or by forfeit.
//!
//! # Example
//!
//! ```
//! use breakthrough_engine::{Game, MoveOutcome};
//!
//! let mut game = Game::new();
//! while !game.is_finished() {
//!     // Always play the first legal move.
//!     let mv = game.legal_moves()[0];
//!     if let MoveOutcome::Finished(outcome) = game.apply(mv).unwrap() {
//!         println!("{outcome}");
//!     }
//! }
//! ```

pub use self::{game::*, history::*, movegen::MoveList};

mod game;
mod history;
pub mod movegen;
pub mod rules;
