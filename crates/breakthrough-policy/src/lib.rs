//! Move selection for the machine side of a Breakthrough game.
//!
//! Every policy implements [`DecisionPolicy`]: given the game and its legal
//! moves it picks one, and after every applied move (by either side) it may
//! learn from the [`Transition`].
//!
//! Two policies are provided:
//!
//! - [`RulePolicy`](rule_policy::RulePolicy) - walks a prioritized
//!   [`StrategyTable`](strategy_table::StrategyTable) keyed by board percepts
//! - [`QLearningPolicy`](q_learning::QLearningPolicy) - tabular one-step
//!   Q-learning over a [`ValueTable`](value_table::ValueTable)
//!
//! Both play the [priority move](priority::priority_move) first when one
//! exists.
//!
//! # Architecture
//!
//! ```text
//! Session (drives a Game, notifies policies)
//!     ↓ uses
//! DecisionPolicy::select / observe
//!     ↓ uses
//! Percepts + StrategyTable    or    ValueTable
//! ```
//!
//! # Example
//!
//! ```
//! use breakthrough_engine::Side;
//! use breakthrough_policy::{
//!     config::PolicyConfig,
//!     session::Session,
//! };
//!
//! let player = PolicyConfig::rule().build(Side::Player).unwrap();
//! let opponent = PolicyConfig::q_learning().build(Side::Opponent).unwrap();
//! let mut session = Session::new(Some(player), Some(opponent));
//!
//! let outcome = session.play_out(1_000).unwrap();
//! assert!(outcome.is_some());
//! ```

use std::fmt;

use breakthrough_engine::{Game, Move, MoveRecord, Side, StateFingerprint};

pub mod config;
pub mod percept;
pub mod priority;
pub mod q_learning;
pub mod rule_policy;
pub mod session;
pub mod strategy_table;
pub mod value_table;

/// A move that has just been applied, as seen by a learning policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    before: StateFingerprint,
    record: MoveRecord,
}

impl Transition {
    #[must_use]
    pub fn new(before: StateFingerprint, record: MoveRecord) -> Self {
        Self { before, record }
    }

    /// Fingerprint of the position the move was played from.
    #[must_use]
    pub fn before(&self) -> StateFingerprint {
        self.before
    }

    #[must_use]
    pub fn record(&self) -> &MoveRecord {
        &self.record
    }

    #[must_use]
    pub fn mv(&self) -> Move {
        self.record.mv()
    }

    #[must_use]
    pub fn mover(&self) -> Side {
        self.record.mover()
    }
}

/// Chooses moves for one side of a game.
pub trait DecisionPolicy: fmt::Debug + Send {
    /// Short name used in logs and game records.
    fn name(&self) -> &'static str;

    /// Side this policy plays for.
    fn side(&self) -> Side;

    /// Picks one of `legal_moves`, or `None` if the list is empty.
    ///
    /// `legal_moves` is the move generator's output for `game` and keeps its
    /// enumeration order.
    fn select(&mut self, game: &Game, legal_moves: &[Move]) -> Option<Move>;

    /// Called after every applied move, by either side. `game` is the state
    /// after the move.
    fn observe(&mut self, transition: &Transition, game: &Game) {
        let _ = (transition, game);
    }
}
