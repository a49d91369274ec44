//! Prioritized percept-to-action rules.
//!
//! A [`StrategyTable`] is an ordered list of categories. Each category is
//! guarded by a [`Percept`] and holds an ordered list of conditions, each
//! mapping a further percept to an [`Action`]. Lookup picks the first category
//! whose percept holds, then the first condition within it whose percept holds.
//! A category that holds but has no matching condition does not stop the walk.
//! When nothing matches the result is [`Action::MoveCloser`].
//!
//! The table is plain data: it is built once, serialized as JSON in policy
//! configuration files and only read afterwards.
//!
//! # Example
//!
//! ```
//! use breakthrough_engine::{Game, Side};
//! use breakthrough_policy::{
//!     percept::PerceptRecord,
//!     strategy_table::{Action, StrategyTable},
//! };
//!
//! let table = StrategyTable::default();
//! let game = Game::new();
//! let moves = game.legal_moves();
//! let record = PerceptRecord::new(&game, &moves, "a2-a4".parse().unwrap(), Side::Player);
//! assert_eq!(table.lookup(&record), Action::TwoSquare);
//! ```

use serde::{Deserialize, Serialize};

use crate::percept::{Percept, PerceptRecord};

/// What the rule policy tries to do with a candidate move.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Play the candidate as is.
    #[default]
    #[display("move_closer")]
    MoveCloser,
    /// Go after the nearest opposing pawn on the candidate's destination file.
    #[display("capture")]
    Capture,
    /// Play the candidate while opposing pawns sit in the middle ranks.
    #[display("block_capture")]
    BlockCapture,
    /// Play the candidate as an opening two-square advance.
    #[display("two_square")]
    TwoSquare,
    /// Play the candidate when it captures en passant.
    #[display("en_passant")]
    EnPassant,
    /// Play the candidate late in the game.
    #[display("endgame_focus")]
    EndgameFocus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    when: Percept,
    action: Action,
}

impl Condition {
    #[must_use]
    pub const fn new(when: Percept, action: Action) -> Self {
        Self { when, action }
    }

    #[must_use]
    pub fn when(&self) -> Percept {
        self.when
    }

    #[must_use]
    pub fn action(&self) -> Action {
        self.action
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    category: Percept,
    conditions: Vec<Condition>,
}

impl Category {
    #[must_use]
    pub fn new(category: Percept, conditions: Vec<Condition>) -> Self {
        Self {
            category,
            conditions,
        }
    }

    #[must_use]
    pub fn category(&self) -> Percept {
        self.category
    }

    #[must_use]
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrategyTable {
    categories: Vec<Category>,
}

impl Default for StrategyTable {
    fn default() -> Self {
        use Action as A;
        use Percept as P;

        Self::new(vec![
            Category::new(
                P::MachineTurn,
                vec![
                    Condition::new(P::EnPassantAvailable, A::EnPassant),
                    Condition::new(P::TwoSquareOpening, A::TwoSquare),
                    Condition::new(P::Endgame, A::EndgameFocus),
                ],
            ),
            Category::new(
                P::ThreatsNearHome,
                vec![Condition::new(P::MachineTurn, A::Capture)],
            ),
            Category::new(
                P::LegalMoves,
                vec![Condition::new(P::ForwardMovementOnly, A::BlockCapture)],
            ),
            Category::new(
                P::TwoSquareOpening,
                vec![Condition::new(P::MachineTurn, A::TwoSquare)],
            ),
            Category::new(
                P::OwnPawnsNearGoal,
                vec![Condition::new(P::MachineTurn, A::MoveCloser)],
            ),
            Category::new(
                P::BoardState,
                vec![Condition::new(P::WhoseTurn, A::EndgameFocus)],
            ),
        ])
    }
}

impl StrategyTable {
    #[must_use]
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// First matching rule as `(category, condition)`, or `None`.
    #[must_use]
    pub fn matching_rule(&self, record: &PerceptRecord<'_>) -> Option<(&Category, &Condition)> {
        self.categories
            .iter()
            .filter(|category| record.holds(category.category))
            .find_map(|category| {
                category
                    .conditions
                    .iter()
                    .find(|condition| record.holds(condition.when))
                    .map(|condition| (category, condition))
            })
    }

    /// Action for the candidate described by `record`.
    #[must_use]
    pub fn lookup(&self, record: &PerceptRecord<'_>) -> Action {
        self.matching_rule(record)
            .map_or(Action::MoveCloser, |(_, condition)| condition.action)
    }
}
