//! Tabular one-step Q-learning policy.
//!
//! # Selection
//!
//! 1. A [priority move](crate::priority::priority_move) is played immediately.
//! 2. With probability `exploration_rate` a uniformly random legal move is
//!    played.
//! 3. Otherwise the legal move with the highest value in the [`ValueTable`] is
//!    played; unseen moves are worth `0.0` and the first maximum wins.
//!
//! # Learning
//!
//! After every applied move, by either side, the value of the move just played
//! is updated:
//!
//! ```text
//! reward   = 1.0 if the mover now has a pawn on its far rank
//!            else 0.5 × pawns captured by the move
//! next_max = best value among the legal moves of the resulting position (0.0 if none)
//! value   ← (1 - α)·value + α·(reward + γ·next_max)
//! ```
//!
//! The table lives as long as the policy, so values carry over between games
//! played with the same policy object but are never persisted.

use breakthrough_engine::{Game, Move, Side};
use rand::{Rng as _, SeedableRng as _, seq::IndexedRandom as _};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::{DecisionPolicy, Transition, priority::priority_move, value_table::ValueTable};

/// Reward for reaching the far rank.
pub const WIN_REWARD: f64 = 1.0;

/// Reward per captured pawn.
pub const CAPTURE_REWARD: f64 = 0.5;

/// Learning parameters of [`QLearningPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QLearningParams {
    /// α: weight of the new estimate in each update.
    pub learning_rate: f64,
    /// γ: weight of the resulting position's best value.
    pub discount: f64,
    /// ε: probability of playing a random move instead of the best known one.
    pub exploration_rate: f64,
}

impl Default for QLearningParams {
    fn default() -> Self {
        Self {
            learning_rate: 0.2,
            discount: 0.8,
            exploration_rate: 0.2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct QLearningPolicy {
    side: Side,
    params: QLearningParams,
    values: ValueTable,
    rng: Pcg32,
}

impl QLearningPolicy {
    /// Creates a policy with an empty value table and a random seed.
    #[must_use]
    pub fn new(params: QLearningParams, side: Side) -> Self {
        Self::with_seed(params, side, rand::rng().random())
    }

    /// Like [`Self::new`], but with a fixed seed for reproducible exploration.
    #[must_use]
    pub fn with_seed(params: QLearningParams, side: Side, seed: u64) -> Self {
        Self {
            side,
            params,
            values: ValueTable::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Replaces the value table, e.g. to give it a size limit.
    #[must_use]
    pub fn with_value_table(mut self, values: ValueTable) -> Self {
        self.values = values;
        self
    }

    #[must_use]
    pub fn params(&self) -> &QLearningParams {
        &self.params
    }

    #[must_use]
    pub fn values(&self) -> &ValueTable {
        &self.values
    }
}

/// Immediate reward for the move described by `transition`, judged on the
/// position after it.
#[must_use]
pub fn reward(transition: &Transition, game: &Game) -> f64 {
    let mover = transition.mover();
    let far_rank = mover.far_rank();
    if game.board().pawns(mover).any(|square| square.rank() == far_rank) {
        return WIN_REWARD;
    }
    let captured = u32::try_from(transition.record().captured_count()).unwrap_or(u32::MAX);
    CAPTURE_REWARD * f64::from(captured)
}

impl DecisionPolicy for QLearningPolicy {
    fn name(&self) -> &'static str {
        "q-learning"
    }

    fn side(&self) -> Side {
        self.side
    }

    fn select(&mut self, game: &Game, legal_moves: &[Move]) -> Option<Move> {
        if let Some(mv) = priority_move(game, legal_moves) {
            tracing::debug!(side = %self.side, %mv, "q-learning: priority move");
            return Some(mv);
        }
        if legal_moves.is_empty() {
            return None;
        }
        if self.rng.random_bool(self.params.exploration_rate) {
            let mv = legal_moves.choose(&mut self.rng).copied();
            if let Some(mv) = mv {
                tracing::debug!(side = %self.side, %mv, "q-learning: exploring");
            }
            return mv;
        }
        let state = game.fingerprint();
        let mv = self.values.best_move(state, legal_moves);
        if let Some(mv) = mv {
            tracing::debug!(
                side = %self.side,
                %mv,
                value = self.values.get(state, mv),
                "q-learning: best known move",
            );
        }
        mv
    }

    fn observe(&mut self, transition: &Transition, game: &Game) {
        let reward = reward(transition, game);
        let next_max = self
            .values
            .max_value(game.fingerprint(), &game.legal_moves());
        let value = self.values.update(
            transition.before(),
            transition.mv(),
            reward,
            next_max,
            self.params.learning_rate,
            self.params.discount,
        );
        tracing::trace!(
            mv = %transition.mv(),
            reward,
            next_max,
            value,
            entries = self.values.len(),
            "q-learning: value updated",
        );
    }
}

#[cfg(test)]
mod tests {
    use breakthrough_engine::{Board, MoveList, Square};

    use super::*;

    fn sq(label: &str) -> Square {
        label.parse().unwrap()
    }

    fn mv(text: &str) -> Move {
        text.parse().unwrap()
    }

    fn params(exploration_rate: f64) -> QLearningParams {
        QLearningParams {
            exploration_rate,
            ..QLearningParams::default()
        }
    }

    fn apply_observed(policy: &mut QLearningPolicy, game: &mut Game, mv: Move) -> Transition {
        let before = game.fingerprint();
        game.apply(mv).unwrap();
        let transition = Transition::new(before, *game.last_move().unwrap());
        policy.observe(&transition, game);
        transition
    }

    #[test]
    fn test_default_params() {
        let params = QLearningParams::default();
        assert!((params.learning_rate - 0.2).abs() < f64::EPSILON);
        assert!((params.discount - 0.8).abs() < f64::EPSILON);
        assert!((params.exploration_rate - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_greedy_without_exploration() {
        let mut policy = QLearningPolicy::with_seed(params(0.0), Side::Player, 7);
        let game = Game::new();
        let moves = game.legal_moves();
        for _ in 0..20 {
            assert_eq!(policy.select(&game, &moves), Some(moves[0]));
        }

        let preferred = mv("e2-e3");
        policy.values.set(game.fingerprint(), preferred, 0.4);
        assert_eq!(policy.select(&game, &moves), Some(preferred));
    }

    #[test]
    fn test_full_exploration_stays_legal() {
        let mut policy = QLearningPolicy::with_seed(params(1.0), Side::Player, 42);
        let game = Game::new();
        let moves = game.legal_moves();
        let mut seen = Vec::new();
        for _ in 0..200 {
            let chosen = policy.select(&game, &moves).unwrap();
            assert!(moves.contains(&chosen), "{chosen} is not legal");
            if !seen.contains(&chosen) {
                seen.push(chosen);
            }
        }
        assert!(seen.len() > 1, "exploration never varied");
    }

    #[test]
    fn test_same_seed_same_choices() {
        let game = Game::new();
        let moves = game.legal_moves();
        let mut a = QLearningPolicy::with_seed(params(1.0), Side::Player, 99);
        let mut b = QLearningPolicy::with_seed(params(1.0), Side::Player, 99);
        for _ in 0..10 {
            assert_eq!(a.select(&game, &moves), b.select(&game, &moves));
        }
    }

    #[test]
    fn test_empty_moves() {
        let mut policy = QLearningPolicy::with_seed(params(1.0), Side::Player, 1);
        assert_eq!(policy.select(&Game::new(), &MoveList::new()), None);
    }

    #[test]
    fn test_priority_beats_values() {
        let board = Board::with_pawns(&[sq("a2"), sq("c2")], &[sq("d3"), sq("h7")]);
        let game = Game::from_board(board, Side::Player);
        let moves = game.legal_moves();
        let mut policy = QLearningPolicy::with_seed(params(0.0), Side::Player, 3);
        policy.values.set(game.fingerprint(), mv("a2-a3"), 10.0);
        assert_eq!(policy.select(&game, &moves), Some(mv("c2-d3")));
    }

    #[test]
    fn test_capture_reward_and_update() {
        let board = Board::with_pawns(&[sq("c4"), sq("a2")], &[sq("d5"), sq("h5"), sq("h7")]);
        let mut game = Game::from_board(board, Side::Player);
        let mut policy = QLearningPolicy::with_seed(params(0.0), Side::Opponent, 5);
        let capture = mv("c4-d5");
        let before = game.fingerprint();

        let transition = apply_observed(&mut policy, &mut game, capture);
        assert!((reward(&transition, &game) - CAPTURE_REWARD).abs() < f64::EPSILON);
        // Nothing is known about the resulting position, so next_max is 0.0.
        let expected = 0.2 * CAPTURE_REWARD;
        assert!((policy.values().get(before, capture) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_update_uses_best_next_value() {
        let board = Board::with_pawns(&[sq("c4"), sq("a2")], &[sq("d5"), sq("h5"), sq("h7")]);
        let mut game = Game::from_board(board, Side::Player);
        let mut policy = QLearningPolicy::with_seed(params(0.0), Side::Opponent, 5);
        let capture = mv("c4-d5");
        let before = game.fingerprint();

        let mut after = game.clone();
        after.apply(capture).unwrap();
        policy.values.set(after.fingerprint(), mv("h7-h6"), 0.3);
        policy.values.set(after.fingerprint(), mv("h5-h4"), 0.1);

        apply_observed(&mut policy, &mut game, capture);
        let value = policy.values().get(before, capture);
        assert!((value - 0.148).abs() < 1e-12, "got {value}");
    }

    #[test]
    fn test_win_reward() {
        let board = Board::with_pawns(&[sq("c7")], &[sq("a7"), sq("h8")]);
        let mut game = Game::from_board(board, Side::Player);
        let mut policy = QLearningPolicy::with_seed(params(0.0), Side::Opponent, 5);
        let transition = apply_observed(&mut policy, &mut game, mv("c7-c8"));
        assert!((reward(&transition, &game) - WIN_REWARD).abs() < f64::EPSILON);
        assert!(game.is_finished());
        // A finished game has no legal moves, so next_max is 0.0.
        let value = policy.values().get(transition.before(), transition.mv());
        assert!((value - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_quiet_move_has_no_reward() {
        let mut game = Game::new();
        let mut policy = QLearningPolicy::with_seed(params(0.0), Side::Opponent, 5);
        let transition = apply_observed(&mut policy, &mut game, mv("a2-a3"));
        assert!(reward(&transition, &game).abs() < f64::EPSILON);
        assert_eq!(policy.values().len(), 1);
    }
}
