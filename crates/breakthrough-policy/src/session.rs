//! Driving a game between seated policies.
//!
//! A [`Session`] owns a [`Game`] and, for each side, either a
//! [`DecisionPolicy`] or nothing (a human plays that side through
//! [`Session::apply`]). Every applied move is reported to every seated policy
//! through [`DecisionPolicy::observe`], whichever side played it.
//!
//! Policies stay seated across [`Session::restart`], so anything they learn
//! carries over to the next game.

use breakthrough_engine::{ApplyError, Game, Move, MoveOutcome, Outcome, Side};

use crate::{DecisionPolicy, Transition};

/// Error returned when a seated policy cannot produce a playable move.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum MachineMoveError {
    #[display("no policy is seated for {side}")]
    NoPolicy { side: Side },
    #[display("{policy} policy for {side} returned no move")]
    NoMove { policy: &'static str, side: Side },
    #[display("{policy} policy for {side} chose {mv}, which was rejected: {source}")]
    Rejected {
        policy: &'static str,
        side: Side,
        mv: Move,
        source: ApplyError,
    },
}

#[derive(Debug)]
pub struct Session {
    game: Game,
    player: Option<Box<dyn DecisionPolicy>>,
    opponent: Option<Box<dyn DecisionPolicy>>,
}

impl Session {
    /// Starts a session on a fresh game; `None` leaves the side to a human.
    #[must_use]
    pub fn new(
        player: Option<Box<dyn DecisionPolicy>>,
        opponent: Option<Box<dyn DecisionPolicy>>,
    ) -> Self {
        Self::with_game(Game::new(), player, opponent)
    }

    #[must_use]
    pub fn with_game(
        game: Game,
        player: Option<Box<dyn DecisionPolicy>>,
        opponent: Option<Box<dyn DecisionPolicy>>,
    ) -> Self {
        Self {
            game,
            player,
            opponent,
        }
    }

    #[must_use]
    pub fn game(&self) -> &Game {
        &self.game
    }

    #[must_use]
    pub fn policy(&self, side: Side) -> Option<&dyn DecisionPolicy> {
        match side {
            Side::Player => self.player.as_deref(),
            Side::Opponent => self.opponent.as_deref(),
        }
    }

    /// Whether a policy plays the side to move.
    #[must_use]
    pub fn is_machine_turn(&self) -> bool {
        self.policy(self.game.side_to_move()).is_some()
    }

    /// Starts a new game, keeping the seated policies.
    pub fn restart(&mut self) {
        self.game = Game::new();
    }

    /// Ends the game with `side` giving up. See [`Game::forfeit`].
    pub fn forfeit(&mut self, side: Side) -> Option<Outcome> {
        self.game.forfeit(side)
    }

    /// Applies `mv` for the side to move and lets every seated policy observe it.
    pub fn apply(&mut self, mv: Move) -> Result<MoveOutcome, ApplyError> {
        let before = self.game.fingerprint();
        let outcome = self.game.apply(mv)?;
        if let Some(record) = self.game.last_move().copied() {
            let transition = Transition::new(before, record);
            for policy in [self.player.as_deref_mut(), self.opponent.as_deref_mut()]
                .into_iter()
                .flatten()
            {
                policy.observe(&transition, &self.game);
            }
        }
        Ok(outcome)
    }

    /// Lets the policy seated for the side to move pick a move and applies it.
    pub fn machine_move(&mut self) -> Result<(Move, MoveOutcome), MachineMoveError> {
        let side = self.game.side_to_move();
        let seat = match side {
            Side::Player => self.player.as_deref_mut(),
            Side::Opponent => self.opponent.as_deref_mut(),
        };
        let Some(policy) = seat else {
            return Err(MachineMoveError::NoPolicy { side });
        };
        let name = policy.name();
        let legal_moves = self.game.legal_moves();
        let Some(mv) = policy.select(&self.game, &legal_moves) else {
            return Err(MachineMoveError::NoMove { policy: name, side });
        };
        let outcome = self.apply(mv).map_err(|source| MachineMoveError::Rejected {
            policy: name,
            side,
            mv,
            source,
        })?;
        Ok((mv, outcome))
    }

    /// Plays machine moves until the game ends or `ply_limit` plies have been played.
    ///
    /// Returns the outcome, or `None` if the limit was hit first.
    pub fn play_out(&mut self, ply_limit: usize) -> Result<Option<Outcome>, MachineMoveError> {
        while !self.game.is_finished() && self.game.ply() < ply_limit {
            self.machine_move()?;
        }
        Ok(self.game.outcome())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use breakthrough_engine::Reason;

    use super::*;
    use crate::{config::PolicyConfig, rule_policy::RulePolicy, strategy_table::StrategyTable};

    fn learner(side: Side, seed: u64) -> Box<dyn DecisionPolicy> {
        let mut config = PolicyConfig::q_learning();
        config.seed = Some(seed);
        config.build(side).unwrap()
    }

    /// Plays a fixed move no matter what.
    #[derive(Debug)]
    struct Stubborn(Move);

    impl DecisionPolicy for Stubborn {
        fn name(&self) -> &'static str {
            "stubborn"
        }

        fn side(&self) -> Side {
            Side::Opponent
        }

        fn select(&mut self, _game: &Game, _legal_moves: &[Move]) -> Option<Move> {
            Some(self.0)
        }
    }

    /// Plays the first legal move and records `(observer, mover)` for every observed move.
    #[derive(Debug)]
    struct Recorder {
        side: Side,
        seen: Arc<Mutex<Vec<(Side, Side)>>>,
    }

    impl DecisionPolicy for Recorder {
        fn name(&self) -> &'static str {
            "recorder"
        }

        fn side(&self) -> Side {
            self.side
        }

        fn select(&mut self, _game: &Game, legal_moves: &[Move]) -> Option<Move> {
            legal_moves.first().copied()
        }

        fn observe(&mut self, transition: &Transition, _game: &Game) {
            self.seen.lock().unwrap().push((self.side, transition.mover()));
        }
    }

    #[test]
    fn test_machine_games_terminate() {
        for seed in 0..10 {
            let player = learner(Side::Player, seed);
            let opponent = learner(Side::Opponent, seed + 100);
            let mut session = Session::new(Some(player), Some(opponent));
            let outcome = session.play_out(usize::MAX).unwrap();
            assert!(outcome.is_some(), "seed {seed} did not finish");
            assert!(session.game().is_finished());
        }
    }

    #[test]
    fn test_rule_versus_learner_terminates() {
        let rule: Box<dyn DecisionPolicy> =
            Box::new(RulePolicy::new(StrategyTable::default(), Side::Player));
        let mut session = Session::new(Some(rule), Some(learner(Side::Opponent, 9)));
        for _ in 0..3 {
            let outcome = session.play_out(usize::MAX).unwrap().unwrap();
            assert_ne!(outcome.reason(), Reason::Forfeit);
            session.restart();
            assert_eq!(session.game().ply(), 0);
        }
    }

    #[test]
    fn test_human_seat() {
        let mut session = Session::new(None, Some(learner(Side::Opponent, 1)));
        assert!(!session.is_machine_turn());
        assert!(matches!(
            session.machine_move(),
            Err(MachineMoveError::NoPolicy { side: Side::Player })
        ));

        session.apply("d2-d4".parse().unwrap()).unwrap();
        assert!(session.is_machine_turn());
        let (mv, outcome) = session.machine_move().unwrap();
        assert_eq!(outcome, MoveOutcome::Continue);
        assert_eq!(session.game().history(Side::Opponent).last(), Some(mv));
    }

    #[test]
    fn test_every_policy_observes_every_move() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let player: Box<dyn DecisionPolicy> = Box::new(Recorder {
            side: Side::Player,
            seen: Arc::clone(&seen),
        });
        let opponent: Box<dyn DecisionPolicy> = Box::new(Recorder {
            side: Side::Opponent,
            seen: Arc::clone(&seen),
        });
        let mut session = Session::new(Some(player), Some(opponent));
        session.machine_move().unwrap();
        session.machine_move().unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            [
                (Side::Player, Side::Player),
                (Side::Opponent, Side::Player),
                (Side::Player, Side::Opponent),
                (Side::Opponent, Side::Opponent),
            ]
        );
    }

    #[test]
    fn test_rejected_machine_move() {
        let stubborn: Box<dyn DecisionPolicy> = Box::new(Stubborn("e7-e4".parse().unwrap()));
        let mut session = Session::new(None, Some(stubborn));
        session.apply("a2-a3".parse().unwrap()).unwrap();
        let err = session.machine_move().unwrap_err();
        assert!(matches!(err, MachineMoveError::Rejected { .. }));
        assert_eq!(
            err.to_string(),
            "stubborn policy for Opponent chose e7-e4, which was rejected: illegal move e7-e4"
        );
        assert_eq!(session.game().ply(), 1, "state untouched");
    }
}
