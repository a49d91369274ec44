//! Serializable policy configuration.
//!
//! A [`PolicyConfig`] selects the policy kind and carries its knobs. It is read
//! from JSON files by the command-line tool; missing fields take their
//! defaults.
//!
//! ```json
//! {
//!   "kind": "q-learning",
//!   "learning_rate": 0.2,
//!   "discount": 0.8,
//!   "exploration_rate": 0.1,
//!   "seed": 12345,
//!   "value_table_limit": 1000000
//! }
//! ```

use breakthrough_engine::Side;
use serde::{Deserialize, Serialize};

use crate::{
    DecisionPolicy,
    q_learning::{QLearningParams, QLearningPolicy},
    rule_policy::RulePolicy,
    strategy_table::StrategyTable,
    value_table::ValueTable,
};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyKind {
    #[default]
    #[display("rule")]
    Rule,
    #[display("q-learning")]
    QLearning,
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("{name} must be within 0.0..=1.0, got {value}")]
    RateOutOfRange { name: &'static str, value: f64 },
    #[display("value table limit must be positive")]
    ZeroValueTableLimit,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub kind: PolicyKind,
    #[serde(flatten)]
    pub q_learning: QLearningParams,
    /// Exploration seed; a random one is drawn when absent.
    pub seed: Option<u64>,
    /// Maximum number of value-table entries; unbounded when absent.
    pub value_table_limit: Option<usize>,
    /// Rules for the rule policy; the built-in table when absent.
    pub strategy_table: Option<StrategyTable>,
}

impl PolicyConfig {
    #[must_use]
    pub fn rule() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn q_learning() -> Self {
        Self {
            kind: PolicyKind::QLearning,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let QLearningParams {
            learning_rate,
            discount,
            exploration_rate,
        } = self.q_learning;
        for (name, value) in [
            ("learning rate", learning_rate),
            ("discount", discount),
            ("exploration rate", exploration_rate),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::RateOutOfRange { name, value });
            }
        }
        if self.value_table_limit == Some(0) {
            return Err(ConfigError::ZeroValueTableLimit);
        }
        Ok(())
    }

    /// Validates the configuration and builds the policy for `side`.
    pub fn build(&self, side: Side) -> Result<Box<dyn DecisionPolicy>, ConfigError> {
        self.validate()?;
        let policy: Box<dyn DecisionPolicy> = match self.kind {
            PolicyKind::Rule => Box::new(RulePolicy::new(
                self.strategy_table.clone().unwrap_or_default(),
                side,
            )),
            PolicyKind::QLearning => {
                let policy = match self.seed {
                    Some(seed) => QLearningPolicy::with_seed(self.q_learning, side, seed),
                    None => QLearningPolicy::new(self.q_learning, side),
                };
                Box::new(policy.with_value_table(ValueTable::with_limit(self.value_table_limit)))
            }
        };
        tracing::debug!(kind = %self.kind, %side, "policy built");
        Ok(policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let config: PolicyConfig = serde_json::from_str(r#"{"kind": "q-learning"}"#).unwrap();
        assert_eq!(config.kind, PolicyKind::QLearning);
        assert_eq!(config.q_learning, QLearningParams::default());
        assert_eq!(config.seed, None);
        assert_eq!(config.strategy_table, None);

        let config: PolicyConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, PolicyConfig::rule());
    }

    #[test]
    fn test_flattened_rates() {
        let json = r#"{"kind": "q-learning", "exploration_rate": 0.0, "seed": 3}"#;
        let config: PolicyConfig = serde_json::from_str(json).unwrap();
        assert!(config.q_learning.exploration_rate.abs() < f64::EPSILON);
        assert!((config.q_learning.learning_rate - 0.2).abs() < f64::EPSILON);
        assert_eq!(config.seed, Some(3));

        let back = serde_json::to_value(&config).unwrap();
        assert_eq!(back["kind"], "q-learning");
        assert_eq!(back["discount"], 0.8);
    }

    #[test]
    fn test_custom_strategy_table() {
        let json = r#"{"strategy_table": [{"category": "legal_moves", "conditions": []}]}"#;
        let config: PolicyConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.strategy_table.unwrap().categories().len(), 1);
    }

    #[test]
    fn test_validation() {
        assert_eq!(PolicyConfig::q_learning().validate(), Ok(()));

        let mut config = PolicyConfig::q_learning();
        config.q_learning.exploration_rate = 1.5;
        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "exploration rate must be within 0.0..=1.0, got 1.5");
        assert!(config.build(Side::Opponent).is_err());

        let mut config = PolicyConfig::q_learning();
        config.value_table_limit = Some(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroValueTableLimit));
    }

    #[test]
    fn test_build_each_kind() {
        let rule = PolicyConfig::rule().build(Side::Opponent).unwrap();
        assert_eq!((rule.name(), rule.side()), ("rule", Side::Opponent));

        let mut config = PolicyConfig::q_learning();
        config.seed = Some(1);
        let learner = config.build(Side::Player).unwrap();
        assert_eq!((learner.name(), learner.side()), ("q-learning", Side::Player));
    }
}
