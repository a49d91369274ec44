use std::path::{Path, PathBuf};

use anyhow::Context as _;
use breakthrough_policy::config::{PolicyConfig, PolicyKind};

use crate::util;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum PolicyChoice {
    /// Strategy-table rules
    #[default]
    Rule,
    /// Tabular Q-learning
    QLearning,
}

impl From<PolicyChoice> for PolicyKind {
    fn from(choice: PolicyChoice) -> Self {
        match choice {
            PolicyChoice::Rule => PolicyKind::Rule,
            PolicyChoice::QLearning => PolicyKind::QLearning,
        }
    }
}

/// Options shared by every command that builds a single machine policy.
///
/// Values given on the command line override the configuration file.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PolicyArg {
    /// Policy that chooses the machine's moves [default: rule, or the config file's kind]
    #[arg(long, value_enum)]
    policy: Option<PolicyChoice>,
    /// Policy configuration file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Q-learning learning rate (α)
    #[arg(long)]
    learning_rate: Option<f64>,
    /// Q-learning discount factor (γ)
    #[arg(long)]
    discount: Option<f64>,
    /// Probability of a random exploratory move
    #[arg(long)]
    exploration_rate: Option<f64>,
    /// Seed for exploration
    #[arg(long)]
    seed: Option<u64>,
    /// Maximum number of learned values to keep
    #[arg(long)]
    value_table_limit: Option<usize>,
}

impl PolicyArg {
    pub(crate) fn to_config(&self) -> anyhow::Result<PolicyConfig> {
        let Self {
            policy,
            config,
            learning_rate,
            discount,
            exploration_rate,
            seed,
            value_table_limit,
        } = self;

        let mut config = load_config(*policy, config.as_deref())?;
        let params = &mut config.q_learning;
        for (slot, value) in [
            (&mut params.learning_rate, learning_rate),
            (&mut params.discount, discount),
            (&mut params.exploration_rate, exploration_rate),
        ] {
            if let Some(value) = value {
                *slot = *value;
            }
        }
        if seed.is_some() {
            config.seed = *seed;
        }
        if value_table_limit.is_some() {
            config.value_table_limit = *value_table_limit;
        }
        config.validate().context("Invalid policy configuration")?;
        Ok(config)
    }
}

/// Reads `path` if given (defaults otherwise) and applies `kind` on top.
pub(crate) fn load_config(
    kind: Option<PolicyChoice>,
    path: Option<&Path>,
) -> anyhow::Result<PolicyConfig> {
    let mut config = match path {
        Some(path) => util::read_json_file::<PolicyConfig, _>("policy config", path)?,
        None => PolicyConfig::default(),
    };
    if let Some(kind) = kind {
        config.kind = kind.into();
    }
    Ok(config)
}
