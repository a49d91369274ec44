use std::{collections::BTreeMap, path::PathBuf};

use anyhow::Context as _;
use breakthrough_engine::{Outcome, Side};
use breakthrough_policy::session::Session;
use serde::Serialize;

use crate::{
    command::policy::{PolicyChoice, load_config},
    util,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SelfPlayArg {
    /// Number of games to play
    #[arg(long, default_value_t = 100)]
    games: usize,
    /// Policy for the side starting on ranks 1-2 (overrides the config file's kind)
    #[arg(long, value_enum, default_value_t = PolicyChoice::QLearning)]
    player: PolicyChoice,
    /// Policy for the side starting on ranks 7-8 (overrides the config file's kind)
    #[arg(long, value_enum, default_value_t = PolicyChoice::Rule)]
    opponent: PolicyChoice,
    /// Configuration file for the player-side policy (JSON)
    #[arg(long)]
    player_config: Option<PathBuf>,
    /// Configuration file for the opponent-side policy (JSON)
    #[arg(long)]
    opponent_config: Option<PathBuf>,
    /// Exploration seed; the opponent uses the next value
    #[arg(long)]
    seed: Option<u64>,
    /// Output file for the JSON summary (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
struct SelfPlaySummary {
    games: usize,
    player_policy: String,
    opponent_policy: String,
    player_wins: usize,
    opponent_wins: usize,
    /// Finished games per winner and reason
    results: BTreeMap<String, usize>,
    average_plies: f64,
    #[serde(skip)]
    total_plies: usize,
}

impl SelfPlaySummary {
    fn record(&mut self, outcome: Outcome, plies: usize) {
        self.games += 1;
        match outcome.winner() {
            Side::Player => self.player_wins += 1,
            Side::Opponent => self.opponent_wins += 1,
        }
        let key = format!("{}: {}", outcome.winner(), outcome.reason());
        *self.results.entry(key).or_default() += 1;
        self.total_plies += plies;
        #[expect(clippy::cast_precision_loss)]
        let average = self.total_plies as f64 / self.games as f64;
        self.average_plies = average;
    }
}

pub(crate) fn run(arg: &SelfPlayArg) -> anyhow::Result<()> {
    let SelfPlayArg {
        games,
        player,
        opponent,
        player_config,
        opponent_config,
        seed,
        output,
    } = arg;

    let mut player_config = load_config(Some(*player), player_config.as_deref())?;
    let mut opponent_config = load_config(Some(*opponent), opponent_config.as_deref())?;
    if let Some(seed) = seed {
        player_config.seed = Some(*seed);
        opponent_config.seed = Some(seed.wrapping_add(1));
    }
    let player = player_config
        .build(Side::Player)
        .context("Invalid player policy configuration")?;
    let opponent = opponent_config
        .build(Side::Opponent)
        .context("Invalid opponent policy configuration")?;

    let mut summary = SelfPlaySummary {
        player_policy: player.name().to_owned(),
        opponent_policy: opponent.name().to_owned(),
        ..SelfPlaySummary::default()
    };
    let mut session = Session::new(Some(player), Some(opponent));

    eprintln!(
        "Self-play: {} (player) vs {} (opponent), {games} games",
        summary.player_policy, summary.opponent_policy
    );
    for game_index in 0..*games {
        if game_index > 0 {
            session.restart();
        }
        let outcome = session
            .play_out(usize::MAX)
            .with_context(|| format!("Game #{game_index} aborted"))?
            .with_context(|| format!("Game #{game_index} did not finish"))?;
        let plies = session.game().ply();
        summary.record(outcome, plies);
        eprintln!("Game #{game_index}: {outcome} after {plies} plies");
    }

    eprintln!("Summary:");
    eprintln!("  Player wins:   {}", summary.player_wins);
    eprintln!("  Opponent wins: {}", summary.opponent_wins);
    for (result, count) in &summary.results {
        eprintln!("    {result}: {count}");
    }
    eprintln!("  Average plies: {:.1}", summary.average_plies);

    util::write_json_file("self-play summary", &summary, output.as_deref())
}

#[cfg(test)]
mod tests {
    use breakthrough_engine::Reason;

    use super::*;

    #[test]
    fn test_summary_counts() {
        let mut summary = SelfPlaySummary::default();
        summary.record(Outcome::new(Side::Player, Reason::ReachedFarRank), 30);
        summary.record(Outcome::new(Side::Opponent, Reason::Eliminated), 40);
        summary.record(Outcome::new(Side::Player, Reason::ReachedFarRank), 20);

        assert_eq!(summary.games, 3);
        assert_eq!((summary.player_wins, summary.opponent_wins), (2, 1));
        assert_eq!(summary.results["Player: a pawn reached the far rank"], 2);
        assert_eq!(summary.results["Opponent: no opposing pawns are left"], 1);
        assert!((summary.average_plies - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_run_writes_summary() {
        let path = std::env::temp_dir()
            .join(format!("breakthrough-self-play-{}.json", std::process::id()));
        let arg = SelfPlayArg {
            games: 3,
            player: PolicyChoice::QLearning,
            opponent: PolicyChoice::Rule,
            player_config: None,
            opponent_config: None,
            seed: Some(11),
            output: Some(path.clone()),
        };
        run(&arg).unwrap();

        let summary: serde_json::Value = util::read_json_file("self-play summary", &path).unwrap();
        assert_eq!(summary["games"], 3);
        assert_eq!(summary["player_policy"], "q-learning");
        assert_eq!(summary["opponent_policy"], "rule");
        let wins = summary["player_wins"].as_u64().unwrap()
            + summary["opponent_wins"].as_u64().unwrap();
        assert_eq!(wins, 3);
        std::fs::remove_file(&path).unwrap();
    }
}
