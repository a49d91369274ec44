use std::path::{Path, PathBuf};

use breakthrough_engine::{Game, MoveHistory, Outcome, Side};
use breakthrough_policy::config::PolicyConfig;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::util;

/// A finished (or abandoned) game as written by `play --save-record`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    /// When the record was written
    pub recorded_at: DateTime<Utc>,
    /// Configuration of the machine's policy
    pub machine: PolicyConfig,
    /// Turn counter at the end of the game
    pub turns: usize,
    pub player_moves: MoveHistory,
    pub opponent_moves: MoveHistory,
    /// `None` if the game was not finished
    pub outcome: Option<Outcome>,
}

impl GameRecord {
    pub fn new(game: &Game, machine: PolicyConfig, recorded_at: DateTime<Utc>) -> Self {
        Self {
            recorded_at,
            machine,
            turns: game.turn(),
            player_moves: game.history(Side::Player).clone(),
            opponent_moves: game.history(Side::Opponent).clone(),
            outcome: game.outcome(),
        }
    }

    /// Writes the record to `record_dir` as `{policy}_{YYYYMMDD_HHMMSS}.json`.
    ///
    /// The directory is created if it does not exist. Returns the written path.
    pub fn save(&self, record_dir: &Path) -> anyhow::Result<PathBuf> {
        let filename = format!(
            "{}_{}.json",
            self.machine.kind,
            self.recorded_at.format("%Y%m%d_%H%M%S")
        );
        let path = record_dir.join(filename);
        util::write_json_file("game record", self, Some(&path))?;
        tracing::info!(path = %path.display(), "game record saved");
        Ok(path)
    }
}
