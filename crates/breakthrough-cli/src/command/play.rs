use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::Context as _;
use breakthrough_engine::Side;
use breakthrough_policy::session::Session;
use chrono::Utc;

use crate::{
    command::policy::PolicyArg,
    record::GameRecord,
    shell::{HumanInput, Shell},
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[clap(flatten)]
    policy: PolicyArg,
    /// Save the game record to a file when the game ends
    #[clap(long)]
    save_record: bool,
    /// Directory to save record files
    #[clap(long, default_value = "./data/records/")]
    record_dir: PathBuf,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        policy,
        save_record,
        record_dir,
    } = arg;

    let config = policy.to_config()?;
    let machine = config.build(Side::Opponent)?;
    let mut session = Session::new(None, Some(machine));
    let mut shell = Shell::new(io::stdin().lock(), io::stdout().lock());

    play_game(&mut session, &mut shell)?;

    if *save_record {
        let record = GameRecord::new(session.game(), config, Utc::now());
        let path = record.save(record_dir)?;
        eprintln!("Game record saved to {}", path.display());
    }
    Ok(())
}

/// Runs one human-versus-machine game to the end.
///
/// A move rejected by the engine for the machine is a fatal error.
fn play_game<R, W>(session: &mut Session, shell: &mut Shell<R, W>) -> anyhow::Result<()>
where
    R: BufRead,
    W: Write,
{
    shell.banner()?;
    while !session.game().is_finished() {
        shell.show_board(session.game())?;
        if session.is_machine_turn() {
            session
                .machine_move()
                .context("The machine could not make a legal move")?;
            shell.report_move(session.game())?;
            continue;
        }
        match shell.request_move(session.game())? {
            HumanInput::Exit => {
                tracing::info!("player forfeited");
                session.forfeit(Side::Player);
            }
            HumanInput::Move(mv) => match session.apply(mv) {
                Ok(_) => shell.report_move(session.game())?,
                Err(err) => shell.say(&format!("Invalid move: {err}. Try again."))?,
            },
        }
    }
    shell.report_outcome(session.game())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use breakthrough_engine::{Game, Move};
    use breakthrough_policy::{
        DecisionPolicy,
        config::PolicyConfig,
    };

    use super::*;

    fn learner() -> Box<dyn DecisionPolicy> {
        let mut config = PolicyConfig::q_learning();
        config.q_learning.exploration_rate = 0.0;
        config.build(Side::Opponent).unwrap()
    }

    fn run_game(session: &mut Session, input: &str) -> anyhow::Result<String> {
        let mut shell = Shell::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        play_game(session, &mut shell)?;
        Ok(String::from_utf8(shell.into_output()).unwrap())
    }

    #[derive(Debug)]
    struct Cheater;

    impl DecisionPolicy for Cheater {
        fn name(&self) -> &'static str {
            "cheater"
        }

        fn side(&self) -> Side {
            Side::Opponent
        }

        fn select(&mut self, _game: &Game, _legal_moves: &[Move]) -> Option<Move> {
            "a7-a1".parse().ok()
        }
    }

    #[test]
    fn test_exit_forfeits() {
        let mut session = Session::new(None, Some(learner()));
        let text = run_game(&mut session, "exit\n").unwrap();
        assert!(text.starts_with("Welcome to Breakthrough!"), "{text}");
        assert!(text.contains("Machine wins! (the other side forfeited)"), "{text}");
        assert_eq!(session.game().outcome().unwrap().winner(), Side::Opponent);
    }

    #[test]
    fn test_moves_alternate_with_machine() {
        let mut session = Session::new(None, Some(learner()));
        let text = run_game(&mut session, "b2\nb4\nexit\n").unwrap();
        assert!(text.contains("Player moved b2-b4"), "{text}");
        assert!(text.contains("En passant target: b3"), "{text}");
        assert!(text.contains("Machine moved a7-a6"), "{text}");
        assert!(text.contains("Player's turn (Turn 2)"), "{text}");
        assert_eq!(session.game().ply(), 2);
    }

    #[test]
    fn test_machine_illegal_move_is_fatal() {
        let machine: Box<dyn DecisionPolicy> = Box::new(Cheater);
        let mut session = Session::new(None, Some(machine));
        let err = run_game(&mut session, "a2\na3\n").unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("a7-a1"), "{message}");
        assert!(!session.game().is_finished());
    }
}
