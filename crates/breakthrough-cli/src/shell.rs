//! Terminal interaction with the human player.

use std::io::{BufRead, Write};

use anyhow::Context as _;
use breakthrough_engine::{Cell, Game, Move, Side, Square};

use crate::render;

/// What the human asked for at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HumanInput {
    Move(Move),
    /// `exit` at the "from" prompt, or end of input.
    Exit,
}

#[derive(Debug)]
pub struct Shell<R, W> {
    input: R,
    output: W,
}

impl<R, W> Shell<R, W>
where
    R: BufRead,
    W: Write,
{
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    pub fn banner(&mut self) -> anyhow::Result<()> {
        writeln!(self.output, "Welcome to Breakthrough!")?;
        writeln!(
            self.output,
            "You play the P pawns (ranks 1-2) and move up the board; the machine plays p."
        )?;
        writeln!(
            self.output,
            "Reach rank 8 or capture every machine pawn to win. Type `exit` to give up."
        )?;
        Ok(())
    }

    pub fn say(&mut self, message: &str) -> anyhow::Result<()> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    pub fn show_board(&mut self, game: &Game) -> anyhow::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", render::board(game.board()))?;
        Ok(())
    }

    /// Asks for a player move until a legal one is entered.
    pub fn request_move(&mut self, game: &Game) -> anyhow::Result<HumanInput> {
        writeln!(self.output, "Player's turn (Turn {})", game.turn())?;
        loop {
            let Some(from) = self.prompt("Move from (e.g. b2): ")? else {
                return Ok(HumanInput::Exit);
            };
            if from.eq_ignore_ascii_case("exit") {
                return Ok(HumanInput::Exit);
            }
            let Some(from) = self.parse_square(&from)? else {
                continue;
            };
            match game.board().get(from) {
                Cell::Pawn(Side::Player) => {}
                Cell::Pawn(Side::Opponent) => {
                    self.say("That pawn belongs to the machine. Try again.")?;
                    continue;
                }
                Cell::Empty => {
                    self.say("No piece at that square. Try again.")?;
                    continue;
                }
            }

            let Some(to) = self.prompt("Move to: ")? else {
                return Ok(HumanInput::Exit);
            };
            let Some(to) = self.parse_square(&to)? else {
                continue;
            };
            let mv = Move::new(from, to);
            if game.is_legal(mv) {
                return Ok(HumanInput::Move(mv));
            }
            self.say("Invalid move. Try again.")?;
        }
    }

    /// Describes the move just played: the move, en-passant captures, the
    /// mover's history and the current en-passant target.
    pub fn report_move(&mut self, game: &Game) -> anyhow::Result<()> {
        let Some(record) = game.last_move() else {
            return Ok(());
        };
        let mover = render::side_name(record.mover());
        writeln!(self.output, "{mover} moved {}", record.mv())?;
        if record.is_en_passant()
            && let Some(captured) = record.captured()
        {
            writeln!(self.output, "En passant! {mover} captured the pawn on {captured}.")?;
        }
        writeln!(
            self.output,
            "{mover} moves: {}",
            render::history(game.history(record.mover()))
        )?;
        if let Some(target) = game.en_passant_target() {
            writeln!(self.output, "En passant target: {target}")?;
        }
        Ok(())
    }

    pub fn report_outcome(&mut self, game: &Game) -> anyhow::Result<()> {
        if let Some(report) = render::outcome_report(game) {
            writeln!(self.output)?;
            writeln!(self.output, "{report}")?;
        }
        self.output.flush()?;
        Ok(())
    }

    /// Prints `prompt` and reads one trimmed line; `None` at end of input.
    fn prompt(&mut self, prompt: &str) -> anyhow::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read player input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_owned()))
    }

    fn parse_square(&mut self, text: &str) -> anyhow::Result<Option<Square>> {
        match text.parse() {
            Ok(square) => Ok(Some(square)),
            Err(err) => {
                self.say(&format!("Invalid square: {err}. Try again."))?;
                Ok(None)
            }
        }
    }
}
