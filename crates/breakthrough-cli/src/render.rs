//! Plain-text rendering of boards, histories and outcomes.

use std::fmt::Write as _;

use breakthrough_engine::{BOARD_SIZE, Board, Cell, Game, MoveHistory, Side};

const FILE_LABELS: &str = "  a b c d e f g h";

/// Draws the board with rank 8 at the top.
///
/// `P` marks player pawns, `p` opponent pawns and `.` empty squares.
pub fn board(board: &Board) -> String {
    let mut out = String::new();
    out.push_str(FILE_LABELS);
    out.push('\n');
    for (row, label) in board.rows().rev().zip((1..=BOARD_SIZE).rev()) {
        let _ = write!(out, "{label}");
        for cell in row {
            out.push(' ');
            out.push(cell_char(*cell));
        }
        let _ = writeln!(out, " {label}");
    }
    out.push_str(FILE_LABELS);
    out
}

fn cell_char(cell: Cell) -> char {
    match cell {
        Cell::Empty => '.',
        Cell::Pawn(Side::Player) => 'P',
        Cell::Pawn(Side::Opponent) => 'p',
    }
}

/// Comma-separated moves, or `(none)`.
pub fn history(history: &MoveHistory) -> String {
    if history.is_empty() {
        return "(none)".to_owned();
    }
    history
        .iter()
        .map(|mv| mv.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Human-facing name of a side.
pub fn side_name(side: Side) -> &'static str {
    match side {
        Side::Player => "Player",
        Side::Opponent => "Machine",
    }
}

/// End-of-game report: winner and reason, both histories and the final board.
///
/// Returns `None` while the game is still running.
pub fn outcome_report(game: &Game) -> Option<String> {
    let outcome = game.outcome()?;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} wins! ({})",
        side_name(outcome.winner()),
        outcome.reason()
    );
    for side in Side::ALL {
        let _ = writeln!(out, "{} moves: {}", side_name(side), history(game.history(side)));
    }
    out.push_str(&board(game.board()));
    Some(out)
}
