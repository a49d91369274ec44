use std::fmt;

use super::{board::Cell, position::Position, square::Square};
use crate::Side;

const CELL_BYTES: usize = 16;
const NO_EN_PASSANT: u8 = u8::MAX;

/// Fixed-size key identifying a position in learned value tables.
///
/// Layout (18 bytes):
///
/// - bytes `0..16`: the 64 cells at two bits each, row-major from `a1`
///   (`00` empty, `01` player pawn, `10` opponent pawn)
/// - byte `16`: side to move (`0` player, `1` opponent)
/// - byte `17`: index of the en-passant target square, or `0xFF` if none
///
/// Two fingerprints are equal iff the positions agree on all 64 cells, the side
/// to move and the en-passant target. Move counters are not part of the key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateFingerprint([u8; CELL_BYTES + 2]);

impl StateFingerprint {
    #[must_use]
    pub fn of(position: &Position) -> Self {
        let mut bytes = [0; CELL_BYTES + 2];
        for (square, cell) in position.board().cells() {
            let code = match cell {
                Cell::Empty => 0b00,
                Cell::Pawn(Side::Player) => 0b01,
                Cell::Pawn(Side::Opponent) => 0b10,
            };
            let index = square.index();
            bytes[index / 4] |= code << ((index % 4) * 2);
        }
        bytes[CELL_BYTES] = match position.side_to_move() {
            Side::Player => 0,
            Side::Opponent => 1,
        };
        bytes[CELL_BYTES + 1] = position
            .en_passant_target()
            .map_or(NO_EN_PASSANT, |square| {
                u8::try_from(square.index()).unwrap_or(NO_EN_PASSANT)
            });
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Decodes the cell stored for `square`.
    #[must_use]
    pub fn cell(&self, square: Square) -> Cell {
        let index = square.index();
        match (self.0[index / 4] >> ((index % 4) * 2)) & 0b11 {
            0b01 => Cell::Pawn(Side::Player),
            0b10 => Cell::Pawn(Side::Opponent),
            _ => Cell::Empty,
        }
    }
}

impl fmt::Debug for StateFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StateFingerprint(")?;
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        f.write_str(")")
    }
}
