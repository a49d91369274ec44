use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ParseSquareError;

/// Number of files and of ranks on the board.
pub const BOARD_SIZE: usize = 8;

/// A square on the 8×8 board.
///
/// Files `a`–`h` map to 0–7 and ranks `1`–`8` map to 0–7. The conversion between
/// labels and coordinates is total and inverse-consistent for all 64 squares.
///
/// Squares order rank-major, file-minor, which is the scan order used by the
/// move generator.
///
/// # Example
///
/// ```
/// use breakthrough_engine::Square;
///
/// let square: Square = "C2".parse().unwrap();
/// assert_eq!(square.coordinates(), (2, 1));
/// assert_eq!(square.to_string(), "c2");
/// assert_eq!(Square::from_coordinates(2, 1), Some(square));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    // Field order drives the derived `Ord`.
    rank: u8,
    file: u8,
}

impl Square {
    /// Creates a square from 0-indexed `(file, rank)` coordinates.
    ///
    /// Returns `None` if either coordinate is off the board.
    #[must_use]
    pub const fn from_coordinates(file: u8, rank: u8) -> Option<Self> {
        if (file as usize) < BOARD_SIZE && (rank as usize) < BOARD_SIZE {
            Some(Self { rank, file })
        } else {
            None
        }
    }

    /// Returns the 0-indexed `(file, rank)` coordinates.
    #[must_use]
    pub const fn coordinates(self) -> (u8, u8) {
        (self.file, self.rank)
    }

    #[must_use]
    pub const fn file(self) -> u8 {
        self.file
    }

    #[must_use]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    /// Row-major index in `0..64`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.rank as usize * BOARD_SIZE + self.file as usize
    }

    /// Returns the square shifted by the given file and rank deltas, if it stays on the board.
    #[must_use]
    pub const fn offset(self, file_delta: i8, rank_delta: i8) -> Option<Self> {
        let Some(file) = self.file.checked_add_signed(file_delta) else {
            return None;
        };
        let Some(rank) = self.rank.checked_add_signed(rank_delta) else {
            return None;
        };
        Self::from_coordinates(file, rank)
    }

    /// Iterates over all 64 squares in scan order (rank 1 to 8, file `a` to `h`).
    pub fn all() -> impl DoubleEndedIterator<Item = Square> {
        (0..BOARD_SIZE as u8)
            .flat_map(|rank| (0..BOARD_SIZE as u8).map(move |file| Square { rank, file }))
    }

    #[must_use]
    pub const fn file_char(self) -> char {
        (b'a' + self.file) as char
    }

    #[must_use]
    pub const fn rank_char(self) -> char {
        (b'1' + self.rank) as char
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(ParseSquareError::Length {
                label: s.to_owned(),
            });
        };
        let file_index = match file.to_ascii_lowercase() {
            c @ 'a'..='h' => c as u8 - b'a',
            _ => return Err(ParseSquareError::File { file }),
        };
        let rank_index = match rank {
            c @ '1'..='8' => c as u8 - b'1',
            _ => return Err(ParseSquareError::Rank { rank }),
        };
        Ok(Self {
            rank: rank_index,
            file: file_index,
        })
    }
}

impl Serialize for Square {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Square {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        label
            .parse()
            .map_err(|e| serde::de::Error::custom(format!("invalid square {label:?} ({e})")))
    }
}
