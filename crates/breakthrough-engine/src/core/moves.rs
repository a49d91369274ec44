use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{ParseMoveError, Square};

/// A pawn move from one square to another.
///
/// There are no piece types, promotions or drops, so the two squares describe a
/// move completely. A `Move` says nothing about legality; see
/// [`Position::is_legal`](crate::Position::is_legal).
///
/// The text form is `from-to` (for example `b2-b4`). Parsing also accepts the
/// two labels without a separator or separated by whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    from: Square,
    to: Square,
}

impl Move {
    #[must_use]
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    #[must_use]
    pub const fn from(self) -> Square {
        self.from
    }

    #[must_use]
    pub const fn to(self) -> Square {
        self.to
    }

    /// Signed file difference, `to - from`.
    #[must_use]
    pub fn file_delta(self) -> i8 {
        signed_delta(self.from.file(), self.to.file())
    }

    /// Signed rank difference, `to - from`.
    #[must_use]
    pub fn rank_delta(self) -> i8 {
        signed_delta(self.from.rank(), self.to.rank())
    }

    /// Whether the move changes file (a capture or an en-passant capture when legal).
    #[must_use]
    pub fn is_diagonal(self) -> bool {
        self.file_delta() != 0
    }
}

fn signed_delta(from: u8, to: u8) -> i8 {
    // Both operands are below 8, so the difference always fits.
    i8::try_from(i16::from(to) - i16::from(from)).unwrap_or_default()
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format_error = || ParseMoveError::Format { text: s.to_owned() };
        let compact: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect();
        if compact.chars().count() != 4 || !compact.is_ascii() {
            return Err(format_error());
        }
        let (from, to) = compact.split_at(2);
        let parse = |label: &str| {
            label
                .parse::<Square>()
                .map_err(|source| ParseMoveError::Square { source })
        };
        Ok(Self::new(parse(from)?, parse(to)?))
    }
}

impl Serialize for Move {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Move {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse()
            .map_err(|e| serde::de::Error::custom(format!("invalid move {text:?} ({e})")))
    }
}
