use serde::{Deserialize, Serialize};

/// One of the two sides of a game.
///
/// The [`Player`](Side::Player) starts on ranks 1–2 and advances toward rank 8.
/// The [`Opponent`](Side::Opponent) starts on ranks 7–8 and advances toward rank 1.
///
/// Ownership of a pawn is always an explicit `Side` tag; nothing is inferred from
/// how a pawn is drawn.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Player, Side::Opponent];

    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }

    /// Rank step of a forward move: `+1` for the player, `-1` for the opponent.
    #[must_use]
    pub const fn forward(self) -> i8 {
        match self {
            Side::Player => 1,
            Side::Opponent => -1,
        }
    }

    /// Back rank of the initial layout (0-indexed).
    #[must_use]
    pub const fn home_rank(self) -> u8 {
        match self {
            Side::Player => 0,
            Side::Opponent => 7,
        }
    }

    /// Front rank of the initial layout, the only rank a two-square advance may start from.
    #[must_use]
    pub const fn starting_rank(self) -> u8 {
        match self {
            Side::Player => 1,
            Side::Opponent => 6,
        }
    }

    /// Rank this side must reach to win, i.e. the other side's home rank.
    #[must_use]
    pub const fn far_rank(self) -> u8 {
        self.opponent().home_rank()
    }

    /// Number of forward steps between `rank` and this side's home rank.
    #[must_use]
    pub const fn distance_from_home(self, rank: u8) -> u8 {
        self.home_rank().abs_diff(rank)
    }
}
