//! Board data: squares, moves, cells, positions and state fingerprints.
//!
//! Nothing in this module knows the movement rules except [`Position`], which
//! delegates legality to [`crate::engine::rules`].

pub use self::{board::*, fingerprint::*, moves::*, position::*, side::*, square::*};

pub(crate) mod board;
pub(crate) mod fingerprint;
pub(crate) mod moves;
pub(crate) mod position;
pub(crate) mod side;
pub(crate) mod square;
