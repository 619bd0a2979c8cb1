use serde::{Deserialize, Serialize};

/// Difficulty counter of a run, starting at 1.
pub type Level = u32;

/// Single coordinate axis, also used for the grid dimension.
pub type Coord = u8;

/// Linear cell index in `[0, dimension²)`, row-major.
pub type CellIndex = u16;

/// Whole seconds left on the countdown.
pub type Seconds = u32;

/// Pixel length of a rendered cell side.
pub type Pixels = u16;

/// Signed amount added to every channel of the base color.
pub type ColorDelta = i16;

/// Identifies one start of the countdown timer. Ticks carry the epoch they were scheduled for.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimerEpoch(u32);

impl TimerEpoch {
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Identifies one run, from `begin_game` to its end.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RunId(u32);

impl RunId {
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Identifies one leaderboard request. Responses are applied only if newer than the last one applied.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LeaderboardRequest(u32);

impl LeaderboardRequest {
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self, dimension: Coord) -> Self::Output;
}

impl ToNdIndex for CellIndex {
    type Output = [usize; 2];

    fn to_nd_index(self, dimension: Coord) -> Self::Output {
        let index = usize::from(self);
        let dimension = usize::from(dimension);
        [index / dimension, index % dimension]
    }
}

pub const fn cell_count(dimension: Coord) -> CellIndex {
    let dimension = dimension as CellIndex;
    dimension.saturating_mul(dimension)
}
