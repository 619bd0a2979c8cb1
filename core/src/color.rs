use core::fmt;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::ColorDelta;

/// Exclusive upper bound for each channel of a random base color. Keeps room for the upward adjustment.
pub const BASE_CHANNEL_LIMIT: u8 = 200;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Each channel independently uniform in `[0, BASE_CHANNEL_LIMIT)`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(
            rng.random_range(0..BASE_CHANNEL_LIMIT),
            rng.random_range(0..BASE_CHANNEL_LIMIT),
            rng.random_range(0..BASE_CHANNEL_LIMIT),
        )
    }

    /// Adds `delta` to every channel, clamping to `[0, 255]`.
    pub fn adjust(self, delta: ColorDelta) -> Self {
        let delta = i32::from(delta);
        Self::new(
            clamp_channel(i32::from(self.r) + delta),
            clamp_channel(i32::from(self.g) + delta),
            clamp_channel(i32::from(self.b) + delta),
        )
    }
}

fn clamp_channel(value: i32) -> u8 {
    value.clamp(0, u8::MAX.into()) as u8
}

/// CSS notation, e.g. `rgb(12, 34, 56)`.
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}
