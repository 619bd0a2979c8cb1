//! Game logic for oddtile: find the one cell whose color is slightly off before the countdown runs out.

#![no_std]

extern crate alloc;

pub use color::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use leaderboard::*;
pub use session::*;
pub use surface::*;
pub use timer::*;
pub use types::*;

mod color;
mod error;
mod generator;
mod grid;
mod leaderboard;
mod session;
mod surface;
mod timer;
mod types;

#[cfg(test)]
mod testing;
