use alloc::string::String;

use crate::*;

/// Render hooks the session drives. Implementations only display; they never call back into the session.
pub trait Surface {
    fn render_grid(&mut self, grid: &Grid);

    fn render_level(&mut self, level: Level);

    /// `None` clears the countdown label.
    fn render_timer(&mut self, remaining: Option<Seconds>);

    /// Marks the odd cell and de-emphasizes every other cell for the reveal delay.
    fn render_reveal(&mut self, odd_index: CellIndex);

    fn render_game_over(&mut self, player_name: &str, level: Level);

    fn render_leaderboard(&mut self, snapshot: &LeaderboardSnapshot);

    fn set_start_control_visible(&mut self, visible: bool);
}

/// Events a surface forwards to the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiEvent {
    /// Raw contents of the name input.
    StartClicked(String),
    RestartClicked,
    CellClicked(CellIndex),
}
