//! Recording doubles for the host and the surface.

use alloc::{rc::Rc, string::String, vec::Vec};
use core::cell::Cell;

use crate::*;

/// Counts itself live until dropped, like a browser timer handle.
#[derive(Debug)]
pub(crate) struct TestHandle(Rc<Cell<usize>>);

impl TestHandle {
    fn new(live: &Rc<Cell<usize>>) -> Self {
        live.set(live.get() + 1);
        Self(Rc::clone(live))
    }
}

impl Drop for TestHandle {
    fn drop(&mut self) {
        self.0.set(self.0.get() - 1);
    }
}

#[derive(Debug, Default)]
pub(crate) struct TestHost {
    pub started_epochs: Vec<TimerEpoch>,
    pub reveals: Vec<(RunId, u32)>,
    pub published: Vec<(LeaderboardRequest, ScoreRecord)>,
    pub fetches: Vec<LeaderboardRequest>,
    live_intervals: Rc<Cell<usize>>,
    live_timeouts: Rc<Cell<usize>>,
}

impl TestHost {
    pub fn live_intervals(&self) -> usize {
        self.live_intervals.get()
    }

    pub fn live_timeouts(&self) -> usize {
        self.live_timeouts.get()
    }

    pub fn published_records(&self) -> Vec<ScoreRecord> {
        self.published.iter().map(|(_, record)| record.clone()).collect()
    }
}

impl TickSource for TestHost {
    type Handle = TestHandle;

    fn every_second(&mut self, epoch: TimerEpoch) -> Self::Handle {
        self.started_epochs.push(epoch);
        TestHandle::new(&self.live_intervals)
    }
}

impl Host for TestHost {
    type Timeout = TestHandle;

    fn schedule_reveal_end(&mut self, run: RunId, millis: u32) -> Self::Timeout {
        self.reveals.push((run, millis));
        TestHandle::new(&self.live_timeouts)
    }

    fn publish_score(&mut self, request: LeaderboardRequest, record: ScoreRecord) {
        self.published.push((request, record));
    }

    fn fetch_leaderboard(&mut self, request: LeaderboardRequest) {
        self.fetches.push(request);
    }
}

#[derive(Debug, Default)]
pub(crate) struct RecordingSurface {
    pub grids: Vec<GridSpec>,
    pub levels: Vec<Level>,
    pub timers: Vec<Option<Seconds>>,
    pub reveals: Vec<CellIndex>,
    pub game_over: Vec<(String, Level)>,
    pub leaderboards: Vec<LeaderboardSnapshot>,
    pub start_visible: Option<bool>,
}

impl Surface for RecordingSurface {
    fn render_grid(&mut self, grid: &Grid) {
        self.grids.push(grid.spec());
    }

    fn render_level(&mut self, level: Level) {
        self.levels.push(level);
    }

    fn render_timer(&mut self, remaining: Option<Seconds>) {
        self.timers.push(remaining);
    }

    fn render_reveal(&mut self, odd_index: CellIndex) {
        self.reveals.push(odd_index);
    }

    fn render_game_over(&mut self, player_name: &str, level: Level) {
        self.game_over.push((player_name.into(), level));
    }

    fn render_leaderboard(&mut self, snapshot: &LeaderboardSnapshot) {
        self.leaderboards.push(snapshot.clone());
    }

    fn set_start_control_visible(&mut self, visible: bool) {
        self.start_visible = Some(visible);
    }
}
