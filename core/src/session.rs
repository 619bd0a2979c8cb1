use alloc::string::String;
use rand::{RngCore, SeedableRng, rngs::SmallRng};
use serde::{Deserialize, Serialize};

use crate::*;

/// Seconds on the clock for every grid.
pub const ROUND_SECONDS: Seconds = 10;

/// Length of the reveal effect before a run ends.
pub const REVEAL_MILLIS: u32 = 1_000;

/// Platform services the session schedules work on. Everything it starts reports back through the session's
/// `on_*` methods on the same thread.
pub trait Host: TickSource {
    /// Pending one-shot callback; dropping it must cancel the callback.
    type Timeout;

    /// Arranges for `on_reveal_finished(run)` after `millis`.
    fn schedule_reveal_end(&mut self, run: RunId, millis: u32) -> Self::Timeout;

    /// Submits the record, then fetches the top scores, and reports the fetch through `on_leaderboard(request, ..)`.
    fn publish_score(&mut self, request: LeaderboardRequest, record: ScoreRecord);

    /// Fetches the top scores without submitting, and reports through `on_leaderboard(request, ..)`.
    fn fetch_leaderboard(&mut self, request: LeaderboardRequest);
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    NotStarted,
    Active,
    /// The odd cell is being shown; the run is over but not yet recorded.
    Revealing,
    Ended,
}

impl SessionState {
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    pub const fn is_ended(self) -> bool {
        matches!(self, Self::Ended)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    pub player_name: String,
    pub level: Level,
    pub time_left: Seconds,
    pub status: SessionState,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Not in an active run.
    Ignored,
    /// Found the odd cell; the new level.
    Advanced(Level),
    /// Picked a wrong cell; the reveal has started.
    Missed,
}

/// One page's game. Owns the level, the current grid, the countdown and every pending callback.
pub struct GameSession<H: Host> {
    host: H,
    rng: SmallRng,
    run: RunState,
    run_id: RunId,
    grid: Option<Grid>,
    timer: CountdownTimer<H::Handle>,
    reveal: Option<H::Timeout>,
    last_snapshot: Option<LeaderboardSnapshot>,
    leaderboard_requested: LeaderboardRequest,
    leaderboard_applied: Option<LeaderboardRequest>,
}

impl<H: Host> GameSession<H> {
    pub fn new(host: H, seed: u64) -> Self {
        Self {
            host,
            rng: SmallRng::seed_from_u64(seed),
            run: RunState::default(),
            run_id: RunId::default(),
            grid: None,
            timer: CountdownTimer::new(),
            reveal: None,
            last_snapshot: None,
            leaderboard_requested: LeaderboardRequest::default(),
            leaderboard_applied: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.run.status
    }

    pub fn level(&self) -> Level {
        self.run.level
    }

    pub fn player_name(&self) -> &str {
        &self.run.player_name
    }

    pub fn run_state(&self) -> &RunState {
        &self.run
    }

    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    pub fn timer_state(&self) -> TimerState {
        self.timer.state()
    }

    pub fn last_snapshot(&self) -> Option<&LeaderboardSnapshot> {
        self.last_snapshot.as_ref()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn handle<S: Surface + ?Sized>(&mut self, event: UiEvent, surface: &mut S) -> Result<()> {
        use UiEvent::*;

        match event {
            StartClicked(name) => self.begin_game(&name, surface),
            RestartClicked => {
                self.restart_game(surface);
                Ok(())
            }
            CellClicked(index) => self.select_cell(index, surface).map(|_| ()),
        }
    }

    /// Starts a fresh run for `player_name`. A blank name is rejected without touching the session.
    pub fn begin_game<S: Surface + ?Sized>(&mut self, player_name: &str, surface: &mut S) -> Result<()> {
        let player_name = player_name.trim();
        if player_name.is_empty() {
            log::debug!("rejected blank player name");
            return Err(GameError::EmptyPlayerName);
        }

        self.run.player_name = player_name.into();
        self.start_run(surface);
        Ok(())
    }

    /// Starts a new run with the stored name. Only valid once a run has ended; returns whether it restarted.
    pub fn restart_game<S: Surface + ?Sized>(&mut self, surface: &mut S) -> bool {
        if !self.run.status.is_ended() {
            log::debug!("ignoring restart while {:?}", self.run.status);
            return false;
        }

        self.start_run(surface);
        true
    }

    pub fn select_cell<S: Surface + ?Sized>(&mut self, index: CellIndex, surface: &mut S) -> Result<SelectOutcome> {
        if !self.run.status.is_active() {
            log::trace!("ignoring cell {} while {:?}", index, self.run.status);
            return Ok(SelectOutcome::Ignored);
        }
        let Some(grid) = &self.grid else {
            return Ok(SelectOutcome::Ignored);
        };

        let cell = grid.cell(index).ok_or(GameError::InvalidCell)?;
        if cell.is_odd {
            self.timer.cancel();
            self.run.level += 1;
            log::debug!("found odd cell {}, advancing to level {}", index, self.run.level);
            surface.render_level(self.run.level);
            self.next_grid(surface);
            Ok(SelectOutcome::Advanced(self.run.level))
        } else {
            log::debug!("missed: picked {}, odd was {}", index, grid.odd_index());
            self.begin_reveal(surface);
            Ok(SelectOutcome::Missed)
        }
    }

    pub fn on_timer_tick<S: Surface + ?Sized>(&mut self, epoch: TimerEpoch, surface: &mut S) {
        let Some(tick) = self.timer.on_tick(epoch) else {
            return;
        };

        self.run.time_left = tick.remaining;
        surface.render_timer(Some(tick.remaining));
        if tick.expired {
            self.on_timer_expire(surface);
        }
    }

    /// Time ran out on the current grid; ends the run the same way a wrong pick does.
    pub fn on_timer_expire<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        if !self.run.status.is_active() {
            return;
        }
        log::debug!("time is up at level {}", self.run.level);
        self.begin_reveal(surface);
    }

    pub fn on_reveal_finished<S: Surface + ?Sized>(&mut self, run: RunId, surface: &mut S) {
        if self.run.status != SessionState::Revealing || run != self.run_id {
            log::trace!("dropping stale reveal end for {:?}", run);
            return;
        }

        self.reveal = None;
        self.end_run(surface);
    }

    /// Shows the fetched snapshot, or the last good one when the store could not be reached. Responses to requests
    /// older than the last applied one are dropped.
    pub fn on_leaderboard<S: Surface + ?Sized>(
        &mut self,
        request: LeaderboardRequest,
        result: core::result::Result<LeaderboardSnapshot, GatewayError>,
        surface: &mut S,
    ) {
        if self.leaderboard_applied.is_some_and(|applied| request <= applied) {
            log::debug!("dropping stale leaderboard response for {:?}", request);
            return;
        }
        self.leaderboard_applied = Some(request);

        match result {
            Ok(snapshot) => {
                log::debug!("leaderboard has {} entries", snapshot.len());
                surface.render_leaderboard(&snapshot);
                self.last_snapshot = Some(snapshot);
            }
            Err(err) => {
                log::error!("Error loading leaderboard: {}", err);
                if let Some(snapshot) = &self.last_snapshot {
                    surface.render_leaderboard(snapshot);
                }
            }
        }
    }

    pub fn refresh_leaderboard(&mut self) -> LeaderboardRequest {
        let request = self.next_leaderboard_request();
        self.host.fetch_leaderboard(request);
        request
    }

    fn next_leaderboard_request(&mut self) -> LeaderboardRequest {
        self.leaderboard_requested = self.leaderboard_requested.next();
        self.leaderboard_requested
    }

    fn start_run<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.timer.cancel();
        self.reveal = None;
        self.run_id = self.run_id.next();
        self.run.level = 1;
        self.run.status = SessionState::Active;
        log::info!("run {:?} started for {}", self.run_id, self.run.player_name);

        surface.set_start_control_visible(false);
        surface.render_level(self.run.level);
        self.next_grid(surface);
    }

    fn next_grid<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        let spec = GridSpec::for_level(self.run.level);
        let grid = RandomGridGenerator::new(self.rng.next_u64()).generate(spec);
        surface.render_grid(&grid);
        self.grid = Some(grid);

        self.timer.start(ROUND_SECONDS, &mut self.host);
        self.run.time_left = ROUND_SECONDS;
        surface.render_timer(Some(ROUND_SECONDS));
    }

    fn begin_reveal<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.timer.cancel();
        self.run.status = SessionState::Revealing;
        if let Some(grid) = &self.grid {
            surface.render_reveal(grid.odd_index());
        }
        self.reveal = Some(self.host.schedule_reveal_end(self.run_id, REVEAL_MILLIS));
    }

    fn end_run<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.run.status = SessionState::Ended;
        self.run.time_left = 0;
        self.grid = None;
        log::info!("{} reached level {}", self.run.player_name, self.run.level);

        surface.render_timer(None);
        surface.render_game_over(&self.run.player_name, self.run.level);
        surface.set_start_control_visible(true);
        if let Some(snapshot) = &self.last_snapshot {
            surface.render_leaderboard(snapshot);
        }

        let record = ScoreRecord::new(self.run.player_name.clone(), self.run.level);
        let request = self.next_leaderboard_request();
        self.host.publish_score(request, record);
    }
}
