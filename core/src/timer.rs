use serde::{Deserialize, Serialize};

use crate::*;

/// Schedules a repeating once-per-second callback for a timer epoch. Dropping the returned handle must stop it.
pub trait TickSource {
    type Handle;

    fn every_second(&mut self, epoch: TimerEpoch) -> Self::Handle;
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerState {
    #[default]
    Idle,
    Running,
    Expired,
}

/// One delivered second. `expired` is set on the tick that reaches zero, and only on that one.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Tick {
    pub remaining: Seconds,
    pub expired: bool,
}

/// Single-shot countdown. At most one schedule is live; every start bumps the epoch so ticks scheduled by an
/// earlier start are recognized and dropped.
#[derive(Debug)]
pub struct CountdownTimer<H> {
    state: TimerState,
    remaining: Seconds,
    epoch: TimerEpoch,
    handle: Option<H>,
}

impl<H> Default for CountdownTimer<H> {
    fn default() -> Self {
        Self {
            state: TimerState::Idle,
            remaining: 0,
            epoch: TimerEpoch::default(),
            handle: None,
        }
    }
}

impl<H> CountdownTimer<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, TimerState::Running)
    }

    /// Cancels whatever is running, then starts counting down from `duration`.
    pub fn start<S>(&mut self, duration: Seconds, source: &mut S) -> TimerEpoch
    where
        S: TickSource<Handle = H> + ?Sized,
    {
        self.cancel();
        self.epoch = self.epoch.next();
        self.remaining = duration;
        self.state = TimerState::Running;
        self.handle = Some(source.every_second(self.epoch));
        log::trace!("timer {:?} started at {}s", self.epoch, duration);
        self.epoch
    }

    pub fn cancel(&mut self) {
        if self.handle.take().is_some() {
            log::trace!("timer {:?} cancelled", self.epoch);
        }
        self.state = TimerState::Idle;
    }

    /// Feeds one elapsed second. Returns `None` for ticks of a cancelled, expired or superseded start.
    pub fn on_tick(&mut self, epoch: TimerEpoch) -> Option<Tick> {
        if !self.is_running() || epoch != self.epoch {
            log::trace!("dropping stale tick for {:?}", epoch);
            return None;
        }

        self.remaining = self.remaining.saturating_sub(1);
        let expired = self.remaining == 0;
        if expired {
            self.state = TimerState::Expired;
            self.handle = None;
            log::debug!("timer {:?} expired", self.epoch);
        }

        Some(Tick {
            remaining: self.remaining,
            expired,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use alloc::vec::Vec;

    fn run_to_end(timer: &mut CountdownTimer<TestHandle>, epoch: TimerEpoch) -> Vec<Tick> {
        let mut ticks = Vec::new();
        while let Some(tick) = timer.on_tick(epoch) {
            ticks.push(tick);
        }
        ticks
    }

    #[test]
    fn counts_down_to_zero_then_expires_once() {
        let mut host = TestHost::default();
        let mut timer = CountdownTimer::new();

        let epoch = timer.start(10, &mut host);
        let ticks = run_to_end(&mut timer, epoch);

        let remaining: Vec<_> = ticks.iter().map(|tick| tick.remaining).collect();
        assert_eq!(remaining, [9, 8, 7, 6, 5, 4, 3, 2, 1, 0]);
        assert_eq!(ticks.iter().filter(|tick| tick.expired).count(), 1);
        assert!(ticks.last().is_some_and(|tick| tick.expired));
        assert_eq!(timer.state(), TimerState::Expired);
        assert_eq!(host.live_intervals(), 0);
        assert_eq!(timer.on_tick(epoch), None);
    }

    #[test]
    fn cancel_before_expiry_silences_timer() {
        let mut host = TestHost::default();
        let mut timer = CountdownTimer::new();

        let epoch = timer.start(10, &mut host);
        assert_eq!(timer.on_tick(epoch).map(|tick| tick.remaining), Some(9));
        timer.cancel();

        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(host.live_intervals(), 0);
        assert!(run_to_end(&mut timer, epoch).is_empty());
    }

    #[test]
    fn cancel_when_idle_is_noop() {
        let mut timer: CountdownTimer<TestHandle> = CountdownTimer::new();
        timer.cancel();
        timer.cancel();
        assert_eq!(timer.state(), TimerState::Idle);
    }

    #[test]
    fn restart_supersedes_previous_schedule() {
        let mut host = TestHost::default();
        let mut timer = CountdownTimer::new();

        let first = timer.start(10, &mut host);
        timer.on_tick(first);
        let second = timer.start(10, &mut host);

        assert_ne!(first, second);
        assert_eq!(host.live_intervals(), 1);
        assert_eq!(timer.on_tick(first), None);
        assert_eq!(
            timer.on_tick(second),
            Some(Tick {
                remaining: 9,
                expired: false,
            })
        );
        assert_eq!(host.started_epochs, [first, second]);
    }
}
