use core::time::Duration;
use serde::{Deserialize, Serialize};
use web_time::{SystemTime, UNIX_EPOCH};

use crate::*;

pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Wall clock, backed by `Date.now()` on the web.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |since| since.as_millis().try_into().unwrap_or(Timestamp::MAX))
    }
}

/// Follow-up transitions the session defers to the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FollowUp {
    CheckMatch,
    ResetFlipped,
}

impl From<FollowUp> for Action {
    fn from(follow_up: FollowUp) -> Self {
        match follow_up {
            FollowUp::CheckMatch => Action::CheckMatch,
            FollowUp::ResetFlipped => Action::ResetFlipped,
        }
    }
}

/// A deferred transition tagged with the game it was scheduled for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scheduled {
    epoch: u32,
    follow_up: FollowUp,
}

impl Scheduled {
    pub(crate) const fn new(epoch: u32, follow_up: FollowUp) -> Self {
        Self { epoch, follow_up }
    }

    pub const fn epoch(&self) -> u32 {
        self.epoch
    }

    pub const fn follow_up(&self) -> FollowUp {
        self.follow_up
    }
}

/// Delayed delivery of [`Scheduled`] tasks back into [`GameSession::fire`].
pub trait Scheduler {
    type Handle;

    fn after(&mut self, delay: Duration, task: Scheduled) -> Self::Handle;

    fn cancel(&mut self, handle: Self::Handle);
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// Virtual-time scheduler; time only moves when [`ManualScheduler::advance`] is called.
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_handle: u64,
    pending: Vec<(TimerHandle, Duration, Scheduled)>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Moves time forward and returns the tasks that came due, earliest first.
    pub fn advance(&mut self, by: Duration) -> Vec<Scheduled> {
        self.now += by;
        let now = self.now;

        let (mut due, pending): (Vec<_>, Vec<_>) = self
            .pending
            .drain(..)
            .partition(|&(_, due_at, _)| due_at <= now);
        self.pending = pending;

        due.sort_by_key(|&(handle, due_at, _)| (due_at, handle.0));
        due.into_iter().map(|(_, _, task)| task).collect()
    }
}

impl Scheduler for ManualScheduler {
    type Handle = TimerHandle;

    fn after(&mut self, delay: Duration, task: Scheduled) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.pending.push((handle, self.now + delay, task));
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.pending.retain(|&(pending, _, _)| pending != handle);
    }
}

/// Persistence of the lowest completed click count.
///
/// A store that cannot be read reports `None`; failed writes are logged by the
/// session and never interrupt play.
pub trait BestScoreStore {
    fn read_best_score(&self) -> Option<u32>;

    fn write_best_score(&mut self, clicks: u32) -> Result<()>;
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct MemoryBestScore {
    best: Option<u32>,
}

impl MemoryBestScore {
    pub fn new(best: Option<u32>) -> Self {
        Self { best }
    }
}

impl BestScoreStore for MemoryBestScore {
    fn read_best_score(&self) -> Option<u32> {
        self.best
    }

    fn write_best_score(&mut self, clicks: u32) -> Result<()> {
        self.best = Some(clicks);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(follow_up: FollowUp) -> Scheduled {
        Scheduled::new(1, follow_up)
    }

    #[test]
    fn manual_scheduler_releases_due_tasks_in_order() {
        let mut scheduler = ManualScheduler::new();
        scheduler.after(Duration::from_millis(300), task(FollowUp::ResetFlipped));
        scheduler.after(Duration::ZERO, task(FollowUp::CheckMatch));

        assert_eq!(
            scheduler.advance(Duration::ZERO),
            vec![task(FollowUp::CheckMatch)]
        );
        assert!(scheduler.advance(Duration::from_millis(299)).is_empty());
        assert_eq!(
            scheduler.advance(Duration::from_millis(1)),
            vec![task(FollowUp::ResetFlipped)]
        );
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn cancelled_tasks_never_fire() {
        let mut scheduler = ManualScheduler::new();
        let handle = scheduler.after(Duration::from_millis(10), task(FollowUp::ResetFlipped));
        scheduler.cancel(handle);

        assert!(scheduler.advance(Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn system_clock_is_past_epoch() {
        assert!(SystemClock.now() > 0);
    }

    #[test]
    fn memory_store_keeps_last_write() {
        let mut store = MemoryBestScore::default();
        assert_eq!(store.read_best_score(), None);
        store.write_best_score(18).unwrap();
        assert_eq!(store.read_best_score(), Some(18));
    }
}
