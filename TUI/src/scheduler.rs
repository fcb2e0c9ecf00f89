//! Delayed-callback primitive the reveal animation runs on.
//!
//! Timers carry no closure: firing a timer hands its token back to the
//! driver, which routes it to whoever scheduled it. The clock only moves
//! when the driver advances it, so the main loop feeds it wall time and
//! tests step it by hand.

use std::time::Duration;

/// Identifies one scheduled timer. Also serves as its cancel token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(u64);

pub trait Scheduler {
    /// Monotonic time since the scheduler was created.
    fn now(&self) -> Duration;

    /// Arrange for a timer to fire `delay` from now.
    fn schedule(&mut self, delay: Duration) -> TimerToken;

    /// Revoke a pending timer. Returns false if it already fired or was
    /// never scheduled here.
    fn cancel(&mut self, token: TimerToken) -> bool;
}

#[derive(Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    next_id: u64,
    pending: Vec<(Duration, TimerToken)>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward. Going backwards is ignored.
    pub fn advance_to(&mut self, now: Duration) {
        if now > self.now {
            self.now = now;
        }
    }

    /// Pop the earliest timer whose deadline has passed.
    pub fn pop_due(&mut self) -> Option<TimerToken> {
        let idx = self.earliest()?;
        if self.pending[idx].0 > self.now {
            return None;
        }
        Some(self.pending.remove(idx).1)
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.earliest().map(|idx| self.pending[idx].0)
    }

    // Ties resolve in scheduling order.
    fn earliest(&self) -> Option<usize> {
        self.pending
            .iter()
            .enumerate()
            .min_by_key(|(_, (deadline, token))| (*deadline, *token))
            .map(|(idx, _)| idx)
    }
}

// Hand-driven clock for tests
#[cfg(test)]
impl TimerQueue {
    pub fn advance_by(&mut self, delta: Duration) {
        self.now += delta;
    }

    /// Jump the clock to the next deadline and fire that timer.
    pub fn fire_next(&mut self) -> Option<TimerToken> {
        let idx = self.earliest()?;
        let (deadline, token) = self.pending.remove(idx);
        self.advance_to(deadline);
        Some(token)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Scheduler for TimerQueue {
    fn now(&self) -> Duration {
        self.now
    }

    fn schedule(&mut self, delay: Duration) -> TimerToken {
        let token = TimerToken(self.next_id);
        self.next_id += 1;
        self.pending.push((self.now + delay, token));
        token
    }

    fn cancel(&mut self, token: TimerToken) -> bool {
        let before = self.pending.len();
        self.pending.retain(|(_, t)| *t != token);
        self.pending.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_pop_due_respects_deadlines() {
        let mut timers = TimerQueue::new();
        let late = timers.schedule(ms(100));
        let early = timers.schedule(ms(40));

        assert_eq!(timers.pop_due(), None);
        timers.advance_to(ms(50));
        assert_eq!(timers.pop_due(), Some(early));
        assert_eq!(timers.pop_due(), None);
        timers.advance_by(ms(50));
        assert_eq!(timers.pop_due(), Some(late));
        assert!(timers.is_empty());
    }

    #[test]
    fn test_cancel_revokes_pending_timer() {
        let mut timers = TimerQueue::new();
        let a = timers.schedule(ms(10));
        let b = timers.schedule(ms(20));

        assert!(timers.cancel(a));
        assert!(!timers.cancel(a));
        timers.advance_to(ms(1000));
        assert_eq!(timers.pop_due(), Some(b));
        assert_eq!(timers.pop_due(), None);
    }

    #[test]
    fn test_fire_next_moves_clock() {
        let mut timers = TimerQueue::new();
        timers.advance_to(ms(5));
        let t = timers.schedule(ms(30));
        assert_eq!(timers.next_deadline(), Some(ms(35)));
        assert_eq!(timers.fire_next(), Some(t));
        assert_eq!(timers.now(), ms(35));
        assert_eq!(timers.fire_next(), None);
    }

    #[test]
    fn test_clock_never_goes_backwards() {
        let mut timers = TimerQueue::new();
        timers.advance_to(ms(500));
        timers.advance_to(ms(100));
        assert_eq!(timers.now(), ms(500));
    }

    #[test]
    fn test_same_deadline_fires_in_schedule_order() {
        let mut timers = TimerQueue::new();
        let first = timers.schedule(ms(10));
        let second = timers.schedule(ms(10));
        timers.advance_to(ms(10));
        assert_eq!(timers.pop_due(), Some(first));
        assert_eq!(timers.pop_due(), Some(second));
        assert_eq!(timers.len(), 0);
    }
}
