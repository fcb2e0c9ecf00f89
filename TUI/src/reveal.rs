//! Slot-machine reveal of a drawn number.
//!
//! While the reveal runs, random decoys flicker on the display. The gap
//! between decoys starts short and stretches out as the reveal nears its
//! end, then the real number is committed.

use std::time::Duration;

use rand::Rng;
use serde::Deserialize;

use crate::pool::BALL_COUNT;
use crate::scheduler::{Scheduler, TimerToken};

/// Shortest gap between two decoys.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Timing curve of the reveal: `interval = base + span * progress^exponent`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct RevealTiming {
    pub duration_ms: u64,
    pub base_interval_ms: f64,
    pub interval_span_ms: f64,
    pub easing_exponent: f64,
}

impl Default for RevealTiming {
    fn default() -> Self {
        Self {
            duration_ms: 3000,
            base_interval_ms: 35.0,
            interval_span_ms: 385.0,
            easing_exponent: 1.8,
        }
    }
}

impl RevealTiming {
    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        elapsed.as_secs_f64() * 1000.0 / self.duration_ms as f64
    }

    /// Delay before the next decoy at the given progress. Never shorter
    /// than [`MIN_INTERVAL`].
    pub fn interval(&self, progress: f64) -> Duration {
        let p = progress.clamp(0.0, 1.0);
        let ms = self.base_interval_ms + self.interval_span_ms * p.powf(self.easing_exponent);
        if !ms.is_finite() {
            return MIN_INTERVAL;
        }
        Duration::from_micros((ms * 1000.0).round() as u64).max(MIN_INTERVAL)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationState {
    #[default]
    Idle,
    Running {
        target: u8,
        current_display: u8,
        elapsed_ms: u64,
    },
}

/// Receives what the reveal wants shown.
pub trait RevealObserver {
    fn on_tick(&mut self, value: u8);
    fn on_complete(&mut self, target: u8);
}

/// Revokes one particular reveal. Stale handles do nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancelHandle {
    generation: u64,
}

#[derive(Debug, Default)]
pub struct RevealAnimator {
    timing: RevealTiming,
    state: AnimationState,
    started_at: Duration,
    pending: Option<TimerToken>,
    generation: u64,
}

impl RevealAnimator {
    pub fn new(timing: RevealTiming) -> Self {
        Self {
            timing,
            ..Self::default()
        }
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, AnimationState::Running { .. })
    }

    /// Begin revealing `target`. The first decoy is emitted before this
    /// returns.
    ///
    /// Only one reveal runs at a time; a reveal still in flight is cancelled
    /// first and never completes.
    pub fn start_reveal<S, R, O>(
        &mut self,
        target: u8,
        scheduler: &mut S,
        rng: &mut R,
        observer: &mut O,
    ) -> CancelHandle
    where
        S: Scheduler,
        R: Rng,
        O: RevealObserver,
    {
        if self.is_running() {
            tracing::warn!("reveal started while another was running; cancelling the old one");
            self.cancel(CancelHandle { generation: self.generation }, scheduler);
        }

        self.generation += 1;
        self.started_at = scheduler.now();
        tracing::debug!(number = target, generation = self.generation, "reveal started");
        self.step(target, scheduler, rng, observer);

        CancelHandle {
            generation: self.generation,
        }
    }

    /// Route a fired timer back into the animation. Returns false when the
    /// token does not belong to the running reveal.
    pub fn on_timer<S, R, O>(
        &mut self,
        token: TimerToken,
        scheduler: &mut S,
        rng: &mut R,
        observer: &mut O,
    ) -> bool
    where
        S: Scheduler,
        R: Rng,
        O: RevealObserver,
    {
        if self.pending != Some(token) {
            return false;
        }
        self.pending = None;

        match self.state {
            AnimationState::Running { target, .. } => {
                self.step(target, scheduler, rng, observer);
                true
            }
            AnimationState::Idle => false,
        }
    }

    /// Stop the reveal identified by `handle`. `on_complete` will not be
    /// called for it afterwards.
    pub fn cancel<S: Scheduler>(&mut self, handle: CancelHandle, scheduler: &mut S) -> bool {
        if handle.generation != self.generation || !self.is_running() {
            return false;
        }
        if let Some(token) = self.pending.take() {
            scheduler.cancel(token);
        }
        self.state = AnimationState::Idle;
        tracing::debug!(generation = handle.generation, "reveal cancelled");
        true
    }

    fn step<S, R, O>(&mut self, target: u8, scheduler: &mut S, rng: &mut R, observer: &mut O)
    where
        S: Scheduler,
        R: Rng,
        O: RevealObserver,
    {
        let elapsed = scheduler.now().saturating_sub(self.started_at);
        let progress = self.timing.progress(elapsed);

        if progress >= 1.0 {
            self.state = AnimationState::Idle;
            tracing::debug!(number = target, elapsed_ms = elapsed.as_millis() as u64, "reveal complete");
            observer.on_complete(target);
            return;
        }

        // Decoys may repeat drawn numbers or the target itself.
        let decoy = rng.random_range(1..=BALL_COUNT);
        self.state = AnimationState::Running {
            target,
            current_display: decoy,
            elapsed_ms: elapsed.as_millis() as u64,
        };
        observer.on_tick(decoy);
        self.pending = Some(scheduler.schedule(self.timing.interval(progress)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::TimerQueue;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[derive(Debug, PartialEq)]
    enum Event {
        Tick(u8),
        Complete(u8),
    }

    #[derive(Default)]
    struct Recorder {
        events: Vec<(Duration, Event)>,
        now: Duration,
    }

    impl RevealObserver for Recorder {
        fn on_tick(&mut self, value: u8) {
            self.events.push((self.now, Event::Tick(value)));
        }

        fn on_complete(&mut self, target: u8) {
            self.events.push((self.now, Event::Complete(target)));
        }
    }

    fn run_to_end(
        animator: &mut RevealAnimator,
        timers: &mut TimerQueue,
        rng: &mut ChaCha8Rng,
        recorder: &mut Recorder,
    ) {
        while let Some(token) = timers.fire_next() {
            recorder.now = timers.now();
            animator.on_timer(token, timers, rng, recorder);
        }
    }

    #[test]
    fn test_reveal_completes_once_with_target() {
        let mut animator = RevealAnimator::new(RevealTiming::default());
        let mut timers = TimerQueue::new();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut recorder = Recorder::default();

        animator.start_reveal(42, &mut timers, &mut rng, &mut recorder);
        assert!(animator.is_running());
        run_to_end(&mut animator, &mut timers, &mut rng, &mut recorder);

        let completes: Vec<_> = recorder
            .events
            .iter()
            .filter(|(_, e)| matches!(e, Event::Complete(_)))
            .collect();
        assert_eq!(completes.len(), 1);
        assert_eq!(recorder.events.last().map(|(_, e)| e), Some(&Event::Complete(42)));
        assert_eq!(animator.state(), AnimationState::Idle);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_decoys_stop_at_duration() {
        let timing = RevealTiming::default();
        let mut animator = RevealAnimator::new(timing);
        let mut timers = TimerQueue::new();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut recorder = Recorder::default();

        animator.start_reveal(7, &mut timers, &mut rng, &mut recorder);
        run_to_end(&mut animator, &mut timers, &mut rng, &mut recorder);

        let duration = Duration::from_millis(timing.duration_ms);
        let (ticks, complete): (Vec<_>, Vec<_>) = recorder
            .events
            .iter()
            .partition(|(_, e)| matches!(e, Event::Tick(_)));
        assert!(ticks.len() > 10);
        assert!(ticks.iter().all(|(at, _)| *at < duration));
        assert!(ticks
            .iter()
            .all(|(_, e)| matches!(e, Event::Tick(n) if (1..=BALL_COUNT).contains(n))));
        assert!(complete[0].0 >= duration);
    }

    #[test]
    fn test_cancel_prevents_completion() {
        let mut animator = RevealAnimator::new(RevealTiming::default());
        let mut timers = TimerQueue::new();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut recorder = Recorder::default();

        let handle = animator.start_reveal(5, &mut timers, &mut rng, &mut recorder);
        for _ in 0..5 {
            let token = timers.fire_next().unwrap();
            animator.on_timer(token, &mut timers, &mut rng, &mut recorder);
        }
        let ticks_before = recorder.events.len();

        assert!(animator.cancel(handle, &mut timers));
        assert_eq!(animator.state(), AnimationState::Idle);
        assert!(timers.is_empty());

        timers.advance_by(Duration::from_millis(10_000));
        run_to_end(&mut animator, &mut timers, &mut rng, &mut recorder);
        assert_eq!(recorder.events.len(), ticks_before);
        assert!(!recorder
            .events
            .iter()
            .any(|(_, e)| matches!(e, Event::Complete(_))));
    }

    #[test]
    fn test_stale_handle_and_token_are_ignored() {
        let mut animator = RevealAnimator::new(RevealTiming::default());
        let mut timers = TimerQueue::new();
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut recorder = Recorder::default();

        let first = animator.start_reveal(1, &mut timers, &mut rng, &mut recorder);
        let stale_token = timers.fire_next().unwrap();
        animator.on_timer(stale_token, &mut timers, &mut rng, &mut recorder);
        assert!(!animator.on_timer(stale_token, &mut timers, &mut rng, &mut recorder));

        assert!(animator.cancel(first, &mut timers));
        assert!(!animator.cancel(first, &mut timers));

        let second = animator.start_reveal(2, &mut timers, &mut rng, &mut recorder);
        assert_ne!(first, second);
        assert!(!animator.cancel(first, &mut timers));
        assert!(animator.is_running());

        run_to_end(&mut animator, &mut timers, &mut rng, &mut recorder);
        assert_eq!(recorder.events.last().map(|(_, e)| e), Some(&Event::Complete(2)));
    }

    #[test]
    fn test_restart_cancels_previous_reveal() {
        let mut animator = RevealAnimator::new(RevealTiming::default());
        let mut timers = TimerQueue::new();
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let mut recorder = Recorder::default();

        animator.start_reveal(10, &mut timers, &mut rng, &mut recorder);
        animator.start_reveal(20, &mut timers, &mut rng, &mut recorder);
        assert_eq!(timers.len(), 1);
        run_to_end(&mut animator, &mut timers, &mut rng, &mut recorder);

        let completes: Vec<_> = recorder
            .events
            .iter()
            .filter_map(|(_, e)| match e {
                Event::Complete(n) => Some(*n),
                Event::Tick(_) => None,
            })
            .collect();
        assert_eq!(completes, vec![20]);
    }

    #[test]
    fn test_running_state_tracks_display_and_elapsed() {
        let mut animator = RevealAnimator::new(RevealTiming::default());
        let mut timers = TimerQueue::new();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut recorder = Recorder::default();

        animator.start_reveal(33, &mut timers, &mut rng, &mut recorder);
        let token = timers.fire_next().unwrap();
        animator.on_timer(token, &mut timers, &mut rng, &mut recorder);

        match animator.state() {
            AnimationState::Running {
                target,
                current_display,
                elapsed_ms,
            } => {
                assert_eq!(target, 33);
                assert_eq!(recorder.events.last(), Some(&(Duration::ZERO, Event::Tick(current_display))));
                assert_eq!(elapsed_ms, 35);
            }
            AnimationState::Idle => panic!("reveal should still be running"),
        }
    }

    #[test]
    fn test_interval_grows_with_progress() {
        let timing = RevealTiming::default();
        assert_eq!(timing.interval(0.0), Duration::from_millis(35));
        assert_eq!(timing.interval(1.0), Duration::from_millis(420));

        let mut previous = Duration::ZERO;
        for i in 0..=100 {
            let interval = timing.interval(i as f64 / 100.0);
            assert!(interval >= previous);
            previous = interval;
        }
    }

    #[test]
    fn test_degenerate_curve_still_advances_clock() {
        let flat = RevealTiming {
            base_interval_ms: 0.0,
            interval_span_ms: 0.0,
            ..RevealTiming::default()
        };
        assert_eq!(flat.interval(0.5), MIN_INTERVAL);

        let nan = RevealTiming {
            easing_exponent: f64::NAN,
            ..RevealTiming::default()
        };
        assert_eq!(nan.interval(0.5), MIN_INTERVAL);

        // A reveal on the flat curve still finishes in a bounded number of steps
        let mut timers = TimerQueue::new();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut recorder = Recorder::default();
        let mut animator = RevealAnimator::new(flat);
        animator.start_reveal(42, &mut timers, &mut rng, &mut recorder);
        timers.advance_to(Duration::from_millis(16));
        let mut fired = 0;
        while let Some(token) = timers.pop_due() {
            animator.on_timer(token, &mut timers, &mut rng, &mut recorder);
            fired += 1;
        }
        assert!(fired <= 16);
        assert!(animator.is_running());
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let timing = RevealTiming {
            duration_ms: 0,
            ..RevealTiming::default()
        };
        let mut animator = RevealAnimator::new(timing);
        let mut timers = TimerQueue::new();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut recorder = Recorder::default();

        animator.start_reveal(90, &mut timers, &mut rng, &mut recorder);
        assert_eq!(recorder.events, vec![(Duration::ZERO, Event::Complete(90))]);
        assert!(timers.is_empty());
    }
}
