//! One Sorteador session: the drawn numbers plus the reveal in progress.

use rand::Rng;

use crate::pool::{self, DrawState};
use crate::reveal::{AnimationState, CancelHandle, RevealAnimator, RevealObserver, RevealTiming};
use crate::scheduler::{Scheduler, TimerToken};

pub const MAX_HISTORY_VISIBLE: usize = 10;

/// Font scale and opacity for the i-th history entry (0 = most recent).
/// Scale shrinks from 1.5 toward 0.55 and opacity fades from 1 toward 0.35.
pub fn history_fade(index: usize) -> (f64, f64) {
    let ratio = (index + 1) as f64 / MAX_HISTORY_VISIBLE as f64;
    (1.5 - ratio * 0.95, 1.0 - ratio * 0.65)
}

/// Holds a finished reveal's number until the session records it.
#[derive(Debug, Default)]
struct PendingCommit(Option<u8>);

impl RevealObserver for PendingCommit {
    fn on_tick(&mut self, value: u8) {
        tracing::trace!(value, "decoy");
    }

    fn on_complete(&mut self, target: u8) {
        self.0 = Some(target);
    }
}

pub struct DrawSession<R> {
    drawn: DrawState,
    animator: RevealAnimator,
    reveal: Option<CancelHandle>,
    commit: PendingCommit,
    rng: R,
}

impl<R: Rng> DrawSession<R> {
    pub fn new(timing: RevealTiming, rng: R) -> Self {
        Self {
            drawn: DrawState::new(),
            animator: RevealAnimator::new(timing),
            reveal: None,
            commit: PendingCommit::default(),
            rng,
        }
    }

    /// Pick a number and start revealing it. Does nothing while a reveal is
    /// running or once every number is out.
    pub fn draw_next<S: Scheduler>(&mut self, scheduler: &mut S) -> bool {
        if self.is_animating() || self.drawn.is_exhausted() {
            return false;
        }

        let target = match pool::pick_next(self.drawn.as_slice(), &mut self.rng) {
            Ok(n) => n,
            Err(e) => {
                tracing::warn!("draw refused: {}", e);
                return false;
            }
        };

        let handle = self
            .animator
            .start_reveal(target, scheduler, &mut self.rng, &mut self.commit);
        self.reveal = Some(handle);
        self.settle();
        true
    }

    /// Feed a fired timer to the reveal. Returns false if it wasn't ours.
    pub fn on_timer<S: Scheduler>(&mut self, token: TimerToken, scheduler: &mut S) -> bool {
        let handled = self
            .animator
            .on_timer(token, scheduler, &mut self.rng, &mut self.commit);
        self.settle();
        handled
    }

    /// Stop any reveal in flight without committing its number.
    pub fn cancel_reveal<S: Scheduler>(&mut self, scheduler: &mut S) {
        if let Some(handle) = self.reveal.take() {
            self.animator.cancel(handle, scheduler);
        }
        self.commit = PendingCommit::default();
    }

    pub fn clear<S: Scheduler>(&mut self, scheduler: &mut S) {
        self.cancel_reveal(scheduler);
        self.drawn.clear();
        tracing::info!("drawn numbers cleared");
    }

    fn settle(&mut self) {
        let Some(number) = self.commit.0.take() else {
            return;
        };
        self.reveal = None;
        match self.drawn.push(number) {
            Ok(()) => tracing::info!(number, count = self.drawn.len(), "number drawn"),
            Err(e) => tracing::warn!("reveal finished with unusable number: {}", e),
        }
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_running()
    }

    pub fn is_exhausted(&self) -> bool {
        self.drawn.is_exhausted()
    }

    pub fn animation_state(&self) -> AnimationState {
        self.animator.state()
    }

    pub fn drawn(&self) -> &[u8] {
        self.drawn.as_slice()
    }

    pub fn is_drawn(&self, n: u8) -> bool {
        self.drawn.contains(n)
    }

    pub fn last_drawn(&self) -> Option<u8> {
        self.drawn.last()
    }

    /// Number for the big display: the flickering decoy while animating,
    /// otherwise the last drawn.
    pub fn display_number(&self) -> Option<u8> {
        match self.animator.state() {
            AnimationState::Running { current_display, .. } => Some(current_display),
            AnimationState::Idle => self.drawn.last(),
        }
    }

    /// Everything but the last drawn number, most recent first.
    pub fn history(&self) -> Vec<u8> {
        let drawn = self.drawn.as_slice();
        match drawn.split_last() {
            Some((_, earlier)) => earlier.iter().rev().copied().collect(),
            None => Vec::new(),
        }
    }

    pub fn visible_history(&self) -> Vec<u8> {
        let mut history = self.history();
        history.truncate(MAX_HISTORY_VISIBLE);
        history
    }

    pub fn has_more_history(&self) -> bool {
        self.drawn.len().saturating_sub(1) > MAX_HISTORY_VISIBLE
    }

    /// Drawn numbers in draw order, ready for the clipboard.
    pub fn export_text(&self) -> String {
        self.drawn
            .as_slice()
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::BALL_COUNT;
    use crate::scheduler::TimerQueue;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::time::Duration;

    fn session(seed: u64) -> DrawSession<ChaCha8Rng> {
        DrawSession::new(RevealTiming::default(), ChaCha8Rng::seed_from_u64(seed))
    }

    fn finish(session: &mut DrawSession<ChaCha8Rng>, timers: &mut TimerQueue) {
        while let Some(token) = timers.fire_next() {
            session.on_timer(token, timers);
        }
    }

    #[test]
    fn test_draw_commits_after_reveal() {
        let mut timers = TimerQueue::new();
        let mut s = session(1);

        assert!(s.draw_next(&mut timers));
        assert!(s.is_animating());
        assert!(s.drawn().is_empty());
        assert!(s.display_number().is_some());

        let target = match s.animation_state() {
            AnimationState::Running { target, .. } => target,
            AnimationState::Idle => panic!("expected a running reveal"),
        };

        finish(&mut s, &mut timers);
        assert!(!s.is_animating());
        assert_eq!(s.drawn(), &[target]);
        assert_eq!(s.display_number(), Some(target));
        assert!(timers.now() >= Duration::from_millis(3000));
    }

    #[test]
    fn test_draw_ignored_while_animating() {
        let mut timers = TimerQueue::new();
        let mut s = session(2);

        assert!(s.draw_next(&mut timers));
        assert!(!s.draw_next(&mut timers));
        assert_eq!(timers.len(), 1);
        finish(&mut s, &mut timers);
        assert_eq!(s.drawn().len(), 1);
    }

    #[test]
    fn test_full_session_draws_every_number_once() {
        let mut timers = TimerQueue::new();
        let mut s = session(3);

        while s.draw_next(&mut timers) {
            finish(&mut s, &mut timers);
        }

        assert!(s.is_exhausted());
        let mut all = s.drawn().to_vec();
        all.sort_unstable();
        assert_eq!(all, (1..=BALL_COUNT).collect::<Vec<_>>());
        assert!(!s.draw_next(&mut timers));
    }

    #[test]
    fn test_clear_mid_reveal_discards_number() {
        let mut timers = TimerQueue::new();
        let mut s = session(4);

        s.draw_next(&mut timers);
        finish(&mut s, &mut timers);
        s.draw_next(&mut timers);
        if let Some(token) = timers.fire_next() {
            s.on_timer(token, &mut timers);
        }

        s.clear(&mut timers);
        assert!(!s.is_animating());
        assert!(s.drawn().is_empty());
        assert_eq!(s.display_number(), None);
        assert!(timers.is_empty());

        timers.advance_by(Duration::from_millis(5000));
        while let Some(token) = timers.pop_due() {
            s.on_timer(token, &mut timers);
        }
        assert!(s.drawn().is_empty());
    }

    #[test]
    fn test_history_order_and_truncation() {
        let mut timers = TimerQueue::new();
        let mut s = session(5);

        for _ in 0..3 {
            s.draw_next(&mut timers);
            finish(&mut s, &mut timers);
        }
        let drawn = s.drawn().to_vec();
        assert_eq!(s.history(), vec![drawn[1], drawn[0]]);
        assert!(!s.has_more_history());

        for _ in 0..10 {
            s.draw_next(&mut timers);
            finish(&mut s, &mut timers);
        }
        assert_eq!(s.history().len(), 12);
        assert_eq!(s.visible_history().len(), MAX_HISTORY_VISIBLE);
        assert_eq!(s.visible_history()[0], s.drawn()[11]);
        assert!(s.has_more_history());
    }

    #[test]
    fn test_export_text_in_draw_order() {
        let mut timers = TimerQueue::new();
        let mut s = session(6);
        assert_eq!(s.export_text(), "");

        for _ in 0..2 {
            s.draw_next(&mut timers);
            finish(&mut s, &mut timers);
        }
        let drawn = s.drawn();
        assert_eq!(s.export_text(), format!("{}, {}", drawn[0], drawn[1]));
    }

    #[test]
    fn test_history_fade_ramp() {
        let (scale, opacity) = history_fade(0);
        assert!((scale - 1.405).abs() < 1e-9);
        assert!((opacity - 0.935).abs() < 1e-9);

        let (scale, opacity) = history_fade(MAX_HISTORY_VISIBLE - 1);
        assert!((scale - 0.55).abs() < 1e-9);
        assert!((opacity - 0.35).abs() < 1e-9);
    }
}
