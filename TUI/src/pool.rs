//! Draw pool: which of the 90 balls are still in the cage.

use std::collections::BTreeSet;

use rand::Rng;

/// Highest ball number. Balls are numbered 1..=BALL_COUNT.
pub const BALL_COUNT: u8 = 90;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    #[error("all 90 numbers have already been drawn")]
    Exhausted,
    #[error("number {0} is outside 1..=90")]
    OutOfRange(u8),
    #[error("number {0} was already drawn")]
    AlreadyDrawn(u8),
}

/// Numbers not yet drawn, in ascending order.
pub fn remaining(drawn: &[u8]) -> BTreeSet<u8> {
    let mut pool: BTreeSet<u8> = (1..=BALL_COUNT).collect();
    for n in drawn {
        pool.remove(n);
    }
    pool
}

pub fn is_exhausted(drawn: &[u8]) -> bool {
    remaining(drawn).is_empty()
}

/// Pick the next ball uniformly among the remaining ones.
///
/// Does not record the pick; the caller appends it once the reveal finishes.
pub fn pick_next<R: Rng>(drawn: &[u8], rng: &mut R) -> Result<u8, PoolError> {
    let pool: Vec<u8> = remaining(drawn).into_iter().collect();
    if pool.is_empty() {
        return Err(PoolError::Exhausted);
    }
    Ok(pool[rng.random_range(0..pool.len())])
}

/// Ordered record of drawn numbers (index 0 = first drawn).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawState {
    order: Vec<u8>,
}

impl DrawState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, n: u8) -> Result<(), PoolError> {
        if n == 0 || n > BALL_COUNT {
            return Err(PoolError::OutOfRange(n));
        }
        if self.order.contains(&n) {
            return Err(PoolError::AlreadyDrawn(n));
        }
        self.order.push(n);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.order.clear();
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn last(&self) -> Option<u8> {
        self.order.last().copied()
    }

    pub fn contains(&self, n: u8) -> bool {
        self.order.contains(&n)
    }

    pub fn is_exhausted(&self) -> bool {
        is_exhausted(&self.order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_remaining_complements_drawn() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut drawn = Vec::new();
        for k in 0..=BALL_COUNT as usize {
            let rest = remaining(&drawn);
            assert_eq!(rest.len(), BALL_COUNT as usize - k);
            assert!(drawn.iter().all(|n| !rest.contains(n)));
            if k < BALL_COUNT as usize {
                drawn.push(pick_next(&drawn, &mut rng).unwrap());
            }
        }
    }

    #[test]
    fn test_pick_next_avoids_drawn() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let drawn: Vec<u8> = (1..=89).collect();
        for _ in 0..20 {
            assert_eq!(pick_next(&drawn, &mut rng), Ok(90));
        }

        let drawn: Vec<u8> = (1..=BALL_COUNT).filter(|n| n % 2 == 0).collect();
        for _ in 0..200 {
            let n = pick_next(&drawn, &mut rng).unwrap();
            assert_eq!(n % 2, 1);
        }
    }

    #[test]
    fn test_pick_next_exhausted() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let drawn: Vec<u8> = (1..=BALL_COUNT).rev().collect();
        assert!(is_exhausted(&drawn));
        assert_eq!(pick_next(&drawn, &mut rng), Err(PoolError::Exhausted));
    }

    #[test]
    fn test_full_session_is_permutation() {
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        let mut state = DrawState::new();
        while !state.is_exhausted() {
            let n = pick_next(state.as_slice(), &mut rng).unwrap();
            state.push(n).unwrap();
        }
        let mut sorted = state.as_slice().to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, (1..=BALL_COUNT).collect::<Vec<_>>());
        assert!(is_exhausted(state.as_slice()));
    }

    #[test]
    fn test_pick_next_reaches_every_number() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut seen = BTreeSet::new();
        for _ in 0..5000 {
            seen.insert(pick_next(&[], &mut rng).unwrap());
        }
        assert_eq!(seen.len(), BALL_COUNT as usize);
    }

    #[test]
    fn test_draw_state_rejects_bad_numbers() {
        let mut state = DrawState::new();
        assert_eq!(state.push(0), Err(PoolError::OutOfRange(0)));
        assert_eq!(state.push(91), Err(PoolError::OutOfRange(91)));
        state.push(12).unwrap();
        assert_eq!(state.push(12), Err(PoolError::AlreadyDrawn(12)));
        assert_eq!(state.len(), 1);
        assert_eq!(state.last(), Some(12));

        state.clear();
        assert!(state.is_empty());
        assert_eq!(state.last(), None);
    }
}
