//! # Reward Sources
//!
//! Where the learner gets its randomness: the initial strength of every
//! relation and the reward applied on each update. Production runs draw
//! from a `rand` generator; tests and replays can feed fixed sequences.

use std::ops::Range;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Range initial relation strengths are drawn from.
pub const INITIAL_STRENGTH_RANGE: Range<f64> = 0.0..1.0;

/// Range simulated rewards are drawn from.
pub const REWARD_RANGE: Range<f64> = -1.0..1.0;

/// Supplies initial strengths and rewards to the learner.
pub trait RewardSource {
    /// Initial strength for a freshly created relation, in [0, 1).
    fn initial_strength(&mut self) -> f64;

    /// Reward for one update, in [-1, 1).
    fn reward(&mut self) -> f64;
}

impl<S: RewardSource + ?Sized> RewardSource for &mut S {
    fn initial_strength(&mut self) -> f64 {
        (**self).initial_strength()
    }

    fn reward(&mut self) -> f64 {
        (**self).reward()
    }
}

/// Uniform draws from a random number generator.
#[derive(Debug, Clone)]
pub struct UniformRewards<R> {
    rng: R,
}

impl<R: Rng> UniformRewards<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl UniformRewards<StdRng> {
    /// Reproducible source: the same seed yields the same run.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Source seeded from OS entropy. Runs are not reproducible.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> RewardSource for UniformRewards<R> {
    fn initial_strength(&mut self) -> f64 {
        self.rng.random_range(INITIAL_STRENGTH_RANGE)
    }

    fn reward(&mut self) -> f64 {
        self.rng.random_range(REWARD_RANGE)
    }
}

/// Replays fixed sequences of strengths and rewards.
///
/// Each sequence wraps around when exhausted. An empty sequence yields 0.0.
/// Values are returned as given, without checking them against the
/// uniform ranges.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRewards {
    strengths: Vec<f64>,
    rewards: Vec<f64>,
    next_strength: usize,
    next_reward: usize,
}

impl ScriptedRewards {
    pub fn new(strengths: Vec<f64>, rewards: Vec<f64>) -> Self {
        Self {
            strengths,
            rewards,
            next_strength: 0,
            next_reward: 0,
        }
    }

    fn cycle(values: &[f64], cursor: &mut usize) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        let value = values[*cursor % values.len()];
        *cursor += 1;
        value
    }
}

impl RewardSource for ScriptedRewards {
    fn initial_strength(&mut self) -> f64 {
        Self::cycle(&self.strengths, &mut self.next_strength)
    }

    fn reward(&mut self) -> f64 {
        Self::cycle(&self.rewards, &mut self.next_reward)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_draws_stay_in_range() {
        let mut source = UniformRewards::seeded(7);
        for _ in 0..1000 {
            let s = source.initial_strength();
            assert!((0.0..1.0).contains(&s), "strength {} out of range", s);
            let r = source.reward();
            assert!((-1.0..1.0).contains(&r), "reward {} out of range", r);
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = UniformRewards::seeded(42);
        let mut b = UniformRewards::seeded(42);
        for _ in 0..50 {
            assert_eq!(a.reward(), b.reward());
            assert_eq!(a.initial_strength(), b.initial_strength());
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = UniformRewards::seeded(1);
        let mut b = UniformRewards::seeded(2);
        let xs: Vec<f64> = (0..8).map(|_| a.reward()).collect();
        let ys: Vec<f64> = (0..8).map(|_| b.reward()).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn test_scripted_replays_and_wraps() {
        let mut source = ScriptedRewards::new(vec![0.1, 0.2], vec![0.5]);
        assert_eq!(source.initial_strength(), 0.1);
        assert_eq!(source.initial_strength(), 0.2);
        assert_eq!(source.initial_strength(), 0.1);
        assert_eq!(source.reward(), 0.5);
        assert_eq!(source.reward(), 0.5);
    }

    #[test]
    fn test_scripted_empty_yields_zero() {
        let mut source = ScriptedRewards::default();
        assert_eq!(source.initial_strength(), 0.0);
        assert_eq!(source.reward(), 0.0);
    }

    #[test]
    fn test_mut_ref_is_a_source() {
        fn draw<S: RewardSource>(mut s: S) -> f64 {
            s.reward()
        }
        let mut source = ScriptedRewards::new(vec![], vec![0.3, 0.4]);
        assert_eq!(draw(&mut source), 0.3);
        assert_eq!(source.reward(), 0.4);
    }
}
