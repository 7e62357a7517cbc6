//! Outcome and animation draws for a round.
//!
//! The outcome uses two sequential uniform draws: the first decides Up at 0.45, the
//! second (taken only when the first is not Up) decides Down at 0.9, otherwise Tie.
//! The resulting marginals are Up 0.45, Down 0.495, Tie 0.055.

use crate::round::{
    AnimationSample,
    Outcome,
};
use rand::{
    Rng,
    SeedableRng,
    rngs::StdRng,
};

pub const UP_THRESHOLD: f64 = 0.45;
pub const DOWN_THRESHOLD: f64 = 0.9;

pub trait OutcomeSampler {
    fn animation_sample(&mut self) -> AnimationSample;

    fn outcome(&mut self) -> Outcome;
}

/// Maps the two draws onto an outcome. `second` is only called when `first` misses Up.
pub fn outcome_from_draws(first: f64, second: impl FnOnce() -> f64) -> Outcome {
    if first < UP_THRESHOLD {
        Outcome::Up
    } else if second() < DOWN_THRESHOLD {
        Outcome::Down
    } else {
        Outcome::Tie
    }
}

pub fn animation_from_draw(draw: f64) -> AnimationSample {
    let len = AnimationSample::ALL.len();
    let idx = ((draw * len as f64).floor() as usize).min(len - 1);
    AnimationSample::ALL[idx]
}

pub struct RngSampler<R = StdRng> {
    rng: R,
}

impl RngSampler<StdRng> {
    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> RngSampler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> OutcomeSampler for RngSampler<R> {
    fn animation_sample(&mut self) -> AnimationSample {
        animation_from_draw(self.rng.random::<f64>())
    }

    fn outcome(&mut self) -> Outcome {
        let first = self.rng.random::<f64>();
        outcome_from_draws(first, || self.rng.random::<f64>())
    }
}

impl<S: OutcomeSampler + ?Sized> OutcomeSampler for Box<S> {
    fn animation_sample(&mut self) -> AnimationSample {
        (**self).animation_sample()
    }

    fn outcome(&mut self) -> Outcome {
        (**self).outcome()
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]
    use super::*;
    use std::cell::Cell;

    #[test]
    fn outcome_from_draws__first_draw_below_threshold_is_up() {
        // given
        let first = 0.4499;

        // when
        let outcome = outcome_from_draws(first, || panic!("second draw consumed"));

        // then
        assert_eq!(Outcome::Up, outcome);
    }

    #[test]
    fn outcome_from_draws__second_draw_splits_down_and_tie() {
        // given
        let miss = UP_THRESHOLD;

        // when
        let down = outcome_from_draws(miss, || 0.8999);
        let tie = outcome_from_draws(miss, || DOWN_THRESHOLD);

        // then
        assert_eq!(Outcome::Down, down);
        assert_eq!(Outcome::Tie, tie);
    }

    #[test]
    fn outcome_from_draws__second_draw_taken_once_when_first_misses() {
        // given
        let calls = Cell::new(0);

        // when
        outcome_from_draws(0.99, || {
            calls.set(calls.get() + 1);
            0.95
        });

        // then
        assert_eq!(1, calls.get());
    }

    #[test]
    fn animation_from_draw__splits_unit_interval_in_thirds() {
        // given
        let draws = [0.0, 0.33, 0.34, 0.66, 0.67, 0.9999];

        // when
        let samples: Vec<AnimationSample> =
            draws.iter().map(|d| animation_from_draw(*d)).collect();

        // then
        let expected = vec![
            AnimationSample::Up,
            AnimationSample::Up,
            AnimationSample::Down,
            AnimationSample::Down,
            AnimationSample::Center,
            AnimationSample::Center,
        ];
        assert_eq!(expected, samples);
    }

    #[test]
    fn rng_sampler__same_seed_yields_same_sequence() {
        // given
        let mut a = RngSampler::from_seed(42);
        let mut b = RngSampler::from_seed(42);

        // when
        let left: Vec<Outcome> = (0..32).map(|_| a.outcome()).collect();
        let right: Vec<Outcome> = (0..32).map(|_| b.outcome()).collect();

        // then
        assert_eq!(left, right);
    }

    #[test]
    fn rng_sampler__frequencies_follow_two_draw_marginals() {
        // given
        let mut sampler = RngSampler::from_seed(7);
        let rounds = 40_000;

        // when
        let mut counts = [0usize; 3];
        for _ in 0..rounds {
            match sampler.outcome() {
                Outcome::Up => counts[0] += 1,
                Outcome::Down => counts[1] += 1,
                Outcome::Tie => counts[2] += 1,
            }
        }

        // then
        let share = |n: usize| n as f64 / rounds as f64;
        assert!((share(counts[0]) - 0.45).abs() < 0.02);
        assert!((share(counts[1]) - 0.495).abs() < 0.02);
        assert!((share(counts[2]) - 0.055).abs() < 0.01);
    }
}
