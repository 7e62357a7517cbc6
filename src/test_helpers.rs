use crate::{
    config::GameConfig,
    controller::{
        RoundController,
        RoundEvent,
    },
    round::{
        AnimationSample,
        Outcome,
        PhaseKind,
    },
    sampler::OutcomeSampler,
};
use std::collections::VecDeque;

/// Sampler that replays fixed outcomes, then keeps returning the fallback.
#[derive(Clone, Debug)]
pub struct ScriptedSampler {
    outcomes: VecDeque<Outcome>,
    animation: VecDeque<AnimationSample>,
    fallback: Outcome,
}

impl Default for ScriptedSampler {
    fn default() -> Self {
        Self::new([])
    }
}

impl ScriptedSampler {
    pub fn new(outcomes: impl IntoIterator<Item = Outcome>) -> Self {
        Self {
            outcomes: outcomes.into_iter().collect(),
            animation: VecDeque::new(),
            fallback: Outcome::Up,
        }
    }

    pub fn with_animation(
        mut self,
        samples: impl IntoIterator<Item = AnimationSample>,
    ) -> Self {
        self.animation = samples.into_iter().collect();
        self
    }

    pub fn with_fallback(mut self, fallback: Outcome) -> Self {
        self.fallback = fallback;
        self
    }
}

impl OutcomeSampler for ScriptedSampler {
    fn animation_sample(&mut self) -> AnimationSample {
        self.animation.pop_front().unwrap_or_default()
    }

    fn outcome(&mut self) -> Outcome {
        self.outcomes.pop_front().unwrap_or(self.fallback)
    }
}

pub struct TestContext<S = ScriptedSampler> {
    pub controller: RoundController<S>,
}

impl TestContext<ScriptedSampler> {
    pub fn new() -> Self {
        Self::with_sampler(ScriptedSampler::default())
    }

    pub fn with_sampler(sampler: ScriptedSampler) -> Self {
        Self::with_config(GameConfig::default(), sampler)
    }
}

impl Default for TestContext<ScriptedSampler> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: OutcomeSampler> TestContext<S> {
    pub fn with_config(config: GameConfig, sampler: S) -> Self {
        Self {
            controller: RoundController::new(config, sampler),
        }
    }

    pub fn advance_times(&mut self, n: usize) -> Vec<RoundEvent> {
        (0..n).map(|_| self.controller.advance()).collect()
    }

    /// Advances until the round reaches `phase`, returning every event on the way.
    pub fn advance_until(&mut self, phase: PhaseKind) -> Vec<RoundEvent> {
        let mut events = Vec::new();
        while self.controller.state().phase != phase {
            events.push(self.controller.advance());
        }
        events
    }

    /// Plays the current round to the start of the next one and returns its outcome.
    pub fn complete_round(&mut self) -> Outcome {
        let round_id = self.controller.state().round_id;
        self.advance_until(PhaseKind::Result);
        let outcome = self
            .controller
            .state()
            .outcome
            .expect("result phase always carries an outcome");
        while self.controller.state().round_id == round_id {
            self.controller.advance();
        }
        outcome
    }
}
