//! Drives rounds through Betting, Resolving and Result on a single cooperative task.
//!
//! The controller owns exactly one phase timer at a time. Entering a new phase replaces
//! the timer, which drops (and so cancels) the previous one; dropping the controller
//! cancels whatever timer is active. Nothing is spawned.

use crate::{
    config::GameConfig,
    history::{
        HistoryEntry,
        ResultHistory,
    },
    round::{
        Advance,
        AnimationSample,
        Direction,
        Outcome,
        Phase,
        PhaseDurations,
        PhaseKind,
        Round,
        RoundSnapshot,
    },
    sampler::OutcomeSampler,
};
use std::time::Duration;
use tokio::time::{
    self,
    Instant,
    Interval,
    MissedTickBehavior,
};
use tracing::{
    debug,
    info,
    warn,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RoundEvent {
    Countdown {
        round_id: u64,
        phase: PhaseKind,
        remaining: u32,
    },
    ResolvingStarted {
        round_id: u64,
    },
    Animated {
        round_id: u64,
        sample: AnimationSample,
    },
    Resolved {
        round_id: u64,
        outcome: Outcome,
    },
    RoundStarted {
        round_id: u64,
    },
}

/// Repeating timer for the active phase. The interval is created on first wait so a
/// controller can be built and stepped outside a runtime.
#[derive(Debug)]
struct PhaseTimer {
    period: Duration,
    interval: Option<Interval>,
}

impl PhaseTimer {
    fn new(period: Duration) -> Self {
        Self {
            period,
            interval: None,
        }
    }

    async fn wait(&mut self) {
        let period = self.period;
        let interval = self.interval.get_or_insert_with(|| {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval
        });
        interval.tick().await;
    }
}

pub struct RoundController<S> {
    config: GameConfig,
    durations: PhaseDurations,
    round: Round,
    history: ResultHistory,
    sampler: S,
    timer: PhaseTimer,
    pinned: Option<Outcome>,
}

impl<S: OutcomeSampler> RoundController<S> {
    pub fn new(config: GameConfig, sampler: S) -> Self {
        let durations = config.durations();
        let round = Round::new(1, &durations);
        info!(round_id = round.id(), "round started");
        Self {
            timer: PhaseTimer::new(config.tick_period()),
            history: ResultHistory::with_capacity(config.history_capacity),
            config,
            durations,
            round,
            sampler,
            pinned: None,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> RoundSnapshot {
        self.round.snapshot()
    }

    /// Completed rounds, most recent first.
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.history.to_vec()
    }

    pub fn pinned_outcome(&self) -> Option<Outcome> {
        self.pinned
    }

    /// Stakes `amount` on `direction` while betting is open; otherwise does nothing.
    pub fn place_wager(&mut self, direction: Direction, amount: u64) {
        let round_id = self.round.id();
        if self.round.place_wager(direction, amount) {
            debug!(round_id, %direction, amount, "wager placed");
        } else {
            debug!(
                round_id,
                %direction,
                amount,
                phase = ?self.round.phase().kind(),
                "wager ignored"
            );
        }
    }

    /// Forces the outcome of the current round. Only possible before the result is in.
    pub fn pin_outcome(&mut self, outcome: Outcome) -> bool {
        if matches!(self.round.phase(), Phase::Result { .. }) {
            debug!(round_id = self.round.id(), %outcome, "pin ignored after result");
            return false;
        }
        info!(round_id = self.round.id(), %outcome, "outcome pinned");
        self.pinned = Some(outcome);
        true
    }

    /// Waits for the active phase timer and applies the firing.
    ///
    /// Cancellation safe: state only changes after the timer has fired.
    pub async fn next_event(&mut self) -> RoundEvent {
        self.timer.wait().await;
        self.advance()
    }

    /// Applies one firing of the active phase timer without waiting for it.
    pub fn advance(&mut self) -> RoundEvent {
        let round_id = self.round.id();
        let advance = match self.round.phase() {
            Phase::Resolving { .. } => {
                let sample = self.sampler.animation_sample();
                self.round.animate(sample, &self.durations)
            }
            Phase::Betting { .. } | Phase::Result { .. } => {
                self.round.tick(&self.durations)
            }
        };
        match advance {
            Advance::Countdown { remaining } => RoundEvent::Countdown {
                round_id,
                phase: self.round.phase().kind(),
                remaining,
            },
            Advance::EnteredResolving => {
                self.timer = PhaseTimer::new(self.config.animation_period());
                info!(
                    round_id,
                    up_stake = self.round.ledger().up(),
                    down_stake = self.round.ledger().down(),
                    "betting closed"
                );
                RoundEvent::ResolvingStarted { round_id }
            }
            Advance::Animated { sample } => {
                debug!(round_id, ?sample, "animation step");
                RoundEvent::Animated { round_id, sample }
            }
            Advance::AnimationFinished => self.resolve_round(),
            Advance::Finished => self.start_next_round(),
            Advance::Ignored => {
                let snapshot = self.round.snapshot();
                warn!(round_id, phase = ?snapshot.phase, "timer firing had no effect");
                RoundEvent::Countdown {
                    round_id,
                    phase: snapshot.phase,
                    remaining: snapshot.countdown,
                }
            }
        }
    }

    fn resolve_round(&mut self) -> RoundEvent {
        let round_id = self.round.id();
        let outcome = match self.pinned.take() {
            Some(outcome) => outcome,
            None => self.sampler.outcome(),
        };
        self.round.resolve(outcome, &self.durations);
        self.history.record(round_id, outcome);
        self.timer = PhaseTimer::new(self.config.tick_period());
        info!(round_id, %outcome, "round resolved");
        RoundEvent::Resolved { round_id, outcome }
    }

    fn start_next_round(&mut self) -> RoundEvent {
        self.round = self.round.successor(&self.durations);
        self.timer = PhaseTimer::new(self.config.tick_period());
        let round_id = self.round.id();
        info!(round_id, "round started");
        RoundEvent::RoundStarted { round_id }
    }
}

impl<S> Drop for RoundController<S> {
    fn drop(&mut self) {
        debug!(
            round_id = self.round.id(),
            timer_started = self.timer.interval.is_some(),
            "round controller dropped"
        );
    }
}
