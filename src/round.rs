use crate::ledger::BetLedger;
use serde::{
    Deserialize,
    Serialize,
};
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "UP",
            Direction::Down => "DOWN",
        };
        write!(f, "{name}")
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    Up,
    Down,
    Tie,
}

impl Outcome {
    pub const ALL: [Outcome; 3] = [Outcome::Up, Outcome::Down, Outcome::Tie];
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Outcome::Up => "UP",
            Outcome::Down => "DOWN",
            Outcome::Tie => "TIE",
        };
        write!(f, "{name}")
    }
}

/// Cosmetic market direction shown while a round resolves. Never decides anything.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum AnimationSample {
    Up,
    Down,
    #[default]
    Center,
}

impl AnimationSample {
    pub const ALL: [AnimationSample; 3] = [
        AnimationSample::Up,
        AnimationSample::Down,
        AnimationSample::Center,
    ];
}

impl From<Outcome> for AnimationSample {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Up => AnimationSample::Up,
            Outcome::Down => AnimationSample::Down,
            Outcome::Tie => AnimationSample::Center,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum PhaseKind {
    Betting,
    Resolving,
    Result,
}

impl PhaseKind {
    /// The phase that follows this one in the round cycle.
    pub fn next(self) -> PhaseKind {
        match self {
            PhaseKind::Betting => PhaseKind::Resolving,
            PhaseKind::Resolving => PhaseKind::Result,
            PhaseKind::Result => PhaseKind::Betting,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Phase {
    Betting { countdown: u32 },
    /// `countdown` is the displayed animation length; it is never decremented.
    Resolving { countdown: u32, steps_taken: u32 },
    Result { countdown: u32, outcome: Outcome },
}

impl Phase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            Phase::Betting { .. } => PhaseKind::Betting,
            Phase::Resolving { .. } => PhaseKind::Resolving,
            Phase::Result { .. } => PhaseKind::Result,
        }
    }

    pub fn countdown(&self) -> u32 {
        match *self {
            Phase::Betting { countdown }
            | Phase::Resolving { countdown, .. }
            | Phase::Result { countdown, .. } => countdown,
        }
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match *self {
            Phase::Result { outcome, .. } => Some(outcome),
            _ => None,
        }
    }
}

/// Lengths a round needs to move between phases.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PhaseDurations {
    pub betting_secs: u32,
    pub resolving_secs: u32,
    pub result_secs: u32,
    pub animation_steps: u32,
}

impl Default for PhaseDurations {
    fn default() -> Self {
        Self {
            betting_secs: 10,
            resolving_secs: 5,
            result_secs: 3,
            animation_steps: 10,
        }
    }
}

/// What a single timer firing did to the round.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Advance {
    Countdown { remaining: u32 },
    EnteredResolving,
    Animated { sample: AnimationSample },
    /// The last animation step ran; the round is waiting for its outcome.
    AnimationFinished,
    /// The result countdown ran out; the round should be replaced.
    Finished,
    /// The firing does not apply to the current phase.
    Ignored,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Round {
    id: u64,
    phase: Phase,
    ledger: BetLedger,
    animation: AnimationSample,
}

impl Round {
    pub fn new(id: u64, durations: &PhaseDurations) -> Self {
        Self {
            id,
            phase: Phase::Betting {
                countdown: durations.betting_secs,
            },
            ledger: BetLedger::new(),
            animation: AnimationSample::Center,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn ledger(&self) -> &BetLedger {
        &self.ledger
    }

    pub fn animation(&self) -> AnimationSample {
        self.animation
    }

    /// Applies a one-second countdown tick.
    pub fn tick(&mut self, durations: &PhaseDurations) -> Advance {
        match self.phase {
            Phase::Betting { countdown } => {
                let remaining = countdown.saturating_sub(1);
                if remaining == 0 {
                    self.phase = Phase::Resolving {
                        countdown: durations.resolving_secs,
                        steps_taken: 0,
                    };
                    Advance::EnteredResolving
                } else {
                    self.phase = Phase::Betting {
                        countdown: remaining,
                    };
                    Advance::Countdown { remaining }
                }
            }
            Phase::Result { countdown, outcome } => {
                let remaining = countdown.saturating_sub(1);
                self.phase = Phase::Result {
                    countdown: remaining,
                    outcome,
                };
                if remaining == 0 {
                    Advance::Finished
                } else {
                    Advance::Countdown { remaining }
                }
            }
            Phase::Resolving { .. } => Advance::Ignored,
        }
    }

    /// Applies one animation step while resolving.
    pub fn animate(
        &mut self,
        sample: AnimationSample,
        durations: &PhaseDurations,
    ) -> Advance {
        let Phase::Resolving {
            countdown,
            steps_taken,
        } = self.phase
        else {
            return Advance::Ignored;
        };
        let steps_taken = steps_taken.saturating_add(1);
        self.phase = Phase::Resolving {
            countdown,
            steps_taken,
        };
        self.animation = sample;
        if steps_taken >= durations.animation_steps {
            Advance::AnimationFinished
        } else {
            Advance::Animated { sample }
        }
    }

    /// Moves a resolving round into its result phase. Returns `false` in any other phase.
    pub fn resolve(&mut self, outcome: Outcome, durations: &PhaseDurations) -> bool {
        if !matches!(self.phase, Phase::Resolving { .. }) {
            return false;
        }
        self.phase = Phase::Result {
            countdown: durations.result_secs,
            outcome,
        };
        self.animation = outcome.into();
        true
    }

    /// Adds a stake while betting is open. Any other call leaves the round untouched.
    pub fn place_wager(&mut self, direction: Direction, amount: u64) -> bool {
        if amount == 0 || !matches!(self.phase, Phase::Betting { .. }) {
            return false;
        }
        self.ledger.add(direction, amount);
        true
    }

    pub fn successor(&self, durations: &PhaseDurations) -> Round {
        Round::new(self.id.saturating_add(1), durations)
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            round_id: self.id,
            phase: self.phase.kind(),
            countdown: self.phase.countdown(),
            up_stake: self.ledger.up(),
            down_stake: self.ledger.down(),
            outcome: self.phase.outcome(),
            animation: self.animation,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct RoundSnapshot {
    pub round_id: u64,
    pub phase: PhaseKind,
    pub countdown: u32,
    pub up_stake: u64,
    pub down_stake: u64,
    pub outcome: Option<Outcome>,
    pub animation: AnimationSample,
}

impl RoundSnapshot {
    pub fn accepts_wagers(&self) -> bool {
        self.phase == PhaseKind::Betting
    }

    pub fn stake(&self, direction: Direction) -> u64 {
        match direction {
            Direction::Up => self.up_stake,
            Direction::Down => self.down_stake,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]
    use super::*;

    fn resolving_round(durations: &PhaseDurations) -> Round {
        let mut round = Round::new(1, durations);
        for _ in 0..durations.betting_secs {
            round.tick(durations);
        }
        round
    }

    #[test]
    fn new__starts_betting_with_full_countdown() {
        // given
        let durations = PhaseDurations::default();

        // when
        let round = Round::new(1, &durations);

        // then
        let expected = RoundSnapshot {
            round_id: 1,
            phase: PhaseKind::Betting,
            countdown: 10,
            up_stake: 0,
            down_stake: 0,
            outcome: None,
            animation: AnimationSample::Center,
        };
        assert_eq!(expected, round.snapshot());
    }

    #[test]
    fn tick__counts_down_then_enters_resolving() {
        // given
        let durations = PhaseDurations::default();
        let mut round = Round::new(1, &durations);

        // when
        let advances: Vec<Advance> =
            (0..10).map(|_| round.tick(&durations)).collect();

        // then
        let mut expected: Vec<Advance> = (1..10)
            .rev()
            .map(|remaining| Advance::Countdown { remaining })
            .collect();
        expected.push(Advance::EnteredResolving);
        assert_eq!(expected, advances);
        assert_eq!(
            Phase::Resolving {
                countdown: 5,
                steps_taken: 0
            },
            round.phase()
        );
    }

    #[test]
    fn tick__is_ignored_while_resolving() {
        // given
        let durations = PhaseDurations::default();
        let mut round = resolving_round(&durations);
        let before = round.clone();

        // when
        let advance = round.tick(&durations);

        // then
        assert_eq!(Advance::Ignored, advance);
        assert_eq!(before, round);
    }

    #[test]
    fn animate__finishes_after_configured_steps() {
        // given
        let durations = PhaseDurations::default();
        let mut round = resolving_round(&durations);

        // when
        let advances: Vec<Advance> = (0..10)
            .map(|_| round.animate(AnimationSample::Up, &durations))
            .collect();

        // then
        assert!(
            advances[..9]
                .iter()
                .all(|a| *a == Advance::Animated {
                    sample: AnimationSample::Up
                })
        );
        assert_eq!(Advance::AnimationFinished, advances[9]);
        assert_eq!(5, round.phase().countdown());
    }

    #[test]
    fn animate__is_ignored_outside_resolving() {
        // given
        let durations = PhaseDurations::default();
        let mut round = Round::new(1, &durations);

        // when
        let advance = round.animate(AnimationSample::Down, &durations);

        // then
        assert_eq!(Advance::Ignored, advance);
        assert_eq!(AnimationSample::Center, round.animation());
    }

    #[test]
    fn resolve__sets_outcome_and_matching_animation() {
        // given
        let durations = PhaseDurations::default();
        let mut round = resolving_round(&durations);
        round.animate(AnimationSample::Up, &durations);

        // when
        let resolved = round.resolve(Outcome::Tie, &durations);

        // then
        assert!(resolved);
        let snapshot = round.snapshot();
        assert_eq!(PhaseKind::Result, snapshot.phase);
        assert_eq!(3, snapshot.countdown);
        assert_eq!(Some(Outcome::Tie), snapshot.outcome);
        assert_eq!(AnimationSample::Center, snapshot.animation);
    }

    #[test]
    fn resolve__rejected_while_betting() {
        // given
        let durations = PhaseDurations::default();
        let mut round = Round::new(4, &durations);

        // when
        let resolved = round.resolve(Outcome::Up, &durations);

        // then
        assert!(!resolved);
        assert_eq!(None, round.snapshot().outcome);
    }

    #[test]
    fn tick__result_countdown_reports_finished_at_zero() {
        // given
        let durations = PhaseDurations::default();
        let mut round = resolving_round(&durations);
        round.resolve(Outcome::Down, &durations);

        // when
        let advances: Vec<Advance> = (0..3).map(|_| round.tick(&durations)).collect();

        // then
        let expected = vec![
            Advance::Countdown { remaining: 2 },
            Advance::Countdown { remaining: 1 },
            Advance::Finished,
        ];
        assert_eq!(expected, advances);
    }

    #[test]
    fn place_wager__adds_stake_only_while_betting() {
        // given
        let durations = PhaseDurations::default();
        let mut round = Round::new(1, &durations);

        // when
        let accepted_up = round.place_wager(Direction::Up, 50);
        let accepted_down = round.place_wager(Direction::Down, 20);
        let mut closed = resolving_round(&durations);
        let rejected = closed.place_wager(Direction::Up, 100);

        // then
        assert!(accepted_up && accepted_down);
        assert_eq!(50, round.snapshot().up_stake);
        assert_eq!(20, round.snapshot().down_stake);
        assert!(!rejected);
        assert_eq!(0, closed.ledger().total());
    }

    #[test]
    fn place_wager__zero_amount_is_a_no_op() {
        // given
        let durations = PhaseDurations::default();
        let mut round = Round::new(1, &durations);

        // when
        let accepted = round.place_wager(Direction::Down, 0);

        // then
        assert!(!accepted);
        assert_eq!(0, round.ledger().total());
    }

    #[test]
    fn successor__increments_id_and_clears_stakes() {
        // given
        let durations = PhaseDurations::default();
        let mut round = Round::new(7, &durations);
        round.place_wager(Direction::Up, 100);

        // when
        let next = round.successor(&durations);

        // then
        assert_eq!(8, next.id());
        assert_eq!(0, next.ledger().total());
        assert_eq!(PhaseKind::Betting, next.phase().kind());
    }

    #[test]
    fn phase_kind__next_cycles_through_all_phases() {
        // given
        let start = PhaseKind::Betting;

        // when
        let cycle = [start.next(), start.next().next(), start.next().next().next()];

        // then
        assert_eq!(
            [PhaseKind::Resolving, PhaseKind::Result, PhaseKind::Betting],
            cycle
        );
    }
}
