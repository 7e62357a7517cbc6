#![allow(non_snake_case)]
use share_vegam::{
    Direction,
    Outcome,
    PhaseKind,
    RoundEvent,
    config::GameConfig,
    sampler::RngSampler,
    test_helpers::{
        ScriptedSampler,
        TestContext,
    },
};

#[test]
fn round__full_cycle_settles_and_starts_fresh_round() {
    let mut ctx = TestContext::with_sampler(ScriptedSampler::new([Outcome::Down]));
    // given
    ctx.controller.place_wager(Direction::Up, 50);
    ctx.controller.place_wager(Direction::Down, 20);
    let state = ctx.controller.state();
    assert_eq!((1, PhaseKind::Betting, 10), (state.round_id, state.phase, state.countdown));
    assert_eq!((50, 20), (state.up_stake, state.down_stake));

    // when
    ctx.advance_times(10);
    let resolving = ctx.controller.state();
    ctx.advance_times(10);
    let result = ctx.controller.state();
    let history = ctx.controller.history();
    ctx.advance_times(3);
    let next = ctx.controller.state();

    // then
    assert_eq!(PhaseKind::Resolving, resolving.phase);
    assert_eq!(PhaseKind::Result, result.phase);
    assert_eq!(Some(Outcome::Down), result.outcome);
    assert_eq!(1, history.len());
    assert_eq!((1, Outcome::Down), (history[0].round_id, history[0].outcome));
    assert_eq!(PhaseKind::Betting, next.phase);
    assert_eq!(2, next.round_id);
    assert_eq!((0, 0), (next.up_stake, next.down_stake));
    assert_eq!(None, next.outcome);
}

#[test]
fn place_wager__is_a_no_op_while_resolving() {
    let mut ctx = TestContext::new();
    // given
    ctx.controller.place_wager(Direction::Up, 30);
    ctx.advance_until(PhaseKind::Resolving);
    ctx.advance_times(3);
    let before = ctx.controller.state();

    // when
    ctx.controller.place_wager(Direction::Down, 100);
    ctx.controller.place_wager(Direction::Up, 100);

    // then
    let actual = ctx.controller.state();
    assert_eq!(before, actual);
}

#[test]
fn place_wager__is_a_no_op_in_result_phase() {
    let mut ctx = TestContext::new();
    // given
    ctx.advance_until(PhaseKind::Result);
    let before = ctx.controller.state();

    // when
    ctx.controller.place_wager(Direction::Up, 10);

    // then
    assert_eq!(before, ctx.controller.state());
}

#[test]
fn history__keeps_only_the_last_ten_rounds() {
    let outcomes = (0..11).map(|i| Outcome::ALL[i % 3]);
    let mut ctx = TestContext::with_sampler(ScriptedSampler::new(outcomes));
    // given
    for _ in 0..10 {
        ctx.complete_round();
    }
    assert_eq!(10, ctx.controller.history().len());

    // when
    ctx.complete_round();

    // then
    let history = ctx.controller.history();
    let round_ids: Vec<u64> = history.iter().map(|entry| entry.round_id).collect();
    let expected: Vec<u64> = (2..=11).rev().collect();
    assert_eq!(expected, round_ids);
    assert!(history.iter().all(|entry| entry.round_id != 1));
}

#[test]
fn phases__cycle_without_skipping_or_repeating() {
    let mut ctx = TestContext::with_config(GameConfig::default(), RngSampler::from_seed(7));
    // given
    let mut phases = vec![ctx.controller.state().phase];

    // when
    for _ in 0..(23 * 4) {
        ctx.controller.advance();
        let phase = ctx.controller.state().phase;
        if phases.last() != Some(&phase) {
            phases.push(phase);
        }
    }

    // then
    assert_eq!(13, phases.len());
    for pair in phases.windows(2) {
        assert_eq!(pair[0].next(), pair[1]);
    }
}

#[test]
fn resolved_event__always_carries_the_result_outcome() {
    let mut ctx = TestContext::with_config(GameConfig::default(), RngSampler::from_seed(42));
    // given
    let mut resolved = 0;

    // when
    for _ in 0..(23 * 20) {
        let event = ctx.controller.advance();
        // then
        if let RoundEvent::Resolved { round_id, outcome } = event {
            let state = ctx.controller.state();
            assert_eq!(round_id, state.round_id);
            assert_eq!(Some(outcome), state.outcome);
            resolved += 1;
        }
    }
    assert_eq!(20, resolved);
}

#[test]
fn pin_outcome__overrides_sampler_for_one_round_only() {
    let sampler = ScriptedSampler::new([]).with_fallback(Outcome::Up);
    let mut ctx = TestContext::with_sampler(sampler);
    // given
    ctx.advance_until(PhaseKind::Resolving);
    assert!(ctx.controller.pin_outcome(Outcome::Tie));

    // when
    let first = ctx.complete_round();
    let second = ctx.complete_round();

    // then
    assert_eq!((Outcome::Tie, Outcome::Up), (first, second));
}
