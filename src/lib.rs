pub mod app;

pub mod config;

pub mod controller;

pub mod history;

pub mod i18n;

pub mod ledger;

pub mod round;

pub mod sampler;

pub mod session;

pub mod test_helpers;

pub mod ui;

pub use controller::{
    RoundController,
    RoundEvent,
};
pub use round::{
    AnimationSample,
    Direction,
    Outcome,
    PhaseKind,
    RoundSnapshot,
};
