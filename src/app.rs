use crate::{
    config::GameConfig,
    controller::{
        RoundController,
        RoundEvent,
    },
    history::HistoryEntry,
    i18n::Language,
    round::{
        Direction,
        Outcome,
        RoundSnapshot,
    },
    sampler::{
        OutcomeSampler,
        RngSampler,
    },
    session::{
        Role,
        Session,
    },
    ui,
};
use color_eyre::eyre::{
    Result,
    WrapErr,
};
use std::{
    fs::File,
    io::{
        BufWriter,
        Write,
    },
    path::{
        Path,
        PathBuf,
    },
};
use tracing::{
    error,
    info,
};

const MAX_ERRORS: usize = 50;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub game: GameConfig,
    pub session: Session,
    /// Fixed seed for reproducible outcomes; entropy when absent.
    pub seed: Option<u64>,
    /// Where to dump the result history as JSON on exit.
    pub history_out: Option<PathBuf>,
}

#[derive(Clone, Debug)]
pub struct AppSnapshot {
    pub round: RoundSnapshot,
    pub history: Vec<HistoryEntry>,
    pub history_capacity: usize,
    pub betting_secs: u32,
    pub player: String,
    pub role: Role,
    pub language: Language,
    pub denominations: Vec<u64>,
    pub selected_index: usize,
    pub pinned: Option<Outcome>,
    pub status: String,
    pub errors: Vec<String>,
}

pub struct AppController<S = RngSampler> {
    pub rounds: RoundController<S>,
    pub session: Session,
    pub status: String,
    errors: Vec<String>,
}

impl AppController<RngSampler> {
    pub fn from_config(config: &AppConfig) -> Self {
        let sampler = match config.seed {
            Some(seed) => RngSampler::from_seed(seed),
            None => RngSampler::from_entropy(),
        };
        Self::new(config.game.clone(), config.session.clone(), sampler)
    }
}

impl<S: OutcomeSampler> AppController<S> {
    pub fn new(game: GameConfig, session: Session, sampler: S) -> Self {
        Self {
            rounds: RoundController::new(game, sampler),
            session,
            status: String::from("Ready"),
            errors: Vec::new(),
        }
    }

    pub fn build_snapshot(&self) -> AppSnapshot {
        let config = self.rounds.config();
        AppSnapshot {
            round: self.rounds.state(),
            history: self.rounds.history(),
            history_capacity: config.history_capacity,
            betting_secs: config.betting_secs,
            player: self.session.player.clone(),
            role: self.session.role,
            language: self.session.language,
            denominations: self.session.selection.denominations().to_vec(),
            selected_index: self.session.selection.index(),
            pinned: self.rounds.pinned_outcome(),
            status: self.status.clone(),
            errors: self.errors.iter().rev().take(5).cloned().collect(),
        }
    }

    /// Stakes the selected denomination on `direction` if betting is open.
    pub fn place_wager(&mut self, direction: Direction) {
        let amount = self.session.selection.amount();
        if !self.rounds.state().accepts_wagers() {
            self.status = String::from("Betting is closed for this round");
            return;
        }
        self.rounds.place_wager(direction, amount);
        self.errors.clear();
        self.status = format!("Placed ₹{amount} on {direction}");
    }

    pub fn select_amount(&mut self, index: usize) {
        if self.session.selection.select(index) {
            self.status = format!("Bet amount ₹{}", self.session.selection.amount());
        }
    }

    pub fn next_amount(&mut self) {
        self.session.selection.next();
        self.status = format!("Bet amount ₹{}", self.session.selection.amount());
    }

    pub fn prev_amount(&mut self) {
        self.session.selection.prev();
        self.status = format!("Bet amount ₹{}", self.session.selection.amount());
    }

    pub fn toggle_language(&mut self) {
        self.session.toggle_language();
        self.status = format!("Language: {}", self.session.language);
    }

    pub fn pin_outcome(&mut self, outcome: Outcome) {
        if !self.session.is_admin() {
            self.push_errors(vec![String::from(
                "Only admins can set the game result",
            )]);
            return;
        }
        if self.rounds.pin_outcome(outcome) {
            self.errors.clear();
            self.status = format!("Next result set to {outcome}");
        } else {
            self.push_errors(vec![String::from(
                "Result already announced; pin applies before the result phase",
            )]);
        }
    }

    /// Folds a controller event into the status line.
    pub fn on_round_event(&mut self, event: RoundEvent) {
        match event {
            RoundEvent::ResolvingStarted { round_id } => {
                self.status = format!("Round #{round_id}: betting closed");
            }
            RoundEvent::Resolved { round_id, outcome } => {
                let state = self.rounds.state();
                self.status = format!(
                    "Round #{round_id} result: {outcome} (UP ₹{} / DOWN ₹{})",
                    state.up_stake, state.down_stake
                );
            }
            RoundEvent::RoundStarted { round_id } => {
                // Errors belong to the round they happened in
                self.errors.clear();
                self.status = format!("Round #{round_id}: place your bets");
            }
            RoundEvent::Countdown { .. } | RoundEvent::Animated { .. } => {}
        }
    }

    pub fn apply(&mut self, event: ui::UserEvent) {
        match event {
            ui::UserEvent::Wager(direction) => self.place_wager(direction),
            ui::UserEvent::SelectAmount(index) => self.select_amount(index),
            ui::UserEvent::NextAmount => self.next_amount(),
            ui::UserEvent::PrevAmount => self.prev_amount(),
            ui::UserEvent::ToggleLanguage => self.toggle_language(),
            ui::UserEvent::PinOutcome(outcome) => self.pin_outcome(outcome),
            ui::UserEvent::Quit | ui::UserEvent::Redraw => {}
        }
    }

    fn push_errors(&mut self, mut items: Vec<String>) {
        if items.is_empty() {
            return;
        }
        for item in &items {
            error!("{}", item);
        }
        self.errors.append(&mut items);
        if self.errors.len() > MAX_ERRORS {
            let drain = self.errors.len() - MAX_ERRORS;
            self.errors.drain(0..drain);
        }
    }
}

pub fn write_history(path: &Path, history: &[HistoryEntry]) -> Result<()> {
    let file = File::create(path)
        .wrap_err_with(|| format!("creating history file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, history)
        .wrap_err_with(|| format!("writing history file {}", path.display()))?;
    writer
        .flush()
        .wrap_err_with(|| format!("flushing history file {}", path.display()))?;
    info!(path = %path.display(), entries = history.len(), "history exported");
    Ok(())
}

pub async fn run_app(config: AppConfig) -> Result<()> {
    let mut controller = AppController::from_config(&config);
    let mut ui_state = ui::UiState::default();
    let mut input_events = ui::input_event_stream();

    info!(
        player = %controller.session.player,
        role = ?controller.session.role,
        "starting UI"
    );
    ui::terminal_enter(&mut ui_state)?;
    let res = run_loop(&mut controller, &mut ui_state, &mut input_events).await;
    ui::terminal_exit()?;

    finish(res, config.history_out.as_deref(), &controller.rounds.history())
}

/// Exports the history even when the loop failed; the loop error wins if both fail.
fn finish(
    loop_result: Result<()>,
    history_out: Option<&Path>,
    history: &[HistoryEntry],
) -> Result<()> {
    if let Some(path) = history_out {
        if let Err(err) = write_history(path, history) {
            error!(error = %err, "history export failed");
            loop_result?;
            return Err(err);
        }
    }
    loop_result
}

async fn run_loop<S: OutcomeSampler>(
    controller: &mut AppController<S>,
    ui_state: &mut ui::UiState,
    input_events: &mut ui::InputEventReceiver,
) -> Result<()> {
    info!("running app loop");
    ui::draw(ui_state, &controller.build_snapshot()).wrap_err("initial draw failed")?;
    loop {
        tokio::select! {
            event = controller.rounds.next_event() => {
                controller.on_round_event(event);
                ui::draw(ui_state, &controller.build_snapshot())
                    .wrap_err("draw after round event failed")?;
            }
            _ = tokio::signal::ctrl_c() => {
                break;
            }
            raw_ev = ui::next_raw_event(input_events) => {
                let event = raw_ev?;
                let Some(ev) = ui::interpret_event(ui_state, event) else {
                    continue;
                };
                if ev == ui::UserEvent::Quit {
                    break;
                }
                controller.apply(ev);
                ui::draw(ui_state, &controller.build_snapshot())
                    .wrap_err("draw after input failed")?;
            }
        }
    }
    info!(round_id = controller.rounds.state().round_id, "app loop finished");
    Ok(())
}
