use crate::{
    app::AppSnapshot,
    i18n::Label,
    round::{
        self,
        AnimationSample,
        Outcome,
        PhaseKind,
    },
    session::Role,
};
use color_eyre::eyre::{
    Result,
    WrapErr,
    eyre,
};
use crossterm::{
    event::{
        Event,
        EventStream,
        KeyCode,
        KeyEvent,
        KeyEventKind,
        KeyModifiers,
    },
    terminal::{
        disable_raw_mode,
        enable_raw_mode,
    },
};
use futures::StreamExt;
use itertools::Itertools;
use ratatui::{
    prelude::*,
    widgets::*,
};
use std::io::stdout;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UserEvent {
    Quit,
    Wager(round::Direction),
    SelectAmount(usize),
    NextAmount,
    PrevAmount,
    ToggleLanguage,
    PinOutcome(Outcome),
    Redraw,
}

pub type InputEventReceiver = EventStream;

#[derive(Debug, Default)]
pub struct UiState {
    mode: Mode,
    terminal: Option<Terminal<CrosstermBackend<std::io::Stdout>>>,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
enum Mode {
    #[default]
    Normal,
    QuitModal,
}

pub fn terminal_enter(state: &mut UiState) -> Result<()> {
    enable_raw_mode()?;
    crossterm::execute!(
        std::io::stdout(),
        crossterm::terminal::EnterAlternateScreen,
        crossterm::event::EnableMouseCapture
    )?;
    // Single persistent Terminal so buffers survive between draws
    let backend = CrosstermBackend::new(stdout());
    let terminal = Terminal::new(backend)?;
    state.terminal = Some(terminal);
    Ok(())
}

pub fn terminal_exit() -> Result<()> {
    disable_raw_mode()?;
    crossterm::execute!(
        std::io::stdout(),
        crossterm::event::DisableMouseCapture,
        crossterm::terminal::LeaveAlternateScreen
    )?;
    Ok(())
}

pub fn draw(state: &mut UiState, snap: &AppSnapshot) -> Result<()> {
    if let Some(mut term) = state.terminal.take() {
        // Put the terminal back before surfacing a draw error
        let res = term.draw(|f| ui(f, state, snap)).map(|_| ());
        state.terminal = Some(term);
        res?;
    }
    Ok(())
}

pub fn input_event_stream() -> InputEventReceiver {
    EventStream::new()
}

pub async fn next_raw_event(input: &mut InputEventReceiver) -> Result<Event> {
    match input.next().await {
        Some(Ok(event)) => Ok(event),
        Some(Err(err)) => Err(err).wrap_err("reading terminal input failed"),
        None => Err(eyre!("terminal input stream closed")),
    }
}

/// Maps a raw terminal event onto a user action, updating modal state on the way.
pub fn interpret_event(state: &mut UiState, event: Event) -> Option<UserEvent> {
    let key = match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => key,
        Event::Resize(_, _) => return Some(UserEvent::Redraw),
        _ => return None,
    };
    if is_ctrl_c(&key) {
        return Some(UserEvent::Quit);
    }
    match state.mode {
        Mode::QuitModal => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(UserEvent::Quit),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                state.mode = Mode::Normal;
                Some(UserEvent::Redraw)
            }
            _ => None,
        },
        Mode::Normal => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                state.mode = Mode::QuitModal;
                Some(UserEvent::Redraw)
            }
            KeyCode::Char('u') | KeyCode::Up => {
                Some(UserEvent::Wager(round::Direction::Up))
            }
            KeyCode::Char('d') | KeyCode::Down => {
                Some(UserEvent::Wager(round::Direction::Down))
            }
            KeyCode::Char(c @ '1'..='9') => {
                let idx = c.to_digit(10).map(|d| d as usize - 1)?;
                Some(UserEvent::SelectAmount(idx))
            }
            KeyCode::Right => Some(UserEvent::NextAmount),
            KeyCode::Left => Some(UserEvent::PrevAmount),
            KeyCode::Char('l') => Some(UserEvent::ToggleLanguage),
            KeyCode::Char('U') => Some(UserEvent::PinOutcome(Outcome::Up)),
            KeyCode::Char('D') => Some(UserEvent::PinOutcome(Outcome::Down)),
            KeyCode::Char('T') => Some(UserEvent::PinOutcome(Outcome::Tie)),
            _ => None,
        },
    }
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

fn ui(f: &mut Frame, state: &UiState, snap: &AppSnapshot) {
    f.render_widget(Clear, f.area());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Length(3), // timer + phase
            Constraint::Length(9), // market animation
            Constraint::Length(8), // betting + previous results
            Constraint::Length(6), // rules
            Constraint::Min(4),    // status/errors + help
        ])
        .split(f.area());

    draw_header(f, chunks[0], snap);
    draw_timer(f, chunks[1], snap);
    draw_market(f, chunks[2], snap);
    draw_lower(f, chunks[3], snap);
    draw_rules(f, chunks[4], snap);
    draw_bottom(f, chunks[5], snap);
    draw_modals(f, state);
}

fn draw_header(f: &mut Frame, area: Rect, snap: &AppSnapshot) {
    let lang = snap.language;
    let role = match snap.role {
        Role::Admin => lang.label(Label::Admin),
        Role::Player => lang.label(Label::Player),
    };
    let line = Line::from(vec![
        Span::styled(
            "Share Vegam Trading",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            " | {} | {} | Round #{} | {}",
            snap.player,
            role,
            snap.round.round_id,
            lang.code()
        )),
    ]);
    let widget = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(lang.label(Label::Game)));
    f.render_widget(widget, area);
}

fn draw_timer(f: &mut Frame, area: Rect, snap: &AppSnapshot) {
    let text = format!(
        "{}: {}s  {}",
        snap.language.label(Label::Timer),
        snap.round.countdown,
        snap.language.label(phase_label(snap.round.phase))
    );
    let style = match snap.round.phase {
        PhaseKind::Betting => Style::default().fg(Color::Green),
        PhaseKind::Resolving => Style::default().fg(Color::Yellow),
        PhaseKind::Result => Style::default().fg(Color::Magenta),
    };
    let widget = Paragraph::new(text)
        .style(style.add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(widget, area);
}

fn draw_market(f: &mut Frame, area: Rect, snap: &AppSnapshot) {
    let glyph = Span::styled(
        animation_glyph(snap.round.animation),
        animation_style(snap.round.animation).add_modifier(Modifier::BOLD),
    );
    // Up sits on the top row, Down on the bottom, Center in between
    let row = match snap.round.animation {
        AnimationSample::Up => 0,
        AnimationSample::Center => 2,
        AnimationSample::Down => 4,
    };
    let mut lines: Vec<Line> = (0..5)
        .map(|i| {
            if i == row {
                Line::from(glyph.clone())
            } else {
                Line::from("│")
            }
        })
        .collect();
    lines.push(Line::from(""));
    match snap.round.outcome {
        Some(outcome) => lines.push(Line::from(vec![
            Span::raw(format!("{}: ", snap.language.label(Label::Result))),
            Span::styled(outcome.to_string(), outcome_style(outcome)),
        ])),
        None => lines.push(Line::from("")),
    }
    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(snap.language.label(Label::Market)),
        );
    f.render_widget(widget, area);
}

// Betting controls (left) + previous results (right)
fn draw_lower(f: &mut Frame, area: Rect, snap: &AppSnapshot) {
    let lower = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    draw_betting_panel(f, lower[0], snap);
    draw_previous_results(f, lower[1], snap);
}

fn draw_betting_panel(f: &mut Frame, area: Rect, snap: &AppSnapshot) {
    let lang = snap.language;
    let mut lines = Vec::new();
    if snap.round.accepts_wagers() {
        let mut amounts = vec![Span::raw(format!("{}: ", lang.label(Label::Amount)))];
        for (i, amount) in snap.denominations.iter().enumerate() {
            if i == snap.selected_index {
                amounts.push(Span::styled(
                    format!("[₹{amount}]"),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ));
            } else {
                amounts.push(Span::raw(format!(" ₹{amount} ")));
            }
        }
        lines.push(Line::from(amounts));
    } else {
        lines.push(Line::styled(
            lang.label(Label::BettingClosed),
            Style::default().fg(Color::DarkGray),
        ));
    }
    lines.push(Line::styled(
        format!(
            "▲ {} {} (₹{})",
            lang.label(Label::Bet),
            lang.label(Label::Up),
            snap.round.up_stake
        ),
        Style::default().fg(Color::Green),
    ));
    lines.push(Line::styled(
        format!(
            "▼ {} {} (₹{})",
            lang.label(Label::Bet),
            lang.label(Label::Down),
            snap.round.down_stake
        ),
        Style::default().fg(Color::Red),
    ));
    if snap.role == Role::Admin {
        let pinned = snap
            .pinned
            .map(|o| o.to_string())
            .unwrap_or_else(|| lang.label(Label::Random).to_string());
        lines.push(Line::from(format!(
            "{}: {pinned}",
            lang.label(Label::NextResult)
        )));
    }
    let title = lang.label(Label::PlaceYourBet);
    let widget =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(widget, area);
}

fn draw_previous_results(f: &mut Frame, area: Rect, snap: &AppSnapshot) {
    let line = if snap.history.is_empty() {
        Line::styled(
            snap.language.label(Label::NoResultsYet),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        let spans = snap
            .history
            .iter()
            .map(|entry| Span::styled(outcome_symbol(entry.outcome), outcome_style(entry.outcome)))
            .interleave_shortest(std::iter::repeat(Span::raw(" ")))
            .collect::<Vec<_>>();
        Line::from(spans)
    };
    let rounds = snap.history.iter().map(|entry| entry.round_id).join(" ");
    let lines = vec![line, Line::styled(rounds, Style::default().fg(Color::DarkGray))];
    let title = format!(
        "{} ({})",
        snap.language.label(Label::PreviousResults),
        snap.history_capacity
    );
    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(widget, area);
}

fn draw_rules(f: &mut Frame, area: Rect, snap: &AppSnapshot) {
    let lang = snap.language;
    let rules = vec![
        Line::from(format!(
            "• {} ({}s)",
            lang.label(Label::RuleBetting),
            snap.betting_secs
        )),
        Line::from(format!("• {}", lang.label(Label::RuleWin))),
        Line::from(format!("• {}", lang.label(Label::RuleTie))),
        Line::from(format!("• {}", lang.label(Label::RuleNewRound))),
    ];
    let widget = Paragraph::new(rules)
        .style(Style::default().fg(Color::Gray))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(lang.label(Label::GameRules)),
        );
    f.render_widget(widget, area);
}

fn draw_bottom(f: &mut Frame, area: Rect, snap: &AppSnapshot) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .split(area);

    let status_widget = if snap.errors.is_empty() {
        let text = if snap.status.trim().is_empty() {
            String::from("Ready")
        } else {
            snap.status.clone()
        };
        Paragraph::new(text)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("Status"))
            .style(Style::default().fg(Color::Green))
    } else {
        let lines: Vec<Line> = snap.errors.iter().map(|e| Line::from(e.clone())).collect();
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("Errors"))
            .style(Style::default().fg(Color::Red))
    };
    f.render_widget(status_widget, chunks[0]);

    let mut help =
        String::from("u/↑ bet UP | d/↓ bet DOWN | 1-9 or ←/→ amount | l language");
    if snap.role == Role::Admin {
        help.push_str(" | U/D/T set result");
    }
    help.push_str(" | q/Esc quit");
    let help = Paragraph::new(help).block(Block::default().borders(Borders::ALL).title("Help"));
    f.render_widget(help, chunks[1]);
}

fn draw_modals(f: &mut Frame, state: &UiState) {
    match state.mode {
        Mode::QuitModal => {
            let area = centered_rect(40, 20, f.area());
            let block = Block::default().borders(Borders::ALL).title("Confirm Quit");
            let p = Paragraph::new("Quit the game? (Y/N)");
            f.render_widget(Clear, area);
            f.render_widget(block.clone(), area);
            f.render_widget(p, block.inner(area));
        }
        Mode::Normal => {}
    }
}

fn centered_rect(w_percent: u16, h_percent: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - h_percent) / 2),
            Constraint::Percentage(h_percent),
            Constraint::Percentage((100 - h_percent) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - w_percent) / 2),
            Constraint::Percentage(w_percent),
            Constraint::Percentage((100 - w_percent) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn phase_label(phase: PhaseKind) -> Label {
    match phase {
        PhaseKind::Betting => Label::BettingTime,
        PhaseKind::Resolving => Label::MarketMoving,
        PhaseKind::Result => Label::Result,
    }
}

fn animation_glyph(sample: AnimationSample) -> &'static str {
    match sample {
        AnimationSample::Up => "📈",
        AnimationSample::Down => "📉",
        AnimationSample::Center => "📊",
    }
}

fn animation_style(sample: AnimationSample) -> Style {
    match sample {
        AnimationSample::Up => Style::default().fg(Color::Green),
        AnimationSample::Down => Style::default().fg(Color::Red),
        AnimationSample::Center => Style::default().fg(Color::Yellow),
    }
}

fn outcome_symbol(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Up => "▲",
        Outcome::Down => "▼",
        Outcome::Tie => "=",
    }
}

fn outcome_style(outcome: Outcome) -> Style {
    animation_style(outcome.into())
}
