use std::io;
use std::sync::mpsc;
use std::time::Duration;

use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::CrosstermBackend;
use ratatui::Terminal;

use crate::model::{OptionLetter, Quiz};
use crate::runner::QuizRunner;
use crate::state::{AppState, Dialog};
use crate::submit::{self, HttpSubmitter, SubmitOutcome};
use crate::timer::{ThreadCountdown, TimerEvent};
use crate::view::Controls;

type Runner = QuizRunner<AppState, ThreadCountdown>;

pub fn run_tui(quiz: Quiz, time_limit: Option<u32>, submitter: HttpSubmitter) -> Result<(), String> {
    let (timer_tx, timer_rx) = mpsc::channel::<TimerEvent>();
    let (submit_tx, submit_rx) = mpsc::channel::<SubmitOutcome>();

    let state = AppState::new(quiz.display_title(), Some(submitter.endpoint().clone()));
    let mut runner = QuizRunner::new(
        quiz.questions,
        time_limit,
        state,
        ThreadCountdown::new(timer_tx),
    );

    enable_raw_mode().map_err(|e| format!("Cannot enable raw mode: {}", e))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| format!("Cannot enter alternate screen: {}", e))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal =
        Terminal::new(backend).map_err(|e| format!("Cannot create terminal: {}", e))?;

    runner.start();

    let result = main_loop(
        &mut terminal,
        &mut runner,
        &timer_rx,
        &submit_rx,
        &submit_tx,
        &submitter,
    );

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

fn main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    runner: &mut Runner,
    timer_rx: &mpsc::Receiver<TimerEvent>,
    submit_rx: &mpsc::Receiver<SubmitOutcome>,
    submit_tx: &mpsc::Sender<SubmitOutcome>,
    submitter: &HttpSubmitter,
) -> Result<(), String> {
    loop {
        terminal
            .draw(|f| crate::ui::draw(f, runner.view()))
            .map_err(|e| format!("Draw error: {}", e))?;

        if runner.view().should_quit {
            break;
        }

        if event::poll(Duration::from_millis(100))
            .map_err(|e| format!("Poll error: {}", e))?
        {
            if let Event::Key(key) = event::read().map_err(|e| format!("Read error: {}", e))? {
                if key.kind == KeyEventKind::Press {
                    handle_key(key, runner, submitter, submit_tx);
                }
            }
        }

        while let Ok(ev) = timer_rx.try_recv() {
            runner.on_timer(ev);
        }

        while let Ok(outcome) = submit_rx.try_recv() {
            runner.view_mut().submitting = false;
            runner.complete_submission(outcome);
        }
    }

    Ok(())
}

/// What a key press asks the quiz to do, once dialogs have had their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Select(OptionLetter),
    Next,
    Prev,
    Submit,
    Help,
    ConfirmQuit,
    Quit,
}

/// Map a key to an action given the controls on screen. `submitted` is true
/// once the results screen is showing; only leaving works then.
pub fn action_for(key: KeyEvent, controls: &Controls, submitted: bool) -> Option<Action> {
    if submitted {
        return matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q'))
            .then_some(Action::Quit);
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('q') | KeyCode::Char('c') => Some(Action::ConfirmQuit),
            KeyCode::Char('s') => Some(Action::Submit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('?') => Some(Action::Help),
        KeyCode::Right | KeyCode::Down | KeyCode::Char('n') if controls.next => Some(Action::Next),
        KeyCode::Left | KeyCode::Up | KeyCode::Char('p') if controls.prev => Some(Action::Prev),
        KeyCode::Enter if controls.submit => Some(Action::Submit),
        KeyCode::Enter if controls.next => Some(Action::Next),
        KeyCode::Char(c) => OptionLetter::from_char(c).map(Action::Select),
        _ => None,
    }
}

fn handle_key(
    key: KeyEvent,
    runner: &mut Runner,
    submitter: &HttpSubmitter,
    submit_tx: &mpsc::Sender<SubmitOutcome>,
) {
    if runner.view().has_dialog() {
        handle_dialog_key(key, runner.view_mut());
        return;
    }

    let state = runner.view();
    let Some(action) = action_for(key, &state.controls, state.is_submitted()) else {
        return;
    };

    match action {
        Action::Select(letter) => {
            runner.select(letter);
        }
        Action::Next => runner.next(),
        Action::Prev => runner.prev(),
        Action::Submit => do_submit(runner, submitter, submit_tx),
        Action::Help => runner.view_mut().push_dialog(Dialog::Help),
        Action::ConfirmQuit => runner.view_mut().push_dialog(Dialog::ConfirmQuit),
        Action::Quit => runner.view_mut().should_quit = true,
    }
}

fn handle_dialog_key(key: KeyEvent, state: &mut AppState) {
    match state.top_dialog().cloned() {
        Some(Dialog::Alert(_)) => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                state.pop_dialog();
            }
        }
        Some(Dialog::ConfirmQuit) => match key.code {
            KeyCode::Enter => {
                state.pop_dialog();
                state.should_quit = true;
            }
            KeyCode::Esc => {
                state.pop_dialog();
            }
            _ => {}
        },
        Some(Dialog::Help) => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?')) {
                state.pop_dialog();
            }
        }
        None => {}
    }
}

fn do_submit(runner: &mut Runner, submitter: &HttpSubmitter, submit_tx: &mpsc::Sender<SubmitOutcome>) {
    let answers = runner.submit();
    runner.view_mut().submitting = true;
    submit::spawn_submit(submitter.clone(), answers, submit_tx.clone());
}
