use crate::model::*;
use crate::submit::SubmitOutcome;
use crate::timer::{Countdown, TimerEvent, TimerId};
use crate::view::QuizView;

pub const EMPTY_MESSAGE: &str = "No questions available.";
pub const READY_MESSAGE: &str = "All done, ready to submit.";
pub const SUBMIT_ERROR_MESSAGE: &str = "Error submitting quiz";
pub const NETWORK_ERROR_MESSAGE: &str = "Network error";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActiveTimer {
    id: TimerId,
    remaining: u32,
}

/// Walks the user through the questions one at a time.
///
/// `current_index` ranges over `0..=questions.len()`; the upper bound is the
/// "ready to submit" state. At most one countdown runs, and it always
/// belongs to the question on screen. Once an accepted submission has sent
/// the view to the results location the runner stops responding.
pub struct QuizRunner<V: QuizView, C: Countdown> {
    questions: Vec<Question>,
    time_limit: u32,
    current_index: usize,
    answers: AnswerSet,
    selected: Option<OptionLetter>,
    timer: Option<ActiveTimer>,
    navigated: bool,
    view: V,
    countdown: C,
}

impl<V: QuizView, C: Countdown> QuizRunner<V, C> {
    /// `time_limit` of `None` or zero means the default of 20 seconds.
    pub fn new(questions: Vec<Question>, time_limit: Option<u32>, view: V, countdown: C) -> Self {
        Self {
            questions,
            time_limit: effective_time_limit(time_limit),
            current_index: 0,
            answers: AnswerSet::new(),
            selected: None,
            timer: None,
            navigated: false,
            view,
            countdown,
        }
    }

    /// Show the first question, or the empty state.
    pub fn start(&mut self) {
        log::info!(
            "starting quiz: {} questions, {}s each",
            self.questions.len(),
            self.time_limit
        );
        self.render();
    }

    pub fn render(&mut self) {
        self.cancel_timer();
        if self.navigated {
            return;
        }

        if self.questions.is_empty() {
            self.selected = None;
            self.view.show_empty();
            return;
        }

        let Some(question) = self.questions.get(self.current_index) else {
            self.selected = None;
            self.view.show_terminal();
            self.view.set_countdown(0);
            return;
        };

        self.selected = self.answers.get(&question.id).copied();
        self.view
            .show_question(self.current_index, question, self.selected);
        self.view
            .set_progress(self.current_index + 1, self.questions.len());
        self.start_timer();
    }

    /// Record `letter` for the question on screen. Returns false when the
    /// question does not offer it or no question is showing.
    pub fn select(&mut self, letter: OptionLetter) -> bool {
        if self.navigated {
            return false;
        }
        let Some(question) = self.questions.get(self.current_index) else {
            return false;
        };
        if !question.offers(letter) {
            return false;
        }

        self.selected = Some(letter);
        self.answers.insert(question.id.clone(), letter);
        self.view.show_selection(letter);
        log::debug!("question {} answered {}", question.id, letter);
        true
    }

    pub fn next(&mut self) {
        if self.navigated || self.is_finished() {
            return;
        }
        self.capture_selection();
        self.current_index += 1;
        log::debug!("advanced to index {}", self.current_index);
        self.render();
    }

    /// Going back does not capture the selection on screen.
    pub fn prev(&mut self) {
        if self.navigated || self.current_index == 0 {
            return;
        }
        self.current_index -= 1;
        log::debug!("went back to index {}", self.current_index);
        self.render();
    }

    pub fn on_timer(&mut self, event: TimerEvent) {
        match event {
            TimerEvent::Tick(id) => self.tick(id),
        }
    }

    fn tick(&mut self, id: TimerId) {
        let Some(timer) = self.timer.as_mut().filter(|t| t.id == id) else {
            log::debug!("ignoring stale tick from timer {}", id);
            return;
        };

        timer.remaining = timer.remaining.saturating_sub(1);
        let remaining = timer.remaining;
        self.view.set_countdown(remaining);

        if remaining == 0 {
            log::info!("time expired on index {}", self.current_index);
            self.cancel_timer();
            self.next();
        }
    }

    /// Stop the clock and hand back everything answered so far.
    pub fn submit(&mut self) -> AnswerSet {
        self.cancel_timer();
        self.capture_selection();
        log::info!("submitting {} answers", self.answers.len());
        self.answers.clone()
    }

    pub fn complete_submission(&mut self, outcome: SubmitOutcome) {
        if self.navigated {
            log::debug!("ignoring reply after navigation: {:?}", outcome);
            return;
        }
        match outcome {
            SubmitOutcome::Success(response) if response.is_ok() => {
                log::info!("submission accepted");
                self.cancel_timer();
                self.navigated = true;
                self.view.navigate(RESULT_PATH, &response);
            }
            SubmitOutcome::Success(response) => {
                log::warn!("submission rejected with status {:?}", response.status);
                self.view.alert(SUBMIT_ERROR_MESSAGE);
            }
            SubmitOutcome::Failure(reason) => {
                log::warn!("submission failed: {}", reason);
                self.view.alert(NETWORK_ERROR_MESSAGE);
            }
        }
    }

    fn capture_selection(&mut self) {
        let Some(letter) = self.selected else {
            return;
        };
        if let Some(question) = self.questions.get(self.current_index) {
            self.answers.insert(question.id.clone(), letter);
        }
    }

    fn start_timer(&mut self) {
        self.cancel_timer();
        let id = self.countdown.start(self.time_limit);
        self.timer = Some(ActiveTimer {
            id,
            remaining: self.time_limit,
        });
        self.view.set_countdown(self.time_limit);
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            self.countdown.cancel(timer.id);
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_finished(&self) -> bool {
        self.current_index >= self.questions.len()
    }

    /// True once an accepted submission has navigated away.
    pub fn has_navigated(&self) -> bool {
        self.navigated
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn selected(&self) -> Option<OptionLetter> {
        self.selected
    }

    pub fn active_timer(&self) -> Option<TimerId> {
        self.timer.map(|t| t.id)
    }

    pub fn remaining_seconds(&self) -> Option<u32> {
        self.timer.map(|t| t.remaining)
    }

    pub fn time_limit(&self) -> u32 {
        self.time_limit
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn countdown(&self) -> &C {
        &self.countdown
    }
}
