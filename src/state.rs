use reqwest::Url;

use crate::model::{OptionLetter, Question};
use crate::submit::SubmitResponse;
use crate::view::{Controls, QuizView};

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Loading,
    Empty,
    Question {
        position: usize,
        question: Question,
        selected: Option<OptionLetter>,
    },
    ReadyToSubmit,
    Submitted {
        location: String,
        response: SubmitResponse,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Dialog {
    Alert(String),
    ConfirmQuit,
    Help,
}

/// Everything the terminal screens draw from.
#[derive(Debug, Clone)]
pub struct AppState {
    pub title: String,
    pub body: Body,
    pub progress: Option<(usize, usize)>,
    pub countdown: u32,
    pub controls: Controls,
    pub dialog_stack: Vec<Dialog>,
    pub submitting: bool,
    pub should_quit: bool,
    result_base: Option<Url>,
}

impl AppState {
    /// `result_base` is the quiz URL that result paths are resolved against.
    pub fn new(title: impl Into<String>, result_base: Option<Url>) -> Self {
        Self {
            title: title.into(),
            body: Body::Loading,
            progress: None,
            countdown: 0,
            controls: Controls::default(),
            dialog_stack: Vec::new(),
            submitting: false,
            should_quit: false,
            result_base,
        }
    }

    pub fn has_dialog(&self) -> bool {
        !self.dialog_stack.is_empty()
    }

    pub fn top_dialog(&self) -> Option<&Dialog> {
        self.dialog_stack.last()
    }

    pub fn push_dialog(&mut self, dialog: Dialog) {
        self.dialog_stack.push(dialog);
    }

    pub fn pop_dialog(&mut self) -> Option<Dialog> {
        self.dialog_stack.pop()
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self.body, Body::Submitted { .. })
    }

    fn resolve(&self, location: &str) -> String {
        self.result_base
            .as_ref()
            .and_then(|base| base.join(location).ok())
            .map(|u| u.to_string())
            .unwrap_or_else(|| location.to_string())
    }
}

impl QuizView for AppState {
    fn show_empty(&mut self) {
        self.body = Body::Empty;
        self.progress = None;
        self.controls = Controls {
            next: false,
            prev: false,
            submit: false,
        };
    }

    fn show_question(&mut self, position: usize, question: &Question, selected: Option<OptionLetter>) {
        self.body = Body::Question {
            position,
            question: question.clone(),
            selected,
        };
        self.controls = Controls::default();
    }

    fn show_selection(&mut self, letter: OptionLetter) {
        if let Body::Question { selected, .. } = &mut self.body {
            *selected = Some(letter);
        }
    }

    fn show_terminal(&mut self) {
        self.body = Body::ReadyToSubmit;
        self.controls = Controls {
            next: false,
            prev: false,
            submit: true,
        };
    }

    fn set_progress(&mut self, current: usize, total: usize) {
        self.progress = Some((current, total));
    }

    fn set_countdown(&mut self, seconds: u32) {
        self.countdown = seconds;
    }

    fn alert(&mut self, message: &str) {
        self.push_dialog(Dialog::Alert(message.to_string()));
    }

    fn navigate(&mut self, location: &str, response: &SubmitResponse) {
        let location = self.resolve(location);
        log::info!("quiz finished, results at {}", location);
        self.body = Body::Submitted {
            location,
            response: response.clone(),
        };
        self.controls = Controls {
            next: false,
            prev: false,
            submit: false,
        };
    }
}
