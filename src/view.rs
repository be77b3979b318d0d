use crate::model::{OptionLetter, Question};
use crate::submit::SubmitResponse;

/// Which controls the user can currently reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub next: bool,
    pub prev: bool,
    pub submit: bool,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            next: true,
            prev: true,
            submit: false,
        }
    }
}

/// Rendering surface the quiz runner drives.
pub trait QuizView {
    /// No questions to show.
    fn show_empty(&mut self);

    /// `position` is zero-based; `selected` is the recorded answer, if any.
    fn show_question(&mut self, position: usize, question: &Question, selected: Option<OptionLetter>);

    /// The user picked an option on the question currently shown.
    fn show_selection(&mut self, selected: OptionLetter);

    /// Past the last question: reveal submit, hide next/prev.
    fn show_terminal(&mut self);

    /// `current` is one-based.
    fn set_progress(&mut self, current: usize, total: usize);

    fn set_countdown(&mut self, seconds: u32);

    /// Blocking, user-facing notice.
    fn alert(&mut self, message: &str);

    /// Leave the quiz for `location` after an accepted submission.
    fn navigate(&mut self, location: &str, response: &SubmitResponse);
}
