use ratatui::backend::TestBackend;
use ratatui::style::Modifier;
use ratatui::Terminal;

use quizrun::model::{OptionLetter, Question, QuestionId};
use quizrun::state::{AppState, Body, Dialog};
use quizrun::submit::SubmitResponse;
use quizrun::ui::markdown::markdown_to_lines;
use quizrun::view::QuizView;

fn render(state: &AppState) -> String {
    let backend = TestBackend::new(80, 20);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|f| quizrun::ui::draw(f, state)).unwrap();

    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

fn sample_question() -> Question {
    Question {
        id: QuestionId::new("7"),
        text: "Which planet is known as the **Red Planet**?".to_string(),
        option_a: "Venus".to_string(),
        option_b: "Mars".to_string(),
        option_c: None,
        option_d: Some("Saturn".to_string()),
    }
}

#[test]
fn test_question_screen_shows_text_options_and_timer() {
    let mut state = AppState::new("Round 1", None);
    state.show_question(0, &sample_question(), Some(OptionLetter::B));
    state.set_progress(1, 3);
    state.set_countdown(12);

    let screen = render(&state);
    assert!(screen.contains("Round 1"));
    assert!(screen.contains("Question 1 of 3"));
    assert!(screen.contains("12s left"));
    assert!(screen.contains("Red Planet"));
    assert!(screen.contains("( ) A. Venus"));
    assert!(screen.contains("(●) B. Mars"));
    assert!(screen.contains("( ) D. Saturn"));
    assert!(!screen.contains("C. "));
}

#[test]
fn test_selection_updates_marker() {
    let mut state = AppState::new("Round 1", None);
    state.show_question(0, &sample_question(), None);
    state.show_selection(OptionLetter::A);

    let screen = render(&state);
    assert!(screen.contains("(●) A. Venus"));
    assert!(screen.contains("( ) B. Mars"));
}

#[test]
fn test_empty_and_terminal_screens() {
    let mut state = AppState::new("Round 1", None);
    state.show_empty();
    assert!(render(&state).contains("No questions available."));

    state.show_terminal();
    state.set_countdown(0);
    let screen = render(&state);
    assert!(screen.contains("ready to submit"));
    assert!(screen.contains("0s left"));
    assert!(state.controls.submit);
    assert!(!state.controls.next && !state.controls.prev);
}

#[test]
fn test_alert_dialog_and_result_screen() {
    let base = reqwest::Url::parse("http://localhost:5000/quiz").unwrap();
    let mut state = AppState::new("Round 1", Some(base));
    state.show_terminal();
    state.alert("Error submitting quiz");
    assert_eq!(
        state.top_dialog(),
        Some(&Dialog::Alert("Error submitting quiz".to_string()))
    );
    assert!(render(&state).contains("Error submitting quiz"));
    state.pop_dialog();

    let response = SubmitResponse {
        status: Some("ok".to_string()),
        score: Some(2),
        total: Some(3),
    };
    state.navigate("/result", &response);
    assert!(matches!(
        &state.body,
        Body::Submitted { location, .. } if location == "http://localhost:5000/result"
    ));
    let screen = render(&state);
    assert!(screen.contains("Score: 2 / 3"));
    assert!(screen.contains("http://localhost:5000/result"));
}

#[test]
fn test_markdown_inline_styles() {
    let lines = markdown_to_lines("Pick the **best** answer for `x`");
    let first = &lines[0];

    let bold = first
        .spans
        .iter()
        .find(|s| s.content == "best")
        .expect("bold span missing");
    assert!(bold.style.add_modifier.contains(Modifier::BOLD));
    assert!(first.spans.iter().any(|s| s.content == "`x`"));
}

fn plain_text(lines: &[ratatui::text::Line]) -> Vec<String> {
    lines
        .iter()
        .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
        .filter(|l| !l.is_empty())
        .collect()
}

#[test]
fn test_markdown_keeps_inline_html() {
    let lines = markdown_to_lines("What does the <br> tag do?");
    assert_eq!(plain_text(&lines), vec!["What does the <br> tag do?"]);
}

#[test]
fn test_markdown_keeps_html_block() {
    let lines = markdown_to_lines("<div>\nWhich tag is this?\n</div>");
    assert_eq!(
        plain_text(&lines),
        vec!["<div>", "Which tag is this?", "</div>"]
    );
}

#[test]
fn test_markdown_keeps_leading_number() {
    let lines = markdown_to_lines("2010. Which year did X happen?");
    assert_eq!(plain_text(&lines), vec!["2010. Which year did X happen?"]);
}

#[test]
fn test_markdown_numbers_ordered_list_items() {
    let lines = markdown_to_lines("Order these:\n\n3. three\n4. four");
    assert_eq!(
        plain_text(&lines),
        vec!["Order these:", "3. three", "4. four"]
    );
}

#[test]
fn test_markdown_keeps_heading_marker() {
    let lines = markdown_to_lines("# of moons of Mars?");
    assert_eq!(plain_text(&lines), vec!["# of moons of Mars?"]);

    let lines = markdown_to_lines("## Section");
    assert_eq!(plain_text(&lines), vec!["## Section"]);
}

#[test]
fn test_question_screen_shows_literal_text() {
    let mut state = AppState::new("Quiz", None);
    let mut question = sample_question();
    question.text = "# of moons of Mars?".to_string();
    state.show_question(0, &question, None);

    let screen = render(&state);
    assert!(screen.contains("1. # of moons of Mars?"));
}
