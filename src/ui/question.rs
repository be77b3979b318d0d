use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::model::{OptionLetter, Question};
use crate::runner::{EMPTY_MESSAGE, READY_MESSAGE};
use crate::state::{AppState, Body};
use crate::ui::markdown::markdown_to_lines;

pub fn draw_question(f: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let (lines, alignment) = match &state.body {
        Body::Question {
            position,
            question,
            selected,
        } => (question_lines(*position, question, *selected), Alignment::Left),
        Body::Empty => (message_lines(EMPTY_MESSAGE, None), Alignment::Center),
        Body::ReadyToSubmit => (
            message_lines(READY_MESSAGE, Some("[Enter] Submit answers")),
            Alignment::Center,
        ),
        Body::Loading | Body::Submitted { .. } => (Vec::new(), Alignment::Left),
    };

    let widget = Paragraph::new(lines)
        .block(block)
        .alignment(alignment)
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

/// Lines for one question: numbered text followed by its options.
pub fn question_lines(
    position: usize,
    question: &Question,
    selected: Option<OptionLetter>,
) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from("")];

    let mut text = markdown_to_lines(&question.text);
    while text
        .last()
        .is_some_and(|l| l.spans.iter().all(|s| s.content.is_empty()))
    {
        text.pop();
    }
    let number = Span::styled(
        format!(" {}. ", position + 1),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    match text.first_mut() {
        Some(first) => first.spans.insert(0, number),
        None => text.push(Line::from(number)),
    }
    for line in text.iter_mut().skip(1) {
        line.spans.insert(0, Span::raw("    "));
    }
    lines.extend(text);
    lines.push(Line::from(""));

    for (letter, option) in question.options() {
        let is_selected = selected == Some(letter);
        let (marker, style) = if is_selected {
            (
                "(●)",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            ("( )", Style::default().fg(Color::White))
        };
        lines.push(Line::from(vec![
            Span::raw("   "),
            Span::styled(format!("{} {}. ", marker, letter), style),
            Span::styled(option.to_string(), style),
        ]));
    }

    lines
}

fn message_lines(message: &str, hint: Option<&str>) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];
    if let Some(hint) = hint {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            hint.to_string(),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines
}
