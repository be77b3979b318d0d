use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::state::{AppState, Body};

pub fn draw_keybar(f: &mut Frame, area: Rect, state: &AppState) {
    let mut bindings: Vec<(&str, &str)> = Vec::new();
    if matches!(state.body, Body::Question { .. }) {
        bindings.push(("a-d", "answer"));
    }
    if state.controls.prev {
        bindings.push(("←", "prev"));
    }
    if state.controls.next {
        bindings.push(("→/Enter", "next"));
    }
    if state.controls.submit {
        bindings.push(("Enter", "submit"));
    }
    bindings.push(("Ctrl+S", "submit now"));
    bindings.push(("?", "help"));
    bindings.push(("Ctrl+Q", "quit"));

    let mut spans: Vec<Span> = vec![Span::raw(" ")];
    if state.submitting {
        spans.push(Span::styled(
            "Submitting...",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw("   "));
    }
    for (i, (key, action)) in bindings.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("   "));
        }
        spans.push(Span::styled(
            key.to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!(" {}", action)));
    }

    let line = Line::from(spans);
    let widget = Paragraph::new(line).style(Style::default().bg(Color::Rgb(20, 20, 20)));
    f.render_widget(widget, area);
}
