use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::state::AppState;
use crate::timer::format_countdown;

/// Countdown turns red at or below this many seconds.
const URGENT_SECS: u32 = 5;

pub fn draw_titlebar(f: &mut Frame, area: Rect, state: &AppState) {
    let progress_text = match state.progress {
        Some((current, total)) => format!(" Question {} of {} ", current, total),
        None => String::new(),
    };

    let countdown = format!(" {} left ", format_countdown(state.countdown));
    let timer_span = if state.countdown <= URGENT_SECS {
        Span::styled(
            countdown.clone(),
            Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(countdown.clone(), Style::default().fg(Color::Rgb(200, 200, 120)))
    };

    let title_text = format!("[ {} ]", state.title);

    // Center the title between the progress counter and the countdown
    let available = area.width as usize;
    let left_len = progress_text.chars().count();
    let title_len = title_text.chars().count();
    let timer_len = countdown.chars().count();
    let center_pad = (available.saturating_sub(title_len) / 2).saturating_sub(left_len);
    let right_pad = available.saturating_sub(left_len + center_pad + title_len + timer_len);

    let line = Line::from(vec![
        Span::styled(progress_text, Style::default().fg(Color::Cyan)),
        Span::raw(" ".repeat(center_pad)),
        Span::styled(
            title_text,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" ".repeat(right_pad)),
        timer_span,
    ]);

    let widget = Paragraph::new(line)
        .style(Style::default().bg(Color::DarkGray))
        .alignment(Alignment::Left);
    f.render_widget(widget, area);
}
