pub mod dialog;
pub mod keybar;
pub mod layout;
pub mod markdown;
pub mod question;
pub mod result;
pub mod titlebar;

use ratatui::Frame;

use crate::state::{AppState, Body};

pub fn draw(f: &mut Frame, state: &AppState) {
    let area = f.area();

    match &state.body {
        Body::Submitted { location, response } => {
            result::draw_submitted(f, area, location, response);
        }
        _ => {
            draw_working(f, area, state);
        }
    }

    // Draw dialog overlay if any
    if state.has_dialog() {
        dialog::draw_dialog(f, area, state);
    }
}

fn draw_working(f: &mut Frame, area: ratatui::layout::Rect, state: &AppState) {
    let layout = layout::compute_layout(area);

    titlebar::draw_titlebar(f, layout.titlebar, state);
    question::draw_question(f, layout.main, state);
    keybar::draw_keybar(f, layout.keybar, state);
}
