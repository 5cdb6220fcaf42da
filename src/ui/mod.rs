pub mod header;
pub mod process_table;
pub mod statusbar;
pub mod theme;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::app::App;
use crate::ui::theme::Theme;

pub fn draw(frame: &mut Frame, app: &App, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let visible = app.visible_processes();

    header::render(
        frame,
        chunks[0],
        &app.stats,
        app.cycle,
        app.processes.len(),
        theme,
    );
    process_table::render(
        frame,
        chunks[1],
        &visible,
        app.selected_index,
        app.cycle.is_some(),
        theme,
    );
    statusbar::render(
        frame,
        chunks[2],
        app.input_mode,
        &app.filter_text,
        app.status_message.as_ref(),
        &app.keybinds,
        theme,
    );
}

#[cfg(test)]
mod tests;
