use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};

use crate::format::truncate_unicode;
use crate::system::process::ProcessInfo;
use crate::ui::theme::Theme;

const PID_WIDTH: u16 = 8;
const PERCENT_WIDTH: u16 = 7;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    processes: &[&ProcessInfo],
    selected_index: usize,
    sampled: bool,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border));

    if processes.is_empty() {
        // An empty table after a completed cycle means the read failed or
        // access was denied.
        let message = if sampled {
            "No processes (read failed or access denied)"
        } else {
            "Waiting for first sample\u{2026}"
        };
        let text = Paragraph::new(Span::styled(
            message,
            Style::default().fg(theme.text_secondary),
        ))
        .block(block);
        frame.render_widget(text, area);
        return;
    }

    let name_width = area
        .width
        .saturating_sub(PID_WIDTH + PERCENT_WIDTH * 2 + 2 + 3) as usize;

    let header = Row::new(["PID", "NAME", "CPU%", "MEM%"]).style(
        Style::default()
            .fg(theme.text_secondary)
            .add_modifier(Modifier::BOLD),
    );

    let rows = processes.iter().map(|p| {
        let cpu = p.cpu_percent();
        Row::new(vec![
            Cell::from(p.pid.as_str()),
            Cell::from(truncate_unicode(&p.name, name_width.max(1))),
            Cell::from(p.cpu_usage.as_str()).style(Style::default().fg(theme.heat(cpu))),
            Cell::from(p.memory_usage.as_str()),
        ])
        .style(Style::default().fg(theme.text_primary))
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(PID_WIDTH),
            Constraint::Min(1),
            Constraint::Length(PERCENT_WIDTH),
            Constraint::Length(PERCENT_WIDTH),
        ],
    )
    .header(header)
    .block(block)
    .row_highlight_style(
        Style::default()
            .bg(theme.selection_bg)
            .add_modifier(Modifier::BOLD),
    );

    let mut state = TableState::default().with_selected(Some(selected_index));
    frame.render_stateful_widget(table, area, &mut state);
}
