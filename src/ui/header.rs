use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};

use crate::format::format_megabytes;
use crate::system::snapshot::SystemStats;
use crate::ui::theme::Theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    stats: &SystemStats,
    cycle: Option<u64>,
    process_count: usize,
    theme: &Theme,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(22),
            Constraint::Percentage(22),
            Constraint::Percentage(22),
        ])
        .split(area);

    render_branding(frame, chunks[0], cycle, process_count, theme);
    render_gauge(frame, chunks[1], " CPU ", stats.cpu_usage_percent, theme);
    render_gauge(frame, chunks[2], " MEM ", stats.memory_usage_percent, theme);
    render_cache(frame, chunks[3], stats.cache_mb, theme);
}

fn bordered<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            title,
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ))
}

fn render_branding(
    frame: &mut Frame,
    area: Rect,
    cycle: Option<u64>,
    process_count: usize,
    theme: &Theme,
) {
    let block = bordered("", theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let status = match cycle {
        Some(_) => format!("Procs: {process_count}"),
        None => "Sampling\u{2026}".to_string(),
    };

    let line = Line::from(vec![
        Span::styled(
            " rootwatch ",
            Style::default()
                .fg(theme.header_accent_fg)
                .bg(theme.header_accent_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(status, Style::default().fg(theme.text_secondary)),
    ]);
    frame.render_widget(Paragraph::new(line), inner);
}

fn render_gauge(frame: &mut Frame, area: Rect, title: &str, percent: f32, theme: &Theme) {
    // Gauge::ratio panics outside 0..=1, and NaN survives clamp.
    let percent = if percent.is_finite() { percent } else { 0.0 };
    let ratio = (percent as f64 / 100.0).clamp(0.0, 1.0);
    let gauge = Gauge::default()
        .block(bordered(title, theme))
        .gauge_style(
            Style::default()
                .fg(theme.heat(percent))
                .bg(theme.gauge_unfilled),
        )
        .ratio(ratio)
        .label(format!("{percent:.1}%"));
    frame.render_widget(gauge, area);
}

fn render_cache(frame: &mut Frame, area: Rect, cache_mb: f32, theme: &Theme) {
    let text = Paragraph::new(Span::styled(
        format_megabytes(cache_mb),
        Style::default().fg(theme.text_primary),
    ))
    .block(bordered(" CACHE ", theme));
    frame.render_widget(text, area);
}
