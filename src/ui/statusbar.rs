use std::time::Instant;

use crossterm::event::KeyCode;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{InputMode, ResolvedKeybinds};
use crate::ui::theme::Theme;

/// Bottom line: a pending status message if any, otherwise the filter
/// prompt or key hints for the current mode.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    input_mode: InputMode,
    filter_text: &str,
    status_message: Option<&(String, Instant)>,
    keybinds: &ResolvedKeybinds,
    theme: &Theme,
) {
    let line = match status_message {
        Some((msg, _)) => status_line(msg, theme),
        None => hint_line(input_mode, filter_text, keybinds, theme),
    };
    frame.render_widget(
        Paragraph::new(line).style(Style::default().bg(theme.statusbar_bg)),
        area,
    );
}

/// Display label for a bound key, the inverse of `config::parse_key`.
pub fn key_label(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Delete => "Del".to_string(),
        other => format!("{other:?}"),
    }
}

fn status_line<'a>(msg: &str, theme: &Theme) -> Line<'a> {
    let color = if msg.starts_with("Sent") || msg.starts_with("Refreshing") {
        theme.status_ok
    } else {
        theme.status_err
    };
    Line::from(Span::styled(
        format!(" {msg}"),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
}

fn hint_line<'a>(
    input_mode: InputMode,
    filter_text: &'a str,
    kb: &ResolvedKeybinds,
    theme: &Theme,
) -> Line<'a> {
    let filter = key_label(kb.filter);
    let (mut spans, hints): (Vec<Span<'a>>, Vec<(String, &str)>) = match input_mode {
        InputMode::Filter => (
            vec![
                key_span(&filter, theme),
                Span::styled(
                    format!(" {filter_text}"),
                    Style::default().fg(theme.pill_desc_fg),
                ),
                Span::styled("\u{2588}", Style::default().fg(theme.pill_key_bg)),
            ],
            vec![("Esc".into(), "Cancel"), ("Enter".into(), "Apply")],
        ),
        InputMode::Normal if !filter_text.is_empty() => (
            vec![
                Span::styled(
                    " Filter: ",
                    Style::default()
                        .fg(theme.pill_key_bg)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(filter_text, Style::default().fg(theme.pill_desc_fg)),
            ],
            vec![("Esc".into(), "Clear"), (filter, "Edit")],
        ),
        InputMode::Normal => (
            Vec::new(),
            vec![
                (key_label(kb.quit), "Quit"),
                (filter, "Filter"),
                (key_label(kb.kill), "Kill"),
                (key_label(kb.refresh), "Refresh"),
                ("\u{2191}\u{2193}".into(), "Nav"),
            ],
        ),
    };

    for (key, desc) in hints {
        spans.push(Span::raw(" "));
        spans.push(key_span(&key, theme));
        spans.push(Span::styled(
            format!(" {desc}"),
            Style::default().fg(theme.pill_desc_fg).bg(theme.surface_bg),
        ));
    }
    Line::from(spans)
}

fn key_span<'a>(key: &str, theme: &Theme) -> Span<'a> {
    Span::styled(
        format!(" {key} "),
        Style::default()
            .fg(theme.pill_key_fg)
            .bg(theme.pill_key_bg)
            .add_modifier(Modifier::BOLD),
    )
}
