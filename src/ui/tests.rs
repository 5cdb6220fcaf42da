use std::sync::Arc;

use ratatui::Terminal;
use ratatui::backend::TestBackend;

use crate::action::Action;
use crate::app::App;
use crate::config::KeybindsConfig;
use crate::system::process::ProcessInfo;
use crate::system::snapshot::{Snapshot, SystemStats};
use crate::ui::theme::Theme;

fn buffer_to_string(buf: &ratatui::buffer::Buffer) -> String {
    let area = buf.area;
    let mut out = String::new();
    for y in 0..area.height {
        for x in 0..area.width {
            let cell = buf.cell((x, y)).unwrap();
            out.push_str(cell.symbol());
        }
        if y + 1 < area.height {
            out.push('\n');
        }
    }
    out
}

fn render_app(app: &App, width: u16, height: u16) -> String {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    let theme = Theme::dark();
    terminal.draw(|frame| super::draw(frame, app, &theme)).unwrap();
    buffer_to_string(terminal.backend().buffer())
}

fn make_process(pid: &str, name: &str, cpu: &str, mem: &str) -> ProcessInfo {
    ProcessInfo {
        pid: pid.to_string(),
        name: name.to_string(),
        cpu_usage: cpu.to_string(),
        memory_usage: mem.to_string(),
    }
}

fn make_app() -> App {
    let mut app = App::new(&KeybindsConfig::default());
    app.apply_snapshot(&Snapshot {
        cycle: 4,
        stats: SystemStats {
            cpu_usage_percent: 12.5,
            memory_usage_percent: 41.0,
            cache_mb: 512.0,
        },
        processes: Arc::from(vec![
            make_process("1", "init", "0.0", "0.1"),
            make_process("420", "chrome", "35.2", "12.0"),
            make_process("77", "Finder", "1.5", "0.8"),
        ]),
    });
    app
}

#[test]
fn header_shows_stats() {
    let out = render_app(&make_app(), 120, 12);
    assert!(out.contains("rootwatch"));
    assert!(out.contains("Procs: 3"));
    assert!(out.contains("12.5%"));
    assert!(out.contains("41.0%"));
    assert!(out.contains("512.0 MB"));
}

#[test]
fn table_lists_rows() {
    let out = render_app(&make_app(), 120, 12);
    assert!(out.contains("PID"));
    assert!(out.contains("NAME"));
    assert!(out.contains("chrome"));
    assert!(out.contains("35.2"));
    assert!(out.contains("Finder"));
}

#[test]
fn filter_hides_rows_and_shows_query() {
    let mut app = make_app();
    app.dispatch(Action::UpdateFilter("chr".to_string()));
    let out = render_app(&app, 120, 12);
    assert!(out.contains("chrome"));
    assert!(!out.contains("Finder"));
    assert!(out.contains("Filter: chr"));
}

#[test]
fn waiting_state_before_first_snapshot() {
    let app = App::new(&KeybindsConfig::default());
    let out = render_app(&app, 120, 12);
    assert!(out.contains("Waiting for first sample"));
    assert!(out.contains("Sampling"));
}

#[test]
fn empty_table_after_failed_cycle() {
    let mut app = App::new(&KeybindsConfig::default());
    app.apply_snapshot(&Snapshot {
        cycle: 1,
        stats: SystemStats::default(),
        processes: Arc::from(Vec::new()),
    });
    let out = render_app(&app, 120, 12);
    assert!(out.contains("read failed or access denied"));
    assert!(out.contains("0.0%"));
}

#[test]
fn kill_status_message_replaces_key_hints() {
    let mut app = make_app();
    app.dispatch(Action::Kill("420".to_string()));
    let out = render_app(&app, 120, 12);
    assert!(out.contains("Sent kill to PID 420 (chrome)"));
    assert!(!out.contains("35.2"));
}

#[test]
fn key_hints_follow_configured_keybinds() {
    let keybinds = KeybindsConfig {
        quit: "x".to_string(),
        kill: "Delete".to_string(),
        ..KeybindsConfig::default()
    };
    let app = App::new(&keybinds);
    let out = render_app(&app, 120, 12);
    assert!(out.contains(" x  Quit"));
    assert!(out.contains(" Del  Kill"));
    assert!(out.contains(" r  Refresh"));
    assert!(!out.contains(" q  Quit"));
}

#[test]
fn non_finite_stats_render_as_zero() {
    let mut app = App::new(&KeybindsConfig::default());
    app.apply_snapshot(&Snapshot {
        cycle: 1,
        stats: SystemStats {
            cpu_usage_percent: f32::INFINITY,
            memory_usage_percent: f32::NAN,
            cache_mb: 0.0,
        },
        processes: Arc::from(Vec::new()),
    });
    let out = render_app(&app, 120, 12);
    assert!(out.contains("0.0%"));
    assert!(!out.contains("NaN"));
}
