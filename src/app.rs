use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::action::{Action, Direction};
use crate::config::{KeybindsConfig, parse_key};
use crate::system::process::{ProcessInfo, filter_processes};
use crate::system::snapshot::{Snapshot, SystemStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Filter,
}

#[derive(Debug, Clone)]
pub struct ResolvedKeybinds {
    pub quit: KeyCode,
    pub kill: KeyCode,
    pub filter: KeyCode,
    pub refresh: KeyCode,
}

impl ResolvedKeybinds {
    pub fn from_config(kb: &KeybindsConfig) -> Self {
        Self {
            quit: parse_key(&kb.quit).unwrap_or(KeyCode::Char('q')),
            kill: parse_key(&kb.kill).unwrap_or(KeyCode::Char('k')),
            filter: parse_key(&kb.filter).unwrap_or(KeyCode::Char('/')),
            refresh: parse_key(&kb.refresh).unwrap_or(KeyCode::Char('r')),
        }
    }
}

/// Presentation state. Fed whole snapshots from the poller; never shares
/// them back.
pub struct App {
    pub running: bool,
    pub stats: SystemStats,
    /// Rows shown in the table. Killed rows are removed here right away and
    /// come back only if the next snapshot still lists them.
    pub processes: Vec<ProcessInfo>,
    pub cycle: Option<u64>,
    pub selected_index: usize,
    pub input_mode: InputMode,
    pub filter_text: String,
    pub status_message: Option<(String, Instant)>,
    pub keybinds: ResolvedKeybinds,
}

impl App {
    pub fn new(keybinds: &KeybindsConfig) -> Self {
        App {
            running: true,
            stats: SystemStats::default(),
            processes: Vec::new(),
            cycle: None,
            selected_index: 0,
            input_mode: InputMode::Normal,
            filter_text: String::new(),
            status_message: None,
            keybinds: ResolvedKeybinds::from_config(keybinds),
        }
    }

    pub fn apply_snapshot(&mut self, snapshot: &Snapshot) {
        let selected_pid = self.selected_pid();

        self.stats = snapshot.stats;
        self.processes = snapshot.processes.to_vec();
        self.cycle = Some(snapshot.cycle);

        // Keep the cursor on the same process when it is still listed.
        let visible = self.visible_processes();
        self.selected_index = selected_pid
            .and_then(|pid| visible.iter().position(|p| p.pid == pid))
            .unwrap_or(self.selected_index);
        self.clamp_selection();
    }

    /// Clears the status message once it is 3 seconds old.
    pub fn expire_status_message(&mut self) {
        if let Some((_, created)) = &self.status_message
            && created.elapsed().as_secs() >= 3
        {
            self.status_message = None;
        }
    }

    pub fn visible_processes(&self) -> Vec<&ProcessInfo> {
        filter_processes(&self.processes, &self.filter_text)
    }

    pub fn selected_process(&self) -> Option<&ProcessInfo> {
        self.visible_processes().get(self.selected_index).copied()
    }

    pub fn selected_pid(&self) -> Option<String> {
        self.selected_process().map(|p| p.pid.clone())
    }

    pub fn map_key(&self, key: KeyEvent) -> Action {
        // Ctrl+C always quits (hardwired safety)
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }

        match self.input_mode {
            InputMode::Normal => self.map_key_normal(key),
            InputMode::Filter => self.map_key_filter(key),
        }
    }

    fn map_key_normal(&self, key: KeyEvent) -> Action {
        let code = key.code;
        let kb = &self.keybinds;

        match code {
            KeyCode::Up => return Action::Navigate(Direction::Up),
            KeyCode::Down => return Action::Navigate(Direction::Down),
            KeyCode::Esc if !self.filter_text.is_empty() => return Action::ClearFilter,
            _ => {}
        }

        if code == kb.quit {
            return Action::Quit;
        }
        if code == kb.filter {
            return Action::EnterFilterMode;
        }
        if code == kb.kill {
            return self.selected_pid().map(Action::Kill).unwrap_or(Action::None);
        }
        if code == kb.refresh {
            return Action::Refresh;
        }

        Action::None
    }

    fn map_key_filter(&self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc => Action::ClearFilter,
            KeyCode::Enter => Action::ExitFilterMode,
            KeyCode::Backspace => {
                let mut text = self.filter_text.clone();
                text.pop();
                Action::UpdateFilter(text)
            }
            KeyCode::Char(c) => {
                let mut text = self.filter_text.clone();
                text.push(c);
                Action::UpdateFilter(text)
            }
            _ => Action::None,
        }
    }

    /// Applies the presentation side of `action`. Issuing the kill command
    /// and waking the poller are the caller's job.
    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::Navigate(dir) => self.navigate(dir),
            Action::EnterFilterMode => {
                self.input_mode = InputMode::Filter;
            }
            Action::ExitFilterMode => {
                self.input_mode = InputMode::Normal;
            }
            Action::ClearFilter => {
                self.filter_text.clear();
                self.input_mode = InputMode::Normal;
                self.clamp_selection();
            }
            Action::UpdateFilter(text) => {
                self.filter_text = text;
                self.selected_index = 0;
            }
            Action::Kill(pid) => {
                let name = self
                    .processes
                    .iter()
                    .find(|p| p.pid == pid)
                    .map(|p| p.name.clone())
                    .unwrap_or_default();
                self.processes.retain(|p| p.pid != pid);
                self.clamp_selection();
                self.status_message =
                    Some((format!("Sent kill to PID {pid} ({name})"), Instant::now()));
            }
            Action::Refresh => {
                self.status_message = Some(("Refreshing\u{2026}".to_string(), Instant::now()));
            }
            Action::None => {}
        }
    }

    fn navigate(&mut self, direction: Direction) {
        let len = self.visible_processes().len();
        if len == 0 {
            return;
        }
        self.selected_index = match direction {
            Direction::Up => self.selected_index.saturating_sub(1),
            Direction::Down => (self.selected_index + 1).min(len - 1),
        };
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_processes().len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }
}
