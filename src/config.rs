use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::KeyCode;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub commands: CommandsConfig,
    pub keybinds: KeybindsConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub poll_interval_ms: u64,
    pub cpu_sample_ms: u64,
    pub command_timeout_ms: u64,
    pub elevate: bool,
    pub theme: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            poll_interval_ms: 5000,
            cpu_sample_ms: 1000,
            command_timeout_ms: 10_000,
            elevate: true,
            theme: "dark".to_string(),
        }
    }
}

impl GeneralConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn cpu_sample(&self) -> Duration {
        Duration::from_millis(self.cpu_sample_ms)
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_millis(self.command_timeout_ms)
    }
}

/// Command strings for each status source. `kill` is a template where
/// `{pid}` is replaced with the target pid.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct CommandsConfig {
    pub privileged_prefix: Vec<String>,
    pub shell_prefix: Vec<String>,
    pub cpu: String,
    pub memory: String,
    pub meminfo: String,
    pub processes: String,
    pub kill: String,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        CommandsConfig {
            privileged_prefix: vec!["sudo".into(), "-n".into(), "sh".into(), "-c".into()],
            shell_prefix: vec!["sh".into(), "-c".into()],
            cpu: "head -n 1 /proc/stat".to_string(),
            memory: "free -k".to_string(),
            meminfo: "cat /proc/meminfo".to_string(),
            processes: "ps -eo pid,user,pcpu,pmem,vsz,rss,stat,time,comm".to_string(),
            kill: "kill -s KILL {pid}".to_string(),
        }
    }
}

impl CommandsConfig {
    pub fn prefix(&self, elevate: bool) -> Vec<String> {
        if elevate {
            self.privileged_prefix.clone()
        } else {
            self.shell_prefix.clone()
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct KeybindsConfig {
    pub quit: String,
    pub kill: String,
    pub filter: String,
    pub refresh: String,
}

impl Default for KeybindsConfig {
    fn default() -> Self {
        KeybindsConfig {
            quit: "q".to_string(),
            kill: "k".to_string(),
            filter: "/".to_string(),
            refresh: "r".to_string(),
        }
    }
}

pub fn parse_key(s: &str) -> Option<KeyCode> {
    match s {
        "Enter" => Some(KeyCode::Enter),
        "Escape" | "Esc" => Some(KeyCode::Esc),
        "Tab" => Some(KeyCode::Tab),
        "Space" => Some(KeyCode::Char(' ')),
        "Delete" | "Del" => Some(KeyCode::Delete),
        _ => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(KeyCode::Char(c)),
                _ => None,
            }
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("rootwatch").join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_default(),
        Err(_) => Config::default(),
    }
}
