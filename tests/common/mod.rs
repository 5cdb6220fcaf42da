#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use rootwatch::config::CommandsConfig;
use rootwatch::system::command::CommandRunner;
use rootwatch::system::error::CommandError;
use rootwatch::system::sampler::Sampler;

pub const PS_HEADER: &str = "PID USER %CPU %MEM VSZ RSS STAT TIME COMMAND";

/// Replies to each command with queued outputs; the last queued reply for
/// a command repeats once the queue is drained. Unknown commands fail.
#[derive(Default)]
pub struct ScriptedRunner {
    replies: Mutex<HashMap<String, VecDeque<Reply>>>,
    calls: Mutex<Vec<String>>,
}

#[derive(Clone)]
pub enum Reply {
    Ok(String),
    Fail,
    Hang,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, command: &str, reply: Reply) -> Self {
        self.replies
            .lock()
            .unwrap()
            .entry(command.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    pub fn ok(self, command: &str, output: &str) -> Self {
        self.reply(command, Reply::Ok(output.to_string()))
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, command: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == command).count()
    }

    fn next_reply(&self, command: &str) -> Reply {
        let mut replies = self.replies.lock().unwrap();
        match replies.get_mut(command) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or(Reply::Fail),
            Some(queue) => queue.front().cloned().unwrap_or(Reply::Fail),
            None => Reply::Fail,
        }
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, command: &str) -> Result<String, CommandError> {
        self.calls.lock().unwrap().push(command.to_string());
        match self.next_reply(command) {
            Reply::Ok(output) => Ok(output),
            Reply::Fail => Err(CommandError::Status {
                command: command.to_string(),
                code: Some(1),
                stderr: "sudo: a password is required".to_string(),
            }),
            Reply::Hang => std::future::pending().await,
        }
    }
}

pub fn commands() -> CommandsConfig {
    CommandsConfig::default()
}

/// Runner answering every default command with plausible output. CPU
/// counters advance so the measured interval is 25% busy.
pub fn healthy_runner() -> ScriptedRunner {
    let c = commands();
    ScriptedRunner::new()
        .ok(&c.cpu, "cpu  100 0 100 800 0 0 0 0 0 0\n")
        .ok(&c.cpu, "cpu  150 0 150 1100 0 0 0 0 0 0\n")
        .ok(
            &c.memory,
            "               total        used        free\nMem:            4000        1000        3000\n",
        )
        .ok(&c.meminfo, "MemTotal: 4000 kB\nCached: 1536 kB\n")
        .ok(
            &c.processes,
            &format!(
                "{PS_HEADER}\n\
                 1 root 0.0 0.1 1000 200 Ss 00:00:01 init\n\
                 42 alice 12.5 3.4 5000 900 Sl 00:01:02 firefox\n"
            ),
        )
}

pub fn sampler(runner: ScriptedRunner) -> Sampler<ScriptedRunner> {
    Sampler::new(runner, commands(), Duration::from_secs(1))
}
