use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use super::error::CommandError;

/// Runs one shell command string and returns its stdout.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, command: &str) -> Result<String, CommandError>;
}

/// Runs commands through a fixed argv prefix such as `sudo -n sh -c`, the
/// command string appended as the final argument.
#[derive(Clone, Debug)]
pub struct PrivilegedShell {
    prefix: Vec<String>,
    timeout: Duration,
}

impl PrivilegedShell {
    pub fn new(prefix: Vec<String>, timeout: Duration) -> Self {
        Self { prefix, timeout }
    }

    pub fn prefix(&self) -> &[String] {
        &self.prefix
    }

    fn build(&self, command: &str) -> Command {
        let (program, args) = match self.prefix.split_first() {
            Some((program, args)) => (program.as_str(), args),
            None => ("sh", &[][..]),
        };
        let mut cmd = Command::new(program);
        cmd.args(args);
        if self.prefix.is_empty() {
            cmd.arg("-c");
        }
        cmd.arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // Dropping the future (timeout, poller cancellation) must not
            // leave the child running.
            .kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl CommandRunner for PrivilegedShell {
    async fn run(&self, command: &str) -> Result<String, CommandError> {
        debug!(command, "running privileged command");

        // `output()` drains both pipes and reaps the child before returning.
        let output = match tokio::time::timeout(self.timeout, self.build(command).output()).await
        {
            Ok(result) => result.map_err(|source| CommandError::Launch {
                command: command.to_string(),
                source,
            })?,
            Err(_) => {
                return Err(CommandError::Timeout {
                    command: command.to_string(),
                    timeout: self.timeout,
                });
            }
        };

        if !output.status.success() {
            return Err(CommandError::Status {
                command: command.to_string(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
