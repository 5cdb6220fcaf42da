use std::time::Duration;

use thiserror::Error;

/// A privileged command could not be run to a successful exit.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("failed to launch `{command}`: {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{command}` exited with status {code:?}: {stderr}")]
    Status {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
    #[error("`{command}` timed out after {timeout:?}")]
    Timeout { command: String, timeout: Duration },
}

/// Command output did not match the expected line or column layout.
#[derive(Error, Debug, PartialEq)]
pub enum ParseError {
    #[error("expected at least {expected} lines of output")]
    MissingLine { expected: usize },
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("field `{field}` is not a number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum SampleError {
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}
