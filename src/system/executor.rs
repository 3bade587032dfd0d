// src/system/executor.rs

//! Running external programs.

use std::process::{Command as StdCommand, Stdio};
use thiserror::Error;

/// Errors from spawning a program or reading its output.
#[derive(Error, Debug)]
pub enum ExecutionError {
    /// Unbalanced quotes in a command line.
    #[error("Command could not be parsed: {0}")]
    CommandParse(String),
    /// The command line was blank.
    #[error("No command specified to run.")]
    EmptyCommand,
    /// The program could not be started, usually because it is not installed.
    #[error("Command '{0}' could not be executed: {1}")]
    CommandFailed(String, std::io::Error),
    /// The program ran and reported failure.
    #[error("Command '{0}' exited with a non-zero error code.")]
    NonZeroExitStatus(String),
    /// Stdout was not UTF-8.
    #[error("Command '{command}' produced output that was not valid UTF-8")]
    InvalidUtf8Output {
        /// The command line, shell-quoted.
        command: String,
        /// The decoding error.
        #[source]
        source: std::string::FromUtf8Error,
    },
}

/// Splits a command line into program and arguments using shell quoting rules.
pub fn split_command_line(command_line: &str) -> Result<Vec<String>, ExecutionError> {
    let trimmed = command_line.trim();
    let parts =
        shlex::split(trimmed).ok_or_else(|| ExecutionError::CommandParse(trimmed.to_string()))?;
    if parts.is_empty() {
        return Err(ExecutionError::EmptyCommand);
    }
    Ok(parts)
}

/// Executes a command and captures its standard output.
/// Stderr is passed through to the user's terminal.
///
/// `argv` is the program followed by its arguments.
pub fn execute_and_capture_output(argv: &[String]) -> Result<String, ExecutionError> {
    let (program, args) = argv.split_first().ok_or(ExecutionError::EmptyCommand)?;
    let display = shlex::try_join(argv.iter().map(String::as_str))
        .unwrap_or_else(|_| argv.join(" "));
    log::debug!("Running: {}", display);

    let command_output = StdCommand::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .output()
        .map_err(|e| ExecutionError::CommandFailed(display.clone(), e))?;

    if !command_output.status.success() {
        return Err(ExecutionError::NonZeroExitStatus(display));
    }

    String::from_utf8(command_output.stdout).map_err(|e| ExecutionError::InvalidUtf8Output {
        command: display,
        source: e,
    })
}
