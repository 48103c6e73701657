//! Subprocess boundary.
//!
//! Every external program the auditor starts (version probes, `go env`,
//! native cache-cleaning commands) goes through [`CommandRunner`], so tests
//! can substitute a scripted runner and never touch the real toolchains.

use serde::Serialize;
use std::fmt;
use std::io;
use std::process::Command;

/// Captured output of a finished subprocess.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// True if the process exited with status zero.
    pub success: bool,
    /// Exit code, `None` if terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Successful output with the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Failed output with the given exit code and stderr.
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Stdout followed by stderr, trimmed.
    ///
    /// Some toolchains (`java -version`) print their version on stderr.
    pub fn combined(&self) -> String {
        let mut text = self.stdout.trim().to_string();
        let err = self.stderr.trim();
        if !err.is_empty() {
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str(err);
        }
        text
    }
}

/// Runs external programs and captures their output.
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args` to completion.
    ///
    /// Returns `Err` only when the process could not be started; a non-zero
    /// exit is reported through [`CommandOutput::success`].
    fn run(&self, program: &str, args: &[String]) -> io::Result<CommandOutput>;
}

/// Runner backed by `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> io::Result<CommandOutput> {
        tracing::debug!(program, ?args, "Running command");

        let output = Command::new(program).args(args).output()?;

        Ok(CommandOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// A vetted, ecosystem-native cleanup invocation (e.g. `go clean -cache`).
///
/// Stored as program + arguments; never passed through a shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl CleanCommand {
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Execute through `runner`, mapping a non-zero exit to an error message.
    pub fn execute(&self, runner: &dyn CommandRunner) -> std::result::Result<(), String> {
        match runner.run(&self.program, &self.args) {
            Ok(output) if output.success => Ok(()),
            Ok(output) => {
                let status = match output.code {
                    Some(code) => format!("exit status {}", code),
                    None => "terminated by signal".to_string(),
                };
                let detail = output.combined();
                if detail.is_empty() {
                    Err(format!("`{}` failed: {}", self, status))
                } else {
                    Err(format!("`{}` failed: {} ({})", self, status, detail))
                }
            }
            Err(e) => Err(format!("could not run `{}`: {}", self, e)),
        }
    }
}

impl fmt::Display for CleanCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Runner that answers from a script and records every invocation.
    #[derive(Default)]
    pub struct ScriptedRunner {
        responses: HashMap<String, io::Result<CommandOutput>>,
        calls: Mutex<Vec<String>>,
    }

    fn key(program: &str, args: &[String]) -> String {
        let name = std::path::Path::new(program)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| program.to_string());
        std::iter::once(name)
            .chain(args.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ")
    }

    impl ScriptedRunner {
        pub fn new() -> Self {
            Self::default()
        }

        /// Answer `command_line` (program basename + args) with `output`.
        pub fn on(mut self, command_line: &str, output: CommandOutput) -> Self {
            self.responses.insert(command_line.to_string(), Ok(output));
            self
        }

        /// Make `command_line` fail to spawn.
        pub fn missing(mut self, command_line: &str) -> Self {
            self.responses.insert(
                command_line.to_string(),
                Err(io::Error::new(io::ErrorKind::NotFound, "no such program")),
            );
            self
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().map(|c| c.clone()).unwrap_or_default()
        }
    }

    impl CommandRunner for ScriptedRunner {
        fn run(&self, program: &str, args: &[String]) -> io::Result<CommandOutput> {
            let line = key(program, args);
            if let Ok(mut calls) = self.calls.lock() {
                calls.push(line.clone());
            }
            match self.responses.get(&line) {
                Some(Ok(output)) => Ok(output.clone()),
                Some(Err(e)) => Err(io::Error::new(e.kind(), e.to_string())),
                None => Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("unscripted command: {}", line),
                )),
            }
        }
    }
}
