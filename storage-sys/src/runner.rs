// SPDX-License-Identifier: GPL-3.0-only

//! Process spawning boundary.
//!
//! Parsers never spawn anything themselves; they consume the
//! `(exit_code, stdout, stderr)` triple a [`CommandRunner`] hands back.

use std::process::Command;

use tracing::debug;

use crate::error::{Result, SysError};

/// Captured result of one finished command.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs an external program to completion.
///
/// A program that cannot be found or started is an `Err`
/// (`SysError::ProbeUnavailable`). A non-zero exit is not: it is returned in
/// [`CommandOutput::exit_code`] and the caller decides how fatal it is.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput>;
}

impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput> {
        (**self).run(program, args)
    }
}

/// Render a command line for logs and error messages.
pub fn render(command: &str, args: &[String]) -> String {
    if args.is_empty() {
        command.to_string()
    } else {
        format!("{} {}", command, args.join(" "))
    }
}

const LOCALE_VARS: [&str; 4] = ["LANG", "LC_ALL", "LC_MESSAGES", "LC_CTYPE"];

/// Runs commands on the host, resolving programs through `PATH`.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    locale: String,
}

impl SystemRunner {
    /// Every child gets `locale` exported so tool output is not localized.
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
        }
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new("C")
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput> {
        let binary = which::which(program).map_err(|e| SysError::ProbeUnavailable {
            probe: program.to_string(),
            reason: e.to_string(),
        })?;

        debug!("Running {}", render(&binary.to_string_lossy(), args));

        let mut command = Command::new(&binary);
        command.args(args);
        for var in LOCALE_VARS {
            command.env(var, &self.locale);
        }

        // output() waits for the child, so nothing outlives this call
        let output = command.output().map_err(|e| SysError::ProbeUnavailable {
            probe: program.to_string(),
            reason: format!("failed to execute {}: {}", render(program, args), e),
        })?;

        Ok(CommandOutput {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}
