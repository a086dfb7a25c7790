// Copyright 2026 Ezfuse Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::{
    ffi::OsString,
    fmt,
    path::Path,
    process::{Command, Stdio},
};

use anyhow::{Context, Result, bail};
use colored::Colorize;

/// A program and its arguments, kept apart so nothing is re-parsed by a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: OsString,
    args: Vec<OsString>,
}

impl CommandLine {
    pub fn new<S: Into<OsString>>(program: S) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Builds a command from a non-empty `[program, args...]` list.
    pub fn from_parts<I, S>(parts: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let mut parts = parts.into_iter();
        let Some(program) = parts.next() else {
            bail!("Empty command");
        };
        Ok(Self::new(program).args(parts))
    }

    pub fn arg<S: Into<OsString>>(mut self, arg: S) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &OsString {
        &self.program
    }

    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }

    fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        command
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote(&self.program.to_string_lossy()))?;
        for arg in &self.args {
            write!(f, " {}", quote(&arg.to_string_lossy()))?;
        }
        Ok(())
    }
}

/// POSIX shell quoting, leaving plain words untouched.
pub fn quote(word: &str) -> String {
    if word.is_empty() {
        return "''".to_string();
    }

    let is_safe = word
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "@%+=:,./_-".contains(c));

    if is_safe {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r#"'"'"'"#))
    }
}

/// Everything the interactive session needs from the host.
pub trait System {
    /// Runs `cmd` to completion. When `check` is set a non-zero exit status
    /// is an error; a spawn failure always is.
    fn run(&mut self, cmd: &CommandLine, cwd: Option<&Path>, check: bool) -> Result<()>;

    fn is_mounted(&self, path: &Path) -> bool;
}

impl<T: System + ?Sized> System for &mut T {
    fn run(&mut self, cmd: &CommandLine, cwd: Option<&Path>, check: bool) -> Result<()> {
        (**self).run(cmd, cwd, check)
    }

    fn is_mounted(&self, path: &Path) -> bool {
        (**self).is_mounted(path)
    }
}

/// Runs commands for real, echoing each one before it starts.
#[derive(Debug, Default)]
pub struct HostSystem;

impl System for HostSystem {
    fn run(&mut self, cmd: &CommandLine, cwd: Option<&Path>, check: bool) -> Result<()> {
        println!("[{}] {}", "exec".green(), cmd.to_string().yellow());
        run_command(cmd, cwd, check)
    }

    fn is_mounted(&self, path: &Path) -> bool {
        super::mount::is_mounted(path)
    }
}

pub fn run_command(cmd: &CommandLine, cwd: Option<&Path>, check: bool) -> Result<()> {
    let mut command = cmd.to_command();
    if let Some(dir) = cwd {
        command.current_dir(dir);
    }

    tracing::debug!("Running {} (cwd: {:?})", cmd, cwd);

    let status = command
        .status()
        .with_context(|| format!("Failed to execute {}", cmd.program().to_string_lossy()))?;

    if check && !status.success() {
        match status.code() {
            Some(code) => bail!("Command '{}' returned non-zero exit status {}", cmd, code),
            None => bail!("Command '{}' was terminated by a signal", cmd),
        }
    }

    Ok(())
}

/// Runs `cmd` with all output discarded and reports whether it succeeded.
pub fn run_silent(cmd: &CommandLine) -> Result<()> {
    let status = cmd
        .to_command()
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .with_context(|| format!("Failed to execute {}", cmd.program().to_string_lossy()))?;

    if !status.success() {
        bail!("Command '{}' failed with {}", cmd, status);
    }

    Ok(())
}
