// Copyright 2026 Ezfuse Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::io::{BufRead, ErrorKind, Write};

use anyhow::Result;
use colored::Colorize;

use crate::{
    conf::config::Config,
    core::{Action, Mountpoint},
    utils::{CommandLine, System, quote},
};

/// How the session left the mountpoint behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Removed,
    Kept,
}

pub struct Session<S: System> {
    system: S,
    mountpoint: Mountpoint,
    mount_cmd: CommandLine,
    umount_cmd: CommandLine,
    open_cmd: CommandLine,
    shell_cmd: CommandLine,
    mounted: bool,
}

impl<S: System> Session<S> {
    pub fn new(
        system: S,
        mountpoint: Mountpoint,
        binary: &str,
        extra_args: &[String],
        config: &Config,
        shell: &str,
    ) -> Result<Self> {
        let target = mountpoint.path().as_os_str().to_owned();

        let mount_cmd = CommandLine::new(binary)
            .args(extra_args)
            .arg(target.clone());
        let umount_cmd = CommandLine::from_parts(&config.umount)?.arg(target.clone());
        let open_cmd = CommandLine::from_parts(&config.opener)?.arg(target);

        Ok(Self {
            system,
            mountpoint,
            mount_cmd,
            umount_cmd,
            open_cmd,
            shell_cmd: CommandLine::new(shell),
            mounted: false,
        })
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn mountpoint(&self) -> &Mountpoint {
        &self.mountpoint
    }

    /// Announces the mountpoint and performs the first mount.
    ///
    /// On failure the mountpoint is removed and `false` is returned; the
    /// caller exits with a dedicated status.
    pub fn start<W: Write>(&mut self, out: &mut W) -> Result<bool> {
        writeln!(
            out,
            "[{}] Using mountpoint {}",
            "info".green(),
            self.mountpoint.path().display().to_string().blue()
        )?;

        if let Err(e) = self.mount() {
            writeln!(out, "{}", format!("Error while mounting: {e:#}").red())?;
            self.discard(out)?;
            return Ok(false);
        }

        Ok(true)
    }

    /// Menu loop until `x` or `q`.
    pub fn run<R: BufRead, W: Write>(&mut self, input: &mut R, out: &mut W) -> Result<Outcome> {
        loop {
            let action = self.read_action(input, out)?;
            self.apply(action, out)?;

            if action.ends_session() {
                return self.finish(out);
            }
        }
    }

    fn read_action<R: BufRead, W: Write>(&self, input: &mut R, out: &mut W) -> Result<Action> {
        writeln!(out)?;
        for action in Action::ALL {
            writeln!(
                out,
                "{}: {}",
                action.key().to_string().bold(),
                action.description().dimmed()
            )?;
        }

        let prompt = Action::prompt();
        let action = loop {
            write!(out, "{prompt}")?;
            out.flush()?;

            let mut line = String::new();
            match input.read_line(&mut line) {
                Ok(0) => break Action::Exit,
                Ok(_) => {
                    if let Some(action) = Action::parse(&line) {
                        break action;
                    }
                }
                Err(e) if e.kind() == ErrorKind::InvalidData => continue,
                Err(e) => {
                    tracing::warn!("Failed to read input: {}", e);
                    break Action::Exit;
                }
            }
        };

        writeln!(out)?;
        Ok(action)
    }

    /// Brings the mount state in line with `action`, then performs it.
    ///
    /// Command failures are reported on `out` and leave the state unchanged.
    pub fn apply<W: Write>(&mut self, action: Action, out: &mut W) -> Result<()> {
        let ready = if action.wants_unmounted() && self.mounted {
            self.attempt(out, Self::umount)?
        } else if action.wants_mounted() && !self.mounted {
            self.attempt(out, Self::mount)?
        } else {
            true
        };

        if !ready {
            return Ok(());
        }

        match action {
            Action::Open => {
                self.attempt(out, Self::open)?;
            }
            Action::Shell => {
                self.attempt(out, Self::shell)?;
            }
            _ => {}
        }

        Ok(())
    }

    fn attempt<W: Write>(
        &mut self,
        out: &mut W,
        step: fn(&mut Self) -> Result<()>,
    ) -> Result<bool> {
        match step(self) {
            Ok(()) => Ok(true),
            Err(e) => {
                writeln!(out, "{}", format!("Error: {e:#}").red())?;
                Ok(false)
            }
        }
    }

    pub fn mount(&mut self) -> Result<()> {
        self.system.run(&self.mount_cmd, None, true)?;
        self.mounted = true;

        if self.system.is_mounted(self.mountpoint.path()) {
            tracing::debug!("{} is mounted", self.mountpoint.path().display());
        } else {
            tracing::warn!(
                "Mount command succeeded but {} does not appear in the mount table",
                self.mountpoint.path().display()
            );
        }

        Ok(())
    }

    pub fn umount(&mut self) -> Result<()> {
        self.system.run(&self.umount_cmd, None, true)?;
        self.mounted = false;
        Ok(())
    }

    fn open(&mut self) -> Result<()> {
        self.system.run(&self.open_cmd, None, true)
    }

    fn shell(&mut self) -> Result<()> {
        self.system
            .run(&self.shell_cmd, Some(self.mountpoint.path()), false)
    }

    /// Removes the mountpoint when nothing is mounted on it, otherwise keeps
    /// it and tells the user how to clean up.
    pub fn finish<W: Write>(&mut self, out: &mut W) -> Result<Outcome> {
        if self.mounted && !self.system.is_mounted(self.mountpoint.path()) {
            tracing::info!(
                "{} is no longer mounted",
                self.mountpoint.path().display()
            );
            self.mounted = false;
        }

        if !self.mounted {
            match self.discard(out) {
                Ok(()) => return Ok(Outcome::Removed),
                Err(e) => writeln!(out, "{}", format!("Error: {e:#}").red())?,
            }
        }

        let mp = self.mountpoint.path().display().to_string();
        writeln!(out, "[{}] Keeping mountpoint {}", "info".green(), mp.blue())?;

        let cleanup = format!("{}; rmdir {}", self.umount_cmd, quote(&mp));
        writeln!(out, "[{}] To umount it run: {}", "info".green(), cleanup.yellow())?;

        Ok(Outcome::Kept)
    }

    fn discard<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(
            out,
            "[{}] Remove mountpoint {}",
            "info".green(),
            self.mountpoint.path().display().to_string().blue()
        )?;
        self.mountpoint.remove()
    }
}
