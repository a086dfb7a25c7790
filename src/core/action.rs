// Copyright 2026 Ezfuse Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Exit,
    UmountExit,
    Open,
    Shell,
    Mount,
    Umount,
}

impl Action {
    /// Menu order.
    pub const ALL: [Action; 6] = [
        Action::Exit,
        Action::UmountExit,
        Action::Open,
        Action::Shell,
        Action::Mount,
        Action::Umount,
    ];

    pub fn key(self) -> char {
        match self {
            Action::Exit => 'x',
            Action::UmountExit => 'q',
            Action::Open => 'o',
            Action::Shell => 's',
            Action::Mount => 'm',
            Action::Umount => 'u',
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Action::Exit => "exit",
            Action::UmountExit => "umount and exit",
            Action::Open => "xdg-open",
            Action::Shell => "shell",
            Action::Mount => "mount",
            Action::Umount => "umount",
        }
    }

    /// Parses one line of user input; surrounding blanks and case are ignored.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim().to_lowercase();
        let mut chars = input.chars();
        let key = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        Self::ALL.into_iter().find(|action| action.key() == key)
    }

    /// Actions that need the filesystem unmounted first.
    pub fn wants_unmounted(self) -> bool {
        matches!(self, Action::UmountExit | Action::Umount)
    }

    /// Actions that need the filesystem mounted first.
    pub fn wants_mounted(self) -> bool {
        matches!(self, Action::Open | Action::Shell | Action::Mount)
    }

    pub fn ends_session(self) -> bool {
        matches!(self, Action::Exit | Action::UmountExit)
    }

    /// `[x/q/o/s/m/u] `
    pub fn prompt() -> String {
        let keys: Vec<String> = Self::ALL.iter().map(|a| a.key().to_string()).collect();
        format!("[{}] ", keys.join("/"))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}
