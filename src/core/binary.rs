// Copyright 2026 Ezfuse Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::{path::Path, sync::OnceLock};

use anyhow::{Context, Result, bail};
use regex_lite::Regex;

use crate::{
    defs,
    utils::{CommandLine, run_silent},
};

static PROGRAM_NAME_REGEX: OnceLock<Regex> = OnceLock::new();

/// Picks the mount binary: the `--type` flag, else the name the program was
/// invoked as (`ezsshfs` mounts with `sshfs`).
pub fn resolve(fs_type: Option<&str>, argv0: &str) -> Result<String> {
    if let Some(binary) = fs_type {
        if binary.is_empty() {
            bail!("Empty filesystem type");
        }
        return Ok(binary.to_string());
    }

    let prog = Path::new(argv0)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    if prog == defs::PROGRAM_NAME {
        bail!("Cannot find fuse mount binary, use --type to set it");
    }

    let re = PROGRAM_NAME_REGEX.get_or_init(|| {
        Regex::new(&format!("^{}(.+)$", defs::PROGRAM_PREFIX)).expect("Invalid Regex pattern")
    });

    match re.captures(&prog).and_then(|caps| caps.get(1)) {
        Some(binary) => Ok(binary.as_str().to_string()),
        None => bail!("Cannot find fuse mount binary from program name '{prog}'"),
    }
}

/// Checks the binary exists and answers `--version`.
pub fn probe(binary: &str) -> Result<()> {
    run_silent(&CommandLine::new(binary).arg(defs::VERSION_FLAG))
        .with_context(|| format!("Cannot use '{binary}' as a mount binary"))
}

/// Name usable inside a directory name, even when the binary is a path.
pub fn display_name(binary: &str) -> String {
    Path::new(binary)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "fuse".to_string())
}
