// Copyright 2026 Ezfuse Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};
use directories::BaseDirs;

use crate::{core::binary, defs};

/// Folder that receives the temporary mountpoint.
pub fn parent_folder(pwd: bool) -> Result<PathBuf> {
    if pwd {
        return env::current_dir().context("Failed to get current directory");
    }

    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or_else(|| anyhow!("Cannot find home directory"))
}

#[derive(Debug)]
pub struct Mountpoint {
    path: PathBuf,
}

impl Mountpoint {
    /// Creates `<parent>/ezmount-<binary>-<random>`.
    pub fn create(parent: &Path, binary: &str) -> Result<Self> {
        let prefix = format!(
            "{}{}-",
            defs::MOUNTPOINT_PREFIX,
            binary::display_name(binary)
        );

        let path = tempfile::Builder::new()
            .prefix(&prefix)
            .tempdir_in(parent)
            .with_context(|| format!("Failed to create mountpoint in {}", parent.display()))?
            .keep();

        tracing::debug!("Created mountpoint {}", path.display());

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Removes the directory only if it is empty, so a filesystem still
    /// mounted on it is never touched.
    pub fn remove(&self) -> Result<()> {
        fs::remove_dir(&self.path)
            .with_context(|| format!("Failed to remove mountpoint {}", self.path.display()))
    }
}
