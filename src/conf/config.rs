// Copyright 2026 Ezfuse Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::defs;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub pwd: bool,
    #[serde(default)]
    pub force: bool,
    #[serde(default)]
    pub shell: Option<String>,
    #[serde(default = "default_opener", deserialize_with = "deserialize_command_flexible")]
    pub opener: Vec<String>,
    #[serde(default = "default_umount", deserialize_with = "deserialize_command_flexible")]
    pub umount: Vec<String>,
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    #[serde(skip)]
    pub verbose: bool,
}

fn default_opener() -> Vec<String> {
    vec![defs::DEFAULT_OPENER.to_string()]
}

fn default_umount() -> Vec<String> {
    defs::DEFAULT_UMOUNT.iter().map(|s| s.to_string()).collect()
}

// Accepts either `umount = "fusermount -u"` or `umount = ["fusermount", "-u"]`
fn deserialize_command_flexible<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrVec {
        String(String),
        Vec(Vec<String>),
    }

    let command = match StringOrVec::deserialize(deserializer)? {
        StringOrVec::Vec(v) => v,
        StringOrVec::String(s) => s.split_whitespace().map(str::to_string).collect(),
    };

    if command.is_empty() {
        return Err(serde::de::Error::custom("command must not be empty"));
    }

    Ok(command)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pwd: false,
            force: false,
            shell: None,
            opener: default_opener(),
            umount: default_umount(),
            log_file: None,
            verbose: false,
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).context("failed to read config file")?;

        let config: Config = toml::from_str(&content).context("failed to parse config file")?;

        Ok(config)
    }

    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", defs::PROGRAM_NAME)
            .map(|dirs| dirs.config_dir().join(defs::CONFIG_FILE_NAME))
    }

    /// Loads `path` when given, otherwise the per-user config file.
    ///
    /// Only the implicit per-user file may be absent.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(config_path) = path {
            return Self::from_file(config_path).with_context(|| {
                format!(
                    "Failed to load config from custom path: {}",
                    config_path.display()
                )
            });
        }

        let Some(default_path) = Self::default_path() else {
            return Ok(Self::default());
        };

        match Self::from_file(&default_path) {
            Ok(config) => Ok(config),
            Err(e) => {
                let is_not_found = e
                    .root_cause()
                    .downcast_ref::<std::io::Error>()
                    .map(|io_err| io_err.kind() == std::io::ErrorKind::NotFound)
                    .unwrap_or(false);

                if is_not_found {
                    Ok(Self::default())
                } else {
                    Err(e).context(format!(
                        "Failed to load default config from {}",
                        default_path.display()
                    ))
                }
            }
        }
    }

    pub fn merge_with_cli(&mut self, pwd: bool, force: bool, verbose: bool) {
        if pwd {
            self.pwd = true;
        }

        if force {
            self.force = true;
        }

        if verbose {
            self.verbose = true;
        }
    }

    /// Shell for the `s` action: config, then `$SHELL`, then bash.
    pub fn resolve_shell(&self, env_shell: Option<String>) -> String {
        self.shell
            .clone()
            .or(env_shell.filter(|s| !s.is_empty()))
            .unwrap_or_else(|| defs::DEFAULT_SHELL.to_string())
    }
}
