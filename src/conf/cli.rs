// Copyright 2026 Ezfuse Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "ezfuse",
    version = concat!("version ", env!("CARGO_PKG_VERSION")),
    about = "Helper to mount temporary folders"
)]
pub struct Cli {
    /// type of filesystem, which is also the binary to use to mount it
    #[arg(short = 't', long = "type")]
    pub fs_type: Option<String>,
    /// force type without testing binary before
    #[arg(long = "force")]
    pub force: bool,
    /// create temporary folder in current directory, default is home folder
    #[arg(long = "pwd")]
    pub pwd: bool,
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
    /// print the effective configuration as JSON and exit
    #[arg(long = "show-config")]
    pub show_config: bool,
    /// arguments to pass to the mount command
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub extra_args: Vec<String>,
}
