// Copyright 2026 Ezfuse Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::{
    io::{self, BufReader},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::Parser;
use ezfuse::{
    conf::{cli::Cli, config::Config},
    core::{Mountpoint, Outcome, Session, binary, mountpoint},
    defs,
    utils::{self, HostSystem, signal::Interruptible},
};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    config.merge_with_cli(cli.pwd, cli.force, cli.verbose);

    if cli.show_config {
        let json =
            serde_json::to_string_pretty(&config).context("Failed to serialize config to JSON")?;
        println!("{}", json);
        return Ok(ExitCode::SUCCESS);
    }

    let _log_guard = utils::init_logging(config.verbose, config.log_file.as_deref())
        .context("Failed to initialize logging")?;

    match cli.config.clone().or_else(Config::default_path) {
        Some(path) => tracing::debug!("Config file: {}", path.display()),
        None => tracing::debug!("No config directory available, using defaults"),
    }

    let argv0 = std::env::args_os()
        .next()
        .map(|arg| arg.to_string_lossy().into_owned())
        .unwrap_or_default();
    let binary = binary::resolve(cli.fs_type.as_deref(), &argv0)?;
    tracing::debug!("Mount binary: {}", binary);

    if config.force {
        tracing::debug!("Skipping {} check of {}", defs::VERSION_FLAG, binary);
    } else {
        binary::probe(&binary)?;
    }

    let parent = mountpoint::parent_folder(config.pwd)?;
    let mountpoint = Mountpoint::create(&parent, &binary)?;
    let shell = config.resolve_shell(std::env::var("SHELL").ok());

    let mut session = Session::new(
        HostSystem,
        mountpoint,
        &binary,
        &cli.extra_args,
        &config,
        &shell,
    )?;

    let mut out = io::stdout();

    // Before the first mount, so Ctrl-C at a password prompt still cleans up
    utils::signal::install_interrupt_handler()?;

    if !session.start(&mut out)? {
        return Ok(ExitCode::from(defs::EXIT_MOUNT_FAILED));
    }

    let mut input = BufReader::new(Interruptible::stdin());
    match session.run(&mut input, &mut out)? {
        Outcome::Removed => tracing::debug!("Mountpoint removed"),
        Outcome::Kept => tracing::debug!("Mountpoint kept"),
    }

    Ok(ExitCode::SUCCESS)
}
