// Copyright 2026 Ezfuse Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::{
    io::{self, ErrorKind, Read},
    sync::atomic::{AtomicBool, Ordering},
};

use anyhow::{Context, Result};
use nix::sys::signal::{SaFlags, SigAction, SigHandler, SigSet, Signal, sigaction};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

extern "C" fn on_sigint(_: nix::libc::c_int) {
    INTERRUPTED.store(true, Ordering::SeqCst);
}

/// Catches SIGINT without `SA_RESTART`, so a blocked read fails with EINTR
/// instead of the process dying. Children get the default action back on exec.
pub fn install_interrupt_handler() -> Result<()> {
    let action = SigAction::new(
        SigHandler::Handler(on_sigint),
        SaFlags::empty(),
        SigSet::empty(),
    );

    // SAFETY: the handler only stores to an atomic.
    unsafe { sigaction(Signal::SIGINT, &action) }.context("Failed to install SIGINT handler")?;

    Ok(())
}

pub fn take_interrupt() -> bool {
    INTERRUPTED.swap(false, Ordering::SeqCst)
}

/// Turns a read interrupted by Ctrl-C into end of input.
pub struct Interruptible<R> {
    inner: R,
}

impl<R: Read> Interruptible<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl Interruptible<io::Stdin> {
    pub fn stdin() -> Self {
        Self::new(io::stdin())
    }
}

impl<R: Read> Read for Interruptible<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.inner.read(buf) {
            Err(e) if e.kind() == ErrorKind::Interrupted && take_interrupt() => Ok(0),
            other => other,
        }
    }
}
