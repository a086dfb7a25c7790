// Copyright 2026 Ezfuse Developers
// SPDX-License-Identifier: GPL-3.0-or-later

pub mod log;
pub mod mount;
pub mod process;
pub mod signal;

pub use self::{log::*, mount::*, process::*};
